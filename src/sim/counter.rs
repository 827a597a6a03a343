//! Shared counters
//!
//! Bricks left, lives, the extra paddle's lease and each ball's hit count are
//! read and written from several places (effects, the tick, the camera).
//! Cloning a counter shares the cell. Only the simulation thread mutates them.

use std::cell::Cell;
use std::rc::Rc;

/// Shared integer counter
#[derive(Debug, Clone, Default)]
pub struct Counter(Rc<Cell<i32>>);

impl Counter {
    pub fn new(value: i32) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.0.get()
    }

    pub fn increment(&self) {
        self.0.set(self.0.get() + 1);
    }

    pub fn decrement(&self) {
        self.0.set(self.0.get() - 1);
    }

    pub fn increase_by(&self, delta: i32) {
        self.0.set(self.0.get() + delta);
    }

    pub fn set(&self, value: i32) {
        self.0.set(value);
    }

    pub fn reset(&self) {
        self.0.set(0);
    }

    /// True if both handles point at the same cell
    pub fn shares_with(&self, other: &Counter) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Counter clamped to `[0, bound]`
#[derive(Debug, Clone)]
pub struct BoundedCounter {
    inner: Counter,
    bound: i32,
}

impl BoundedCounter {
    pub fn new(value: i32, bound: i32) -> Self {
        Self {
            inner: Counter::new(value.clamp(0, bound)),
            bound,
        }
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.inner.value()
    }

    #[inline]
    pub fn bound(&self) -> i32 {
        self.bound
    }

    pub fn increment(&self) {
        self.increase_by(1);
    }

    pub fn decrement(&self) {
        self.inner.set((self.inner.value() - 1).max(0));
    }

    pub fn increase_by(&self, delta: i32) {
        self.inner.set((self.inner.value() + delta).clamp(0, self.bound));
    }

    /// Reset to `value`, respecting the bound
    pub fn reset_to(&self, value: i32) {
        self.inner.set(value.clamp(0, self.bound));
    }
}

/// Countdown that stops at zero
///
/// Backs the extra paddle: it is live while the lease is positive.
#[derive(Debug, Clone, Default)]
pub struct LeaseCounter(Counter);

impl LeaseCounter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn remaining(&self) -> i32 {
        self.0.value()
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.0.value() < 1
    }

    /// Start a new lease of `ticks` hits
    pub fn renew(&self, ticks: i32) {
        self.0.set(ticks.max(0));
    }

    /// Consume one hit
    pub fn consume(&self) {
        if self.0.value() > 0 {
            self.0.decrement();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_clone_shares_cell() {
        let bricks = Counter::new(8);
        let handle = bricks.clone();
        handle.decrement();
        assert_eq!(bricks.value(), 7);
        assert!(bricks.shares_with(&handle));
        assert!(!bricks.shares_with(&Counter::new(7)));
    }

    #[test]
    fn test_bounded_counter_clamps_up() {
        let lives = BoundedCounter::new(3, 4);
        lives.increment();
        assert_eq!(lives.value(), 4);
        lives.increment();
        assert_eq!(lives.value(), 4);
        lives.increase_by(10);
        assert_eq!(lives.value(), 4);
    }

    #[test]
    fn test_bounded_counter_clamps_initial_and_floor() {
        let lives = BoundedCounter::new(9, 4);
        assert_eq!(lives.value(), 4);
        lives.reset_to(0);
        lives.decrement();
        assert_eq!(lives.value(), 0);
    }

    #[test]
    fn test_lease_never_negative() {
        let lease = LeaseCounter::new();
        assert!(lease.is_expired());
        lease.consume();
        assert_eq!(lease.remaining(), 0);

        lease.renew(2);
        assert!(!lease.is_expired());
        lease.consume();
        lease.consume();
        lease.consume();
        assert_eq!(lease.remaining(), 0);
        assert!(lease.is_expired());
    }
}
