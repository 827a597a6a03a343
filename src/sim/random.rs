//! Random source for effect selection
//!
//! Runtime randomness is unseeded: every session draws a fresh `Pcg32` seed
//! from the thread RNG. Tests swap in a seeded or scripted source through
//! the same trait.

use std::cell::RefCell;
use std::rc::Rc;

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// The draws the effect engine needs
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`
    fn next_below(&mut self, bound: u32) -> u32;
    /// Uniform integer in `[low, high)`
    fn next_in(&mut self, low: u32, high: u32) -> u32;
    /// Fair coin
    fn next_bool(&mut self) -> bool;
}

impl<R: RngCore> RandomSource for R {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.random_range(0..bound)
    }

    fn next_in(&mut self, low: u32, high: u32) -> u32 {
        self.random_range(low..high)
    }

    fn next_bool(&mut self) -> bool {
        self.random_bool(0.5)
    }
}

/// Random source shared by the selector and the effects it builds
pub type SharedRandom = Rc<RefCell<dyn RandomSource>>;

/// Fresh unseeded source
pub fn entropy_source() -> SharedRandom {
    let rng = Pcg32::from_rng(&mut rand::rng());
    Rc::new(RefCell::new(rng))
}

/// Reproducible source (tests, benchmarks)
pub fn seeded_source(seed: u64) -> SharedRandom {
    Rc::new(RefCell::new(Pcg32::seed_from_u64(seed)))
}
