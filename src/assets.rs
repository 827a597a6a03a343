//! Opaque asset handles
//!
//! Images and sounds are decoded and played by the presentation layer. The
//! simulation only carries handles around so spawned objects know what to
//! draw and which sound to play on impact.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Handle to a loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u32);

/// Handle to a loaded sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundHandle(pub u32);

/// Source of asset handles, keyed by path
pub trait AssetLoader {
    /// Load an image; `transparent` asks the backend to key out the background
    fn read_image(&mut self, path: &str, transparent: bool) -> ImageHandle;
    /// Load a sound
    fn read_sound(&mut self, path: &str) -> SoundHandle;
}

/// Loader that hands out stable ids per path without touching the filesystem
///
/// Used by the headless runner and tests. Loading the same path twice yields
/// the same handle.
#[derive(Debug, Default)]
pub struct PathAssets {
    images: HashMap<String, ImageHandle>,
    sounds: HashMap<String, SoundHandle>,
    next_id: u32,
}

impl PathAssets {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Number of distinct assets handed out so far
    pub fn len(&self) -> usize {
        self.images.len() + self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssetLoader for PathAssets {
    fn read_image(&mut self, path: &str, _transparent: bool) -> ImageHandle {
        if let Some(handle) = self.images.get(path) {
            return *handle;
        }
        let handle = ImageHandle(self.allocate());
        log::debug!("Image {} -> {:?}", path, handle);
        self.images.insert(path.to_string(), handle);
        handle
    }

    fn read_sound(&mut self, path: &str) -> SoundHandle {
        if let Some(handle) = self.sounds.get(path) {
            return *handle;
        }
        let handle = SoundHandle(self.allocate());
        log::debug!("Sound {} -> {:?}", path, handle);
        self.sounds.insert(path.to_string(), handle);
        handle
    }
}
