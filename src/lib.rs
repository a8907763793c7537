//! Perceptual image hashing.
//!
//! Four classic fingerprints over a decoded [`PixelBuffer`]:
//! [`average_hash`] (mean threshold), [`perceptual_hash`] (DCT low
//! frequencies against their median), and [`difference_hash_horizontal`] /
//! [`difference_hash_vertical`] (adjacent-pixel gradient signs). Every
//! encoder is a pure function returning an [`ImageHash`] of
//! `hash_size * hash_size` bits; similarity between two images is the
//! Hamming [`ImageHash::distance`] between their hashes, and each call is
//! independent, so hashing many images in parallel needs no coordination.
//!
//! ```
//! use pixhash::{HashConfig, PixelBuffer, average_hash};
//!
//! let pixels = PixelBuffer::new(2, 2, 1, vec![0, 64, 128, 255])?;
//! let hash = average_hash(&pixels, HashConfig::default())?;
//! assert_eq!(hash.len(), 64);
//! println!("ahash: {hash}");
//! # Ok::<(), pixhash::HashError>(())
//! ```

use serde::{Deserialize, Serialize};

mod ahash;
mod dct;
mod dhash;
mod error;
mod grayscale;
mod imagehash;
mod phash;
mod pixels;

pub use crate::ahash::average_hash;
pub use crate::dhash::{
    DiffAxis, difference_hash, difference_hash_horizontal, difference_hash_vertical,
};
pub use crate::error::{HashError, Result};
pub use crate::imagehash::ImageHash;
pub use crate::phash::{HIGHFREQ_FACTOR, perceptual_hash};
pub use crate::pixels::PixelBuffer;

/// Largest accepted hash side length. Past this a digest stops being a
/// compact fingerprint, and the bound keeps the derived grid dimensions
/// (`hash_size + 1`, `hash_size * 4`) trivially inside `u32`.
pub const MAX_HASH_SIZE: u32 = 512;

/// Per-call hashing parameters, passed by value into every encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashConfig {
    /// Side length of the hash grid; the output carries
    /// `hash_size * hash_size` bits.
    pub hash_size: u32,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self { hash_size: 8 }
    }
}

impl HashConfig {
    pub fn new(hash_size: u32) -> Self {
        Self { hash_size }
    }

    /// Rejects sizes outside `1..=MAX_HASH_SIZE`.
    pub fn validate(&self) -> Result<()> {
        if self.hash_size == 0 || self.hash_size > MAX_HASH_SIZE {
            return Err(HashError::InvalidConfig {
                reason: format!(
                    "hash_size must be within 1..={MAX_HASH_SIZE}, got {}",
                    self.hash_size
                ),
            });
        }
        Ok(())
    }
}
