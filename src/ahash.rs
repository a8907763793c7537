// src/ahash.rs

use crate::HashConfig;
use crate::error::Result;
use crate::grayscale::resample;
use crate::imagehash::ImageHash;
use crate::pixels::PixelBuffer;

/// Average hash: each bit records whether one cell of an n x n grayscale
/// thumbnail is strictly brighter than the thumbnail mean.
///
/// Ties go to 0, so a uniform image hashes to all zeros.
pub fn average_hash(pixels: &PixelBuffer, config: HashConfig) -> Result<ImageHash> {
    config.validate()?;
    let n = config.hash_size;
    let cells = resample(pixels, n, n)?.into_data();

    // f64 keeps the mean exact well past any practical hash size
    let mean = cells.iter().map(|&v| f64::from(v)).sum::<f64>() / cells.len() as f64;

    let bits: Vec<bool> = cells.iter().map(|&v| f64::from(v) > mean).collect();
    Ok(ImageHash::from_bits(&bits))
}
