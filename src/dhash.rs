// src/dhash.rs

use crate::HashConfig;
use crate::error::Result;
use crate::grayscale::resample;
use crate::imagehash::ImageHash;
use crate::pixels::PixelBuffer;

/// Axis a difference hash walks when comparing neighbor cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffAxis {
    Horizontal,
    Vertical,
}

/// Difference hash along `axis`: the grid is one cell wider (horizontal)
/// or taller (vertical) than the hash side, and every bit records the
/// gradient sign between a cell and its successor.
///
/// Bit = 1 when intensity strictly increases moving rightward or
/// downward; ties go to 0. That is the convention the common dhash
/// tooling uses, so digests line up with it.
pub fn difference_hash(
    pixels: &PixelBuffer,
    config: HashConfig,
    axis: DiffAxis,
) -> Result<ImageHash> {
    config.validate()?;
    let n = config.hash_size;
    let grid = match axis {
        DiffAxis::Horizontal => resample(pixels, n + 1, n)?,
        DiffAxis::Vertical => resample(pixels, n, n + 1)?,
    };

    let n = n as usize;
    let mut bits = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let here = grid.at(x, y);
            let next = match axis {
                DiffAxis::Horizontal => grid.at(x + 1, y),
                DiffAxis::Vertical => grid.at(x, y + 1),
            };
            bits.push(next > here);
        }
    }
    Ok(ImageHash::from_bits(&bits))
}

/// Difference hash over left-to-right neighbor pairs.
pub fn difference_hash_horizontal(pixels: &PixelBuffer, config: HashConfig) -> Result<ImageHash> {
    difference_hash(pixels, config, DiffAxis::Horizontal)
}

/// Difference hash over top-to-bottom neighbor pairs.
pub fn difference_hash_vertical(pixels: &PixelBuffer, config: HashConfig) -> Result<ImageHash> {
    difference_hash(pixels, config, DiffAxis::Vertical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HashError;
    use rand::prelude::*;

    // 9x8 ramp, one 25-step per column; resampling at the grid's own size
    // keeps every cell exact.
    fn rising_columns() -> PixelBuffer {
        let data: Vec<u8> = (0..9u32 * 8).map(|i| ((i % 9) * 25) as u8).collect();
        PixelBuffer::new(9, 8, 1, data).unwrap()
    }

    #[test]
    fn rising_gradient_is_all_ones() {
        let hash = difference_hash_horizontal(&rising_columns(), HashConfig::default()).unwrap();
        assert_eq!(hash.to_hex(), "ffffffffffffffff");
    }

    #[test]
    fn falling_gradient_is_all_zeros() {
        let data: Vec<u8> = (0..9u32 * 8).map(|i| (200 - (i % 9) * 25) as u8).collect();
        let buf = PixelBuffer::new(9, 8, 1, data).unwrap();
        let hash = difference_hash_horizontal(&buf, HashConfig::default()).unwrap();
        assert_eq!(hash.to_hex(), "0000000000000000");
    }

    #[test]
    fn downward_gradient_is_all_ones_vertically() {
        let data: Vec<u8> = (0..8u32 * 9).map(|i| ((i / 8) * 25) as u8).collect();
        let buf = PixelBuffer::new(8, 9, 1, data).unwrap();
        let hash = difference_hash_vertical(&buf, HashConfig::default()).unwrap();
        assert_eq!(hash.to_hex(), "ffffffffffffffff");
    }

    #[test]
    fn axes_disagree_on_a_directional_gradient() {
        // Columns rise left to right, rows are flat
        let data: Vec<u8> = (0..64u32 * 64).map(|i| ((i % 64) * 3) as u8).collect();
        let buf = PixelBuffer::new(64, 64, 1, data).unwrap();
        let horizontal = difference_hash_horizontal(&buf, HashConfig::default()).unwrap();
        let vertical = difference_hash_vertical(&buf, HashConfig::default()).unwrap();
        assert_eq!(horizontal.count_ones(), 64);
        assert_eq!(vertical.count_ones(), 0);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let mut rng = rand::rng();
        let data: Vec<u8> = (0..40 * 30 * 3).map(|_| rng.random()).collect();
        let buf = PixelBuffer::new(40, 30, 3, data).unwrap();
        for axis in [DiffAxis::Horizontal, DiffAxis::Vertical] {
            let first = difference_hash(&buf, HashConfig::default(), axis).unwrap();
            let second = difference_hash(&buf, HashConfig::default(), axis).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn hash_size_sets_the_bit_count() {
        let buf = PixelBuffer::new(12, 12, 1, vec![80; 144]).unwrap();
        let hash = difference_hash_horizontal(&buf, HashConfig::new(4)).unwrap();
        assert_eq!(hash.len(), 16);
        let hash = difference_hash_vertical(&buf, HashConfig::new(4)).unwrap();
        assert_eq!(hash.len(), 16);
    }

    #[test]
    fn zero_hash_size_is_a_config_error() {
        let buf = PixelBuffer::new(4, 4, 1, vec![0; 16]).unwrap();
        for axis in [DiffAxis::Horizontal, DiffAxis::Vertical] {
            assert!(matches!(
                difference_hash(&buf, HashConfig::new(0), axis),
                Err(HashError::InvalidConfig { .. })
            ));
        }
    }
}
