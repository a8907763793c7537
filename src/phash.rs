// src/phash.rs
//
// DCT based perceptual hash. Bits compare the lowest-frequency block of an
// oversampled grayscale thumbnail's DCT against the block median, so the
// digest tracks coarse structure and shrugs off uniform brightness shifts.

//     This program is free software: you can redistribute it and/or modify it under the terms of the
//     GNU General Public License as published by the Free Software Foundation, either version 3 of
//     the License, or (at your option) any later version.
//     This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
//     without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See
//     the GNU General Public License for more details.
//     You should have received a copy of the GNU General Public License along with this program.
//     If not, see <https://www.gnu.org/licenses/>.

use crate::HashConfig;
use crate::dct::Dct2d;
use crate::error::Result;
use crate::grayscale::resample;
use crate::imagehash::ImageHash;
use crate::pixels::PixelBuffer;

/// Ratio between the DCT input grid and the hash side length. Fixed and
/// part of the digest contract: changing it changes which images collide.
pub const HIGHFREQ_FACTOR: u32 = 4;

/// Perceptual hash: resample to a `hash_size * 4` square, run a 2D DCT,
/// crop the top-left `hash_size` x `hash_size` frequency block (DC
/// included) and threshold every coefficient against the block median.
///
/// Ties and the median itself go to 0. Keeping DC inside the median makes
/// a uniform brightness shift move the threshold along with the DC cell,
/// so the bits stay put.
pub fn perceptual_hash(pixels: &PixelBuffer, config: HashConfig) -> Result<ImageHash> {
    config.validate()?;
    let n = config.hash_size as usize;
    let highres = config.hash_size * HIGHFREQ_FACTOR;

    // 1. Oversampled grayscale thumbnail
    let grid = resample(pixels, highres, highres)?;
    let highres = highres as usize;
    let mut matrix = grid.into_data();

    // 2. 2D DCT in place
    Dct2d::new(highres).forward(&mut matrix);

    // 3. Crop the top-left n x n block, the lowest frequencies
    let mut lowfreq = Vec::with_capacity(n * n);
    for y in 0..n {
        let start = y * highres;
        lowfreq.extend_from_slice(&matrix[start..start + n]);
    }

    // 4. Median of the block, averaging the two middles for even counts
    let mut sorted = lowfreq.clone();
    sorted.sort_unstable_by(f32::total_cmp);
    let median = if sorted.len() % 2 == 0 {
        (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
    } else {
        sorted[sorted.len() / 2]
    };

    // 5. One bit per coefficient
    let bits: Vec<bool> = lowfreq.iter().map(|&v| v > median).collect();
    Ok(ImageHash::from_bits(&bits))
}
