// src/grayscale.rs
//
// Grayscale reduction and exact-size resampling. Every encoder funnels its
// input through resample(); the result is a small f32 intensity grid.

use fast_image_resize as fr;
use fast_image_resize::ResizeOptions;
use fast_image_resize::images::Image;

use crate::error::{HashError, Result};
use crate::pixels::PixelBuffer;

/// Single-channel intensity grid, row-major, values in 0.0..=255.0.
#[derive(Debug, Clone)]
pub(crate) struct PixelGrid {
    width: usize,
    data: Vec<f32>,
}

impl PixelGrid {
    /// Intensity at column `x`, row `y`.
    pub(crate) fn at(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    pub(crate) fn into_data(self) -> Vec<f32> {
        self.data
    }
}

// BT.601 luma with round-to-nearest, exact in integer arithmetic.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}

/// Reduces `pixels` to one channel and resamples to exactly
/// `target_width` x `target_height` with a bilinear kernel.
pub(crate) fn resample(
    pixels: &PixelBuffer,
    target_width: u32,
    target_height: u32,
) -> Result<PixelGrid> {
    // 1. Collapse to a single channel
    let gray: Vec<u8> = match pixels.channels() {
        1 => pixels.data().to_vec(),
        3 => pixels
            .data()
            .chunks_exact(3)
            .map(|p| luma(p[0], p[1], p[2]))
            .collect(),
        // 4 channels; alpha is ignored
        _ => pixels
            .data()
            .chunks_exact(4)
            .map(|p| luma(p[0], p[1], p[2]))
            .collect(),
    };

    // 2. Bilinear resize to the exact grid the encoder asked for
    let src = Image::from_vec_u8(pixels.width(), pixels.height(), gray, fr::PixelType::U8)
        .map_err(|e| HashError::InvalidImage {
            reason: e.to_string(),
        })?;
    let mut dst = Image::new(target_width, target_height, fr::PixelType::U8);
    let options =
        ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Bilinear));
    let mut resizer = fr::Resizer::new();
    resizer
        .resize(&src, &mut dst, &options)
        .map_err(|e| HashError::InvalidImage {
            reason: e.to_string(),
        })?;

    Ok(PixelGrid {
        width: target_width as usize,
        data: dst.into_vec().into_iter().map(f32::from).collect(),
    })
}
