// src/pixels.rs
//
// Decoded-image value type handed to the hashing core. All input validation
// happens at construction, so the encoders can assume a well-formed buffer.

use image::DynamicImage;

use crate::error::{HashError, Result};

/// Row-major interleaved pixel data with 1 (gray), 3 (RGB) or 4 (RGBA)
/// channels per pixel, 8 bits per channel.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Builds a buffer from raw decoded bytes.
    ///
    /// Fails if either dimension is zero, the channel count is not 1, 3
    /// or 4, or `data` does not hold exactly `width * height * channels`
    /// bytes.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(HashError::InvalidImage {
                reason: format!("zero-sized image ({width}x{height})"),
            });
        }
        if !matches!(channels, 1 | 3 | 4) {
            return Err(HashError::InvalidImage {
                reason: format!("unsupported channel count {channels}"),
            });
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(channels as usize))
            .ok_or_else(|| HashError::InvalidImage {
                reason: format!("image dimensions {width}x{height}x{channels} overflow usize"),
            })?;
        if data.len() != expected {
            return Err(HashError::InvalidImage {
                reason: format!(
                    "pixel data holds {} bytes, {width}x{height}x{channels} needs {expected}",
                    data.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Adapts a decoded `image` crate frame. 8-bit gray, RGB and RGBA
    /// layouts are taken as-is; everything else goes through an RGBA8
    /// conversion.
    pub fn from_image(img: &DynamicImage) -> Result<Self> {
        match img {
            DynamicImage::ImageLuma8(gray) => {
                Self::new(gray.width(), gray.height(), 1, gray.as_raw().clone())
            }
            DynamicImage::ImageRgb8(rgb) => {
                Self::new(rgb.width(), rgb.height(), 3, rgb.as_raw().clone())
            }
            DynamicImage::ImageRgba8(rgba) => {
                Self::new(rgba.width(), rgba.height(), 4, rgba.as_raw().clone())
            }
            other => {
                let rgba = other.to_rgba8();
                Self::new(rgba.width(), rgba.height(), 4, rgba.into_raw())
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }
}
