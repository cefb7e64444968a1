// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (c) 2025 Markus Zehnder

use crate::{BYTES_PER_PIXEL, Size, split_xrgb};

use image::{Rgb, RgbImage};
use log::debug;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("raw frame has {actual} bytes, expected {expected} bytes")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("raw frame size {width}x{height} is too large")]
    SizeOverflow { width: u32, height: u32 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Number of bytes of a raw frame with the given dimensions, `None` on overflow.
pub fn expected_len(size: Size) -> Option<usize> {
    (size.0 as usize)
        .checked_mul(size.1 as usize)?
        .checked_mul(BYTES_PER_PIXEL)
}

/// A XRGB8888 buffer interpreted with out-of-band dimensions.
///
/// The buffer length always equals `width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RawFrame {
    /// Wrap raw XRGB8888 data. Fails if the data length doesn't match the frame size, which is the
    /// same rule the compositor applies before accepting a wallpaper.
    pub fn from_bytes(data: impl Into<Vec<u8>>, size: Size) -> Result<Self, FrameError> {
        let data = data.into();
        let expected = expected_len(size).ok_or(FrameError::SizeOverflow {
            width: size.0,
            height: size.1,
        })?;

        if data.len() != expected {
            return Err(FrameError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width: size.0,
            height: size.1,
            data,
        })
    }

    /// Read and validate a raw frame file.
    pub fn load<P: AsRef<Path>>(path: P, size: Size) -> Result<Self, FrameError> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        debug!("Read raw frame {path:?}: {} bytes", data.len());

        Self::from_bytes(data, size)
    }

    pub fn dimensions(&self) -> Size {
        (self.width, self.height)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the XRGB8888 word of the pixel at the given position.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let word = self.data.get(offset..offset + BYTES_PER_PIXEL)?;

        Some(u32::from_le_bytes(word.try_into().ok()?))
    }

    /// Iterate over all pixel words in row-major order.
    pub fn words(&self) -> impl Iterator<Item = u32> + '_ {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|word| u32::from_le_bytes([word[0], word[1], word[2], word[3]]))
    }

    /// Decode the frame back into an RGB image.
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut img = RgbImage::new(self.width, self.height);
        for (pixel, word) in img.pixels_mut().zip(self.words()) {
            *pixel = Rgb(split_xrgb(word));
        }

        img
    }
}
