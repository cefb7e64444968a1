// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (c) 2025 Markus Zehnder

//! XRGB8888 raw frame format.
//!
//! A raw frame is a headerless sequence of little-endian `u32` words, one per pixel in row-major
//! order. Each word is `0x00RRGGBB`: the top byte is always zero. The frame dimensions are not
//! stored in the file, the reader has to know them, e.g. from its own display resolution.

#![forbid(non_ascii_idents)]
#![deny(unsafe_code)]

use bytes::{BufMut, BytesMut};
use image::{ImageBuffer, Pixel};
use std::ops::Deref;

mod frame;

pub use frame::{FrameError, RawFrame, expected_len};

/// Well-known location where the compositor loads its wallpaper from.
pub const WALLPAPER_PATH: &str = "/usr/share/wallpaper.raw";

/// Every pixel occupies one `u32` word.
pub const BYTES_PER_PIXEL: usize = 4;

/// Width, height type
pub type Size = (u32, u32);

/// Pack an RGB 888 pixel into an XRGB8888 word.
#[inline]
pub const fn xrgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Split an XRGB8888 word into its red, green and blue channels. The top byte is ignored.
#[inline]
pub const fn split_xrgb(word: u32) -> [u8; 3] {
    [(word >> 16) as u8, (word >> 8) as u8, word as u8]
}

/// Trait definition to get a XRGB8888 representation from a source image.
pub trait ToXrgb8888 {
    /// Get the XRGB8888 representation of the image in little endian format.
    ///
    /// Any alpha channel is dropped, not composited.
    fn to_xrgb8888_le(&self) -> BytesMut;
}

impl<P, C> ToXrgb8888 for ImageBuffer<P, C>
where
    P: Pixel<Subpixel = u8>,
    C: Deref<Target = [u8]>,
{
    fn to_xrgb8888_le(&self) -> BytesMut {
        let mut raw = BytesMut::with_capacity(
            self.width() as usize * self.height() as usize * BYTES_PER_PIXEL,
        );

        // `pixels()` iterates row by row, left to right
        for pixel in self.pixels() {
            let [r, g, b] = pixel.to_rgb().0;
            raw.put_u32_le(xrgb(r, g, b));
        }

        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 0, 0x0000_0000)]
    #[case(255, 0, 0, 0x00FF_0000)]
    #[case(0, 255, 0, 0x0000_FF00)]
    #[case(0, 0, 255, 0x0000_00FF)]
    #[case(255, 255, 255, 0x00FF_FFFF)]
    #[case(0x12, 0x34, 0x56, 0x0012_3456)]
    fn xrgb_packs_channels(#[case] r: u8, #[case] g: u8, #[case] b: u8, #[case] word: u32) {
        assert_eq!(word, xrgb(r, g, b));
        assert_eq!([r, g, b], split_xrgb(word));
    }

    #[test]
    fn split_xrgb_ignores_top_byte() {
        assert_eq!([0xAB, 0xCD, 0xEF], split_xrgb(0xFFAB_CDEF));
    }

    #[test]
    fn red_image_is_little_endian() {
        let img = RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]));
        let raw = img.to_xrgb8888_le();

        assert_eq!(16, raw.len());
        for word in raw.chunks_exact(4) {
            assert_eq!([0x00u8, 0x00, 0xFF, 0x00], word);
        }
    }

    #[test]
    fn pixels_are_written_in_row_major_order() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([1, 0, 0]));
        img.put_pixel(1, 0, Rgb([2, 0, 0]));
        img.put_pixel(0, 1, Rgb([3, 0, 0]));
        img.put_pixel(1, 1, Rgb([4, 0, 0]));

        let raw = img.to_xrgb8888_le();
        let reds: Vec<u8> = raw.chunks_exact(4).map(|word| word[2]).collect();
        assert_eq!(vec![1, 2, 3, 4], reds);
    }

    #[test]
    fn alpha_channel_is_discarded() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0x10, 0x20, 0x30, 0x00]));
        assert_eq!([0x30u8, 0x20, 0x10, 0x00], img.to_xrgb8888_le()[..]);
    }

    #[test]
    fn grayscale_is_expanded() {
        let img = GrayImage::from_pixel(1, 1, Luma([0x7F]));
        assert_eq!([0x7Fu8, 0x7F, 0x7F, 0x00], img.to_xrgb8888_le()[..]);
    }

    #[test]
    fn empty_image_gives_empty_buffer() {
        let img = RgbImage::new(0, 0);
        assert!(img.to_xrgb8888_le().is_empty());
    }
}
