// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (c) 2025 Markus Zehnder

//! Image helper functions.

use crate::ConvertError;

use image::imageops::{self, FilterType};
use image::{GenericImageView, ImageError, ImageFormat, ImageReader, RgbImage};
use log::{debug, info};
use std::path::Path;
use xrgb_raw::Size;

/// Input formats the converter must be able to decode.
pub const REQUIRED_FORMATS: [ImageFormat; 2] = [ImageFormat::Png, ImageFormat::Jpeg];

/// Make sure the image library was built with all required decoders.
pub fn check_codecs() -> Result<(), ConvertError> {
    for format in REQUIRED_FORMATS {
        if !format.reading_enabled() {
            return Err(ConvertError::MissingCodec(format));
        }
    }

    Ok(())
}

/// Load an image, flatten it to RGB and optionally resize it to the exact given size.
///
/// The image format is detected from the file content, the file extension is only a fallback.
/// Alpha is dropped, not composited against a background. Resizing ignores the aspect ratio.
pub fn load_rgb_image<P>(path: P, size: Option<Size>) -> Result<RgbImage, ConvertError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some((width, height)) = size
        && (width == 0 || height == 0)
    {
        return Err(ConvertError::InvalidSize { width, height });
    }

    let decode_error = |source: ImageError| ConvertError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_error(e.into()))?
        .decode()
        .map_err(decode_error)?;
    debug!(
        "Image dimensions: {:?}, {:?}",
        img.dimensions(),
        img.color()
    );

    let rgb_img = img.to_rgb8();

    if let Some(size) = size
        && rgb_img.dimensions() != size
    {
        info!(
            "Resizing image from {:?} to {:?}, ignoring aspect ratio",
            rgb_img.dimensions(),
            size
        );
        Ok(imageops::resize(&rgb_img, size.0, size.1, FilterType::Lanczos3))
    } else {
        Ok(rgb_img)
    }
}
