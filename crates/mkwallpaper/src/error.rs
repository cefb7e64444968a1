// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (c) 2025 Markus Zehnder

use image::{ImageError, ImageFormat};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Conversion errors. None of them are recoverable, the tool reports and exits.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("image decoder for {0:?} is not available in this build")]
    MissingCodec(ImageFormat),

    #[error("invalid target size {width}x{height}: width and height must be positive")]
    InvalidSize { width: u32, height: u32 },

    #[error("failed to decode image {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("failed to write {}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
