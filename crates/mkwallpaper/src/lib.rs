// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (c) 2025 Markus Zehnder

#![forbid(non_ascii_idents)]
#![deny(unsafe_code)]

pub mod convert;
mod error;
pub mod img;

pub use convert::{ConvertSummary, Converter, convert, encode, write_raw, write_raw_atomic};
pub use error::ConvertError;
pub use xrgb_raw::Size;
