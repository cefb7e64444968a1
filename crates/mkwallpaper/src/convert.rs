// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (c) 2025 Markus Zehnder

//! Image to raw XRGB8888 conversion.

use crate::ConvertError;
use crate::img::load_rgb_image;

use bytes::BytesMut;
use image::RgbImage;
use log::debug;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::Builder;
use xrgb_raw::{Size, ToXrgb8888};

/// File mode of a newly created output file, before applying the umask.
const NEW_FILE_MODE: u32 = 0o644;

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
}

impl fmt::Display for ConvertSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Converted: {}x{} -> {} ({} bytes)",
            self.width,
            self.height,
            self.output.display(),
            self.bytes
        )
    }
}

/// Image converter.
#[derive(Debug, Default)]
pub struct Converter {
    atomic: bool,
    temp_dir: Option<PathBuf>,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the output file with an atomic rename instead of overwriting it in place.
    /// Disabled by default.
    ///
    /// Requires write access to the directory of the output file, or of the `temp_dir`.
    pub fn atomic(&mut self, atomic: bool) -> &mut Self {
        self.atomic = atomic;
        self
    }

    /// Directory for preparing the output file in atomic mode. Enables atomic mode.
    ///
    /// Defaults to the directory of the output file. A different directory must be on the same
    /// file system for the atomic rename operation!
    pub fn temp_dir(&mut self, temp_dir: impl Into<PathBuf>) -> &mut Self {
        self.temp_dir = Some(temp_dir.into());
        self.atomic = true;
        self
    }

    /// Convert the `input` image to a raw XRGB8888 file.
    ///
    /// The image is resized to `size` if given. An existing `output` file is overwritten.
    pub fn convert<P, Q>(
        &self,
        input: P,
        output: Q,
        size: Option<Size>,
    ) -> Result<ConvertSummary, ConvertError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let input = input.as_ref();
        let output = output.as_ref();

        debug!("Loading image {input:?}...");
        let rgb_img = load_rgb_image(input, size)?;
        let (width, height) = rgb_img.dimensions();

        let timestamp = Instant::now();
        let raw = encode(&rgb_img);
        debug!(
            "Encoded {width}x{height} image in {}ms",
            timestamp.elapsed().as_millis()
        );

        if self.atomic {
            write_raw_atomic(output, &raw, self.temp_dir.as_deref())?;
        } else {
            write_raw(output, &raw)?;
        }

        Ok(ConvertSummary {
            output: output.to_path_buf(),
            width,
            height,
            bytes: raw.len(),
        })
    }
}

/// Convert the `input` image to a raw XRGB8888 file with the default [`Converter`] settings.
pub fn convert<P, Q>(input: P, output: Q, size: Option<Size>) -> Result<ConvertSummary, ConvertError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    Converter::new().convert(input, output, size)
}

/// Pack an RGB image into XRGB8888 words, little endian and row-major.
pub fn encode(image: &RgbImage) -> BytesMut {
    image.to_xrgb8888_le()
}

fn write_error(output: &Path) -> impl Fn(io::Error) -> ConvertError + '_ {
    move |source| ConvertError::FileWrite {
        path: output.to_path_buf(),
        source,
    }
}

fn ensure_not_dir(output: &Path) -> Result<(), ConvertError> {
    if output.is_dir() {
        return Err(write_error(output)(io::Error::new(
            io::ErrorKind::IsADirectory,
            "output cannot be a directory",
        )));
    }

    Ok(())
}

/// Write `data` to `output`, creating or truncating the file.
///
/// Symlinks are followed, owner and mode of an existing file are kept. The file may be left
/// truncated if writing fails halfway.
pub fn write_raw(output: &Path, data: &[u8]) -> Result<(), ConvertError> {
    ensure_not_dir(output)?;

    debug!("Writing {} bytes to {output:?}", data.len());
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(NEW_FILE_MODE)
        .open(output)
        .map_err(write_error(output))?;

    file.write_all(data).map_err(write_error(output))?;
    file.flush().map_err(write_error(output))?;

    Ok(())
}

/// Atomically write `data` to `output`.
///
/// The data is written to a named temp file, which is renamed to `output` when complete. The temp
/// file is removed on failure, an existing `output` file stays untouched. A symlinked `output` is
/// resolved and its target replaced. The mode of an existing file is kept.
pub fn write_raw_atomic(
    output: &Path,
    data: &[u8],
    temp_dir: Option<&Path>,
) -> Result<(), ConvertError> {
    ensure_not_dir(output)?;

    let target = match fs::canonicalize(output) {
        Ok(target) => target,
        Err(e) if e.kind() == io::ErrorKind::NotFound => output.to_path_buf(),
        Err(e) => return Err(write_error(output)(e)),
    };
    let permissions = fs::metadata(&target)
        .map(|metadata| metadata.permissions())
        .unwrap_or_else(|_| fs::Permissions::from_mode(NEW_FILE_MODE));

    let temp_dir = match temp_dir {
        Some(temp_dir) => temp_dir,
        None => target
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(Path::new(".")),
    };

    debug!("Creating a new named temp file in {temp_dir:?}");
    let mut tmp_file = Builder::new()
        .prefix(".mkwallpaper")
        .suffix(".tmp")
        .tempfile_in(temp_dir)
        .map_err(write_error(output))?;

    tmp_file
        .as_file()
        .set_permissions(permissions)
        .map_err(write_error(output))?;

    tmp_file.write_all(data).map_err(write_error(output))?;
    tmp_file.flush().map_err(write_error(output))?;

    debug!("Renaming temp file to: {target:?}");
    tmp_file
        .persist(&target)
        .map_err(|e| write_error(output)(e.error))?;

    Ok(())
}
