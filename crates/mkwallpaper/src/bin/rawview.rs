// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (c) 2025 Markus Zehnder

//! Render a raw XRGB8888 wallpaper as PNG image for inspection.

#![forbid(non_ascii_idents)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::{Parser, value_parser};
use env_logger::Env;
use image::ImageFormat;
use log::{debug, info};
use std::path::PathBuf;
use xrgb_raw::{RawFrame, WALLPAPER_PATH};

/// Render a raw XRGB8888 wallpaper file as PNG image.
///
/// The raw file must be exactly WIDTH x HEIGHT x 4 bytes, as required by the compositor.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Frame width in pixels.
    #[arg(value_parser = value_parser!(u32).range(1..))]
    width: u32,

    /// Frame height in pixels.
    #[arg(value_parser = value_parser!(u32).range(1..))]
    height: u32,

    /// PNG output file.
    png: PathBuf,

    /// Raw XRGB8888 input file.
    #[arg(short, long, value_name = "FILE", default_value = WALLPAPER_PATH)]
    raw: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let size = (args.width, args.height);

    info!("Loading raw frame {:?}...", args.raw);
    let frame = RawFrame::load(&args.raw, size)
        .with_context(|| format!("Invalid raw frame {:?} for size {}x{}", args.raw, size.0, size.1))?;

    let img = frame.to_rgb_image();
    debug!("Saving PNG image {:?}", args.png);
    img.save_with_format(&args.png, ImageFormat::Png)
        .with_context(|| format!("Failed to write {:?}", args.png))?;

    println!(
        "Rendered: {}x{} -> {} ({} bytes)",
        size.0,
        size.1,
        args.png.display(),
        frame.as_bytes().len()
    );

    Ok(())
}
