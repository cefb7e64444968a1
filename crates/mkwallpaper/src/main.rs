// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (c) 2025 Markus Zehnder

#![forbid(non_ascii_idents)]
#![deny(unsafe_code)]

use mkwallpaper::{Converter, Size, img};

use clap::{Parser, value_parser};
use env_logger::Env;
use log::{info, warn};
use std::path::PathBuf;
use std::process::exit;

/// Convert a PNG or JPEG image into a raw XRGB8888 wallpaper for the compositor.
///
/// The output file contains 4 bytes per pixel (little endian 0x00RRGGBB) in row-major order,
/// without any header. Install it as /usr/share/wallpaper.raw in the size of the display.
#[derive(Parser, Debug)]
#[command(version, about, long_about)]
struct Args {
    /// Source image. The format is detected from the file content.
    input: PathBuf,

    /// Raw output file. An existing file is overwritten in place, symlinks are followed.
    output: PathBuf,

    /// Resize to this width in pixels, ignoring the aspect ratio. Requires HEIGHT.
    #[arg(value_parser = value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Resize to this height in pixels, ignoring the aspect ratio.
    #[arg(value_parser = value_parser!(u32).range(1..))]
    height: Option<u32>,

    /// Prepare the output in a temp file and rename it over OUTPUT when complete.
    ///
    /// A failed conversion never leaves a truncated OUTPUT behind. Requires write access to the
    /// directory of OUTPUT, or of the --temp-dir.
    #[arg(short, long)]
    atomic: bool,

    /// Temporary directory for preparing the output file. Default: directory of OUTPUT
    ///
    /// The temp directory must be on the same file system for atomic rename operation!
    #[arg(short, long, requires = "atomic")]
    temp_dir: Option<PathBuf>,

    /// Enable debug output.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Resizing only applies if both dimensions are given.
    fn target_size(&self) -> Option<Size> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some((width, height)),
            (Some(width), None) => {
                warn!("Ignoring width {width}: HEIGHT is required for resizing");
                None
            }
            _ => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // usage errors exit with 1, help and version go to stdout with 0
    let args = Args::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            let _ = e.print();
            exit(1);
        }
        e.exit()
    });

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    img::check_codecs()?;

    let mut converter = Converter::new();
    converter.atomic(args.atomic);
    if let Some(temp_dir) = &args.temp_dir {
        converter.temp_dir(temp_dir);
    }

    let size = args.target_size();
    info!("Converting {:?}...", args.input);
    let summary = converter.convert(&args.input, &args.output, size)?;

    println!("{summary}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&["mkwallpaper", "in.png", "out.raw"], None)]
    #[case(&["mkwallpaper", "in.png", "out.raw", "640"], None)]
    #[case(&["mkwallpaper", "in.png", "out.raw", "640", "480"], Some((640, 480)))]
    #[case(&["mkwallpaper", "-v", "in.png", "out.raw", "1", "1"], Some((1, 1)))]
    #[case(&["mkwallpaper", "-a", "-t", "/tmp", "in.png", "out.raw"], None)]
    fn target_size_requires_both_dimensions(#[case] argv: &[&str], #[case] size: Option<Size>) {
        let args = Args::try_parse_from(argv).expect("valid arguments");
        assert_eq!(size, args.target_size());
    }

    #[rstest]
    #[case(&["mkwallpaper"])]
    #[case(&["mkwallpaper", "in.png"])]
    #[case(&["mkwallpaper", "in.png", "out.raw", "0", "480"])]
    #[case(&["mkwallpaper", "in.png", "out.raw", "640", "-1"])]
    #[case(&["mkwallpaper", "in.png", "out.raw", "wide", "480"])]
    #[case(&["mkwallpaper", "in.png", "out.raw", "640", "480", "extra"])]
    #[case(&["mkwallpaper", "--temp-dir", "/tmp", "in.png", "out.raw"])]
    fn invalid_arguments(#[case] argv: &[&str]) {
        assert!(Args::try_parse_from(argv).is_err());
    }
}
