// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use clap::Parser;
use edgefirst_edges::config::EdgeParams;
use std::{error::Error, fs, path::PathBuf};

/// Command-line arguments for the EdgeFirst edge detection tool.
///
/// Runs the same frame processor the camera application calls through the C
/// ABI, on an image file or on a raw Y plane captured from a camera. Tuning
/// options can also be given as environment variables.
///
/// # Example
///
/// ```bash
/// # Edge image of a photo
/// edgefirst-edges --input frame.png --output edges.png
///
/// # Raw 640x480 Y plane with 672 byte rows, custom thresholds
/// export LOW_THRESHOLD=60
/// edgefirst-edges --input y.raw --raw-size 640 480 --raw-stride 672 \
///     --high-threshold 120 --output edges.png
/// ```
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input frame: an image file, or a raw 8-bit Y plane with --raw-size
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output RGBA edge image (format chosen by extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Treat the input as a raw Y plane of this size in pixels (width height)
    #[arg(long, value_delimiter = ' ', num_args = 2)]
    pub raw_size: Option<Vec<u32>>,

    /// Row stride of the raw Y plane in bytes (defaults to the width)
    #[arg(long, requires = "raw_size")]
    pub raw_stride: Option<usize>,

    /// JSON file with edge detector parameters
    #[arg(long, env = "EDGE_PARAMS")]
    pub params: Option<PathBuf>,

    /// Hysteresis low threshold [default: 80]
    #[arg(long, env = "LOW_THRESHOLD")]
    pub low_threshold: Option<f64>,

    /// Hysteresis high threshold [default: 100]
    #[arg(long, env = "HIGH_THRESHOLD")]
    pub high_threshold: Option<f64>,

    /// Use the L2 gradient norm instead of L1
    #[arg(long, env = "L2_GRADIENT")]
    pub l2_gradient: bool,

    /// Process the frame this many times, checking the output is identical
    #[arg(long, env = "REPEAT", default_value = "1")]
    pub repeat: u32,

    /// Print a JSON summary to stdout
    #[arg(long)]
    pub json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable Tracy profiler for performance analysis
    #[arg(long, env = "TRACY")]
    pub tracy: bool,
}

impl Args {
    /// Resolves the detector parameters: defaults, then the parameter file,
    /// then individual options.
    pub fn edge_params(&self) -> Result<EdgeParams, Box<dyn Error>> {
        let mut params = match &self.params {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .map_err(|e| format!("failed to read params {}: {e}", path.display()))?;
                EdgeParams::from_json(&json)
                    .map_err(|e| format!("failed to parse params {}: {e}", path.display()))?
            }
            None => EdgeParams::default(),
        };

        if let Some(low) = self.low_threshold {
            params.low_threshold = low;
        }
        if let Some(high) = self.high_threshold {
            params.high_threshold = high;
        }
        if self.l2_gradient {
            params.l2_gradient = true;
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_override_params_file_over_defaults() {
        let args = Args::try_parse_from(["edgefirst-edges", "--input", "frame.png"]).unwrap();
        assert_eq!(args.edge_params().unwrap(), EdgeParams::default());

        let path = std::env::temp_dir().join(format!("edge-params-{}.json", std::process::id()));
        fs::write(&path, r#"{ "low_threshold": 40, "high_threshold": 60 }"#).unwrap();

        let args = Args::try_parse_from([
            "edgefirst-edges",
            "--input",
            "frame.png",
            "--params",
            path.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(args.edge_params().unwrap(), EdgeParams::new(40.0, 60.0));

        let args = Args::try_parse_from([
            "edgefirst-edges",
            "--input",
            "frame.png",
            "--params",
            path.to_str().unwrap(),
            "--high-threshold",
            "120",
            "--l2-gradient",
        ])
        .unwrap();
        assert_eq!(
            args.edge_params().unwrap(),
            EdgeParams::new(40.0, 120.0).with_l2_gradient(true)
        );

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_params_file_is_an_error() {
        let args = Args::try_parse_from([
            "edgefirst-edges",
            "--input",
            "frame.png",
            "--params",
            "/nonexistent/edge-params.json",
        ])
        .unwrap();
        assert!(args.edge_params().is_err());
    }
}
