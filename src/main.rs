// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use args::Args;
use clap::Parser;
use edgefirst_edges::{
    image::{LumaFrame, RgbaFrameMut},
    processor::EdgeProcessor,
};
use serde_json::json;
use std::{error::Error, fs, path::Path, time::Instant};
use tracing::{debug, info, level_filters::LevelFilter, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

mod args;

/// Luminance plane owned by the tool, standing in for a camera buffer.
struct Frame {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

fn init_logging(args: &Args) {
    let default_level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let stdout_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let journald = tracing_journald::layer()
        .ok()
        .map(|layer| layer.with_filter(LevelFilter::INFO));

    let tracy = if args.tracy {
        let _ = tracy_client::Client::start();
        let layer: tracing_tracy::TracyLayer = Default::default();
        Some(layer)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(journald)
        .with(tracy)
        .init();
}

fn load_raw(path: &Path, size: &[u32], stride: Option<usize>) -> Result<Frame, Box<dyn Error>> {
    let (width, height) = match size {
        [w, h] => (*w, *h),
        _ => return Err(Box::from("--raw-size expects width and height")),
    };
    let stride = stride.unwrap_or(width as usize);
    let data = fs::read(path)?;
    Ok(Frame {
        width,
        height,
        stride,
        data,
    })
}

fn load_image(path: &Path) -> Result<Frame, Box<dyn Error>> {
    // colour inputs are reduced to luminance, as the camera's Y plane would be
    let img = ::image::open(path)?.into_luma8();
    let (width, height) = img.dimensions();
    Ok(Frame {
        width,
        height,
        stride: width as usize,
        data: img.into_raw(),
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args);

    let params = args.edge_params()?;
    let processor = EdgeProcessor::new(params)?;
    info!(
        "EdgeFirst edge detection low={} high={} l2={}",
        params.low_threshold, params.high_threshold, params.l2_gradient
    );

    let frame = match &args.raw_size {
        Some(size) => load_raw(&args.input, size, args.raw_stride)?,
        None => load_image(&args.input)?,
    };
    let input = LumaFrame::new(frame.width, frame.height, frame.stride, &frame.data)?;
    debug!("loaded {} from {}", input, args.input.display());

    let mut output = ::image::RgbaImage::new(frame.width, frame.height);
    let mut first: Option<Vec<u8>> = None;
    let mut timings = Vec::with_capacity(args.repeat as usize);

    for n in 0..args.repeat.max(1) {
        let now = Instant::now();
        processor.process(&input, &mut RgbaFrameMut::from_image(&mut output)?)?;
        let elapsed = now.elapsed();
        timings.push(elapsed.as_secs_f64() * 1000.0);
        debug!("frame {} processed in {:?}", n, elapsed);

        let pixels = output.as_raw();
        if first.is_none() {
            first = Some(pixels.clone());
        } else if first.as_ref() != Some(pixels) {
            return Err(Box::from(format!("frame {n} differs from the first frame")));
        }
    }

    let edge_pixels = output.pixels().filter(|px| px.0[0] == u8::MAX).count();
    let mean_ms = timings.iter().sum::<f64>() / timings.len() as f64;
    info!(
        "{}x{} edges: {} mean: {:.3}ms over {} frames",
        frame.width,
        frame.height,
        edge_pixels,
        mean_ms,
        timings.len()
    );

    match &args.output {
        Some(path) => {
            output.save(path)?;
            info!("saved {}", path.display());
        }
        None => warn!("no --output given, edge image discarded"),
    }

    if args.json {
        let summary = json!({
            "width": frame.width,
            "height": frame.height,
            "edge_pixels": edge_pixels,
            "frames": timings.len(),
            "mean_ms": mean_ms,
            "low_threshold": params.low_threshold,
            "high_threshold": params.high_threshold,
            "l2_gradient": params.l2_gradient,
        });
        println!("{}", summary);
    }

    Ok(())
}
