// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! # EdgeFirst Edge Detection Bridge
//!
//! This library turns the luminance (Y) plane of a camera frame into an RGBA
//! edge image: white where Canny edge detection finds an edge, black
//! elsewhere, fully opaque everywhere. It is built as a `cdylib` so the
//! camera application can call it through the C ABI in [`ffi`], and as an
//! `rlib` for Rust callers.
//!
//! ## Features
//!
//! - **Zero-copy frame views**: [`image::LumaFrame`] and
//!   [`image::RgbaFrameMut`] borrow caller memory, including padded rows.
//! - **Canny edge detection**: [`canny::detect_edges`] with OpenCV compatible
//!   thresholds (defaults low 80, high 100).
//! - **Checked boundary**: malformed calls return a [`FrameError`] instead of
//!   reading or writing out of bounds.
//!
//! ## Example
//!
//! ```
//! use edgefirst_edges::processor::process_frame;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (width, height, stride) = (320u32, 240u32, 384usize);
//! let y_plane = vec![0u8; stride * height as usize];
//! let mut rgba = vec![0u8; width as usize * height as usize * 4];
//!
//! process_frame(width, height, &y_plane, stride, &mut rgba)?;
//! assert!(rgba.chunks_exact(4).all(|px| px[3] == 255));
//! # Ok(())
//! # }
//! ```
//!
//! ## Safety
//!
//! Raw pointers are only dereferenced in [`ffi`], after null and length
//! checks. Everything else is safe Rust over borrowed slices.

pub mod canny;
pub mod config;
pub mod error;
pub mod ffi;
pub mod image;
pub mod processor;

pub use crate::config::EdgeParams;
pub use crate::error::{FrameError, FrameResult};
pub use crate::processor::{process_frame, EdgeProcessor};
