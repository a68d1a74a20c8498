// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

/// Result alias used by the frame processing API.
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors reported while validating or processing a camera frame.
///
/// Every variant describes a caller obligation that was not met. The
/// processor checks all of them before touching the output buffer, so an
/// error always leaves the output unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// A raw buffer handle handed over the C boundary was null.
    #[error("{0} buffer pointer is null")]
    NullBuffer(&'static str),

    /// An integer argument handed over the C boundary was negative.
    #[error("{name} must not be negative, got {value}")]
    NegativeValue { name: &'static str, value: i32 },

    /// Width or height is zero.
    #[error("frame dimensions must be positive, got {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },

    /// Row stride cannot hold one row of pixels.
    #[error("{name} row stride {stride} is smaller than the row size {min}")]
    StrideTooSmall {
        name: &'static str,
        stride: usize,
        min: usize,
    },

    /// Buffer is shorter than the described frame.
    #[error("{name} buffer holds {actual} bytes but the frame needs {required}")]
    BufferTooSmall {
        name: &'static str,
        required: usize,
        actual: usize,
    },

    /// Output frame geometry differs from the input frame.
    #[error("output {output_width}x{output_height} does not match input {input_width}x{input_height}")]
    SizeMismatch {
        input_width: u32,
        input_height: u32,
        output_width: u32,
        output_height: u32,
    },

    /// A hysteresis threshold is NaN or infinite.
    #[error("thresholds must be finite, got low={low} high={high}")]
    InvalidThreshold { low: f64, high: f64 },

    /// Frame size does not fit in the address space.
    #[error("frame {width}x{height} is too large")]
    TooLarge { width: u32, height: u32 },
}
