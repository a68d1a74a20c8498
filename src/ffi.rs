// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! C ABI entry points for the camera application.
//!
//! The managed side (JNI glue, Swift, or plain C) hands over the Y plane as a
//! direct buffer address plus length, and the destination RGBA pixels as an
//! address plus length. Nothing is retained past the call.
//!
//! Every function returns [`EDGEFIRST_OK`] on success or one of the negative
//! `EDGEFIRST_E*` codes. [`edgefirst_strerror`] turns a code into a message.

use crate::{
    config::EdgeParams,
    error::{FrameError, FrameResult},
    image::{LumaFrame, RgbaFrameMut},
    processor::EdgeProcessor,
};
use libc::{c_char, c_double, c_int};
use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    slice::{from_raw_parts, from_raw_parts_mut},
};
use tracing::warn;

pub const EDGEFIRST_OK: c_int = 0;
pub const EDGEFIRST_ENULL: c_int = -1;
pub const EDGEFIRST_ENEGATIVE: c_int = -2;
pub const EDGEFIRST_EEMPTY: c_int = -3;
pub const EDGEFIRST_ESTRIDE: c_int = -4;
pub const EDGEFIRST_ESHORT: c_int = -5;
pub const EDGEFIRST_EMISMATCH: c_int = -6;
pub const EDGEFIRST_ETHRESHOLD: c_int = -7;
pub const EDGEFIRST_ETOOLARGE: c_int = -8;
pub const EDGEFIRST_EPANIC: c_int = -99;

impl FrameError {
    /// Status code reported across the C boundary.
    pub fn code(&self) -> c_int {
        match self {
            FrameError::NullBuffer(_) => EDGEFIRST_ENULL,
            FrameError::NegativeValue { .. } => EDGEFIRST_ENEGATIVE,
            FrameError::EmptyFrame { .. } => EDGEFIRST_EEMPTY,
            FrameError::StrideTooSmall { .. } => EDGEFIRST_ESTRIDE,
            FrameError::BufferTooSmall { .. } => EDGEFIRST_ESHORT,
            FrameError::SizeMismatch { .. } => EDGEFIRST_EMISMATCH,
            FrameError::InvalidThreshold { .. } => EDGEFIRST_ETHRESHOLD,
            FrameError::TooLarge { .. } => EDGEFIRST_ETOOLARGE,
        }
    }
}

fn non_negative(name: &'static str, value: c_int) -> FrameResult<u32> {
    u32::try_from(value).map_err(|_| FrameError::NegativeValue { name, value })
}

/// Arguments of one bridge call, exactly as received.
struct RawFrame {
    width: c_int,
    height: c_int,
    y_plane: *const u8,
    y_plane_len: usize,
    y_row_stride: c_int,
    rgba: *mut u8,
    rgba_len: usize,
    rgba_row_stride: c_int,
}

impl RawFrame {
    /// # Safety
    ///
    /// Non-null pointers must be valid for their stated lengths, and the
    /// two ranges must not overlap, for the duration of the call.
    unsafe fn process(&self, params: EdgeParams) -> FrameResult<()> {
        if self.y_plane.is_null() {
            return Err(FrameError::NullBuffer("input"));
        }
        if self.rgba.is_null() {
            return Err(FrameError::NullBuffer("output"));
        }

        let width = non_negative("width", self.width)?;
        let height = non_negative("height", self.height)?;
        let y_row_stride = non_negative("input row stride", self.y_row_stride)? as usize;
        let rgba_row_stride = match self.rgba_row_stride {
            0 => width as usize * 4,
            s => non_negative("output row stride", s)? as usize,
        };

        let processor = EdgeProcessor::new(params)?;
        let y_plane = from_raw_parts(self.y_plane, self.y_plane_len);
        let rgba = from_raw_parts_mut(self.rgba, self.rgba_len);

        let input = LumaFrame::new(width, height, y_row_stride, y_plane)?;
        let mut output = RgbaFrameMut::new(width, height, rgba_row_stride, rgba)?;
        processor.process(&input, &mut output)
    }

    unsafe fn run(&self, params: EdgeParams) -> c_int {
        match catch_unwind(AssertUnwindSafe(|| self.process(params))) {
            Ok(Ok(())) => EDGEFIRST_OK,
            Ok(Err(e)) => {
                warn!("process frame failed: {}", e);
                e.code()
            }
            Err(_) => {
                warn!("process frame panicked");
                EDGEFIRST_EPANIC
            }
        }
    }
}

/// Runs edge detection on a camera Y plane with the default thresholds
/// (low 80, high 100) and writes the RGBA result.
///
/// `rgba_row_stride` may be 0 for a tightly packed output.
///
/// # Safety
///
/// - `y_plane` must be null or valid for reads of `y_plane_len` bytes.
/// - `rgba` must be null or valid for writes of `rgba_len` bytes.
/// - The two buffers must not overlap and must not be accessed by anyone
///   else until the call returns.
#[no_mangle]
pub unsafe extern "C" fn edgefirst_process_frame(
    width: c_int,
    height: c_int,
    y_plane: *const u8,
    y_plane_len: usize,
    y_row_stride: c_int,
    rgba: *mut u8,
    rgba_len: usize,
    rgba_row_stride: c_int,
) -> c_int {
    RawFrame {
        width,
        height,
        y_plane,
        y_plane_len,
        y_row_stride,
        rgba,
        rgba_len,
        rgba_row_stride,
    }
    .run(EdgeParams::default())
}

/// Same as [`edgefirst_process_frame`] with explicit hysteresis thresholds.
///
/// # Safety
///
/// See [`edgefirst_process_frame`].
#[no_mangle]
pub unsafe extern "C" fn edgefirst_process_frame_with_thresholds(
    width: c_int,
    height: c_int,
    y_plane: *const u8,
    y_plane_len: usize,
    y_row_stride: c_int,
    rgba: *mut u8,
    rgba_len: usize,
    rgba_row_stride: c_int,
    low_threshold: c_double,
    high_threshold: c_double,
) -> c_int {
    RawFrame {
        width,
        height,
        y_plane,
        y_plane_len,
        y_row_stride,
        rgba,
        rgba_len,
        rgba_row_stride,
    }
    .run(EdgeParams::new(low_threshold, high_threshold))
}

/// Static, NUL terminated description of a status code.
#[no_mangle]
pub extern "C" fn edgefirst_strerror(code: c_int) -> *const c_char {
    let msg: &'static std::ffi::CStr = match code {
        EDGEFIRST_OK => c"success",
        EDGEFIRST_ENULL => c"null buffer pointer",
        EDGEFIRST_ENEGATIVE => c"negative size argument",
        EDGEFIRST_EEMPTY => c"frame width or height is zero",
        EDGEFIRST_ESTRIDE => c"row stride smaller than row size",
        EDGEFIRST_ESHORT => c"buffer smaller than frame",
        EDGEFIRST_EMISMATCH => c"output size does not match input",
        EDGEFIRST_ETHRESHOLD => c"threshold is not finite",
        EDGEFIRST_ETOOLARGE => c"frame too large",
        EDGEFIRST_EPANIC => c"internal error",
        _ => c"unknown error",
    };
    msg.as_ptr()
}
