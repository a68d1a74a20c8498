// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{
    canny::detect_edges,
    config::EdgeParams,
    error::{FrameError, FrameResult},
    image::{convert_grey_to_rgba, LumaFrame, RgbaFrameMut},
};
use tracing::debug;

/// Turns camera luminance frames into RGBA edge images.
///
/// The processor holds only its parameters; every call is independent of the
/// previous ones, so a single instance can be shared between threads as long
/// as each call writes to its own output frame.
///
/// # Example
///
/// ```
/// use edgefirst_edges::{
///     config::EdgeParams,
///     image::{LumaFrame, RgbaFrameMut},
///     processor::EdgeProcessor,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let processor = EdgeProcessor::new(EdgeParams::default())?;
///
/// let plane = vec![128u8; 640 * 480];
/// let mut rgba = vec![0u8; 640 * 480 * 4];
///
/// let input = LumaFrame::new(640, 480, 640, &plane)?;
/// let mut output = RgbaFrameMut::new(640, 480, 640 * 4, &mut rgba)?;
/// processor.process(&input, &mut output)?;
///
/// // a flat field has no edges
/// assert!(rgba.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeProcessor {
    params: EdgeParams,
}

impl EdgeProcessor {
    /// Creates a processor, rejecting non-finite thresholds up front.
    pub fn new(params: EdgeParams) -> FrameResult<Self> {
        params.thresholds()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &EdgeParams {
        &self.params
    }

    /// Writes the edge image of `input` into `output`.
    ///
    /// Every pixel of `output` becomes `[255, 255, 255, 255]` on an edge and
    /// `[0, 0, 0, 255]` elsewhere. Row padding in either frame is neither read
    /// nor written.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::SizeMismatch`] if the frames differ in size. The
    /// output is untouched on error.
    pub fn process(&self, input: &LumaFrame, output: &mut RgbaFrameMut) -> FrameResult<()> {
        if input.width() != output.width() || input.height() != output.height() {
            return Err(FrameError::SizeMismatch {
                input_width: input.width(),
                input_height: input.height(),
                output_width: output.width(),
                output_height: output.height(),
            });
        }

        let edges = detect_edges(input, &self.params)?;
        let edges = LumaFrame::new(input.width(), input.height(), input.width() as usize, &edges)?;
        convert_grey_to_rgba(&edges, output)?;

        debug!("processed {} into {}", input, output);
        Ok(())
    }
}

/// Processes one frame with the default thresholds (low 80, high 100).
///
/// This is the Rust form of the bridge's `process-frame` call: the caller
/// describes the Y plane with `width`, `height` and `row_stride` and hands in
/// a tightly packed RGBA buffer of the same size.
///
/// # Errors
///
/// Returns an error if either buffer does not match the described geometry.
/// Nothing is written in that case.
pub fn process_frame(
    width: u32,
    height: u32,
    y_plane: &[u8],
    row_stride: usize,
    rgba: &mut [u8],
) -> FrameResult<()> {
    let input = LumaFrame::new(width, height, row_stride, y_plane)?;
    let mut output = RgbaFrameMut::new(width, height, width as usize * 4, rgba)?;
    EdgeProcessor::default().process(&input, &mut output)
}
