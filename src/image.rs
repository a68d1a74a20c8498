// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::error::{FrameError, FrameResult};
use core::fmt;

/// Pixel layouts handled by the bridge.
///
/// The names follow the V4L2 FourCC codes of the equivalent formats so that
/// log lines read the same as the camera node's.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit single channel luminance (camera Y plane)
    Grey,
    /// RGBA 32-bit pixel format (8 bits per channel, with alpha)
    Rgba,
}

impl PixelFormat {
    /// Number of bytes per pixel.
    pub const fn channels(self) -> usize {
        match self {
            PixelFormat::Grey => 1,
            PixelFormat::Rgba => 4,
        }
    }

    pub const fn fourcc(self) -> [u8; 4] {
        match self {
            PixelFormat::Grey => *b"GREY",
            PixelFormat::Rgba => *b"RGBA",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let code = self.fourcc();
        write!(f, "{}", String::from_utf8_lossy(&code))
    }
}

/// Validates a frame description against the buffer backing it and returns
/// the number of pixel bytes in one row.
///
/// The last row does not need to carry stride padding, camera HALs commonly
/// hand out Y planes sized `stride * (height - 1) + width`.
fn check_geometry(
    name: &'static str,
    format: PixelFormat,
    width: u32,
    height: u32,
    stride: usize,
    len: usize,
) -> FrameResult<usize> {
    if width == 0 || height == 0 {
        return Err(FrameError::EmptyFrame { width, height });
    }

    let too_large = || FrameError::TooLarge { width, height };
    let row_bytes = (width as usize)
        .checked_mul(format.channels())
        .ok_or_else(too_large)?;
    if stride < row_bytes {
        return Err(FrameError::StrideTooSmall {
            name,
            stride,
            min: row_bytes,
        });
    }

    let required = stride
        .checked_mul(height as usize - 1)
        .and_then(|n| n.checked_add(row_bytes))
        .ok_or_else(too_large)?;
    if len < required {
        return Err(FrameError::BufferTooSmall {
            name,
            required,
            actual: len,
        });
    }

    Ok(row_bytes)
}

/// Read-only view over a caller-owned luminance plane.
///
/// The view borrows the caller's memory for its lifetime only, nothing
/// derived from it can outlive the borrow.
///
/// # Example
///
/// ```
/// use edgefirst_edges::image::LumaFrame;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // 4x2 plane with two bytes of row padding
/// let plane = [0u8, 1, 2, 3, 9, 9, 4, 5, 6, 7, 9, 9];
/// let frame = LumaFrame::new(4, 2, 6, &plane)?;
/// assert_eq!(frame.row(1), &[4, 5, 6, 7]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct LumaFrame<'a> {
    width: u32,
    height: u32,
    stride: usize,
    data: &'a [u8],
}

impl<'a> LumaFrame<'a> {
    /// Wraps `data` as a `width` x `height` plane with `stride` bytes per row.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - either dimension is zero
    /// - `stride` is smaller than `width`
    /// - `data` is too short for the described plane
    pub fn new(width: u32, height: u32, stride: usize, data: &'a [u8]) -> FrameResult<Self> {
        check_geometry("input", PixelFormat::Grey, width, height, stride, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        PixelFormat::Grey
    }

    /// Pixels of row `y`, without padding.
    #[inline]
    pub fn row(&self, y: u32) -> &'a [u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize]
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.stride + x as usize]
    }
}

impl fmt::Display for LumaFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}x{} {} stride:{}",
            self.width,
            self.height,
            self.format(),
            self.stride
        )
    }
}

/// Mutable view over a caller-owned RGBA image.
///
/// The processor writes pixels through this view but never allocates,
/// resizes, or frees the memory behind it. Bytes past `4 * width` in a row
/// are padding and are never written.
#[derive(Debug)]
pub struct RgbaFrameMut<'a> {
    width: u32,
    height: u32,
    stride: usize,
    data: &'a mut [u8],
}

impl<'a> RgbaFrameMut<'a> {
    /// Wraps `data` as a `width` x `height` RGBA image with `stride` bytes per
    /// row.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - either dimension is zero
    /// - `stride` is smaller than `4 * width`
    /// - `data` is too short for the described image
    pub fn new(width: u32, height: u32, stride: usize, data: &'a mut [u8]) -> FrameResult<Self> {
        check_geometry("output", PixelFormat::Rgba, width, height, stride, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Borrows a tightly packed [`::image::RgbaImage`] as an output frame.
    pub fn from_image(img: &'a mut ::image::RgbaImage) -> FrameResult<Self> {
        let (width, height) = img.dimensions();
        let stride = width as usize * PixelFormat::Rgba.channels();
        Self::new(width, height, stride, img)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        PixelFormat::Rgba
    }

    /// Pixel bytes of row `y`, without padding.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * 4]
    }

    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        &mut self.data[start..start + self.width as usize * 4]
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = y as usize * self.stride + x as usize * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

impl fmt::Display for RgbaFrameMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}x{} {} stride:{}",
            self.width,
            self.height,
            self.format(),
            self.stride
        )
    }
}

/// Converts a single-channel image to opaque RGBA.
///
/// Each grey sample is replicated into the red, green and blue channels and
/// alpha is set to 255. Every pixel of `to` is overwritten.
///
/// # Errors
///
/// Returns [`FrameError::SizeMismatch`] if the frames differ in size, in which
/// case `to` is left untouched.
pub fn convert_grey_to_rgba(from: &LumaFrame, to: &mut RgbaFrameMut) -> FrameResult<()> {
    if from.width() != to.width() || from.height() != to.height() {
        return Err(FrameError::SizeMismatch {
            input_width: from.width(),
            input_height: from.height(),
            output_width: to.width(),
            output_height: to.height(),
        });
    }

    for y in 0..from.height() {
        let src = from.row(y);
        let dst = to.row_mut(y);
        for (px, &v) in dst.chunks_exact_mut(4).zip(src) {
            px.copy_from_slice(&[v, v, v, u8::MAX]);
        }
    }

    Ok(())
}
