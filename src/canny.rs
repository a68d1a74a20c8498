// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Canny edge detection on 8-bit luminance frames.
//!
//! The detector follows OpenCV's `Canny` with a 3x3 aperture, so thresholds
//! tuned against OpenCV carry over unchanged:
//!
//! - 3x3 Sobel gradients with replicated borders, no pre-smoothing.
//! - L1 magnitude `|gx| + |gy|` by default, L2 on request.
//! - Non-maximum suppression along one of four direction sectors, decided
//!   with a fixed-point `tan(22.5°)` test. Pixels outside the frame have zero
//!   magnitude. On a flat ridge the left (or upper) pixel wins.
//! - Hysteresis: pixels above the high threshold seed edges which then grow
//!   through 8-connected pixels above the low threshold.

use crate::{config::EdgeParams, error::FrameResult, image::LumaFrame};
use tracing::trace;

/// Edge map value of an edge pixel.
pub const EDGE: u8 = 255;

/// Edge map value of a non-edge pixel.
pub const NO_EDGE: u8 = 0;

const CANNY_SHIFT: u32 = 15;

/// `tan(22.5°)` in `CANNY_SHIFT` fixed point.
const TG22: i64 = 13573;

// hysteresis map states
const CANDIDATE: u8 = 0;
const NOT_EDGE: u8 = 1;
const STRONG: u8 = 2;

/// Horizontal and vertical Sobel responses, one per pixel, row major.
struct Gradients {
    dx: Vec<i32>,
    dy: Vec<i32>,
}

fn sobel_gradients(frame: &LumaFrame) -> Gradients {
    let w = frame.width() as usize;
    let h = frame.height() as usize;
    let mut dx = vec![0i32; w * h];
    let mut dy = vec![0i32; w * h];

    for y in 0..h {
        let up = frame.row(y.saturating_sub(1) as u32);
        let mid = frame.row(y as u32);
        let down = frame.row((y + 1).min(h - 1) as u32);
        for x in 0..w {
            let l = x.saturating_sub(1);
            let r = (x + 1).min(w - 1);
            let at = |row: &[u8], i: usize| i32::from(row[i]);

            dx[y * w + x] = (at(up, r) - at(up, l))
                + 2 * (at(mid, r) - at(mid, l))
                + (at(down, r) - at(down, l));
            dy[y * w + x] = (at(down, l) - at(up, l))
                + 2 * (at(down, x) - at(up, x))
                + (at(down, r) - at(up, r));
        }
    }

    Gradients { dx, dy }
}

/// Integer thresholds in the units of the selected magnitude.
///
/// The L2 magnitude is kept squared, so its thresholds are squared too.
fn integer_thresholds(low: f64, high: f64, l2_gradient: bool) -> (i32, i32) {
    let scale = |t: f64| {
        if l2_gradient {
            let t = t.min(32767.0);
            if t > 0.0 {
                t * t
            } else {
                t
            }
        } else {
            t
        }
    };
    (scale(low).floor() as i32, scale(high).floor() as i32)
}

/// Runs Canny edge detection on `frame`.
///
/// Returns a tightly packed `width * height` edge map holding [`EDGE`] or
/// [`NO_EDGE`] per pixel. The input frame is only read.
///
/// # Errors
///
/// Returns an error if the thresholds in `params` are not finite.
///
/// # Example
///
/// ```
/// use edgefirst_edges::{canny::{detect_edges, EDGE, NO_EDGE}, config::EdgeParams, image::LumaFrame};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let plane = [0u8, 0, 255, 255].repeat(4);
/// let frame = LumaFrame::new(4, 4, 4, &plane)?;
/// let edges = detect_edges(&frame, &EdgeParams::default())?;
/// assert_eq!(&edges[..4], &[NO_EDGE, EDGE, NO_EDGE, NO_EDGE]);
/// # Ok(())
/// # }
/// ```
pub fn detect_edges(frame: &LumaFrame, params: &EdgeParams) -> FrameResult<Vec<u8>> {
    let (low, high) = params.thresholds()?;
    let (low, high) = integer_thresholds(low, high, params.l2_gradient);

    let w = frame.width() as usize;
    let h = frame.height() as usize;
    let Gradients { dx, dy } = sobel_gradients(frame);

    // Magnitude and map carry a one pixel border so neighbour lookups never
    // leave the buffer.
    let mstep = w + 2;
    let mut mag = vec![0i32; mstep * (h + 2)];
    for y in 0..h {
        for x in 0..w {
            let (gx, gy) = (dx[y * w + x], dy[y * w + x]);
            mag[(y + 1) * mstep + x + 1] = if params.l2_gradient {
                gx * gx + gy * gy
            } else {
                gx.abs() + gy.abs()
            };
        }
    }

    let mut map = vec![NOT_EDGE; mstep * (h + 2)];
    let mut stack = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let j = (y + 1) * mstep + x + 1;
            let m = mag[j];
            if m <= low {
                continue;
            }

            let (gx, gy) = (dx[y * w + x], dy[y * w + x]);
            let xs = i64::from(gx.unsigned_abs());
            let ys = i64::from(gy.unsigned_abs()) << CANNY_SHIFT;
            let tg22x = xs * TG22;

            let is_max = if ys < tg22x {
                m > mag[j - 1] && m >= mag[j + 1]
            } else {
                let tg67x = tg22x + (xs << (CANNY_SHIFT + 1));
                if ys > tg67x {
                    m > mag[j - mstep] && m >= mag[j + mstep]
                } else if (gx ^ gy) < 0 {
                    m > mag[j - mstep + 1] && m > mag[j + mstep - 1]
                } else {
                    m > mag[j - mstep - 1] && m > mag[j + mstep + 1]
                }
            };
            if !is_max {
                continue;
            }

            if m > high {
                map[j] = STRONG;
                stack.push(j);
            } else {
                map[j] = CANDIDATE;
            }
        }
    }

    let seeds = stack.len();
    while let Some(j) = stack.pop() {
        for n in [
            j - mstep - 1,
            j - mstep,
            j - mstep + 1,
            j - 1,
            j + 1,
            j + mstep - 1,
            j + mstep,
            j + mstep + 1,
        ] {
            if map[n] == CANDIDATE {
                map[n] = STRONG;
                stack.push(n);
            }
        }
    }

    let mut edges = vec![NO_EDGE; w * h];
    for y in 0..h {
        let row = &map[(y + 1) * mstep + 1..(y + 1) * mstep + 1 + w];
        for (dst, &state) in edges[y * w..(y + 1) * w].iter_mut().zip(row) {
            if state == STRONG {
                *dst = EDGE;
            }
        }
    }

    trace!(
        "canny {}x{} low={} high={} seeds={}",
        w,
        h,
        low,
        high,
        seeds
    );

    Ok(edges)
}
