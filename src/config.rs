// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::error::{FrameError, FrameResult};
use serde::Deserialize;

/// Default hysteresis low threshold, in Sobel gradient units.
pub const DEFAULT_LOW_THRESHOLD: f64 = 80.0;

/// Default hysteresis high threshold, in Sobel gradient units.
pub const DEFAULT_HIGH_THRESHOLD: f64 = 100.0;

/// Edge detector tuning.
///
/// Thresholds are expressed in the units of the 3x3 Sobel gradient magnitude,
/// a full 0 to 255 step measures 1020 with the L1 norm. Missing fields take
/// their default when deserialized.
///
/// ```
/// use edgefirst_edges::config::EdgeParams;
///
/// let params: EdgeParams = serde_json::from_str(r#"{ "high_threshold": 150 }"#).unwrap();
/// assert_eq!(params.low_threshold, 80.0);
/// assert_eq!(params.high_threshold, 150.0);
/// assert!(!params.l2_gradient);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    /// Gradients above this are edges when connected to a strong edge.
    pub low_threshold: f64,
    /// Gradients above this are always edges.
    pub high_threshold: f64,
    /// Use `sqrt(gx² + gy²)` instead of `|gx| + |gy|`.
    pub l2_gradient: bool,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            low_threshold: DEFAULT_LOW_THRESHOLD,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            l2_gradient: false,
        }
    }
}

impl EdgeParams {
    pub fn new(low_threshold: f64, high_threshold: f64) -> Self {
        Self {
            low_threshold,
            high_threshold,
            ..Default::default()
        }
    }

    pub fn with_l2_gradient(mut self, l2_gradient: bool) -> Self {
        self.l2_gradient = l2_gradient;
        self
    }

    /// Checks the thresholds and returns them as `(low, high)`.
    ///
    /// Thresholds given in the wrong order are swapped.
    pub fn thresholds(&self) -> FrameResult<(f64, f64)> {
        let (low, high) = (self.low_threshold, self.high_threshold);
        if !low.is_finite() || !high.is_finite() {
            return Err(FrameError::InvalidThreshold { low, high });
        }
        if low > high {
            Ok((high, low))
        } else {
            Ok((low, high))
        }
    }

    /// Parses parameters from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
