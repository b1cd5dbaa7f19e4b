// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sketch preprocessing and line-segment detection
//!
//! The raster frontend of the reconstruction pipeline:
//!
//! 1. Clean up a grayscale sketch photo (blur, inverse threshold,
//!    morphological close, Canny edges)
//! 2. Extract raw line segments from the edge map (probabilistic Hough)
//!
//! The output is the [`RawSegment`](sketchplan_core::RawSegment) sequence
//! that `sketchplan-core` normalizes and merges into wall axes. None of the
//! parameters here are read by the reconstruction core.

pub mod image_ops;
pub mod line_ops;

// Re-export commonly used functions
pub use image_ops::{canny_edges, gaussian_blur, morphological_close, preprocess_sketch, threshold_inverted};
pub use line_ops::{detect_segments, filter_near_axis};

use serde::{Deserialize, Serialize};

/// Parameters for sketch cleanup before edge extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Gaussian blur kernel size in pixels (sigma is derived from it).
    pub blur_kernel: u32,
    /// Inverse binarization threshold: pixels at or below it count as ink.
    pub threshold: u8,
    /// Canny edge detection low threshold.
    pub canny_low: f32,
    /// Canny edge detection high threshold.
    pub canny_high: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            blur_kernel: 5,
            threshold: 100,
            canny_low: 50.0,
            canny_high: 150.0,
        }
    }
}

/// Parameters for Hough line-segment extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineDetectConfig {
    /// Hough accumulator vote threshold.
    pub hough_threshold: u32,
    /// Minimum segment length in pixels.
    pub min_line_length: f64,
    /// Maximum pixel gap bridged within one segment.
    pub max_line_gap: f64,
    /// Angle tolerance (degrees) for the near-axis segment filter.
    pub axis_angle_tolerance_deg: f64,
}

impl Default for LineDetectConfig {
    fn default() -> Self {
        Self {
            hough_threshold: 100,
            min_line_length: 50.0,
            max_line_gap: 20.0,
            axis_angle_tolerance_deg: 5.0,
        }
    }
}
