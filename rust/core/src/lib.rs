// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall-axis reconstruction from hand-drawn floor-plan sketches
//!
//! This crate turns the raw line segments detected in a sketch into
//! structured wall axes and separates structural walls from
//! dimension-annotation lines:
//!
//! 1. Normalize raw 4-point segments into axis-aligned lines
//! 2. Group collinear lines by orientation and quantized coordinate
//! 3. Merge each group's intervals into continuous wall axes
//! 4. Collapse duplicate parallel axes (the two drawn faces of one wall)
//! 5. Classify walls as structural or dimension lines using recognized text
//!
//! The whole pipeline is a synchronous, deterministic pure transform; the
//! only inputs are the segment list, the recognized-text items, and an
//! explicit [`ReconstructionConfig`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use sketchplan_core::{classify_axes, reconstruct_wall_axes, ReconstructionConfig};
//!
//! let config = ReconstructionConfig::default();
//! config.validate()?;
//!
//! let walls = reconstruct_wall_axes(&segments, &config);
//! let partition = classify_axes(walls, &ocr_items, &config);
//! ```

pub mod classify;
pub mod collapse;
pub mod config;
pub mod error;
pub mod grouping;
pub mod merge;
pub mod normalize;
pub mod types;

// Re-export commonly used types and functions
pub use classify::{classify_axes, classify_wall, AxisPartition};
pub use collapse::collapse_parallel;
pub use config::ReconstructionConfig;
pub use error::ConfigError;
pub use grouping::{group_collinear, CollinearGroups, GroupKey};
pub use merge::merge_groups;
pub use normalize::normalize_segments;
pub use types::{
    ClassifiedAxis, DimensionLine, NormalizedLine, OcrItem, Orientation, Point2D, RawSegment,
    WallAxis,
};

/// Run the geometric reconstruction: segments in, finalized wall axes out.
///
/// Chains normalization, collinear grouping, segment merging, and parallel
/// collapse. Classification against recognized text is a separate step
/// ([`classify_axes`]) so callers without OCR data can stop here.
pub fn reconstruct_wall_axes(
    segments: &[RawSegment],
    config: &ReconstructionConfig,
) -> Vec<WallAxis> {
    let normalized = normalize_segments(segments);
    let groups = group_collinear(&normalized, config.colinear_tolerance);
    let candidates = merge_groups(&groups, config);
    collapse_parallel(candidates, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_input_yields_empty_output() {
        let walls = reconstruct_wall_axes(&[], &ReconstructionConfig::default());
        assert!(walls.is_empty());
    }

    #[test]
    fn test_collinear_segments_merge_into_one_wall() {
        let segments = [
            RawSegment::new(0.0, 10.0, 120.0, 10.0),
            RawSegment::new(130.0, 10.0, 250.0, 10.0),
        ];
        let config = ReconstructionConfig {
            colinear_tolerance: 30.0,
            merge_gap: 120.0,
            min_wall_axis_length: 80.0,
            ..Default::default()
        };

        let walls = reconstruct_wall_axes(&segments, &config);

        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].orientation, Orientation::Horizontal);
        assert_relative_eq!(walls[0].start, 0.0);
        assert_relative_eq!(walls[0].end, 250.0);
    }

    #[test]
    fn test_diagonals_contribute_nothing() {
        let segments = [
            RawSegment::new(0.0, 0.0, 100.0, 100.0),
            RawSegment::new(200.0, 0.0, 300.0, 100.0),
        ];
        let walls = reconstruct_wall_axes(&segments, &ReconstructionConfig::default());
        assert!(walls.is_empty());
    }
}
