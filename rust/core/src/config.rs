// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for the wall-axis reconstruction pipeline

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Tolerances for the reconstruction pipeline, all in sketch pixel units
/// (except the dimensionless overlap ratio).
///
/// An explicit value threaded through every component entry point; nothing in
/// the pipeline reads process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconstructionConfig {
    /// Quantization step for collinear grouping: lines whose perpendicular
    /// coordinates floor-quantize to the same multiple of this tolerance
    /// share a bucket.
    pub colinear_tolerance: f64,
    /// Maximum along-axis gap between segments merged into one wall axis.
    pub merge_gap: f64,
    /// Minimum along-axis length for a merged interval to become a wall.
    pub min_wall_axis_length: f64,
    /// Maximum perpendicular distance between parallel walls collapsed into
    /// one axis (the two drawn faces of a physical wall).
    pub max_wall_thickness: f64,
    /// Minimum fraction of the shorter of two along-axis intervals that
    /// their intersection must cover for the walls to collapse.
    pub min_overlap_ratio: f64,
    /// Maximum perpendicular distance from a recognized-text centroid to a
    /// wall axis for the wall to classify as a dimension line.
    pub max_dimension_offset: f64,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            colinear_tolerance: 30.0,
            merge_gap: 120.0,
            min_wall_axis_length: 80.0,
            max_wall_thickness: 40.0,
            min_overlap_ratio: 0.6,
            max_dimension_offset: 40.0,
        }
    }
}

impl ReconstructionConfig {
    /// Reject degenerate parameter values.
    ///
    /// Callers run this once at startup; the pipeline assumes a validated
    /// configuration.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("colinear_tolerance", self.colinear_tolerance),
            ("merge_gap", self.merge_gap),
            ("min_wall_axis_length", self.min_wall_axis_length),
            ("max_wall_thickness", self.max_wall_thickness),
            ("min_overlap_ratio", self.min_overlap_ratio),
            ("max_dimension_offset", self.max_dimension_offset),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }

        let positive = [
            ("colinear_tolerance", self.colinear_tolerance),
            ("min_wall_axis_length", self.min_wall_axis_length),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        let non_negative = [
            ("merge_gap", self.merge_gap),
            ("max_wall_thickness", self.max_wall_thickness),
            ("max_dimension_offset", self.max_dimension_offset),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        if self.min_overlap_ratio <= 0.0 || self.min_overlap_ratio > 1.0 {
            return Err(ConfigError::OverlapRatioOutOfRange(self.min_overlap_ratio));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ReconstructionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_tolerance() {
        let config = ReconstructionConfig {
            colinear_tolerance: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                name: "colinear_tolerance",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_non_positive_min_length() {
        let config = ReconstructionConfig {
            min_wall_axis_length: -5.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_overlap_ratio_out_of_range() {
        for ratio in [0.0, -0.1, 1.5] {
            let config = ReconstructionConfig {
                min_overlap_ratio: ratio,
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::OverlapRatioOutOfRange(ratio))
            );
        }
        let config = ReconstructionConfig {
            min_overlap_ratio: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_nan() {
        let config = ReconstructionConfig {
            merge_gap: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
