// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for configuration validation
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised when a reconstruction configuration is degenerate.
///
/// Validation happens once, before the pipeline runs; the pipeline itself
/// never re-checks its parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("min_overlap_ratio must be within (0, 1], got {0}")]
    OverlapRatioOutOfRange(f64),

    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
}
