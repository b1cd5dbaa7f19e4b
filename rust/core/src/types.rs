// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core value types for wall-axis reconstruction

use serde::{Deserialize, Serialize};

/// Axis orientation of a normalized line or wall.
///
/// Sketched walls are snapped to one of the two drawing axes; diagonal
/// segments never survive normalization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A 2D point in sketch pixel space
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Raw 4-point line segment as produced by the line detector.
///
/// Transient input to the normalizer; nothing downstream sees it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RawSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl RawSegment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// An axis-aligned line: orientation, perpendicular coordinate, and the
/// along-axis range with `start <= end`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NormalizedLine {
    pub orientation: Orientation,
    /// Perpendicular-axis position: mean of the two endpoints' y (horizontal)
    /// or x (vertical) coordinates.
    pub coord: f64,
    pub start: f64,
    pub end: f64,
}

impl NormalizedLine {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// A finalized wall axis: the one-dimensional centerline of a wall.
///
/// Emitted by the segment merger with `length() >= min_wall_axis_length`;
/// the parallel collapser may still adjust coord and range, after which the
/// value is immutable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WallAxis {
    pub orientation: Orientation,
    pub coord: f64,
    pub start: f64,
    pub end: f64,
}

impl WallAxis {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// A wall axis reclassified as a dimension annotation.
///
/// Geometry is copied from the source wall; the annotation payload (value,
/// score) is mandatory. `source_wall` indexes the finalized wall sequence
/// the classifier was given: a lookup relation, not an owning reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionLine {
    pub orientation: Orientation,
    pub coord: f64,
    pub start: f64,
    pub end: f64,
    /// Recognized dimension text, e.g. "3.50".
    pub value: String,
    /// Recognition confidence of the matched text, in [0, 1].
    pub score: f64,
    /// Index of the originating wall in the classifier's input sequence.
    pub source_wall: usize,
}

/// Outcome of classifying a single finalized wall axis.
///
/// A wall is either structural or a dimension annotation, never both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ClassifiedAxis {
    Structural(WallAxis),
    Dimension(DimensionLine),
}

/// Recognized-text item from the OCR collaborator (read-only input).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrItem {
    pub text: String,
    /// Recognition confidence in [0, 1].
    pub score: f64,
    /// Bounding polygon of the recognized text, in the same pixel space as
    /// the walls.
    pub bbox: [Point2D; 4],
}

impl OcrItem {
    /// Centroid of the bounding polygon (mean of its four points).
    pub fn centroid(&self) -> Point2D {
        let (sx, sy) = self
            .bbox
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point2D::new(sx / 4.0, sy / 4.0)
    }

    /// Width of the axis-aligned extent of the bounding polygon.
    pub fn width(&self) -> f64 {
        let min = self.bbox.iter().map(|p| p.x).fold(f64::MAX, f64::min);
        let max = self.bbox.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        max - min
    }

    /// Height of the axis-aligned extent of the bounding polygon.
    pub fn height(&self) -> f64 {
        let min = self.bbox.iter().map(|p| p.y).fold(f64::MAX, f64::min);
        let max = self.bbox.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        max - min
    }
}
