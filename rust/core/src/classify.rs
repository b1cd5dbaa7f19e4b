// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimension classification: separating structural walls from
//! dimension-annotation lines via recognized text

use crate::config::ReconstructionConfig;
use crate::types::{ClassifiedAxis, DimensionLine, OcrItem, Orientation, WallAxis};

/// Partition of a finalized wall set into structural walls and dimension
/// lines. Both sequences keep the walls' relative order.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisPartition {
    pub structural: Vec<WallAxis>,
    pub dimensions: Vec<DimensionLine>,
}

/// Classify each finalized wall against the recognized-text items.
///
/// For every wall, the items are scanned in their given order and the FIRST
/// one that is numeric, orientation-compatible, and close enough wins
/// (first-match-wins, not best-match); the wall becomes a dimension line
/// carrying that text and score. Walls with no match stay structural.
///
/// No exclusivity across walls: one item may be consumed by several walls'
/// classifications. `DimensionLine::source_wall` indexes the input sequence.
pub fn classify_axes(
    walls: Vec<WallAxis>,
    ocr_items: &[OcrItem],
    config: &ReconstructionConfig,
) -> AxisPartition {
    let mut structural = Vec::new();
    let mut dimensions = Vec::new();

    for (index, wall) in walls.into_iter().enumerate() {
        match classify_wall(wall, index, ocr_items, config) {
            ClassifiedAxis::Structural(wall) => structural.push(wall),
            ClassifiedAxis::Dimension(dim) => dimensions.push(dim),
        }
    }

    AxisPartition {
        structural,
        dimensions,
    }
}

/// Classify one wall: the first matching item reclassifies it.
pub fn classify_wall(
    wall: WallAxis,
    index: usize,
    ocr_items: &[OcrItem],
    config: &ReconstructionConfig,
) -> ClassifiedAxis {
    for item in ocr_items {
        if !is_numeric_dimension(&item.text) {
            continue;
        }
        if box_orientation(item) != wall.orientation {
            continue;
        }
        if centroid_offset(item, &wall) > config.max_dimension_offset {
            continue;
        }

        return ClassifiedAxis::Dimension(DimensionLine {
            orientation: wall.orientation,
            coord: wall.coord,
            start: wall.start,
            end: wall.end,
            value: item.text.clone(),
            score: item.score,
            source_wall: index,
        });
    }

    ClassifiedAxis::Structural(wall)
}

/// Whether the text reads as a real number once a comma decimal separator is
/// normalized to a period.
fn is_numeric_dimension(text: &str) -> bool {
    text.replace(',', ".").parse::<f64>().is_ok()
}

/// Orientation implied by the text box shape: wider than tall reads along
/// the horizontal axis, everything else along the vertical.
fn box_orientation(item: &OcrItem) -> Orientation {
    if item.width() > item.height() {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    }
}

/// Perpendicular distance from the box centroid to the wall's axis.
fn centroid_offset(item: &OcrItem, wall: &WallAxis) -> f64 {
    let centroid = item.centroid();
    match wall.orientation {
        Orientation::Horizontal => (centroid.y - wall.coord).abs(),
        Orientation::Vertical => (centroid.x - wall.coord).abs(),
    }
}
