// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line normalization: raw detector segments to axis-aligned lines

use crate::types::{NormalizedLine, Orientation, RawSegment};

/// Snap raw segments to the drawing axes.
///
/// The dominant coordinate delta picks the orientation; the perpendicular
/// coordinate becomes the mean of the two endpoints and the along-axis range
/// is sorted so `start <= end`. Exactly diagonal segments (`dx == dy`) are
/// ambiguous and are dropped: a filtering policy, not an error. Relative
/// order of the survivors is preserved.
pub fn normalize_segments(segments: &[RawSegment]) -> Vec<NormalizedLine> {
    segments
        .iter()
        .filter_map(|seg| {
            let dx = (seg.x2 - seg.x1).abs();
            let dy = (seg.y2 - seg.y1).abs();

            if dx > dy {
                Some(NormalizedLine {
                    orientation: Orientation::Horizontal,
                    coord: (seg.y1 + seg.y2) / 2.0,
                    start: seg.x1.min(seg.x2),
                    end: seg.x1.max(seg.x2),
                })
            } else if dy > dx {
                Some(NormalizedLine {
                    orientation: Orientation::Vertical,
                    coord: (seg.x1 + seg.x2) / 2.0,
                    start: seg.y1.min(seg.y2),
                    end: seg.y1.max(seg.y2),
                })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_horizontal_segment() {
        let lines = normalize_segments(&[RawSegment::new(120.0, 12.0, 0.0, 10.0)]);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].orientation, Orientation::Horizontal);
        assert_relative_eq!(lines[0].coord, 11.0);
        assert_relative_eq!(lines[0].start, 0.0);
        assert_relative_eq!(lines[0].end, 120.0);
    }

    #[test]
    fn test_vertical_segment() {
        let lines = normalize_segments(&[RawSegment::new(40.0, 200.0, 42.0, 20.0)]);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].orientation, Orientation::Vertical);
        assert_relative_eq!(lines[0].coord, 41.0);
        assert_relative_eq!(lines[0].start, 20.0);
        assert_relative_eq!(lines[0].end, 200.0);
    }

    #[test]
    fn test_exact_diagonal_is_dropped() {
        let lines = normalize_segments(&[
            RawSegment::new(0.0, 0.0, 50.0, 50.0),
            RawSegment::new(10.0, 10.0, 0.0, 20.0),
        ]);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_zero_length_segment_is_dropped() {
        // dx == dy == 0 falls under the diagonal tie rule
        let lines = normalize_segments(&[RawSegment::new(5.0, 5.0, 5.0, 5.0)]);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_survivor_order_preserved() {
        let lines = normalize_segments(&[
            RawSegment::new(0.0, 0.0, 100.0, 2.0),
            RawSegment::new(0.0, 0.0, 30.0, 30.0),
            RawSegment::new(50.0, 0.0, 52.0, 90.0),
        ]);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].orientation, Orientation::Horizontal);
        assert_eq!(lines[1].orientation, Orientation::Vertical);
    }
}
