// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Segment merging: per-bucket interval sweep producing wall-axis candidates

use crate::config::ReconstructionConfig;
use crate::grouping::CollinearGroups;
use crate::types::{Orientation, WallAxis};

/// Merge each bucket's lines into continuous wall axes.
///
/// Within a bucket, lines are stably sorted by `start` (ties keep input
/// order) and swept with a running interval: a line starting within
/// `merge_gap` of the running end extends it, anything further closes the
/// interval and seeds the next one. Closed intervals (the final one
/// included) become walls at the bucket's representative coordinate when
/// they reach `min_wall_axis_length`; shorter ones are discarded as noise.
///
/// O(n log n) per bucket, dominated by the sort.
pub fn merge_groups(groups: &CollinearGroups, config: &ReconstructionConfig) -> Vec<WallAxis> {
    let tolerance = groups.tolerance();
    let mut walls = Vec::new();

    for (key, lines) in groups.iter() {
        let mut sorted = lines.to_vec();
        sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

        let coord = key.representative_coord(tolerance);
        let mut cur_start = sorted[0].start;
        let mut cur_end = sorted[0].end;

        for line in &sorted[1..] {
            if line.start <= cur_end + config.merge_gap {
                cur_end = cur_end.max(line.end);
            } else {
                push_if_long_enough(&mut walls, key.orientation, coord, cur_start, cur_end, config);
                cur_start = line.start;
                cur_end = line.end;
            }
        }
        push_if_long_enough(&mut walls, key.orientation, coord, cur_start, cur_end, config);
    }

    walls
}

fn push_if_long_enough(
    walls: &mut Vec<WallAxis>,
    orientation: Orientation,
    coord: f64,
    start: f64,
    end: f64,
    config: &ReconstructionConfig,
) {
    if end - start >= config.min_wall_axis_length {
        walls.push(WallAxis {
            orientation,
            coord,
            start,
            end,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_collinear;
    use crate::types::{NormalizedLine, Orientation};
    use approx::assert_relative_eq;

    fn hline(coord: f64, start: f64, end: f64) -> NormalizedLine {
        NormalizedLine {
            orientation: Orientation::Horizontal,
            coord,
            start,
            end,
        }
    }

    fn config(merge_gap: f64, min_len: f64) -> ReconstructionConfig {
        ReconstructionConfig {
            merge_gap,
            min_wall_axis_length: min_len,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_line_becomes_wall() {
        let groups = group_collinear(&[hline(10.0, 0.0, 120.0)], 30.0);
        let walls = merge_groups(&groups, &config(120.0, 80.0));

        assert_eq!(walls.len(), 1);
        assert_relative_eq!(walls[0].start, 0.0);
        assert_relative_eq!(walls[0].end, 120.0);
        // Representative coordinate of the bucket, not the line's own coord.
        assert_relative_eq!(walls[0].coord, 0.0);
    }

    #[test]
    fn test_gap_within_merge_gap_unifies() {
        let groups = group_collinear(
            &[hline(10.0, 0.0, 120.0), hline(10.0, 219.0, 400.0)],
            30.0,
        );
        let walls = merge_groups(&groups, &config(120.0, 80.0));

        assert_eq!(walls.len(), 1);
        assert_relative_eq!(walls[0].start, 0.0);
        assert_relative_eq!(walls[0].end, 400.0);
    }

    #[test]
    fn test_gap_beyond_merge_gap_stays_split() {
        let groups = group_collinear(
            &[hline(10.0, 0.0, 120.0), hline(10.0, 219.0, 400.0)],
            30.0,
        );
        let walls = merge_groups(&groups, &config(50.0, 80.0));

        assert_eq!(walls.len(), 2);
        assert_relative_eq!(walls[0].end, 120.0);
        assert_relative_eq!(walls[1].start, 219.0);
    }

    #[test]
    fn test_short_interval_discarded() {
        let groups = group_collinear(
            &[hline(10.0, 0.0, 50.0), hline(10.0, 300.0, 500.0)],
            30.0,
        );
        let walls = merge_groups(&groups, &config(100.0, 80.0));

        assert_eq!(walls.len(), 1);
        assert_relative_eq!(walls[0].start, 300.0);
    }

    #[test]
    fn test_overlapping_lines_extend_not_shrink() {
        // A contained interval must not pull the running end backwards.
        let groups = group_collinear(
            &[hline(10.0, 0.0, 400.0), hline(10.0, 50.0, 100.0)],
            30.0,
        );
        let walls = merge_groups(&groups, &config(0.0, 80.0));

        assert_eq!(walls.len(), 1);
        assert_relative_eq!(walls[0].end, 400.0);
    }

    #[test]
    fn test_unsorted_input_is_sorted_by_start() {
        let groups = group_collinear(
            &[hline(10.0, 130.0, 250.0), hline(12.0, 0.0, 120.0)],
            30.0,
        );
        let walls = merge_groups(&groups, &config(120.0, 80.0));

        assert_eq!(walls.len(), 1);
        assert_relative_eq!(walls[0].start, 0.0);
        assert_relative_eq!(walls[0].end, 250.0);
    }

    #[test]
    fn test_empty_groups_yield_no_walls() {
        let groups = group_collinear(&[], 30.0);
        assert!(merge_groups(&groups, &config(120.0, 80.0)).is_empty());
    }
}
