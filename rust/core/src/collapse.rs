// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parallel collapse: unifying the twin drawn edges of one physical wall

use crate::config::ReconstructionConfig;
use crate::types::WallAxis;

/// Collapse nearly-parallel duplicate walls into single axes.
///
/// A sketched wall usually appears as two parallel lines (its two faces).
/// Walking the walls in order, each unassigned wall seeds a group and claims
/// every later unassigned wall of the same orientation whose coordinate is
/// within `max_wall_thickness` of the SEED and whose along-axis interval
/// overlaps the SEED's by at least `min_overlap_ratio` of the shorter of the
/// two. Membership is decided against the seed only, never against walls
/// added later; a wall that overlaps a member but not the seed stays out.
/// The result is order- and seed-dependent; that direct-link semantics is
/// intentional and must not be replaced by transitive clustering.
///
/// Groups of one pass through unchanged. Larger groups collapse to a single
/// wall: mean coordinate, min start, max end, orientation unchanged.
pub fn collapse_parallel(walls: Vec<WallAxis>, config: &ReconstructionConfig) -> Vec<WallAxis> {
    let mut assigned = vec![false; walls.len()];
    let mut collapsed = Vec::with_capacity(walls.len());

    for i in 0..walls.len() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;

        let seed = walls[i];
        let mut group = vec![seed];

        for j in (i + 1)..walls.len() {
            if assigned[j] {
                continue;
            }
            if joins_seed(&seed, &walls[j], config) {
                assigned[j] = true;
                group.push(walls[j]);
            }
        }

        collapsed.push(collapse_group(&group));
    }

    collapsed
}

/// Whether `candidate` belongs to `seed`'s group.
fn joins_seed(seed: &WallAxis, candidate: &WallAxis, config: &ReconstructionConfig) -> bool {
    if candidate.orientation != seed.orientation {
        return false;
    }
    if (seed.coord - candidate.coord).abs() > config.max_wall_thickness {
        return false;
    }

    let overlap = seed.end.min(candidate.end) - seed.start.max(candidate.start);
    if overlap <= 0.0 {
        return false;
    }

    let shorter = seed.length().min(candidate.length());
    shorter > 0.0 && overlap / shorter >= config.min_overlap_ratio
}

fn collapse_group(group: &[WallAxis]) -> WallAxis {
    if group.len() == 1 {
        return group[0];
    }

    let coord = group.iter().map(|w| w.coord).sum::<f64>() / group.len() as f64;
    let start = group.iter().map(|w| w.start).fold(f64::MAX, f64::min);
    let end = group.iter().map(|w| w.end).fold(f64::MIN, f64::max);

    WallAxis {
        orientation: group[0].orientation,
        coord,
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Orientation;
    use approx::assert_relative_eq;

    fn hwall(coord: f64, start: f64, end: f64) -> WallAxis {
        WallAxis {
            orientation: Orientation::Horizontal,
            coord,
            start,
            end,
        }
    }

    fn vwall(coord: f64, start: f64, end: f64) -> WallAxis {
        WallAxis {
            orientation: Orientation::Vertical,
            coord,
            start,
            end,
        }
    }

    fn config(thickness: f64, ratio: f64) -> ReconstructionConfig {
        ReconstructionConfig {
            max_wall_thickness: thickness,
            min_overlap_ratio: ratio,
            ..Default::default()
        }
    }

    #[test]
    fn test_twin_edges_collapse() {
        // overlap = 150, shorter length = 150, ratio = 1.0
        let walls = vec![hwall(100.0, 0.0, 200.0), hwall(120.0, 50.0, 220.0)];
        let collapsed = collapse_parallel(walls, &config(40.0, 0.6));

        assert_eq!(collapsed.len(), 1);
        assert_relative_eq!(collapsed[0].coord, 110.0);
        assert_relative_eq!(collapsed[0].start, 0.0);
        assert_relative_eq!(collapsed[0].end, 220.0);
        assert_eq!(collapsed[0].orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_different_orientation_never_collapses() {
        let walls = vec![hwall(100.0, 0.0, 200.0), vwall(100.0, 0.0, 200.0)];
        assert_eq!(collapse_parallel(walls, &config(40.0, 0.6)).len(), 2);
    }

    #[test]
    fn test_too_far_apart_stays_separate() {
        let walls = vec![hwall(100.0, 0.0, 200.0), hwall(150.0, 0.0, 200.0)];
        assert_eq!(collapse_parallel(walls, &config(40.0, 0.6)).len(), 2);
    }

    #[test]
    fn test_insufficient_overlap_stays_separate() {
        // overlap = 20, shorter length = 200, ratio = 0.1
        let walls = vec![hwall(100.0, 0.0, 200.0), hwall(110.0, 180.0, 380.0)];
        assert_eq!(collapse_parallel(walls, &config(40.0, 0.6)).len(), 2);
    }

    #[test]
    fn test_touching_intervals_do_not_collapse() {
        // overlap must be strictly positive
        let walls = vec![hwall(100.0, 0.0, 200.0), hwall(110.0, 200.0, 400.0)];
        assert_eq!(collapse_parallel(walls, &config(40.0, 0.6)).len(), 2);
    }

    #[test]
    fn test_idempotent_on_collapsed_set() {
        let walls = vec![
            hwall(100.0, 0.0, 200.0),
            hwall(200.0, 0.0, 200.0),
            vwall(50.0, 0.0, 300.0),
        ];
        let collapsed = collapse_parallel(walls.clone(), &config(40.0, 0.6));
        assert_eq!(collapsed, walls);
    }

    #[test]
    fn test_membership_is_seed_linked_not_transitive() {
        // B joins seed A; C overlaps B's extent but is beyond the thickness
        // tolerance of A, so C seeds its own group.
        let walls = vec![
            hwall(100.0, 0.0, 200.0),
            hwall(130.0, 0.0, 200.0),
            hwall(160.0, 0.0, 200.0),
        ];
        let collapsed = collapse_parallel(walls, &config(40.0, 0.6));

        assert_eq!(collapsed.len(), 2);
        assert_relative_eq!(collapsed[0].coord, 115.0);
        assert_relative_eq!(collapsed[1].coord, 160.0);
    }

    #[test]
    fn test_three_way_group_means_coords() {
        let walls = vec![
            hwall(100.0, 0.0, 200.0),
            hwall(110.0, 10.0, 210.0),
            hwall(120.0, 20.0, 220.0),
        ];
        let collapsed = collapse_parallel(walls, &config(40.0, 0.6));

        assert_eq!(collapsed.len(), 1);
        assert_relative_eq!(collapsed[0].coord, 110.0);
        assert_relative_eq!(collapsed[0].start, 0.0);
        assert_relative_eq!(collapsed[0].end, 220.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(collapse_parallel(Vec::new(), &config(40.0, 0.6)).is_empty());
    }
}
