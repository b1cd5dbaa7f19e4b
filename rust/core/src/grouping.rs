// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collinear grouping: bucketing normalized lines by orientation and
//! quantized perpendicular coordinate

use crate::types::{NormalizedLine, Orientation};
use rustc_hash::FxHashMap;

/// Bucket key: orientation plus the floor-quantized perpendicular coordinate
/// stored as an integer bucket index (`floor(coord / tolerance)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub orientation: Orientation,
    pub bucket: i64,
}

impl GroupKey {
    fn for_line(line: &NormalizedLine, tolerance: f64) -> Self {
        Self {
            orientation: line.orientation,
            bucket: (line.coord / tolerance).floor() as i64,
        }
    }

    /// The bucket's representative coordinate:
    /// `floor(coord / tolerance) * tolerance`.
    pub fn representative_coord(&self, tolerance: f64) -> f64 {
        self.bucket as f64 * tolerance
    }
}

/// Lines bucketed by [`GroupKey`].
///
/// Buckets iterate in first-insertion order and lines within a bucket keep
/// their input order, so everything downstream (including the
/// order-dependent parallel collapse) stays deterministic.
#[derive(Debug, Clone)]
pub struct CollinearGroups {
    groups: Vec<(GroupKey, Vec<NormalizedLine>)>,
    index: FxHashMap<GroupKey, usize>,
    tolerance: f64,
}

impl CollinearGroups {
    /// The quantization tolerance the buckets were built with.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate buckets in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[NormalizedLine])> {
        self.groups.iter().map(|(key, lines)| (key, lines.as_slice()))
    }

    /// Lines sharing the given key, if any line quantized to it.
    pub fn get(&self, key: &GroupKey) -> Option<&[NormalizedLine]> {
        self.index.get(key).map(|&i| self.groups[i].1.as_slice())
    }
}

/// Bucket lines by orientation and quantized coordinate.
///
/// Pure grouping; no merging happens here. Two lines whose coordinates
/// differ by less than `tolerance` can still land in different buckets when
/// they straddle a multiple of the tolerance; that approximation is accepted
/// and not corrected downstream.
pub fn group_collinear(lines: &[NormalizedLine], tolerance: f64) -> CollinearGroups {
    let mut groups: Vec<(GroupKey, Vec<NormalizedLine>)> = Vec::new();
    let mut index: FxHashMap<GroupKey, usize> = FxHashMap::default();

    for line in lines {
        let key = GroupKey::for_line(line, tolerance);
        match index.get(&key) {
            Some(&i) => groups[i].1.push(*line),
            None => {
                index.insert(key, groups.len());
                groups.push((key, vec![*line]));
            }
        }
    }

    CollinearGroups {
        groups,
        index,
        tolerance,
    }
}
