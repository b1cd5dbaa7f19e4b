// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line-segment extraction from edge images

use crate::LineDetectConfig;
use image::GrayImage;
use sketchplan_core::RawSegment;
use std::f64::consts::PI;

/// Detect line segments in an edge image with a probabilistic Hough
/// transform.
///
/// Votes every edge pixel into a (theta, rho) accumulator, then walks the
/// peaks in descending vote order, collects the unclaimed edge pixels near
/// each peak line, sorts them along the line direction, and splits runs at
/// gaps larger than `max_line_gap`. Runs shorter than `min_line_length` are
/// dropped. Each surviving run becomes one raw 4-point segment.
pub fn detect_segments(edges: &GrayImage, config: &LineDetectConfig) -> Vec<RawSegment> {
    let width = edges.width() as i32;
    let height = edges.height() as i32;

    let theta_resolution = PI / 180.0;
    let num_thetas = (PI / theta_resolution) as usize;

    let mut cos_table = Vec::with_capacity(num_thetas);
    let mut sin_table = Vec::with_capacity(num_thetas);
    for i in 0..num_thetas {
        let theta = i as f64 * theta_resolution;
        cos_table.push(theta.cos());
        sin_table.push(theta.sin());
    }

    let max_rho = ((width * width + height * height) as f64).sqrt();
    let num_rhos = (2.0 * max_rho) as usize + 1;
    let rho_offset = max_rho;

    let mut edge_points: Vec<(i32, i32)> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if edges.get_pixel(x as u32, y as u32).0[0] > 128 {
                edge_points.push((x, y));
            }
        }
    }

    let mut accumulator = vec![0u32; num_thetas * num_rhos];
    for &(x, y) in &edge_points {
        for theta_idx in 0..num_thetas {
            let rho = x as f64 * cos_table[theta_idx] + y as f64 * sin_table[theta_idx];
            let rho_idx = (rho + rho_offset) as usize;
            if rho_idx < num_rhos {
                accumulator[theta_idx * num_rhos + rho_idx] += 1;
            }
        }
    }

    let mut peaks: Vec<(usize, usize, u32)> = Vec::new();
    for theta_idx in 0..num_thetas {
        for rho_idx in 0..num_rhos {
            let votes = accumulator[theta_idx * num_rhos + rho_idx];
            if votes >= config.hough_threshold {
                peaks.push((theta_idx, rho_idx, votes));
            }
        }
    }
    peaks.sort_by(|a, b| b.2.cmp(&a.2));

    let mut segments = Vec::new();
    let mut used = vec![false; edge_points.len()];

    for (theta_idx, rho_idx, _votes) in peaks.iter().take(500) {
        let rho = *rho_idx as f64 - rho_offset;
        let cos_t = cos_table[*theta_idx];
        let sin_t = sin_table[*theta_idx];

        // Unclaimed edge pixels within 2px of this peak line
        let mut line_points: Vec<(i32, i32, usize)> = Vec::new();
        for (i, &(x, y)) in edge_points.iter().enumerate() {
            if used[i] {
                continue;
            }
            let point_rho = x as f64 * cos_t + y as f64 * sin_t;
            if (point_rho - rho).abs() < 2.0 {
                line_points.push((x, y, i));
            }
        }

        if line_points.len() < 2 {
            continue;
        }

        // Order the pixels along the line direction
        line_points.sort_by(|a, b| {
            let proj_a = a.0 as f64 * (-sin_t) + a.1 as f64 * cos_t;
            let proj_b = b.0 as f64 * (-sin_t) + b.1 as f64 * cos_t;
            proj_a.total_cmp(&proj_b)
        });

        // Split runs at gaps and emit the long-enough ones
        let mut run_start = 0;
        for i in 1..=line_points.len() {
            let gap_here = if i == line_points.len() {
                true
            } else {
                let dx = (line_points[i].0 - line_points[i - 1].0) as f64;
                let dy = (line_points[i].1 - line_points[i - 1].1) as f64;
                (dx * dx + dy * dy).sqrt() > config.max_line_gap
            };

            if gap_here {
                if let Some(segment) =
                    run_to_segment(&line_points[run_start..i], config.min_line_length)
                {
                    segments.push(segment);
                    for p in &line_points[run_start..i] {
                        used[p.2] = true;
                    }
                }
                run_start = i;
            }
        }
    }

    segments
}

fn run_to_segment(run: &[(i32, i32, usize)], min_length: f64) -> Option<RawSegment> {
    if run.len() < 2 {
        return None;
    }
    let (first, last) = (run[0], run[run.len() - 1]);
    let dx = (last.0 - first.0) as f64;
    let dy = (last.1 - first.1) as f64;
    if (dx * dx + dy * dy).sqrt() < min_length {
        return None;
    }
    Some(RawSegment::new(
        first.0 as f64,
        first.1 as f64,
        last.0 as f64,
        last.1 as f64,
    ))
}

/// Keep only segments within `tolerance_deg` of horizontal or vertical.
///
/// Door arcs, furniture outlines, and dimension arrows are mostly diagonal;
/// sketched walls are not.
pub fn filter_near_axis(segments: &[RawSegment], tolerance_deg: f64) -> Vec<RawSegment> {
    segments
        .iter()
        .filter(|seg| {
            let angle = (seg.y2 - seg.y1).atan2(seg.x2 - seg.x1).to_degrees().abs();
            angle < tolerance_deg
                || (angle - 90.0).abs() < tolerance_deg
                || angle > 180.0 - tolerance_deg
        })
        .copied()
        .collect()
}
