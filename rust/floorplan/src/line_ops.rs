// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line segment detection

use crate::config::HoughConfig;
use crate::types::{LineSegment, Point2D};
use image::GrayImage;
use std::f64::consts::PI;

/// Upper bound on accumulator peaks turned into segments
const MAX_PEAKS: usize = 500;

/// Detect line segments using a probabilistic Hough transform
///
/// Edge pixels vote in (theta, rho) space; the strongest cells are walked
/// in descending vote order and the pixels lying on each one are split into
/// segments wherever consecutive pixels are more than `max_line_gap` apart.
/// A pixel is consumed by the first segment that claims it. The walk order
/// is fully determined by the votes, so results are reproducible.
pub fn detect_lines(edges: &GrayImage, config: &HoughConfig) -> Vec<LineSegment> {
    let width = edges.width() as i64;
    let height = edges.height() as i64;

    let rho_resolution = config.rho_resolution.max(f64::EPSILON);
    let theta_resolution = config.theta_resolution_deg.max(f64::EPSILON).to_radians();
    let num_thetas = ((PI / theta_resolution).round() as usize).max(1);

    // Precompute sin/cos tables
    let (cos_table, sin_table): (Vec<f64>, Vec<f64>) = (0..num_thetas)
        .map(|i| {
            let theta = i as f64 * theta_resolution;
            (theta.cos(), theta.sin())
        })
        .unzip();

    let max_rho = ((width * width + height * height) as f64).sqrt();
    let num_rhos = (2.0 * max_rho / rho_resolution) as usize + 1;
    let rho_offset = max_rho;

    let edge_points: Vec<(i64, i64)> = edges
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[0] > 128)
        .map(|(x, y, _)| (x as i64, y as i64))
        .collect();

    if edge_points.is_empty() {
        return Vec::new();
    }

    // Vote in Hough space
    let mut accumulator = vec![0u32; num_thetas * num_rhos];
    for &(x, y) in &edge_points {
        for theta_idx in 0..num_thetas {
            let rho = x as f64 * cos_table[theta_idx] + y as f64 * sin_table[theta_idx];
            let rho_idx = ((rho + rho_offset) / rho_resolution) as usize;
            if rho_idx < num_rhos {
                accumulator[theta_idx * num_rhos + rho_idx] += 1;
            }
        }
    }

    let mut peaks: Vec<(usize, usize, u32)> = Vec::new();
    for theta_idx in 0..num_thetas {
        for rho_idx in 0..num_rhos {
            let votes = accumulator[theta_idx * num_rhos + rho_idx];
            if votes >= config.vote_threshold {
                peaks.push((theta_idx, rho_idx, votes));
            }
        }
    }

    // Stable sort keeps (theta, rho) order among equal votes
    peaks.sort_by(|a, b| b.2.cmp(&a.2));

    let band = 2.0 * rho_resolution;
    let mut used = vec![false; edge_points.len()];
    let mut lines = Vec::new();

    for &(theta_idx, rho_idx, _) in peaks.iter().take(MAX_PEAKS) {
        let rho = rho_idx as f64 * rho_resolution - rho_offset;
        let cos_t = cos_table[theta_idx];
        let sin_t = sin_table[theta_idx];

        let mut line_points: Vec<(i64, i64, usize)> = edge_points
            .iter()
            .enumerate()
            .filter(|&(i, &(x, y))| {
                !used[i] && (x as f64 * cos_t + y as f64 * sin_t - rho).abs() < band
            })
            .map(|(i, &(x, y))| (x, y, i))
            .collect();

        if line_points.len() < 2 {
            continue;
        }

        // Order points along the line direction
        line_points.sort_by(|a, b| {
            let proj_a = a.0 as f64 * (-sin_t) + a.1 as f64 * cos_t;
            let proj_b = b.0 as f64 * (-sin_t) + b.1 as f64 * cos_t;
            proj_a.total_cmp(&proj_b)
        });

        let mut segment_start = 0;
        for i in 1..=line_points.len() {
            let split = i == line_points.len() || {
                let dx = (line_points[i].0 - line_points[i - 1].0) as f64;
                let dy = (line_points[i].1 - line_points[i - 1].1) as f64;
                (dx * dx + dy * dy).sqrt() > config.max_line_gap
            };

            if !split {
                continue;
            }

            if i - segment_start >= 2 {
                let start = &line_points[segment_start];
                let end = &line_points[i - 1];
                let segment = LineSegment::new(
                    Point2D::new(start.0 as f64, start.1 as f64),
                    Point2D::new(end.0 as f64, end.1 as f64),
                );

                if segment.length() >= config.min_line_length {
                    for point in &line_points[segment_start..i] {
                        used[point.2] = true;
                    }
                    lines.push(segment);
                }
            }
            segment_start = i;
        }
    }

    lines
}
