// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door and window detection
//!
//! Openings are classified from segment length alone. There is no position,
//! orientation or wall-adjacency reasoning, so any stroke of the right length
//! (a bookshelf edge, a dimension tick) is reported as a door or window.
//! Edges are traced on both sides of a drawn stroke, so one stroke usually
//! yields two openings; counts are candidates, not physical doors.

use crate::config::{HoughConfig, OpeningThresholds};
use crate::image_ops::canny_edges;
use crate::line_ops::detect_lines;
use crate::types::{LineSegment, Opening, OpeningType, Openings};
use image::GrayImage;
use tracing::debug;

/// Classify a segment by its length, or `None` if it is outside the band
pub fn classify_segment(length: f64, thresholds: &OpeningThresholds) -> Option<OpeningType> {
    if length <= thresholds.min_length || length >= thresholds.max_length {
        return None;
    }
    if length < thresholds.window_max_length {
        Some(OpeningType::Window)
    } else {
        Some(OpeningType::Door)
    }
}

/// Sort segments into doors and windows, discarding everything else
pub fn classify_openings(segments: &[LineSegment], thresholds: &OpeningThresholds) -> Openings {
    let mut openings = Openings::default();

    for segment in segments {
        let opening = Opening::from_segment(segment);
        match classify_segment(opening.length, thresholds) {
            Some(OpeningType::Door) => openings.doors.push(opening),
            Some(OpeningType::Window) => openings.windows.push(opening),
            None => {}
        }
    }

    openings
}

/// Detect door and window candidates in a binary wall mask
pub fn detect_openings(
    mask: &GrayImage,
    hough: &HoughConfig,
    thresholds: &OpeningThresholds,
) -> Openings {
    let edges = canny_edges(mask, hough.canny_low, hough.canny_high);
    let segments = detect_lines(&edges, hough);
    let openings = classify_openings(&segments, thresholds);

    debug!(
        segments = segments.len(),
        doors = openings.doors.len(),
        windows = openings.windows.len(),
        "Opening detection completed"
    );
    openings
}
