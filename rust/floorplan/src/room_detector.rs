// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room detection via contour finding
//!
//! Rooms are the enclosed open-floor regions of the wall mask: the mask is
//! inverted, borders are traced, and every region that is closed off from
//! the image border and large enough becomes a [`Room`]. A region's area is
//! its outer polygon minus the holes punched into it. Thick walls leave a
//! band of "floor" inside the wall stroke; such a band encloses the real
//! room, so regions that enclose another room are discarded.

use crate::config::RoomTypeThresholds;
use crate::image_ops::invert;
use crate::types::{BoundingBox, PixelPoint, Room, RoomType};
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use tracing::debug;

/// Zeroth and first order moments of a closed polygon, normalized to a
/// non-negative area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonMoments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl PolygonMoments {
    /// Moments via Green's theorem over the polygon edges
    pub fn of(points: &[PixelPoint]) -> Self {
        let n = points.len();
        let mut m00 = 0.0;
        let mut m10 = 0.0;
        let mut m01 = 0.0;

        if n < 3 {
            return Self { m00, m10, m01 };
        }

        for i in 0..n {
            let p = points[i];
            let q = points[(i + 1) % n];
            let (xi, yi) = (p.x as f64, p.y as f64);
            let (xj, yj) = (q.x as f64, q.y as f64);
            let cross = xi * yj - xj * yi;
            m00 += cross;
            m10 += (xi + xj) * cross;
            m01 += (yi + yj) * cross;
        }

        // Clockwise and counter-clockwise tracings give the same moments
        let sign = if m00 < 0.0 { -1.0 } else { 1.0 };
        Self {
            m00: sign * m00 / 2.0,
            m10: sign * m10 / 6.0,
            m01: sign * m01 / 6.0,
        }
    }

    /// Moments of this polygon with `hole` cut out of it
    pub fn without(&self, hole: &PolygonMoments) -> Self {
        Self {
            m00: self.m00 - hole.m00,
            m10: self.m10 - hole.m10,
            m01: self.m01 - hole.m01,
        }
    }

    /// Enclosed area
    pub fn area(&self) -> f64 {
        self.m00.max(0.0)
    }

    /// Center of mass, or `None` for a zero-area polygon
    pub fn centroid(&self) -> Option<PixelPoint> {
        if self.m00 <= 0.0 {
            return None;
        }
        Some(PixelPoint::new(
            (self.m10 / self.m00) as i32,
            (self.m01 / self.m00) as i32,
        ))
    }
}

/// Detect rooms as enclosed regions of a binary wall mask (255 = wall)
pub fn detect_rooms(
    mask: &GrayImage,
    min_room_area: f64,
    thresholds: &RoomTypeThresholds,
) -> Vec<Room> {
    let (width, height) = mask.dimensions();
    let floor = invert(mask);

    let contours = find_contours::<i32>(&floor);
    debug!(contours = contours.len(), "Traced floor contours");

    let polygons: Vec<Vec<PixelPoint>> = contours
        .iter()
        .map(|c| c.points.iter().map(|p| PixelPoint::new(p.x, p.y)).collect())
        .collect();

    // Hole borders belong to the region that surrounds them
    let mut regions: Vec<PolygonMoments> = polygons.iter().map(|p| PolygonMoments::of(p)).collect();
    for (i, contour) in contours.iter().enumerate() {
        if let (BorderType::Hole, Some(parent)) = (contour.border_type, contour.parent) {
            let hole = PolygonMoments::of(&polygons[i]);
            regions[parent] = regions[parent].without(&hole);
        }
    }

    let candidates: Vec<Option<Room>> = contours
        .iter()
        .enumerate()
        .map(|(id, contour)| match contour.border_type {
            BorderType::Outer => room_from_region(
                id,
                &polygons[id],
                &regions[id],
                width,
                height,
                min_room_area,
                thresholds,
            ),
            BorderType::Hole => None,
        })
        .collect();

    let mut encloses_room = vec![false; candidates.len()];
    for (id, candidate) in candidates.iter().enumerate() {
        if candidate.is_none() {
            continue;
        }
        let mut ancestor = contours[id].parent;
        while let Some(index) = ancestor {
            if candidates[index].is_some() {
                encloses_room[index] = true;
            }
            ancestor = contours[index].parent;
        }
    }

    let rooms: Vec<Room> = candidates
        .into_iter()
        .enumerate()
        .filter(|(id, _)| !encloses_room[*id])
        .filter_map(|(_, room)| room)
        .collect();

    debug!(rooms = rooms.len(), "Room segmentation completed");
    rooms
}

/// Build a room from one traced region, or `None` if it is not a room
fn room_from_region(
    id: usize,
    contour: &[PixelPoint],
    moments: &PolygonMoments,
    image_width: u32,
    image_height: u32,
    min_room_area: f64,
    thresholds: &RoomTypeThresholds,
) -> Option<Room> {
    let bounding_box = BoundingBox::from_points(contour)?;

    // Open background around the drawing
    if bounding_box.touches_image_border(image_width, image_height) {
        return None;
    }

    let area = moments.area();
    if area < min_room_area {
        return None;
    }

    let centroid = moments.centroid().unwrap_or_else(|| bounding_box.center());
    let aspect_ratio = bounding_box.aspect_ratio();

    Some(Room {
        id,
        room_type: classify_room(area, aspect_ratio, thresholds),
        area_pixels: area as u64,
        bounding_box,
        centroid,
        aspect_ratio,
        contour: contour.to_vec(),
    })
}

/// Room type decision table; the first matching band wins
pub fn classify_room(area: f64, aspect_ratio: f64, t: &RoomTypeThresholds) -> RoomType {
    if area > t.large_area {
        if aspect_ratio > t.living_room_min_ratio {
            RoomType::LivingRoom
        } else {
            RoomType::MasterBedroom
        }
    } else if area > t.medium_area {
        if aspect_ratio > t.dining_room_min_ratio {
            RoomType::DiningRoom
        } else {
            RoomType::Bedroom
        }
    } else if area > t.small_area {
        if aspect_ratio < t.bathroom_max_ratio {
            RoomType::Bathroom
        } else {
            RoomType::Kitchen
        }
    } else {
        RoomType::StorageOrHallway
    }
}
