// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for floor plan analysis and furniture recommendation

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D point in image space (sub-pixel)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An integer pixel coordinate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Line segment produced by the Hough transform
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub start: Point2D,
    pub end: Point2D,
}

impl LineSegment {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Axis-aligned rectangle enclosing a region
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Smallest box containing every point (inclusive pixel extents).
    ///
    /// Returns `None` for an empty point set.
    pub fn from_points(points: &[PixelPoint]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            x: min_x,
            y: min_y,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }

    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }

    /// Longer side over shorter side, always >= 1.0
    pub fn aspect_ratio(&self) -> f64 {
        let long = self.width.max(self.height) as f64;
        let short = self.width.min(self.height).max(1) as f64;
        long / short
    }

    /// Whether the box reaches any edge of a `width` x `height` image
    pub fn touches_image_border(&self, width: u32, height: u32) -> bool {
        self.x <= 0
            || self.y <= 0
            || self.x as i64 + self.width as i64 >= width as i64
            || self.y as i64 + self.height as i64 >= height as i64
    }
}

/// Room classification derived from area and aspect ratio
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    LivingRoom,
    MasterBedroom,
    DiningRoom,
    Bedroom,
    Bathroom,
    Kitchen,
    StorageOrHallway,
}

impl RoomType {
    pub const ALL: [RoomType; 7] = [
        RoomType::LivingRoom,
        RoomType::MasterBedroom,
        RoomType::DiningRoom,
        RoomType::Bedroom,
        RoomType::Bathroom,
        RoomType::Kitchen,
        RoomType::StorageOrHallway,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::LivingRoom => "living_room",
            RoomType::MasterBedroom => "master_bedroom",
            RoomType::DiningRoom => "dining_room",
            RoomType::Bedroom => "bedroom",
            RoomType::Bathroom => "bathroom",
            RoomType::Kitchen => "kitchen",
            RoomType::StorageOrHallway => "storage_or_hallway",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detected enclosed area of the floor plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    /// Contour discovery index, unique within one analysis
    pub id: usize,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub area_pixels: u64,
    pub bounding_box: BoundingBox,
    pub centroid: PixelPoint,
    pub aspect_ratio: f64,
    /// Boundary polygon, only kept for rendering
    #[serde(skip)]
    pub contour: Vec<PixelPoint>,
}

/// Opening classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OpeningType {
    Door,
    Window,
}

/// Door or window candidate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Opening {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub length: f64,
}

impl Opening {
    pub fn from_segment(segment: &LineSegment) -> Self {
        Self {
            x1: segment.start.x.round() as i32,
            y1: segment.start.y.round() as i32,
            x2: segment.end.x.round() as i32,
            y2: segment.end.y.round() as i32,
            length: segment.length(),
        }
    }
}

/// Doors and windows found in one floor plan
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Openings {
    pub doors: Vec<Opening>,
    pub windows: Vec<Opening>,
}

/// Recommendation priority tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Essential,
    Recommended,
    Optional,
}

/// A single furniture suggestion for a room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FurnitureRecommendation {
    pub item: String,
    pub priority: Priority,
}

impl FurnitureRecommendation {
    pub fn new(item: impl Into<String>, priority: Priority) -> Self {
        Self {
            item: item.into(),
            priority,
        }
    }
}

/// A room together with the furniture recommended for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzedRoom {
    #[serde(flatten)]
    pub room: Room,
    pub furniture_recommendations: Vec<FurnitureRecommendation>,
}

/// Complete floor plan analysis result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub total_rooms: usize,
    /// Sum of retained room areas; floor area below the room threshold is
    /// not counted
    pub total_area_pixels: u64,
    pub rooms: Vec<AnalyzedRoom>,
    pub doors: Vec<Opening>,
    pub windows: Vec<Opening>,
    pub wall_count: usize,
}

impl AnalysisResult {
    pub fn new(rooms: Vec<AnalyzedRoom>, openings: Openings, wall_count: usize) -> Self {
        Self {
            total_rooms: rooms.len(),
            total_area_pixels: rooms.iter().map(|r| r.room.area_pixels).sum(),
            rooms,
            doors: openings.doors,
            windows: openings.windows,
            wall_count,
        }
    }

    /// Rooms ordered by descending area, ties broken by id.
    ///
    /// Room ids follow contour discovery order; use this when a stable,
    /// size-based ordering is needed instead.
    pub fn sorted_by_area(mut self) -> Self {
        self.rooms.sort_by(|a, b| {
            b.room
                .area_pixels
                .cmp(&a.room.area_pixels)
                .then(a.room.id.cmp(&b.room.id))
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_from_points() {
        let points = vec![
            PixelPoint::new(10, 20),
            PixelPoint::new(30, 20),
            PixelPoint::new(30, 60),
            PixelPoint::new(10, 60),
        ];

        let bbox = BoundingBox::from_points(&points).unwrap();
        assert_eq!(bbox, BoundingBox { x: 10, y: 20, width: 21, height: 41 });
        assert_eq!(bbox.center(), PixelPoint::new(20, 40));
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_aspect_ratio_is_orientation_independent() {
        let wide = BoundingBox { x: 0, y: 0, width: 200, height: 100 };
        let tall = BoundingBox { x: 0, y: 0, width: 100, height: 200 };
        assert_eq!(wide.aspect_ratio(), 2.0);
        assert_eq!(tall.aspect_ratio(), 2.0);
    }

    #[test]
    fn test_touches_image_border() {
        let inner = BoundingBox { x: 5, y: 5, width: 10, height: 10 };
        let edge = BoundingBox { x: 0, y: 5, width: 10, height: 10 };
        let far_edge = BoundingBox { x: 5, y: 5, width: 15, height: 10 };
        assert!(!inner.touches_image_border(20, 20));
        assert!(edge.touches_image_border(20, 20));
        assert!(far_edge.touches_image_border(20, 20));
    }

    #[test]
    fn test_room_serialization_shape() {
        let room = AnalyzedRoom {
            room: Room {
                id: 3,
                room_type: RoomType::StorageOrHallway,
                area_pixels: 6000,
                bounding_box: BoundingBox { x: 1, y: 2, width: 100, height: 60 },
                centroid: PixelPoint::new(51, 32),
                aspect_ratio: 100.0 / 60.0,
                contour: vec![PixelPoint::new(1, 2)],
            },
            furniture_recommendations: vec![FurnitureRecommendation::new(
                "general_storage",
                Priority::Recommended,
            )],
        };

        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["type"], "storage_or_hallway");
        assert_eq!(json["bounding_box"]["width"], 100);
        assert_eq!(json["furniture_recommendations"][0]["priority"], "recommended");
        assert!(json.get("contour").is_none());
    }

    #[test]
    fn test_sorted_by_area() {
        let make = |id, area| AnalyzedRoom {
            room: Room {
                id,
                room_type: RoomType::Kitchen,
                area_pixels: area,
                bounding_box: BoundingBox { x: 0, y: 0, width: 1, height: 1 },
                centroid: PixelPoint::new(0, 0),
                aspect_ratio: 1.0,
                contour: Vec::new(),
            },
            furniture_recommendations: Vec::new(),
        };
        let result = AnalysisResult::new(
            vec![make(0, 10), make(1, 30), make(2, 30)],
            Openings::default(),
            0,
        );

        let ids: Vec<usize> = result.sorted_by_area().rooms.iter().map(|r| r.room.id).collect();
        assert_eq!(ids, vec![1, 2, 0]);
    }
}
