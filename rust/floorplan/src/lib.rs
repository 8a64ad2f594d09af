// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan analysis and furniture recommendation
//!
//! This crate provides a classical computer vision pipeline for:
//! 1. Binarizing floor plan images (grayscale, blur, adaptive threshold)
//! 2. Detecting rooms as enclosed contours and classifying them by geometry
//! 3. Detecting door and window candidates (Canny + Hough transform)
//! 4. Recommending furniture for each room from a catalog
//! 5. Rendering an annotated copy of the plan
//!
//! # Usage
//!
//! ```rust,ignore
//! use interior_floorplan::{AnalyzerConfig, FloorPlanAnalyzer};
//! use std::path::Path;
//!
//! let analyzer = FloorPlanAnalyzer::new(AnalyzerConfig::from_env());
//! let result = analyzer.analyze_path("plan.png", Some(Path::new("annotated.png")))?;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod image_ops;
pub mod line_ops;
pub mod opening_detector;
pub mod recommend;
pub mod room_detector;
pub mod types;
pub mod visualize;
pub mod wall_detector;

// Re-export commonly used types and functions
pub use analyzer::FloorPlanAnalyzer;
pub use config::{
    AnalyzerConfig, AreaTiers, HoughConfig, OpeningThresholds, PreprocessConfig,
    RoomTypeThresholds,
};
pub use error::{FloorPlanError, Result};
pub use image_ops::{decode_image, load_image, preprocess};
pub use opening_detector::detect_openings;
pub use recommend::{AreaTier, FurnitureCatalog};
pub use room_detector::{classify_room, detect_rooms};
pub use types::{
    AnalysisResult, AnalyzedRoom, BoundingBox, FurnitureRecommendation, Opening, OpeningType,
    Openings, PixelPoint, Point2D, Priority, Room, RoomType,
};
pub use visualize::{render_analysis, write_visualization};
pub use wall_detector::count_walls;
