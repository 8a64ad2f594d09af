// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end floor plan analysis
//!
//! [`FloorPlanAnalyzer`] runs the full pipeline over one image:
//! 1. Binarization into a wall mask
//! 2. Room segmentation and classification
//! 3. Wall counting
//! 4. Door and window detection
//! 5. Furniture recommendations per room
//!
//! The analyzer only holds configuration and is never mutated, so one
//! instance can be shared between threads.

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::image_ops::{decode_image, load_image, preprocess};
use crate::opening_detector::detect_openings;
use crate::recommend::FurnitureCatalog;
use crate::room_detector::detect_rooms;
use crate::types::{AnalysisResult, AnalyzedRoom, FurnitureRecommendation, Room};
use crate::visualize::write_visualization;
use crate::wall_detector::count_walls;
use image::RgbImage;
use std::path::Path;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Default)]
pub struct FloorPlanAnalyzer {
    config: AnalyzerConfig,
    catalog: FurnitureCatalog,
}

impl FloorPlanAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_catalog(config, FurnitureCatalog::default())
    }

    pub fn with_catalog(config: AnalyzerConfig, catalog: FurnitureCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &FurnitureCatalog {
        &self.catalog
    }

    /// Load an image file and analyze it
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn analyze_path(
        &self,
        path: impl AsRef<Path>,
        visualization: Option<&Path>,
    ) -> Result<AnalysisResult> {
        let image = load_image(path)?;
        Ok(self.analyze_image(&image, visualization))
    }

    /// Decode an encoded image buffer in memory and analyze it
    pub fn analyze_bytes(&self, bytes: &[u8], visualization: Option<&Path>) -> Result<AnalysisResult> {
        let image = decode_image(bytes)?;
        Ok(self.analyze_image(&image, visualization))
    }

    /// Analyze a decoded image.
    ///
    /// When `visualization` is set an annotated copy is written there. A
    /// failed write is logged and does not affect the returned result; use
    /// [`write_visualization`] directly to observe the error.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn analyze_image(&self, image: &RgbImage, visualization: Option<&Path>) -> AnalysisResult {
        let config = &self.config;
        let mask = preprocess(image, &config.preprocess);

        let rooms = detect_rooms(&mask, config.min_room_area, &config.room_types);
        let wall_count = count_walls(&mask, config.wall_close_radius);
        let openings = detect_openings(&mask, &config.hough, &config.openings);

        if let Some(path) = visualization {
            if let Err(e) = write_visualization(image, &rooms, &openings, path) {
                warn!(error = %e, "Could not write visualization");
            }
        }

        let analyzed: Vec<AnalyzedRoom> = rooms
            .into_iter()
            .map(|room| AnalyzedRoom {
                furniture_recommendations: self.recommend_furniture(&room),
                room,
            })
            .collect();

        let result = AnalysisResult::new(analyzed, openings, wall_count);
        info!(
            rooms = result.total_rooms,
            area = result.total_area_pixels,
            doors = result.doors.len(),
            windows = result.windows.len(),
            walls = result.wall_count,
            "Floor plan analysis completed"
        );
        result
    }

    /// Catalog recommendations for one detected room
    pub fn recommend_furniture(&self, room: &Room) -> Vec<FurnitureRecommendation> {
        self.recommend(room.room_type.as_str(), room.area_pixels)
    }

    /// Catalog recommendations for an arbitrary room type name
    pub fn recommend(&self, room_type: &str, area_pixels: u64) -> Vec<FurnitureRecommendation> {
        self.catalog
            .recommend(room_type, area_pixels, &self.config.area_tiers)
    }
}
