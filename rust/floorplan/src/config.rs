// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Analyzer configuration
//!
//! Every heuristic constant of the pipeline lives here with its default
//! value. Configurations deserialize from partial JSON documents; missing
//! fields take the defaults.

use crate::error::{FloorPlanError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Environment variable overriding [`AnalyzerConfig::min_room_area`]
pub const MIN_ROOM_AREA_ENV: &str = "FLOORPLAN_MIN_ROOM_AREA";

/// Binarization parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Gaussian blur kernel size (odd)
    pub blur_kernel_size: u32,
    /// Adaptive threshold neighbourhood size (odd)
    pub threshold_block_size: u32,
    /// Constant subtracted from the weighted local mean
    pub threshold_c: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: 5,
            threshold_block_size: 11,
            threshold_c: 2.0,
        }
    }
}

/// Area / aspect ratio bands of the room-type decision table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomTypeThresholds {
    pub large_area: f64,
    pub living_room_min_ratio: f64,
    pub medium_area: f64,
    pub dining_room_min_ratio: f64,
    pub small_area: f64,
    pub bathroom_max_ratio: f64,
}

impl Default for RoomTypeThresholds {
    fn default() -> Self {
        Self {
            large_area: 100_000.0,
            living_room_min_ratio: 2.0,
            medium_area: 50_000.0,
            dining_room_min_ratio: 1.5,
            small_area: 20_000.0,
            bathroom_max_ratio: 1.2,
        }
    }
}

/// Edge and probabilistic Hough parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughConfig {
    pub canny_low: f32,
    pub canny_high: f32,
    /// Minimum accumulator votes for a line
    pub vote_threshold: u32,
    /// Angular resolution in degrees
    pub theta_resolution_deg: f64,
    /// Distance resolution in pixels
    pub rho_resolution: f64,
    pub min_line_length: f64,
    pub max_line_gap: f64,
}

impl Default for HoughConfig {
    fn default() -> Self {
        Self {
            canny_low: 50.0,
            canny_high: 150.0,
            vote_threshold: 50,
            theta_resolution_deg: 1.0,
            rho_resolution: 1.0,
            min_line_length: 20.0,
            max_line_gap: 10.0,
        }
    }
}

/// Length band used to turn segments into doors and windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningThresholds {
    /// Exclusive lower bound of kept segments
    pub min_length: f64,
    /// Exclusive upper bound of kept segments
    pub max_length: f64,
    /// Segments shorter than this are windows, the rest doors
    pub window_max_length: f64,
}

impl Default for OpeningThresholds {
    fn default() -> Self {
        Self {
            min_length: 30.0,
            max_length: 100.0,
            window_max_length: 60.0,
        }
    }
}

/// Area tiers controlling how many priority levels are recommended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaTiers {
    /// Rooms below this only get essentials
    pub medium_from: u64,
    /// Rooms at or above this get every tier
    pub large_from: u64,
}

impl Default for AreaTiers {
    fn default() -> Self {
        Self {
            medium_from: 30_000,
            large_from: 60_000,
        }
    }
}

/// Complete analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum room area (square pixels)
    pub min_room_area: f64,
    /// Wall closing radius for wall counting (1 = 3x3 element)
    pub wall_close_radius: u8,
    pub preprocess: PreprocessConfig,
    pub room_types: RoomTypeThresholds,
    pub hough: HoughConfig,
    pub openings: OpeningThresholds,
    pub area_tiers: AreaTiers,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_room_area: 5000.0,
            wall_close_radius: 1,
            preprocess: PreprocessConfig::default(),
            room_types: RoomTypeThresholds::default(),
            hough: HoughConfig::default(),
            openings: OpeningThresholds::default(),
            area_tiers: AreaTiers::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Defaults with `min_room_area` taken from `FLOORPLAN_MIN_ROOM_AREA`
    /// when set. Invalid values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(MIN_ROOM_AREA_ENV) {
            match parse_min_room_area(&raw) {
                Ok(area) => config.min_room_area = area,
                Err(e) => warn!(
                    variable = MIN_ROOM_AREA_ENV,
                    value = %raw,
                    error = %e,
                    "Ignoring invalid minimum room area"
                ),
            }
        }
        config
    }

    /// Parse a (possibly partial) JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| FloorPlanError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would silently disable a filter or break detection
    pub fn validate(&self) -> Result<()> {
        check_min_room_area(self.min_room_area)?;

        let p = &self.preprocess;
        for (name, size) in [
            ("preprocess.blur_kernel_size", p.blur_kernel_size),
            ("preprocess.threshold_block_size", p.threshold_block_size),
        ] {
            if size % 2 == 0 {
                return Err(FloorPlanError::Config(format!("{name} must be odd, got {size}")));
            }
        }
        if !p.threshold_c.is_finite() {
            return Err(FloorPlanError::Config("preprocess.threshold_c must be finite".into()));
        }

        let h = &self.hough;
        for (name, value) in [
            ("hough.theta_resolution_deg", h.theta_resolution_deg),
            ("hough.rho_resolution", h.rho_resolution),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(FloorPlanError::Config(format!("{name} must be positive, got {value}")));
            }
        }

        let o = &self.openings;
        let ordered = [o.min_length, o.window_max_length, o.max_length]
            .iter()
            .all(|v| v.is_finite())
            && o.min_length <= o.window_max_length
            && o.window_max_length <= o.max_length;
        if !ordered {
            return Err(FloorPlanError::Config(format!(
                "opening lengths must be ordered min <= window_max <= max, got {} / {} / {}",
                o.min_length, o.window_max_length, o.max_length
            )));
        }

        Ok(())
    }

    /// Load a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FloorPlanError::NotFound {
                path: path.to_path_buf(),
            },
            _ => FloorPlanError::Io(e),
        })?;
        Self::from_json(&text)
    }
}

/// Parse a minimum room area given as text
pub fn parse_min_room_area(raw: &str) -> Result<f64> {
    let area = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| FloorPlanError::Config(format!("min_room_area {raw:?}: {e}")))?;
    check_min_room_area(area)?;
    Ok(area)
}

fn check_min_room_area(area: f64) -> Result<()> {
    if area.is_finite() && area >= 0.0 {
        Ok(())
    } else {
        Err(FloorPlanError::Config(format!(
            "min_room_area must be a finite, non-negative number, got {area}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_heuristic_constants() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.min_room_area, 5000.0);
        assert_eq!(config.preprocess.blur_kernel_size, 5);
        assert_eq!(config.preprocess.threshold_block_size, 11);
        assert_eq!(config.hough.vote_threshold, 50);
        assert_eq!(config.openings.window_max_length, 60.0);
        assert_eq!(config.area_tiers.large_from, 60_000);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AnalyzerConfig::from_json(
            r#"{ "min_room_area": 1200, "openings": { "max_length": 120 } }"#,
        )
        .unwrap();

        assert_eq!(config.min_room_area, 1200.0);
        assert_eq!(config.openings.max_length, 120.0);
        assert_eq!(config.openings.min_length, 30.0);
        assert_eq!(config.hough, HoughConfig::default());
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(AnalyzerConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let err = AnalyzerConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, FloorPlanError::NotFound { .. }));
    }

    #[test]
    fn test_parse_min_room_area() {
        assert_eq!(parse_min_room_area(" 1200 ").unwrap(), 1200.0);
        assert_eq!(parse_min_room_area("0").unwrap(), 0.0);
        for raw in ["NaN", "nan", "-1", "inf", "-inf", "big"] {
            let err = parse_min_room_area(raw).unwrap_err();
            assert!(matches!(err, FloorPlanError::Config(_)), "{raw} accepted");
        }
    }

    #[test]
    fn test_from_env_ignores_invalid_value() {
        std::env::set_var(MIN_ROOM_AREA_ENV, "NaN");
        assert_eq!(AnalyzerConfig::from_env().min_room_area, 5000.0);

        std::env::set_var(MIN_ROOM_AREA_ENV, "-250");
        assert_eq!(AnalyzerConfig::from_env().min_room_area, 5000.0);

        std::env::set_var(MIN_ROOM_AREA_ENV, "1200");
        assert_eq!(AnalyzerConfig::from_env().min_room_area, 1200.0);

        std::env::remove_var(MIN_ROOM_AREA_ENV);
        assert_eq!(AnalyzerConfig::from_env().min_room_area, 5000.0);
    }

    #[test]
    fn test_negative_min_room_area_in_json_is_rejected() {
        let err = AnalyzerConfig::from_json(r#"{ "min_room_area": -10 }"#).unwrap_err();
        assert!(matches!(err, FloorPlanError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_nan_area() {
        let config = AnalyzerConfig {
            min_room_area: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(FloorPlanError::Config(_))));
        assert!(AnalyzerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inconsistent_thresholds() {
        let even_block =
            AnalyzerConfig::from_json(r#"{ "preprocess": { "threshold_block_size": 10 } }"#);
        assert!(matches!(even_block, Err(FloorPlanError::Config(_))));

        let zero_rho = AnalyzerConfig::from_json(r#"{ "hough": { "rho_resolution": 0 } }"#);
        assert!(matches!(zero_rho, Err(FloorPlanError::Config(_))));

        let swapped = AnalyzerConfig::from_json(r#"{ "openings": { "min_length": 80 } }"#);
        assert!(matches!(swapped, Err(FloorPlanError::Config(_))));
    }

    #[test]
    fn test_invalid_config_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "min_room_area": -1 }"#).unwrap();

        let err = AnalyzerConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, FloorPlanError::Config(_)));
    }
}
