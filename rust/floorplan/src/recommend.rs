// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Furniture recommendations per room
//!
//! A [`FurnitureCatalog`] maps room type names to prioritized furniture
//! lists. Recommendations for a room are its catalog entry filtered by the
//! room's [`AreaTier`]: small rooms only get essentials, medium rooms add
//! recommended items, large rooms get everything.

use crate::config::AreaTiers;
use crate::error::{FloorPlanError, Result};
use crate::types::{FurnitureRecommendation, Priority, RoomType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Room size band controlling which priorities are surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AreaTier {
    Small,
    Medium,
    Large,
}

impl AreaTier {
    pub fn for_area(area_pixels: u64, tiers: &AreaTiers) -> Self {
        if area_pixels < tiers.medium_from {
            AreaTier::Small
        } else if area_pixels < tiers.large_from {
            AreaTier::Medium
        } else {
            AreaTier::Large
        }
    }

    /// Lowest priority still shown for this tier
    pub fn max_priority(&self) -> Priority {
        match self {
            AreaTier::Small => Priority::Essential,
            AreaTier::Medium => Priority::Recommended,
            AreaTier::Large => Priority::Optional,
        }
    }

    pub fn allows(&self, priority: Priority) -> bool {
        priority <= self.max_priority()
    }
}

/// Static room type -> furniture mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureCatalog {
    /// Used for room types without an entry
    #[serde(default = "default_fallback")]
    pub fallback: Vec<FurnitureRecommendation>,
    #[serde(flatten)]
    pub rooms: BTreeMap<String, Vec<FurnitureRecommendation>>,
}

fn default_fallback() -> Vec<FurnitureRecommendation> {
    vec![FurnitureRecommendation::new("general_storage", Priority::Recommended)]
}

fn items(list: &[(&str, Priority)]) -> Vec<FurnitureRecommendation> {
    list.iter()
        .map(|(item, priority)| FurnitureRecommendation::new(*item, *priority))
        .collect()
}

impl Default for FurnitureCatalog {
    fn default() -> Self {
        use Priority::{Essential, Optional, Recommended};

        let mut rooms = BTreeMap::new();
        rooms.insert(
            RoomType::Bedroom.to_string(),
            items(&[
                ("bed", Essential),
                ("nightstand", Recommended),
                ("wardrobe", Essential),
                ("dresser", Optional),
                ("chair", Optional),
            ]),
        );
        rooms.insert(
            RoomType::MasterBedroom.to_string(),
            items(&[
                ("king_bed", Essential),
                ("nightstands_pair", Essential),
                ("wardrobe", Essential),
                ("dresser", Recommended),
                ("seating_area", Optional),
            ]),
        );
        rooms.insert(
            RoomType::LivingRoom.to_string(),
            items(&[
                ("sofa", Essential),
                ("coffee_table", Essential),
                ("tv_stand", Recommended),
                ("armchair", Optional),
                ("bookshelf", Optional),
            ]),
        );
        rooms.insert(
            RoomType::DiningRoom.to_string(),
            items(&[
                ("dining_table", Essential),
                ("dining_chairs", Essential),
                ("buffet", Optional),
                ("china_cabinet", Optional),
            ]),
        );
        rooms.insert(
            RoomType::Kitchen.to_string(),
            items(&[
                ("dining_table_small", Recommended),
                ("bar_stools", Optional),
                ("kitchen_island", Optional),
            ]),
        );
        rooms.insert(
            RoomType::Bathroom.to_string(),
            items(&[
                ("vanity", Essential),
                ("storage_cabinet", Recommended),
                ("towel_rack", Essential),
            ]),
        );

        Self {
            fallback: default_fallback(),
            rooms,
        }
    }
}

impl FurnitureCatalog {
    /// Parse a catalog from JSON: `{ "<room_type>": [{item, priority}], "fallback": [...] }`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| FloorPlanError::Catalog(e.to_string()))
    }

    /// Load a JSON catalog file
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

    /// Full, unfiltered list for a room type
    pub fn entry(&self, room_type: &str) -> &[FurnitureRecommendation] {
        self.rooms
            .get(room_type)
            .map(Vec::as_slice)
            .unwrap_or(&self.fallback)
    }

    /// Recommendations for a room of the given type and area.
    ///
    /// Never fails: unknown types degrade to the fallback list, which is
    /// still filtered by area tier.
    pub fn recommend(
        &self,
        room_type: &str,
        area_pixels: u64,
        tiers: &AreaTiers,
    ) -> Vec<FurnitureRecommendation> {
        let tier = AreaTier::for_area(area_pixels, tiers);
        self.entry(room_type)
            .iter()
            .filter(|r| tier.allows(r.priority))
            .cloned()
            .collect()
    }
}
