// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for floor plan operations
pub type Result<T> = std::result::Result<T, FloorPlanError>;

/// Errors that can occur while loading or analyzing a floor plan
#[derive(Error, Debug)]
pub enum FloorPlanError {
    #[error("Floor plan not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Visualization failed: {0}")]
    Visualization(String),

    #[error("Invalid analyzer config: {0}")]
    Config(String),

    #[error("Invalid furniture catalog: {0}")]
    Catalog(String),
}

impl FloorPlanError {
    /// Whether the error was caused by the caller's input rather than by
    /// the environment (the request should be rejected, not retried).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            FloorPlanError::NotFound { .. } | FloorPlanError::InvalidImage(_)
        )
    }
}
