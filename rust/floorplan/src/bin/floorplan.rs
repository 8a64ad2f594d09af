// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: analyze floor plan images and query furniture recommendations
//!
//! Usage:
//!   floorplan analyze <IMAGE> [--output annotated.png] [--config cfg.json]
//!   floorplan recommend --room-type bedroom --area 45000
//!   floorplan catalog
//!
//! JSON goes to stdout, logs to stderr (filtered by `RUST_LOG`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use interior_floorplan::{AnalyzerConfig, FloorPlanAnalyzer, FurnitureCatalog};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "floorplan", version, about = "Floor plan analysis and furniture recommendations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect rooms, walls, doors and windows and print the result as JSON
    Analyze {
        /// Floor plan image (JPEG, PNG, BMP or TIFF)
        image: PathBuf,
        /// Write an annotated copy of the plan here
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Analyzer configuration (JSON, missing fields use defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Furniture catalog (JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Override the minimum room area in square pixels
        #[arg(long)]
        min_room_area: Option<f64>,
        /// Order rooms by descending area
        #[arg(long)]
        sort_by_area: bool,
        #[arg(long)]
        pretty: bool,
    },
    /// Print furniture recommendations for a room type and area
    Recommend {
        #[arg(long)]
        room_type: String,
        /// Room area in square pixels
        #[arg(long)]
        area: u64,
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Print the built-in furniture catalog
    Catalog,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Analyze {
            image,
            output,
            config,
            catalog,
            min_room_area,
            sort_by_area,
            pretty,
        } => {
            let mut config = match config {
                Some(path) => AnalyzerConfig::from_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => AnalyzerConfig::from_env(),
            };
            if let Some(area) = min_room_area {
                config.min_room_area = area;
            }
            config.validate().context("invalid analyzer configuration")?;

            let analyzer = FloorPlanAnalyzer::with_catalog(config, load_catalog(catalog.as_deref())?);
            let mut result = analyzer
                .analyze_path(&image, output.as_deref())
                .with_context(|| format!("analyzing {}", image.display()))?;
            if sort_by_area {
                result = result.sorted_by_area();
            }
            print_json(&result, pretty)
        }
        Command::Recommend {
            room_type,
            area,
            catalog,
        } => {
            let analyzer = FloorPlanAnalyzer::with_catalog(
                AnalyzerConfig::from_env(),
                load_catalog(catalog.as_deref())?,
            );
            print_json(&analyzer.recommend(&room_type, area), true)
        }
        Command::Catalog => print_json(&FurnitureCatalog::default(), true),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<FurnitureCatalog> {
    match path {
        Some(path) => FurnitureCatalog::from_file(path)
            .with_context(|| format!("loading catalog {}", path.display())),
        None => Ok(FurnitureCatalog::default()),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
