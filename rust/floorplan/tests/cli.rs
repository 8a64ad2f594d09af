// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;

fn floorplan() -> Command {
    Command::cargo_bin("floorplan").unwrap()
}

#[test]
fn test_catalog_command() {
    floorplan()
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("king_bed"))
        .stdout(predicate::str::contains("general_storage"));
}

#[test]
fn test_recommend_small_bedroom() {
    let output = floorplan()
        .args(["recommend", "--room-type", "bedroom", "--area", "10000"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let recs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items: Vec<&str> = recs
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["item"].as_str().unwrap())
        .collect();
    assert_eq!(items, ["bed", "wardrobe"]);
}

#[test]
fn test_analyze_writes_json_and_visualization() {
    let dir = tempfile::tempdir().unwrap();
    let plan = dir.path().join("plan.png");
    let annotated = dir.path().join("annotated.png");

    let mut img = RgbImage::from_pixel(300, 240, Rgb([255, 255, 255]));
    for y in 30..210 {
        for x in 30..270 {
            let on_x = (30..35).contains(&x) || (265..270).contains(&x);
            let on_y = (30..35).contains(&y) || (205..210).contains(&y);
            if on_x || on_y {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
    }
    img.save(&plan).unwrap();

    let output = floorplan()
        .arg("analyze")
        .arg(&plan)
        .arg("--output")
        .arg(&annotated)
        .arg("--sort-by-area")
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        result["total_rooms"].as_u64().unwrap() as usize,
        result["rooms"].as_array().unwrap().len()
    );
    assert!(annotated.exists());
}

#[test]
fn test_analyze_missing_file_fails() {
    floorplan()
        .args(["analyze", "/nonexistent/plan.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_analyze_rejects_nan_min_room_area() {
    let dir = tempfile::tempdir().unwrap();
    let plan = dir.path().join("plan.png");
    RgbImage::from_pixel(40, 40, Rgb([255, 255, 255]))
        .save(&plan)
        .unwrap();

    floorplan()
        .arg("analyze")
        .arg(&plan)
        .arg("--min-room-area=NaN")
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_room_area"));
}
