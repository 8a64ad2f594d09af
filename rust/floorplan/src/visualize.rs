// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Annotated rendering of an analysis

use crate::error::{FloorPlanError, Result};
use crate::types::{Opening, Openings, Room};
use ab_glyph::FontRef;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut};
use std::path::Path;
use tracing::{info, instrument, warn};

/// DejaVu Sans Mono, see `assets/DejaVu-LICENSE`
static LABEL_FONT: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

const ROOM_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const CENTROID_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const DOOR_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const WINDOW_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const LABEL_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

const CENTROID_RADIUS: i32 = 5;
const LABEL_SCALE: f32 = 14.0;
/// Label origin relative to the centroid
const LABEL_OFFSET: (i32, i32) = (CENTROID_RADIUS + 3, -7);
const OPENING_HALF_WIDTH: i32 = 1;

/// Draw rooms, centroid labels, doors and windows onto a copy of `image`.
///
/// Each room is outlined and labelled `"<type> (<id>)"` next to a dot at
/// its centroid.
pub fn render_analysis(image: &RgbImage, rooms: &[Room], openings: &Openings) -> RgbImage {
    let mut canvas = image.clone();
    let font = match FontRef::try_from_slice(LABEL_FONT) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!(error = %e, "Label font unusable, drawing rooms without labels");
            None
        }
    };

    for room in rooms {
        let points = &room.contour;
        for i in 0..points.len() {
            let p1 = points[i];
            let p2 = points[(i + 1) % points.len()];
            draw_line_segment_mut(
                &mut canvas,
                (p1.x as f32, p1.y as f32),
                (p2.x as f32, p2.y as f32),
                ROOM_COLOR,
            );
        }

        draw_filled_circle_mut(
            &mut canvas,
            (room.centroid.x, room.centroid.y),
            CENTROID_RADIUS,
            CENTROID_COLOR,
        );

        if let Some(font) = &font {
            draw_text_mut(
                &mut canvas,
                LABEL_COLOR,
                room.centroid.x + LABEL_OFFSET.0,
                room.centroid.y + LABEL_OFFSET.1,
                LABEL_SCALE,
                font,
                &room_label(room),
            );
        }
    }

    for door in &openings.doors {
        draw_thick_segment(&mut canvas, door, DOOR_COLOR);
    }
    for window in &openings.windows {
        draw_thick_segment(&mut canvas, window, WINDOW_COLOR);
    }

    canvas
}

fn room_label(room: &Room) -> String {
    format!("{} ({})", room.room_type, room.id)
}

fn draw_thick_segment(canvas: &mut RgbImage, opening: &Opening, color: Rgb<u8>) {
    for dy in -OPENING_HALF_WIDTH..=OPENING_HALF_WIDTH {
        for dx in -OPENING_HALF_WIDTH..=OPENING_HALF_WIDTH {
            draw_line_segment_mut(
                canvas,
                ((opening.x1 + dx) as f32, (opening.y1 + dy) as f32),
                ((opening.x2 + dx) as f32, (opening.y2 + dy) as f32),
                color,
            );
        }
    }
}

/// Render and write the annotated image; the format follows the extension
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write_visualization(
    image: &RgbImage,
    rooms: &[Room],
    openings: &Openings,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let annotated = render_analysis(image, rooms, openings);
    annotated
        .save(path)
        .map_err(|e| FloorPlanError::Visualization(format!("{}: {e}", path.display())))?;
    info!("Visualization saved");
    Ok(())
}
