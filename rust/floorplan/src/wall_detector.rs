// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall structure counting

use crate::image_ops::morphological_close;
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use tracing::debug;

/// Count connected wall structures in a binary wall mask.
///
/// Small gaps are closed first so a wall broken by scan noise counts once.
/// Only outermost borders are counted: anything drawn inside a room that is
/// itself enclosed by walls belongs to the enclosing structure.
pub fn count_walls(mask: &GrayImage, close_radius: u8) -> usize {
    let closed = if close_radius > 0 {
        morphological_close(mask, close_radius)
    } else {
        mask.clone()
    };

    let contours = find_contours::<i32>(&closed);
    let count = contours
        .iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .count();

    debug!(walls = count, "Wall counting completed");
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn fill(mask: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..y1 {
            for x in x0..x1 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }

    #[test]
    fn test_empty_mask_has_no_walls() {
        assert_eq!(count_walls(&GrayImage::new(50, 50), 1), 0);
    }

    #[test]
    fn test_separate_blobs_count_separately() {
        let mut mask = GrayImage::new(100, 100);
        fill(&mut mask, 10, 10, 40, 14);
        fill(&mut mask, 60, 60, 64, 90);
        assert_eq!(count_walls(&mask, 1), 2);
    }

    #[test]
    fn test_closing_bridges_single_pixel_gap() {
        let mut mask = GrayImage::new(100, 40);
        fill(&mut mask, 10, 10, 50, 14);
        fill(&mut mask, 51, 10, 90, 14);

        assert_eq!(count_walls(&mask, 0), 2);
        assert_eq!(count_walls(&mask, 1), 1);
    }

    #[test]
    fn test_island_inside_ring_is_not_external() {
        let mut mask = GrayImage::new(120, 120);
        fill(&mut mask, 10, 10, 110, 13);
        fill(&mut mask, 10, 107, 110, 110);
        fill(&mut mask, 10, 10, 13, 110);
        fill(&mut mask, 107, 10, 110, 110);
        fill(&mut mask, 55, 55, 65, 65);

        assert_eq!(count_walls(&mask, 1), 1);
    }
}
