// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Image loading and binarization for floor plan analysis

use crate::config::PreprocessConfig;
use crate::error::{FloorPlanError, Result};
use image::{GrayImage, ImageReader, Luma, RgbImage};
use imageproc::distance_transform::Norm;
use std::path::Path;
use tracing::{debug, instrument};

/// Load a floor plan from disk as an RGB raster
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_image(path: impl AsRef<Path>) -> Result<RgbImage> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FloorPlanError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let image = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| {
            FloorPlanError::InvalidImage(format!("could not load image {}: {e}", path.display()))
        })?
        .to_rgb8();

    ensure_non_empty(&image)?;
    debug!(width = image.width(), height = image.height(), "Loaded floor plan");
    Ok(image)
}

/// Decode an in-memory JPEG/PNG/BMP/TIFF buffer as an RGB raster
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage> {
    if bytes.is_empty() {
        return Err(FloorPlanError::InvalidImage(
            "could not decode image from bytes: buffer is empty".into(),
        ));
    }

    let image = image::load_from_memory(bytes)
        .map_err(|e| FloorPlanError::InvalidImage(format!("could not decode image from bytes: {e}")))?
        .to_rgb8();

    ensure_non_empty(&image)?;
    Ok(image)
}

fn ensure_non_empty(image: &RgbImage) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(FloorPlanError::InvalidImage(format!(
            "image has no pixels ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(())
}

/// Convert an RGB raster to grayscale (ITU-R BT.601 luminance)
pub fn rgb_to_grayscale(rgb: &RgbImage) -> GrayImage {
    let mut gray = GrayImage::new(rgb.width(), rgb.height());

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let r = pixel.0[0] as f32;
        let g = pixel.0[1] as f32;
        let b = pixel.0[2] as f32;
        let luma = (0.299 * r + 0.587 * g + 0.114 * b).round().min(255.0) as u8;
        gray.put_pixel(x, y, Luma([luma]));
    }

    gray
}

/// Gaussian sigma equivalent to a square kernel of the given size
pub fn kernel_sigma(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Apply Gaussian blur for noise reduction
pub fn gaussian_blur(image: &GrayImage, sigma: f32) -> GrayImage {
    imageproc::filter::gaussian_blur_f32(image, sigma)
}

/// Adaptive thresholding against a Gaussian-weighted local mean, inverted.
///
/// A pixel becomes foreground (255) unless it is brighter than its local
/// mean minus `c`, so dark strokes on a light background end up white.
pub fn adaptive_gaussian_threshold(image: &GrayImage, block_size: u32, c: f32) -> GrayImage {
    let local_mean = gaussian_blur(image, kernel_sigma(block_size));
    let mut result = GrayImage::new(image.width(), image.height());

    for ((src, mean), dst) in image
        .pixels()
        .zip(local_mean.pixels())
        .zip(result.pixels_mut())
    {
        let threshold = mean.0[0] as f32 - c;
        dst.0[0] = if src.0[0] as f32 > threshold { 0 } else { 255 };
    }

    result
}

/// Apply Canny edge detection
pub fn canny_edges(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    imageproc::edges::canny(image, low_threshold, high_threshold)
}

/// Morphological closing with a square element of the given radius
pub fn morphological_close(image: &GrayImage, radius: u8) -> GrayImage {
    imageproc::morphology::close(image, Norm::LInf, radius)
}

/// Invert a binary image
pub fn invert(image: &GrayImage) -> GrayImage {
    let mut result = image.clone();
    for pixel in result.pixels_mut() {
        pixel.0[0] = 255 - pixel.0[0];
    }
    result
}

/// Turn a color floor plan into a binary wall mask (255 = wall)
pub fn preprocess(image: &RgbImage, config: &PreprocessConfig) -> GrayImage {
    let gray = rgb_to_grayscale(image);
    let blurred = gaussian_blur(&gray, kernel_sigma(config.blur_kernel_size));
    let mask = adaptive_gaussian_threshold(
        &blurred,
        config.threshold_block_size,
        config.threshold_c,
    );
    debug!("Floor plan preprocessing completed");
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn white_with_black_bar() -> RgbImage {
        let mut img = RgbImage::from_pixel(60, 60, Rgb([255, 255, 255]));
        for x in 10..50 {
            for y in 28..32 {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
        img
    }

    #[test]
    fn test_rgb_to_grayscale() {
        let mut rgb = RgbImage::new(3, 1);
        rgb.put_pixel(0, 0, Rgb([255, 255, 255]));
        rgb.put_pixel(1, 0, Rgb([0, 0, 0]));
        rgb.put_pixel(2, 0, Rgb([255, 0, 0]));

        let gray = rgb_to_grayscale(&rgb);

        assert_eq!(gray.get_pixel(0, 0).0[0], 255);
        assert_eq!(gray.get_pixel(1, 0).0[0], 0);
        assert_eq!(gray.get_pixel(2, 0).0[0], 76);
    }

    #[test]
    fn test_kernel_sigma() {
        assert!((kernel_sigma(5) - 1.1).abs() < 1e-6);
        assert!((kernel_sigma(11) - 2.0).abs() < 1e-6);
        assert!(kernel_sigma(1) > 0.0);
    }

    #[test]
    fn test_invert() {
        let mut img = GrayImage::new(2, 2);
        img.put_pixel(0, 0, Luma([0]));
        img.put_pixel(1, 1, Luma([255]));

        let inverted = invert(&img);

        assert_eq!(inverted.get_pixel(0, 0).0[0], 255);
        assert_eq!(inverted.get_pixel(1, 1).0[0], 0);
    }

    #[test]
    fn test_blank_image_has_no_foreground() {
        let blank = RgbImage::from_pixel(40, 40, Rgb([255, 255, 255]));
        let mask = preprocess(&blank, &PreprocessConfig::default());
        assert!(mask.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_dark_strokes_become_foreground() {
        let mask = preprocess(&white_with_black_bar(), &PreprocessConfig::default());

        assert!(mask.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        assert_eq!(mask.get_pixel(30, 29).0[0], 255);
        assert_eq!(mask.get_pixel(30, 5).0[0], 0);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, FloorPlanError::InvalidImage(_)));
        assert!(err.is_invalid_input());

        let err = decode_image(&[]).unwrap_err();
        assert!(matches!(err, FloorPlanError::InvalidImage(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_image("/no/such/floor_plan.png").unwrap_err();
        assert!(matches!(err, FloorPlanError::NotFound { .. }));
    }

    #[test]
    fn test_decode_png_round_trip_dimensions() {
        let img = white_with_black_bar();
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (60, 60));
    }
}
