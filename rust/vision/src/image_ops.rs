// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Image processing operations for sketch cleanup

use crate::PreprocessConfig;
use image::{GrayImage, Luma};

/// Apply Gaussian blur for noise reduction
pub fn gaussian_blur(image: &GrayImage, sigma: f32) -> GrayImage {
    imageproc::filter::gaussian_blur_f32(image, sigma)
}

/// Inverse binary threshold: pencil strokes (dark pixels) become white
/// foreground, paper becomes black.
pub fn threshold_inverted(image: &GrayImage, threshold_value: u8) -> GrayImage {
    let mut result = GrayImage::new(image.width(), image.height());

    for (x, y, pixel) in image.enumerate_pixels() {
        let value = if pixel.0[0] <= threshold_value { 255 } else { 0 };
        result.put_pixel(x, y, Luma([value]));
    }

    result
}

/// Morphological dilation - expands white regions
pub fn dilate(image: &GrayImage, radius: u8) -> GrayImage {
    imageproc::morphology::dilate(image, imageproc::distance_transform::Norm::L1, radius)
}

/// Morphological erosion - shrinks white regions
pub fn erode(image: &GrayImage, radius: u8) -> GrayImage {
    imageproc::morphology::erode(image, imageproc::distance_transform::Norm::L1, radius)
}

/// Morphological closing (dilate then erode) - fills small gaps in strokes
pub fn morphological_close(image: &GrayImage, radius: u8) -> GrayImage {
    let dilated = dilate(image, radius);
    erode(&dilated, radius)
}

/// Apply Canny edge detection
pub fn canny_edges(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    imageproc::edges::canny(image, low_threshold, high_threshold)
}

/// Full sketch cleanup: blur, inverse threshold, two closing passes, Canny.
///
/// Returns the edge map the line detector consumes.
pub fn preprocess_sketch(grayscale: &GrayImage, config: &PreprocessConfig) -> GrayImage {
    let sigma = config.blur_kernel as f32 / 3.0;
    let blurred = gaussian_blur(grayscale, sigma);

    let binary = threshold_inverted(&blurred, config.threshold);

    // Two passes close the pen-stroke gaps a single pass leaves behind.
    let closed = morphological_close(&binary, 1);
    let cleaned = morphological_close(&closed, 1);

    canny_edges(&cleaned, config.canny_low, config.canny_high)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_inverted() {
        let mut img = GrayImage::new(10, 10);
        for x in 0..10 {
            for y in 0..10 {
                let value = if x < 5 { 40 } else { 220 };
                img.put_pixel(x, y, Luma([value]));
            }
        }

        let result = threshold_inverted(&img, 100);

        // Dark ink becomes white foreground, bright paper becomes black.
        assert_eq!(result.get_pixel(0, 0).0[0], 255);
        assert_eq!(result.get_pixel(9, 0).0[0], 0);
    }

    #[test]
    fn test_close_fills_single_pixel_gap() {
        let mut img = GrayImage::new(20, 5);
        for x in 0..20 {
            img.put_pixel(x, 2, Luma([255]));
        }
        img.put_pixel(10, 2, Luma([0]));

        let closed = morphological_close(&img, 1);

        assert_eq!(closed.get_pixel(10, 2).0[0], 255);
    }

    #[test]
    fn test_preprocess_produces_edges_around_a_stroke() {
        let mut img = GrayImage::new(100, 100);
        for pixel in img.pixels_mut() {
            *pixel = Luma([255]);
        }
        // A dark horizontal stroke
        for x in 10..90 {
            for y in 48..53 {
                img.put_pixel(x, y, Luma([20]));
            }
        }

        let config = PreprocessConfig::default();
        let edges = preprocess_sketch(&img, &config);

        let edge_pixels = edges.pixels().filter(|p| p.0[0] > 128).count();
        assert!(edge_pixels > 0, "stroke should produce edge pixels");
    }
}
