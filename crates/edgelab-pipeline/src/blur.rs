//! Gaussian blur, the Canny pre-filter.
//!
//! Wraps [`imageproc::filter::gaussian_blur_f32`]. Smoothing before the
//! gradient stage suppresses high-frequency noise that would otherwise
//! survive hysteresis as speckle edges.

use image::GrayImage;

/// Apply Gaussian blur to a grayscale image.
///
/// Higher `sigma` means more smoothing. Non-positive sigma returns the
/// image unchanged (the underlying `imageproc` function panics on
/// `sigma <= 0.0`), which is how the "no pre-filter" setting is
/// expressed.
#[must_use = "returns the blurred image"]
pub fn gaussian_blur(image: &GrayImage, sigma: f32) -> GrayImage {
    if sigma <= 0.0 {
        return image.clone();
    }

    imageproc::filter::gaussian_blur_f32(image, sigma)
}
