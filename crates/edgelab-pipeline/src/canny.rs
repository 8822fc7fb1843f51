//! Canny edge detector with a configurable gradient aperture.
//!
//! Four stages over a grayscale input:
//!
//! 1. Gaussian pre-filter (skipped when sigma is non-positive).
//! 2. Sobel gradients at the requested aperture size, rescaled to the
//!    3x3 baseline so the thresholds mean the same thing at every
//!    aperture.
//! 3. Non-maximum suppression: the gradient angle is quantized into
//!    four sectors and only local maxima along the gradient survive.
//! 4. Hysteresis linking: pixels at or above the high threshold seed a
//!    breadth-first walk with an explicit worklist; 8-connected
//!    neighbors at or above the low threshold are promoted until the
//!    worklist drains. Neighbor coordinates are bounds-checked so the
//!    walk can reach the image border without wrapping.
//!
//! Output is a binary edge map: 255 for edge pixels, 0 elsewhere.

use image::{GrayImage, Luma};
use imageproc::definitions::Image;

use crate::blur::gaussian_blur;
use crate::kernels::{Kernel, gradient_scale};
use crate::params::KernelSize;

/// Minimum effective threshold.
///
/// A threshold of zero would promote every pixel reachable from a
/// strong edge, producing a degenerate all-edge map; zero is treated
/// as this value instead.
pub const MIN_THRESHOLD: f32 = 1.0;

const EDGE: Luma<u8> = Luma([255]);

/// Detect edges using the Canny algorithm.
///
/// Inverted thresholds (`low_threshold > high_threshold`) are swapped,
/// and an aperture of 1 is promoted to 3, so any combination of typed
/// parameters produces a well-defined result. Images too small to hold
/// a 3x3 neighborhood yield an all-zero map.
#[must_use = "returns the binary edge map"]
pub fn canny(
    image: &GrayImage,
    low_threshold: u8,
    high_threshold: u8,
    aperture_size: KernelSize,
    blur_sigma: f32,
) -> GrayImage {
    let (width, height) = image.dimensions();
    if width < 3 || height < 3 {
        return GrayImage::new(width, height);
    }

    let (low, high) = if low_threshold <= high_threshold {
        (low_threshold, high_threshold)
    } else {
        (high_threshold, low_threshold)
    };

    let blurred = gaussian_blur(image, blur_sigma);

    let aperture = aperture_size.clamp_aperture();
    let scale = gradient_scale(aperture);
    let gx = Kernel::sobel_x(aperture).convolve(&blurred);
    let gy = Kernel::sobel_y(aperture).convolve(&blurred);

    let magnitude = Image::from_fn(width, height, |x, y| {
        let h = gx.get_pixel(x, y).0[0] * scale;
        let v = gy.get_pixel(x, y).0[0] * scale;
        Luma([h.hypot(v)])
    });

    let thinned = non_maximum_suppression(&magnitude, &gx, &gy);
    hysteresis(
        &thinned,
        f32::from(low).max(MIN_THRESHOLD),
        f32::from(high).max(MIN_THRESHOLD),
    )
}

/// Suppress pixels that are not local maxima along the gradient
/// direction.
///
/// The gradient angle is folded into [0°, 180°) and quantized into four
/// sectors; a pixel survives only if its magnitude is at least that of
/// both neighbors across its sector.
fn non_maximum_suppression(
    magnitude: &Image<Luma<f32>>,
    gx: &Image<Luma<f32>>,
    gy: &Image<Luma<f32>>,
) -> Image<Luma<f32>> {
    let (width, height) = magnitude.dimensions();
    let mut out = Image::from_pixel(width, height, Luma([0.0f32]));
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut angle = gy.get_pixel(x, y).0[0]
                .atan2(gx.get_pixel(x, y).0[0])
                .to_degrees();
            if angle < 0.0 {
                angle += 180.0;
            }

            // The two neighbors across the quantized gradient sector.
            let ((ax, ay), (bx, by)) = if (22.5..67.5).contains(&angle) {
                ((x + 1, y + 1), (x - 1, y - 1))
            } else if (67.5..112.5).contains(&angle) {
                ((x, y - 1), (x, y + 1))
            } else if (112.5..157.5).contains(&angle) {
                ((x - 1, y + 1), (x + 1, y - 1))
            } else {
                ((x - 1, y), (x + 1, y))
            };

            let pixel = *magnitude.get_pixel(x, y);
            if pixel.0[0] >= magnitude.get_pixel(ax, ay).0[0]
                && pixel.0[0] >= magnitude.get_pixel(bx, by).0[0]
            {
                out.put_pixel(x, y, pixel);
            }
        }
    }
    out
}

/// Double-threshold edge linking over the thinned magnitude image.
///
/// Non-recursive breadth-first walk: strong pixels (>= `high`) seed the
/// worklist; weak pixels (>= `low`) are promoted when 8-connected to an
/// already-promoted pixel. Wrapping subtraction plus an explicit bounds
/// check lets the walk visit border pixels safely.
fn hysteresis(input: &Image<Luma<f32>>, low: f32, high: f32) -> GrayImage {
    let (width, height) = input.dimensions();
    let mut out = GrayImage::from_pixel(width, height, Luma([0]));
    let mut worklist = Vec::with_capacity((width * height / 2) as usize);
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if input.get_pixel(x, y).0[0] >= high && out.get_pixel(x, y).0[0] == 0 {
                out.put_pixel(x, y, EDGE);
                worklist.push((x, y));

                while let Some((nx, ny)) = worklist.pop() {
                    let neighbors = [
                        (nx + 1, ny),
                        (nx + 1, ny + 1),
                        (nx, ny + 1),
                        (nx.wrapping_sub(1), ny.wrapping_sub(1)),
                        (nx.wrapping_sub(1), ny),
                        (nx.wrapping_sub(1), ny + 1),
                        (nx, ny.wrapping_sub(1)),
                        (nx + 1, ny.wrapping_sub(1)),
                    ];
                    for &(cx, cy) in &neighbors {
                        if cx >= width || cy >= height {
                            continue;
                        }
                        if input.get_pixel(cx, cy).0[0] >= low && out.get_pixel(cx, cy).0[0] == 0 {
                            out.put_pixel(cx, cy, EDGE);
                            worklist.push((cx, cy));
                        }
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{DEFAULT_BLUR_SIGMA, DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD};

    const APERTURES: [KernelSize; 3] = [KernelSize::Three, KernelSize::Five, KernelSize::Seven];

    /// 20x20 image with a sharp vertical boundary at x = 10.
    fn sharp_edge_image() -> GrayImage {
        GrayImage::from_fn(20, 20, |x, _y| Luma([if x < 10 { 0 } else { 255 }]))
    }

    /// Deterministic texture with gradients of many magnitudes.
    fn textured_image() -> GrayImage {
        GrayImage::from_fn(24, 24, |x, y| {
            Luma([u8::try_from((x * 13 + y * 7) % 256).unwrap_or(0)])
        })
    }

    fn edge_count(map: &GrayImage) -> u32 {
        map.pixels().map(|p| u32::from(p.0[0] > 0)).sum()
    }

    fn default_canny(image: &GrayImage, low: u8, high: u8) -> GrayImage {
        canny(image, low, high, KernelSize::Three, DEFAULT_BLUR_SIGMA)
    }

    #[test]
    fn output_dimensions_match_input() {
        let img = GrayImage::new(17, 31);
        let edges = default_canny(&img, 50, 150);
        assert_eq!(edges.dimensions(), (17, 31));
    }

    #[test]
    fn uniform_image_produces_no_edges() {
        let img = GrayImage::from_pixel(20, 20, Luma([128]));
        let edges = default_canny(&img, 50, 150);
        assert_eq!(edge_count(&edges), 0, "expected no edges in uniform image");
    }

    #[test]
    fn sharp_edge_detected_at_every_aperture() {
        let img = sharp_edge_image();
        for aperture in APERTURES {
            let edges = canny(&img, 50, 150, aperture, DEFAULT_BLUR_SIGMA);
            assert!(
                edge_count(&edges) > 0,
                "expected edges at the boundary for {aperture:?}",
            );
        }
    }

    #[test]
    fn output_is_binary() {
        let edges = default_canny(&textured_image(), 30, 90);
        for pixel in edges.pixels() {
            assert!(
                pixel.0[0] == 0 || pixel.0[0] == 255,
                "edge map must be binary, got {}",
                pixel.0[0],
            );
        }
    }

    #[test]
    fn raising_high_threshold_never_adds_edges() {
        let img = textured_image();
        let low = 40;
        let looser = edge_count(&default_canny(&img, low, 60));
        let tighter = edge_count(&default_canny(&img, low, 120));
        assert!(
            tighter <= looser,
            "raising the high threshold added edges: {looser} -> {tighter}",
        );
    }

    #[test]
    fn inverted_thresholds_are_swapped() {
        let img = sharp_edge_image();
        let swapped = default_canny(&img, 200, 50);
        let ordered = default_canny(&img, 50, 200);
        assert_eq!(swapped, ordered);
    }

    #[test]
    fn zero_sigma_skips_the_blur_and_still_detects() {
        let img = sharp_edge_image();
        let edges = canny(&img, 50, 150, KernelSize::Three, 0.0);
        assert!(edge_count(&edges) > 0, "expected edges without pre-filter");
    }

    #[test]
    fn one_pixel_image_yields_all_zero() {
        let img = GrayImage::from_pixel(1, 1, Luma([255]));
        let edges = default_canny(&img, 50, 150);
        assert_eq!(edges.dimensions(), (1, 1));
        assert_eq!(edges.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn two_pixel_image_yields_all_zero() {
        let img = GrayImage::from_fn(2, 2, |x, _| Luma([if x == 0 { 0 } else { 255 }]));
        let edges = default_canny(&img, 1, 2);
        assert_eq!(edge_count(&edges), 0);
    }

    /// A strong edge one pixel from the border must not break the
    /// hysteresis walk when it expands into border pixels.
    #[test]
    fn border_edge_does_not_panic() {
        let mut img = GrayImage::from_pixel(10, 10, Luma([0]));
        for y in 0..10 {
            img.put_pixel(1, y, Luma([255]));
        }
        let _edges = default_canny(&img, 1, 2);
    }

    #[test]
    fn weak_edges_survive_only_when_linked() {
        // The low threshold alone must not produce edges: a map run
        // with (low, low) acts as the superset, and (low, high) stays
        // within it while high-only seeds stay within both.
        let img = textured_image();
        let low_only = edge_count(&default_canny(&img, 30, 30));
        let linked = edge_count(&default_canny(
            &img,
            30,
            DEFAULT_HIGH_THRESHOLD,
        ));
        assert!(linked <= low_only);
    }

    #[test]
    fn defaults_are_usable() {
        let edges = default_canny(
            &sharp_edge_image(),
            DEFAULT_LOW_THRESHOLD,
            DEFAULT_HIGH_THRESHOLD,
        );
        assert!(edge_count(&edges) > 0);
    }
}
