//! edgelab-pipeline: Pure edge-detection core (sans-IO).
//!
//! Maps a chosen algorithm and its validated parameters to a
//! deterministic transformation of an input raster image:
//! grayscale -> (Sobel | Laplacian | Canny) -> single-channel edge map.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! images and returns structured data. Upload handling, widget
//! rendering, and display belong to the surrounding shell.

pub mod blur;
pub mod canny;
pub mod grayscale;
pub mod kernels;
pub mod laplacian;
pub mod params;
pub mod session;
pub mod sobel;
pub mod types;

pub use params::{
    Algorithm, CannyParams, FilterParams, GradientDirection, KernelSize, LaplacianParams,
    SobelParams,
};
pub use session::SessionParams;
pub use types::{DynamicImage, FilterError, GrayImage};

/// Run one edge-detection filter over a decoded image.
///
/// This is the sole boundary the shell calls per interaction:
///
/// 1. Reject zero-sized images.
/// 2. Convert to grayscale (a no-op for already-gray input).
/// 3. Correct the parameter set into its legal domain
///    ([`FilterParams::normalized`]).
/// 4. Dispatch to the operator selected by the parameter variant.
///
/// The result is a new single-channel 8-bit image of the same
/// dimensions; the input is never mutated. The function is pure:
/// identical arguments produce byte-identical output, with no state
/// held between calls.
///
/// # Errors
///
/// Returns [`FilterError::UnsupportedShape`] if the image has zero
/// width or height.
pub fn detect(image: &DynamicImage, params: &FilterParams) -> Result<GrayImage, FilterError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(FilterError::UnsupportedShape { width, height });
    }

    let gray = grayscale::to_grayscale(image);
    Ok(match params.normalized() {
        FilterParams::Sobel(p) => sobel::sobel(&gray, p.kernel_size, p.direction),
        FilterParams::Laplacian(p) => laplacian::laplacian(&gray, p.kernel_size),
        FilterParams::Canny(p) => canny::canny(
            &gray,
            p.low_threshold,
            p.high_threshold,
            p.aperture_size,
            p.blur_sigma,
        ),
    })
}

/// Decode raw image bytes and run one filter.
///
/// Convenience for shells that hold encoded uploads rather than decoded
/// images.
///
/// # Errors
///
/// Returns [`FilterError::EmptyInput`] if `bytes` is empty,
/// [`FilterError::ImageDecode`] if the format is unrecognized, and
/// everything [`detect`] can return.
pub fn detect_bytes(bytes: &[u8], params: &FilterParams) -> Result<GrayImage, FilterError> {
    let image = grayscale::decode(bytes)?;
    detect(&image, params)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::Luma;

    /// 4x4 checkerboard of 2x2 cells as a grayscale dynamic image.
    fn checkerboard() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_fn(4, 4, |x, y| {
            Luma([if (x / 2 + y / 2) % 2 == 0 { 0 } else { 255 }])
        }))
    }

    fn sharp_edge() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_fn(20, 20, |x, _| {
            Luma([if x < 10 { 0 } else { 255 }])
        }))
    }

    fn all_params() -> [FilterParams; 3] {
        [
            FilterParams::Sobel(SobelParams::default()),
            FilterParams::Laplacian(LaplacianParams::default()),
            FilterParams::Canny(CannyParams::default()),
        ]
    }

    #[test]
    fn detect_is_idempotent_for_every_algorithm() {
        let img = sharp_edge();
        for params in all_params() {
            let first = detect(&img, &params).unwrap();
            let second = detect(&img, &params).unwrap();
            assert_eq!(first, second, "non-deterministic output for {params:?}");
        }
    }

    #[test]
    fn detect_rejects_zero_sized_image() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(0, 10));
        let result = detect(&img, &FilterParams::default());
        assert!(matches!(
            result,
            Err(FilterError::UnsupportedShape {
                width: 0,
                height: 10,
            })
        ));
    }

    #[test]
    fn detect_accepts_one_pixel_image() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(1, 1, Luma([200])));
        for params in all_params() {
            let out = detect(&img, &params).unwrap();
            assert_eq!(out.dimensions(), (1, 1));
            assert_eq!(out.get_pixel(0, 0).0[0], 0, "degenerate result for {params:?}");
        }
    }

    #[test]
    fn detect_converts_color_input() {
        let rgb = image::RgbImage::from_fn(12, 12, |x, _| {
            if x < 6 {
                image::Rgb([10, 10, 10])
            } else {
                image::Rgb([240, 240, 240])
            }
        });
        let img = DynamicImage::ImageRgb8(rgb);
        let out = detect(&img, &FilterParams::Sobel(SobelParams::default())).unwrap();
        let total: u32 = out.pixels().map(|p| u32::from(p.0[0])).sum();
        assert!(total > 0, "expected gradients after luma conversion");
    }

    #[test]
    fn sobel_checkerboard_scenario() {
        // Sobel kernel 3, direction Both, on a 4x4 checkerboard:
        // gradient exactly at the 4 interior pixels.
        let out = detect(
            &checkerboard(),
            &FilterParams::Sobel(SobelParams {
                kernel_size: KernelSize::Three,
                direction: GradientDirection::Both,
            }),
        )
        .unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let interior = (1..=2).contains(&x) && (1..=2).contains(&y);
                assert_eq!(
                    out.get_pixel(x, y).0[0] > 0,
                    interior,
                    "unexpected value at ({x},{y})",
                );
            }
        }
    }

    #[test]
    fn laplacian_flat_scenario() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, Luma([128])));
        for kernel_size in [
            KernelSize::One,
            KernelSize::Three,
            KernelSize::Five,
            KernelSize::Seven,
        ] {
            let out = detect(
                &img,
                &FilterParams::Laplacian(LaplacianParams { kernel_size }),
            )
            .unwrap();
            assert!(
                out.pixels().all(|p| p.0[0] == 0),
                "expected all-zero output for {kernel_size:?}",
            );
        }
    }

    #[test]
    fn canny_threshold_swap_scenario() {
        let img = sharp_edge();
        let inverted = detect(
            &img,
            &FilterParams::Canny(CannyParams {
                low_threshold: 200,
                high_threshold: 50,
                ..CannyParams::default()
            }),
        )
        .unwrap();
        let ordered = detect(
            &img,
            &FilterParams::Canny(CannyParams {
                low_threshold: 50,
                high_threshold: 200,
                ..CannyParams::default()
            }),
        )
        .unwrap();
        assert_eq!(inverted, ordered);
    }

    #[test]
    fn detect_bytes_empty_input() {
        let result = detect_bytes(&[], &FilterParams::default());
        assert!(matches!(result, Err(FilterError::EmptyInput)));
    }

    #[test]
    fn detect_bytes_corrupt_input() {
        let result = detect_bytes(&[0xFF, 0x00], &FilterParams::default());
        assert!(matches!(result, Err(FilterError::ImageDecode(_))));
    }

    #[test]
    fn detect_bytes_valid_png() {
        let img = image::RgbImage::from_fn(16, 16, |x, _| {
            if x < 8 {
                image::Rgb([0, 0, 0])
            } else {
                image::Rgb([255, 255, 255])
            }
        });
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();

        let out = detect_bytes(&buf, &FilterParams::Canny(CannyParams::default())).unwrap();
        assert_eq!(out.dimensions(), (16, 16));
        let edge_count: u32 = out.pixels().map(|p| u32::from(p.0[0] > 0)).sum();
        assert!(edge_count > 0, "expected edges at the step");
    }

    #[test]
    fn session_active_params_drive_detect() {
        let mut session = SessionParams::default();
        session.apply(FilterParams::Sobel(SobelParams::default()));
        let out = detect(&sharp_edge(), &session.active()).unwrap();
        assert_eq!(out.dimensions(), (20, 20));
    }
}
