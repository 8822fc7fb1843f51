//! Sobel gradient operator.
//!
//! First-derivative edge detection: the horizontal component |Gx|, the
//! vertical component |Gy|, or the combined magnitude sqrt(Gx² + Gy²),
//! each rescaled to the 3x3 baseline and clamped to [0,255].

use image::{GrayImage, Luma};

use crate::kernels::{Kernel, gradient_scale, to_intensity};
use crate::params::{GradientDirection, KernelSize};

/// Compute the Sobel gradient of a grayscale image.
///
/// Output has the same dimensions as the input; the border ring (one
/// kernel radius wide) is zero. An image smaller than the kernel yields
/// an all-zero result.
#[must_use = "returns the gradient image"]
pub fn sobel(image: &GrayImage, kernel_size: KernelSize, direction: GradientDirection) -> GrayImage {
    let (width, height) = image.dimensions();
    let scale = gradient_scale(kernel_size);

    match direction {
        GradientDirection::X => {
            let gx = Kernel::sobel_x(kernel_size).convolve(image);
            GrayImage::from_fn(width, height, |x, y| {
                Luma([to_intensity(gx.get_pixel(x, y).0[0] * scale)])
            })
        }
        GradientDirection::Y => {
            let gy = Kernel::sobel_y(kernel_size).convolve(image);
            GrayImage::from_fn(width, height, |x, y| {
                Luma([to_intensity(gy.get_pixel(x, y).0[0] * scale)])
            })
        }
        GradientDirection::Both => {
            let gx = Kernel::sobel_x(kernel_size).convolve(image);
            let gy = Kernel::sobel_y(kernel_size).convolve(image);
            GrayImage::from_fn(width, height, |x, y| {
                let h = gx.get_pixel(x, y).0[0] * scale;
                let v = gy.get_pixel(x, y).0[0] * scale;
                Luma([to_intensity(h.hypot(v))])
            })
        }
    }
}
