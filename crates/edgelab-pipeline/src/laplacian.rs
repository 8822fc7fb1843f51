//! Laplacian operator.
//!
//! Second-derivative edge detection. The raw response is signed (zero
//! crossings mark edges); for display it is mapped through absolute
//! value, rescaled to the 4-neighbor baseline, and clamped to [0,255].

use image::{GrayImage, Luma};

use crate::kernels::{Kernel, laplacian_scale, to_intensity};
use crate::params::KernelSize;

/// Compute the Laplacian response of a grayscale image.
///
/// Output has the same dimensions as the input; the border ring (one
/// kernel radius wide) is zero. An image smaller than the kernel yields
/// an all-zero result.
#[must_use = "returns the Laplacian response image"]
pub fn laplacian(image: &GrayImage, kernel_size: KernelSize) -> GrayImage {
    let (width, height) = image.dimensions();
    let scale = laplacian_scale(kernel_size);
    let response = Kernel::laplacian(kernel_size).convolve(image);
    GrayImage::from_fn(width, height, |x, y| {
        Luma([to_intensity(response.get_pixel(x, y).0[0] * scale)])
    })
}
