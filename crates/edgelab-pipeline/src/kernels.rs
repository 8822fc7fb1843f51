//! Derivative kernel tables and 2D convolution.
//!
//! The Sobel family is separable: each 2D kernel is the outer product
//! of a binomial smoothing row and a derivative row. The rows here are
//! the standard ones (smoothing rows are Pascal-triangle binomials;
//! derivative rows are the binomial convolved with `[-1, 0, 1]` or
//! `[1, -2, 1]`), so size 3 reproduces the classic Sobel and 4-neighbor
//! Laplacian apertures.
//!
//! Convolution is interior-only: the output border ring (one kernel
//! radius wide) is left at zero. This keeps every operator total over
//! degenerate inputs — an image smaller than the kernel yields an
//! all-zero result rather than a panic.
//!
//! Responses grow with kernel size (larger binomial weights), so
//! [`gradient_scale`] and [`laplacian_scale`] rescale each size to the
//! baseline aperture. This keeps threshold semantics identical across
//! aperture choices: a 0-to-255 step edge produces the same magnitude
//! whatever the kernel size.

use image::{GrayImage, Luma};
use imageproc::definitions::Image;

use crate::params::KernelSize;

// Size 1 has no smoothing; the identity row is zero-padded so every
// kernel stays square with radius >= 1.
const SMOOTH_1: &[f32] = &[0.0, 1.0, 0.0];
const SMOOTH_3: &[f32] = &[1.0, 2.0, 1.0];
const SMOOTH_5: &[f32] = &[1.0, 4.0, 6.0, 4.0, 1.0];
const SMOOTH_7: &[f32] = &[1.0, 6.0, 15.0, 20.0, 15.0, 6.0, 1.0];

const DERIV_3: &[f32] = &[-1.0, 0.0, 1.0];
const DERIV_5: &[f32] = &[-1.0, -2.0, 0.0, 2.0, 1.0];
const DERIV_7: &[f32] = &[-1.0, -4.0, -5.0, 0.0, 5.0, 4.0, 1.0];

const DERIV2_3: &[f32] = &[1.0, -2.0, 1.0];
const DERIV2_5: &[f32] = &[1.0, 0.0, -2.0, 0.0, 1.0];
const DERIV2_7: &[f32] = &[1.0, 2.0, -1.0, -4.0, -1.0, 2.0, 1.0];

impl KernelSize {
    /// Binomial smoothing row applied perpendicular to the derivative.
    #[must_use]
    pub const fn smoothing(self) -> &'static [f32] {
        match self {
            Self::One => SMOOTH_1,
            Self::Three => SMOOTH_3,
            Self::Five => SMOOTH_5,
            Self::Seven => SMOOTH_7,
        }
    }

    /// First-derivative row.
    #[must_use]
    pub const fn first_derivative(self) -> &'static [f32] {
        match self {
            Self::One | Self::Three => DERIV_3,
            Self::Five => DERIV_5,
            Self::Seven => DERIV_7,
        }
    }

    /// Second-derivative row.
    #[must_use]
    pub const fn second_derivative(self) -> &'static [f32] {
        match self {
            Self::One | Self::Three => DERIV2_3,
            Self::Five => DERIV2_5,
            Self::Seven => DERIV2_7,
        }
    }
}

/// A square 2D convolution kernel with odd side length.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    radius: u32,
    /// Row-major weights, `(2 * radius + 1)²` entries.
    weights: Vec<f32>,
}

impl Kernel {
    /// Outer product of a vertical and a horizontal row.
    ///
    /// Both rows must have the same odd length; callers in this module
    /// only pass rows from the same [`KernelSize`] family, which
    /// guarantees that.
    fn from_separable(vertical: &[f32], horizontal: &[f32]) -> Self {
        let side = vertical.len().max(horizontal.len());
        let mut weights = Vec::with_capacity(side * side);
        for &v in vertical {
            for &h in horizontal {
                weights.push(v * h);
            }
        }
        #[allow(clippy::cast_possible_truncation)]
        let radius = (side / 2) as u32;
        Self { radius, weights }
    }

    /// Horizontal-gradient kernel: smoothing down, derivative across.
    #[must_use]
    pub fn sobel_x(size: KernelSize) -> Self {
        Self::from_separable(size.smoothing(), size.first_derivative())
    }

    /// Vertical-gradient kernel: derivative down, smoothing across.
    #[must_use]
    pub fn sobel_y(size: KernelSize) -> Self {
        Self::from_separable(size.first_derivative(), size.smoothing())
    }

    /// Laplacian kernel: sum of the two second-derivative outer
    /// products (d²/dx² + d²/dy²).
    #[must_use]
    pub fn laplacian(size: KernelSize) -> Self {
        let dxx = Self::from_separable(size.smoothing(), size.second_derivative());
        let dyy = Self::from_separable(size.second_derivative(), size.smoothing());
        let weights = dxx
            .weights
            .iter()
            .zip(dyy.weights.iter())
            .map(|(a, b)| a + b)
            .collect();
        Self {
            radius: dxx.radius,
            weights,
        }
    }

    /// Sum of the positive weights; the kernel's response to a full
    /// 0-to-255 step, divided by 255.
    #[must_use]
    pub fn positive_sum(&self) -> f32 {
        self.weights.iter().filter(|w| **w > 0.0).sum()
    }

    /// Convolve a grayscale image, producing an `f32` response image of
    /// the same dimensions. The border ring (one radius wide) is zero.
    #[must_use]
    pub fn convolve(&self, image: &GrayImage) -> Image<Luma<f32>> {
        let (width, height) = image.dimensions();
        let mut out = Image::from_pixel(width, height, Luma([0.0f32]));
        let r = self.radius;
        if width <= 2 * r || height <= 2 * r {
            return out;
        }
        let side = 2 * r + 1;
        for y in r..height - r {
            for x in r..width - r {
                let mut acc = 0.0f32;
                for ky in 0..side {
                    for kx in 0..side {
                        let sample = image.get_pixel(x + kx - r, y + ky - r).0[0];
                        acc += f32::from(sample) * self.weights[(ky * side + kx) as usize];
                    }
                }
                out.put_pixel(x, y, Luma([acc]));
            }
        }
        out
    }
}

/// Positive-weight sum of the 3x3 Sobel kernel, the gradient baseline.
const SOBEL_BASELINE: f32 = 4.0;

/// Positive-weight sum of the 4-neighbor Laplacian aperture (size 1),
/// the Laplacian baseline.
const LAPLACIAN_BASELINE: f32 = 4.0;

/// Map an absolute filter response onto an 8-bit display intensity.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_intensity(response: f32) -> u8 {
    response.abs().round().min(255.0) as u8
}

/// Scale that maps a gradient response at the given size onto the 3x3
/// Sobel baseline.
#[must_use]
pub fn gradient_scale(size: KernelSize) -> f32 {
    SOBEL_BASELINE / Kernel::sobel_x(size).positive_sum()
}

/// Scale that maps a Laplacian response at the given size onto the
/// 4-neighbor baseline.
#[must_use]
pub fn laplacian_scale(size: KernelSize) -> f32 {
    LAPLACIAN_BASELINE / Kernel::laplacian(size).positive_sum()
}
