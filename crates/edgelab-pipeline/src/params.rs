//! Algorithm selection, parameter sets, validation, and defaults.
//!
//! Each algorithm carries its own parameter struct, and [`FilterParams`]
//! is the tagged union the dispatcher consumes. A tag/payload mismatch
//! is unrepresentable: the active [`Algorithm`] is derived from the
//! variant rather than passed alongside it.
//!
//! Parameters are rebuilt from widget state on every interaction, so
//! every type here is small, `Copy`, and serde-serializable (the UI
//! shell ships them across its worker boundary as JSON).

use serde::{Deserialize, Serialize};

/// Default Canny low threshold (gradient magnitude).
pub const DEFAULT_LOW_THRESHOLD: u8 = 50;

/// Default Canny high threshold (gradient magnitude).
pub const DEFAULT_HIGH_THRESHOLD: u8 = 150;

/// Default sigma for Canny's Gaussian pre-filter.
pub const DEFAULT_BLUR_SIGMA: f32 = 1.0;

/// Largest accepted sigma for Canny's Gaussian pre-filter; the UI
/// slider range. Values above this are clamped down.
pub const MAX_BLUR_SIGMA: f32 = 5.0;

/// The three supported edge-detection algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Algorithm {
    /// Gaussian blur, gradient, non-maximum suppression, hysteresis.
    #[default]
    Canny,
    /// First-derivative gradient operator.
    Sobel,
    /// Second-derivative operator.
    Laplacian,
}

impl Algorithm {
    /// The canonical default parameter set for this algorithm, used for
    /// initial widget state and the reset affordance.
    #[must_use]
    pub fn default_params(self) -> FilterParams {
        match self {
            Self::Canny => FilterParams::Canny(CannyParams::default()),
            Self::Sobel => FilterParams::Sobel(SobelParams::default()),
            Self::Laplacian => FilterParams::Laplacian(LaplacianParams::default()),
        }
    }
}

/// Supported derivative-kernel sizes.
///
/// Size 1 means a plain central difference (Sobel) or the 4-neighbor
/// aperture (Laplacian) with no binomial smoothing. The coefficient
/// tables live in [`crate::kernels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum KernelSize {
    /// 1: derivative only, no smoothing.
    One,
    /// 3x3.
    #[default]
    Three,
    /// 5x5.
    Five,
    /// 7x7.
    Seven,
}

impl KernelSize {
    /// Kernel width in pixels.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Three => 3,
            Self::Five => 5,
            Self::Seven => 7,
        }
    }

    /// Clamp a raw widget integer into the supported odd set {1,3,5,7}.
    ///
    /// Even values round up to the next odd size; values above 7 clamp
    /// to 7.
    #[must_use]
    pub const fn clamp_from(raw: u8) -> Self {
        match raw {
            0 | 1 => Self::One,
            2 | 3 => Self::Three,
            4 | 5 => Self::Five,
            _ => Self::Seven,
        }
    }

    /// Clamp into the Canny aperture domain {3,5,7}.
    ///
    /// Canny's gradient stage needs the smoothing half of the kernel,
    /// so size 1 is promoted to 3.
    #[must_use]
    pub const fn clamp_aperture(self) -> Self {
        match self {
            Self::One => Self::Three,
            other => other,
        }
    }
}

/// Which gradient component the Sobel operator reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GradientDirection {
    /// Horizontal gradient |Gx|.
    X,
    /// Vertical gradient |Gy|.
    Y,
    /// Combined magnitude sqrt(Gx² + Gy²).
    #[default]
    Both,
}

/// Sobel operator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SobelParams {
    /// Derivative kernel size.
    pub kernel_size: KernelSize,
    /// Reported gradient component.
    pub direction: GradientDirection,
}

/// Laplacian operator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LaplacianParams {
    /// Second-derivative kernel size.
    pub kernel_size: KernelSize,
}

/// Canny detector parameters.
///
/// Thresholds are typed `u8`, so the [0,255] domain is enforced
/// statically. Ordering (`low_threshold <= high_threshold`) is restored
/// by [`CannyParams::normalized`]; the detector itself also swaps
/// defensively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CannyParams {
    /// Pixels with gradient magnitude between the two thresholds are
    /// edges only if connected to a strong edge.
    pub low_threshold: u8,
    /// Pixels with gradient magnitude above this value are definite
    /// edges.
    pub high_threshold: u8,
    /// Size of the Sobel kernel used for the gradient stage.
    pub aperture_size: KernelSize,
    /// Sigma of the Gaussian pre-filter. Zero (or negative) skips the
    /// blur entirely.
    pub blur_sigma: f32,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low_threshold: DEFAULT_LOW_THRESHOLD,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            aperture_size: KernelSize::Three,
            blur_sigma: DEFAULT_BLUR_SIGMA,
        }
    }
}

impl CannyParams {
    /// Correct this parameter set into the legal domain.
    ///
    /// Swaps the thresholds when `low_threshold > high_threshold`,
    /// promotes aperture 1 to 3, and clamps sigma into
    /// `[0, MAX_BLUR_SIGMA]` (a non-finite sigma falls back to the
    /// default).
    #[must_use]
    pub fn normalized(self) -> Self {
        let (low_threshold, high_threshold) = if self.low_threshold <= self.high_threshold {
            (self.low_threshold, self.high_threshold)
        } else {
            (self.high_threshold, self.low_threshold)
        };
        let blur_sigma = if self.blur_sigma.is_finite() {
            self.blur_sigma.clamp(0.0, MAX_BLUR_SIGMA)
        } else {
            DEFAULT_BLUR_SIGMA
        };
        Self {
            low_threshold,
            high_threshold,
            aperture_size: self.aperture_size.clamp_aperture(),
            blur_sigma,
        }
    }
}

/// Tagged union over the three algorithm-specific parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FilterParams {
    /// Sobel gradient parameters.
    Sobel(SobelParams),
    /// Laplacian parameters.
    Laplacian(LaplacianParams),
    /// Canny parameters.
    Canny(CannyParams),
}

impl FilterParams {
    /// The algorithm this parameter set belongs to.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        match self {
            Self::Sobel(_) => Algorithm::Sobel,
            Self::Laplacian(_) => Algorithm::Laplacian,
            Self::Canny(_) => Algorithm::Canny,
        }
    }

    /// Correct every field into the legal domain.
    ///
    /// Sobel and Laplacian parameters are legal by construction (enum
    /// kernel sizes); only Canny carries correctable state.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Canny(params) => Self::Canny(params.normalized()),
            other => other,
        }
    }
}

impl Default for FilterParams {
    fn default() -> Self {
        Algorithm::default().default_params()
    }
}
