//! Per-session parameter state and the reset affordance.
//!
//! Each UI session owns one [`SessionParams`]: the selected algorithm
//! plus the current parameter set for all three algorithms, so
//! switching algorithms back and forth keeps each one's tuning.
//! Nothing here is process-global; concurrent sessions stay isolated
//! by construction.

use serde::{Deserialize, Serialize};

use crate::params::{Algorithm, CannyParams, FilterParams, LaplacianParams, SobelParams};

/// Parameter state for one interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionParams {
    /// Currently selected algorithm.
    pub algorithm: Algorithm,
    /// Current Sobel tuning.
    pub sobel: SobelParams,
    /// Current Laplacian tuning.
    pub laplacian: LaplacianParams,
    /// Current Canny tuning.
    pub canny: CannyParams,
}

impl SessionParams {
    /// The parameter set for the currently selected algorithm, ready to
    /// hand to [`crate::detect`].
    #[must_use]
    pub const fn active(&self) -> FilterParams {
        match self.algorithm {
            Algorithm::Sobel => FilterParams::Sobel(self.sobel),
            Algorithm::Laplacian => FilterParams::Laplacian(self.laplacian),
            Algorithm::Canny => FilterParams::Canny(self.canny),
        }
    }

    /// Store a parameter set captured from widget state, selecting its
    /// algorithm.
    pub const fn apply(&mut self, params: FilterParams) {
        match params {
            FilterParams::Sobel(p) => {
                self.algorithm = Algorithm::Sobel;
                self.sobel = p;
            }
            FilterParams::Laplacian(p) => {
                self.algorithm = Algorithm::Laplacian;
                self.laplacian = p;
            }
            FilterParams::Canny(p) => {
                self.algorithm = Algorithm::Canny;
                self.canny = p;
            }
        }
    }

    /// Restore every parameter to its default, including the algorithm
    /// selection. Pure state replacement; the pipeline is not involved.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
