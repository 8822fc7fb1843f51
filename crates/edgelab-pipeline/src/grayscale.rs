//! Image decoding and grayscale conversion.
//!
//! Every filter operates on a single luminance channel, so multi-channel
//! input passes through a deterministic weighted conversion first.
//! Already-grayscale input is returned unchanged, byte for byte.

use image::{DynamicImage, GrayImage};

use crate::types::FilterError;

/// Decode raw image bytes (PNG, JPEG, BMP — whatever the `image` crate
/// is configured for) into the dispatcher's input type.
///
/// # Errors
///
/// Returns [`FilterError::EmptyInput`] if `bytes` is empty.
/// Returns [`FilterError::ImageDecode`] if the format is unrecognized
/// or the data is corrupt.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, FilterError> {
    if bytes.is_empty() {
        return Err(FilterError::EmptyInput);
    }
    Ok(image::load_from_memory(bytes)?)
}

/// Convert a decoded image to grayscale.
///
/// Multi-channel images go through the `image` crate's standard
/// green-dominant luma weighting; the same input always produces the
/// same output. A single-channel input is cloned as-is, so converting
/// an already-grayscale image is a no-op.
#[must_use = "returns the grayscale image"]
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        other => other.to_luma8(),
    }
}
