//! Shared types for the edgelab processing pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference the
/// single-channel pipeline currency without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `DynamicImage`, the decoded-upload type handed to the
/// dispatcher by the UI shell.
pub use image::DynamicImage;

/// Re-export `RgbImage` for shells that compose color previews around
/// the grayscale output.
pub use image::RgbImage;

/// Errors that can occur while running an edge-detection filter.
///
/// Uses custom `Serialize`/`Deserialize` because `image::ImageError`
/// does not implement serde traits. The `ImageDecode` variant is
/// serialized as its `Display` string.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// Failed to decode the input image bytes.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The image has a shape no filter can operate on (zero width or
    /// height). No partial output is produced.
    #[error("unsupported image shape: {width}x{height}")]
    UnsupportedShape {
        /// Width of the rejected image in pixels.
        width: u32,
        /// Height of the rejected image in pixels.
        height: u32,
    },

    /// A parameter value could not be corrected into the legal domain.
    ///
    /// Clamping and swapping handle everything representable; this
    /// variant is reserved for shell-boundary input that never becomes
    /// a typed parameter (e.g. an unparsable CLI value).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Serde-compatible proxy for `FilterError`.
///
/// `image::ImageError` does not implement serde, so the `ImageDecode`
/// variant stores its `Display` string instead. A deserialized decode
/// error keeps the message but not the original typed error.
#[derive(Serialize, Deserialize)]
enum FilterErrorProxy {
    ImageDecode(String),
    EmptyInput,
    UnsupportedShape { width: u32, height: u32 },
    InvalidParameter(String),
}

impl Serialize for FilterError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let proxy = match self {
            Self::ImageDecode(e) => FilterErrorProxy::ImageDecode(e.to_string()),
            Self::EmptyInput => FilterErrorProxy::EmptyInput,
            Self::UnsupportedShape { width, height } => FilterErrorProxy::UnsupportedShape {
                width: *width,
                height: *height,
            },
            Self::InvalidParameter(s) => FilterErrorProxy::InvalidParameter(s.clone()),
        };
        proxy.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FilterError {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let proxy = FilterErrorProxy::deserialize(deserializer)?;
        Ok(match proxy {
            // The original image::ImageError cannot be reconstructed;
            // carry the message through InvalidParameter instead.
            FilterErrorProxy::ImageDecode(msg) => {
                Self::InvalidParameter(format!("image decode error: {msg}"))
            }
            FilterErrorProxy::EmptyInput => Self::EmptyInput,
            FilterErrorProxy::UnsupportedShape { width, height } => {
                Self::UnsupportedShape { width, height }
            }
            FilterErrorProxy::InvalidParameter(s) => Self::InvalidParameter(s),
        })
    }
}
