//! Generate a side-by-side comparison image: original input on the
//! left, edge-detection output on the right.
//!
//! A command-line stand-in for the interactive shell: it decodes one
//! image, runs one filter with the given parameters, and writes the
//! comparison as a single PNG.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use edgelab_pipeline::{
    CannyParams, FilterParams, GradientDirection, KernelSize, LaplacianParams, SobelParams,
};
use image::{DynamicImage, Rgb, RgbImage};

/// Generate a side-by-side input/output comparison image for one
/// edge-detection run.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input image path (PNG, JPEG, or BMP).
    input: PathBuf,

    /// Output image path (PNG recommended).
    #[arg(short, long)]
    output: PathBuf,

    /// Edge-detection algorithm to run.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Canny)]
    algorithm: AlgorithmArg,

    /// Kernel size for Sobel and Laplacian (1, 3, 5, or 7; other
    /// values are clamped to the nearest supported size).
    #[arg(long, default_value_t = 3)]
    kernel_size: u8,

    /// Gradient direction for Sobel.
    #[arg(long, value_enum, default_value_t = DirectionArg::Both)]
    direction: DirectionArg,

    /// Canny low threshold (0-255).
    #[arg(long, default_value_t = 50)]
    low: u8,

    /// Canny high threshold (0-255).
    #[arg(long, default_value_t = 150)]
    high: u8,

    /// Canny gradient aperture size (3, 5, or 7).
    #[arg(long, default_value_t = 3)]
    aperture: u8,

    /// Sigma for Canny's Gaussian pre-filter; 0 disables it.
    #[arg(long, default_value_t = 1.0)]
    sigma: f32,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Canny,
    Sobel,
    Laplacian,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    X,
    Y,
    Both,
}

impl From<DirectionArg> for GradientDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::X => Self::X,
            DirectionArg::Y => Self::Y,
            DirectionArg::Both => Self::Both,
        }
    }
}

impl Args {
    /// Assemble the parameter set for the selected algorithm, clamping
    /// raw widget-style integers into their legal domains.
    fn filter_params(&self) -> FilterParams {
        match self.algorithm {
            AlgorithmArg::Canny => FilterParams::Canny(CannyParams {
                low_threshold: self.low,
                high_threshold: self.high,
                aperture_size: KernelSize::clamp_from(self.aperture),
                blur_sigma: self.sigma,
            }),
            AlgorithmArg::Sobel => FilterParams::Sobel(SobelParams {
                kernel_size: KernelSize::clamp_from(self.kernel_size),
                direction: self.direction.into(),
            }),
            AlgorithmArg::Laplacian => FilterParams::Laplacian(LaplacianParams {
                kernel_size: KernelSize::clamp_from(self.kernel_size),
            }),
        }
    }
}

/// Compose the original and the edge map side by side on one canvas.
fn side_by_side(original: &DynamicImage, edges: &image::GrayImage) -> RgbImage {
    let left = original.to_rgb8();
    let (width, height) = left.dimensions();
    let mut canvas = RgbImage::from_pixel(width * 2, height, Rgb([0, 0, 0]));

    for (x, y, pixel) in left.enumerate_pixels() {
        canvas.put_pixel(x, y, *pixel);
    }
    for (x, y, pixel) in edges.enumerate_pixels() {
        let v = pixel.0[0];
        canvas.put_pixel(width + x, y, Rgb([v, v, v]));
    }
    canvas
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let params = args.filter_params();

    eprintln!("Reading image from {}", args.input.display());
    let image_bytes = std::fs::read(&args.input)?;

    eprintln!("Decoding...");
    let original = edgelab_pipeline::grayscale::decode(&image_bytes)?;
    let (width, height) = (original.width(), original.height());

    eprintln!("Running {params:?} on {width}x{height} input...");
    let edges = edgelab_pipeline::detect(&original, &params)?;

    eprintln!("Composing side-by-side comparison...");
    let comparison = side_by_side(&original, &edges);

    eprintln!("Saving to {}", args.output.display());
    comparison.save(&args.output)?;

    eprintln!("Done.");
    Ok(())
}
