//! Pixel sampling for dominant-color extraction.
//!
//! Large images are thinned on a square grid before clustering. The stride
//! grows with the image diagonal so roughly 100 × 100 samples are taken
//! regardless of resolution:
//!
//! ```text
//!   stride = max(1, floor(sqrt(width × height) / 100))
//! ```
//!
//! Pixels with alpha <= 127 are treated as transparent and skipped.

use image::{DynamicImage, RgbaImage};

use crate::color::model::Rgb;
use crate::error::{ChromaError, Result};

/// Alpha at or below this value is treated as transparent.
const ALPHA_CUTOFF: u8 = 127;
/// Target samples per image axis.
const SAMPLES_PER_AXIS: f64 = 100.0;

/// Grid stride in both axes for an image of the given size.
pub fn sample_stride(width: u32, height: u32) -> usize {
    let diagonal = ((width as f64) * (height as f64)).sqrt();
    ((diagonal / SAMPLES_PER_AXIS).floor() as usize).max(1)
}

/// Sample opaque pixels from a row-major RGBA pixel slice.
///
/// Pixels beyond the end of `pixels` are ignored, so a short slice yields
/// fewer samples rather than a panic.
pub fn sample_pixels(pixels: &[[u8; 4]], width: u32, height: u32) -> Vec<Rgb> {
    let stride = sample_stride(width, height);
    let width = width as usize;
    let mut samples = Vec::new();

    for y in (0..height as usize).step_by(stride) {
        for x in (0..width).step_by(stride) {
            let Some(&[r, g, b, a]) = pixels.get(y * width + x) else {
                continue;
            };
            if a > ALPHA_CUTOFF {
                samples.push(Rgb::new(r, g, b));
            }
        }
    }
    samples
}

/// Sample from a raw RGBA byte buffer of exactly `width × height × 4` bytes.
///
/// # Errors
/// [`ChromaError::InvalidParameter`] when the buffer length does not match
/// the dimensions.
pub fn sample_rgba_bytes(bytes: &[u8], width: u32, height: u32) -> Result<Vec<Rgb>> {
    let expected = width as usize * height as usize * 4;
    if bytes.len() != expected {
        return Err(ChromaError::invalid_parameter(
            "rgba buffer length",
            format!("{} (expected {expected} for {width}x{height})", bytes.len()),
        ));
    }
    let pixels: &[[u8; 4]] = bytemuck::try_cast_slice(bytes)
        .map_err(|e| ChromaError::invalid_parameter("rgba buffer", e))?;
    Ok(sample_pixels(pixels, width, height))
}

/// Sample an 8-bit RGBA image.
pub fn sample_image(image: &RgbaImage) -> Vec<Rgb> {
    let (width, height) = image.dimensions();
    let stride = sample_stride(width, height);
    let mut samples = Vec::new();

    for y in (0..height).step_by(stride) {
        for x in (0..width).step_by(stride) {
            let [r, g, b, a] = image.get_pixel(x, y).0;
            if a > ALPHA_CUTOFF {
                samples.push(Rgb::new(r, g, b));
            }
        }
    }
    tracing::debug!(width, height, stride, samples = samples.len(), "sampled image");
    samples
}

/// Sample any decoded image, converting to 8-bit RGBA first.
pub fn sample_dynamic_image(image: &DynamicImage) -> Vec<Rgb> {
    sample_image(&image.to_rgba8())
}
