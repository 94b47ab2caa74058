//! Dominant-color extraction: pixel sampling and k-means clustering.

pub mod kmeans;
pub mod sampling;

use image::DynamicImage;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use kmeans::{ClusterResult, IterationProgress, KMeans, KMeansOutcome};
pub use sampling::{sample_dynamic_image, sample_image, sample_pixels, sample_rgba_bytes};

use crate::color::model::Rgb;

/// Cluster already-sampled pixels into at most `k` dominant colors.
///
/// `max_iterations` defaults to 50. With `rng_seed` the result is fully
/// reproducible for a given point order; without it the generator is seeded
/// from OS entropy.
pub fn extract_dominant_colors(
    pixels: &[Rgb],
    k: usize,
    max_iterations: Option<usize>,
    rng_seed: Option<u64>,
) -> Vec<ClusterResult> {
    let mut rng = match rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let kmeans = match max_iterations {
        Some(max) => KMeans::new(k).with_max_iterations(max),
        None => KMeans::new(k),
    };
    kmeans.run(pixels, &mut rng)
}

/// Sample a decoded image and return its dominant colors, most common first.
pub fn dominant_colors_from_image(image: &DynamicImage, k: usize, rng_seed: Option<u64>) -> Vec<Rgb> {
    let pixels = sample_dynamic_image(image);
    extract_dominant_colors(&pixels, k, None, rng_seed)
        .into_iter()
        .map(|cluster| cluster.color)
        .collect()
}
