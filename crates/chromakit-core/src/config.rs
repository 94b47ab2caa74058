//! Engine tunables.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extraction::kmeans::{DEFAULT_MAX_ITERATIONS, DEFAULT_PARALLEL_THRESHOLD, KMeans};
use crate::harmony::rules::HarmonyAngles;
use crate::semantic::{SemanticMapper, SemanticTable};

/// Default palette length.
const DEFAULT_PALETTE_SIZE: usize = 5;
/// Default number of dominant colors to extract.
const DEFAULT_DOMINANT_COLOR_COUNT: usize = 5;

/// Runtime configuration for palette generation and extraction.
///
/// Every field is optional in serialized form; missing fields take their
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Angles used by the angle-parameterized harmonies.
    pub harmony_angles: HarmonyAngles,
    /// Palette length for seed-based and semantic generation.
    pub palette_size: usize,
    /// Upper bound on k-means refinement passes.
    pub kmeans_max_iterations: usize,
    /// Point count above which k-means assignment runs on the rayon pool.
    pub kmeans_parallel_threshold: usize,
    /// `k` for dominant-color extraction.
    pub dominant_color_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            harmony_angles: HarmonyAngles::default(),
            palette_size: DEFAULT_PALETTE_SIZE,
            kmeans_max_iterations: DEFAULT_MAX_ITERATIONS,
            kmeans_parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            dominant_color_count: DEFAULT_DOMINANT_COLOR_COUNT,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document and replace unusable values with defaults.
    ///
    /// # Errors
    /// [`crate::ChromaError::Config`] when the document is not valid JSON
    /// for this shape.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Replace zero counts and non-finite angles with their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.kmeans_max_iterations == 0 {
            tracing::warn!(
                fallback = defaults.kmeans_max_iterations,
                "kmeans_max_iterations must be at least 1"
            );
            self.kmeans_max_iterations = defaults.kmeans_max_iterations;
        }
        if self.dominant_color_count == 0 {
            tracing::warn!(
                fallback = defaults.dominant_color_count,
                "dominant_color_count must be at least 1"
            );
            self.dominant_color_count = defaults.dominant_color_count;
        }

        let angles = &mut self.harmony_angles;
        let fallback = defaults.harmony_angles;
        for (name, value, default) in [
            ("analogous", &mut angles.analogous, fallback.analogous),
            ("tetradic", &mut angles.tetradic, fallback.tetradic),
            (
                "split_complementary",
                &mut angles.split_complementary,
                fallback.split_complementary,
            ),
        ] {
            if !value.is_finite() {
                tracing::warn!(angle = name, fallback = default, "non-finite harmony angle");
                *value = default;
            }
        }

        self
    }

    /// Clusterer configured for dominant-color extraction.
    pub fn kmeans(&self) -> KMeans {
        KMeans::new(self.dominant_color_count)
            .with_max_iterations(self.kmeans_max_iterations)
            .with_parallel_threshold(self.kmeans_parallel_threshold)
    }

    /// Semantic mapper over the built-in tables using these angles.
    pub fn semantic_mapper(&self) -> SemanticMapper {
        SemanticMapper::new(SemanticTable::builtin()).with_angles(self.harmony_angles)
    }
}
