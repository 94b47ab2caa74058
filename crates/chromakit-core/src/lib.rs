//! Chromakit Core: color science for palette tools.
//!
//! Color-space conversions, harmony and semantic palette generation,
//! CIEDE2000 distance, k-means dominant-color extraction and WCAG
//! accessibility checks. Randomized operations take a caller-supplied
//! generator or seed.

pub mod accessibility;
pub mod color;
pub mod config;
pub mod distance;
pub mod error;
pub mod extraction;
pub mod harmony;
pub mod semantic;

// Re-exports for convenience.
pub use accessibility::{
    ColorBlindness, WcagLevel, contrast_ratio, simulate_color_blindness, wcag_level,
};
pub use color::conversion::{
    hex_to_rgb, hsl_to_rgb, lab_to_lch, lab_to_rgb, lch_to_lab, relative_luminance,
    rgb_to_cie_lab, rgb_to_hex, rgb_to_hsl, rgb_to_lab,
};
pub use color::{Color, ColorSpace, ColorWithId, Hsl, Lab, Lch, Rgb, convert};
pub use config::EngineConfig;
pub use distance::delta_e_2000;
pub use error::{ChromaError, Result};
pub use extraction::{ClusterResult, extract_dominant_colors};
pub use harmony::{HarmonyType, generate_harmony};
pub use semantic::generate_palette_from_semantics;
