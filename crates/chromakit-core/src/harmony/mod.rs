//! Harmony rules and seed-based palette generation.

pub mod palette;
pub mod rules;

pub use palette::{generate_harmony, random_seed_color};
pub use rules::{HarmonyAngles, HarmonyType};
