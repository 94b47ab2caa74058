//! Seed-based palette generation.
//!
//! Dispatches a [`HarmonyType`] to its rule, then pads or truncates the base
//! colors to the requested palette size. Padding cycles through the base
//! colors, alternately lightening and darkening by 15 points.

use rand::Rng;

use crate::color::model::Hsl;
use crate::harmony::rules::{self, HarmonyAngles, HarmonyType};

/// Analogous palettes never spread beyond this many hues; larger palettes
/// are padded with lightness variations instead.
const MAX_ANALOGOUS_HUES: usize = 5;
/// Lightness offset used for padding variations.
const VARIATION_STEP: f64 = 15.0;
/// Lightness bounds for padding variations.
const VARIATION_MIN_LIGHTNESS: f64 = 10.0;
const VARIATION_MAX_LIGHTNESS: f64 = 90.0;

/// Produce exactly `count` colors from `seed` following `harmony`.
///
/// `None` yields the seed alone (padded if `count > 1`).
pub fn generate_harmony(
    seed: Hsl,
    harmony: Option<HarmonyType>,
    count: usize,
    angles: &HarmonyAngles,
) -> Vec<Hsl> {
    let mut colors = match harmony {
        Some(HarmonyType::Complementary) => rules::complementary_pair(seed),
        Some(HarmonyType::Analogous) => {
            rules::analogous(seed, count.min(MAX_ANALOGOUS_HUES), angles.analogous)
        }
        Some(HarmonyType::Triadic) => rules::triadic(seed),
        Some(HarmonyType::Tetradic) => rules::tetradic(seed, angles.tetradic),
        Some(HarmonyType::SplitComplementary) => {
            rules::split_complementary(seed, angles.split_complementary)
        }
        Some(HarmonyType::Monochromatic) => rules::monochromatic(seed, count),
        None => vec![seed],
    };

    if count > colors.len() {
        let extra = variations(&colors, count - colors.len());
        colors.extend(extra);
    } else {
        colors.truncate(count);
    }
    colors
}

/// Lightness variations cycling through `base`.
///
/// Even indices lighten, odd indices darken; lightness stays in `[10, 90]`.
fn variations(base: &[Hsl], count: usize) -> Vec<Hsl> {
    if base.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|i| {
            let color = base[i % base.len()];
            let offset = if i % 2 == 0 { VARIATION_STEP } else { -VARIATION_STEP };
            let lightness = (color.l + offset).clamp(VARIATION_MIN_LIGHTNESS, VARIATION_MAX_LIGHTNESS);
            Hsl::new(color.h, color.s, lightness)
        })
        .collect()
}

/// A fresh seed for callers that have none: random hue at 70% saturation
/// and 50% lightness.
pub fn random_seed_color<R: Rng + ?Sized>(rng: &mut R) -> Hsl {
    let hue = (rng.r#gen::<f64>() * 360.0).floor();
    Hsl::new(hue, 70.0, 50.0)
}
