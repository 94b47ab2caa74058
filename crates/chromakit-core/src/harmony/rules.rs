//! Color harmony rules on the HSL wheel.
//!
//! Each rule returns the seed unchanged in its position plus hue-rotated
//! companions that share the seed's saturation and lightness. Monochromatic
//! is the exception: it keeps the hue and spreads lightness instead.
//!
//! ```text
//!   complementary        0, 180
//!   analogous            …, −2a, −a, 0, +a, +2a, …
//!   triadic              0, 120, 240
//!   tetradic (square)    0, 90, 180, 270
//!   tetradic (rect)      0, a, 180, 180 + a
//!   split-complementary  0, 180 − a, 180 + a
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::adjust::{complementary_hue, rotate_hue};
use crate::color::model::Hsl;
use crate::error::ChromaError;

/// Lightness span covered by a monochromatic ramp.
const MONOCHROMATIC_SPAN: f64 = 70.0;
/// Darkest lightness a monochromatic ramp may start from.
const MONOCHROMATIC_FLOOR: f64 = 15.0;

/// Named rule for picking hues relative to a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HarmonyType {
    Complementary,
    Analogous,
    Triadic,
    Tetradic,
    SplitComplementary,
    Monochromatic,
}

impl HarmonyType {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Complementary => "complementary",
            Self::Analogous => "analogous",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
            Self::SplitComplementary => "splitComplementary",
            Self::Monochromatic => "monochromatic",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [HarmonyType; 6] = [
            HarmonyType::Complementary,
            HarmonyType::Analogous,
            HarmonyType::Triadic,
            HarmonyType::Tetradic,
            HarmonyType::SplitComplementary,
            HarmonyType::Monochromatic,
        ];
        &ALL
    }
}

impl fmt::Display for HarmonyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HarmonyType {
    type Err = ChromaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|harmony| harmony.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChromaError::UnknownHarmony(s.to_string()))
    }
}

/// Angle overrides for the harmonies that take one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonyAngles {
    /// Spacing between analogous neighbors. Default: 30°.
    pub analogous: f64,
    /// Offset of the second complementary pair. Default: 60°.
    pub tetradic: f64,
    /// Offset from the complement on each side. Default: 30°.
    pub split_complementary: f64,
}

impl Default for HarmonyAngles {
    fn default() -> Self {
        Self {
            analogous: 30.0,
            tetradic: 60.0,
            split_complementary: 30.0,
        }
    }
}

fn with_hue(seed: Hsl, hue: f64) -> Hsl {
    Hsl::new(hue, seed.s, seed.l)
}

/// The color opposite the seed on the wheel.
pub fn complementary(seed: Hsl) -> Hsl {
    with_hue(seed, complementary_hue(seed.h))
}

/// Seed followed by its complement.
pub fn complementary_pair(seed: Hsl) -> Vec<Hsl> {
    vec![seed, complementary(seed)]
}

/// `count` colors spaced `angle` degrees apart around the seed.
///
/// `floor((count − 1) / 2)` colors go on the negative side (furthest first),
/// the rest on the positive side, so the seed sits in the middle or just
/// left of it.
pub fn analogous(seed: Hsl, count: usize, angle: f64) -> Vec<Hsl> {
    if count == 0 {
        return Vec::new();
    }
    let left = (count - 1) / 2;
    let right = count - 1 - left;

    let mut colors = Vec::with_capacity(count);
    colors.extend((1..=left).rev().map(|i| with_hue(seed, rotate_hue(seed.h, -angle * i as f64))));
    colors.push(seed);
    colors.extend((1..=right).map(|i| with_hue(seed, rotate_hue(seed.h, angle * i as f64))));
    colors
}

pub fn triadic(seed: Hsl) -> Vec<Hsl> {
    vec![
        seed,
        with_hue(seed, rotate_hue(seed.h, 120.0)),
        with_hue(seed, rotate_hue(seed.h, 240.0)),
    ]
}

/// Four hues 90° apart.
pub fn tetradic_square(seed: Hsl) -> Vec<Hsl> {
    vec![
        seed,
        with_hue(seed, rotate_hue(seed.h, 90.0)),
        with_hue(seed, rotate_hue(seed.h, 180.0)),
        with_hue(seed, rotate_hue(seed.h, 270.0)),
    ]
}

/// Two complementary pairs offset by `angle`.
pub fn tetradic_rectangular(seed: Hsl, angle: f64) -> Vec<Hsl> {
    vec![
        seed,
        with_hue(seed, rotate_hue(seed.h, angle)),
        with_hue(seed, rotate_hue(seed.h, 180.0)),
        with_hue(seed, rotate_hue(seed.h, 180.0 + angle)),
    ]
}

/// General tetradic harmony; the rectangular form.
pub fn tetradic(seed: Hsl, angle: f64) -> Vec<Hsl> {
    tetradic_rectangular(seed, angle)
}

/// Seed plus the two hues flanking its complement by `angle`.
pub fn split_complementary(seed: Hsl, angle: f64) -> Vec<Hsl> {
    let complement = complementary_hue(seed.h);
    vec![
        seed,
        with_hue(seed, rotate_hue(complement, -angle)),
        with_hue(seed, rotate_hue(complement, angle)),
    ]
}

/// A lightness ramp over a single hue.
///
/// Lightness starts at `max(15, L − 35)` and climbs across a 70-point span.
/// Saturation is attenuated toward the lightness extremes:
///
/// ```text
///   L_i = max(15, L − 35) + i × 70 / (count − 1)
///   S_i = S × (1 − 0.5 × |L_i − 50| / 50)
/// ```
///
/// A single-color ramp has no step and sits at the anchor lightness.
pub fn monochromatic(seed: Hsl, count: usize) -> Vec<Hsl> {
    let anchor = (seed.l - 35.0).max(MONOCHROMATIC_FLOOR);
    let step = if count > 1 {
        MONOCHROMATIC_SPAN / (count - 1) as f64
    } else {
        0.0
    };

    (0..count)
        .map(|i| {
            let lightness = anchor + i as f64 * step;
            let factor = 1.0 - 0.5 * (lightness - 50.0).abs() / 50.0;
            Hsl::new(seed.h, seed.s * factor, lightness)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hues(colors: &[Hsl]) -> Vec<f64> {
        colors.iter().map(|c| c.h).collect()
    }

    #[test]
    fn test_complementary_wraps_past_360() {
        assert_eq!(complementary(Hsl::new(200.0, 60.0, 40.0)), Hsl::new(20.0, 60.0, 40.0));
    }

    #[test]
    fn test_triadic_hues() {
        assert_eq!(
            triadic(Hsl::new(0.0, 50.0, 50.0)),
            vec![
                Hsl::new(0.0, 50.0, 50.0),
                Hsl::new(120.0, 50.0, 50.0),
                Hsl::new(240.0, 50.0, 50.0),
            ]
        );
        assert_eq!(hues(&triadic(Hsl::new(300.0, 1.0, 1.0))), vec![300.0, 60.0, 180.0]);
    }

    #[test]
    fn test_analogous_places_seed_and_sides() {
        let seed = Hsl::new(10.0, 40.0, 60.0);
        assert_eq!(hues(&analogous(seed, 5, 30.0)), vec![310.0, 340.0, 10.0, 40.0, 70.0]);
        // even counts put the extra color on the positive side
        assert_eq!(hues(&analogous(seed, 4, 30.0)), vec![340.0, 10.0, 40.0, 70.0]);
        assert_eq!(hues(&analogous(seed, 1, 30.0)), vec![10.0]);
        assert!(analogous(seed, 0, 30.0).is_empty());
    }

    #[test]
    fn test_tetradic_forms() {
        let seed = Hsl::new(30.0, 50.0, 50.0);
        assert_eq!(hues(&tetradic_square(seed)), vec![30.0, 120.0, 210.0, 300.0]);
        assert_eq!(hues(&tetradic_rectangular(seed, 60.0)), vec![30.0, 90.0, 210.0, 270.0]);
        assert_eq!(tetradic(seed, 60.0), tetradic_rectangular(seed, 60.0));
    }

    #[test]
    fn test_split_complementary() {
        let seed = Hsl::new(0.0, 50.0, 50.0);
        assert_eq!(hues(&split_complementary(seed, 30.0)), vec![0.0, 150.0, 210.0]);
    }

    #[test]
    fn test_monochromatic_keeps_hue_and_spreads_lightness() {
        let seed = Hsl::new(213.7, 80.0, 50.0);
        let ramp = monochromatic(seed, 5);
        assert_eq!(ramp.len(), 5);
        assert!(ramp.iter().all(|c| c.h == seed.h));
        let lightness: Vec<f64> = ramp.iter().map(|c| c.l).collect();
        assert_eq!(lightness, vec![15.0, 32.5, 50.0, 67.5, 85.0]);
        // saturation peaks at mid lightness
        assert_eq!(ramp[2].s, 80.0);
        assert!((ramp[0].s - 80.0 * 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_monochromatic_anchor_follows_light_seeds() {
        let ramp = monochromatic(Hsl::new(0.0, 50.0, 70.0), 3);
        assert_eq!(ramp[0].l, 35.0);
        assert_eq!(monochromatic(Hsl::new(0.0, 50.0, 70.0), 1)[0].l, 35.0);
        assert!(monochromatic(Hsl::new(0.0, 50.0, 70.0), 0).is_empty());
    }

    #[test]
    fn test_harmony_names_round_trip() {
        for harmony in HarmonyType::all() {
            assert_eq!(harmony.name().parse::<HarmonyType>().unwrap(), *harmony);
        }
        assert!(matches!(
            "pentadic".parse::<HarmonyType>(),
            Err(ChromaError::UnknownHarmony(_))
        ));
        let json = serde_json::to_string(&HarmonyType::SplitComplementary).unwrap();
        assert_eq!(json, "\"splitComplementary\"");
    }
}
