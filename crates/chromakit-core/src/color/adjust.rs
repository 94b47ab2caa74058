//! Hue arithmetic and HSL adjustments.
//!
//! Hue is circular. Every result here is normalized into `[0, 360)`,
//! including negative intermediates.

use serde::{Deserialize, Serialize};

use crate::color::model::{ColorWithId, Hsl};

/// Wrap any angle into `[0, 360)`.
pub fn normalize_hue(hue: f64) -> f64 {
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rotate `hue` by `angle` degrees and wrap into `[0, 360)`.
pub fn rotate_hue(hue: f64, angle: f64) -> f64 {
    normalize_hue(hue + angle)
}

pub fn complementary_hue(hue: f64) -> f64 {
    rotate_hue(hue, 180.0)
}

/// Scale saturation, clamped to `[0, 100]`.
pub fn adjust_saturation(saturation: f64, multiplier: f64) -> f64 {
    (saturation * multiplier).clamp(0.0, 100.0)
}

/// Scale lightness, clamped to `[0, 100]`.
pub fn adjust_lightness(lightness: f64, multiplier: f64) -> f64 {
    (lightness * multiplier).clamp(0.0, 100.0)
}

pub fn is_dark(hsl: Hsl) -> bool {
    hsl.l < 50.0
}

pub fn with_lightness(hsl: Hsl, lightness: f64) -> Hsl {
    Hsl::new(hsl.h, hsl.s, lightness.clamp(0.0, 100.0))
}

pub fn with_saturation(hsl: Hsl, saturation: f64) -> Hsl {
    Hsl::new(hsl.h, saturation.clamp(0.0, 100.0), hsl.l)
}

/// A palette-wide tweak. Absent fields leave that channel untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorAdjustment {
    /// Degrees added to the hue.
    pub hue_shift: Option<f64>,
    /// Factor applied to saturation.
    pub saturation_multiplier: Option<f64>,
    /// Factor applied to lightness.
    pub lightness_multiplier: Option<f64>,
}

impl ColorAdjustment {
    pub fn is_identity(&self) -> bool {
        self.hue_shift.is_none_or(|h| h == 0.0)
            && self.saturation_multiplier.is_none_or(|m| m == 1.0)
            && self.lightness_multiplier.is_none_or(|m| m == 1.0)
    }

    pub fn apply(&self, hsl: Hsl) -> Hsl {
        Hsl::new(
            self.hue_shift.map_or(hsl.h, |shift| rotate_hue(hsl.h, shift)),
            self.saturation_multiplier
                .map_or(hsl.s, |m| adjust_saturation(hsl.s, m)),
            self.lightness_multiplier
                .map_or(hsl.l, |m| adjust_lightness(hsl.l, m)),
        )
    }

    /// Adjust a palette entry, re-deriving every representation.
    ///
    /// The entry is returned as is when the adjustment leaves its HSL value
    /// unchanged. Identity and lock flag are always preserved; choosing which
    /// entries to skip is up to the caller.
    pub fn apply_to(&self, color: &ColorWithId) -> ColorWithId {
        let adjusted = self.apply(color.hsl);
        if adjusted == color.hsl {
            return color.clone();
        }
        ColorWithId::from_hsl(color.id.clone(), adjusted).with_locked(color.locked)
    }
}
