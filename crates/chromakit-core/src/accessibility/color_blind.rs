//! Dichromatic color-vision simulation.
//!
//! Each deficiency is a fixed 3×3 matrix applied to normalized sRGB
//! channels without linearization, then clamped to `[0, 1]`. The matrices
//! are the widely circulated Machado-style approximations; every row sums
//! to one, so black and white are fixed points.

use std::fmt;

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use crate::color::conversion::{denormalize, normalize};
use crate::color::model::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorBlindness {
    /// Missing L cones (red-blind).
    Protanopia,
    /// Missing M cones (green-blind).
    Deuteranopia,
    /// Missing S cones (blue-blind).
    Tritanopia,
}

impl ColorBlindness {
    pub const fn all() -> [Self; 3] {
        [Self::Protanopia, Self::Deuteranopia, Self::Tritanopia]
    }

    /// Row-major simulation matrix.
    pub const fn rows(&self) -> [[f64; 3]; 3] {
        match self {
            Self::Protanopia => [[0.567, 0.433, 0.0], [0.558, 0.442, 0.0], [0.0, 0.242, 0.758]],
            Self::Deuteranopia => [[0.625, 0.375, 0.0], [0.7, 0.3, 0.0], [0.0, 0.3, 0.7]],
            Self::Tritanopia => [[0.95, 0.05, 0.0], [0.0, 0.433, 0.567], [0.0, 0.475, 0.525]],
        }
    }

    pub fn matrix(&self) -> DMat3 {
        // glam is column-major
        DMat3::from_cols_array_2d(&self.rows()).transpose()
    }
}

impl fmt::Display for ColorBlindness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Protanopia => "protanopia",
            Self::Deuteranopia => "deuteranopia",
            Self::Tritanopia => "tritanopia",
        };
        f.write_str(name)
    }
}

/// Approximate how `rgb` appears to a viewer with the given deficiency.
pub fn simulate_color_blindness(rgb: Rgb, kind: ColorBlindness) -> Rgb {
    let simulated = kind.matrix() * DVec3::from_array(normalize(rgb));
    denormalize(simulated.clamp(DVec3::ZERO, DVec3::ONE).to_array())
}

/// Simulate every color in a palette.
pub fn simulate_palette(colors: &[Rgb], kind: ColorBlindness) -> Vec<Rgb> {
    colors
        .iter()
        .map(|&rgb| simulate_color_blindness(rgb, kind))
        .collect()
}
