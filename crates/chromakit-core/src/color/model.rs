//! Color representations and the space identifiers used by [`convert`].
//!
//! [`convert`]: crate::color::conversion::convert

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::color::conversion::{hsl_to_rgb, rgb_to_hex, rgb_to_hsl, rgb_to_lab};

/// An 8-bit sRGB color. Channels are clamped to `[0, 255]` by construction.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Pod, Zeroable,
)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from unbounded channel values, rounding to nearest and clamping
    /// each channel into `[0, 255]`.
    pub fn from_clamped(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels widened to `f64` without normalization.
    pub fn to_f64(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }
}

fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        rgb.to_array()
    }
}

impl From<Rgb> for palette::Srgb<u8> {
    fn from(rgb: Rgb) -> Self {
        palette::Srgb::new(rgb.r, rgb.g, rgb.b)
    }
}

impl From<palette::Srgb<u8>> for Rgb {
    fn from(srgb: palette::Srgb<u8>) -> Self {
        Self::new(srgb.red, srgb.green, srgb.blue)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Hue in degrees, saturation and lightness in percent.
///
/// Hue is conceptually in `[0, 360)` but callers may pass any value; every
/// operation that does hue arithmetic normalizes modulo 360.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub const fn to_array(self) -> [f64; 3] {
        [self.h, self.s, self.l]
    }
}

impl From<[f64; 3]> for Hsl {
    fn from([h, s, l]: [f64; 3]) -> Self {
        Self::new(h, s, l)
    }
}

/// Lightness in `[0, 100]` with unconstrained `a`/`b` opponent axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

impl From<[f64; 3]> for Lab {
    fn from([l, a, b]: [f64; 3]) -> Self {
        Self::new(l, a, b)
    }
}

/// Polar form of [`Lab`]: chroma `c >= 0` and hue `h` in `[0, 360)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Lch {
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }
}

/// Identifies a color representation for [`convert`].
///
/// [`convert`]: crate::color::conversion::convert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSpace {
    /// 8-bit sRGB triple.
    Rgb,
    /// `#rrggbb` string.
    Hex,
    /// Hue/saturation/lightness.
    Hsl,
    /// Simplified Lab approximation.
    Lab,
    /// Polar Lab.
    Lch,
}

impl ColorSpace {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rgb => "RGB",
            Self::Hex => "Hex",
            Self::Hsl => "HSL",
            Self::Lab => "LAB",
            Self::Lch => "LCh",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [ColorSpace; 5] = [
            ColorSpace::Rgb,
            ColorSpace::Hex,
            ColorSpace::Hsl,
            ColorSpace::Lab,
            ColorSpace::Lch,
        ];
        &ALL
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A color tagged with the space it is expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Color {
    Rgb(Rgb),
    Hex(String),
    Hsl(Hsl),
    Lab(Lab),
    Lch(Lch),
}

impl Color {
    pub const fn space(&self) -> ColorSpace {
        match self {
            Self::Rgb(_) => ColorSpace::Rgb,
            Self::Hex(_) => ColorSpace::Hex,
            Self::Hsl(_) => ColorSpace::Hsl,
            Self::Lab(_) => ColorSpace::Lab,
            Self::Lch(_) => ColorSpace::Lch,
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<Hsl> for Color {
    fn from(hsl: Hsl) -> Self {
        Self::Hsl(hsl)
    }
}

impl From<Lab> for Color {
    fn from(lab: Lab) -> Self {
        Self::Lab(lab)
    }
}

impl From<Lch> for Color {
    fn from(lch: Lch) -> Self {
        Self::Lch(lch)
    }
}

/// One palette entry carried by the caller, in every representation at once.
///
/// The `id` is assigned by the caller. The engine never reads `locked`; it
/// only preserves it when producing adjusted copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorWithId {
    pub id: String,
    pub rgb: Rgb,
    pub hex: String,
    pub hsl: Hsl,
    pub lab: Lab,
    pub locked: bool,
}

impl ColorWithId {
    /// Derive every representation from an HSL color. The HSL value is kept
    /// as given rather than re-derived from the rounded RGB.
    pub fn from_hsl(id: impl Into<String>, hsl: Hsl) -> Self {
        let rgb = hsl_to_rgb(hsl);
        Self {
            id: id.into(),
            rgb,
            hex: rgb_to_hex(rgb),
            hsl,
            lab: rgb_to_lab(rgb),
            locked: false,
        }
    }

    pub fn from_rgb(id: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            id: id.into(),
            rgb,
            hex: rgb_to_hex(rgb),
            hsl: rgb_to_hsl(rgb),
            lab: rgb_to_lab(rgb),
            locked: false,
        }
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }
}
