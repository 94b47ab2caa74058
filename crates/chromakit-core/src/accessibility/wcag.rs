//! WCAG 2.0 compliance levels for text contrast.
//!
//! | Level | Normal text | Large text |
//! |-------|-------------|------------|
//! | AA    | 4.5         | 3.0        |
//! | AAA   | 7.0         | 4.5        |
//!
//! Large text is 18pt and up, or 14pt bold and up.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::accessibility::contrast::contrast_ratio;
use crate::color::model::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aa => f.write_str("AA"),
            Self::Aaa => f.write_str("AAA"),
        }
    }
}

/// Minimum ratios for one level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextThresholds {
    pub normal: f64,
    pub large: f64,
}

/// Minimum contrast ratios per level and text size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WcagThresholds {
    pub aa: TextThresholds,
    pub aaa: TextThresholds,
}

impl WcagThresholds {
    /// The thresholds published in WCAG 2.0.
    pub const WCAG_2_0: Self = Self {
        aa: TextThresholds {
            normal: 4.5,
            large: 3.0,
        },
        aaa: TextThresholds {
            normal: 7.0,
            large: 4.5,
        },
    };

    pub fn required(&self, level: WcagLevel, is_large: bool) -> f64 {
        let thresholds = match level {
            WcagLevel::Aa => &self.aa,
            WcagLevel::Aaa => &self.aaa,
        };
        if is_large { thresholds.large } else { thresholds.normal }
    }

    pub fn meets_level(&self, ratio: f64, level: WcagLevel, is_large: bool) -> bool {
        ratio >= self.required(level, is_large)
    }

    /// Highest level `ratio` satisfies, or `None` if it fails AA.
    pub fn highest_level(&self, ratio: f64, is_large: bool) -> Option<WcagLevel> {
        [WcagLevel::Aaa, WcagLevel::Aa]
            .into_iter()
            .find(|level| self.meets_level(ratio, *level, is_large))
    }
}

impl Default for WcagThresholds {
    fn default() -> Self {
        Self::WCAG_2_0
    }
}

/// Whether `ratio` satisfies `level` under the WCAG 2.0 thresholds.
pub fn meets_level(ratio: f64, level: WcagLevel, is_large: bool) -> bool {
    WcagThresholds::WCAG_2_0.meets_level(ratio, level, is_large)
}

/// Highest WCAG 2.0 level a color pair achieves, or `None`.
pub fn highest_compliance_level(a: Rgb, b: Rgb, is_large: bool) -> Option<WcagLevel> {
    WcagThresholds::WCAG_2_0.highest_level(contrast_ratio(a, b), is_large)
}

/// Alias of [`highest_compliance_level`].
pub fn wcag_level(a: Rgb, b: Rgb, is_large: bool) -> Option<WcagLevel> {
    highest_compliance_level(a, b, is_large)
}

/// Contrast summary for one text/background pairing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastReport {
    pub ratio: f64,
    pub normal_text: Option<WcagLevel>,
    pub large_text: Option<WcagLevel>,
}

impl ContrastReport {
    pub fn new(foreground: Rgb, background: Rgb) -> Self {
        let ratio = contrast_ratio(foreground, background);
        let thresholds = WcagThresholds::WCAG_2_0;
        Self {
            ratio,
            normal_text: thresholds.highest_level(ratio, false),
            large_text: thresholds.highest_level(ratio, true),
        }
    }

    pub fn passes(&self, level: WcagLevel, is_large: bool) -> bool {
        meets_level(self.ratio, level, is_large)
    }
}
