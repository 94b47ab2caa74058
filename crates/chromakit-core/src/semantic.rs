//! Semantic palette generation from descriptive terms.
//!
//! A fixed table binds words like "calm" or "earthy" to hue, saturation and
//! lightness ranges. Several terms combine by narrowing: the first match is
//! adopted, later matches replace the hue range only when strictly narrower
//! and intersect saturation and lightness. A seed is sampled from the result
//! and expanded with the harmony the terms suggest.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::adjust::normalize_hue;
use crate::color::model::Hsl;
use crate::harmony::palette::generate_harmony;
use crate::harmony::rules::{HarmonyAngles, HarmonyType};

/// Hue interval in degrees. `start > end` means the interval crosses 0°.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HueRange {
    pub start: f64,
    pub end: f64,
}

impl HueRange {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn wraps(&self) -> bool {
        self.start > self.end
    }

    /// Angular width, accounting for wraparound.
    pub fn span(&self) -> f64 {
        if self.wraps() {
            360.0 - self.start + self.end
        } else {
            self.end - self.start
        }
    }
}

/// Closed numeric interval for saturation or lightness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(self.min.max(other.min), self.max.min(other.max))
    }
}

/// HSL ranges bound to a descriptive term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemanticMapping {
    pub hue_range: HueRange,
    pub saturation_range: ValueRange,
    pub lightness_range: ValueRange,
}

impl SemanticMapping {
    pub const fn new(hue: (f64, f64), saturation: (f64, f64), lightness: (f64, f64)) -> Self {
        Self {
            hue_range: HueRange::new(hue.0, hue.1),
            saturation_range: ValueRange::new(saturation.0, saturation.1),
            lightness_range: ValueRange::new(lightness.0, lightness.1),
        }
    }
}

impl Default for SemanticMapping {
    /// Any hue, moderately to fully saturated, mid lightness.
    fn default() -> Self {
        DEFAULT_MAPPING
    }
}

const DEFAULT_MAPPING: SemanticMapping = SemanticMapping::new((0.0, 360.0), (50.0, 100.0), (40.0, 60.0));

/// Replacement when combined saturation ranges no longer overlap.
const FALLBACK_SATURATION: ValueRange = ValueRange::new(50.0, 70.0);
/// Replacement when combined lightness ranges no longer overlap.
const FALLBACK_LIGHTNESS: ValueRange = ValueRange::new(40.0, 60.0);

const BUILTIN_MAPPINGS: &[(&str, SemanticMapping)] = &[
    // Mood
    ("calm", SemanticMapping::new((180.0, 240.0), (30.0, 60.0), (50.0, 70.0))),
    ("energetic", SemanticMapping::new((0.0, 60.0), (80.0, 100.0), (50.0, 65.0))),
    ("professional", SemanticMapping::new((200.0, 240.0), (30.0, 70.0), (40.0, 60.0))),
    // Style
    ("vintage", SemanticMapping::new((20.0, 40.0), (20.0, 50.0), (40.0, 60.0))),
    ("minimalist", SemanticMapping::new((0.0, 360.0), (0.0, 30.0), (40.0, 95.0))),
    // Feel
    ("warm", SemanticMapping::new((0.0, 60.0), (50.0, 100.0), (40.0, 70.0))),
    ("cool", SemanticMapping::new((180.0, 270.0), (40.0, 80.0), (40.0, 70.0))),
    ("vibrant", SemanticMapping::new((0.0, 360.0), (80.0, 100.0), (45.0, 65.0))),
    ("muted", SemanticMapping::new((0.0, 360.0), (20.0, 50.0), (40.0, 70.0))),
    ("dark", SemanticMapping::new((0.0, 360.0), (40.0, 80.0), (15.0, 35.0))),
    ("light", SemanticMapping::new((0.0, 360.0), (20.0, 60.0), (70.0, 95.0))),
    ("earthy", SemanticMapping::new((20.0, 150.0), (20.0, 60.0), (30.0, 60.0))),
    ("sophisticated", SemanticMapping::new((270.0, 330.0), (30.0, 50.0), (20.0, 50.0))),
];

const BUILTIN_HARMONIES: &[(&str, HarmonyType)] = &[
    ("energetic", HarmonyType::Complementary),
    ("vibrant", HarmonyType::Triadic),
    ("balanced", HarmonyType::Tetradic),
    ("calm", HarmonyType::Analogous),
    ("minimalist", HarmonyType::Monochromatic),
    ("sophisticated", HarmonyType::SplitComplementary),
];

/// Read-only lookup tables from terms to ranges and harmonies.
///
/// Lookups trim surrounding whitespace and ignore ASCII case.
#[derive(Debug, Clone, Copy)]
pub struct SemanticTable {
    mappings: &'static [(&'static str, SemanticMapping)],
    harmonies: &'static [(&'static str, HarmonyType)],
}

impl SemanticTable {
    pub const fn new(
        mappings: &'static [(&'static str, SemanticMapping)],
        harmonies: &'static [(&'static str, HarmonyType)],
    ) -> Self {
        Self {
            mappings,
            harmonies,
        }
    }

    /// The thirteen built-in descriptors and their harmony hints.
    pub const fn builtin() -> Self {
        Self::new(BUILTIN_MAPPINGS, BUILTIN_HARMONIES)
    }

    pub fn mapping(&self, term: &str) -> Option<&SemanticMapping> {
        let term = term.trim();
        self.mappings
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(term))
            .map(|(_, mapping)| mapping)
    }

    pub fn harmony(&self, term: &str) -> Option<HarmonyType> {
        let term = term.trim();
        self.harmonies
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(term))
            .map(|(_, harmony)| *harmony)
    }

    /// Every term with a range mapping, in table order.
    pub fn terms(&self) -> impl Iterator<Item = &'static str> {
        self.mappings.iter().map(|(name, _)| *name)
    }
}

impl Default for SemanticTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Turns descriptive terms into palettes using an injected [`SemanticTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticMapper {
    table: SemanticTable,
    angles: HarmonyAngles,
}

impl SemanticMapper {
    pub fn new(table: SemanticTable) -> Self {
        Self {
            table,
            angles: HarmonyAngles::default(),
        }
    }

    pub fn with_angles(mut self, angles: HarmonyAngles) -> Self {
        self.angles = angles;
        self
    }

    pub fn table(&self) -> &SemanticTable {
        &self.table
    }

    /// Merge the mappings of all recognized terms in input order.
    ///
    /// Unrecognized terms are ignored. With no recognized term at all the
    /// default mapping is returned.
    pub fn combine<S: AsRef<str>>(&self, terms: &[S]) -> SemanticMapping {
        let mut combined: Option<SemanticMapping> = None;

        for term in terms {
            let Some(mapping) = self.table.mapping(term.as_ref()) else {
                tracing::trace!("ignoring unrecognized semantic term {:?}", term.as_ref());
                continue;
            };
            combined = Some(match combined {
                None => *mapping,
                Some(current) => narrow(current, mapping),
            });
        }

        let Some(mut combined) = combined else {
            return SemanticMapping::default();
        };

        if !combined.saturation_range.is_valid() {
            combined.saturation_range = FALLBACK_SATURATION;
        }
        if !combined.lightness_range.is_valid() {
            combined.lightness_range = FALLBACK_LIGHTNESS;
        }
        tracing::debug!(?combined, "combined semantic mapping");
        combined
    }

    /// Harmony hinted by the first term that has one; analogous otherwise.
    pub fn harmony_for<S: AsRef<str>>(&self, terms: &[S]) -> HarmonyType {
        terms
            .iter()
            .find_map(|term| self.table.harmony(term.as_ref()))
            .unwrap_or(HarmonyType::Analogous)
    }

    /// Build a `size`-color palette from `terms`.
    ///
    /// Combines the mappings, samples one seed color, picks the harmony and
    /// delegates to [`generate_harmony`].
    pub fn palette<S: AsRef<str>, R: Rng + ?Sized>(
        &self,
        terms: &[S],
        size: usize,
        rng: &mut R,
    ) -> Vec<Hsl> {
        let mapping = self.combine(terms);
        let seed = color_from_mapping(&mapping, rng);
        let harmony = self.harmony_for(terms);
        tracing::debug!(?seed, %harmony, size, "generating semantic palette");
        generate_harmony(seed, Some(harmony), size, &self.angles)
    }
}

fn narrow(current: SemanticMapping, next: &SemanticMapping) -> SemanticMapping {
    let hue_range = if next.hue_range.span() < current.hue_range.span() {
        next.hue_range
    } else {
        current.hue_range
    };
    SemanticMapping {
        hue_range,
        saturation_range: current.saturation_range.intersect(&next.saturation_range),
        lightness_range: current.lightness_range.intersect(&next.lightness_range),
    }
}

/// Sample a color uniformly within `mapping`, rounded to whole units.
///
/// Wraparound hue ranges are sampled over their full span and wrapped.
pub fn color_from_mapping<R: Rng + ?Sized>(mapping: &SemanticMapping, rng: &mut R) -> Hsl {
    let HueRange { start, end } = mapping.hue_range;
    let hue = if mapping.hue_range.wraps() {
        (start + rng.r#gen::<f64>() * mapping.hue_range.span()) % 360.0
    } else {
        start + rng.r#gen::<f64>() * (end - start)
    };
    let saturation = sample(&mapping.saturation_range, rng);
    let lightness = sample(&mapping.lightness_range, rng);

    // a hue that rounds up to 360 is the same as 0
    Hsl::new(normalize_hue(hue.round()), saturation.round(), lightness.round())
}

fn sample<R: Rng + ?Sized>(range: &ValueRange, rng: &mut R) -> f64 {
    range.min + rng.r#gen::<f64>() * (range.max - range.min)
}

/// Palette from descriptive terms using the built-in table.
pub fn generate_palette_from_semantics<S: AsRef<str>, R: Rng + ?Sized>(
    terms: &[S],
    count: usize,
    rng: &mut R,
) -> Vec<Hsl> {
    SemanticMapper::new(SemanticTable::builtin()).palette(terms, count, rng)
}
