//! Conversions between RGB, Hex, HSL, LAB and LCh.
//!
//! Every function here is pure. RGB↔Hex is exact for 8-bit input; the other
//! round trips are lossy under rounding and only approximately invert.
//!
//! The LAB pair ([`rgb_to_lab`] / [`lab_to_rgb`]) is a luminance-weighted
//! approximation with no XYZ intermediate. Downstream consumers depend on its
//! exact output, so it is kept as is; [`rgb_to_cie_lab`] offers the
//! colorimetric D65 conversion separately.

use palette::FromColor;

use crate::color::adjust::normalize_hue;
use crate::color::model::{Color, ColorSpace, Hsl, Lab, Lch, Rgb};
use crate::error::{ChromaError, Result};

/// Rec. 709 luma weights shared by the luminance and LAB formulas.
const LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Linearization threshold from WCAG 2.0 (not the IEC 0.04045 value).
const WCAG_LINEAR_THRESHOLD: f64 = 0.03928;

/// Scale 8-bit channels into `[0, 1]`.
pub fn normalize(rgb: Rgb) -> [f64; 3] {
    let [r, g, b] = rgb.to_f64();
    [r / 255.0, g / 255.0, b / 255.0]
}

/// Scale `[0, 1]` channels back to 8 bits, rounding to nearest and clamping.
pub fn denormalize(rgb: [f64; 3]) -> Rgb {
    Rgb::from_clamped(rgb[0] * 255.0, rgb[1] * 255.0, rgb[2] * 255.0)
}

/// Format as a lower-case `#rrggbb` string.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Parse a `#rrggbb` or `rrggbb` string (either case).
///
/// # Errors
/// [`ChromaError::InvalidFormat`] when the string without its `#` is not
/// exactly six hexadecimal digits. The error carries the original input.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    let clean = hex.strip_prefix('#').unwrap_or(hex);
    // from_str_radix tolerates a leading '+', so validate digits explicitly
    if clean.len() != 6 || !clean.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ChromaError::invalid_format(hex));
    }
    let channel = |start: usize| {
        u8::from_str_radix(&clean[start..start + 2], 16)
            .map_err(|_| ChromaError::invalid_format(hex))
    };
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Convert RGB to HSL using the max/min/delta formulation.
///
/// Achromatic input (`delta == 0`) yields hue 0 and saturation 0.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let [r, g, b] = normalize(rgb);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let sector = if max == r {
        (g - b) / delta
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl::new(normalize_hue(sector * 60.0), s * 100.0, l * 100.0)
}

/// Convert HSL to RGB.
///
/// Hue is normalized into `[0, 360)` first; saturation and lightness are
/// clamped to `[0, 100]`.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = normalize_hue(hsl.h) / 360.0;
    let s = hsl.s.clamp(0.0, 100.0) / 100.0;
    let l = hsl.l.clamp(0.0, 100.0) / 100.0;

    if s == 0.0 {
        return denormalize([l, l, l]);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    denormalize([
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ])
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t >= 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Approximate LAB from RGB.
///
/// ```text
/// L = (0.2126 R + 0.7152 G + 0.0722 B) / 255 × 100
/// a = (R − G) / 2
/// b = (G − B) / 2
/// ```
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    let [r, g, b] = rgb.to_f64();
    let luma = LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b;
    Lab::new(luma / 255.0 * 100.0, (r - g) / 2.0, (g - b) / 2.0)
}

/// Inverse of [`rgb_to_lab`]'s approximation.
///
/// ```text
/// R = L × 2.55 + a
/// G = L × 2.55 − a / 2
/// B = L × 2.55 − b
/// ```
pub fn lab_to_rgb(lab: Lab) -> Rgb {
    let base = lab.l * 2.55;
    Rgb::from_clamped(base + lab.a, base - lab.a / 2.0, base - lab.b)
}

/// Colorimetric sRGB → CIELAB (D65) through the `palette` crate.
///
/// Unlike [`rgb_to_lab`], this passes through linear light and XYZ and is
/// suitable for perceptual distance queries against reference data.
pub fn rgb_to_cie_lab(rgb: Rgb) -> Lab {
    let srgb: palette::Srgb<f32> = palette::Srgb::<u8>::from(rgb).into_format();
    let lab: palette::Lab = palette::Lab::from_color(srgb);
    Lab::new(lab.l as f64, lab.a as f64, lab.b as f64)
}

pub fn lab_to_lch(lab: Lab) -> Lch {
    let c = (lab.a * lab.a + lab.b * lab.b).sqrt();
    let h = normalize_hue(lab.b.atan2(lab.a).to_degrees());
    Lch::new(lab.l, c, h)
}

pub fn lch_to_lab(lch: Lch) -> Lab {
    let h = lch.h.to_radians();
    Lab::new(lch.l, lch.c * h.cos(), lch.c * h.sin())
}

/// WCAG 2.0 relative luminance in `[0, 1]`.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let [r, g, b] = normalize(rgb).map(linearize);
    LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b
}

fn linearize(channel: f64) -> f64 {
    if channel <= WCAG_LINEAR_THRESHOLD {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a tagged color into `to`.
///
/// RGB is the hub for every pair except LAB↔LCh, which converts directly so
/// no rounding is introduced. Converting a color into its own space returns
/// it unchanged, except Hex which is re-validated and lower-cased.
///
/// # Errors
/// [`ChromaError::InvalidFormat`] when the input is a malformed hex string.
pub fn convert(color: &Color, to: ColorSpace) -> Result<Color> {
    match (color, to) {
        (Color::Lab(lab), ColorSpace::Lch) => return Ok(Color::Lch(lab_to_lch(*lab))),
        (Color::Lch(lch), ColorSpace::Lab) => return Ok(Color::Lab(lch_to_lab(*lch))),
        (Color::Hex(_), _) => {}
        (c, to) if c.space() == to => return Ok(color.clone()),
        _ => {}
    }

    let rgb = match color {
        Color::Rgb(rgb) => *rgb,
        Color::Hex(hex) => hex_to_rgb(hex)?,
        Color::Hsl(hsl) => hsl_to_rgb(*hsl),
        Color::Lab(lab) => lab_to_rgb(*lab),
        Color::Lch(lch) => lab_to_rgb(lch_to_lab(*lch)),
    };

    Ok(match to {
        ColorSpace::Rgb => Color::Rgb(rgb),
        ColorSpace::Hex => Color::Hex(rgb_to_hex(rgb)),
        ColorSpace::Hsl => Color::Hsl(rgb_to_hsl(rgb)),
        ColorSpace::Lab => Color::Lab(rgb_to_lab(rgb)),
        ColorSpace::Lch => Color::Lch(lab_to_lch(rgb_to_lab(rgb))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_hex_parses_with_and_without_hash() {
        assert_eq!(hex_to_rgb("#1A73E8").unwrap(), Rgb::new(26, 115, 232));
        assert_eq!(hex_to_rgb("1a73e8").unwrap(), Rgb::new(26, 115, 232));
    }

    #[test]
    fn test_hex_rejects_malformed_input() {
        for bad in ["#ZZZZZZ", "#12345", "#1234567", "", "#", "+1+2+3", "#12 456", "#ééé"] {
            match hex_to_rgb(bad) {
                Err(ChromaError::InvalidFormat { input }) => assert_eq!(input, bad),
                other => panic!("expected InvalidFormat for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_hex_round_trip_is_exact() {
        for r in (0..=255u8).step_by(17) {
            for g in (0..=255u8).step_by(51) {
                for b in [0u8, 1, 128, 254, 255] {
                    let rgb = Rgb::new(r, g, b);
                    assert_eq!(hex_to_rgb(&rgb_to_hex(rgb)).unwrap(), rgb);
                }
            }
        }
    }

    #[test]
    fn test_rgb_to_hsl_primaries() {
        assert_eq!(rgb_to_hsl(Rgb::new(255, 0, 0)), Hsl::new(0.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(Rgb::new(0, 255, 0)), Hsl::new(120.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(Rgb::new(0, 0, 255)), Hsl::new(240.0, 100.0, 50.0));
    }

    #[test]
    fn test_rgb_to_hsl_achromatic_has_zero_hue_and_saturation() {
        let hsl = rgb_to_hsl(Rgb::new(128, 128, 128));
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert!((hsl.l - 50.196).abs() < 1e-3);
    }

    #[test]
    fn test_rgb_to_hsl_wraps_magenta_side_hue() {
        // max == r with g < b lands in the negative sector
        let hsl = rgb_to_hsl(Rgb::new(255, 0, 128));
        assert!(hsl.h > 329.0 && hsl.h < 331.0, "hue was {}", hsl.h);
    }

    #[test]
    fn test_hsl_to_rgb_normalizes_out_of_range_hue() {
        let base = hsl_to_rgb(Hsl::new(30.0, 80.0, 40.0));
        assert_eq!(hsl_to_rgb(Hsl::new(390.0, 80.0, 40.0)), base);
        assert_eq!(hsl_to_rgb(Hsl::new(-330.0, 80.0, 40.0)), base);
    }

    #[test]
    fn test_hsl_to_rgb_clamps_saturation_and_lightness() {
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 150.0, 50.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 50.0, 120.0)), Rgb::WHITE);
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, -5.0, 0.0)), Rgb::BLACK);
    }

    #[test]
    fn test_hsl_round_trip_within_one_unit() {
        for h in (0..360).step_by(15) {
            for s in [60.0, 90.0] {
                for l in [40.0, 50.0, 60.0] {
                    let hsl = Hsl::new(h as f64, s, l);
                    let back = rgb_to_hsl(hsl_to_rgb(hsl));
                    let dh = (back.h - hsl.h).abs();
                    let dh = dh.min(360.0 - dh);
                    assert!(dh <= 1.0, "hue drift {dh} for {hsl:?}");
                    assert!((back.s - s).abs() <= 1.0, "sat drift for {hsl:?}: {back:?}");
                    assert!((back.l - l).abs() <= 1.0, "light drift for {hsl:?}: {back:?}");
                }
            }
        }
    }

    #[test]
    fn test_simplified_lab_formula() {
        let lab = rgb_to_lab(Rgb::new(255, 255, 255));
        assert!((lab.l - 100.0).abs() < EPSILON);
        assert_eq!((lab.a, lab.b), (0.0, 0.0));

        let lab = rgb_to_lab(Rgb::new(200, 100, 50));
        assert_eq!((lab.a, lab.b), (50.0, 25.0));
    }

    #[test]
    fn test_lab_to_rgb_inverts_grays() {
        for v in [0u8, 64, 128, 200, 255] {
            let gray = Rgb::new(v, v, v);
            assert_eq!(lab_to_rgb(rgb_to_lab(gray)), gray);
        }
    }

    #[test]
    fn test_cie_lab_of_white_and_black() {
        let white = rgb_to_cie_lab(Rgb::WHITE);
        assert!((white.l - 100.0).abs() < 0.05);
        assert!(white.a.abs() < 0.05 && white.b.abs() < 0.05);
        assert!(rgb_to_cie_lab(Rgb::BLACK).l.abs() < 0.05);
    }

    #[test]
    fn test_lch_round_trip() {
        let lab = Lab::new(60.0, -20.0, 35.0);
        let lch = lab_to_lch(lab);
        assert!(lch.h >= 0.0 && lch.h < 360.0);
        let back = lch_to_lab(lch);
        assert!((back.a - lab.a).abs() < 1e-9);
        assert!((back.b - lab.b).abs() < 1e-9);
    }

    #[test]
    fn test_lch_negative_angle_is_wrapped() {
        let lch = lab_to_lch(Lab::new(50.0, 10.0, -10.0));
        assert!((lch.h - 315.0).abs() < 1e-9);
        assert!((lch.c - 200.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_relative_luminance_extremes() {
        assert!((relative_luminance(Rgb::WHITE) - 1.0).abs() < EPSILON);
        assert_eq!(relative_luminance(Rgb::BLACK), 0.0);
    }

    #[test]
    fn test_convert_between_spaces() {
        let red = Color::Rgb(Rgb::new(255, 0, 0));
        assert_eq!(convert(&red, ColorSpace::Hex).unwrap(), Color::Hex("#ff0000".into()));
        assert_eq!(
            convert(&Color::Hex("#FF0000".into()), ColorSpace::Hsl).unwrap(),
            Color::Hsl(Hsl::new(0.0, 100.0, 50.0))
        );
        assert_eq!(
            convert(&Color::Hex("#FF0000".into()), ColorSpace::Hex).unwrap(),
            Color::Hex("#ff0000".into())
        );
        assert!(convert(&Color::Hex("nope".into()), ColorSpace::Rgb).is_err());
    }

    #[test]
    fn test_convert_lab_lch_directly() {
        let lab = Lab::new(42.0, 12.5, -7.25);
        let Color::Lch(lch) = convert(&Color::Lab(lab), ColorSpace::Lch).unwrap() else {
            panic!("expected LCh");
        };
        let Color::Lab(back) = convert(&Color::Lch(lch), ColorSpace::Lab).unwrap() else {
            panic!("expected LAB");
        };
        assert!((back.a - lab.a).abs() < 1e-9 && (back.b - lab.b).abs() < 1e-9);
    }
}
