//! Perceptual color difference (CIEDE2000).
//!
//! # Reference
//! - Sharma, Wu, Dalal (2005), "The CIEDE2000 Color-Difference Formula:
//!   Implementation Notes, Supplementary Test Data, and Mathematical
//!   Observations"
//!
//! ```text
//! ΔE00 = sqrt( (ΔL'/SL)² + (ΔC'/SC)² + (ΔH'/SH)² + RT·(ΔC'/SC)·(ΔH'/SH) )
//! ```
//!
//! The parametric weights kL, kC and kH are all 1.

use crate::color::model::Lab;

/// 25⁷, the chroma pivot shared by the G factor and RC.
const POW25_7: f64 = 6_103_515_625.0;

/// CIEDE2000 difference between two LAB colors.
///
/// Symmetric, non-negative, and zero for identical inputs.
pub fn delta_e_2000(lab1: Lab, lab2: Lab) -> f64 {
    let Lab { l: l1, a: a1, b: b1 } = lab1;
    let Lab { l: l2, a: a2, b: b2 } = lab2;

    // Low-chroma compensation applied to a*
    let c1 = a1.hypot(b1);
    let c2 = a2.hypot(b2);
    let mean_c7 = ((c1 + c2) / 2.0).powi(7);
    let g = 0.5 * (1.0 - (mean_c7 / (mean_c7 + POW25_7)).sqrt());

    let ap1 = (1.0 + g) * a1;
    let ap2 = (1.0 + g) * a2;

    let cp1 = ap1.hypot(b1);
    let cp2 = ap2.hypot(b2);
    let hp1 = hue_degrees(b1, ap1);
    let hp2 = hue_degrees(b2, ap2);

    let delta_l = l2 - l1;
    let delta_cp = cp2 - cp1;

    let mut delta_hp = hp2 - hp1;
    if delta_hp.abs() > 180.0 {
        if hp2 <= hp1 {
            delta_hp += 360.0;
        } else {
            delta_hp -= 360.0;
        }
    }
    let delta_big_hp = 2.0 * (cp1 * cp2).sqrt() * (delta_hp.to_radians() / 2.0).sin();

    let mean_l = (l1 + l2) / 2.0;
    let mean_cp = (cp1 + cp2) / 2.0;
    let mut mean_hp = (hp1 + hp2) / 2.0;
    if (hp1 - hp2).abs() > 180.0 {
        if hp1 + hp2 < 360.0 {
            mean_hp += 180.0;
        } else {
            mean_hp -= 180.0;
        }
    }

    let t = 1.0 - 0.17 * cos_deg(mean_hp - 30.0)
        + 0.24 * cos_deg(2.0 * mean_hp)
        + 0.32 * cos_deg(3.0 * mean_hp + 6.0)
        - 0.20 * cos_deg(4.0 * mean_hp - 63.0);

    let mean_cp7 = mean_cp.powi(7);
    let rc = (mean_cp7 / (mean_cp7 + POW25_7)).sqrt();

    let l_offset = (mean_l - 50.0).powi(2);
    let sl = 1.0 + (0.015 * l_offset) / (20.0 + l_offset).sqrt();
    let sc = 1.0 + 0.045 * mean_cp;
    let sh = 1.0 + 0.015 * mean_cp * t;

    let rotation = 60.0 * (-((mean_hp - 275.0) / 25.0).powi(2)).exp();
    let rt = -2.0 * rc * rotation.to_radians().sin();

    let term_l = delta_l / sl;
    let term_c = delta_cp / sc;
    let term_h = delta_big_hp / sh;

    // The RT cross term can drive the sum a hair below zero for near-identical inputs
    (term_l * term_l + term_c * term_c + term_h * term_h + rt * term_c * term_h)
        .max(0.0)
        .sqrt()
}

fn hue_degrees(b: f64, a: f64) -> f64 {
    let h = b.atan2(a).to_degrees();
    if h < 0.0 { h + 360.0 } else { h }
}

fn cos_deg(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Find the candidate perceptually closest to `target`.
///
/// Returns the index and distance of the best match, or `None` when
/// `candidates` is empty. Ties resolve to the earliest candidate.
pub fn closest_match(target: Lab, candidates: &[Lab]) -> Option<(usize, f64)> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| (i, delta_e_2000(target, *candidate)))
        .fold(None, |best, (i, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((i, d)),
        })
}
