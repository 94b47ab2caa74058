//! WCAG 2.0 contrast ratio.
//!
//! ```text
//! ratio = (L_lighter + 0.05) / (L_darker + 0.05)
//! ```
//!
//! where L is relative luminance. Ranges from 1 (identical) to 21 (black on
//! white) and is symmetric in its arguments.

use crate::color::conversion::relative_luminance;
use crate::color::model::Rgb;

pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Pairwise contrast ratios for a palette.
///
/// `matrix[bg][fg]` is the ratio of `colors[fg]` text on `colors[bg]`.
pub fn contrast_matrix(colors: &[Rgb]) -> Vec<Vec<f64>> {
    colors
        .iter()
        .map(|&background| {
            colors
                .iter()
                .map(|&foreground| contrast_ratio(background, foreground))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_black_on_white_is_21() {
        assert!((contrast_ratio(Rgb::WHITE, Rgb::BLACK) - 21.0).abs() < EPSILON);
    }

    #[test]
    fn test_identical_colors_have_ratio_one() {
        for c in [Rgb::BLACK, Rgb::WHITE, Rgb::new(26, 115, 232)] {
            assert_eq!(contrast_ratio(c, c), 1.0);
        }
    }

    #[test]
    fn test_ratio_is_symmetric() {
        let a = Rgb::new(26, 115, 232);
        let b = Rgb::new(250, 240, 200);
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn test_matrix_diagonal_and_symmetry() {
        let colors = [Rgb::BLACK, Rgb::new(118, 118, 118), Rgb::WHITE];
        let matrix = contrast_matrix(&colors);
        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert_eq!(matrix[i][i], 1.0);
            for j in 0..3 {
                assert_eq!(matrix[i][j], matrix[j][i]);
            }
        }
        // #767676 is the darkest gray passing AA on white
        assert!(matrix[1][2] >= 4.5);
    }
}
