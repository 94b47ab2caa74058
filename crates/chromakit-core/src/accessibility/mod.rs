//! Accessibility checks: WCAG contrast and color-vision simulation.

pub mod color_blind;
pub mod contrast;
pub mod wcag;

pub use color_blind::{ColorBlindness, simulate_color_blindness, simulate_palette};
pub use contrast::{contrast_matrix, contrast_ratio};
pub use wcag::{ContrastReport, WcagLevel, WcagThresholds, highest_compliance_level, meets_level, wcag_level};
