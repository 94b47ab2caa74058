//! Color representations, conversions between them, and hue arithmetic.

pub mod adjust;
pub mod conversion;
pub mod model;

pub use adjust::{rotate_hue, ColorAdjustment};
pub use conversion::convert;
pub use model::{Color, ColorSpace, ColorWithId, Hsl, Lab, Lch, Rgb};
