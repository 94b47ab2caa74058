//! Error taxonomy for the engine.
//!
//! Only malformed textual input is surfaced as an error. Out-of-range
//! channels are clamped and degenerate inputs (empty pixel lists, unknown
//! semantic terms) fall back to documented defaults instead.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChromaError>;

#[derive(Debug, thiserror::Error)]
pub enum ChromaError {
    /// A hex color string was not six hexadecimal digits.
    #[error("invalid hex color: {input:?}")]
    InvalidFormat { input: String },
    /// A caller-supplied buffer or dimension did not describe valid data.
    #[error("invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: &'static str, value: String },
    /// A harmony name did not match any known harmony rule.
    #[error("unknown harmony type: {0:?}")]
    UnknownHarmony(String),
    #[error("invalid engine configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl ChromaError {
    pub(crate) fn invalid_format(input: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
        }
    }

    pub(crate) fn invalid_parameter(parameter: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter,
            value: value.to_string(),
        }
    }
}
