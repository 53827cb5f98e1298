//! Error types shared by the pipeline.
//!
//! Only top-level input problems are errors. Per-line and per-edge anomalies
//! are absorbed where they occur and show up in the returned stats instead.

use std::fmt;
use std::str::Utf8Error;

/// Which pipeline argument an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Outline,
    Annotations,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outline => f.write_str("outline"),
            Self::Annotations => f.write_str("annotations"),
        }
    }
}

/// Error returned when a pipeline argument is missing or not text.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The argument was not supplied at all.
    #[error("missing {input} text")]
    MissingInput { input: InputKind },

    /// The argument was supplied as bytes that do not decode as UTF-8.
    #[error("{input} is not valid UTF-8 text: {source}")]
    NotText {
        input: InputKind,
        #[source]
        source: Utf8Error,
    },
}

impl ParseError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => "E_MISSING_INPUT",
            Self::NotText { .. } => "E_NOT_TEXT",
        }
    }

    /// The argument that failed.
    #[must_use]
    pub fn input(&self) -> InputKind {
        match self {
            Self::MissingInput { input } | Self::NotText { input, .. } => *input,
        }
    }
}

/// Decode raw bytes as UTF-8 text for the given pipeline argument.
///
/// # Errors
///
/// Returns [`ParseError::NotText`] if the bytes are not valid UTF-8.
pub fn decode_text(input: InputKind, bytes: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(bytes).map_err(|source| ParseError::NotText { input, source })
}

/// Error returned by [`crate::LayoutConfig::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A size or factor must be a finite number greater than zero.
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// A gap factor must be a finite number no smaller than zero.
    #[error("{field} must be a non-negative finite number, got {value}")]
    Negative { field: &'static str, value: f64 },

    /// The vertical spacing clamp has its bounds reversed.
    #[error("min_vertical_spacing ({min}) exceeds max_vertical_spacing ({max})")]
    InvertedRange { min: f64, max: f64 },

    /// A ratio must lie in `[0, 1)`.
    #[error("{field} must be in [0, 1), got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },
}
