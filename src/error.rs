// Sanin - Anomaly injection engine
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Error types for anomaly injection
//!
//! Every failure is detected before the output series is built, so an error
//! never comes with a partially injected result.

use thiserror::Error;

/// Result type alias for injection operations
pub type Result<T> = std::result::Result<T, InjectError>;

/// Main error type for injection operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InjectError {
    /// The input series has no points
    #[error("Empty input: series has zero length")]
    EmptyInput,

    /// The input series violates the time series invariants
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    /// A parameter value is out of range or not applicable
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A parameter name is not recognized at all
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// An anomaly kind identifier could not be parsed
    #[error("Unknown anomaly kind: {0}")]
    UnknownKind(String),

    /// The series is too short for the requested kind
    #[error("Series too short for {kind}: length {len}, need at least {min}")]
    SeriesTooShort {
        kind: String,
        len: usize,
        min: usize,
    },

    /// Region selection produced a range outside the series (internal defect)
    #[error("Window out of bounds: [{start}, {end}) on series of length {len}")]
    WindowOutOfBounds { start: usize, end: usize, len: usize },

    /// Malformed JSON for overrides or config
    #[error("JSON error: {0}")]
    Json(String),
}

impl InjectError {
    /// Build an `InvalidParameter` error.
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        InjectError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error belongs to the invalid-parameter class.
    ///
    /// Unknown parameter names and unknown kinds are reported separately
    /// but are bad caller input all the same.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            InjectError::InvalidParameter { .. }
                | InjectError::UnknownParameter(_)
                | InjectError::UnknownKind(_)
        )
    }
}

impl From<serde_json::Error> for InjectError {
    fn from(err: serde_json::Error) -> Self {
        // serde reports rejected keys through a message, not a variant
        let msg = err.to_string();
        if let Some(rest) = msg.strip_prefix("unknown field `") {
            if let Some(end) = rest.find('`') {
                return InjectError::UnknownParameter(rest[..end].to_string());
            }
        }
        InjectError::Json(msg)
    }
}
