//! Core error types for querykit.
//!
//! This module provides the [`QueryKitError`] enum shared by every crate in
//! the workspace. Capability gaps in a dialect are never errors (they are
//! resolved by rendering an emulation); everything listed here is either a
//! programming error in how an expression was assembled or a configuration
//! problem, and none of them are transient.

use thiserror::Error;

/// The primary error type for querykit.
///
/// Variants are grouped by the layer that raises them. Expression-building
/// errors carry the node kind or operator involved so that the faulty call
/// site can be located from the message alone.
#[derive(Error, Debug)]
pub enum QueryKitError {
    // ── Expression building ──────────────────────────────────────────

    /// A window frame was given an end bound that precedes its start bound.
    #[error("Invalid window frame: {start} .. {end}: {reason}")]
    InvalidFrameBound {
        /// The rendered start bound.
        start: String,
        /// The rendered end bound.
        end: String,
        /// Why the combination is rejected.
        reason: String,
    },

    /// An expression was asked to become something it cannot represent,
    /// for example a grouping column built from an aggregate.
    #[error("Unsupported conversion: cannot use {kind} expression for {operation}")]
    UnsupportedConversion {
        /// The expression kind (e.g. "Integer", "aggregate COUNT").
        kind: String,
        /// The requested operation (e.g. "mode_strict", "expression column").
        operation: String,
    },

    /// A canonical text form (period, point) could not be parsed.
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    // ── Configuration ────────────────────────────────────────────────

    /// The configured dialect name is not known.
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl QueryKitError {
    /// Builds an [`InvalidFrameBound`](Self::InvalidFrameBound) error.
    pub fn invalid_frame(
        start: impl Into<String>,
        end: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidFrameBound {
            start: start.into(),
            end: end.into(),
            reason: reason.into(),
        }
    }

    /// Builds an [`UnsupportedConversion`](Self::UnsupportedConversion) error.
    pub fn unsupported(kind: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::UnsupportedConversion {
            kind: kind.into(),
            operation: operation.into(),
        }
    }

    /// Returns `true` for errors caused by how an expression was assembled,
    /// as opposed to configuration or I/O problems.
    pub const fn is_programming_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFrameBound { .. }
                | Self::UnsupportedConversion { .. }
                | Self::InvalidLiteral(_)
        )
    }
}

/// A convenience type alias for `Result<T, QueryKitError>`.
pub type QueryKitResult<T> = Result<T, QueryKitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_frame_display() {
        let err = QueryKitError::invalid_frame(
            "2 PRECEDING",
            "5 PRECEDING",
            "end offset must not exceed start offset",
        );
        assert_eq!(
            err.to_string(),
            "Invalid window frame: 2 PRECEDING .. 5 PRECEDING: end offset must not exceed start offset"
        );
    }

    #[test]
    fn test_unsupported_conversion_display() {
        let err = QueryKitError::unsupported("aggregate COUNT", "mode_strict");
        assert_eq!(
            err.to_string(),
            "Unsupported conversion: cannot use aggregate COUNT expression for mode_strict"
        );
    }

    #[test]
    fn test_programming_error_classification() {
        assert!(QueryKitError::invalid_frame("a", "b", "c").is_programming_error());
        assert!(QueryKitError::unsupported("k", "op").is_programming_error());
        assert!(QueryKitError::InvalidLiteral("P1X".into()).is_programming_error());
        assert!(!QueryKitError::UnknownDialect("oracle".into()).is_programming_error());
        assert!(!QueryKitError::ConfigurationError("x".into()).is_programming_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: QueryKitError = io_err.into();
        assert!(err.to_string().contains("file missing"));
        assert!(!err.is_programming_error());
    }
}
