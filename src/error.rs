//! Error types for settings validation.

use std::fmt;

/// Rejection reasons reported by the settings `validate` methods.
///
/// Probability and fraction fields feed `gen_bool`-style draws, so they are
/// checked up front instead of letting a bad value panic mid-pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A field that must be a fraction lies outside `[0, 1]`.
    FractionOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A field that must be finite is NaN or infinite.
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The data offset bound is negative.
    NegativeDataOffset {
        /// The rejected value.
        value: i32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FractionOutOfRange { field, value } => {
                write!(f, "{field} must lie in [0, 1], got {value}")
            }
            ConfigError::NotFinite { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            ConfigError::NegativeDataOffset { value } => {
                write!(f, "data_maximum_offset must be non-negative, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Check that `value` is a finite fraction in `[0, 1]`.
pub(crate) fn ensure_fraction(field: &'static str, value: f64) -> Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::FractionOutOfRange { field, value })
    }
}

/// Check that `value` is neither NaN nor infinite.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}
