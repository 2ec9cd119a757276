//! Range checks for [`Settings`](crate::Settings).
//!
//! [`validate_settings`] reports every problem at once instead of stopping
//! at the first, so a hand-edited file can be fixed in one pass.

use sortscope_core::{MAX_SPEED, MIN_ELEMENTS};
use thiserror::Error;

use crate::settings::{MAX_ELEMENTS, Settings};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Array length outside the supported range.
    #[error("element_count {0} out of range [{MIN_ELEMENTS}, {MAX_ELEMENTS}]")]
    ElementCountOutOfRange(usize),

    /// Speed above the 0..=100 scale.
    #[error("speed {0} out of range [0, {MAX_SPEED}]")]
    SpeedOutOfRange(u8),

    /// Pacing bounds given in the wrong order.
    #[error("min_delay_ms {min_ms} exceeds max_delay_ms {max_ms}")]
    DelayBoundsInverted {
        /// Configured lower bound in milliseconds.
        min_ms: u64,
        /// Configured upper bound in milliseconds.
        max_ms: u64,
    },

    /// Multiple validation errors.
    #[error("{}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check every field of `settings`.
///
/// A single problem is returned as itself; several are wrapped in
/// [`ValidationError::Multiple`] in field order.
pub fn validate_settings(settings: &Settings) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if !(MIN_ELEMENTS..=MAX_ELEMENTS).contains(&settings.element_count) {
        errors.push(ValidationError::ElementCountOutOfRange(settings.element_count));
    }
    if settings.speed > MAX_SPEED {
        errors.push(ValidationError::SpeedOutOfRange(settings.speed));
    }
    if settings.min_delay_ms > settings.max_delay_ms {
        errors.push(ValidationError::DelayBoundsInverted {
            min_ms: settings.min_delay_ms,
            max_ms: settings.max_delay_ms,
        });
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
