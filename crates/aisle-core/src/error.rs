//! # Validation Errors
//!
//! Errors raised before any network call is made. A `ValidationError` is
//! always caught at the form boundary and surfaced as a page-local message;
//! it never reaches the remote services.

use thiserror::Error;

/// Input validation failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Password and confirmation differ on sign-up.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// A required field was left empty.
    #[error("{field} must not be empty")]
    EmptyField {
        /// The field name as shown to the user.
        field: String,
    },

    /// A monetary amount was negative.
    #[error("{field} must be a non-negative amount, got {value}")]
    NegativeAmount {
        /// The field name as shown to the user.
        field: String,
        /// The offending value.
        value: f64,
    },

    /// A field failed a format or range check.
    #[error("invalid {field}: {detail}")]
    InvalidField {
        /// The field name.
        field: String,
        /// What was wrong with it.
        detail: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_mismatch_message_is_exact() {
        // The page renders this string verbatim.
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }

    #[test]
    fn negative_amount_names_the_field() {
        let err = ValidationError::NegativeAmount {
            field: "allocated".to_string(),
            value: -3.5,
        };
        assert!(err.to_string().contains("allocated"));
        assert!(err.to_string().contains("-3.5"));
    }
}
