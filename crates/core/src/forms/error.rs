//! Form validation errors.

use thiserror::Error;

/// Why a submission's fields were rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A required field is absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A date field is not `YYYY-MM-DD`.
    #[error("invalid date in field {0}: expected YYYY-MM-DD")]
    InvalidDate(&'static str),

    /// One or more fields failed validation (e.g. malformed e-mail).
    #[error("invalid fields: {}", .0.join(", "))]
    Invalid(Vec<String>),
}

impl From<validator::ValidationErrors> for FormError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(ToString::to_string)
            .collect();
        fields.sort();
        Self::Invalid(fields)
    }
}
