//! Error types shared by the ledger and the solar model.

use thiserror::Error;

/// Domain violation raised when a calculator input falls outside its range.
///
/// Every constructor in the crate rejects bad values instead of clamping them;
/// the caller decides how to report the problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A numeric or textual input is outside its documented domain.
    #[error("invalid input for `{field}`: {message}")]
    InvalidInput {
        /// Name of the offending parameter.
        field: &'static str,
        /// Human-readable constraint description.
        message: String,
    },
}

impl CalcError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Returns the name of the parameter that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidInput { field, .. } => field,
        }
    }
}

/// Checks that `value` is finite and inside `[min, max]`.
pub(crate) fn ensure_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, CalcError> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, "must be a finite number"));
    }
    if value < min || value > max {
        return Err(CalcError::invalid(
            field,
            format!("must be in [{min}, {max}], got {value}"),
        ));
    }
    Ok(value)
}
