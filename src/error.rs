//! Error type shared by the projection engine and plan loading

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectionError {
    /// Input rejected before any iteration was attempted
    #[error("invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Arithmetic produced a non-finite value
    #[error("computation failed: {0}")]
    Computation(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProjectionError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ProjectionError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's inputs rather than the engine
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ProjectionError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Reject NaN/infinite values produced mid-computation
pub(crate) fn ensure_finite(label: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProjectionError::Computation(format!("{} is not finite ({})", label, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = ProjectionError::invalid("horizon_months", "must be at least 1");
        assert!(err.is_invalid_input());
        assert_eq!(
            err.to_string(),
            "invalid input for `horizon_months`: must be at least 1"
        );
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("balance", 12.5).unwrap(), 12.5);

        let err = ensure_finite("balance", f64::NAN).unwrap_err();
        assert!(matches!(err, ProjectionError::Computation(_)));
        assert!(!err.is_invalid_input());
        assert!(ensure_finite("balance", f64::INFINITY).is_err());
    }
}
