//! Domain errors shared across the quotes, chart, and insight modules.

use thiserror::Error;

/// Domain-level validation errors.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Invalid value for a field.
    #[error("Invalid {field}: {message}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// A date range whose start is after its end.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange {
        /// Requested start.
        from: String,
        /// Requested end.
        to: String,
    },
}

impl DomainError {
    /// Shorthand for [`DomainError::InvalidValue`].
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_display() {
        let err = DomainError::invalid("symbol", "cannot be empty");
        assert_eq!(err.to_string(), "Invalid symbol: cannot be empty");
    }

    #[test]
    fn invalid_range_display() {
        let err = DomainError::InvalidRange {
            from: "2024-02-01".to_string(),
            to: "2024-01-01".to_string(),
        };
        assert!(err.to_string().contains("2024-02-01 is after 2024-01-01"));
    }
}
