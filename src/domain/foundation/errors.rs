//! Error vocabulary shared by every layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// A value object rejected its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        }
    }
}

/// Machine-readable error codes, as returned to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // Completion backend
    CompletionFailed,
    RateLimited,

    // Report output
    ExportFailed,

    InternalError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::CompletionFailed => "COMPLETION_FAILED",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::ExportFailed => "EXPORT_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// True for codes caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::ValidationFailed
                | ErrorCode::EmptyField
                | ErrorCode::OutOfRange
                | ErrorCode::InvalidFormat
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error with a code, a message and string details such as the field.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// A request-level validation failure tied to `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn field(&self) -> Option<&str> {
        self.details.get("field").map(String::as_str)
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::new(err.code(), err.to_string()).with_detail("field", field)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    mod validation_error {
        use super::*;

        #[test]
        fn messages_name_the_field() {
            assert_eq!(
                ValidationError::empty_field("shop_name").to_string(),
                "Field 'shop_name' cannot be empty"
            );
            assert_eq!(
                ValidationError::out_of_range("strengths", 1, 10, 12).to_string(),
                "Field 'strengths' must be between 1 and 10, got 12"
            );
        }

        #[test]
        fn converts_with_matching_code_and_field() {
            let err: DomainError = ValidationError::empty_field("competitor").into();
            assert_eq!(err.code, ErrorCode::EmptyField);
            assert_eq!(err.field(), Some("competitor"));

            let err: DomainError = ValidationError::invalid_format("mode", "unknown").into();
            assert_eq!(err.code, ErrorCode::InvalidFormat);
        }
    }

    mod domain_error {
        use super::*;

        #[test]
        fn displays_code_and_message() {
            let err = DomainError::new(ErrorCode::CompletionFailed, "backend unavailable");
            assert_eq!(err.to_string(), "[COMPLETION_FAILED] backend unavailable");
        }

        #[test]
        fn validation_records_field() {
            let err = DomainError::validation("context", "auto-detect needs context")
                .with_detail("mode", "auto_detect");
            assert_eq!(err.code, ErrorCode::ValidationFailed);
            assert_eq!(err.field(), Some("context"));
            assert_eq!(err.details.get("mode").map(String::as_str), Some("auto_detect"));
        }

        #[test]
        fn only_input_codes_are_client_errors() {
            assert!(ErrorCode::EmptyField.is_client_error());
            assert!(!ErrorCode::RateLimited.is_client_error());
            assert!(!ErrorCode::ExportFailed.is_client_error());
        }
    }
}
