//! Foundation module - Shared domain primitives.
//!
//! Error types that form the common vocabulary of the SWOT Agent domain.

mod errors;

pub use errors::{DomainError, ErrorCode, ValidationError};
