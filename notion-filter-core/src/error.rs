//! Error types for filter construction and serialization

use crate::{Operation, PropertyType};
use thiserror::Error;

/// Errors produced while building or serializing a filter.
///
/// Typed builders never produce [`FilterError::UnsupportedOperation`]: an
/// operation a property type does not support is simply not callable on it.
/// That variant only comes from [`crate::DynamicFilter`], whose property type
/// is chosen at runtime.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unsupported operation '{operation}' for property type '{property_type}'")]
    UnsupportedOperation {
        property_type: PropertyType,
        operation: Operation,
    },

    #[error("Invalid filter value: {reason}")]
    InvalidValue { reason: String },

    #[error("Serialization failed: {reason}")]
    Serialization { reason: String },
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

// =============================================================================
// TESTS
// =============================================================================
