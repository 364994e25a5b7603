//! Error types for the string store
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Errors returned by store operations.
///
/// Only `increment` can fail. Absence of a key is never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Stored value cannot be parsed as a base-10 `i64`
    #[error("value is not an integer: {0}")]
    NonNumericValue(String),

    /// Adding the delta would overflow `i64`
    #[error("increment would overflow: {0}")]
    Overflow(String),
}

// == Result Type Alias ==
/// Convenience Result type for the string store.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_key() {
        let err = StoreError::NonNumericValue("counter".to_string());
        assert_eq!(err.to_string(), "value is not an integer: counter");

        let err = StoreError::Overflow("counter".to_string());
        assert_eq!(err.to_string(), "increment would overflow: counter");
    }
}
