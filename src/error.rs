//! Error types for the cache
//!
//! Lookups never fail: a missing key is reported as `None`. The only error a
//! caller can observe is a rejected construction argument.

extern crate alloc;

use alloc::string::String;
use thiserror::Error;

/// Errors surfaced by cache construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A construction argument was out of range (e.g. a capacity of zero).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience `Result` type for fallible cache operations.
pub type Result<T> = core::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_invalid_argument_display() {
        let err = CacheError::InvalidArgument("capacity must be positive, got 0".to_string());
        assert_eq!(
            err.to_string(),
            "invalid argument: capacity must be positive, got 0"
        );
    }
}
