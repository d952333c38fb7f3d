//! Error types for filter construction.

use thiserror::Error;

/// Errors raised when a change detector is misconfigured.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("threshold must be a finite, non-negative number, got {0}")]
    InvalidThreshold(f64),
}
