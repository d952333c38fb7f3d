//! Error types for hypervector operations.

use thiserror::Error;

/// Errors that can occur during hypervector construction and codec operations.
#[derive(Error, Debug, Clone)]
pub enum HdcError {
    #[error("Invalid vector size: expected {expected} bytes, got {actual}")]
    InvalidSize { expected: usize, actual: usize },

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Invalid packed trit at position {index}")]
    InvalidPackedTrit { index: usize },

    #[error("Invalid ternary element at position {index}: {value}")]
    InvalidElement { index: usize, value: i8 },

    #[error("Quantization failed: {0}")]
    Quantization(String),
}
