//! Error types for encoder construction.

use thiserror::Error;

/// Errors raised when an encoder configuration is rejected.
///
/// All variants are construction-time failures; a validated encoder never
/// errors while encoding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("dimensions must be positive, got {0}")]
    InvalidDimensions(usize),

    #[error("ngram_size must be positive, got {0}")]
    InvalidNgramSize(usize),

    #[error("ternary_sparsity must be within [0, 1], got {0}")]
    InvalidSparsity(f64),

    #[error("ternary_quantize_factor must be finite and non-negative, got {0}")]
    InvalidQuantizeFactor(f32),

    #[error("configured representation is {expected:?}, requested {requested:?}")]
    RepresentationMismatch {
        expected: crate::Representation,
        requested: crate::Representation,
    },
}
