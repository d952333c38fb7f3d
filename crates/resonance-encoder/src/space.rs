//! Vector space seam.
//!
//! The encoder is written once against [`VectorSpace`]; binary and ternary
//! representations plug in behind it without branching in the pipeline.

use crate::{ConfigError, EncoderConfig, Representation};
use resonance_hdc::{BinaryVector, TernaryVector};

/// Capability set a representation must provide to the encoding pipeline:
/// deterministic token vectors, a zero vector, positional rotation,
/// bundling, and a distance in [0, 1].
pub trait VectorSpace: Send + Sync {
    type Vector: Clone + Send + Sync;

    /// Vector dimension every produced vector has.
    fn dimensions(&self) -> usize;

    /// The degenerate all-zero vector.
    fn zero(&self) -> Self::Vector;

    /// Deterministic vector for a token. Same token, same space parameters,
    /// same vector, across processes and runs.
    fn token_vector(&self, token: &str) -> Self::Vector;

    /// Circularly rotate a vector by `positions` slots (position 0 is the
    /// identity; `positions` beyond the dimension wrap via modulo).
    fn rotate(&self, vector: &Self::Vector, positions: usize) -> Self::Vector;

    /// Bundle vectors into one representative vector.
    ///
    /// # Panics
    /// Panics if `items` is empty or the dimensions disagree.
    fn bundle(&self, items: &[Self::Vector]) -> Self::Vector;

    /// Normalized distance in [0, 1]: 0.0 for identical vectors.
    ///
    /// # Panics
    /// Panics if the dimensions disagree.
    fn distance(&self, a: &Self::Vector, b: &Self::Vector) -> f64;

    /// Normalized similarity in [0, 1]: 1.0 for identical vectors.
    fn similarity(&self, a: &Self::Vector, b: &Self::Vector) -> f64 {
        1.0 - self.distance(a, b)
    }
}

/// Binary spatter-code space: `{0, 1}` bits, majority-vote bundling.
#[derive(Debug, Clone)]
pub struct BinarySpace {
    dimensions: usize,
    seed: u64,
}

impl BinarySpace {
    /// Build from a validated configuration.
    ///
    /// # Errors
    /// Rejects invalid configurations and configurations whose
    /// representation is not [`Representation::Binary`].
    pub fn from_config(config: &EncoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.representation != Representation::Binary {
            return Err(ConfigError::RepresentationMismatch {
                expected: config.representation,
                requested: Representation::Binary,
            });
        }
        Ok(Self {
            dimensions: config.dimensions,
            seed: config.seed,
        })
    }
}

impl VectorSpace for BinarySpace {
    type Vector = BinaryVector;

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn zero(&self) -> BinaryVector {
        BinaryVector::zeros(self.dimensions)
    }

    fn token_vector(&self, token: &str) -> BinaryVector {
        BinaryVector::from_seed(self.dimensions, self.seed, token)
    }

    fn rotate(&self, vector: &BinaryVector, positions: usize) -> BinaryVector {
        vector.rotate(positions)
    }

    fn bundle(&self, items: &[BinaryVector]) -> BinaryVector {
        let refs: Vec<&BinaryVector> = items.iter().collect();
        BinaryVector::majority(&refs)
    }

    fn distance(&self, a: &BinaryVector, b: &BinaryVector) -> f64 {
        1.0 - a.similarity(b)
    }
}

/// Sparse ternary space: `{-1, 0, +1}` elements, accumulator bundling.
#[derive(Debug, Clone)]
pub struct TernarySpace {
    dimensions: usize,
    seed: u64,
    sparsity: f64,
    quantize_factor: f32,
}

impl TernarySpace {
    /// Build from a validated configuration.
    ///
    /// # Errors
    /// Rejects invalid configurations and configurations whose
    /// representation is not [`Representation::Ternary`].
    pub fn from_config(config: &EncoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.representation != Representation::Ternary {
            return Err(ConfigError::RepresentationMismatch {
                expected: config.representation,
                requested: Representation::Ternary,
            });
        }
        Ok(Self {
            dimensions: config.dimensions,
            seed: config.seed,
            sparsity: config.ternary_sparsity,
            quantize_factor: config.ternary_quantize_factor,
        })
    }
}

impl VectorSpace for TernarySpace {
    type Vector = TernaryVector;

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn zero(&self) -> TernaryVector {
        TernaryVector::zeros(self.dimensions)
    }

    fn token_vector(&self, token: &str) -> TernaryVector {
        TernaryVector::from_seed(self.dimensions, self.seed, token, self.sparsity)
    }

    fn rotate(&self, vector: &TernaryVector, positions: usize) -> TernaryVector {
        vector.rotate(positions)
    }

    fn bundle(&self, items: &[TernaryVector]) -> TernaryVector {
        let refs: Vec<&TernaryVector> = items.iter().collect();
        TernaryVector::bundle(&refs, self.quantize_factor)
    }

    fn distance(&self, a: &TernaryVector, b: &TernaryVector) -> f64 {
        1.0 - a.similarity(b)
    }
}
