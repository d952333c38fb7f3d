//! Encoder configuration.

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Which hypervector representation the encoder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Representation {
    /// `{0, 1}` bits, majority-vote bundling.
    Binary,
    /// `{-1, 0, +1}` elements, accumulator bundling with sparse zeros.
    Ternary,
}

/// Configuration for a text encoder.
///
/// The seed is explicit: "same token, same vector" holds per configuration,
/// not per process, so two encoders built from equal configs agree on every
/// vector they produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Vector dimension in elements.
    pub dimensions: usize,
    /// Sliding window width over the token sequence.
    pub ngram_size: usize,
    /// Encoder-wide seed mixed into every token hash.
    pub seed: u64,
    /// Vector representation to encode into.
    pub representation: Representation,
    /// Fraction of zero elements in seeded ternary token vectors.
    pub ternary_sparsity: f64,
    /// Multiple of the accumulator standard deviation used as the ternary
    /// quantization threshold.
    pub ternary_quantize_factor: f32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            dimensions: resonance_hdc::DEFAULT_DIMENSIONS,
            ngram_size: 3,
            seed: 42,
            representation: Representation::Binary,
            ternary_sparsity: 0.7,
            ternary_quantize_factor: 0.3,
        }
    }
}

impl EncoderConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns the first violated constraint: zero dimensions, zero window
    /// width, sparsity outside [0, 1], or a non-finite/negative quantize
    /// factor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimensions == 0 {
            return Err(ConfigError::InvalidDimensions(self.dimensions));
        }
        if self.ngram_size == 0 {
            return Err(ConfigError::InvalidNgramSize(self.ngram_size));
        }
        if !(0.0..=1.0).contains(&self.ternary_sparsity) || self.ternary_sparsity.is_nan() {
            return Err(ConfigError::InvalidSparsity(self.ternary_sparsity));
        }
        if !self.ternary_quantize_factor.is_finite() || self.ternary_quantize_factor < 0.0 {
            return Err(ConfigError::InvalidQuantizeFactor(self.ternary_quantize_factor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EncoderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let config = EncoderConfig {
            dimensions: 0,
            ..EncoderConfig::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::InvalidDimensions(0)
        );
    }

    #[test]
    fn test_zero_ngram_rejected() {
        let config = EncoderConfig {
            ngram_size: 0,
            ..EncoderConfig::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::InvalidNgramSize(0)
        );
    }

    #[test]
    fn test_sparsity_out_of_range_rejected() {
        let config = EncoderConfig {
            ternary_sparsity: 1.5,
            ..EncoderConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::InvalidSparsity(_)
        ));
    }

    #[test]
    fn test_negative_quantize_factor_rejected() {
        let config = EncoderConfig {
            ternary_quantize_factor: -0.3,
            ..EncoderConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::InvalidQuantizeFactor(_)
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = EncoderConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: EncoderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
