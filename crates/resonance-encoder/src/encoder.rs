//! Text encoder: tokens → positional n-gram windows → one fingerprint.

use crate::{
    BinarySpace, ConfigError, EncoderConfig, NgramWindows, TernarySpace, TokenVectorTable,
    Tokenizer, VectorSpace, WhitespaceTokenizer,
};
use tracing::debug;

/// Encodes text into a fixed-dimension semantic fingerprint.
///
/// The encoder is a pure function of `(text, config)`: no hidden state, no
/// learning. Independent texts can be encoded from multiple threads without
/// coordination; the token cache is read-mostly and internally locked.
///
/// # Example
/// ```
/// use resonance_encoder::{EncoderConfig, TextEncoder};
///
/// let encoder = TextEncoder::binary(&EncoderConfig::default()).unwrap();
/// let a = encoder.encode("the cat sat on the mat");
/// let b = encoder.encode("the cat sat on the mat");
/// assert_eq!(encoder.similarity(&a, &b), 1.0);
/// ```
pub struct TextEncoder<S: VectorSpace, T: Tokenizer = WhitespaceTokenizer> {
    table: TokenVectorTable<S>,
    tokenizer: T,
    ngram_size: usize,
}

impl<S: VectorSpace, T: Tokenizer> std::fmt::Debug for TextEncoder<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEncoder")
            .field("ngram_size", &self.ngram_size)
            .finish_non_exhaustive()
    }
}

impl TextEncoder<BinarySpace> {
    /// Binary spatter-code encoder with the default tokenizer.
    ///
    /// # Errors
    /// Returns the configuration's first violated constraint.
    pub fn binary(config: &EncoderConfig) -> Result<Self, ConfigError> {
        let space = BinarySpace::from_config(config)?;
        Ok(Self {
            table: TokenVectorTable::new(space),
            tokenizer: WhitespaceTokenizer,
            ngram_size: config.ngram_size,
        })
    }
}

impl TextEncoder<TernarySpace> {
    /// Sparse ternary encoder with the default tokenizer.
    ///
    /// # Errors
    /// Returns the configuration's first violated constraint.
    pub fn ternary(config: &EncoderConfig) -> Result<Self, ConfigError> {
        let space = TernarySpace::from_config(config)?;
        Ok(Self {
            table: TokenVectorTable::new(space),
            tokenizer: WhitespaceTokenizer,
            ngram_size: config.ngram_size,
        })
    }
}

impl<S: VectorSpace, T: Tokenizer> TextEncoder<S, T> {
    /// Encoder over an explicit space and tokenizer.
    ///
    /// The caller is responsible for having validated whatever configuration
    /// produced the space; `ngram_size` must be positive.
    ///
    /// # Errors
    /// Rejects a zero `ngram_size`.
    pub fn with_tokenizer(space: S, tokenizer: T, ngram_size: usize) -> Result<Self, ConfigError> {
        if ngram_size == 0 {
            return Err(ConfigError::InvalidNgramSize(ngram_size));
        }
        Ok(Self {
            table: TokenVectorTable::new(space),
            tokenizer,
            ngram_size,
        })
    }

    /// Encode a text into its semantic fingerprint.
    ///
    /// Tokenizes, maps tokens to vectors, slides the n-gram window with
    /// stride 1, and bundles all window vectors into one. A text with zero
    /// tokens encodes to the all-zero vector of the configured dimension,
    /// never an error.
    pub fn encode(&self, text: &str) -> S::Vector {
        let tokens = self.tokenizer.tokenize(text);
        if tokens.is_empty() {
            return self.table.space().zero();
        }

        let windows: Vec<S::Vector> =
            NgramWindows::new(&self.table, &tokens, self.ngram_size).collect();
        let fingerprint = self.table.space().bundle(&windows);

        debug!(
            tokens = tokens.len(),
            windows = windows.len(),
            vocabulary = self.table.vocabulary_len(),
            "encoded text"
        );
        fingerprint
    }

    /// Similarity between two fingerprints, in [0, 1].
    ///
    /// # Panics
    /// Panics if the vectors have different dimensions.
    pub fn similarity(&self, a: &S::Vector, b: &S::Vector) -> f64 {
        self.table.space().similarity(a, b)
    }

    /// Vector dimension of every fingerprint this encoder produces.
    pub fn dimensions(&self) -> usize {
        self.table.space().dimensions()
    }

    /// Configured sliding-window width.
    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    /// Number of distinct tokens cached so far.
    pub fn vocabulary_len(&self) -> usize {
        self.table.vocabulary_len()
    }

    /// Drop the token cache. Results are unaffected.
    pub fn clear_cache(&self) {
        self.table.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Representation;

    #[test]
    fn test_encode_deterministic() {
        let encoder = TextEncoder::binary(&EncoderConfig::default()).unwrap();
        let a = encoder.encode("system startup complete");
        let b = encoder.encode("system startup complete");
        assert_eq!(encoder.similarity(&a, &b), 1.0);
    }

    #[test]
    fn test_encoders_with_equal_configs_agree() {
        let config = EncoderConfig::default();
        let one = TextEncoder::binary(&config).unwrap();
        let two = TextEncoder::binary(&config).unwrap();
        let a = one.encode("fire detected in sector 7");
        let b = two.encode("fire detected in sector 7");
        assert_eq!(a.distance(&b), 0);
    }

    #[test]
    fn test_dimension_invariance() {
        for dimensions in [256, 1_024, 10_000] {
            let config = EncoderConfig {
                dimensions,
                ..EncoderConfig::default()
            };
            let encoder = TextEncoder::binary(&config).unwrap();
            assert_eq!(encoder.encode("a few words here").dimensions(), dimensions);
        }
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let encoder = TextEncoder::binary(&EncoderConfig::default()).unwrap();
        let v = encoder.encode("");
        assert_eq!(v.popcount(), 0);
        assert_eq!(v.dimensions(), encoder.dimensions());

        let whitespace = encoder.encode("   \t\n");
        assert_eq!(v.distance(&whitespace), 0);
    }

    #[test]
    fn test_word_order_matters() {
        let encoder = TextEncoder::binary(&EncoderConfig::default()).unwrap();
        let ab = encoder.encode("alarm before breach");
        let ba = encoder.encode("breach before alarm");
        assert!(encoder.similarity(&ab, &ba) < 1.0);
    }

    #[test]
    fn test_ternary_encode() {
        let config = EncoderConfig {
            representation: Representation::Ternary,
            ..EncoderConfig::default()
        };
        let encoder = TextEncoder::ternary(&config).unwrap();
        let a = encoder.encode("the cat sat on the mat");
        let b = encoder.encode("the cat sat on the mat");
        assert_eq!(a.dimensions(), config.dimensions);
        assert_eq!(encoder.similarity(&a, &b), 1.0);
    }

    #[test]
    fn test_representation_mismatch_rejected() {
        let config = EncoderConfig {
            representation: Representation::Ternary,
            ..EncoderConfig::default()
        };
        assert!(matches!(
            TextEncoder::binary(&config).unwrap_err(),
            ConfigError::RepresentationMismatch { .. }
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EncoderConfig {
            dimensions: 0,
            ..EncoderConfig::default()
        };
        assert!(TextEncoder::binary(&config).is_err());
    }
}
