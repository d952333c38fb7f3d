//! # resonance-hdc
//!
//! Bitpacked binary and ternary hypervectors for Hamming-similarity
//! operations. The substrate underneath the text encoder and the semantic
//! change gate.
//!
//! Features:
//! - Runtime-dimension vectors (10,000 bits packs into 1,250 bytes)
//! - Deterministic generation from `(seed, content)` pairs via SHA-256
//! - XOR-based binding/unbinding for associative operations
//! - Circular rotation for positional encoding
//! - Majority-vote and accumulator bundling
//! - 2-bit packed ternary codec for compact transport

pub mod binary;
pub mod error;
pub mod ternary;

pub use binary::*;
pub use error::*;
pub use ternary::*;

/// Default vector dimension used across the protocol.
pub const DEFAULT_DIMENSIONS: usize = 10_000;

/// Number of u64 words needed to store `bits` bits.
#[inline]
pub const fn words_for(bits: usize) -> usize {
    (bits + 63) / 64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_counts() {
        assert_eq!(words_for(DEFAULT_DIMENSIONS), 157);
        assert_eq!(words_for(64), 1);
        assert_eq!(words_for(65), 2);
    }

    #[test]
    fn test_binary_and_ternary_share_scale() {
        // Both representations score identity as exactly 1.0.
        let b = BinaryVector::from_seed(DEFAULT_DIMENSIONS, 42, "scale");
        let t = TernaryVector::from_seed(DEFAULT_DIMENSIONS, 42, "scale", 0.7);
        assert_eq!(b.similarity(&b), 1.0);
        assert_eq!(t.similarity(&t), 1.0);
    }
}
