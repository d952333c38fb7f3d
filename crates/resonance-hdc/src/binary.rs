//! Binary hypervector implementation.
//!
//! Runtime-dimension bit vectors with POPCNT-based Hamming operations.

use crate::{words_for, HdcError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// A high-dimensional binary vector stored in a compact word representation.
///
/// The dimension is fixed at construction and every operation checks that
/// both operands agree on it. Typical dimensions are in the thousands;
/// 10,000 bits pack into 157 words.
///
/// # Features
/// - Deterministic generation from `(seed, content)` pairs via SHA-256
/// - Hamming distance via XOR + POPCNT
/// - XOR-based binding/unbinding for associative operations
/// - Circular rotation for positional encoding
///
/// # Example
/// ```
/// use resonance_hdc::BinaryVector;
///
/// let cat = BinaryVector::from_seed(10_000, 42, "cat");
/// let dog = BinaryVector::from_seed(10_000, 42, "dog");
///
/// // Bind two concepts, then unbind to recover
/// let bound = cat.bind(&dog);
/// let recovered = bound.unbind(&cat);
/// assert_eq!(recovered.distance(&dog), 0);
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct BinaryVector {
    /// Internal storage as u64 words.
    words: Vec<u64>,
    /// Logical dimension in bits.
    bits: usize,
}

impl BinaryVector {
    /// Create a new zero vector of the given dimension.
    #[inline]
    pub fn zeros(dimensions: usize) -> Self {
        Self {
            words: vec![0u64; words_for(dimensions)],
            bits: dimensions,
        }
    }

    /// Create a new vector with all bits set to 1.
    pub fn ones(dimensions: usize) -> Self {
        let mut v = Self {
            words: vec![u64::MAX; words_for(dimensions)],
            bits: dimensions,
        };
        v.mask_last_word();
        v
    }

    /// Create a random vector using the given RNG.
    pub fn random<R: rand::Rng>(dimensions: usize, rng: &mut R) -> Self {
        let mut words = vec![0u64; words_for(dimensions)];
        for word in words.iter_mut() {
            *word = rng.gen();
        }
        let mut v = Self {
            words,
            bits: dimensions,
        };
        v.mask_last_word();
        v
    }

    /// Create a vector deterministically from a seed and a content string.
    ///
    /// SHA-256 is run in counter mode over `(seed, content, chunk_index)` and
    /// the digests are concatenated to fill the vector. The same
    /// `(dimensions, seed, content)` triple always yields a bit-identical
    /// vector, across processes and runs.
    pub fn from_seed(dimensions: usize, seed: u64, content: &str) -> Self {
        let word_count = words_for(dimensions);
        let mut words = vec![0u64; word_count];
        let mut hasher = Sha256::new();

        // Each digest yields 32 bytes = 4 words.
        for chunk_idx in 0..((word_count * 8 + 31) / 32) {
            hasher.update(seed.to_le_bytes());
            hasher.update(content.as_bytes());
            hasher.update((chunk_idx as u64).to_le_bytes());
            let hash = hasher.finalize_reset();

            let start_word = chunk_idx * 4;
            for (i, chunk) in hash.chunks(8).enumerate() {
                let word_idx = start_word + i;
                if word_idx < word_count {
                    words[word_idx] = u64::from_le_bytes(chunk.try_into().unwrap_or([0; 8]));
                }
            }
        }

        let mut v = Self {
            words,
            bits: dimensions,
        };
        v.mask_last_word();
        v
    }

    /// Create a vector from JSON data by hashing its canonical
    /// representation. Useful for fingerprinting structured sensor payloads
    /// the same way plain tokens are fingerprinted.
    pub fn from_json(dimensions: usize, seed: u64, value: &serde_json::Value) -> Self {
        let canonical = serde_json::to_string(value).unwrap_or_default();
        Self::from_seed(dimensions, seed, &canonical)
    }

    /// Create a vector from raw little-endian bytes.
    pub fn from_bytes(dimensions: usize, bytes: &[u8]) -> Result<Self, HdcError> {
        let expected = (dimensions + 7) / 8;
        if bytes.len() != expected {
            return Err(HdcError::InvalidSize {
                expected,
                actual: bytes.len(),
            });
        }

        let mut words = vec![0u64; words_for(dimensions)];
        for (i, chunk) in bytes.chunks(8).enumerate() {
            let mut arr = [0u8; 8];
            arr[..chunk.len()].copy_from_slice(chunk);
            words[i] = u64::from_le_bytes(arr);
        }

        let mut v = Self {
            words,
            bits: dimensions,
        };
        v.mask_last_word();
        Ok(v)
    }

    /// Convert the vector to little-endian bytes.
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.words.len() * 8);
        for word in &self.words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes.truncate((self.bits + 7) / 8);
        bytes
    }

    /// Logical dimension in bits.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.bits
    }

    /// Calculate the Hamming distance to another vector.
    ///
    /// Returns the number of differing bits.
    ///
    /// # Panics
    /// Panics if the vectors have different dimensions.
    #[inline]
    pub fn distance(&self, other: &Self) -> u32 {
        assert_eq!(
            self.bits, other.bits,
            "dimension mismatch: {} vs {}",
            self.bits, other.bits
        );
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }

    /// Calculate similarity score (0.0 to 1.0).
    ///
    /// Returns 1.0 for identical vectors, 0.0 for maximally different.
    ///
    /// # Panics
    /// Panics if the vectors have different dimensions.
    #[inline]
    pub fn similarity(&self, other: &Self) -> f64 {
        1.0 - (self.distance(other) as f64 / self.bits as f64)
    }

    /// Bind two vectors together using XOR.
    ///
    /// This creates a composite representation where:
    /// - `bound = a XOR b`
    /// - `a = bound XOR b` (recovers a)
    /// - `b = bound XOR a` (recovers b)
    ///
    /// # Panics
    /// Panics if the vectors have different dimensions.
    #[inline]
    pub fn bind(&self, other: &Self) -> Self {
        assert_eq!(
            self.bits, other.bits,
            "dimension mismatch: {} vs {}",
            self.bits, other.bits
        );
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| a ^ b)
            .collect();
        Self {
            words,
            bits: self.bits,
        }
    }

    /// Unbind a vector using XOR (inverse of bind).
    ///
    /// If `bound = a.bind(b)`, then `bound.unbind(a) == b`.
    #[inline]
    pub fn unbind(&self, key: &Self) -> Self {
        // XOR is its own inverse
        self.bind(key)
    }

    /// Circularly rotate the vector left by `positions` slots.
    ///
    /// Rotation is a bijection on the bit positions: every bit moves from
    /// index `i` to `(i + positions) % dimensions`, so no information is
    /// lost. `positions` is reduced modulo the dimension, and rotating by 0
    /// returns the vector unchanged.
    pub fn rotate(&self, positions: usize) -> Self {
        if self.bits == 0 {
            return self.clone();
        }
        let shift = positions % self.bits;
        if shift == 0 {
            return self.clone();
        }

        let mut result = Self::zeros(self.bits);
        for i in 0..self.bits {
            if self.get_bit(i) {
                result.set_bit((i + shift) % self.bits, true);
            }
        }
        result
    }

    /// Inverse of [`rotate`](Self::rotate): `v.rotate(k).rotate_back(k) == v`.
    pub fn rotate_back(&self, positions: usize) -> Self {
        if self.bits == 0 {
            return self.clone();
        }
        let shift = positions % self.bits;
        self.rotate(self.bits - shift)
    }

    /// Count the number of set bits (population count).
    #[inline]
    pub fn popcount(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Fraction of bits that are set (0.0 to 1.0).
    pub fn density(&self) -> f64 {
        if self.bits == 0 {
            return 0.0;
        }
        self.popcount() as f64 / self.bits as f64
    }

    /// Check if a specific bit is set.
    #[inline]
    pub fn get_bit(&self, index: usize) -> bool {
        if index >= self.bits {
            return false;
        }
        let word_idx = index / 64;
        let bit_idx = index % 64;
        (self.words[word_idx] >> bit_idx) & 1 == 1
    }

    /// Set a specific bit.
    #[inline]
    pub fn set_bit(&mut self, index: usize, value: bool) {
        if index >= self.bits {
            return;
        }
        let word_idx = index / 64;
        let bit_idx = index % 64;
        if value {
            self.words[word_idx] |= 1u64 << bit_idx;
        } else {
            self.words[word_idx] &= !(1u64 << bit_idx);
        }
    }

    /// Create a majority vote vector from multiple vectors.
    ///
    /// Each bit is set if it is set in strictly more than half of the input
    /// vectors; an even split always leaves the bit at 0.
    ///
    /// # Panics
    /// Panics if `vectors` is empty or the dimensions disagree.
    pub fn majority(vectors: &[&Self]) -> Self {
        assert!(!vectors.is_empty(), "majority of zero vectors is undefined");
        let bits = vectors[0].bits;
        for v in vectors {
            assert_eq!(
                v.bits, bits,
                "dimension mismatch: {} vs {}",
                v.bits, bits
            );
        }

        let threshold = vectors.len() / 2;
        let mut result = Self::zeros(bits);

        for bit_idx in 0..bits {
            let count = vectors.iter().filter(|v| v.get_bit(bit_idx)).count();
            if count > threshold {
                result.set_bit(bit_idx, true);
            }
        }

        result
    }

    /// Convert to hex string representation.
    pub fn to_hex(&self) -> String {
        self.to_bytes()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    /// Create from hex string.
    pub fn from_hex(dimensions: usize, hex: &str) -> Result<Self, HdcError> {
        if hex.len() % 2 != 0 {
            return Err(HdcError::InvalidHex(hex.to_string()));
        }
        let bytes: Result<Vec<u8>, _> = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
            .collect();

        match bytes {
            Ok(b) => Self::from_bytes(dimensions, &b),
            Err(_) => Err(HdcError::InvalidHex(hex.to_string())),
        }
    }

    /// Clear any bits beyond the logical dimension in the last word.
    fn mask_last_word(&mut self) {
        let valid_bits_in_last_word = self.bits % 64;
        if valid_bits_in_last_word > 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << valid_bits_in_last_word) - 1;
            }
        }
    }
}

impl BitXor for BinaryVector {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        self.bind(&rhs)
    }
}

impl BitXor for &BinaryVector {
    type Output = BinaryVector;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        self.bind(rhs)
    }
}

impl BitAnd for BinaryVector {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        assert_eq!(
            self.bits, rhs.bits,
            "dimension mismatch: {} vs {}",
            self.bits, rhs.bits
        );
        let words = self
            .words
            .iter()
            .zip(rhs.words.iter())
            .map(|(a, b)| a & b)
            .collect();
        Self {
            words,
            bits: self.bits,
        }
    }
}

impl BitOr for BinaryVector {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        assert_eq!(
            self.bits, rhs.bits,
            "dimension mismatch: {} vs {}",
            self.bits, rhs.bits
        );
        let words = self
            .words
            .iter()
            .zip(rhs.words.iter())
            .map(|(a, b)| a | b)
            .collect();
        Self {
            words,
            bits: self.bits,
        }
    }
}

impl Not for BinaryVector {
    type Output = Self;

    fn not(self) -> Self::Output {
        let mut result = Self {
            words: self.words.iter().map(|w| !w).collect(),
            bits: self.bits,
        };
        result.mask_last_word();
        result
    }
}

impl std::fmt::Debug for BinaryVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BinaryVector(dimensions={}, popcount={})",
            self.bits,
            self.popcount()
        )
    }
}

impl Serialize for BinaryVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&format!("{}:{}", self.bits, self.to_hex()))
        } else {
            (self.bits as u64, self.to_bytes()).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for BinaryVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            let (dims, hex) = s
                .split_once(':')
                .ok_or_else(|| serde::de::Error::custom("expected `<dimensions>:<hex>`"))?;
            let dims: usize = dims.parse().map_err(serde::de::Error::custom)?;
            Self::from_hex(dims, hex).map_err(serde::de::Error::custom)
        } else {
            let (dims, bytes) = <(u64, Vec<u8>)>::deserialize(deserializer)?;
            Self::from_bytes(dims as usize, &bytes).map_err(serde::de::Error::custom)
        }
    }
}
