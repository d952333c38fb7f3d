//! Ternary hypervector implementation.
//!
//! `{-1, 0, +1}` vectors produced by sparse seeding or by thresholded
//! quantization of a real-valued accumulator, with a 2-bit packed codec
//! for compact transport.

use crate::HdcError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Trit encoding for the packed form: 2 bits each, 4 trits per byte.
const TRIT_ZERO: u8 = 0b00;
const TRIT_POS: u8 = 0b01;
const TRIT_NEG: u8 = 0b10;

/// A high-dimensional ternary vector with elements in `{-1, 0, +1}`.
///
/// Scoring is Hamming-style (count of differing elements), which keeps the
/// similarity scale compatible with [`BinaryVector`](crate::BinaryVector);
/// a cosine score over the non-zero mass is also available.
///
/// # Example
/// ```
/// use resonance_hdc::TernaryVector;
///
/// let a = TernaryVector::from_seed(10_000, 42, "sensor", 0.7);
/// let b = TernaryVector::from_seed(10_000, 42, "sensor", 0.7);
/// assert_eq!(a.distance(&b), 0);
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct TernaryVector {
    /// One element per dimension.
    values: Vec<i8>,
}

impl TernaryVector {
    /// Create a new zero vector of the given dimension.
    #[inline]
    pub fn zeros(dimensions: usize) -> Self {
        Self {
            values: vec![0i8; dimensions],
        }
    }

    /// Create a vector from raw elements, validating the alphabet.
    pub fn from_values(values: Vec<i8>) -> Result<Self, HdcError> {
        for (index, &value) in values.iter().enumerate() {
            if !(-1..=1).contains(&value) {
                return Err(HdcError::InvalidElement { index, value });
            }
        }
        Ok(Self { values })
    }

    /// Create a sparse vector deterministically from a seed and content.
    ///
    /// The ChaCha stream is keyed by the SHA-256 of `(seed, content)`; each
    /// element is 0 with probability `sparsity` and otherwise ±1 with equal
    /// probability. The same `(dimensions, seed, content, sparsity)` always
    /// yields an identical vector.
    pub fn from_seed(dimensions: usize, seed: u64, content: &str, sparsity: f64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(seed.to_le_bytes());
        hasher.update(content.as_bytes());
        let digest = hasher.finalize();
        let rng_seed = u64::from_le_bytes(digest[..8].try_into().unwrap_or([0; 8]));
        let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);

        let values = (0..dimensions)
            .map(|_| {
                if rng.gen::<f64>() < sparsity {
                    0
                } else if rng.gen::<bool>() {
                    1
                } else {
                    -1
                }
            })
            .collect();

        Self { values }
    }

    /// Quantize a real-valued accumulator to ternary.
    ///
    /// The threshold is `threshold_factor` times the standard deviation of
    /// the input: values above it map to +1, below its negation to −1, and
    /// the middle band to 0.
    ///
    /// # Errors
    /// Fails on an empty input, a non-finite input value, or a non-finite or
    /// negative `threshold_factor`.
    pub fn quantize(values: &[f32], threshold_factor: f32) -> Result<Self, HdcError> {
        if values.is_empty() {
            return Err(HdcError::Quantization("empty input".to_string()));
        }
        if !threshold_factor.is_finite() || threshold_factor < 0.0 {
            return Err(HdcError::Quantization(format!(
                "threshold factor must be finite and non-negative, got {}",
                threshold_factor
            )));
        }
        for (i, &v) in values.iter().enumerate() {
            if !v.is_finite() {
                return Err(HdcError::Quantization(format!(
                    "non-finite value {} at index {}",
                    v, i
                )));
            }
        }

        let accumulator: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        let threshold = threshold_factor as f64 * std_deviation(&accumulator);
        Ok(Self::quantize_raw(&accumulator, threshold))
    }

    /// Threshold an accumulator that is already known to be finite.
    fn quantize_raw(accumulator: &[f64], threshold: f64) -> Self {
        let values = accumulator
            .iter()
            .map(|&v| {
                if v > threshold {
                    1
                } else if v < -threshold {
                    -1
                } else {
                    0
                }
            })
            .collect();
        Self { values }
    }

    /// Bundle multiple vectors through an element-wise accumulator.
    ///
    /// Elements are summed, then re-quantized with a threshold of
    /// `threshold_factor` times the accumulator's standard deviation. This
    /// is not a majority vote: the middle band collapses to 0, which is what
    /// keeps bundles sparse.
    ///
    /// # Panics
    /// Panics if `vectors` is empty or the dimensions disagree.
    pub fn bundle(vectors: &[&Self], threshold_factor: f32) -> Self {
        assert!(!vectors.is_empty(), "bundle of zero vectors is undefined");
        let dimensions = vectors[0].dimensions();
        for v in vectors {
            assert_eq!(
                v.dimensions(),
                dimensions,
                "dimension mismatch: {} vs {}",
                v.dimensions(),
                dimensions
            );
        }

        let mut accumulator = vec![0.0f64; dimensions];
        for v in vectors {
            for (slot, &value) in accumulator.iter_mut().zip(v.values.iter()) {
                *slot += value as f64;
            }
        }

        let threshold = threshold_factor as f64 * std_deviation(&accumulator);
        Self::quantize_raw(&accumulator, threshold)
    }

    /// Logical dimension.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    /// Element at position `index`, or 0 when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> i8 {
        self.values.get(index).copied().unwrap_or(0)
    }

    /// Raw elements.
    #[inline]
    pub fn values(&self) -> &[i8] {
        &self.values
    }

    /// Count of differing elements.
    ///
    /// # Panics
    /// Panics if the vectors have different dimensions.
    #[inline]
    pub fn distance(&self, other: &Self) -> u32 {
        assert_eq!(
            self.dimensions(),
            other.dimensions(),
            "dimension mismatch: {} vs {}",
            self.dimensions(),
            other.dimensions()
        );
        self.values
            .iter()
            .zip(other.values.iter())
            .filter(|(a, b)| a != b)
            .count() as u32
    }

    /// Similarity score (0.0 to 1.0) from the element-wise distance.
    ///
    /// # Panics
    /// Panics if the vectors have different dimensions.
    #[inline]
    pub fn similarity(&self, other: &Self) -> f64 {
        1.0 - (self.distance(other) as f64 / self.dimensions() as f64)
    }

    /// Cosine score over the signed mass, normalized to [0, 1].
    ///
    /// Returns 0.0 when either vector has no non-zero elements.
    ///
    /// # Panics
    /// Panics if the vectors have different dimensions.
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        assert_eq!(
            self.dimensions(),
            other.dimensions(),
            "dimension mismatch: {} vs {}",
            self.dimensions(),
            other.dimensions()
        );
        let mut dot = 0i64;
        let mut norm_a = 0i64;
        let mut norm_b = 0i64;
        for (&a, &b) in self.values.iter().zip(other.values.iter()) {
            dot += a as i64 * b as i64;
            norm_a += (a as i64) * (a as i64);
            norm_b += (b as i64) * (b as i64);
        }
        if norm_a == 0 || norm_b == 0 {
            return 0.0;
        }
        let cosine = dot as f64 / ((norm_a as f64).sqrt() * (norm_b as f64).sqrt());
        (cosine + 1.0) / 2.0
    }

    /// Circularly rotate the vector left by `positions` slots.
    ///
    /// Element values are preserved; only their positions permute. Rotation
    /// is reversible via [`rotate_back`](Self::rotate_back) and reduces
    /// `positions` modulo the dimension.
    pub fn rotate(&self, positions: usize) -> Self {
        if self.values.is_empty() {
            return self.clone();
        }
        let shift = positions % self.values.len();
        let mut values = self.values.clone();
        values.rotate_right(shift);
        Self { values }
    }

    /// Inverse of [`rotate`](Self::rotate).
    pub fn rotate_back(&self, positions: usize) -> Self {
        if self.values.is_empty() {
            return self.clone();
        }
        let shift = positions % self.values.len();
        let mut values = self.values.clone();
        values.rotate_left(shift);
        Self { values }
    }

    /// Count of non-zero elements.
    pub fn nonzero_count(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0).count()
    }

    /// Fraction of zero elements (0.0 to 1.0).
    pub fn sparsity(&self) -> f64 {
        if self.values.is_empty() {
            return 1.0;
        }
        1.0 - (self.nonzero_count() as f64 / self.values.len() as f64)
    }

    /// Pack into the 2-bit wire form: 4 trits per byte, low bits first.
    ///
    /// Encoding per trit: `00` = 0, `01` = +1, `10` = −1.
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        let mut packed = vec![0u8; (self.values.len() + 3) / 4];
        for (i, &value) in self.values.iter().enumerate() {
            let trit = match value {
                1 => TRIT_POS,
                -1 => TRIT_NEG,
                _ => TRIT_ZERO,
            };
            packed[i / 4] |= trit << ((i % 4) * 2);
        }
        packed
    }

    /// Unpack the 2-bit wire form produced by
    /// [`to_packed_bytes`](Self::to_packed_bytes).
    ///
    /// The reserved encoding `11` is rejected; padding trits beyond the
    /// logical dimension are ignored.
    pub fn from_packed_bytes(dimensions: usize, bytes: &[u8]) -> Result<Self, HdcError> {
        let expected = (dimensions + 3) / 4;
        if bytes.len() != expected {
            return Err(HdcError::InvalidSize {
                expected,
                actual: bytes.len(),
            });
        }

        let mut values = Vec::with_capacity(dimensions);
        for index in 0..dimensions {
            let trit = (bytes[index / 4] >> ((index % 4) * 2)) & 0b11;
            let value = match trit {
                TRIT_ZERO => 0,
                TRIT_POS => 1,
                TRIT_NEG => -1,
                _ => return Err(HdcError::InvalidPackedTrit { index }),
            };
            values.push(value);
        }
        Ok(Self { values })
    }

    /// Packed form as a hex string.
    pub fn to_hex(&self) -> String {
        self.to_packed_bytes()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    /// Create from a hex string of the packed form.
    pub fn from_hex(dimensions: usize, hex: &str) -> Result<Self, HdcError> {
        if hex.len() % 2 != 0 {
            return Err(HdcError::InvalidHex(hex.to_string()));
        }
        let bytes: Result<Vec<u8>, _> = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
            .collect();

        match bytes {
            Ok(b) => Self::from_packed_bytes(dimensions, &b),
            Err(_) => Err(HdcError::InvalidHex(hex.to_string())),
        }
    }
}

/// Population standard deviation.
fn std_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

impl std::fmt::Debug for TernaryVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TernaryVector(dimensions={}, nonzero={})",
            self.dimensions(),
            self.nonzero_count()
        )
    }
}

impl Serialize for TernaryVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&format!("{}:{}", self.dimensions(), self.to_hex()))
        } else {
            (self.dimensions() as u64, self.to_packed_bytes()).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for TernaryVector {
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
            Self::from_packed_bytes(dims as usize, &bytes).map_err(serde::de::Error::custom)
        }
    }
}
