//! Token vector table.
//!
//! Lazy, cached mapping from token strings to hypervectors. The cache is a
//! pure optimization: regeneration through the space is the ground truth,
//! and clearing the cache can never change an encoding.

use crate::VectorSpace;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Deterministic token-to-vector mapping with a memo cache.
///
/// Growth is unbounded and tracks the vocabulary actually encountered;
/// long-running services with adversarial vocabularies can call
/// [`clear`](Self::clear) at any point without observable effect on
/// results.
pub struct TokenVectorTable<S: VectorSpace> {
    space: S,
    cache: RwLock<HashMap<String, S::Vector>>,
}

impl<S: VectorSpace> TokenVectorTable<S> {
    /// Create an empty table over the given space.
    pub fn new(space: S) -> Self {
        Self {
            space,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Vector for a token, generated on first sight and cached after.
    ///
    /// The empty string is an ordinary token with a well-defined vector.
    pub fn vector_for(&self, token: &str) -> S::Vector {
        if let Some(vector) = self.cache.read().get(token) {
            return vector.clone();
        }
        let vector = self.space.token_vector(token);
        self.cache
            .write()
            .entry(token.to_owned())
            .or_insert_with(|| vector.clone());
        vector
    }

    /// The space this table generates vectors in.
    pub fn space(&self) -> &S {
        &self.space
    }

    /// Number of distinct tokens seen so far.
    pub fn vocabulary_len(&self) -> usize {
        self.cache.read().len()
    }

    /// Drop all cached vectors. Purely a memory-reclamation operation.
    pub fn clear(&self) {
        self.cache.write().clear();
    }
}

impl<S: VectorSpace> std::fmt::Debug for TokenVectorTable<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TokenVectorTable(vocabulary={})",
            self.vocabulary_len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BinarySpace, EncoderConfig};

    fn table() -> TokenVectorTable<BinarySpace> {
        TokenVectorTable::new(BinarySpace::from_config(&EncoderConfig::default()).unwrap())
    }

    #[test]
    fn test_cache_is_transparent() {
        let table = table();
        let first = table.vector_for("cat");
        let cached = table.vector_for("cat");
        table.clear();
        let regenerated = table.vector_for("cat");

        assert_eq!(first.distance(&cached), 0);
        assert_eq!(first.distance(&regenerated), 0);
    }

    #[test]
    fn test_vocabulary_tracks_distinct_tokens() {
        let table = table();
        table.vector_for("cat");
        table.vector_for("cat");
        table.vector_for("dog");
        assert_eq!(table.vocabulary_len(), 2);

        table.clear();
        assert_eq!(table.vocabulary_len(), 0);
    }

    #[test]
    fn test_empty_token_is_well_defined() {
        let table = table();
        let a = table.vector_for("");
        let b = table.vector_for("");
        assert_eq!(a.distance(&b), 0);
    }
}
