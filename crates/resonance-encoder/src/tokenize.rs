//! Tokenization seam.
//!
//! The encoder only requires determinism from its tokenizer; the default
//! rule is deliberately simple and documented so fingerprints stay
//! comparable across deployments.

/// Splits text into an ordered token sequence.
///
/// Implementations must be deterministic: the same input must always yield
/// the same tokens, since every downstream vector is a pure function of
/// them.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Default tokenizer: lowercase, split on Unicode whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(|t| t.to_lowercase()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_splits() {
        let tokens = WhitespaceTokenizer.tokenize("The CAT  sat\n on\tthe mat");
        assert_eq!(tokens, vec!["the", "cat", "sat", "on", "the", "mat"]);
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert!(WhitespaceTokenizer.tokenize("").is_empty());
        assert!(WhitespaceTokenizer.tokenize("   \t\n ").is_empty());
    }

    #[test]
    fn test_deterministic() {
        let a = WhitespaceTokenizer.tokenize("Silence is default");
        let b = WhitespaceTokenizer.tokenize("Silence is default");
        assert_eq!(a, b);
    }
}
