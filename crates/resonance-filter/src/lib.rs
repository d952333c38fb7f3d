//! # resonance-filter
//!
//! Semantic change detection for event streams: compare each observed
//! vector against the last transmitted one and stay silent unless the
//! meaning moved past a distance threshold.
//!
//! The gate is representation-agnostic: hyperdimensional fingerprints and
//! dense float embeddings both plug in through [`SemanticDistance`].

pub mod distance;
pub mod error;
pub mod filter;

pub use distance::*;
pub use error::*;
pub use filter::*;
