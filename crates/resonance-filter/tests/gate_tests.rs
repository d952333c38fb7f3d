//! Integration tests for the change gate fed by real encoded fingerprints.
//!
//! These tests run the full path a sensor node runs: encode an observation,
//! gate it against the last transmission, and verify the silence-by-default
//! behavior across a stream of related and unrelated events.

use resonance_encoder::{EncoderConfig, TextEncoder};
use resonance_filter::{ChangeDetector, Decision};

// ============================================================================
// Helper functions
// ============================================================================

/// Run a stream of texts through an encoder and a fresh gate, returning the
/// per-observation decisions.
fn run_stream(threshold: f64, texts: &[&str]) -> Vec<Decision> {
    let encoder = TextEncoder::binary(&EncoderConfig::default()).expect("default config is valid");
    let mut gate = ChangeDetector::new(threshold).expect("threshold is valid");
    texts
        .iter()
        .map(|text| gate.observe(encoder.encode(text)))
        .collect()
}

// ============================================================================
// Stream behavior
// ============================================================================

#[test]
fn baseline_then_repeat_then_event() {
    let decisions = run_stream(
        0.15,
        &[
            "system startup",
            "system startup",
            "fire detected in sector 7",
        ],
    );
    assert_eq!(
        decisions,
        vec![Decision::Transmit, Decision::Suppress, Decision::Transmit]
    );
}

#[test]
fn rearmed_gate_measures_from_the_new_baseline() {
    let encoder = TextEncoder::binary(&EncoderConfig::default()).unwrap();
    let mut gate = ChangeDetector::new(0.15).unwrap();

    gate.observe(encoder.encode("system startup"));
    assert_eq!(
        gate.observe(encoder.encode("fire detected in sector 7")),
        Decision::Transmit
    );

    // Close to the second transmission, far from the first: suppressed,
    // proving the retained state was updated.
    assert_eq!(
        gate.observe(encoder.encode("fire detected in sector 7")),
        Decision::Suppress
    );
}

#[test]
fn unrelated_events_all_transmit() {
    let decisions = run_stream(
        0.15,
        &[
            "a cat is walking",
            "dogs are playing in the park",
            "the weather is nice today",
        ],
    );
    assert!(decisions.iter().all(|d| d.is_transmit()));
}

#[test]
fn everything_after_baseline_suppressed_at_max_threshold() {
    // Hamming-backed distances never exceed 1.0.
    let decisions = run_stream(
        1.0,
        &[
            "baseline event",
            "completely different text about quantum physics",
            "another unrelated report",
        ],
    );
    assert_eq!(decisions[0], Decision::Transmit);
    assert!(decisions[1..].iter().all(|d| *d == Decision::Suppress));
}

#[test]
fn suppression_ratio_reflects_noisy_stream() {
    let encoder = TextEncoder::binary(&EncoderConfig::default()).unwrap();
    let mut gate = ChangeDetector::new(0.15).unwrap();

    for text in [
        "system startup",
        "system startup",
        "system startup",
        "fire detected in sector 7",
        "fire detected in sector 7",
    ] {
        gate.observe(encoder.encode(text));
    }

    let stats = gate.stats();
    assert_eq!(stats.transmitted, 2);
    assert_eq!(stats.suppressed, 3);
    assert!((stats.suppression_ratio() - 0.6).abs() < f64::EPSILON);
}
