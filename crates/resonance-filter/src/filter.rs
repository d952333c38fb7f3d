//! The transmit-or-suppress gate.
//!
//! Silence is the default: a node speaks only when the meaning of what it
//! observes has moved further than the threshold from the last thing it
//! said.

use crate::{FilterError, SemanticDistance};
use tracing::{debug, info};

/// Outcome of one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The observation differs enough from the last transmission; send it.
    Transmit,
    /// The observation is semantic noise relative to the last transmission.
    Suppress,
}

impl Decision {
    /// Whether this decision transmits.
    #[inline]
    pub fn is_transmit(&self) -> bool {
        matches!(self, Decision::Transmit)
    }
}

/// Running transmission counters for one filter instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub transmitted: u64,
    pub suppressed: u64,
}

impl FilterStats {
    /// Total observations seen.
    pub fn observed(&self) -> u64 {
        self.transmitted + self.suppressed
    }

    /// Fraction of observations suppressed, 0.0 when nothing was observed.
    pub fn suppression_ratio(&self) -> f64 {
        let observed = self.observed();
        if observed == 0 {
            return 0.0;
        }
        self.suppressed as f64 / observed as f64
    }
}

/// Distance-threshold gate over a stream of semantic vectors.
///
/// The filter holds at most one vector: the last one it decided to
/// transmit. The first observation always transmits; after that, an
/// observation transmits only when its distance from the retained vector
/// exceeds the threshold, and transmitting replaces the retained vector.
/// Suppressed observations leave the state untouched, so slow semantic
/// drift eventually accumulates enough distance to transmit.
///
/// One instance serves one logical stream. Calls to
/// [`observe`](Self::observe) must be serialized by the caller; the
/// read-compare-update sequence is not internally locked.
///
/// # Example
/// ```
/// use resonance_filter::{ChangeDetector, Decision};
///
/// let mut gate = ChangeDetector::new(0.15).unwrap();
/// let baseline = vec![1.0f32, 0.0];
/// assert_eq!(gate.observe(baseline.clone()), Decision::Transmit);
/// assert_eq!(gate.observe(baseline), Decision::Suppress);
/// ```
#[derive(Debug, Clone)]
pub struct ChangeDetector<V: SemanticDistance> {
    threshold: f64,
    last_transmitted: Option<V>,
    stats: FilterStats,
}

impl<V: SemanticDistance> ChangeDetector<V> {
    /// Create a gate with the given distance threshold.
    ///
    /// # Errors
    /// Rejects a negative or non-finite threshold.
    pub fn new(threshold: f64) -> Result<Self, FilterError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(FilterError::InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            last_transmitted: None,
            stats: FilterStats::default(),
        })
    }

    /// Gate one observation.
    ///
    /// # Panics
    /// Panics if `current`'s dimension disagrees with the retained vector's
    /// (a configuration error, never coerced).
    pub fn observe(&mut self, current: V) -> Decision {
        match &self.last_transmitted {
            None => {
                info!(threshold = self.threshold, "first observation, transmitting baseline");
                self.last_transmitted = Some(current);
                self.stats.transmitted += 1;
                Decision::Transmit
            }
            Some(last) => {
                let distance = current.distance(last);
                if distance > self.threshold {
                    debug!(
                        distance,
                        threshold = self.threshold,
                        "meaning changed, transmitting"
                    );
                    self.last_transmitted = Some(current);
                    self.stats.transmitted += 1;
                    Decision::Transmit
                } else {
                    debug!(
                        distance,
                        threshold = self.threshold,
                        "semantic noise, suppressing"
                    );
                    self.stats.suppressed += 1;
                    Decision::Suppress
                }
            }
        }
    }

    /// The vector that triggered the most recent transmission, if any.
    pub fn last_transmitted(&self) -> Option<&V> {
        self.last_transmitted.as_ref()
    }

    /// Whether the gate has a baseline (has transmitted at least once).
    pub fn is_armed(&self) -> bool {
        self.last_transmitted.is_some()
    }

    /// Configured distance threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Transmission counters.
    pub fn stats(&self) -> FilterStats {
        self.stats
    }

    /// Forget the baseline and counters; the next observation transmits.
    pub fn reset(&mut self) {
        self.last_transmitted = None;
        self.stats = FilterStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resonance_hdc::BinaryVector;

    fn vector(content: &str) -> BinaryVector {
        BinaryVector::from_seed(10_000, 42, content)
    }

    #[test]
    fn test_first_observation_always_transmits() {
        let mut gate = ChangeDetector::new(0.15).unwrap();
        assert!(!gate.is_armed());
        assert_eq!(gate.observe(vector("baseline")), Decision::Transmit);
        assert!(gate.is_armed());
    }

    #[test]
    fn test_identical_observation_suppressed() {
        let mut gate = ChangeDetector::new(0.15).unwrap();
        gate.observe(vector("system startup"));
        assert_eq!(gate.observe(vector("system startup")), Decision::Suppress);
    }

    #[test]
    fn test_distant_observation_transmits_and_rearms() {
        let mut gate = ChangeDetector::new(0.15).unwrap();
        gate.observe(vector("system startup"));

        // An unrelated vector sits near distance 0.5, over the threshold.
        assert_eq!(gate.observe(vector("fire detected")), Decision::Transmit);

        // The baseline moved: the same event again is now noise.
        assert_eq!(gate.observe(vector("fire detected")), Decision::Suppress);
    }

    #[test]
    fn test_suppression_leaves_state_unchanged() {
        let mut gate = ChangeDetector::new(2.0).unwrap();
        let baseline = vector("baseline");
        gate.observe(baseline.clone());

        // Threshold 2.0 suppresses everything after the baseline.
        gate.observe(vector("anything else"));
        assert_eq!(gate.last_transmitted().unwrap().distance(&baseline), 0);
    }

    #[test]
    fn test_stats_track_decisions() {
        let mut gate = ChangeDetector::new(0.15).unwrap();
        gate.observe(vector("one"));
        gate.observe(vector("one"));
        gate.observe(vector("two"));
        gate.observe(vector("two"));

        let stats = gate.stats();
        assert_eq!(stats.transmitted, 2);
        assert_eq!(stats.suppressed, 2);
        assert_eq!(stats.observed(), 4);
        assert!((stats.suppression_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut gate = ChangeDetector::new(0.15).unwrap();
        gate.observe(vector("one"));
        gate.reset();

        assert!(!gate.is_armed());
        assert_eq!(gate.stats(), FilterStats::default());
        assert_eq!(gate.observe(vector("one")), Decision::Transmit);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        assert!(ChangeDetector::<BinaryVector>::new(-0.1).is_err());
        assert!(ChangeDetector::<BinaryVector>::new(f64::NAN).is_err());
        assert!(ChangeDetector::<BinaryVector>::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_zero_threshold_transmits_on_any_change() {
        let mut gate = ChangeDetector::new(0.0).unwrap();
        gate.observe(vector("a"));
        assert_eq!(gate.observe(vector("a")), Decision::Suppress);
        assert_eq!(gate.observe(vector("b")), Decision::Transmit);
    }

    #[test]
    fn test_float_embedding_path() {
        let mut gate = ChangeDetector::new(0.35).unwrap();
        let east = vec![1.0f32, 0.0];
        let near_east = vec![0.95f32, 0.05];
        let north = vec![0.0f32, 1.0];

        assert_eq!(gate.observe(east), Decision::Transmit);
        assert_eq!(gate.observe(near_east), Decision::Suppress);
        assert_eq!(gate.observe(north), Decision::Transmit);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn test_dimension_mismatch_panics() {
        let mut gate = ChangeDetector::new(0.15).unwrap();
        gate.observe(vec![1.0f32, 0.0]);
        gate.observe(vec![1.0f32, 0.0, 0.0]);
    }
}
