//! Aggregate run results.

use serde::{Deserialize, Serialize};

/// The outcome of one simulation run: tallies plus the parameters used.
///
/// This is the value handed to the result sink. It carries the effective
/// seed, so a result is enough to reproduce the run bit for bit; the unique
/// per-run identifier is assigned by the sink at insert time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Per-protein retention cutoff used
    pub cutoff: f64,
    /// Required fraction of functional protein types used
    pub crucial_prot: f64,
    /// Coefficient of variation used for founder sampling
    pub cv: f64,
    /// Effective RNG seed (configured, or drawn from entropy at startup)
    pub seed: u64,
    /// Trials requested
    pub trials_requested: usize,
    /// Trials actually completed (lower than requested only on cancellation)
    pub trials_completed: usize,
    /// Total gametes produced (4 per completed trial)
    pub total_gametes: u64,
    /// Gametes classified as viable
    pub viable_gametes: u64,
}

impl AggregateResult {
    /// Fraction of produced gametes that were viable. Zero when no gametes
    /// were produced.
    pub fn viable_fraction(&self) -> f64 {
        if self.total_gametes == 0 {
            0.0
        } else {
            self.viable_gametes as f64 / self.total_gametes as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> AggregateResult {
        AggregateResult {
            cutoff: 0.5,
            crucial_prot: 0.8,
            cv: 0.2,
            seed: 42,
            trials_requested: 100,
            trials_completed: 100,
            total_gametes: 400,
            viable_gametes: 100,
        }
    }

    #[test]
    fn test_viable_fraction() {
        assert_eq!(sample_result().viable_fraction(), 0.25);
    }

    #[test]
    fn test_viable_fraction_zero_gametes() {
        let result = AggregateResult {
            total_gametes: 0,
            viable_gametes: 0,
            trials_completed: 0,
            ..sample_result()
        };
        assert_eq!(result.viable_fraction(), 0.0);
    }

    #[test]
    fn test_result_json_round_trip() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let parsed: AggregateResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
