//! Simulation parameters and configuration.

use crate::errors::InvalidConfiguration;
use serde::{Deserialize, Serialize};

/// Default coefficient of variation for founder sampling.
pub const DEFAULT_CV: f64 = 0.2;

/// High-level simulation parameters.
///
/// Validated eagerly at construction and fixed for the lifetime of one
/// simulator instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Minimum fraction of the reference count a protein must retain to
    /// count as present, in (0, 1]
    cutoff: f64,
    /// Minimum fraction of protein types that must be present for a gamete
    /// to be viable, in (0, 1]
    crucial_prot: f64,
    /// Coefficient of variation for founder sampling, >= 0
    cv: f64,
    /// Number of trials; each trial produces 4 gametes
    trials: usize,
    /// Optional RNG seed for reproducibility
    seed: Option<u64>,
}

impl SimulationConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    /// Returns an error if `cutoff` or `crucial_prot` is outside `(0, 1]`,
    /// `cv` is negative or non-finite, or `trials` is zero.
    pub fn new(
        cutoff: f64,
        crucial_prot: f64,
        cv: f64,
        trials: usize,
        seed: Option<u64>,
    ) -> Result<Self, InvalidConfiguration> {
        check_fraction("cutoff", cutoff)?;
        check_fraction("crucial_prot", crucial_prot)?;
        if !cv.is_finite() {
            return Err(InvalidConfiguration::NonFinite {
                name: "cv",
                value: cv,
            });
        }
        if cv < 0.0 {
            return Err(InvalidConfiguration::OutOfRange {
                name: "cv",
                value: cv,
            });
        }
        if trials == 0 {
            return Err(InvalidConfiguration::ZeroTrials);
        }

        Ok(Self {
            cutoff,
            crucial_prot,
            cv,
            trials,
            seed,
        })
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn crucial_prot(&self) -> f64 {
        self.crucial_prot
    }

    pub fn cv(&self) -> f64 {
        self.cv
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), InvalidConfiguration> {
    if !value.is_finite() {
        return Err(InvalidConfiguration::NonFinite { name, value });
    }
    if value <= 0.0 || value > 1.0 {
        return Err(InvalidConfiguration::OutOfRange { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = SimulationConfig::new(0.5, 0.8, 0.2, 1000, Some(42)).unwrap();

        assert_eq!(config.cutoff(), 0.5);
        assert_eq!(config.crucial_prot(), 0.8);
        assert_eq!(config.cv(), 0.2);
        assert_eq!(config.trials(), 1000);
        assert_eq!(config.seed(), Some(42));
    }

    #[test]
    fn test_config_boundary_values() {
        // 1.0 is inclusive for both fractions; cv = 0 is allowed.
        assert!(SimulationConfig::new(1.0, 1.0, 0.0, 1, None).is_ok());
    }

    #[test]
    fn test_config_rejects_zero_cutoff() {
        let result = SimulationConfig::new(0.0, 0.8, 0.2, 1000, None);
        assert!(matches!(
            result.unwrap_err(),
            InvalidConfiguration::OutOfRange { name: "cutoff", .. }
        ));
    }

    #[test]
    fn test_config_rejects_cutoff_above_one() {
        assert!(SimulationConfig::new(1.01, 0.8, 0.2, 1000, None).is_err());
    }

    #[test]
    fn test_config_rejects_bad_crucial_prot() {
        assert!(SimulationConfig::new(0.5, -0.1, 0.2, 1000, None).is_err());
        assert!(SimulationConfig::new(0.5, f64::INFINITY, 0.2, 1000, None).is_err());
    }

    #[test]
    fn test_config_rejects_negative_cv() {
        let result = SimulationConfig::new(0.5, 0.8, -0.2, 1000, None);
        assert!(matches!(
            result.unwrap_err(),
            InvalidConfiguration::OutOfRange { name: "cv", .. }
        ));
    }

    #[test]
    fn test_config_rejects_zero_trials() {
        let result = SimulationConfig::new(0.5, 0.8, 0.2, 0, None);
        assert_eq!(result.unwrap_err(), InvalidConfiguration::ZeroTrials);
    }
}
