//! Builder pattern for creating simulations.
//!
//! Provides a fluent API for configuring and creating simulations with
//! sensible defaults and comprehensive validation.

use crate::errors::BuilderError;
use crate::proteome::ReferenceProteome;
use crate::simulation::{Simulation, SimulationConfig, DEFAULT_CV};

/// Builder for constructing [`Simulation`] instances with a fluent API.
///
/// # Examples
///
/// ```
/// use spermsim::proteome::ReferenceProteome;
/// use spermsim::simulation::SimulationBuilder;
///
/// let reference = ReferenceProteome::new([("A", 100.0), ("B", 50.0)]).unwrap();
///
/// let sim = SimulationBuilder::new()
///     .reference(reference)
///     .cutoff(0.5)
///     .crucial_prot(0.8)
///     .trials(10_000)
///     .seed(42)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct SimulationBuilder {
    // Required parameters
    reference: Option<ReferenceProteome>,
    cutoff: Option<f64>,
    crucial_prot: Option<f64>,

    // Optional parameters (with defaults)
    cv: f64,          // Default: 0.2
    trials: usize,    // Default: 1000
    seed: Option<u64>, // Default: None (random)
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBuilder {
    /// Create a new simulation builder with default values.
    pub fn new() -> Self {
        Self {
            reference: None,
            cutoff: None,
            crucial_prot: None,
            cv: DEFAULT_CV,
            trials: 1000,
            seed: None,
        }
    }

    /// Set the reference proteome (required).
    pub fn reference(mut self, reference: ReferenceProteome) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Set the per-protein retention cutoff (required).
    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    /// Set the required fraction of functional protein types (required).
    pub fn crucial_prot(mut self, crucial_prot: f64) -> Self {
        self.crucial_prot = Some(crucial_prot);
        self
    }

    /// Set the coefficient of variation for founder sampling (default: 0.2).
    pub fn cv(mut self, cv: f64) -> Self {
        self.cv = cv;
        self
    }

    /// Set the number of trials to run (default: 1000).
    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Set the random seed for reproducibility (default: None = random).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build and validate the simulation.
    pub fn build(self) -> Result<Simulation, BuilderError> {
        let reference = self
            .reference
            .ok_or(BuilderError::MissingRequired("reference"))?;
        let cutoff = self.cutoff.ok_or(BuilderError::MissingRequired("cutoff"))?;
        let crucial_prot = self
            .crucial_prot
            .ok_or(BuilderError::MissingRequired("crucial_prot"))?;

        let config = SimulationConfig::new(cutoff, crucial_prot, self.cv, self.trials, self.seed)
            .map_err(|e| BuilderError::InvalidParameter(e.to_string()))?;

        Simulation::new(reference, config)
            .map_err(|e| BuilderError::InvalidParameter(e.to_string()))
    }
}
