//! Simulation engine: the population driver.
//!
//! Repeats founder sampling, meiosis, and viability classification across
//! many trials and accumulates the viable-gamete tally. Trials are
//! embarrassingly parallel: each one runs on its own deterministically
//! seeded generator, so runs are reproducible regardless of how rayon
//! schedules them.

use crate::errors::{InvalidConfiguration, InvalidProteomeState};
use crate::meiosis::{meiose, ProteomeSampler, ViabilityClassifier};
use crate::proteome::ReferenceProteome;
use crate::simulation::{AggregateResult, SimulationConfig};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation handle, checked once per trial boundary.
///
/// Cloning yields a handle to the same flag, so one clone can be handed to
/// a signal handler while the engine polls another.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Trials that have not started are skipped.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Main simulation driver.
#[derive(Debug)]
pub struct Simulation {
    proteome: Arc<ReferenceProteome>,
    sampler: ProteomeSampler,
    classifier: ViabilityClassifier,
    config: SimulationConfig,
    /// Effective seed: configured, or drawn from entropy at construction
    seed: u64,
    /// Master generator; derives one base seed per run call
    rng: Xoshiro256PlusPlus,
}

impl Simulation {
    /// Create a new simulation over the given reference proteome.
    pub fn new(
        proteome: ReferenceProteome,
        config: SimulationConfig,
    ) -> Result<Self, InvalidConfiguration> {
        let proteome = Arc::new(proteome);
        let sampler = ProteomeSampler::new(proteome.clone(), config.cv())?;
        let classifier =
            ViabilityClassifier::new(proteome.clone(), config.cutoff(), config.crucial_prot())?;

        let seed = config.seed().unwrap_or_else(|| rand::rng().random());
        let rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        Ok(Self {
            proteome,
            sampler,
            classifier,
            config,
            seed,
            rng,
        })
    }

    /// The reference proteome.
    pub fn reference(&self) -> &Arc<ReferenceProteome> {
        &self.proteome
    }

    /// The simulation configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The effective seed for this simulation instance.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run the configured number of trials to completion.
    ///
    /// Memory use is constant in the trial count: only the running tallies
    /// survive a trial. The first proteome-state error aborts the whole run.
    pub fn run(&mut self) -> Result<AggregateResult, InvalidProteomeState> {
        self.run_with_cancel(&CancelToken::new())
    }

    /// Run trials until done or the token is cancelled.
    ///
    /// Cancellation is checked once per trial boundary; `trials_completed`
    /// in the result reflects the trials that actually ran.
    pub fn run_with_cancel(
        &mut self,
        cancel: &CancelToken,
    ) -> Result<AggregateResult, InvalidProteomeState> {
        self.run_with_observer(cancel, || {})
    }

    /// Run trials, invoking `on_trial` after each completed trial.
    ///
    /// The observer is called from worker threads; it is meant for cheap
    /// progress reporting.
    pub fn run_with_observer<F>(
        &mut self,
        cancel: &CancelToken,
        on_trial: F,
    ) -> Result<AggregateResult, InvalidProteomeState>
    where
        F: Fn() + Sync,
    {
        let trials = self.config.trials();
        // One base seed per run call; per-trial generators are derived from
        // it below, so the schedule of worker threads cannot affect results.
        let base_seed: u64 = self.rng.random();

        log::info!(
            "starting run: {} trials, cutoff {}, crucial_prot {}, cv {}, seed {}",
            trials,
            self.config.cutoff(),
            self.config.crucial_prot(),
            self.config.cv(),
            self.seed
        );

        let sampler = &self.sampler;
        let classifier = &self.classifier;

        let (completed, total, viable) = (0..trials)
            .into_par_iter()
            .map(|trial| -> Result<(u64, u64, u64), InvalidProteomeState> {
                if cancel.is_cancelled() {
                    return Ok((0, 0, 0));
                }

                let mut rng = Xoshiro256PlusPlus::seed_from_u64(trial_seed(base_seed, trial));
                let founder = sampler.sample(&mut rng);
                let gametes = meiose(&founder, &mut rng);

                let mut viable = 0u64;
                for gamete in &gametes {
                    if classifier.is_viable(gamete)? {
                        viable += 1;
                    }
                }

                on_trial();
                Ok((1, gametes.len() as u64, viable))
            })
            .try_reduce(
                || (0, 0, 0),
                |a, b| Ok((a.0 + b.0, a.1 + b.1, a.2 + b.2)),
            )?;

        let result = AggregateResult {
            cutoff: self.config.cutoff(),
            crucial_prot: self.config.crucial_prot(),
            cv: self.config.cv(),
            seed: self.seed,
            trials_requested: trials,
            trials_completed: completed as usize,
            total_gametes: total,
            viable_gametes: viable,
        };

        log::info!(
            "run finished: {}/{} gametes viable ({:.4})",
            result.viable_gametes,
            result.total_gametes,
            result.viable_fraction()
        );

        Ok(result)
    }
}

/// Derive a per-trial seed from the run's base seed and the trial index.
/// `seed_from_u64` feeds this through SplitMix64, so consecutive indices
/// still yield well-separated streams.
fn trial_seed(base_seed: u64, trial: usize) -> u64 {
    base_seed ^ (trial as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
