//! Founder proteome sampling.
//!
//! Cell-to-cell variability is injected at the start of each trial by drawing
//! every protein's initial copy count from a Normal distribution centered on
//! the reference expectation, with standard deviation `cv * mean`.

use crate::errors::InvalidConfiguration;
use crate::proteome::{Cell, ReferenceProteome};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::sync::Arc;

/// Draws randomized founder proteomes from the reference expectations.
#[derive(Debug, Clone)]
pub struct ProteomeSampler {
    proteome: Arc<ReferenceProteome>,
    cv: f64,
    /// Per-protein Normal(mean, cv * mean); None where the deviation is zero
    /// and the draw degenerates to the mean itself.
    distributions: Vec<Option<Normal<f64>>>,
}

impl ProteomeSampler {
    /// Create a sampler for the given reference and coefficient of variation.
    ///
    /// # Errors
    /// Returns an error if `cv` is negative or non-finite. Validation happens
    /// here, at construction, never at sampling time.
    pub fn new(
        proteome: Arc<ReferenceProteome>,
        cv: f64,
    ) -> Result<Self, InvalidConfiguration> {
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

        let distributions = proteome
            .means()
            .iter()
            .map(|&mean| {
                let std_dev = mean * cv;
                if std_dev > 0.0 {
                    // std_dev is finite and positive here, so construction
                    // cannot fail.
                    Some(Normal::new(mean, std_dev).expect("finite positive std dev"))
                } else {
                    None
                }
            })
            .collect();

        Ok(Self {
            proteome,
            cv,
            distributions,
        })
    }

    /// The coefficient of variation applied to founder draws.
    pub fn cv(&self) -> f64 {
        self.cv
    }

    /// The reference proteome draws are centered on.
    pub fn reference(&self) -> &Arc<ReferenceProteome> {
        &self.proteome
    }

    /// Draw one founder cell.
    ///
    /// Continuous draws are truncated toward zero to make integer counts.
    /// A draw that lands below zero clamps to zero; copy counts are
    /// non-negative, even when `cv` is large relative to the mean.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        let counts = self
            .proteome
            .means()
            .iter()
            .zip(self.distributions.iter())
            .map(|(&mean, dist)| {
                let draw = match dist {
                    Some(normal) => normal.sample(rng),
                    None => mean,
                };
                if draw > 0.0 {
                    draw as u64
                } else {
                    0
                }
            })
            .collect();

        Cell::with_counts(self.proteome.clone(), counts)
    }
}
