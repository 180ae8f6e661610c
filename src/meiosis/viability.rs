//! Gamete viability classification.

use crate::errors::{InvalidConfiguration, InvalidProteomeState};
use crate::proteome::{Cell, ReferenceProteome};
use std::sync::Arc;

/// Classifies gametes against the configured retention thresholds.
///
/// A protein is "functional" in a gamete if its copy count is at least
/// `cutoff * reference mean` (inclusive). A gamete is viable if the fraction
/// of functional protein types is at least `crucial_prot` (inclusive). Both
/// thresholds are fixed for the lifetime of the classifier.
#[derive(Debug, Clone)]
pub struct ViabilityClassifier {
    proteome: Arc<ReferenceProteome>,
    /// Precomputed `cutoff * mean` per protein, canonical order
    thresholds: Vec<f64>,
    cutoff: f64,
    crucial_prot: f64,
}

impl ViabilityClassifier {
    /// Create a classifier.
    ///
    /// # Errors
    /// Returns an error unless `cutoff` and `crucial_prot` are both finite
    /// and in `(0, 1]`.
    pub fn new(
        proteome: Arc<ReferenceProteome>,
        cutoff: f64,
        crucial_prot: f64,
    ) -> Result<Self, InvalidConfiguration> {
        validate_fraction("cutoff", cutoff)?;
        validate_fraction("crucial_prot", crucial_prot)?;

        let thresholds = proteome.means().iter().map(|&mean| cutoff * mean).collect();

        Ok(Self {
            proteome,
            thresholds,
            cutoff,
            crucial_prot,
        })
    }

    /// The per-protein retention cutoff.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// The required fraction of functional protein types.
    pub fn crucial_prot(&self) -> f64 {
        self.crucial_prot
    }

    /// Decide whether a gamete is viable.
    ///
    /// # Errors
    /// Fails fast on a gamete with zero protein types (the functional
    /// proportion would be undefined) or one built against a different
    /// reference proteome.
    pub fn is_viable(&self, gamete: &Cell) -> Result<bool, InvalidProteomeState> {
        if gamete.is_empty() {
            return Err(InvalidProteomeState::EmptyProteome);
        }
        if !Arc::ptr_eq(gamete.reference(), &self.proteome)
            && gamete.reference().as_ref() != self.proteome.as_ref()
        {
            return Err(InvalidProteomeState::ReferenceMismatch);
        }

        let functional = gamete
            .counts()
            .iter()
            .zip(self.thresholds.iter())
            .filter(|(&count, &threshold)| count as f64 >= threshold)
            .count();

        let proportion = functional as f64 / gamete.len() as f64;
        Ok(proportion >= self.crucial_prot)
    }
}

fn validate_fraction(name: &'static str, value: f64) -> Result<(), InvalidConfiguration> {
    if !value.is_finite() {
        return Err(InvalidConfiguration::NonFinite { name, value });
    }
    if value <= 0.0 || value > 1.0 {
        return Err(InvalidConfiguration::OutOfRange { name, value });
    }
    Ok(())
}
