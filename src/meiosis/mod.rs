//! Meiosis operators: founder sampling, binomial segregation, and gamete
//! viability classification.

mod division;
mod sampler;
mod viability;

pub use division::{meiose, split};
pub use sampler::ProteomeSampler;
pub use viability::ViabilityClassifier;
