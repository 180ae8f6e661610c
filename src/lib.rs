//! Spermsim: a simulator of stochastic protein partitioning during
//! spermatogenesis.
//!
//! A founder cell's proteome is drawn from a reference expectation with
//! configurable cell-to-cell variability, then pushed through two rounds of
//! binomial segregation (meiosis I and II) to produce four gametes. Each
//! gamete is classified as viable or not against per-protein retention
//! thresholds, and a Monte Carlo driver aggregates viable-gamete counts
//! across many independent trials.

pub mod errors;
pub mod meiosis;
pub mod prelude;
pub mod proteome;
pub mod simulation;
pub mod storage;

// Re-export commonly used types for convenient external access.
//
// These types form the public, stable surface that most consumers of the
// library will use when configuring and running simulations.
pub use proteome::{Cell, ReferenceProteome};
pub use simulation::{AggregateResult, Simulation, SimulationBuilder, SimulationConfig};
