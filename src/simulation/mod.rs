//! Simulation orchestration: configuration, the trial-driving engine, and
//! aggregate results.

mod builder;
mod engine;
mod parameters;
mod results;

pub use builder::SimulationBuilder;
pub use engine::{CancelToken, Simulation};
pub use parameters::{SimulationConfig, DEFAULT_CV};
pub use results::AggregateResult;
