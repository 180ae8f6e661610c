//! Commonly used imports for convenience.
//!
//! This prelude module provides a convenient way to import the most commonly
//! used types in the spermsim library.
//!
//! # Example
//!
//! ```
//! use spermsim::prelude::*;
//!
//! let reference = ReferenceProteome::new([("A", 100.0)]).unwrap();
//! let sim = SimulationBuilder::new()
//!     .reference(reference)
//!     .cutoff(0.5)
//!     .crucial_prot(1.0)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! ```

pub use crate::errors::{InvalidConfiguration, InvalidProteomeState};
pub use crate::meiosis::{meiose, split, ProteomeSampler, ViabilityClassifier};
pub use crate::proteome::{Cell, ReferenceProteome};
pub use crate::simulation::{
    AggregateResult, CancelToken, Simulation, SimulationBuilder, SimulationConfig,
};
pub use crate::storage::{Database, RunRecord};
