//! Proteome data model: the reference mapping and immutable cell snapshots.

mod cell;
mod reference;

pub use cell::Cell;
pub use reference::ReferenceProteome;
