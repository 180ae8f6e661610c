//! Storage module for persisting run results.
//!
//! This module provides SQLite-based recording of aggregate results,
//! allowing parameter sweeps driven from outside to accumulate runs in one
//! place without overwriting each other.

mod database;

pub use database::{Database, DatabaseError, RunRecord};
