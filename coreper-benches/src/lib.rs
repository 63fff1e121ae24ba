//! Benchmark support crate for coreper.
//!
//! Provides a planted core-periphery edge-list generator and parameter types
//! used by the Criterion benchmarks for graph construction, extraction, and
//! simulation.

pub mod error;
pub mod params;
pub mod planted;
