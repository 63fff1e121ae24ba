//! Shared test utilities used across coreper crates.

pub mod fixtures;
pub mod recording;
