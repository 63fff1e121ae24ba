//! Support library for the `coreper` binary.
//!
//! Exposes the command pipeline and logging setup so doctests and tests can
//! drive experiments without spawning a subprocess.

pub mod cli;
pub mod logging;
