//! Command-line interface orchestration for coreper.
//!
//! `run` executes a batch of experiments and appends one report per
//! experiment; `extract` prints the core-periphery split of a single graph.

mod commands;
mod experiments;
mod report;

pub use commands::{
    Cli, CliError, Command, CommandOutput, ExtractCommand, ExtractionSummary, MethodArg,
    RunCommand, render_batch, render_extraction, render_output, run_cli,
};
pub use experiments::{
    ExperimentSpec, ExperimentSummary, ExperimentsError, parse_experiments, read_experiments,
    run_batch, run_experiment,
};
pub use report::{OutcomeTally, Report, ReportHeader, winner_label};

#[cfg(test)]
mod test_helpers;
