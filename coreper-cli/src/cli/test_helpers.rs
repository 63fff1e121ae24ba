//! Small helpers shared across CLI tests.

use std::fs;
use std::path::{Path, PathBuf};

use coreper_test_support::fixtures::{K4_WITH_TAIL, write_edge_list};
use tempfile::TempDir;

use super::{Cli, CliError, Command, CommandOutput, ExperimentSummary, RunCommand, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

/// Writes the K4-with-tail graph and a batch file listing `lines`.
pub(super) fn write_batch(dir: &TempDir, lines: &str) -> PathBuf {
    if let Err(err) = write_edge_list(dir.path(), "k4_tail.txt", K4_WITH_TAIL) {
        panic!("failed to write graph fixture: {err}");
    }
    let path = dir.path().join("batch.txt");
    if let Err(err) = fs::write(&path, lines) {
        panic!("failed to write batch file: {err}");
    }
    path
}

pub(super) fn prefix_in(dir: &Path, prefix: &str) -> String {
    dir.join(prefix).to_string_lossy().into_owned()
}

pub(super) fn run_batch_cli(experiments: PathBuf, prefix: String, seed: u64) -> Vec<ExperimentSummary> {
    let cli = Cli {
        command: Command::Run(RunCommand {
            experiments,
            prefix,
            seed,
        }),
    };
    match run_cli(cli) {
        Ok(CommandOutput::Batch(summaries)) => summaries,
        Ok(other) => panic!("run produced unexpected output: {other:?}"),
        Err(err) => panic!("run failed: {err}"),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn read_report(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => panic!("failed to read report {}: {err}", path.display()),
    }
}
