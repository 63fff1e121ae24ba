//! Batch experiment files and their execution.
//!
//! A batch file lists one experiment per line:
//!
//! ```text
//! # graph_file dynamics method max_rounds win_threshold repetitions
//! graphs/karate.txt VoterModel KRichClub -1 0.9 100
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Relative graph paths
//! resolve against the directory holding the batch file.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use coreper_core::{
    Color, CoreMethod, DynamicsKind, GraphBuilder, GraphError, ParseNameError, RandomSource,
    RoundLimit, Simulation, derive_seed, dominance_and_robustness, extract_core_periphery,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::report::{OutcomeTally, Report, ReportHeader};

const FIELD_NAMES: [&str; 6] = [
    "graph_file",
    "dynamics",
    "method",
    "max_rounds",
    "win_threshold",
    "repetitions",
];
const GRAPH_STREAM: u64 = 0;
const DYNAMICS_STREAM: u64 = 1;

/// One parsed line of a batch file.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentSpec {
    /// 1-based line number in the batch file.
    pub line: usize,
    /// Edge-list path, already resolved against the batch file directory.
    pub graph_file: PathBuf,
    /// Opinion dynamics to simulate.
    pub dynamics: DynamicsKind,
    /// Extraction method producing the initial coloring.
    pub method: CoreMethod,
    /// Round limit per repetition.
    pub max_rounds: RoundLimit,
    /// Volume share a color needs to win.
    pub win_threshold: f64,
    /// Number of simulation runs.
    pub repetitions: usize,
}

/// Errors raised while reading or executing a batch file.
#[derive(Debug, Error)]
pub enum ExperimentsError {
    /// The batch file could not be opened.
    #[error("failed to open experiments file `{path}`: {source}")]
    Open {
        /// Batch file path.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading the batch file failed.
    #[error("failed to read experiments file `{path}` at line {line}: {source}")]
    Read {
        /// Batch file path.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A data line ended before all six fields were read.
    #[error("line {line} of `{path}` is missing the `{field}` field")]
    MissingField {
        /// Batch file path.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Name of the first missing field.
        field: &'static str,
    },
    /// A dynamics, method, or round-limit token was not recognised.
    #[error("line {line} of `{path}`: {source}")]
    InvalidToken {
        /// Batch file path.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Parse failure naming the accepted tokens.
        #[source]
        source: ParseNameError,
    },
    /// A numeric field could not be parsed.
    #[error("line {line} of `{path}`: `{value}` is not a valid {field}")]
    InvalidNumber {
        /// Batch file path.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Field name.
        field: &'static str,
        /// Raw token.
        value: String,
    },
    /// The graph of an experiment could not be built.
    #[error("experiment {id} (line {line}) failed to build its graph: {source}")]
    Graph {
        /// Experiment identifier.
        id: usize,
        /// 1-based line number of the experiment.
        line: usize,
        /// Underlying graph error.
        #[source]
        source: GraphError,
    },
    /// Writing a report failed.
    #[error("failed to write report `{path}`: {source}")]
    Report {
        /// Report path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl ExperimentsError {
    /// Returns the graph error behind this failure, if any.
    #[must_use]
    pub fn graph_error(&self) -> Option<&GraphError> {
        match self {
            Self::Graph { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Aggregated outcome of one experiment.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentSummary {
    /// 0-based position of the experiment in the batch file.
    pub id: usize,
    /// Data-source name of the graph.
    pub graph_name: String,
    /// Node count after connectivity filtering.
    pub nodes: usize,
    /// Undirected edge count.
    pub edges: usize,
    /// Number of nodes in the initial core.
    pub core_size: usize,
    /// Outcome counts over all repetitions.
    pub tally: OutcomeTally,
    /// File the report was appended to.
    pub report_path: PathBuf,
}

/// Reads every experiment listed in the batch file at `path`.
///
/// # Errors
/// Returns [`ExperimentsError`] when the file cannot be read or a line is
/// malformed.
pub fn read_experiments(path: &Path) -> Result<Vec<ExperimentSpec>, ExperimentsError> {
    let file = File::open(path).map_err(|source| ExperimentsError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_experiments(path, BufReader::new(file))
}

/// Parses batch lines from `reader`; `path` names the source for errors and
/// anchors relative graph paths.
///
/// # Errors
/// Returns [`ExperimentsError`] for the first unreadable or malformed line.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use coreper_cli::cli::parse_experiments;
/// use coreper_core::{CoreMethod, DynamicsKind, RoundLimit};
///
/// let specs = parse_experiments(
///     Path::new("batches/run.txt"),
///     "# comment\nkarate.txt TwoChoices DensestCore 50 0.75 3\n".as_bytes(),
/// )
/// .expect("batch parses");
/// assert_eq!(specs[0].graph_file, Path::new("batches/karate.txt"));
/// assert_eq!(specs[0].dynamics, DynamicsKind::TwoChoices);
/// assert_eq!(specs[0].method, CoreMethod::DensestCore);
/// assert_eq!(specs[0].max_rounds, RoundLimit::Fixed(50));
/// assert_eq!(specs[0].repetitions, 3);
/// ```
pub fn parse_experiments<R: BufRead>(
    path: &Path,
    reader: R,
) -> Result<Vec<ExperimentSpec>, ExperimentsError> {
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let mut specs = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| ExperimentsError::Read {
            path: path.to_path_buf(),
            line: line_number,
            source,
        })?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        specs.push(parse_line(path, base, line_number, &line)?);
    }
    Ok(specs)
}

fn parse_line(
    path: &Path,
    base: &Path,
    line: usize,
    content: &str,
) -> Result<ExperimentSpec, ExperimentsError> {
    let mut tokens = content.split_whitespace();
    let mut fields = [""; 6];
    for (slot, field) in fields.iter_mut().zip(FIELD_NAMES) {
        *slot = tokens.next().ok_or_else(|| ExperimentsError::MissingField {
            path: path.to_path_buf(),
            line,
            field,
        })?;
    }
    let [graph_file, dynamics, method, max_rounds, win_threshold, repetitions] = fields;

    let invalid_token = |source| ExperimentsError::InvalidToken {
        path: path.to_path_buf(),
        line,
        source,
    };
    let invalid_number = |field, value: &str| ExperimentsError::InvalidNumber {
        path: path.to_path_buf(),
        line,
        field,
        value: value.to_owned(),
    };

    let win_threshold = win_threshold
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid_number("win_threshold", win_threshold))?;
    let repetitions = repetitions
        .parse::<usize>()
        .map_err(|_| invalid_number("repetitions", repetitions))?;

    Ok(ExperimentSpec {
        line,
        graph_file: base.join(graph_file),
        dynamics: dynamics.parse::<DynamicsKind>().map_err(invalid_token)?,
        method: method.parse::<CoreMethod>().map_err(invalid_token)?,
        max_rounds: max_rounds.parse::<RoundLimit>().map_err(invalid_token)?,
        win_threshold,
        repetitions,
    })
}

/// Runs every experiment in the batch file, appending reports to
/// `{prefix}{id}`.
///
/// # Errors
/// Returns [`ExperimentsError`] for the first failing experiment; reports of
/// earlier experiments remain on disk.
#[instrument(
    name = "cli.run_batch",
    err,
    skip(path, prefix, seed),
    fields(path = %path.display(), seed = seed, experiments = field::Empty),
)]
pub fn run_batch(
    path: &Path,
    prefix: &str,
    seed: u64,
) -> Result<Vec<ExperimentSummary>, ExperimentsError> {
    let specs = read_experiments(path)?;
    Span::current().record("experiments", specs.len());
    specs
        .iter()
        .enumerate()
        .map(|(id, spec)| run_experiment(id, spec, prefix, derive_seed(seed, id as u64)))
        .collect()
}

/// Runs one experiment and appends its report to `{prefix}{id}`.
///
/// # Errors
/// Returns [`ExperimentsError::Graph`] when the graph cannot be built and
/// [`ExperimentsError::Report`] when the report cannot be written.
#[instrument(
    name = "cli.experiment",
    err,
    skip(spec, prefix, seed),
    fields(graph_file = %spec.graph_file.display(), dynamics = %spec.dynamics, method = %spec.method),
)]
pub fn run_experiment(
    id: usize,
    spec: &ExperimentSpec,
    prefix: &str,
    seed: u64,
) -> Result<ExperimentSummary, ExperimentsError> {
    let graph = GraphBuilder::new()
        .with_seed(derive_seed(seed, GRAPH_STREAM))
        .build_from_path(&spec.graph_file)
        .map_err(|source| ExperimentsError::Graph {
            id,
            line: spec.line,
            source,
        })?;
    let initial = extract_core_periphery(&graph, spec.method);
    let core_size = initial.count(Color::Core);
    let metrics = dominance_and_robustness(&graph, &initial);

    let report_path = PathBuf::from(format!("{prefix}{id}"));
    let report_error = |source| ExperimentsError::Report {
        path: report_path.clone(),
        source,
    };
    let mut report = Report::append_to(&report_path).map_err(report_error)?;
    report
        .write_header(&ReportHeader {
            id,
            spec,
            seed,
            graph: &graph,
            initial: &initial,
            metrics,
        })
        .map_err(report_error)?;

    let mut simulation = Simulation::new(
        &graph,
        spec.dynamics,
        initial,
        RandomSource::from_seed(derive_seed(seed, DYNAMICS_STREAM)),
    );
    let mut tally = OutcomeTally::default();
    for repetition in 0..spec.repetitions {
        let outcome = simulation.run(spec.max_rounds, spec.win_threshold);
        report
            .write_outcome(repetition, &outcome)
            .map_err(report_error)?;
        tally.record(&outcome);
    }
    report.write_summary(&tally).map_err(report_error)?;
    report.finish().map_err(report_error)?;

    info!(
        id,
        graph = graph.name(),
        core_size,
        repetitions = spec.repetitions,
        "experiment completed"
    );
    Ok(ExperimentSummary {
        id,
        graph_name: graph.name().to_owned(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        core_size,
        tally,
        report_path,
    })
}
