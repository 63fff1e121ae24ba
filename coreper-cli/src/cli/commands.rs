//! Command definitions and dispatch for the `coreper` binary.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use coreper_core::{
    Color, Coloring, CoreMethod, DEFAULT_SEED, EdgeTally, Graph, GraphBuilder, GraphError,
    GraphErrorCode, edge_tally, extract_core_periphery,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::experiments::{ExperimentSummary, ExperimentsError, run_batch};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "coreper",
    about = "Extract core-periphery splits and simulate opinion dynamics on them."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run every experiment listed in a batch file.
    Run(RunCommand),
    /// Print the core-periphery split of a single graph.
    Extract(ExtractCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Batch file with one experiment per line.
    pub experiments: PathBuf,

    /// Prefix of the report files; experiment `i` appends to `<PREFIX>i`.
    pub prefix: String,

    /// Base seed for every experiment.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// Options accepted by the `extract` command.
#[derive(Debug, Args, Clone)]
pub struct ExtractCommand {
    /// Edge-list file.
    pub graph: PathBuf,

    /// Extraction method.
    #[arg(long, value_enum, default_value_t = MethodArg::RichClub)]
    pub method: MethodArg,

    /// Seed for graph construction.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Override name for the graph (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,
}

/// Extraction methods selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// Degree-ordered rich-club threshold.
    RichClub,
    /// Iterative densest-subgraph peeling.
    DensestCore,
}

impl From<MethodArg> for CoreMethod {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::RichClub => Self::RichClub,
            MethodArg::DensestCore => Self::DensestCore,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Building the graph for `extract` failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Reading or running a batch failed.
    #[error(transparent)]
    Experiments(#[from] ExperimentsError),
}

impl CliError {
    /// Returns the stable code of the underlying graph error, if any.
    #[must_use]
    pub fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph(err) => Some(err.code()),
            Self::Experiments(err) => err.graph_error().map(GraphError::code),
        }
    }
}

/// Core-periphery split of one graph.
#[derive(Debug, Clone)]
pub struct ExtractionSummary {
    /// The built graph.
    pub graph: Graph,
    /// Method used for the split.
    pub method: CoreMethod,
    /// The split itself.
    pub coloring: Coloring,
    /// Edge counts by endpoint colors.
    pub tally: EdgeTally,
}

/// Result of a CLI command, ready to render.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// One summary per executed experiment.
    Batch(Vec<ExperimentSummary>),
    /// Split of a single graph.
    Extraction(ExtractionSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when graph construction or batch execution fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use coreper_cli::cli::{Cli, Command, CommandOutput, ExtractCommand, MethodArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "a b\nb c\nc a\n")?;
/// let cli = Cli {
///     command: Command::Extract(ExtractCommand {
///         graph: file.path().to_path_buf(),
///         method: MethodArg::RichClub,
///         seed: 42,
///         name: Some("triangle".into()),
///     }),
/// };
/// let CommandOutput::Extraction(summary) = run_cli(cli)? else {
///     unreachable!("extract yields an extraction");
/// };
/// assert_eq!(summary.graph.name(), "triangle");
/// assert_eq!(summary.tally.total(), 3);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<CommandOutput, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(&run).map(CommandOutput::Batch)
        }
        Command::Extract(extract) => {
            Span::current().record("command", field::display("extract"));
            extract_command(extract).map(CommandOutput::Extraction)
        }
    }
}

pub(super) fn run_command(command: &RunCommand) -> Result<Vec<ExperimentSummary>, CliError> {
    let summaries = run_batch(&command.experiments, &command.prefix, command.seed)?;
    info!(experiments = summaries.len(), "batch completed");
    Ok(summaries)
}

#[instrument(
    name = "cli.extract",
    err,
    skip(command),
    fields(path = %command.graph.display(), method = field::Empty),
)]
pub(super) fn extract_command(command: ExtractCommand) -> Result<ExtractionSummary, CliError> {
    let ExtractCommand {
        graph: path,
        method,
        seed,
        name,
    } = command;
    let method = CoreMethod::from(method);
    Span::current().record("method", field::display(method));

    let builder = GraphBuilder::new().with_seed(seed);
    let builder = match name {
        Some(name) => builder.with_name(name),
        None => builder,
    };
    let graph = builder.build_from_path(&path)?;
    let coloring = extract_core_periphery(&graph, method);
    let tally = edge_tally(&graph, &coloring);
    Ok(ExtractionSummary {
        graph,
        method,
        coloring,
        tally,
    })
}

/// Renders `output` to `writer` as plain text.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
pub fn render_output(output: &CommandOutput, writer: impl Write) -> io::Result<()> {
    match output {
        CommandOutput::Batch(summaries) => render_batch(summaries, writer),
        CommandOutput::Extraction(summary) => render_extraction(summary, writer),
    }
}

/// Renders one tab-separated row per experiment.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
pub fn render_batch(summaries: &[ExperimentSummary], mut writer: impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "id\tgraph\tnodes\tedges\tcore\twins_core\twins_periphery\twins_none\tmean_rounds\treport"
    )?;
    for summary in summaries {
        let tally = &summary.tally;
        let mean = tally
            .mean_rounds()
            .map_or_else(|| "n/a".to_owned(), |mean| format!("{mean:.2}"));
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{mean}\t{}",
            summary.id,
            summary.graph_name,
            summary.nodes,
            summary.edges,
            summary.core_size,
            tally.wins(Color::Core),
            tally.wins(Color::Periphery),
            tally.undecided(),
            summary.report_path.display(),
        )?;
    }
    Ok(())
}

/// Renders graph statistics, the split metrics, and one line per node.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use coreper_cli::cli::{ExtractionSummary, render_extraction};
/// # use coreper_core::{CoreMethod, GraphBuilder, edge_tally, extract_core_periphery};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let graph = GraphBuilder::new().with_name("pair").build_from_edges([("x", "y")]);
/// let coloring = extract_core_periphery(&graph, CoreMethod::RichClub);
/// let tally = edge_tally(&graph, &coloring);
/// let summary = ExtractionSummary { graph, method: CoreMethod::RichClub, coloring, tally };
///
/// let mut buffer = Vec::new();
/// render_extraction(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.ends_with("x\tcore\ny\tcore\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_extraction(summary: &ExtractionSummary, mut writer: impl Write) -> io::Result<()> {
    let ExtractionSummary {
        graph,
        method,
        coloring,
        tally,
    } = summary;
    let metrics = tally.metrics();
    writeln!(writer, "graph: {}", graph.name())?;
    writeln!(writer, "nodes: {}", graph.node_count())?;
    writeln!(writer, "edges: {}", graph.edge_count())?;
    writeln!(writer, "method: {method}")?;
    writeln!(writer, "core size: {}", coloring.count(Color::Core))?;
    writeln!(writer, "core-core edges: {}", tally.core_core)?;
    writeln!(writer, "core-periphery edges: {}", tally.core_periphery)?;
    writeln!(writer, "periphery-periphery edges: {}", tally.periphery_periphery)?;
    writeln!(writer, "dominance: {}", metrics.dominance)?;
    writeln!(writer, "robustness: {}", metrics.robustness)?;
    for node in graph.nodes() {
        writeln!(writer, "{}\t{}", graph.external_name(node), coloring.get(node))?;
    }
    Ok(())
}
