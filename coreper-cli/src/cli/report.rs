//! Human-readable experiment reports.
//!
//! Reports are appended, never truncated, so rerunning a batch with the same
//! prefix accumulates sections in the same files.

use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write},
    path::Path,
};

use coreper_core::{
    Color, Coloring, CorePeripheryMetrics, Graph, SimulationOutcome, color_volumes,
};

use super::experiments::ExperimentSpec;

/// Outcome counts over the repetitions of one experiment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OutcomeTally {
    wins: [usize; 2],
    undecided: usize,
    repetitions: usize,
    total_rounds: usize,
}

impl OutcomeTally {
    /// Adds one simulation outcome.
    pub fn record(&mut self, outcome: &SimulationOutcome) {
        match outcome.winning_color {
            Some(color) => self.wins[color.index()] += 1,
            None => self.undecided += 1,
        }
        self.repetitions += 1;
        self.total_rounds += outcome.rounds;
    }

    /// Returns how many runs `color` won.
    #[must_use]
    pub fn wins(&self, color: Color) -> usize {
        self.wins[color.index()]
    }

    /// Returns how many runs ended without a winner.
    #[must_use]
    pub fn undecided(&self) -> usize {
        self.undecided
    }

    /// Returns the number of recorded runs.
    #[must_use]
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Returns the mean number of rounds, or `None` before any run.
    #[must_use]
    pub fn mean_rounds(&self) -> Option<f64> {
        (self.repetitions > 0).then(|| self.total_rounds as f64 / self.repetitions as f64)
    }
}

/// Everything known about an experiment before its first run.
#[derive(Debug)]
pub struct ReportHeader<'a> {
    /// Experiment identifier.
    pub id: usize,
    /// Parsed batch line.
    pub spec: &'a ExperimentSpec,
    /// Seed the experiment's generators derive from.
    pub seed: u64,
    /// Graph the experiment runs on.
    pub graph: &'a Graph,
    /// Extracted initial coloring.
    pub initial: &'a Coloring,
    /// Dominance and robustness of the initial coloring.
    pub metrics: CorePeripheryMetrics,
}

/// Section writer for one experiment report.
#[derive(Debug)]
pub struct Report<W: Write> {
    writer: W,
}

impl Report<BufWriter<File>> {
    /// Opens `path` for appending, creating it when missing.
    ///
    /// # Errors
    /// Returns any I/O error raised while opening the file.
    pub fn append_to(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Report<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes the experiment, graph, and initial coloring sections and opens
    /// the results section.
    ///
    /// # Errors
    /// Returns any I/O error raised by the writer.
    pub fn write_header(&mut self, header: &ReportHeader<'_>) -> io::Result<()> {
        let ReportHeader {
            id,
            spec,
            seed,
            graph,
            initial,
            metrics,
        } = header;
        let w = &mut self.writer;

        heading(w, "Experiment data")?;
        writeln!(w, "ID: {id}")?;
        writeln!(w, "Graph file: {}", spec.graph_file.display())?;
        writeln!(w, "Dynamics: {}", spec.dynamics)?;
        writeln!(w, "Core extraction method: {}", spec.method)?;
        writeln!(w, "Max rounds: {}", spec.max_rounds)?;
        writeln!(w, "Win threshold: {}", spec.win_threshold)?;
        writeln!(w, "Repetitions: {}", spec.repetitions)?;
        writeln!(w, "Seed: {seed}")?;
        writeln!(w)?;

        heading(w, "Graph data")?;
        writeln!(w, "Name: {}", graph.name())?;
        writeln!(w, "Number of nodes: {}", graph.node_count())?;
        writeln!(w, "Number of edges: {}", graph.edge_count())?;
        writeln!(w)?;

        let [frac_core, frac_periphery] = initial.fractions();
        let [vol_core, vol_periphery] = color_volumes(graph, initial);
        heading(w, "Initial coloring")?;
        writeln!(w, "Fractions (core/periphery): {frac_core} {frac_periphery}")?;
        writeln!(w, "Volumes (core/periphery): {vol_core} {vol_periphery}")?;
        writeln!(w, "Dominance: {}", metrics.dominance)?;
        writeln!(w, "Robustness: {}", metrics.robustness)?;
        writeln!(w)?;

        heading(
            w,
            "Results (winner frac_core frac_periphery vol_core vol_periphery rounds)",
        )
    }

    /// Writes the result line of repetition `repetition`.
    ///
    /// # Errors
    /// Returns any I/O error raised by the writer.
    pub fn write_outcome(
        &mut self,
        repetition: usize,
        outcome: &SimulationOutcome,
    ) -> io::Result<()> {
        let [frac_core, frac_periphery] = outcome.fractions;
        let [vol_core, vol_periphery] = outcome.volumes;
        writeln!(
            self.writer,
            "Round {repetition}: {} {frac_core} {frac_periphery} {vol_core} {vol_periphery} {}",
            winner_label(outcome.winning_color),
            outcome.rounds,
        )
    }

    /// Writes the summary section.
    ///
    /// # Errors
    /// Returns any I/O error raised by the writer.
    pub fn write_summary(&mut self, tally: &OutcomeTally) -> io::Result<()> {
        let w = &mut self.writer;
        writeln!(w)?;
        heading(w, "Summary")?;
        for color in Color::ALL {
            writeln!(w, "Wins {color}: {}", tally.wins(color))?;
        }
        writeln!(w, "Wins none: {}", tally.undecided())?;
        match tally.mean_rounds() {
            Some(mean) => writeln!(w, "Mean rounds: {mean}")?,
            None => writeln!(w, "Mean rounds: n/a")?,
        }
        writeln!(w)
    }

    /// Flushes buffered output and returns the writer.
    ///
    /// # Errors
    /// Returns any I/O error raised while flushing.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Report label for an optional winner.
#[must_use]
pub fn winner_label(winner: Option<Color>) -> &'static str {
    winner.map_or("none", Color::as_str)
}

fn heading(w: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(w, "{title}")?;
    writeln!(w, "{}", "=".repeat(title.len()))
}
