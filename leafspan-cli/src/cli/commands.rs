//! Command implementations and argument parsing for the leafspan CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand, ValueEnum};
use leafspan_core::{
    CancellationToken, Graph, GraphError, SolveOutcome, SolverKind, solve_with_timeout,
};
use leafspan_providers_edgelist::{EdgeListError, EdgeListProvider};
use leafspan_providers_gml::{GmlError, GmlProvider};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::bench::{self, BenchSummary, SeriesOutcome};

const DEFAULT_RUNS: usize = 3;
const DEFAULT_BASELINE_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_SOTA_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_BASELINE_VERTEX_LIMIT: usize = 30;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "leafspan",
    about = "Decide whether a graph has a spanning tree with exactly k leaves."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run one solver once and report its answer.
    Solve(SolveCommand),
    /// Time the solvers over repeated runs and print a markdown row.
    Bench(BenchCommand),
}

/// Options accepted by the `solve` command.
#[derive(Debug, Args, Clone)]
pub struct SolveCommand {
    /// Required number of leaves.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub k: usize,

    /// Decision procedure to run.
    #[arg(long, value_enum, default_value_t = Algorithm::BranchAndBound)]
    pub algorithm: Algorithm,

    /// Abandon the search after this many milliseconds.
    #[arg(long = "timeout-ms")]
    pub timeout_ms: Option<u64>,

    /// Graph to solve.
    #[command(subcommand)]
    pub source: GraphSource,
}

/// Options accepted by the `bench` command.
#[derive(Debug, Args, Clone)]
pub struct BenchCommand {
    /// Runs per solver.
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    pub runs: usize,

    /// Per-run deadline for the baseline solver.
    #[arg(long = "baseline-timeout-ms", default_value_t = DEFAULT_BASELINE_TIMEOUT_MS)]
    pub baseline_timeout_ms: u64,

    /// Per-run deadline for the branch-and-bound solver.
    #[arg(long = "sota-timeout-ms", default_value_t = DEFAULT_SOTA_TIMEOUT_MS)]
    pub sota_timeout_ms: u64,

    /// The baseline only runs on graphs with fewer vertices than this.
    #[arg(long = "baseline-vertex-limit", default_value_t = DEFAULT_BASELINE_VERTEX_LIMIT)]
    pub baseline_vertex_limit: usize,

    /// Run only branch and bound and print a scalability row with an `N-k`
    /// column.
    #[arg(long = "sota-only")]
    pub sota_only: bool,

    /// Required number of leaves (defaults to half the vertex count).
    #[arg(long)]
    pub k: Option<usize>,

    /// Graph to benchmark.
    #[command(subcommand)]
    pub source: GraphSource,
}

/// Graphs the CLI can load.
#[derive(Debug, Subcommand, Clone)]
pub enum GraphSource {
    /// Synthetic rows x cols lattice.
    Grid(GridArgs),
    /// Whitespace-separated edge list, one `u v` pair per line.
    EdgeList(FileArgs),
    /// Graph Modelling Language document.
    Gml(FileArgs),
}

/// Grid dimensions.
#[derive(Debug, Args, Clone, Copy)]
pub struct GridArgs {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

/// File ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct FileArgs {
    /// Path to the graph file.
    pub path: PathBuf,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Solver selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Exhaustive edge-subset search.
    Baseline,
    /// Role-assignment branch and bound.
    BranchAndBound,
}

impl From<Algorithm> for SolverKind {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Baseline => Self::Baseline,
            Algorithm::BranchAndBound => Self::BranchAndBound,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// Synthetic graph construction failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Edge-list ingestion failed.
    #[error(transparent)]
    EdgeList(#[from] EdgeListError),
    /// GML ingestion failed.
    #[error(transparent)]
    Gml(#[from] GmlError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionSummary {
    /// Result of `solve`.
    Solve(SolveSummary),
    /// Result of `bench`.
    Bench(BenchSummary),
}

/// Result of a single solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveSummary {
    /// Name of the graph source.
    pub data_source: String,
    /// Vertex count of the loaded graph.
    pub vertices: usize,
    /// Edge count of the loaded graph.
    pub edges: usize,
    /// Requested leaf count.
    pub k: usize,
    /// Solver that produced the answer.
    pub algorithm: SolverKind,
    /// Answer, or [`SolveOutcome::TimedOut`].
    pub outcome: SolveOutcome,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the graph cannot be loaded or built.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use leafspan_cli::cli::{
/// #     Algorithm, Cli, Command, ExecutionSummary, GraphSource, GridArgs, SolveCommand, run_cli,
/// # };
/// # use leafspan_core::SolveOutcome;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Solve(SolveCommand {
///         k: 5,
///         algorithm: Algorithm::BranchAndBound,
///         timeout_ms: None,
///         source: GraphSource::Grid(GridArgs { rows: 3, cols: 3 }),
///     }),
/// };
/// let ExecutionSummary::Solve(summary) = run_cli(cli)? else {
///     unreachable!("solve yields a solve summary");
/// };
/// assert_eq!(summary.outcome, SolveOutcome::Found);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Solve(command) => {
            Span::current().record("command", field::display("solve"));
            run_solve(command).map(ExecutionSummary::Solve)
        }
        Command::Bench(command) => {
            Span::current().record("command", field::display("bench"));
            run_bench(command).map(ExecutionSummary::Bench)
        }
    }
}

#[instrument(
    name = "cli.solve",
    err,
    skip(command),
    fields(
        algorithm = SolverKind::from(command.algorithm).as_str(),
        k = command.k,
        timeout_ms = field::Empty,
    ),
)]
pub(super) fn run_solve(command: SolveCommand) -> Result<SolveSummary, CliError> {
    let SolveCommand {
        k,
        algorithm,
        timeout_ms,
        source,
    } = command;
    let kind = SolverKind::from(algorithm);
    let (data_source, graph) = load_graph(source)?;

    let (outcome, elapsed) = match timeout_ms {
        Some(ms) => {
            Span::current().record("timeout_ms", ms);
            let timed = solve_with_timeout(kind, &graph, k, Duration::from_millis(ms));
            (timed.outcome, timed.elapsed)
        }
        None => {
            let started = Instant::now();
            let found = kind.solve(&graph, k, CancellationToken::new());
            let outcome = if found {
                SolveOutcome::Found
            } else {
                SolveOutcome::NotFound
            };
            (outcome, started.elapsed())
        }
    };

    info!(
        data_source = data_source.as_str(),
        outcome = outcome.as_str(),
        elapsed_us = elapsed.as_micros(),
        "command completed"
    );
    Ok(SolveSummary {
        data_source,
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        k,
        algorithm: kind,
        outcome,
        elapsed,
    })
}

#[instrument(
    name = "cli.bench",
    err,
    skip(command),
    fields(runs = command.runs, sota_only = command.sota_only, k = field::Empty),
)]
pub(super) fn run_bench(command: BenchCommand) -> Result<BenchSummary, CliError> {
    let BenchCommand {
        runs,
        baseline_timeout_ms,
        sota_timeout_ms,
        baseline_vertex_limit,
        sota_only,
        k,
        source,
    } = command;
    let (data_source, graph) = load_graph(source)?;
    let vertices = graph.vertex_count();
    let k = k.unwrap_or(vertices / 2);
    Span::current().record("k", k);

    let branch_and_bound = bench::run_series(
        SolverKind::BranchAndBound,
        &graph,
        k,
        runs,
        Duration::from_millis(sota_timeout_ms),
    );
    let baseline = if sota_only {
        None
    } else if vertices < baseline_vertex_limit {
        Some(bench::run_series(
            SolverKind::Baseline,
            &graph,
            k,
            runs,
            Duration::from_millis(baseline_timeout_ms),
        ))
    } else {
        Some(SeriesOutcome::Skipped {
            vertex_limit: baseline_vertex_limit,
        })
    };

    let summary = BenchSummary {
        data_source,
        vertices,
        edges: graph.edge_count(),
        k,
        baseline,
        branch_and_bound,
    };
    info!(
        data_source = summary.data_source.as_str(),
        speed_up = summary.speed_up().as_str(),
        "command completed"
    );
    Ok(summary)
}

/// Builds or loads the graph named by `source` together with its display name.
#[instrument(
    name = "cli.load_graph",
    err,
    skip(source),
    fields(source = field::Empty, path = field::Empty),
)]
pub(super) fn load_graph(source: GraphSource) -> Result<(String, Graph), CliError> {
    let span = Span::current();
    match source {
        GraphSource::Grid(GridArgs { rows, cols }) => {
            span.record("source", field::display("grid"));
            let graph = Graph::grid(rows, cols)?;
            Ok((format!("grid-{rows}x{cols}"), graph))
        }
        GraphSource::EdgeList(FileArgs { path, name }) => {
            span.record("source", field::display("edge-list"));
            span.record("path", field::display(path.display()));
            let chosen_name = derive_data_source_name(&path, name.as_deref());
            let provider = EdgeListProvider::try_from_path(chosen_name, &path)?;
            Ok((provider.name().to_owned(), provider.into_graph()))
        }
        GraphSource::Gml(FileArgs { path, name }) => {
            span.record("source", field::display("gml"));
            span.record("path", field::display(path.display()));
            let chosen_name = derive_data_source_name(&path, name.as_deref());
            let provider = GmlProvider::try_from_path(chosen_name, &path)?;
            Ok((provider.name().to_owned(), provider.into_graph()))
        }
    }
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "data_source".to_owned())
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// `solve` prints one `key: value` line per field; `bench` prints a
/// markdown table header followed by a single row.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use std::time::Duration;
/// # use leafspan_cli::cli::{ExecutionSummary, SolveSummary, render_summary};
/// # use leafspan_core::{SolveOutcome, SolverKind};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Solve(SolveSummary {
///     data_source: "demo".into(),
///     vertices: 4,
///     edges: 3,
///     k: 2,
///     algorithm: SolverKind::Baseline,
///     outcome: SolveOutcome::Found,
///     elapsed: Duration::from_micros(12),
/// });
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer.into_inner())?;
/// assert!(text.contains("result: found"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Solve(solve) => {
            writeln!(writer, "data source: {}", solve.data_source)?;
            writeln!(writer, "vertices: {}", solve.vertices)?;
            writeln!(writer, "edges: {}", solve.edges)?;
            writeln!(writer, "k: {}", solve.k)?;
            writeln!(writer, "algorithm: {}", solve.algorithm)?;
            writeln!(writer, "result: {}", solve.outcome)?;
            writeln!(writer, "elapsed_us: {}", solve.elapsed.as_micros())?;
        }
        ExecutionSummary::Bench(bench) => {
            writeln!(writer, "{}", bench.markdown_header())?;
            writeln!(writer, "{}", bench.markdown_row())?;
        }
    }
    Ok(())
}
