//! Command-line interface for the k-leaf spanning tree solvers.
//!
//! `solve` answers a single question for one graph; `bench` repeats both
//! solvers on one graph and reports timing statistics as a markdown row
//! (with `--sota-only`, branch and bound alone against its internal budget).
//! Graphs come from a generated grid, an edge-list file or a GML file.

mod bench;
mod commands;

pub use bench::{BenchSummary, RunStats, SeriesOutcome};
pub use commands::{
    Algorithm, BenchCommand, Cli, CliError, Command, ExecutionSummary, FileArgs, GraphSource,
    GridArgs, SolveCommand, SolveSummary, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
