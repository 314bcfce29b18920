//! CLI entry point for the k-leaf spanning tree solvers.
//!
//! Parses command-line arguments with clap, runs the requested command,
//! renders the summary to stdout and maps errors to the process exit code.
//! Logging is initialised first so every later step can emit structured
//! diagnostics via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use leafspan_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use leafspan_core::GraphError;
use leafspan_providers_edgelist::EdgeListError;
use leafspan_providers_gml::GmlError;
use tracing::{error, field};

/// Parse CLI arguments, execute the command, render the summary, and flush the
/// output stream.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

/// Extracts the stable graph error code carried by `err`, if any.
fn graph_error(err: &anyhow::Error) -> Option<&GraphError> {
    match err.downcast_ref::<CliError>()? {
        CliError::Graph(graph)
        | CliError::EdgeList(EdgeListError::Graph(graph))
        | CliError::Gml(GmlError::Graph(graph)) => Some(graph),
        _ => None,
    }
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code_field = graph_error(&err).map(|graph| field::display(graph.code().as_str()));
        error!(
            error = %err,
            code = code_field,
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
