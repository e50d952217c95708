//! pipeforge CLI
//!
//! Compiles pipeline graph documents into GitHub Actions and GitLab CI
//! configuration.

// CLI binary needs to output to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

use pipeforge::cli::{self, Cli, CliError, EXIT_OK, exit_code_for, render_error};
use pipeforge::commands;
use pipeforge::logging::{TracingConfig, init_tracing};
use pipeforge::settings::Settings;
use std::io::Write;

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();
    let exit_code = match run(cli) {
        Ok(()) => EXIT_OK,
        Err(err) => {
            render_error(&err);
            exit_code_for(&err)
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load(cli.config.as_deref())?;

    let tracing_config = TracingConfig {
        format: cli.log_format.or(settings.log.format).unwrap_or_default(),
        level: cli.level.or(settings.log.level).unwrap_or_default(),
        filter: settings.log.filter.clone(),
    };
    init_tracing(&tracing_config).map_err(|e| {
        CliError::config_with_help(e.to_string(), "Check the [log] filter in pipeforge.toml")
    })?;

    let output = if cli.command.is_async() {
        run_with_tokio(cli, &settings)?
    } else {
        commands::execute_sync(cli.command, &settings)?
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| CliError::config(format!("Failed to write output: {e}")))
}

/// Create a tokio runtime for commands that talk to the network
fn run_with_tokio(cli: Cli, settings: &Settings) -> Result<String, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::config(format!("Failed to create tokio runtime: {e}")))?;
    runtime.block_on(commands::execute_async(cli.command, settings))
}
