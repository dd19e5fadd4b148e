// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line interface.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use tracing_subscriber::EnvFilter;

use crate::scenario::{self, Report};

/// Top-level arguments.
#[derive(Parser)]
#[command(name = "atlas-harness")]
#[command(about = "Replay marker-map scenarios against the recording mock engine")]
pub struct Cli {
    /// Log component decisions at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Subcommand.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run a scenario and print the engine calls it produced
    Run {
        /// Path to the scenario JSON
        scenario: PathBuf,
        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Renders a report as a table.
pub fn render_table(report: &Report) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["step", "op", "call", "detail"]);
    for row in &report.calls {
        table.add_row(vec![
            row.step.to_string(),
            row.op.clone(),
            row.call.clone(),
            row.detail.clone(),
        ]);
    }
    format!(
        "{table}\nactive marker: {}\nlive overlays: {}\n",
        report.active_marker.as_deref().unwrap_or("none"),
        report.live_overlays
    )
}

/// Parses arguments, runs the command and writes its output to stdout.
pub fn entrypoint() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run { scenario, json } => {
            let parsed = scenario::load(&scenario)?;
            let report = scenario::run(parsed)
                .with_context(|| format!("scenario {} failed", scenario.display()))?;
            let out = if json {
                let mut text = serde_json::to_string_pretty(&report)?;
                text.push('\n');
                text
            } else {
                render_table(&report)
            };
            std::io::stdout()
                .lock()
                .write_all(out.as_bytes())
                .context("failed to write report")?;
        }
    }
    Ok(())
}
