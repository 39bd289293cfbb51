#![warn(missing_docs)]
//! StageBench CLI
//!
//! Runs the stagemix compositor's benchmark mode under an X11 session and
//! a nested Wayland session for every benchmark configuration it can
//! find, and prints a comparison table:
//!
//! ```text
//! config            X11    Wayland
//! ----------------  -----  -------
//! quad-grid.yaml     12.3      9.8
//! single-layer.yaml   4.1      3.9
//! ```

mod config;
mod driver;
mod enumerate;

pub use config::*;
pub use driver::*;
pub use enumerate::*;

use anyhow::Context;
use clap::{Parser, Subcommand};
use regex::Regex;
use stagebench_core::{Backend, ExecutableResolver};
use stagebench_report::{
    OutputFormat, format_human_output, generate_csv_report, generate_json_report,
};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// StageBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "stagebench")]
#[command(author, version, about = "Compare stagemix benchmark results across X11 and Wayland")]
pub struct Cli {
    /// Optional subcommand (list, run); defaults to run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter configurations by regex pattern on the file name
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Output format: human, json, csv
    #[arg(long, default_value = "human")]
    pub format: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Benchmark configuration directory (overrides discovery)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Writable directory pinned as XDG_RUNTIME_DIR for each child
    #[arg(long)]
    pub runtime_dir: Option<PathBuf>,

    /// Kill a benchmark run after this many seconds (default: no timeout)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List discovered configurations and backend executables
    List,
    /// Run the comparison (default)
    Run,
}

/// Run the StageBench CLI with arguments from the process command line.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the StageBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Logs go to stderr: stdout carries the report itself.
    let filter = if cli.verbose {
        "stagebench_cli=debug,stagebench_core=debug"
    } else {
        "stagebench_cli=info,stagebench_core=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Discover stagebench.toml configuration (CLI flags override)
    let config = StageConfig::discover().unwrap_or_default();

    let format: OutputFormat = if cli.format != "human" {
        cli.format.parse().unwrap_or(OutputFormat::Human)
    } else {
        config.output.format.parse().unwrap_or(OutputFormat::Human)
    };

    match cli.command {
        Some(Commands::List) => list_configs(&cli, &config),
        Some(Commands::Run) | None => run_report(&cli, &config, format),
    }
}

/// Candidate configuration roots: CLI flag, then stagebench.toml, then
/// the deployment defaults.
fn config_roots(cli: &Cli, config: &StageConfig) -> Vec<PathBuf> {
    if let Some(dir) = &cli.config_dir {
        return vec![dir.clone()];
    }
    if let Some(dir) = &config.runner.config_dir {
        return vec![PathBuf::from(dir)];
    }
    default_roots()
}

/// Enumerate and filter the configurations for this invocation.
fn filtered_configs(cli: &Cli, config: &StageConfig) -> anyhow::Result<Vec<PathBuf>> {
    let roots = config_roots(cli, config);
    let mut configs = enumerate_configs(&roots)?;
    if let Ok(filter) = Regex::new(&cli.filter) {
        configs.retain(|path| filter.is_match(&config_label(path)));
    }
    Ok(configs)
}

fn build_backends(config: &StageConfig) -> Vec<Backend> {
    vec![
        config.backends.x11.apply(Backend::x11()),
        config.backends.wayland.apply(Backend::wayland()),
    ]
}

fn resolve_timeout(cli: &Cli, config: &StageConfig) -> anyhow::Result<Option<Duration>> {
    if let Some(secs) = cli.timeout {
        return Ok(Some(Duration::from_secs(secs)));
    }
    match &config.runner.timeout {
        Some(value) => Ok(Some(StageConfig::parse_duration(value)?)),
        None => Ok(None),
    }
}

fn run_report(cli: &Cli, config: &StageConfig, format: OutputFormat) -> anyhow::Result<()> {
    let configs = filtered_configs(cli, config)?;
    if configs.is_empty() {
        info!("no benchmark configurations matched; report will be empty");
    }

    let options = RunOptions {
        runtime_dir: cli
            .runtime_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.runner.runtime_dir)),
        timeout: resolve_timeout(cli, config)?,
    };
    let resolver = ExecutableResolver::from_env();
    let report = run_comparison(&configs, build_backends(config), &resolver, &options);

    let output = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Csv => generate_csv_report(&report),
        OutputFormat::Human => format_human_output(&report),
    };

    if let Some(path) = &cli.output {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    Ok(())
}

fn list_configs(cli: &Cli, config: &StageConfig) -> anyhow::Result<()> {
    let configs = filtered_configs(cli, config)?;

    println!("Benchmark configurations:");
    for path in &configs {
        println!("├── {} ({})", config_label(path), path.display());
    }
    println!("{} configuration(s) found.", configs.len());

    let resolver = ExecutableResolver::from_env();
    println!();
    println!("Backends:");
    for backend in build_backends(config) {
        match resolver.resolve(&backend.executable) {
            Some(path) => println!(
                "├── {}: {} ({})",
                backend.label(),
                backend.executable,
                path.display()
            ),
            None => println!(
                "├── {}: {} (not found)",
                backend.label(),
                backend.executable
            ),
        }
    }

    Ok(())
}
