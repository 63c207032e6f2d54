use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use processor::{format_summaries, parse_processes, RunReport, Simulation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::{PolicyArg, RunConfig};

/// Schedsim: uniprocessor scheduling policy simulator
///
/// Reads a process list and writes, for every policy, the trace of
/// the process that occupies the CPU during each 10 time units.
///
/// Example usage:
///   schedsim processes.txt
///   schedsim processes.txt -o traces -q 10 -q 40 -p rr -p srt
///   schedsim processes.txt -c run.toml --summary
#[derive(Parser)]
#[command(name = "schedsim")]
#[command(version, about = "Uniprocessor scheduling policy simulator", long_about = None)]
struct Cli {
    /// Process list, one `pid arrivalTime serviceTime` record per line
    input: PathBuf,

    /// TOML file with the run configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory where the trace files are written
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Round Robin quantum (can be specified multiple times)
    #[arg(short, long = "quantum", value_name = "QUANTUM")]
    quanta: Vec<usize>,

    /// Policy to simulate (can be specified multiple times)
    #[arg(short, long = "policy", value_enum, value_name = "POLICY")]
    policies: Vec<PolicyArg>,

    /// Run every policy in its own thread
    #[arg(long)]
    parallel: bool,

    /// Print the per process timings of every run
    #[arg(long)]
    summary: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Loads the configuration file, if any, and applies the flags on top.
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };

        if let Some(out_dir) = &self.out_dir {
            config.out_dir = out_dir.clone();
        }
        if !self.quanta.is_empty() {
            config.quanta = self.quanta.clone();
        }
        if !self.policies.is_empty() {
            config.policies = self.policies.clone();
        }
        config.parallel |= self.parallel;
        config.summary |= self.summary;

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.run_config()?;
    let reports = run(&cli.input, &config)?;

    if config.summary {
        let summaries: Vec<_> = reports.iter().map(|report| &report.summary).collect();
        print!("{}", format_summaries(&summaries));
    }

    Ok(())
}

/// Reads the process list at `input` and writes every configured trace.
fn run(input: &Path, config: &RunConfig) -> Result<Vec<RunReport>> {
    let policies = config.policy_kinds()?;

    let file = File::open(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;
    let processes = parse_processes(BufReader::new(file))
        .with_context(|| format!("Invalid process list: {}", input.display()))?;
    tracing::info!(
        input = %input.display(),
        processes = processes.len(),
        runs = policies.len(),
        "process list loaded"
    );

    fs::create_dir_all(&config.out_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.out_dir.display()
        )
    })?;

    let simulation = Simulation::new(processes);
    let reports = simulation.write_traces(&policies, &config.out_dir, config.parallel)?;
    Ok(reports)
}

#[cfg(test)]
mod tests;
