//! Run configuration
//!
//! The configuration can come from a TOML file, command line flags
//! override the values it contains.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use processor::PolicyKind;
use scheduler::TRACE_UNIT;
use serde::Deserialize;

/// A policy family, Round Robin is expanded once per quantum.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PolicyArg {
    Fcfs,
    Rr,
    Spn,
    Srt,
    Hrrn,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Directory for the trace files
    pub out_dir: PathBuf,
    /// Round Robin quanta, one run each
    pub quanta: Vec<usize>,
    pub policies: Vec<PolicyArg>,
    /// Run every policy in its own thread
    pub parallel: bool,
    /// Print the per process timings
    pub summary: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            out_dir: PathBuf::from("."),
            quanta: vec![10, 40],
            policies: vec![
                PolicyArg::Fcfs,
                PolicyArg::Rr,
                PolicyArg::Spn,
                PolicyArg::Srt,
                PolicyArg::Hrrn,
            ],
            parallel: false,
            summary: false,
        }
    }
}

impl RunConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.policies.is_empty() {
            bail!("At least one policy must be selected");
        }
        if self.policies.contains(&PolicyArg::Rr) {
            if self.quanta.is_empty() {
                bail!("Round Robin needs at least one quantum");
            }
            if self.quanta.contains(&0) {
                bail!("Round Robin quantum must be > 0");
            }
            for quantum in self.partial_unit_quanta() {
                tracing::warn!(
                    quantum,
                    "Round Robin quantum is not a multiple of {TRACE_UNIT}, part of every slice will not be traced"
                );
            }
        }
        Ok(())
    }

    /// Quanta whose slices end in the middle of a trace unit.
    pub fn partial_unit_quanta(&self) -> Vec<usize> {
        self.quanta
            .iter()
            .copied()
            .filter(|quantum| quantum % TRACE_UNIT != 0)
            .collect()
    }

    /// The runs to perform, in the order of the configured policies.
    ///
    /// Repeated policies and quanta are run once.
    pub fn policy_kinds(&self) -> Result<Vec<PolicyKind>> {
        self.validate()?;

        let mut kinds: Vec<PolicyKind> = Vec::new();
        for policy in &self.policies {
            let expanded = match policy {
                PolicyArg::Fcfs => vec![PolicyKind::Fcfs],
                PolicyArg::Rr => self
                    .quanta
                    .iter()
                    .filter_map(|&quantum| NonZeroUsize::new(quantum))
                    .map(PolicyKind::RoundRobin)
                    .collect(),
                PolicyArg::Spn => vec![PolicyKind::Spn],
                PolicyArg::Srt => vec![PolicyKind::Srt],
                PolicyArg::Hrrn => vec![PolicyKind::Hrrn],
            };
            for kind in expanded {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
        }
        Ok(kinds)
    }
}
