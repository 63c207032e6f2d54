//! A scheduling policy library.
//!
//! This library provides the process record, the admission rule and
//! the uniprocessor policies used to simulate a fixed set of processes.
//! Every run produces a trace with one entry per [`TRACE_UNIT`] of CPU
//! time, written to a [`TraceSink`].
//!

use std::io;
use std::num::NonZeroUsize;

mod admission;
mod scheduler;

pub use crate::admission::{Arrivals, Clock};
pub use crate::scheduler::{Pid, Policy, Process, TraceSink, TRACE_UNIT};

pub mod schedulers;

use schedulers::{Fcfs, Hrrn, RoundRobin, Spn, Srt};

/// Runs First-Come-First-Served over `processes`.
///
/// ## Example
///
/// ```rust
/// use scheduler::{run_fcfs, Pid, Process};
///
/// let processes = vec![
///     Process::try_new("P1", 0, 30).unwrap(),
///     Process::try_new("P2", 10, 20).unwrap(),
/// ];
/// let mut trace: Vec<Pid> = Vec::new();
/// run_fcfs(processes, &mut trace).unwrap();
///
/// assert_eq!(trace, vec!["P1", "P1", "P1", "P2", "P2"]);
/// ```
pub fn run_fcfs<S: TraceSink>(processes: Vec<Process>, sink: &mut S) -> io::Result<()> {
    Fcfs.run(processes, sink)
}

/// Runs Round Robin with the given `quantum` over `processes`.
///
/// ## Example
///
/// ```rust
/// use scheduler::{run_round_robin, Pid, Process};
/// use std::num::NonZeroUsize;
///
/// let processes = vec![
///     Process::try_new("P1", 0, 30).unwrap(),
///     Process::try_new("P2", 10, 20).unwrap(),
/// ];
/// let mut trace: Vec<Pid> = Vec::new();
/// run_round_robin(NonZeroUsize::new(10).unwrap(), processes, &mut trace).unwrap();
///
/// assert_eq!(trace, vec!["P1", "P2", "P1", "P2", "P1"]);
/// ```
pub fn run_round_robin<S: TraceSink>(
    quantum: NonZeroUsize,
    processes: Vec<Process>,
    sink: &mut S,
) -> io::Result<()> {
    RoundRobin::new(quantum).run(processes, sink)
}

/// Runs Shortest Process Next over `processes`.
pub fn run_spn<S: TraceSink>(processes: Vec<Process>, sink: &mut S) -> io::Result<()> {
    Spn.run(processes, sink)
}

/// Runs Shortest Remaining Time over `processes`.
pub fn run_srt<S: TraceSink>(processes: Vec<Process>, sink: &mut S) -> io::Result<()> {
    Srt.run(processes, sink)
}

/// Runs Highest Response Ratio Next over `processes`.
pub fn run_hrrn<S: TraceSink>(processes: Vec<Process>, sink: &mut S) -> io::Result<()> {
    Hrrn.run(processes, sink)
}
