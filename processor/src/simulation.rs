use std::fmt::{self, Display};
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;

use scheduler::{Pid, Process, TraceSink};
use tracing::info;

use crate::{FileSink, Summary, Tee, Timeline};

/// A policy together with its parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Fcfs,
    RoundRobin(NonZeroUsize),
    Spn,
    Srt,
    Hrrn,
}

impl PolicyKind {
    /// FCFS, RR with quanta 10 and 40, SPN, SRT and HRRN.
    pub fn defaults() -> Vec<PolicyKind> {
        let mut policies = vec![PolicyKind::Fcfs];
        policies.extend(
            [10, 40]
                .into_iter()
                .filter_map(NonZeroUsize::new)
                .map(PolicyKind::RoundRobin),
        );
        policies.extend([PolicyKind::Spn, PolicyKind::Srt, PolicyKind::Hrrn]);
        policies
    }

    /// The name of the trace file written for this policy.
    pub fn output_file(&self) -> String {
        format!("{self}.out")
    }

    /// Runs the policy over `processes`.
    pub fn run<S: TraceSink>(&self, processes: Vec<Process>, sink: &mut S) -> io::Result<()> {
        match *self {
            PolicyKind::Fcfs => scheduler::run_fcfs(processes, sink),
            PolicyKind::RoundRobin(quantum) => scheduler::run_round_robin(quantum, processes, sink),
            PolicyKind::Spn => scheduler::run_spn(processes, sink),
            PolicyKind::Srt => scheduler::run_srt(processes, sink),
            PolicyKind::Hrrn => scheduler::run_hrrn(processes, sink),
        }
    }
}

impl Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyKind::Fcfs => write!(f, "fcfs"),
            PolicyKind::RoundRobin(quantum) => write!(f, "rr_{quantum}"),
            PolicyKind::Spn => write!(f, "spn"),
            PolicyKind::Srt => write!(f, "srt"),
            PolicyKind::Hrrn => write!(f, "hrrn"),
        }
    }
}

/// A trace file could not be written.
#[derive(Debug)]
pub struct SinkError {
    pub policy: PolicyKind,
    pub path: PathBuf,
    pub source: io::Error,
}

impl Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unable to write the {} trace to {}: {}",
            self.policy,
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// The outcome of a run written to a file.
#[derive(Debug)]
pub struct RunReport {
    pub policy: PolicyKind,
    pub path: PathBuf,
    pub entries: usize,
    pub summary: Summary,
}

/// The simulation driver.
///
/// Every run gets its own copy of the process set, so runs never
/// influence each other and can be executed in any order.
#[derive(Debug, Clone)]
pub struct Simulation {
    processes: Vec<Process>,
}

impl Simulation {
    pub fn new(processes: Vec<Process>) -> Simulation {
        Simulation { processes }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Runs `policy` over a copy of the processes.
    pub fn run<S: TraceSink>(&self, policy: PolicyKind, sink: &mut S) -> io::Result<()> {
        policy.run(self.processes.clone(), sink)
    }

    /// Runs `policy` and returns the trace.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::{parse_processes, PolicyKind, Simulation};
    ///
    /// let processes = parse_processes("P1 0 30\nP2 10 20\n".as_bytes()).unwrap();
    /// let simulation = Simulation::new(processes);
    ///
    /// let trace = simulation.trace(PolicyKind::Fcfs).unwrap();
    /// assert_eq!(trace, vec!["P1", "P1", "P1", "P2", "P2"]);
    /// ```
    pub fn trace(&self, policy: PolicyKind) -> io::Result<Vec<Pid>> {
        let mut trace = Vec::new();
        self.run(policy, &mut trace)?;
        Ok(trace)
    }

    /// Runs `policy` and returns the trace with its timestamps.
    pub fn timeline(&self, policy: PolicyKind) -> io::Result<Timeline> {
        let mut timeline = Timeline::new();
        self.run(policy, &mut timeline)?;
        Ok(timeline)
    }

    /// Writes the trace of every policy to `out_dir`, in a file named
    /// after the policy.
    ///
    /// When `parallel` is set, each run gets its own thread.
    pub fn write_traces(
        &self,
        policies: &[PolicyKind],
        out_dir: &Path,
        parallel: bool,
    ) -> Result<Vec<RunReport>, SinkError> {
        let results: Vec<Result<RunReport, SinkError>> = if parallel {
            thread::scope(|s| {
                let handles: Vec<_> = policies
                    .iter()
                    .map(|&policy| s.spawn(move || self.write_trace(policy, out_dir)))
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| {
                        handle
                            .join()
                            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                    })
                    .collect()
            })
        } else {
            policies
                .iter()
                .map(|&policy| self.write_trace(policy, out_dir))
                .collect()
        };

        results.into_iter().collect()
    }

    fn write_trace(&self, policy: PolicyKind, out_dir: &Path) -> Result<RunReport, SinkError> {
        let path = out_dir.join(policy.output_file());
        let error = |source: io::Error| SinkError {
            policy,
            path: path.clone(),
            source,
        };

        let file = FileSink::create(&path).map_err(&error)?;
        let mut sink = Tee::new(file, Timeline::new());
        self.run(policy, &mut sink).map_err(&error)?;
        let (file, timeline) = sink.into_inner();
        file.finish().map_err(&error)?;

        let entries = timeline.slots().len();
        info!(policy = %policy, path = %path.display(), entries, "trace written");

        Ok(RunReport {
            policy,
            path,
            entries,
            summary: Summary::new(policy.to_string(), &self.processes, &timeline),
        })
    }
}
