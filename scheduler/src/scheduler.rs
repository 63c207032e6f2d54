use std::fmt::{self, Display};
use std::io;
use std::num::NonZeroUsize;

/// The number of time units covered by one trace entry.
///
/// Work that does not fill a whole unit is consumed but never
/// shows up in the trace.
pub const TRACE_UNIT: usize = 10;

/// The label of a process
///
/// PIDs are opaque tokens taken from the input, uniqueness is
/// the caller's responsibility.
#[derive(PartialEq, Eq, Clone, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Pid(String);

impl Pid {
    pub fn new(pid: impl Into<String>) -> Pid {
        Pid(pid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Pid {
    fn from(pid: &str) -> Self {
        Pid::new(pid)
    }
}

impl From<String> for Pid {
    fn from(pid: String) -> Self {
        Pid(pid)
    }
}

impl PartialEq<str> for Pid {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Pid {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A process record.
///
/// The arrival and service times never change, the remaining time
/// is the working counter every policy consumes on its own copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    pid: Pid,
    arrival_time: usize,
    service_time: NonZeroUsize,
    remaining_time: usize,
}

impl Process {
    pub fn new(pid: impl Into<Pid>, arrival_time: usize, service_time: NonZeroUsize) -> Process {
        Process {
            pid: pid.into(),
            arrival_time,
            service_time,
            remaining_time: service_time.get(),
        }
    }

    /// Builds a process, returns [`None`] if `service_time` is 0.
    pub fn try_new(pid: impl Into<Pid>, arrival_time: usize, service_time: usize) -> Option<Process> {
        NonZeroUsize::new(service_time).map(|service_time| Process::new(pid, arrival_time, service_time))
    }

    pub fn pid(&self) -> &Pid {
        &self.pid
    }

    pub fn arrival_time(&self) -> usize {
        self.arrival_time
    }

    pub fn service_time(&self) -> usize {
        self.service_time.get()
    }

    pub fn remaining_time(&self) -> usize {
        self.remaining_time
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Runs the process for at most `amount` time units and returns
    /// the time actually consumed.
    pub fn consume(&mut self, amount: usize) -> usize {
        let slice = amount.min(self.remaining_time);
        self.remaining_time -= slice;
        slice
    }

    /// `(waiting + service) / service` at clock value `now`.
    pub fn response_ratio(&self, now: usize) -> f64 {
        let waiting = now.saturating_sub(self.arrival_time);
        (waiting + self.service_time()) as f64 / self.service_time() as f64
    }
}

impl Display for Process {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.pid, self.arrival_time, self.service_time
        )
    }
}

/// The destination of a policy's execution trace.
///
/// A sink is owned by a single run for its whole duration.
pub trait TraceSink {
    /// The process `pid` occupied the CPU for one [`TRACE_UNIT`]
    /// starting at clock value `start`.
    fn record(&mut self, pid: &Pid, start: usize) -> io::Result<()>;

    /// The process `pid` finished its work at clock value `at`.
    fn complete(&mut self, _pid: &Pid, _at: usize) -> io::Result<()> {
        Ok(())
    }
}

impl TraceSink for Vec<Pid> {
    fn record(&mut self, pid: &Pid, _start: usize) -> io::Result<()> {
        self.push(pid.clone());
        Ok(())
    }
}

/// The trait that every scheduling policy implements.
pub trait Policy: Send + Sync {
    /// Simulates the policy over `processes` and writes the
    /// trace into `sink`.
    ///
    /// The only errors are the ones returned by the sink.
    fn run(&self, processes: Vec<Process>, sink: &mut dyn TraceSink) -> io::Result<()>;
}

/// Writes one trace entry for every whole unit in `slice`, the
/// first one starting at `start`.
pub(crate) fn emit(
    sink: &mut dyn TraceSink,
    pid: &Pid,
    start: usize,
    slice: usize,
) -> io::Result<()> {
    for unit in 0..slice / TRACE_UNIT {
        sink.record(pid, start + unit * TRACE_UNIT)?;
    }
    Ok(())
}
