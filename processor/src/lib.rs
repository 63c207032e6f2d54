//! A scheduling simulation library
//!
//! This is used for driving the policies from the [`scheduler`] crate:
//! it reads the process list, runs every policy over its own copy of
//! the processes and writes the traces.

mod input;
mod simulation;
mod sink;
mod summary;

pub use input::{parse_processes, parse_record, InputError};
pub use simulation::{PolicyKind, RunReport, Simulation, SinkError};
pub use sink::{FileSink, Slot, Tee, Timeline, WriterSink};
pub use summary::{format_summaries, ProcessMetrics, Summary};
