use std::io;

use tracing::debug;

use crate::scheduler::emit;
use crate::{Arrivals, Clock, Policy, Process, TraceSink};

/// First-Come-First-Served.
///
/// Processes run to completion in arrival order, the clock starts at
/// the first arrival.
#[derive(Debug, Default, Copy, Clone)]
pub struct Fcfs;

impl Policy for Fcfs {
    fn run(&self, processes: Vec<Process>, sink: &mut dyn TraceSink) -> io::Result<()> {
        let mut arrivals = Arrivals::new(processes);
        let Some(first_arrival) = arrivals.next_arrival() else {
            return Ok(());
        };
        let mut clock = Clock::starting_at(first_arrival);

        while let Some(mut process) = arrivals.pop_next() {
            clock.jump_to(process.arrival_time());
            let start = clock.now();
            let slice = process.consume(process.remaining_time());
            debug!(policy = "fcfs", pid = %process.pid(), clock = start, slice, "dispatch");

            emit(sink, process.pid(), start, slice)?;
            clock.advance(slice);
            sink.complete(process.pid(), clock.now())?;
        }

        Ok(())
    }
}
