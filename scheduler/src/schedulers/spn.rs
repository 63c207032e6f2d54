use std::io;

use tracing::debug;

use super::ready_heap::ReadyHeap;
use crate::scheduler::emit;
use crate::{Arrivals, Clock, Policy, Process, TraceSink};

/// Shortest Process Next, non-preemptive.
#[derive(Debug, Default, Copy, Clone)]
pub struct Spn;

impl Policy for Spn {
    fn run(&self, processes: Vec<Process>, sink: &mut dyn TraceSink) -> io::Result<()> {
        let mut arrivals = Arrivals::new(processes);
        let mut ready = ReadyHeap::new(Process::service_time);
        let mut clock = Clock::default();

        while !ready.is_empty() || !arrivals.is_empty() {
            for process in arrivals.admit(clock.now()) {
                ready.admit(process);
            }

            let Some(entry) = ready.pop() else {
                if let Some(next_arrival) = arrivals.next_arrival() {
                    clock.jump_to(next_arrival);
                }
                continue;
            };

            let mut process = entry.process;
            let start = clock.now();
            let slice = process.consume(process.remaining_time());
            debug!(policy = "spn", pid = %process.pid(), clock = start, slice, "dispatch");

            emit(sink, process.pid(), start, slice)?;
            clock.advance(slice);
            sink.complete(process.pid(), clock.now())?;
        }

        Ok(())
    }
}
