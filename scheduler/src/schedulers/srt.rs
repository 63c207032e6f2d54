use std::io;

use tracing::debug;

use super::ready_heap::ReadyHeap;
use crate::scheduler::emit;
use crate::{Arrivals, Clock, Policy, Process, TraceSink, TRACE_UNIT};

/// Shortest Remaining Time, preemptive.
///
/// The scheduling decision is taken again after every [`TRACE_UNIT`],
/// so a newly arrived shorter process preempts the running one at
/// the next unit boundary.
#[derive(Debug, Default, Copy, Clone)]
pub struct Srt;

impl Policy for Srt {
    fn run(&self, processes: Vec<Process>, sink: &mut dyn TraceSink) -> io::Result<()> {
        let mut arrivals = Arrivals::new(processes);
        let mut ready = ReadyHeap::new(Process::remaining_time);
        let mut clock = Clock::default();

        while !ready.is_empty() || !arrivals.is_empty() {
            for process in arrivals.admit(clock.now()) {
                ready.admit(process);
            }

            let Some(mut entry) = ready.pop() else {
                if let Some(next_arrival) = arrivals.next_arrival() {
                    clock.jump_to(next_arrival);
                }
                continue;
            };

            let start = clock.now();
            let slice = entry.process.consume(TRACE_UNIT);
            debug!(
                policy = "srt",
                pid = %entry.process.pid(),
                clock = start,
                slice,
                remaining = entry.process.remaining_time(),
                "dispatch"
            );

            emit(sink, entry.process.pid(), start, slice)?;
            clock.advance(slice);

            if entry.process.is_finished() {
                sink.complete(entry.process.pid(), clock.now())?;
            } else {
                ready.requeue(entry);
            }
        }

        Ok(())
    }
}
