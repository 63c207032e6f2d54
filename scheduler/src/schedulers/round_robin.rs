use std::collections::VecDeque;
use std::io;
use std::num::NonZeroUsize;

use tracing::debug;

use crate::scheduler::emit;
use crate::{Arrivals, Clock, Policy, Process, TraceSink};

/// Round Robin with a fixed quantum.
///
/// Processes that arrive while another one runs are queued before
/// the preempted process.
#[derive(Debug, Copy, Clone)]
pub struct RoundRobin {
    quantum: NonZeroUsize,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroUsize) -> Self {
        RoundRobin { quantum }
    }
}

impl Policy for RoundRobin {
    fn run(&self, processes: Vec<Process>, sink: &mut dyn TraceSink) -> io::Result<()> {
        let mut arrivals = Arrivals::new(processes);
        let mut ready_queue: VecDeque<Process> = VecDeque::new();
        let mut clock = Clock::default();

        while !ready_queue.is_empty() || !arrivals.is_empty() {
            ready_queue.extend(arrivals.admit(clock.now()));

            let Some(mut process) = ready_queue.pop_front() else {
                if let Some(next_arrival) = arrivals.next_arrival() {
                    clock.jump_to(next_arrival);
                }
                continue;
            };

            let start = clock.now();
            let slice = process.consume(self.quantum.get());
            debug!(
                policy = "rr",
                quantum = self.quantum.get(),
                pid = %process.pid(),
                clock = start,
                slice,
                remaining = process.remaining_time(),
                "dispatch"
            );

            emit(sink, process.pid(), start, slice)?;
            clock.advance(slice);

            // arrivals during the slice go ahead of the preempted process
            ready_queue.extend(arrivals.admit(clock.now()));

            if process.is_finished() {
                sink.complete(process.pid(), clock.now())?;
            } else {
                ready_queue.push_back(process);
            }
        }

        Ok(())
    }
}
