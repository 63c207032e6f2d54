use std::io;

use tracing::debug;

use crate::scheduler::emit;
use crate::{Arrivals, Clock, Policy, Process, TraceSink};

/// Highest Response Ratio Next, non-preemptive.
#[derive(Debug, Default, Copy, Clone)]
pub struct Hrrn;

/// Returns the index of the process with the highest response ratio,
/// the first one wins on equal ratios.
fn highest_ratio(waiting: &[Process], now: usize) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, process) in waiting.iter().enumerate() {
        let ratio = process.response_ratio(now);
        if best.map_or(true, |(_, highest)| ratio > highest) {
            best = Some((index, ratio));
        }
    }
    best.map(|(index, _)| index)
}

impl Policy for Hrrn {
    fn run(&self, processes: Vec<Process>, sink: &mut dyn TraceSink) -> io::Result<()> {
        let mut arrivals = Arrivals::new(processes);
        let mut waiting: Vec<Process> = Vec::new();
        let mut clock = Clock::default();

        while !waiting.is_empty() || !arrivals.is_empty() {
            waiting.extend(arrivals.admit(clock.now()));

            // with nobody waiting there is no ratio to keep up to date,
            // so the clock can go straight to the next arrival
            let Some(index) = highest_ratio(&waiting, clock.now()) else {
                if let Some(next_arrival) = arrivals.next_arrival() {
                    clock.jump_to(next_arrival);
                }
                continue;
            };

            // keep the order of the others for the next tie break
            let mut process = waiting.remove(index);
            let start = clock.now();
            debug!(
                policy = "hrrn",
                pid = %process.pid(),
                clock = start,
                ratio = process.response_ratio(start),
                "dispatch"
            );
            let slice = process.consume(process.remaining_time());

            emit(sink, process.pid(), start, slice)?;
            clock.advance(slice);
            sink.complete(process.pid(), clock.now())?;
        }

        Ok(())
    }
}
