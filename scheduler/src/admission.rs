use std::collections::VecDeque;

use crate::Process;

/// The simulation clock of a single policy run.
///
/// The clock never goes backwards.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Clock {
    now: usize,
}

impl Clock {
    pub fn starting_at(now: usize) -> Clock {
        Clock { now }
    }

    pub fn now(&self) -> usize {
        self.now
    }

    /// Moves the clock forward by the `amount` of work that was consumed.
    pub fn advance(&mut self, amount: usize) {
        self.now += amount;
    }

    /// Moves the clock to `time` while the CPU is idle.
    ///
    /// Jumping to a time that already passed leaves the clock unchanged.
    pub fn jump_to(&mut self, time: usize) {
        self.now = self.now.max(time);
    }
}

/// The processes that did not arrive yet.
///
/// Processes are kept in arrival order, processes arriving at the same
/// time keep their input order.
#[derive(Debug, Default)]
pub struct Arrivals {
    pending: VecDeque<Process>,
}

impl Arrivals {
    pub fn new(mut processes: Vec<Process>) -> Arrivals {
        // stable, ties keep the input order
        processes.sort_by_key(|process| process.arrival_time());
        Arrivals {
            pending: processes.into(),
        }
    }

    /// Removes and returns, in arrival order, every process that
    /// arrived at or before `now`.
    pub fn admit(&mut self, now: usize) -> impl Iterator<Item = Process> + '_ {
        std::iter::from_fn(move || {
            if self.pending.front()?.arrival_time() <= now {
                self.pending.pop_front()
            } else {
                None
            }
        })
    }

    /// Removes the next process to arrive, whatever the clock says.
    pub fn pop_next(&mut self) -> Option<Process> {
        self.pending.pop_front()
    }

    /// The arrival time of the next process, if any is left.
    pub fn next_arrival(&self) -> Option<usize> {
        self.pending.front().map(Process::arrival_time)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
