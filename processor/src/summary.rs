use std::fmt::{self, Display};

use scheduler::{Pid, Process};

use crate::Timeline;

/// The timings of a process in a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub arrival_time: usize,
    pub service_time: usize,
    /// [`None`] if the process never filled a whole trace unit.
    pub first_run: Option<usize>,
    pub completion: usize,
    pub turnaround: usize,
    pub waiting: usize,
}

impl ProcessMetrics {
    /// Time between the arrival and the first trace entry.
    pub fn response(&self) -> Option<usize> {
        self.first_run.map(|start| start - self.arrival_time)
    }
}

impl Display for ProcessMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let first_run = self
            .first_run
            .map_or_else(|| String::from("-"), |start| start.to_string());
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.pid,
            self.arrival_time,
            self.service_time,
            first_run,
            self.completion,
            self.turnaround,
            self.waiting
        )
    }
}

/// Per process timings of one policy run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub policy: String,
    pub processes: Vec<ProcessMetrics>,
}

impl Summary {
    /// Builds the summary of `timeline`, processes are listed in input order.
    pub fn new(policy: impl Into<String>, processes: &[Process], timeline: &Timeline) -> Summary {
        let processes = processes
            .iter()
            .filter_map(|process| {
                let completion = timeline.completion(process.pid())?;
                let turnaround = completion - process.arrival_time();
                Some(ProcessMetrics {
                    pid: process.pid().clone(),
                    arrival_time: process.arrival_time(),
                    service_time: process.service_time(),
                    first_run: timeline.first_run(process.pid()),
                    completion,
                    turnaround,
                    waiting: turnaround - process.service_time(),
                })
            })
            .collect();

        Summary {
            policy: policy.into(),
            processes,
        }
    }

    fn average(&self, value: impl Fn(&ProcessMetrics) -> usize) -> f64 {
        if self.processes.is_empty() {
            return 0.0;
        }
        let total: usize = self.processes.iter().map(value).sum();
        total as f64 / self.processes.len() as f64
    }

    pub fn average_turnaround(&self) -> f64 {
        self.average(|metrics| metrics.turnaround)
    }

    pub fn average_waiting(&self) -> f64 {
        self.average(|metrics| metrics.waiting)
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===== {} =====", self.policy)?;
        writeln!(f, "PID\tARRIVAL\tSERVICE\tSTART\tFINISH\tTURN\tWAIT")?;
        for metrics in &self.processes {
            writeln!(f, "{metrics}")?;
        }
        writeln!(
            f,
            "average turnaround {:.2}, average waiting {:.2}",
            self.average_turnaround(),
            self.average_waiting()
        )
    }
}

/// Formats several summaries to a [`String`].
pub fn format_summaries(summaries: &[&Summary]) -> String {
    let mut s = String::new();
    for summary in summaries {
        // writing to a String cannot fail
        let _ = fmt::write(&mut s, format_args!("{summary}\n"));
    }
    s
}
