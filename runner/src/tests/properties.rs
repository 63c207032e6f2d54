use std::collections::HashMap;
use std::num::NonZeroUsize;

use pretty_assertions::assert_eq;
use processor::{parse_processes, PolicyKind, Simulation, Timeline};
use scheduler::{Pid, Process, TRACE_UNIT};

const INPUTS: [&str; 4] = [
    "A 0 30\nB 20 60\nC 40 40\nD 60 50\nE 80 20\n",
    "X 0 20\nY 50 20\nZ 60 10\n",
    "P1 30 20\nP2 30 10\nP3 35 70\nP4 200 40\n",
    "L 0 500\nS1 10 20\nS2 10 20\nS3 100 30\nS4 140 10\n",
];

const STARVATION: &str = "A 0 20\n\
                          L 5 100\n\
                          S1 10 20\n\
                          S2 30 20\n\
                          S3 50 20\n\
                          S4 70 20\n\
                          S5 90 20\n";

fn simulation(input: &str) -> Simulation {
    Simulation::new(parse_processes(input.as_bytes()).unwrap())
}

fn quantum(quantum: usize) -> NonZeroUsize {
    NonZeroUsize::new(quantum).unwrap()
}

fn arrivals(processes: &[Process]) -> HashMap<Pid, usize> {
    processes
        .iter()
        .map(|process| (process.pid().clone(), process.arrival_time()))
        .collect()
}

fn last_position(trace: &[Pid], pid: &str) -> usize {
    trace.iter().rposition(|entry| entry == pid).unwrap()
}

fn first_position(trace: &[Pid], pid: &str) -> usize {
    trace.iter().position(|entry| entry == pid).unwrap()
}

#[test]
fn every_unit_of_work_is_traced_once() {
    for input in INPUTS {
        let simulation = simulation(input);
        for policy in PolicyKind::defaults() {
            let trace = simulation.trace(policy).unwrap();
            let mut counts: HashMap<Pid, usize> = HashMap::new();
            for pid in &trace {
                *counts.entry(pid.clone()).or_default() += 1;
            }

            let mut total = 0;
            for process in simulation.processes() {
                let expected = process.service_time() / TRACE_UNIT;
                total += expected;
                assert_eq!(
                    counts.get(process.pid()).copied().unwrap_or_default(),
                    expected,
                    "{policy}: {}",
                    process.pid()
                );
            }
            assert_eq!(trace.len(), total, "{policy}");
        }
    }
}

#[test]
fn nothing_runs_before_arrival_and_units_never_overlap() {
    for input in INPUTS {
        let simulation = simulation(input);
        let arrivals = arrivals(simulation.processes());
        for policy in PolicyKind::defaults() {
            let timeline = simulation.timeline(policy).unwrap();
            for slot in timeline.slots() {
                assert!(slot.start >= arrivals[&slot.pid], "{policy}: {slot:?}");
            }
            for pair in timeline.slots().windows(2) {
                assert!(pair[1].start >= pair[0].start + TRACE_UNIT, "{policy}: {pair:?}");
            }
        }
    }
}

#[test]
fn non_preemptive_policies_keep_entries_contiguous() {
    for input in INPUTS {
        let simulation = simulation(input);
        for policy in [PolicyKind::Fcfs, PolicyKind::Spn, PolicyKind::Hrrn] {
            let trace = simulation.trace(policy).unwrap();
            for process in simulation.processes() {
                let pid = process.pid().as_str();
                let first = first_position(&trace, pid);
                let last = last_position(&trace, pid);
                assert_eq!(last - first + 1, process.service_time() / TRACE_UNIT, "{policy}: {pid}");
            }
        }
    }
}

#[test]
fn fcfs_follows_arrival_order() {
    let simulation = simulation("B 20 20\nA 0 10\nC 20 10\n");
    let trace = simulation.trace(PolicyKind::Fcfs).unwrap();
    assert_eq!(trace, vec!["A", "B", "B", "C"]);
}

#[test]
fn round_robin_wait_is_bounded() {
    for input in INPUTS {
        let simulation = simulation(input);
        let processes = simulation.processes().len();
        for q in [10, 20, 40] {
            let timeline = simulation.timeline(PolicyKind::RoundRobin(quantum(q))).unwrap();
            let bound = (processes - 1) * q;

            let mut last_end: HashMap<&Pid, usize> = HashMap::new();
            for slot in timeline.slots() {
                if let Some(end) = last_end.get(&slot.pid) {
                    assert!(slot.start - end <= bound, "rr_{q}: {slot:?}");
                }
                last_end.insert(&slot.pid, slot.start + TRACE_UNIT);
            }
        }
    }
}

#[test]
fn round_robin_queues_arrivals_before_the_preempted_process() {
    let simulation = simulation("P1 0 30\nP2 10 20\n");
    let trace = simulation.trace(PolicyKind::RoundRobin(quantum(10))).unwrap();
    assert_eq!(trace, vec!["P1", "P2", "P1", "P2", "P1"]);
}

#[test]
fn shorter_job_finishes_first() {
    for input in ["S 0 20\nL 0 50\n", "L 0 50\nS 0 20\n"] {
        let simulation = simulation(input);
        for policy in [PolicyKind::Spn, PolicyKind::Srt] {
            let trace = simulation.trace(policy).unwrap();
            assert!(last_position(&trace, "S") < last_position(&trace, "L"), "{policy}: {trace:?}");
        }
    }
}

#[test]
fn spn_ties_go_to_the_first_admitted() {
    let trace = simulation("P 0 20\nQ 0 20\n").trace(PolicyKind::Spn).unwrap();
    assert_eq!(trace, vec!["P", "P", "Q", "Q"]);

    let trace = simulation("Q 0 20\nP 0 20\n").trace(PolicyKind::Spn).unwrap();
    assert_eq!(trace, vec!["Q", "Q", "P", "P"]);

    // a shorter service wins over an earlier admission
    let trace = simulation("Q 10 20\nP 0 40\nR 0 20\n")
        .trace(PolicyKind::Spn)
        .unwrap();
    assert_eq!(trace, vec!["R", "R", "Q", "Q", "P", "P", "P", "P"]);
}

#[test]
fn srt_keeps_admission_order_when_requeued() {
    // at 10 both have 20 left, A was admitted first and keeps running
    let trace = simulation("A 0 30\nB 10 20\n").trace(PolicyKind::Srt).unwrap();
    assert_eq!(trace, vec!["A", "A", "A", "B", "B"]);

    let trace = simulation("B 0 20\nA 0 20\n").trace(PolicyKind::Srt).unwrap();
    assert_eq!(trace, vec!["B", "B", "A", "A"]);
}

#[test]
fn round_robin_drops_partial_units_of_every_slice() {
    let simulation = simulation("A 0 30\n");
    let trace = simulation.trace(PolicyKind::RoundRobin(quantum(15))).unwrap();
    assert_eq!(trace, vec!["A", "A"]);
}

#[test]
fn srt_preempts_at_unit_boundary() {
    let simulation = simulation("L 0 50\nS 20 10\n");
    assert_eq!(
        simulation.trace(PolicyKind::Srt).unwrap(),
        vec!["L", "L", "S", "L", "L", "L"]
    );
    assert_eq!(
        simulation.trace(PolicyKind::Spn).unwrap(),
        vec!["L", "L", "L", "L", "L", "S"]
    );
}

#[test]
fn spn_prefers_service_time_over_arrival() {
    let simulation = simulation("P1 30 20\nP2 30 10\n");
    assert_eq!(simulation.trace(PolicyKind::Spn).unwrap(), vec!["P2", "P1", "P1"]);
    // equal ratios at 30, the first admitted wins
    assert_eq!(simulation.trace(PolicyKind::Hrrn).unwrap(), vec!["P1", "P1", "P2"]);
}

#[test]
fn response_ratio_grows_while_waiting() {
    let process = Process::try_new("L", 5, 100).unwrap();
    let mut previous = process.response_ratio(5);
    assert_eq!(previous, 1.0);
    for now in (10..=200).step_by(10) {
        let ratio = process.response_ratio(now);
        assert!(ratio > previous);
        previous = ratio;
    }
}

#[test]
fn hrrn_does_not_starve_long_jobs() {
    let simulation = simulation(STARVATION);

    let hrrn = simulation.trace(PolicyKind::Hrrn).unwrap();
    assert!(last_position(&hrrn, "L") < first_position(&hrrn, "S4"), "{hrrn:?}");

    // shortest first keeps picking the short jobs
    let spn = simulation.trace(PolicyKind::Spn).unwrap();
    assert_eq!(last_position(&spn, "L"), spn.len() - 1);
}

#[test]
fn hrrn_completion_times() {
    let simulation = simulation(STARVATION);
    let timeline: Timeline = simulation.timeline(PolicyKind::Hrrn).unwrap();

    let completions: Vec<usize> = simulation
        .processes()
        .iter()
        .map(|process| timeline.completion(process.pid()).unwrap())
        .collect();
    // A, L, S1, S2, S3, S4, S5
    assert_eq!(completions, vec![20, 160, 40, 60, 180, 200, 220]);
}
