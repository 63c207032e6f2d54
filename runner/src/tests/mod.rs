use std::env;
use std::fs;

use processor::{parse_processes, PolicyKind, Simulation, WriterSink};

mod properties;

fn trace_path(folder: &str, name: &str, policy: PolicyKind) -> String {
    format!("../outputs/{folder}/{name}/{}", policy.output_file())
}

fn write_trace(folder: &str, name: &str, policy: PolicyKind, trace: &str) {
    fs::create_dir_all(format!("../outputs/{folder}/{name}")).unwrap();
    fs::write(trace_path(folder, name, policy), trace).unwrap();
}

fn read_trace(folder: &str, name: &str, policy: PolicyKind) -> String {
    fs::read_to_string(trace_path(folder, name, policy)).unwrap()
}

fn format_trace(simulation: &Simulation, policy: PolicyKind) -> String {
    let mut sink = WriterSink::new(Vec::new());
    simulation.run(policy, &mut sink).unwrap();
    String::from_utf8(sink.finish().unwrap()).unwrap()
}

/// Runs every default policy over `input` and compares the traces with
/// the reference files.
///
/// Set `WRITE_OUTPUT` to regenerate the references instead.
fn run(folder: &str, name: &str, input: &str) {
    let simulation = Simulation::new(parse_processes(input.as_bytes()).unwrap());

    for policy in PolicyKind::defaults() {
        let output = format_trace(&simulation, policy);

        if env::var("WRITE_OUTPUT").is_ok() {
            write_trace(folder, name, policy, &output);
        } else {
            let reference = read_trace(folder, name, policy);

            println!("\npolicy = {policy}\nleft = Correct Output\nright = Your Output\n");
            use pretty_assertions::assert_eq;
            assert_eq!(reference, output);
        }
    }
}
