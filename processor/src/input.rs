use std::fmt::{self, Display};
use std::io::{self, BufRead};

use scheduler::{Process, TRACE_UNIT};
use tracing::warn;

/// The reason an input stream could not be turned into processes.
///
/// Line numbers start from 1.
#[derive(Debug)]
pub enum InputError {
    /// The line could not be read.
    Read { line: usize, source: io::Error },

    /// The record does not have exactly three fields.
    FieldCount { line: usize, found: usize },

    /// A numeric field is not a non negative integer.
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// The service time is 0.
    ZeroServiceTime { line: usize },

    /// Running every process up to this record would push the clock
    /// past the largest representable time.
    TimeOverflow { line: usize },
}

impl Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Read { line, source } => write!(f, "line {line}: unable to read: {source}"),
            InputError::FieldCount { line, found } => write!(
                f,
                "line {line}: expected `pid arrivalTime serviceTime`, found {found} fields"
            ),
            InputError::InvalidNumber { line, field, value } => {
                write!(f, "line {line}: invalid {field} `{value}`")
            }
            InputError::ZeroServiceTime { line } => {
                write!(f, "line {line}: the service time must be greater than 0")
            }
            InputError::TimeOverflow { line } => {
                write!(f, "line {line}: the simulation would run past the largest time")
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn parse_field(line: usize, field: &'static str, value: &str) -> Result<usize, InputError> {
    value.parse::<usize>().map_err(|_| InputError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

/// Parses one `pid arrivalTime serviceTime` record.
pub fn parse_record(line: usize, record: &str) -> Result<Process, InputError> {
    let fields: Vec<&str> = record.split_whitespace().collect();
    let &[pid, arrival_time, service_time] = fields.as_slice() else {
        return Err(InputError::FieldCount {
            line,
            found: fields.len(),
        });
    };

    let arrival_time = parse_field(line, "arrival time", arrival_time)?;
    let service_time = parse_field(line, "service time", service_time)?;

    Process::try_new(pid, arrival_time, service_time).ok_or(InputError::ZeroServiceTime { line })
}

/// Reads the whole process list from `reader`.
///
/// Blank lines are skipped, the first malformed record stops the parsing.
/// The set is also rejected if the last process could finish after
/// `usize::MAX`, the latest arrival plus every service time.
///
/// ## Example
///
/// ```rust
/// use processor::parse_processes;
///
/// let processes = parse_processes("A 0 30\nB 10 20\n".as_bytes()).unwrap();
/// assert_eq!(processes.len(), 2);
/// assert_eq!(processes[1].arrival_time(), 10);
/// ```
pub fn parse_processes<R: BufRead>(reader: R) -> Result<Vec<Process>, InputError> {
    let mut processes = Vec::new();
    let mut latest_arrival = 0usize;
    let mut total_service = 0usize;
    for (index, record) in reader.lines().enumerate() {
        let line = index + 1;
        let record = record.map_err(|source| InputError::Read { line, source })?;
        if record.trim().is_empty() {
            continue;
        }

        let process = parse_record(line, &record)?;
        latest_arrival = latest_arrival.max(process.arrival_time());
        total_service = total_service
            .checked_add(process.service_time())
            .filter(|total| latest_arrival.checked_add(*total).is_some())
            .ok_or(InputError::TimeOverflow { line })?;
        if process.service_time() % TRACE_UNIT != 0 {
            warn!(
                pid = %process.pid(),
                service_time = process.service_time(),
                "service time is not a multiple of {TRACE_UNIT}, the remainder will not be traced"
            );
        }
        processes.push(process);
    }
    Ok(processes)
}
