use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use scheduler::{Pid, TraceSink};

/// A sink that writes one pid per line.
pub struct WriterSink<W: Write> {
    writer: W,
}

/// A [`WriterSink`] backed by a file.
pub type FileSink = WriterSink<BufWriter<File>>;

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> WriterSink<W> {
        WriterSink { writer }
    }

    /// Flushes the writer and gives it back.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl FileSink {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: &Path) -> io::Result<FileSink> {
        Ok(WriterSink::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn record(&mut self, pid: &Pid, _start: usize) -> io::Result<()> {
        writeln!(self.writer, "{pid}")
    }
}

/// One trace entry together with the clock value at which it started.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub pid: Pid,
    pub start: usize,
}

/// An in memory sink that keeps the timestamps of the entries and
/// of the completions.
#[derive(Debug, Default, Clone)]
pub struct Timeline {
    slots: Vec<Slot>,
    completions: HashMap<Pid, usize>,
}

impl Timeline {
    pub fn new() -> Timeline {
        Timeline::default()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The trace, without timestamps.
    pub fn pids(&self) -> Vec<Pid> {
        self.slots.iter().map(|slot| slot.pid.clone()).collect()
    }

    /// The clock value at which `pid` finished.
    pub fn completion(&self, pid: &Pid) -> Option<usize> {
        self.completions.get(pid).copied()
    }

    /// The start of the first entry of `pid`.
    pub fn first_run(&self, pid: &Pid) -> Option<usize> {
        self.slots
            .iter()
            .find(|slot| &slot.pid == pid)
            .map(|slot| slot.start)
    }
}

impl TraceSink for Timeline {
    fn record(&mut self, pid: &Pid, start: usize) -> io::Result<()> {
        self.slots.push(Slot {
            pid: pid.clone(),
            start,
        });
        Ok(())
    }

    fn complete(&mut self, pid: &Pid, at: usize) -> io::Result<()> {
        self.completions.insert(pid.clone(), at);
        Ok(())
    }
}

/// Forwards every entry to two sinks.
pub struct Tee<A, B> {
    first: A,
    second: B,
}

impl<A: TraceSink, B: TraceSink> Tee<A, B> {
    pub fn new(first: A, second: B) -> Tee<A, B> {
        Tee { first, second }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: TraceSink, B: TraceSink> TraceSink for Tee<A, B> {
    fn record(&mut self, pid: &Pid, start: usize) -> io::Result<()> {
        self.first.record(pid, start)?;
        self.second.record(pid, start)
    }

    fn complete(&mut self, pid: &Pid, at: usize) -> io::Result<()> {
        self.first.complete(pid, at)?;
        self.second.complete(pid, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_one_pid_per_line() {
        let mut sink = WriterSink::new(Vec::new());
        sink.record(&Pid::from("A"), 0).unwrap();
        sink.record(&Pid::from("B"), 10).unwrap();
        let bytes = sink.finish().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "A\nB\n");
    }

    #[test]
    fn tee_feeds_both_sinks() {
        let mut tee = Tee::new(WriterSink::new(Vec::new()), Timeline::new());
        tee.record(&Pid::from("A"), 30).unwrap();
        tee.complete(&Pid::from("A"), 40).unwrap();

        let (writer, timeline) = tee.into_inner();
        assert_eq!(writer.finish().unwrap(), b"A\n".to_vec());
        assert_eq!(timeline.first_run(&Pid::from("A")), Some(30));
        assert_eq!(timeline.completion(&Pid::from("A")), Some(40));
    }
}
