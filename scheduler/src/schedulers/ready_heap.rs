use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::Process;

/// A process waiting in a [`ReadyHeap`].
///
/// The entry owns its own copy of the process, `seq` is the order in
/// which the process was first admitted and breaks ties between
/// equal keys.
#[derive(Debug)]
pub(crate) struct Entry {
    key: usize,
    seq: usize,
    pub(crate) process: Process,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // BinaryHeap is a max heap, smaller keys have to compare greater
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A ready set that always yields the process with the smallest key.
pub(crate) struct ReadyHeap {
    heap: BinaryHeap<Entry>,
    admitted: usize,
    key: fn(&Process) -> usize,
}

impl ReadyHeap {
    pub(crate) fn new(key: fn(&Process) -> usize) -> Self {
        ReadyHeap {
            heap: BinaryHeap::new(),
            admitted: 0,
            key,
        }
    }

    pub(crate) fn admit(&mut self, process: Process) {
        let seq = self.admitted;
        self.admitted += 1;
        self.heap.push(Entry {
            key: (self.key)(&process),
            seq,
            process,
        });
    }

    /// Puts back an entry that was popped, its key is recomputed
    /// and its admission order is kept.
    pub(crate) fn requeue(&mut self, mut entry: Entry) {
        entry.key = (self.key)(&entry.process);
        self.heap.push(entry);
    }

    pub(crate) fn pop(&mut self) -> Option<Entry> {
        self.heap.pop()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
