// Snapshot history for stepping backward, and the captured Print output

use std::collections::VecDeque;

use crate::interpreter::engine::MachineState;
use crate::language::Point;

/// Output captured from `Print` instructions
#[derive(Debug, Clone)]
pub struct OutputLog {
    pub lines: Vec<OutputLine>,
}

impl OutputLog {
    pub fn new() -> Self {
        OutputLog { lines: Vec::new() }
    }

    /// Record one printed accumulator value
    pub fn print(&mut self, value: i32, point: Point, step: u64) {
        self.lines.push(OutputLine {
            text: value.to_string(),
            point,
            step,
        });
    }

    /// Get all lines as a vector of strings
    pub fn get_output(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop everything printed after the first `len` lines
    pub fn truncate(&mut self, len: usize) {
        self.lines.truncate(len);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for OutputLog {
    fn default() -> Self {
        Self::new()
    }
}

/// A line of output with the cell that printed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub point: Point,
    /// Engine step count after the `Print` ran
    pub step: u64,
}

/// Engine registers plus how much output existed before a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub state: MachineState,
    pub output_len: usize,
}

/// Bounded history of snapshots; the oldest is dropped once full
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: VecDeque<Snapshot>,
    capacity: usize,
    /// Snapshots discarded because the history was full
    dropped: usize,
}

impl SnapshotManager {
    pub fn new(capacity: usize) -> Self {
        SnapshotManager {
            snapshots: VecDeque::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.capacity == 0 {
            self.dropped += 1;
            return;
        }
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
            self.dropped += 1;
        }
        self.snapshots.push_back(snapshot);
    }

    /// Take back the most recent snapshot
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.dropped = 0;
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
