use std::collections::VecDeque;
use std::path::PathBuf;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{RecorderError, RecorderResult};

/// Output path pinned to a frame at request time.
///
/// Not `Clone`: each entry is moved out of the queue exactly once, by the write that consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingPath {
    /// Request sequence number the path was queued under.
    pub sequence: u64,
    /// Logical frame the path was computed for.
    pub frame: FrameIndex,
    /// Absolute file path the frame must be written to.
    pub path: PathBuf,
}

/// FIFO of output paths for requested-but-unwritten frames.
///
/// `len()` always equals frames requested minus frames completed. Sequence numbers increase by
/// one per push, so the front entry names the next completion the pipeline expects.
#[derive(Debug, Default)]
pub struct PendingPathQueue {
    entries: VecDeque<PendingPath>,
    next_sequence: u64,
}

impl PendingPathQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `path` for `frame` and return the sequence number it was assigned.
    pub fn push(&mut self, frame: FrameIndex, path: PathBuf) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push_back(PendingPath {
            sequence,
            frame,
            path,
        });
        sequence
    }

    /// Pop the oldest entry. An empty queue means more completions than requests.
    pub fn pop(&mut self) -> RecorderResult<PendingPath> {
        self.entries.pop_front().ok_or_else(|| {
            RecorderError::pipeline("frame completed with no pending output path")
        })
    }

    /// Pop the oldest entry, requiring that it was queued under `sequence`.
    pub fn pop_expected(&mut self, sequence: u64) -> RecorderResult<PendingPath> {
        match self.entries.front() {
            None => Err(RecorderError::pipeline(format!(
                "capture #{sequence} completed with no pending output path"
            ))),
            Some(front) if front.sequence != sequence => Err(RecorderError::pipeline(format!(
                "capture #{sequence} completed out of order; expected #{} (frame {})",
                front.sequence, front.frame
            ))),
            Some(_) => self.pop(),
        }
    }

    /// Sequence number of the oldest entry.
    pub fn front_sequence(&self) -> Option<u64> {
        self.entries.front().map(|p| p.sequence)
    }

    /// Whether `sequence` is queued anywhere. Queued sequences are always contiguous.
    pub fn contains(&self, sequence: u64) -> bool {
        match (self.entries.front(), self.entries.back()) {
            (Some(front), Some(back)) => front.sequence <= sequence && sequence <= back.sequence,
            _ => false,
        }
    }

    /// Undo the latest push when its capture request could not be issued.
    pub fn retract(&mut self, sequence: u64) -> Option<PendingPath> {
        if self.entries.back().is_some_and(|p| p.sequence == sequence) {
            self.next_sequence = sequence;
            self.entries.pop_back()
        } else {
            None
        }
    }

    /// Remove every entry, returning them oldest first.
    pub fn drain(&mut self) -> Vec<PendingPath> {
        self.entries.drain(..).collect()
    }

    /// Iterate over entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PendingPath> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/queue.rs"]
mod tests;
