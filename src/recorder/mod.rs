//! Recorder lifecycle and the AOV recorder.

/// The AOV image-sequence recorder.
pub mod aov;
/// Lifecycle trait, state, counters, and buffer ownership policy.
pub mod lifecycle;
