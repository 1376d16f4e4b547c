//! Capture inputs: buffers, the source trait, and the built-in sources.

/// AOV kinds and their synthetic sample patterns.
pub mod aov;
pub mod buffer;
/// Capture input trait and a hand-driven in-memory source.
pub mod source;
/// Deterministic AOV source with configurable readback latency.
pub mod synthetic;
