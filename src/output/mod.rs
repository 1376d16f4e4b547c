//! Where encoded frames go: per-frame paths, the pending-path FIFO, and the file writer.

/// Output path generation.
pub mod path;
/// FIFO of paths awaiting their frame.
pub mod queue;
/// Synchronous file persistence.
pub mod writer;
