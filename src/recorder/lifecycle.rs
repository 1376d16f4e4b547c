use crate::capture::buffer::ReadbackFormat;
use crate::encode::format::OutputFormat;
use crate::foundation::error::RecorderResult;
use crate::session::recording::RecordingSession;

/// Capability interface of a frame recorder driven by a cooperative record loop.
///
/// Call order: `begin_recording`, then per frame `record_frame` followed by
/// `process_captures`, then `end_recording`. `end_recording` must be called even when an
/// earlier step failed.
pub trait Recorder {
    /// Pixel layout this recorder asks its capture input for.
    fn readback_format(&self) -> ReadbackFormat;

    /// Validate configuration and acquire shared state. No side effects on failure.
    fn begin_recording(&mut self, session: &RecordingSession) -> RecorderResult<()>;

    /// Request a capture for the session's current frame.
    fn record_frame(&mut self, session: &RecordingSession) -> RecorderResult<()>;

    /// Encode and write every capture that has completed. Returns how many were consumed.
    fn process_captures(&mut self) -> RecorderResult<usize>;

    /// Drain outstanding captures and release shared state.
    fn end_recording(&mut self, session: &RecordingSession) -> RecorderResult<()>;

    /// Counters for the current or most recent recording.
    fn stats(&self) -> RecordStats;
}

/// Where a recorder is in its begin/record/end sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecorderState {
    /// Not started yet.
    #[default]
    Idle,
    /// Between a successful begin and the matching end.
    Recording,
    /// A recording was ended; the recorder may begin again.
    Ended,
}

/// Aggregated recording counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RecordStats {
    /// Capture requests issued.
    pub frames_requested: u64,
    /// Completions matched to their pending path.
    pub frames_completed: u64,
    /// Frames persisted to disk.
    pub frames_written: u64,
    /// Completed frames whose encode or write failed.
    pub frames_failed: u64,
    /// Requested frames still pending when the recording ended.
    pub frames_dropped: u64,
    /// Total payload bytes written.
    pub bytes_written: u64,
    /// Buffers released after encoding.
    pub buffers_released: u64,
    /// Buffers handed back to a capture input that keeps owning them.
    pub buffers_retained: u64,
}

/// What happens to a captured buffer once it has been encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferDisposition {
    /// The recorder frees it.
    Release,
    /// Ownership returns to the capture input.
    Retain,
}

/// Buffer ownership after encode: render-texture inputs and the lossless formats release the
/// buffer; a camera-style input feeding the lossy format keeps it.
pub fn buffer_disposition(render_texture_backed: bool, format: &OutputFormat) -> BufferDisposition {
    if render_texture_backed || !format.is_lossy() {
        BufferDisposition::Release
    } else {
        BufferDisposition::Retain
    }
}
