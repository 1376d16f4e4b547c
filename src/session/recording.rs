use crate::foundation::core::{Fps, FrameIndex, FrameRange};
use crate::foundation::error::RecorderResult;
use crate::recorder::lifecycle::{RecordStats, Recorder};

/// Position of the record loop, shared read-only with recorders and capture inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordingSession {
    frame: FrameIndex,
    fps: Fps,
}

impl RecordingSession {
    pub fn new(fps: Fps) -> Self {
        Self {
            frame: FrameIndex(0),
            fps,
        }
    }

    /// Frame currently being recorded.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn seek(&mut self, frame: FrameIndex) {
        self.frame = frame;
    }

    pub fn advance(&mut self) {
        self.frame = FrameIndex(self.frame.0.saturating_add(1));
    }

    /// Timeline position of the current frame, in seconds.
    pub fn time_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.frame.0)
    }
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new(Fps::default())
    }
}

/// Drive `recorder` over `range`: begin, then one capture request and one completion pump per
/// frame, then end.
///
/// `end_recording` runs even when a frame fails; the first error wins.
pub fn record_frames(
    recorder: &mut dyn Recorder,
    session: &mut RecordingSession,
    range: FrameRange,
) -> RecorderResult<RecordStats> {
    session.seek(range.start);
    recorder.begin_recording(session)?;

    let run = record_range(recorder, session, range);
    let end = recorder.end_recording(session);
    run?;
    end?;

    let stats = recorder.stats();
    tracing::debug!(?stats, "record loop finished");
    Ok(stats)
}

fn record_range(
    recorder: &mut dyn Recorder,
    session: &mut RecordingSession,
    range: FrameRange,
) -> RecorderResult<()> {
    for frame in range.iter() {
        session.seek(frame);
        recorder.record_frame(session)?;
        recorder.process_captures()?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/session/recording.rs"]
mod tests;
