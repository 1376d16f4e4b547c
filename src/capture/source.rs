use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::capture::buffer::{CaptureRequest, CapturedBuffer, CapturedFrame};
use crate::foundation::error::{RecorderError, RecorderResult};
use crate::session::recording::RecordingSession;

/// A capture input bound to a recorder.
///
/// Ordering contract: completions returned from [`CaptureSource::poll`] and
/// [`CaptureSource::flush`] carry the sequence number of the request they answer and are
/// expected in the order the requests were issued. The recorder checks this; see
/// [`OrderingPolicy`](crate::OrderingPolicy).
pub trait CaptureSource: Send {
    /// Whether captured buffers are backed by a render texture the source reads from.
    ///
    /// Affects who releases a buffer after it has been encoded.
    fn is_render_texture_backed(&self) -> bool;

    /// Called once when recording begins.
    fn begin(&mut self, _session: &RecordingSession) -> RecorderResult<()> {
        Ok(())
    }

    /// Queue a readback. The completion may arrive zero or more frames later.
    fn request(&mut self, request: CaptureRequest) -> RecorderResult<()>;

    /// Return any captures that have completed since the last poll.
    fn poll(&mut self) -> RecorderResult<Vec<CapturedFrame>>;

    /// Block until every outstanding request has completed and return them.
    fn flush(&mut self) -> RecorderResult<Vec<CapturedFrame>>;

    /// Take back a buffer whose ownership stays with the source after encoding.
    fn reclaim(&mut self, _buffer: CapturedBuffer) {}

    /// Called once when recording ends.
    fn end(&mut self) -> RecorderResult<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct InMemoryState {
    requests: Vec<CaptureRequest>,
    outstanding: VecDeque<CaptureRequest>,
    ready: VecDeque<CapturedFrame>,
    reclaimed: Vec<CapturedBuffer>,
    began: u32,
    ended: u32,
}

/// Hand-driven capture input for tests and debugging.
///
/// Clones share state, so a test can keep one handle while the recorder owns another and
/// complete requests whenever (and in whatever order) it likes.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    state: Arc<Mutex<InMemoryState>>,
    render_texture_backed: bool,
}

impl InMemorySource {
    /// Create a camera-style (not render-texture backed) source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the source as render-texture backed.
    pub fn with_render_texture(mut self, backed: bool) -> Self {
        self.render_texture_backed = backed;
        self
    }

    fn lock(&self) -> MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<CaptureRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests that have not been completed yet.
    pub fn outstanding(&self) -> usize {
        self.lock().outstanding.len()
    }

    /// Complete the oldest outstanding request with `buffer`.
    pub fn complete_next(&self, buffer: CapturedBuffer) -> RecorderResult<()> {
        let mut state = self.lock();
        let request = state
            .outstanding
            .pop_front()
            .ok_or_else(|| RecorderError::pipeline("no outstanding capture request"))?;
        state.ready.push_back(CapturedFrame {
            sequence: request.sequence,
            frame: request.frame,
            buffer,
        });
        Ok(())
    }

    /// Complete a specific outstanding request, regardless of its position.
    pub fn complete_sequence(&self, sequence: u64, buffer: CapturedBuffer) -> RecorderResult<()> {
        let mut state = self.lock();
        let pos = state
            .outstanding
            .iter()
            .position(|r| r.sequence == sequence)
            .ok_or_else(|| {
                RecorderError::pipeline(format!("no outstanding capture request #{sequence}"))
            })?;
        let request = state
            .outstanding
            .remove(pos)
            .ok_or_else(|| RecorderError::pipeline("outstanding request vanished"))?;
        state.ready.push_back(CapturedFrame {
            sequence: request.sequence,
            frame: request.frame,
            buffer,
        });
        Ok(())
    }

    /// Number of buffers handed back through [`CaptureSource::reclaim`].
    pub fn reclaimed(&self) -> usize {
        self.lock().reclaimed.len()
    }

    /// How many times `begin` / `end` were called.
    pub fn lifecycle_calls(&self) -> (u32, u32) {
        let state = self.lock();
        (state.began, state.ended)
    }
}

impl CaptureSource for InMemorySource {
    fn is_render_texture_backed(&self) -> bool {
        self.render_texture_backed
    }

    fn begin(&mut self, _session: &RecordingSession) -> RecorderResult<()> {
        self.lock().began += 1;
        Ok(())
    }

    fn request(&mut self, request: CaptureRequest) -> RecorderResult<()> {
        let mut state = self.lock();
        state.requests.push(request);
        state.outstanding.push_back(request);
        Ok(())
    }

    fn poll(&mut self) -> RecorderResult<Vec<CapturedFrame>> {
        Ok(self.lock().ready.drain(..).collect())
    }

    fn flush(&mut self) -> RecorderResult<Vec<CapturedFrame>> {
        self.poll()
    }

    fn reclaim(&mut self, buffer: CapturedBuffer) {
        self.lock().reclaimed.push(buffer);
    }

    fn end(&mut self) -> RecorderResult<()> {
        self.lock().ended += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/source.rs"]
mod tests;
