use std::collections::BTreeMap;
use std::sync::Arc;

use crate::capture::buffer::{CaptureRequest, CapturedBuffer, CapturedFrame, ReadbackFormat};
use crate::capture::source::CaptureSource;
use crate::encode::codec::encode_frame;
use crate::foundation::error::{RecorderError, RecorderResult};
use crate::output::path::{FramePathGenerator, PathGenerator};
use crate::output::queue::PendingPathQueue;
use crate::output::writer::FileWriter;
use crate::recorder::lifecycle::{
    BufferDisposition, RecordStats, Recorder, RecorderState, buffer_disposition,
};
use crate::settings::config::{ConfigValidator, OrderingPolicy, RecorderSettings, WriteErrorPolicy};
use crate::settings::shared::{SettingOverride, SharedSetting};
use crate::session::recording::RecordingSession;

/// Value the shared setting is forced to while recording (async shader compilation off).
const RECORDING_SHARED_SETTING: bool = false;

/// Records one AOV as an image sequence.
///
/// A path is pinned to each frame when its capture is requested and queued; completions, which
/// may arrive frames later, pop paths in request order. See [`Recorder`] for the call order.
pub struct AovRecorder {
    settings: RecorderSettings,
    shared: Arc<dyn SharedSetting>,
    inputs: Vec<Box<dyn CaptureSource>>,
    paths: Option<Box<dyn PathGenerator>>,
    writer: FileWriter,

    queue: PendingPathQueue,
    early: BTreeMap<u64, CapturedFrame>,
    guard: Option<SettingOverride>,
    state: RecorderState,
    stats: RecordStats,
    above_watermark: bool,
}

impl AovRecorder {
    /// Create a recorder with no capture input bound.
    ///
    /// Unless [`AovRecorder::with_path_generator`] is used, paths come from a
    /// [`FramePathGenerator`] built from the settings when recording begins.
    pub fn new(settings: RecorderSettings, shared: Arc<dyn SharedSetting>) -> Self {
        Self {
            settings,
            shared,
            inputs: Vec::new(),
            paths: None,
            writer: FileWriter::new(),
            queue: PendingPathQueue::new(),
            early: BTreeMap::new(),
            guard: None,
            state: RecorderState::Idle,
            stats: RecordStats::default(),
            above_watermark: false,
        }
    }

    /// Bind a capture input. Recording requires exactly one.
    pub fn with_input(mut self, input: Box<dyn CaptureSource>) -> Self {
        self.bind_input(input);
        self
    }

    pub fn with_path_generator(mut self, paths: Box<dyn PathGenerator>) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn with_writer(mut self, writer: FileWriter) -> Self {
        self.writer = writer;
        self
    }

    pub fn bind_input(&mut self, input: Box<dyn CaptureSource>) {
        self.inputs.push(input);
    }

    pub fn settings(&self) -> &RecorderSettings {
        &self.settings
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Paths of requested frames that have not completed yet, oldest first.
    pub fn pending(&self) -> &PendingPathQueue {
        &self.queue
    }

    /// Completions held back until an earlier request completes ([`OrderingPolicy::Reorder`]).
    pub fn held_back(&self) -> usize {
        self.early.len()
    }

    /// Consume one completed capture.
    ///
    /// The completion must answer the oldest pending request. Under
    /// [`OrderingPolicy::Reorder`] a later completion is held and written once its predecessors
    /// have been.
    pub fn write_frame(&mut self, captured: CapturedFrame) -> RecorderResult<()> {
        if self.state != RecorderState::Recording {
            return Err(RecorderError::pipeline(
                "capture completed while the recorder is not recording",
            ));
        }

        let sequence = captured.sequence;
        match self.queue.front_sequence() {
            Some(front) if front == sequence => {
                let mut first_err = self.write_in_order(captured).err();
                while let Some(next) = self
                    .queue
                    .front_sequence()
                    .and_then(|s| self.early.remove(&s))
                {
                    if let Err(e) = self.write_in_order(next) {
                        first_err.get_or_insert(e);
                    }
                }
                first_err.map_or(Ok(()), Err)
            }
            Some(front)
                if self.settings.ordering == OrderingPolicy::Reorder
                    && self.queue.contains(sequence) =>
            {
                if self.early.contains_key(&sequence) {
                    return Err(RecorderError::pipeline(format!(
                        "capture #{sequence} completed twice"
                    )));
                }
                tracing::debug!(sequence, waiting_for = front, "holding early capture");
                self.early.insert(sequence, captured);
                Ok(())
            }
            // Reports the empty-queue or out-of-order violation.
            _ => self.write_in_order(captured),
        }
    }

    fn write_in_order(&mut self, captured: CapturedFrame) -> RecorderResult<()> {
        let CapturedFrame {
            sequence,
            frame,
            buffer,
        } = captured;
        let pending = self.queue.pop_expected(sequence)?;
        self.stats.frames_completed += 1;
        self.update_watermark();

        let encoded = {
            let _span = tracing::debug_span!(
                "encode_image",
                frame = frame.0,
                format = %self.settings.output.kind()
            )
            .entered();
            encode_frame(&buffer, &self.settings.output)
        };
        self.dispose(buffer);

        let encoded = match encoded {
            Ok(encoded) => encoded,
            Err(e) => {
                self.stats.frames_failed += 1;
                return Err(e);
            }
        };

        match self.writer.write(pending, &encoded.bytes) {
            Ok(written) => {
                self.stats.frames_written += 1;
                self.stats.bytes_written += written.bytes;
                Ok(())
            }
            Err(e) => {
                self.stats.frames_failed += 1;
                match self.settings.on_write_error {
                    WriteErrorPolicy::Abort => Err(e),
                    WriteErrorPolicy::Skip => {
                        tracing::error!(
                            recorder = %self.settings.name,
                            frame = frame.0,
                            error = %format!("{e:#}"),
                            "failed to write frame; skipping it"
                        );
                        Ok(())
                    }
                }
            }
        }
    }

    fn dispose(&mut self, buffer: CapturedBuffer) {
        let rt_backed = self
            .inputs
            .first()
            .is_some_and(|input| input.is_render_texture_backed());
        match buffer_disposition(rt_backed, &self.settings.output) {
            BufferDisposition::Release => {
                tracing::trace!(width = buffer.width, height = buffer.height, "buffer released");
                self.stats.buffers_released += 1;
                drop(buffer);
            }
            BufferDisposition::Retain => {
                self.stats.buffers_retained += 1;
                if let Some(input) = self.inputs.first_mut() {
                    input.reclaim(buffer);
                }
            }
        }
    }

    fn update_watermark(&mut self) {
        let threshold = self.settings.pending_warn_threshold;
        if threshold == 0 {
            return;
        }
        let len = self.queue.len();
        if !self.above_watermark && len > threshold {
            self.above_watermark = true;
            tracing::warn!(
                recorder = %self.settings.name,
                pending = len,
                threshold,
                "captures are falling behind; pending frame queue keeps growing"
            );
        } else if self.above_watermark && len < threshold {
            self.above_watermark = false;
        }
    }

    fn single_input(&mut self) -> RecorderResult<&mut Box<dyn CaptureSource>> {
        match self.inputs.as_mut_slice() {
            [input] => Ok(input),
            other => Err(RecorderError::InputCardinality(other.len())),
        }
    }

    fn path_generator(&self) -> RecorderResult<&dyn PathGenerator> {
        self.paths
            .as_deref()
            .ok_or_else(|| RecorderError::pipeline("recorder has no path generator"))
    }

    fn drain_inputs(&mut self) -> RecorderResult<()> {
        if self.inputs.len() != 1 {
            return Ok(());
        }
        let completions = self.single_input()?.flush()?;
        self.write_batch(completions)
    }

    /// Write every completion of one poll; a failing frame does not strand the rest.
    fn write_batch(&mut self, completions: Vec<CapturedFrame>) -> RecorderResult<()> {
        let mut first_err = None;
        for captured in completions {
            if let Err(e) = self.write_frame(captured) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

impl Recorder for AovRecorder {
    fn readback_format(&self) -> ReadbackFormat {
        self.settings.output.readback_format()
    }

    #[tracing::instrument(skip_all, fields(recorder = %self.settings.name))]
    fn begin_recording(&mut self, session: &RecordingSession) -> RecorderResult<()> {
        if self.state == RecorderState::Recording {
            return Err(RecorderError::pipeline("recording has already begun"));
        }
        if let Err(e) = self.settings.validate() {
            tracing::error!(
                "the '{}' AOV recorder has errors and cannot record any data: {e}",
                self.settings.name
            );
            return Err(e);
        }

        // Local until every step succeeds; an early return restores the setting on drop.
        let guard = SettingOverride::acquire(self.shared.clone(), RECORDING_SHARED_SETTING);

        if self.paths.is_none() {
            let s = &self.settings;
            self.paths = Some(Box::new(FramePathGenerator::new(
                &s.output_dir,
                s.file_stem.clone(),
                s.frame_padding,
                s.output.extension(),
            )?));
        }
        self.path_generator()?.create_directory(session)?;
        for input in &mut self.inputs {
            input.begin(session)?;
        }

        self.queue = PendingPathQueue::new();
        self.early.clear();
        self.stats = RecordStats::default();
        self.above_watermark = false;
        self.guard = Some(guard);
        self.state = RecorderState::Recording;

        tracing::info!(
            aov = %self.settings.aov,
            format = %self.settings.output.kind(),
            frame = session.frame().0,
            "recording started"
        );
        Ok(())
    }

    fn record_frame(&mut self, session: &RecordingSession) -> RecorderResult<()> {
        if self.settings.has_errors() {
            return Ok(());
        }
        if self.state != RecorderState::Recording {
            return Err(RecorderError::pipeline(
                "record_frame called outside of a recording",
            ));
        }
        if self.inputs.len() != 1 {
            return Err(RecorderError::InputCardinality(self.inputs.len()));
        }

        // The path is fixed now: by the time the readback completes the session will have
        // moved on to a later frame.
        let frame = session.frame();
        let path = self.path_generator()?.build_absolute_path(session)?;
        let sequence = self.queue.push(frame, path);
        self.stats.frames_requested += 1;
        tracing::debug!(
            frame = frame.0,
            sequence,
            pending = self.queue.len(),
            "frame enqueued"
        );

        let request = CaptureRequest {
            sequence,
            frame,
            format: self.readback_format(),
        };
        if let Err(e) = self.single_input()?.request(request) {
            self.queue.retract(sequence);
            self.stats.frames_requested -= 1;
            return Err(e);
        }
        self.update_watermark();
        Ok(())
    }

    fn process_captures(&mut self) -> RecorderResult<usize> {
        if self.state != RecorderState::Recording || self.inputs.len() != 1 {
            return Ok(0);
        }
        let completions = self.single_input()?.poll()?;
        let n = completions.len();
        self.write_batch(completions)?;
        Ok(n)
    }

    #[tracing::instrument(skip_all, fields(recorder = %self.settings.name))]
    fn end_recording(&mut self, session: &RecordingSession) -> RecorderResult<()> {
        let was_recording = self.state == RecorderState::Recording;
        let mut first_err = None;

        if was_recording && let Err(e) = self.drain_inputs() {
            first_err.get_or_insert(e);
        }

        if let Some(guard) = self.guard.take() {
            guard.restore();
        }

        if was_recording {
            for input in &mut self.inputs {
                if let Err(e) = input.end() {
                    first_err.get_or_insert(e);
                }
            }

            let dropped = self.queue.drain();
            self.early.clear();
            if let Some(first) = dropped.first() {
                tracing::warn!(
                    count = dropped.len(),
                    first_frame = first.frame.0,
                    "recording ended with frames that were requested but never written"
                );
                self.stats.frames_dropped += dropped.len() as u64;
            }

            self.state = RecorderState::Ended;
            tracing::info!(
                frame = session.frame().0,
                written = self.stats.frames_written,
                failed = self.stats.frames_failed,
                dropped = self.stats.frames_dropped,
                "recording ended"
            );
        }

        first_err.map_or(Ok(()), Err)
    }

    fn stats(&self) -> RecordStats {
        self.stats
    }
}

impl Drop for AovRecorder {
    fn drop(&mut self) {
        if self.state == RecorderState::Recording {
            tracing::warn!(
                recorder = %self.settings.name,
                pending = self.queue.len(),
                "recorder dropped while recording; restoring shared setting"
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recorder/aov.rs"]
mod tests;
