use std::collections::VecDeque;

use crate::capture::aov::AovKind;
use crate::capture::buffer::{
    CaptureRequest, CapturedBuffer, CapturedFrame, PixelData, ReadbackFormat, unit_to_u8,
};
use crate::capture::source::CaptureSource;
use crate::foundation::core::Resolution;
use crate::foundation::error::{RecorderError, RecorderResult};
use crate::session::recording::RecordingSession;

/// Options for [`SyntheticAovSource`].
#[derive(Clone, Copy, Debug)]
pub struct SyntheticSourceOpts {
    /// Pixel dimensions of every captured buffer.
    pub resolution: Resolution,
    /// Frames between a request and its completion.
    pub latency_frames: u32,
    /// Report buffers as render-texture backed.
    pub render_texture_backed: bool,
}

impl Default for SyntheticSourceOpts {
    fn default() -> Self {
        Self {
            resolution: Resolution::new(64, 64),
            latency_frames: 0,
            render_texture_backed: false,
        }
    }
}

/// Capture input that renders deterministic AOV patterns on the CPU.
///
/// Each [`CaptureSource::poll`] counts as one elapsed frame; a request issued on frame `n`
/// completes on the poll of frame `n + latency_frames`, so completions stay in request order.
pub struct SyntheticAovSource {
    aov: AovKind,
    opts: SyntheticSourceOpts,
    tick: u64,
    in_flight: VecDeque<(u64, CaptureRequest)>,
    pool: Vec<Vec<u8>>,
    reclaimed: u64,
}

impl SyntheticAovSource {
    pub fn new(aov: AovKind, opts: SyntheticSourceOpts) -> Self {
        Self {
            aov,
            opts,
            tick: 0,
            in_flight: VecDeque::new(),
            pool: Vec::new(),
            reclaimed: 0,
        }
    }

    /// Requests issued but not yet completed.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Buffers returned through [`CaptureSource::reclaim`] since creation.
    pub fn reclaimed(&self) -> u64 {
        self.reclaimed
    }

    fn render(&mut self, request: CaptureRequest) -> RecorderResult<CapturedFrame> {
        let Resolution { width, height } = self.opts.resolution;
        let samples = self
            .opts
            .resolution
            .rgba_samples()
            .ok_or_else(|| RecorderError::configuration("capture resolution overflows"))?;

        let pixels = match request.format {
            ReadbackFormat::RgbaF32 => {
                let mut out = Vec::with_capacity(samples);
                for y in 0..height {
                    for x in 0..width {
                        out.extend_from_slice(&self.aov.sample(
                            x,
                            y,
                            width,
                            height,
                            request.frame.0,
                        ));
                    }
                }
                PixelData::RgbaF32(out)
            }
            ReadbackFormat::Rgba8 => {
                let mut out = self.pool.pop().unwrap_or_default();
                out.clear();
                out.reserve(samples);
                for y in 0..height {
                    for x in 0..width {
                        let px = self.aov.sample(x, y, width, height, request.frame.0);
                        out.extend(px.iter().map(|&s| unit_to_u8(s)));
                    }
                }
                PixelData::Rgba8(out)
            }
        };

        Ok(CapturedFrame {
            sequence: request.sequence,
            frame: request.frame,
            buffer: CapturedBuffer::new(width, height, pixels)?,
        })
    }
}

impl CaptureSource for SyntheticAovSource {
    fn is_render_texture_backed(&self) -> bool {
        self.opts.render_texture_backed
    }

    fn begin(&mut self, _session: &RecordingSession) -> RecorderResult<()> {
        if self.opts.resolution.width == 0 || self.opts.resolution.height == 0 {
            return Err(RecorderError::configuration(
                "synthetic capture resolution must be non-zero",
            ));
        }
        self.tick = 0;
        self.in_flight.clear();
        Ok(())
    }

    fn request(&mut self, request: CaptureRequest) -> RecorderResult<()> {
        let ready_at = self.tick + u64::from(self.opts.latency_frames);
        self.in_flight.push_back((ready_at, request));
        Ok(())
    }

    fn poll(&mut self) -> RecorderResult<Vec<CapturedFrame>> {
        let mut done = Vec::new();
        while let Some(&(ready_at, request)) = self.in_flight.front() {
            if ready_at > self.tick {
                break;
            }
            self.in_flight.pop_front();
            done.push(self.render(request)?);
        }
        self.tick += 1;
        Ok(done)
    }

    fn flush(&mut self) -> RecorderResult<Vec<CapturedFrame>> {
        let mut done = Vec::with_capacity(self.in_flight.len());
        while let Some((_, request)) = self.in_flight.pop_front() {
            done.push(self.render(request)?);
        }
        Ok(done)
    }

    fn reclaim(&mut self, buffer: CapturedBuffer) {
        self.reclaimed += 1;
        if let PixelData::Rgba8(bytes) = buffer.pixels {
            self.pool.push(bytes);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/synthetic.rs"]
mod tests;
