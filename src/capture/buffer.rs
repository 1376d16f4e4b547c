use crate::foundation::core::{FrameIndex, Resolution};
use crate::foundation::error::{RecorderError, RecorderResult};

/// Pixel layout a capture input must read back for the active output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadbackFormat {
    /// 8 bits per channel, RGBA.
    Rgba8,
    /// 32-bit float per channel, RGBA.
    RgbaF32,
}

impl ReadbackFormat {
    /// Short layout name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rgba8 => "rgba8",
            Self::RgbaF32 => "rgba_f32",
        }
    }
}

/// Interleaved RGBA samples of a captured buffer.
#[derive(Clone, Debug, PartialEq)]
pub enum PixelData {
    /// RGBA8 bytes, straight alpha.
    Rgba8(Vec<u8>),
    /// RGBA f32 samples, linear, unclamped.
    RgbaF32(Vec<f32>),
}

impl PixelData {
    pub fn layout(&self) -> ReadbackFormat {
        match self {
            Self::Rgba8(_) => ReadbackFormat::Rgba8,
            Self::RgbaF32(_) => ReadbackFormat::RgbaF32,
        }
    }

    pub(crate) fn sample_count(&self) -> usize {
        match self {
            Self::Rgba8(v) => v.len(),
            Self::RgbaF32(v) => v.len(),
        }
    }
}

/// A host-side pixel buffer delivered by a capture input.
///
/// Rows are tightly packed, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedBuffer {
    /// Buffer width in pixels.
    pub width: u32,
    /// Buffer height in pixels.
    pub height: u32,
    /// Interleaved RGBA samples, `width * height * 4` of them.
    pub pixels: PixelData,
}

impl CapturedBuffer {
    /// Wrap samples, checking that their count matches the dimensions.
    pub fn new(width: u32, height: u32, pixels: PixelData) -> RecorderResult<Self> {
        let expected = Resolution::new(width, height)
            .rgba_samples()
            .ok_or_else(|| RecorderError::pipeline("captured buffer dimensions overflow"))?;
        if pixels.sample_count() != expected {
            return Err(RecorderError::pipeline(format!(
                "captured buffer has {} samples, expected {expected} for {width}x{height} rgba",
                pixels.sample_count()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn layout(&self) -> ReadbackFormat {
        self.pixels.layout()
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// Convert to 8-bit samples, clamping floats to `[0, 1]`.
    pub fn to_rgba8(&self) -> Self {
        let pixels = match &self.pixels {
            PixelData::Rgba8(v) => PixelData::Rgba8(v.clone()),
            PixelData::RgbaF32(v) => PixelData::Rgba8(v.iter().map(|&s| unit_to_u8(s)).collect()),
        };
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Convert to float samples in `[0, 1]`.
    pub fn to_rgba_f32(&self) -> Self {
        let pixels = match &self.pixels {
            PixelData::Rgba8(v) => {
                PixelData::RgbaF32(v.iter().map(|&b| f32::from(b) / 255.0).collect())
            }
            PixelData::RgbaF32(v) => PixelData::RgbaF32(v.clone()),
        };
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// Quantize a float sample to 8 bits, clamping to `[0, 1]`; NaN maps to 0.
pub(crate) fn unit_to_u8(s: f32) -> u8 {
    if s.is_nan() {
        return 0;
    }
    (s.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// A capture request issued by the recorder for one logical frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Monotonic request number; completions echo it back.
    pub sequence: u64,
    /// Logical frame the request was issued on.
    pub frame: FrameIndex,
    /// Layout the completion must carry.
    pub format: ReadbackFormat,
}

/// A completed capture, handed from the input to the recorder.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedFrame {
    /// Sequence number of the originating [`CaptureRequest`].
    pub sequence: u64,
    /// Logical frame the request was issued on.
    pub frame: FrameIndex,
    /// Read-back pixels.
    pub buffer: CapturedBuffer,
}

#[cfg(test)]
#[path = "../../tests/unit/capture/buffer.rs"]
mod tests;
