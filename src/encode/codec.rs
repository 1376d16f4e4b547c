use anyhow::Context as _;
use image::ImageEncoder as _;

use crate::capture::buffer::{CapturedBuffer, PixelData};
use crate::encode::format::{ExrCompression, OutputFormat, OutputFormatKind};
use crate::foundation::core::Resolution;
use crate::foundation::error::{RecorderError, RecorderResult};

/// An encoded image file, ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedFrame {
    /// Format the payload is encoded in.
    pub format: OutputFormatKind,
    /// Complete file contents.
    pub bytes: Vec<u8>,
}

impl EncodedFrame {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode a captured buffer in `format`.
///
/// EXR consumes float pixels; PNG and JPEG consume 8-bit pixels. A buffer in the other layout
/// is rejected with [`RecorderError::FormatMismatch`]; convert it first with
/// [`CapturedBuffer::to_rgba8`] or [`CapturedBuffer::to_rgba_f32`].
pub fn encode_frame(buffer: &CapturedBuffer, format: &OutputFormat) -> RecorderResult<EncodedFrame> {
    let (w, h) = (buffer.width, buffer.height);
    // Fields are public, so a source may have skipped `CapturedBuffer::new`.
    let samples = buffer.pixels.sample_count();
    if Resolution::new(w, h).rgba_samples() != Some(samples) {
        return Err(RecorderError::encode(format!(
            "{samples} samples do not fill a {w}x{h} RGBA buffer"
        )));
    }
    let bytes = match (format, &buffer.pixels) {
        (OutputFormat::Exr { compression }, PixelData::RgbaF32(samples)) => {
            encode_exr(samples, w, h, *compression)?
        }
        (OutputFormat::Png, PixelData::Rgba8(bytes)) => encode_png(bytes, w, h)?,
        (OutputFormat::Jpeg { quality }, PixelData::Rgba8(bytes)) => {
            encode_jpeg(bytes, w, h, *quality)?
        }
        (format, pixels) => {
            return Err(RecorderError::FormatMismatch {
                format: format.kind().name(),
                expected: format.readback_format().name(),
                actual: pixels.layout().name(),
            });
        }
    };

    Ok(EncodedFrame {
        format: format.kind(),
        bytes,
    })
}

fn encode_exr(
    samples: &[f32],
    width: u32,
    height: u32,
    compression: ExrCompression,
) -> RecorderResult<Vec<u8>> {
    use exr::prelude::{Encoding, Image, SpecificChannels, Vec2, WritableImage as _};

    let w = width as usize;
    let channels = SpecificChannels::rgba(|pos: Vec2<usize>| {
        let i = (pos.1 * w + pos.0) * 4;
        (samples[i], samples[i + 1], samples[i + 2], samples[i + 3])
    });

    let encoding = Encoding {
        compression: exr_compression(compression),
        ..Encoding::UNCOMPRESSED
    };
    let image = Image::from_encoded_channels((w, height as usize), encoding, channels);

    let mut out = Vec::new();
    image
        .write()
        .to_buffered(std::io::Cursor::new(&mut out))
        .map_err(|e| RecorderError::encode(format!("exr encode failed: {e}")))?;
    Ok(out)
}

fn exr_compression(c: ExrCompression) -> exr::compression::Compression {
    use exr::compression::Compression;
    match c {
        ExrCompression::None => Compression::Uncompressed,
        ExrCompression::Rle => Compression::RLE,
        ExrCompression::Zips => Compression::ZIP1,
        ExrCompression::Zip => Compression::ZIP16,
        ExrCompression::Piz => Compression::PIZ,
    }
}

fn encode_png(rgba: &[u8], width: u32, height: u32) -> RecorderResult<Vec<u8>> {
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(rgba, width, height, image::ExtendedColorType::Rgba8)
        .context("png encode")?;
    Ok(out)
}

fn encode_jpeg(rgba: &[u8], width: u32, height: u32, quality: u8) -> RecorderResult<Vec<u8>> {
    // JPEG carries no alpha channel.
    let rgb: Vec<u8> = rgba
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, jpeg_quality(quality))
        .write_image(&rgb, width, height, image::ExtendedColorType::Rgb8)
        .context("jpeg encode")?;
    Ok(out)
}

/// Map the configured quality onto the encoder's accepted `1..=100`.
pub(crate) fn jpeg_quality(quality: u8) -> u8 {
    quality.clamp(1, 100)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/codec.rs"]
mod tests;
