use std::str::FromStr;

use crate::capture::buffer::ReadbackFormat;
use crate::foundation::error::{RecorderError, RecorderResult};

/// Default JPEG quality when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// OpenEXR compression mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExrCompression {
    None,
    Rle,
    /// Zlib, one scanline per block.
    Zips,
    /// Zlib, sixteen scanlines per block.
    #[default]
    Zip,
    Piz,
}

impl ExrCompression {
    pub fn all() -> &'static [ExrCompression] {
        &[
            ExrCompression::None,
            ExrCompression::Rle,
            ExrCompression::Zips,
            ExrCompression::Zip,
            ExrCompression::Piz,
        ]
    }
}

impl std::fmt::Display for ExrCompression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExrCompression::None => write!(f, "None"),
            ExrCompression::Rle => write!(f, "RLE"),
            ExrCompression::Zips => write!(f, "ZIPS"),
            ExrCompression::Zip => write!(f, "ZIP"),
            ExrCompression::Piz => write!(f, "PIZ"),
        }
    }
}

/// Output encoding with its format-specific parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum OutputFormat {
    /// Floating-point lossless OpenEXR.
    Exr {
        #[serde(default)]
        compression: ExrCompression,
    },
    /// 8-bit lossless PNG.
    Png,
    /// 8-bit lossy JPEG, quality in `[0, 100]`.
    Jpeg {
        #[serde(default = "default_jpeg_quality")]
        quality: u8,
    },
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Exr {
            compression: ExrCompression::default(),
        }
    }
}

impl OutputFormat {
    pub fn kind(&self) -> OutputFormatKind {
        match self {
            Self::Exr { .. } => OutputFormatKind::Exr,
            Self::Png => OutputFormatKind::Png,
            Self::Jpeg { .. } => OutputFormatKind::Jpeg,
        }
    }

    /// Pixel layout the capture input must produce for this format.
    pub fn readback_format(&self) -> ReadbackFormat {
        match self {
            Self::Exr { .. } => ReadbackFormat::RgbaF32,
            Self::Png | Self::Jpeg { .. } => ReadbackFormat::Rgba8,
        }
    }

    pub fn extension(&self) -> &'static str {
        self.kind().extension()
    }

    /// Whether this is the quality-parameterized lossy format.
    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::Jpeg { .. })
    }
}

/// Parameterless output format selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormatKind {
    Exr,
    Png,
    Jpeg,
}

impl OutputFormatKind {
    pub fn all() -> &'static [OutputFormatKind] {
        &[
            OutputFormatKind::Exr,
            OutputFormatKind::Png,
            OutputFormatKind::Jpeg,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputFormatKind::Exr => "exr",
            OutputFormatKind::Png => "png",
            OutputFormatKind::Jpeg => "jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormatKind::Exr => "exr",
            OutputFormatKind::Png => "png",
            OutputFormatKind::Jpeg => "jpg",
        }
    }

    /// Attach default parameters to the selector.
    pub fn with_defaults(self) -> OutputFormat {
        match self {
            OutputFormatKind::Exr => OutputFormat::default(),
            OutputFormatKind::Png => OutputFormat::Png,
            OutputFormatKind::Jpeg => OutputFormat::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            },
        }
    }
}

impl std::fmt::Display for OutputFormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormatKind {
    type Err = RecorderError;

    fn from_str(s: &str) -> RecorderResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exr" => Ok(Self::Exr),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            other => Err(RecorderError::unsupported_format(format!(
                "'{other}' (expected one of exr, png, jpeg)"
            ))),
        }
    }
}

/// Numeric selector as stored by older settings files: 0 = EXR, 1 = PNG, 2 = JPEG.
impl TryFrom<u8> for OutputFormatKind {
    type Error = RecorderError;

    fn try_from(value: u8) -> RecorderResult<Self> {
        match value {
            0 => Ok(Self::Exr),
            1 => Ok(Self::Png),
            2 => Ok(Self::Jpeg),
            other => Err(RecorderError::unsupported_format(format!(
                "format selector {other} is out of range"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/format.rs"]
mod tests;
