use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::capture::aov::AovKind;
use crate::encode::format::OutputFormat;
use crate::foundation::core::Resolution;
use crate::foundation::error::{RecorderError, RecorderResult};

const MAX_FRAME_PADDING: usize = 12;

/// Reports whether a configuration can be recorded with.
pub trait ConfigValidator {
    /// Human-readable problems; empty when the configuration is usable.
    fn validation_errors(&self) -> Vec<String>;

    fn has_errors(&self) -> bool {
        !self.validation_errors().is_empty()
    }
}

/// How the recorder treats a completion that is not the oldest outstanding request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// The capture input promises in-order completions; a violation is a fatal pipeline error.
    #[default]
    Strict,
    /// Hold early completions until every earlier request has been written.
    Reorder,
}

/// What happens when persisting one frame fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteErrorPolicy {
    /// Log the failure, count it, and keep recording.
    #[default]
    Skip,
    /// Propagate the error and end the session.
    Abort,
}

/// Settings of one AOV recorder.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecorderSettings {
    /// Display name used in diagnostics.
    pub name: String,
    /// Buffer to capture.
    pub aov: AovKind,
    /// Output encoding and its parameters.
    pub output: OutputFormat,
    /// Directory frames are written to.
    pub output_dir: PathBuf,
    /// File name prefix; the frame number and extension are appended.
    pub file_stem: String,
    /// Minimum number of digits in the frame number.
    pub frame_padding: usize,
    /// Capture width in pixels.
    pub width: u32,
    /// Capture height in pixels.
    pub height: u32,
    pub ordering: OrderingPolicy,
    pub on_write_error: WriteErrorPolicy,
    /// Log a warning once this many frames are waiting on their readback.
    pub pending_warn_threshold: usize,
}

impl Default for RecorderSettings {
    fn default() -> Self {
        Self {
            name: "AOV Recorder".to_string(),
            aov: AovKind::default(),
            output: OutputFormat::default(),
            output_dir: PathBuf::from("Recordings"),
            file_stem: "aov".to_string(),
            frame_padding: 4,
            width: 1920,
            height: 1080,
            ordering: OrderingPolicy::default(),
            on_write_error: WriteErrorPolicy::default(),
            pending_warn_threshold: 32,
        }
    }
}

impl RecorderSettings {
    pub fn from_json_str(json: &str) -> RecorderResult<Self> {
        serde_json::from_str(json).map_err(|e| RecorderError::serde(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> RecorderResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open recorder settings '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            RecorderError::serde(format!("parse recorder settings '{}': {e}", path.display()))
        })
    }

    pub fn to_json_pretty(&self) -> RecorderResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RecorderError::serde(e.to_string()))
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// All validation errors joined into a single [`RecorderError::Configuration`].
    pub fn validate(&self) -> RecorderResult<()> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            return Ok(());
        }
        Err(RecorderError::configuration(format!(
            "'{}': {}",
            self.name,
            errors.join("; ")
        )))
    }
}

impl ConfigValidator for RecorderSettings {
    fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("recorder name must not be empty".to_string());
        }
        if self.file_stem.is_empty() {
            errors.push("file stem must not be empty".to_string());
        } else if self.file_stem.contains(['/', '\\']) {
            errors.push(format!(
                "file stem '{}' must not contain path separators",
                self.file_stem
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            errors.push("output directory must not be empty".to_string());
        }
        if self.frame_padding > MAX_FRAME_PADDING {
            errors.push(format!(
                "frame padding {} exceeds {MAX_FRAME_PADDING}",
                self.frame_padding
            ));
        }
        if self.width == 0 || self.height == 0 {
            errors.push(format!(
                "capture resolution {}x{} must be non-zero",
                self.width, self.height
            ));
        } else if self.resolution().rgba_samples().is_none() {
            errors.push(format!(
                "capture resolution {}x{} is too large",
                self.width, self.height
            ));
        }
        if let OutputFormat::Jpeg { quality } = self.output
            && quality > 100
        {
            errors.push(format!("jpeg quality {quality} is outside 0..=100"));
        }

        errors
    }
}

#[cfg(test)]
#[path = "../../tests/unit/settings/config.rs"]
mod tests;
