use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{RecorderError, RecorderResult};
use crate::session::recording::RecordingSession;

/// Produces the output location for each recorded frame.
pub trait PathGenerator: Send {
    /// Make sure the output directory exists.
    fn create_directory(&self, session: &RecordingSession) -> RecorderResult<()>;
    /// Absolute path of the file for the session's current frame.
    fn build_absolute_path(&self, session: &RecordingSession) -> RecorderResult<PathBuf>;
}

/// `<dir>/<stem>_<frame>.<ext>`, with the frame number zero-padded to `padding` digits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePathGenerator {
    directory: PathBuf,
    stem: String,
    padding: usize,
    extension: String,
}

impl FramePathGenerator {
    /// Build a generator; relative directories are resolved against the working directory.
    pub fn new(
        directory: impl AsRef<Path>,
        stem: impl Into<String>,
        padding: usize,
        extension: impl Into<String>,
    ) -> RecorderResult<Self> {
        let directory = std::path::absolute(directory.as_ref()).with_context(|| {
            format!(
                "resolve output directory '{}'",
                directory.as_ref().display()
            )
        })?;
        let stem = stem.into();
        if stem.is_empty() {
            return Err(RecorderError::configuration("file stem must not be empty"));
        }
        Ok(Self {
            directory,
            stem,
            padding,
            extension: extension.into(),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name for `frame`, without the directory.
    pub fn file_name(&self, frame: u64) -> String {
        format!(
            "{}_{:0width$}.{}",
            self.stem,
            frame,
            self.extension,
            width = self.padding
        )
    }
}

impl PathGenerator for FramePathGenerator {
    fn create_directory(&self, _session: &RecordingSession) -> RecorderResult<()> {
        std::fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "failed to create output directory '{}'",
                self.directory.display()
            )
        })?;
        Ok(())
    }

    fn build_absolute_path(&self, session: &RecordingSession) -> RecorderResult<PathBuf> {
        Ok(self.directory.join(self.file_name(session.frame().0)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/path.rs"]
mod tests;
