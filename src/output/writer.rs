use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::RecorderResult;
use crate::output::queue::{PendingPath, PendingPathQueue};

/// Result of persisting one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenFrame {
    pub sequence: u64,
    pub frame: FrameIndex,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Synchronous writer for encoded frames.
///
/// By default the payload is written to a temporary file next to the target and renamed over
/// it, so a crash mid-write never leaves a truncated file under the final name. Existing files
/// at the target are replaced.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileWriter {
    direct: bool,
}

impl FileWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write straight to the target path without a temporary file.
    pub fn direct() -> Self {
        Self { direct: true }
    }

    /// Pop the oldest pending path and write `bytes` there.
    pub fn write_next(
        &self,
        queue: &mut PendingPathQueue,
        bytes: &[u8],
    ) -> RecorderResult<WrittenFrame> {
        let pending = queue.pop()?;
        self.write(pending, bytes)
    }

    /// Write `bytes` to an already-popped pending path, consuming it.
    pub fn write(&self, pending: PendingPath, bytes: &[u8]) -> RecorderResult<WrittenFrame> {
        let _span = tracing::debug_span!("write_to_file", frame = pending.frame.0).entered();

        if self.direct {
            std::fs::write(&pending.path, bytes)
                .with_context(|| format!("write frame to '{}'", pending.path.display()))?;
        } else {
            write_via_temp(&pending.path, bytes)?;
        }

        tracing::debug!(
            frame = pending.frame.0,
            bytes = bytes.len(),
            path = %pending.path.display(),
            "frame written"
        );

        Ok(WrittenFrame {
            sequence: pending.sequence,
            frame: pending.frame,
            path: pending.path,
            bytes: bytes.len() as u64,
        })
    }
}

fn write_via_temp(path: &Path, bytes: &[u8]) -> RecorderResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".aov-")
        .suffix(".partial")
        .tempfile_in(dir)
        .with_context(|| format!("create temporary file in '{}'", dir.display()))?;
    tmp.write_all(bytes)
        .with_context(|| format!("write temporary file for '{}'", path.display()))?;
    tmp.as_file()
        .sync_data()
        .with_context(|| format!("sync temporary file for '{}'", path.display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("rename temporary file onto '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/output/writer.rs"]
mod tests;
