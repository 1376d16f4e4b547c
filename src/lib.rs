#![forbid(unsafe_code)]

//! Record arbitrary output variables (AOVs) of a render as image sequences.
//!
//! The pipeline is: pin an output path and request a capture for each frame, receive the
//! readback some frames later, encode it as EXR, PNG, or JPEG, and write it to the path that was
//! pinned for that frame.
//!
//! ```no_run
//! use aov_recorder::{
//!     AovKind, AovRecorder, FrameIndex, FrameRange, ProcessSetting, RecorderSettings,
//!     RecordingSession, SyntheticAovSource, SyntheticSourceOpts, record_frames,
//! };
//!
//! # fn main() -> aov_recorder::RecorderResult<()> {
//! let settings = RecorderSettings::default();
//! let source = SyntheticAovSource::new(AovKind::Depth, SyntheticSourceOpts::default());
//! let mut recorder = AovRecorder::new(settings, ProcessSetting::shared(true))
//!     .with_input(Box::new(source));
//! let mut session = RecordingSession::default();
//! let stats = record_frames(
//!     &mut recorder,
//!     &mut session,
//!     FrameRange::starting_at(FrameIndex(0), 3),
//! )?;
//! assert_eq!(stats.frames_written, 3);
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod encode;
mod foundation;
pub mod output;
pub mod recorder;
pub mod session;
pub mod settings;

pub use capture::aov::AovKind;
pub use capture::buffer::{CaptureRequest, CapturedBuffer, CapturedFrame, PixelData, ReadbackFormat};
pub use capture::source::{CaptureSource, InMemorySource};
pub use capture::synthetic::{SyntheticAovSource, SyntheticSourceOpts};
pub use encode::codec::{EncodedFrame, encode_frame};
pub use encode::format::{DEFAULT_JPEG_QUALITY, ExrCompression, OutputFormat, OutputFormatKind};
pub use foundation::core::{Fps, FrameIndex, FrameRange, Resolution};
pub use foundation::error::{RecorderError, RecorderResult};
pub use output::path::{FramePathGenerator, PathGenerator};
pub use output::queue::{PendingPath, PendingPathQueue};
pub use output::writer::{FileWriter, WrittenFrame};
pub use recorder::aov::AovRecorder;
pub use recorder::lifecycle::{
    BufferDisposition, RecordStats, Recorder, RecorderState, buffer_disposition,
};
pub use session::recording::{RecordingSession, record_frames};
pub use settings::config::{ConfigValidator, OrderingPolicy, RecorderSettings, WriteErrorPolicy};
pub use settings::shared::{ProcessSetting, SettingOverride, SharedSetting};
