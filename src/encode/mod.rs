//! Output formats and the encoders behind them.

/// Encoders from captured buffers to image file payloads.
pub mod codec;
/// Output format selection and parameters.
pub mod format;
