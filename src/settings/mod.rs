//! Recorder configuration and the shared host setting it guards.

/// Recorder settings, policies, and validation.
pub mod config;
/// Scoped access to the host's shared setting.
pub mod shared;
