//! Record-loop position and the driver that steps a recorder through a frame range.

pub mod recording;
