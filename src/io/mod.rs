/// Command-line parsing and the replay pipeline
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Video encoding through `ffmpeg`
pub mod encode;
/// Error types and context helpers
pub mod error;
/// Diagnostic logging setup
pub mod logging;
/// Progress display
pub mod progress;
/// Frame rasterization and export
pub mod render;
