//! Progress display while frames are rendered and the video is encoded

use crate::record::Move;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static FRAME_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Frames: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static ENCODE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner} {msg} [{elapsed_precise}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Tracks rendered frames, then the encoding step
pub struct ProgressManager {
    bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with an empty bar
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(FRAME_STYLE.clone());
        Self { bar }
    }

    /// Set the number of frames that will be rendered
    pub fn initialize(&self, frame_count: usize) {
        self.bar.set_length(frame_count as u64);
        self.bar.set_position(0);
    }

    /// Report a finished frame
    pub fn complete_frame(&self, number: usize, played: &Move) {
        let label = played
            .point
            .map_or_else(|| "pass".to_string(), |point| point.to_string());
        self.bar.set_position(number as u64);
        self.bar.set_message(format!("{} {label}", played.colour));
    }

    /// Switch to a spinner while the video is encoded
    pub fn start_encoding(&self, video: &std::path::Path) {
        self.bar.set_style(ENCODE_STYLE.clone());
        self.bar.set_message(format!("Encoding {}", video.display()));
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    /// Clean up the progress display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
