//! Command-line interface and the record-to-video pipeline

use crate::board::BoardState;
use crate::influence::compute_influence;
use crate::io::configuration::{
    DEFAULT_CELL_SIZE, DEFAULT_FPS, DEFAULT_OVERLAY_ALPHA, DEFAULT_VIDEO, FRAMES_DIR_SUFFIX,
    OUTPUT_SUFFIX,
};
use crate::io::encode::{EncodeConfig, encode_frames};
use crate::io::error::{InfluenceError, Result, WithContext};
use crate::io::progress::ProgressManager;
use crate::io::render::{FrameLayout, frame_file_name, render_frame, save_frame};
use crate::record::GameRecord;
use clap::Parser;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "goinfluence")]
#[command(
    author,
    version,
    about = "Render per-move influence maps of an SGF game and stitch them into a video"
)]
/// Command-line arguments for the influence renderer
pub struct Cli {
    /// SGF file to replay along its main line (setup stones are read from
    /// the root node only; setup in later nodes is ignored with a warning)
    #[arg(value_name = "SGF_FILE")]
    pub record: PathBuf,

    /// Image of the final position (default: <SGF_FILE stem>_influence.png)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Pixel size of a board intersection
    #[arg(short, long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    /// Opacity of the influence squares (0-255)
    #[arg(long, default_value_t = DEFAULT_OVERLAY_ALPHA)]
    pub alpha: u8,

    /// Output video filename
    #[arg(long, default_value = DEFAULT_VIDEO)]
    pub video: PathBuf,

    /// Video frame rate (moves per second)
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Directory for per-move frames (default: <SGF_FILE stem>_frames)
    #[arg(long, value_name = "DIR")]
    pub frames_dir: Option<PathBuf>,

    /// Render frames only, skip video encoding
    #[arg(long)]
    pub no_video: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if the video should be encoded after rendering
    pub const fn should_encode_video(&self) -> bool {
        !self.no_video
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Final-position image path, next to the record unless given
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let stem = self.record.file_stem().unwrap_or_default();
            let name = format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy());
            self.record
                .parent()
                .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
        })
    }

    /// Frames directory, in the working directory unless given
    pub fn frames_dir_path(&self) -> PathBuf {
        self.frames_dir.clone().unwrap_or_else(|| {
            let stem = self.record.file_stem().unwrap_or_default();
            PathBuf::from(format!("{}{FRAMES_DIR_SUFFIX}", stem.to_string_lossy()))
        })
    }
}

/// Files produced by a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Number of per-move frames written
    pub frames: usize,
    /// Directory holding the frames
    pub frames_dir: PathBuf,
    /// Final-position image
    pub snapshot: PathBuf,
    /// Encoded video, if one was produced
    pub video: Option<PathBuf>,
}

/// Replays a record, renders one frame per move and encodes the video
pub struct ReplayProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl ReplayProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run the full pipeline
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing or malformed, a move is
    /// illegal, a frame cannot be written, or encoding fails
    pub fn process(&mut self) -> Result<ReplaySummary> {
        let start_time = Instant::now();

        if !self.cli.record.is_file() {
            return Err(InfluenceError::RecordLoad {
                path: self.cli.record.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        }

        let record = GameRecord::from_path(&self.cli.record)?;
        let layout = FrameLayout::new(self.cli.cell_size)?.with_overlay_alpha(self.cli.alpha);
        let frames_dir = self.cli.frames_dir_path();
        prepare_frames_dir(&frames_dir)?;

        tracing::info!(
            record = %self.cli.record.display(),
            size = record.size(),
            moves = record.moves().len(),
            "replaying record"
        );

        if let Some(ref pm) = self.progress_manager {
            pm.initialize(record.moves().len());
        }

        let mut frames = 0;
        let mut last_frame: Option<RgbaImage> = None;
        for frame in record.replay()? {
            let frame = frame?;
            let image = render_board(&frame.board, record.size(), &layout)?;
            let frame_path = frames_dir.join(frame_file_name(frame.number));
            save_frame(&image, &frame_path)?;
            tracing::debug!(
                frame = frame.number,
                captures = frame.captures,
                stones = frame.board.stone_count(),
                path = %frame_path.display(),
                "saved frame"
            );

            if let Some(ref pm) = self.progress_manager {
                pm.complete_frame(frame.number, &frame.played);
            }
            frames = frame.number;
            last_frame = Some(image);
        }

        let snapshot = self.cli.output_path();
        let final_image = match last_frame {
            Some(image) => image,
            None => render_board(&record.initial_board()?, record.size(), &layout)?,
        };
        save_frame(&final_image, &snapshot)?;

        let video = self.encode(&frames_dir, frames)?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        tracing::info!(
            frames,
            snapshot = %snapshot.display(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "replay finished"
        );

        Ok(ReplaySummary {
            frames,
            frames_dir,
            snapshot,
            video,
        })
    }

    fn encode(&self, frames_dir: &Path, frames: usize) -> Result<Option<PathBuf>> {
        if !self.cli.should_encode_video() {
            return Ok(None);
        }
        if frames == 0 {
            tracing::warn!("record has no moves, skipping video");
            return Ok(None);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.start_encoding(&self.cli.video);
        }

        let config = EncodeConfig::new(frames_dir, &self.cli.video, self.cli.fps);
        encode_frames(&config)?;
        tracing::info!(video = %self.cli.video.display(), "video saved");

        Ok(Some(self.cli.video.clone()))
    }
}

fn render_board(board: &BoardState, size: usize, layout: &FrameLayout) -> Result<RgbaImage> {
    let influence = compute_influence(board, size)?;
    Ok(render_frame(board, &influence, layout))
}

// Stale numbered frames would otherwise leak into the video sequence
fn prepare_frames_dir(frames_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(frames_dir).map_err(|e| InfluenceError::FileSystem {
        path: frames_dir.to_path_buf(),
        operation: "create frames directory",
        source: e,
    })?;

    let entries = std::fs::read_dir(frames_dir).map_err(|e| InfluenceError::FileSystem {
        path: frames_dir.to_path_buf(),
        operation: "list frames directory",
        source: e,
    })?;
    for entry in entries {
        let path = entry.with_path(frames_dir)?.path();
        if is_frame_file(&path) {
            std::fs::remove_file(&path).map_err(|e| InfluenceError::FileSystem {
                path: path.clone(),
                operation: "remove stale frame",
                source: e,
            })?;
        }
    }
    Ok(())
}

fn is_frame_file(path: &Path) -> bool {
    path.is_file()
        && path.extension().and_then(|s| s.to_str()) == Some("png")
        && path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| !stem.is_empty() && stem.bytes().all(|b| b.is_ascii_digit()))
}
