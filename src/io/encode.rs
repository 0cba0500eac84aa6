//! Video assembly from numbered PNG frames through the system `ffmpeg`

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::io::configuration::{FRAME_FILE_PATTERN, VIDEO_CODEC, VIDEO_PIXEL_FORMAT};
use crate::io::error::{InfluenceError, Result, invalid_parameter};

// yuv420p needs even dimensions; pad odd frames by one pixel
const EVEN_PAD_FILTER: &str = "pad=ceil(iw/2)*2:ceil(ih/2)*2";

/// Settings for a single `ffmpeg` run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeConfig {
    /// Directory holding `0001.png`, `0002.png`, ...
    pub frames_dir: PathBuf,
    /// Frames per second of the output video
    pub fps: u32,
    /// Video file to write
    pub out_path: PathBuf,
    /// Replace an existing output file
    pub overwrite: bool,
}

impl EncodeConfig {
    /// Overwriting configuration for the given frames and output
    pub fn new(frames_dir: impl Into<PathBuf>, out_path: impl Into<PathBuf>, fps: u32) -> Self {
        Self {
            frames_dir: frames_dir.into(),
            fps,
            out_path: out_path.into(),
            overwrite: true,
        }
    }

    /// Check the configuration before spawning the encoder
    ///
    /// # Errors
    ///
    /// Returns an error if the frame rate is zero, the frames directory is
    /// missing, or the output exists and overwriting is disabled
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(invalid_parameter("fps", &self.fps, &"must be non-zero"));
        }
        if !self.frames_dir.is_dir() {
            return Err(invalid_parameter(
                "frames_dir",
                &self.frames_dir.display(),
                &"frames directory does not exist",
            ));
        }
        if !self.overwrite && self.out_path.exists() {
            return Err(invalid_parameter(
                "video",
                &self.out_path.display(),
                &"output file already exists",
            ));
        }
        Ok(())
    }

    /// Input pattern matching the numbered frames
    pub fn input_pattern(&self) -> PathBuf {
        self.frames_dir.join(FRAME_FILE_PATTERN)
    }

    /// Full `ffmpeg` argument list
    pub fn ffmpeg_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![if self.overwrite { "-y" } else { "-n" }.into()];
        args.extend(
            ["-loglevel", "error", "-framerate"]
                .into_iter()
                .map(OsString::from),
        );
        args.push(self.fps.to_string().into());
        args.push("-i".into());
        args.push(self.input_pattern().into_os_string());
        args.extend(
            [
                "-vf",
                EVEN_PAD_FILTER,
                "-c:v",
                VIDEO_CODEC,
                "-pix_fmt",
                VIDEO_PIXEL_FORMAT,
            ]
            .into_iter()
            .map(OsString::from),
        );
        args.push(self.out_path.clone().into_os_string());
        args
    }
}

/// Whether an `ffmpeg` binary can be run
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| InfluenceError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

/// Stitch the numbered frames into a video
///
/// # Errors
///
/// Returns `EncoderUnavailable` if `ffmpeg` is not on PATH and `Encode` if
/// it cannot be spawned or exits unsuccessfully
pub fn encode_frames(cfg: &EncodeConfig) -> Result<()> {
    cfg.validate()?;
    ensure_parent_dir(&cfg.out_path)?;

    if !is_ffmpeg_on_path() {
        return Err(InfluenceError::EncoderUnavailable);
    }

    tracing::debug!(
        input = %cfg.input_pattern().display(),
        output = %cfg.out_path.display(),
        fps = cfg.fps,
        "running ffmpeg"
    );

    let output = Command::new("ffmpeg")
        .args(cfg.ffmpeg_args())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| InfluenceError::Encode {
            reason: format!("failed to spawn ffmpeg: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(InfluenceError::Encode {
            reason: format!("ffmpeg exited with status {}: {}", output.status, stderr.trim()),
        });
    }

    Ok(())
}
