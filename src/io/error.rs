//! Error types and context management for replay and rendering operations

use crate::board::{Colour, Point};
use std::fmt;
use std::path::PathBuf;

/// Placeholder path used when an I/O error arrives without one
const UNKNOWN_PATH: &str = "<unknown>";

/// Main error type for all crate operations
#[derive(Debug)]
pub enum InfluenceError {
    /// Failed to read the move record from the filesystem
    RecordLoad {
        /// Path to the record file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Move record text is not valid SGF or describes an unsupported game
    RecordParse {
        /// Byte offset into the record where parsing stopped
        offset: usize,
        /// Description of what's wrong with the record
        reason: String,
    },

    /// A recorded move could not be applied to the board
    InvalidMove {
        /// One-based move number within the main line
        move_number: usize,
        /// Description of why the move was rejected
        reason: String,
    },

    /// Point lies outside the board
    PointOutOfBounds {
        /// Offending point
        point: Point,
        /// Board dimension
        size: usize,
    },

    /// Point already holds a stone
    PointOccupied {
        /// Offending point
        point: Point,
        /// Colour of the stone already there
        occupant: Colour,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered frame to disk
    FrameExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The `ffmpeg` binary could not be found
    EncoderUnavailable,

    /// Video encoding failed
    Encode {
        /// Description of the failure, including encoder output when available
        reason: String,
    },
}

impl fmt::Display for InfluenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecordLoad { path, source } => {
                write!(f, "Failed to read record '{}': {source}", path.display())
            }
            Self::RecordParse { offset, reason } => {
                write!(f, "Could not parse SGF at byte {offset}: {reason}")
            }
            Self::InvalidMove {
                move_number,
                reason,
            } => {
                write!(f, "Invalid move {move_number}: {reason}")
            }
            Self::PointOutOfBounds { point, size } => {
                write!(f, "Point {point} is outside the {size}x{size} board")
            }
            Self::PointOccupied { point, occupant } => {
                write!(f, "Point {point} is already occupied by {occupant}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FrameExport { path, source } => {
                write!(f, "Failed to export frame to '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::EncoderUnavailable => {
                write!(f, "ffmpeg is required for video encoding but was not found on PATH")
            }
            Self::Encode { reason } => write!(f, "Video encoding failed: {reason}"),
        }
    }
}

impl std::error::Error for InfluenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RecordLoad { source, .. } | Self::FileSystem { source, .. } => Some(source),
            Self::FrameExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, InfluenceError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Move number being replayed
    pub move_number: Option<usize>,
    /// Path being read or written
    pub path: Option<PathBuf>,
}

/// Enriches errors with replay and filesystem state
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Attribute a board placement error to a move number
    ///
    /// # Errors
    ///
    /// Propagates the original error, turning placement errors into `InvalidMove`
    fn with_move(self, move_number: usize) -> Result<T>;

    /// Attach a path to filesystem errors that arrived without one
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<InfluenceError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            let is_placement = matches!(
                error,
                InfluenceError::PointOutOfBounds { .. } | InfluenceError::PointOccupied { .. }
            );
            if let Some(move_number) = context.move_number.filter(|_| is_placement) {
                error = InfluenceError::InvalidMove {
                    move_number,
                    reason: error.to_string(),
                };
            }
            if let Some(path) = context.path {
                match &mut error {
                    InfluenceError::FileSystem { path: p, .. }
                    | InfluenceError::FrameExport { path: p, .. }
                        if p.as_os_str() == UNKNOWN_PATH =>
                    {
                        *p = path;
                    }
                    _ => {}
                }
            }
            error
        })
    }

    fn with_move(self, move_number: usize) -> Result<T> {
        self.with_context(ErrorContext {
            move_number: Some(move_number),
            ..Default::default()
        })
    }

    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.into()),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for InfluenceError {
    fn from(err: image::ImageError) -> Self {
        Self::FrameExport {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for InfluenceError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> InfluenceError {
    InfluenceError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a record parse error at a byte offset
pub fn parse_error(offset: usize, reason: &impl ToString) -> InfluenceError {
    InfluenceError::RecordParse {
        offset,
        reason: reason.to_string(),
    }
}
