//! Constants and runtime configuration defaults

// Board geometry
/// Board size used when a record has no `SZ` property
pub const DEFAULT_BOARD_SIZE: usize = 19;
/// Largest board SGF coordinates can address (`a`-`z`, `A`-`Z`)
pub const MAX_BOARD_SIZE: usize = 52;
/// Boards up to this size treat the coordinate `tt` as a pass
pub const PASS_COORDINATE_MAX_SIZE: usize = 19;

// Rendering settings
/// Default pixel distance between adjacent intersections
pub const DEFAULT_CELL_SIZE: u32 = 30;
/// Smallest cell size that still leaves room for a visible stone
pub const MIN_CELL_SIZE: u32 = 6;
/// Largest accepted cell size
pub const MAX_CELL_SIZE: u32 = 256;
/// Opacity of the influence squares drawn over the background
pub const DEFAULT_OVERLAY_ALPHA: u8 = 255;
/// Gap in pixels between a stone's edge and half the cell size
pub const STONE_INSET: u32 = 2;
/// Star point radius as a fraction of the cell size
pub const STAR_POINT_DIVISOR: u32 = 6;
/// Board background colour
pub const BACKGROUND_COLOUR: [u8; 4] = [0, 0, 0, 255];
/// Grid line and star point colour
pub const GRID_COLOUR: [u8; 4] = [255, 255, 255, 255];
/// Fill colour of Black stones
pub const BLACK_STONE_COLOUR: [u8; 4] = [0, 0, 0, 255];
/// Fill colour of White stones
pub const WHITE_STONE_COLOUR: [u8; 4] = [255, 255, 255, 255];
/// Outline colour of all stones
pub const STONE_OUTLINE_COLOUR: [u8; 4] = [0, 0, 0, 255];

// Output settings
/// Suffix added to the input stem for the final-position image
pub const OUTPUT_SUFFIX: &str = "_influence";
/// Suffix added to the input stem for the frames directory
pub const FRAMES_DIR_SUFFIX: &str = "_frames";
/// Zero padding of frame file numbers
pub const FRAME_INDEX_WIDTH: usize = 4;
/// `ffmpeg` input pattern matching the frame file names
pub const FRAME_FILE_PATTERN: &str = "%04d.png";
/// Default video file name
pub const DEFAULT_VIDEO: &str = "influence.mp4";
/// Default video frame rate, one move per second
pub const DEFAULT_FPS: u32 = 1;
/// Video codec passed to `ffmpeg`
pub const VIDEO_CODEC: &str = "libx264";
/// Pixel format passed to `ffmpeg`
pub const VIDEO_PIXEL_FORMAT: &str = "yuv420p";

// Logging settings
/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";
/// Log filter used in quiet mode when `RUST_LOG` is unset
pub const QUIET_LOG_FILTER: &str = "warn";
