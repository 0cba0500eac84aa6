//! Influence maps for Go game records
//!
//! Every intersection gets a percentage per colour that decays with the
//! Manhattan distance to that colour's nearest stone. The two percentages are
//! blended into a colour, rendered once per move of an SGF record, and the
//! frames are stitched into a video.

#![forbid(unsafe_code)]

/// Board representation and the stone view the engine reads
pub mod board;
/// Influence computation and colour blending
pub mod influence;
/// Input/output operations and error handling
pub mod io;
/// SGF parsing and move replay
pub mod record;

pub use board::{BoardState, Colour, Point, StoneSource};
pub use influence::{BlendedColour, InfluenceMap, blend, compute_influence};
pub use io::error::{InfluenceError, Result};
