//! Board representation consumed by the influence engine
//!
//! This module contains:
//! - Stone colours, board points and the narrow `StoneSource` view
//! - A mutable Go board with capture handling for move replay

/// Go board with setup, placement and capture
pub mod state;
/// Colours, points and the read-only stone view
pub mod stones;

pub use state::BoardState;
pub use stones::{Colour, Point, StoneSource};
