//! Influence computation and colour blending
//!
//! This module contains:
//! - Nearest-stone distance fields
//! - The percentage-to-colour blend
//! - The per-point aggregation producing an `InfluenceMap`

/// Percentage-to-colour mapping
pub mod blend;
/// Manhattan distance to the nearest stone
pub mod distance;
/// Influence map computation
pub mod engine;

pub use blend::{BlendedColour, blend};
pub use engine::{Influence, InfluenceMap, PointInfluence, compute_influence};
