//! SGF move records and replay
//!
//! This module contains:
//! - A main-line SGF parser
//! - Game records with setup stones and moves
//! - The replay iterator producing one board per move

/// Game records and the replay driver
pub mod game;
/// SGF syntax parsing
pub mod parser;

pub use game::{GameRecord, Move, MoveFrame, Replay, Setup};
