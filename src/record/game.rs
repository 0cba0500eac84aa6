//! Game records and the move-replay driver
//!
//! A `GameRecord` holds the board size, root setup stones and the main-line
//! moves of an SGF file. `Replay` applies the moves one at a time and yields
//! a board snapshot after each, passes included.

use std::path::Path;

use crate::board::{BoardState, Colour, Point};
use crate::io::configuration::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, PASS_COORDINATE_MAX_SIZE};
use crate::io::error::{InfluenceError, Result, WithContext, parse_error};
use crate::record::parser::{Property, SgfNode, parse_main_line};

/// A single recorded move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Player making the move
    pub colour: Colour,
    /// Point played, `None` for a pass
    pub point: Option<Point>,
}

/// Setup instruction from the root node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setup {
    /// Point being set up
    pub point: Point,
    /// Stone placed, `None` to clear the point
    pub stone: Option<Colour>,
}

/// Main line of a Go game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    size: usize,
    setup: Vec<Setup>,
    moves: Vec<Move>,
}

impl GameRecord {
    /// Read and parse an SGF file
    ///
    /// # Errors
    ///
    /// Returns `RecordLoad` if the file cannot be read and `RecordParse` if
    /// its contents are not a supported Go record
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| InfluenceError::RecordLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&bytes)
    }

    /// Parse SGF text
    ///
    /// # Errors
    ///
    /// Returns `RecordParse` on syntax errors, non-Go games, unsupported
    /// board sizes or malformed coordinates
    pub fn parse(source: &[u8]) -> Result<Self> {
        let nodes = parse_main_line(source)?;
        let Some(root) = nodes.first() else {
            return Err(parse_error(0, &"record has no nodes"));
        };

        if let Some(game) = root.property("GM") {
            let value = first_value(game);
            if value.trim() != "1" {
                return Err(parse_error(
                    game.offset,
                    &format!("GM[{value}] is not a Go game"),
                ));
            }
        }

        let size = root
            .property("SZ")
            .map_or(Ok(DEFAULT_BOARD_SIZE), parse_size)?;

        let mut setup = Vec::new();
        for (ident, stone) in [
            ("AB", Some(Colour::Black)),
            ("AW", Some(Colour::White)),
            ("AE", None),
        ] {
            if let Some(property) = root.property(ident) {
                for point in expand_point_list(property, size)? {
                    setup.push(Setup { point, stone });
                }
            }
        }

        let mut moves = Vec::new();
        for (index, node) in nodes.iter().enumerate() {
            if index > 0 && has_setup(node) {
                tracing::warn!(node = index, "ignoring setup properties outside the root node");
            }
            if let Some(mv) = node_move(node, size)? {
                moves.push(mv);
            }
        }

        Ok(Self { size, setup, moves })
    }

    /// Board dimension
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Root setup instructions in application order
    pub fn setup(&self) -> &[Setup] {
        &self.setup
    }

    /// Main-line moves in play order
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Board after the root setup and before any move
    ///
    /// # Errors
    ///
    /// Returns an error if a setup point lies off the board
    pub fn initial_board(&self) -> Result<BoardState> {
        let mut board = BoardState::new(self.size)?;
        for instruction in &self.setup {
            board.set_stone(instruction.point, instruction.stone)?;
        }
        Ok(board)
    }

    /// Start replaying the main line
    ///
    /// # Errors
    ///
    /// Returns an error if the setup position cannot be built
    pub fn replay(&self) -> Result<Replay<'_>> {
        Ok(Replay {
            moves: self.moves.iter().enumerate(),
            board: self.initial_board()?,
            failed: false,
        })
    }
}

/// Board after a single move of the replay
#[derive(Debug, Clone)]
pub struct MoveFrame {
    /// One-based move number
    pub number: usize,
    /// Move that produced this frame
    pub played: Move,
    /// Stones removed by the move
    pub captures: usize,
    /// Board snapshot after the move
    pub board: BoardState,
}

/// Iterator applying recorded moves one at a time
///
/// Stops after the first illegal move.
pub struct Replay<'a> {
    moves: std::iter::Enumerate<std::slice::Iter<'a, Move>>,
    board: BoardState,
    failed: bool,
}

impl Iterator for Replay<'_> {
    type Item = Result<MoveFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let (index, &played) = self.moves.next()?;
        let number = index + 1;

        let captures = match played.point {
            Some(point) => match self.board.play(played.colour, point).with_move(number) {
                Ok(captures) => captures,
                Err(error) => {
                    self.failed = true;
                    return Some(Err(error));
                }
            },
            None => 0,
        };

        Some(Ok(MoveFrame {
            number,
            played,
            captures,
            board: self.board.clone(),
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, self.moves.size_hint().1)
        }
    }
}

fn first_value(property: &Property) -> &str {
    property.values.first().map_or("", String::as_str)
}

fn parse_size(property: &Property) -> Result<usize> {
    let value = first_value(property);
    let (cols, rows) = value
        .split_once(':')
        .map_or((value.trim(), value.trim()), |(cols, rows)| {
            (cols.trim(), rows.trim())
        });
    if cols != rows {
        return Err(parse_error(
            property.offset,
            &format!("rectangular board SZ[{value}] is not supported"),
        ));
    }
    let size: usize = cols.parse().map_err(|error| {
        parse_error(
            property.offset,
            &format!("invalid board size SZ[{value}]: {error}"),
        )
    })?;
    if !(1..=MAX_BOARD_SIZE).contains(&size) {
        return Err(parse_error(
            property.offset,
            &format!("board size {size} is outside 1..={MAX_BOARD_SIZE}"),
        ));
    }
    Ok(size)
}

fn has_setup(node: &SgfNode) -> bool {
    ["AB", "AW", "AE"]
        .iter()
        .any(|ident| node.property(ident).is_some())
}

fn node_move(node: &SgfNode, size: usize) -> Result<Option<Move>> {
    for (ident, colour) in [("B", Colour::Black), ("W", Colour::White)] {
        if let Some(property) = node.property(ident) {
            let point = parse_move_point(first_value(property), size, property.offset)?;
            return Ok(Some(Move { colour, point }));
        }
    }
    Ok(None)
}

fn coordinate(letter: char) -> Option<usize> {
    match letter {
        'a'..='z' => Some(letter as usize - 'a' as usize),
        'A'..='Z' => Some(letter as usize - 'A' as usize + 26),
        _ => None,
    }
}

fn parse_point(value: &str, size: usize, offset: usize) -> Result<Point> {
    let mut letters = value.trim().chars();
    let point = match (letters.next(), letters.next(), letters.next()) {
        (Some(c), Some(r), None) => coordinate(c).zip(coordinate(r)),
        _ => None,
    }
    .map(|(col, row)| Point::new(col, row))
    .ok_or_else(|| parse_error(offset, &format!("invalid point '{value}'")))?;

    if !point.is_on_board(size) {
        return Err(parse_error(
            offset,
            &format!("point '{value}' is outside the {size}x{size} board"),
        ));
    }
    Ok(point)
}

fn parse_move_point(value: &str, size: usize, offset: usize) -> Result<Option<Point>> {
    let trimmed = value.trim();
    if trimmed.is_empty() || (trimmed == "tt" && size <= PASS_COORDINATE_MAX_SIZE) {
        return Ok(None);
    }
    parse_point(trimmed, size, offset).map(Some)
}

/// Expand a point-list property, including `aa:cc` rectangles
fn expand_point_list(property: &Property, size: usize) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for value in &property.values {
        match value.split_once(':') {
            Some((from, to)) => {
                let a = parse_point(from, size, property.offset)?;
                let b = parse_point(to, size, property.offset)?;
                for row in a.row.min(b.row)..=a.row.max(b.row) {
                    for col in a.col.min(b.col)..=a.col.max(b.col) {
                        points.push(Point::new(col, row));
                    }
                }
            }
            None => points.push(parse_point(value, size, property.offset)?),
        }
    }
    Ok(points)
}
