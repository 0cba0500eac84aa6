//! Mutable Go board used by the move-replay driver
//!
//! Supports setup stones, stone placement with capture of surrounded groups
//! and self-capture. Ko and superko are not checked; records are trusted for
//! those rules.

use bitvec::prelude::{BitVec, bitvec};
use ndarray::Array2;

use crate::board::stones::{Colour, Point, StoneSource};
use crate::io::error::{InfluenceError, Result, invalid_parameter};

/// Square Go board snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    /// Cell contents indexed as `[row, col]`
    cells: Array2<Option<Colour>>,
    size: usize,
}

impl BoardState {
    /// Create an empty `size` x `size` board
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(invalid_parameter(
                "size",
                &size,
                &"board size must be at least 1",
            ));
        }
        Ok(Self {
            cells: Array2::from_elem((size, size), None),
            size,
        })
    }

    /// Create a board from explicit stone lists without applying captures
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero, a point is off the board, or a
    /// point appears in both lists
    pub fn with_stones(size: usize, black: &[Point], white: &[Point]) -> Result<Self> {
        let mut board = Self::new(size)?;
        for (colour, points) in [(Colour::Black, black), (Colour::White, white)] {
            for &point in points {
                if let Some(occupant) = board.get(point)?.filter(|&c| c != colour) {
                    return Err(InfluenceError::PointOccupied { point, occupant });
                }
                board.set_stone(point, Some(colour))?;
            }
        }
        Ok(board)
    }

    /// Contents of a point
    ///
    /// # Errors
    ///
    /// Returns an error if the point is off the board
    pub fn get(&self, point: Point) -> Result<Option<Colour>> {
        self.cells
            .get(point.index())
            .copied()
            .ok_or(InfluenceError::PointOutOfBounds {
                point,
                size: self.size,
            })
    }

    /// Place or clear a stone without any capture processing
    ///
    /// Used for setup properties, which are not moves.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is off the board
    pub fn set_stone(&mut self, point: Point, stone: Option<Colour>) -> Result<()> {
        let size = self.size;
        let cell = self
            .cells
            .get_mut(point.index())
            .ok_or(InfluenceError::PointOutOfBounds { point, size })?;
        *cell = stone;
        Ok(())
    }

    /// Play a stone, removing any groups left without liberties
    ///
    /// Opponent groups are captured first. If the played stone's own group
    /// then has no liberties it is removed as well. Returns the total number
    /// of stones taken off the board.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is off the board or already occupied
    pub fn play(&mut self, colour: Colour, point: Point) -> Result<usize> {
        if let Some(occupant) = self.get(point)? {
            return Err(InfluenceError::PointOccupied { point, occupant });
        }
        self.set_stone(point, Some(colour))?;

        let mut captured = 0;
        for neighbour in point.neighbours(self.size) {
            if self.get(neighbour)? == Some(colour.opponent()) {
                captured += self.remove_if_dead(neighbour)?;
            }
        }
        captured += self.remove_if_dead(point)?;

        Ok(captured)
    }

    /// Number of stones on the board
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Collect the group containing `start` and report whether it has a liberty
    fn group_at(&self, start: Point) -> Result<(Vec<Point>, bool)> {
        let Some(colour) = self.get(start)? else {
            return Ok((Vec::new(), true));
        };

        let mut seen: BitVec = bitvec![0; self.size * self.size];
        let mut stack = vec![start];
        let mut group = Vec::new();
        let mut has_liberty = false;
        seen.set(self.flat(start), true);

        while let Some(current) = stack.pop() {
            group.push(current);
            for neighbour in current.neighbours(self.size) {
                match self.get(neighbour)? {
                    None => has_liberty = true,
                    Some(c) if c == colour => {
                        let flat = self.flat(neighbour);
                        if !seen.get(flat).is_some_and(|bit| *bit) {
                            seen.set(flat, true);
                            stack.push(neighbour);
                        }
                    }
                    Some(_) => {}
                }
            }
        }

        Ok((group, has_liberty))
    }

    fn remove_if_dead(&mut self, point: Point) -> Result<usize> {
        let (group, has_liberty) = self.group_at(point)?;
        if has_liberty {
            return Ok(0);
        }
        for &stone in &group {
            self.set_stone(stone, None)?;
        }
        Ok(group.len())
    }

    const fn flat(&self, point: Point) -> usize {
        point.row * self.size + point.col
    }
}

impl StoneSource for BoardState {
    fn size(&self) -> usize {
        self.size
    }

    fn occupied_points(&self, colour: Colour) -> Vec<Point> {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| **cell == Some(colour))
            .map(|((row, col), _)| Point::new(col, row))
            .collect()
    }
}
