//! Nearest-stone distances on an unobstructed board
//!
//! On a 4-connected grid without obstacles the breadth-first distance from a
//! set of sources equals the Manhattan distance to the nearest source, so a
//! single multi-source sweep replaces the per-point scan over all stones.

use std::collections::VecDeque;

use bitvec::prelude::{BitVec, bitvec};
use ndarray::Array2;

use crate::board::Point;
use crate::io::error::{InfluenceError, Result, invalid_parameter};

/// Minimum Manhattan distance from `point` to any of `stones`
///
/// Returns `None` when `stones` is empty. This is the O(S) reference scan.
pub fn nearest_distance(point: Point, stones: &[Point]) -> Option<usize> {
    stones.iter().map(|&stone| point.manhattan(stone)).min()
}

/// Distance from every point of the board to the nearest source point
#[derive(Debug, Clone)]
pub struct DistanceField {
    /// Distances indexed as `[row, col]`
    distances: Array2<usize>,
}

impl DistanceField {
    /// Sweep outward from all `sources` at once
    ///
    /// Returns `Ok(None)` when there are no sources, since no distance is
    /// defined in that case.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or a source lies off the board
    pub fn from_sources(size: usize, sources: &[Point]) -> Result<Option<Self>> {
        if size == 0 {
            return Err(invalid_parameter(
                "size",
                &size,
                &"board size must be at least 1",
            ));
        }
        if let Some(&point) = sources.iter().find(|point| !point.is_on_board(size)) {
            return Err(InfluenceError::PointOutOfBounds { point, size });
        }
        if sources.is_empty() {
            return Ok(None);
        }

        let mut distances = Array2::zeros((size, size));
        let mut visited: BitVec = bitvec![0; size * size];
        let mut frontier = VecDeque::with_capacity(size * size);

        for &source in sources {
            let flat = source.row * size + source.col;
            if !visited.get(flat).is_some_and(|bit| *bit) {
                visited.set(flat, true);
                frontier.push_back((source, 0));
            }
        }

        while let Some((point, distance)) = frontier.pop_front() {
            if let Some(cell) = distances.get_mut(point.index()) {
                *cell = distance;
            }
            for neighbour in point.neighbours(size) {
                let flat = neighbour.row * size + neighbour.col;
                if !visited.get(flat).is_some_and(|bit| *bit) {
                    visited.set(flat, true);
                    frontier.push_back((neighbour, distance + 1));
                }
            }
        }

        Ok(Some(Self { distances }))
    }

    /// Distance at `point`, `None` if the point is off the board
    pub fn distance(&self, point: Point) -> Option<usize> {
        self.distances.get(point.index()).copied()
    }

    /// Board dimension the field was computed for
    pub fn size(&self) -> usize {
        self.distances.nrows()
    }
}
