//! Per-point influence computation
//!
//! For each intersection the influence of a colour is `100 / (d + 1)` where
//! `d` is the Manhattan distance to that colour's nearest stone, or zero when
//! the colour has no stones. The two percentages are blended into a colour.
//! Work per call is O(N²) per colour; nothing is cached between calls.

use ndarray::Array2;

use crate::board::{Colour, Point, StoneSource};
use crate::influence::blend::{BlendedColour, blend};
use crate::influence::distance::DistanceField;
use crate::io::error::{Result, invalid_parameter};

/// Influence percentages of both colours at one point, each in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Influence {
    /// Black influence percentage
    pub black: f64,
    /// White influence percentage
    pub white: f64,
}

impl Influence {
    /// Percentage for one colour
    pub const fn percentage(self, colour: Colour) -> f64 {
        match colour {
            Colour::Black => self.black,
            Colour::White => self.white,
        }
    }
}

/// Influence and blended colour of a single point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointInfluence {
    /// Influence percentages
    pub influence: Influence,
    /// Colour derived from the percentages
    pub colour: BlendedColour,
}

/// Influence of every point on the board, exactly one entry per point
#[derive(Debug, Clone, PartialEq)]
pub struct InfluenceMap {
    /// Entries indexed as `[row, col]`
    cells: Array2<PointInfluence>,
}

impl InfluenceMap {
    /// Board dimension N
    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of entries, always N²
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the map has no entries, which a valid board never produces
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Entry for `point`, `None` if the point is off the board
    pub fn get(&self, point: Point) -> Option<&PointInfluence> {
        self.cells.get(point.index())
    }

    /// All entries in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Point, &PointInfluence)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), entry)| (Point::new(col, row), entry))
    }
}

/// Percentage for a colour whose nearest stone is `distance` away
///
/// `None` means the colour has no stones on the board. The fraction is
/// taken before scaling to percent; `100 / (d + 1)` rounds differently
/// (d = 33 lands on 7.5 instead of just below it).
pub fn influence_percentage(distance: Option<usize>) -> f64 {
    distance.map_or(0.0, |d| 1.0 / (d as f64 + 1.0) * 100.0)
}

/// Compute the influence map of a position
///
/// A point holding a stone has distance zero to its own colour and therefore
/// exactly 100 percent influence for it.
///
/// # Errors
///
/// Returns an error if `size` is zero or any stone lies outside `[0, size)`
pub fn compute_influence<S>(board: &S, size: usize) -> Result<InfluenceMap>
where
    S: StoneSource + ?Sized,
{
    if size == 0 {
        return Err(invalid_parameter(
            "size",
            &size,
            &"board size must be at least 1",
        ));
    }

    let black = DistanceField::from_sources(size, &board.occupied_points(Colour::Black))?;
    let white = DistanceField::from_sources(size, &board.occupied_points(Colour::White))?;

    let cells = Array2::from_shape_fn((size, size), |(row, col)| {
        let point = Point::new(col, row);
        let influence = Influence {
            black: influence_percentage(black.as_ref().and_then(|f| f.distance(point))),
            white: influence_percentage(white.as_ref().and_then(|f| f.distance(point))),
        };
        PointInfluence {
            influence,
            colour: blend(influence.black, influence.white),
        }
    });

    Ok(InfluenceMap { cells })
}
