//! Stone colours, board coordinates and the read-only view of a position

use std::fmt;

/// Colour of a stone
///
/// Black is drawn on the green influence channel and White on the red one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Colour {
    /// First player
    Black,
    /// Second player
    White,
}

impl Colour {
    /// The other player's colour
    pub const fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => f.write_str("black"),
            Self::White => f.write_str("white"),
        }
    }
}

/// Board intersection addressed by column and row, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    /// Zero-based column
    pub col: usize,
    /// Zero-based row
    pub row: usize,
}

impl Point {
    /// Create a point from column and row
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Manhattan distance to another point
    pub const fn manhattan(self, other: Self) -> usize {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }

    /// Whether the point lies on a `size` x `size` board
    pub const fn is_on_board(self, size: usize) -> bool {
        self.col < size && self.row < size
    }

    /// Orthogonal neighbours that lie on a `size` x `size` board
    pub fn neighbours(self, size: usize) -> impl Iterator<Item = Self> {
        let Self { col, row } = self;
        [
            col.checked_sub(1).map(|c| Self::new(c, row)),
            (col + 1 < size).then_some(Self::new(col + 1, row)),
            row.checked_sub(1).map(|r| Self::new(col, r)),
            (row + 1 < size).then_some(Self::new(col, row + 1)),
        ]
        .into_iter()
        .flatten()
    }

    /// Index into an `ndarray` grid laid out as `[row, col]`
    pub const fn index(self) -> [usize; 2] {
        [self.row, self.col]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Read-only view of a position, the only capability the engine needs
///
/// Implementors guarantee that every returned point lies on the board and
/// that no point is reported for both colours.
pub trait StoneSource {
    /// Board dimension N of an N x N board
    fn size(&self) -> usize;

    /// All points occupied by stones of `colour`
    fn occupied_points(&self, colour: Colour) -> Vec<Point>;
}
