//! 2D grid positions and boundaries

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use thiserror::Error;

/// Error type for grid construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Boundary dimensions must both be strictly positive
    #[error("boundary dimensions must be positive, got {rows} x {columns}")]
    NonPositiveDimensions { rows: i64, columns: i64 },
}

/// A 2D direction on a row/column grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing the opposite way
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The direction after turning 90 degrees counter-clockwise
    pub fn turn_left(self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// The direction after turning 90 degrees clockwise
    pub fn turn_right(self) -> Direction {
        self.turn_left().opposite()
    }
}

/// A position in a grid
///
/// Immutable (row, column) pair with structural equality and row-major
/// ordering. Derived positions are pure computations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// The row position
    pub row: i64,
    /// The column position
    pub column: i64,
}

impl Position {
    /// The origin point (0, 0)
    pub const ORIGIN: Position = Position { row: 0, column: 0 };

    /// Create a position from row and column
    pub const fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }

    /// The position one row up
    pub fn top(self) -> Position {
        Position::new(self.row - 1, self.column)
    }

    /// The position one row down
    pub fn bottom(self) -> Position {
        Position::new(self.row + 1, self.column)
    }

    /// The position one column left
    pub fn left(self) -> Position {
        Position::new(self.row, self.column - 1)
    }

    /// The position one column right
    pub fn right(self) -> Position {
        Position::new(self.row, self.column + 1)
    }

    /// The position diagonally up-left
    pub fn top_left(self) -> Position {
        Position::new(self.row - 1, self.column - 1)
    }

    /// The position diagonally up-right
    pub fn top_right(self) -> Position {
        Position::new(self.row - 1, self.column + 1)
    }

    /// The position diagonally down-left
    pub fn bottom_left(self) -> Position {
        Position::new(self.row + 1, self.column - 1)
    }

    /// The position diagonally down-right
    pub fn bottom_right(self) -> Position {
        Position::new(self.row + 1, self.column + 1)
    }

    /// The four cross neighbours (top, bottom, left, right)
    pub fn cross_neighbours(self) -> [Position; 4] {
        [self.top(), self.bottom(), self.left(), self.right()]
    }

    /// The four diagonal neighbours
    pub fn diagonal_neighbours(self) -> [Position; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_left(),
            self.bottom_right(),
        ]
    }

    /// All eight neighbours, cross first then diagonal
    pub fn neighbours(self) -> [Position; 8] {
        [
            self.top(),
            self.bottom(),
            self.left(),
            self.right(),
            self.top_left(),
            self.top_right(),
            self.bottom_left(),
            self.bottom_right(),
        ]
    }

    /// The destination position using the given direction and distance
    pub fn destination(self, direction: Direction, distance: i64) -> Position {
        match direction {
            Direction::Up => Position::new(self.row - distance, self.column),
            Direction::Down => Position::new(self.row + distance, self.column),
            Direction::Left => Position::new(self.row, self.column - distance),
            Direction::Right => Position::new(self.row, self.column + distance),
        }
    }

    /// The position one step in the given direction
    pub fn step(self, direction: Direction) -> Position {
        self.destination(direction, 1)
    }

    /// The Manhattan distance between this position and another
    pub fn manhattan_distance(self, other: Position) -> i64 {
        (self.row - other.row).abs() + (self.column - other.column).abs()
    }

    /// Reduce this position into a boundary using Euclidean modulo
    pub fn reduce(self, total_rows: i64, total_columns: i64) -> Position {
        Position::new(
            self.row.rem_euclid(total_rows),
            self.column.rem_euclid(total_columns),
        )
    }

    /// This position with a new row value
    pub fn with_row(self, row: i64) -> Position {
        Position::new(row, self.column)
    }

    /// This position with a new column value
    pub fn with_column(self, column: i64) -> Position {
        Position::new(self.row, column)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.row + rhs.row, self.column + rhs.column)
    }
}

impl Add<i64> for Position {
    type Output = Position;

    fn add(self, rhs: i64) -> Position {
        Position::new(self.row + rhs, self.column + rhs)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.row - rhs.row, self.column - rhs.column)
    }
}

impl Sub<i64> for Position {
    type Output = Position;

    fn sub(self, rhs: i64) -> Position {
        Position::new(self.row - rhs, self.column - rhs)
    }
}

impl Mul<i64> for Position {
    type Output = Position;

    fn mul(self, rhs: i64) -> Position {
        Position::new(self.row * rhs, self.column * rhs)
    }
}

impl Div<i64> for Position {
    type Output = Position;

    fn div(self, rhs: i64) -> Position {
        Position::new(self.row / rhs, self.column / rhs)
    }
}

impl Neg for Position {
    type Output = Position;

    fn neg(self) -> Position {
        Position::new(-self.row, -self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// The boundary for a grid
///
/// Rectangular valid-index bound; both dimensions are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    row_count: i64,
    column_count: i64,
}

impl Boundary {
    /// Create a boundary from row and column counts
    ///
    /// # Errors
    /// Returns [`GridError::NonPositiveDimensions`] when either count is 0 or negative.
    pub fn new(row_count: i64, column_count: i64) -> Result<Self, GridError> {
        if row_count <= 0 || column_count <= 0 {
            return Err(GridError::NonPositiveDimensions {
                rows: row_count,
                columns: column_count,
            });
        }
        Ok(Self {
            row_count,
            column_count,
        })
    }

    /// The number of rows
    pub fn row_count(&self) -> i64 {
        self.row_count
    }

    /// The number of columns
    pub fn column_count(&self) -> i64 {
        self.column_count
    }

    /// The top left corner position
    pub fn top_left(&self) -> Position {
        Position::ORIGIN
    }

    /// The top right corner position
    pub fn top_right(&self) -> Position {
        Position::new(0, self.column_count - 1)
    }

    /// The bottom left corner position
    pub fn bottom_left(&self) -> Position {
        Position::new(self.row_count - 1, 0)
    }

    /// The bottom right corner position
    pub fn bottom_right(&self) -> Position {
        Position::new(self.row_count - 1, self.column_count - 1)
    }

    /// Whether a grid position is valid
    pub fn is_valid(&self, position: Position) -> bool {
        position.row >= 0
            && position.row < self.row_count
            && position.column >= 0
            && position.column < self.column_count
    }

    /// The valid cross neighbours (top, bottom, left, right) of a position
    pub fn valid_cross_neighbours(&self, center: Position) -> Vec<Position> {
        self.filter_valid(&center.cross_neighbours())
    }

    /// The valid diagonal neighbours of a position
    pub fn valid_diagonal_neighbours(&self, center: Position) -> Vec<Position> {
        self.filter_valid(&center.diagonal_neighbours())
    }

    /// The valid neighbours of a position, cross first then diagonal
    pub fn valid_neighbours(&self, center: Position) -> Vec<Position> {
        self.filter_valid(&center.neighbours())
    }

    /// All positions in a row, or empty for an out-of-bounds row index
    pub fn row_positions(&self, row_idx: i64) -> Vec<Position> {
        if row_idx < 0 || row_idx >= self.row_count {
            return Vec::new();
        }
        (0..self.column_count)
            .map(|col| Position::new(row_idx, col))
            .collect()
    }

    /// All positions in a column, or empty for an out-of-bounds column index
    pub fn column_positions(&self, col_idx: i64) -> Vec<Position> {
        if col_idx < 0 || col_idx >= self.column_count {
            return Vec::new();
        }
        (0..self.row_count)
            .map(|row| Position::new(row, col_idx))
            .collect()
    }

    /// Iterate over every valid position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.row_count)
            .flat_map(move |row| (0..self.column_count).map(move |col| Position::new(row, col)))
    }

    fn filter_valid(&self, candidates: &[Position]) -> Vec<Position> {
        candidates
            .iter()
            .copied()
            .filter(|p| self.is_valid(*p))
            .collect()
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.row_count, self.column_count)
    }
}
