//! Board coordinates, colors and the virtual edge points used for
//! connectivity tracking.

use std::fmt;
use std::str::FromStr;

use crate::state::GameError;

/// A board coordinate. `x` is the column, `y` the row, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Reflection across the long (acute corner to acute corner) diagonal.
    pub fn mirror_long(self) -> Self {
        Self::new(self.y, self.x)
    }

    /// Reflection across the short diagonal of a board with the given size.
    pub fn mirror_short(self, size: usize) -> Self {
        Self::new(size - 1 - self.x, size - 1 - self.y)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

/// Algebraic form: column letters followed by a one-based row number (`c4`).
///
/// Columns past `z` continue as `aa`, `ab`, ... so every cell prints uniquely.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = self.x + 1;
        while n > 0 {
            n -= 1;
            letters.push((b'a' + (n % 26) as u8) as char);
            n /= 26;
        }
        let column: String = letters.iter().rev().collect();
        write!(f, "{}{}", column, self.y + 1)
    }
}

/// One of the two virtual edges a color tries (not) to connect.
///
/// White's edges are the first and last columns, Black's the first and last
/// rows. `A` is the edge at coordinate 0 and `B` the edge at `size - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edge {
    A,
    B,
}

/// An element of the connectivity structures: a board cell or an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Point {
    Cell(Cell),
    Edge(Edge),
}

impl Point {
    pub fn as_cell(&self) -> Option<Cell> {
        match self {
            Point::Cell(cell) => Some(*cell),
            Point::Edge(_) => None,
        }
    }
}

impl From<Cell> for Point {
    fn from(cell: Cell) -> Self {
        Point::Cell(cell)
    }
}

impl From<Edge> for Point {
    fn from(edge: Edge) -> Self {
        Point::Edge(edge)
    }
}

/// A player. White moves first on a fresh board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Numeric player id: 1 = White, 2 = Black (0 is reserved for "none").
    pub fn player_id(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 2,
        }
    }

    pub fn from_player_id(id: u8) -> Result<Self, GameError> {
        match id {
            1 => Ok(Color::White),
            2 => Ok(Color::Black),
            other => Err(GameError::InvalidTurn(other.to_string())),
        }
    }
}

impl FromStr for Color {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Color::White),
            "black" | "b" => Ok(Color::Black),
            _ => Err(GameError::InvalidTurn(s.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    White,
    Black,
}

impl CellState {
    pub fn color(self) -> Option<Color> {
        match self {
            CellState::Empty => None,
            CellState::White => Some(Color::White),
            CellState::Black => Some(Color::Black),
        }
    }
}

impl From<Color> for CellState {
    fn from(color: Color) -> Self {
        match color {
            Color::White => CellState::White,
            Color::Black => CellState::Black,
        }
    }
}
