//! Reverse hex game state.
//!
//! The board is a `size x size` rhombus. White tries to avoid joining the
//! first and last columns, Black the first and last rows: a color whose
//! stones connect its own two edges loses, so the *other* color is the
//! winner.
//!
//! Connectivity is tracked incrementally with one union-find per color, so
//! `winner()` is a pair of root lookups rather than a board search.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use thiserror::Error;

use crate::cell::{Cell, CellState, Color, Edge, Point};
use crate::unionfind::UnionFind;

/// Hex adjacency as (dx, dy) offsets.
pub const NEIGHBOR_PATTERNS: [(isize, isize); 6] =
    [(-1, 0), (0, -1), (-1, 1), (0, 1), (1, 0), (1, -1)];

/// Errors raised by game state mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell {0} is already occupied")]
    OccupiedCell(Cell),

    #[error("Invalid turn: {0}")]
    InvalidTurn(String),

    #[error("Cell {cell} is outside a {size}x{size} board")]
    OutOfBounds { cell: Cell, size: usize },
}

/// Complete state of a reverse hex game.
#[derive(Debug, Clone)]
pub struct GameState {
    size: usize,
    /// Cell contents, row-major (`y * size + x`)
    board: Vec<CellState>,
    turn: Color,
    move_count: usize,
    /// Exactly the cells whose state is `Empty`
    empty: HashSet<Cell>,
    white_groups: UnionFind<Point>,
    black_groups: UnionFind<Point>,
}

impl GameState {
    /// Create an empty board with White to move.
    pub fn new(size: usize) -> Self {
        let edges = [Point::Edge(Edge::A), Point::Edge(Edge::B)];
        let empty = (0..size)
            .flat_map(|x| (0..size).map(move |y| Cell::new(x, y)))
            .collect();

        Self {
            size,
            board: vec![CellState::Empty; size * size],
            turn: Color::White,
            move_count: 0,
            empty,
            white_groups: UnionFind::with_ignored(edges),
            black_groups: UnionFind::with_ignored(edges),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Set the player to move. Callers placing setup stones with
    /// `place_white`/`place_black` are responsible for keeping this consistent.
    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    /// Number of `play` calls made on this state.
    #[inline]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Checked constructor for a coordinate on this board.
    pub fn cell(&self, x: usize, y: usize) -> Result<Cell, GameError> {
        let cell = Cell::new(x, y);
        if self.contains(cell) {
            Ok(cell)
        } else {
            Err(GameError::OutOfBounds {
                cell,
                size: self.size,
            })
        }
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.size && cell.y < self.size
    }

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        debug_assert!(
            self.contains(cell),
            "cell {} is off a {}x{} board",
            cell,
            self.size,
            self.size
        );
        cell.y * self.size + cell.x
    }

    /// Occupant of an on-board cell. Use [`GameState::get`] for cells that
    /// may lie off the board.
    #[inline]
    pub fn color_at(&self, cell: Cell) -> CellState {
        self.board[self.index(cell)]
    }

    /// Occupant of `cell`, or `None` when it is off the board.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<CellState> {
        if self.contains(cell) {
            Some(self.board[self.index(cell)])
        } else {
            None
        }
    }

    #[inline]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.empty.contains(&cell)
    }

    pub fn empty_cells(&self) -> &HashSet<Cell> {
        &self.empty
    }

    /// Play a stone of the side to move, then pass the turn.
    pub fn play(&mut self, cell: Cell) -> Result<(), GameError> {
        self.place(cell, self.turn)?;
        self.turn = self.turn.opponent();
        self.move_count += 1;
        Ok(())
    }

    /// Place a white stone regardless of whose turn it is.
    pub fn place_white(&mut self, cell: Cell) -> Result<(), GameError> {
        self.place(cell, Color::White)
    }

    /// Place a black stone regardless of whose turn it is.
    pub fn place_black(&mut self, cell: Cell) -> Result<(), GameError> {
        self.place(cell, Color::Black)
    }

    fn place(&mut self, cell: Cell, color: Color) -> Result<(), GameError> {
        if !self.contains(cell) {
            return Err(GameError::OutOfBounds {
                cell,
                size: self.size,
            });
        }
        if !self.empty.remove(&cell) {
            return Err(GameError::OccupiedCell(cell));
        }
        let idx = self.index(cell);
        self.board[idx] = color.into();

        let touches_a = self.touches_edge(cell, color, Edge::A);
        let touches_b = self.touches_edge(cell, color, Edge::B);
        let friendly: Vec<Cell> = self
            .neighbors(Point::Cell(cell), None)
            .into_iter()
            .filter(|&n| self.color_at(n) == CellState::from(color))
            .collect();

        let groups = self.groups_mut(color);
        // Materialize the stone even when it has no friendly contact
        groups.find(Point::Cell(cell));
        if touches_a {
            groups.join(Point::Edge(Edge::A), Point::Cell(cell));
        }
        if touches_b {
            groups.join(Point::Edge(Edge::B), Point::Cell(cell));
        }
        for n in friendly {
            groups.join(Point::Cell(n), Point::Cell(cell));
        }

        Ok(())
    }

    /// Whether `cell` lies on the given edge of `color`.
    #[inline]
    pub fn touches_edge(&self, cell: Cell, color: Color, edge: Edge) -> bool {
        let coord = match color {
            Color::White => cell.x,
            Color::Black => cell.y,
        };
        match edge {
            Edge::A => coord == 0,
            Edge::B => coord + 1 == self.size,
        }
    }

    /// Connectivity structure for one color.
    pub fn groups(&self, color: Color) -> &UnionFind<Point> {
        match color {
            Color::White => &self.white_groups,
            Color::Black => &self.black_groups,
        }
    }

    fn groups_mut(&mut self, color: Color) -> &mut UnionFind<Point> {
        match color {
            Color::White => &mut self.white_groups,
            Color::Black => &mut self.black_groups,
        }
    }

    pub fn white_groups(&self) -> &UnionFind<Point> {
        &self.white_groups
    }

    pub fn black_groups(&self) -> &UnionFind<Point> {
        &self.black_groups
    }

    /// Whether `a` and `b` are joined by stones of `color`.
    pub fn connected(&self, color: Color, a: Point, b: Point) -> bool {
        self.groups(color).connected(a, b)
    }

    /// The winner, if any. A color connecting its own edges loses.
    pub fn winner(&self) -> Option<Color> {
        let (a, b) = (Point::Edge(Edge::A), Point::Edge(Edge::B));
        if self.white_groups.connected(a, b) {
            Some(Color::Black)
        } else if self.black_groups.connected(a, b) {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Whether `color` playing at `cell` would join its two edges, losing
    /// the game on the spot.
    pub fn would_lose(&self, cell: Cell, color: Color) -> bool {
        let groups = self.groups(color);
        let own = CellState::from(color);
        let mut connect_a = self.touches_edge(cell, color, Edge::A);
        let mut connect_b = self.touches_edge(cell, color, Edge::B);

        for n in self.neighbors(Point::Cell(cell), None) {
            if self.color_at(n) != own {
                continue;
            }
            if groups.connected(Point::Cell(n), Point::Edge(Edge::A)) {
                connect_a = true;
            } else if groups.connected(Point::Cell(n), Point::Edge(Edge::B)) {
                connect_b = true;
            }
        }

        connect_a && connect_b
    }

    /// All empty cells in row-major order. The returned list is owned by the
    /// caller.
    pub fn moves(&self) -> Vec<Cell> {
        let mut moves = Vec::with_capacity(self.empty.len());
        for y in 0..self.size {
            for x in 0..self.size {
                let cell = Cell::new(x, y);
                if self.color_at(cell) == CellState::Empty {
                    moves.push(cell);
                }
            }
        }
        moves
    }

    /// Cells adjacent to `point`.
    ///
    /// For a board cell these are its (up to six) hex neighbors. An edge is
    /// adjacent to the whole row or column forming it, which depends on the
    /// `color` whose edge is meant; an edge with no color has no neighbors.
    pub fn neighbors(&self, point: Point, color: Option<Color>) -> Vec<Cell> {
        let size = self.size;
        match point {
            Point::Edge(edge) => {
                let line = match edge {
                    Edge::A => 0,
                    Edge::B => size.saturating_sub(1),
                };
                match color {
                    Some(Color::White) => (0..size).map(|i| Cell::new(line, i)).collect(),
                    Some(Color::Black) => (0..size).map(|i| Cell::new(i, line)).collect(),
                    None => Vec::new(),
                }
            }
            Point::Cell(cell) => NEIGHBOR_PATTERNS
                .iter()
                .filter_map(|&(dx, dy)| {
                    let x = cell.x.checked_add_signed(dx)?;
                    let y = cell.y.checked_add_signed(dy)?;
                    (x < size && y < size).then(|| Cell::new(x, y))
                })
                .collect(),
        }
    }

    /// Breadth-first flood fill from `start` through cells whose state is in
    /// `colors`. Cells in `stopset` are reached but not expanded.
    ///
    /// `orientation` picks which color's edge an edge `start` refers to.
    /// Returns the board cells reached (an edge start is not included).
    pub fn reachable(
        &self,
        orientation: Color,
        colors: &[CellState],
        stopset: &HashSet<Cell>,
        start: Point,
    ) -> HashSet<Cell> {
        let mut seen: HashSet<Point> = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(point) = queue.pop_front() {
            if let Point::Cell(cell) = point {
                if stopset.contains(&cell) {
                    continue;
                }
            }
            for nb in self.neighbors(point, Some(orientation)) {
                if colors.contains(&self.color_at(nb)) && seen.insert(Point::Cell(nb)) {
                    queue.push_back(Point::Cell(nb));
                }
            }
        }

        seen.into_iter().filter_map(|p| p.as_cell()).collect()
    }

    /// True iff every cell on the long diagonal (x == y) is empty.
    pub fn blank_long_diagonal(&self) -> bool {
        (0..self.size).all(|i| self.is_empty(Cell::new(i, i)))
    }

    /// True iff every cell on the short diagonal (x + y == size - 1) is empty.
    pub fn blank_short_diagonal(&self) -> bool {
        (0..self.size).all(|i| self.is_empty(Cell::new(i, self.size - 1 - i)))
    }
}

const DISP_WHITE: char = 'O';
const DISP_BLACK: char = '@';
const DISP_EMPTY: char = '.';

/// Draws the rhombus with column letters on top and row numbers down the
/// side. White's edges are marked on the right, Black's along the bottom.
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coord_width = self.size.to_string().len();

        write!(f, "  ")?;
        for x in 0..self.size {
            write!(f, "{}  ", (b'A' + (x % 26) as u8) as char)?;
        }
        writeln!(f)?;

        for y in 0..self.size {
            let label = (y + 1).to_string();
            write!(f, "{}{}", label, " ".repeat(2 + coord_width - label.len()))?;
            for x in 0..self.size {
                let symbol = match self.color_at(Cell::new(x, y)) {
                    CellState::White => DISP_WHITE,
                    CellState::Black => DISP_BLACK,
                    CellState::Empty => DISP_EMPTY,
                };
                write!(f, "{}  ", symbol)?;
            }
            writeln!(f, "{}", DISP_WHITE)?;
            write!(f, "{}", " ".repeat(y + 1))?;
        }

        write!(f, "   ")?;
        for _ in 0..self.size {
            write!(f, "{}  ", DISP_BLACK)?;
        }
        Ok(())
    }
}
