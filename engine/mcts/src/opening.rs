//! Opening book consulted before searching.
//!
//! Two kinds of knowledge live here: fixed answers for the smallest boards,
//! where a pairing strategy is known for one side, and a symmetry rule for
//! odd boards that copies the opponent's move across a diagonal while the
//! position stays symmetric. Every suggestion is an empty on-board cell.

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use reverse_hex::{Cell, Color, GameState};

/// Pairing strategy for one small board size.
#[derive(Debug, Clone, Copy)]
pub struct SmallBoardTable {
    pub size: usize,
    /// Side the table plays for.
    pub mover: Color,
    /// Reply to play after the opponent takes the first cell of a pair.
    pub replies: &'static [(Cell, Cell)],
    /// Opening cells, in order of preference.
    pub first: &'static [Cell],
    /// The one cell that has no partner.
    pub single: Cell,
}

const fn c(x: usize, y: usize) -> Cell {
    Cell::new(x, y)
}

const SIZE2: SmallBoardTable = SmallBoardTable {
    size: 2,
    mover: Color::White,
    replies: &[(c(0, 1), c(1, 1)), (c(1, 1), c(0, 1))],
    first: &[c(0, 0)],
    single: c(1, 0),
};

const SIZE3: SmallBoardTable = SmallBoardTable {
    size: 3,
    mover: Color::Black,
    replies: &[
        (c(0, 1), c(0, 2)),
        (c(0, 2), c(0, 1)),
        (c(2, 0), c(2, 1)),
        (c(2, 1), c(2, 0)),
    ],
    first: &[c(0, 0), c(1, 0), c(1, 2), c(2, 2)],
    single: c(1, 1),
};

const SIZE4: SmallBoardTable = SmallBoardTable {
    size: 4,
    mover: Color::White,
    replies: &[
        (c(2, 0), c(3, 0)),
        (c(3, 0), c(2, 0)),
        (c(2, 2), c(3, 1)),
        (c(3, 1), c(2, 2)),
        (c(1, 2), c(3, 2)),
        (c(3, 2), c(1, 2)),
        (c(0, 3), c(1, 3)),
        (c(1, 3), c(0, 3)),
        (c(2, 3), c(3, 3)),
        (c(3, 3), c(2, 3)),
    ],
    first: &[c(0, 0), c(1, 0), c(0, 1), c(0, 2), c(1, 1)],
    single: c(2, 1),
};

const SIZE5: SmallBoardTable = SmallBoardTable {
    size: 5,
    mover: Color::Black,
    replies: &[
        (c(0, 1), c(0, 2)),
        (c(0, 2), c(0, 1)),
        (c(0, 3), c(0, 4)),
        (c(0, 4), c(0, 3)),
        (c(1, 1), c(1, 3)),
        (c(1, 3), c(1, 1)),
        (c(1, 2), c(2, 1)),
        (c(2, 1), c(1, 2)),
        (c(3, 1), c(3, 3)),
        (c(3, 3), c(3, 1)),
        (c(2, 3), c(3, 2)),
        (c(3, 2), c(2, 3)),
        (c(4, 0), c(4, 1)),
        (c(4, 1), c(4, 0)),
        (c(4, 2), c(4, 3)),
        (c(4, 3), c(4, 2)),
    ],
    first: &[
        c(0, 0),
        c(1, 0),
        c(2, 0),
        c(3, 0),
        c(1, 4),
        c(2, 4),
        c(3, 4),
        c(4, 4),
    ],
    single: c(2, 2),
};

/// Built-in tables for boards of size 2 through 5.
pub const SMALL_BOARD_TABLES: [SmallBoardTable; 4] = [SIZE2, SIZE3, SIZE4, SIZE5];

impl SmallBoardTable {
    fn reply(&self, cell: Cell) -> Option<Cell> {
        self.replies
            .iter()
            .find(|(from, _)| *from == cell)
            .map(|(_, to)| *to)
    }

    /// Answer for the side this table plays for.
    fn suggest(&self, state: &GameState, last_move: Option<Cell>) -> Option<Cell> {
        let reply = last_move.and_then(|last| self.reply(last));
        if let Some(reply) = reply {
            if state.is_empty(reply) {
                return Some(reply);
            }
        }

        // Pairing broken, or the opponent took the unpaired cell: start a
        // fresh pair.
        if reply.is_some() || last_move == Some(self.single) {
            let fresh = self
                .replies
                .iter()
                .find(|(a, b)| state.is_empty(*a) && state.is_empty(*b));
            if let Some((cell, _)) = fresh {
                return Some(*cell);
            }
        }

        self.first.iter().copied().find(|&cell| state.is_empty(cell))
    }
}

/// Opening book with small-board tables and diagonal symmetry.
#[derive(Debug, Clone)]
pub struct OpeningBook {
    tables: Vec<SmallBoardTable>,
    /// Cleared once the long diagonal strategy takes over.
    short_symmetric: bool,
}

impl Default for OpeningBook {
    fn default() -> Self {
        Self::with_tables(SMALL_BOARD_TABLES.to_vec())
    }
}

impl OpeningBook {
    pub fn with_tables(tables: Vec<SmallBoardTable>) -> Self {
        Self {
            tables,
            short_symmetric: true,
        }
    }

    /// Forget state carried between moves of one game.
    pub fn reset(&mut self) {
        self.short_symmetric = true;
    }

    /// A move for the side to move in `state`, or None to fall back to
    /// search. `last_move` is the opponent's previous move, if known.
    pub fn suggest(
        &mut self,
        state: &GameState,
        last_move: Option<Cell>,
        rng: &mut ChaCha20Rng,
    ) -> Option<Cell> {
        let size = state.size();
        let last_move = last_move.filter(|&cell| state.contains(cell));

        if let Some(table) = self.tables.iter().find(|t| t.size == size) {
            if table.mover == state.turn() {
                return table.suggest(state, last_move);
            }
        }

        let suggestion = self.symmetric_move(state, last_move, rng);
        suggestion.filter(|&cell| state.contains(cell) && state.is_empty(cell))
    }

    fn symmetric_move(
        &mut self,
        state: &GameState,
        last_move: Option<Cell>,
        rng: &mut ChaCha20Rng,
    ) -> Option<Cell> {
        let size = state.size();
        if size == 0 {
            return None;
        }
        let moves = state.move_count();
        let corners = [c(0, 0), c(size - 1, size - 1)];

        if moves == 0 && size % 2 == 0 {
            return Some(corners[rng.gen_range(0..2)]);
        }
        if size % 2 == 0 || moves % 2 == 0 {
            return None;
        }

        let last = last_move?;
        if moves == 1 {
            let center = (size - 1) / 2;
            return if last.x != last.y {
                Some(last.mirror_long())
            } else if last.x == center {
                Some(corners[rng.gen_range(0..2)])
            } else {
                Some(last.mirror_short(size))
            };
        }

        if state.blank_long_diagonal() {
            self.short_symmetric = false;
            Some(last.mirror_long())
        } else if state.blank_short_diagonal() && self.short_symmetric {
            Some(last.mirror_short(size))
        } else {
            None
        }
    }
}
