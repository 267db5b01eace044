//! Dead cell analysis.
//!
//! A group of two or more stones seals off its empty frontier. Any empty
//! cell that cannot be reached from either of the group color's edges
//! without passing through that frontier lies in a pocket whose contents
//! can never change who connects what, so it can be filled without search.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::cell::{Cell, CellState, Color, Edge, Point};
use crate::state::GameState;

/// Colors whose groups are analysed, in analysis order.
const ANALYSED_COLORS: [Color; 2] = [Color::Black, Color::White];

/// Dead cells induced by every multi-stone group of both colors.
pub fn find_dead_cells(state: &GameState) -> BTreeSet<Cell> {
    let mut dead = BTreeSet::new();

    for color in ANALYSED_COLORS {
        for members in state.groups(color).groups().values() {
            let group: Vec<Cell> = members.iter().filter_map(Point::as_cell).collect();
            if group.len() < 2 {
                continue;
            }
            dead.extend(group_dead_cells(state, color, &group));
        }
    }

    debug!(dead = dead.len(), moves = state.move_count(), "dead cell analysis");
    dead
}

/// Dead cells sealed off by a single group of `color`.
pub fn group_dead_cells(state: &GameState, color: Color, group: &[Cell]) -> HashSet<Cell> {
    let frontier = empty_frontier(state, group);

    // An edge the group already touches needs no reachability check
    let check_a = !group
        .iter()
        .any(|&cell| state.touches_edge(cell, color, Edge::A));
    let check_b = !group
        .iter()
        .any(|&cell| state.touches_edge(cell, color, Edge::B));

    edge_unreachable(state, color, &frontier, check_a, check_b)
}

/// Empty cells adjacent to any stone of `group`.
fn empty_frontier(state: &GameState, group: &[Cell]) -> HashSet<Cell> {
    group
        .iter()
        .flat_map(|&cell| state.neighbors(Point::Cell(cell), None))
        .filter(|&n| state.color_at(n) == CellState::Empty)
        .collect()
}

/// Empty cells reachable from neither checked edge of `color`, travelling
/// through empty or `color` cells and never past `stopset`.
pub fn edge_unreachable(
    state: &GameState,
    color: Color,
    stopset: &HashSet<Cell>,
    check_a: bool,
    check_b: bool,
) -> HashSet<Cell> {
    let colors = [CellState::from(color), CellState::Empty];
    let mut reachable = HashSet::new();
    if check_a {
        reachable.extend(state.reachable(color, &colors, stopset, Point::Edge(Edge::A)));
    }
    if check_b {
        reachable.extend(state.reachable(color, &colors, stopset, Point::Edge(Edge::B)));
    }

    state
        .empty_cells()
        .iter()
        .filter(|cell| !reachable.contains(*cell))
        .copied()
        .collect()
}
