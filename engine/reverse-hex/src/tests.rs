use super::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::{BTreeSet, HashSet};

fn cells(coords: &[(usize, usize)]) -> Vec<Cell> {
    coords.iter().map(|&c| Cell::from(c)).collect()
}

#[test]
fn test_play_alternates_turn() {
    let mut state = GameState::new(3);
    state.play(Cell::new(0, 0)).unwrap();
    assert_eq!(state.turn(), Color::Black);
    assert_eq!(state.color_at(Cell::new(0, 0)), CellState::White);

    state.play(Cell::new(1, 1)).unwrap();
    assert_eq!(state.turn(), Color::White);
    assert_eq!(state.color_at(Cell::new(1, 1)), CellState::Black);
    assert_eq!(state.move_count(), 2);
    assert_eq!(state.empty_cells().len(), 7);
}

#[test]
fn test_place_does_not_touch_turn() {
    let mut state = GameState::new(3);
    state.place_black(Cell::new(2, 2)).unwrap();
    state.place_white(Cell::new(0, 2)).unwrap();
    assert_eq!(state.turn(), Color::White);
    assert_eq!(state.move_count(), 0);

    state.set_turn(Color::Black);
    assert_eq!(state.turn(), Color::Black);
}

#[test]
fn test_occupied_cell_rejected() {
    let mut state = GameState::new(3);
    state.play(Cell::new(1, 1)).unwrap();

    let err = state.play(Cell::new(1, 1)).unwrap_err();
    assert_eq!(err, GameError::OccupiedCell(Cell::new(1, 1)));
    // The failed play leaves the state untouched
    assert_eq!(state.turn(), Color::Black);
    assert_eq!(state.move_count(), 1);
    assert_eq!(state.color_at(Cell::new(1, 1)), CellState::White);

    assert!(state.place_black(Cell::new(1, 1)).is_err());
}

#[test]
fn test_out_of_bounds_rejected() {
    let mut state = GameState::new(3);
    assert!(matches!(
        state.play(Cell::new(0, 3)),
        Err(GameError::OutOfBounds { .. })
    ));
    assert_eq!(state.empty_cells().len(), 9);
}

#[test]
fn test_white_chain_means_black_wins() {
    let mut state = GameState::new(3);
    for cell in cells(&[(0, 0), (1, 0)]) {
        state.place_white(cell).unwrap();
    }
    assert_eq!(state.winner(), None);

    state.place_white(Cell::new(2, 0)).unwrap();
    assert_eq!(state.winner(), Some(Color::Black));
}

#[test]
fn test_black_chain_means_white_wins() {
    let mut state = GameState::new(3);
    for cell in cells(&[(0, 0), (0, 1), (0, 2)]) {
        state.place_black(cell).unwrap();
    }
    assert_eq!(state.winner(), Some(Color::White));
    assert!(state.connected(
        Color::Black,
        Point::Edge(Edge::A),
        Point::Cell(Cell::new(0, 2))
    ));
}

#[test]
fn test_chain_through_hex_diagonal() {
    // (0, 2) -> (1, 1) -> (2, 0) are adjacent via the (1, -1) offset
    let mut state = GameState::new(3);
    for cell in cells(&[(0, 2), (1, 1), (2, 0)]) {
        state.place_white(cell).unwrap();
    }
    assert_eq!(state.winner(), Some(Color::Black));

    // (0, 0) -> (1, 1) is not a hex adjacency
    let mut state = GameState::new(3);
    for cell in cells(&[(0, 0), (1, 1), (2, 2)]) {
        state.place_white(cell).unwrap();
    }
    assert_eq!(state.winner(), None);
}

#[test]
fn test_would_lose() {
    let mut state = GameState::new(3);
    state.place_white(Cell::new(0, 1)).unwrap();
    state.place_white(Cell::new(1, 1)).unwrap();

    assert!(state.would_lose(Cell::new(2, 1), Color::White));
    assert!(state.would_lose(Cell::new(2, 0), Color::White));
    assert!(!state.would_lose(Cell::new(2, 1), Color::Black));
    assert!(!state.would_lose(Cell::new(1, 2), Color::White));
    // Checking never plays the stone
    assert_eq!(state.winner(), None);
}

#[test]
fn test_moves_row_major() {
    let mut state = GameState::new(2);
    state.play(Cell::new(1, 0)).unwrap();
    assert_eq!(state.moves(), cells(&[(0, 0), (0, 1), (1, 1)]));
}

#[test]
fn test_random_game_keeps_empty_set_exact() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);

    for _ in 0..20 {
        let mut state = GameState::new(5);
        while state.winner().is_none() {
            let moves = state.moves();
            let expected: HashSet<Cell> = moves.iter().copied().collect();
            assert_eq!(&expected, state.empty_cells());

            let cell = *moves.choose(&mut rng).expect("full board always has a winner");
            state.play(cell).unwrap();
        }
        assert!(state.move_count() <= 25);
    }
}

#[test]
fn test_reachable_respects_stopset_and_colors() {
    let mut state = GameState::new(3);
    state.place_black(Cell::new(1, 0)).unwrap();

    let colors = [CellState::White, CellState::Empty];
    let stop: HashSet<Cell> = [Cell::new(0, 1)].into_iter().collect();
    let reached = state.reachable(Color::White, &colors, &stop, Point::Edge(Edge::A));

    // The column x == 0 is entered from the edge; (0, 1) is reached but not expanded
    assert!(reached.contains(&Cell::new(0, 0)));
    assert!(reached.contains(&Cell::new(0, 1)));
    // Black stones are impassable
    assert!(!reached.contains(&Cell::new(1, 0)));
    // Reached through (0, 2) -> (1, 1)
    assert!(reached.contains(&Cell::new(1, 1)));
}

#[test]
fn test_blank_diagonals() {
    let mut state = GameState::new(3);
    assert!(state.blank_long_diagonal());
    assert!(state.blank_short_diagonal());

    state.play(Cell::new(0, 2)).unwrap();
    assert!(state.blank_long_diagonal());
    assert!(!state.blank_short_diagonal());

    state.play(Cell::new(2, 2)).unwrap();
    assert!(!state.blank_long_diagonal());
}

#[test]
fn test_corner_pocket_is_dead_for_white() {
    let mut state = GameState::new(5);
    state.place_white(Cell::new(1, 0)).unwrap();
    state.place_white(Cell::new(0, 1)).unwrap();

    let dead = find_dead_cells(&state);
    assert_eq!(dead, BTreeSet::from([Cell::new(0, 0)]));
}

#[test]
fn test_corner_pocket_is_dead_for_black() {
    let mut state = GameState::new(5);
    state.place_black(Cell::new(1, 0)).unwrap();
    state.place_black(Cell::new(0, 1)).unwrap();

    let dead = find_dead_cells(&state);
    assert_eq!(dead, BTreeSet::from([Cell::new(0, 0)]));
}

#[test]
fn test_open_pocket_is_not_dead() {
    // (0, 0) touches White's first edge directly, so it is not sealed off
    let mut state = GameState::new(5);
    state.place_white(Cell::new(1, 0)).unwrap();
    state.place_white(Cell::new(1, 1)).unwrap();

    assert!(find_dead_cells(&state).is_empty());
}

#[test]
fn test_singleton_groups_are_skipped() {
    let mut state = GameState::new(4);
    state.place_white(Cell::new(1, 1)).unwrap();
    state.place_black(Cell::new(2, 2)).unwrap();

    assert!(find_dead_cells(&state).is_empty());
}

#[test]
fn test_group_dead_cells_matches_full_pass() {
    let mut state = GameState::new(5);
    let group = cells(&[(1, 0), (0, 1)]);
    for &cell in &group {
        state.place_white(cell).unwrap();
    }

    let dead = group_dead_cells(&state, Color::White, &group);
    assert_eq!(dead, HashSet::from([Cell::new(0, 0)]));
}
