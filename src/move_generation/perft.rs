//! Perft: exhaustive legal-move tree counting over `execute_move`/`undo`.
//!
//! Exercises candidate generation, self-check rejection, the redo cache and
//! the undo path together, so the counts double as a regression check of the
//! whole board state machine.

use crate::game_state::board::Board;
use crate::moves::move_descriptions::{
    is_capture, is_castling, is_en_passant, is_promotion, Move,
};
use crate::game_state::chess_types::GameStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count the leaves `depth` plies below the current position. The board is
/// restored before returning.
pub fn perft(board: &mut Board, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }
    let mut total = PerftCounts::default();
    perft_recurse(board, depth, &mut total);
    total
}

/// Per-root-move node counts, in candidate order.
pub fn perft_divide(board: &mut Board, depth: u8) -> Vec<(Move, usize)> {
    let mut out = Vec::new();
    if depth == 0 {
        return out;
    }
    let count = board.candidate_moves().len();
    for i in 0..count {
        let mv = board.candidate_moves()[i];
        if !board.execute_move(mv) {
            continue;
        }
        out.push((mv, perft(board, depth - 1).nodes));
        board.undo();
    }
    out
}

fn perft_recurse(board: &mut Board, depth: u8, counts: &mut PerftCounts) {
    let count = board.candidate_moves().len();
    for i in 0..count {
        let mv = board.candidate_moves()[i];
        if !board.execute_move(mv) {
            continue;
        }
        if depth == 1 {
            counts.merge(leaf_counts(board, mv));
        } else {
            perft_recurse(board, depth - 1, counts);
        }
        board.undo();
    }
}

fn leaf_counts(board: &mut Board, mv: Move) -> PerftCounts {
    let checks = board.check(board.player());
    PerftCounts {
        nodes: 1,
        captures: usize::from(is_capture(mv)),
        en_passant: usize::from(is_en_passant(mv)),
        castles: usize::from(is_castling(mv)),
        promotions: usize::from(is_promotion(mv)),
        checks: usize::from(checks),
        checkmates: usize::from(checks && board.status() == GameStatus::Checkmate),
    }
}
