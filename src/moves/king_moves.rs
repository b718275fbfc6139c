//! King steps and castling.
//!
//! Castling is generated only when the right is still held, every square
//! between king and rook is empty, and neither the king's square, the square
//! it passes nor its destination is attacked.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KINGSIDE_ROOK_FILE, KING_HOME_FILE, QUEENSIDE_ROOK_FILE};
use crate::game_state::chess_types::{CastlingSide, Figure};
use crate::moves::figure_moves::{push_targets, square_index};
use crate::moves::move_descriptions::{encode_move, Move};

pub const KING_ATTACKS: [u64; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: u8) -> u64 {
    KING_ATTACKS[square as usize]
}

pub fn push_king_moves(figure: Figure, board: &Board, x: u8, y: u8, out: &mut Vec<Move>) {
    push_targets(figure, board, x, y, king_attacks(square_index(x, y)), out);

    let owner = figure.owner();
    if x != KING_HOME_FILE || y != owner.home_rank() {
        return;
    }
    for side in [CastlingSide::Queenside, CastlingSide::Kingside] {
        if !board.castling_allowed(side, owner) {
            continue;
        }
        let (rook_file, step): (u8, i8) = match side {
            CastlingSide::Queenside => (QUEENSIDE_ROOK_FILE, -1),
            CastlingSide::Kingside => (KINGSIDE_ROOK_FILE, 1),
        };
        let between_empty = (x.min(rook_file) + 1..x.max(rook_file)).all(|f| board.figure(f, y).is_none());
        if !between_empty {
            continue;
        }
        let enemy = owner.opposite();
        let passes_safely = (0..=2).all(|d| {
            let file = (x as i8 + step * d) as u8;
            !board.threatens(enemy, file, y)
        });
        if passes_safely {
            let to_x = (x as i8 + 2 * step) as u8;
            out.push(encode_move(board, x, y, to_x, y, figure));
        }
    }
}

const fn generate_king_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        attacks |= set_if_valid(file - 1, rank - 1);
        attacks |= set_if_valid(file, rank - 1);
        attacks |= set_if_valid(file + 1, rank - 1);
        attacks |= set_if_valid(file - 1, rank);
        attacks |= set_if_valid(file + 1, rank);
        attacks |= set_if_valid(file - 1, rank + 1);
        attacks |= set_if_valid(file, rank + 1);
        attacks |= set_if_valid(file + 1, rank + 1);

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }
    1u64 << ((rank as usize) * 8 + (file as usize))
}
