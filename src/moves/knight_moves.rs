use crate::game_state::board::Board;
use crate::game_state::chess_types::Figure;
use crate::moves::figure_moves::{push_targets, square_index};
use crate::moves::move_descriptions::Move;

pub const KNIGHT_ATTACKS: [u64; 64] = generate_knight_attacks();

#[inline]
pub const fn knight_attacks(square: u8) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

pub fn push_knight_moves(figure: Figure, board: &Board, x: u8, y: u8, out: &mut Vec<Move>) {
    push_targets(figure, board, x, y, knight_attacks(square_index(x, y)), out);
}

const fn generate_knight_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        attacks |= set_if_valid(file + 1, rank + 2);
        attacks |= set_if_valid(file + 2, rank + 1);
        attacks |= set_if_valid(file + 2, rank - 1);
        attacks |= set_if_valid(file + 1, rank - 2);
        attacks |= set_if_valid(file - 1, rank - 2);
        attacks |= set_if_valid(file - 2, rank - 1);
        attacks |= set_if_valid(file - 2, rank + 1);
        attacks |= set_if_valid(file - 1, rank + 2);

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
