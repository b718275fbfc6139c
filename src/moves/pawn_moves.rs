use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Figure, PieceKind, PROMOTION_KINDS};
use crate::moves::figure_moves::{square_coords, square_index};
use crate::moves::move_descriptions::{encode_move, Move};

pub const LIGHT_PAWN_ATTACKS: [u64; 64] = generate_light_pawn_attacks();
pub const DARK_PAWN_ATTACKS: [u64; 64] = generate_dark_pawn_attacks();

#[inline]
pub const fn pawn_attacks(color: Color, square: u8) -> u64 {
    match color {
        Color::Light => LIGHT_PAWN_ATTACKS[square as usize],
        Color::Dark => DARK_PAWN_ATTACKS[square as usize],
    }
}

/// Pushes, double pushes from the pawn rank, diagonal captures and an
/// en-passant capture of the pawn that just advanced two ranks. A move onto
/// the last rank is expanded into one candidate per promotion kind.
pub fn push_pawn_moves(figure: Figure, board: &Board, x: u8, y: u8, out: &mut Vec<Move>) {
    let owner = figure.owner();
    let next_y = y as i8 + owner.forward();
    if !(0..8).contains(&next_y) {
        return;
    }
    let next_y = next_y as u8;

    if board.figure(x, next_y).is_none() {
        push_advance(figure, board, x, y, x, next_y, out);
        if y == owner.pawn_rank() {
            let double_y = (next_y as i8 + owner.forward()) as u8;
            if board.figure(x, double_y).is_none() {
                out.push(encode_move(board, x, y, x, double_y, figure));
            }
        }
    }

    let mut targets = pawn_attacks(owner, square_index(x, y));
    while targets != 0 {
        let (to_x, to_y) = square_coords(targets.trailing_zeros() as u8);
        targets &= targets - 1;
        if matches!(board.figure(to_x, to_y), Some(victim) if victim.owner() != owner) {
            push_advance(figure, board, x, y, to_x, to_y, out);
        }
    }

    if y == owner.en_passant_rank() {
        if let Some(file) = board.en_passant_file() {
            let passed = Figure::of(PieceKind::Pawn, owner.opposite());
            if file.abs_diff(x) == 1
                && board.figure(file, y) == Some(passed)
                && board.figure(file, next_y).is_none()
            {
                out.push(encode_move(board, x, y, file, next_y, figure));
            }
        }
    }
}

fn push_advance(figure: Figure, board: &Board, x: u8, y: u8, to_x: u8, to_y: u8, out: &mut Vec<Move>) {
    let owner = figure.owner();
    if to_y == owner.promotion_rank() {
        for kind in PROMOTION_KINDS {
            out.push(encode_move(board, x, y, to_x, to_y, Figure::of(kind, owner)));
        }
    } else {
        out.push(encode_move(board, x, y, to_x, to_y, figure));
    }
}

const fn generate_light_pawn_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = sq % 8;
        let rank = sq / 8;
        let mut attacks = 0u64;

        if rank < 7 {
            if file > 0 {
                attacks |= 1u64 << (sq + 7);
            }
            if file < 7 {
                attacks |= 1u64 << (sq + 9);
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn generate_dark_pawn_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = sq % 8;
        let rank = sq / 8;
        let mut attacks = 0u64;

        if rank > 0 {
            if file > 0 {
                attacks |= 1u64 << (sq - 9);
            }
            if file < 7 {
                attacks |= 1u64 << (sq - 7);
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::{figure_placed, is_double_pawn_push, is_promotion};

    #[test]
    fn light_pawn_attacks_from_e2() {
        let expected = (1u64 << 19) | (1u64 << 21);
        assert_eq!(LIGHT_PAWN_ATTACKS[12], expected);
        assert_eq!(pawn_attacks(Color::Light, square_index(4, 1)), expected);
    }

    #[test]
    fn dark_pawn_attacks_from_e7() {
        let expected = (1u64 << 43) | (1u64 << 45);
        assert_eq!(pawn_attacks(Color::Dark, square_index(4, 6)), expected);
    }

    #[test]
    fn unmoved_pawn_has_single_and_double_push() {
        let board = Board::new();
        let pawn = Figure::of(PieceKind::Pawn, Color::Light);
        let mut out = Vec::new();
        push_pawn_moves(pawn, &board, 4, 1, &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out.iter().filter(|mv| is_double_pawn_push(**mv)).count(), 1);
    }

    #[test]
    fn capture_promotion_expands_to_four_kinds() {
        let board = Board::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let pawn = Figure::of(PieceKind::Pawn, Color::Light);
        let mut out = Vec::new();
        push_pawn_moves(pawn, &board, 0, 6, &mut out);
        assert_eq!(out.len(), 8);
        assert!(out.iter().all(|mv| is_promotion(*mv)));
        assert_eq!(figure_placed(out[0]).kind(), PieceKind::Queen);
    }

    #[test]
    fn en_passant_target_from_fen_is_honoured() {
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let pawn = Figure::of(PieceKind::Pawn, Color::Light);
        let mut out = Vec::new();
        push_pawn_moves(pawn, &board, 4, 4, &mut out);
        assert_eq!(out.len(), 2);
    }
}
