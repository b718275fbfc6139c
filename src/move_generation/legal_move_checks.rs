//! Attack queries on the grid board.
//!
//! Leapers are matched through the precomputed attack tables, sliders by
//! walking the rays outward from the target square.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Figure, PieceKind};
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::figure_moves::{first_figure_on_ray, square_coords, square_index};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::rook_moves::ROOK_DIRECTIONS;

/// Whether any figure of `attacker` attacks `(x, y)`. Pawns attack
/// diagonally only, so a pawn push never counts.
pub fn square_attacked_by(board: &Board, attacker: Color, x: u8, y: u8) -> bool {
    let square = square_index(x, y);

    // A pawn of `attacker` hits `square` from the squares a defender pawn
    // standing on `square` would hit.
    let pawn = Figure::of(PieceKind::Pawn, attacker);
    if any_on(board, pawn_attacks(attacker.opposite(), square), pawn) {
        return true;
    }

    if any_on(board, knight_attacks(square), Figure::of(PieceKind::Knight, attacker)) {
        return true;
    }

    if any_on(board, king_attacks(square), Figure::of(PieceKind::King, attacker)) {
        return true;
    }

    let queen = Figure::of(PieceKind::Queen, attacker);
    let rook = Figure::of(PieceKind::Rook, attacker);
    let bishop = Figure::of(PieceKind::Bishop, attacker);

    let sliders = [(&ROOK_DIRECTIONS, rook), (&BISHOP_DIRECTIONS, bishop)];
    sliders.iter().any(|(directions, straight)| {
        directions.iter().any(|&(dx, dy)| {
            matches!(first_figure_on_ray(board, x, y, dx, dy), Some(found) if found == *straight || found == queen)
        })
    })
}

fn any_on(board: &Board, mut squares: u64, wanted: Figure) -> bool {
    while squares != 0 {
        let (x, y) = square_coords(squares.trailing_zeros() as u8);
        if board.figure(x, y) == Some(wanted) {
            return true;
        }
        squares &= squares - 1;
    }
    false
}
