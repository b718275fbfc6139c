//! Dispatch from a figure to its move generator, plus the shared helpers
//! that turn target squares into encoded candidates.
//!
//! Squares inside the attack tables are indexed `y * 8 + x` (rank-major),
//! so a table entry is a `u64` mask of reachable squares.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::on_board;
use crate::game_state::chess_types::{Figure, PieceKind};
use crate::moves::bishop_moves::push_bishop_moves;
use crate::moves::king_moves::push_king_moves;
use crate::moves::knight_moves::push_knight_moves;
use crate::moves::move_descriptions::{encode_move, Move};
use crate::moves::pawn_moves::push_pawn_moves;
use crate::moves::queen_moves::push_queen_moves;
use crate::moves::rook_moves::push_rook_moves;

/// Append the pseudo-legal candidates of `figure` standing on `(x, y)`.
pub fn generate_figure_moves(figure: Figure, board: &Board, x: u8, y: u8, out: &mut Vec<Move>) {
    match figure.kind() {
        PieceKind::Pawn => push_pawn_moves(figure, board, x, y, out),
        PieceKind::Rook => push_rook_moves(figure, board, x, y, out),
        PieceKind::Knight => push_knight_moves(figure, board, x, y, out),
        PieceKind::Bishop => push_bishop_moves(figure, board, x, y, out),
        PieceKind::Queen => push_queen_moves(figure, board, x, y, out),
        PieceKind::King => push_king_moves(figure, board, x, y, out),
    }
}

#[inline]
pub const fn square_index(x: u8, y: u8) -> u8 {
    y * 8 + x
}

#[inline]
pub const fn square_coords(square: u8) -> (u8, u8) {
    (square % 8, square / 8)
}

/// Push a move to every square of `targets` not occupied by an own figure.
pub(crate) fn push_targets(
    figure: Figure,
    board: &Board,
    x: u8,
    y: u8,
    mut targets: u64,
    out: &mut Vec<Move>,
) {
    while targets != 0 {
        let (to_x, to_y) = square_coords(targets.trailing_zeros() as u8);
        targets &= targets - 1;
        match board.figure(to_x, to_y) {
            Some(other) if other.owner() == figure.owner() => {}
            _ => out.push(encode_move(board, x, y, to_x, to_y, figure)),
        }
    }
}

/// Push the moves of a sliding figure along each direction until the edge,
/// an own figure (excluded) or an enemy figure (included).
pub(crate) fn push_slides(
    figure: Figure,
    board: &Board,
    x: u8,
    y: u8,
    directions: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(dx, dy) in directions {
        let mut to_x = x as i8 + dx;
        let mut to_y = y as i8 + dy;
        while on_board(to_x, to_y) {
            let target = board.figure(to_x as u8, to_y as u8);
            if let Some(other) = target {
                if other.owner() != figure.owner() {
                    out.push(encode_move(board, x, y, to_x as u8, to_y as u8, figure));
                }
                break;
            }
            out.push(encode_move(board, x, y, to_x as u8, to_y as u8, figure));
            to_x += dx;
            to_y += dy;
        }
    }
}

/// First figure met walking from `(x, y)` in direction `(dx, dy)`.
pub(crate) fn first_figure_on_ray(board: &Board, x: u8, y: u8, dx: i8, dy: i8) -> Option<Figure> {
    let mut to_x = x as i8 + dx;
    let mut to_y = y as i8 + dy;
    while on_board(to_x, to_y) {
        if let Some(found) = board.figure(to_x as u8, to_y as u8) {
            return Some(found);
        }
        to_x += dx;
        to_y += dy;
    }
    None
}
