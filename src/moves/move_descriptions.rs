//! Fixed-width move codec.
//!
//! A ply is packed into the low 29 bits of a `u32`:
//!
//! | bits  | field                                            |
//! |-------|--------------------------------------------------|
//! | 0-2   | origin file `x`                                  |
//! | 3-5   | origin rank `y`                                  |
//! | 6-8   | destination file `X`                             |
//! | 9-11  | destination rank `Y`                             |
//! | 12-15 | moved figure code                                |
//! | 16-19 | captured figure code, `0` for none               |
//! | 20-23 | placed figure code (differs only on promotion)   |
//! | 24-27 | castling rights toggled by this move             |
//! | 28    | draw claim                                       |
//!
//! Castling is a king moving two files; en passant is a pawn moving
//! diagonally onto an empty square. `0` never encodes a ply.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KINGSIDE_ROOK_FILE, QUEENSIDE_ROOK_FILE};
use crate::game_state::chess_types::*;

/// Packed ply, see the module documentation for the layout.
pub type Move = u32;

/// "No move": empty selection, nothing to undo, or no legal reply.
pub const NO_MOVE: Move = 0;

/// Claim a draw in the current position without moving a piece.
pub const MOVELESS_DRAW_CLAIM: Move = 0x1FFF_FFFF;

const ORIGIN_X_SHIFT: u32 = 0;
const ORIGIN_Y_SHIFT: u32 = 3;
const DESTINATION_X_SHIFT: u32 = 6;
const DESTINATION_Y_SHIFT: u32 = 9;
const MOVED_FIGURE_SHIFT: u32 = 12;
const CAPTURED_FIGURE_SHIFT: u32 = 16;
const PLACED_FIGURE_SHIFT: u32 = 20;
const CASTLING_CHANGES_SHIFT: u32 = 24;

const COORDINATE_MASK: u32 = 0x7;
const FIGURE_MASK: u32 = 0xF;

pub const FLAG_DRAW_CLAIM: Move = 1 << 28;

/// Pack a ply read off `board`.
///
/// The castling mask lists every right that is still set and that this move
/// forfeits: any king move, a rook leaving its home corner, or a rook being
/// captured on its home corner (so a rook that never moved cannot be replaced
/// by the other rook for a later castling).
pub fn encode_move(board: &Board, x: u8, y: u8, to_x: u8, to_y: u8, placed: Figure) -> Move {
    let Some(moved) = board.figure(x, y) else {
        return NO_MOVE;
    };
    let captured = board.figure(to_x, to_y);
    let player = moved.owner();

    let mut changes: CastlingRights = 0;
    if moved.is_king() {
        for side in [CastlingSide::Queenside, CastlingSide::Kingside] {
            if board.castling_allowed(side, player) {
                changes |= castling_bit(side, player);
            }
        }
    } else if moved.is_rook() && y == player.home_rank() {
        if let Some(side) = rook_corner_side(x) {
            if board.castling_allowed(side, player) {
                changes |= castling_bit(side, player);
            }
        }
    }
    if let Some(victim) = captured {
        let opponent = victim.owner();
        if victim.is_rook() && to_y == opponent.home_rank() {
            if let Some(side) = rook_corner_side(to_x) {
                if board.castling_allowed(side, opponent) {
                    changes |= castling_bit(side, opponent);
                }
            }
        }
    }

    pack_move(x, y, to_x, to_y, moved, captured, placed, changes)
}

#[inline]
fn rook_corner_side(x: u8) -> Option<CastlingSide> {
    match x {
        QUEENSIDE_ROOK_FILE => Some(CastlingSide::Queenside),
        KINGSIDE_ROOK_FILE => Some(CastlingSide::Kingside),
        _ => None,
    }
}

#[allow(clippy::too_many_arguments)]
#[inline]
pub fn pack_move(
    x: u8,
    y: u8,
    to_x: u8,
    to_y: u8,
    moved: Figure,
    captured: Option<Figure>,
    placed: Figure,
    castling_changes: CastlingRights,
) -> Move {
    let mut out = 0u32;
    out |= (x as u32 & COORDINATE_MASK) << ORIGIN_X_SHIFT;
    out |= (y as u32 & COORDINATE_MASK) << ORIGIN_Y_SHIFT;
    out |= (to_x as u32 & COORDINATE_MASK) << DESTINATION_X_SHIFT;
    out |= (to_y as u32 & COORDINATE_MASK) << DESTINATION_Y_SHIFT;
    out |= moved.code() << MOVED_FIGURE_SHIFT;
    out |= captured.map(Figure::code).unwrap_or(0) << CAPTURED_FIGURE_SHIFT;
    out |= placed.code() << PLACED_FIGURE_SHIFT;
    out |= (castling_changes as u32 & FIGURE_MASK) << CASTLING_CHANGES_SHIFT;
    out
}

#[inline]
pub fn origin_x(mv: Move) -> u8 {
    ((mv >> ORIGIN_X_SHIFT) & COORDINATE_MASK) as u8
}

#[inline]
pub fn origin_y(mv: Move) -> u8 {
    ((mv >> ORIGIN_Y_SHIFT) & COORDINATE_MASK) as u8
}

#[inline]
pub fn destination_x(mv: Move) -> u8 {
    ((mv >> DESTINATION_X_SHIFT) & COORDINATE_MASK) as u8
}

#[inline]
pub fn destination_y(mv: Move) -> u8 {
    ((mv >> DESTINATION_Y_SHIFT) & COORDINATE_MASK) as u8
}

#[inline]
pub fn moved_figure_code(mv: Move) -> u32 {
    (mv >> MOVED_FIGURE_SHIFT) & FIGURE_MASK
}

#[inline]
pub fn captured_figure_code(mv: Move) -> u32 {
    (mv >> CAPTURED_FIGURE_SHIFT) & FIGURE_MASK
}

#[inline]
pub fn placed_figure_code(mv: Move) -> u32 {
    (mv >> PLACED_FIGURE_SHIFT) & FIGURE_MASK
}

/// Figure that left the origin square. Only defined for real plies.
#[inline]
pub fn figure_moved(mv: Move) -> Figure {
    Figure::from_valid_code(moved_figure_code(mv))
}

/// Figure standing on the destination before the move, if any. `None` for an
/// en-passant capture.
#[inline]
pub fn figure_captured(mv: Move) -> Option<Figure> {
    Figure::from_code(captured_figure_code(mv))
}

/// Figure standing on the destination after the move.
#[inline]
pub fn figure_placed(mv: Move) -> Figure {
    Figure::from_valid_code(placed_figure_code(mv))
}

/// Castling rights that flip when this move is executed or undone.
#[inline]
pub fn castling_changes(mv: Move) -> CastlingRights {
    ((mv >> CASTLING_CHANGES_SHIFT) & FIGURE_MASK) as CastlingRights
}

#[inline]
pub fn is_moveless_draw_claim(mv: Move) -> bool {
    mv == MOVELESS_DRAW_CLAIM
}

/// True for a ply carrying a draw claim and for the moveless claim.
#[inline]
pub fn draw_claim(mv: Move) -> bool {
    mv != NO_MOVE && (mv & FLAG_DRAW_CLAIM) != 0
}

#[inline]
pub fn with_draw_claim(mv: Move) -> Move {
    mv | FLAG_DRAW_CLAIM
}

#[inline]
pub fn without_draw_claim(mv: Move) -> Move {
    if is_moveless_draw_claim(mv) {
        mv
    } else {
        mv & !FLAG_DRAW_CLAIM
    }
}

/// True for plies that move a piece (neither `NO_MOVE` nor the moveless claim).
#[inline]
pub fn is_piece_move(mv: Move) -> bool {
    mv != NO_MOVE && !is_moveless_draw_claim(mv)
}

#[inline]
pub fn is_castling(mv: Move) -> bool {
    is_piece_move(mv)
        && figure_moved(mv).is_king()
        && origin_x(mv).abs_diff(destination_x(mv)) == 2
}

#[inline]
pub fn is_en_passant(mv: Move) -> bool {
    is_piece_move(mv)
        && figure_moved(mv).is_pawn()
        && origin_x(mv) != destination_x(mv)
        && captured_figure_code(mv) == 0
}

#[inline]
pub fn is_capture(mv: Move) -> bool {
    is_piece_move(mv) && (captured_figure_code(mv) != 0 || is_en_passant(mv))
}

#[inline]
pub fn is_promotion(mv: Move) -> bool {
    is_piece_move(mv) && moved_figure_code(mv) != placed_figure_code(mv)
}

/// True for a pawn advancing two ranks.
#[inline]
pub fn is_double_pawn_push(mv: Move) -> bool {
    is_piece_move(mv)
        && figure_moved(mv).is_pawn()
        && origin_y(mv).abs_diff(destination_y(mv)) == 2
}

/// Same squares and same placed figure, ignoring the draw-claim flag.
#[inline]
pub fn same_ply(a: Move, b: Move) -> bool {
    without_draw_claim(a) == without_draw_claim(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::Board;

    #[test]
    fn decodes_every_field_of_a_packed_move() {
        let knight = Figure::of(PieceKind::Knight, Color::Light);
        let rook = Figure::of(PieceKind::Rook, Color::Dark);
        let mv = pack_move(6, 0, 5, 2, knight, Some(rook), knight, 0b1010);

        assert_eq!(origin_x(mv), 6);
        assert_eq!(origin_y(mv), 0);
        assert_eq!(destination_x(mv), 5);
        assert_eq!(destination_y(mv), 2);
        assert_eq!(figure_moved(mv), knight);
        assert_eq!(figure_captured(mv), Some(rook));
        assert_eq!(figure_placed(mv), knight);
        assert_eq!(castling_changes(mv), 0b1010);
        assert!(!draw_claim(mv));
        assert!(mv < (1 << 29));
    }

    #[test]
    fn draw_claim_flag_is_orthogonal_to_the_ply() {
        let board = Board::new();
        let pawn = Figure::of(PieceKind::Pawn, Color::Light);
        let mv = encode_move(&board, 4, 1, 4, 3, pawn);
        let claimed = with_draw_claim(mv);

        assert!(draw_claim(claimed));
        assert!(same_ply(mv, claimed));
        assert_eq!(without_draw_claim(claimed), mv);
        assert!(is_double_pawn_push(claimed));
    }

    #[test]
    fn moveless_claim_is_not_a_piece_move() {
        assert!(is_moveless_draw_claim(MOVELESS_DRAW_CLAIM));
        assert!(draw_claim(MOVELESS_DRAW_CLAIM));
        assert!(!is_piece_move(MOVELESS_DRAW_CLAIM));
        assert!(!is_piece_move(NO_MOVE));
        assert!(!draw_claim(NO_MOVE));
    }

    #[test]
    fn king_move_forfeits_both_rights() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let king = Figure::of(PieceKind::King, Color::Light);
        let mv = encode_move(&board, 4, 0, 4, 1, king);
        assert_eq!(
            castling_changes(mv),
            CASTLE_LIGHT_QUEENSIDE | CASTLE_LIGHT_KINGSIDE
        );
    }

    #[test]
    fn capturing_a_home_rook_forfeits_the_victims_right() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let rook = Figure::of(PieceKind::Rook, Color::Light);
        let mv = encode_move(&board, 7, 0, 7, 7, rook);
        assert_eq!(
            castling_changes(mv),
            CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_KINGSIDE
        );
        assert!(is_capture(mv));
    }
}
