use crate::game_state::board::Board;
use crate::game_state::chess_types::Figure;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::figure_moves::push_slides;
use crate::moves::move_descriptions::Move;
use crate::moves::rook_moves::ROOK_DIRECTIONS;

#[inline]
pub fn push_queen_moves(figure: Figure, board: &Board, x: u8, y: u8, out: &mut Vec<Move>) {
    push_slides(figure, board, x, y, &ROOK_DIRECTIONS, out);
    push_slides(figure, board, x, y, &BISHOP_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn queen_in_the_centre_of_an_empty_board_reaches_twenty_seven_squares() {
        let board = Board::from_fen("k7/8/8/8/3Q4/8/8/7K w - - 0 1").expect("FEN should parse");
        let queen = Figure::of(PieceKind::Queen, Color::Light);
        let mut out = Vec::new();
        push_queen_moves(queen, &board, 3, 3, &mut out);
        assert_eq!(out.len(), 27);
    }
}
