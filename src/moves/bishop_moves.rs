use crate::game_state::board::Board;
use crate::game_state::chess_types::Figure;
use crate::moves::figure_moves::push_slides;
use crate::moves::move_descriptions::Move;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub fn push_bishop_moves(figure: Figure, board: &Board, x: u8, y: u8, out: &mut Vec<Move>) {
    push_slides(figure, board, x, y, &BISHOP_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn centralised_bishop_reaches_thirteen_squares() {
        let board = Board::from_fen("k7/8/8/8/3B4/8/8/7K w - - 0 1").expect("FEN should parse");
        let bishop = Figure::of(PieceKind::Bishop, Color::Light);
        let mut out = Vec::new();
        push_bishop_moves(bishop, &board, 3, 3, &mut out);
        assert_eq!(out.len(), 13);
    }

    #[test]
    fn undeveloped_bishop_has_no_moves() {
        let board = Board::new();
        let bishop = Figure::of(PieceKind::Bishop, Color::Light);
        let mut out = Vec::new();
        push_bishop_moves(bishop, &board, 2, 0, &mut out);
        assert!(out.is_empty());
    }
}
