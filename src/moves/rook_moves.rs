use crate::game_state::board::Board;
use crate::game_state::chess_types::Figure;
use crate::moves::figure_moves::push_slides;
use crate::moves::move_descriptions::Move;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub fn push_rook_moves(figure: Figure, board: &Board, x: u8, y: u8, out: &mut Vec<Move>) {
    push_slides(figure, board, x, y, &ROOK_DIRECTIONS, out);
}
