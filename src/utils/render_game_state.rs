//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for debugging, tests, and diagnostics
//! in text environments. Backs `Display` for [`Board`].

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Render the board to a Unicode string, rank 8 at the top.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            match board.figure(file, rank) {
                Some(figure) => out.push(figure_to_unicode(figure)),
                None => out.push('·'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

pub fn figure_to_unicode(figure: Figure) -> char {
    match (figure.owner(), figure.kind()) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}
