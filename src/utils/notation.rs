//! Move text in two flavours.
//!
//! Long algebraic (`e2e4`, `e7e8q`) is the machine-facing form used by logs,
//! PGN movetext and tests. The history form follows the FIDE long notation
//! shown in game listings: figure letter, origin, `x` for captures,
//! destination, promotion letter, `e.p.`, `0-0`/`0-0-0`, then `+` for check
//! and `++` for mate.

use crate::chess_errors::{NotationError, NotationResult};
use crate::game_state::board::{Board, MoveRequest};
use crate::game_state::chess_types::{GameStatus, PieceKind};
use crate::moves::move_descriptions::*;
use crate::utils::algebraic::{algebraic_to_square, file_char};

/// Long algebraic text of `mv`. `0000` stands for "no move" and `(=)` for a
/// draw claimed without moving.
pub fn move_to_long_algebraic(mv: Move) -> String {
    if mv == NO_MOVE {
        return "0000".to_owned();
    }
    if is_moveless_draw_claim(mv) {
        return "(=)".to_owned();
    }
    let mut out = String::with_capacity(5);
    push_square(&mut out, origin_x(mv), origin_y(mv));
    push_square(&mut out, destination_x(mv), destination_y(mv));
    if is_promotion(mv) {
        out.push(figure_placed(mv).kind().letter().to_ascii_lowercase());
    }
    out
}

/// Find the candidate of `board` spelled by `text`. A promotion without a
/// suffix resolves to the queen.
pub fn parse_long_algebraic(board: &Board, text: &str) -> NotationResult<Move> {
    let text = text.trim();
    if !(4..=5).contains(&text.len()) || !text.is_ascii() {
        return Err(NotationError::Move(text.to_owned()));
    }
    let (from, rest) = text.split_at(2);
    let (to, promotion) = rest.split_at(2);
    let (from_x, from_y) = algebraic_to_square(from).map_err(|_| NotationError::Move(text.to_owned()))?;
    let (to_x, to_y) = algebraic_to_square(to).map_err(|_| NotationError::Move(text.to_owned()))?;

    let mut request = MoveRequest::new(from_x, from_y, to_x, to_y);
    if let Some(letter) = promotion.chars().next() {
        match PieceKind::from_letter(letter) {
            Some(kind @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Knight | PieceKind::Bishop)) => {
                request = request.promote_to(kind);
            }
            _ => return Err(NotationError::Move(text.to_owned())),
        }
    }

    board
        .candidate_moves()
        .iter()
        .copied()
        .find(|mv| request.matches(*mv))
        .ok_or_else(|| NotationError::NotACandidate(text.to_owned()))
}

/// FIDE-style text of `mv` given the status of the position it led to.
pub fn history_notation(mv: Move, status_after: GameStatus) -> String {
    if is_moveless_draw_claim(mv) {
        return "draw claimed".to_owned();
    }
    let mut out = String::new();
    if is_castling(mv) {
        out.push_str(if destination_x(mv) > origin_x(mv) {
            "0-0"
        } else {
            "0-0-0"
        });
    } else {
        let moved = figure_moved(mv);
        if !moved.is_pawn() {
            out.push(moved.kind().letter());
        }
        push_square(&mut out, origin_x(mv), origin_y(mv));
        if is_capture(mv) {
            out.push('x');
        }
        push_square(&mut out, destination_x(mv), destination_y(mv));
        if is_promotion(mv) {
            out.push(figure_placed(mv).kind().letter());
        }
        if is_en_passant(mv) {
            out.push_str(" e.p.");
        }
    }
    match status_after {
        GameStatus::Check => out.push('+'),
        GameStatus::Checkmate => out.push_str("++"),
        _ => {}
    }
    if draw_claim(mv) {
        out.push_str(" (=)");
    }
    out
}

/// Numbered history entries of every ply played on `board`, e.g.
/// `1. e2e4`, `1… e7e5`. The board itself is left untouched.
pub fn history_entries(board: &Board) -> Vec<String> {
    let mut replay = board.fork();
    let line = replay.played_moves();
    for _ in &line {
        replay.undo();
    }

    let mut out = Vec::with_capacity(line.len());
    for mv in line {
        let turn = replay.turn();
        if !replay.execute_move(mv) {
            break;
        }
        let status = replay.status();
        let separator = if turn % 2 == 0 { "\u{2026}" } else { "." };
        out.push(format!(
            "{}{} {}",
            Board::move_number_of(turn),
            separator,
            history_notation(mv, status)
        ));
    }
    out
}

fn push_square(out: &mut String, x: u8, y: u8) {
    out.push(file_char(x));
    out.push(char::from(b'1' + (y & 7)));
}
