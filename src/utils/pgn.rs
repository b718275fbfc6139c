//! PGN export of a played game.
//!
//! Writes the seven-tag roster (plus `SetUp`/`FEN` for games that did not
//! start from the initial position) and long algebraic movetext.

use chrono::{Local, NaiveDate};

use crate::game_state::board::Board;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::{Color, GameStatus};
use crate::moves::move_descriptions::is_moveless_draw_claim;
use crate::utils::notation::move_to_long_algebraic;

/// PGN text of the game on `board`, dated today.
pub fn write_pgn(board: &Board, white: &str, black: &str) -> String {
    write_pgn_dated(board, white, black, Local::now().date_naive())
}

pub fn write_pgn_dated(board: &Board, white: &str, black: &str, date: NaiveDate) -> String {
    let mut live = board.fork();
    let result = result_token(&mut live);

    let mut root = board.fork();
    let line = root.played_moves();
    for _ in &line {
        root.undo();
    }
    let root_fen = root.to_fen();

    let date = date.format("%Y.%m.%d").to_string();
    let mut headers: Vec<(&str, &str)> = vec![
        ("Event", "Arena Chess Game"),
        ("Site", "Local"),
        ("Date", date.as_str()),
        ("Round", "-"),
        ("White", white),
        ("Black", black),
        ("Result", result),
    ];
    if root_fen != STARTING_POSITION_FEN {
        headers.push(("SetUp", "1"));
        headers.push(("FEN", root_fen.as_str()));
    }

    let mut out = String::new();
    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let dark_started = u32::from(root.root_player() == Color::Dark);
    let mut movetext = Vec::with_capacity(line.len() + 1);
    let mut first = true;
    for (ply, mv) in (0u32..).zip(line) {
        if is_moveless_draw_claim(mv) {
            continue;
        }
        let lan = move_to_long_algebraic(mv);
        let half = ply + dark_started;
        let number = root.root_fullmove_number() + half / 2;
        if half % 2 == 0 {
            movetext.push(format!("{number}. {lan}"));
        } else if first {
            movetext.push(format!("{number}... {lan}"));
        } else {
            movetext.push(lan);
        }
        first = false;
    }
    movetext.push(result.to_owned());
    out.push_str(&movetext.join(" "));
    out.push('\n');
    out
}

fn result_token(board: &mut Board) -> &'static str {
    match board.status() {
        GameStatus::Checkmate => match board.player() {
            Color::Light => "0-1",
            Color::Dark => "1-0",
        },
        GameStatus::Stalemate | GameStatus::Draw => "1/2-1/2",
        GameStatus::Normal | GameStatus::Check => "*",
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
