//! FEN-to-position parser.
//!
//! Builds a [`BoardSetup`] from a Forsyth-Edwards Notation string. The board
//! itself validates kings and checks in [`crate::game_state::board::Board::from_setup`].

use crate::chess_errors::{FenError, FenResult};
use crate::game_state::board::{BoardSetup, Grid};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> FenResult<BoardSetup> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side-to-move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en-passant square"))?;
    // Clocks are optional, as in many EPD-derived test suites.
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(FenError::TrailingFields);
    }

    let player = parse_side_to_move(side_part)?;
    Ok(BoardSetup {
        squares: parse_board(board_part)?,
        player,
        castling_rights: parse_castling_rights(castling_part)?,
        en_passant_file: parse_en_passant(en_passant_part, player)?,
        halfmove_clock: parse_counter(halfmove_part, "halfmove clock")?,
        fullmove_number: parse_counter(fullmove_part, "fullmove")?,
    })
}

fn parse_board(board_part: &str) -> FenResult<Grid> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut squares: Grid = [[None; 8]; 8];
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::PieceChar(ch));
                }
                file += empty_count as usize;
                continue;
            }

            let figure = figure_from_fen_char(ch).ok_or(FenError::PieceChar(ch))?;
            if file >= 8 {
                return Err(FenError::RankLength { rank: rank + 1 });
            }
            squares[file][rank as usize] = Some(figure);
            file += 1;
        }

        if file != 8 {
            return Err(FenError::RankLength { rank: rank + 1 });
        }
    }

    Ok(squares)
}

fn parse_side_to_move(side_part: &str) -> FenResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(FenError::SideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> FenResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(FenError::CastlingChar(ch)),
        }
    }

    Ok(rights)
}

/// The target square must sit behind a pawn of the side that just moved.
fn parse_en_passant(en_passant_part: &str, player: Color) -> FenResult<Option<u8>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    let (x, y) = algebraic_to_square(en_passant_part)
        .map_err(|_| FenError::EnPassant(en_passant_part.to_owned()))?;
    let expected_rank = match player {
        Color::Light => 5,
        Color::Dark => 2,
    };
    if y != expected_rank {
        return Err(FenError::EnPassant(en_passant_part.to_owned()));
    }
    Ok(Some(x))
}

fn parse_counter(part: &str, field: &'static str) -> FenResult<u32> {
    part.parse::<u32>().map_err(|_| FenError::Counter {
        field,
        value: part.to_owned(),
    })
}

fn figure_from_fen_char(ch: char) -> Option<Figure> {
    let owner = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };
    PieceKind::from_letter(ch).map(|kind| Figure::of(kind, owner))
}
