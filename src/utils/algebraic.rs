//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and the board's
//! `(x, y)` file/rank pairs, reused by FEN, notation and PGN code.

use crate::chess_errors::{NotationError, NotationResult};

/// Convert algebraic notation (for example: "e4") to `(x, y)`.
#[inline]
pub fn algebraic_to_square(square: &str) -> NotationResult<(u8, u8)> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(NotationError::Square(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(NotationError::Square(square.to_owned()));
    }

    Ok((file - b'a', rank - b'1'))
}

/// Convert `(x, y)` to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(x: u8, y: u8) -> NotationResult<String> {
    if x > 7 || y > 7 {
        return Err(NotationError::Square(format!("({x}, {y})")));
    }
    Ok(format!("{}{}", file_char(x), char::from(b'1' + y)))
}

/// File letter of `x`, `'?'` when off the board.
#[inline]
pub fn file_char(x: u8) -> char {
    if x > 7 {
        '?'
    } else {
        char::from(b'a' + x)
    }
}
