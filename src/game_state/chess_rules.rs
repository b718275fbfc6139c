//! Canonical chess-rule constants.
//!
//! Static rule literals: the starting position, board extent, and the draw
//! thresholds of the repetition and move-count rules.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Files and ranks are indexed `0..BOARD_SIZE`.
pub const BOARD_SIZE: u8 = 8;

/// Occurrences of one position that allow a draw claim.
pub const CLAIMABLE_REPETITIONS: u32 = 3;

/// Occurrences of one position that end the game automatically.
pub const AUTOMATIC_REPETITIONS: u32 = 5;

/// Half-move clock value that allows a draw claim.
pub const CLAIMABLE_MOVE_RULE: u32 = 50;

/// Half-move clock value that ends the game automatically.
pub const AUTOMATIC_MOVE_RULE: u32 = 75;

/// File the kings start on.
pub const KING_HOME_FILE: u8 = 4;

/// Files of the queenside and kingside rooks.
pub const QUEENSIDE_ROOK_FILE: u8 = 0;
pub const KINGSIDE_ROOK_FILE: u8 = 7;

#[inline]
pub fn on_board(x: i8, y: i8) -> bool {
    (0..BOARD_SIZE as i8).contains(&x) && (0..BOARD_SIZE as i8).contains(&y)
}
