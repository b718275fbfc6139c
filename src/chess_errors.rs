//! Error types for parsing and coordination failures.
//!
//! Illegal moves and draw claims are ordinary outcomes reported through
//! `bool` returns by [`crate::game_state::board::Board`]; the enums here cover
//! malformed input text, malformed persisted records and background-search
//! coordination.

use thiserror::Error;

use crate::game_state::chess_types::Color;

/// Malformed Forsyth-Edwards Notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN is missing the {0} field")]
    MissingField(&'static str),

    #[error("FEN has extra trailing fields")]
    TrailingFields,

    #[error("board layout must contain 8 ranks, got {0}")]
    RankCount(usize),

    #[error("rank {rank} does not sum to 8 files")]
    RankLength { rank: u8 },

    #[error("invalid piece character '{0}' in board layout")]
    PieceChar(char),

    #[error("invalid side-to-move field: {0}")]
    SideToMove(String),

    #[error("invalid castling rights character: {0}")]
    CastlingChar(char),

    #[error("invalid en-passant field: {0}")]
    EnPassant(String),

    #[error("invalid {field} number: {value}")]
    Counter { field: &'static str, value: String },

    #[error("{0:?} must have exactly one king")]
    KingCount(Color),

    #[error("pawn on back rank at ({x}, {y})")]
    PawnOnBackRank { x: u8, y: u8 },

    #[error("the side not to move is in check")]
    OpponentInCheck,
}

pub type FenResult<T> = Result<T, FenError>;

/// Malformed square or move text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid algebraic square: {0}")]
    Square(String),

    #[error("invalid long algebraic move: {0}")]
    Move(String),

    #[error("{0} is not a candidate move in this position")]
    NotACandidate(String),
}

pub type NotationResult<T> = Result<T, NotationError>;

/// Malformed persisted game record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameRecordError {
    #[error("game record needs two leading player flags, got {0} values")]
    MissingFlags(usize),

    #[error("player flag must be 0 or 1, got {0}")]
    Flag(i64),

    #[error("game record has an unpaired trailing value")]
    UnpairedPly,

    #[error("ply {ply}: move value {value} is out of range")]
    MoveValue { ply: usize, value: i64 },

    #[error("ply {ply}: search depth {value} is out of range")]
    Depth { ply: usize, value: i64 },
}

pub type GameRecordResult<T> = Result<T, GameRecordError>;

/// Background search coordination failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search worker disconnected before posting a result")]
    WorkerDisconnected,

    #[error("search worker thread panicked")]
    WorkerPanicked,

    #[error("search result for ply {searched} is stale, board is at ply {current}")]
    StaleResult { searched: u32, current: u32 },

    #[error("search result move {0:#x} is not legal on this board")]
    IllegalResult(u32),
}

pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = FenError::Counter {
            field: "halfmove clock",
            value: "x".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid halfmove clock number: x");
        assert_eq!(
            SearchError::StaleResult {
                searched: 3,
                current: 5
            }
            .to_string(),
            "search result for ply 3 is stale, board is at ply 5"
        );
    }
}
