//! Crate root module declarations for the arena chess library.
//!
//! Exposes the board state machine, per-figure move generation, evaluation
//! and search, plus the text utilities (FEN, notation, PGN, saved games)
//! built on top of them.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod draw_tracking;
    pub mod move_history;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod figure_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod depth_control;
    pub mod searcher;
    pub mod threading;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod game_record;
    pub mod notation;
    pub mod pgn;
    pub mod render_game_state;
}
