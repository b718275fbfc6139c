//! Persisted game layout: two player flags followed by one
//! `(move, search depth)` pair per ply, all as plain integers.
//!
//! Loading replays the moves from the initial position. A move that fails to
//! replay truncates the game there; the failure is reported in the
//! [`Replay`] instead of as an error.

use log::{debug, info, warn};

use crate::chess_errors::{GameRecordError, GameRecordResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::moves::move_descriptions::*;
use crate::search::searcher::Search;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedPly {
    pub mv: Move,
    /// Search depth in effect when the ply was played.
    pub search_depth: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    pub computer_light: bool,
    pub computer_dark: bool,
    pub plies: Vec<RecordedPly>,
}

/// First ply of a record that could not be replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMove {
    /// Zero-based index into [`GameRecord::plies`].
    pub ply: usize,
    pub mv: Move,
}

#[derive(Debug, Clone)]
pub struct Replay {
    pub board: Board,
    /// Depth stored with the last ply that replayed.
    pub search_depth: Option<u8>,
    pub invalid_move: Option<InvalidMove>,
}

impl GameRecord {
    /// Record of the game played on `board`, which must have started from
    /// the initial position. `flags` are indexed by [`Color::index`];
    /// missing depths are stored as zero.
    pub fn capture(board: &Board, flags: [bool; 2], depths: &[u8]) -> Self {
        let plies = board
            .played_moves()
            .into_iter()
            .enumerate()
            .map(|(i, mv)| RecordedPly {
                mv,
                search_depth: depths.get(i).copied().unwrap_or(0),
            })
            .collect();
        Self {
            computer_light: flags[Color::Light.index()],
            computer_dark: flags[Color::Dark.index()],
            plies,
        }
    }

    pub fn to_ints(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(2 + 2 * self.plies.len());
        out.push(i64::from(self.computer_light));
        out.push(i64::from(self.computer_dark));
        for ply in &self.plies {
            out.push(i64::from(ply.mv));
            out.push(i64::from(ply.search_depth));
        }
        out
    }

    pub fn from_ints(values: &[i64]) -> GameRecordResult<Self> {
        let [light, dark, rest @ ..] = values else {
            return Err(GameRecordError::MissingFlags(values.len()));
        };
        let computer_light = parse_flag(*light)?;
        let computer_dark = parse_flag(*dark)?;
        if rest.len() % 2 != 0 {
            return Err(GameRecordError::UnpairedPly);
        }

        let mut plies = Vec::with_capacity(rest.len() / 2);
        for (ply, pair) in rest.chunks_exact(2).enumerate() {
            let mv = Move::try_from(pair[0])
                .map_err(|_| GameRecordError::MoveValue { ply, value: pair[0] })?;
            let search_depth = u8::try_from(pair[1])
                .map_err(|_| GameRecordError::Depth { ply, value: pair[1] })?;
            plies.push(RecordedPly { mv, search_depth });
        }
        Ok(Self {
            computer_light,
            computer_dark,
            plies,
        })
    }

    /// Replay every ply from the initial position, stopping at the first
    /// one that is not legal there.
    pub fn replay(&self) -> Replay {
        let mut board = Board::new();
        let mut search_depth = None;
        for (ply, recorded) in self.plies.iter().enumerate() {
            if !replay_ply(&mut board, recorded.mv) {
                warn!(
                    "game record truncated at ply {ply}: invalid move {:#x}",
                    recorded.mv
                );
                return Replay {
                    board,
                    search_depth,
                    invalid_move: Some(InvalidMove { ply, mv: recorded.mv }),
                };
            }
            search_depth = Some(recorded.search_depth);
            debug!("replayed ply {ply}");
        }
        Replay {
            board,
            search_depth,
            invalid_move: None,
        }
    }

    /// Parse, replay and hand the last recorded depth to `search`.
    pub fn load(values: &[i64], search: &Search) -> GameRecordResult<(Self, Replay)> {
        let record = Self::from_ints(values)?;
        let replay = record.replay();
        if let Some(depth) = replay.search_depth {
            search.set_depth(depth);
        }
        info!(
            "loaded game record with {} plies, {} replayed",
            record.plies.len(),
            replay.board.played_moves().len()
        );
        Ok((record, replay))
    }
}

fn parse_flag(value: i64) -> GameRecordResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(GameRecordError::Flag(other)),
    }
}

/// Execute a stored move the way a player would have: only a legal
/// candidate of a running game, with a draw claim only if it holds.
fn replay_ply(board: &mut Board, mv: Move) -> bool {
    if is_moveless_draw_claim(mv) {
        return board.execute_moveless_draw_claim();
    }
    if !board.status().is_ongoing() || !board.candidate_moves().contains(&without_draw_claim(mv)) {
        return false;
    }
    if !board.execute_move(mv) {
        return false;
    }
    if draw_claim(mv) && !board.can_claim_draw() {
        board.undo();
        return false;
    }
    true
}
