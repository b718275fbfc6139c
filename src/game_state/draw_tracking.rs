//! Per-ply position records for the repetition and move-count draw rules.
//!
//! One record exists for every ply reached, root included, so the record
//! stack always has `turn` entries and is pushed/popped in lockstep with the
//! move-history arena.

use crate::game_state::chess_types::{CastlingRights, Color};

/// Everything that makes two positions "the same" for repetition purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    /// Figure code per square, `x * 8 + y`, `0` for empty.
    pub squares: [u8; 64],
    pub player: Color,
    pub castling_rights: CastlingRights,
    /// File of a pawn that may be captured en passant right now.
    pub en_passant_file: Option<u8>,
}

#[derive(Debug, Clone)]
struct PositionRecord {
    key: PositionKey,
    halfmove_clock: u32,
    repetitions: u32,
}

#[derive(Debug, Clone)]
pub struct DrawTracker {
    records: Vec<PositionRecord>,
}

impl DrawTracker {
    /// Tracker for a game starting at `key` with the given half-move clock.
    pub fn with_root(key: PositionKey, halfmove_clock: u32) -> Self {
        Self {
            records: vec![PositionRecord {
                key,
                halfmove_clock,
                repetitions: 1,
            }],
        }
    }

    /// Record the position reached by a ply. `irreversible` is set for
    /// captures and pawn moves, which reset the clock and the repetition
    /// window.
    pub fn push_move(&mut self, key: PositionKey, irreversible: bool) {
        let halfmove_clock = if irreversible {
            0
        } else {
            self.halfmove_clock() + 1
        };

        let newest = self.records.len();
        let window = (halfmove_clock as usize).min(newest);
        let repetitions = 1 + (2..=window)
            .step_by(2)
            .filter(|distance| self.records[newest - distance].key == key)
            .count() as u32;

        self.records.push(PositionRecord {
            key,
            halfmove_clock,
            repetitions,
        });
    }

    /// Record a draw claim made without moving: the counters carry over.
    pub fn push_claim(&mut self) {
        if let Some(last) = self.records.last().cloned() {
            self.records.push(last);
        }
    }

    /// Forget the newest record. The root record is never removed.
    pub fn pop(&mut self) {
        if self.records.len() > 1 {
            self.records.pop();
        }
    }

    /// Plies since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.records.last().map_or(0, |r| r.halfmove_clock)
    }

    /// Occurrences of the current position, itself included.
    #[inline]
    pub fn repetitions(&self) -> u32 {
        self.records.last().map_or(1, |r| r.repetitions)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
