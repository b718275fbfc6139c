//! Move-history arena shared by game history and search recursion.
//!
//! All frames live in one flat `u32` buffer and reference each other by
//! index. A frame is laid out as
//!
//! ```text
//! [successor, predecessor, selected, move_0, move_1, ...]
//! ```
//!
//! `successor` points just past the frame's last candidate move, which is
//! also where the next frame starts once a move is selected. `predecessor` is
//! `NO_FRAME` for the root frame. `selected` is the move executed from this
//! frame, or `0` if none was. Frames form a stack: pushing a new frame only
//! ever overwrites data after the current frame.
//!
//! A selected move survives popping its successor. Executing the same move
//! again re-enters the cached successor frame without recomputing it, which
//! gives O(1) redo and keeps repeated execute/undo probes cheap.

use log::warn;

use crate::moves::move_descriptions::{Move, NO_MOVE};

/// Initial reservation, in cells. The arena grows past it on demand.
pub const DEFAULT_ARENA_CAPACITY: usize = 16384;

const FRAME_HEADER_CELLS: usize = 3;
const SUCCESSOR_OFFSET: usize = 0;
const PREDECESSOR_OFFSET: usize = 1;
const SELECTED_OFFSET: usize = 2;
const NO_FRAME: u32 = u32::MAX;

#[derive(Debug, Clone)]
pub struct MoveHistory {
    cells: Vec<u32>,
    frame: usize,
    reserved: usize,
    grown: bool,
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ARENA_CAPACITY)
    }

    /// Arena holding only an empty root frame, with room for `cells` cells
    /// before the first reallocation.
    pub fn with_capacity(cells: usize) -> Self {
        let reserved = cells.max(FRAME_HEADER_CELLS);
        let mut buffer = Vec::with_capacity(reserved);
        buffer.extend_from_slice(&[FRAME_HEADER_CELLS as u32, NO_FRAME, NO_MOVE]);
        Self {
            cells: buffer,
            frame: 0,
            reserved,
            grown: false,
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.cells[self.frame + PREDECESSOR_OFFSET] == NO_FRAME
    }

    /// Move executed from the current frame, `NO_MOVE` if none.
    #[inline]
    pub fn selected(&self) -> Move {
        self.cells[self.frame + SELECTED_OFFSET]
    }

    /// Candidate moves of the current frame.
    #[inline]
    pub fn candidates(&self) -> &[Move] {
        let start = self.frame + FRAME_HEADER_CELLS;
        let end = self.cells[self.frame + SUCCESSOR_OFFSET] as usize;
        &self.cells[start..end]
    }

    /// Drop the current frame's candidates (the frame must be the newest).
    pub fn clear_candidates(&mut self) {
        self.cells[self.frame + SUCCESSOR_OFFSET] = (self.frame + FRAME_HEADER_CELLS) as u32;
    }

    /// Append candidates to the current frame (the frame must be the newest).
    pub fn extend_candidates(&mut self, moves: &[Move]) {
        let start = self.cells[self.frame + SUCCESSOR_OFFSET] as usize;
        let end = start + moves.len();
        self.ensure_len(end);
        self.cells[start..end].copy_from_slice(moves);
        self.cells[self.frame + SUCCESSOR_OFFSET] = end as u32;
    }

    /// Select `mv` in the current frame and enter its successor frame.
    ///
    /// Returns `true` if `mv` was already the selected move, in which case
    /// the cached successor (and its candidates) is re-entered unchanged.
    /// Otherwise a fresh, empty successor frame is written.
    pub fn advance(&mut self, mv: Move) -> bool {
        let successor = self.cells[self.frame + SUCCESSOR_OFFSET] as usize;
        if self.selected() == mv {
            self.frame = successor;
            return true;
        }
        self.cells[self.frame + SELECTED_OFFSET] = mv;
        self.ensure_len(successor + FRAME_HEADER_CELLS);
        self.cells[successor + SUCCESSOR_OFFSET] = (successor + FRAME_HEADER_CELLS) as u32;
        self.cells[successor + PREDECESSOR_OFFSET] = self.frame as u32;
        self.cells[successor + SELECTED_OFFSET] = NO_MOVE;
        self.frame = successor;
        false
    }

    /// Pop the current frame. Returns the move that led into it, or `None`
    /// at the root.
    pub fn retreat(&mut self) -> Option<Move> {
        let predecessor = self.cells[self.frame + PREDECESSOR_OFFSET];
        if predecessor == NO_FRAME {
            return None;
        }
        self.frame = predecessor as usize;
        Some(self.selected())
    }

    /// Pop a frame whose move turned out illegal, forgetting the selection so
    /// the rejected move can never re-enter it through the redo cache.
    pub fn retreat_rejected(&mut self) -> Option<Move> {
        let mv = self.retreat()?;
        self.cells[self.frame + SELECTED_OFFSET] = NO_MOVE;
        Some(mv)
    }

    /// Move that led into the frame `plies_back` frames below the current
    /// one (`1` is the last executed move). `NO_MOVE` past the root.
    pub fn selected_back(&self, plies_back: usize) -> Move {
        if plies_back == 0 {
            return NO_MOVE;
        }
        let mut frame = self.frame;
        for _ in 0..plies_back {
            let predecessor = self.cells[frame + PREDECESSOR_OFFSET];
            if predecessor == NO_FRAME {
                return NO_MOVE;
            }
            frame = predecessor as usize;
        }
        self.cells[frame + SELECTED_OFFSET]
    }

    /// Moves from the root up to the current frame, oldest first.
    pub fn line(&self) -> Vec<Move> {
        let mut out = Vec::new();
        let mut frame = self.frame;
        loop {
            let predecessor = self.cells[frame + PREDECESSOR_OFFSET];
            if predecessor == NO_FRAME {
                break;
            }
            frame = predecessor as usize;
            out.push(self.cells[frame + SELECTED_OFFSET]);
        }
        out.reverse();
        out
    }

    /// Cells written so far (high-water mark).
    #[inline]
    pub fn used_cells(&self) -> usize {
        self.cells.len()
    }

    fn ensure_len(&mut self, len: usize) {
        if len <= self.cells.len() {
            return;
        }
        if len > self.reserved && !self.grown {
            self.grown = true;
            warn!(
                "move history arena grew past its {} cell reservation",
                self.reserved
            );
        }
        self.cells.resize(len, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_frame_starts_empty() {
        let history = MoveHistory::new();
        assert!(history.is_root());
        assert!(history.candidates().is_empty());
        assert_eq!(history.selected(), NO_MOVE);
        assert!(history.line().is_empty());
    }

    #[test]
    fn advance_and_retreat_form_a_stack() {
        let mut history = MoveHistory::new();
        history.extend_candidates(&[11, 12, 13]);
        assert!(!history.advance(12));
        history.extend_candidates(&[21, 22]);
        assert!(!history.advance(21));

        assert_eq!(history.line(), vec![12, 21]);
        assert_eq!(history.selected_back(1), 21);
        assert_eq!(history.selected_back(2), 12);
        assert_eq!(history.selected_back(3), NO_MOVE);

        assert_eq!(history.retreat(), Some(21));
        assert_eq!(history.candidates(), &[21, 22]);
        assert_eq!(history.retreat(), Some(12));
        assert_eq!(history.candidates(), &[11, 12, 13]);
        assert_eq!(history.retreat(), None);
    }

    #[test]
    fn reselecting_a_move_reenters_the_cached_frame() {
        let mut history = MoveHistory::new();
        history.extend_candidates(&[1, 2]);
        history.advance(2);
        history.extend_candidates(&[7, 8, 9]);
        history.retreat();

        assert!(history.advance(2));
        assert_eq!(history.candidates(), &[7, 8, 9]);
    }

    #[test]
    fn rejected_frames_are_not_cached() {
        let mut history = MoveHistory::new();
        history.extend_candidates(&[1, 2]);
        history.advance(1);
        history.retreat_rejected();

        assert_eq!(history.selected(), NO_MOVE);
        assert!(!history.advance(1));
        assert!(history.candidates().is_empty());
    }

    #[test]
    fn arena_grows_past_its_reservation() {
        let mut history = MoveHistory::with_capacity(8);
        let moves: Vec<Move> = (1..=40).collect();
        for _ in 0..10 {
            history.extend_candidates(&moves);
            history.advance(5);
        }
        assert!(history.used_cells() > 8);
        assert_eq!(history.line().len(), 10);
    }
}
