//! Depth-limited negamax with alpha-beta pruning over [`Board`].
//!
//! The board's own `execute_move`/`undo` pair is the recursion mechanism:
//! every node executes one candidate, recurses and undoes it before trying
//! the next sibling. The move-history arena doubles as the search stack.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::chess_errors::{SearchError, SearchResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::DrawStatus;
use crate::moves::move_descriptions::*;
use crate::search::board_scoring::BoardScorer;
use crate::search::depth_control::{next_depth, DepthLimits, DepthTuning};
use crate::utils::notation::move_to_long_algebraic;

/// Score of a side that is checkmated.
pub const MIN_SCORE: i32 = -999_999;
pub const MAX_SCORE: i32 = 999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Duration a search should take; only steers the depth of the next one.
    pub time_budget: Duration,
    /// Plies searched, the root move included.
    pub initial_depth: u8,
    pub min_depth: u8,
    pub max_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(15),
            initial_depth: 4,
            min_depth: 2,
            max_depth: 10,
        }
    }
}

impl SearchConfig {
    /// A config whose depth never adapts.
    pub fn fixed_depth(depth: u8) -> Self {
        Self {
            initial_depth: depth,
            min_depth: depth,
            max_depth: depth,
            ..Self::default()
        }
    }

    pub fn limits(&self) -> DepthLimits {
        DepthLimits {
            time_budget: self.time_budget,
            min_depth: self.min_depth,
            max_depth: self.max_depth,
        }
    }
}

/// Result of one top-level search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `NO_MOVE` if the side to move has no legal move, `MOVELESS_DRAW_CLAIM`
    /// if claiming a draw beats every move.
    pub best_move: Move,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
    /// Ply and last move of the searched position.
    pub searched_turn: u32,
    pub searched_last_move: Move,
}

impl SearchOutcome {
    /// Play the result on `board`, which must still be at the searched
    /// position. `Ok(false)` when there is nothing to play.
    pub fn apply(&self, board: &mut Board) -> SearchResult<bool> {
        if board.turn() != self.searched_turn || board.last_move() != self.searched_last_move {
            warn!(
                "discarding search result for ply {}, board is at ply {}",
                self.searched_turn,
                board.turn()
            );
            return Err(SearchError::StaleResult {
                searched: self.searched_turn,
                current: board.turn(),
            });
        }
        if self.best_move == NO_MOVE {
            return Ok(false);
        }
        if is_moveless_draw_claim(self.best_move) {
            return Ok(board.execute_moveless_draw_claim());
        }
        if !board.candidate_moves().contains(&self.best_move) {
            return Err(SearchError::IllegalResult(self.best_move));
        }
        Ok(board.execute_move(self.best_move))
    }
}

/// Search driver. Clones share the depth tuning, so a clone handed to a
/// worker thread keeps tuning the depth the foreground reads.
#[derive(Debug, Clone)]
pub struct Search {
    config: SearchConfig,
    tuning: Arc<Mutex<DepthTuning>>,
}

impl Default for Search {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Search {
    pub fn new(config: SearchConfig) -> Self {
        let depth = config.limits().clamp(config.initial_depth);
        Self {
            config,
            tuning: Arc::new(Mutex::new(DepthTuning::new(depth))),
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Depth the next search will use.
    pub fn depth(&self) -> u8 {
        self.tuning().depth
    }

    /// Force the next search depth, e.g. to the depth stored with a loaded
    /// game. Clamped to the configured limits.
    pub fn set_depth(&self, depth: u8) {
        self.tuning().depth = self.config.limits().clamp(depth);
    }

    pub fn last_duration(&self) -> Duration {
        self.tuning().last_duration
    }

    fn tuning(&self) -> MutexGuard<'_, DepthTuning> {
        self.tuning.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn select_move<S: BoardScorer + ?Sized>(&self, board: &mut Board, scorer: &S) -> Move {
        self.search(board, scorer).best_move
    }

    /// Search the current position and retune the depth of the next search.
    /// The board is left as it was.
    pub fn search<S: BoardScorer + ?Sized>(&self, board: &mut Board, scorer: &S) -> SearchOutcome {
        let depth = self.depth().max(1);
        debug!("search at ply {} to depth {depth}", board.turn());

        let started = Instant::now();
        let mut nodes = 0u64;
        let (best_move, score) = search_root(board, scorer, depth, &mut nodes);
        let elapsed = started.elapsed();

        let promoted = is_piece_move(best_move) && is_promotion(best_move);
        let next = next_depth(&self.config.limits(), depth, elapsed, nodes, promoted);
        {
            let mut tuning = self.tuning();
            tuning.depth = next;
            tuning.last_duration = elapsed;
        }
        debug!(
            "search done: best {} score {score}, {nodes} nodes in {elapsed:?}",
            move_to_long_algebraic(best_move)
        );
        if next != depth {
            debug!("search depth {depth} -> {next}");
        }

        SearchOutcome {
            best_move,
            score,
            depth,
            nodes,
            elapsed,
            searched_turn: board.turn(),
            searched_last_move: board.last_move(),
        }
    }
}

fn search_root<S: BoardScorer + ?Sized>(
    board: &mut Board,
    scorer: &S,
    depth: u8,
    nodes: &mut u64,
) -> (Move, i32) {
    let mut alpha = MIN_SCORE;
    let beta = 2 * MAX_SCORE;
    let mut best_move = NO_MOVE;
    let mut best_score = MIN_SCORE;

    let count = board.candidate_moves().len();
    for i in 0..count {
        let mv = board.candidate_moves()[i];
        if !board.execute_move(mv) {
            continue;
        }
        *nodes += 1;
        let score = -alpha_beta(board, -beta, -alpha, depth - 1, scorer, nodes);
        board.undo();

        if best_move == NO_MOVE || score > best_score {
            best_move = mv;
            best_score = score;
        }
        if score > alpha {
            alpha = score;
        }
    }

    if best_move != NO_MOVE && best_score < 0 && board.can_claim_draw() {
        return (MOVELESS_DRAW_CLAIM, 0);
    }
    (best_move, best_score)
}

fn alpha_beta<S: BoardScorer + ?Sized>(
    board: &mut Board,
    mut alpha: i32,
    beta: i32,
    depth: u8,
    scorer: &S,
    nodes: &mut u64,
) -> i32 {
    let drawn = matches!(
        board.draw_status(),
        DrawStatus::AutomaticMoveRule | DrawStatus::AutomaticRepetition
    );
    if depth == 0 {
        if drawn && has_legal_move(board) {
            return 0;
        }
        if drawn && board.check(board.player()) {
            return MIN_SCORE;
        }
        return scorer.score(board, board.player());
    }

    let mut any_legal = false;
    let count = board.candidate_moves().len();
    for i in 0..count {
        let mv = board.candidate_moves()[i];
        if !board.execute_move(mv) {
            continue;
        }
        if drawn {
            board.undo();
            return 0;
        }
        *nodes += 1;
        any_legal = true;
        let score = -alpha_beta(board, -beta, -alpha, depth - 1, scorer, nodes);
        board.undo();

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    if any_legal {
        alpha
    } else if board.check(board.player()) {
        MIN_SCORE
    } else {
        scorer.score(board, board.player())
    }
}

/// Whether any candidate survives the self-check test. The board is left
/// as it was.
fn has_legal_move(board: &mut Board) -> bool {
    let count = board.candidate_moves().len();
    for i in 0..count {
        let mv = board.candidate_moves()[i];
        if board.execute_move(mv) {
            board.undo();
            return true;
        }
    }
    false
}
