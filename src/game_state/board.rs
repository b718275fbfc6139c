//! The position state machine.
//!
//! `Board` owns the grid, the cached king squares, castling state, the
//! ply counter and the move-history arena. Every frame of the arena holds the
//! pseudo-legal candidates of the position it stands for; legality (not
//! leaving the own king attacked) is decided when a candidate is executed.

use std::fmt;

use log::trace;

use crate::chess_errors::{FenError, FenResult};
use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::game_state::draw_tracking::{DrawTracker, PositionKey};
use crate::game_state::move_history::MoveHistory;
use crate::move_generation::legal_move_checks::square_attacked_by;
use crate::moves::move_descriptions::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_game_state::render_board;

/// Grid indexed `[x][y]`, file-major.
pub type Grid = [[Option<Figure>; 8]; 8];

/// Raw position description accepted by [`Board::from_setup`].
#[derive(Debug, Clone)]
pub struct BoardSetup {
    pub squares: Grid,
    pub player: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_file: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// A move as entered by a user: coordinates plus the optional promotion
/// kind and draw claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from_x: u8,
    pub from_y: u8,
    pub to_x: u8,
    pub to_y: u8,
    /// Kind a pawn reaching the last rank becomes; `None` means queen.
    pub promotion: Option<PieceKind>,
    pub draw_claim: bool,
}

impl MoveRequest {
    pub fn new(from_x: u8, from_y: u8, to_x: u8, to_y: u8) -> Self {
        Self {
            from_x,
            from_y,
            to_x,
            to_y,
            promotion: None,
            draw_claim: false,
        }
    }

    pub fn promote_to(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    pub fn claim_draw(mut self) -> Self {
        self.draw_claim = true;
        self
    }

    fn in_bounds(&self) -> bool {
        [self.from_x, self.from_y, self.to_x, self.to_y]
            .iter()
            .all(|c| *c < BOARD_SIZE)
    }

    pub(crate) fn matches(&self, mv: Move) -> bool {
        if origin_x(mv) != self.from_x
            || origin_y(mv) != self.from_y
            || destination_x(mv) != self.to_x
            || destination_y(mv) != self.to_y
        {
            return false;
        }
        let placed = figure_placed(mv).kind();
        if is_promotion(mv) {
            placed == self.promotion.unwrap_or(PieceKind::Queen)
        } else {
            self.promotion.is_none() || self.promotion == Some(placed)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    squares: Grid,
    kings: [(u8, u8); 2],
    castling_rights: CastlingRights,
    castling_done: [bool; 2],
    player: Color,
    turn: u32,
    root_en_passant_file: Option<u8>,
    root_fullmove_number: u32,
    root_player: Color,
    history: MoveHistory,
    draws: DrawTracker,
    scratch: Vec<Move>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Board holding the standard initial position at ply 1.
    pub fn new() -> Self {
        let mut squares: Grid = [[None; 8]; 8];
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (x, kind) in back_rank.into_iter().enumerate() {
            for color in [Color::Light, Color::Dark] {
                squares[x][color.home_rank() as usize] = Some(Figure::of(kind, color));
                squares[x][color.pawn_rank() as usize] = Some(Figure::of(PieceKind::Pawn, color));
            }
        }
        Self::assemble(BoardSetup {
            squares,
            player: Color::Light,
            castling_rights: CASTLE_ALL,
            en_passant_file: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        })
    }

    /// Board for an arbitrary root position. Castling rights whose king or
    /// rook is not on its home square are dropped.
    pub fn from_setup(setup: BoardSetup) -> FenResult<Self> {
        let mut kings = [false; 2];
        for x in 0..8 {
            for y in 0..8 {
                if let Some(f) = setup.squares[x][y] {
                    if f.is_pawn() && (y == 0 || y == 7) {
                        return Err(FenError::PawnOnBackRank {
                            x: x as u8,
                            y: y as u8,
                        });
                    }
                    if f.is_king() {
                        if kings[f.owner().index()] {
                            return Err(FenError::KingCount(f.owner()));
                        }
                        kings[f.owner().index()] = true;
                    }
                }
            }
        }
        for color in [Color::Light, Color::Dark] {
            if !kings[color.index()] {
                return Err(FenError::KingCount(color));
            }
        }
        let board = Self::assemble(setup);
        if board.check(board.player.opposite()) {
            return Err(FenError::OpponentInCheck);
        }
        Ok(board)
    }

    /// Board for a FEN string.
    pub fn from_fen(fen: &str) -> FenResult<Self> {
        Self::from_setup(parse_fen(fen)?)
    }

    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    fn assemble(setup: BoardSetup) -> Self {
        let mut kings = [(KING_HOME_FILE, 0), (KING_HOME_FILE, 7)];
        for (x, file) in setup.squares.iter().enumerate() {
            for (y, square) in file.iter().enumerate() {
                if let Some(f) = square {
                    if f.is_king() {
                        kings[f.owner().index()] = (x as u8, y as u8);
                    }
                }
            }
        }

        let mut castling_rights = setup.castling_rights & CASTLE_ALL;
        for color in [Color::Light, Color::Dark] {
            let home = color.home_rank() as usize;
            let king = setup.squares[KING_HOME_FILE as usize][home];
            for (side, file) in [
                (CastlingSide::Queenside, QUEENSIDE_ROOK_FILE),
                (CastlingSide::Kingside, KINGSIDE_ROOK_FILE),
            ] {
                let rook = setup.squares[file as usize][home];
                if king != Some(Figure::of(PieceKind::King, color))
                    || rook != Some(Figure::of(PieceKind::Rook, color))
                {
                    castling_rights &= !castling_bit(side, color);
                }
            }
        }

        let mut board = Self {
            squares: setup.squares,
            kings,
            castling_rights,
            castling_done: [false, false],
            player: setup.player,
            turn: 1,
            root_en_passant_file: setup.en_passant_file,
            root_fullmove_number: setup.fullmove_number.max(1),
            root_player: setup.player,
            history: MoveHistory::new(),
            draws: DrawTracker::with_root(
                PositionKey {
                    squares: [0; 64],
                    player: setup.player,
                    castling_rights,
                    en_passant_file: None,
                },
                setup.halfmove_clock,
            ),
            scratch: Vec::with_capacity(128),
        };
        board.compute_candidates();
        board.draws = DrawTracker::with_root(board.position_key(), setup.halfmove_clock);
        board
    }

    /// Deep, independent copy (grid, caches, counters and the whole arena)
    /// that can be handed to another thread.
    pub fn fork(&self) -> Board {
        self.clone()
    }

    // --- Queries ---

    /// Figure on `(x, y)`; `None` for empty or off-board squares.
    #[inline]
    pub fn figure(&self, x: u8, y: u8) -> Option<Figure> {
        self.squares
            .get(x as usize)
            .and_then(|file| file.get(y as usize))
            .copied()
            .flatten()
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> (u8, u8) {
        self.kings[color.index()]
    }

    #[inline]
    pub fn castling_allowed(&self, side: CastlingSide, color: Color) -> bool {
        self.castling_rights & castling_bit(side, color) != 0
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Whether `color` has castled in the game so far.
    #[inline]
    pub fn castling_done(&self, color: Color) -> bool {
        self.castling_done[color.index()]
    }

    /// Side to move.
    #[inline]
    pub fn player(&self) -> Color {
        self.player
    }

    /// Ply counter: plies played plus one.
    #[inline]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Move number of the current ply (two plies per move).
    #[inline]
    pub fn move_number(&self) -> u32 {
        Self::move_number_of(self.turn)
    }

    /// Move number the ply `turn` belongs to.
    #[inline]
    pub fn move_number_of(turn: u32) -> u32 {
        turn.div_ceil(2)
    }

    pub(crate) fn root_fullmove_number(&self) -> u32 {
        self.root_fullmove_number
    }

    pub(crate) fn root_player(&self) -> Color {
        self.root_player
    }

    /// Pseudo-legal candidates of the current position.
    #[inline]
    pub fn candidate_moves(&self) -> &[Move] {
        self.history.candidates()
    }

    /// Move already executed from the current frame, `NO_MOVE` if none.
    #[inline]
    pub fn moves_selected(&self) -> Move {
        self.history.selected()
    }

    /// Move that led into the current position, `NO_MOVE` at the root.
    #[inline]
    pub fn last_move(&self) -> Move {
        self.history.selected_back(1)
    }

    /// Move played at ply `turn`; `NO_MOVE` outside `1..self.turn()`.
    pub fn previous_move(&self, turn: u32) -> Move {
        if turn < 1 || turn >= self.turn {
            return NO_MOVE;
        }
        self.history.selected_back((self.turn - turn) as usize)
    }

    /// Every ply from the root to the current position, oldest first.
    pub fn played_moves(&self) -> Vec<Move> {
        self.history.line()
    }

    /// Freshly generated pseudo-legal moves of `color`, whether or not it is
    /// the side to move.
    pub fn candidate_moves_for(&self, color: Color) -> Vec<Move> {
        if color == self.player {
            return self.candidate_moves().to_vec();
        }
        let mut out = Vec::with_capacity(64);
        self.generate_into(color, &mut out);
        out
    }

    /// Candidates that do not leave the mover's king attacked.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let count = self.candidate_moves().len();
        let mut out = Vec::with_capacity(count);
        for i in 0..count {
            let mv = self.candidate_moves()[i];
            if self.execute_move(mv) {
                self.undo();
                out.push(mv);
            }
        }
        out
    }

    /// File of a pawn that the side to move may capture en passant.
    pub(crate) fn en_passant_file(&self) -> Option<u8> {
        if self.history.is_root() {
            return self.root_en_passant_file;
        }
        let last = self.last_move();
        if is_double_pawn_push(last) {
            Some(destination_x(last))
        } else {
            None
        }
    }

    /// Whether `color` attacks `(x, y)`.
    #[inline]
    pub fn threatens(&self, color: Color, x: u8, y: u8) -> bool {
        square_attacked_by(self, color, x, y)
    }

    /// Whether the king of `color` is attacked.
    #[inline]
    pub fn check(&self, color: Color) -> bool {
        let (x, y) = self.king_square(color);
        self.threatens(color.opposite(), x, y)
    }

    // --- Draw rules ---

    /// Occurrences of the current position within the reversible window.
    #[inline]
    pub fn draw_repetition_status(&self) -> u32 {
        self.draws.repetitions()
    }

    /// Plies since the last capture or pawn move.
    #[inline]
    pub fn draw_move_rules_status(&self) -> u32 {
        self.draws.halfmove_clock()
    }

    /// Whether the current counters allow a draw claim.
    #[inline]
    pub fn can_claim_draw(&self) -> bool {
        self.draw_move_rules_status() >= CLAIMABLE_MOVE_RULE
            || self.draw_repetition_status() >= CLAIMABLE_REPETITIONS
    }

    /// Draw reason if the position is drawn by rule. Only conclusive when
    /// `status()` reports `Draw`: a checkmate takes precedence.
    pub fn draw_status(&self) -> DrawStatus {
        let moves = self.draw_move_rules_status();
        let repetitions = self.draw_repetition_status();
        if draw_claim(self.last_move()) {
            if moves >= CLAIMABLE_MOVE_RULE {
                return DrawStatus::ClaimedMoveRule;
            }
            if repetitions >= CLAIMABLE_REPETITIONS {
                return DrawStatus::ClaimedRepetition;
            }
        }
        if moves >= AUTOMATIC_MOVE_RULE {
            return DrawStatus::AutomaticMoveRule;
        }
        if repetitions >= AUTOMATIC_REPETITIONS {
            return DrawStatus::AutomaticRepetition;
        }
        DrawStatus::NoDrawPotential
    }

    /// Classify the current position. Probes candidates with execute/undo
    /// and leaves the board unchanged.
    pub fn status(&mut self) -> GameStatus {
        let count = self.candidate_moves().len();
        for i in 0..count {
            let mv = self.candidate_moves()[i];
            if self.execute_move(mv) {
                self.undo();
                if self.draw_status() != DrawStatus::NoDrawPotential {
                    return GameStatus::Draw;
                }
                return if self.check(self.player) {
                    GameStatus::Check
                } else {
                    GameStatus::Normal
                };
            }
        }
        if self.check(self.player) {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    }

    // --- Transitions ---

    /// Execute the candidate from `(x, y)` to `(to_x, to_y)`; pawns reaching
    /// the last rank become queens.
    pub fn execute(&mut self, x: u8, y: u8, to_x: u8, to_y: u8) -> bool {
        self.execute_request(MoveRequest::new(x, y, to_x, to_y))
    }

    /// Execute a user move if, and only if, the game is still running, the
    /// move is a legal candidate and any draw claim attached to it is valid.
    /// On `false` the board is exactly as before.
    pub fn execute_request(&mut self, request: MoveRequest) -> bool {
        if !request.in_bounds() || !self.status().is_ongoing() {
            return false;
        }
        let Some(mv) = self
            .candidate_moves()
            .iter()
            .copied()
            .find(|mv| request.matches(*mv))
        else {
            return false;
        };
        let mv = if request.draw_claim {
            with_draw_claim(mv)
        } else {
            mv
        };
        if !self.execute_move(mv) {
            return false;
        }
        if request.draw_claim && !self.can_claim_draw() {
            self.unwind(true);
            return false;
        }
        true
    }

    /// Claim a draw without moving, if the counters allow it.
    pub fn execute_moveless_draw_claim(&mut self) -> bool {
        self.can_claim_draw()
            && self.status().is_ongoing()
            && self.execute_move(MOVELESS_DRAW_CLAIM)
    }

    /// Execute an encoded candidate of the current position. Rejects it (and
    /// leaves the board unchanged) if it leaves the mover's king attacked.
    ///
    /// Neither the game status nor draw claims are validated; this is the
    /// entry point for search and replay, which only pass moves taken from
    /// `candidate_moves()` or from a trusted history.
    pub fn execute_move(&mut self, mv: Move) -> bool {
        if mv == NO_MOVE {
            return false;
        }
        let moves_piece = is_piece_move(mv);
        if moves_piece {
            self.apply(mv);
        }
        let mover = self.player;
        self.player = mover.opposite();
        self.turn += 1;

        if !self.history.advance(mv) {
            if moves_piece && self.check(mover) {
                trace!("rejected self-check move {mv:#x} at ply {}", self.turn - 1);
                self.unwind(false);
                return false;
            }
            self.compute_candidates();
        }

        if moves_piece {
            let irreversible = figure_moved(mv).is_pawn() || is_capture(mv);
            let key = self.position_key();
            self.draws.push_move(key, irreversible);
        } else {
            self.draws.push_claim();
        }
        true
    }

    /// Take back the last ply and return it; `NO_MOVE` at the initial
    /// position.
    pub fn undo(&mut self) -> Move {
        self.unwind(true)
    }

    /// Pop the current frame. `recorded` tells whether a draw record was
    /// pushed for it; unrecorded frames are rejected moves and drop their
    /// redo cache entry.
    fn unwind(&mut self, recorded: bool) -> Move {
        let popped = if recorded {
            self.history.retreat()
        } else {
            self.history.retreat_rejected()
        };
        let Some(mv) = popped else {
            return NO_MOVE;
        };
        if is_piece_move(mv) {
            self.revert(mv);
        }
        self.player = self.player.opposite();
        self.turn -= 1;
        if recorded {
            self.draws.pop();
        }
        mv
    }

    fn apply(&mut self, mv: Move) {
        let (x, y) = (origin_x(mv) as usize, origin_y(mv) as usize);
        let (to_x, to_y) = (destination_x(mv) as usize, destination_y(mv) as usize);
        let placed = figure_placed(mv);

        self.squares[x][y] = None;
        self.squares[to_x][to_y] = Some(placed);

        if placed.is_king() {
            let owner = placed.owner().index();
            self.kings[owner] = (to_x as u8, to_y as u8);
            if to_x + 2 == x {
                self.squares[3][to_y] = self.squares[0][to_y].take();
                self.castling_done[owner] = true;
            } else if to_x == x + 2 {
                self.squares[5][to_y] = self.squares[7][to_y].take();
                self.castling_done[owner] = true;
            }
        } else if placed.is_pawn() && to_x != x && captured_figure_code(mv) == 0 {
            self.squares[to_x][y] = None;
        }

        self.castling_rights ^= castling_changes(mv);
    }

    fn revert(&mut self, mv: Move) {
        let (x, y) = (origin_x(mv) as usize, origin_y(mv) as usize);
        let (to_x, to_y) = (destination_x(mv) as usize, destination_y(mv) as usize);
        let moved = figure_moved(mv);
        let captured = figure_captured(mv);

        self.squares[x][y] = Some(moved);
        self.squares[to_x][to_y] = captured;

        if moved.is_king() {
            let owner = moved.owner().index();
            self.kings[owner] = (x as u8, y as u8);
            if to_x + 2 == x {
                self.squares[0][to_y] = self.squares[3][to_y].take();
                self.castling_done[owner] = false;
            } else if to_x == x + 2 {
                self.squares[7][to_y] = self.squares[5][to_y].take();
                self.castling_done[owner] = false;
            }
        } else if moved.is_pawn() && to_x != x && captured.is_none() {
            self.squares[to_x][y] = Some(Figure::of(PieceKind::Pawn, moved.owner().opposite()));
        }

        self.castling_rights ^= castling_changes(mv);
    }

    fn generate_into(&self, color: Color, out: &mut Vec<Move>) {
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE {
                if let Some(f) = self.squares[x as usize][y as usize] {
                    if f.owner() == color {
                        f.compute_moves(self, x, y, out);
                    }
                }
            }
        }
    }

    fn compute_candidates(&mut self) {
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();
        self.generate_into(self.player, &mut scratch);
        self.history.clear_candidates();
        self.history.extend_candidates(&scratch);
        self.scratch = scratch;
    }

    fn position_key(&self) -> PositionKey {
        let mut squares = [0u8; 64];
        for (x, file) in self.squares.iter().enumerate() {
            for (y, square) in file.iter().enumerate() {
                squares[x * 8 + y] = square.map_or(0, |f| f.code() as u8);
            }
        }
        let en_passant_file = self
            .candidate_moves()
            .iter()
            .find(|mv| is_en_passant(**mv))
            .map(|mv| destination_x(*mv));
        PositionKey {
            squares,
            player: self.player,
            castling_rights: self.castling_rights,
            en_passant_file,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::notation::parse_long_algebraic;

    fn play(board: &mut Board, line: &[&str]) {
        for lan in line {
            let mv = parse_long_algebraic(board, lan).expect("move should parse");
            assert!(board.execute_move(mv), "{lan} should be legal");
        }
    }

    #[derive(Debug, PartialEq)]
    struct Snapshot {
        grid: Vec<Option<Figure>>,
        kings: [(u8, u8); 2],
        rights: CastlingRights,
        done: [bool; 2],
        player: Color,
        turn: u32,
        candidates: Vec<Move>,
        clock: u32,
        repetitions: u32,
    }

    fn snapshot(board: &Board) -> Snapshot {
        let mut grid = Vec::with_capacity(64);
        for x in 0..8 {
            for y in 0..8 {
                grid.push(board.figure(x, y));
            }
        }
        Snapshot {
            grid,
            kings: [board.king_square(Color::Light), board.king_square(Color::Dark)],
            rights: board.castling_rights(),
            done: [board.castling_done(Color::Light), board.castling_done(Color::Dark)],
            player: board.player(),
            turn: board.turn(),
            candidates: board.candidate_moves().to_vec(),
            clock: board.draw_move_rules_status(),
            repetitions: board.draw_repetition_status(),
        }
    }

    #[test]
    fn initial_position_has_twenty_candidates() {
        let board = Board::new();
        assert_eq!(board.candidate_moves().len(), 20);
        assert_eq!(board.turn(), 1);
        assert_eq!(board.player(), Color::Light);
        assert_eq!(board.king_square(Color::Dark), (4, 7));
        assert_eq!(board.castling_rights(), CASTLE_ALL);
    }

    #[test]
    fn execute_then_undo_restores_every_candidate_position() {
        let fens = [
            STARTING_POSITION_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        ];
        for fen in fens {
            let mut board = Board::from_fen(fen).expect("FEN should parse");
            let before = snapshot(&board);
            let candidates = board.candidate_moves().to_vec();
            for mv in candidates {
                if board.execute_move(mv) {
                    assert_ne!(snapshot(&board), before);
                    assert_eq!(board.undo(), mv);
                }
                assert_eq!(snapshot(&board), before, "move {mv:#x} in {fen}");
            }
        }
    }

    #[test]
    fn undo_at_initial_position_is_a_no_op() {
        let mut board = Board::new();
        assert_eq!(board.undo(), NO_MOVE);
        assert_eq!(board.turn(), 1);
    }

    #[test]
    fn self_check_moves_are_rejected_without_state_change() {
        // The e-file bishop is pinned against the light king.
        let mut board = Board::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1")
            .expect("FEN should parse");
        let before = snapshot(&board);
        assert!(!board.execute(4, 1, 3, 2));
        assert_eq!(snapshot(&board), before);
        // A rejected move is not replayed through the redo cache.
        assert!(!board.execute(4, 1, 5, 2));
        assert!(board.execute(4, 0, 3, 0));
    }

    #[test]
    fn out_of_range_and_unknown_moves_fail() {
        let mut board = Board::new();
        assert!(!board.execute(4, 1, 4, 8));
        assert!(!board.execute(4, 1, 4, 4));
        assert!(!board.execute(4, 6, 4, 4));
        assert_eq!(board.turn(), 1);
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut board = Board::new();
        assert!(board.execute(5, 1, 5, 2));
        assert!(board.execute(4, 6, 4, 4));
        assert!(board.execute(6, 1, 6, 3));
        assert!(board.execute(3, 7, 7, 3));

        assert_eq!(board.player(), Color::Light);
        assert_eq!(board.status(), GameStatus::Checkmate);
        assert!(!board.execute(4, 0, 5, 1));
    }

    #[test]
    fn cornered_king_is_stalemated() {
        let mut board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")
            .expect("FEN should parse");
        assert!(!board.check(Color::Dark));
        assert_eq!(board.status(), GameStatus::Stalemate);
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn check_is_reported() {
        let mut board = Board::new();
        play(&mut board, &["e2e4", "f7f6", "d1h5"]);
        assert_eq!(board.status(), GameStatus::Check);
    }

    #[test]
    fn en_passant_adds_one_capture_and_removes_the_passed_pawn() {
        let mut board = Board::new();
        play(&mut board, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        let en_passant: Vec<Move> = board
            .candidate_moves()
            .iter()
            .copied()
            .filter(|mv| is_en_passant(*mv))
            .collect();
        assert_eq!(en_passant.len(), 1);
        assert_eq!(destination_x(en_passant[0]), 3);
        assert_eq!(destination_y(en_passant[0]), 5);

        assert!(board.execute(4, 4, 3, 5));
        assert_eq!(board.figure(3, 4), None);
        assert_eq!(
            board.figure(3, 5),
            Some(Figure::of(PieceKind::Pawn, Color::Light))
        );

        board.undo();
        assert_eq!(
            board.figure(3, 4),
            Some(Figure::of(PieceKind::Pawn, Color::Dark))
        );
    }

    #[test]
    fn en_passant_expires_after_one_ply() {
        let mut board = Board::new();
        play(&mut board, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"]);
        assert!(!board.candidate_moves().iter().any(|mv| is_en_passant(*mv)));
    }

    #[test]
    fn capturing_an_unmoved_rook_disables_that_castling_right() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        assert!(board.execute(0, 0, 0, 7));
        assert!(!board.castling_allowed(CastlingSide::Queenside, Color::Dark));
        assert!(!board.castling_allowed(CastlingSide::Queenside, Color::Light));
        assert!(board.castling_allowed(CastlingSide::Kingside, Color::Dark));
        assert_eq!(board.status(), GameStatus::Check);

        // Stepping out of check with the king forfeits the remaining right.
        assert!(!board.execute(7, 7, 5, 7));
        assert!(board.execute(4, 7, 4, 6));
        assert!(!board.castling_allowed(CastlingSide::Kingside, Color::Dark));
        assert!(board.castling_allowed(CastlingSide::Kingside, Color::Light));

        board.undo();
        board.undo();
        assert_eq!(board.castling_rights(), CASTLE_ALL);
    }

    #[test]
    fn castling_moves_the_rook_and_is_undone() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        assert!(board.execute(4, 0, 6, 0));
        assert_eq!(
            board.figure(5, 0),
            Some(Figure::of(PieceKind::Rook, Color::Light))
        );
        assert_eq!(board.figure(7, 0), None);
        assert!(board.castling_done(Color::Light));
        assert_eq!(board.king_square(Color::Light), (6, 0));

        assert!(board.execute(4, 7, 2, 7));
        assert_eq!(
            board.figure(3, 7),
            Some(Figure::of(PieceKind::Rook, Color::Dark))
        );

        board.undo();
        board.undo();
        assert!(!board.castling_done(Color::Light));
        assert_eq!(
            board.figure(7, 0),
            Some(Figure::of(PieceKind::Rook, Color::Light))
        );
        assert_eq!(board.castling_rights(), CASTLE_ALL);
    }

    #[test]
    fn castling_through_an_attacked_square_is_not_generated() {
        let board = Board::from_fen("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1")
            .expect("FEN should parse");
        let castles: Vec<u8> = board
            .candidate_moves()
            .iter()
            .copied()
            .filter(|mv| is_castling(*mv))
            .map(destination_x)
            .collect();
        assert_eq!(castles, vec![2]);
    }

    #[test]
    fn promotion_defaults_to_queen_and_honours_requests() {
        let mut board = Board::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        assert!(board.execute(1, 6, 1, 7));
        assert_eq!(
            board.figure(1, 7),
            Some(Figure::of(PieceKind::Queen, Color::Light))
        );
        board.undo();

        assert!(board.execute_request(MoveRequest::new(1, 6, 1, 7).promote_to(PieceKind::Knight)));
        assert_eq!(
            board.figure(1, 7),
            Some(Figure::of(PieceKind::Knight, Color::Light))
        );
        board.undo();
        assert_eq!(
            board.figure(1, 6),
            Some(Figure::of(PieceKind::Pawn, Color::Light))
        );
    }

    #[test]
    fn previous_moves_and_line_follow_history() {
        let mut board = Board::new();
        play(&mut board, &["e2e4", "e7e5", "g1f3"]);
        let line = board.played_moves();
        assert_eq!(line.len(), 3);
        assert_eq!(board.previous_move(1), line[0]);
        assert_eq!(board.previous_move(3), line[2]);
        assert_eq!(board.previous_move(4), NO_MOVE);
        assert_eq!(board.previous_move(0), NO_MOVE);
        assert_eq!(board.last_move(), line[2]);
        assert_eq!(board.move_number(), 2);
        assert_eq!(Board::move_number_of(3), 2);
    }

    #[test]
    fn threefold_repetition_can_be_claimed_without_moving() {
        let mut board = Board::new();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        assert!(!board.execute_moveless_draw_claim());
        play(&mut board, &shuffle);
        play(&mut board, &shuffle);
        assert_eq!(board.draw_repetition_status(), 3);

        let turn = board.turn();
        assert!(board.execute_moveless_draw_claim());
        assert_eq!(board.turn(), turn + 1);
        assert_eq!(board.draw_status(), DrawStatus::ClaimedRepetition);
        assert_eq!(board.status(), GameStatus::Draw);

        assert_eq!(board.undo(), MOVELESS_DRAW_CLAIM);
        assert_eq!(board.status(), GameStatus::Normal);
    }

    #[test]
    fn fivefold_repetition_ends_the_game() {
        let mut board = Board::new();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        for _ in 0..3 {
            play(&mut board, &shuffle);
        }
        assert_eq!(board.draw_repetition_status(), 4);
        assert_eq!(board.draw_status(), DrawStatus::NoDrawPotential);

        play(&mut board, &shuffle);
        assert_eq!(board.draw_repetition_status(), AUTOMATIC_REPETITIONS);
        assert_eq!(board.draw_status(), DrawStatus::AutomaticRepetition);
        assert_eq!(board.status(), GameStatus::Draw);
        assert!(!board.execute(6, 0, 5, 2));
        assert_eq!(board.turn(), 17);
    }

    #[test]
    fn invalid_draw_claims_leave_the_board_untouched() {
        let mut board = Board::new();
        let before = snapshot(&board);
        assert!(!board.execute_request(MoveRequest::new(4, 1, 4, 3).claim_draw()));
        assert_eq!(snapshot(&board), before);
        assert!(board.execute(4, 1, 4, 3));
    }

    #[test]
    fn move_rule_claim_and_automatic_draw() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 49 80")
            .expect("FEN should parse");
        assert!(!board.can_claim_draw());
        assert!(board.execute_request(MoveRequest::new(0, 0, 0, 1).claim_draw()));
        assert_eq!(board.draw_status(), DrawStatus::ClaimedMoveRule);
        assert_eq!(board.status(), GameStatus::Draw);

        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 74 80")
            .expect("FEN should parse");
        assert!(board.execute(0, 0, 0, 1));
        assert_eq!(board.draw_status(), DrawStatus::AutomaticMoveRule);
        assert_eq!(board.status(), GameStatus::Draw);
        assert!(!board.execute(4, 7, 4, 6));
    }

    #[test]
    fn fork_is_independent() {
        let mut board = Board::new();
        let fork = board.fork();
        assert!(board.execute(4, 1, 4, 3));
        assert_eq!(fork.turn(), 1);
        assert_eq!(
            fork.figure(4, 1),
            Some(Figure::of(PieceKind::Pawn, Color::Light))
        );
        assert_eq!(fork.candidate_moves().len(), 20);
    }

    #[test]
    fn candidate_moves_for_the_waiting_side() {
        let mut board = Board::new();
        play(&mut board, &["e2e4"]);
        assert_eq!(board.candidate_moves_for(Color::Dark).len(), 20);
        assert_eq!(board.candidate_moves_for(Color::Light).len(), 30);
    }
}
