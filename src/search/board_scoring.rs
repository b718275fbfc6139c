//! Pluggable board evaluation interfaces and the baseline heuristic.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.

use rand::seq::IndexedRandom;

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{origin_x, origin_y, Move};

pub trait BoardScorer: Send + Sync {
    /// Score of `board` from `color`'s perspective.
    fn score(&self, board: &Board, color: Color) -> i32;
}

/// Signed material sum, nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    pub fn material(board: &Board, color: Color) -> i32 {
        let mut score = 0i32;
        for x in 0..8 {
            for y in 0..8 {
                if let Some(figure) = board.figure(x, y) {
                    let value = figure.kind().material_value();
                    score += if figure.owner() == color { value } else { -value };
                }
            }
        }
        score
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board, color: Color) -> i32 {
        Self::material(board, color)
    }
}

pub const MATERIAL_WEIGHT: i32 = 15;
pub const PAWN_FORMATION_WEIGHT: i32 = 3;
pub const DEVELOPMENT_WEIGHT: i32 = 2;
pub const MOBILITY_WEIGHT: i32 = 1;

const RANDOM_SHIFTS: [i32; 11] = [0, 0, 0, 0, 0, 5, 5, 5, 10, 10, 20];

const DOUBLED_PAWN_PENALTY: i32 = 2;
const ISOLATED_PAWN_PENALTY: i32 = 7;
const BREACHED_PAWN_BONUS: i32 = 12;

const CASTLED_BONUS: i32 = 10;
const ONE_RIGHT_LOST_PENALTY: i32 = 5;
const BOTH_RIGHTS_LOST_PENALTY: i32 = 12;
const UNMOVED_CENTRE_PAWN_PENALTY: i32 = 4;
const UNMOVED_FLANK_PAWN_PENALTY: i32 = 3;

/// Bonus or penalty by number of candidate moves of one figure.
const MOBILITY_TABLE_LEN: usize = 28;

const fn mobility_table(kind: PieceKind) -> [i32; MOBILITY_TABLE_LEN] {
    let mut table = [0i32; MOBILITY_TABLE_LEN];
    let mut n = 0usize;
    while n < MOBILITY_TABLE_LEN {
        table[n] = match kind {
            PieceKind::Rook => match n {
                6..=8 => 3,
                9..=11 => 8,
                12..=14 => 14,
                _ => 0,
            },
            PieceKind::Knight => match n {
                0..=8 => 2 * n as i32,
                _ => 0,
            },
            PieceKind::Bishop => match n {
                0..=3 => -10,
                4..=6 => -6,
                7..=9 => -2,
                _ => 0,
            },
            PieceKind::Queen => match n {
                0..=7 => -15,
                8..=13 => -6,
                _ => 0,
            },
            PieceKind::Pawn | PieceKind::King => 0,
        };
        n += 1;
    }
    table
}

static MOBILITY_TABLES: [[i32; MOBILITY_TABLE_LEN]; 6] = [
    mobility_table(PieceKind::Pawn),
    mobility_table(PieceKind::Rook),
    mobility_table(PieceKind::Knight),
    mobility_table(PieceKind::Bishop),
    mobility_table(PieceKind::Queen),
    mobility_table(PieceKind::King),
];

/// Unweighted criteria of one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationBreakdown {
    pub material: i32,
    pub pawn_formation: i32,
    pub development: i32,
    pub mobility: i32,
}

impl EvaluationBreakdown {
    pub fn weighted(&self) -> i32 {
        MATERIAL_WEIGHT * self.material
            + PAWN_FORMATION_WEIGHT * self.pawn_formation
            + DEVELOPMENT_WEIGHT * self.development
            + MOBILITY_WEIGHT * self.mobility
    }
}

/// Material, pawn formation, development and mobility, plus a small random
/// shift that varies otherwise tied choices.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    jitter: bool,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self { jitter: true }
    }

    /// Evaluator without the random shift, for reproducible searches.
    pub fn deterministic() -> Self {
        Self { jitter: false }
    }

    pub fn breakdown(&self, board: &Board, color: Color) -> EvaluationBreakdown {
        let (material, pawns) = material_and_pawn_files(board, color);
        EvaluationBreakdown {
            material,
            pawn_formation: pawn_formation(&pawns),
            development: development(board, color),
            mobility: mobility(board, color),
        }
    }

    fn random_shift(&self) -> i32 {
        if !self.jitter {
            return 0;
        }
        RANDOM_SHIFTS.choose(&mut rand::rng()).copied().unwrap_or(0)
    }
}

impl BoardScorer for Evaluator {
    fn score(&self, board: &Board, color: Color) -> i32 {
        self.breakdown(board, color).weighted() + self.random_shift()
    }
}

/// Pawn counts per file, `[own, opponent]`.
type PawnFiles = [[i32; 8]; 2];

fn material_and_pawn_files(board: &Board, color: Color) -> (i32, PawnFiles) {
    let mut material = 0;
    let mut pawns: PawnFiles = [[0; 8]; 2];
    for x in 0..8u8 {
        for y in 0..8u8 {
            let Some(figure) = board.figure(x, y) else {
                continue;
            };
            let side = usize::from(figure.owner() != color);
            let value = figure.kind().material_value();
            material += if side == 0 { value } else { -value };
            if figure.is_pawn() {
                pawns[side][x as usize] += 1;
            }
        }
    }
    (material, pawns)
}

fn pawn_formation(pawns: &PawnFiles) -> i32 {
    let file = |side: usize, x: isize| -> i32 {
        if (0..8).contains(&x) {
            pawns[side][x as usize]
        } else {
            0
        }
    };

    let mut score = 0;
    for x in 0..8isize {
        let own = file(0, x);
        if own == 0 {
            continue;
        }
        score -= (own - 1) * DOUBLED_PAWN_PENALTY;
        if file(0, x - 1) == 0 && file(0, x + 1) == 0 {
            score -= ISOLATED_PAWN_PENALTY;
        }
        if file(1, x - 1) == 0 && file(1, x + 1) == 0 {
            score += BREACHED_PAWN_BONUS;
        }
    }
    score
}

fn development(board: &Board, color: Color) -> i32 {
    let mut score = if board.castling_done(color) {
        CASTLED_BONUS
    } else {
        let queenside = board.castling_allowed(CastlingSide::Queenside, color);
        let kingside = board.castling_allowed(CastlingSide::Kingside, color);
        match (queenside, kingside) {
            (true, true) => 0,
            (true, false) | (false, true) => -ONE_RIGHT_LOST_PENALTY,
            (false, false) => -BOTH_RIGHTS_LOST_PENALTY,
        }
    };

    let own_pawn = Some(Figure::of(PieceKind::Pawn, color));
    let rank = color.pawn_rank();
    for (x, penalty) in [
        (3, UNMOVED_CENTRE_PAWN_PENALTY),
        (4, UNMOVED_CENTRE_PAWN_PENALTY),
        (2, UNMOVED_FLANK_PAWN_PENALTY),
        (5, UNMOVED_FLANK_PAWN_PENALTY),
    ] {
        if board.figure(x, rank) == own_pawn {
            score -= penalty;
        }
    }
    score
}

/// Candidates are counted per origin square; a figure without any scores
/// the zero-move entry of its table.
fn mobility(board: &Board, color: Color) -> i32 {
    let fresh;
    let moves: &[Move] = if color == board.player() {
        board.candidate_moves()
    } else {
        fresh = board.candidate_moves_for(color);
        &fresh
    };
    let mut counts = [[0usize; 8]; 8];
    for &mv in moves {
        counts[origin_x(mv) as usize][origin_y(mv) as usize] += 1;
    }

    let mut score = 0;
    for x in 0..8u8 {
        for y in 0..8u8 {
            if let Some(figure) = board.figure(x, y) {
                if figure.owner() == color {
                    let n = counts[x as usize][y as usize].min(MOBILITY_TABLE_LEN - 1);
                    score += MOBILITY_TABLES[figure.kind().index()][n];
                }
            }
        }
    }
    score
}
