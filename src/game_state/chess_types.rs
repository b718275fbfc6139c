//! Core value types shared by the board, move codec, and search.
//!
//! The twelve `Figure` values (six kinds times two owners) live in a static
//! table and are addressed by a 4-bit code, which is how they are stored
//! inside encoded moves and position keys.

use crate::game_state::board::Board;
use crate::moves::figure_moves::generate_figure_moves;
use crate::moves::move_descriptions::Move;

/// Side to move. `Light` always opens the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank holding the king and rooks at the start of the game.
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    /// Rank holding the pawns at the start of the game.
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => 6,
        }
    }

    /// Rank a pawn of this color promotes on.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        self.opposite().home_rank()
    }

    /// Rank on which this color's pawns may capture en passant.
    #[inline]
    pub const fn en_passant_rank(self) -> u8 {
        match self {
            Color::Light => 4,
            Color::Dark => 3,
        }
    }

    /// Rank direction pawns of this color advance in.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }
}

/// Piece kind. Discriminants follow the figure codes used by the move codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// Kinds a pawn may promote to, in the order candidates are generated.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Rook => 1,
            PieceKind::Knight => 2,
            PieceKind::Bishop => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Material units used by the evaluator. The king is never captured, its
    /// value only balances the sum.
    #[inline]
    pub const fn material_value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Rook => 5,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Queen => 9,
            PieceKind::King => 10,
        }
    }

    /// Upper-case letter used by FEN and move notation.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'R' => Some(PieceKind::Rook),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// One of the twelve immutable piece values.
///
/// Construct through [`Figure::of`]; every value equals one entry of
/// [`FIGURES`], so value equality and identity coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Figure {
    kind: PieceKind,
    owner: Color,
    code: u8,
}

const fn figure(kind: PieceKind, owner: Color) -> Figure {
    Figure {
        kind,
        owner,
        code: (kind.index() + 1 + owner.index() * 6) as u8,
    }
}

/// The twelve figures ordered by code (`FIGURES[code - 1]`).
pub static FIGURES: [Figure; 12] = [
    figure(PieceKind::Pawn, Color::Light),
    figure(PieceKind::Rook, Color::Light),
    figure(PieceKind::Knight, Color::Light),
    figure(PieceKind::Bishop, Color::Light),
    figure(PieceKind::Queen, Color::Light),
    figure(PieceKind::King, Color::Light),
    figure(PieceKind::Pawn, Color::Dark),
    figure(PieceKind::Rook, Color::Dark),
    figure(PieceKind::Knight, Color::Dark),
    figure(PieceKind::Bishop, Color::Dark),
    figure(PieceKind::Queen, Color::Dark),
    figure(PieceKind::King, Color::Dark),
];

impl Figure {
    #[inline]
    pub fn of(kind: PieceKind, owner: Color) -> Figure {
        FIGURES[kind.index() + owner.index() * 6]
    }

    /// Figure for a code in `1..=12`, `None` for `0` or anything larger.
    #[inline]
    pub fn from_code(code: u32) -> Option<Figure> {
        match code {
            1..=12 => Some(FIGURES[code as usize - 1]),
            _ => None,
        }
    }

    /// Figure for a code known to be valid. A corrupt code is a defect and
    /// aborts through the table index.
    #[inline]
    pub(crate) fn from_valid_code(code: u32) -> Figure {
        FIGURES[(code as usize).wrapping_sub(1)]
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn owner(self) -> Color {
        self.owner
    }

    #[inline]
    pub const fn code(self) -> u32 {
        self.code as u32
    }

    #[inline]
    pub fn is_pawn(self) -> bool {
        self.kind == PieceKind::Pawn
    }

    #[inline]
    pub fn is_rook(self) -> bool {
        self.kind == PieceKind::Rook
    }

    #[inline]
    pub fn is_knight(self) -> bool {
        self.kind == PieceKind::Knight
    }

    #[inline]
    pub fn is_bishop(self) -> bool {
        self.kind == PieceKind::Bishop
    }

    #[inline]
    pub fn is_queen(self) -> bool {
        self.kind == PieceKind::Queen
    }

    #[inline]
    pub fn is_king(self) -> bool {
        self.kind == PieceKind::King
    }

    /// FEN letter: upper case for light, lower case for dark.
    pub fn fen_char(self) -> char {
        match self.owner {
            Color::Light => self.kind.letter(),
            Color::Dark => self.kind.letter().to_ascii_lowercase(),
        }
    }

    /// Append this figure's pseudo-legal moves from `(x, y)` to `out`.
    #[inline]
    pub fn compute_moves(self, board: &Board, x: u8, y: u8, out: &mut Vec<Move>) {
        generate_figure_moves(self, board, x, y, out);
    }
}

/// Which rook a castling right refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingSide {
    Queenside,
    Kingside,
}

/// Castling-rights bitmask (see the `CASTLE_*` constants).
pub type CastlingRights = u8;

pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights = 0xF;

/// Bit of the right `side` for `color`.
#[inline]
pub const fn castling_bit(side: CastlingSide, color: Color) -> CastlingRights {
    let side_offset = match side {
        CastlingSide::Queenside => 0,
        CastlingSide::Kingside => 1,
    };
    1 << (side_offset + 2 * color.index())
}

/// Outcome classification of the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

impl GameStatus {
    /// True while the side to move may still play.
    #[inline]
    pub fn is_ongoing(self) -> bool {
        matches!(self, GameStatus::Normal | GameStatus::Check)
    }
}

/// Reason for a draw, if the current position is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStatus {
    NoDrawPotential,
    AutomaticRepetition,
    AutomaticMoveRule,
    ClaimedRepetition,
    ClaimedMoveRule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figure_table_is_consistent_with_codes() {
        for (i, figure) in FIGURES.iter().enumerate() {
            assert_eq!(figure.code() as usize, i + 1);
            assert_eq!(Figure::from_code(figure.code()), Some(*figure));
            assert_eq!(Figure::of(figure.kind(), figure.owner()), *figure);
        }
        assert_eq!(Figure::from_code(0), None);
        assert_eq!(Figure::from_code(13), None);
    }

    #[test]
    fn castling_bits_match_constants() {
        assert_eq!(
            castling_bit(CastlingSide::Queenside, Color::Light),
            CASTLE_LIGHT_QUEENSIDE
        );
        assert_eq!(
            castling_bit(CastlingSide::Kingside, Color::Light),
            CASTLE_LIGHT_KINGSIDE
        );
        assert_eq!(
            castling_bit(CastlingSide::Queenside, Color::Dark),
            CASTLE_DARK_QUEENSIDE
        );
        assert_eq!(
            castling_bit(CastlingSide::Kingside, Color::Dark),
            CASTLE_DARK_KINGSIDE
        );
    }

    #[test]
    fn fen_chars_follow_owner_case() {
        assert_eq!(Figure::of(PieceKind::Knight, Color::Light).fen_char(), 'N');
        assert_eq!(Figure::of(PieceKind::Queen, Color::Dark).fen_char(), 'q');
    }
}
