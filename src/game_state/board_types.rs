//! Shared board vocabulary for both rule variants.
//!
//! Everything here is a small `Copy` value: colors, squares, pieces, moves and
//! the fixed 8x8 grid that owns them. Piece kinds are variant specific, so the
//! grid and the piece type are generic over a `PieceKind`.

use std::fmt;

use crate::errors::{EngineError, EngineResult};

pub const BOARD_SIZE: u8 = 8;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a forward step. White starts at the bottom (rows 5..=7).
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Farthest row from this color's side of the board.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => BOARD_SIZE - 1,
        }
    }

    /// Row this color's back pieces start on.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::White => BOARD_SIZE - 1,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// A square on the board. Construction validates bounds, so every `Square`
/// in circulation is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> EngineResult<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Self { row, col })
        } else {
            Err(EngineError::OutOfBounds { row, col })
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Dark squares are the playable squares in checkers.
    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Square reached by stepping `(dr, dc)`, or `None` when it leaves the board.
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// A variant-specific piece kind.
pub trait PieceKind: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Pieces of this variant may only stand on dark squares.
    const DARK_SQUARES_ONLY: bool = false;

    /// Glyph used in text diagrams for a piece of this kind and `color`.
    fn glyph(self, color: Color) -> char;

    fn from_glyph(ch: char) -> Option<(Color, Self)>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChessKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind for ChessKind {
    fn glyph(self, color: Color) -> char {
        let ch = match self {
            ChessKind::Pawn => 'p',
            ChessKind::Knight => 'n',
            ChessKind::Bishop => 'b',
            ChessKind::Rook => 'r',
            ChessKind::Queen => 'q',
            ChessKind::King => 'k',
        };
        match color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    fn from_glyph(ch: char) -> Option<(Color, Self)> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match ch.to_ascii_lowercase() {
            'p' => ChessKind::Pawn,
            'n' => ChessKind::Knight,
            'b' => ChessKind::Bishop,
            'r' => ChessKind::Rook,
            'q' => ChessKind::Queen,
            'k' => ChessKind::King,
            _ => return None,
        };
        Some((color, kind))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckersKind {
    Man,
    King,
}

impl PieceKind for CheckersKind {
    const DARK_SQUARES_ONLY: bool = true;

    // Checkers glyphs name the color rather than the kind: w/b men, W/B kings.
    fn glyph(self, color: Color) -> char {
        match (color, self) {
            (Color::White, CheckersKind::Man) => 'w',
            (Color::White, CheckersKind::King) => 'W',
            (Color::Black, CheckersKind::Man) => 'b',
            (Color::Black, CheckersKind::King) => 'B',
        }
    }

    fn from_glyph(ch: char) -> Option<(Color, Self)> {
        match ch {
            'w' => Some((Color::White, CheckersKind::Man)),
            'W' => Some((Color::White, CheckersKind::King)),
            'b' => Some((Color::Black, CheckersKind::Man)),
            'B' => Some((Color::Black, CheckersKind::King)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece<K> {
    pub color: Color,
    pub kind: K,
}

impl<K> Piece<K> {
    #[inline]
    pub const fn new(color: Color, kind: K) -> Self {
        Self { color, kind }
    }
}

/// Fixed 8x8 grid, at most one piece per square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<K> {
    squares: [[Option<Piece<K>>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl<K: PieceKind> Default for Board<K> {
    fn default() -> Self {
        Self {
            squares: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }
}

impl<K: PieceKind> Board<K> {
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece<K>> {
        self.squares[sq.row as usize][sq.col as usize]
    }

    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece<K>>) {
        self.squares[sq.row as usize][sq.col as usize] = piece;
    }

    #[inline]
    pub fn put(&mut self, sq: Square, piece: Piece<K>) {
        self.set(sq, Some(piece));
    }

    /// Remove and return whatever stands on `sq`.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece<K>> {
        self.squares[sq.row as usize][sq.col as usize].take()
    }

    /// Occupied squares holding a piece of `color`, row-major.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece<K>)> + '_ {
        Square::all().filter_map(move |sq| match self.get(sq) {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces(color).count()
    }

    pub fn count_kind(&self, color: Color, kind: K) -> usize {
        self.pieces(color).filter(|(_, p)| p.kind == kind).count()
    }
}

/// One from/to step. A checkers multi-jump is a sequence of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Chess,
    Checkers,
}

impl Variant {
    /// Search depth in plies at full strength.
    #[inline]
    pub const fn base_depth(self) -> u8 {
        match self {
            Variant::Chess => 4,
            Variant::Checkers => 5,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Chess => write!(f, "chess"),
            Variant::Checkers => write!(f, "checkers"),
        }
    }
}
