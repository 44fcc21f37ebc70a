//! Mutable game state shared by both rule variants.
//!
//! `GameState` is the unit of ownership handed to rule engines and to the
//! search. It is mutated in place by apply/undo, so every field that apply
//! touches is either restored from a `MoveRecord` or recomputed on undo.

use crate::game_state::board_types::{Board, Color, Piece, PieceKind, Square};
use crate::game_state::move_record::MoveRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState<K> {
    pub board: Board<K>,
    pub current_player: Color,

    // --- Make/unmake stack ---
    pub move_history: Vec<MoveRecord<K>>,

    // --- Captures, in capture order ---
    pub captured_by_white: Vec<Piece<K>>,
    pub captured_by_black: Vec<Piece<K>>,

    // --- Checkers-only flags ---
    pub forced_capture: bool,
    pub capture_chain: Option<Square>,
}

impl<K: PieceKind> Default for GameState<K> {
    fn default() -> Self {
        Self {
            board: Board::empty(),
            current_player: Color::White,
            move_history: Vec::new(),
            captured_by_white: Vec::new(),
            captured_by_black: Vec::new(),
            forced_capture: false,
            capture_chain: None,
        }
    }
}

impl<K: PieceKind> GameState<K> {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// State with `board` on it and `to_move` to play, no history.
    ///
    /// Derived flags are left cleared; use `RuleEngine::position` to get a
    /// state whose flags match the board.
    pub fn with_board(board: Board<K>, to_move: Color) -> Self {
        Self {
            board,
            current_player: to_move,
            ..Self::default()
        }
    }

    #[inline]
    pub fn ply(&self) -> usize {
        self.move_history.len()
    }

    #[inline]
    pub fn last_record(&self) -> Option<&MoveRecord<K>> {
        self.move_history.last()
    }

    /// Pieces taken by `color` so far.
    #[inline]
    pub fn captured_by(&self, color: Color) -> &[Piece<K>] {
        match color {
            Color::White => &self.captured_by_white,
            Color::Black => &self.captured_by_black,
        }
    }

    #[inline]
    pub(crate) fn captured_by_mut(&mut self, color: Color) -> &mut Vec<Piece<K>> {
        match color {
            Color::White => &mut self.captured_by_white,
            Color::Black => &mut self.captured_by_black,
        }
    }
}
