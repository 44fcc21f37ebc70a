//! Rule-engine contract shared by both variants.
//!
//! The search only talks to this trait, so it never needs to know which game
//! it is playing. Implementations are stateless: all mutable data lives in the
//! `GameState` passed in.

use crate::errors::EngineResult;
use crate::game_state::board_types::{Board, Color, Move, PieceKind, Square, Variant};
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::MoveRecord;

pub trait RuleEngine: Send + Sync {
    type Kind: PieceKind;

    const VARIANT: Variant;

    /// Reset `state` to the standard starting position with empty history.
    fn initialize(&self, state: &mut GameState<Self::Kind>);

    /// Build a state from an arbitrary board, recomputing derived flags.
    fn position(&self, board: Board<Self::Kind>, to_move: Color) -> GameState<Self::Kind>;

    fn is_legal(&self, state: &GameState<Self::Kind>, from: Square, to: Square) -> bool;

    /// Every `to` for which `is_legal(state, from, to)` holds.
    fn legal_destinations(&self, state: &GameState<Self::Kind>, from: Square) -> Vec<Square>;

    /// Play `from -> to`, returning the record that reverses it. Illegal moves
    /// fail with `EngineError::InvalidMove` and leave `state` untouched.
    fn apply(
        &self,
        state: &mut GameState<Self::Kind>,
        from: Square,
        to: Square,
    ) -> EngineResult<MoveRecord<Self::Kind>>;

    /// Reverse the most recent move. Returns `false` when there is nothing to undo.
    fn undo(&self, state: &mut GameState<Self::Kind>) -> bool;

    fn winner(&self, state: &GameState<Self::Kind>) -> Option<Color>;

    fn new_game(&self) -> GameState<Self::Kind> {
        let mut state = GameState::new_empty();
        self.initialize(&mut state);
        state
    }

    /// All legal moves for the side to move, grouped by origin in row-major order.
    fn legal_moves(&self, state: &GameState<Self::Kind>) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for (from, _) in state.board.pieces(state.current_player) {
            for to in self.legal_destinations(state, from) {
                moves.push(Move::new(from, to));
            }
        }
        moves
    }

    fn has_legal_move(&self, state: &GameState<Self::Kind>) -> bool {
        state
            .board
            .pieces(state.current_player)
            .any(|(from, _)| !self.legal_destinations(state, from).is_empty())
    }

    fn apply_move(
        &self,
        state: &mut GameState<Self::Kind>,
        mv: Move,
    ) -> EngineResult<MoveRecord<Self::Kind>> {
        self.apply(state, mv.from, mv.to)
    }
}
