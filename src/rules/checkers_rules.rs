//! Checkers-like rule engine.
//!
//! Capturing is mandatory: while any piece of the side to move can capture,
//! `forced_capture` is set and only capture destinations are legal. A piece
//! that lands a capture and can capture again keeps the turn; its square is
//! held in `capture_chain` and it is the only piece allowed to move. A side
//! with no pieces or no legal move has lost.

use tracing::trace;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::board_types::{Board, CheckersKind, Color, Move, Piece, Square, Variant};
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::MoveRecord;
use crate::rules::checkers_moves::{
    captured_square, color_has_capture, has_jump, is_quiet_move, piece_destinations,
};
use crate::rules::rule_engine::RuleEngine;

pub type CheckersState = GameState<CheckersKind>;

/// Rows each side fills at the start.
const BLACK_START_ROWS: std::ops::Range<u8> = 0..3;
const WHITE_START_ROWS: std::ops::Range<u8> = 5..8;

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckersRules;

impl CheckersRules {
    pub fn starting_board() -> Board<CheckersKind> {
        let mut board = Board::empty();
        for sq in Square::all().filter(|sq| sq.is_dark()) {
            if BLACK_START_ROWS.contains(&sq.row()) {
                board.put(sq, Piece::new(Color::Black, CheckersKind::Man));
            } else if WHITE_START_ROWS.contains(&sq.row()) {
                board.put(sq, Piece::new(Color::White, CheckersKind::Man));
            }
        }
        board
    }

    /// Whether `from` may move at all in this state: right color, and the
    /// chaining piece if a multi-jump is in progress.
    fn may_move_from(state: &CheckersState, from: Square) -> bool {
        let owned = state
            .board
            .get(from)
            .is_some_and(|piece| piece.color == state.current_player);
        owned && state.capture_chain.map_or(true, |chain| chain == from)
    }
}

impl RuleEngine for CheckersRules {
    type Kind = CheckersKind;

    const VARIANT: Variant = Variant::Checkers;

    fn initialize(&self, state: &mut CheckersState) {
        *state = GameState::with_board(Self::starting_board(), Color::White);
    }

    fn position(&self, board: Board<CheckersKind>, to_move: Color) -> CheckersState {
        let mut state = GameState::with_board(board, to_move);
        state.forced_capture = color_has_capture(&state.board, to_move);
        state
    }

    fn is_legal(&self, state: &CheckersState, from: Square, to: Square) -> bool {
        if !Self::may_move_from(state, from) {
            return false;
        }
        if !state.board.is_empty_at(to) || !to.is_dark() {
            return false;
        }

        let is_capture = captured_square(&state.board, from, to).is_some();
        if state.forced_capture {
            return is_capture;
        }
        is_capture || is_quiet_move(&state.board, from, to)
    }

    fn legal_destinations(&self, state: &CheckersState, from: Square) -> Vec<Square> {
        let mut out = Vec::new();
        if Self::may_move_from(state, from) {
            piece_destinations(&state.board, from, state.forced_capture, &mut out);
        }
        out
    }

    fn apply(
        &self,
        state: &mut CheckersState,
        from: Square,
        to: Square,
    ) -> EngineResult<MoveRecord<CheckersKind>> {
        let mv = Move::new(from, to);
        if !self.is_legal(state, from, to) {
            return Err(EngineError::InvalidMove { mv });
        }

        let jumped = captured_square(&state.board, from, to);
        let moved = state
            .board
            .take(from)
            .ok_or(EngineError::InvalidMove { mv })?;
        let mover = state.current_player;

        let captured = jumped.and_then(|sq| state.board.take(sq).map(|piece| (sq, piece)));
        if let Some((_, piece)) = captured {
            state.captured_by_mut(mover).push(piece);
        }

        let promoted = moved.kind == CheckersKind::Man && to.row() == mover.promotion_row();
        let placed = if promoted {
            Piece::new(mover, CheckersKind::King)
        } else {
            moved
        };
        state.board.put(to, placed);

        let record = MoveRecord {
            mv,
            moved,
            captured,
            promoted,
            prev_player: mover,
            prev_forced_capture: state.forced_capture,
            prev_capture_chain: state.capture_chain,
        };
        state.move_history.push(record);

        if captured.is_some() && has_jump(&state.board, to) {
            state.forced_capture = true;
            state.capture_chain = Some(to);
        } else {
            state.current_player = mover.opposite();
            state.capture_chain = None;
            state.forced_capture = color_has_capture(&state.board, state.current_player);
        }

        trace!(
            %mv,
            capture = captured.is_some(),
            promoted,
            chain = state.capture_chain.is_some(),
            "checkers move applied"
        );
        Ok(record)
    }

    fn undo(&self, state: &mut CheckersState) -> bool {
        let Some(record) = state.move_history.pop() else {
            return false;
        };

        state.board.set(record.mv.to, None);
        state.board.put(record.mv.from, record.moved);
        if let Some((square, piece)) = record.captured {
            state.board.put(square, piece);
            state.captured_by_mut(record.prev_player).pop();
        }

        state.current_player = record.prev_player;
        state.forced_capture = record.prev_forced_capture;
        state.capture_chain = record.prev_capture_chain;
        true
    }

    fn winner(&self, state: &CheckersState) -> Option<Color> {
        if state.board.count(Color::White) == 0 {
            return Some(Color::Black);
        }
        if state.board.count(Color::Black) == 0 {
            return Some(Color::White);
        }
        if !self.has_legal_move(state) {
            return Some(state.current_player.opposite());
        }
        None
    }
}
