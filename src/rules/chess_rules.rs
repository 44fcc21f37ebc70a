//! Chess-like rule engine.
//!
//! Movement follows standard piece geometry with automatic queen promotion.
//! There is no check detection, castling or en passant: a move that leaves
//! the mover's king attacked is legal, and the game ends the moment a king
//! is captured.

use tracing::trace;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::board_types::{Board, ChessKind, Color, Move, Piece, Square, Variant};
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::MoveRecord;
use crate::rules::chess_moves::{generate_destinations, geometry_allows};
use crate::rules::rule_engine::RuleEngine;

pub type ChessState = GameState<ChessKind>;

const BACK_RANK: [ChessKind; 8] = [
    ChessKind::Rook,
    ChessKind::Knight,
    ChessKind::Bishop,
    ChessKind::Queen,
    ChessKind::King,
    ChessKind::Bishop,
    ChessKind::Knight,
    ChessKind::Rook,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ChessRules;

impl ChessRules {
    pub fn starting_board() -> Board<ChessKind> {
        let mut board = Board::empty();
        for (col, kind) in BACK_RANK.iter().copied().enumerate() {
            let col = col as u8;
            for color in [Color::White, Color::Black] {
                let pawn_row = match color {
                    Color::White => color.home_row() - 1,
                    Color::Black => color.home_row() + 1,
                };
                if let (Ok(back), Ok(pawn)) =
                    (Square::new(color.home_row(), col), Square::new(pawn_row, col))
                {
                    board.put(back, Piece::new(color, kind));
                    board.put(pawn, Piece::new(color, ChessKind::Pawn));
                }
            }
        }
        board
    }

    fn has_king(board: &Board<ChessKind>, color: Color) -> bool {
        board
            .pieces(color)
            .any(|(_, piece)| piece.kind == ChessKind::King)
    }
}

impl RuleEngine for ChessRules {
    type Kind = ChessKind;

    const VARIANT: Variant = Variant::Chess;

    fn initialize(&self, state: &mut ChessState) {
        *state = GameState::with_board(Self::starting_board(), Color::White);
    }

    fn position(&self, board: Board<ChessKind>, to_move: Color) -> ChessState {
        GameState::with_board(board, to_move)
    }

    fn is_legal(&self, state: &ChessState, from: Square, to: Square) -> bool {
        match state.board.get(from) {
            Some(piece) if piece.color == state.current_player => {
                geometry_allows(&state.board, from, to)
            }
            _ => false,
        }
    }

    fn legal_destinations(&self, state: &ChessState, from: Square) -> Vec<Square> {
        let mut out = Vec::new();
        if state
            .board
            .get(from)
            .is_some_and(|piece| piece.color == state.current_player)
        {
            generate_destinations(&state.board, from, &mut out);
        }
        out
    }

    fn apply(
        &self,
        state: &mut ChessState,
        from: Square,
        to: Square,
    ) -> EngineResult<MoveRecord<ChessKind>> {
        let mv = Move::new(from, to);
        if !self.is_legal(state, from, to) {
            return Err(EngineError::InvalidMove { mv });
        }
        let moved = state
            .board
            .take(from)
            .ok_or(EngineError::InvalidMove { mv })?;

        let mover = state.current_player;
        let captured = state.board.take(to).map(|piece| (to, piece));
        if let Some((_, piece)) = captured {
            state.captured_by_mut(mover).push(piece);
        }

        let promoted = moved.kind == ChessKind::Pawn && to.row() == mover.promotion_row();
        let placed = if promoted {
            Piece::new(mover, ChessKind::Queen)
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
        state.current_player = mover.opposite();

        trace!(%mv, capture = captured.is_some(), promoted, "chess move applied");
        Ok(record)
    }

    fn undo(&self, state: &mut ChessState) -> bool {
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

    fn winner(&self, state: &ChessState) -> Option<Color> {
        if !Self::has_king(&state.board, Color::White) {
            return Some(Color::Black);
        }
        if !Self::has_king(&state.board, Color::Black) {
            return Some(Color::White);
        }
        None
    }
}
