use crate::game_state::board_types::{Color, Move, Piece, Square};

/// Single undo record for `RuleEngine::apply` / `RuleEngine::undo`.
///
/// The captured square is stored explicitly: for a checkers jump it is the
/// square that was jumped over, not the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord<K> {
    pub mv: Move,
    pub moved: Piece<K>,
    pub captured: Option<(Square, Piece<K>)>,
    pub promoted: bool,

    pub prev_player: Color,
    pub prev_forced_capture: bool,
    pub prev_capture_chain: Option<Square>,
}

impl<K> MoveRecord<K> {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}
