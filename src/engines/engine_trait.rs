//! Player abstraction shared by the search engines.
//!
//! Lets the match harness and the search worker drive different move-choosing
//! strategies through one trait object.

use crate::errors::EngineResult;
use crate::game_state::board_types::{Move, PieceKind};
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine<K: PieceKind>: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> EngineResult<()> {
        Ok(())
    }

    /// Move for the side to move in `game_state`. `best_move` is `None` when
    /// that side has no legal move.
    fn choose_move(&mut self, game_state: &GameState<K>) -> EngineResult<EngineOutput>;
}
