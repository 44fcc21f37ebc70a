//! Errors used throughout the engine.
//!
//! Every failure inside the core is a local, typed outcome. Two expected idle
//! conditions are deliberately not errors: undoing with an empty history
//! (`RuleEngine::undo` returns `false`) and having no legal move (searches
//! return `None`).

use crate::game_state::board_types::Move;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// `apply` was called for a move that `is_legal` rejects.
    #[error("invalid move: {mv}")]
    InvalidMove { mv: Move },

    /// Coordinates outside the 8x8 board.
    #[error("square ({row}, {col}) is outside the board")]
    OutOfBounds { row: u8, col: u8 },

    /// A text diagram could not be turned into a board.
    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),

    /// Unknown engine option or a value that does not parse.
    #[error("invalid value '{value}' for option '{name}'")]
    InvalidOption { name: String, value: String },

    /// The search worker thread is gone.
    #[error("search worker disconnected")]
    WorkerDisconnected,
}

pub type EngineResult<T> = Result<T, EngineError>;
