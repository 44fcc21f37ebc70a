//! Pluggable board evaluation interface.
//!
//! Search stays variant-agnostic by delegating static scoring to this trait.
//! Scores are always from the perspective of one fixed side; positive favors
//! that side.

use crate::game_state::board_types::{Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::rules::rule_engine::RuleEngine;

/// Magnitude of a decided game. Dominates every positional term.
pub const WIN_SCORE: i32 = 10_000;

pub trait BoardScorer<K: PieceKind>: Send + Sync {
    /// Heuristic score of a position that is not yet decided.
    fn score(&self, game_state: &GameState<K>, perspective: Color) -> i32;
}

/// Full static evaluation: a decided game scores `±WIN_SCORE`, otherwise the
/// scorer's heuristic applies.
pub fn evaluate<R, S>(rules: &R, scorer: &S, game_state: &GameState<R::Kind>, perspective: Color) -> i32
where
    R: RuleEngine,
    S: BoardScorer<R::Kind>,
{
    match rules.winner(game_state) {
        Some(color) if color == perspective => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => scorer.score(game_state, perspective),
    }
}

/// `+1` for the perspective side's pieces, `-1` for the opponent's.
#[inline]
pub(crate) const fn side_sign(piece_color: Color, perspective: Color) -> i32 {
    if piece_color.index() == perspective.index() {
        1
    } else {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board_types::{ChessKind, Piece, Square};
    use crate::rules::chess_rules::ChessRules;

    struct ConstantScorer(i32);

    impl BoardScorer<ChessKind> for ConstantScorer {
        fn score(&self, _game_state: &GameState<ChessKind>, _perspective: Color) -> i32 {
            self.0
        }
    }

    #[test]
    fn undecided_positions_use_the_scorer() {
        let rules = ChessRules;
        let state = rules.new_game();
        assert_eq!(evaluate(&rules, &ConstantScorer(17), &state, Color::White), 17);
    }

    #[test]
    fn decided_positions_dominate_the_scorer() {
        let rules = ChessRules;
        let mut state = rules.new_game();
        let white_king = Square::new(7, 4).expect("valid square");
        assert_eq!(
            state.board.take(white_king),
            Some(Piece::new(Color::White, ChessKind::King))
        );

        let scorer = ConstantScorer(50_000);
        assert_eq!(evaluate(&rules, &scorer, &state, Color::Black), WIN_SCORE);
        assert_eq!(evaluate(&rules, &scorer, &state, Color::White), -WIN_SCORE);
    }
}
