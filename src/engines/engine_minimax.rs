//! Alpha-beta engine for either variant.
//!
//! `best_move` searches the caller's state in place (restoring it), `hint`
//! searches a copy. Both score the position for the side passed in.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_config::EngineConfig;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::EngineResult;
use crate::game_state::board_types::Color;
use crate::game_state::game_state::GameState;
use crate::rules::checkers_rules::CheckersRules;
use crate::rules::chess_rules::ChessRules;
use crate::rules::rule_engine::RuleEngine;
use crate::search::alpha_beta::{self, SearchResult};
use crate::search::board_scoring::BoardScorer;
use crate::search::checkers_scoring::CheckersScorer;
use crate::search::chess_scoring::ChessScorer;

pub type ChessMinimaxEngine = MinimaxEngine<ChessRules, ChessScorer>;
pub type CheckersMinimaxEngine = MinimaxEngine<CheckersRules, CheckersScorer>;

pub struct MinimaxEngine<R, S> {
    rules: R,
    scorer: S,
    config: EngineConfig,
    rng: StdRng,
}

fn rng_for(config: &EngineConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

impl<R, S> MinimaxEngine<R, S>
where
    R: RuleEngine,
    S: BoardScorer<R::Kind>,
{
    pub fn new(rules: R, scorer: S, config: EngineConfig) -> Self {
        let rng = rng_for(&config);
        Self {
            rules,
            scorer,
            config,
            rng,
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Search `state` in place for `side`. `state` is restored on return.
    pub fn best_move(
        &mut self,
        state: &mut GameState<R::Kind>,
        side: Color,
    ) -> EngineResult<SearchResult> {
        let search = self.config.search_config(R::VARIANT);
        alpha_beta::search_best_move(&self.rules, &self.scorer, state, side, search, &mut self.rng)
    }

    /// Suggest a move for `side` without touching `state`.
    pub fn hint(&mut self, state: &GameState<R::Kind>, side: Color) -> EngineResult<SearchResult> {
        let search = self.config.search_config(R::VARIANT);
        alpha_beta::hint(&self.rules, &self.scorer, state, side, search, &mut self.rng)
    }
}

impl MinimaxEngine<ChessRules, ChessScorer> {
    pub fn chess(config: EngineConfig) -> Self {
        Self::new(ChessRules, ChessScorer, config)
    }
}

impl MinimaxEngine<CheckersRules, CheckersScorer> {
    pub fn checkers(config: EngineConfig) -> Self {
        Self::new(CheckersRules, CheckersScorer, config)
    }
}

impl<R, S> Engine<R::Kind> for MinimaxEngine<R, S>
where
    R: RuleEngine,
    S: BoardScorer<R::Kind>,
{
    fn name(&self) -> &str {
        "DuoBoard Minimax"
    }

    fn new_game(&mut self) {
        if self.config.seed.is_some() {
            self.rng = rng_for(&self.config);
        }
    }

    fn set_option(&mut self, name: &str, value: &str) -> EngineResult<()> {
        self.config.set_option(name, value)?;
        if name.trim().eq_ignore_ascii_case("seed") {
            self.rng = rng_for(&self.config);
        }
        Ok(())
    }

    fn choose_move(&mut self, game_state: &GameState<R::Kind>) -> EngineResult<EngineOutput> {
        let result = self.hint(game_state, game_state.current_player)?;

        let mut out = EngineOutput {
            best_move: result.best_move,
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "info depth {} score cp {} nodes {} time {}",
            result.depth, result.best_score, result.nodes, result.elapsed_ms
        ));
        out.info_lines.push(format!(
            "info string minimax_engine variant {} difficulty {}",
            R::VARIANT,
            self.config.difficulty
        ));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_config::Difficulty;
    use crate::errors::EngineError;
    use crate::game_state::board_types::{ChessKind, Move, Square};
    use crate::utils::diagram::parse_board;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("test square should be on the board")
    }

    fn seeded(seed: u64, difficulty: Difficulty) -> EngineConfig {
        EngineConfig {
            difficulty,
            depth_override: None,
            seed: Some(seed),
        }
    }

    #[test]
    fn best_move_searches_in_place_and_restores() {
        let mut engine = MinimaxEngine::checkers(seeded(1, Difficulty::Easy));
        let mut state = engine.rules().new_game();
        let before = state.clone();

        let result = engine
            .best_move(&mut state, Color::White)
            .expect("search should run");
        let mv = result.best_move.expect("white has opening moves");
        assert_eq!(state, before);
        assert!(engine.rules().is_legal(&state, mv.from, mv.to));
        assert_eq!(result.depth, 3);
    }

    #[test]
    fn hint_suggests_for_the_human_side() {
        let mut engine = MinimaxEngine::chess(EngineConfig {
            depth_override: Some(2),
            seed: Some(3),
            ..EngineConfig::default()
        });
        let board = parse_board(
            "....k...\n\
             ........\n\
             ........\n\
             ........\n\
             ....Q...\n\
             ........\n\
             ........\n\
             K.......",
        )
        .expect("diagram should parse");
        let state = engine.rules().position(board, Color::White);

        let result = engine.hint(&state, Color::White).expect("search should run");
        assert_eq!(result.best_move, Some(Move::new(sq(4, 4), sq(0, 4))));
        assert_eq!(state.ply(), 0);
    }

    #[test]
    fn seeded_engines_agree() {
        let state = CheckersRules.new_game();
        let mut first = MinimaxEngine::checkers(seeded(77, Difficulty::Medium));
        let mut second = MinimaxEngine::checkers(seeded(77, Difficulty::Medium));

        let a = first.choose_move(&state).expect("search should run");
        let b = second.choose_move(&state).expect("search should run");
        assert_eq!(a.best_move, b.best_move);
        assert!(a.info_lines[0].starts_with("info depth 4 "));
    }

    #[test]
    fn new_game_replays_the_seed() {
        let state = CheckersRules.new_game();
        let mut engine = MinimaxEngine::checkers(seeded(5, Difficulty::Easy));
        let first = engine.choose_move(&state).expect("search should run");
        engine.new_game();
        let again = engine.choose_move(&state).expect("search should run");
        assert_eq!(first.best_move, again.best_move);
    }

    #[test]
    fn runs_behind_the_engine_trait() {
        let mut engine: Box<dyn Engine<ChessKind>> = Box::new(MinimaxEngine::chess(EngineConfig {
            depth_override: Some(1),
            seed: Some(9),
            ..EngineConfig::default()
        }));
        engine.set_option("Difficulty", "easy").expect("option should apply");
        assert!(matches!(
            engine.set_option("Threads", "4"),
            Err(EngineError::InvalidOption { .. })
        ));

        let state = ChessRules.new_game();
        let out = engine.choose_move(&state).expect("search should run");
        let mv = out.best_move.expect("white has opening moves");
        assert!(ChessRules.is_legal(&state, mv.from, mv.to));
    }
}
