//! Depth-limited minimax with alpha-beta pruning.
//!
//! One `GameState` is reused for the whole tree: every candidate is applied,
//! searched and undone in place. Scores are from the perspective of a fixed
//! side; a node maximizes exactly when that side is to move, which also covers
//! checkers multi-jumps where the mover keeps the turn.
//!
//! Root candidates are shuffled with the caller's RNG so equal scores do not
//! always resolve to the same move, and each is searched with a full window.

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::errors::EngineResult;
use crate::game_state::board_types::{Color, Move};
use crate::game_state::game_state::GameState;
use crate::rules::rule_engine::RuleEngine;
use crate::search::board_scoring::{evaluate, BoardScorer};

const INFINITY: i32 = i32::MAX;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Plies searched below the root, counting the root move.
    pub depth: u8,
    /// Root scores get uniform noise in `[-eval_noise, eval_noise]`.
    pub eval_noise: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            eval_noise: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub nodes: u64,
    pub depth: u8,
    pub elapsed_ms: u64,
}

pub struct AlphaBeta<'a, R: RuleEngine, S: BoardScorer<R::Kind>> {
    rules: &'a R,
    scorer: &'a S,
    side: Color,
    nodes: u64,
}

impl<'a, R: RuleEngine, S: BoardScorer<R::Kind>> AlphaBeta<'a, R, S> {
    pub fn new(rules: &'a R, scorer: &'a S, side: Color) -> Self {
        Self {
            rules,
            scorer,
            side,
            nodes: 0,
        }
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    pub fn evaluate(&self, state: &GameState<R::Kind>) -> i32 {
        evaluate(self.rules, self.scorer, state, self.side)
    }

    /// Fail-hard alpha-beta. `state` is identical to its input on return.
    pub fn minimax(
        &mut self,
        state: &mut GameState<R::Kind>,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> EngineResult<i32> {
        self.nodes += 1;

        if depth == 0 || self.rules.winner(state).is_some() {
            return Ok(self.evaluate(state));
        }

        let moves = self.rules.legal_moves(state);
        if moves.is_empty() {
            return Ok(self.evaluate(state));
        }

        if maximizing {
            let mut best = -INFINITY;
            for mv in moves {
                let score = self.search_child(state, mv, depth, alpha, beta)?;
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            Ok(best)
        } else {
            let mut best = INFINITY;
            for mv in moves {
                let score = self.search_child(state, mv, depth, alpha, beta)?;
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            Ok(best)
        }
    }

    fn search_child(
        &mut self,
        state: &mut GameState<R::Kind>,
        mv: Move,
        depth: u8,
        alpha: i32,
        beta: i32,
    ) -> EngineResult<i32> {
        self.rules.apply_move(state, mv)?;
        let child_maximizing = state.current_player == self.side;
        let score = self.minimax(state, depth - 1, alpha, beta, child_maximizing);
        self.rules.undo(state);
        score
    }
}

/// Pick the move for the side to move in `state`, scored for `side`.
///
/// `state` is used as scratch space and restored before returning. An empty
/// `best_move` means the side to move has no legal move.
pub fn search_best_move<R, S, G>(
    rules: &R,
    scorer: &S,
    state: &mut GameState<R::Kind>,
    side: Color,
    config: SearchConfig,
    rng: &mut G,
) -> EngineResult<SearchResult>
where
    R: RuleEngine,
    S: BoardScorer<R::Kind>,
    G: Rng + ?Sized,
{
    let start = Instant::now();
    let mut searcher = AlphaBeta::new(rules, scorer, side);

    let mut moves = rules.legal_moves(state);
    if moves.is_empty() {
        return Ok(SearchResult {
            best_move: None,
            best_score: searcher.evaluate(state),
            nodes: 1,
            depth: 0,
            elapsed_ms: start.elapsed().as_millis() as u64,
        });
    }
    moves.shuffle(rng);

    let depth = config.depth.max(1);
    let noise = config.eval_noise.max(0);
    let mut best_move = None;
    let mut best_score = -INFINITY;

    for mv in moves {
        let snapshot = cfg!(debug_assertions).then(|| state.clone());

        rules.apply_move(state, mv)?;
        let child_maximizing = state.current_player == side;
        let searched = searcher.minimax(state, depth - 1, -INFINITY, INFINITY, child_maximizing);
        rules.undo(state);
        let mut score = searched?;

        if let Some(before) = &snapshot {
            debug_assert_eq!(state, before, "search did not restore the state after {mv}");
        }

        if noise > 0 {
            score += rng.random_range(-noise..=noise);
        }
        trace!(%mv, score, "root move scored");

        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }

    let result = SearchResult {
        best_move,
        best_score,
        nodes: searcher.nodes() + 1,
        depth,
        elapsed_ms: start.elapsed().as_millis() as u64,
    };
    debug!(
        variant = %R::VARIANT,
        %side,
        depth,
        nodes = result.nodes,
        score = result.best_score,
        elapsed_ms = result.elapsed_ms,
        "search finished"
    );
    Ok(result)
}

/// Same search as `search_best_move`, run on a copy so `state` is never touched.
pub fn hint<R, S, G>(
    rules: &R,
    scorer: &S,
    state: &GameState<R::Kind>,
    side: Color,
    config: SearchConfig,
    rng: &mut G,
) -> EngineResult<SearchResult>
where
    R: RuleEngine,
    S: BoardScorer<R::Kind>,
    G: Rng + ?Sized,
{
    let mut scratch = state.clone();
    search_best_move(rules, scorer, &mut scratch, side, config, rng)
}
