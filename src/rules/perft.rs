//! Move-path enumeration over the rule-engine contract.
//!
//! Walks the game tree with apply/undo on a single state, so it doubles as a
//! stress test of the undo records. Finished games (a decided `winner`) are
//! leaves regardless of remaining depth.

use std::thread;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::MoveRecord;
use crate::rules::rule_engine::RuleEngine;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub promotions: usize,
    /// Moves after which the mover keeps the turn (checkers multi-jumps).
    pub chain_continuations: usize,
    /// Leaf positions where the game is already decided.
    pub decided: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.promotions += rhs.promotions;
        self.chain_continuations += rhs.chain_continuations;
        self.decided += rhs.decided;
    }
}

pub fn perft<R: RuleEngine>(
    rules: &R,
    state: &mut GameState<R::Kind>,
    depth: u8,
) -> EngineResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }
    perft_recurse(rules, state, depth, &mut counts)?;
    Ok(counts)
}

/// Same counts as `perft`, with each root move explored on its own thread
/// and its own copy of the state.
pub fn perft_multi_threaded<R: RuleEngine + Clone + 'static>(
    rules: &R,
    state: &GameState<R::Kind>,
    depth: u8,
) -> EngineResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }
    if rules.winner(state).is_some() {
        return Ok(PerftCounts::default());
    }

    let mut handles = Vec::new();
    for mv in rules.legal_moves(state) {
        let rules = rules.clone();
        let mut local_state = state.clone();
        handles.push(thread::spawn(move || -> EngineResult<PerftCounts> {
            let mut local = PerftCounts::default();
            let record = rules.apply_move(&mut local_state, mv)?;
            tally_move(&rules, &local_state, &record, depth, &mut local);
            if depth > 1 {
                perft_recurse(&rules, &mut local_state, depth - 1, &mut local)?;
            }
            Ok(local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle
            .join()
            .map_err(|_| EngineError::WorkerDisconnected)??;
        total.merge(local);
    }
    Ok(total)
}

fn perft_recurse<R: RuleEngine>(
    rules: &R,
    state: &mut GameState<R::Kind>,
    depth: u8,
    counts: &mut PerftCounts,
) -> EngineResult<()> {
    if rules.winner(state).is_some() {
        return Ok(());
    }

    for mv in rules.legal_moves(state) {
        let record = rules.apply_move(state, mv)?;
        tally_move(rules, state, &record, depth, counts);
        if depth > 1 {
            perft_recurse(rules, state, depth - 1, counts)?;
        }
        rules.undo(state);
    }
    Ok(())
}

fn tally_move<R: RuleEngine>(
    rules: &R,
    state: &GameState<R::Kind>,
    record: &MoveRecord<R::Kind>,
    depth: u8,
    counts: &mut PerftCounts,
) {
    if depth != 1 {
        return;
    }
    counts.nodes += 1;
    if record.is_capture() {
        counts.captures += 1;
    }
    if record.promoted {
        counts.promotions += 1;
    }
    if state.current_player == record.prev_player {
        counts.chain_continuations += 1;
    }
    if rules.winner(state).is_some() {
        counts.decided += 1;
    }
}
