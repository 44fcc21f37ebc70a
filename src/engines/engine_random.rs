//! Random-move engine.
//!
//! Selects uniformly from legal moves. Used as a baseline opponent in match
//! series and for seeded random openings.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::{EngineError, EngineResult};
use crate::game_state::game_state::GameState;
use crate::rules::rule_engine::RuleEngine;

pub struct RandomEngine<R> {
    rules: R,
    seed: Option<u64>,
    rng: StdRng,
}

impl<R: RuleEngine> RandomEngine<R> {
    pub fn new(rules: R, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { rules, seed, rng }
    }
}

impl<R: RuleEngine> Engine<R::Kind> for RandomEngine<R> {
    fn name(&self) -> &str {
        "DuoBoard Random"
    }

    fn new_game(&mut self) {
        if let Some(seed) = self.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }

    fn set_option(&mut self, name: &str, value: &str) -> EngineResult<()> {
        if !name.trim().eq_ignore_ascii_case("seed") {
            return Err(EngineError::InvalidOption {
                name: name.to_owned(),
                value: value.to_owned(),
            });
        }
        let seed: u64 = value
            .trim()
            .parse()
            .map_err(|_| EngineError::InvalidOption {
                name: name.to_owned(),
                value: value.to_owned(),
            })?;
        self.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }

    fn choose_move(&mut self, game_state: &GameState<R::Kind>) -> EngineResult<EngineOutput> {
        let legal_moves = self.rules.legal_moves(game_state);

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        out.best_move = legal_moves.choose(&mut self.rng).copied();
        Ok(out)
    }
}
