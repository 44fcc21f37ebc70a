//! Difficulty and search-depth configuration.
//!
//! Difficulty trades depth for strength and adds noise to root scores at the
//! lower levels. An explicit depth always wins over the difficulty's depth.

use std::fmt;
use std::str::FromStr;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::board_types::Variant;
use crate::search::alpha_beta::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    /// Plies removed from the variant's base depth.
    #[inline]
    pub const fn depth_reduction(self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 1,
            Difficulty::Hard => 0,
        }
    }

    #[inline]
    pub const fn eval_noise(self) -> i32 {
        match self {
            Difficulty::Easy => 150,
            Difficulty::Medium => 40,
            Difficulty::Hard => 0,
        }
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(EngineError::InvalidOption {
                name: "Difficulty".to_owned(),
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    pub depth_override: Option<u8>,
    /// Seed for root-move shuffling and noise. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn search_config(&self, variant: Variant) -> SearchConfig {
        let depth = match self.depth_override {
            Some(depth) => depth.max(1),
            None => variant
                .base_depth()
                .saturating_sub(self.difficulty.depth_reduction())
                .max(1),
        };
        SearchConfig {
            depth,
            eval_noise: self.difficulty.eval_noise(),
        }
    }

    /// Apply a string option by name. Names are case-insensitive.
    pub fn set_option(&mut self, name: &str, value: &str) -> EngineResult<()> {
        let invalid = || EngineError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        };

        match name.trim().to_ascii_lowercase().as_str() {
            "depth" => {
                let depth: u8 = value.trim().parse().map_err(|_| invalid())?;
                self.depth_override = (depth > 0).then_some(depth);
            }
            "difficulty" => {
                self.difficulty = value.parse().map_err(|_| invalid())?;
            }
            "seed" => {
                self.seed = Some(value.trim().parse().map_err(|_| invalid())?);
            }
            _ => return Err(invalid()),
        }
        Ok(())
    }
}
