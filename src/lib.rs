//! Crate root module declarations for the DuoBoard engine.
//!
//! Two rule variants (a chess-like game and a checkers-like game) share one
//! board model and one rule-engine contract, so the alpha-beta search, the
//! engines and the match tooling are written once for both.

pub mod errors;

pub mod game_state {
    pub mod board_types;
    pub mod game_state;
    pub mod move_record;
}

pub mod rules {
    pub mod checkers_moves;
    pub mod checkers_rules;
    pub mod chess_moves;
    pub mod chess_rules;
    pub mod perft;
    pub mod rule_engine;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod checkers_scoring;
    pub mod chess_scoring;
}

pub mod engines {
    pub mod engine_config;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
    pub mod search_worker;
}

pub mod utils {
    pub mod diagram;
    pub mod engine_match_harness;
}
