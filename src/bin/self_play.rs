//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin self_play -- --variant checkers --games 10`
//! `RUST_LOG=duo_board=debug cargo run --release --bin self_play -- --variant chess --player2 random`

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use duo_board::engines::engine_config::{Difficulty, EngineConfig};
use duo_board::engines::engine_minimax::MinimaxEngine;
use duo_board::engines::engine_random::RandomEngine;
use duo_board::engines::engine_trait::Engine;
use duo_board::errors::EngineError;
use duo_board::game_state::board_types::{CheckersKind, ChessKind};
use duo_board::rules::checkers_rules::CheckersRules;
use duo_board::rules::chess_rules::ChessRules;
use duo_board::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Chess,
    Checkers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayerArg {
    Minimax,
    Random,
}

#[derive(Parser, Debug)]
#[command(about = "Play a seeded series of engine-vs-engine games")]
struct Args {
    #[arg(long, value_enum, default_value_t = VariantArg::Checkers)]
    variant: VariantArg,

    #[arg(long, default_value_t = 10)]
    games: u16,

    #[arg(long, default_value_t = 1234)]
    seed: u64,

    #[arg(long, default_value_t = 200)]
    max_plies: u16,

    #[arg(long, value_enum, default_value_t = PlayerArg::Minimax)]
    player1: PlayerArg,

    #[arg(long, value_enum, default_value_t = PlayerArg::Minimax)]
    player2: PlayerArg,

    /// easy, medium or hard
    #[arg(long, default_value = "hard")]
    difficulty1: Difficulty,

    #[arg(long, default_value = "medium")]
    difficulty2: Difficulty,

    /// Fixed search depth for both minimax players, overriding difficulty.
    #[arg(long)]
    depth: Option<u8>,
}

fn engine_config(difficulty: Difficulty, depth: Option<u8>, seed: u64) -> EngineConfig {
    EngineConfig {
        difficulty,
        depth_override: depth,
        seed: Some(seed),
    }
}

fn chess_player(kind: PlayerArg, config: EngineConfig) -> Box<dyn Engine<ChessKind>> {
    match kind {
        PlayerArg::Minimax => Box::new(MinimaxEngine::chess(config)),
        PlayerArg::Random => Box::new(RandomEngine::new(ChessRules, config.seed)),
    }
}

fn checkers_player(kind: PlayerArg, config: EngineConfig) -> Box<dyn Engine<CheckersKind>> {
    match kind {
        PlayerArg::Minimax => Box::new(MinimaxEngine::checkers(config)),
        PlayerArg::Random => Box::new(RandomEngine::new(CheckersRules, config.seed)),
    }
}

fn main() -> Result<(), EngineError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config1 = engine_config(args.difficulty1, args.depth, args.seed);
    let config2 = engine_config(args.difficulty2, args.depth, args.seed.wrapping_add(1));
    let series = MatchSeriesConfig {
        games: args.games,
        base_seed: args.seed,
        per_game: MatchConfig {
            max_plies: args.max_plies,
            opening_min_plies: 2,
            opening_max_plies: 6,
        },
    };

    let stats = match args.variant {
        VariantArg::Chess => play_engine_match_series(
            &ChessRules,
            || chess_player(args.player1, config1),
            || chess_player(args.player2, config2),
            series,
        )?,
        VariantArg::Checkers => play_engine_match_series(
            &CheckersRules,
            || checkers_player(args.player1, config1),
            || checkers_player(args.player2, config2),
            series,
        )?,
    };

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
