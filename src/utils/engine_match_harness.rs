//! Minimal head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other over any rule engine,
//! with an optional seeded random opening prefix so a series does not replay
//! the same game.

use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, info};

use crate::engines::engine_trait::Engine;
use crate::errors::{EngineError, EngineResult};
use crate::game_state::board_types::{Color, Move};
use crate::game_state::game_state::GameState;
use crate::rules::rule_engine::RuleEngine;
use crate::utils::diagram::render_board;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win(Color),
    MaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, color: Color },
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_min_plies: 0,
            opening_max_plies: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult<K> {
    pub outcome: MatchOutcome,
    pub final_state: GameState<K>,
    pub opening_moves: Vec<Move>,
    pub played_moves: Vec<Move>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

#[derive(Debug, Clone, Copy)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
}

impl MatchSeriesStats {
    fn avg_ms(total_ns: u128, moves: u32) -> f64 {
        if moves == 0 {
            0.0
        } else {
            total_ns as f64 / moves as f64 / 1_000_000.0
        }
    }

    pub fn player1_avg_move_time_ms(&self) -> f64 {
        Self::avg_ms(self.player1_total_time_ns, self.player1_moves)
    }

    pub fn player2_avg_move_time_ms(&self) -> f64 {
        Self::avg_ms(self.player2_total_time_ns, self.player2_moves)
    }

    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms(),
            self.player2_avg_move_time_ms(),
        )
    }
}

/// Play uniformly random legal moves for a seeded number of plies in
/// `[min_plies, max_plies]`, stopping early if the game is decided.
pub fn apply_seeded_random_opening<R: RuleEngine>(
    rules: &R,
    state: &mut GameState<R::Kind>,
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> EngineResult<Vec<Move>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let upper = max_plies.max(min_plies);
    let plies = rng.random_range(min_plies..=upper);

    let mut played = Vec::with_capacity(plies as usize);
    for _ in 0..plies {
        if rules.winner(state).is_some() {
            break;
        }
        let legal_moves = rules.legal_moves(state);
        let Some(&mv) = legal_moves.choose(&mut rng) else {
            break;
        };
        rules.apply_move(state, mv)?;
        played.push(mv);
    }
    Ok(played)
}

/// Play a single seeded engine-vs-engine match from the starting position.
pub fn play_engine_match<R: RuleEngine>(
    rules: &R,
    engine_white: &mut dyn Engine<R::Kind>,
    engine_black: &mut dyn Engine<R::Kind>,
    seed: u64,
    config: MatchConfig,
) -> EngineResult<MatchResult<R::Kind>> {
    let mut state = rules.new_game();
    engine_white.new_game();
    engine_black.new_game();

    let opening_moves = apply_seeded_random_opening(
        rules,
        &mut state,
        seed,
        config.opening_min_plies,
        config.opening_max_plies,
    )?;
    play_out(rules, state, engine_white, engine_black, opening_moves, config)
}

/// Play a match from a caller-provided state, without random opening plies.
pub fn play_engine_match_from_state<R: RuleEngine>(
    rules: &R,
    engine_white: &mut dyn Engine<R::Kind>,
    engine_black: &mut dyn Engine<R::Kind>,
    start_state: GameState<R::Kind>,
    config: MatchConfig,
) -> EngineResult<MatchResult<R::Kind>> {
    engine_white.new_game();
    engine_black.new_game();
    play_out(rules, start_state, engine_white, engine_black, Vec::new(), config)
}

fn play_out<R: RuleEngine>(
    rules: &R,
    mut state: GameState<R::Kind>,
    engine_white: &mut dyn Engine<R::Kind>,
    engine_black: &mut dyn Engine<R::Kind>,
    opening_moves: Vec<Move>,
    config: MatchConfig,
) -> EngineResult<MatchResult<R::Kind>> {
    let mut played_moves = Vec::<Move>::new();
    let mut white_move_count = 0u32;
    let mut black_move_count = 0u32;
    let mut white_total_time_ns = 0u128;
    let mut black_total_time_ns = 0u128;
    let mut outcome = MatchOutcome::MaxPlies;

    for _ in 0..config.max_plies {
        if let Some(color) = rules.winner(&state) {
            outcome = MatchOutcome::Win(color);
            break;
        }

        let legal_moves = rules.legal_moves(&state);
        let mover = state.current_player;
        let started = Instant::now();
        let out = match mover {
            Color::White => engine_white.choose_move(&state)?,
            Color::Black => engine_black.choose_move(&state)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        let Some(chosen) = out.best_move.or_else(|| legal_moves.first().copied()) else {
            break;
        };

        match mover {
            Color::White => {
                white_move_count = white_move_count.saturating_add(1);
                white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Black => {
                black_move_count = black_move_count.saturating_add(1);
                black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        if !legal_moves.contains(&chosen) {
            return Err(EngineError::InvalidMove { mv: chosen });
        }
        rules.apply_move(&mut state, chosen)?;
        played_moves.push(chosen);
    }

    if outcome == MatchOutcome::MaxPlies {
        if let Some(color) = rules.winner(&state) {
            outcome = MatchOutcome::Win(color);
        }
    }

    Ok(MatchResult {
        outcome,
        final_state: state,
        opening_moves,
        played_moves,
        white_move_count,
        black_move_count,
        white_total_time_ns,
        black_total_time_ns,
    })
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player colors are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<R, F1, F2>(
    rules: &R,
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> EngineResult<MatchSeriesStats>
where
    R: RuleEngine,
    F1: Fn() -> Box<dyn Engine<R::Kind>>,
    F2: Fn() -> Box<dyn Engine<R::Kind>>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_white = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));

        let mut player1 = player1_factory();
        let mut player2 = player2_factory();
        info!(
            game = i + 1,
            games = config.games,
            seed,
            player1 = player1.name(),
            player2 = player2.name(),
            player1_is_white,
            "starting game"
        );

        let result = if player1_is_white {
            play_engine_match(rules, player1.as_mut(), player2.as_mut(), seed, config.per_game)?
        } else {
            play_engine_match(rules, player2.as_mut(), player1.as_mut(), seed, config.per_game)?
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_is_white {
            (
                result.white_move_count,
                result.black_move_count,
                result.white_total_time_ns,
                result.black_total_time_ns,
            )
        } else {
            (
                result.black_move_count,
                result.white_move_count,
                result.black_total_time_ns,
                result.white_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let mapped = match result.outcome {
            MatchOutcome::Win(color) => {
                let player1_won = (color == Color::White) == player1_is_white;
                let player = if player1_won {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWin { player, color }
            }
            MatchOutcome::MaxPlies => {
                stats.draws += 1;
                SeriesOutcome::DrawMaxPlies
            }
        };
        stats.outcomes.push(mapped);

        info!(
            game = i + 1,
            outcome = ?mapped,
            plies = result.final_state.ply(),
            player1_wins = stats.player1_wins,
            player2_wins = stats.player2_wins,
            draws = stats.draws,
            "game finished"
        );
        debug!("final position:\n{}", render_board(&result.final_state.board));
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_config::EngineConfig;
    use crate::engines::engine_minimax::MinimaxEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::game_state::board_types::{ChessKind, Square};
    use crate::rules::checkers_rules::CheckersRules;
    use crate::rules::chess_rules::ChessRules;
    use crate::utils::diagram::parse_board;

    fn quick_config() -> MatchConfig {
        MatchConfig {
            max_plies: 60,
            opening_min_plies: 2,
            opening_max_plies: 6,
        }
    }

    #[test]
    fn seeded_random_opening_is_reproducible() {
        let rules = CheckersRules;
        let mut a = rules.new_game();
        let mut b = rules.new_game();
        let first = apply_seeded_random_opening(&rules, &mut a, 17, 2, 6).expect("opening");
        let second = apply_seeded_random_opening(&rules, &mut b, 17, 2, 6).expect("opening");
        assert_eq!(first, second);
        assert_eq!(a, b);
        assert!((2..=6).contains(&first.len()));
    }

    #[test]
    fn random_match_history_matches_played_moves() {
        let rules = ChessRules;
        let mut white = RandomEngine::new(ChessRules, Some(1));
        let mut black = RandomEngine::new(ChessRules, Some(2));
        let result = play_engine_match(&rules, &mut white, &mut black, 5, quick_config())
            .expect("match should run");

        assert_eq!(
            result.final_state.ply(),
            result.opening_moves.len() + result.played_moves.len()
        );
        assert_eq!(
            (result.white_move_count + result.black_move_count) as usize,
            result.played_moves.len()
        );
        if let MatchOutcome::Win(color) = result.outcome {
            assert_eq!(rules.winner(&result.final_state), Some(color));
        }
    }

    #[test]
    fn minimax_converts_a_hanging_king() {
        let rules = ChessRules;
        let board = parse_board::<ChessKind>(
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
        let start = rules.position(board, Color::White);
        let mut white = MinimaxEngine::chess(EngineConfig {
            depth_override: Some(1),
            seed: Some(4),
            ..EngineConfig::default()
        });
        let mut black = RandomEngine::new(ChessRules, Some(4));

        let result =
            play_engine_match_from_state(&rules, &mut white, &mut black, start, quick_config())
                .expect("match should run");
        assert_eq!(result.outcome, MatchOutcome::Win(Color::White));
        let target = Square::new(0, 4).expect("valid square");
        assert_eq!(result.played_moves.last().map(|mv| mv.to), Some(target));
    }

    #[test]
    fn series_accounts_for_every_game() {
        let rules = CheckersRules;
        let config = MatchSeriesConfig {
            games: 3,
            base_seed: 11,
            per_game: quick_config(),
        };
        let stats = play_engine_match_series(
            &rules,
            || Box::new(RandomEngine::new(CheckersRules, Some(1))),
            || Box::new(RandomEngine::new(CheckersRules, Some(2))),
            config,
        )
        .expect("series should run");

        assert_eq!(stats.games, 3);
        assert_eq!(stats.outcomes.len(), 3);
        assert_eq!(stats.player1_wins + stats.player2_wins + stats.draws, 3);
        assert!(stats.report().starts_with("games=3 "));
    }
}
