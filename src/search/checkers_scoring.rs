//! Static evaluation for the checkers variant.
//!
//! Each piece contributes material, a placement bonus, its mobility and a
//! tactical bonus for captures it could make right now. On top of that come
//! global terms for the material lead, king count, back-rank defence and an
//! endgame term that rewards cornering the opponent's kings.
//!
//! Centre distances are measured in tenths so the half-square offsets of an
//! 8-wide board stay integral.

use crate::game_state::board_types::{Board, CheckersKind, Color, Piece, Square};
use crate::game_state::game_state::GameState;
use crate::rules::checkers_moves::{color_has_capture, jumps_from, piece_destinations};
use crate::search::board_scoring::{side_sign, BoardScorer};

pub const MAN_VALUE: i32 = 100;
pub const KING_VALUE: i32 = 600;

const ADVANCE_PER_ROW: i32 = 20;
const ABOUT_TO_PROMOTE: i32 = 40;
const MAN_CENTRE_WEIGHT: i32 = 8;
const EDGE_PENALTY: i32 = 10;
const BACKED_BONUS: i32 = 5;
const KING_CENTRE_WEIGHT: i32 = 15;
const KING_ACTIVITY: i32 = 30;
const MOBILITY_WEIGHT: i32 = 12;
const CAPTURE_BONUS: i32 = 100;
const KING_CAPTURE_BONUS: i32 = 150;

const MATERIAL_LEAD_WEIGHT: i32 = 80;
const ENDGAME_MATERIAL_WEIGHT: i32 = 50;
const ENDGAME_MATERIAL_PIECES: usize = 8;
const KING_DIFF_WEIGHT: i32 = 300;
const BACK_RANK_HELD: i32 = 40;
const BACK_RANK_ABANDONED: i32 = 50;
const HUNT_PIECES: usize = 6;
const HUNT_WEIGHT: i32 = 10;

/// Distance of a row or column index from the board's centre line, in tenths.
#[inline]
fn centre_offset_tenths(index: u8) -> i32 {
    (35 - 10 * index as i32).abs()
}

#[inline]
fn corner_distance(sq: Square) -> i32 {
    let (r, c) = (sq.row() as i32, sq.col() as i32);
    [(0, 0), (0, 7), (7, 0), (7, 7)]
        .iter()
        .map(|&(cr, cc)| (r - cr).abs() + (c - cc).abs())
        .min()
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckersScorer;

impl CheckersScorer {
    /// Value of the piece on `sq`, before the side sign is applied.
    /// `must_capture` is whether that piece's side is under the capture rule.
    pub fn piece_value(
        board: &Board<CheckersKind>,
        sq: Square,
        piece: Piece<CheckersKind>,
        must_capture: bool,
    ) -> i32 {
        let (material, placement) = match piece.kind {
            CheckersKind::Man => (MAN_VALUE, Self::man_placement(board, sq, piece.color)),
            CheckersKind::King => {
                let centre = 40 - centre_offset_tenths(sq.row()) - centre_offset_tenths(sq.col());
                (KING_VALUE, centre * KING_CENTRE_WEIGHT / 10 + KING_ACTIVITY)
            }
        };

        let mut destinations = Vec::with_capacity(8);
        piece_destinations(board, sq, must_capture, &mut destinations);
        let mobility = destinations.len() as i32 * MOBILITY_WEIGHT;

        let tactics: i32 = jumps_from(board, sq)
            .iter()
            .map(|jump| match board.get(jump.captured) {
                Some(target) if target.kind == CheckersKind::King => {
                    CAPTURE_BONUS + KING_CAPTURE_BONUS
                }
                _ => CAPTURE_BONUS,
            })
            .sum();

        material + placement + mobility + tactics
    }

    fn man_placement(board: &Board<CheckersKind>, sq: Square, color: Color) -> i32 {
        let rows_advanced = (sq.row() as i32 - color.home_row() as i32).abs();
        let mut bonus = rows_advanced * ADVANCE_PER_ROW;

        let one_before_promotion = color.promotion_row() as i32 - color.forward() as i32;
        if sq.row() as i32 == one_before_promotion {
            bonus += ABOUT_TO_PROMOTE;
        }

        bonus += (35 - centre_offset_tenths(sq.col())) * MAN_CENTRE_WEIGHT / 10;
        if sq.col() == 0 || sq.col() == 7 {
            bonus -= EDGE_PENALTY;
        }

        let backed = [-1i8, 1i8].iter().any(|&dc| {
            sq.offset(-color.forward(), dc)
                .and_then(|behind| board.get(behind))
                .is_some_and(|p| p.color == color)
        });
        if backed {
            bonus += BACKED_BONUS;
        }
        bonus
    }

    /// Whole-board terms, all from `perspective`'s point of view.
    pub fn global_terms(board: &Board<CheckersKind>, perspective: Color) -> i32 {
        let enemy = perspective.opposite();
        let ours = board.count(perspective);
        let theirs = board.count(enemy);
        let total = ours + theirs;
        let mut score = 0;

        let lead = ours as i32 - theirs as i32;
        if lead > 0 {
            score += lead * MATERIAL_LEAD_WEIGHT;
            if total <= ENDGAME_MATERIAL_PIECES {
                score += lead * ENDGAME_MATERIAL_WEIGHT;
            }
        }

        let king_diff = board.count_kind(perspective, CheckersKind::King) as i32
            - board.count_kind(enemy, CheckersKind::King) as i32;
        score += king_diff * KING_DIFF_WEIGHT;

        let home = perspective.home_row();
        let back_rank = board
            .pieces(perspective)
            .filter(|(sq, _)| sq.row() == home)
            .count();
        if back_rank >= 2 {
            score += BACK_RANK_HELD;
        } else if back_rank == 0 && ours > 3 {
            score -= BACK_RANK_ABANDONED;
        }

        if lead > 0 && total <= HUNT_PIECES {
            for (sq, piece) in board.pieces(enemy) {
                if piece.kind == CheckersKind::King {
                    score += (14 - corner_distance(sq)) * HUNT_WEIGHT;
                }
            }
        }
        score
    }
}

impl BoardScorer<CheckersKind> for CheckersScorer {
    fn score(&self, game_state: &GameState<CheckersKind>, perspective: Color) -> i32 {
        let board = &game_state.board;
        let mut score = 0i32;

        for color in [Color::White, Color::Black] {
            let sign = side_sign(color, perspective);
            let must_capture = color_has_capture(board, color);
            for (sq, piece) in board.pieces(color) {
                score += sign * Self::piece_value(board, sq, piece, must_capture);
            }
        }

        score + Self::global_terms(board, perspective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::checkers_rules::CheckersRules;
    use crate::rules::rule_engine::RuleEngine;
    use crate::utils::diagram::parse_board;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("test square should be on the board")
    }

    fn board(diagram: &str) -> Board<CheckersKind> {
        parse_board(diagram).expect("diagram should parse")
    }

    #[test]
    fn start_position_only_credits_the_held_back_rank() {
        let state = CheckersRules.new_game();
        assert_eq!(CheckersScorer.score(&state, Color::White), BACK_RANK_HELD);
        assert_eq!(CheckersScorer.score(&state, Color::Black), BACK_RANK_HELD);
    }

    #[test]
    fn lone_man_value() {
        let b = board(
            "........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ..w.....\n\
             ........\n\
             ........",
        );
        let man = Piece::new(Color::White, CheckersKind::Man);
        // material 100, two rows advanced 40, centre 16, two quiet steps 24
        assert_eq!(CheckersScorer::piece_value(&b, sq(5, 2), man, false), 180);
    }

    #[test]
    fn lone_king_value() {
        let b = board(
            "........\n\
             ........\n\
             ........\n\
             ....W...\n\
             ........\n\
             ........\n\
             ........\n\
             ........",
        );
        let king = Piece::new(Color::White, CheckersKind::King);
        // material 600, centre 45, activity 30, thirteen flying destinations
        assert_eq!(
            CheckersScorer::piece_value(&b, sq(3, 4), king, false),
            600 + 45 + 30 + 13 * 12
        );
    }

    #[test]
    fn capture_of_a_king_is_worth_extra() {
        let b = board(
            "........\n\
             ........\n\
             ........\n\
             ....B...\n\
             ...w....\n\
             ........\n\
             ........\n\
             ........",
        );
        let man = Piece::new(Color::White, CheckersKind::Man);
        // material 100, advance 60, centre 24, one capture landing 12, king capture 250
        assert_eq!(CheckersScorer::piece_value(&b, sq(4, 3), man, true), 446);
    }

    #[test]
    fn endgame_rewards_cornering_the_enemy_king() {
        let cornered = board(
            ".......B\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             .w.w.w..\n\
             ........",
        );
        let centred = board(
            "........\n\
             ........\n\
             ........\n\
             ....B...\n\
             ........\n\
             ........\n\
             .w.w.w..\n\
             ........",
        );
        // lead 2: 160 + 100 endgame, king deficit -300, plus the hunt term
        assert_eq!(CheckersScorer::global_terms(&cornered, Color::White), 100);
        assert_eq!(CheckersScorer::global_terms(&centred, Color::White), 40);
    }

    #[test]
    fn extra_king_favors_its_owner() {
        let b = board(
            ".b.b.b.b\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ..W.....\n\
             ........\n\
             w.w.w.w.",
        );
        let state = CheckersRules.position(b, Color::White);
        assert!(CheckersScorer.score(&state, Color::White) > 0);
        assert!(CheckersScorer.score(&state, Color::Black) < 0);
    }
}
