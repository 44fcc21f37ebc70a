//! Movement and capture geometry for the checkers variant.
//!
//! Men step one square diagonally forward and capture by jumping an adjacent
//! enemy in any diagonal direction. Kings fly: they move any distance along a
//! clear diagonal and capture by passing exactly one enemy, landing on any
//! empty square beyond it.

use crate::game_state::board_types::{Board, CheckersKind, Color, Square};

pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// A capturing landing square and the enemy square it jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub landing: Square,
    pub captured: Square,
}

/// All captures available to the piece on `from`.
pub fn jumps_from(board: &Board<CheckersKind>, from: Square) -> Vec<Jump> {
    let mut out = Vec::new();
    let Some(piece) = board.get(from) else {
        return out;
    };

    match piece.kind {
        CheckersKind::Man => {
            for (dr, dc) in DIAGONALS {
                let (Some(mid), Some(landing)) = (from.offset(dr, dc), from.offset(2 * dr, 2 * dc))
                else {
                    continue;
                };
                let enemy_in_middle = board.get(mid).is_some_and(|p| p.color != piece.color);
                if enemy_in_middle && board.is_empty_at(landing) {
                    out.push(Jump {
                        landing,
                        captured: mid,
                    });
                }
            }
        }
        CheckersKind::King => {
            for (dr, dc) in DIAGONALS {
                let mut enemy: Option<Square> = None;
                let mut current = from.offset(dr, dc);
                while let Some(sq) = current {
                    match board.get(sq) {
                        Some(p) if p.color == piece.color => break,
                        Some(_) if enemy.is_some() => break,
                        Some(_) => enemy = Some(sq),
                        None => {
                            if let Some(captured) = enemy {
                                out.push(Jump {
                                    landing: sq,
                                    captured,
                                });
                            }
                        }
                    }
                    current = sq.offset(dr, dc);
                }
            }
        }
    }
    out
}

#[inline]
pub fn has_jump(board: &Board<CheckersKind>, from: Square) -> bool {
    !jumps_from(board, from).is_empty()
}

/// Whether any piece of `color` has a capture; this is the forced-capture condition.
pub fn color_has_capture(board: &Board<CheckersKind>, color: Color) -> bool {
    board.pieces(color).any(|(from, _)| has_jump(board, from))
}

/// Non-capturing destinations of the piece on `from`.
pub fn quiet_destinations(board: &Board<CheckersKind>, from: Square, out: &mut Vec<Square>) {
    let Some(piece) = board.get(from) else {
        return;
    };

    match piece.kind {
        CheckersKind::Man => {
            let forward = piece.color.forward();
            for dc in [-1i8, 1i8] {
                if let Some(to) = from.offset(forward, dc) {
                    if board.is_empty_at(to) {
                        out.push(to);
                    }
                }
            }
        }
        CheckersKind::King => {
            for (dr, dc) in DIAGONALS {
                let mut current = from.offset(dr, dc);
                while let Some(to) = current {
                    if !board.is_empty_at(to) {
                        break;
                    }
                    out.push(to);
                    current = to.offset(dr, dc);
                }
            }
        }
    }
}

/// Destinations of the piece on `from` when its side must (or need not) capture.
pub fn piece_destinations(
    board: &Board<CheckersKind>,
    from: Square,
    must_capture: bool,
    out: &mut Vec<Square>,
) {
    if !must_capture {
        quiet_destinations(board, from, out);
    }
    out.extend(jumps_from(board, from).into_iter().map(|jump| jump.landing));
}

/// Enemy square removed by moving the piece on `from` to `to`, if this move
/// is a capture.
pub fn captured_square(board: &Board<CheckersKind>, from: Square, to: Square) -> Option<Square> {
    jumps_from(board, from)
        .into_iter()
        .find(|jump| jump.landing == to)
        .map(|jump| jump.captured)
}

/// Quiet-move predicate for the piece on `from`.
pub fn is_quiet_move(board: &Board<CheckersKind>, from: Square, to: Square) -> bool {
    let Some(piece) = board.get(from) else {
        return false;
    };
    if !board.is_empty_at(to) || !to.is_dark() {
        return false;
    }

    let dr = to.row() as i8 - from.row() as i8;
    let dc = to.col() as i8 - from.col() as i8;

    match piece.kind {
        CheckersKind::Man => dr == piece.color.forward() && dc.abs() == 1,
        CheckersKind::King => {
            if dr == 0 || dr.abs() != dc.abs() {
                return false;
            }
            let (step_r, step_c) = (dr.signum(), dc.signum());
            let mut current = from.offset(step_r, step_c);
            while let Some(sq) = current {
                if sq == to {
                    return true;
                }
                if !board.is_empty_at(sq) {
                    return false;
                }
                current = sq.offset(step_r, step_c);
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::diagram::parse_board;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("test square should be on the board")
    }

    #[test]
    fn man_jumps_backwards_as_well_as_forwards() {
        let board = parse_board::<CheckersKind>(
            "........\n\
             ........\n\
             ...b....\n\
             ..w.....\n\
             .b......\n\
             ........\n\
             ........\n\
             ........",
        )
        .expect("diagram should parse");

        let mut landings: Vec<Square> = jumps_from(&board, sq(3, 2))
            .into_iter()
            .map(|j| j.landing)
            .collect();
        landings.sort();
        assert_eq!(landings, vec![sq(1, 4), sq(5, 0)]);
        assert_eq!(captured_square(&board, sq(3, 2), sq(5, 0)), Some(sq(4, 1)));
    }

    #[test]
    fn man_quiet_moves_are_forward_only() {
        let board = parse_board::<CheckersKind>(
            "........\n\
             ........\n\
             ........\n\
             ........\n\
             ...w....\n\
             ........\n\
             ........\n\
             ........",
        )
        .expect("diagram should parse");
        assert!(is_quiet_move(&board, sq(4, 3), sq(3, 2)));
        assert!(is_quiet_move(&board, sq(4, 3), sq(3, 4)));
        assert!(!is_quiet_move(&board, sq(4, 3), sq(5, 2)));
        assert!(!is_quiet_move(&board, sq(4, 3), sq(2, 1)));
    }

    #[test]
    fn flying_king_lands_anywhere_past_a_single_enemy() {
        let board = parse_board::<CheckersKind>(
            "........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ..b.....\n\
             ........\n\
             W.......",
        )
        .expect("diagram should parse");

        let mut landings: Vec<Square> = jumps_from(&board, sq(7, 0))
            .into_iter()
            .map(|j| j.landing)
            .collect();
        landings.sort();
        assert_eq!(landings, vec![sq(0, 7), sq(1, 6), sq(2, 5), sq(3, 4), sq(4, 3)]);
        assert_eq!(captured_square(&board, sq(7, 0), sq(2, 5)), Some(sq(5, 2)));
    }

    #[test]
    fn flying_king_cannot_pass_two_pieces() {
        let board = parse_board::<CheckersKind>(
            "........\n\
             ........\n\
             ........\n\
             ........\n\
             ...b....\n\
             ........\n\
             .b......\n\
             W.......",
        )
        .expect("diagram should parse");
        // (7,0) -> (6,1) enemy -> (5,2) empty -> (4,3) second enemy stops the scan.
        let landings: Vec<Square> = jumps_from(&board, sq(7, 0))
            .into_iter()
            .map(|j| j.landing)
            .collect();
        assert_eq!(landings, vec![sq(5, 2)]);
        assert!(!is_quiet_move(&board, sq(7, 0), sq(3, 4)));
    }

    #[test]
    fn forced_capture_is_a_whole_color_property() {
        let board = parse_board::<CheckersKind>(
            "........\n\
             ........\n\
             ........\n\
             ....b...\n\
             ...w....\n\
             ........\n\
             .w......\n\
             ........",
        )
        .expect("diagram should parse");
        assert!(color_has_capture(&board, Color::White));
        assert!(color_has_capture(&board, Color::Black));

        let mut forced = Vec::new();
        piece_destinations(&board, sq(6, 1), true, &mut forced);
        assert!(forced.is_empty(), "a piece without captures has no forced moves");
    }
}
