//! Per-piece movement geometry for the chess variant.
//!
//! Two views of the same rules live here: a predicate (`geometry_allows`) for
//! single from/to questions and generators that enumerate destinations. Both
//! ignore whose turn it is; the rule engine layers the side-to-move check on top.

use crate::game_state::board_types::{Board, ChessKind, Color, Square};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Row a pawn of `color` may double-step from.
#[inline]
pub const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Whether the piece on `from` may move to `to` by its movement rules.
///
/// Targets holding a piece of the mover's own color are rejected.
pub fn geometry_allows(board: &Board<ChessKind>, from: Square, to: Square) -> bool {
    let Some(piece) = board.get(from) else {
        return false;
    };
    if let Some(target) = board.get(to) {
        if target.color == piece.color {
            return false;
        }
    }

    let dr = to.row() as i8 - from.row() as i8;
    let dc = to.col() as i8 - from.col() as i8;

    match piece.kind {
        ChessKind::Pawn => pawn_allows(board, piece.color, from, to, dr, dc),
        ChessKind::Knight => (dr.abs() == 2 && dc.abs() == 1) || (dr.abs() == 1 && dc.abs() == 2),
        ChessKind::Bishop => is_diagonal(dr, dc) && path_clear(board, from, to),
        ChessKind::Rook => is_straight(dr, dc) && path_clear(board, from, to),
        ChessKind::Queen => {
            (is_straight(dr, dc) || is_diagonal(dr, dc)) && path_clear(board, from, to)
        }
        ChessKind::King => dr.abs() <= 1 && dc.abs() <= 1 && (dr, dc) != (0, 0),
    }
}

fn pawn_allows(
    board: &Board<ChessKind>,
    color: Color,
    from: Square,
    to: Square,
    dr: i8,
    dc: i8,
) -> bool {
    let forward = color.forward();

    if dc == 0 {
        if dr == forward && board.is_empty_at(to) {
            return true;
        }
        if from.row() == pawn_start_row(color) && dr == 2 * forward && board.is_empty_at(to) {
            return from
                .offset(forward, 0)
                .is_some_and(|mid| board.is_empty_at(mid));
        }
        return false;
    }

    // Diagonal steps only capture; own pieces were rejected by the caller.
    dc.abs() == 1 && dr == forward && !board.is_empty_at(to)
}

#[inline]
fn is_straight(dr: i8, dc: i8) -> bool {
    (dr == 0) != (dc == 0)
}

#[inline]
fn is_diagonal(dr: i8, dc: i8) -> bool {
    dr != 0 && dr.abs() == dc.abs()
}

/// Squares strictly between `from` and `to` are empty. Callers guarantee
/// the two squares share a line.
fn path_clear(board: &Board<ChessKind>, from: Square, to: Square) -> bool {
    let step_r = (to.row() as i8 - from.row() as i8).signum();
    let step_c = (to.col() as i8 - from.col() as i8).signum();

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

/// Append every destination the piece on `from` can reach.
pub fn generate_destinations(board: &Board<ChessKind>, from: Square, out: &mut Vec<Square>) {
    let Some(piece) = board.get(from) else {
        return;
    };

    match piece.kind {
        ChessKind::Pawn => generate_pawn_destinations(board, piece.color, from, out),
        ChessKind::Knight => generate_leaper_destinations(board, piece.color, from, &KNIGHT_OFFSETS, out),
        ChessKind::Bishop => generate_slider_destinations(board, piece.color, from, &BISHOP_DIRECTIONS, out),
        ChessKind::Rook => generate_slider_destinations(board, piece.color, from, &ROOK_DIRECTIONS, out),
        ChessKind::Queen => {
            generate_slider_destinations(board, piece.color, from, &ROOK_DIRECTIONS, out);
            generate_slider_destinations(board, piece.color, from, &BISHOP_DIRECTIONS, out);
        }
        ChessKind::King => generate_leaper_destinations(board, piece.color, from, &KING_OFFSETS, out),
    }
}

fn generate_pawn_destinations(
    board: &Board<ChessKind>,
    color: Color,
    from: Square,
    out: &mut Vec<Square>,
) {
    let forward = color.forward();

    if let Some(one_step) = from.offset(forward, 0) {
        if board.is_empty_at(one_step) {
            out.push(one_step);
            if from.row() == pawn_start_row(color) {
                if let Some(two_step) = from.offset(2 * forward, 0) {
                    if board.is_empty_at(two_step) {
                        out.push(two_step);
                    }
                }
            }
        }
    }

    for dc in [-1i8, 1i8] {
        let Some(to) = from.offset(forward, dc) else {
            continue;
        };
        if board.get(to).is_some_and(|target| target.color != color) {
            out.push(to);
        }
    }
}

fn generate_leaper_destinations(
    board: &Board<ChessKind>,
    color: Color,
    from: Square,
    offsets: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(dr, dc) in offsets {
        let Some(to) = from.offset(dr, dc) else {
            continue;
        };
        match board.get(to) {
            Some(target) if target.color == color => {}
            _ => out.push(to),
        }
    }
}

fn generate_slider_destinations(
    board: &Board<ChessKind>,
    color: Color,
    from: Square,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(dr, dc) in directions {
        let mut current = from.offset(dr, dc);
        while let Some(to) = current {
            match board.get(to) {
                None => out.push(to),
                Some(target) => {
                    if target.color != color {
                        out.push(to);
                    }
                    break;
                }
            }
            current = to.offset(dr, dc);
        }
    }
}

/// Number of destinations available to all of `color`'s pieces, regardless
/// of whose turn it is.
pub fn mobility(board: &Board<ChessKind>, color: Color) -> usize {
    let mut scratch = Vec::with_capacity(32);
    for (from, _) in board.pieces(color) {
        generate_destinations(board, from, &mut scratch);
    }
    scratch.len()
}
