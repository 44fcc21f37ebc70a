//! Static evaluation for the chess variant.
//!
//! Material, pawn and knight piece-square tables, a flat bonus for the four
//! centre squares, and a mobility difference.

use crate::game_state::board_types::{ChessKind, Color, Square};
use crate::game_state::game_state::GameState;
use crate::rules::chess_moves::mobility;
use crate::search::board_scoring::{side_sign, BoardScorer};

pub const CENTER_BONUS: i32 = 30;
pub const MOBILITY_WEIGHT: i32 = 10;

// Tables are laid out from Black's side of the board (row 0 is Black's home
// row); White looks them up mirrored.
#[rustfmt::skip]
const PAWN_TABLE: [[i32; 8]; 8] = [
    [ 0,  0,  0,  0,  0,  0,  0,  0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [ 5,  5, 10, 25, 25, 10,  5,  5],
    [ 0,  0,  0, 20, 20,  0,  0,  0],
    [ 5, -5,-10,  0,  0,-10, -5,  5],
    [ 5, 10, 10,-20,-20, 10, 10,  5],
    [ 0,  0,  0,  0,  0,  0,  0,  0],
];

#[rustfmt::skip]
const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50,-40,-30,-30,-30,-30,-40,-50],
    [-40,-20,  0,  0,  0,  0,-20,-40],
    [-30,  0, 10, 15, 15, 10,  0,-30],
    [-30,  5, 15, 20, 20, 15,  5,-30],
    [-30,  0, 15, 20, 20, 15,  0,-30],
    [-30,  5, 10, 15, 15, 10,  5,-30],
    [-40,-20,  0,  5,  5,  0,-20,-40],
    [-50,-40,-30,-30,-30,-30,-40,-50],
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ChessScorer;

impl ChessScorer {
    #[inline]
    pub const fn piece_value(kind: ChessKind) -> i32 {
        match kind {
            ChessKind::Pawn => 100,
            ChessKind::Knight => 320,
            ChessKind::Bishop => 330,
            ChessKind::Rook => 500,
            ChessKind::Queen => 900,
            ChessKind::King => 20_000,
        }
    }

    #[inline]
    fn table_lookup(table: &[[i32; 8]; 8], color: Color, sq: Square) -> i32 {
        let row = match color {
            Color::Black => sq.row(),
            Color::White => 7 - sq.row(),
        };
        table[row as usize][sq.col() as usize]
    }

    /// Value of one piece standing on `sq`, ignoring whose side it is on.
    pub fn placed_value(kind: ChessKind, color: Color, sq: Square) -> i32 {
        let mut value = Self::piece_value(kind);
        value += match kind {
            ChessKind::Pawn => Self::table_lookup(&PAWN_TABLE, color, sq),
            ChessKind::Knight => Self::table_lookup(&KNIGHT_TABLE, color, sq),
            _ => 0,
        };
        if (3..=4).contains(&sq.row()) && (3..=4).contains(&sq.col()) {
            value += CENTER_BONUS;
        }
        value
    }
}

impl BoardScorer<ChessKind> for ChessScorer {
    fn score(&self, game_state: &GameState<ChessKind>, perspective: Color) -> i32 {
        let board = &game_state.board;
        let mut score = 0i32;

        for color in [Color::White, Color::Black] {
            let sign = side_sign(color, perspective);
            for (sq, piece) in board.pieces(color) {
                score += sign * Self::placed_value(piece.kind, color, sq);
            }
        }

        let ours = mobility(board, perspective) as i32;
        let theirs = mobility(board, perspective.opposite()) as i32;
        score + (ours - theirs) * MOBILITY_WEIGHT
    }
}
