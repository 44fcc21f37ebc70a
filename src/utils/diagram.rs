//! Plain-text board diagrams.
//!
//! A diagram is eight lines of eight glyphs, row 0 first. Empty squares are
//! `.` (or `·`, which the renderer emits). Blank lines and surrounding
//! whitespace are ignored so diagrams can be indented in source.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::board_types::{Board, Piece, PieceKind, Square, BOARD_SIZE};

pub fn parse_board<K: PieceKind>(diagram: &str) -> EngineResult<Board<K>> {
    let rows: Vec<&str> = diagram
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if rows.len() != BOARD_SIZE as usize {
        return Err(EngineError::InvalidDiagram(format!(
            "expected {BOARD_SIZE} rows, found {}",
            rows.len()
        )));
    }

    let mut board = Board::empty();
    for (row, line) in rows.iter().enumerate() {
        let glyphs: Vec<char> = line.chars().collect();
        if glyphs.len() != BOARD_SIZE as usize {
            return Err(EngineError::InvalidDiagram(format!(
                "row {row} has {} squares",
                glyphs.len()
            )));
        }

        for (col, ch) in glyphs.into_iter().enumerate() {
            if ch == '.' || ch == '·' {
                continue;
            }
            let (color, kind) = K::from_glyph(ch).ok_or_else(|| {
                EngineError::InvalidDiagram(format!("unknown piece '{ch}' at ({row},{col})"))
            })?;
            let sq = Square::new(row as u8, col as u8)?;
            if K::DARK_SQUARES_ONLY && !sq.is_dark() {
                return Err(EngineError::InvalidDiagram(format!(
                    "piece '{ch}' on light square {sq}"
                )));
            }
            board.put(sq, Piece::new(color, kind));
        }
    }
    Ok(board)
}

/// Render the board with row and column indices for terminal output.
pub fn render_board<K: PieceKind>(board: &Board<K>) -> String {
    let mut out = String::new();

    out.push_str("  0 1 2 3 4 5 6 7\n");
    for row in 0..BOARD_SIZE {
        out.push(char::from(b'0' + row));
        out.push(' ');
        for col in 0..BOARD_SIZE {
            let glyph = Square::new(row, col)
                .ok()
                .and_then(|sq| board.get(sq))
                .map_or('·', |piece| piece.kind.glyph(piece.color));
            out.push(glyph);
            if col < BOARD_SIZE - 1 {
                out.push(' ');
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board_types::{CheckersKind, ChessKind, Color};
    use crate::rules::checkers_rules::CheckersRules;
    use crate::rules::chess_rules::ChessRules;

    const CHESS_START: &str = "
        rnbqkbnr
        pppppppp
        ........
        ........
        ........
        ........
        PPPPPPPP
        RNBQKBNR
    ";

    #[test]
    fn parses_the_chess_start_position() {
        let board = parse_board::<ChessKind>(CHESS_START).expect("diagram should parse");
        assert_eq!(board, ChessRules::starting_board());
        let king = Square::new(7, 4).expect("valid square");
        assert_eq!(board.get(king), Some(Piece::new(Color::White, ChessKind::King)));
    }

    #[test]
    fn rendered_board_parses_back() {
        let board = CheckersRules::starting_board();
        let rendered = render_board(&board);
        let body: String = rendered
            .lines()
            .skip(1)
            .map(|line| line.chars().skip(2).filter(|c| *c != ' ').collect::<String>() + "\n")
            .collect();
        assert_eq!(parse_board::<CheckersKind>(&body).expect("should parse"), board);
    }

    #[test]
    fn rejects_malformed_diagrams() {
        assert!(matches!(
            parse_board::<ChessKind>("rnbqkbnr"),
            Err(EngineError::InvalidDiagram(_))
        ));
        let bad_glyph = CHESS_START.replace("RNBQKBNR", "RNBQXBNR");
        assert!(parse_board::<ChessKind>(&bad_glyph).is_err());
        let short_row = CHESS_START.replace("RNBQKBNR", "RNBQKBN");
        assert!(parse_board::<ChessKind>(&short_row).is_err());
    }

    #[test]
    fn checkers_pieces_must_stand_on_dark_squares() {
        let light = "w.......\n........\n........\n........\n........\n........\n........\n........";
        assert!(parse_board::<CheckersKind>(light).is_err());
        let dark = ".w......\n........\n........\n........\n........\n........\n........\n........";
        assert!(parse_board::<CheckersKind>(dark).is_ok());
    }
}
