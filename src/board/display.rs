use std::fmt;

use super::square::Square;
use super::Board;

impl Board {
    /// Renders the 64 cells row by row from a8, followed by the side to move.
    pub fn to_position_string(&self) -> String {
        let mut out = String::with_capacity(72);
        for row in 0..8 {
            for col in 0..8 {
                out.push(match self.get(Square::new(row, col)) {
                    Some((piece, color)) => piece.to_char(color),
                    None => '.',
                });
            }
            if row < 7 {
                out.push('/');
            }
        }
        out.push(' ');
        out.push(match self.turn() {
            super::color::Color::White => 'w',
            super::color::Color::Black => 'b',
        });
        out
    }

    pub fn to_ascii(&self) -> String {
        let divider = "  +---+---+---+---+---+---+---+---+\n";
        let rows: Vec<String> = (0..8)
            .map(|row| {
                let cells: Vec<String> = (0..8)
                    .map(|col| match self.get(Square::new(row, col)) {
                        Some((piece, color)) => piece.to_char(color),
                        None => ' ',
                    })
                    .map(|ch| ch.to_string())
                    .collect();
                format!("{} | {} |\n", 8 - row, cells.join(" | "))
            })
            .collect();
        format!(
            "{}{}{}    a   b   c   d   e   f   g   h\n",
            divider,
            rows.join(divider),
            divider
        )
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{} to move", self.to_ascii(), self.turn())
    }
}

/// Builds a `Board` from an 8x8 picture, first line = row 0 (rank 8).
/// `w`/`b` are men, `W`/`B` are kings and `.` is empty. White is to move.
#[macro_export]
macro_rules! dama_position {
    ($($piece:tt)*) => {{
        let mut board = $crate::board::Board::new();
        // Convert all input tokens to a string and filter out whitespace characters.
        let pieces: Vec<_> = stringify!($($piece)*)
            .chars()
            .filter(|&c| !c.is_whitespace())
            .collect();
        assert_eq!(pieces.len(), 64, "Invalid number of squares. Expected 64, got {}", pieces.len());
        for (i, &c) in pieces.iter().enumerate() {
            if c != '.' {
                let (piece, color) = $crate::board::piece::Piece::from_char(c)
                    .expect("Invalid character in dama position");
                board
                    .put($crate::board::square::Square::from_index(i as u8), piece, color)
                    .expect("dama position squares are distinct");
            }
        }
        board
    }};
}

#[cfg(test)]
mod tests {
    use crate::board::color::Color;
    use crate::board::piece::Piece;
    use crate::board::square::Square;

    #[test]
    fn test_macro_places_pieces_from_the_top_row() {
        let board = dama_position! {
            W.......
            ........
            ........
            ........
            ........
            ........
            ........
            .......b
        };
        assert_eq!(Some((Piece::King, Color::White)), board.get(Square::new(0, 0)));
        assert_eq!(Some((Piece::Man, Color::Black)), board.get(Square::new(7, 7)));
        assert_eq!(2, board.total_piece_count());
    }

    #[test]
    fn test_ascii_contains_rank_labels() {
        let ascii = crate::board::Board::starting_position().to_ascii();
        assert!(ascii.contains("8 |"));
        assert!(ascii.contains("1 |"));
        assert!(ascii.contains("a   b"));
    }
}
