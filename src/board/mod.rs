pub mod bitboard;
pub mod color;
pub mod error;
pub mod piece;
pub mod square;

mod display;
mod piece_set;

use std::str::FromStr;

use bitboard::Bitboard;
use color::Color;
use error::BoardError;
use piece::Piece;
use square::Square;

pub use piece_set::PieceSet;

/// Both sides start with 16 men; no legal position holds more pieces.
pub const MAX_PIECES: u32 = 32;

/// Represents a Dama position: piece placement for both sides plus the
/// player to move. Boards are small `Copy` values; applying a move produces a
/// new board rather than mutating a shared one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    white: PieceSet,
    black: PieceSet,
    turn: Color,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            white: PieceSet::new(),
            black: PieceSet::new(),
            turn: Color::White,
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Default::default()
    }

    /// Black men on rows 1 and 2, white men on rows 5 and 6, white to move.
    pub fn starting_position() -> Self {
        crate::dama_position! {
            ........
            bbbbbbbb
            bbbbbbbb
            ........
            ........
            wwwwwwww
            wwwwwwww
            ........
        }
    }

    pub fn pieces(&self, color: Color) -> &PieceSet {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn pieces_mut(&mut self, color: Color) -> &mut PieceSet {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    pub fn occupied(&self) -> Bitboard {
        self.white.occupied() | self.black.occupied()
    }

    pub fn is_empty_square(&self, square: Square) -> bool {
        !self.occupied().overlaps(square.to_bitboard())
    }

    pub fn get(&self, square: Square) -> Option<(Piece, Color)> {
        if let Some(piece) = self.white.get(square) {
            return Some((piece, Color::White));
        }
        self.black.get(square).map(|piece| (piece, Color::Black))
    }

    pub fn put(&mut self, square: Square, piece: Piece, color: Color) -> Result<(), BoardError> {
        if !self.is_empty_square(square) {
            return Err(BoardError::SquareOccupied(square));
        }
        self.pieces_mut(color).put(square, piece)
    }

    pub fn remove(&mut self, square: Square) -> Option<(Piece, Color)> {
        let (piece, color) = self.get(square)?;
        self.pieces_mut(color).remove(square)?;
        Some((piece, color))
    }

    /// Slides a piece onto an empty square. Used by the capture search on its
    /// scratch boards, where the destination is known to be empty.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        debug_assert!(self.is_empty_square(to));
        if let Some((_, color)) = self.get(from) {
            self.pieces_mut(color).relocate(from, to);
        }
    }

    pub fn piece_count(&self, color: Color) -> u32 {
        self.pieces(color).count()
    }

    pub fn total_piece_count(&self) -> u32 {
        self.white.count() + self.black.count()
    }

    /// Iterates every piece on the board as `(square, piece, color)`.
    pub fn iter_pieces(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        self.occupied().squares().filter_map(move |square| {
            self.get(square)
                .map(|(piece, color)| (square, piece, color))
        })
    }
}

/// Parses a position written as 64 cells (`.`, `w`, `W`, `b`, `B`) from a8 to
/// h1, optionally separated by `/` or whitespace, followed by an optional
/// side to move (`w` or `b`, default white).
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();

        if cells.len() != 64 && cells.len() != 65 {
            return Err(BoardError::InvalidPosition {
                msg: format!("expected 64 squares and an optional turn, got {} characters", cells.len()),
            });
        }

        let mut board = Board::new();
        for (i, &c) in cells.iter().take(64).enumerate() {
            if c == '.' {
                continue;
            }
            let (piece, color) = Piece::from_char(c).ok_or_else(|| BoardError::InvalidPosition {
                msg: format!("unexpected character `{}`", c),
            })?;
            board.put(Square::from_index(i as u8), piece, color)?;
        }

        if board.total_piece_count() > MAX_PIECES {
            return Err(BoardError::InvalidPosition {
                msg: format!(
                    "{} pieces on the board, at most {} are allowed",
                    board.total_piece_count(),
                    MAX_PIECES
                ),
            });
        }

        if let Some(&turn) = cells.get(64) {
            let turn = match turn {
                'w' => Color::White,
                'b' => Color::Black,
                other => {
                    return Err(BoardError::InvalidPosition {
                        msg: format!("unexpected side to move `{}`", other),
                    })
                }
            };
            board.set_turn(turn);
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_piece_counts() {
        let board = Board::starting_position();
        assert_eq!(16, board.piece_count(Color::White));
        assert_eq!(16, board.piece_count(Color::Black));
        assert_eq!(Color::White, board.turn());
        assert_eq!(Some((Piece::Man, Color::White)), board.get(Square::new(5, 0)));
        assert_eq!(Some((Piece::Man, Color::Black)), board.get(Square::new(1, 7)));
        assert_eq!(None, board.get(Square::new(0, 0)));
        assert_eq!(None, board.get(Square::new(4, 4)));
    }

    #[test]
    fn test_put_on_occupied_square_fails() {
        let mut board = Board::starting_position();
        let result = board.put(Square::new(5, 0), Piece::King, Color::Black);
        assert_eq!(Err(BoardError::SquareOccupied(Square::new(5, 0))), result);
    }

    #[test]
    fn test_remove() {
        let mut board = Board::starting_position();
        assert_eq!(
            Some((Piece::Man, Color::Black)),
            board.remove(Square::new(2, 3))
        );
        assert!(board.is_empty_square(Square::new(2, 3)));
        assert_eq!(15, board.piece_count(Color::Black));
        assert_eq!(None, board.remove(Square::new(2, 3)));
    }

    #[test]
    fn test_parse_round_trips_display_cells() {
        let board = Board::starting_position();
        let parsed: Board = board.to_position_string().parse().unwrap();
        assert_eq!(board, parsed);
    }

    #[test]
    fn test_parse_turn_suffix() {
        let input = format!("{} b", ".".repeat(63) + "W");
        let board: Board = input.parse().unwrap();
        assert_eq!(Color::Black, board.turn());
        assert_eq!(Some((Piece::King, Color::White)), board.get(Square::new(7, 7)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("abc".parse::<Board>().is_err());
        let mut garbage = ".".repeat(63);
        garbage.push('x');
        assert!(garbage.parse::<Board>().is_err());
    }

    #[test]
    fn test_parse_rejects_too_many_pieces() {
        let full = "w".repeat(32) + &"b".repeat(32);
        assert!(matches!(
            full.parse::<Board>(),
            Err(BoardError::InvalidPosition { .. })
        ));

        let at_limit = "w".repeat(16) + &".".repeat(32) + &"b".repeat(16);
        let board: Board = at_limit.parse().unwrap();
        assert_eq!(MAX_PIECES, board.total_piece_count());
    }
}
