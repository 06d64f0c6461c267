use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::bitboard::Bitboard;
use super::error::BoardError;

pub const BOARD_SIZE: i8 = 8;

static ALGEBRAIC_SQUARE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^([a-hA-H])([1-8])$").expect("static square pattern is valid"));

/// A board coordinate. Row 0 is rank 8 (black's home side) and column 0 is
/// the a-file, so `Square::new(0, 0)` is a8 and `Square::new(7, 7)` is h1.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

/// The four orthogonal directions; Dama pieces never move diagonally.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Self(row * 8 + col)
    }

    pub fn from_index(index: u8) -> Self {
        debug_assert!(index < 64);
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn row(self) -> u8 {
        self.0 / 8
    }

    pub fn col(self) -> u8 {
        self.0 % 8
    }

    pub fn to_bitboard(self) -> Bitboard {
        Bitboard(1 << self.0)
    }

    /// Returns the square `steps` squares away in `direction`, or `None` when
    /// that would leave the board.
    pub fn offset(self, direction: Direction, steps: i8) -> Option<Square> {
        let (dr, dc) = direction.delta();
        let row = self.row() as i8 + dr * steps;
        let col = self.col() as i8 + dc * steps;
        if (0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Walks from this square (exclusive) to the board edge in `direction`.
    pub fn ray(self, direction: Direction) -> impl Iterator<Item = Square> {
        (1..BOARD_SIZE).map_while(move |steps| self.offset(direction, steps))
    }

    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.col()) as char;
        let rank = 8 - self.row();
        format!("{}{}", file, rank)
    }

    pub fn from_algebraic(algebraic: &str) -> Result<Square, BoardError> {
        let caps = ALGEBRAIC_SQUARE
            .captures(algebraic.trim())
            .ok_or_else(|| BoardError::InvalidSquare(algebraic.to_string()))?;
        let file = caps[1].to_ascii_lowercase().as_bytes()[0] - b'a';
        let rank = caps[2].as_bytes()[0] - b'0';
        Ok(Square::new(8 - rank, file))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row(), self.col())
    }
}
