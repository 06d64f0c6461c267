use std::fmt::{self, Display, Formatter};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use super::square::Square;

/// A set of squares packed into a `u64`, one bit per square. Bit `row * 8 + col`
/// represents the square at that coordinate, so bit 0 is a8 and bit 63 is h1.
#[derive(Clone, Copy, PartialEq, Debug, PartialOrd, Eq, Ord, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Self = Self(0x0000000000000000);
    pub const ALL: Self = Self(0xFFFFFFFFFFFFFFFF);

    pub const ROW_0: Self = Self(0xFF);
    pub const ROW_1: Self = Self(0xFF00);
    pub const ROW_2: Self = Self(0xFF0000);
    pub const ROW_5: Self = Self(0xFF0000000000);
    pub const ROW_6: Self = Self(0xFF000000000000);
    pub const ROW_7: Self = Self(0xFF00000000000000);

    pub fn overlaps(&self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates the set squares from a8 towards h1.
    pub fn squares(self) -> BitboardSquares {
        BitboardSquares(self.0)
    }
}

pub struct BitboardSquares(u64);

impl Iterator for BitboardSquares {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Square::from_index(index))
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut result = String::new();
        for row in 0..8 {
            for col in 0..8 {
                let cell = match self.overlaps(Square::new(row, col).to_bitboard()) {
                    true => 'X',
                    false => '.',
                };
                result.push(cell);
            }
            result.push('\n');
        }
        write!(f, "{}", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares_iterates_in_index_order() {
        let bitboard = Square::new(7, 7).to_bitboard() | Square::new(0, 1).to_bitboard();
        let squares: Vec<Square> = bitboard.squares().collect();
        assert_eq!(squares, vec![Square::new(0, 1), Square::new(7, 7)]);
    }

    #[test]
    fn test_row_constants() {
        assert!(Bitboard::ROW_0.overlaps(Square::new(0, 4).to_bitboard()));
        assert!(Bitboard::ROW_7.overlaps(Square::new(7, 0).to_bitboard()));
        assert_eq!(Bitboard::ROW_5.count_ones(), 8);
    }
}
