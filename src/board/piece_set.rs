use super::bitboard::Bitboard;
use super::error::BoardError;
use super::piece::Piece;
use super::square::Square;

/// Encapsulates the state for one side's pieces, represented as bitboards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct PieceSet {
    men: Bitboard,
    kings: Bitboard,
}

impl PieceSet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn locate(&self, piece: Piece) -> Bitboard {
        match piece {
            Piece::Man => self.men,
            Piece::King => self.kings,
        }
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        let bb = square.to_bitboard();
        if self.men.overlaps(bb) {
            Some(Piece::Man)
        } else if self.kings.overlaps(bb) {
            Some(Piece::King)
        } else {
            None
        }
    }

    pub fn occupied(&self) -> Bitboard {
        self.men | self.kings
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupied().overlaps(square.to_bitboard())
    }

    pub fn count(&self) -> u32 {
        self.occupied().count_ones()
    }

    pub fn put(&mut self, square: Square, piece: Piece) -> Result<(), BoardError> {
        if self.is_occupied(square) {
            return Err(BoardError::SquareOccupied(square));
        }

        match piece {
            Piece::Man => self.men |= square.to_bitboard(),
            Piece::King => self.kings |= square.to_bitboard(),
        }

        Ok(())
    }

    /// Moves whatever stands on `from` to `to` without changing its kind.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        let path = from.to_bitboard() | to.to_bitboard();
        if self.men.overlaps(from.to_bitboard()) {
            self.men ^= path;
        } else if self.kings.overlaps(from.to_bitboard()) {
            self.kings ^= path;
        }
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let removed_piece = self.get(square)?;
        let bb = square.to_bitboard();
        match removed_piece {
            Piece::Man => self.men ^= bb,
            Piece::King => self.kings ^= bb,
        }
        Some(removed_piece)
    }
}
