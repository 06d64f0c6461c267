use smallvec::SmallVec;

use crate::board::square::Square;
use crate::dama_move::{DamaMove, MoveKind};

/// A list of dama moves that is optimized for small sizes.
pub type DamaMoveList = SmallVec<[DamaMove; 32]>;

/// The legal moves for one side, all of the same kind. When any capture is
/// available the set contains only captures of the maximum length.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveSet {
    kind: MoveKind,
    moves: DamaMoveList,
}

impl MoveSet {
    pub fn new(kind: MoveKind, moves: DamaMoveList) -> Self {
        Self { kind, moves }
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    pub fn moves(&self) -> &[DamaMove] {
        &self.moves
    }

    pub fn into_moves(self) -> DamaMoveList {
        self.moves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DamaMove> {
        self.moves.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn contains(&self, dama_move: &DamaMove) -> bool {
        self.moves.contains(dama_move)
    }

    /// Origins of the pieces that are obliged to capture, in board order.
    pub fn mandatory_capture_squares(&self) -> Vec<Square> {
        if self.kind != MoveKind::Capture {
            return Vec::new();
        }
        let mut squares: Vec<Square> = self.moves.iter().map(DamaMove::from_square).collect();
        squares.sort();
        squares.dedup();
        squares
    }

    /// Legal moves that start on `from` and finish on `to`. More than one
    /// entry means several capture chains share the same end points.
    pub fn find(&self, from: Square, to: Square) -> Vec<&DamaMove> {
        self.moves
            .iter()
            .filter(|m| m.from_square() == from && m.to_square() == to)
            .collect()
    }

    /// Captures from `from` whose first landing square is `step`.
    pub fn find_by_first_step(&self, from: Square, step: Square) -> Vec<&DamaMove> {
        if self.kind != MoveKind::Capture {
            return Vec::new();
        }
        self.moves
            .iter()
            .filter(|m| m.from_square() == from && m.path().get(1) == Some(&step))
            .collect()
    }

    pub fn destinations_from(&self, from: Square) -> Vec<Square> {
        let mut squares: Vec<Square> = self
            .moves
            .iter()
            .filter(|m| m.from_square() == from)
            .map(DamaMove::to_square)
            .collect();
        squares.sort();
        squares.dedup();
        squares
    }
}

impl<'a> IntoIterator for &'a MoveSet {
    type Item = &'a DamaMove;
    type IntoIter = std::slice::Iter<'a, DamaMove>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
