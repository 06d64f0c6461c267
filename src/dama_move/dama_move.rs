use core::fmt;

use smallvec::SmallVec;

use crate::board::error::BoardError;
use crate::board::piece::Piece;
use crate::board::square::Square;
use crate::board::Board;

/// Squares visited by a move, origin first.
pub type MovePath = SmallVec<[Square; 8]>;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MoveKind {
    Normal,
    Capture,
}

/// A complete turn for one piece. For captures, `path` holds every landing
/// square of the chain and `captures` the squares of the jumped pieces, in the
/// order they were taken, so `path.len() == captures.len() + 1`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct DamaMove {
    path: MovePath,
    captures: MovePath,
    kind: MoveKind,
}

impl DamaMove {
    pub fn normal(from: Square, to: Square) -> Self {
        let mut path = MovePath::new();
        path.push(from);
        path.push(to);
        Self {
            path,
            captures: MovePath::new(),
            kind: MoveKind::Normal,
        }
    }

    pub fn capture(path: MovePath, captures: MovePath) -> Self {
        debug_assert_eq!(path.len(), captures.len() + 1);
        Self {
            path,
            captures,
            kind: MoveKind::Capture,
        }
    }

    pub fn from_square(&self) -> Square {
        self.path[0]
    }

    pub fn to_square(&self) -> Square {
        self.path[self.path.len() - 1]
    }

    pub fn path(&self) -> &[Square] {
        &self.path
    }

    pub fn captures(&self) -> &[Square] {
        &self.captures
    }

    pub fn capture_count(&self) -> usize {
        self.captures.len()
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    pub fn is_capture(&self) -> bool {
        self.kind == MoveKind::Capture
    }

    /// Produces the position after this move: the origin is cleared, every
    /// jumped piece is removed, the mover lands on the final square (promoted
    /// when a man reaches its farthest row) and the turn passes to the opponent.
    #[must_use = "applying a move returns the resulting board"]
    pub fn apply(&self, board: &Board) -> Result<Board, BoardError> {
        let mut next = *board;
        let from = self.from_square();
        let to = self.to_square();

        let (piece, color) = next.remove(from).ok_or(BoardError::EmptySquare(from))?;
        for &captured in self.captures.iter() {
            next.remove(captured)
                .ok_or(BoardError::EmptySquare(captured))?;
        }

        let landed = match piece {
            Piece::Man if to.row() == color.promotion_row() => Piece::King,
            other => other,
        };
        next.put(to, landed, color)?;
        next.set_turn(color.opposite());

        Ok(next)
    }
}

impl fmt::Display for DamaMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = match self.kind {
            MoveKind::Capture => 'x',
            MoveKind::Normal => '-',
        };
        write!(f, "{}{}{}", self.from_square(), separator, self.to_square())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::color::Color;
    use crate::dama_position;
    use smallvec::smallvec;

    #[test]
    fn test_apply_normal_move() {
        let board = Board::starting_position();
        let dama_move = DamaMove::normal(Square::new(5, 0), Square::new(4, 0));
        let next = dama_move.apply(&board).unwrap();

        assert_eq!(None, next.get(Square::new(5, 0)));
        assert_eq!(Some((Piece::Man, Color::White)), next.get(Square::new(4, 0)));
        assert_eq!(Color::Black, next.turn());
        assert_eq!(board.total_piece_count(), next.total_piece_count());
        // input board is untouched
        assert_eq!(Some((Piece::Man, Color::White)), board.get(Square::new(5, 0)));
    }

    #[test]
    fn test_apply_capture_chain_removes_only_captured_pieces() {
        let board = dama_position! {
            ........
            ........
            ........
            ..b.....
            ........
            ..b.....
            ..w.....
            ......b.
        };
        let dama_move = DamaMove::capture(
            smallvec![Square::new(6, 2), Square::new(4, 2), Square::new(2, 2)],
            smallvec![Square::new(5, 2), Square::new(3, 2)],
        );
        let next = dama_move.apply(&board).unwrap();

        assert_eq!(board.total_piece_count() - 2, next.total_piece_count());
        assert_eq!(1, next.piece_count(Color::Black));
        assert_eq!(Some((Piece::Man, Color::White)), next.get(Square::new(2, 2)));
    }

    #[test]
    fn test_white_man_promotes_on_row_zero() {
        for col in 0..8 {
            let mut board = Board::new();
            board.put(Square::new(1, col), Piece::Man, Color::White).unwrap();
            let next = DamaMove::normal(Square::new(1, col), Square::new(0, col))
                .apply(&board)
                .unwrap();
            assert_eq!(Some((Piece::King, Color::White)), next.get(Square::new(0, col)));
        }
    }

    #[test]
    fn test_black_man_promotes_on_row_seven() {
        let mut board = Board::new();
        board.set_turn(Color::Black);
        board.put(Square::new(6, 3), Piece::Man, Color::Black).unwrap();
        let next = DamaMove::normal(Square::new(6, 3), Square::new(7, 3))
            .apply(&board)
            .unwrap();
        assert_eq!(Some((Piece::King, Color::Black)), next.get(Square::new(7, 3)));
    }

    #[test]
    fn test_king_is_never_demoted() {
        let mut board = Board::new();
        board.put(Square::new(0, 0), Piece::King, Color::White).unwrap();
        let next = DamaMove::normal(Square::new(0, 0), Square::new(7, 0))
            .apply(&board)
            .unwrap();
        assert_eq!(Some((Piece::King, Color::White)), next.get(Square::new(7, 0)));
    }

    #[test]
    fn test_apply_from_empty_square_fails() {
        let board = Board::new();
        let result = DamaMove::normal(Square::new(4, 4), Square::new(3, 4)).apply(&board);
        assert_eq!(Err(BoardError::EmptySquare(Square::new(4, 4))), result);
    }

    #[test]
    fn test_display() {
        let normal = DamaMove::normal(Square::new(5, 0), Square::new(4, 0));
        assert_eq!("a3-a4", normal.to_string());

        let capture = DamaMove::capture(
            smallvec![Square::new(5, 0), Square::new(3, 0), Square::new(3, 2)],
            smallvec![Square::new(4, 0), Square::new(3, 1)],
        );
        assert_eq!("a3xc5", capture.to_string());
    }
}
