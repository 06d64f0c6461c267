use thiserror::Error;

use super::square::Square;

#[derive(Error, Debug, PartialEq)]
pub enum BoardError {
    #[error("Cannot put a piece on {0}, the square is already occupied")]
    SquareOccupied(Square),
    #[error("Invalid square `{0}`, expected a file a-h followed by a rank 1-8")]
    InvalidSquare(String),
    #[error("Invalid position: {msg}")]
    InvalidPosition { msg: String },
    #[error("No piece on {0}")]
    EmptySquare(Square),
    #[error("Invalid move `{0}`, expected something like `c3-c4` or `c3xc5`")]
    InvalidMoveNotation(String),
}
