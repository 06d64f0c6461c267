//! Coordinate notation for user input, e.g. `c3-c4` or `c3xc5`.
//!
//! Only the start and final landing square are written for multi-capture
//! chains; the legal move set is used to resolve the full path.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::board::error::BoardError;
use crate::board::square::Square;

static MOVE_INPUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-hA-H][1-8])\s*[-xX:]?\s*([a-hA-H][1-8])$")
        .expect("static move pattern is valid")
});

/// Parses a user-entered move into its `(from, to)` squares.
pub fn parse_move_input(input: &str) -> Result<(Square, Square), BoardError> {
    let trimmed = input.trim();
    let caps = MOVE_INPUT
        .captures(trimmed)
        .ok_or_else(|| BoardError::InvalidMoveNotation(trimmed.to_string()))?;

    let from = Square::from_algebraic(&caps[1])?;
    let to = Square::from_algebraic(&caps[2])?;
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normal_move() {
        assert_eq!(
            (Square::new(5, 2), Square::new(4, 2)),
            parse_move_input("c3-c4").unwrap()
        );
    }

    #[test]
    fn test_parse_capture_move() {
        assert_eq!(
            (Square::new(5, 2), Square::new(3, 2)),
            parse_move_input("  c3xc5 ").unwrap()
        );
    }

    #[test]
    fn test_parse_without_separator() {
        assert_eq!(
            (Square::new(0, 0), Square::new(7, 7)),
            parse_move_input("a8h1").unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_move_input("castle"),
            Err(BoardError::InvalidMoveNotation(_))
        ));
        assert!(parse_move_input("c9-c4").is_err());
    }
}
