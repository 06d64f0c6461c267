use super::color::Color;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Piece {
    /// Moves one square forward or sideways, captures by short jumps.
    Man,
    /// Promoted piece; moves and captures any distance along a line.
    King,
}

impl Piece {
    pub fn to_char(&self, color: Color) -> char {
        match (self, color) {
            (Piece::Man, Color::White) => 'w',
            (Piece::King, Color::White) => 'W',
            (Piece::Man, Color::Black) => 'b',
            (Piece::King, Color::Black) => 'B',
        }
    }

    pub fn from_char(c: char) -> Option<(Piece, Color)> {
        match c {
            'w' => Some((Piece::Man, Color::White)),
            'W' => Some((Piece::King, Color::White)),
            'b' => Some((Piece::Man, Color::Black)),
            'B' => Some((Piece::King, Color::Black)),
            _ => None,
        }
    }
}
