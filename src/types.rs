//! negamax_chess - Type definitions and constants
//!
//! This module provides the core type definitions for representing chess
//! pieces, colors, squares and castling rights.

use std::fmt;
use std::str::FromStr;

use crate::error::ChessError;

/// File and rank names for algebraic notation
pub const FILE_NAMES: &[u8; 8] = b"abcdefgh";
pub const RANK_NAMES: &[u8; 8] = b"12345678";

/// Side of the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index usable for `[T; 2]` tables (white = 0, black = 1)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Rank direction pawns of this color advance in
    #[inline]
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank pawns of this color start on
    #[inline]
    pub fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank pawns of this color promote on
    #[inline]
    pub fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank the king and rooks start on
    #[inline]
    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Kind of piece, independent of color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Pieces a pawn may promote to, in generation order
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Lowercase letter used in FEN and UCI notation
    pub fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parse a piece letter, either case
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }
}

/// FEN piece character to piece value
pub fn fen_to_piece(c: char) -> Option<Piece> {
    let kind = PieceKind::from_char(c)?;
    let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
    Some(Piece::new(color, kind))
}

/// Piece value to FEN character
pub fn piece_to_fen(piece: Piece) -> char {
    let c = piece.kind.to_char();
    match piece.color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

/// One of the 64 board coordinates (0 = a1, 1 = b1, ..., 63 = h8)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);

    /// Build a square from zero-based file and rank; `None` if off the board
    #[inline]
    pub fn new(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Build a square from its 0..64 index
    #[inline]
    pub fn from_index(index: usize) -> Option<Square> {
        if index < 64 {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    /// All 64 squares, a1 first
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Step by a file/rank delta, `None` when that leaves the board
    #[inline]
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Square> {
        let file = self.file() as i8 + d_file;
        let rank = self.rank() as i8 + d_rank;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Same file, another rank (rank must be 0..8)
    #[inline]
    pub(crate) fn with_rank(self, rank: u8) -> Square {
        debug_assert!(rank < 8);
        Square(rank * 8 + self.file())
    }

    /// True for light squares (a1 is dark)
    #[inline]
    pub fn is_light(self) -> bool {
        (self.file() + self.rank()) % 2 == 1
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            FILE_NAMES[self.file() as usize] as char,
            RANK_NAMES[self.rank() as usize] as char
        )
    }
}

impl FromStr for Square {
    type Err = ChessError;

    /// Convert algebraic notation ("e4") to a square
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let bytes = name.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidSquare(name.to_string()));
        }
        let file = match bytes[0] {
            b'a'..=b'h' => bytes[0] - b'a',
            _ => return Err(ChessError::InvalidSquare(name.to_string())),
        };
        let rank = match bytes[1] {
            b'1'..=b'8' => bytes[1] - b'1',
            _ => return Err(ChessError::InvalidSquare(name.to_string())),
        };
        Ok(Square(rank * 8 + file))
    }
}

/// Castling availability, one flag per king/rook pairing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub fn kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    pub fn queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    /// Drop both rights of one side (its king moved)
    pub fn clear_color(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }

    /// Drop the right tied to a rook's home corner, if `sq` is one
    pub fn clear_corner(&mut self, sq: Square) {
        match sq {
            Square::A1 => self.white_queenside = false,
            Square::H1 => self.white_kingside = false,
            Square::A8 => self.black_queenside = false,
            Square::H8 => self.black_kingside = false,
            _ => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == CastlingRights::NONE
    }
}

impl fmt::Display for CastlingRights {
    /// FEN castling field ("KQkq", "-")
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        if self.white_kingside { write!(f, "K")?; }
        if self.white_queenside { write!(f, "Q")?; }
        if self.black_kingside { write!(f, "k")?; }
        if self.black_queenside { write!(f, "q")?; }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_names_round_trip_through_parse() {
        let e4: Square = "e4".parse().unwrap();
        assert_eq!(e4.file(), 4);
        assert_eq!(e4.rank(), 3);
        assert_eq!(e4.to_string(), "e4");
        assert_eq!("a1".parse::<Square>().unwrap(), Square::A1);
        assert_eq!("h8".parse::<Square>().unwrap(), Square::H8);
    }

    #[test]
    fn bad_square_names_are_rejected() {
        for name in ["", "e", "e9", "i1", "e44", "E4"] {
            assert!(name.parse::<Square>().is_err(), "{name} should not parse");
        }
    }

    #[test]
    fn offsets_stop_at_the_edge() {
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::A1.offset(1, 2), "b3".parse().ok());
    }

    #[test]
    fn fen_piece_chars_map_both_ways() {
        let black_knight = fen_to_piece('n').unwrap();
        assert_eq!(black_knight, Piece::new(Color::Black, PieceKind::Knight));
        assert_eq!(piece_to_fen(black_knight), 'n');
        assert_eq!(piece_to_fen(Piece::new(Color::White, PieceKind::Queen)), 'Q');
        assert_eq!(fen_to_piece('x'), None);
    }

    #[test]
    fn castling_rights_clear_by_corner_and_color() {
        let mut rights = CastlingRights::ALL;
        rights.clear_corner(Square::H1);
        assert!(!rights.white_kingside);
        assert!(rights.white_queenside);
        rights.clear_color(Color::Black);
        assert_eq!(rights.to_string(), "Q");
        rights.clear_corner(Square::A1);
        assert_eq!(rights.to_string(), "-");
    }
}
