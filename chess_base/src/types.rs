use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordError {
    #[error("square ({row}, {col}) is outside the board")]
    OutOfBounds { row: u8, col: u8 },
    #[error("unexpected file char {0:?}")]
    UnexpectedFile(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRank(char),
    #[error("invalid string length")]
    BadLength,
}

/// Square on the board
///
/// Rows and columns are numbered from 1 to 8. Row 1 is White's back rank, column 1 is the
/// "a" file. Internally, the square is packed as `(row - 1) * 8 + (col - 1)`, so iterating
/// over indices visits the squares row by row, starting from row 1.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord(u8);

impl Coord {
    pub const fn from_index(val: u8) -> Coord {
        assert!(val < 64, "coord must be between 0 and 63");
        Coord(val)
    }

    /// Creates a square from its row and column, both in range `1..=8`
    ///
    /// Panics if the square lies outside the board. Use [`Coord::new()`] for unchecked input.
    pub const fn from_parts(row: u8, col: u8) -> Coord {
        assert!(row >= 1 && row <= 8, "row must be between 1 and 8");
        assert!(col >= 1 && col <= 8, "column must be between 1 and 8");
        Coord((row - 1) * 8 + (col - 1))
    }

    pub fn new(row: u8, col: u8) -> Result<Coord, CoordError> {
        if !(1..=8).contains(&row) || !(1..=8).contains(&col) {
            return Err(CoordError::OutOfBounds { row, col });
        }
        Ok(Coord::from_parts(row, col))
    }

    pub const fn row(&self) -> u8 {
        (self.0 >> 3) + 1
    }

    pub const fn col(&self) -> u8 {
        (self.0 & 7) + 1
    }

    pub const fn index(&self) -> u8 {
        self.0
    }

    /// Returns the square shifted by `delta_row` rows and `delta_col` columns, or `None` if
    /// it falls off the board
    pub fn try_shift(self, delta_row: i8, delta_col: i8) -> Option<Coord> {
        let row = self.row() as i8 + delta_row;
        let col = self.col() as i8 + delta_col;
        if !(1..=8).contains(&row) || !(1..=8).contains(&col) {
            return None;
        }
        Some(Coord::from_parts(row as u8, col as u8))
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0_u8..64_u8).map(Coord)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.0 < 64 {
            return write!(f, "Coord({})", self);
        }
        write!(f, "Coord(?{:?})", self.0)
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "{}{}",
            (b'a' + self.col() - 1) as char,
            (b'0' + self.row()) as char
        )
    }
}

impl FromStr for Coord {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 {
            return Err(CoordError::BadLength);
        }
        let bytes = s.as_bytes();
        let col = match bytes[0] {
            b @ b'a'..=b'h' => b - b'a' + 1,
            b => return Err(CoordError::UnexpectedFile(b as char)),
        };
        let row = match bytes[1] {
            b @ b'1'..=b'8' => b - b'0',
            b => return Err(CoordError::UnexpectedRank(b as char)),
        };
        Ok(Coord::from_parts(row, col))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    King = 0,
    Queen = 1,
    Bishop = 2,
    Knight = 3,
    Rook = 4,
    Pawn = 5,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
        PieceKind::Pawn,
    ];

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    /// Returns `true` for pieces that walk along lines until blocked
    pub const fn is_sliding(&self) -> bool {
        matches!(*self, PieceKind::Queen | PieceKind::Bishop | PieceKind::Rook)
    }

    /// Returns the uppercase letter of the piece
    pub fn as_char(&self) -> char {
        b"KQBNRP"[self.index()] as char
    }

    /// Parses the piece letter, ignoring its case
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::King),
            'q' => Some(PieceKind::Queen),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            'r' => Some(PieceKind::Rook),
            'p' => Some(PieceKind::Pawn),
            _ => None,
        }
    }
}

/// Target piece for promotion
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotePiece {
    Queen = 1,
    Bishop = 2,
    Knight = 3,
    Rook = 4,
}

impl PromotePiece {
    /// All the promotion targets, in the order they are generated
    pub const ALL: [PromotePiece; 4] = [
        PromotePiece::Queen,
        PromotePiece::Bishop,
        PromotePiece::Knight,
        PromotePiece::Rook,
    ];

    pub fn as_char(&self) -> char {
        PieceKind::from(*self).as_char().to_ascii_lowercase()
    }

    pub fn from_char(c: char) -> Option<PromotePiece> {
        PieceKind::from_char(c)?.try_into().ok()
    }
}

impl From<PromotePiece> for PieceKind {
    #[inline]
    fn from(p: PromotePiece) -> Self {
        match p {
            PromotePiece::Queen => PieceKind::Queen,
            PromotePiece::Bishop => PieceKind::Bishop,
            PromotePiece::Knight => PieceKind::Knight,
            PromotePiece::Rook => PieceKind::Rook,
        }
    }
}

impl TryFrom<PieceKind> for PromotePiece {
    type Error = ();

    #[inline]
    fn try_from(p: PieceKind) -> Result<Self, Self::Error> {
        match p {
            PieceKind::Queen => Ok(PromotePiece::Queen),
            PieceKind::Bishop => Ok(PromotePiece::Bishop),
            PieceKind::Knight => Ok(PromotePiece::Knight),
            PieceKind::Rook => Ok(PromotePiece::Rook),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queen = 0,
    King = 1,
}

/// Forced end of the game
///
/// Only the outcomes that follow from the position itself are represented. Repetitions,
/// move counters and agreements are not tracked.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The side to move is checkmated
    Checkmate { winner: Color },
    /// The side to move is not in check, but has no legal moves
    Stalemate,
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Checkmate { winner } => Some(winner),
            Outcome::Stalemate => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(*self, Outcome::Stalemate)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Outcome::Checkmate {
                winner: Color::White,
            } => write!(f, "1-0 (checkmate)"),
            Outcome::Checkmate {
                winner: Color::Black,
            } => write!(f, "0-1 (checkmate)"),
            Outcome::Stalemate => write!(f, "1/2-1/2 (stalemate)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord() {
        let mut coords = Vec::new();
        for row in 1..=8 {
            for col in 1..=8 {
                let coord = Coord::new(row, col).unwrap();
                assert_eq!(coord.row(), row);
                assert_eq!(coord.col(), col);
                coords.push(coord);
            }
        }
        assert_eq!(coords, Coord::iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_coord_bounds() {
        assert_eq!(
            Coord::new(0, 4),
            Err(CoordError::OutOfBounds { row: 0, col: 4 })
        );
        assert_eq!(
            Coord::new(3, 9),
            Err(CoordError::OutOfBounds { row: 3, col: 9 })
        );
        assert!(Coord::new(8, 8).is_ok());
        assert!(Coord::new(1, 1).is_ok());
    }

    #[test]
    fn test_shift() {
        let c = Coord::from_parts(1, 1);
        assert_eq!(c.try_shift(1, 2), Some(Coord::from_parts(2, 3)));
        assert_eq!(c.try_shift(-1, 0), None);
        assert_eq!(c.try_shift(0, -1), None);
        assert_eq!(Coord::from_parts(8, 8).try_shift(1, 1), None);
        assert_eq!(
            Coord::from_parts(5, 5).try_shift(-2, -1),
            Some(Coord::from_parts(3, 4))
        );
    }

    #[test]
    fn test_coord_str() {
        assert_eq!(Coord::from_parts(4, 2).to_string(), "b4");
        assert_eq!(Coord::from_parts(1, 1).to_string(), "a1");
        assert_eq!(Coord::from_parts(8, 8).to_string(), "h8");
        assert_eq!(Coord::from_str("a1"), Ok(Coord::from_parts(1, 1)));
        assert_eq!(Coord::from_str("e4"), Ok(Coord::from_parts(4, 5)));
        assert_eq!(Coord::from_str("h9"), Err(CoordError::UnexpectedRank('9')));
        assert_eq!(Coord::from_str("i4"), Err(CoordError::UnexpectedFile('i')));
        assert_eq!(Coord::from_str("e44"), Err(CoordError::BadLength));
        assert_eq!(format!("{:?}", Coord::from_parts(2, 5)), "Coord(e2)");
    }

    #[test]
    fn test_piece_chars() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
        for p in PromotePiece::ALL {
            assert_eq!(PromotePiece::from_char(p.as_char()), Some(p));
        }
        assert_eq!(PromotePiece::from_char('k'), None);
        assert_eq!(PromotePiece::from_char('p'), None);
        assert_eq!(PromotePiece::Knight.as_char(), 'n');
    }

    #[test]
    fn test_promote_conversions() {
        for p in PromotePiece::ALL {
            let kind = PieceKind::from(p);
            assert_eq!(PromotePiece::try_from(kind), Ok(p));
        }
        assert!(PromotePiece::try_from(PieceKind::King).is_err());
        assert!(PromotePiece::try_from(PieceKind::Pawn).is_err());
    }

    #[test]
    fn test_outcome() {
        let mate = Outcome::Checkmate {
            winner: Color::Black,
        };
        assert_eq!(mate.winner(), Some(Color::Black));
        assert!(!mate.is_draw());
        assert_eq!(mate.to_string(), "0-1 (checkmate)");
        assert_eq!(Outcome::Stalemate.winner(), None);
        assert!(Outcome::Stalemate.is_draw());
        assert_eq!(Color::White.inv(), Color::Black);
    }
}
