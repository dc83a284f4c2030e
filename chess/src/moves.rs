//! Moves and their text form

use crate::types::{Coord, CoordError, PromotePiece};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing a move from its coordinate form
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveParseError {
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Bad source square
    #[error("bad source: {0}")]
    BadSrc(CoordError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    BadDst(CoordError),
    /// Bad promote character
    #[error("bad promote char {0:?}")]
    BadPromote(char),
}

/// Chess move
///
/// A move is just a source square, a destination square and an optional promotion target.
/// Castling is encoded as a king move by two columns, en passant as a diagonal pawn move onto an
/// empty square. Moves are compared structurally over all three fields.
///
/// The text form is the coordinate notation, such as `e2e4` or `e7e8q`:
///
/// ```
/// # use chessrules::{Coord, Move, PromotePiece};
/// #
/// let mv: Move = "e7e8q".parse().unwrap();
/// assert_eq!(mv.src(), Coord::from_parts(7, 5));
/// assert_eq!(mv.dst(), Coord::from_parts(8, 5));
/// assert_eq!(mv.promote(), Some(PromotePiece::Queen));
/// assert_eq!(mv.to_string(), "e7e8q");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    src: Coord,
    dst: Coord,
    promote: Option<PromotePiece>,
}

impl Move {
    #[inline]
    pub const fn new(src: Coord, dst: Coord) -> Move {
        Move {
            src,
            dst,
            promote: None,
        }
    }

    #[inline]
    pub const fn with_promotion(src: Coord, dst: Coord, promote: PromotePiece) -> Move {
        Move {
            src,
            dst,
            promote: Some(promote),
        }
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    #[inline]
    pub const fn promote(&self) -> Option<PromotePiece> {
        self.promote
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.promote.is_some()
    }

    /// Signed column difference between destination and source
    #[inline]
    pub(crate) fn col_delta(&self) -> i8 {
        self.dst.col() as i8 - self.src.col() as i8
    }

    /// Signed row difference between destination and source
    #[inline]
    pub(crate) fn row_delta(&self) -> i8 {
        self.dst.row() as i8 - self.src.row() as i8
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)?;
        if let Some(p) = self.promote {
            write!(f, "{}", p.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if !s.is_ascii() || !matches!(s.len(), 4 | 5) {
            return Err(MoveParseError::BadLength);
        }
        let src = Coord::from_str(&s[0..2]).map_err(MoveParseError::BadSrc)?;
        let dst = Coord::from_str(&s[2..4]).map_err(MoveParseError::BadDst)?;
        if s.len() == 5 {
            let c = s.as_bytes()[4] as char;
            let promote = PromotePiece::from_char(c)
                .filter(|_| c.is_ascii_lowercase())
                .ok_or(MoveParseError::BadPromote(c))?;
            return Ok(Move::with_promotion(src, dst, promote));
        }
        Ok(Move::new(src, dst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let e2 = Coord::from_parts(2, 5);
        let e4 = Coord::from_parts(4, 5);
        assert_eq!(Move::from_str("e2e4"), Ok(Move::new(e2, e4)));
        assert_eq!(
            Move::from_str("a2a1n"),
            Ok(Move::with_promotion(
                Coord::from_parts(2, 1),
                Coord::from_parts(1, 1),
                PromotePiece::Knight
            ))
        );
        assert_eq!(Move::from_str("e2e"), Err(MoveParseError::BadLength));
        assert_eq!(Move::from_str("e2e4qq"), Err(MoveParseError::BadLength));
        assert_eq!(Move::from_str("ж2e4"), Err(MoveParseError::BadLength));
        assert_eq!(
            Move::from_str("x2e4"),
            Err(MoveParseError::BadSrc(CoordError::UnexpectedFile('x')))
        );
        assert_eq!(
            Move::from_str("e2e0"),
            Err(MoveParseError::BadDst(CoordError::UnexpectedRank('0')))
        );
        assert_eq!(Move::from_str("e7e8k"), Err(MoveParseError::BadPromote('k')));
        assert_eq!(Move::from_str("e7e8Q"), Err(MoveParseError::BadPromote('Q')));
    }

    #[test]
    fn test_format() {
        let mv = Move::new(Coord::from_parts(1, 7), Coord::from_parts(3, 6));
        assert_eq!(mv.to_string(), "g1f3");
        assert!(!mv.is_promotion());
        assert_eq!(mv.col_delta(), -1);
        assert_eq!(mv.row_delta(), 2);

        let mv = Move::with_promotion(
            Coord::from_parts(2, 8),
            Coord::from_parts(1, 7),
            PromotePiece::Rook,
        );
        assert_eq!(mv.to_string(), "h2g1r");
        assert!(mv.is_promotion());
    }

    #[test]
    fn test_equality() {
        let src = Coord::from_parts(7, 1);
        let dst = Coord::from_parts(8, 1);
        assert_eq!(
            Move::with_promotion(src, dst, PromotePiece::Queen),
            Move::with_promotion(src, dst, PromotePiece::Queen)
        );
        assert_ne!(
            Move::with_promotion(src, dst, PromotePiece::Queen),
            Move::with_promotion(src, dst, PromotePiece::Bishop)
        );
        assert_ne!(Move::new(src, dst), Move::with_promotion(src, dst, PromotePiece::Queen));
    }
}
