//! Pieces standing on the board

use crate::board::Board;
use crate::movegen::{self, MoveList};
use crate::moves::Move;
use crate::types::{Color, Coord, PieceKind};

use std::fmt;

/// Piece of a given color and kind
///
/// Besides the color and the kind, each piece carries the `moved` flag, which is set once the
/// piece lands on a destination square of an executed move. The flag is what keeps track of the
/// castling rights: a king or a rook that has moved can never castle again.
///
/// Pieces are plain values owned by the board, so copying a board never shares pieces between
/// copies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    moved: bool,
}

impl Piece {
    /// Creates a piece which has not moved yet
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece {
            color,
            kind,
            moved: false,
        }
    }

    /// Returns the same piece with the `moved` flag set to `moved`
    #[inline]
    pub const fn with_moved(self, moved: bool) -> Piece {
        Piece {
            color: self.color,
            kind: self.kind,
            moved,
        }
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.moved
    }

    #[inline]
    pub(crate) fn mark_moved(&mut self) {
        self.moved = true;
    }

    /// Returns `true` if the piece has color `color` and kind `kind`, regardless of `moved`
    #[inline]
    pub fn is(&self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }

    /// Returns the letter of the piece, uppercase for White and lowercase for Black
    pub fn as_char(&self) -> char {
        match self.color {
            Color::White => self.kind.as_char(),
            Color::Black => self.kind.as_char().to_ascii_lowercase(),
        }
    }

    /// Returns the Unicode chess symbol of the piece
    pub fn as_utf8_char(&self) -> char {
        let idx = self.kind.index();
        match self.color {
            Color::White => ['♔', '♕', '♗', '♘', '♖', '♙'][idx],
            Color::Black => ['♚', '♛', '♝', '♞', '♜', '♟'][idx],
        }
    }

    /// Parses a piece letter, with the case giving the color
    ///
    /// The resulting piece is not marked as moved.
    pub fn from_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, kind))
    }

    /// Returns the pseudo-legal moves of this piece standing on `src`
    ///
    /// The moves obey the movement rules of the piece, but may leave the own king in check.
    /// `last_move` is the most recently committed move, which is needed for en passant.
    pub fn pseudo_moves(&self, board: &Board, src: Coord, last_move: Option<Move>) -> MoveList {
        let mut res = MoveList::new();
        movegen::gen_piece_into(board, *self, src, last_move, &mut res);
        res
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chars() {
        let white_knight = Piece::new(Color::White, PieceKind::Knight);
        assert_eq!(white_knight.as_char(), 'N');
        assert_eq!(white_knight.as_utf8_char(), '♘');
        assert_eq!(Piece::from_char('N'), Some(white_knight));

        let black_queen = Piece::new(Color::Black, PieceKind::Queen);
        assert_eq!(black_queen.to_string(), "q");
        assert_eq!(black_queen.as_utf8_char(), '♛');
        assert_eq!(Piece::from_char('q'), Some(black_queen));

        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Piece::from_char('1'), None);
    }

    #[test]
    fn test_moved() {
        let rook = Piece::new(Color::Black, PieceKind::Rook);
        assert!(!rook.has_moved());
        let moved = rook.with_moved(true);
        assert!(moved.has_moved());
        assert!(moved.is(Color::Black, PieceKind::Rook));
        assert!(!moved.is(Color::White, PieceKind::Rook));
        assert_ne!(rook, moved);
        assert_eq!(moved.with_moved(false), rook);

        let mut p = rook;
        p.mark_moved();
        assert_eq!(p, moved);
    }

    #[test]
    fn test_pseudo_moves() {
        let board = Board::initial();
        let knight = board.get(Coord::from_parts(1, 2)).unwrap();
        let moves = knight.pseudo_moves(&board, Coord::from_parts(1, 2), None);
        let mut names: Vec<_> = moves.iter().map(ToString::to_string).collect();
        names.sort();
        assert_eq!(names, vec!["b1a3", "b1c3"]);
    }
}
