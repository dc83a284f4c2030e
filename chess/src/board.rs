//! Board and related things

use crate::bitboard::Bitboard;
use crate::geometry;
use crate::piece::Piece;
use crate::types::{Color, Coord, CoordError, PieceKind};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Error parsing the board layout (i.e. the piece placement part of FEN)
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum LayoutParseError {
    /// Row is too large
    #[error("too many items in row {0}")]
    RowOverflow(u8),
    /// Row is too small
    #[error("not enough items in row {0}")]
    RowUnderflow(u8),
    /// Too many rows
    #[error("too many rows")]
    Overflow,
    /// Not enough rows
    #[error("not enough rows")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Square of the board together with its occupant
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    coord: Coord,
    occupant: Option<Piece>,
}

impl Position {
    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub fn occupant(&self) -> Option<Piece> {
        self.occupant
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Chess board
///
/// The board holds 64 squares in row-major order, starting from row 1. Each square is either
/// empty or contains a [`Piece`]. The board doesn't know whose turn it is and doesn't validate
/// anything: it can hold any layout, including the ones without kings. See [`Game`](crate::Game)
/// for the board together with the move rules.
///
/// Cloning the board makes a fully independent copy.
///
/// # Example
///
/// ```
/// # use chessrules::{Board, Color, Coord, Piece, PieceKind};
/// #
/// let mut board = Board::empty();
/// board.put(Coord::from_parts(2, 2), Some(Piece::new(Color::White, PieceKind::King)));
/// board.put(Coord::from_parts(5, 4), Some(Piece::new(Color::Black, PieceKind::King)));
/// assert_eq!(board.layout(), "8/8/8/3k4/8/8/1K6/8");
/// assert_eq!(board.king_pos(Color::Black), Some(Coord::from_parts(5, 4)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Board {
    /// Returns a board without any pieces
    #[inline]
    pub const fn empty() -> Board {
        Board { cells: [None; 64] }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        res.reset();
        res
    }

    /// Puts the pieces into the initial position, removing everything else
    pub fn reset(&mut self) {
        const BACK_ROW: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        self.cells = [None; 64];
        for color in [Color::White, Color::Black] {
            let home = geometry::home_row(color);
            let pawns = geometry::pawn_start_row(color);
            for (i, kind) in BACK_ROW.into_iter().enumerate() {
                let col = i as u8 + 1;
                self.put(Coord::from_parts(home, col), Some(Piece::new(color, kind)));
                self.put(
                    Coord::from_parts(pawns, col),
                    Some(Piece::new(color, PieceKind::Pawn)),
                );
            }
        }
    }

    /// Parses the board from the piece placement part of FEN
    ///
    /// Does the same as [`Board::from_str`]. The `moved` flags of the pieces are derived from
    /// their squares: kings and rooks not on their initial squares and pawns not on their initial
    /// row are considered moved.
    ///
    /// ```
    /// # use chessrules::{Board, Coord};
    /// #
    /// let board = Board::from_layout("4k3/8/8/8/8/8/4P3/R3K2R").unwrap();
    /// assert!(!board.get(Coord::from_parts(1, 1)).unwrap().has_moved());
    /// assert_eq!(board.layout(), "4k3/8/8/8/8/8/4P3/R3K2R");
    /// ```
    pub fn from_layout(s: &str) -> Result<Board, LayoutParseError> {
        Board::from_str(s)
    }

    /// Returns the piece placement part of FEN for this board
    ///
    /// The `moved` flags are not represented.
    pub fn layout(&self) -> String {
        self.to_string()
    }

    /// Returns the occupant of the square `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Option<Piece> {
        self.cells[c.index() as usize]
    }

    /// Returns the occupant of the square on row `row` and column `col`
    ///
    /// Fails if the square is outside the board.
    #[inline]
    pub fn occupant_at(&self, row: u8, col: u8) -> Result<Option<Piece>, CoordError> {
        Ok(self.get(Coord::new(row, col)?))
    }

    /// Puts `piece` to the square `c`, or clears the square if `piece` is `None`
    #[inline]
    pub fn put(&mut self, c: Coord, piece: Option<Piece>) {
        self.cells[c.index() as usize] = piece;
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, c: Coord) -> &mut Option<Piece> {
        &mut self.cells[c.index() as usize]
    }

    #[inline]
    pub fn position(&self, c: Coord) -> Position {
        Position {
            coord: c,
            occupant: self.get(c),
        }
    }

    /// Iterates over all the squares in row-major order, starting from row 1
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        Coord::iter().map(move |c| self.position(c))
    }

    /// Iterates over the squares occupied by the pieces of color `c`, in row-major order
    pub fn pieces(&self, c: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::iter().filter_map(move |coord| match self.get(coord) {
            Some(p) if p.color() == c => Some((coord, p)),
            _ => None,
        })
    }

    /// Returns the bitboard over all the pieces with color `c`
    pub fn color(&self, c: Color) -> Bitboard {
        self.pieces(c).map(|(coord, _)| coord).collect()
    }

    /// Returns the position of the king of color `c`
    ///
    /// If there are many such kings, the first one in row-major order is returned. If there is
    /// no king, returns `None`.
    pub fn king_pos(&self, c: Color) -> Option<Coord> {
        self.pieces(c)
            .find(|(_, p)| p.kind() == PieceKind::King)
            .map(|(coord, _)| coord)
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use chessrules::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    ///  |abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    ///
    /// let res = r#"
    /// 8│♜♞♝♛♚♝♞♜
    /// 7│♟♟♟♟♟♟♟♟
    /// 6│........
    /// 5│........
    /// 4│........
    /// 3│........
    /// 2│♙♙♙♙♙♙♙♙
    /// 1│♖♘♗♕♔♗♘♖
    /// ─┼────────
    ///  │abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Utf8).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

fn initial_moved(p: Piece, c: Coord) -> bool {
    let home = geometry::home_row(p.color());
    match p.kind() {
        PieceKind::King => c != Coord::from_parts(home, geometry::KING_HOME_COL),
        PieceKind::Rook => c.row() != home || !matches!(c.col(), 1 | 8),
        PieceKind::Pawn => c.row() != geometry::pawn_start_row(p.color()),
        _ => false,
    }
}

fn parse_cells(s: &str) -> Result<[Option<Piece>; 64], LayoutParseError> {
    type Error = LayoutParseError;

    // Rows come from 8 down to 1, so `row_idx` counts them from the top
    let mut col = 0_u8;
    let mut row_idx = 0_u8;
    let mut cells = [None; 64];
    for b in s.bytes() {
        let row = 8 - row_idx;
        match b {
            b'1'..=b'8' => {
                let add = b - b'0';
                if col + add > 8 {
                    return Err(Error::RowOverflow(row));
                }
                col += add;
            }
            b'/' => {
                if col < 8 {
                    return Err(Error::RowUnderflow(row));
                }
                row_idx += 1;
                col = 0;
                if row_idx >= 8 {
                    return Err(Error::Overflow);
                }
            }
            _ => {
                if col >= 8 {
                    return Err(Error::RowOverflow(row));
                }
                let piece = Piece::from_char(b as char).ok_or(Error::UnexpectedChar(b as char))?;
                col += 1;
                let coord = Coord::from_parts(row, col);
                cells[coord.index() as usize] = Some(piece.with_moved(initial_moved(piece, coord)));
            }
        };
    }

    if col < 8 {
        return Err(Error::RowUnderflow(8 - row_idx));
    }
    if row_idx < 7 {
        return Err(Error::Underflow);
    }

    Ok(cells)
}

impl FromStr for Board {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        if let Some(c) = s.chars().find(|c| !c.is_ascii()) {
            return Err(LayoutParseError::UnexpectedChar(c));
        }
        Ok(Board {
            cells: parse_cells(s)?,
        })
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in (1..=8).rev() {
            if row != 8 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for col in 1..=8 {
                let piece = match self.get(Coord::from_parts(row, col)) {
                    Some(p) => p,
                    None => {
                        empty += 1;
                        continue;
                    }
                };
                if empty != 0 {
                    write!(f, "{}", (b'0' + empty) as char)?;
                    empty = 0;
                }
                write!(f, "{}", piece)?;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
            }
        }
        Ok(())
    }
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;

    fn piece(p: Piece) -> char;

    fn cell(c: Option<Piece>) -> char {
        c.map_or('.', Self::piece)
    }

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in (1..=8).rev() {
            write!(f, "{}{}", row, Self::VERT_FRAME)?;
            for col in 1..=8 {
                write!(f, "{}", Self::cell(b.get(Coord::from_parts(row, col))))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in 1..=8 {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, " {}", Self::VERT_FRAME)?;
        for file in 'a'..='h' {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';

    fn piece(p: Piece) -> char {
        p.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';

    fn piece(p: Piece) -> char {
        p.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INITIAL: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn test_initial() {
        let b = Board::initial();
        assert_eq!(b.layout(), INITIAL);
        assert_eq!(Board::from_layout(INITIAL), Ok(b.clone()));
        assert_eq!(b.positions().count(), 64);
        assert_eq!(b.positions().filter(|p| !p.is_empty()).count(), 32);
        assert_eq!(b.pieces(Color::White).count(), 16);
        assert_eq!(b.color(Color::Black), Bitboard::row(7) | Bitboard::row(8));
        assert!(b.positions().all(|p| p.occupant().map_or(true, |p| !p.has_moved())));
        assert_eq!(
            b.get(Coord::from_parts(1, 4)),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(
            b.get(Coord::from_parts(8, 5)),
            Some(Piece::new(Color::Black, PieceKind::King))
        );
        assert_eq!(b.king_pos(Color::White), Some(Coord::from_parts(1, 5)));

        let mut other = Board::from_layout("8/8/8/8/8/8/8/4K3").unwrap();
        other.reset();
        assert_eq!(other, b);
    }

    #[test]
    fn test_midgame() {
        const LAYOUT: &str = "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K";

        let b = Board::from_layout(LAYOUT).unwrap();
        assert_eq!(b.layout(), LAYOUT);
        assert_eq!(
            b.get(Coord::from_parts(4, 2)),
            Some(Piece::new(Color::Black, PieceKind::Bishop))
        );
        assert_eq!(
            b.get(Coord::from_parts(2, 6)),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(b.king_pos(Color::White), Some(Coord::from_parts(1, 8)));
        assert_eq!(b.king_pos(Color::Black), Some(Coord::from_parts(8, 7)));

        // Kings and rooks away from home, and pawns that have advanced, count as moved
        assert!(b.get(Coord::from_parts(1, 8)).unwrap().has_moved());
        assert!(!b.get(Coord::from_parts(1, 1)).unwrap().has_moved());
        assert!(b.get(Coord::from_parts(1, 3)).unwrap().has_moved());
        assert!(b.get(Coord::from_parts(8, 2)).unwrap().has_moved());
        assert!(b.get(Coord::from_parts(8, 5)).unwrap().has_moved());
        assert!(!b.get(Coord::from_parts(2, 3)).unwrap().has_moved());
        assert!(b.get(Coord::from_parts(4, 5)).unwrap().has_moved());
        assert!(!b.get(Coord::from_parts(3, 3)).unwrap().has_moved());
    }

    #[test]
    fn test_bad_layout() {
        assert_eq!(
            Board::from_layout("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP"),
            Err(LayoutParseError::Underflow)
        );
        assert_eq!(
            Board::from_layout("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/8"),
            Err(LayoutParseError::Overflow)
        );
        assert_eq!(
            Board::from_layout("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(LayoutParseError::RowUnderflow(7))
        );
        assert_eq!(
            Board::from_layout("rnbqkbnr/pppppppp/8/8/8/44/PPPPPPPPP/RNBQKBNR"),
            Err(LayoutParseError::RowOverflow(2))
        );
        assert_eq!(
            Board::from_layout("rnbqkbnr/pppppppp/8/8/8/36/PPPPPPPP/RNBQKBNR"),
            Err(LayoutParseError::RowOverflow(3))
        );
        assert_eq!(
            Board::from_layout("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN"),
            Err(LayoutParseError::RowUnderflow(1))
        );
        assert_eq!(
            Board::from_layout("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBXKBNR"),
            Err(LayoutParseError::UnexpectedChar('X'))
        );
        assert_eq!(
            Board::from_layout("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN♖"),
            Err(LayoutParseError::UnexpectedChar('♖'))
        );
    }

    #[test]
    fn test_put_and_get() {
        let mut b = Board::empty();
        let c = Coord::from_parts(3, 3);
        assert!(b.position(c).is_empty());
        let knight = Piece::new(Color::White, PieceKind::Knight);
        b.put(c, Some(knight));
        assert_eq!(b.position(c).occupant(), Some(knight));
        assert_eq!(b.position(c).coord(), c);
        assert_eq!(b.occupant_at(3, 3), Ok(Some(knight)));
        assert_eq!(b.occupant_at(3, 4), Ok(None));
        assert_eq!(
            b.occupant_at(0, 3),
            Err(CoordError::OutOfBounds { row: 0, col: 3 })
        );
        assert_eq!(
            b.occupant_at(3, 9),
            Err(CoordError::OutOfBounds { row: 3, col: 9 })
        );
        assert_eq!(b.king_pos(Color::White), None);
        b.put(c, None);
        assert_eq!(b, Board::empty());
    }

    #[test]
    fn test_clone_independent() {
        let b = Board::initial();
        let mut copy = b.clone();
        assert_eq!(copy, b);
        copy.put(Coord::from_parts(2, 5), None);
        assert_ne!(copy, b);
        assert!(b.get(Coord::from_parts(2, 5)).is_some());

        // The `moved` flag takes part in the comparison
        let mut copy = b.clone();
        if let Some(p) = copy.get_mut(Coord::from_parts(1, 1)) {
            p.mark_moved();
        }
        assert_ne!(copy, b);
        assert!(!b.get(Coord::from_parts(1, 1)).unwrap().has_moved());
    }
}
