//! Making moves on the board and in the game

use crate::board::Board;
use crate::game::{Game, InvalidMoveError};
use crate::geometry;
use crate::moves::{Move, MoveParseError};
use crate::piece::Piece;
use crate::types::{Coord, PieceKind};

use std::convert::Infallible;
use std::str::FromStr;

use thiserror::Error;

/// Error making a move given in coordinate notation
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum UciError {
    /// Error parsing move
    #[error("cannot parse move: {0}")]
    Parse(#[from] MoveParseError),
    /// Move is parsed, but cannot be made
    #[error("invalid move: {0}")]
    Invalid(#[from] InvalidMoveError),
}

/// Executes the move `mv` on the board, without any validation
///
/// The move is expected to be pseudo-legal, i.e. returned by the move generator for the piece on
/// its source square. Other moves are still executed without panics, but the resulting position
/// is unspecified. If the source square is empty, nothing happens.
///
/// The special moves are recognized by their shape:
///
/// - a king moving by two columns is castling, so the corresponding rook jumps over the king
/// - a pawn moving diagonally onto an empty square is en passant, so the pawn standing beside it
///   is captured
///
/// The piece landing on the destination square is marked as moved.
pub fn make_move_unchecked(board: &mut Board, mv: Move) {
    let piece = match board.get(mv.src()) {
        Some(p) => p,
        None => return,
    };
    let row = mv.src().row();

    match piece.kind() {
        PieceKind::King => {
            if let Some(side) = geometry::castling_side(mv.src().col(), mv.dst().col()) {
                let rook_src = Coord::from_parts(row, geometry::castling_rook_src_col(side));
                let rook_dst = Coord::from_parts(row, geometry::castling_rook_dst_col(side));
                if let Some(mut rook) = board.get(rook_src) {
                    rook.mark_moved();
                    board.put(rook_src, None);
                    board.put(rook_dst, Some(rook));
                }
            }
        }
        PieceKind::Pawn => {
            if mv.col_delta() != 0 && board.get(mv.dst()).is_none() {
                board.put(Coord::from_parts(row, mv.dst().col()), None);
            }
        }
        _ => {}
    }

    let placed = match mv.promote() {
        Some(p) => Piece::new(piece.color(), p.into()),
        None => piece,
    };
    board.put(mv.dst(), Some(placed));
    if let Some(p) = board.get_mut(mv.dst()) {
        p.mark_moved();
    }
    board.put(mv.src(), None);
}

/// Something that can be made as a move in a [`Game`]
///
/// # Example
///
/// ```
/// # use chessrules::{Game, Make, make::Uci};
/// #
/// let game = Game::new();
/// let next = Uci("e2e4").make(&game).unwrap();
/// assert_eq!(next.board().layout(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
///
/// // The original game is not changed
/// assert_eq!(game, Game::new());
/// assert!(Uci("e2e5").make(&game).is_err());
/// ```
pub trait Make {
    type Err;

    /// Makes the move in place and returns it
    ///
    /// On error, the game must stay untouched.
    fn make_raw(&self, game: &mut Game) -> Result<Move, Self::Err>;

    /// Returns a copy of `game` with the move made
    fn make(&self, game: &Game) -> Result<Game, Self::Err> {
        let mut cloned = game.clone();
        let _ = self.make_raw(&mut cloned)?;
        Ok(cloned)
    }
}

/// Move which is made without validation
///
/// The move is executed as is, then the turn passes to the other side. Use it only for the moves
/// known to be legal, such as the ones returned by [`Game::valid_moves()`].
pub struct Unchecked(Move);

impl Unchecked {
    #[inline]
    pub fn new(mv: Move) -> Self {
        Self(mv)
    }
}

impl Make for Unchecked {
    type Err = Infallible;

    #[inline]
    fn make_raw(&self, game: &mut Game) -> Result<Move, Self::Err> {
        game.commit(self.0);
        Ok(self.0)
    }
}

impl Make for Move {
    type Err = InvalidMoveError;

    #[inline]
    fn make_raw(&self, game: &mut Game) -> Result<Move, Self::Err> {
        game.make_move(*self)?;
        Ok(*self)
    }

    #[inline]
    fn make(&self, game: &Game) -> Result<Game, Self::Err> {
        game.validate(*self)?;
        let mut cloned = game.clone();
        cloned.commit(*self);
        Ok(cloned)
    }
}

/// Move in coordinate notation, like `e2e4` or `e7e8q`
pub struct Uci<S: AsRef<str>>(pub S);

impl<S: AsRef<str>> Make for Uci<S> {
    type Err = UciError;

    #[inline]
    fn make_raw(&self, game: &mut Game) -> Result<Move, Self::Err> {
        let mv = Move::from_str(self.0.as_ref())?;
        game.make_move(mv)?;
        Ok(mv)
    }
}
