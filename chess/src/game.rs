//! Game state: the board, the side to move and the last move

use crate::board::Board;
use crate::legal;
use crate::make;
use crate::movegen::MoveList;
use crate::moves::Move;
use crate::types::{Color, Coord, Outcome};

use log::{debug, trace};
use thiserror::Error;

/// Error making a move in the game
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum InvalidMoveError {
    /// There is no piece on the source square
    #[error("no piece on {0}")]
    EmptySource(Coord),
    /// The piece on the source square belongs to the wrong side
    #[error("piece of color {actual} moved, expected {expected}")]
    WrongSide { expected: Color, actual: Color },
    /// The move is not among the legal moves of the piece
    #[error("move {0} is not legal")]
    NotLegal(Move),
}

/// Chess game
///
/// The game holds the board, the side to move and the most recently committed move, which is
/// needed to tell whether en passant is allowed. Everything else, including the castling rights,
/// is kept on the board itself.
///
/// Making a move either succeeds or leaves the game unchanged. Cloning the game makes a fully
/// independent copy, so it is cheap to explore the moves on a copy.
///
/// # Example
///
/// ```
/// # use chessrules::{Color, Coord, Game, Move};
/// #
/// let mut game = Game::new();
/// assert_eq!(game.valid_moves(Coord::from_parts(2, 5)).len(), 2);
///
/// let mv: Move = "e2e4".parse().unwrap();
/// game.make_move(mv).unwrap();
/// assert_eq!(game.side(), Color::Black);
/// assert_eq!(game.last_move(), Some(mv));
/// assert!(game.make_move(mv).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Game {
    board: Board,
    side: Color,
    last_move: Option<Move>,
}

impl Game {
    /// Starts a new game from the initial position, with White to move
    pub fn new() -> Game {
        Game::from_parts(Board::initial(), Color::White, None)
    }

    /// Creates a game from the given parts
    ///
    /// `last_move` is the move that led to `board`, if any. It only matters for en passant.
    pub fn from_parts(board: Board, side: Color, last_move: Option<Move>) -> Game {
        Game {
            board,
            side,
            last_move,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Returns the legal moves of the piece on `src`
    ///
    /// The moves are returned for the piece on `src` regardless of the side to move. The list is
    /// empty if the square is empty or the piece cannot move.
    pub fn valid_moves(&self, src: Coord) -> MoveList {
        legal::valid_moves(self, src)
    }

    /// Returns all the legal moves of the pieces of color `c`
    pub fn all_valid_moves(&self, c: Color) -> Vec<Move> {
        self.board
            .pieces(c)
            .flat_map(|(src, _)| self.valid_moves(src))
            .collect()
    }

    /// Returns `true` if the pieces of color `c` have at least one legal move
    pub fn has_legal_moves(&self, c: Color) -> bool {
        legal::has_legal_moves(self, c)
    }

    /// Checks that `mv` can be made by the side to move
    pub fn validate(&self, mv: Move) -> Result<(), InvalidMoveError> {
        let piece = self
            .board
            .get(mv.src())
            .ok_or(InvalidMoveError::EmptySource(mv.src()))?;
        if piece.color() != self.side {
            return Err(InvalidMoveError::WrongSide {
                expected: self.side,
                actual: piece.color(),
            });
        }
        if !self.valid_moves(mv.src()).contains(&mv) {
            return Err(InvalidMoveError::NotLegal(mv));
        }
        Ok(())
    }

    /// Makes the move `mv`
    ///
    /// The move must be one of the legal moves of the side to move. On error, the game is left
    /// unchanged.
    pub fn make_move(&mut self, mv: Move) -> Result<(), InvalidMoveError> {
        if let Err(e) = self.validate(mv) {
            debug!("rejected move {}: {}", mv, e);
            return Err(e);
        }
        self.commit(mv);
        trace!("{} played {}", self.side.inv(), mv);
        Ok(())
    }

    /// Executes the move and passes the turn without any validation
    pub(crate) fn commit(&mut self, mv: Move) {
        make::make_move_unchecked(&mut self.board, mv);
        self.last_move = Some(mv);
        self.side = self.side.inv();
    }

    /// Returns `true` if the king of color `c` is in check
    ///
    /// If there is no such king, returns `false`.
    pub fn is_check(&self, c: Color) -> bool {
        legal::is_king_attacked(&self.board, c)
    }

    /// Returns `true` if the side `c` is in check and has no legal moves
    pub fn is_checkmate(&self, c: Color) -> bool {
        self.is_check(c) && !self.has_legal_moves(c)
    }

    /// Returns `true` if the side `c` is not in check, but has no legal moves
    ///
    /// A side without a king is never considered stalemated.
    pub fn is_stalemate(&self, c: Color) -> bool {
        self.board.king_pos(c).is_some() && !self.is_check(c) && !self.has_legal_moves(c)
    }

    /// Returns the forced outcome for the side to move, if any
    pub fn calc_outcome(&self) -> Option<Outcome> {
        if self.board.king_pos(self.side).is_none() || self.has_legal_moves(self.side) {
            return None;
        }
        if self.is_check(self.side) {
            Some(Outcome::Checkmate {
                winner: self.side.inv(),
            })
        } else {
            Some(Outcome::Stalemate)
        }
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
