//! # chessrules
//!
//! Chess rules engine: board state, legal move generation, check, checkmate and stalemate
//! detection, with castling, en passant and promotion.
//!
//! The main entry point is [`Game`], which keeps the board, the side to move and the last move.
//! [`MoveChain`] adds the history of moves on top of it.
//!
//! # Example
//!
//! ```
//! use chessrules::{Color, Coord, Game, Move};
//!
//! let mut game = Game::new();
//! for s in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"] {
//!     let mv: Move = s.parse().unwrap();
//!     game.make_move(mv).unwrap();
//! }
//! assert!(game.is_checkmate(Color::Black));
//! assert!(game.valid_moves(Coord::from_parts(8, 5)).is_empty());
//! ```

pub use chessrules_base::{bitboard, geometry, types};

pub mod board;
pub mod chain;
pub mod game;
pub mod legal;
pub mod make;
pub mod movegen;
pub mod moves;
pub mod piece;

pub use bitboard::Bitboard;
pub use board::{Board, Position};
pub use chain::MoveChain;
pub use game::{Game, InvalidMoveError};
pub use make::Make;
pub use movegen::MoveList;
pub use moves::Move;
pub use piece::Piece;
pub use types::{CastlingSide, Color, Coord, CoordError, Outcome, PieceKind, PromotePiece};
