//! # Base types for chessrules
//!
//! This is an auxiliary crate for `chessrules`, which contains the plain value types: squares,
//! colors, piece kinds, square sets and colour-dependent geometry.
//!
//! Normally you don't want to use this crate directly. Use `chessrules` instead, which
//! re-exports everything declared here.

pub mod bitboard;
pub mod geometry;
pub mod types;
