//! Colour-dependent rows and movement tables

use crate::types::{CastlingSide, Color};

/// Row delta of a pawn step
pub const fn pawn_direction(c: Color) -> i8 {
    match c {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Row from which pawns can make a double step
pub const fn pawn_start_row(c: Color) -> u8 {
    match c {
        Color::White => 2,
        Color::Black => 7,
    }
}

pub const fn promotion_row(c: Color) -> u8 {
    match c {
        Color::White => 8,
        Color::Black => 1,
    }
}

/// Row where the pawns of color `c` land after a double step
pub const fn double_step_dst_row(c: Color) -> u8 {
    match c {
        Color::White => 4,
        Color::Black => 5,
    }
}

/// Row on which a pawn of color `c` can capture en passant
pub const fn enpassant_src_row(c: Color) -> u8 {
    double_step_dst_row(c.inv())
}

/// Back rank of color `c`, where the king and the rooks start
pub const fn home_row(c: Color) -> u8 {
    match c {
        Color::White => 1,
        Color::Black => 8,
    }
}

pub const KING_HOME_COL: u8 = 5;

pub const fn castling_rook_src_col(s: CastlingSide) -> u8 {
    match s {
        CastlingSide::King => 8,
        CastlingSide::Queen => 1,
    }
}

pub const fn castling_rook_dst_col(s: CastlingSide) -> u8 {
    match s {
        CastlingSide::King => 6,
        CastlingSide::Queen => 4,
    }
}

pub const fn castling_king_dst_col(s: CastlingSide) -> u8 {
    match s {
        CastlingSide::King => 7,
        CastlingSide::Queen => 3,
    }
}

/// Columns between the king and the rook, which must be empty to castle
pub const fn castling_pass_cols(s: CastlingSide) -> &'static [u8] {
    match s {
        CastlingSide::King => &[6, 7],
        CastlingSide::Queen => &[2, 3, 4],
    }
}

/// Returns the castling side if a king moving from column `src_col` to column `dst_col`
/// makes a castling move
pub const fn castling_side(src_col: u8, dst_col: u8) -> Option<CastlingSide> {
    if src_col + 2 == dst_col {
        Some(CastlingSide::King)
    } else if dst_col + 2 == src_col {
        Some(CastlingSide::Queen)
    } else {
        None
    }
}

pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

pub const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
];

pub const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub const QUEEN_DIRS: [(i8, i8); 8] = KING_STEPS;
