//! Pseudo-legal move generation
//!
//! The generator produces the moves that follow the movement rules of a piece, including
//! castling and en passant, but doesn't check whether the own king is left in check. See
//! [`legal`](crate::legal) for the filter on top of it.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::geometry;
use crate::moves::Move;
use crate::piece::Piece;
use crate::types::{CastlingSide, Color, Coord, PieceKind, PromotePiece};

use std::convert::Infallible;
use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// List of moves stored inline
///
/// The capacity is enough for the moves of a single piece and for all the legal moves in any
/// reachable chess position.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 256>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, 256>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a mut MoveList {
    type Item = &'a mut Move;
    type IntoIter = slice::IterMut<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }

    /// Pushes `m` unless it is already present, keeping the insertion order
    pub fn push_unique(&mut self, m: Move) {
        if !self.0.contains(&m) {
            self.0.push(m);
        }
    }
}

/// Sink for the generated moves
pub trait MovePush {
    fn push(&mut self, m: Move);
}

impl<const N: usize> MovePush for ArrayVec<Move, N> {
    fn push(&mut self, m: Move) {
        self.push(m);
    }
}

impl MovePush for MoveList {
    fn push(&mut self, m: Move) {
        self.0.push(m);
    }
}

impl MovePush for Vec<Move> {
    fn push(&mut self, m: Move) {
        self.push(m);
    }
}

/// Sink which can stop the generation by returning an error
trait MaybeMovePush {
    type Err;

    fn push(&mut self, m: Move) -> Result<(), Self::Err>;
}

impl<T: MovePush> MaybeMovePush for T {
    type Err = Infallible;

    fn push(&mut self, m: Move) -> Result<(), Self::Err> {
        <Self as MovePush>::push(self, m);
        Ok(())
    }
}

/// Stops on the first move landing on the given square
struct ErrOnDst(Coord);

impl MaybeMovePush for ErrOnDst {
    type Err = ();

    fn push(&mut self, m: Move) -> Result<(), ()> {
        match m.dst() == self.0 {
            true => Err(()),
            false => Ok(()),
        }
    }
}

struct AttackSink(Bitboard);

impl MovePush for AttackSink {
    fn push(&mut self, m: Move) {
        self.0.set(m.dst());
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mode {
    /// All the pseudo-legal moves
    Moves,
    /// Only the squares attacked by the piece, including the ones occupied by friendly pieces
    Attacks,
}

struct MoveGenImpl<'a, P> {
    board: &'a Board,
    piece: Piece,
    src: Coord,
    last_move: Option<Move>,
    mode: Mode,
    dst: &'a mut P,
}

impl<'a, P: MaybeMovePush> MoveGenImpl<'a, P> {
    fn add_move(&mut self, dst: Coord) -> Result<(), P::Err> {
        self.dst.push(Move::new(self.src, dst))
    }

    fn is_enemy(&self, c: Coord) -> bool {
        matches!(self.board.get(c), Some(p) if p.color() != self.piece.color())
    }

    fn is_target(&self, c: Coord) -> bool {
        match self.board.get(c) {
            None => true,
            Some(p) => self.mode == Mode::Attacks || p.color() != self.piece.color(),
        }
    }

    fn gen_steps(&mut self, steps: &[(i8, i8)]) -> Result<(), P::Err> {
        for &(dr, dc) in steps {
            if let Some(dst) = self.src.try_shift(dr, dc) {
                if self.is_target(dst) {
                    self.add_move(dst)?;
                }
            }
        }
        Ok(())
    }

    fn gen_slides(&mut self, dirs: &[(i8, i8)]) -> Result<(), P::Err> {
        for &(dr, dc) in dirs {
            let mut cur = self.src;
            while let Some(dst) = cur.try_shift(dr, dc) {
                if self.board.get(dst).is_none() {
                    self.add_move(dst)?;
                    cur = dst;
                    continue;
                }
                if self.is_target(dst) {
                    self.add_move(dst)?;
                }
                break;
            }
        }
        Ok(())
    }

    fn add_pawn_with_promote(&mut self, dst: Coord) -> Result<(), P::Err> {
        if dst.row() != geometry::promotion_row(self.piece.color()) {
            return self.add_move(dst);
        }
        for p in PromotePiece::ALL {
            self.dst.push(Move::with_promotion(self.src, dst, p))?;
        }
        Ok(())
    }

    fn gen_pawn(&mut self) -> Result<(), P::Err> {
        let color = self.piece.color();
        let dir = geometry::pawn_direction(color);

        if self.mode == Mode::Attacks {
            for dc in [-1, 1] {
                if let Some(dst) = self.src.try_shift(dir, dc) {
                    self.add_move(dst)?;
                }
            }
            return Ok(());
        }

        let single = self.src.try_shift(dir, 0);
        let single_free = single.map_or(false, |c| self.board.get(c).is_none());

        if self.src.row() == geometry::pawn_start_row(color) && single_free {
            if let Some(double) = self.src.try_shift(2 * dir, 0) {
                if self.board.get(double).is_none() {
                    self.add_move(double)?;
                }
            }
        }

        if let (Some(dst), true) = (single, single_free) {
            self.add_pawn_with_promote(dst)?;
        }

        for dc in [-1, 1] {
            if let Some(dst) = self.src.try_shift(dir, dc) {
                if self.is_enemy(dst) {
                    self.add_pawn_with_promote(dst)?;
                }
            }
        }

        self.gen_pawn_enpassant()
    }

    fn gen_pawn_enpassant(&mut self) -> Result<(), P::Err> {
        let color = self.piece.color();
        if self.src.row() != geometry::enpassant_src_row(color) {
            return Ok(());
        }
        let last = match self.last_move {
            Some(m) => m,
            None => return Ok(()),
        };
        let pushed = last.dst();
        let is_double_step = last.col_delta() == 0 && last.row_delta().abs() == 2;
        let is_enemy_pawn = matches!(
            self.board.get(pushed),
            Some(p) if p.is(color.inv(), PieceKind::Pawn)
        );
        if !is_double_step
            || !is_enemy_pawn
            || pushed.row() != self.src.row()
            || (pushed.col() as i8 - self.src.col() as i8).abs() != 1
        {
            return Ok(());
        }
        // The square behind the pushed pawn was just passed by it, so it must be empty
        let dst = Coord::from_parts(
            (self.src.row() as i8 + geometry::pawn_direction(color)) as u8,
            pushed.col(),
        );
        if self.board.get(dst).is_none() {
            self.add_move(dst)?;
        }
        Ok(())
    }

    fn gen_castling(&mut self) -> Result<(), P::Err> {
        let color = self.piece.color();
        let row = geometry::home_row(color);
        if self.piece.has_moved() || self.src != Coord::from_parts(row, geometry::KING_HOME_COL) {
            return Ok(());
        }
        for side in [CastlingSide::King, CastlingSide::Queen] {
            let rook_src = Coord::from_parts(row, geometry::castling_rook_src_col(side));
            let has_rook = matches!(
                self.board.get(rook_src),
                Some(p) if p.is(color, PieceKind::Rook) && !p.has_moved()
            );
            let path_clear = geometry::castling_pass_cols(side)
                .iter()
                .all(|&col| self.board.get(Coord::from_parts(row, col)).is_none());
            if has_rook && path_clear {
                self.add_move(Coord::from_parts(row, geometry::castling_king_dst_col(side)))?;
            }
        }
        Ok(())
    }

    fn gen(&mut self) -> Result<(), P::Err> {
        match self.piece.kind() {
            PieceKind::King => {
                self.gen_steps(&geometry::KING_STEPS)?;
                if self.mode == Mode::Moves {
                    self.gen_castling()?;
                }
                Ok(())
            }
            PieceKind::Knight => self.gen_steps(&geometry::KNIGHT_STEPS),
            PieceKind::Queen => self.gen_slides(&geometry::QUEEN_DIRS),
            PieceKind::Rook => self.gen_slides(&geometry::ROOK_DIRS),
            PieceKind::Bishop => self.gen_slides(&geometry::BISHOP_DIRS),
            PieceKind::Pawn => self.gen_pawn(),
        }
    }
}

fn do_gen<P: MaybeMovePush>(
    board: &Board,
    piece: Piece,
    src: Coord,
    last_move: Option<Move>,
    mode: Mode,
    dst: &mut P,
) -> Result<(), P::Err> {
    MoveGenImpl {
        board,
        piece,
        src,
        last_move,
        mode,
        dst,
    }
    .gen()
}

/// Generates the pseudo-legal moves of `piece` standing on `src` into `dst`
///
/// `piece` is assumed to stand on `src`. Use [`pseudo_legal_into`] to take the piece from the
/// board.
pub fn gen_piece_into<P: MovePush>(
    board: &Board,
    piece: Piece,
    src: Coord,
    last_move: Option<Move>,
    dst: &mut P,
) {
    let _ = do_gen(board, piece, src, last_move, Mode::Moves, dst);
}

/// Generates the pseudo-legal moves of the piece on `src` into `dst`
///
/// Nothing is generated if `src` is empty.
pub fn pseudo_legal_into<P: MovePush>(
    board: &Board,
    src: Coord,
    last_move: Option<Move>,
    dst: &mut P,
) {
    if let Some(piece) = board.get(src) {
        gen_piece_into(board, piece, src, last_move, dst);
    }
}

/// Returns the pseudo-legal moves of the piece on `src`
pub fn pseudo_legal(board: &Board, src: Coord, last_move: Option<Move>) -> MoveList {
    let mut res = MoveList::new();
    pseudo_legal_into(board, src, last_move, &mut res);
    res
}

/// Returns `true` if some piece of color `by` has a pseudo-legal move to `coord`
///
/// This is the check test when `coord` holds a king of the opposite color. The search stops on
/// the first matching move.
pub fn is_cell_attacked(board: &Board, coord: Coord, by: Color) -> bool {
    let mut sink = ErrOnDst(coord);
    board
        .pieces(by)
        .any(|(src, piece)| do_gen(board, piece, src, None, Mode::Moves, &mut sink).is_err())
}

/// Returns the set of squares attacked by the pieces of color `by`
///
/// A square counts as attacked if a piece of color `by` could capture an enemy piece standing
/// there. So, pawn advances don't attack anything, and the squares with the pieces of color `by`
/// that are protected by other pieces are included.
pub fn attacked_cells(board: &Board, by: Color) -> Bitboard {
    let mut sink = AttackSink(Bitboard::EMPTY);
    for (src, piece) in board.pieces(by) {
        let _ = do_gen(board, piece, src, None, Mode::Attacks, &mut sink);
    }
    sink.0
}
