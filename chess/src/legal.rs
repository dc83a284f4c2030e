//! Legality filter over the pseudo-legal moves
//!
//! A pseudo-legal move is legal if it doesn't leave the own king in check. Each candidate is
//! tried on a copy of the game, so the real game is never touched. Castling is additionally
//! forbidden out of check and through an attacked square.

use crate::board::Board;
use crate::game::Game;
use crate::geometry;
use crate::make;
use crate::movegen::{self, MoveList};
use crate::moves::Move;
use crate::piece::Piece;
use crate::types::{Color, Coord, PieceKind};

use log::trace;

/// Returns `true` if the king of color `c` is attacked on `board`
///
/// A side without a king is never in check.
pub fn is_king_attacked(board: &Board, c: Color) -> bool {
    match board.king_pos(c) {
        Some(king) => movegen::is_cell_attacked(board, king, c.inv()),
        None => false,
    }
}

fn is_castling(piece: Piece, mv: Move) -> bool {
    piece.kind() == PieceKind::King
        && geometry::castling_side(mv.src().col(), mv.dst().col()).is_some()
}

/// Checks the extra conditions of castling: the king is not in check and doesn't pass through
/// an attacked square
fn is_castling_safe(game: &Game, color: Color, mv: Move) -> bool {
    if is_king_attacked(game.board(), color) {
        return false;
    }
    let pass = match mv.src().try_shift(0, mv.col_delta().signum()) {
        Some(c) => c,
        None => return false,
    };
    let mut board = game.board().clone();
    make::make_move_unchecked(&mut board, Move::new(mv.src(), pass));
    !is_king_attacked(&board, color)
}

/// Returns `true` if the pseudo-legal move `mv` of `piece` is legal in `game`
pub fn is_legal(game: &Game, piece: Piece, mv: Move) -> bool {
    let color = piece.color();
    if is_castling(piece, mv) && !is_castling_safe(game, color, mv) {
        trace!("castling {} discarded: king is attacked on its way", mv);
        return false;
    }
    let mut cloned = game.clone();
    cloned.commit(mv);
    !is_king_attacked(cloned.board(), color)
}

/// Returns the legal moves of the piece on `src`, in the order of generation
///
/// If `src` is empty, returns an empty list.
pub fn valid_moves(game: &Game, src: Coord) -> MoveList {
    let mut res = MoveList::new();
    let piece = match game.board().get(src) {
        Some(p) => p,
        None => return res,
    };
    for mv in piece.pseudo_moves(game.board(), src, game.last_move()) {
        if !res.contains(&mv) && is_legal(game, piece, mv) {
            res.push(mv);
        }
    }
    res
}

/// Returns `true` if some piece of color `c` has a legal move
pub fn has_legal_moves(game: &Game, c: Color) -> bool {
    game.board().pieces(c).any(|(src, piece)| {
        piece
            .pseudo_moves(game.board(), src, game.last_move())
            .iter()
            .any(|&mv| is_legal(game, piece, mv))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn coord(s: &str) -> Coord {
        s.parse().unwrap()
    }

    fn game(layout: &str, side: Color) -> Game {
        Game::from_parts(Board::from_layout(layout).unwrap(), side, None)
    }

    fn name_set(ml: &MoveList) -> BTreeSet<String> {
        ml.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_pinned() {
        // The knight on e2 is pinned by the rook on e8
        let g = game("4r1k1/8/8/8/8/8/4N3/4K3", Color::White);
        assert!(valid_moves(&g, coord("e2")).is_empty());
        assert!(!movegen::pseudo_legal(g.board(), coord("e2"), None).is_empty());
        assert_eq!(
            name_set(&valid_moves(&g, coord("e1"))),
            ["e1d1", "e1d2", "e1f1", "e1f2"]
                .into_iter()
                .map(String::from)
                .collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn test_check_evasion() {
        let g = game("4k3/8/8/8/8/8/3q4/R3K3", Color::White);
        assert!(is_king_attacked(g.board(), Color::White));
        assert!(!is_king_attacked(g.board(), Color::Black));
        assert_eq!(
            name_set(&valid_moves(&g, coord("e1"))),
            ["e1d2", "e1f1"]
                .into_iter()
                .map(String::from)
                .collect::<BTreeSet<_>>()
        );
        assert!(valid_moves(&g, coord("a1")).is_empty());
    }

    #[test]
    fn test_castling_through_attack() {
        // Rook on f8 attacks f1, so kingside castling passes through an attacked square
        let g = game("4kr2/8/8/8/8/8/8/R3K2R", Color::White);
        let moves = name_set(&valid_moves(&g, coord("e1")));
        assert!(!moves.contains("e1g1"));
        assert!(moves.contains("e1c1"));
        assert!(!moves.contains("e1f1"));

        // Landing on an attacked square
        let g = game("4k1r1/8/8/8/8/8/8/R3K2R", Color::White);
        let moves = name_set(&valid_moves(&g, coord("e1")));
        assert!(!moves.contains("e1g1"));
        assert!(moves.contains("e1c1"));

        // Castling out of check
        let g = game("4r1k1/8/8/8/8/8/8/R3K2R", Color::White);
        let moves = name_set(&valid_moves(&g, coord("e1")));
        assert!(!moves.contains("e1g1"));
        assert!(!moves.contains("e1c1"));

        // The attacked b1 square is only passed by the rook
        let g = game("1r2k3/8/8/8/8/8/8/R3K2R", Color::White);
        let moves = name_set(&valid_moves(&g, coord("e1")));
        assert!(moves.contains("e1g1"));
        assert!(moves.contains("e1c1"));
    }

    #[test]
    fn test_no_king() {
        let g = game("8/8/8/8/8/8/4r3/R7", Color::White);
        assert!(!is_king_attacked(g.board(), Color::White));
        assert_eq!(valid_moves(&g, coord("a1")).len(), 14);
        assert!(has_legal_moves(&g, Color::White));
        assert!(valid_moves(&g, coord("b1")).is_empty());
    }

    #[test]
    fn test_has_legal_moves() {
        let g = Game::new();
        assert!(has_legal_moves(&g, Color::White));
        assert!(has_legal_moves(&g, Color::Black));

        let g = game("7K/8/5n2/5n2/8/8/7k/8", Color::White);
        assert!(!has_legal_moves(&g, Color::White));
        assert!(has_legal_moves(&g, Color::Black));
    }
}
