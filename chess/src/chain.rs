//! Game together with the history of moves

use crate::game::{Game, InvalidMoveError};
use crate::make::{Make, Uci, UciError};
use crate::moves::Move;
use crate::types::Outcome;

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot make UCI move #{}: {}", .pos + 1, .source)]
pub struct UciListError {
    pub pos: usize,
    pub source: UciError,
}

/// Game with the history of the moves made
///
/// Each entry of the history keeps the game state before the move, so the moves can be undone
/// with [`MoveChain::pop()`].
///
/// # Example
///
/// ```
/// # use chessrules::{MoveChain, Color, Outcome};
/// #
/// let mut chain = MoveChain::new_initial();
/// chain.push_uci_list("f2f3 e7e5 g2g4 d8h4").unwrap();
/// assert_eq!(chain.len(), 4);
/// assert_eq!(chain.outcome(), Some(Outcome::Checkmate { winner: Color::Black }));
/// assert_eq!(chain.uci_list().to_string(), "f2f3 e7e5 g2g4 d8h4");
///
/// chain.pop();
/// assert_eq!(chain.outcome(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveChain {
    game: Game,
    stack: Vec<(Move, Game)>,
}

impl MoveChain {
    pub fn new(game: Game) -> Self {
        MoveChain {
            game,
            stack: Vec::new(),
        }
    }

    pub fn new_initial() -> Self {
        Self::new(Game::new())
    }

    pub fn from_uci_list(game: Game, uci_list: &str) -> Result<Self, UciListError> {
        let mut res = MoveChain::new(game);
        res.push_uci_list(uci_list)?;
        Ok(res)
    }

    /// Returns the current state of the game
    pub fn last(&self) -> &Game {
        &self.game
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.stack.iter().map(|(m, _)| *m)
    }

    pub fn get(&self, idx: usize) -> Option<Move> {
        self.stack.get(idx).map(|(m, _)| *m)
    }

    /// Returns the forced outcome in the current position, if any
    pub fn outcome(&self) -> Option<Outcome> {
        self.game.calc_outcome()
    }

    fn do_push<M: Make>(&mut self, m: M) -> Result<(), M::Err> {
        let prev = self.game.clone();
        let mv = m.make_raw(&mut self.game)?;
        self.stack.push((mv, prev));
        Ok(())
    }

    pub fn push(&mut self, mv: Move) -> Result<(), InvalidMoveError> {
        self.do_push(mv)
    }

    pub fn push_uci(&mut self, s: &str) -> Result<(), UciError> {
        self.do_push(Uci(s))
    }

    /// Makes all the moves from the whitespace-separated list
    ///
    /// On error, the moves before the offending one stay in the chain.
    pub fn push_uci_list(&mut self, uci_list: &str) -> Result<(), UciListError> {
        for (pos, token) in uci_list.split_ascii_whitespace().enumerate() {
            self.push_uci(token)
                .map_err(|source| UciListError { pos, source })?;
        }
        Ok(())
    }

    /// Undoes the last move and returns it
    pub fn pop(&mut self) -> Option<Move> {
        let (m, prev) = self.stack.pop()?;
        self.game = prev;
        Some(m)
    }

    pub fn uci_list(&self) -> UciList<'_> {
        UciList(self)
    }
}

impl Default for MoveChain {
    fn default() -> Self {
        Self::new_initial()
    }
}

pub struct UciList<'a>(&'a MoveChain);

impl<'a> fmt::Display for UciList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, m) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}
