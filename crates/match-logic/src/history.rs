//! Per-side move history within a single match

use std::ops::Deref;

use crate::strategy::Move;

/// Moves one side has played so far in the current match
///
/// Append-only, and only the match runner appends. A fresh history is
/// created for every match and dropped when the match ends. Strategies see
/// it as a plain `&[Move]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct History {
    moves: Vec<Move>,
}

impl History {
    pub(crate) fn with_capacity(rounds: usize) -> Self {
        Self {
            moves: Vec::with_capacity(rounds),
        }
    }

    pub(crate) fn push(&mut self, m: Move) {
        self.moves.push(m);
    }
}

impl Deref for History {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.moves
    }
}
