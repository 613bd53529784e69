//! Configurable payoff table

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;
use crate::strategy::Move;

/// Scores for the four outcomes of a round
///
/// Keys follow the conventional dilemma names so a config file reads
/// `{"mutualCooperate": 3, "mutualDefect": 1, "temptation": 5, "sucker": 0}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayoffTable {
    pub mutual_cooperate: u32,
    pub mutual_defect: u32,
    /// Paid to the defector when the opponent cooperates
    pub temptation: u32,
    /// Paid to the cooperator when the opponent defects
    pub sucker: u32,
}

impl PayoffTable {
    pub const CLASSIC: PayoffTable = PayoffTable {
        mutual_cooperate: 3,
        mutual_defect: 1,
        temptation: 5,
        sucker: 0,
    };

    /// Returns (score_a, score_b)
    pub fn score(&self, a: Move, b: Move) -> (u32, u32) {
        match (a, b) {
            (Move::Cooperate, Move::Cooperate) => (self.mutual_cooperate, self.mutual_cooperate),
            (Move::Cooperate, Move::Defect) => (self.sucker, self.temptation),
            (Move::Defect, Move::Cooperate) => (self.temptation, self.sucker),
            (Move::Defect, Move::Defect) => (self.mutual_defect, self.mutual_defect),
        }
    }

    /// True when a round paid `score_a` the temptation and `score_b` the sucker
    pub fn dominates(&self, score_a: u32, score_b: u32) -> bool {
        score_a == self.temptation && score_b == self.sucker
    }

    /// Reject tables that are not a dilemma.
    ///
    /// Dominance detection compares scores, so the temptation/sucker pair
    /// must not be producible by any other outcome.
    pub fn validate(&self) -> Result<(), ArenaError> {
        let ordered = self.temptation > self.mutual_cooperate
            && self.mutual_cooperate > self.mutual_defect
            && self.mutual_defect > self.sucker;
        if ordered {
            Ok(())
        } else {
            Err(ArenaError::InvalidPayoff(format!(
                "temptation={} mutualCooperate={} mutualDefect={} sucker={}",
                self.temptation, self.mutual_cooperate, self.mutual_defect, self.sucker
            )))
        }
    }
}

impl Default for PayoffTable {
    fn default() -> Self {
        Self::CLASSIC
    }
}
