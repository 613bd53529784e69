//! Error codes for roster validation and match execution

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    #[error("Roster must contain at least one strategy")]
    EmptyRoster,

    #[error("Strategy name {0:?} appears more than once in the roster")]
    DuplicateName(String),

    #[error("Strategy {name:?} is misconfigured: {reason}")]
    InvalidStrategy { name: String, reason: String },

    #[error("Round count must be in 0..=4294967295, got {0}")]
    InvalidRoundCount(i64),

    #[error("Payoff table violates temptation > reward > punishment > sucker: {0}")]
    InvalidPayoff(String),

    #[error("No strategy named {0:?} in the roster")]
    UnknownStrategy(String),

    /// A strategy panicked inside `decide`. The match cannot be scored.
    #[error(
        "Strategy {strategy:?} failed in round {round} of {row:?} vs {column:?}: {message}"
    )]
    StrategyPanicked {
        strategy: String,
        round: u32,
        row: String,
        column: String,
        message: String,
    },
}
