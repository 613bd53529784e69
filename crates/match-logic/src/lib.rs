//! Match Logic for the Prisoner's Dilemma round-robin
//!
//! Core game logic for the iterated Prisoner's Dilemma tournament:
//! - Strategies and the `Decide` capability
//! - The payoff table and the per-match round loop
//! - Dominance-streak tracking
//! - The full ordered round-robin producing score and streak matrices

mod error;
mod game;
mod history;
mod pairing;
mod payoff;
mod random;
mod strategy;
mod tournament;

pub use error::ArenaError;
pub use game::{
    replay_match, run_match, MatchContext, MatchReplay, MatchResult, Player, RoundResult, Side,
    StreakTracker,
};
pub use pairing::{calculate_match_count, cell_to_pair};
pub use payoff::PayoffTable;
pub use random::SeededRng;
pub use strategy::{Decide, Move, Strategy, DEFAULT_COOPERATE_BIAS, DEFAULT_PERIOD};
pub use tournament::{
    checked_rounds, Entry, Matrix, Roster, Standing, Tournament, TournamentResult, DEFAULT_ROUNDS,
};

/// Payoff matrix for the Prisoner's Dilemma
/// Returns (score_a, score_b)
pub fn payoff(a: Move, b: Move) -> (u32, u32) {
    PayoffTable::CLASSIC.score(a, b)
}
