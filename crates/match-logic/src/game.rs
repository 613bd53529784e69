//! Match execution engine

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::ArenaError;
use crate::history::History;
use crate::payoff::PayoffTable;
use crate::random::SeededRng;
use crate::strategy::{Decide, Move};

/// Which side of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Row,
    Column,
}

/// A named strategy taking one side of a match
#[derive(Clone, Copy)]
pub struct Player<'a> {
    pub name: &'a str,
    pub strategy: &'a dyn Decide,
}

impl<'a> Player<'a> {
    pub fn new(name: &'a str, strategy: &'a dyn Decide) -> Self {
        Self { name, strategy }
    }
}

/// Everything about a match that is not the two players or its length
#[derive(Clone, Debug, Default)]
pub struct MatchContext {
    pub payoff: PayoffTable,
    /// Tournament seed, only observable through `Random`-style strategies
    pub seed: u64,
    /// Matrix cell this match fills; keys the per-match generator
    pub cell: u32,
}

/// Upper bound on per-match buffers reserved ahead of the first round
const PREALLOCATED_ROUNDS: u32 = 4096;

fn capacity_for(rounds: u32) -> usize {
    rounds.min(PREALLOCATED_ROUNDS) as usize
}

/// Tracks the longest run of consecutive rounds won 5-0 by the same side
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreakTracker {
    owner: Option<Side>,
    current: u32,
    longest: u32,
    longest_row: u32,
    longest_column: u32,
}

impl StreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one round. `dominant` is the side that took the temptation
    /// payoff against a sucker, or `None` for any other outcome.
    ///
    /// A dominant round extends the streak only if the same side owns it;
    /// a switch of owner restarts at 1 and a neutral round clears it.
    pub fn observe(&mut self, dominant: Option<Side>) {
        match dominant {
            Some(side) if self.owner == Some(side) => self.current += 1,
            Some(side) => {
                self.owner = Some(side);
                self.current = 1;
            }
            None => {
                self.owner = None;
                self.current = 0;
            }
        }
        self.longest = self.longest.max(self.current);
        match self.owner {
            Some(Side::Row) => self.longest_row = self.longest_row.max(self.current),
            Some(Side::Column) => self.longest_column = self.longest_column.max(self.current),
            None => {}
        }
    }

    pub fn owner(&self) -> Option<Side> {
        self.owner
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn longest(&self) -> u32 {
        self.longest
    }

    /// Longest streak owned by `side` alone
    pub fn longest_for(&self, side: Side) -> u32 {
        match side {
            Side::Row => self.longest_row,
            Side::Column => self.longest_column,
        }
    }
}

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub row_move: Move,
    pub column_move: Move,
    pub row_score: u32,
    pub column_score: u32,
    pub cumulative_row: u64,
    pub cumulative_column: u64,
    /// Owner and length of the dominance streak after this round
    pub streak_owner: Option<Side>,
    pub streak: u32,
}

/// Result of a complete match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub row_score: u64,
    pub column_score: u64,
    /// Longest streak owned by either side
    pub longest_dominance_streak: u32,
    pub longest_row_streak: u32,
    pub longest_column_streak: u32,
}

/// Match result with round-by-round details
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReplay {
    pub row: String,
    pub column: String,
    pub result: MatchResult,
    pub rounds: Vec<RoundResult>,
}

/// Run a complete match between two strategies
///
/// # Arguments
/// * `row` - Player whose score fills the matrix cell
/// * `column` - Opponent
/// * `rounds` - Number of rounds; zero yields an all-zero result
/// * `ctx` - Payoff table and generator keys
///
/// # Errors
/// `StrategyPanicked` if either strategy panics while deciding.
pub fn run_match(
    row: Player<'_>,
    column: Player<'_>,
    rounds: u32,
    ctx: &MatchContext,
) -> Result<MatchResult, ArenaError> {
    play(row, column, rounds, ctx, |_| {})
}

/// Run a match and keep every round, for inspection and debugging
pub fn replay_match(
    row: Player<'_>,
    column: Player<'_>,
    rounds: u32,
    ctx: &MatchContext,
) -> Result<MatchReplay, ArenaError> {
    let mut log = Vec::with_capacity(capacity_for(rounds));
    let result = play(row, column, rounds, ctx, |r| log.push(r))?;

    Ok(MatchReplay {
        row: row.name.to_string(),
        column: column.name.to_string(),
        result,
        rounds: log,
    })
}

fn play(
    row: Player<'_>,
    column: Player<'_>,
    rounds: u32,
    ctx: &MatchContext,
    mut on_round: impl FnMut(RoundResult),
) -> Result<MatchResult, ArenaError> {
    let span = tracing::trace_span!("match", row = row.name, column = column.name, rounds);
    let _enter = span.enter();

    let rng = SeededRng::new(ctx.seed, ctx.cell);
    let mut history_row = History::with_capacity(capacity_for(rounds));
    let mut history_column = History::with_capacity(capacity_for(rounds));
    let mut total_row = 0u64;
    let mut total_column = 0u64;
    let mut streak = StreakTracker::new();

    for round in 0..rounds {
        // Both sides see the histories as of the end of the previous round
        let pairing = (row, column);
        let move_row = decide_guarded(
            row,
            pairing,
            round,
            &history_row,
            &history_column,
            rng.for_turn(round, 0),
        )?;
        let move_column = decide_guarded(
            column,
            pairing,
            round,
            &history_column,
            &history_row,
            rng.for_turn(round, 1),
        )?;

        let (score_row, score_column) = ctx.payoff.score(move_row, move_column);
        total_row += score_row as u64;
        total_column += score_column as u64;

        history_row.push(move_row);
        history_column.push(move_column);

        let dominant = if ctx.payoff.dominates(score_row, score_column) {
            Some(Side::Row)
        } else if ctx.payoff.dominates(score_column, score_row) {
            Some(Side::Column)
        } else {
            None
        };
        streak.observe(dominant);

        on_round(RoundResult {
            round,
            row_move: move_row,
            column_move: move_column,
            row_score: score_row,
            column_score: score_column,
            cumulative_row: total_row,
            cumulative_column: total_column,
            streak_owner: streak.owner(),
            streak: streak.current(),
        });
    }

    Ok(MatchResult {
        row_score: total_row,
        column_score: total_column,
        longest_dominance_streak: streak.longest(),
        longest_row_streak: streak.longest_for(Side::Row),
        longest_column_streak: streak.longest_for(Side::Column),
    })
}

/// Ask `player` for a move, turning a panic into an error naming the
/// strategy, round and pairing
fn decide_guarded(
    player: Player<'_>,
    pairing: (Player<'_>, Player<'_>),
    round: u32,
    own: &History,
    opponent: &History,
    mut rng: SeededRng,
) -> Result<Move, ArenaError> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        player.strategy.decide(round, own, opponent, &mut rng)
    }))
    .map_err(|payload| ArenaError::StrategyPanicked {
        strategy: player.name.to_string(),
        round,
        row: pairing.0.name.to_string(),
        column: pairing.1.name.to_string(),
        message: panic_message(&*payload),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
