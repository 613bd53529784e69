//! Round-robin tournament over a named roster

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::ArenaError;
use crate::game::{replay_match, run_match, MatchContext, MatchReplay, MatchResult, Player};
use crate::pairing::{calculate_match_count, cell_to_pair};
use crate::payoff::PayoffTable;
use crate::strategy::{Decide, Strategy};

/// Round count of the classic tournament
pub const DEFAULT_ROUNDS: u32 = 200;

/// Convert a signed round count from configuration
///
/// Zero is a valid (empty) match; negative or oversized counts are rejected.
pub fn checked_rounds(rounds: i64) -> Result<u32, ArenaError> {
    u32::try_from(rounds).map_err(|_| ArenaError::InvalidRoundCount(rounds))
}

/// A named roster slot
#[derive(Clone)]
pub struct Entry {
    name: String,
    strategy: Arc<dyn Decide>,
}

impl Entry {
    pub fn new(name: impl Into<String>, strategy: impl Decide + 'static) -> Self {
        Self::shared(name, Arc::new(strategy))
    }

    pub fn shared(name: impl Into<String>, strategy: Arc<dyn Decide>) -> Self {
        Self {
            name: name.into(),
            strategy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn player(&self) -> Player<'_> {
        Player::new(&self.name, self.strategy.as_ref())
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Ordered list of uniquely named strategies
///
/// Non-empty, names unique, every strategy's parameters valid.
#[derive(Clone, Debug)]
pub struct Roster {
    entries: Vec<Entry>,
}

impl Roster {
    pub fn new(entries: Vec<Entry>) -> Result<Self, ArenaError> {
        if entries.is_empty() {
            return Err(ArenaError::EmptyRoster);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(ArenaError::DuplicateName(entry.name.clone()));
            }
            entry
                .strategy
                .validate()
                .map_err(|reason| ArenaError::InvalidStrategy {
                    name: entry.name.clone(),
                    reason,
                })?;
        }

        Ok(Self { entries })
    }

    /// Roster of built-in strategies
    pub fn from_strategies<I, S>(strategies: I) -> Result<Self, ArenaError>
    where
        I: IntoIterator<Item = (S, Strategy)>,
        S: Into<String>,
    {
        Self::new(
            strategies
                .into_iter()
                .map(|(name, strategy)| Entry::new(name, strategy))
                .collect(),
        )
    }

    /// The seven-player classic roster
    pub fn reference() -> Self {
        Self {
            entries: Strategy::reference_roster()
                .into_iter()
                .map(|(name, strategy)| Entry::new(name, strategy))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed roster
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Index of `name`, which is also its matrix row and column
    pub fn position(&self, name: &str) -> Result<usize, ArenaError> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| ArenaError::UnknownStrategy(name.to_string()))
    }
}

/// Square matrix indexed by (row strategy, column strategy)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<T>>", try_from = "Vec<Vec<T>>")]
#[serde(bound(serialize = "T: Clone + Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Matrix<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Copy> Matrix<T> {
    fn from_cells(size: usize, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// # Panics
    /// If `row` or `column` is out of range.
    pub fn get(&self, row: usize, column: usize) -> T {
        assert!(row < self.size && column < self.size, "cell ({}, {}) out of range", row, column);
        self.cells[row * self.size + column]
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks(0) panics; an empty matrix simply has no rows
        self.cells.chunks(self.size.max(1))
    }
}

impl<T> From<Matrix<T>> for Vec<Vec<T>> {
    fn from(m: Matrix<T>) -> Self {
        let size = m.size;
        let mut rows = Vec::with_capacity(size);
        let mut cells = m.cells.into_iter();
        for _ in 0..size {
            rows.push(cells.by_ref().take(size).collect());
        }
        rows
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = String;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        let size = rows.len();
        if let Some(bad) = rows.iter().position(|r| r.len() != size) {
            return Err(format!("row {} has {} cells, expected {}", bad, rows[bad].len(), size));
        }
        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

/// Aggregate line for one strategy
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    /// Sum of its row of the score matrix
    pub total_score: u64,
    /// Longest streak this strategy itself dominated, as row or as column
    pub longest_streak: u32,
}

/// Output of a tournament run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentResult {
    pub names: Vec<String>,
    pub rounds: u32,
    /// Row player's score in each cell
    pub scores: Matrix<u64>,
    /// Column player's score in each cell
    pub opponent_scores: Matrix<u64>,
    /// Longest dominance streak in each cell, whichever side owned it
    pub streaks: Matrix<u32>,
    /// Longest streak owned by the row player in each cell
    pub row_streaks: Matrix<u32>,
    /// Longest streak owned by the column player in each cell
    pub column_streaks: Matrix<u32>,
}

impl TournamentResult {
    /// Strategies ranked by total score, best first; ties broken by name
    pub fn standings(&self) -> Vec<Standing> {
        let mut table: Vec<Standing> = self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| Standing {
                name: name.clone(),
                total_score: self.scores.row(i).iter().sum(),
                longest_streak: self.own_streak(i),
            })
            .collect();
        table.sort_by(|a, b| {
            b.total_score
                .cmp(&a.total_score)
                .then_with(|| a.name.cmp(&b.name))
        });
        table
    }

    fn own_streak(&self, index: usize) -> u32 {
        let as_row = self.row_streaks.row(index).iter().copied();
        let as_column = (0..self.names.len()).map(|row| self.column_streaks.get(row, index));
        as_row.chain(as_column).max().unwrap_or(0)
    }
}

fn collect_matrix<T: Copy>(
    size: usize,
    results: &[MatchResult],
    field: impl Fn(&MatchResult) -> T,
) -> Matrix<T> {
    Matrix::from_cells(size, results.iter().map(field).collect())
}

/// Every ordered pair of a roster, self-play included, over a fixed round count
#[derive(Clone, Debug)]
pub struct Tournament {
    roster: Roster,
    rounds: u32,
    payoff: PayoffTable,
    seed: u64,
    parallel: bool,
}

impl Tournament {
    pub fn new(roster: Roster, rounds: u32) -> Self {
        Self {
            roster,
            rounds,
            payoff: PayoffTable::default(),
            seed: 0,
            parallel: cfg!(feature = "parallel"),
        }
    }

    /// Replace the classic payoff table
    pub fn payoff(mut self, payoff: PayoffTable) -> Self {
        self.payoff = payoff;
        self
    }

    /// Seed for strategies that draw from their per-turn generator
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Spread matches over the rayon pool. Ignored without the `parallel`
    /// feature; results are identical either way.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Replay one cell with the same context the full run would give it
    pub fn replay(&self, row: &str, column: &str) -> Result<MatchReplay, ArenaError> {
        self.payoff.validate()?;
        let i = self.roster.position(row)?;
        let j = self.roster.position(column)?;
        let cell = (i * self.roster.len() + j) as u32;

        replay_match(
            self.roster.entries()[i].player(),
            self.roster.entries()[j].player(),
            self.rounds,
            &self.match_context(cell),
        )
    }

    pub fn match_context(&self, cell: u32) -> MatchContext {
        MatchContext {
            payoff: self.payoff,
            seed: self.seed,
            cell,
        }
    }

    /// Play all n² matches and collect the score and streak matrices
    ///
    /// The first failing match aborts the run. When matches run in parallel
    /// and several fail, which failure is reported is unspecified.
    pub fn run(&self) -> Result<TournamentResult, ArenaError> {
        self.payoff.validate()?;

        let n = self.roster.len();
        let total = calculate_match_count(n as u32);
        info!(
            participants = n,
            rounds = self.rounds,
            matches = total,
            parallel = self.parallel,
            "starting tournament"
        );

        let results = self.play_all(total)?;

        let scores = collect_matrix(n, &results, |r| r.row_score);
        let opponent_scores = collect_matrix(n, &results, |r| r.column_score);
        let streaks = collect_matrix(n, &results, |r| r.longest_dominance_streak);
        let row_streaks = collect_matrix(n, &results, |r| r.longest_row_streak);
        let column_streaks = collect_matrix(n, &results, |r| r.longest_column_streak);

        info!(matches = total, "tournament complete");

        Ok(TournamentResult {
            names: self.roster.names(),
            rounds: self.rounds,
            scores,
            opponent_scores,
            streaks,
            row_streaks,
            column_streaks,
        })
    }

    #[cfg(feature = "parallel")]
    fn play_all(&self, total: u64) -> Result<Vec<MatchResult>, ArenaError> {
        use rayon::prelude::*;

        if self.parallel {
            (0..total).into_par_iter().map(|cell| self.play_cell(cell)).collect()
        } else {
            (0..total).map(|cell| self.play_cell(cell)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn play_all(&self, total: u64) -> Result<Vec<MatchResult>, ArenaError> {
        (0..total).map(|cell| self.play_cell(cell)).collect()
    }

    /// Each call owns exactly one matrix cell
    fn play_cell(&self, cell: u64) -> Result<MatchResult, ArenaError> {
        let n = self.roster.len() as u32;
        let (i, j) = cell_to_pair(cell, n).ok_or(ArenaError::EmptyRoster)?;
        let row = &self.roster.entries()[i as usize];
        let column = &self.roster.entries()[j as usize];

        let result = run_match(
            row.player(),
            column.player(),
            self.rounds,
            &self.match_context(cell as u32),
        )?;

        debug!(
            "Match {}: {} vs {} -> {} : {} (streak {})",
            cell,
            row.name(),
            column.name(),
            result.row_score,
            result.column_score,
            result.longest_dominance_streak
        );
        Ok(result)
    }
}
