//! Strategy definitions and execution

use serde::{Deserialize, Serialize};

use crate::random::SeededRng;

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    pub fn flip(self) -> Move {
        match self {
            Move::Cooperate => Move::Defect,
            Move::Defect => Move::Cooperate,
        }
    }
}

/// Anything that can pick a move for one round.
///
/// `own` and `opponent` hold the moves of all rounds before `round`, so both
/// always have length `round`. Implementations must be a function of their
/// inputs only: per-match state is rebuilt from the histories, which lets one
/// value sit on both sides of a match or in many matches at once.
///
/// `rng` is private to this side and this round. Deterministic strategies
/// ignore it.
pub trait Decide: Send + Sync {
    fn decide(&self, round: u32, own: &[Move], opponent: &[Move], rng: &mut SeededRng) -> Move;

    /// Checked once when the roster is built
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

pub const DEFAULT_PERIOD: u32 = 20;
pub const DEFAULT_COOPERATE_BIAS: u8 = 50;

fn default_period() -> u32 {
    DEFAULT_PERIOD
}

fn default_cooperate_bias() -> u8 {
    DEFAULT_COOPERATE_BIAS
}

/// Built-in strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Always defect, never cooperate.
    AlwaysDefect,
    /// Always cooperate, never defect.
    AlwaysCooperate,
    /// Copy opponent's last move. Start with cooperate.
    Mirror,
    /// Defect after any round the opponent defected in, judged on the
    /// immediately preceding move only.
    GrimTrigger,
    /// Cooperate, except defect on every `period`-th round.
    Periodic {
        #[serde(default = "default_period")]
        period: u32,
    },
    /// Defect once the opponent has ever defected.
    ForgivingScan,
    /// Cooperate until the opponent has defected twice in total.
    TwoStrikes,
    /// Play the opposite of the opponent's last move. Start with cooperate.
    Contrarian,
    /// Win-stay, lose-switch. Repeat move if good outcome.
    Pavlov,
    /// Defect only if opponent defected twice in a row.
    TitForTwoTats,
    /// Mirror, but start with defect.
    SuspiciousMirror,
    /// Random choice each round, drawn from the per-turn generator.
    Random {
        #[serde(default = "default_cooperate_bias")]
        cooperate_bias: u8,
    },
}

impl Strategy {
    /// One of every built-in strategy, with default parameters
    pub fn catalog() -> Vec<Strategy> {
        vec![
            Strategy::AlwaysDefect,
            Strategy::AlwaysCooperate,
            Strategy::Mirror,
            Strategy::GrimTrigger,
            Strategy::Periodic { period: DEFAULT_PERIOD },
            Strategy::ForgivingScan,
            Strategy::TwoStrikes,
            Strategy::Contrarian,
            Strategy::Pavlov,
            Strategy::TitForTwoTats,
            Strategy::SuspiciousMirror,
            Strategy::Random { cooperate_bias: DEFAULT_COOPERATE_BIAS },
        ]
    }

    /// The seven-player roster the classic 200-round tournament is run with
    pub fn reference_roster() -> Vec<(&'static str, Strategy)> {
        vec![
            ("Alex", Strategy::AlwaysDefect),
            ("Bob", Strategy::AlwaysCooperate),
            ("Clara", Strategy::Mirror),
            ("Denis", Strategy::GrimTrigger),
            ("Emma", Strategy::Periodic { period: DEFAULT_PERIOD }),
            ("Frida", Strategy::ForgivingScan),
            ("George", Strategy::TwoStrikes),
        ]
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Strategy::AlwaysDefect => "AlwaysDefect",
            Strategy::AlwaysCooperate => "AlwaysCooperate",
            Strategy::Mirror => "Mirror",
            Strategy::GrimTrigger => "GrimTrigger",
            Strategy::Periodic { .. } => "Periodic",
            Strategy::ForgivingScan => "ForgivingScan",
            Strategy::TwoStrikes => "TwoStrikes",
            Strategy::Contrarian => "Contrarian",
            Strategy::Pavlov => "Pavlov",
            Strategy::TitForTwoTats => "TitForTwoTats",
            Strategy::SuspiciousMirror => "SuspiciousMirror",
            Strategy::Random { .. } => "Random",
        }
    }

    /// Human-readable description, used by the strategy listing
    pub fn describe(&self) -> String {
        match self {
            Strategy::AlwaysDefect => "Never cooperates. Always defects.".to_string(),
            Strategy::AlwaysCooperate => "Never defects. Always cooperates.".to_string(),
            Strategy::Mirror => "Copies opponent's last move. Starts by cooperating.".to_string(),
            Strategy::GrimTrigger => {
                "Cooperates first, then defects whenever the opponent's last move was a defection."
                    .to_string()
            }
            Strategy::Periodic { period } => {
                format!("Cooperates, but defects on every {}th round.", period)
            }
            Strategy::ForgivingScan => {
                "Cooperates until the opponent defects once, then always defects.".to_string()
            }
            Strategy::TwoStrikes => {
                "Cooperates until the opponent has defected twice, then always defects."
                    .to_string()
            }
            Strategy::Contrarian => {
                "Plays the opposite of the opponent's last move. Starts by cooperating."
                    .to_string()
            }
            Strategy::Pavlov => "Repeats move if outcome was good, switches if bad.".to_string(),
            Strategy::TitForTwoTats => {
                "Only retaliates after two consecutive defections.".to_string()
            }
            Strategy::SuspiciousMirror => "Like Mirror, but starts with defect.".to_string(),
            Strategy::Random { cooperate_bias } => {
                format!("Cooperates at random {}% of the time.", cooperate_bias)
            }
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Mirror
    }
}

impl Decide for Strategy {
    fn decide(&self, round: u32, own: &[Move], opponent: &[Move], rng: &mut SeededRng) -> Move {
        match *self {
            Strategy::AlwaysDefect => Move::Defect,
            Strategy::AlwaysCooperate => Move::Cooperate,
            Strategy::Mirror | Strategy::GrimTrigger => {
                opponent.last().copied().unwrap_or(Move::Cooperate)
            }
            Strategy::Periodic { period } => execute_periodic(round, period),
            Strategy::ForgivingScan => execute_threshold(opponent, 1),
            Strategy::TwoStrikes => execute_threshold(opponent, 2),
            Strategy::Contrarian => opponent.last().map_or(Move::Cooperate, |m| m.flip()),
            Strategy::Pavlov => execute_pavlov(own, opponent),
            Strategy::TitForTwoTats => execute_tit_for_two_tats(opponent),
            Strategy::SuspiciousMirror => opponent.last().copied().unwrap_or(Move::Defect),
            Strategy::Random { cooperate_bias } => {
                if rng.next_percent() < cooperate_bias {
                    Move::Cooperate
                } else {
                    Move::Defect
                }
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        match *self {
            Strategy::Periodic { period: 0 } => Err("period must be at least 1".to_string()),
            Strategy::Random { cooperate_bias } if cooperate_bias > 100 => Err(format!(
                "cooperate_bias must be 0-100, got {}",
                cooperate_bias
            )),
            _ => Ok(()),
        }
    }
}

/// Periodic: rounds are counted from one, so with period 20 the 20th, 40th, ...
/// rounds are defections
fn execute_periodic(round: u32, period: u32) -> Move {
    if period > 0 && (round as u64 + 1) % period as u64 == 0 {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Defect for good once the opponent's total defections reach `strikes`.
/// The count never decreases, so the switch is permanent.
fn execute_threshold(opponent: &[Move], strikes: usize) -> Move {
    let defection_count = opponent.iter().filter(|m| **m == Move::Defect).count();

    if defection_count >= strikes {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Pavlov: Win-stay, lose-switch
/// - If last round was good (3+ points), repeat move
/// - If last round was bad (<3 points), switch move
fn execute_pavlov(own: &[Move], opponent: &[Move]) -> Move {
    match (own.last(), opponent.last()) {
        (Some(&my_last), Some(&opp_last)) => {
            let (my_score, _) = crate::payoff(my_last, opp_last);
            if my_score >= 3 {
                my_last
            } else {
                my_last.flip()
            }
        }
        _ => Move::Cooperate,
    }
}

fn execute_tit_for_two_tats(opponent: &[Move]) -> Move {
    match opponent {
        [.., Move::Defect, Move::Defect] => Move::Defect,
        _ => Move::Cooperate,
    }
}
