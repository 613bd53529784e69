//! Command-line front end for the Prisoner's Dilemma round-robin
//!
//! Loads a tournament configuration, hands it to `match-logic`, and writes
//! the resulting matrices as console tables, CSV and JSON.

pub mod config;
pub mod report;

pub use config::{ArenaConfig, RosterEntry};
