//! Tournament configuration file

use anyhow::{Context, Result};
use match_logic::{
    checked_rounds, ArenaError, PayoffTable, Roster, Strategy, Tournament, DEFAULT_ROUNDS,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One named roster slot as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub strategy: Strategy,
}

/// Tournament configuration
///
/// Every field is optional. A missing roster means the classic seven-player
/// roster; a missing round count means 200.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    pub rounds: Option<i64>,
    pub seed: Option<u64>,
    pub payoff: PayoffTable,
    pub roster: Option<Vec<RosterEntry>>,
}

impl ArenaConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn rounds(&self) -> Result<u32, ArenaError> {
        self.rounds.map_or(Ok(DEFAULT_ROUNDS), checked_rounds)
    }

    pub fn roster(&self) -> Result<Roster, ArenaError> {
        match &self.roster {
            None => Ok(Roster::reference()),
            Some(entries) => Roster::from_strategies(
                entries.iter().map(|e| (e.name.clone(), e.strategy)),
            ),
        }
    }

    /// Validate everything and build the tournament it describes
    pub fn tournament(&self) -> Result<Tournament, ArenaError> {
        self.payoff.validate()?;
        Ok(Tournament::new(self.roster()?, self.rounds()?)
            .payoff(self.payoff)
            .seed(self.seed.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_reference() {
        let config = ArenaConfig::from_json("{}").unwrap();
        assert_eq!(config.rounds().unwrap(), 200);
        assert_eq!(config.roster().unwrap().len(), 7);
        assert_eq!(config.payoff, PayoffTable::CLASSIC);
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "rounds": 50,
            "seed": 11,
            "payoff": {"temptation": 6},
            "roster": [
                {"name": "mirror", "strategy": "Mirror"},
                {"name": "every-5th", "strategy": {"Periodic": {"period": 5}}},
                {"name": "coin", "strategy": {"Random": {"cooperate_bias": 70}}}
            ]
        }"#;
        let config = ArenaConfig::from_json(json).unwrap();
        assert_eq!(config.rounds().unwrap(), 50);
        assert_eq!(config.payoff.temptation, 6);

        let tournament = config.tournament().unwrap();
        assert_eq!(tournament.rounds(), 50);
        assert_eq!(tournament.roster().names(), vec!["mirror", "every-5th", "coin"]);
    }

    #[test]
    fn test_bundled_config_runs() {
        let json = include_str!("../../../configs/extended.json");
        let config = ArenaConfig::from_json(json).unwrap();
        let result = config.tournament().unwrap().run().unwrap();
        assert_eq!(result.names.len(), 12);
        // The first seven entries reproduce the classic roster
        assert_eq!(result.scores.get(0, 1), 1000);
        assert_eq!(result.streaks.get(4, 5), 19);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arena.json");
        std::fs::write(&path, r#"{"rounds": 12}"#).unwrap();

        let config = ArenaConfig::load(&path).unwrap();
        assert_eq!(config.rounds(), Ok(12));

        let missing = ArenaConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(missing.to_string().contains("failed to read config"));
    }

    #[test]
    fn test_negative_rounds() {
        let config = ArenaConfig::from_json(r#"{"rounds": -3}"#).unwrap();
        assert_eq!(config.rounds(), Err(ArenaError::InvalidRoundCount(-3)));
        assert!(config.tournament().is_err());
    }

    #[test]
    fn test_zero_rounds_allowed() {
        let config = ArenaConfig::from_json(r#"{"rounds": 0}"#).unwrap();
        assert_eq!(config.rounds(), Ok(0));
    }

    #[test]
    fn test_empty_roster_rejected() {
        let config = ArenaConfig::from_json(r#"{"roster": []}"#).unwrap();
        assert_eq!(config.roster().unwrap_err(), ArenaError::EmptyRoster);
    }

    #[test]
    fn test_duplicate_roster_names_rejected() {
        let json = r#"{"roster": [
            {"name": "x", "strategy": "Mirror"},
            {"name": "x", "strategy": "Pavlov"}
        ]}"#;
        let config = ArenaConfig::from_json(json).unwrap();
        assert_eq!(config.roster().unwrap_err(), ArenaError::DuplicateName("x".to_string()));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(ArenaConfig::from_json(r#"{"round": 10}"#).is_err());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let json = r#"{"roster": [{"name": "x", "strategy": "Tester"}]}"#;
        assert!(ArenaConfig::from_json(json).is_err());
    }

    #[test]
    fn test_bad_payoff_rejected() {
        let config = ArenaConfig::from_json(r#"{"payoff": {"sucker": 2}}"#).unwrap();
        assert!(matches!(config.tournament(), Err(ArenaError::InvalidPayoff(_))));
    }
}
