//! Engine configuration
//!
//! Every tunable of the engine in one serde record. Missing sections and
//! fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::character::StatGrowth;
use crate::items::{GenerationConfig, RarityTable, DEFAULT_CAPACITY};
use crate::progression::ProgressionConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub inventory_capacity: usize,
    pub progression: ProgressionConfig,
    pub growth: StatGrowth,
    pub generation: GenerationConfig,
    pub rarity: RarityTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            inventory_capacity: DEFAULT_CAPACITY,
            progression: ProgressionConfig::default(),
            growth: StatGrowth::default(),
            generation: GenerationConfig::default(),
            rarity: RarityTable::default(),
        }
    }
}

impl EngineConfig {
    /// Check the values serde cannot. The rarity table validates itself on parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progression.max_level == 0 {
            return Err(ConfigError::Invalid("progression.max_level must be at least 1".into()));
        }
        if !(self.progression.xp_base > 0.0) || !self.progression.xp_exponent.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "xp curve needs a positive base and finite exponent, got {} and {}",
                self.progression.xp_base, self.progression.xp_exponent
            )));
        }
        let chance = self.generation.loot_drop_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(ConfigError::Invalid(format!("loot_drop_chance must be within 0..=1, got {}", chance)));
        }
        let (min_id, max_id) = self.generation.collectible_ids;
        if max_id <= min_id {
            return Err(ConfigError::Invalid(format!("collectible_ids range {}..{} is empty", min_id, max_id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.inventory_capacity, 30);
        assert_eq!(config.progression.max_level, 100);
        assert_eq!(config.growth.base.damage, 10.0);
        assert_eq!(config.generation.loot_drop_chance, 0.3);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.generation.loot_drop_chance = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EngineConfig::default();
        config.progression.max_level = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.generation.collectible_ids = (5, 5);
        assert!(config.validate().is_err());
    }
}
