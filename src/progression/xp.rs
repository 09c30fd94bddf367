//! Experience and leveling
//!
//! The XP curve and its configuration.

use serde::{Deserialize, Serialize};

/// Leveling curve settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub max_level: u32,
    /// Multiplier on every threshold, so `xp_required(1) == xp_base`
    pub xp_base: f64,
    /// How much harder each level gets
    pub xp_exponent: f64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            max_level: 100,
            xp_base: 100.0,
            xp_exponent: 1.5,
        }
    }
}

/// Exponential curve: `round(base * level^exponent)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XpCurve {
    pub base: f64,
    pub exponent: f64,
}

impl XpCurve {
    pub fn new(base: f64, exponent: f64) -> Self {
        Self { base, exponent }
    }

    /// XP needed to advance from `level - 1` into `level`
    pub fn xp_required(&self, level: u32) -> u32 {
        let raw = (self.base * (level as f64).powf(self.exponent)).round();
        if raw.is_nan() || raw <= 0.0 {
            0
        } else if raw >= u32::MAX as f64 {
            u32::MAX
        } else {
            raw as u32
        }
    }

    /// Total XP needed from level 1 to reach a given level
    pub fn total_xp_for_level(&self, level: u32) -> u64 {
        (2..=level).map(|l| self.xp_required(l) as u64).sum()
    }
}

impl Default for XpCurve {
    fn default() -> Self {
        Self::new(100.0, 1.5)
    }
}

impl From<&ProgressionConfig> for XpCurve {
    fn from(config: &ProgressionConfig) -> Self {
        Self::new(config.xp_base, config.xp_exponent)
    }
}

/// XP needed to advance from `level - 1` into `level` on the default curve
pub fn xp_required(level: u32) -> u32 {
    XpCurve::default().xp_required(level)
}
