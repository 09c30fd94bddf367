//! Rarity table
//!
//! Maps a uniform draw to a rarity tier and each tier to its stat multiplier.
//! Both mappings read the same table, so thresholds and multipliers cannot
//! drift apart between generation paths.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::item::ItemRarity;

/// One row of the cumulative distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityTier {
    pub rarity: ItemRarity,
    /// Exclusive upper bound of this tier's draw interval
    pub upper: f64,
    pub multiplier: f32,
}

const DEFAULT_TIERS: [RarityTier; 5] = [
    RarityTier { rarity: ItemRarity::Common, upper: 0.50, multiplier: 1.0 },
    RarityTier { rarity: ItemRarity::Uncommon, upper: 0.75, multiplier: 1.3 },
    RarityTier { rarity: ItemRarity::Rare, upper: 0.90, multiplier: 1.6 },
    RarityTier { rarity: ItemRarity::Epic, upper: 0.97, multiplier: 2.0 },
    RarityTier { rarity: ItemRarity::Legendary, upper: 1.0, multiplier: 2.5 },
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RarityTableError {
    #[error("tier {rarity} is out of order; tiers must run Common through Legendary")]
    OutOfOrder { rarity: ItemRarity },
    #[error("threshold for {rarity} ({upper}) must be above the previous tier and at most 1.0")]
    BadThreshold { rarity: ItemRarity, upper: f64 },
    #[error("last tier must end at 1.0, found {0}")]
    Incomplete(f64),
    #[error("multiplier for {rarity} must be positive, found {multiplier}")]
    BadMultiplier { rarity: ItemRarity, multiplier: f32 },
    #[error("expected one tier per rarity (5), found {0}")]
    TierCount(usize),
}

/// Cumulative rarity distribution with per-tier multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RarityTier>", into = "Vec<RarityTier>")]
pub struct RarityTable {
    tiers: [RarityTier; 5],
}

impl RarityTable {
    /// Build a custom table. Tiers must be in rarity order with strictly
    /// increasing thresholds ending at 1.0.
    pub fn new(tiers: [RarityTier; 5]) -> Result<Self, RarityTableError> {
        let mut previous = 0.0;
        for (tier, expected) in tiers.iter().zip(ItemRarity::ALL) {
            if tier.rarity != expected {
                return Err(RarityTableError::OutOfOrder { rarity: tier.rarity });
            }
            if !(tier.upper > previous && tier.upper <= 1.0) {
                return Err(RarityTableError::BadThreshold { rarity: tier.rarity, upper: tier.upper });
            }
            if !(tier.multiplier > 0.0) {
                return Err(RarityTableError::BadMultiplier {
                    rarity: tier.rarity,
                    multiplier: tier.multiplier,
                });
            }
            previous = tier.upper;
        }
        if previous != 1.0 {
            return Err(RarityTableError::Incomplete(previous));
        }
        Ok(Self { tiers })
    }

    /// Roll a rarity by consuming one uniform draw from `rng`
    pub fn roll(&self, rng: &mut impl Rng) -> ItemRarity {
        self.rarity_for_draw(rng.gen::<f64>())
    }

    /// Map a draw in [0, 1) to its tier. Draws at or past 1.0 land on Legendary.
    pub fn rarity_for_draw(&self, draw: f64) -> ItemRarity {
        self.tiers
            .iter()
            .find(|tier| draw < tier.upper)
            .map(|tier| tier.rarity)
            .unwrap_or(ItemRarity::Legendary)
    }

    pub fn multiplier(&self, rarity: ItemRarity) -> f32 {
        self.tiers[rarity.ordinal() as usize].multiplier
    }

    /// Probability mass of a tier
    pub fn probability(&self, rarity: ItemRarity) -> f64 {
        let index = rarity.ordinal() as usize;
        let lower = if index == 0 { 0.0 } else { self.tiers[index - 1].upper };
        self.tiers[index].upper - lower
    }

    pub fn tiers(&self) -> &[RarityTier; 5] {
        &self.tiers
    }
}

impl Default for RarityTable {
    fn default() -> Self {
        Self { tiers: DEFAULT_TIERS }
    }
}

impl TryFrom<[RarityTier; 5]> for RarityTable {
    type Error = RarityTableError;

    fn try_from(tiers: [RarityTier; 5]) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl TryFrom<Vec<RarityTier>> for RarityTable {
    type Error = RarityTableError;

    fn try_from(tiers: Vec<RarityTier>) -> Result<Self, Self::Error> {
        let count = tiers.len();
        let tiers: [RarityTier; 5] = tiers.try_into().map_err(|_| RarityTableError::TierCount(count))?;
        Self::new(tiers)
    }
}

impl From<RarityTable> for Vec<RarityTier> {
    fn from(table: RarityTable) -> Self {
        table.tiers.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_draw_boundaries() {
        let table = RarityTable::default();
        assert_eq!(table.rarity_for_draw(0.0), ItemRarity::Common);
        assert_eq!(table.rarity_for_draw(0.4999), ItemRarity::Common);
        assert_eq!(table.rarity_for_draw(0.50), ItemRarity::Uncommon);
        assert_eq!(table.rarity_for_draw(0.75), ItemRarity::Rare);
        assert_eq!(table.rarity_for_draw(0.90), ItemRarity::Epic);
        assert_eq!(table.rarity_for_draw(0.97), ItemRarity::Legendary);
        assert_eq!(table.rarity_for_draw(0.9999), ItemRarity::Legendary);
        assert_eq!(table.rarity_for_draw(1.0), ItemRarity::Legendary);
    }

    #[test]
    fn test_multipliers() {
        let table = RarityTable::default();
        assert_eq!(table.multiplier(ItemRarity::Common), 1.0);
        assert_eq!(table.multiplier(ItemRarity::Uncommon), 1.3);
        assert_eq!(table.multiplier(ItemRarity::Rare), 1.6);
        assert_eq!(table.multiplier(ItemRarity::Epic), 2.0);
        assert_eq!(table.multiplier(ItemRarity::Legendary), 2.5);
    }

    #[test]
    fn test_distribution() {
        let table = RarityTable::default();
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let draws = 200_000;
        let mut counts = [0usize; 5];
        for _ in 0..draws {
            counts[table.roll(&mut rng).ordinal() as usize] += 1;
        }

        let expected = [0.50, 0.25, 0.15, 0.07, 0.03];
        for (rarity, (count, want)) in ItemRarity::ALL.iter().zip(counts.iter().zip(expected)) {
            let observed = *count as f64 / draws as f64;
            assert!(
                (observed - want).abs() < 0.01,
                "{} observed {:.4}, expected {:.2}",
                rarity,
                observed,
                want
            );
            assert!((table.probability(*rarity) - want).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rejects_bad_tables() {
        let mut tiers = *RarityTable::default().tiers();
        tiers[2].upper = 0.70;
        assert!(matches!(RarityTable::new(tiers), Err(RarityTableError::BadThreshold { .. })));

        let mut tiers = *RarityTable::default().tiers();
        tiers[4].upper = 0.99;
        assert_eq!(RarityTable::new(tiers), Err(RarityTableError::Incomplete(0.99)));

        let mut tiers = *RarityTable::default().tiers();
        tiers.swap(0, 1);
        assert!(matches!(RarityTable::new(tiers), Err(RarityTableError::OutOfOrder { .. })));

        let mut tiers = *RarityTable::default().tiers();
        tiers[3].multiplier = 0.0;
        assert!(matches!(RarityTable::new(tiers), Err(RarityTableError::BadMultiplier { .. })));

        let short = RarityTable::default().tiers()[..4].to_vec();
        assert_eq!(RarityTable::try_from(short), Err(RarityTableError::TierCount(4)));
    }
}
