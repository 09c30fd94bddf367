//! Character stat sheet
//!
//! Base stats that grow with level, combined with whatever is equipped.

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use crate::items::EquipmentSet;

/// Core stat values, used both for base stats and per-level deltas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStats {
    pub health: f32,
    pub mana: f32,
    pub damage: f32,
    pub armor: f32,
    pub crit: f32,
}

impl BaseStats {
    /// Starting stats for a level 1 character
    pub fn starting() -> Self {
        Self {
            health: 100.0,
            mana: 100.0,
            damage: 10.0,
            armor: 5.0,
            crit: 5.0,
        }
    }

    /// Amount gained per level
    pub fn per_level() -> Self {
        Self {
            health: 10.0,
            mana: 5.0,
            damage: 2.0,
            armor: 1.0,
            crit: 0.0,
        }
    }
}

impl Add for BaseStats {
    type Output = BaseStats;

    fn add(self, rhs: BaseStats) -> BaseStats {
        BaseStats {
            health: self.health + rhs.health,
            mana: self.mana + rhs.mana,
            damage: self.damage + rhs.damage,
            armor: self.armor + rhs.armor,
            crit: self.crit + rhs.crit,
        }
    }
}

impl Mul<f32> for BaseStats {
    type Output = BaseStats;

    fn mul(self, factor: f32) -> BaseStats {
        BaseStats {
            health: self.health * factor,
            mana: self.mana * factor,
            damage: self.damage * factor,
            armor: self.armor * factor,
            crit: self.crit * factor,
        }
    }
}

/// Level 1 stats plus how they grow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatGrowth {
    pub base: BaseStats,
    pub per_level: BaseStats,
}

impl Default for StatGrowth {
    fn default() -> Self {
        Self {
            base: BaseStats::starting(),
            per_level: BaseStats::per_level(),
        }
    }
}

impl StatGrowth {
    /// Base stats at `level`; level 1 carries no level bonus
    pub fn at_level(&self, level: u32) -> BaseStats {
        self.base + self.per_level * level.saturating_sub(1) as f32
    }
}

/// Derived character totals plus current health and mana.
///
/// Totals are recomputed from the equipment on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterStatSheet {
    growth: StatGrowth,
    level: u32,
    base: BaseStats,
    health: f32,
    mana: f32,
}

impl CharacterStatSheet {
    /// Level 1 sheet at full health and mana
    pub fn new(growth: StatGrowth) -> Self {
        let base = growth.at_level(1);
        Self {
            growth,
            level: 1,
            base,
            health: base.health,
            mana: base.mana,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Base stats for the current level, before equipment
    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    pub fn growth(&self) -> &StatGrowth {
        &self.growth
    }

    pub fn max_health(&self, equipment: &EquipmentSet) -> f32 {
        self.base.health + equipment.aggregate_bonus().health
    }

    pub fn max_mana(&self, equipment: &EquipmentSet) -> f32 {
        self.base.mana + equipment.aggregate_bonus().mana
    }

    /// Base damage plus the weapon's damage. Armor damage bonuses do not count.
    pub fn total_damage(&self, equipment: &EquipmentSet) -> f32 {
        self.base.damage + equipment.weapon_bonus().damage
    }

    pub fn total_armor(&self, equipment: &EquipmentSet) -> f32 {
        self.base.armor + equipment.armor_bonus().armor
    }

    /// Crit chance in percent: base plus the weapon's crit
    pub fn crit_chance(&self, equipment: &EquipmentSet) -> f32 {
        self.base.crit + equipment.weapon_bonus().crit_chance
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn mana(&self) -> f32 {
        self.mana
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Advance to `new_level`, grow base stats for every level gained, then heal to full.
    /// Levels at or below the current one are ignored.
    pub fn on_level_up(&mut self, new_level: u32, equipment: &EquipmentSet) {
        if new_level <= self.level {
            return;
        }
        let gained = new_level - self.level;
        self.base = self.base + self.growth.per_level * gained as f32;
        self.level = new_level;
        self.restore_full(equipment);
    }

    /// Set health and mana to their maximums
    pub fn restore_full(&mut self, equipment: &EquipmentSet) {
        self.health = self.max_health(equipment);
        self.mana = self.max_mana(equipment);
    }

    /// Keep current health and mana within the current maximums
    pub fn clamp_to_max(&mut self, equipment: &EquipmentSet) {
        self.health = self.health.min(self.max_health(equipment));
        self.mana = self.mana.min(self.max_mana(equipment));
    }

    /// Heal, capped at max health. Returns the amount actually restored.
    pub fn heal(&mut self, amount: f32, equipment: &EquipmentSet) -> f32 {
        let before = self.health;
        self.health = (self.health + amount.max(0.0)).min(self.max_health(equipment));
        (self.health - before).max(0.0)
    }

    /// Restore mana, capped at max mana. Returns the amount actually restored.
    pub fn restore_mana(&mut self, amount: f32, equipment: &EquipmentSet) -> f32 {
        let before = self.mana;
        self.mana = (self.mana + amount.max(0.0)).min(self.max_mana(equipment));
        (self.mana - before).max(0.0)
    }

    /// Remove health, never going below zero. Returns health left.
    pub fn lose_health(&mut self, amount: f32) -> f32 {
        self.health = (self.health - amount.max(0.0)).max(0.0);
        self.health
    }

    /// Spend mana if there is enough
    pub fn spend_mana(&mut self, amount: f32) -> bool {
        if amount <= self.mana {
            self.mana -= amount.max(0.0);
            true
        } else {
            false
        }
    }
}

impl Default for CharacterStatSheet {
    fn default() -> Self {
        Self::new(StatGrowth::default())
    }
}
