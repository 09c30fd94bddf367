//! Item generation
//!
//! Builds fully populated weapons, armor, and collectibles for a requested
//! level. All randomness comes from the caller's RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::item::{
    Armor, ArmorSlot, Collectible, Item, ItemBase, ItemId, ItemRarity, StatBlock, Weapon, WeaponKind,
};
use super::names;
use super::rarity::RarityTable;
use super::visual::{VisualGenerator, VisualHandle, VisualRequest};

/// Tunables for the generation pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Item level varies by up to this much (inclusive) around the request
    pub level_jitter: u32,
    /// Chance an enemy kill drops an item
    pub loot_drop_chance: f64,
    /// Half-open collectible id range
    pub collectible_ids: (u32, u32),
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            level_jitter: 2,
            loot_drop_chance: 0.3,
            collectible_ids: (1, 1000),
        }
    }
}

/// Stand-in collaborator for scenes without a visual builder
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVisuals;

impl VisualGenerator for NoVisuals {
    fn generate(&mut self, _request: &VisualRequest) -> Option<VisualHandle> {
        None
    }
}

/// Weapon bonuses for a given kind, level, and rarity
pub fn weapon_stats(kind: WeaponKind, level: u32, rarity: ItemRarity, multiplier: f32) -> StatBlock {
    StatBlock {
        damage: (10.0 + level as f32 * 5.0) * multiplier,
        crit_chance: 5.0 + 2.0 * rarity.ordinal() as f32,
        attack_speed: kind.attack_speed(),
        ..StatBlock::default()
    }
}

/// Armor bonuses for a given level and rarity multiplier
pub fn armor_stats(level: u32, multiplier: f32) -> StatBlock {
    StatBlock {
        armor: (5.0 + level as f32 * 3.0) * multiplier,
        health: (20.0 + level as f32 * 10.0) * multiplier,
        ..StatBlock::default()
    }
}

/// Produces items; owned by whichever scene or character needs one
pub struct ItemGenerator<V = NoVisuals> {
    rarity: RarityTable,
    config: GenerationConfig,
    visuals: V,
}

impl ItemGenerator<NoVisuals> {
    pub fn new(rarity: RarityTable, config: GenerationConfig) -> Self {
        Self { rarity, config, visuals: NoVisuals }
    }
}

impl Default for ItemGenerator<NoVisuals> {
    fn default() -> Self {
        Self::new(RarityTable::default(), GenerationConfig::default())
    }
}

impl<V: VisualGenerator> ItemGenerator<V> {
    /// Swap in a visual collaborator
    pub fn with_visuals<W: VisualGenerator>(self, visuals: W) -> ItemGenerator<W> {
        ItemGenerator { rarity: self.rarity, config: self.config, visuals }
    }

    pub fn rarity_table(&self) -> &RarityTable {
        &self.rarity
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn visuals(&self) -> &V {
        &self.visuals
    }

    pub fn visuals_mut(&mut self) -> &mut V {
        &mut self.visuals
    }

    /// Jitter the requested level and clamp it to at least 1
    pub fn roll_level(&self, request_level: i32, rng: &mut impl Rng) -> u32 {
        let jitter = self.config.level_jitter.min(i32::MAX as u32) as i32;
        let offset = if jitter == 0 { 0 } else { rng.gen_range(-jitter..=jitter) };
        request_level.saturating_add(offset).max(1) as u32
    }

    /// Generate a random weapon
    pub fn generate_weapon(&mut self, request_level: i32, rng: &mut impl Rng) -> Weapon {
        let level = self.roll_level(request_level, rng);
        let rarity = self.rarity.roll(rng);
        let kind = WeaponKind::ALL[rng.gen_range(0..WeaponKind::ALL.len())];
        self.forge_weapon(level, kind, rarity, rng)
    }

    /// Generate a weapon with the rarity roll skipped
    pub fn generate_weapon_with_rarity(
        &mut self,
        request_level: i32,
        rarity: ItemRarity,
        rng: &mut impl Rng,
    ) -> Weapon {
        let level = self.roll_level(request_level, rng);
        let kind = WeaponKind::ALL[rng.gen_range(0..WeaponKind::ALL.len())];
        self.forge_weapon(level, kind, rarity, rng)
    }

    /// Build a weapon from already-decided level, kind, and rarity.
    /// Only the name draws from `rng`.
    pub fn forge_weapon(
        &mut self,
        level: u32,
        kind: WeaponKind,
        rarity: ItemRarity,
        rng: &mut impl Rng,
    ) -> Weapon {
        let name = names::weapon_name(kind, rarity, rng);
        let stats = weapon_stats(kind, level, rarity, self.rarity.multiplier(rarity));
        let mut weapon = Weapon::new(ItemBase::new(ItemId::random(rng), name, rarity, level, stats), kind);
        let visual = self.visuals.generate(&VisualRequest::weapon(kind, rarity));
        weapon.set_visual(visual);

        log::debug!(
            "Generated weapon '{}' ({} {}, level {}, {:.1} dmg)",
            weapon.base().name(), rarity, kind.name(), level, stats.damage
        );
        weapon
    }

    /// Generate a random armor piece for any slot
    pub fn generate_armor(&mut self, request_level: i32, rng: &mut impl Rng) -> Armor {
        let level = self.roll_level(request_level, rng);
        let rarity = self.rarity.roll(rng);
        let slot = ArmorSlot::ALL[rng.gen_range(0..ArmorSlot::ALL.len())];
        self.forge_armor(level, slot, rarity, rng)
    }

    /// Generate armor with the rarity roll skipped
    pub fn generate_armor_with_rarity(
        &mut self,
        request_level: i32,
        rarity: ItemRarity,
        rng: &mut impl Rng,
    ) -> Armor {
        let level = self.roll_level(request_level, rng);
        let slot = ArmorSlot::ALL[rng.gen_range(0..ArmorSlot::ALL.len())];
        self.forge_armor(level, slot, rarity, rng)
    }

    pub fn forge_armor(
        &mut self,
        level: u32,
        slot: ArmorSlot,
        rarity: ItemRarity,
        rng: &mut impl Rng,
    ) -> Armor {
        let name = names::armor_name(slot, rarity, rng);
        let stats = armor_stats(level, self.rarity.multiplier(rarity));
        let mut armor = Armor::new(ItemBase::new(ItemId::random(rng), name, rarity, level, stats), slot);
        let visual = self.visuals.generate(&VisualRequest::armor(slot, rarity));
        armor.set_visual(visual);

        log::debug!(
            "Generated armor '{}' ({} {}, level {}, {:.1} armor)",
            armor.base().name(), rarity, slot.name(), level, stats.armor
        );
        armor
    }

    /// Generate a collectible. Collectibles are always Rare and carry no stats.
    pub fn generate_collectible(&mut self, rng: &mut impl Rng) -> Collectible {
        let rarity = ItemRarity::Rare;
        let name = names::collectible_name(rng);
        let (min_id, max_id) = self.config.collectible_ids;
        let collectible_id = if max_id > min_id { rng.gen_range(min_id..max_id) } else { min_id };

        let mut collectible = Collectible::new(
            ItemBase::new(ItemId::random(rng), name, rarity, 1, StatBlock::ZERO),
            names::COLLECTIBLE_DESCRIPTION,
            collectible_id,
        );
        let visual = self.visuals.generate(&VisualRequest::collectible(rarity));
        collectible.set_visual(visual);

        log::debug!("Generated collectible '{}' (#{})", name, collectible_id);
        collectible
    }

    /// Generate an even-odds weapon or armor drop
    pub fn generate_loot(&mut self, level: i32, rng: &mut impl Rng) -> Item {
        if rng.gen_bool(0.5) {
            self.generate_weapon(level, rng).into()
        } else {
            self.generate_armor(level, rng).into()
        }
    }

    /// Roll whether a defeated enemy drops something, and what
    pub fn roll_enemy_loot(&mut self, enemy_level: i32, rng: &mut impl Rng) -> Option<Item> {
        let chance = self.config.loot_drop_chance;
        // A NaN chance drops nothing
        let chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
        if rng.gen_bool(chance) {
            Some(self.generate_loot(enemy_level, rng))
        } else {
            None
        }
    }
}
