//! Item definitions
//!
//! Core item records, rarities, and the additive stat bundle they carry.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

use super::visual::VisualHandle;

/// Stable, opaque identity assigned once when an item is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Draw a fresh identifier from the caller's RNG so seeded runs stay reproducible
    pub fn random(rng: &mut impl Rng) -> Self {
        Self(Builder::from_random_bytes(rng.gen()).into_uuid())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Item rarity tiers, ordered low to high
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemRarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl ItemRarity {
    pub const ALL: [ItemRarity; 5] = [
        ItemRarity::Common,
        ItemRarity::Uncommon,
        ItemRarity::Rare,
        ItemRarity::Epic,
        ItemRarity::Legendary,
    ];

    /// Position in the tier order (Common = 0 .. Legendary = 4)
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemRarity::Common => "Common",
            ItemRarity::Uncommon => "Uncommon",
            ItemRarity::Rare => "Rare",
            ItemRarity::Epic => "Epic",
            ItemRarity::Legendary => "Legendary",
        }
    }

    /// Get display color RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            ItemRarity::Common => (255, 255, 255),
            ItemRarity::Uncommon => (0, 255, 0),
            ItemRarity::Rare => (0, 0, 255),
            ItemRarity::Epic => (163, 54, 237),
            ItemRarity::Legendary => (255, 128, 0),
        }
    }

    /// Rare and above get decorated names and extra collaborator effects
    pub fn has_bonus_effects(&self) -> bool {
        *self >= ItemRarity::Rare
    }
}

impl fmt::Display for ItemRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Main item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon,
    Armor,
    Consumable,
    Collectible,
    Quest,
}

/// Weapon subtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Sword,
    Axe,
    Mace,
    Dagger,
    Staff,
    Bow,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 6] = [
        WeaponKind::Sword,
        WeaponKind::Axe,
        WeaponKind::Mace,
        WeaponKind::Dagger,
        WeaponKind::Staff,
        WeaponKind::Bow,
    ];

    /// Attack speed multiplier, fixed per kind
    pub fn attack_speed(&self) -> f32 {
        match self {
            WeaponKind::Dagger => 1.5,
            WeaponKind::Sword => 1.2,
            WeaponKind::Axe => 1.0,
            WeaponKind::Mace => 0.9,
            WeaponKind::Staff => 0.8,
            WeaponKind::Bow => 1.0,
        }
    }

    /// Reach used by combat and projectile collaborators
    pub fn range(&self) -> f32 {
        match self {
            WeaponKind::Bow => 15.0,
            _ => 2.5,
        }
    }

    pub fn is_ranged(&self) -> bool {
        matches!(self, WeaponKind::Bow)
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Sword => "Sword",
            WeaponKind::Axe => "Axe",
            WeaponKind::Mace => "Mace",
            WeaponKind::Dagger => "Dagger",
            WeaponKind::Staff => "Staff",
            WeaponKind::Bow => "Bow",
        }
    }
}

/// Armor wear locations; each holds at most one armor item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorSlot {
    Helmet,
    Chestplate,
    Leggings,
    Gloves,
    Boots,
    Shield,
}

impl ArmorSlot {
    pub const ALL: [ArmorSlot; 6] = [
        ArmorSlot::Helmet,
        ArmorSlot::Chestplate,
        ArmorSlot::Leggings,
        ArmorSlot::Gloves,
        ArmorSlot::Boots,
        ArmorSlot::Shield,
    ];

    /// Dense index into per-slot storage
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            ArmorSlot::Helmet => "Helmet",
            ArmorSlot::Chestplate => "Chestplate",
            ArmorSlot::Leggings => "Leggings",
            ArmorSlot::Gloves => "Gloves",
            ArmorSlot::Boots => "Boots",
            ArmorSlot::Shield => "Shield",
        }
    }
}

/// Additive bundle of combat attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub damage: f32,
    pub armor: f32,
    pub health: f32,
    pub mana: f32,
    /// Percentage points
    pub crit_chance: f32,
    /// Multiplier
    pub attack_speed: f32,
}

impl StatBlock {
    pub const ZERO: StatBlock = StatBlock {
        damage: 0.0,
        armor: 0.0,
        health: 0.0,
        mana: 0.0,
        crit_chance: 0.0,
        attack_speed: 0.0,
    };

    /// Copy with every negative (or NaN) field floored at zero
    pub fn clamped(self) -> Self {
        let floor = |v: f32| if v > 0.0 { v } else { 0.0 };
        Self {
            damage: floor(self.damage),
            armor: floor(self.armor),
            health: floor(self.health),
            mana: floor(self.mana),
            crit_chance: floor(self.crit_chance),
            attack_speed: floor(self.attack_speed),
        }
    }

    pub fn is_non_negative(&self) -> bool {
        [self.damage, self.armor, self.health, self.mana, self.crit_chance, self.attack_speed]
            .iter()
            .all(|v| *v >= 0.0)
    }
}

impl Add for StatBlock {
    type Output = StatBlock;

    fn add(self, rhs: StatBlock) -> StatBlock {
        StatBlock {
            damage: self.damage + rhs.damage,
            armor: self.armor + rhs.armor,
            health: self.health + rhs.health,
            mana: self.mana + rhs.mana,
            crit_chance: self.crit_chance + rhs.crit_chance,
            attack_speed: self.attack_speed + rhs.attack_speed,
        }
    }
}

impl AddAssign for StatBlock {
    fn add_assign(&mut self, rhs: StatBlock) {
        *self = *self + rhs;
    }
}

impl Sum for StatBlock {
    fn sum<I: Iterator<Item = StatBlock>>(iter: I) -> StatBlock {
        iter.fold(StatBlock::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a StatBlock> for StatBlock {
    fn sum<I: Iterator<Item = &'a StatBlock>>(iter: I) -> StatBlock {
        iter.copied().sum()
    }
}

/// Fields shared by every item variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBase {
    id: ItemId,
    /// Full generated name
    name: String,
    rarity: ItemRarity,
    level: u32,
    stats: StatBlock,
    /// Renderable owned by the visual collaborator; never inspected here
    visual: Option<VisualHandle>,
}

impl ItemBase {
    /// Build a base record. Level is floored at 1 and stats at zero.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        rarity: ItemRarity,
        level: u32,
        stats: StatBlock,
    ) -> Self {
        debug_assert!(stats.is_non_negative(), "item stats must be non-negative");
        Self {
            id,
            name: name.into(),
            rarity,
            level: level.max(1),
            stats: stats.clamped(),
            visual: None,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rarity(&self) -> ItemRarity {
        self.rarity
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn visual(&self) -> Option<VisualHandle> {
        self.visual
    }

    pub fn set_visual(&mut self, visual: Option<VisualHandle>) {
        self.visual = visual;
    }
}

/// A weapon. Range follows from the kind and is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    base: ItemBase,
    kind: WeaponKind,
    range: f32,
}

impl Weapon {
    pub fn new(base: ItemBase, kind: WeaponKind) -> Self {
        Self { base, kind, range: kind.range() }
    }

    pub fn base(&self) -> &ItemBase {
        &self.base
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn set_visual(&mut self, visual: Option<VisualHandle>) {
        self.base.set_visual(visual);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    base: ItemBase,
    slot: ArmorSlot,
}

impl Armor {
    pub fn new(base: ItemBase, slot: ArmorSlot) -> Self {
        Self { base, slot }
    }

    pub fn base(&self) -> &ItemBase {
        &self.base
    }

    pub fn slot(&self) -> ArmorSlot {
        self.slot
    }

    pub fn set_visual(&mut self, visual: Option<VisualHandle>) {
        self.base.set_visual(visual);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    base: ItemBase,
    description: String,
    /// Dedup key for collection-progress trackers
    collectible_id: u32,
}

impl Collectible {
    pub fn new(base: ItemBase, description: impl Into<String>, collectible_id: u32) -> Self {
        Self { base, description: description.into(), collectible_id }
    }

    pub fn base(&self) -> &ItemBase {
        &self.base
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn collectible_id(&self) -> u32 {
        self.collectible_id
    }

    pub fn set_visual(&mut self, visual: Option<VisualHandle>) {
        self.base.set_visual(visual);
    }
}

/// Any item an inventory can hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Item {
    Weapon(Weapon),
    Armor(Armor),
    Consumable(ItemBase),
    Collectible(Collectible),
    Quest(ItemBase),
}

impl Item {
    pub fn base(&self) -> &ItemBase {
        match self {
            Item::Weapon(w) => &w.base,
            Item::Armor(a) => &a.base,
            Item::Collectible(c) => &c.base,
            Item::Consumable(base) | Item::Quest(base) => base,
        }
    }

    /// The visual handle is the only part of an item that changes after creation
    pub fn set_visual(&mut self, visual: Option<VisualHandle>) {
        match self {
            Item::Weapon(w) => w.set_visual(visual),
            Item::Armor(a) => a.set_visual(visual),
            Item::Collectible(c) => c.set_visual(visual),
            Item::Consumable(base) | Item::Quest(base) => base.set_visual(visual),
        }
    }

    pub fn id(&self) -> ItemId {
        self.base().id()
    }

    pub fn name(&self) -> &str {
        self.base().name()
    }

    pub fn rarity(&self) -> ItemRarity {
        self.base().rarity()
    }

    pub fn level(&self) -> u32 {
        self.base().level()
    }

    pub fn stats(&self) -> &StatBlock {
        self.base().stats()
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Weapon(_) => ItemKind::Weapon,
            Item::Armor(_) => ItemKind::Armor,
            Item::Consumable(_) => ItemKind::Consumable,
            Item::Collectible(_) => ItemKind::Collectible,
            Item::Quest(_) => ItemKind::Quest,
        }
    }

    /// Check if item can go into an equipment slot
    pub fn is_equippable(&self) -> bool {
        matches!(self, Item::Weapon(_) | Item::Armor(_))
    }

    pub fn is_consumable(&self) -> bool {
        matches!(self, Item::Consumable(_))
    }
}

impl From<Weapon> for Item {
    fn from(weapon: Weapon) -> Self {
        Item::Weapon(weapon)
    }
}

impl From<Armor> for Item {
    fn from(armor: Armor) -> Self {
        Item::Armor(armor)
    }
}

impl From<Collectible> for Item {
    fn from(collectible: Collectible) -> Self {
        Item::Collectible(collectible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn base(rng: &mut StdRng, stats: StatBlock) -> ItemBase {
        ItemBase::new(ItemId::random(rng), "Test", ItemRarity::Common, 1, stats)
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(ItemRarity::Legendary > ItemRarity::Epic);
        assert!(ItemRarity::Rare >= ItemRarity::Rare);
        assert!(ItemRarity::Uncommon < ItemRarity::Rare);
        assert_eq!(ItemRarity::Common.ordinal(), 0);
        assert_eq!(ItemRarity::Legendary.ordinal(), 4);
        assert!(!ItemRarity::Uncommon.has_bonus_effects());
        assert!(ItemRarity::Rare.has_bonus_effects());
    }

    #[test]
    fn test_stat_block_sum() {
        let a = StatBlock { damage: 3.0, armor: 5.0, ..StatBlock::default() };
        let b = StatBlock { armor: 8.0, health: 20.0, ..StatBlock::default() };
        let total: StatBlock = [a, b].iter().sum();
        assert_eq!(total.damage, 3.0);
        assert_eq!(total.armor, 13.0);
        assert_eq!(total.health, 20.0);
        assert_eq!(total.mana, 0.0);
    }

    #[test]
    fn test_stat_block_clamped() {
        let s = StatBlock { damage: -4.0, armor: 2.0, ..StatBlock::default() }.clamped();
        assert_eq!(s.damage, 0.0);
        assert_eq!(s.armor, 2.0);
        assert!(s.is_non_negative());
    }

    #[test]
    fn test_ids_are_unique_and_seeded() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = ItemId::random(&mut rng);
        let b = ItemId::random(&mut rng);
        assert_ne!(a, b);

        let mut again = StdRng::seed_from_u64(7);
        assert_eq!(ItemId::random(&mut again), a);
    }

    #[test]
    fn test_item_variant_accessors() {
        let mut rng = StdRng::seed_from_u64(1);
        let weapon = Weapon::new(base(&mut rng, StatBlock { damage: 15.0, ..StatBlock::default() }), WeaponKind::Bow);
        assert_eq!(weapon.range(), 15.0);
        let item: Item = weapon.into();
        assert_eq!(item.kind(), ItemKind::Weapon);
        assert!(item.is_equippable());
        assert_eq!(item.stats().damage, 15.0);

        let potion = Item::Consumable(base(&mut rng, StatBlock::default()));
        assert!(potion.is_consumable());
        assert!(!potion.is_equippable());
    }

    #[test]
    fn test_constructors_fix_derived_fields() {
        let mut rng = StdRng::seed_from_u64(3);
        let dagger = Weapon::new(base(&mut rng, StatBlock::ZERO), WeaponKind::Dagger);
        assert_eq!(dagger.kind(), WeaponKind::Dagger);
        assert_eq!(dagger.range(), WeaponKind::Dagger.range());
        assert_eq!(dagger.base().name(), "Test");
        assert_eq!(dagger.base().rarity(), ItemRarity::Common);

        let boots = Armor::new(base(&mut rng, StatBlock::ZERO), ArmorSlot::Boots);
        assert_eq!(boots.slot(), ArmorSlot::Boots);

        let relic = Collectible::new(base(&mut rng, StatBlock::ZERO), "Old coin", 42);
        assert_eq!(relic.description(), "Old coin");
        assert_eq!(relic.collectible_id(), 42);

        let mut item: Item = dagger.into();
        let id = item.id();
        let handle = VisualHandle::new(3, 1);
        item.set_visual(Some(handle));
        assert_eq!(item.base().visual(), Some(handle));
        assert_eq!(item.id(), id);
    }

    #[test]
    fn test_level_floor() {
        let mut rng = StdRng::seed_from_u64(2);
        let b = ItemBase::new(ItemId::random(&mut rng), "Relic", ItemRarity::Epic, 0, StatBlock::ZERO);
        assert_eq!(b.level(), 1);
    }
}
