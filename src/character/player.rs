//! Player character
//!
//! Ties one character's inventory, equipment, progression, and stat sheet
//! together so equipment and level changes keep health and mana consistent.

use rand::Rng;
use thiserror::Error;

use super::sheet::{CharacterStatSheet, StatGrowth};
use crate::combat::{self, AttackRoll};
use crate::data::EngineConfig;
use crate::items::{
    ArmorSlot, EquipmentSet, GroundLoot, Inventory, InventoryError, InventoryEvent, Item, ItemBase,
    ItemGenerator, ItemId, ItemRarity, LootReceiver, PickupError, StatBlock, VisualGenerator, WeaponKind,
    WorldLoot, WorldPosition,
};
use crate::progression::{ProgressionConfig, ProgressionTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EquipError {
    #[error("item {0} is not in the inventory")]
    NotInInventory(ItemId),
    #[error("item {0} cannot be equipped")]
    NotEquippable(ItemId),
    #[error("no room in the inventory for item {0}")]
    InventoryFull(ItemId),
}

/// What a hit did to the character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub incoming: f32,
    pub taken: f32,
    pub remaining_health: f32,
    pub died: bool,
}

#[derive(Debug)]
pub struct Character {
    pub name: String,
    inventory: Inventory,
    equipment: EquipmentSet,
    progression: ProgressionTracker,
    sheet: CharacterStatSheet,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        inventory_capacity: usize,
        progression: &ProgressionConfig,
        growth: StatGrowth,
    ) -> Self {
        Self {
            name: name.into(),
            inventory: Inventory::with_capacity(inventory_capacity),
            equipment: EquipmentSet::new(),
            progression: ProgressionTracker::new(progression),
            sheet: CharacterStatSheet::new(growth),
        }
    }

    pub fn from_config(name: impl Into<String>, config: &EngineConfig) -> Self {
        Self::new(name, config.inventory_capacity, &config.progression, config.growth)
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Put an item in the bag. An item already worn counts as held, so it
    /// is turned away like any other duplicate.
    pub fn add_to_inventory(&mut self, item: Item) -> Result<(), InventoryError> {
        if self.equipment.is_equipped(item.id()) {
            debug_assert!(false, "item {} is already equipped", item.id());
            return Err(InventoryError::DuplicateItem { item: Box::new(item) });
        }
        self.inventory.add(item)
    }

    /// Listen for inventory changes
    pub fn subscribe_inventory(&mut self, listener: impl FnMut(&InventoryEvent) + 'static) {
        self.inventory.subscribe(listener);
    }

    /// Drop an inventory item into the world
    pub fn drop_item(&mut self, id: ItemId, world: &mut impl WorldLoot, position: WorldPosition) -> bool {
        self.inventory.drop_into(id, world, position)
    }

    /// Pick an item up off the ground into the inventory
    pub fn pick_up(&mut self, ground: &mut GroundLoot, id: ItemId) -> Result<(), PickupError> {
        ground.pick_up(id, self)
    }

    pub fn equipment(&self) -> &EquipmentSet {
        &self.equipment
    }

    pub fn progression(&self) -> &ProgressionTracker {
        &self.progression
    }

    /// Tracker access for subscribing listeners
    pub fn progression_mut(&mut self) -> &mut ProgressionTracker {
        &mut self.progression
    }

    pub fn sheet(&self) -> &CharacterStatSheet {
        &self.sheet
    }

    pub fn level(&self) -> u32 {
        self.progression.current_level()
    }

    pub fn health(&self) -> f32 {
        self.sheet.health()
    }

    pub fn mana(&self) -> f32 {
        self.sheet.mana()
    }

    pub fn is_alive(&self) -> bool {
        self.sheet.is_alive()
    }

    pub fn max_health(&self) -> f32 {
        self.sheet.max_health(&self.equipment)
    }

    pub fn max_mana(&self) -> f32 {
        self.sheet.max_mana(&self.equipment)
    }

    pub fn total_damage(&self) -> f32 {
        self.sheet.total_damage(&self.equipment)
    }

    pub fn total_armor(&self) -> f32 {
        self.sheet.total_armor(&self.equipment)
    }

    pub fn crit_chance(&self) -> f32 {
        self.sheet.crit_chance(&self.equipment)
    }

    /// Move an item from the inventory onto the character.
    ///
    /// Whatever it displaces goes back into the slot it just freed, so the
    /// item is never in both places and never in neither.
    pub fn equip_from_inventory(&mut self, id: ItemId) -> Result<(), EquipError> {
        let item = self.inventory.get(id).ok_or(EquipError::NotInInventory(id))?;
        if !item.is_equippable() {
            return Err(EquipError::NotEquippable(id));
        }
        let index = self.inventory.position(id).ok_or(EquipError::NotInInventory(id))?;
        let item = self.inventory.remove(id).ok_or(EquipError::NotInInventory(id))?;
        let health_bonus = match &item {
            Item::Armor(armor) => armor.base().stats().health,
            _ => 0.0,
        };

        let displaced = match self.equipment.equip(item) {
            Ok(displaced) => displaced,
            Err(item) => {
                if let Err(err) = self.inventory.insert(index, item) {
                    log::error!("Lost item while undoing equip: {}", err);
                }
                return Err(EquipError::NotEquippable(id));
            }
        };

        if let Some(old) = displaced {
            log::debug!("Swapped out '{}'", old.name());
            if let Err(err) = self.inventory.insert(index, old) {
                debug_assert!(false, "freed slot was not available: {}", err);
                log::error!("Displaced item did not fit back: {}", err);
            }
        }

        let max_health = self.max_health();
        let raised = (self.sheet.health() + health_bonus).min(max_health);
        self.sheet.heal(raised - self.sheet.health(), &self.equipment);
        self.sheet.clamp_to_max(&self.equipment);
        Ok(())
    }

    /// Put the weapon back in the inventory. Returns its id, or `None` when
    /// nothing was held. A full inventory leaves the weapon equipped.
    pub fn unequip_weapon(&mut self) -> Result<Option<ItemId>, EquipError> {
        let Some(weapon) = self.equipment.unequip_weapon() else {
            return Ok(None);
        };
        let id = weapon.base().id();
        if let Err(err) = self.inventory.add(Item::Weapon(weapon)) {
            if let Item::Weapon(weapon) = err.into_item() {
                self.equipment.equip_weapon(weapon);
            }
            return Err(EquipError::InventoryFull(id));
        }
        self.sheet.clamp_to_max(&self.equipment);
        Ok(Some(id))
    }

    /// Put the armor in `slot` back in the inventory
    pub fn unequip_armor(&mut self, slot: ArmorSlot) -> Result<Option<ItemId>, EquipError> {
        let Some(armor) = self.equipment.unequip_armor(slot) else {
            return Ok(None);
        };
        let id = armor.base().id();
        if let Err(err) = self.inventory.add(Item::Armor(armor)) {
            if let Item::Armor(armor) = err.into_item() {
                self.equipment.equip_armor(armor);
            }
            return Err(EquipError::InventoryFull(id));
        }
        self.sheet.clamp_to_max(&self.equipment);
        Ok(Some(id))
    }

    /// Whether `item` beats what is currently worn in its slot
    pub fn is_upgrade(&self, item: &Item) -> bool {
        match item {
            Item::Weapon(weapon) => {
                self.equipment
                    .weapon()
                    .map_or(true, |held| weapon.base().stats().damage > held.base().stats().damage)
            }
            Item::Armor(armor) => {
                self.equipment
                    .armor(armor.slot())
                    .map_or(true, |held| armor.base().stats().armor > held.base().stats().armor)
            }
            _ => false,
        }
    }

    /// Grant experience. Each level crossed grows the base stats and heals to full.
    pub fn gain_experience(&mut self, amount: u32) -> Vec<u32> {
        let reached = self.progression.gain_experience(amount);
        for &level in &reached {
            self.sheet.on_level_up(level, &self.equipment);
        }
        reached
    }

    /// Apply an incoming hit after armor mitigation
    pub fn take_damage(&mut self, incoming: f32) -> DamageOutcome {
        let taken = combat::effective_damage_taken(incoming, self.total_armor());
        let remaining_health = self.sheet.lose_health(taken);
        DamageOutcome {
            incoming,
            taken,
            remaining_health,
            died: remaining_health <= 0.0,
        }
    }

    /// Heal, capped at max health. Returns the amount restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        self.sheet.heal(amount, &self.equipment)
    }

    /// Roll an attack using current totals
    pub fn attack(&self, rng: &mut impl Rng) -> AttackRoll {
        combat::roll_attack(self.total_damage(), self.crit_chance(), rng)
    }

    /// Drink a consumable: its health and mana bonuses are restored.
    /// Returns the item, or `None` if `id` is not a consumable in the inventory.
    pub fn use_consumable(&mut self, id: ItemId) -> Option<Item> {
        let item = self.inventory.consume(id)?;
        let stats = *item.stats();
        self.sheet.heal(stats.health, &self.equipment);
        self.sheet.restore_mana(stats.mana, &self.equipment);
        log::debug!("Used '{}'", item.name());
        Some(item)
    }
}

impl LootReceiver for Character {
    fn receive(&mut self, item: Item) -> Result<(), InventoryError> {
        self.add_to_inventory(item)
    }
}

pub fn health_potion(rng: &mut impl Rng) -> Item {
    Item::Consumable(ItemBase::new(
        ItemId::random(rng),
        "Health Potion",
        ItemRarity::Common,
        1,
        StatBlock { health: 50.0, ..StatBlock::ZERO },
    ))
}

pub fn mana_potion(rng: &mut impl Rng) -> Item {
    Item::Consumable(ItemBase::new(
        ItemId::random(rng),
        "Mana Potion",
        ItemRarity::Common,
        1,
        StatBlock { mana: 40.0, ..StatBlock::ZERO },
    ))
}

/// Create a level 1 character with starting items: two health potions,
/// a mana potion, and a common dagger in hand.
pub fn spawn_player<V: VisualGenerator>(
    name: impl Into<String>,
    config: &EngineConfig,
    generator: &mut ItemGenerator<V>,
    rng: &mut impl Rng,
) -> Character {
    let mut player = Character::from_config(name, config);

    let starters = [health_potion(rng), health_potion(rng), mana_potion(rng)];
    for item in starters {
        if let Err(err) = player.inventory.add(item) {
            log::warn!("Starting item skipped: {}", err);
        }
    }

    let dagger = generator.forge_weapon(1, WeaponKind::Dagger, ItemRarity::Common, rng);
    player.equipment.equip_weapon(dagger);

    log::info!("Spawned '{}' at level {}", player.name, player.level());
    player
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Armor, ItemKind, NoVisuals, RarityTable, GenerationConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator() -> ItemGenerator<NoVisuals> {
        ItemGenerator::new(RarityTable::default(), GenerationConfig { level_jitter: 0, ..GenerationConfig::default() })
    }

    fn character() -> Character {
        Character::from_config("Tester", &EngineConfig::default())
    }

    fn armor_item(gen: &mut ItemGenerator, slot: ArmorSlot, rng: &mut StdRng) -> Armor {
        gen.forge_armor(1, slot, ItemRarity::Common, rng)
    }

    #[test]
    fn test_equip_from_inventory_moves_item() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut gen = generator();
        let mut hero = character();
        let sword: Item = gen.forge_weapon(1, WeaponKind::Sword, ItemRarity::Common, &mut rng).into();
        let id = sword.id();
        hero.add_to_inventory(sword).unwrap();

        hero.equip_from_inventory(id).unwrap();
        assert!(!hero.inventory().contains(id));
        assert!(hero.equipment().is_equipped(id));
        assert_eq!(hero.total_damage(), 25.0);

        assert_eq!(hero.equip_from_inventory(id), Err(EquipError::NotInInventory(id)));
    }

    #[test]
    fn test_swap_returns_displaced_to_inventory() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut gen = generator();
        let mut hero = Character::new("Tester", 1, &ProgressionConfig::default(), StatGrowth::default());

        let first: Item = gen.forge_weapon(1, WeaponKind::Axe, ItemRarity::Common, &mut rng).into();
        let first_id = first.id();
        hero.add_to_inventory(first).unwrap();
        hero.equip_from_inventory(first_id).unwrap();

        let second: Item = gen.forge_weapon(2, WeaponKind::Mace, ItemRarity::Rare, &mut rng).into();
        let second_id = second.id();
        hero.add_to_inventory(second).unwrap();
        assert!(hero.inventory().is_full());

        hero.equip_from_inventory(second_id).unwrap();
        assert!(hero.equipment().is_equipped(second_id));
        assert!(hero.inventory().contains(first_id));
        assert_eq!(hero.inventory().count(), 1);
    }

    #[test]
    fn test_swap_keeps_inventory_order() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut gen = generator();
        let mut hero = character();

        let worn: Item = gen.forge_weapon(1, WeaponKind::Axe, ItemRarity::Common, &mut rng).into();
        let worn_id = worn.id();
        hero.add_to_inventory(worn).unwrap();
        hero.equip_from_inventory(worn_id).unwrap();

        let potion = health_potion(&mut rng);
        let staff: Item = gen.forge_weapon(2, WeaponKind::Staff, ItemRarity::Rare, &mut rng).into();
        let mana = mana_potion(&mut rng);
        let ids = [potion.id(), staff.id(), mana.id()];
        for item in [potion, staff, mana] {
            hero.add_to_inventory(item).unwrap();
        }

        hero.equip_from_inventory(ids[1]).unwrap();
        let order: Vec<ItemId> = hero.inventory().items().iter().map(Item::id).collect();
        assert_eq!(order, vec![ids[0], worn_id, ids[2]]);
        assert_eq!(hero.inventory().position(worn_id), Some(1));
    }

    #[test]
    fn test_equipped_item_cannot_enter_inventory() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut gen = generator();
        let mut hero = character();
        let sword: Item = gen.forge_weapon(1, WeaponKind::Sword, ItemRarity::Common, &mut rng).into();
        let id = sword.id();
        let copy = sword.clone();
        hero.add_to_inventory(sword).unwrap();
        hero.equip_from_inventory(id).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| hero.add_to_inventory(copy)));
        match result {
            Ok(outcome) => assert!(matches!(outcome, Err(InventoryError::DuplicateItem { .. }))),
            Err(_) => assert!(cfg!(debug_assertions)),
        }
        assert!(!hero.inventory().contains(id));
        assert!(hero.equipment().is_equipped(id));
    }

    #[test]
    fn test_drop_and_pick_up_through_character() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut hero = character();
        let mut ground = GroundLoot::new();
        let potion = health_potion(&mut rng);
        let id = potion.id();
        hero.add_to_inventory(potion).unwrap();

        let added = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = std::rc::Rc::clone(&added);
        hero.subscribe_inventory(move |e| {
            if matches!(e, InventoryEvent::Added { .. }) {
                counter.set(counter.get() + 1);
            }
        });

        assert!(hero.drop_item(id, &mut ground, WorldPosition::new(2.0, 0.0, 1.0)));
        assert!(!hero.inventory().contains(id));
        assert_eq!(ground.len(), 1);

        hero.pick_up(&mut ground, id).unwrap();
        assert!(hero.inventory().contains(id));
        assert!(ground.is_empty());
        assert_eq!(added.get(), 1);
        assert_eq!(hero.pick_up(&mut ground, id), Err(PickupError::NotFound));
    }

    #[test]
    fn test_non_equippable_stays_put() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut hero = character();
        let potion = health_potion(&mut rng);
        let id = potion.id();
        hero.add_to_inventory(potion).unwrap();
        assert_eq!(hero.equip_from_inventory(id), Err(EquipError::NotEquippable(id)));
        assert!(hero.inventory().contains(id));
    }

    #[test]
    fn test_armor_equip_raises_health_and_unequip_clamps() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut gen = generator();
        let mut hero = character();
        let chest = armor_item(&mut gen, ArmorSlot::Chestplate, &mut rng);
        let bonus = chest.base().stats().health;
        let id = chest.base().id();
        hero.add_to_inventory(chest.into()).unwrap();

        hero.equip_from_inventory(id).unwrap();
        assert_eq!(hero.max_health(), 100.0 + bonus);
        assert_eq!(hero.health(), 100.0 + bonus);

        assert_eq!(hero.unequip_armor(ArmorSlot::Chestplate), Ok(Some(id)));
        assert_eq!(hero.health(), 100.0);
        assert!(hero.inventory().contains(id));
        assert_eq!(hero.unequip_armor(ArmorSlot::Chestplate), Ok(None));
    }

    #[test]
    fn test_unequip_into_full_inventory_keeps_item_equipped() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut gen = generator();
        let mut hero = Character::new("Tester", 1, &ProgressionConfig::default(), StatGrowth::default());
        let bow: Item = gen.forge_weapon(1, WeaponKind::Bow, ItemRarity::Common, &mut rng).into();
        let bow_id = bow.id();
        hero.add_to_inventory(bow).unwrap();
        hero.equip_from_inventory(bow_id).unwrap();
        hero.add_to_inventory(health_potion(&mut rng)).unwrap();

        assert_eq!(hero.unequip_weapon(), Err(EquipError::InventoryFull(bow_id)));
        assert!(hero.equipment().is_equipped(bow_id));
    }

    #[test]
    fn test_gain_experience_heals_each_level() {
        let mut hero = character();
        hero.take_damage(80.0);
        assert!(hero.health() < 100.0);

        assert_eq!(hero.gain_experience(810), vec![2, 3]);
        assert_eq!(hero.level(), 3);
        assert_eq!(hero.sheet().level(), 3);
        assert_eq!(hero.max_health(), 120.0);
        assert_eq!(hero.health(), 120.0);
    }

    #[test]
    fn test_take_damage_mitigated() {
        let mut hero = character();
        // Base armor 5 absorbs 5%
        let hit = hero.take_damage(40.0);
        assert!((hit.taken - 38.0).abs() < 1e-4);
        assert!(!hit.died);
        let fatal = hero.take_damage(10_000.0);
        assert!(fatal.died);
        assert_eq!(fatal.remaining_health, 0.0);
        assert!(!hero.is_alive());
    }

    #[test]
    fn test_use_consumable_heals() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut hero = character();
        let potion = health_potion(&mut rng);
        let id = potion.id();
        hero.add_to_inventory(potion).unwrap();
        hero.take_damage(100.0);
        let before = hero.health();
        assert!(hero.use_consumable(id).is_some());
        assert_eq!(hero.health(), before + 50.0);
        assert!(hero.use_consumable(id).is_none());
    }

    #[test]
    fn test_spawn_player_starting_gear() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut gen = generator();
        let hero = spawn_player("Hero", &EngineConfig::default(), &mut gen, &mut rng);
        assert_eq!(hero.inventory().items_of_kind(ItemKind::Consumable).count(), 3);
        let dagger = hero.equipment().weapon().unwrap();
        assert_eq!(dagger.kind(), WeaponKind::Dagger);
        assert_eq!(hero.total_damage(), 25.0);
    }

    #[test]
    fn test_is_upgrade() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut gen = generator();
        let hero = spawn_player("Hero", &EngineConfig::default(), &mut gen, &mut rng);
        let better: Item = gen.forge_weapon(5, WeaponKind::Sword, ItemRarity::Epic, &mut rng).into();
        let worse: Item = gen.forge_weapon(1, WeaponKind::Sword, ItemRarity::Common, &mut rng).into();
        assert!(hero.is_upgrade(&better));
        assert!(!hero.is_upgrade(&worse));
        assert!(hero.is_upgrade(&armor_item(&mut gen, ArmorSlot::Boots, &mut rng).into()));
        assert!(!hero.is_upgrade(&health_potion(&mut rng)));
    }
}
