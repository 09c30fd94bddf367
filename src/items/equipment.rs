//! Equipment system
//!
//! Holds the worn weapon and one armor piece per slot, and totals their bonuses.

use serde::{Deserialize, Serialize};

use super::item::{Armor, ArmorSlot, Item, ItemId, StatBlock, Weapon};

/// Currently worn items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSet {
    weapon: Option<Weapon>,
    /// Indexed by `ArmorSlot::index`
    armor: [Option<Armor>; 6],
}

impl EquipmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equip a weapon, returning whatever was held before.
    /// Putting the old weapon somewhere is the caller's job.
    pub fn equip_weapon(&mut self, weapon: Weapon) -> Option<Weapon> {
        log::debug!("Equipped weapon '{}'", weapon.base().name());
        self.weapon.replace(weapon)
    }

    /// Equip armor into its own slot, returning the displaced piece
    pub fn equip_armor(&mut self, armor: Armor) -> Option<Armor> {
        log::debug!("Equipped {} '{}'", armor.slot().name(), armor.base().name());
        let slot = armor.slot().index();
        self.armor[slot].replace(armor)
    }

    /// Equip any weapon or armor item. Other kinds come straight back as `Err`.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, Item> {
        match item {
            Item::Weapon(w) => Ok(self.equip_weapon(w).map(Item::Weapon)),
            Item::Armor(a) => Ok(self.equip_armor(a).map(Item::Armor)),
            other @ (Item::Consumable(_) | Item::Collectible(_) | Item::Quest(_)) => Err(other),
        }
    }

    pub fn unequip_weapon(&mut self) -> Option<Weapon> {
        self.weapon.take()
    }

    pub fn unequip_armor(&mut self, slot: ArmorSlot) -> Option<Armor> {
        self.armor[slot.index()].take()
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    pub fn armor(&self, slot: ArmorSlot) -> Option<&Armor> {
        self.armor[slot.index()].as_ref()
    }

    /// Check if a slot is empty
    pub fn is_empty(&self, slot: ArmorSlot) -> bool {
        self.armor(slot).is_none()
    }

    /// Every equipped armor piece, in slot order
    pub fn armor_pieces(&self) -> impl Iterator<Item = &Armor> {
        self.armor.iter().flatten()
    }

    pub fn is_equipped(&self, id: ItemId) -> bool {
        self.weapon.as_ref().is_some_and(|w| w.base().id() == id)
            || self.armor_pieces().any(|a| a.base().id() == id)
    }

    /// Field-wise sum of the weapon's and all armor slots' bonuses
    pub fn aggregate_bonus(&self) -> StatBlock {
        let weapon = self.weapon.iter().map(|w| *w.base().stats());
        let armor = self.armor_pieces().map(|a| *a.base().stats());
        weapon.chain(armor).sum()
    }

    /// Bonuses from the weapon alone
    pub fn weapon_bonus(&self) -> StatBlock {
        self.weapon.as_ref().map(|w| *w.base().stats()).unwrap_or_default()
    }

    /// Bonuses from armor alone
    pub fn armor_bonus(&self) -> StatBlock {
        self.armor_pieces().map(|a| *a.base().stats()).sum()
    }
}
