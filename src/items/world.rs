//! World loot
//!
//! Items dropped out of an inventory belong to the world until picked up.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::inventory::{Inventory, InventoryError};
use super::item::{Item, ItemId};

/// Position in the game world
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &WorldPosition) -> f32 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PickupError {
    #[error("no such item on the ground")]
    NotFound,
    #[error("inventory is full")]
    InventoryFull,
    #[error("item is already in the inventory")]
    AlreadyHeld,
}

/// Anything that can take ownership of a dropped item
pub trait WorldLoot {
    fn accept(&mut self, item: Item, position: WorldPosition);
}

/// Anything that can take an item off the ground
pub trait LootReceiver {
    fn receive(&mut self, item: Item) -> Result<(), InventoryError>;
}

impl LootReceiver for Inventory {
    fn receive(&mut self, item: Item) -> Result<(), InventoryError> {
        self.add(item)
    }
}

/// An item lying on the ground
#[derive(Debug, Clone, PartialEq)]
pub struct GroundItem {
    pub item: Item,
    pub position: WorldPosition,
}

/// Simple ordered pile of ground items
#[derive(Debug, Clone, Default)]
pub struct GroundLoot {
    items: Vec<GroundItem>,
}

impl GroundLoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[GroundItem] {
        &self.items
    }

    /// Items within `radius` of `position`
    pub fn nearby(&self, position: WorldPosition, radius: f32) -> impl Iterator<Item = &GroundItem> {
        self.items.iter().filter(move |g| g.position.distance(&position) <= radius)
    }

    /// Try to move a ground item into `receiver`.
    /// On rejection the item goes back on the ground where it was.
    pub fn pick_up(&mut self, id: ItemId, receiver: &mut impl LootReceiver) -> Result<(), PickupError> {
        let index = self
            .items
            .iter()
            .position(|g| g.item.id() == id)
            .ok_or(PickupError::NotFound)?;
        let GroundItem { item, position } = self.items.remove(index);
        receiver.receive(item).map_err(|err| {
            let reason = match &err {
                InventoryError::CapacityExceeded { .. } => PickupError::InventoryFull,
                InventoryError::DuplicateItem { .. } => PickupError::AlreadyHeld,
            };
            self.items.insert(index, GroundItem { item: err.into_item(), position });
            reason
        })
    }
}

impl WorldLoot for GroundLoot {
    fn accept(&mut self, item: Item, position: WorldPosition) {
        self.items.push(GroundItem { item, position });
    }
}
