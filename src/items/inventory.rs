//! Inventory system
//!
//! Bounded, insertion-ordered item storage for one character.

use std::fmt;

use thiserror::Error;

use super::item::{Item, ItemId, ItemKind};
use super::world::{WorldLoot, WorldPosition};

pub const DEFAULT_CAPACITY: usize = 30;

/// Raised after every add or remove that actually changed the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryEvent {
    Added { id: ItemId },
    Removed { id: ItemId },
}

pub type InventoryListener = Box<dyn FnMut(&InventoryEvent)>;

/// Why an item was turned away. The rejected item rides along so the caller
/// can drop it into the world or discard it.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("inventory is full ({capacity} slots)")]
    CapacityExceeded { item: Box<Item>, capacity: usize },
    #[error("item {} is already in the inventory", .item.id())]
    DuplicateItem { item: Box<Item> },
}

impl InventoryError {
    /// Take back the rejected item
    pub fn into_item(self) -> Item {
        match self {
            InventoryError::CapacityExceeded { item, .. } | InventoryError::DuplicateItem { item } => *item,
        }
    }

    pub fn item(&self) -> &Item {
        match self {
            InventoryError::CapacityExceeded { item, .. } | InventoryError::DuplicateItem { item } => item,
        }
    }
}

pub struct Inventory {
    items: Vec<Item>,
    capacity: usize,
    listeners: Vec<InventoryListener>,
}

impl Inventory {
    /// Create an inventory with the default 30 slots
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            listeners: Vec::new(),
        }
    }

    /// Register a change listener. Listeners run inline, in registration order.
    pub fn subscribe(&mut self, listener: impl FnMut(&InventoryEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, event: InventoryEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Get current number of items
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|i| i.id() == id)
    }

    /// Append an item to the end.
    /// A full inventory is a hard stop; nothing is evicted.
    pub fn add(&mut self, item: Item) -> Result<(), InventoryError> {
        let end = self.items.len();
        self.insert(end, item)
    }

    /// Place an item at `index`, shifting later items back.
    /// Indices past the end append.
    pub fn insert(&mut self, index: usize, item: Item) -> Result<(), InventoryError> {
        if self.is_full() {
            log::debug!("Inventory full, rejected '{}'", item.name());
            return Err(InventoryError::CapacityExceeded { item: Box::new(item), capacity: self.capacity });
        }
        if self.contains(item.id()) {
            debug_assert!(false, "item {} stored twice", item.id());
            return Err(InventoryError::DuplicateItem { item: Box::new(item) });
        }

        let id = item.id();
        self.items.insert(index.min(self.items.len()), item);
        self.notify(InventoryEvent::Added { id });
        Ok(())
    }

    /// Remove an item by ID. Absent IDs are a no-op.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let index = self.position(id)?;
        let item = self.items.remove(index);
        self.notify(InventoryEvent::Removed { id });
        Some(item)
    }

    /// Where an item sits in insertion order
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id() == id)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Get item by position in insertion order
    pub fn get_at(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Read-only view of every item, oldest first
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Get items of a specific kind
    pub fn items_of_kind(&self, kind: ItemKind) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |i| i.kind() == kind)
    }

    /// Take a consumable out for use. Other kinds stay put.
    pub fn consume(&mut self, id: ItemId) -> Option<Item> {
        if self.get(id)?.is_consumable() {
            self.remove(id)
        } else {
            None
        }
    }

    /// Hand an item over to the world at `position`
    pub fn drop_into(&mut self, id: ItemId, world: &mut impl WorldLoot, position: WorldPosition) -> bool {
        match self.remove(id) {
            Some(item) => {
                log::debug!("Dropped '{}' at {:?}", item.name(), position);
                world.accept(item, position);
                true
            }
            None => false,
        }
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inventory")
            .field("items", &self.items)
            .field("capacity", &self.capacity)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
