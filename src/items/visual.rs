//! Visual collaborator seam
//!
//! The engine asks a [`VisualGenerator`] for a handle when an item is built
//! and stores whatever comes back. It never looks inside the handle.

use serde::{Deserialize, Serialize};

use super::item::{ArmorSlot, ItemKind, ItemRarity, WeaponKind};

/// Opaque reference to a renderable owned outside the engine.
///
/// The generation tells a reused slot apart from the one a handle was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle {
    index: u32,
    generation: u32,
}

impl VisualHandle {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Item subtype forwarded to visual builders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemSubtype {
    Weapon(WeaponKind),
    Armor(ArmorSlot),
}

/// Everything a visual builder is allowed to know about an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualRequest {
    pub kind: ItemKind,
    pub subtype: Option<ItemSubtype>,
    pub rarity: ItemRarity,
}

impl VisualRequest {
    pub fn weapon(kind: WeaponKind, rarity: ItemRarity) -> Self {
        Self { kind: ItemKind::Weapon, subtype: Some(ItemSubtype::Weapon(kind)), rarity }
    }

    pub fn armor(slot: ArmorSlot, rarity: ItemRarity) -> Self {
        Self { kind: ItemKind::Armor, subtype: Some(ItemSubtype::Armor(slot)), rarity }
    }

    pub fn collectible(rarity: ItemRarity) -> Self {
        Self { kind: ItemKind::Collectible, subtype: None, rarity }
    }
}

/// Produces renderables for freshly generated items.
///
/// Returning `None` is always allowed; generation carries on without a visual.
pub trait VisualGenerator {
    fn generate(&mut self, request: &VisualRequest) -> Option<VisualHandle>;
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    request: Option<VisualRequest>,
}

/// Arena-backed generator: each handle indexes a recorded request.
/// Releasing a slot bumps its generation, so old handles stop resolving.
#[derive(Debug, Clone, Default)]
pub struct VisualRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl VisualRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn live_slot(&self, handle: VisualHandle) -> Option<&Slot> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.request.is_some())
    }

    /// Look up the request a handle was built from
    pub fn get(&self, handle: VisualHandle) -> Option<&VisualRequest> {
        self.live_slot(handle).and_then(|slot| slot.request.as_ref())
    }

    pub fn contains(&self, handle: VisualHandle) -> bool {
        self.live_slot(handle).is_some()
    }

    /// Free a handle. Its index is reused by later requests under a new generation.
    pub fn release(&mut self, handle: VisualHandle) -> bool {
        if !self.contains(handle) {
            return false;
        }
        let slot = &mut self.slots[handle.index as usize];
        slot.request = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        true
    }

    /// Number of live handles
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VisualGenerator for VisualRegistry {
    fn generate(&mut self, request: &VisualRequest) -> Option<VisualHandle> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.request = Some(*request);
            return Some(VisualHandle::new(index, slot.generation));
        }
        let index = u32::try_from(self.slots.len()).ok()?;
        self.slots.push(Slot { generation: 0, request: Some(*request) });
        Some(VisualHandle::new(index, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_round_trip() {
        let mut registry = VisualRegistry::new();
        let req = VisualRequest::weapon(WeaponKind::Axe, ItemRarity::Epic);
        let handle = registry.generate(&req).unwrap();
        assert_eq!(registry.get(handle), Some(&req));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_release_reuses_index() {
        let mut registry = VisualRegistry::new();
        let a = registry.generate(&VisualRequest::collectible(ItemRarity::Rare)).unwrap();
        let _b = registry.generate(&VisualRequest::armor(ArmorSlot::Boots, ItemRarity::Common)).unwrap();
        assert!(registry.release(a));
        assert!(!registry.release(a));
        assert!(registry.get(a).is_none());

        let c = registry.generate(&VisualRequest::weapon(WeaponKind::Bow, ItemRarity::Rare)).unwrap();
        assert_eq!(c.index(), a.index());
        assert_ne!(c.generation(), a.generation());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut registry = VisualRegistry::new();
        let stale = registry.generate(&VisualRequest::armor(ArmorSlot::Helmet, ItemRarity::Common)).unwrap();
        registry.release(stale);

        let bow = VisualRequest::weapon(WeaponKind::Bow, ItemRarity::Epic);
        let fresh = registry.generate(&bow).unwrap();
        assert_eq!(registry.get(fresh), Some(&bow));
        assert!(registry.get(stale).is_none());
        assert!(!registry.contains(stale));

        // A stale release must not free the slot now owned by `fresh`
        assert!(!registry.release(stale));
        assert_eq!(registry.get(fresh), Some(&bow));
        assert_eq!(registry.len(), 1);

        let forged = VisualHandle::new(7, 0);
        assert!(registry.get(forged).is_none());
    }
}
