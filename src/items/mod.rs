//! Item system

pub mod item;
pub mod rarity;
pub mod names;
pub mod visual;
pub mod generator;
pub mod inventory;
pub mod equipment;
pub mod world;

pub use item::{Item, ItemId, ItemBase, ItemKind, ItemRarity, WeaponKind, ArmorSlot, StatBlock, Weapon, Armor, Collectible};
pub use rarity::{RarityTable, RarityTier, RarityTableError};
pub use visual::{VisualGenerator, VisualHandle, VisualRequest, VisualRegistry, ItemSubtype};
pub use generator::{ItemGenerator, GenerationConfig, NoVisuals, weapon_stats, armor_stats};
pub use inventory::{Inventory, InventoryError, InventoryEvent, DEFAULT_CAPACITY};
pub use equipment::EquipmentSet;
pub use world::{LootReceiver, WorldLoot, WorldPosition, GroundLoot, GroundItem, PickupError};
