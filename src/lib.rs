//! Relicforge - procedural loot and character progression
//!
//! Generates leveled, rarity-scaled weapons, armor, and collectibles,
//! stores them in bounded inventories, and folds equipped gear and
//! experience levels into a character's combat totals.

pub mod items;
pub mod progression;
pub mod character;
pub mod combat;
pub mod data;

// Re-export commonly used types
pub use items::{Item, ItemId, ItemRarity, ItemGenerator, Inventory, EquipmentSet, RarityTable};
pub use progression::{ProgressionTracker, ProgressionEvent};
pub use character::{Character, CharacterStatSheet, EquipError};
pub use data::{EngineConfig, ConfigError};
