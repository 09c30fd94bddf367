//! Character state: stat sheet and the player aggregate

pub mod sheet;
pub mod player;

pub use sheet::{BaseStats, CharacterStatSheet, StatGrowth};
pub use player::{Character, DamageOutcome, EquipError, spawn_player, health_potion, mana_potion};
