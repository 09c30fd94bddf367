//! Combat math

pub mod damage;

pub use damage::{mitigation, effective_damage_taken, roll_attack, AttackRoll, MAX_MITIGATION, CRIT_MULTIPLIER};
