//! Damage calculation
//!
//! Pure combat math over character totals: armor mitigation and crit rolls.

use rand::Rng;

/// Armor can never absorb more than this share of a hit
pub const MAX_MITIGATION: f32 = 0.75;

/// Crits deal this multiple of normal damage
pub const CRIT_MULTIPLIER: f32 = 2.0;

/// Share of incoming damage absorbed by armor: `min(armor / 100, 0.75)`
pub fn mitigation(total_armor: f32) -> f32 {
    (total_armor.max(0.0) / 100.0).min(MAX_MITIGATION)
}

/// Damage left after armor
pub fn effective_damage_taken(incoming: f32, total_armor: f32) -> f32 {
    incoming.max(0.0) * (1.0 - mitigation(total_armor))
}

/// Result of an attack roll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRoll {
    pub damage: f32,
    pub is_crit: bool,
}

/// Roll one attack: crit when the draw falls under `crit_chance` percent
pub fn roll_attack(total_damage: f32, crit_chance: f32, rng: &mut impl Rng) -> AttackRoll {
    let is_crit = rng.gen::<f32>() < crit_chance / 100.0;
    let damage = if is_crit { total_damage * CRIT_MULTIPLIER } else { total_damage };
    AttackRoll { damage, is_crit }
}
