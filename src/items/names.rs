//! Cosmetic word lists for generated item names

use rand::seq::SliceRandom;
use rand::Rng;

use super::item::{ArmorSlot, ItemRarity, WeaponKind};

pub const PREFIXES: &[&str] = &[
    "Ancient", "Blessed", "Cursed", "Dark", "Divine",
    "Elder", "Fallen", "Grim", "Holy", "Infernal",
];

pub const SUFFIXES: &[&str] = &[
    "of Power", "of Doom", "of Light", "of Shadows",
    "of the Bear", "of the Phoenix", "of Valor", "of Wisdom",
];

pub const COLLECTIBLE_NAMES: &[&str] = &[
    "Ancient Coin", "Mysterious Rune", "Crystal Shard",
    "Ancient Scroll", "Rare Gem", "Lost Artifact",
];

pub const COLLECTIBLE_DESCRIPTION: &str = "A rare collectible item";

/// Base nouns for a weapon kind
pub fn weapon_nouns(kind: WeaponKind) -> &'static [&'static str] {
    match kind {
        WeaponKind::Sword => &["Blade", "Sword", "Saber", "Longsword", "Claymore"],
        WeaponKind::Axe => &["Axe", "Hatchet", "Cleaver", "Waraxe", "Battleaxe"],
        WeaponKind::Mace => &["Mace", "Hammer", "Cudgel", "Maul", "Warhammer"],
        WeaponKind::Dagger => &["Dagger", "Knife", "Shiv", "Dirk", "Stiletto"],
        WeaponKind::Staff => &["Staff", "Rod", "Wand", "Stave", "Scepter"],
        WeaponKind::Bow => &["Bow", "Longbow", "Shortbow", "Recurve", "Warbow"],
    }
}

/// Base noun for an armor slot
pub fn armor_noun(slot: ArmorSlot) -> &'static str {
    match slot {
        ArmorSlot::Helmet => "Helmet",
        ArmorSlot::Chestplate => "Chestplate",
        ArmorSlot::Leggings => "Leggings",
        ArmorSlot::Gloves => "Gauntlets",
        ArmorSlot::Boots => "Boots",
        ArmorSlot::Shield => "Shield",
    }
}

fn pick(words: &[&'static str], rng: &mut impl Rng) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

/// Wrap a base noun with a prefix and suffix when the rarity calls for it.
/// Plain rarities consume no draws.
pub fn decorate(base: &str, rarity: ItemRarity, rng: &mut impl Rng) -> String {
    if rarity.has_bonus_effects() {
        let prefix = pick(PREFIXES, rng);
        let suffix = pick(SUFFIXES, rng);
        format!("{} {} {}", prefix, base, suffix)
    } else {
        base.to_string()
    }
}

pub fn weapon_name(kind: WeaponKind, rarity: ItemRarity, rng: &mut impl Rng) -> String {
    let noun = pick(weapon_nouns(kind), rng);
    decorate(noun, rarity, rng)
}

pub fn armor_name(slot: ArmorSlot, rarity: ItemRarity, rng: &mut impl Rng) -> String {
    decorate(armor_noun(slot), rarity, rng)
}

pub fn collectible_name(rng: &mut impl Rng) -> &'static str {
    pick(COLLECTIBLE_NAMES, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_plain_names_are_bare_nouns() {
        let mut rng = StdRng::seed_from_u64(3);
        for kind in WeaponKind::ALL {
            let name = weapon_name(kind, ItemRarity::Uncommon, &mut rng);
            assert!(weapon_nouns(kind).contains(&name.as_str()), "{name}");
        }
        assert_eq!(armor_name(ArmorSlot::Gloves, ItemRarity::Common, &mut rng), "Gauntlets");
    }

    #[test]
    fn test_rare_names_are_decorated() {
        let mut rng = StdRng::seed_from_u64(4);
        let name = armor_name(ArmorSlot::Shield, ItemRarity::Legendary, &mut rng);
        assert!(PREFIXES.iter().any(|p| name.starts_with(p)), "{name}");
        assert!(SUFFIXES.iter().any(|s| name.ends_with(s)), "{name}");
        assert!(name.contains("Shield"));
    }
}
