//! Relicforge - Entry Point
//!
//! Headless demo: spawns a character, simulates a run of kills with loot
//! drops and auto-equipped upgrades, then prints a summary.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use relicforge::character::{spawn_player, Character};
use relicforge::data;
use relicforge::items::{GroundLoot, ItemGenerator, ItemKind, WorldLoot, WorldPosition};

/// Number of enemies in one run
const KILLS: u32 = 40;
/// Experience per kill
const XP_PER_KILL: u32 = 25;

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    kills: u32,
    level: u32,
    experience: u32,
    health: f32,
    max_health: f32,
    total_damage: f32,
    total_armor: f32,
    crit_chance: f32,
    drops: u32,
    upgrades: u32,
    left_on_ground: usize,
    crits: u32,
    weapon: Option<String>,
    armor: Vec<String>,
    inventory: Vec<String>,
}

struct Args {
    seed: u64,
    json: bool,
    export_config: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args { seed: 42, json: false, export_config: None };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--export-config" => {
                args.export_config = Some(iter.next().context("--export-config needs a path")?);
            }
            other => {
                args.seed = other.parse().with_context(|| format!("invalid seed '{}'", other))?;
            }
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .init();

    log::info!("Starting Relicforge v{}", env!("CARGO_PKG_VERSION"));

    let args = parse_args()?;
    if let Some(path) = &args.export_config {
        data::export_default_config(std::path::Path::new(path))?;
        log::info!("Wrote default config to {}", path);
        return Ok(());
    }

    let config = data::discover();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut generator = ItemGenerator::new(config.rarity.clone(), config.generation.clone());
    let mut player = spawn_player("Hero", &config, &mut generator, &mut rng);
    player.progression_mut().subscribe(|event| log::debug!("{:?}", event));

    let summary = run(&mut player, &mut generator, &mut rng, args.seed);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn run(player: &mut Character, generator: &mut ItemGenerator, rng: &mut StdRng, seed: u64) -> RunSummary {
    let mut ground = GroundLoot::new();
    let mut summary = RunSummary { seed, ..RunSummary::default() };

    for kill in 1..=KILLS {
        let enemy_level = player.level() as i32;

        // The enemy lands one hit before it goes down
        let hit = player.take_damage(8.0 + 2.0 * enemy_level as f32);
        if hit.died {
            log::info!("{} fell to enemy {}", player.name, kill);
            break;
        }
        if player.health() < player.max_health() * 0.3 {
            let potion = player
                .inventory()
                .items_of_kind(ItemKind::Consumable)
                .next()
                .map(|item| item.id());
            if let Some(id) = potion {
                player.use_consumable(id);
            }
        }

        if player.attack(rng).is_crit {
            summary.crits += 1;
        }
        summary.kills = kill;
        player.gain_experience(XP_PER_KILL);

        let Some(drop) = generator.roll_enemy_loot(enemy_level, rng) else {
            continue;
        };
        summary.drops += 1;
        let id = drop.id();
        let upgrade = player.is_upgrade(&drop);
        if let Err(err) = player.add_to_inventory(drop) {
            log::debug!("{}", err);
            let spot = WorldPosition::new(kill as f32, 0.0, 0.0);
            ground.accept(err.into_item(), spot);
            continue;
        }
        if upgrade && player.equip_from_inventory(id).is_ok() {
            summary.upgrades += 1;
        }
    }

    summary.level = player.level();
    summary.experience = player.progression().current_exp();
    summary.health = player.health();
    summary.max_health = player.max_health();
    summary.total_damage = player.total_damage();
    summary.total_armor = player.total_armor();
    summary.crit_chance = player.crit_chance();
    summary.left_on_ground = ground.len();
    summary.weapon = player.equipment().weapon().map(|w| w.base().name().to_string());
    summary.armor = player.equipment().armor_pieces().map(|a| a.base().name().to_string()).collect();
    summary.inventory = player.inventory().items().iter().map(|i| format!("{} [{}]", i.name(), i.rarity())).collect();
    summary
}

fn print_summary(summary: &RunSummary) {
    println!("Relicforge run (seed {})", summary.seed);
    println!("  Kills:        {}", summary.kills);
    println!("  Level:        {} ({} xp banked)", summary.level, summary.experience);
    println!("  Health:       {:.1} / {:.1}", summary.health, summary.max_health);
    println!("  Damage:       {:.1}", summary.total_damage);
    println!("  Armor:        {:.1}", summary.total_armor);
    println!("  Crit chance:  {:.1}%", summary.crit_chance);
    println!("  Crits landed: {}", summary.crits);
    println!("  Drops:        {} ({} equipped, {} left on the ground)", summary.drops, summary.upgrades, summary.left_on_ground);
    println!("  Weapon:       {}", summary.weapon.as_deref().unwrap_or("none"));
    for piece in &summary.armor {
        println!("  Armor piece:  {}", piece);
    }
    println!("  Inventory:    {} items", summary.inventory.len());
    for item in &summary.inventory {
        println!("    - {}", item);
    }
}
