//! Codex - the built-in catalog, generated from a template table.
//!
//! Each template expands into `count` variants. Variant `i` (0-based within
//! the template) gets global number `g` (1-based across the whole codex),
//! id `{prefix}_{g:03}` and name `{base_name} {g}`.

use super::{Catalog, CatalogEntry, EntryAttributes, Interaction, StatBlock};
use super::{BaseBody, Hair, Outfit, Visuals, Weapon};
use crate::components::EntityKind;

/// The codex is padded with filler scrap up to this many entries
pub const CODEX_MIN_ENTRIES: usize = 500;

struct Template {
    prefix: &'static str,
    base_name: &'static str,
    kind: EntityKind,
    category: &'static str,
    count: usize,
    attributes: fn(usize, usize) -> EntryAttributes,
    interactions: fn(usize) -> Vec<Interaction>,
    hint: &'static str,
}

impl Catalog {
    /// The built-in catalog
    pub fn codex() -> Self {
        Self::new(generate_codex()).unwrap_or_else(|err| {
            log::error!("Built-in codex is invalid, using an empty catalog: {}", err);
            Self::default()
        })
    }
}

/// Expand the template table into catalog entries
pub fn generate_codex() -> Vec<CatalogEntry> {
    let mut out = Vec::with_capacity(CODEX_MIN_ENTRIES);
    let mut global = 1;

    for template in TEMPLATES {
        for i in 0..template.count {
            let g = global;
            global += 1;
            let description = format!("{} variant #{}. {}", template.base_name, g, template.hint);
            let entry = CatalogEntry::new(
                format!("{}_{:03}", template.prefix, g),
                format!("{} {}", template.base_name, g),
                template.kind,
                template.category,
                (template.attributes)(i, g),
            )
            .with_description(description)
            .with_interactions((template.interactions)(i));
            out.push(entry);
        }
    }

    while out.len() < CODEX_MIN_ENTRIES {
        let g = global;
        global += 1;
        out.push(
            CatalogEntry::new(
                format!("mat_fill_{:03}", g),
                format!("Common Scrap {}", g),
                EntityKind::Item,
                "material_fill",
                object(StatBlock::new().with_value("stack_size", 100.0)),
            )
            .with_description("Placeholder scrap material."),
        );
    }

    out
}

const PROFESSIONS: [&str; 6] = ["scavenger", "mechanic", "medic", "hunter", "engineer", "cook"];

fn pick<T: Copy>(options: &[T], n: usize) -> T {
    options[n % options.len()]
}

fn object(stats: StatBlock) -> EntryAttributes {
    EntryAttributes::Object { stats }
}

fn survivor(i: usize, g: usize) -> EntryAttributes {
    let stats = StatBlock::new()
        .with_hp(80 + (i % 5) as u32 * 6)
        .with_value("stamina", (70 + (i % 6) * 5) as f64)
        .with_value("hunger", 100.0)
        .with_value("thirst", 100.0)
        .with_value("speed", 1.6 + (i % 4) as f64 * 0.12)
        .with_value("inventory_cap", (20 + (i % 5) * 5) as f64)
        .with_tag("profession", pick(&PROFESSIONS, i));
    let outfits = [
        Outfit::Jacket,
        Outfit::Hoodie,
        Outfit::Armor,
        Outfit::Scavenger,
        Outfit::Worker,
    ];
    let weapons = [
        Some(Weapon::Knife),
        Some(Weapon::Bat),
        Some(Weapon::Pistol),
        Some(Weapon::Rifle),
        None,
    ];
    let visuals = Visuals::new(pick(&[BaseBody::Male, BaseBody::Female], g))
        .with_hair(pick(&Hair::ALL, g))
        .with_outfit(pick(&outfits, g))
        .with_weapon(pick(&weapons, g));
    EntryAttributes::Actor { stats, visuals }
}

fn raider(i: usize, g: usize) -> EntryAttributes {
    let stats = StatBlock::new()
        .with_hp(70 + (i % 7) as u32 * 6)
        .with_value("damage", (10 + (i % 6) * 3) as f64)
        .with_value("speed", 1.7 + (i % 3) as f64 * 0.18)
        .with_value("aggression", (50 + (i % 50)) as f64)
        .with_value("loot_tier", (1 + (i % 4)) as f64);
    let visuals = Visuals::new(pick(&[BaseBody::Male, BaseBody::Female], g))
        .with_hair(pick(&[Hair::Hair1, Hair::Hair3, Hair::Hair5], g))
        .with_outfit(pick(&[Outfit::Armor, Outfit::Scavenger, Outfit::Jacket], g))
        .with_weapon(Some(pick(
            &[Weapon::Knife, Weapon::Bat, Weapon::Pistol, Weapon::Rifle],
            g,
        )));
    EntryAttributes::Actor { stats, visuals }
}

fn mutant(i: usize, _g: usize) -> EntryAttributes {
    let stats = StatBlock::new()
        .with_hp(40 + (i % 9) as u32 * 9)
        .with_value("damage", (8 + (i % 6) * 4) as f64)
        .with_value("speed", 1.1 + (i % 5) as f64 * 0.22)
        .with_value("mutation_level", (1 + (i % 6)) as f64)
        .with_tag("behavior", pick(&["feral", "pack", "ambush", "volatile", "lurker"], i));
    let visuals = Visuals::new(BaseBody::Mutant).with_outfit(Outfit::MutantSkin);
    EntryAttributes::Actor { stats, visuals }
}

fn vendor(i: usize, g: usize) -> EntryAttributes {
    let stats = StatBlock::new()
        .with_hp(80)
        .with_value("barter_skill", (10 + (i % 8)) as f64)
        .with_value("inventory_size", (10 + (i % 6)) as f64);
    let visuals = Visuals::new(pick(&[BaseBody::Male, BaseBody::Female], g))
        .with_hair(pick(&[Hair::Hair2, Hair::Hair4], g))
        .with_outfit(pick(&[Outfit::Hoodie, Outfit::Worker], g));
    EntryAttributes::Actor { stats, visuals }
}

fn resource(hp: u32, resource: &str, yield_min: usize, yield_max: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_hp(hp)
            .with_tag("resource", resource)
            .with_value("yield_min", yield_min as f64)
            .with_value("yield_max", yield_max as f64),
    )
}

fn tree(i: usize, _g: usize) -> EntryAttributes {
    resource(40 + (i % 4) as u32 * 12, "wood", 2 + i % 3, 6 + i % 5)
}

fn rock(i: usize, _g: usize) -> EntryAttributes {
    resource(60 + (i % 4) as u32 * 14, "stone", 3 + i % 3, 9 + i % 6)
}

fn scrap(i: usize, _g: usize) -> EntryAttributes {
    resource(30 + (i % 5) as u32 * 6, pick(&["metal_scraps", "electronics"], i), 1, 6)
}

fn herb_bush(i: usize, _g: usize) -> EntryAttributes {
    resource(18 + (i % 3) as u32 * 6, "medicinal_herbs", 1, 3)
}

fn car_wreck(i: usize, _g: usize) -> EntryAttributes {
    resource(150 + (i % 4) as u32 * 70, "metal_scraps", 6, 18)
}

fn vehicle_wreck(i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_hp(150 + (i % 4) as u32 * 50)
            .with_value("loot_tier", (2 + i % 3) as f64),
    )
}

fn workbench(i: usize, _g: usize) -> EntryAttributes {
    object(StatBlock::new().with_hp(120).with_value("craft_tier", (2 + i % 2) as f64))
}

fn generator(i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_hp(140)
            .with_value("fuel_capacity", 60.0)
            .with_value("power_output", (20 + (i % 4) * 6) as f64)
            .with_value("noise_radius", 8.0),
    )
}

fn purifier(_i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_hp(100)
            .with_value("process_time", 120.0)
            .with_value("power_consumption", 5.0)
            .with_tag("input", "contaminated_water")
            .with_tag("output", "purified_water"),
    )
}

fn turret(i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_hp(120 + (i % 4) as u32 * 40)
            .with_value("damage", (25 + (i % 4) * 6) as f64)
            .with_value("range", (6 + i % 3) as f64),
    )
}

fn wood(i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_value("stack_size", 50.0)
            .with_value("quality", (1 + i % 3) as f64),
    )
}

fn metal(i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_value("stack_size", 40.0)
            .with_value("corrosion", (i % 4) as f64),
    )
}

fn ration(i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_value("stack_size", 10.0)
            .with_value("nutrition", (10 + (i % 6) * 3) as f64)
            .with_value("spoil_time", (1440 + (i % 4) * 300) as f64),
    )
}

fn medkit(i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_value("stack_size", 5.0)
            .with_value("heal", (20 + (i % 4) * 10) as f64),
    )
}

fn hand_tool(i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_value("durability", (50 + (i % 7) * 8) as f64)
            .with_tag("utility", pick(&["mine", "chop", "repair", "salvage", "dig"], i)),
    )
}

fn melee_weapon(i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_value("durability", (60 + (i % 8) * 10) as f64)
            .with_value("damage", (10 + (i % 8) * 5) as f64)
            .with_value("speed", (1.4 - (i % 6) as f64 * 0.08).clamp(0.5, 1.4)),
    )
}

fn ranged_weapon(i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_value("durability", (40 + (i % 6) * 12) as f64)
            .with_value("damage", (20 + (i % 9) * 6) as f64)
            .with_value("accuracy", (60 + (i % 6) * 5) as f64)
            .with_tag("ammo_type", pick(&["bullet", "shell", "bolt"], i)),
    )
}

fn blueprint(i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_value("craft_time", (30 + (i % 6) * 8) as f64)
            .with_value("unlock_tier", (1 + i % 4) as f64),
    )
}

fn furniture(i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_hp(40 + (i % 6) as u32 * 12)
            .with_value("comfort", (1 + i % 4) as f64),
    )
}

fn module(i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_value("rarity", (1 + i % 5) as f64)
            .with_value("power_use", (1 + i % 4) as f64)
            .with_tag("function", pick(&["sensor", "cpu", "motor", "battery", "chip"], i)),
    )
}

fn trap(i: usize, _g: usize) -> EntryAttributes {
    object(
        StatBlock::new()
            .with_value("trigger_damage", (20 + (i % 6) * 8) as f64)
            .with_value("durability", (20 + (i % 5) * 12) as f64)
            .with_tag("trap_type", pick(&["wire", "pit", "spike", "noise"], i)),
    )
}

// ── Interactions ──

fn actions(names: &[&str]) -> Vec<Interaction> {
    names.iter().map(|&name| Interaction::new(name)).collect()
}

fn no_actions(_i: usize) -> Vec<Interaction> {
    Vec::new()
}

fn survivor_actions(_i: usize) -> Vec<Interaction> {
    actions(&["talk", "trade", "quest"])
}

fn raider_actions(_i: usize) -> Vec<Interaction> {
    actions(&["attack", "raze"])
}

fn mutant_actions(_i: usize) -> Vec<Interaction> {
    actions(&["hunt", "pack_hunt"])
}

fn vendor_actions(_i: usize) -> Vec<Interaction> {
    actions(&["trade", "gossip"])
}

fn turret_actions(_i: usize) -> Vec<Interaction> {
    actions(&["power", "upgrade"])
}

fn gather(action: &str, tool: Option<&str>, seconds: usize) -> Vec<Interaction> {
    let mut interaction = Interaction::new(action).with_time(seconds as u32);
    if let Some(tool) = tool {
        interaction = interaction.with_tool(tool);
    }
    vec![interaction]
}

fn chop(i: usize) -> Vec<Interaction> {
    gather("chop", Some("axe"), 3 + i % 4)
}

fn mine(i: usize) -> Vec<Interaction> {
    gather("mine", Some("pickaxe"), 4 + i % 3)
}

fn salvage_scrap(i: usize) -> Vec<Interaction> {
    gather("salvage", Some("crowbar"), 2 + i % 4)
}

fn forage(i: usize) -> Vec<Interaction> {
    gather("forage", None, 1 + i % 2)
}

fn salvage_car(i: usize) -> Vec<Interaction> {
    gather("salvage", Some("crowbar"), 5 + i % 4)
}

fn salvage_wreck(i: usize) -> Vec<Interaction> {
    gather("salvage", Some("crowbar"), 6 + i % 6)
}

fn workbench_actions(_i: usize) -> Vec<Interaction> {
    vec![Interaction::new("craft").with_param("slot_count", "2")]
}

fn generator_actions(_i: usize) -> Vec<Interaction> {
    vec![
        Interaction::new("refuel").with_param("fuel_type", "gasoline"),
        Interaction::new("toggle"),
    ]
}

fn purifier_actions(_i: usize) -> Vec<Interaction> {
    vec![
        Interaction::new("fill").with_param("item", "contaminated_water"),
        Interaction::new("collect").with_param("item", "purified_water"),
    ]
}

static TEMPLATES: &[Template] = &[
    // Characters
    Template {
        prefix: "char_survivor",
        base_name: "Survivor",
        kind: EntityKind::Character,
        category: "player",
        count: 40,
        attributes: survivor,
        interactions: survivor_actions,
        hint: "bandaged sleeve, ribbon accessory, dusty palette",
    },
    Template {
        prefix: "char_raider",
        base_name: "Raider",
        kind: EntityKind::Character,
        category: "enemy_raider",
        count: 45,
        attributes: raider,
        interactions: raider_actions,
        hint: "dusty leather, patched armor, scratched visor",
    },
    Template {
        prefix: "char_mutant",
        base_name: "Mutant",
        kind: EntityKind::Character,
        category: "creature",
        count: 70,
        attributes: mutant,
        interactions: mutant_actions,
        hint: "crackled skin, luminescent marks, elongated limbs",
    },
    // Environment
    Template {
        prefix: "env_tree",
        base_name: "DeadTree",
        kind: EntityKind::Environment,
        category: "resource_tree",
        count: 36,
        attributes: tree,
        interactions: chop,
        hint: "gnarled branches, flaky bark, moss streaks",
    },
    Template {
        prefix: "env_rock",
        base_name: "Stone",
        kind: EntityKind::Environment,
        category: "resource_rock",
        count: 28,
        attributes: rock,
        interactions: mine,
        hint: "layered strata, mineral veins, lichen patches",
    },
    Template {
        prefix: "env_scrap",
        base_name: "ScrapPile",
        kind: EntityKind::Environment,
        category: "resource_scrap",
        count: 36,
        attributes: scrap,
        interactions: salvage_scrap,
        hint: "rusted plates, coils, tangled wires",
    },
    Template {
        prefix: "env_bush",
        base_name: "HerbBush",
        kind: EntityKind::Environment,
        category: "resource_herb",
        count: 20,
        attributes: herb_bush,
        interactions: forage,
        hint: "soft leaf clusters, tiny sparkles",
    },
    Template {
        prefix: "env_car",
        base_name: "CarWreck",
        kind: EntityKind::Environment,
        category: "vehicle_wreck",
        count: 16,
        attributes: car_wreck,
        interactions: salvage_car,
        hint: "shattered windshield, graffiti, neon residue",
    },
    // Structures
    Template {
        prefix: "struct_workbench",
        base_name: "Workbench",
        kind: EntityKind::Structure,
        category: "crafting",
        count: 10,
        attributes: workbench,
        interactions: workbench_actions,
        hint: "stained wood, tool hooks",
    },
    Template {
        prefix: "struct_generator",
        base_name: "Generator",
        kind: EntityKind::Structure,
        category: "utility_power",
        count: 8,
        attributes: generator,
        interactions: generator_actions,
        hint: "oil stains, vents, glowing coil",
    },
    Template {
        prefix: "struct_purifier",
        base_name: "WaterPurifier",
        kind: EntityKind::Structure,
        category: "utility_water",
        count: 8,
        attributes: purifier,
        interactions: purifier_actions,
        hint: "glass canisters, glowing filters",
    },
    // Materials and consumables
    Template {
        prefix: "mat_wood",
        base_name: "WoodPlank",
        kind: EntityKind::Item,
        category: "material",
        count: 48,
        attributes: wood,
        interactions: no_actions,
        hint: "wood grain, worn nails, soot smudges",
    },
    Template {
        prefix: "mat_metal",
        base_name: "MetalScrap",
        kind: EntityKind::Item,
        category: "material",
        count: 48,
        attributes: metal,
        interactions: no_actions,
        hint: "rust streaks, riveted plates",
    },
    Template {
        prefix: "cons_food",
        base_name: "Ration",
        kind: EntityKind::Item,
        category: "consumable_food",
        count: 36,
        attributes: ration,
        interactions: no_actions,
        hint: "food tin labels, dusty edges",
    },
    Template {
        prefix: "cons_med",
        base_name: "MedKit",
        kind: EntityKind::Item,
        category: "consumable_medical",
        count: 32,
        attributes: medkit,
        interactions: no_actions,
        hint: "clean white box, red cross crest",
    },
    // Tools and weapons
    Template {
        prefix: "tool_hand",
        base_name: "HandTool",
        kind: EntityKind::Item,
        category: "tool",
        count: 56,
        attributes: hand_tool,
        interactions: no_actions,
        hint: "wrapped grips, tape",
    },
    Template {
        prefix: "wpn_melee",
        base_name: "MeleeWeapon",
        kind: EntityKind::Item,
        category: "weapon_melee",
        count: 60,
        attributes: melee_weapon,
        interactions: no_actions,
        hint: "battle-worn edge, taped handle",
    },
    Template {
        prefix: "wpn_ranged",
        base_name: "RangedWeapon",
        kind: EntityKind::Item,
        category: "weapon_ranged",
        count: 44,
        attributes: ranged_weapon,
        interactions: no_actions,
        hint: "rusty barrel, taped stock",
    },
    Template {
        prefix: "bp_basic",
        base_name: "Blueprint",
        kind: EntityKind::Blueprint,
        category: "blueprint",
        count: 40,
        attributes: blueprint,
        interactions: no_actions,
        hint: "schematic lines, stamped workshop seal",
    },
    Template {
        prefix: "furn",
        base_name: "Furniture",
        kind: EntityKind::Item,
        category: "furniture",
        count: 28,
        attributes: furniture,
        interactions: no_actions,
        hint: "patched upholstery, LED strips",
    },
    Template {
        prefix: "mod",
        base_name: "Module",
        kind: EntityKind::Item,
        category: "electronic",
        count: 28,
        attributes: module,
        interactions: no_actions,
        hint: "microtraces, glowing LEDs",
    },
    Template {
        prefix: "veh_wreck",
        base_name: "VehicleWreck",
        kind: EntityKind::Environment,
        category: "vehicle",
        count: 14,
        attributes: vehicle_wreck,
        interactions: salvage_wreck,
        hint: "shattered glass, engine cores",
    },
    Template {
        prefix: "trap",
        base_name: "Trap",
        kind: EntityKind::Item,
        category: "defense",
        count: 22,
        attributes: trap,
        interactions: no_actions,
        hint: "barbs, warning paint",
    },
    // NPCs and defenses
    Template {
        prefix: "npc_vendor",
        base_name: "Vendor",
        kind: EntityKind::Npc,
        category: "npc_vendor",
        count: 22,
        attributes: vendor,
        interactions: vendor_actions,
        hint: "stall banners, patched aprons",
    },
    Template {
        prefix: "turret",
        base_name: "AutoTurret",
        kind: EntityKind::Structure,
        category: "defense_turret",
        count: 10,
        attributes: turret,
        interactions: turret_actions,
        hint: "rivets, rotating head, muzzle glow",
    },
];
