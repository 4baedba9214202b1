//! Weighted loot tables keyed by source (scrap piles, raiders...).
//!
//! Built from the catalog when it loads. Lookup only: nothing in the tick
//! rolls these tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::CatalogEntry;
use crate::components::EntityKind;

/// Source name, category tag used to pick its items, and table size
const LOOT_SOURCES: [(&str, &str, usize); 6] = [
    ("scrap_pile", "material", 8),
    ("car_wreck", "vehicle", 10),
    ("raider_drop", "weapon", 8),
    ("mutant_trophies", "creature", 6),
    ("workbench_loot", "tool", 10),
    ("vendor_stock", "consumable", 12),
];

/// Raiders also carry a ration
const RAIDER_RATION_CATEGORY: &str = "consumable_food";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootEntry {
    pub id: String,
    pub weight: u32,
    pub qty_min: u32,
    pub qty_max: u32,
}

pub type LootTables = BTreeMap<String, Vec<LootEntry>>;

/// The first `limit` entries tagged `tag`, plus any item, in catalog order.
/// Weights fall off from 10 and repeat every 8 entries.
fn pick_loot(entries: &[CatalogEntry], tag: &str, limit: usize) -> Vec<LootEntry> {
    entries
        .iter()
        .filter(|e| e.category.contains(tag) || e.kind == EntityKind::Item)
        .take(limit)
        .enumerate()
        .map(|(i, e)| LootEntry {
            id: e.id.clone(),
            weight: 10u32.saturating_sub((i % 8) as u32).max(1),
            qty_min: 1,
            qty_max: 1 + (i % 4) as u32,
        })
        .collect()
}

pub fn generate_loot_tables(entries: &[CatalogEntry]) -> LootTables {
    let mut tables: LootTables = LOOT_SOURCES
        .iter()
        .map(|&(source, tag, limit)| (source.to_string(), pick_loot(entries, tag, limit)))
        .collect();

    let ration = entries.iter().find(|e| e.category == RAIDER_RATION_CATEGORY);
    if let (Some(drop), Some(ration)) = (tables.get_mut("raider_drop"), ration) {
        drop.push(LootEntry {
            id: ration.id.clone(),
            weight: 4,
            qty_min: 1,
            qty_max: 2,
        });
    }

    tables
}
