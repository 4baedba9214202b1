//! Crafting recipes, one per blueprint.
//!
//! Recipes are derived from the catalog when it is built and are a lookup
//! table only; crafting itself is not simulated.

use serde::{Deserialize, Serialize};

use super::CatalogEntry;
use crate::components::EntityKind;

/// Category tag of raw crafting materials
pub const MATERIAL_TAG: &str = "material";
/// Materials considered as recipe ingredients, in catalog order
const MATERIAL_POOL_SIZE: usize = 60;
/// Every recipe is crafted at this station
pub const DEFAULT_STATION: &str = "workbench";

/// An item id with a quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub qty: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub output: Ingredient,
    pub required: Vec<Ingredient>,
    /// Seconds
    pub craft_time: u32,
    pub station: String,
    pub unlock_tier: u32,
}

/// Ids of up to `limit` entries tagged `tag`; falls back to the first
/// `limit` entries when nothing matches
fn material_pool(entries: &[CatalogEntry], tag: &str, limit: usize) -> Vec<String> {
    let tagged: Vec<String> = entries
        .iter()
        .filter(|e| e.matches_tag(tag))
        .take(limit)
        .map(|e| e.id.clone())
        .collect();
    if !tagged.is_empty() {
        return tagged;
    }
    entries.iter().take(limit).map(|e| e.id.clone()).collect()
}

/// Build one recipe per blueprint entry, in catalog order
pub fn generate_recipes(entries: &[CatalogEntry]) -> Vec<Recipe> {
    let pool = material_pool(entries, MATERIAL_TAG, MATERIAL_POOL_SIZE);
    if pool.is_empty() {
        return Vec::new();
    }

    entries
        .iter()
        .filter(|e| e.kind == EntityKind::Blueprint)
        .enumerate()
        .map(|(i, blueprint)| {
            let required = (0..2 + i % 4)
                .map(|j| Ingredient {
                    id: pool[(i + j) % pool.len()].clone(),
                    qty: 1 + ((i + j) % 6) as u32,
                })
                .collect();
            Recipe {
                id: format!("recipe_bp_{:03}", i + 1),
                name: format!("Recipe for {}", blueprint.name),
                output: Ingredient {
                    id: blueprint.id.clone(),
                    qty: 1,
                },
                required,
                craft_time: 30 + (i % 6) as u32 * 8,
                station: DEFAULT_STATION.to_string(),
                unlock_tier: 1 + (i % 4) as u32,
            }
        })
        .collect()
}
