//! Initial world population: guaranteed survivors plus biome spawns

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::biome::{biome_rules, SpawnRoller};
use crate::catalog::{Catalog, CatalogEntry, PLAYER_CATEGORY};
use crate::components::{EntityInstance, GridPos, GridSize};
use crate::config::WorldConfig;

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Random base-36 suffix that makes instance ids unique
pub fn instance_suffix(rng: &mut impl Rng) -> String {
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// Build a placed instance of `entry` at `position`
pub fn spawn_instance(
    entry: &CatalogEntry,
    position: GridPos,
    rng: &mut impl Rng,
) -> EntityInstance {
    let mut instance = EntityInstance::new(
        format!("{}-{}", entry.id, instance_suffix(rng)),
        entry.id.clone(),
        entry.kind,
        position,
    );
    if let Some(hp) = entry.hp() {
        instance = instance.with_hp(hp);
    }
    if entry.kind.is_actor() {
        instance = instance.with_name(entry.name.clone());
    }
    instance
}

/// Places entries on random free cells, tracking occupancy
pub struct Placer<R: Rng> {
    grid: GridSize,
    max_attempts: u32,
    occupied: HashSet<GridPos>,
    placed: Vec<EntityInstance>,
    rng: R,
}

impl<R: Rng> Placer<R> {
    pub fn new(grid: GridSize, max_attempts: u32, rng: R) -> Self {
        Self {
            grid,
            max_attempts,
            occupied: HashSet::new(),
            placed: Vec::new(),
            rng,
        }
    }

    /// Try to place `entry`; returns false if it is not placeable or no free cell was found
    pub fn place(&mut self, entry: &CatalogEntry) -> bool {
        if !entry.kind.is_placeable() || self.grid.cell_count() == 0 {
            return false;
        }

        for _ in 0..self.max_attempts {
            let pos = GridPos::new(
                self.rng.gen_range(0..self.grid.width),
                self.rng.gen_range(0..self.grid.height),
            );
            if self.occupied.insert(pos) {
                let instance = spawn_instance(entry, pos, &mut self.rng);
                self.placed.push(instance);
                return true;
            }
        }

        log::debug!("No free cell for {} after {} attempts, skipping", entry.id, self.max_attempts);
        false
    }

    pub fn placed(&self) -> &[EntityInstance] {
        &self.placed
    }

    pub fn finish(self) -> Vec<EntityInstance> {
        self.placed
    }
}

/// Populate a fresh world for `config.biome`, reproducible from `config.seed`.
///
/// Survivors are placed first, then each biome rule that fires. A spawn that
/// finds no free cell is skipped, so a crowded grid simply ends up with fewer
/// entities.
pub fn initialize_world(catalog: &Catalog, config: &WorldConfig) -> Vec<EntityInstance> {
    let mut placer = Placer::new(
        config.grid,
        config.placement_attempts,
        StdRng::seed_from_u64(config.seed),
    );

    let survivors: Vec<&CatalogEntry> = catalog.in_category(PLAYER_CATEGORY).collect();
    if survivors.is_empty() {
        log::warn!("Catalog has no `{}` entries; starting without survivors", PLAYER_CATEGORY);
    } else {
        for i in 0..config.initial_survivors as usize {
            placer.place(survivors[i % survivors.len()]);
        }
    }

    let mut roller = SpawnRoller::new(config.seed);
    let rules = biome_rules(&config.biome);
    if rules.is_empty() {
        log::warn!("Unknown biome `{}`; only survivors will spawn", config.biome);
    }

    for request in roller.roll(&rules) {
        let candidates: Vec<&CatalogEntry> = catalog
            .matching(&request.category)
            .into_iter()
            .filter(|e| e.kind.is_placeable())
            .collect();
        if candidates.is_empty() {
            log::debug!("No placeable catalog entries for `{}`", request.category);
            continue;
        }

        for _ in 0..request.count {
            let pick = roller.rand_int(0, candidates.len() as u32 - 1) as usize;
            placer.place(candidates[pick]);
        }
    }

    let entities = placer.finish();
    log::info!(
        "World initialized: biome={} seed={} entities={}",
        config.biome,
        config.seed,
        entities.len()
    );
    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AiRole, EntryAttributes, StatBlock};
    use crate::components::EntityKind;

    fn all_cells_unique(entities: &[EntityInstance]) -> bool {
        let mut seen = HashSet::new();
        entities.iter().all(|e| seen.insert(e.position))
    }

    #[test]
    fn test_guaranteed_survivors() {
        let catalog = Catalog::codex();
        let config = WorldConfig {
            biome: "nowhere".to_string(),
            ..Default::default()
        };
        let entities = initialize_world(&catalog, &config);
        assert_eq!(entities.len(), 5);
        for e in &entities {
            assert_eq!(catalog.role_of(&e.catalog_id), Some(AiRole::PlayerAligned));
            assert!(e.name.is_some());
        }
    }

    #[test]
    fn test_world_is_reproducible() {
        let catalog = Catalog::codex();
        let config = WorldConfig::default();
        let a = initialize_world(&catalog, &config);
        let b = initialize_world(&catalog, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_placement_in_bounds_without_overlap() {
        let catalog = Catalog::codex();
        for biome in crate::generation::BIOMES {
            for seed in 0..20 {
                let config = WorldConfig {
                    biome: biome.to_string(),
                    seed,
                    ..Default::default()
                };
                let entities = initialize_world(&catalog, &config);
                assert!(all_cells_unique(&entities));
                assert!(entities.iter().all(|e| config.grid.contains(&e.position)));
                assert!(entities.iter().all(|e| e.kind.is_placeable()));
            }
        }
    }

    #[test]
    fn test_full_grid_under_spawns() {
        let catalog = Catalog::codex();
        let config = WorldConfig {
            grid: GridSize::new(2, 2),
            initial_survivors: 10,
            ..Default::default()
        };
        let entities = initialize_world(&catalog, &config);
        assert_eq!(entities.len(), 4);
        assert!(all_cells_unique(&entities));
    }

    #[test]
    fn test_items_never_placed() {
        let item = CatalogEntry::new(
            "mat_wood_001",
            "WoodPlank 1",
            EntityKind::Item,
            "material",
            EntryAttributes::Object {
                stats: StatBlock::new(),
            },
        );
        let mut placer = Placer::new(GridSize::default(), 200, StdRng::seed_from_u64(1));
        assert!(!placer.place(&item));
        assert!(placer.placed().is_empty());
    }

    #[test]
    fn test_spawn_instance_copies_hp() {
        let catalog = Catalog::codex();
        let entry = catalog.get("char_survivor_001").unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let instance = spawn_instance(entry, GridPos::new(3, 4), &mut rng);
        assert!(instance.instance_id.starts_with("char_survivor_001-"));
        assert_eq!(instance.instance_id.len(), "char_survivor_001-".len() + SUFFIX_LEN);
        assert_eq!(instance.hp, entry.hp());
        assert_eq!(instance.max_hp, entry.hp());
        assert_eq!(instance.kind, EntityKind::Character);
    }
}
