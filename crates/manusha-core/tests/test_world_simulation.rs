//! Integration tests for the world simulation loop.
//!
//! Exercises: Catalog → initialize_world → advance (many ticks) → counters
//!
//! All tests are pure logic with a seeded RNG, no async runtime needed.

use std::collections::HashSet;
use std::sync::Arc;

use manusha_core::catalog::{
    AiRole, Catalog, CatalogEntry, EntryAttributes, StatBlock, Visuals,
};
use manusha_core::components::{ActionLabel, EntityInstance, EntityKind, GridPos, GridSize};
use manusha_core::config::{AiTuning, WorldConfig};
use manusha_core::engine::SimulationEngine;
use manusha_core::generation::{initialize_world, BIOMES};
use manusha_core::systems::{advance, CannedGenerator};
use manusha_core::world::WorldState;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ────────────────────────────────────────────────────────────

fn populated(biome: &str, seed: u64) -> (Catalog, WorldState) {
    let catalog = Catalog::codex();
    let config = WorldConfig {
        biome: biome.to_string(),
        seed,
        ..Default::default()
    };
    let entities = initialize_world(&catalog, &config);
    (catalog, WorldState::new(config.grid, entities))
}

fn assert_no_overlap(state: &WorldState) {
    let mut seen = HashSet::new();
    for e in &state.entities {
        assert!(
            seen.insert(e.position),
            "tick {}: two entities on {}",
            state.tick,
            e.position
        );
    }
}

fn assert_in_bounds(state: &WorldState) {
    for e in &state.entities {
        assert!(state.grid.contains(&e.position), "{} left the grid", e.instance_id);
    }
}

fn actor(id: &str, category: &str) -> CatalogEntry {
    CatalogEntry::new(
        id,
        id,
        EntityKind::Character,
        category,
        EntryAttributes::Actor {
            stats: StatBlock::new().with_hp(100),
            visuals: Visuals::default(),
        },
    )
}

fn small_catalog() -> Catalog {
    Catalog::new(vec![actor("raider", "enemy_raider"), actor("survivor", "player")]).unwrap()
}

fn place(id: &str, catalog_id: &str, x: i32, y: i32) -> EntityInstance {
    EntityInstance::new(id, catalog_id, EntityKind::Character, GridPos::new(x, y))
}

// ── Invariants over long runs ──────────────────────────────────────────

#[test]
fn no_overlap_and_in_bounds_across_biomes() {
    for biome in BIOMES {
        for seed in [1, 7, 1001] {
            let (catalog, mut state) = populated(biome, seed);
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..200 {
                state = advance(&state, &catalog, &AiTuning::default(), false, &mut rng);
                assert_no_overlap(&state);
                assert_in_bounds(&state);
            }
        }
    }
}

#[test]
fn actors_move_at_most_one_cell_per_tick() {
    let (catalog, mut state) = populated("urban_ruins", 3);
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let next = advance(&state, &catalog, &AiTuning::default(), false, &mut rng);
        for e in &next.entities {
            let before = state.entity(&e.instance_id).unwrap();
            assert!((e.position.x - before.position.x).abs() <= 1);
            assert!((e.position.y - before.position.y).abs() <= 1);
        }
        state = next;
    }
}

#[test]
fn static_entities_never_change() {
    let (catalog, mut state) = populated("forested_ruins", 11);
    let statics: Vec<EntityInstance> = state
        .entities
        .iter()
        .filter(|e| !e.is_actor())
        .cloned()
        .collect();
    assert!(!statics.is_empty());

    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..100 {
        state = advance(&state, &catalog, &AiTuning::default(), false, &mut rng);
    }
    for s in &statics {
        assert_eq!(state.entity(&s.instance_id), Some(s));
    }
}

#[test]
fn tick_counter_is_monotonic_and_counts_hold() {
    let (catalog, mut state) = populated("wasteland", 1001);
    let survivors = state.survivor_count(&catalog);
    let hostiles = state.hostile_count(&catalog);
    let mut rng = StdRng::seed_from_u64(1);

    for expected in 1..=250 {
        state = advance(&state, &catalog, &AiTuning::default(), false, &mut rng);
        assert_eq!(state.tick, expected);
    }
    assert_eq!(state.day(), 3);
    assert_eq!(state.survivor_count(&catalog), survivors);
    assert_eq!(state.hostile_count(&catalog), hostiles);
}

#[test]
fn paused_advance_is_idempotent() {
    let (catalog, state) = populated("urban_ruins", 5);
    let mut rng = StdRng::seed_from_u64(5);
    let once = advance(&state, &catalog, &AiTuning::default(), true, &mut rng);
    let twice = advance(&once, &catalog, &AiTuning::default(), true, &mut rng);
    assert_eq!(once, state);
    assert_eq!(twice, state);
}

#[test]
fn seeded_runs_are_reproducible() {
    let (catalog, start) = populated("wasteland", 42);
    let run = || {
        let mut rng = StdRng::seed_from_u64(9);
        let mut state = start.clone();
        for _ in 0..50 {
            state = advance(&state, &catalog, &AiTuning::default(), false, &mut rng);
        }
        state
    };
    assert_eq!(run(), run());
}

// ── Behavior scenarios ─────────────────────────────────────────────────

#[test]
fn hostile_closes_in_on_survivor() {
    let catalog = small_catalog();
    let tuning = AiTuning {
        move_chance: 1.0,
        survivor_wander_chance: 0.0,
        ..Default::default()
    };
    let mut state = WorldState::new(
        GridSize::default(),
        vec![place("h", "raider", 3, 3), place("s", "survivor", 9, 6)],
    );
    let mut rng = StdRng::seed_from_u64(0);

    let start = state.entity("h").unwrap().position.distance(&GridPos::new(9, 6));
    for _ in 0..3 {
        state = advance(&state, &catalog, &tuning, false, &mut rng);
    }
    let hostile = state.entity("h").unwrap();
    assert_eq!(hostile.action, ActionLabel::Hunting);
    assert_eq!(hostile.position, GridPos::new(6, 6));
    assert!(hostile.position.distance(&GridPos::new(9, 6)) < start);
    assert_eq!(state.entity("s").unwrap().action, ActionLabel::Exploring);
}

#[test]
fn hostile_out_of_range_wanders() {
    let catalog = small_catalog();
    let tuning = AiTuning {
        move_chance: 1.0,
        ..Default::default()
    };
    let state = WorldState::new(
        GridSize::default(),
        vec![place("h", "raider", 0, 0), place("s", "survivor", 20, 20)],
    );
    let next = advance(&state, &catalog, &tuning, false, &mut StdRng::seed_from_u64(4));
    assert_eq!(next.entity("h").unwrap().action, ActionLabel::Wandering);
    assert_eq!(catalog.role_of("raider"), Some(AiRole::Hostile));
}

#[test]
fn contested_cell_goes_to_first_mover() {
    let catalog = small_catalog();
    let tuning = AiTuning {
        move_chance: 1.0,
        ..Default::default()
    };
    let state = WorldState::new(
        GridSize::default(),
        vec![
            place("a", "raider", 4, 4),
            place("b", "raider", 6, 4),
            place("s", "survivor", 5, 7),
        ],
    );
    let next = advance(&state, &catalog, &tuning, false, &mut StdRng::seed_from_u64(8));
    assert_eq!(next.entity("a").unwrap().position, GridPos::new(5, 5));
    assert_eq!(next.entity("b").unwrap().position, GridPos::new(6, 4));
    assert_no_overlap(&next);
}

// ── Engine ─────────────────────────────────────────────────────────────

#[test]
fn unvalidated_tuning_never_panics_the_tick() {
    let (catalog, mut state) = populated("wasteland", 1001);
    let tuning = AiTuning {
        move_chance: 1.5,
        hostile_wander_chance: -1.0,
        survivor_wander_chance: f64::NAN,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..50 {
        state = advance(&state, &catalog, &tuning, false, &mut rng);
        assert_no_overlap(&state);
    }
    assert_eq!(state.tick, 50);
}

#[test]
fn engine_rejects_out_of_range_chance() {
    let mut config = WorldConfig::default();
    config.ai.move_chance = 1.5;
    let result = SimulationEngine::new(
        Arc::new(Catalog::codex()),
        config,
        Arc::new(CannedGenerator::new()),
    );
    assert!(result.is_err());
}

#[test]
fn engine_runs_a_day_without_runtime() {
    let mut engine = SimulationEngine::new(
        Arc::new(Catalog::codex()),
        WorldConfig::default(),
        Arc::new(CannedGenerator::new()),
    )
    .unwrap();
    for _ in 0..100 {
        engine.update();
        assert_no_overlap(engine.state());
    }
    assert_eq!(engine.day(), 2);
    assert!(engine.state().pending_event.is_none());
}
