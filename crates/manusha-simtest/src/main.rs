//! Manusha Headless Simulation Harness
//!
//! Runs the wasteland simulation in-process on a timer and validates its
//! invariants every tick. No rendering, no network; narrative events come
//! from the canned offline generator.
//!
//! Usage:
//!   cargo run -p manusha-simtest
//!   cargo run -p manusha-simtest -- --fast --ticks 1000 --biome urban_ruins --verbose

mod logging;

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use manusha_core::catalog::{AiRole, Catalog, CODEX_MIN_ENTRIES};
use manusha_core::components::EntityKind;
use manusha_core::config::WorldConfig;
use manusha_core::engine::SimulationEngine;
use manusha_core::generation::{initialize_world, BIOMES};
use manusha_core::systems::CannedGenerator;
use manusha_core::world::WorldState;

/// Headless harness for the Manusha world simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 300)]
    ticks: u64,

    /// Override the world seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the biome
    #[arg(long)]
    biome: Option<String>,

    /// JSON config file; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tick as fast as possible instead of at the configured rate
    #[arg(long)]
    fast: bool,

    /// Write the final world snapshot as JSON
    #[arg(long)]
    dump: Option<PathBuf>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => WorldConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => WorldConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(biome) = &args.biome {
        config.biome = biome.clone();
    }

    println!("=== Manusha Simulation Harness ===\n");

    let catalog = Arc::new(Catalog::codex());
    let mut results = Vec::new();

    // 1. Catalog validation
    results.extend(validate_catalog(&catalog));

    // 2. World generation across every biome
    results.extend(validate_generation(&catalog, &config));

    // 3. Live run on a timer
    let (run_results, final_state) = run_live(catalog.clone(), &config, &args).await?;
    results.extend(run_results);

    // 4. Pause behavior
    results.extend(validate_pause(catalog, &config)?);

    if let Some(path) = &args.dump {
        let json = serde_json::to_string_pretty(&final_state)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("Final snapshot written to {}", path.display());
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!("\n=== RESULT: {}/{} passed, {} failed ===", passed, total, failed);

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Overlapping cells and out-of-bounds entities in a snapshot
fn layout_violations(state: &WorldState) -> (usize, usize) {
    let mut seen = HashSet::new();
    let overlaps = state.entities.iter().filter(|e| !seen.insert(e.position)).count();
    let out_of_bounds = state
        .entities
        .iter()
        .filter(|e| !state.grid.contains(&e.position))
        .count();
    (overlaps, out_of_bounds)
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(catalog: &Catalog) -> Vec<TestResult> {
    println!("--- Catalog ---");
    let mut results = Vec::new();

    results.push(TestResult::new(
        "catalog_size",
        catalog.len() >= CODEX_MIN_ENTRIES,
        format!("{} entries", catalog.len()),
    ));

    let roles = |role: AiRole| catalog.entries().iter().filter(|e| e.role() == role).count();
    let players = roles(AiRole::PlayerAligned);
    let hostiles = roles(AiRole::Hostile);
    results.push(TestResult::new(
        "catalog_roles",
        players > 0 && hostiles > 0,
        format!("{} player-aligned, {} hostile", players, hostiles),
    ));

    let mismatched: Vec<&str> = catalog
        .entries()
        .iter()
        .filter(|e| !e.attributes.fits(e.kind))
        .map(|e| e.id.as_str())
        .collect();
    results.push(TestResult::new(
        "catalog_attribute_shapes",
        mismatched.is_empty(),
        if mismatched.is_empty() {
            "every entry has attributes matching its kind".to_string()
        } else {
            format!("mismatched: {}", mismatched.join(", "))
        },
    ));

    let blueprints = catalog.of_kind(EntityKind::Blueprint).count();
    let dangling = catalog
        .recipes()
        .iter()
        .flat_map(|r| r.required.iter())
        .filter(|ingredient| catalog.get(&ingredient.id).is_none())
        .count();
    results.push(TestResult::new(
        "catalog_recipes",
        catalog.recipes().len() == blueprints && dangling == 0,
        format!(
            "{} recipes for {} blueprints, {} unknown ingredients",
            catalog.recipes().len(),
            blueprints,
            dangling
        ),
    ));

    let empty_tables = catalog.loot_tables().values().filter(|t| t.is_empty()).count();
    results.push(TestResult::new(
        "catalog_loot_tables",
        !catalog.loot_tables().is_empty() && empty_tables == 0,
        format!("{} loot tables, {} empty", catalog.loot_tables().len(), empty_tables),
    ));

    let round_trip = catalog
        .to_json()
        .and_then(|json| Catalog::from_json(&json))
        .map(|reloaded| reloaded.len() == catalog.len());
    results.push(TestResult::new(
        "catalog_json_round_trip",
        matches!(round_trip, Ok(true)),
        match round_trip {
            Ok(_) => "catalog reloads from its own JSON".to_string(),
            Err(e) => format!("reload failed: {}", e),
        },
    ));

    results
}

// ── 2. Generation ───────────────────────────────────────────────────────

fn validate_generation(catalog: &Catalog, config: &WorldConfig) -> Vec<TestResult> {
    println!("--- World Generation ---");
    let mut results = Vec::new();

    for biome in BIOMES {
        let biome_config = WorldConfig {
            biome: biome.to_string(),
            ..config.clone()
        };
        let state = WorldState::new(biome_config.grid, initialize_world(catalog, &biome_config));
        let (overlaps, out_of_bounds) = layout_violations(&state);
        let survivors = state.survivor_count(catalog);

        results.push(TestResult::new(
            &format!("generation_{}_layout", biome),
            overlaps == 0 && out_of_bounds == 0,
            format!(
                "{} entities, {} overlaps, {} out of bounds",
                state.entities.len(),
                overlaps,
                out_of_bounds
            ),
        ));
        results.push(TestResult::new(
            &format!("generation_{}_survivors", biome),
            survivors == biome_config.initial_survivors as usize,
            format!("{} of {} survivors placed", survivors, biome_config.initial_survivors),
        ));

        let again = initialize_world(catalog, &biome_config);
        results.push(TestResult::new(
            &format!("generation_{}_reproducible", biome),
            again == state.entities,
            format!("seed {}", biome_config.seed),
        ));
    }

    results
}

// ── 3. Live run ─────────────────────────────────────────────────────────

async fn run_live(
    catalog: Arc<Catalog>,
    config: &WorldConfig,
    args: &Args,
) -> anyhow::Result<(Vec<TestResult>, WorldState)> {
    println!(
        "--- Live Run ({} ticks, biome {}, seed {}) ---",
        args.ticks, config.biome, config.seed
    );
    let mut results = Vec::new();

    let generator = Arc::new(CannedGenerator::new());
    let mut engine = SimulationEngine::new(catalog, config.clone(), generator)
        .context("building the live engine")?;
    let survivors = engine.survivor_count();
    let hostiles = engine.hostile_count();

    let period = if args.fast {
        Duration::from_millis(1)
    } else {
        Duration::from_millis(config.tick_rate_ms.max(1))
    };
    let mut interval = tokio::time::interval(period);

    let mut layout_failures = 0usize;
    let mut count_failures = 0usize;
    let mut events_seen = 0usize;

    for _ in 0..args.ticks {
        interval.tick().await;
        engine.update();

        let (overlaps, out_of_bounds) = layout_violations(engine.state());
        if overlaps > 0 || out_of_bounds > 0 {
            layout_failures += 1;
            log::error!(
                "Tick {}: {} overlaps, {} out of bounds",
                engine.tick(),
                overlaps,
                out_of_bounds
            );
        }
        if engine.survivor_count() != survivors || engine.hostile_count() != hostiles {
            count_failures += 1;
        }
        if let Some(event) = engine.acknowledge_event() {
            events_seen += 1;
            println!("  [day {} {:?}] {}", engine.day(), engine.time_of_day(), event.text);
        }
    }

    // Don't leave a request dangling at the end of the run
    if let Some(event) = engine.await_pending_event().await.cloned() {
        events_seen += 1;
        println!("  [day {} {:?}] {}", engine.day(), engine.time_of_day(), event.text);
        engine.acknowledge_event();
    }

    results.push(TestResult::new(
        "live_tick_count",
        engine.tick() == args.ticks,
        format!("reached tick {} (day {})", engine.tick(), engine.day()),
    ));
    results.push(TestResult::new(
        "live_layout",
        layout_failures == 0,
        format!("{} ticks with overlap or out-of-bounds entities", layout_failures),
    ));
    results.push(TestResult::new(
        "live_population_stable",
        count_failures == 0,
        format!("{} survivors, {} hostiles throughout", survivors, hostiles),
    ));

    let expected_events = if config.event_interval == 0 {
        0
    } else {
        (args.ticks / config.event_interval) as usize
    };
    results.push(TestResult::new(
        "live_narrative_events",
        events_seen <= expected_events && (expected_events == 0 || events_seen > 0),
        format!("{} of {} events delivered", events_seen, expected_events),
    ));
    results.push(TestResult::new(
        "live_event_log_bounded",
        engine.state().event_log.len() <= config.event_log_capacity,
        format!("{} entries kept", engine.state().event_log.len()),
    ));

    Ok((results, engine.state().clone()))
}

// ── 4. Pause ────────────────────────────────────────────────────────────

fn validate_pause(catalog: Arc<Catalog>, config: &WorldConfig) -> anyhow::Result<Vec<TestResult>> {
    println!("--- Pause ---");

    let generator = Arc::new(CannedGenerator::new());
    let mut engine = SimulationEngine::new(catalog, config.clone(), generator)
        .context("building the pause engine")?;
    engine.update();
    engine.set_paused(true);
    let before = engine.state().clone();
    for _ in 0..20 {
        engine.update();
    }

    Ok(vec![TestResult::new(
        "pause_freezes_world",
        engine.state() == &before,
        format!("tick held at {}", engine.tick()),
    )])
}
