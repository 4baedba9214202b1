//! Tick system - builds the next world snapshot from the previous one

use rand::Rng;

use super::ai::decide_turn;
use super::movement::{resolve_step, Occupancy};
use crate::catalog::{AiRole, Catalog};
use crate::components::{EntityInstance, GridPos};
use crate::config::AiTuning;
use crate::world::WorldState;

/// Produce the snapshot that follows `prev`.
///
/// When `paused` the previous snapshot is returned unchanged. Otherwise
/// static entities are copied through first, then every actor decides and
/// possibly steps one cell. Actors are processed in list order and an
/// earlier actor's claim on a cell wins. Survivor positions used for
/// targeting are read from `prev`, never from the partially built result.
pub fn advance(
    prev: &WorldState,
    catalog: &Catalog,
    tuning: &AiTuning,
    paused: bool,
    rng: &mut impl Rng,
) -> WorldState {
    if paused {
        return prev.clone();
    }

    let (actors, statics): (Vec<&EntityInstance>, Vec<&EntityInstance>) =
        prev.entities.iter().partition(|e| e.is_actor());

    let survivors: Vec<GridPos> = actors
        .iter()
        .filter(|e| catalog.role_of(&e.catalog_id) == Some(AiRole::PlayerAligned))
        .map(|e| e.position)
        .collect();

    let mut occupancy = Occupancy::new();
    let mut entities = Vec::with_capacity(prev.entities.len());

    for entity in statics {
        occupancy.reserve(entity.position);
        entities.push(entity.clone());
    }
    // Actors hold their current cell until they leave it
    for actor in &actors {
        occupancy.reserve(actor.position);
    }

    let mut moved = 0usize;
    for actor in actors {
        let mut next = actor.clone();

        let Some(role) = catalog.role_of(&actor.catalog_id) else {
            log::debug!("{} has no catalog entry, leaving it in place", actor.instance_id);
            entities.push(next);
            continue;
        };

        if let Some(decision) = decide_turn(actor, role, &survivors, tuning, rng) {
            next.action = decision.action;
            if let Some(target) = decision.target {
                let dest = resolve_step(actor.position, target, prev.grid, &occupancy);
                if dest != actor.position {
                    occupancy.release(actor.position);
                    occupancy.reserve(dest);
                    next.position = dest;
                    moved += 1;
                }
            }
        }

        entities.push(next);
    }

    log::debug!(
        "Tick {} -> {}: {} of {} entities moved",
        prev.tick,
        prev.tick + 1,
        moved,
        entities.len()
    );

    WorldState {
        grid: prev.grid,
        tick: prev.tick + 1,
        entities,
        pending_event: prev.pending_event.clone(),
        event_log: prev.event_log.clone(),
    }
}
