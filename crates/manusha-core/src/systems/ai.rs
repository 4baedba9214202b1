//! Actor AI - picks an action label and an optional move target each tick

use rand::Rng;

use crate::catalog::AiRole;
use crate::components::{ActionLabel, EntityInstance, GridPos};
use crate::config::AiTuning;

/// What an actor decided to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnDecision {
    pub action: ActionLabel,
    /// Cell to step toward, if any
    pub target: Option<GridPos>,
}

/// Closest survivor strictly inside `radius`; the first one wins ties
pub fn nearest_within(from: GridPos, survivors: &[GridPos], radius: f64) -> Option<GridPos> {
    let mut closest = None;
    let mut min_distance = radius;

    for survivor in survivors {
        let distance = from.distance(survivor);
        if distance < min_distance {
            min_distance = distance;
            closest = Some(*survivor);
        }
    }

    closest
}

/// Roll a chance, clamped into `[0, 1]` (NaN never succeeds) so an
/// unvalidated tuning cannot make `gen_bool` panic
fn roll(rng: &mut impl Rng, chance: f64) -> bool {
    let p = if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    };
    rng.gen_bool(p)
}

/// A cell offset by -1, 0 or 1 on each axis (may be the same cell)
pub fn random_adjacent(from: GridPos, rng: &mut impl Rng) -> GridPos {
    let dx = rng.gen_range(-1..=1);
    let dy = rng.gen_range(-1..=1);
    from.offset(dx, dy)
}

/// Decide this tick's action for one actor.
///
/// Returns `None` when the actor sits the tick out, in which case it keeps
/// both its cell and its previous label. `survivors` are the pre-tick
/// positions of all player-aligned actors.
pub fn decide_turn(
    actor: &EntityInstance,
    role: AiRole,
    survivors: &[GridPos],
    tuning: &AiTuning,
    rng: &mut impl Rng,
) -> Option<TurnDecision> {
    if !roll(rng, tuning.move_chance) {
        return None;
    }

    let radius = tuning.detection_radius;
    let decision = match role {
        AiRole::Hostile => match nearest_within(actor.position, survivors, radius) {
            Some(prey) => TurnDecision {
                action: ActionLabel::Hunting,
                target: Some(prey),
            },
            None => {
                let target = roll(rng, tuning.hostile_wander_chance)
                    .then(|| random_adjacent(actor.position, rng));
                TurnDecision {
                    action: ActionLabel::Wandering,
                    target,
                }
            }
        },
        AiRole::PlayerAligned => {
            let target = roll(rng, tuning.survivor_wander_chance)
                .then(|| random_adjacent(actor.position, rng));
            TurnDecision {
                action: ActionLabel::Exploring,
                target,
            }
        }
        AiRole::Neutral => TurnDecision {
            action: actor.action,
            target: None,
        },
    };

    Some(decision)
}
