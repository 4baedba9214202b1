//! World snapshot - the full simulation state at one tick.
//!
//! Snapshots are replaced wholesale every tick; nothing mutates a snapshot
//! that has already been handed out except the narrative event merge.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::catalog::{AiRole, Catalog};
use crate::components::{EntityInstance, GridPos, GridSize};

/// Ticks in one in-game day
pub const TICKS_PER_DAY: u64 = 100;

/// Phase of the day cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    /// First half of each day is daylight
    pub fn at_tick(tick: u64) -> Self {
        if tick % TICKS_PER_DAY < TICKS_PER_DAY / 2 {
            TimeOfDay::Day
        } else {
            TimeOfDay::Night
        }
    }
}

/// A generated flavor event waiting to be acknowledged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeEvent {
    /// Unix timestamp in milliseconds
    pub id: u64,
    pub text: String,
}

impl NarrativeEvent {
    /// Event stamped with the current wall-clock time
    pub fn now(text: impl Into<String>) -> Self {
        let id = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self { id, text: text.into() }
    }
}

/// Simulation state at one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub grid: GridSize,
    pub tick: u64,
    pub entities: Vec<EntityInstance>,
    pub pending_event: Option<NarrativeEvent>,
    /// Past event texts, most recent first
    pub event_log: VecDeque<String>,
}

impl WorldState {
    pub fn new(grid: GridSize, entities: Vec<EntityInstance>) -> Self {
        Self {
            grid,
            tick: 0,
            entities,
            pending_event: None,
            event_log: VecDeque::new(),
        }
    }

    pub fn day(&self) -> u64 {
        self.tick / TICKS_PER_DAY + 1
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::at_tick(self.tick)
    }

    pub fn entity(&self, instance_id: &str) -> Option<&EntityInstance> {
        self.entities.iter().find(|e| e.instance_id == instance_id)
    }

    pub fn entity_at(&self, pos: GridPos) -> Option<&EntityInstance> {
        self.entities.iter().find(|e| e.position == pos)
    }

    /// Actors whose catalog role matches `role`
    pub fn count_role(&self, catalog: &Catalog, role: AiRole) -> usize {
        self.entities
            .iter()
            .filter(|e| e.is_actor())
            .filter(|e| catalog.role_of(&e.catalog_id) == Some(role))
            .count()
    }

    pub fn survivor_count(&self, catalog: &Catalog) -> usize {
        self.count_role(catalog, AiRole::PlayerAligned)
    }

    pub fn hostile_count(&self, catalog: &Catalog) -> usize {
        self.count_role(catalog, AiRole::Hostile)
    }

    /// The `n` most recent event texts
    pub fn recent_events(&self, n: usize) -> Vec<String> {
        self.event_log.iter().take(n).cloned().collect()
    }

    /// Store a new event and prepend it to the bounded log
    pub fn record_event(&mut self, event: NarrativeEvent, log_capacity: usize) {
        self.event_log.push_front(event.text.clone());
        self.event_log.truncate(log_capacity);
        self.pending_event = Some(event);
    }

    /// Clear the pending event once it has been shown
    pub fn acknowledge_event(&mut self) -> Option<NarrativeEvent> {
        self.pending_event.take()
    }
}
