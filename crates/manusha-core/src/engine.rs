//! Simulation engine - main entry point for running the simulation

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::Catalog;
use crate::components::EntityInstance;
use crate::config::{ConfigError, WorldConfig};
use crate::generation::initialize_world;
use crate::systems::*;
use crate::world::{NarrativeEvent, TimeOfDay, WorldState};

/// Main simulation engine
///
/// Owns the current snapshot and everything needed to produce the next one.
/// Drive it by calling [`SimulationEngine::update`] once per tick.
pub struct SimulationEngine {
    /// Snapshot presented to readers, replaced every tick
    state: WorldState,
    catalog: Arc<Catalog>,
    config: WorldConfig,
    /// Narrative event scheduling
    events: EventTrigger,
    rng: StdRng,
    paused: bool,
}

impl SimulationEngine {
    /// Create a freshly populated world. Fails if the AI tuning is invalid.
    pub fn new(
        catalog: Arc<Catalog>,
        config: WorldConfig,
        generator: Arc<dyn NarrativeGenerator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let entities = initialize_world(&catalog, &config);
        let state = WorldState::new(config.grid, entities);
        Ok(Self::assemble(state, catalog, config, generator))
    }

    /// Resume from an existing snapshot
    pub fn from_state(
        state: WorldState,
        catalog: Arc<Catalog>,
        config: WorldConfig,
        generator: Arc<dyn NarrativeGenerator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(state, catalog, config, generator))
    }

    fn assemble(
        state: WorldState,
        catalog: Arc<Catalog>,
        config: WorldConfig,
        generator: Arc<dyn NarrativeGenerator>,
    ) -> Self {
        Self {
            events: EventTrigger::new(generator, config.event_interval),
            rng: StdRng::seed_from_u64(config.seed),
            state,
            catalog,
            config,
            paused: false,
        }
    }

    /// Advance one tick. Returns false when paused.
    ///
    /// A finished narrative request is merged into the current snapshot first,
    /// even while paused.
    pub fn update(&mut self) -> bool {
        if let Some(text) = self.events.poll() {
            self.merge_event(text);
        }
        if self.paused {
            return false;
        }

        let tuning = &self.config.ai;
        self.state = advance(&self.state, &self.catalog, tuning, false, &mut self.rng);

        if self.events.is_due(self.state.tick) && !self.events.is_in_flight() {
            let prompt = self.event_prompt();
            self.events.fire(prompt);
        }
        true
    }

    /// Wait for the in-flight narrative request and merge it
    pub async fn await_pending_event(&mut self) -> Option<&NarrativeEvent> {
        let text = self.events.wait().await?;
        self.merge_event(text);
        self.state.pending_event.as_ref()
    }

    fn merge_event(&mut self, text: String) {
        let event = NarrativeEvent::now(text);
        log::info!("Day {}: {}", self.state.day(), event.text);
        self.state.record_event(event, self.config.event_log_capacity);
    }

    /// What the generator would be told about the current snapshot
    pub fn event_prompt(&self) -> EventPrompt {
        EventPrompt {
            day: self.state.day(),
            survivors: self.survivor_count(),
            hostiles: self.hostile_count(),
            recent_events: self.state.recent_events(RECENT_EVENT_CONTEXT),
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::info!("Simulation {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.state.tick
    }

    pub fn day(&self) -> u64 {
        self.state.day()
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.state.time_of_day()
    }

    pub fn survivor_count(&self) -> usize {
        self.state.survivor_count(&self.catalog)
    }

    pub fn hostile_count(&self) -> usize {
        self.state.hostile_count(&self.catalog)
    }

    pub fn entity(&self, instance_id: &str) -> Option<&EntityInstance> {
        self.state.entity(instance_id)
    }

    /// Clear the pending event once it has been shown
    pub fn acknowledge_event(&mut self) -> Option<NarrativeEvent> {
        self.state.acknowledge_event()
    }

    pub fn event_in_flight(&self) -> bool {
        self.events.is_in_flight()
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        let catalog = Arc::new(Catalog::codex());
        let config = WorldConfig::default();
        let state = WorldState::new(config.grid, initialize_world(&catalog, &config));
        Self::assemble(state, catalog, config, Arc::new(CannedGenerator::new()))
    }
}

impl std::fmt::Debug for SimulationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationEngine")
            .field("tick", &self.state.tick)
            .field("entities", &self.state.entities.len())
            .field("paused", &self.paused)
            .field("events", &self.events)
            .finish()
    }
}
