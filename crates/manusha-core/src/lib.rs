//! Manusha Core - Post-apocalyptic Survival Simulation Engine
//!
//! A tick-based simulation of survivors, raiders and mutants roaming a ruined
//! grid world, with periodic narrative events from a pluggable text generator.
//!
//! # Architecture
//!
//! Every tick produces a fresh [`WorldState`](world::WorldState) snapshot:
//! - **Catalog**: static definitions of every spawnable thing, with AI roles
//!   derived once at load
//! - **Generation**: biome spawn rules that populate the initial world
//! - **Systems**: AI, grid movement and the event trigger that turn one
//!   snapshot into the next
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use manusha_core::prelude::*;
//!
//! # async fn run() -> Result<(), ConfigError> {
//! let mut engine = SimulationEngine::new(
//!     Arc::new(Catalog::codex()),
//!     WorldConfig::default(),
//!     Arc::new(CannedGenerator::new()),
//! )?;
//!
//! loop {
//!     engine.update();
//!     tokio::time::sleep(std::time::Duration::from_millis(500)).await;
//! }
//! # }
//! ```

pub mod catalog;
pub mod components;
pub mod config;
pub mod engine;
pub mod generation;
pub mod systems;
pub mod world;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::catalog::{AiRole, Catalog, CatalogEntry, Interaction, Recipe};
    pub use crate::components::*;
    pub use crate::config::{AiTuning, ConfigError, WorldConfig};
    pub use crate::engine::SimulationEngine;
    pub use crate::systems::{
        CannedGenerator, EventPrompt, GeneratorError, GeneratorFuture, NarrativeGenerator,
    };
    pub use crate::world::{NarrativeEvent, TimeOfDay, WorldState};
}
