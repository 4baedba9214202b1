//! Generation - procedural creation of the starting world

mod biome;
mod populate;

pub use biome::*;
pub use populate::*;
