//! Component definitions for placed entities.
//!
//! Components are plain data. Behavior lives in systems.

mod common;
mod entity;

pub use common::*;
pub use entity::*;
