//! Systems - logic that turns one world snapshot into the next

mod ai;
mod events;
mod movement;
mod tick;

pub use ai::*;
pub use events::*;
pub use movement::*;
pub use tick::*;
