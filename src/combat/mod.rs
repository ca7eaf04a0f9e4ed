//! Combat module - the resolve model, strikes, damage, and pickups.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
pub use systems::CombatSet;
