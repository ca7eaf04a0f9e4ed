//! Player module - the player entity, shared actor state machine, and
//! bounded attack queue.

mod actions;
mod components;
mod plugin;

pub use actions::{RecoverSignal, Transforming};
pub use components::*;
pub use plugin::PlayerPlugin;
