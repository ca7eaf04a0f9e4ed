//! Core game module - states, events, and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

mod deferred;
mod events;
mod plugin;
mod states;

pub use deferred::*;
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
