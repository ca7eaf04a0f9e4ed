//! Enemies module - darklings, AI, spawning, and archetype data.

mod ai;
mod components;
pub mod data;
mod plugin;
mod spawning;

pub use ai::{AiTickTimer, AI_TICK_SECS};
pub use components::*;
pub use data::{DarklingDefinition, DarklingRegistry, DataLoadError};
pub use plugin::EnemyPlugin;
pub use spawning::{
    spawn_darkling, SpawnCadence, SpawnWave, WavePlacement, WaveSpawnPlan,
};
