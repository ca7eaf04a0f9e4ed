//! Enemy plugin - registers darkling spawning, AI, and removal.

use bevy::prelude::*;

use super::ai;
use super::data::{load_darkling_definitions, DarklingRegistry};
use super::spawning::{self, SpawnCadence, SpawnWave};
use crate::core::GameState;

/// Enemy plugin - the combat orchestrator's population half: spawn
/// cadence, waves, the AI tick, and the removal sequence.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DarklingRegistry>()
            .init_resource::<SpawnCadence>()
            .init_resource::<ai::AiTickTimer>()
            .add_event::<SpawnWave>()
            // Archetypes load once at startup; failures warn and fall
            // back to the built-in defaults.
            .add_systems(OnEnter(GameState::Loading), load_darkling_definitions)
            .add_systems(
                Update,
                (
                    spawning::spawn_on_cadence,
                    spawning::spawn_waves,
                    ai::tick_attack_cooldowns,
                    ai::ai_tick,
                    ai::finish_enemy_attacks,
                    ai::run_reposition_cycles,
                    ai::wave_march,
                    ai::handle_darkling_death,
                    ai::despawn_dead_darklings,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnExit(GameState::GameOver), spawning::despawn_darklings);
    }
}
