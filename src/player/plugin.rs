//! Player plugin - spawning, the actor state machine, and movement.

use bevy::prelude::*;

use super::actions::{self, RecoverSignal};
use super::components::*;
use crate::combat::{CombatConfig, Invulnerability, Resolve};
use crate::core::{fire_deferred, GameState, PlayState};

/// Player plugin - handles the player entity and its state machine.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MoveConfig>()
            .add_event::<RecoverSignal>()
            // The recover timer only ticks while gameplay runs, so a
            // pause cannot strand the signal in the event buffer.
            .add_systems(
                Update,
                fire_deferred::<RecoverSignal>.run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnEnter(GameState::InGame), spawn_player)
            .add_systems(OnExit(GameState::GameOver), despawn_player)
            .add_systems(
                Update,
                (
                    actions::apply_commands,
                    actions::begin_transforms,
                    actions::advance_transforms,
                    actions::finish_rolls,
                    actions::advance_attack_queue,
                    actions::clear_on_depleted,
                    actions::integrate_motion,
                    actions::fall_and_landing,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame))
                    .run_if(in_state(PlayState::Exploring)),
            );
    }
}

/// Spawn the player with its state machine and resource model.
///
/// Re-entering the game reuses an existing player so pause round-trips
/// do not duplicate it.
fn spawn_player(
    mut commands: Commands,
    config: Res<CombatConfig>,
    existing: Query<Entity, With<Player>>,
) {
    if !existing.is_empty() {
        return;
    }
    commands.spawn((
        Player,
        ActorState::default(),
        AttackQueue::default(),
        Kinematics::default(),
        Resolve::default(),
        Invulnerability::new(config.invuln_window_secs),
        Transform::default(),
    ));
}

/// Tear the player down when the run ends.
fn despawn_player(mut commands: Commands, query: Query<Entity, With<Player>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
