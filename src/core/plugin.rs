//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::events::*;
use super::states::*;
use crate::input::Command;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, MainMenu, InGame, etc.)
/// - Global events (ActionStarted, DamageEvent, etc.)
/// - Game flow transitions driven by semantic commands
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Register global events
            .add_event::<ActionStarted>()
            .add_event::<ActionCompleted>()
            .add_event::<FormChanged>()
            .add_event::<TransformRequest>()
            .add_event::<DamageEvent>()
            .add_event::<ResourceDepleted>()
            .add_event::<ResourceRestored>()
            .add_event::<ActorDepleted>()
            .add_event::<DarklingDefeated>()
            .add_event::<DamageFlicker>()

            // Loading state - transition to MainMenu when ready
            .add_systems(OnEnter(GameState::Loading), transition_to_main_menu)

            // Game flow driven by routed commands
            .add_systems(Update, handle_flow_commands)

            // Defeat ends the run
            .add_systems(Update, handle_player_depleted);
    }
}

/// Transition from Loading to MainMenu once startup work is done.
/// Data-file loading runs in the same state and warns on failure, so
/// there is nothing to wait for.
fn transition_to_main_menu(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
}

/// Drive the coarse game flow from semantic commands.
fn handle_flow_commands(
    mut commands: EventReader<Command>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for command in commands.read() {
        match (*command, *current_state.get()) {
            (Command::MenuConfirm, GameState::MainMenu) => next_state.set(GameState::InGame),
            (Command::MenuConfirm, GameState::GameOver) => next_state.set(GameState::MainMenu),
            (Command::Pause, GameState::InGame) => next_state.set(GameState::Paused),
            (Command::Resume, GameState::Paused) => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}

/// Both pools empty ends the run.
fn handle_player_depleted(
    mut depleted: EventReader<ActorDepleted>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in depleted.read() {
        info!("actor {:?} depleted, game over", event.actor);
        next_state.set(GameState::GameOver);
    }
}
