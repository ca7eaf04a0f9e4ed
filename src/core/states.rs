//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example,
//! the actor state machine only runs in the InGame state, while menu
//! commands are only routed in the MainMenu state.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// The game transitions between these states based on player actions:
/// - Start in `Loading` while data files are read
/// - Move to `MainMenu` when loading completes
/// - Enter `InGame` when the player confirms
/// - `Paused` freezes gameplay but keeps the world visible
/// - `GameOver` when the player's dark pool empties
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Main menu / title screen
    MainMenu,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
    /// Player has been depleted
    GameOver,
}

/// Sub-states for gameplay - only active when GameState::InGame.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Normal gameplay - movement and combat
    #[default]
    Exploring,
    /// A scripted sequence is playing; gameplay commands are not routed
    Cutscene,
}
