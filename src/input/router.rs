//! Maps raw key presses and releases to semantic commands.
//!
//! The mapping itself is a pure function of (key, edge, context), which
//! keeps it trivially testable; the dispatch system is a thin shell
//! that derives the active context from the current game state and
//! feeds every key edge of the frame through the table.

use bevy::prelude::*;

use super::commands::{Command, InputContext};
use crate::core::{AttackId, Facing, GameState};

/// Route one key edge through the command table.
///
/// `pressed` is true for a key-down edge, false for key-up. Keys with
/// no meaning in the given context yield `None`.
pub fn route(key: KeyCode, pressed: bool, context: InputContext) -> Option<Command> {
    match context {
        InputContext::Menu => match (key, pressed) {
            (KeyCode::Enter, true) => Some(Command::MenuConfirm),
            (KeyCode::ArrowUp, true) => Some(Command::MenuUp),
            (KeyCode::ArrowDown, true) => Some(Command::MenuDown),
            _ => None,
        },
        InputContext::Paused => match (key, pressed) {
            (KeyCode::Escape, true) => Some(Command::Resume),
            _ => None,
        },
        InputContext::Gameplay => match (key, pressed) {
            (KeyCode::Escape, true) => Some(Command::Pause),
            (KeyCode::ArrowLeft, true) => Some(Command::Run(Facing::Left)),
            (KeyCode::ArrowRight, true) => Some(Command::Run(Facing::Right)),
            (KeyCode::ArrowLeft, false) | (KeyCode::ArrowRight, false) => {
                Some(Command::RunRelease)
            }
            (KeyCode::Space, true) => Some(Command::Jump),
            (KeyCode::Space, false) => Some(Command::JumpRelease),
            (KeyCode::KeyQ, true) => Some(Command::Dash),
            (KeyCode::KeyQ, false) => Some(Command::DashRelease),
            (KeyCode::KeyR, true) => Some(Command::Roll),
            (KeyCode::KeyR, false) => Some(Command::Recover),
            (KeyCode::KeyZ, true) => Some(Command::Attack(AttackId::Attack1)),
            (KeyCode::KeyX, true) => Some(Command::Attack(AttackId::Attack2)),
            (KeyCode::KeyC, true) => Some(Command::Attack(AttackId::Attack3)),
            (KeyCode::KeyF, true) => Some(Command::Transform),
            _ => None,
        },
    }
}

/// The context a game state routes under.
pub fn context_for(state: GameState) -> Option<InputContext> {
    match state {
        GameState::MainMenu | GameState::GameOver => Some(InputContext::Menu),
        GameState::InGame => Some(InputContext::Gameplay),
        GameState::Paused => Some(InputContext::Paused),
        // Nothing is routed while loading.
        GameState::Loading => None,
    }
}

/// Dispatch all key edges of this frame as semantic commands.
pub fn dispatch_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut commands: EventWriter<Command>,
) {
    let Some(context) = context_for(*state.get()) else {
        return;
    };

    for key in keyboard.get_just_pressed() {
        if let Some(command) = route(*key, true, context) {
            commands.send(command);
        }
    }
    for key in keyboard.get_just_released() {
        if let Some(command) = route(*key, false, context) {
            commands.send(command);
        }
    }
}
