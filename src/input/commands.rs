//! Semantic input commands and routing contexts.

use bevy::prelude::*;

use crate::core::{AttackId, Facing};

/// A semantic input event, produced by the router and consumed by
/// whoever subscribes to it (actor state machine, game flow, menus).
///
/// Commands carry intent, not keys: the same command can come from the
/// keyboard, a menu button, or the remote link.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Run(Facing),
    RunRelease,
    Jump,
    JumpRelease,
    Dash,
    DashRelease,
    Roll,
    /// Recover from a roll - emitted on key release.
    Recover,
    Attack(AttackId),
    Transform,
    Pause,
    Resume,
    MenuConfirm,
    MenuUp,
    MenuDown,
}

/// Which command set is currently legal.
///
/// The context is derived from the active game state and passed to the
/// router explicitly on every dispatch - there is no global selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    Menu,
    Gameplay,
    Paused,
}
