//! Input plugin - registers the command event and the keyboard router.

use bevy::prelude::*;

use super::commands::Command;
use super::router::dispatch_keyboard;

/// Input plugin - turns raw key edges into semantic commands.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<Command>()
            // Present even without a window/input backend, so headless
            // hosts still run the router against an empty key set.
            .init_resource::<ButtonInput<KeyCode>>()
            // Routing runs unconditionally; the context decides what a
            // key means, so no run_if gating here.
            .add_systems(PreUpdate, dispatch_keyboard);
    }
}
