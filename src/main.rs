//! Nocturne - Entry Point
//!
//! A 2D action platformer with a light/dark transform mechanic.
//!
//! Controls:
//! - Arrow keys: Run
//! - Space: Jump
//! - Q: Dash, R: Roll (release to recover)
//! - Z/X/C: Attacks, F: Transform
//! - Escape: Pause/Unpause

use bevy::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Nocturne".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Our game plugin
        .add_plugins(nocturne::NocturnePlugin)

        .run();
}
