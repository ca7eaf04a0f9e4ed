//! UI plugin - registers the HUD display adapters.

use bevy::prelude::*;

use super::hud;

/// UI plugin - display adapters over the core's health models.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
    }
}
