//! UI module - HUD display adapters.

mod hud;
mod plugin;

pub use hud::{BossBarFill, BossBarRoot, DarkBar, FormCrystal, HudRoot, LightBar};
pub use plugin::UiPlugin;
