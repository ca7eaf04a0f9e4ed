//! In-game HUD - display adapters over the health models.
//!
//! Adapters hold a reference to the model and own no logic: the dual
//! bar reads the player's [`Resolve`], the boss bar reads a
//! [`CoarseHealth`]. There is no bar hierarchy - one model type, one
//! adapter per actor kind.

use bevy::prelude::*;

use crate::combat::{Boss, CoarseHealth, Resolve};
use crate::core::{Form, FormChanged, GameState};
use crate::player::Player;

/// Marker for HUD root entities.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the light pool fill.
#[derive(Component)]
pub struct LightBar;

/// Marker for the dark pool fill.
#[derive(Component)]
pub struct DarkBar;

/// Marker for the form crystal indicator.
#[derive(Component)]
pub struct FormCrystal;

/// Marker for the boss bar container.
#[derive(Component)]
pub struct BossBarRoot;

/// Marker for the boss bar fill.
#[derive(Component)]
pub struct BossBarFill;

const LIGHT_COLOR: Color = Color::srgb(0.95, 0.9, 0.7);
const DARK_COLOR: Color = Color::srgb(0.45, 0.2, 0.6);

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (update_pool_bars, update_form_crystal, update_boss_bar)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // Pool bars (top-left corner)
    commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            // Crystal showing the current form
            parent.spawn((
                Node {
                    width: Val::Px(16.0),
                    height: Val::Px(16.0),
                    margin: UiRect::bottom(Val::Px(4.0)),
                    ..default()
                },
                BackgroundColor(LIGHT_COLOR),
                FormCrystal,
            ));
            spawn_pool_bar(parent, Resolve::LIGHT_MAX, LIGHT_COLOR, LightBar);
            spawn_pool_bar(parent, Resolve::DARK_MAX, DARK_COLOR, DarkBar);
        });

    // Boss bar (top-center), hidden until a boss exists
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                position_type: PositionType::Absolute,
                top: Val::Px(20.0),
                ..default()
            },
            Visibility::Hidden,
            HudRoot,
            BossBarRoot,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(200.0),
                        height: Val::Px(10.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                ))
                .with_children(|bg| {
                    bg.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.7, 0.1, 0.1)),
                        BossBarFill,
                    ));
                });
        });
}

/// Helper to spawn one pool bar sized to its pool width.
fn spawn_pool_bar<M: Component>(parent: &mut ChildBuilder, width: u32, color: Color, marker: M) {
    parent
        .spawn((
            Node {
                width: Val::Px(width as f32 * 2.0),
                height: Val::Px(8.0),
                margin: UiRect::bottom(Val::Px(3.0)),
                ..default()
            },
            BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
        ))
        .with_children(|bg| {
            bg.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(color),
                marker,
            ));
        });
}

/// Mirror the resolve pools into the bar fills.
fn update_pool_bars(
    player_query: Query<&Resolve, With<Player>>,
    mut light_query: Query<&mut Node, (With<LightBar>, Without<DarkBar>)>,
    mut dark_query: Query<&mut Node, (With<DarkBar>, Without<LightBar>)>,
) {
    let Ok(resolve) = player_query.get_single() else {
        return;
    };
    if let Ok(mut bar) = light_query.get_single_mut() {
        bar.width = Val::Percent(resolve.light() as f32 / Resolve::LIGHT_MAX as f32 * 100.0);
    }
    if let Ok(mut bar) = dark_query.get_single_mut() {
        bar.width = Val::Percent(resolve.dark() as f32 / Resolve::DARK_MAX as f32 * 100.0);
    }
}

/// Swap the crystal tint when the form flips.
fn update_form_crystal(
    mut form_changed: EventReader<FormChanged>,
    mut query: Query<&mut BackgroundColor, With<FormCrystal>>,
) {
    for event in form_changed.read() {
        for mut color in query.iter_mut() {
            color.0 = match event.form {
                Form::Light => LIGHT_COLOR,
                Form::Dark => DARK_COLOR,
            };
        }
    }
}

/// Show and fill the boss bar while a boss is present.
fn update_boss_bar(
    boss_query: Query<&CoarseHealth, With<Boss>>,
    mut root_query: Query<&mut Visibility, With<BossBarRoot>>,
    mut fill_query: Query<&mut Node, With<BossBarFill>>,
) {
    let Ok(mut visibility) = root_query.get_single_mut() else {
        return;
    };

    match boss_query.get_single() {
        Ok(health) => {
            *visibility = Visibility::Inherited;
            if let Ok(mut fill) = fill_query.get_single_mut() {
                fill.width =
                    Val::Percent(health.value() as f32 / CoarseHealth::MAX as f32 * 100.0);
            }
        }
        Err(_) => {
            *visibility = Visibility::Hidden;
        }
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
