//! Darkling spawning - the periodic top-up cadence and one-shot waves.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::components::{AiState, AttackTimer, Darkling, DarklingStats, WaveMotion};
use super::data::DarklingRegistry;
use crate::player::{ActorState, Player};

/// Horizontal jitter for cadence spawns.
const SPAWN_JITTER_X: f32 = 30.0;
/// Cadence spawns appear this far above the player.
const SPAWN_HEIGHT: f32 = 50.0;
/// Row spacing within a wave.
const WAVE_DISTANCE: f32 = 20.0;
/// Enemies stacked per wave column.
const MAX_STACK_HEIGHT: u32 = 4;
/// Vertical spacing between stacked wave enemies.
const STACK_SPACING: f32 = 8.0;
/// Waves form this far ahead of the player.
const WAVE_LEAD: f32 = 240.0;

/// Placement function for a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePlacement {
    /// A sine path ahead of the player.
    SinePath,
    /// Staggered rows with stacked columns.
    StaggeredRows,
}

/// A one-shot batch of choreographed enemies.
#[derive(Debug, Clone, Copy)]
pub struct WaveSpawnPlan {
    pub count: u32,
    pub placement: WavePlacement,
}

impl WaveSpawnPlan {
    /// Spawn coordinates relative to the given origin.
    pub fn positions(&self, origin: Vec2) -> Vec<Vec2> {
        (0..self.count)
            .map(|i| match self.placement {
                WavePlacement::SinePath => Vec2::new(
                    origin.x + WAVE_LEAD + i as f32 * WAVE_DISTANCE,
                    origin.y + (i as f32 * 0.8).sin() * 24.0,
                ),
                WavePlacement::StaggeredRows => {
                    let row = i / MAX_STACK_HEIGHT;
                    let stack = i % MAX_STACK_HEIGHT;
                    Vec2::new(
                        origin.x + WAVE_LEAD + row as f32 * WAVE_DISTANCE,
                        origin.y + stack as f32 * STACK_SPACING,
                    )
                }
            })
            .collect()
    }
}

/// Request to spawn a wave; emitted locally or by the remote link.
#[derive(Event, Debug, Clone, Copy)]
pub struct SpawnWave {
    pub plan: WaveSpawnPlan,
}

/// Periodic top-up spawning.
#[derive(Resource)]
pub struct SpawnCadence {
    pub timer: Timer,
    /// Active darkling count the cadence tops up to.
    pub target: usize,
}

impl Default for SpawnCadence {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(3.0, TimerMode::Repeating),
            target: 5,
        }
    }
}

/// Spawn one darkling with stats from the registry (or defaults).
pub fn spawn_darkling(
    commands: &mut Commands,
    registry: &DarklingRegistry,
    position: Vec2,
    wave_index: Option<u32>,
) -> Entity {
    let (stats, elite) = match registry.get("darkling") {
        Some(definition) => (definition.to_stats(), definition.elite),
        None => (DarklingStats::default(), false),
    };

    // Expired at spawn so the first swing is cooldown-free.
    let mut timer = Timer::from_seconds(stats.attack_cooldown, TimerMode::Once);
    timer.tick(timer.duration());
    let cooldown = AttackTimer(timer);

    let mut entity = commands.spawn((
        Darkling::new(stats.max_hp, elite),
        stats,
        ActorState::default(),
        cooldown,
        Transform::from_translation(position.extend(0.0)),
    ));

    match wave_index {
        Some(index) => {
            entity.insert((AiState::Wave, WaveMotion { index }));
        }
        None => {
            entity.insert(AiState::Idle);
        }
    }
    entity.id()
}

/// Top the active darkling count up to the cadence target.
///
/// Dying darklings are already out of the fight and do not count.
pub fn spawn_on_cadence(
    mut commands: Commands,
    time: Res<Time>,
    mut cadence: ResMut<SpawnCadence>,
    registry: Res<DarklingRegistry>,
    player_query: Query<&Transform, With<Player>>,
    darklings: Query<&AiState, With<Darkling>>,
) {
    cadence.timer.tick(time.delta());
    if !cadence.timer.just_finished() {
        return;
    }

    let Ok(player_transform) = player_query.get_single() else {
        warn!("spawn cadence ticked without a player, skipping");
        return;
    };

    let active = darklings
        .iter()
        .filter(|state| **state != AiState::Dying)
        .count();
    let missing = cadence.target.saturating_sub(active);

    let mut rng = rand::thread_rng();
    let origin = player_transform.translation.truncate();
    for _ in 0..missing {
        let position = Vec2::new(
            origin.x + rng.gen_range(-SPAWN_JITTER_X..=SPAWN_JITTER_X),
            origin.y + SPAWN_HEIGHT,
        );
        spawn_darkling(&mut commands, &registry, position, None);
    }
}

/// Place a requested wave ahead of the player.
pub fn spawn_waves(
    mut commands: Commands,
    mut waves: EventReader<SpawnWave>,
    registry: Res<DarklingRegistry>,
    player_query: Query<&Transform, With<Player>>,
) {
    for wave in waves.read() {
        let Ok(player_transform) = player_query.get_single() else {
            warn!("wave requested without a player, skipping");
            continue;
        };

        let origin = player_transform.translation.truncate();
        for (index, position) in wave.plan.positions(origin).into_iter().enumerate() {
            spawn_darkling(&mut commands, &registry, position, Some(index as u32));
        }
    }
}

/// Tear down the enemy population at the end of a run.
pub fn despawn_darklings(mut commands: Commands, query: Query<Entity, With<Darkling>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_path_produces_one_position_per_enemy() {
        let plan = WaveSpawnPlan {
            count: 6,
            placement: WavePlacement::SinePath,
        };
        let positions = plan.positions(Vec2::ZERO);
        assert_eq!(positions.len(), 6);
        // All ahead of the origin, marching order preserved.
        assert!(positions.iter().all(|p| p.x >= WAVE_LEAD));
        assert!(positions.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn staggered_rows_wrap_after_the_stack_height() {
        let plan = WaveSpawnPlan {
            count: 5,
            placement: WavePlacement::StaggeredRows,
        };
        let positions = plan.positions(Vec2::ZERO);
        // First four stack vertically in one column.
        assert_eq!(positions[0].x, positions[3].x);
        assert!(positions[0].y < positions[3].y);
        // The fifth starts the next row.
        assert_eq!(positions[4].x, positions[0].x + WAVE_DISTANCE);
        assert_eq!(positions[4].y, positions[0].y);
    }
}
