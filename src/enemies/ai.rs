//! Darkling AI behavior systems.
//!
//! Decisions run on a fixed 100 ms tick; continuous motion (wave march,
//! reposition phases, cooldowns) advances every frame. Attacks are
//! cooldown-gated: the per-enemy timer alone decides when the next
//! swing lands, and the player's invulnerability window decides whether
//! it hurts.

use bevy::prelude::*;
use rand::Rng;

use super::components::*;
use crate::core::{
    ActionCompleted, ActionKind, ActionStarted, AttackId, DamageEvent, DarklingDefeated, Facing,
};
use crate::player::{ActorState, Player};

/// Seconds between AI decision ticks.
pub const AI_TICK_SECS: f32 = 0.1;
/// Horizontal jitter when a darkling reappears near the player.
const REPOSITION_JITTER_X: f32 = 50.0;
/// Wave march speed toward the player.
const WAVE_MARCH_SPEED: f32 = 150.0;

/// Repeating timer driving the decision tick.
#[derive(Resource)]
pub struct AiTickTimer(pub Timer);

impl Default for AiTickTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(AI_TICK_SECS, TimerMode::Repeating))
    }
}

/// Per-enemy decision tick: reposition, attack, or chase.
pub fn ai_tick(
    mut commands: Commands,
    time: Res<Time>,
    mut tick: ResMut<AiTickTimer>,
    player_query: Query<(Entity, &Transform), (With<Player>, Without<Darkling>)>,
    mut enemy_query: Query<
        (
            Entity,
            &mut Transform,
            &DarklingStats,
            &mut AiState,
            &mut AttackTimer,
            &mut ActorState,
        ),
        (With<Darkling>, Without<Player>, Without<RepositionCycle>),
    >,
    mut started: EventWriter<ActionStarted>,
    mut damage: EventWriter<DamageEvent>,
) {
    tick.0.tick(time.delta());
    if !tick.0.just_finished() {
        return;
    }

    let Ok((player_entity, player_transform)) = player_query.get_single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (entity, mut transform, stats, mut ai_state, mut cooldown, mut actor) in
        enemy_query.iter_mut()
    {
        if *ai_state == AiState::Dying {
            continue;
        }

        let enemy_pos = transform.translation.truncate();
        let to_player = player_pos - enemy_pos;
        let distance = to_player.length();
        actor.facing = if to_player.x < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        };

        // Wave enemies march until they close in, then join the pack.
        if *ai_state == AiState::Wave {
            if distance <= stats.chase_distance {
                *ai_state = AiState::Idle;
                commands.entity(entity).remove::<WaveMotion>();
            }
            continue;
        }

        if distance > stats.chase_distance {
            // Out of range: one disappear/reappear cycle, not a chase.
            // Entering the Reposition state is the edge trigger; the
            // cycle component excludes this enemy from further ticks.
            *ai_state = AiState::Reposition;
            actor.clear_attack();
            commands.entity(entity).insert(RepositionCycle::start());
            started.send(ActionStarted {
                actor: entity,
                action: ActionKind::Disappear,
            });
        } else if distance <= stats.attack_range {
            *ai_state = AiState::Attack;
            if cooldown.0.finished() {
                cooldown.0.reset();
                actor.try_begin_attack();
                started.send(ActionStarted {
                    actor: entity,
                    action: ActionKind::Attack(AttackId::Attack1),
                });
                damage.send(DamageEvent {
                    target: player_entity,
                    source: entity,
                    amount: stats.damage,
                });
            }
        } else {
            *ai_state = AiState::Chase;
            let step = to_player.normalize_or_zero() * stats.move_speed * AI_TICK_SECS;
            transform.translation += step.extend(0.0);
        }
    }
}

/// Advance per-enemy attack cooldowns.
pub fn tick_attack_cooldowns(time: Res<Time>, mut query: Query<&mut AttackTimer>) {
    for mut cooldown in query.iter_mut() {
        cooldown.0.tick(time.delta());
    }
}

/// Clear the attacking flag once the presentation layer finishes the swing.
pub fn finish_enemy_attacks(
    mut completed: EventReader<ActionCompleted>,
    mut query: Query<&mut ActorState, With<Darkling>>,
) {
    for event in completed.read() {
        if !matches!(event.action, ActionKind::Attack(_)) {
            continue;
        }
        if let Ok(mut actor) = query.get_mut(event.actor) {
            actor.clear_attack();
        }
    }
}

/// Run the disappear/reappear phases of a reposition cycle.
pub fn run_reposition_cycles(
    mut commands: Commands,
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<Darkling>)>,
    mut query: Query<
        (Entity, &mut Transform, &mut AiState, &mut RepositionCycle),
        With<Darkling>,
    >,
    mut started: EventWriter<ActionStarted>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let player_pos = player_transform.translation;

    let mut rng = rand::thread_rng();
    for (entity, mut transform, mut ai_state, mut cycle) in query.iter_mut() {
        cycle.timer.tick(time.delta());
        if !cycle.timer.finished() {
            continue;
        }

        match cycle.phase {
            RepositionPhase::Disappear => {
                transform.translation.x =
                    player_pos.x + rng.gen_range(-REPOSITION_JITTER_X..=REPOSITION_JITTER_X);
                transform.translation.y = player_pos.y;
                cycle.reappear();
                started.send(ActionStarted {
                    actor: entity,
                    action: ActionKind::Reappear,
                });
            }
            RepositionPhase::Reappear => {
                commands.entity(entity).remove::<RepositionCycle>();
                *ai_state = AiState::Idle;
            }
        }
    }
}

/// March wave enemies toward the player with a staggered bob.
pub fn wave_march(
    time: Res<Time>,
    mut query: Query<(&WaveMotion, &mut Transform), With<Darkling>>,
) {
    let dt = time.delta_secs();
    let elapsed = time.elapsed_secs();
    for (motion, mut transform) in query.iter_mut() {
        transform.translation.x -= WAVE_MARCH_SPEED * dt;
        transform.translation.y +=
            (elapsed * 2.0 + motion.index as f32 * 0.5).sin() * 10.0 * dt;
    }
}

/// Start the removal sequence for defeated darklings.
pub fn handle_darkling_death(
    mut commands: Commands,
    mut defeated: EventReader<DarklingDefeated>,
    mut query: Query<(&mut AiState, &mut ActorState), With<Darkling>>,
) {
    for event in defeated.read() {
        let Ok((mut ai_state, mut actor)) = query.get_mut(event.entity) else {
            continue;
        };
        if *ai_state != AiState::Dying {
            *ai_state = AiState::Dying;
            actor.clear_attack();
            commands.entity(event.entity).insert(DeathTimer::default());
        }
    }
}

/// Despawn darklings once their removal sequence has played out.
pub fn despawn_dead_darklings(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DeathTimer)>,
) {
    for (entity, mut death_timer) in query.iter_mut() {
        death_timer.0.tick(time.delta());
        if death_timer.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
