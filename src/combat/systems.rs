//! Combat systems - strike resolution, damage application, pickups.

use bevy::prelude::*;
use rand::Rng;

use super::components::*;
use crate::core::{
    ActorDepleted, DamageEvent, DamageFlicker, DarklingDefeated, Form, GameState,
    ResourceDepleted, ResourceRestored, TransformRequest,
};
use crate::enemies::Darkling;
use crate::player::Player;

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Strikes,
    Damage,
    Rewards,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.init_resource::<CombatConfig>()
        .add_event::<Strike>()
        .configure_sets(
            Update,
            (CombatSet::Strikes, CombatSet::Damage, CombatSet::Rewards)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(Update, resolve_strikes.in_set(CombatSet::Strikes))
        .add_systems(
            Update,
            (apply_damage, tick_invulnerability).in_set(CombatSet::Damage),
        )
        .add_systems(
            Update,
            (spawn_reward_pickups, collect_pickups).in_set(CombatSet::Rewards),
        );
}

/// Resolve the player's strikes against the live darklings.
///
/// Resolution is a discrete proximity check at queue-advance time, not
/// continuous hit-testing: every vulnerable darkling within strike
/// range takes the hit.
fn resolve_strikes(
    mut strikes: EventReader<Strike>,
    config: Res<CombatConfig>,
    player_query: Query<&Transform, With<Player>>,
    mut darkling_query: Query<(Entity, &Transform, &mut Darkling)>,
    mut defeated: EventWriter<DarklingDefeated>,
) {
    for strike in strikes.read() {
        let Ok(player_transform) = player_query.get(strike.attacker) else {
            warn!("strike from unknown attacker {:?}, skipping", strike.attacker);
            continue;
        };

        let damage = config.attack_damage(strike.attack);
        for (entity, transform, mut darkling) in darkling_query.iter_mut() {
            if !darkling.vulnerable() {
                continue;
            }
            let distance = transform
                .translation
                .truncate()
                .distance(player_transform.translation.truncate());
            if distance > config.strike_range {
                continue;
            }
            if darkling.take_damage(damage) {
                defeated.send(DarklingDefeated {
                    entity,
                    elite: darkling.elite,
                });
            }
        }
    }
}

/// Apply damage events to whatever health model the target carries.
///
/// The player's dual pool gates on its invulnerability window and
/// emits the depletion/transform chain; simple actors just clamp their
/// coarse gauge. A target with neither model is a wiring gap - warn
/// and continue.
fn apply_damage(
    config: Res<CombatConfig>,
    mut damage_events: EventReader<DamageEvent>,
    mut resolve_query: Query<(&mut Resolve, &mut Invulnerability)>,
    mut coarse_query: Query<&mut CoarseHealth>,
    mut depleted: EventWriter<ResourceDepleted>,
    mut actor_depleted: EventWriter<ActorDepleted>,
    mut transform_requests: EventWriter<TransformRequest>,
    mut flicker: EventWriter<DamageFlicker>,
) {
    for event in damage_events.read() {
        if let Ok((mut resolve, mut invuln)) = resolve_query.get_mut(event.target) {
            if invuln.active() {
                continue;
            }

            let outcome = resolve.apply_damage(event.amount);
            invuln.trigger(config.invuln_window_secs);
            flicker.send(DamageFlicker {
                target: event.target,
                duration_secs: config.invuln_window_secs,
            });

            if outcome.light_depleted {
                depleted.send(ResourceDepleted {
                    actor: event.target,
                });
                transform_requests.send(TransformRequest {
                    actor: event.target,
                    form: Form::Dark,
                });
            }
            if outcome.actor_depleted {
                actor_depleted.send(ActorDepleted {
                    actor: event.target,
                });
            }
        } else if let Ok(mut coarse) = coarse_query.get_mut(event.target) {
            let reduced = coarse.value().saturating_sub(event.amount);
            coarse.set_value(reduced);
        } else {
            warn!(
                "damage for {:?} but no health model attached, dropping",
                event.target
            );
        }
    }
}

/// Tick down active invulnerability windows.
fn tick_invulnerability(time: Res<Time>, mut query: Query<&mut Invulnerability>) {
    for mut invuln in query.iter_mut() {
        invuln.tick(time.delta());
    }
}

/// Spawn reward pickups where a darkling fell.
fn spawn_reward_pickups(
    mut commands: Commands,
    config: Res<CombatConfig>,
    mut defeated: EventReader<DarklingDefeated>,
    transforms: Query<&Transform>,
) {
    let mut rng = rand::thread_rng();
    for event in defeated.read() {
        let Ok(origin) = transforms.get(event.entity) else {
            warn!("defeated darkling {:?} has no transform, no reward", event.entity);
            continue;
        };

        let (large, small): (usize, usize) = if event.elite { (2, 1) } else { (1, 1) };
        let worths = std::iter::repeat(config.large_orb_worth)
            .take(large)
            .chain(std::iter::repeat(config.small_orb_worth).take(small));
        for worth in worths {
            let offset = Vec3::new(
                rng.gen_range(-10.0..=10.0),
                rng.gen_range(-10.0..=10.0),
                0.0,
            );
            commands.spawn((
                Pickup { worth },
                Transform::from_translation(origin.translation + offset),
            ));
        }
    }
}

/// Collect pickups on player overlap and feed them to the resolve model.
fn collect_pickups(
    mut commands: Commands,
    config: Res<CombatConfig>,
    mut player_query: Query<(Entity, &Transform, &mut Resolve), With<Player>>,
    pickups: Query<(Entity, &Transform, &Pickup)>,
    mut restored: EventWriter<ResourceRestored>,
    mut transform_requests: EventWriter<TransformRequest>,
) {
    let Ok((player, player_transform, mut resolve)) = player_query.get_single_mut() else {
        return;
    };

    for (entity, transform, pickup) in pickups.iter() {
        let distance = transform
            .translation
            .truncate()
            .distance(player_transform.translation.truncate());
        if distance > config.pickup_radius {
            continue;
        }

        let outcome = resolve.collect(pickup.worth);
        commands.entity(entity).despawn();

        if outcome.restored {
            restored.send(ResourceRestored { actor: player });
            transform_requests.send(TransformRequest {
                actor: player,
                form: Form::Light,
            });
        }
    }
}
