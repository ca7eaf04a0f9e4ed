//! Player action systems - command handling, transform phases, attack
//! queue advance, and the kinematic integrator.
//!
//! Transitions never touch animation or audio; they flip state flags
//! and emit started/completed signals. Anything that takes visible time
//! chains on an [`ActionCompleted`] from the presentation layer, except
//! the roll recover signal, which is a deferred event owned by the core.

use bevy::prelude::*;

use super::components::*;
use crate::combat::{Resolve, Strike};
use crate::core::{
    ActionCompleted, ActionKind, ActionStarted, ActorDepleted, Deferred, FormChanged,
    TransformRequest,
};
use crate::input::Command;

/// Internal signal that ends a roll after the recovery delay.
///
/// Deferred rather than called back directly: the roll transition
/// schedules it and keeps going, and the RECOVER input command feeds
/// the same path.
#[derive(Event, Debug, Clone, Copy)]
pub struct RecoverSignal {
    pub actor: Entity,
}

/// In-flight transform - records which form the wind-up resolves into.
#[derive(Component, Debug)]
pub struct Transforming {
    pub target: crate::core::Form,
}

/// Apply this frame's semantic commands to the player's state machine.
pub fn apply_commands(
    mut commands: Commands,
    mut reader: EventReader<Command>,
    config: Res<MoveConfig>,
    mut player_query: Query<
        (Entity, &mut ActorState, &mut AttackQueue, &mut Kinematics, &Resolve),
        With<Player>,
    >,
    mut started: EventWriter<ActionStarted>,
    mut strikes: EventWriter<Strike>,
    mut transform_requests: EventWriter<TransformRequest>,
    mut recover: EventWriter<RecoverSignal>,
) {
    let Ok((entity, mut state, mut queue, mut kinematics, resolve)) =
        player_query.get_single_mut()
    else {
        // Player not spawned yet - commands are dropped, not queued.
        return;
    };

    for command in reader.read() {
        match *command {
            Command::Run(facing) => {
                state.try_begin_run(facing);
            }
            Command::RunRelease => {
                if !state.locked() {
                    state.end_run();
                }
            }
            Command::Jump => {
                if state.try_begin_jump(config.max_jumps) {
                    kinematics.velocity.y = config.jump_velocity;
                    kinematics.grounded = false;
                }
            }
            // Reserved for variable jump height; no semantics yet.
            Command::JumpRelease => {}
            Command::Dash => {
                state.try_begin_dash();
            }
            Command::DashRelease => {
                state.end_dash();
            }
            Command::Roll => {
                if state.try_begin_roll() {
                    started.send(ActionStarted {
                        actor: entity,
                        action: ActionKind::Roll,
                    });
                    commands.spawn(Deferred::new(
                        config.roll_duration,
                        RecoverSignal { actor: entity },
                    ));
                }
            }
            Command::Recover => {
                recover.send(RecoverSignal { actor: entity });
            }
            Command::Attack(id) => {
                if state.locked() {
                    // Dropped, not queued, while roll/transform holds the lock.
                    continue;
                }
                queue.enqueue(id);
                if !state.attacking {
                    if let Some(next) = queue.pop_next() {
                        state.attacking = true;
                        started.send(ActionStarted {
                            actor: entity,
                            action: ActionKind::Attack(next),
                        });
                        strikes.send(Strike {
                            attacker: entity,
                            attack: next,
                        });
                    }
                }
            }
            Command::Transform => {
                transform_requests.send(TransformRequest {
                    actor: entity,
                    form: resolve.form().other(),
                });
            }
            // Flow commands are handled by the core plugin.
            Command::Pause | Command::Resume | Command::MenuConfirm | Command::MenuUp
            | Command::MenuDown => {}
        }
    }
}

/// Begin the two-phase transform for accepted requests.
///
/// Requests for the current form are no-ops, and the attack/roll guard
/// drops the rest silently.
pub fn begin_transforms(
    mut commands: Commands,
    mut requests: EventReader<TransformRequest>,
    mut query: Query<(&mut ActorState, &Resolve)>,
    mut started: EventWriter<ActionStarted>,
) {
    for request in requests.read() {
        let Ok((mut state, resolve)) = query.get_mut(request.actor) else {
            continue;
        };
        if resolve.form() == request.form || state.transforming {
            continue;
        }
        if state.try_begin_transform() {
            commands.entity(request.actor).insert(Transforming {
                target: request.form,
            });
            started.send(ActionStarted {
                actor: request.actor,
                action: ActionKind::TransformWindUp,
            });
        }
    }
}

/// Advance transform phases as the presentation layer reports back.
///
/// Wind-up completion swaps the form and its move-set; resolve
/// completion releases the lock.
pub fn advance_transforms(
    mut commands: Commands,
    mut completed: EventReader<ActionCompleted>,
    mut query: Query<(&mut ActorState, &mut Resolve, &Transforming)>,
    mut started: EventWriter<ActionStarted>,
    mut form_changed: EventWriter<FormChanged>,
) {
    for event in completed.read() {
        let Ok((mut state, mut resolve, transforming)) = query.get_mut(event.actor) else {
            continue;
        };
        match event.action {
            ActionKind::TransformWindUp => {
                resolve.set_form(transforming.target);
                form_changed.send(FormChanged {
                    actor: event.actor,
                    form: transforming.target,
                });
                started.send(ActionStarted {
                    actor: event.actor,
                    action: ActionKind::TransformResolve,
                });
            }
            ActionKind::TransformResolve => {
                state.end_transform();
                commands.entity(event.actor).remove::<Transforming>();
            }
            _ => {}
        }
    }
}

/// End a roll when its recover signal lands.
pub fn finish_rolls(
    mut signals: EventReader<RecoverSignal>,
    mut query: Query<&mut ActorState>,
    mut started: EventWriter<ActionStarted>,
) {
    for signal in signals.read() {
        let Ok(mut state) = query.get_mut(signal.actor) else {
            continue;
        };
        if state.rolling {
            state.end_roll();
            started.send(ActionStarted {
                actor: signal.actor,
                action: ActionKind::Recover,
            });
        }
    }
}

/// Advance the attack queue when the presentation layer finishes a swing.
///
/// Continues straight into the next queued attack unless the actor is
/// roll-locked; a drained queue drops `attacking` and requests the
/// recovery pose.
pub fn advance_attack_queue(
    mut completed: EventReader<ActionCompleted>,
    mut query: Query<(&mut ActorState, &mut AttackQueue)>,
    mut started: EventWriter<ActionStarted>,
    mut strikes: EventWriter<Strike>,
) {
    for event in completed.read() {
        if !matches!(event.action, ActionKind::Attack(_)) {
            continue;
        }
        let Ok((mut state, mut queue)) = query.get_mut(event.actor) else {
            continue;
        };
        match (!state.rolling).then(|| queue.pop_next()).flatten() {
            Some(next) => {
                state.attacking = true;
                started.send(ActionStarted {
                    actor: event.actor,
                    action: ActionKind::Attack(next),
                });
                strikes.send(Strike {
                    attacker: event.actor,
                    attack: next,
                });
            }
            None => {
                state.clear_attack();
                started.send(ActionStarted {
                    actor: event.actor,
                    action: ActionKind::Recover,
                });
            }
        }
    }
}

/// Forced clear on defeat - empties the queue and drops `attacking`
/// unconditionally.
pub fn clear_on_depleted(
    mut depleted: EventReader<ActorDepleted>,
    mut query: Query<(&mut ActorState, &mut AttackQueue)>,
) {
    for event in depleted.read() {
        if let Ok((mut state, mut queue)) = query.get_mut(event.actor) {
            queue.clear();
            state.clear_attack();
        }
    }
}

/// Simple kinematic integrator - gravity, velocity intent, ground clamp.
pub fn integrate_motion(
    time: Res<Time>,
    config: Res<MoveConfig>,
    mut query: Query<(&ActorState, &mut Kinematics, &mut Transform), With<Player>>,
) {
    let dt = time.delta_secs();
    for (state, mut kinematics, mut transform) in query.iter_mut() {
        kinematics.velocity.x = state.horizontal_intent(&config);
        if !kinematics.grounded {
            kinematics.velocity.y -= config.gravity * dt;
        }

        transform.translation.x += kinematics.velocity.x * dt;
        transform.translation.y += kinematics.velocity.y * dt;

        if transform.translation.y <= config.ground_y {
            transform.translation.y = config.ground_y;
            if kinematics.velocity.y < 0.0 {
                kinematics.velocity.y = 0.0;
            }
            kinematics.grounded = true;
        } else {
            kinematics.grounded = false;
        }
    }
}

/// Observe vertical motion and ground contact.
///
/// Falling past the threshold flips jumping to falling; ground contact
/// resets the jump cycle.
pub fn fall_and_landing(
    config: Res<MoveConfig>,
    mut query: Query<(&mut ActorState, &Kinematics)>,
) {
    for (mut state, kinematics) in query.iter_mut() {
        if state.jumping && kinematics.velocity.y < -config.fall_threshold {
            state.jumping = false;
            state.falling = true;
        }
        if kinematics.grounded && (state.jumping || state.falling || state.jump_count > 0) {
            state.land();
        }
    }
}
