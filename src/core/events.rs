//! Global events used for cross-system communication.
//!
//! Events allow decoupled systems to communicate. For example, the
//! enemy AI sends DamageEvents, and the resolve system receives them to
//! drain the player's pools. The presentation layer subscribes to the
//! started/completed signals and is responsible for answering each
//! started action with a completion once its visible effect finishes.

use bevy::prelude::*;

/// The player's active form.
///
/// The form decides which resource pool drains first and which move-set
/// the actor state machine exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Form {
    #[default]
    Light,
    Dark,
}

impl Form {
    pub fn other(self) -> Self {
        match self {
            Form::Light => Form::Dark,
            Form::Dark => Form::Light,
        }
    }
}

/// Horizontal facing, shared by the player and enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Unit sign along the x axis.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Identifier for one of the three combo attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackId {
    Attack1,
    Attack2,
    Attack3,
}

/// A logical action the core can request from an actor.
///
/// The presentation layer plays whatever is visible for the action and
/// reports back with [`ActionCompleted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Roll,
    /// Recovery pose after a roll or a drained attack queue.
    Recover,
    Attack(AttackId),
    /// First transform phase - the wind-up before the form swap.
    TransformWindUp,
    /// Second transform phase - settling into the new form.
    TransformResolve,
    /// An enemy vanishing before it repositions.
    Disappear,
    /// An enemy reappearing near the player.
    Reappear,
}

/// Sent when the core starts a logical action on an actor.
#[derive(Event, Debug, Clone, Copy)]
pub struct ActionStarted {
    pub actor: Entity,
    pub action: ActionKind,
}

/// Sent by the presentation layer (or a timer standing in for it) when
/// the visible effect of an action has finished.
///
/// The core chains on these: attack-queue advance, transform phase
/// advance, reposition cycle advance.
#[derive(Event, Debug, Clone, Copy)]
pub struct ActionCompleted {
    pub actor: Entity,
    pub action: ActionKind,
}

/// Sent when an actor's form flips between light and dark.
#[derive(Event, Debug, Clone, Copy)]
pub struct FormChanged {
    pub actor: Entity,
    pub form: Form,
}

/// Request to transform an actor into the given form.
///
/// Emitted by the resolve model (automatic flips) and by the TRANSFORM
/// command. Requesting the form the actor is already in is a no-op.
#[derive(Event, Debug, Clone, Copy)]
pub struct TransformRequest {
    pub actor: Entity,
    pub form: Form,
}

/// Sent when an entity takes damage.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    /// Damage amount
    pub amount: u32,
}

/// Sent once when the player's light pool reaches zero.
#[derive(Event, Debug, Clone, Copy)]
pub struct ResourceDepleted {
    pub actor: Entity,
}

/// Sent once when the light pool climbs back over the refill threshold
/// while the actor is in dark form.
#[derive(Event, Debug, Clone, Copy)]
pub struct ResourceRestored {
    pub actor: Entity,
}

/// Sent when both pools are empty - the defeat condition.
#[derive(Event, Debug, Clone, Copy)]
pub struct ActorDepleted {
    pub actor: Entity,
}

/// Sent once when a darkling's hp reaches zero.
#[derive(Event, Debug, Clone, Copy)]
pub struct DarklingDefeated {
    pub entity: Entity,
    /// Elites drop a richer reward.
    pub elite: bool,
}

/// Visual cue for the presentation layer: flicker the damaged actor
/// for the duration of its invulnerability window.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageFlicker {
    pub target: Entity,
    pub duration_secs: f32,
}
