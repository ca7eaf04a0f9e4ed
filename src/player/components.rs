//! Player-related components: the shared actor state machine and the
//! bounded attack queue.

use bevy::prelude::*;

use crate::core::{AttackId, Facing};

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Action/state arbitration shared by the player and enemies.
///
/// The flags are not free-form: `rolling` and `transforming` are
/// exclusive locks - each is mutually exclusive with the other and with
/// `attacking`. A transition attempted while a lock is held is dropped,
/// which is policy, not an error. All other combinations are allowed.
#[derive(Component, Debug, Default)]
pub struct ActorState {
    pub running: bool,
    pub jumping: bool,
    pub falling: bool,
    pub dashing: bool,
    pub rolling: bool,
    pub attacking: bool,
    pub transforming: bool,
    /// Jumps taken since the last ground contact.
    pub jump_count: u32,
    pub facing: Facing,
}

impl ActorState {
    /// True while an exclusive lock is held.
    pub fn locked(&self) -> bool {
        self.rolling || self.transforming
    }

    /// RUN: allowed unless rolling or transforming.
    pub fn try_begin_run(&mut self, facing: Facing) -> bool {
        if self.locked() {
            return false;
        }
        self.running = true;
        self.facing = facing;
        true
    }

    pub fn end_run(&mut self) {
        self.running = false;
    }

    /// JUMP: allowed below the jump cap and outside exclusive locks.
    pub fn try_begin_jump(&mut self, max_jumps: u32) -> bool {
        if self.locked() || self.jump_count >= max_jumps {
            return false;
        }
        self.jump_count += 1;
        self.jumping = true;
        self.falling = false;
        true
    }

    /// Ground contact resets the jump cycle.
    pub fn land(&mut self) {
        self.jump_count = 0;
        self.jumping = false;
        self.falling = false;
    }

    /// DASH: allowed unless already dashing or rolling.
    pub fn try_begin_dash(&mut self) -> bool {
        if self.dashing || self.rolling {
            return false;
        }
        self.dashing = true;
        true
    }

    pub fn end_dash(&mut self) {
        self.dashing = false;
    }

    /// ROLL: allowed unless rolling or attacking.
    pub fn try_begin_roll(&mut self) -> bool {
        if self.rolling || self.attacking {
            return false;
        }
        self.rolling = true;
        true
    }

    pub fn end_roll(&mut self) {
        self.rolling = false;
    }

    /// ATTACK: dropped while an exclusive lock is held.
    pub fn try_begin_attack(&mut self) -> bool {
        if self.locked() {
            return false;
        }
        self.attacking = true;
        true
    }

    pub fn clear_attack(&mut self) {
        self.attacking = false;
    }

    /// TRANSFORM: allowed unless attacking or rolling.
    pub fn try_begin_transform(&mut self) -> bool {
        if self.attacking || self.rolling {
            return false;
        }
        self.transforming = true;
        true
    }

    pub fn end_transform(&mut self) {
        self.transforming = false;
    }

    /// Horizontal velocity intent in units per second.
    ///
    /// Non-zero iff `running`, except that an active dash or roll
    /// overrides the run intent with its own impulse.
    pub fn horizontal_intent(&self, config: &MoveConfig) -> f32 {
        if self.rolling {
            config.roll_speed * self.facing.sign()
        } else if self.dashing {
            config.dash_speed * self.facing.sign()
        } else if self.running {
            config.run_speed * self.facing.sign()
        } else {
            0.0
        }
    }
}

/// Bounded FIFO of pending attacks. Capacity 3; overflow is dropped,
/// not queued.
#[derive(Component, Debug, Default)]
pub struct AttackQueue {
    entries: Vec<AttackId>,
}

impl AttackQueue {
    pub const CAPACITY: usize = 3;

    /// Append an attack; a full queue drops the newest entry.
    pub fn enqueue(&mut self, attack: AttackId) -> bool {
        if self.entries.len() >= Self::CAPACITY {
            return false;
        }
        self.entries.push(attack);
        true
    }

    /// Pop the oldest pending attack.
    pub fn pop_next(&mut self) -> Option<AttackId> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    /// Forced clear - defeat, cleanup, roll interrupt.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Velocity and ground contact for the simple kinematic integrator.
#[derive(Component, Debug)]
pub struct Kinematics {
    pub velocity: Vec2,
    pub grounded: bool,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            grounded: true,
        }
    }
}

/// Movement tuning for the player.
#[derive(Resource)]
pub struct MoveConfig {
    /// Horizontal run speed in units per second
    pub run_speed: f32,
    /// Dash impulse speed
    pub dash_speed: f32,
    /// Roll impulse speed
    pub roll_speed: f32,
    /// Upward velocity applied on jump
    pub jump_velocity: f32,
    /// Gravity acceleration
    pub gravity: f32,
    /// Downward speed past which jumping flips to falling
    pub fall_threshold: f32,
    /// Ground plane height
    pub ground_y: f32,
    /// Jump cap between two ground contacts
    pub max_jumps: u32,
    /// Seconds from roll start to the internal recover signal
    pub roll_duration: f32,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            run_speed: 160.0,
            dash_speed: 260.0,
            roll_speed: 220.0,
            jump_velocity: 300.0,
            gravity: 300.0,
            fall_threshold: 50.0,
            ground_y: 0.0,
            max_jumps: 2,
            roll_duration: 0.9,
        }
    }
}
