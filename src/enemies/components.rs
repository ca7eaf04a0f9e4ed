//! Enemy-related components.

use bevy::prelude::*;

/// The darkling enemy - hp, elite flag, and vulnerability.
#[derive(Component, Debug)]
pub struct Darkling {
    hp: u32,
    pub elite: bool,
}

impl Default for Darkling {
    fn default() -> Self {
        Self {
            hp: 200,
            elite: false,
        }
    }
}

impl Darkling {
    pub fn new(hp: u32, elite: bool) -> Self {
        Self { hp, elite }
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    /// Eligible to take damage while any hp remains.
    pub fn vulnerable(&self) -> bool {
        self.hp > 0
    }

    /// Apply damage; returns true when this hit emptied the pool.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.hp == 0 {
            return false;
        }
        self.hp = self.hp.saturating_sub(amount);
        self.hp == 0
    }
}

/// AI sub-state machine for darkling behavior.
#[derive(Component, Default, PartialEq, Clone, Copy, Debug)]
pub enum AiState {
    /// Marching in a choreographed wave toward the player.
    Wave,
    /// Waiting; decisions resume on the next AI tick.
    #[default]
    Idle,
    /// Moving toward the player.
    Chase,
    /// In attack range, swinging on cooldown.
    Attack,
    /// Too far away - running the disappear/reappear cycle.
    Reposition,
    /// Defeated, waiting out the removal sequence.
    Dying,
}

/// Per-enemy cooldown between attacks.
#[derive(Component)]
pub struct AttackTimer(pub Timer);

impl Default for AttackTimer {
    fn default() -> Self {
        let mut timer = Timer::from_seconds(1.5, TimerMode::Once);
        // Expired at spawn so the first swing is not delayed.
        timer.tick(timer.duration());
        Self(timer)
    }
}

/// Removal delay after defeat.
#[derive(Component)]
pub struct DeathTimer(pub Timer);

impl Default for DeathTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(2.0, TimerMode::Once))
    }
}

/// Index within a spawned wave, for staggered motion.
#[derive(Component, Debug, Clone, Copy)]
pub struct WaveMotion {
    pub index: u32,
}

/// Phase of the out-of-range reposition cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositionPhase {
    Disappear,
    Reappear,
}

/// Running disappear/reappear cycle. Present only while repositioning,
/// which is what makes the threshold crossing edge-triggered.
#[derive(Component)]
pub struct RepositionCycle {
    pub phase: RepositionPhase,
    pub timer: Timer,
}

impl RepositionCycle {
    pub fn start() -> Self {
        Self {
            phase: RepositionPhase::Disappear,
            timer: Timer::from_seconds(0.8, TimerMode::Once),
        }
    }

    pub fn reappear(&mut self) {
        self.phase = RepositionPhase::Reappear;
        self.timer = Timer::from_seconds(0.6, TimerMode::Once);
    }
}

/// Darkling stats, resolved from the data registry at spawn time.
#[derive(Component, Clone)]
pub struct DarklingStats {
    pub max_hp: u32,
    pub damage: u32,
    pub move_speed: f32,
    pub chase_distance: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
}

impl Default for DarklingStats {
    fn default() -> Self {
        Self {
            max_hp: 200,
            damage: 10,
            move_speed: 100.0,
            chase_distance: 160.0,
            attack_range: 60.0,
            attack_cooldown: 1.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darkling_survives_seven_hits_and_falls_on_nine() {
        let mut darkling = Darkling::default();
        for _ in 0..7 {
            assert!(!darkling.take_damage(20));
        }
        assert_eq!(darkling.hp(), 60);
        assert!(darkling.vulnerable());

        assert!(!darkling.take_damage(20));
        // The ninth hit lands exactly on zero and reports once.
        assert!(darkling.take_damage(20));
        assert_eq!(darkling.hp(), 0);
        assert!(!darkling.vulnerable());
        assert!(!darkling.take_damage(20));
    }
}
