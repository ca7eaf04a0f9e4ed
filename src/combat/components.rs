//! Combat-related components: the dual-pool resolve model, the coarse
//! 0-100 gauge, invulnerability windows, and pickups.

use bevy::prelude::*;

use crate::core::{AttackId, Form};

/// Outcome flags from one damage application to a [`Resolve`].
///
/// Each flag is true only on the application that crossed the boundary,
/// so callers can emit the matching event exactly once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    /// The light pool just reached zero.
    pub light_depleted: bool,
    /// Both pools are now empty - the defeat condition.
    pub actor_depleted: bool,
}

/// Outcome flags from one resource collection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectOutcome {
    /// The light pool just climbed over the refill threshold while the
    /// actor was in dark form.
    pub restored: bool,
}

/// The player's dual-pool life/transform model.
///
/// Exactly one pool drains at a time: dark only starts draining once
/// light is fully exhausted. The pools never exceed their widths and
/// never go below zero.
#[derive(Component, Debug, Clone)]
pub struct Resolve {
    light: u32,
    dark: u32,
    form: Form,
}

impl Default for Resolve {
    fn default() -> Self {
        Self {
            light: Self::LIGHT_MAX,
            dark: Self::DARK_MAX,
            form: Form::Light,
        }
    }
}

impl Resolve {
    pub const LIGHT_MAX: u32 = 57;
    pub const DARK_MAX: u32 = 43;
    /// Light above this while in dark form flips the player back.
    pub const REFILL_THRESHOLD: u32 = 10;

    pub fn new(light: u32, dark: u32, form: Form) -> Self {
        Self {
            light: light.min(Self::LIGHT_MAX),
            dark: dark.min(Self::DARK_MAX),
            form,
        }
    }

    pub fn light(&self) -> u32 {
        self.light
    }

    pub fn dark(&self) -> u32 {
        self.dark
    }

    pub fn form(&self) -> Form {
        self.form
    }

    /// Called by the transform sequence once the wind-up resolves.
    pub fn set_form(&mut self, form: Form) {
        self.form = form;
    }

    pub fn is_depleted(&self) -> bool {
        self.light == 0 && self.dark == 0
    }

    /// Drain the pools. Light empties first; the remainder of the same
    /// hit spills into dark.
    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        let mut outcome = DamageOutcome::default();
        let mut remaining = amount;

        if self.light > 0 {
            let drained = self.light.min(remaining);
            self.light -= drained;
            remaining -= drained;
            if self.light == 0 && drained > 0 {
                outcome.light_depleted = true;
            }
        }

        if remaining > 0 {
            let drained = self.dark.min(remaining);
            self.dark -= drained;
            if self.dark == 0 && drained > 0 {
                outcome.actor_depleted = true;
            }
        }
        outcome
    }

    /// Refill the pools. The active pool (per the current form) fills
    /// first; overflow goes to the other.
    pub fn collect(&mut self, amount: u32) -> CollectOutcome {
        let below_threshold = self.light <= Self::REFILL_THRESHOLD;

        match self.form {
            Form::Light => {
                let overflow = self.fill_light(amount);
                self.fill_dark(overflow);
            }
            Form::Dark => {
                let overflow = self.fill_dark(amount);
                self.fill_light(overflow);
            }
        }

        CollectOutcome {
            restored: self.form == Form::Dark
                && below_threshold
                && self.light > Self::REFILL_THRESHOLD,
        }
    }

    fn fill_light(&mut self, amount: u32) -> u32 {
        let space = Self::LIGHT_MAX - self.light;
        let added = space.min(amount);
        self.light += added;
        amount - added
    }

    fn fill_dark(&mut self, amount: u32) -> u32 {
        let space = Self::DARK_MAX - self.dark;
        let added = space.min(amount);
        self.dark += added;
        amount - added
    }
}

/// Marker for a boss actor - a simple actor on the coarse gauge.
#[derive(Component)]
pub struct Boss;

/// Coarse 0-100 gauge for simple (non-dual) actors such as bosses.
///
/// Decoupled from [`Resolve`] - it clamps and nothing else.
#[derive(Component, Debug, Clone)]
pub struct CoarseHealth {
    value: u32,
}

impl Default for CoarseHealth {
    fn default() -> Self {
        Self { value: 100 }
    }
}

impl CoarseHealth {
    pub const MAX: u32 = 100;

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn set_value(&mut self, value: u32) {
        self.value = value.min(Self::MAX);
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0
    }
}

/// Timed window during which further damage applications are no-ops.
#[derive(Component, Debug)]
pub struct Invulnerability {
    timer: Timer,
}

impl Invulnerability {
    pub fn new(window_secs: f32) -> Self {
        let mut timer = Timer::from_seconds(window_secs, TimerMode::Once);
        // Start expired so the first hit lands.
        timer.tick(timer.duration());
        Self { timer }
    }

    pub fn active(&self) -> bool {
        !self.timer.finished()
    }

    pub fn trigger(&mut self, window_secs: f32) {
        self.timer
            .set_duration(std::time::Duration::from_secs_f32(window_secs));
        self.timer.reset();
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        self.timer.tick(delta);
    }
}

/// Sent when a queued attack advances - the moment strikes resolve.
#[derive(Event, Debug, Clone, Copy)]
pub struct Strike {
    pub attacker: Entity,
    pub attack: AttackId,
}

/// A dropped resource orb, collected on player overlap.
#[derive(Component, Debug, Clone, Copy)]
pub struct Pickup {
    pub worth: u32,
}

/// Combat tuning.
#[derive(Resource)]
pub struct CombatConfig {
    /// Strike reach for the player's combo attacks
    pub strike_range: f32,
    /// Player invulnerability window after taking a hit, in seconds
    pub invuln_window_secs: f32,
    /// Overlap radius for collecting pickups
    pub pickup_radius: f32,
    /// Worth of a small orb
    pub small_orb_worth: u32,
    /// Worth of a large orb
    pub large_orb_worth: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            strike_range: 60.0,
            invuln_window_secs: 6.0,
            pickup_radius: 20.0,
            small_orb_worth: 10,
            large_orb_worth: 15,
        }
    }
}

impl CombatConfig {
    /// Damage dealt by each step of the combo.
    pub fn attack_damage(&self, attack: AttackId) -> u32 {
        match attack {
            AttackId::Attack1 => 20,
            AttackId::Attack2 => 25,
            AttackId::Attack3 => 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_spills_from_light_into_dark() {
        // Scenario: full pools, one 60-point hit.
        let mut resolve = Resolve::default();
        let outcome = resolve.apply_damage(60);

        assert_eq!(resolve.light(), 0);
        assert_eq!(resolve.dark(), 40);
        assert!(outcome.light_depleted);
        assert!(!outcome.actor_depleted);

        // The flip already happened; further hits drain dark only.
        let outcome = resolve.apply_damage(10);
        assert_eq!(resolve.dark(), 30);
        assert!(!outcome.light_depleted);
    }

    #[test]
    fn dark_drains_only_after_light_is_exhausted() {
        let mut resolve = Resolve::default();
        resolve.apply_damage(30);
        assert_eq!(resolve.light(), 27);
        assert_eq!(resolve.dark(), Resolve::DARK_MAX);

        resolve.apply_damage(27);
        assert_eq!(resolve.light(), 0);
        assert_eq!(resolve.dark(), Resolve::DARK_MAX);
    }

    #[test]
    fn depleting_both_pools_reports_defeat_once() {
        let mut resolve = Resolve::new(0, 5, Form::Dark);
        let outcome = resolve.apply_damage(5);
        assert!(outcome.actor_depleted);

        // Already empty - no further depletion report.
        let outcome = resolve.apply_damage(5);
        assert!(!outcome.light_depleted);
        assert!(!outcome.actor_depleted);
    }

    #[test]
    fn collect_fills_active_pool_first() {
        let mut resolve = Resolve::new(50, 20, Form::Light);
        resolve.collect(10);
        assert_eq!(resolve.light(), Resolve::LIGHT_MAX);
        assert_eq!(resolve.dark(), 23);

        let mut resolve = Resolve::new(50, 40, Form::Dark);
        resolve.collect(10);
        assert_eq!(resolve.dark(), Resolve::DARK_MAX);
        assert_eq!(resolve.light(), 57);
    }

    #[test]
    fn refill_threshold_restores_only_in_dark_form() {
        let mut resolve = Resolve::new(5, 43, Form::Dark);
        let outcome = resolve.collect(10);
        // 43 is full, all 10 overflow into light: 15 > threshold.
        assert_eq!(resolve.light(), 15);
        assert!(outcome.restored);

        // Same fill in light form is not a restore.
        let mut resolve = Resolve::new(5, 0, Form::Light);
        let outcome = resolve.collect(10);
        assert!(!outcome.restored);
    }

    #[test]
    fn pools_clamp_at_their_widths() {
        let mut resolve = Resolve::default();
        resolve.collect(1000);
        assert_eq!(resolve.light(), Resolve::LIGHT_MAX);
        assert_eq!(resolve.dark(), Resolve::DARK_MAX);

        resolve.apply_damage(1000);
        assert_eq!(resolve.light(), 0);
        assert_eq!(resolve.dark(), 0);
    }

    #[test]
    fn coarse_health_clamps_to_its_range() {
        let mut health = CoarseHealth::default();
        health.set_value(250);
        assert_eq!(health.value(), CoarseHealth::MAX);
        health.set_value(0);
        assert!(health.is_empty());
    }
}
