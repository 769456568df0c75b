//! Weapon cooldown gating and upgrade progression.

use std::time::Duration;

use zombie_arena_core::{
    tuning::{UpgradeTuning, WeaponStats, WeaponTable},
    WeaponKind,
};

/// A weapon owned by the player.
///
/// Variants differ only by their [`WeaponStats`]; impact behavior such as
/// explosions and burning is resolved by the world when a projectile lands.
#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    kind: WeaponKind,
    stats: WeaponStats,
    upgrade: UpgradeTuning,
    upgrade_level: u32,
    last_fired: Option<Duration>,
}

impl Weapon {
    /// Creates an unupgraded weapon that has never fired.
    #[must_use]
    pub const fn new(kind: WeaponKind, stats: WeaponStats, upgrade: UpgradeTuning) -> Self {
        Self {
            kind,
            stats,
            upgrade,
            upgrade_level: 0,
            last_fired: None,
        }
    }

    /// Creates a weapon using the stats registered for `kind`.
    #[must_use]
    pub const fn from_table(kind: WeaponKind, table: &WeaponTable) -> Self {
        Self::new(kind, table.stats(kind), table.upgrade)
    }

    /// Weapon variant.
    #[must_use]
    pub const fn kind(&self) -> WeaponKind {
        self.kind
    }

    /// Damage per hit including upgrades.
    #[must_use]
    pub fn damage(&self) -> u32 {
        self.stats.damage.saturating_add(
            self.upgrade_level
                .saturating_mul(self.upgrade.damage_increase),
        )
    }

    /// Minimum simulated time between two shots.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        self.stats.cooldown()
    }

    /// Maximum distance a projectile travels.
    #[must_use]
    pub const fn range(&self) -> f32 {
        self.stats.range
    }

    /// Shop price in gold.
    #[must_use]
    pub const fn price(&self) -> u32 {
        self.stats.price
    }

    /// Projectile speed in units per 60 Hz frame.
    #[must_use]
    pub const fn projectile_speed(&self) -> f32 {
        self.stats.projectile_speed
    }

    /// Current upgrade level.
    #[must_use]
    pub const fn upgrade_level(&self) -> u32 {
        self.upgrade_level
    }

    /// Reports whether further upgrades are refused.
    #[must_use]
    pub const fn is_max_level(&self) -> bool {
        self.upgrade_level >= self.upgrade.max_level
    }

    /// Simulation time of the last accepted shot.
    #[must_use]
    pub const fn last_fired(&self) -> Option<Duration> {
        self.last_fired
    }

    /// Reports whether the cooldown has elapsed at `now`.
    #[must_use]
    pub fn can_fire(&self, now: Duration) -> bool {
        match self.last_fired {
            None => true,
            Some(fired_at) => now.saturating_sub(fired_at) >= self.cooldown(),
        }
    }

    /// Records a shot at `now` if the cooldown has elapsed.
    ///
    /// Returns `false` without touching any state while cooling down.
    pub fn fire(&mut self, now: Duration) -> bool {
        if !self.can_fire(now) {
            return false;
        }
        self.last_fired = Some(now);
        true
    }

    /// Raises the upgrade level by one unless already at the maximum.
    pub fn upgrade(&mut self) -> bool {
        if self.is_max_level() {
            return false;
        }
        self.upgrade_level += 1;
        true
    }

    /// Gold required for the next upgrade level.
    ///
    /// `floor(price * cost_fraction * cost_multiplier ^ level)`.
    #[must_use]
    pub fn upgrade_cost(&self) -> u32 {
        let exponent = i32::try_from(self.upgrade_level).unwrap_or(i32::MAX);
        let cost = f64::from(self.stats.price)
            * f64::from(self.upgrade.cost_fraction)
            * f64::from(self.upgrade.cost_multiplier).powi(exponent);
        cost.floor() as u32
    }

    /// Forgets the last shot so a new session starts ready to fire.
    pub fn reset_cooldown(&mut self) {
        self.last_fired = None;
    }
}
