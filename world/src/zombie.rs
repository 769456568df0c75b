//! Zombie state shared by every variant: seeking, damage intake, and burning.

use std::time::Duration;

use zombie_arena_core::{
    tuning::ZombieTable, Arena, Position, Reward, ZombieKind, ZombieSpawn,
};

/// A hostile agent chasing the player.
///
/// Health always stays within `0..=max_hp`; the zombie counts as dead once
/// it reaches zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Zombie {
    kind: ZombieKind,
    level: u32,
    position: Position,
    max_hp: u32,
    hp: u32,
    speed: f32,
    reward: Reward,
    contact_damage: u32,
    burn: Option<Burn>,
    next_contact: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Burn {
    dps: u32,
    expires_at: Duration,
    residue: f32,
}

impl Zombie {
    /// Creates a full-health zombie from a spawn order.
    #[must_use]
    pub fn new(spawn: ZombieSpawn, table: &ZombieTable) -> Self {
        let stats = table.stats(spawn.kind);
        let max_hp = table.max_hp(spawn.kind, spawn.level);
        Self {
            kind: spawn.kind,
            level: spawn.level,
            position: spawn.position,
            max_hp,
            hp: max_hp,
            speed: stats.speed,
            reward: Reward {
                score: stats.score,
                gold: stats.gold,
            },
            contact_damage: stats.contact_damage,
            burn: None,
            next_contact: Duration::ZERO,
        }
    }

    /// Creates a zombie of a fixed variant and location without any randomness.
    #[must_use]
    pub fn create_specific(
        kind: ZombieKind,
        level: u32,
        position: Position,
        table: &ZombieTable,
    ) -> Self {
        Self::new(
            ZombieSpawn {
                kind,
                level,
                position,
            },
            table,
        )
    }

    /// Zombie variant.
    #[must_use]
    pub const fn kind(&self) -> ZombieKind {
        self.kind
    }

    /// Level the zombie was spawned at.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Current location.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Current health.
    #[must_use]
    pub const fn hp(&self) -> u32 {
        self.hp
    }

    /// Maximum health.
    #[must_use]
    pub const fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Units moved per 60 Hz frame.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Damage dealt to the player per contact hit.
    #[must_use]
    pub const fn contact_damage(&self) -> u32 {
        self.contact_damage
    }

    /// Reports whether health reached zero.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Reports whether a burn effect is active.
    #[must_use]
    pub const fn is_burning(&self) -> bool {
        self.burn.is_some()
    }

    /// Score and gold granted on death; independent of level and health.
    #[must_use]
    pub const fn reward(&self) -> Reward {
        self.reward
    }

    /// Removes up to `amount` health and returns the amount actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.hp);
        self.hp -= applied;
        applied
    }

    /// Sets the zombie on fire until `now + duration`.
    ///
    /// A new burn replaces any active one instead of stacking.
    pub fn apply_burn(&mut self, dps: u32, duration: Duration, now: Duration) {
        self.burn = Some(Burn {
            dps,
            expires_at: now.saturating_add(duration),
            residue: 0.0,
        });
    }

    /// Applies one tick of burn damage and returns the health removed.
    ///
    /// Fractional damage carries over to the next tick so low damage rates
    /// still hurt at high tick rates. An expired burn is cleared and deals
    /// nothing.
    pub fn update_burn(&mut self, now: Duration, dt: Duration) -> u32 {
        let Some(burn) = self.burn.as_mut() else {
            return 0;
        };

        if now >= burn.expires_at {
            self.burn = None;
            return 0;
        }

        let exact = burn.dps as f32 * dt.as_secs_f32() + burn.residue;
        let whole = exact.floor();
        burn.residue = exact - whole;
        self.take_damage(whole as u32)
    }

    /// Advances toward `target` by `speed * dt * frame_scale`, never
    /// overshooting it, and clamps the result to the arena.
    pub fn move_towards(
        &mut self,
        target: Position,
        dt: Duration,
        arena: &Arena,
        frame_scale: f32,
    ) {
        let Some((ux, uy)) = self.position.direction_to(target) else {
            return;
        };

        let step = (self.speed * dt.as_secs_f32() * frame_scale)
            .min(self.position.distance_to(target));
        self.position = arena.clamp(self.position.offset(ux * step, uy * step));
    }

    /// Reports whether `point` lies strictly closer than `threshold`.
    #[must_use]
    pub fn is_colliding_with(&self, point: Position, threshold: f32) -> bool {
        self.position.distance_to(point) < threshold
    }

    /// Heading toward `point` in radians.
    #[must_use]
    pub fn angle_to(&self, point: Position) -> f32 {
        self.position.angle_to(point)
    }

    /// Claims a contact hit at `now` if the previous one has cooled down.
    ///
    /// Returns the damage to deal to the player.
    pub fn try_contact(&mut self, now: Duration, cooldown: Duration) -> Option<u32> {
        if now < self.next_contact {
            return None;
        }
        self.next_contact = now.saturating_add(cooldown);
        Some(self.contact_damage)
    }
}
