//! Kinematic projectiles and the explosions bazooka rounds leave behind.

use std::time::Duration;

use zombie_arena_core::{
    Arena, ExplosionId, ExplosionSnapshot, Position, ProjectileId, ProjectileSnapshot, WeaponKind,
};

use crate::Weapon;

/// A round in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    id: ProjectileId,
    weapon: WeaponKind,
    position: Position,
    velocity: (f32, f32),
    damage: u32,
    travelled: f32,
    range: f32,
    active: bool,
}

impl Projectile {
    /// Launches a round from `origin` along the unit vector `direction`
    /// using the damage, speed, and range of `weapon`.
    #[must_use]
    pub fn launch(
        id: ProjectileId,
        weapon: &Weapon,
        origin: Position,
        direction: (f32, f32),
    ) -> Self {
        let speed = weapon.projectile_speed();
        Self {
            id,
            weapon: weapon.kind(),
            position: origin,
            velocity: (direction.0 * speed, direction.1 * speed),
            damage: weapon.damage(),
            travelled: 0.0,
            range: weapon.range(),
            active: true,
        }
    }

    /// Weapon that fired the projectile.
    #[must_use]
    pub const fn weapon(&self) -> WeaponKind {
        self.weapon
    }

    /// Current location.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Damage dealt on impact.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        self.damage
    }

    /// Whether the projectile can still hit anything.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Moves by `velocity * dt * frame_scale`; the projectile deactivates
    /// once it has flown past its range.
    pub fn advance(&mut self, dt: Duration, frame_scale: f32) {
        let scale = dt.as_secs_f32() * frame_scale;
        let (dx, dy) = (self.velocity.0 * scale, self.velocity.1 * scale);
        self.position = self.position.offset(dx, dy);
        self.travelled += dx.hypot(dy);
        if self.travelled > self.range {
            self.active = false;
        }
    }

    /// Marks the projectile as spent.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Reports whether the projectile left the arena by more than `margin`.
    #[must_use]
    pub fn is_offscreen(&self, arena: &Arena, margin: f32) -> bool {
        arena.is_beyond(self.position, margin)
    }

    /// Reports whether `point` lies strictly closer than `threshold`.
    #[must_use]
    pub fn is_colliding_with(&self, point: Position, threshold: f32) -> bool {
        self.position.distance_to(point) < threshold
    }

    /// Captures the rendering snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            weapon: self.weapon,
            position: self.position,
            velocity: self.velocity,
        }
    }
}

/// A short-lived blast that damaged everything in its radius when created.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    id: ExplosionId,
    position: Position,
    radius: f32,
    damage: u32,
    created_at: Duration,
    lifetime: Duration,
}

impl Explosion {
    /// Creates an explosion at `position` that lasts `lifetime` from `created_at`.
    #[must_use]
    pub const fn new(
        id: ExplosionId,
        position: Position,
        radius: f32,
        damage: u32,
        created_at: Duration,
        lifetime: Duration,
    ) -> Self {
        Self {
            id,
            position,
            radius,
            damage,
            created_at,
            lifetime,
        }
    }

    /// Center of the blast.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Blast radius.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Damage applied to everything within the radius.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        self.damage
    }

    /// Reports whether `point` lies within the blast radius, edge included.
    #[must_use]
    pub fn contains(&self, point: Position) -> bool {
        self.position.distance_to(point) <= self.radius
    }

    /// Reports whether the explosion outlived its lifetime at `now`.
    #[must_use]
    pub fn is_finished(&self, now: Duration) -> bool {
        now.saturating_sub(self.created_at) >= self.lifetime
    }

    /// Captures the rendering snapshot at `now`.
    #[must_use]
    pub fn snapshot(&self, now: Duration) -> ExplosionSnapshot {
        let progress = if self.lifetime.is_zero() {
            1.0
        } else {
            (now.saturating_sub(self.created_at).as_secs_f32() / self.lifetime.as_secs_f32())
                .min(1.0)
        };
        ExplosionSnapshot {
            id: self.id,
            position: self.position,
            radius: self.radius,
            progress,
        }
    }
}
