//! Per-tick simulation: movement, collision resolution, rewards, and pruning.

use std::time::Duration;

use tracing::{debug, info};
use zombie_arena_core::{DamageSource, Event, ExplosionId, GameState, Position, WeaponKind};

use crate::{Explosion, World};

/// Blast requested by a projectile impact, resolved once every hit landed.
struct Detonation {
    position: Position,
    damage: u32,
    radius: f32,
}

impl World {
    /// Runs one simulation step. Removal only happens after every collision
    /// pass has read the tick's state.
    pub(crate) fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        let frame_scale = self.tuning.gameplay.frame_scale;
        for projectile in &mut self.projectiles {
            projectile.advance(dt, frame_scale);
        }

        self.advance_zombies(dt, out_events);
        self.resolve_projectile_hits(out_events);
        self.resolve_contacts(out_events);
        self.reap_dead_zombies(out_events);
        self.prune_effects();
    }

    fn advance_zombies(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let target = self.player.as_ref().map(|player| player.position());
        let arena = self.tuning.arena;
        let frame_scale = self.tuning.gameplay.frame_scale;
        let now = self.clock;

        for (&id, zombie) in &mut self.zombies {
            if let Some(target) = target {
                zombie.move_towards(target, dt, &arena, frame_scale);
            }

            let amount = zombie.update_burn(now, dt);
            if amount > 0 {
                out_events.push(Event::ZombieDamaged {
                    zombie: id,
                    amount,
                    source: DamageSource::Burn,
                });
            }
        }
    }

    fn resolve_projectile_hits(&mut self, out_events: &mut Vec<Event>) {
        let threshold = self.tuning.gameplay.bullet_collision_distance;
        let now = self.clock;
        let mut detonations = Vec::new();

        for projectile in self.projectiles.iter_mut().filter(|p| p.is_active()) {
            let hit = self.zombies.iter_mut().find(|(_, zombie)| {
                !zombie.is_dead() && projectile.is_colliding_with(zombie.position(), threshold)
            });
            let Some((&id, zombie)) = hit else {
                continue;
            };

            projectile.deactivate();
            let weapon = projectile.weapon();
            let amount = zombie.take_damage(projectile.damage());
            out_events.push(Event::ZombieDamaged {
                zombie: id,
                amount,
                source: DamageSource::Projectile(weapon),
            });

            let stats = self.tuning.weapons.stats(weapon);
            match weapon {
                WeaponKind::Bazooka => detonations.push(Detonation {
                    position: projectile.position(),
                    damage: projectile.damage(),
                    radius: stats.explosion_radius,
                }),
                WeaponKind::Flamethrower => {
                    zombie.apply_burn(projectile.damage(), stats.burn(), now);
                }
                WeaponKind::Ak47 | WeaponKind::M4 | WeaponKind::A16 => {}
            }
        }

        for detonation in detonations {
            self.detonate(detonation, out_events);
        }
    }

    fn detonate(&mut self, detonation: Detonation, out_events: &mut Vec<Event>) {
        let id = ExplosionId::new(self.next_explosion_id);
        self.next_explosion_id = self.next_explosion_id.wrapping_add(1);
        let explosion = Explosion::new(
            id,
            detonation.position,
            detonation.radius,
            detonation.damage,
            self.clock,
            self.tuning.gameplay.explosion_lifetime(),
        );
        out_events.push(Event::ExplosionTriggered {
            explosion: id,
            position: explosion.position(),
            radius: explosion.radius(),
        });

        for (&zombie_id, zombie) in &mut self.zombies {
            if zombie.is_dead() || !explosion.contains(zombie.position()) {
                continue;
            }
            let amount = zombie.take_damage(explosion.damage());
            out_events.push(Event::ZombieDamaged {
                zombie: zombie_id,
                amount,
                source: DamageSource::Explosion,
            });
        }

        self.explosions.push(explosion);
    }

    fn resolve_contacts(&mut self, out_events: &mut Vec<Event>) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        if !player.is_alive() {
            return;
        }

        let threshold = self.tuning.gameplay.collision_distance;
        let cooldown = self.tuning.gameplay.contact_cooldown();
        let now = self.clock;

        for (&id, zombie) in &mut self.zombies {
            if zombie.is_dead() || !zombie.is_colliding_with(player.position(), threshold) {
                continue;
            }
            let Some(damage) = zombie.try_contact(now, cooldown) else {
                continue;
            };

            let amount = player.take_damage(damage);
            out_events.push(Event::PlayerDamaged {
                zombie: id,
                amount,
                remaining: player.hp(),
            });
            if !player.is_alive() {
                break;
            }
        }

        if !player.is_alive() {
            info!(score = player.score(), level = player.level(), "game over");
            self.enter_state(GameState::GameOver, out_events);
        }
    }

    fn reap_dead_zombies(&mut self, out_events: &mut Vec<Event>) {
        let mut killed = Vec::new();
        self.zombies.retain(|&id, zombie| {
            if zombie.is_dead() {
                killed.push((id, zombie.kind(), zombie.reward()));
                false
            } else {
                true
            }
        });
        if killed.is_empty() {
            return;
        }

        let count = u32::try_from(killed.len()).unwrap_or(u32::MAX);
        for (zombie, kind, reward) in killed {
            debug!(zombie = zombie.get(), ?kind, "zombie killed");
            out_events.push(Event::ZombieKilled {
                zombie,
                kind,
                reward,
            });

            let Some(player) = self.player.as_mut() else {
                continue;
            };
            player.add_gold(reward.gold);
            if let Some(level_up) = player.add_score(reward.score) {
                info!(level = level_up.level, healed = level_up.healed, "level up");
                out_events.push(Event::LevelUp {
                    level: level_up.level,
                    healed: level_up.healed,
                });
            }
        }
        out_events.push(Event::ZombiesRemoved { count });
    }

    fn prune_effects(&mut self) {
        let arena = self.tuning.arena;
        let margin = self.tuning.gameplay.offscreen_margin;
        let now = self.clock;

        self.projectiles.retain(|projectile| {
            projectile.is_active() && !projectile.is_offscreen(&arena, margin)
        });
        self.explosions.retain(|explosion| !explosion.is_finished(now));
    }
}
