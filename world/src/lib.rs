#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Zombie Arena.
//!
//! The world owns the player, every live zombie, projectiles in flight, and
//! lingering explosions. Adapters and systems mutate it exclusively through
//! [`apply`] and observe it through the read-only [`query`] module.

mod combat;
mod player;
mod projectile;
mod weapon;
mod zombie;

use std::{collections::BTreeMap, time::Duration};

use tracing::{debug, info};
use zombie_arena_core::{
    CharacterKind, Command, Direction, EquipError, Event, FireError, GameState, Position,
    ProjectileId, PurchaseError, Tuning, UpgradeError, WeaponKind, ZombieId, ZombieSpawn,
    WELCOME_BANNER,
};

pub use player::Player;
pub use projectile::{Explosion, Projectile};
pub use weapon::Weapon;
pub use zombie::Zombie;

/// Represents the authoritative Zombie Arena world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    tuning: Tuning,
    state: GameState,
    clock: Duration,
    tick_index: u64,
    player: Option<Player>,
    zombies: BTreeMap<ZombieId, Zombie>,
    projectiles: Vec<Projectile>,
    explosions: Vec<Explosion>,
    next_zombie_id: u32,
    next_projectile_id: u32,
    next_explosion_id: u32,
}

impl World {
    /// Creates a world on the title menu using the default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    /// Creates a world on the title menu using the provided tuning.
    #[must_use]
    pub fn with_tuning(tuning: Tuning) -> Self {
        Self {
            banner: WELCOME_BANNER,
            tuning,
            state: GameState::Menu,
            clock: Duration::ZERO,
            tick_index: 0,
            player: None,
            zombies: BTreeMap::new(),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            next_zombie_id: 0,
            next_projectile_id: 0,
            next_explosion_id: 0,
        }
    }

    fn enter_state(&mut self, state: GameState, out_events: &mut Vec<Event>) {
        if self.state == state {
            return;
        }
        self.state = state;
        out_events.push(Event::GameStateChanged { state });
    }

    fn start_session(&mut self, character: CharacterKind, out_events: &mut Vec<Event>) {
        if let Some(player) = self.player.as_mut() {
            player.change_character(character, self.tuning.characters.stats(character));
        }
        let player = self
            .player
            .get_or_insert_with(|| Player::from_tuning(character, &self.tuning));

        let starter = Weapon::from_table(WeaponKind::STARTER, &self.tuning.weapons);
        if player.grant_weapon(starter) || player.equipped().is_none() {
            let _ = player.equip_weapon(WeaponKind::STARTER);
        }
        let gold = player.gold();

        self.zombies.clear();
        self.projectiles.clear();
        self.explosions.clear();
        self.clock = Duration::ZERO;

        info!(?character, gold, "session started");
        out_events.push(Event::SessionStarted { character });
        self.enter_state(GameState::Playing, out_events);
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if !self.state.is_playing() {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            if player.move_in(direction) {
                out_events.push(Event::PlayerMoved {
                    position: player.position(),
                });
            }
        }
    }

    fn fire(&mut self, target: Position) -> Result<(WeaponKind, ProjectileId), FireError> {
        if !self.state.is_playing() {
            return Err(FireError::InvalidState);
        }

        let now = self.clock;
        let player = self.player.as_mut().ok_or(FireError::NoWeapon)?;
        if player.equipped().is_none() {
            return Err(FireError::NoWeapon);
        }

        let origin = player.position();
        let direction = origin
            .direction_to(target)
            .ok_or(FireError::NoDirection)?;
        let weapon = player.equipped_mut().ok_or(FireError::NoWeapon)?;
        if !weapon.fire(now) {
            return Err(FireError::Cooldown);
        }

        let id = ProjectileId::new(self.next_projectile_id);
        self.next_projectile_id = self.next_projectile_id.wrapping_add(1);
        self.projectiles
            .push(Projectile::launch(id, weapon, origin, direction));
        Ok((weapon.kind(), id))
    }

    fn buy_weapon(&mut self, kind: WeaponKind) -> Result<u32, PurchaseError> {
        let player = self.player.as_mut().ok_or(PurchaseError::NoPlayer)?;
        if player.owns(kind) {
            return Err(PurchaseError::AlreadyOwned);
        }

        let weapon = Weapon::from_table(kind, &self.tuning.weapons);
        let price = weapon.price();
        if player.buy_weapon(weapon) {
            Ok(price)
        } else {
            Err(PurchaseError::InsufficientGold)
        }
    }

    fn upgrade_weapon(&mut self, kind: WeaponKind) -> Result<(u32, u32), UpgradeError> {
        let player = self.player.as_mut().ok_or(UpgradeError::NotOwned)?;
        let cost = player.upgrade_weapon(kind)?;
        let level = player
            .weapon(kind)
            .map_or(0, Weapon::upgrade_level);
        Ok((level, cost))
    }

    fn equip_weapon(&mut self, kind: WeaponKind) -> Result<(), EquipError> {
        match self.player.as_mut().map(|player| player.equip_weapon(kind)) {
            Some(true) => Ok(()),
            _ => Err(EquipError::NotOwned),
        }
    }

    fn spawn_zombie(&mut self, spawn: ZombieSpawn, out_events: &mut Vec<Event>) {
        if !self.state.is_playing() {
            return;
        }

        let spawn = ZombieSpawn {
            position: self.tuning.arena.clamp(spawn.position),
            ..spawn
        };
        let id = ZombieId::new(self.next_zombie_id);
        self.next_zombie_id = self.next_zombie_id.wrapping_add(1);
        let _ = self
            .zombies
            .insert(id, Zombie::new(spawn, &self.tuning.zombies));

        debug!(zombie = id.get(), kind = ?spawn.kind, level = spawn.level, "zombie spawned");
        out_events.push(Event::ZombieSpawned {
            zombie: id,
            kind: spawn.kind,
            level: spawn.level,
            position: spawn.position,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartSession { character } => world.start_session(character, out_events),
        Command::SetGameState { state } => world.enter_state(state, out_events),
        Command::Tick { dt } => {
            if world.state.is_playing() {
                world.tick(dt, out_events);
            }
        }
        Command::MovePlayer { direction } => world.move_player(direction, out_events),
        Command::FireWeapon { target } => match world.fire(target) {
            Ok((weapon, projectile)) => {
                out_events.push(Event::WeaponFired { weapon, projectile });
            }
            Err(reason) => {
                debug!(?reason, "fire rejected");
                out_events.push(Event::FireRejected { reason });
            }
        },
        Command::BuyWeapon { weapon } => match world.buy_weapon(weapon) {
            Ok(price) => {
                info!(?weapon, price, "weapon purchased");
                out_events.push(Event::WeaponPurchased { weapon, price });
            }
            Err(reason) => {
                debug!(?weapon, ?reason, "purchase rejected");
                out_events.push(Event::PurchaseRejected { weapon, reason });
            }
        },
        Command::UpgradeWeapon { weapon } => match world.upgrade_weapon(weapon) {
            Ok((level, cost)) => {
                info!(?weapon, level, cost, "weapon upgraded");
                out_events.push(Event::WeaponUpgraded {
                    weapon,
                    level,
                    cost,
                });
            }
            Err(reason) => {
                debug!(?weapon, ?reason, "upgrade rejected");
                out_events.push(Event::UpgradeRejected { weapon, reason });
            }
        },
        Command::EquipWeapon { weapon } => match world.equip_weapon(weapon) {
            Ok(()) => out_events.push(Event::WeaponEquipped { weapon }),
            Err(reason) => {
                debug!(?weapon, ?reason, "equip rejected");
                out_events.push(Event::EquipRejected { weapon, reason });
            }
        },
        Command::SpawnZombie { spawn } => world.spawn_zombie(spawn, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use zombie_arena_core::{
        Arena, ExplosionSnapshot, GameState, PlayerSnapshot, ProjectileSnapshot, Tuning,
        WeaponSnapshot, ZombieSnapshot, ZombieView,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Current screen-level state.
    #[must_use]
    pub fn game_state(world: &World) -> GameState {
        world.state
    }

    /// Simulated time elapsed in the current session.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.clock
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Tuning the world was created with.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Playfield bounds.
    #[must_use]
    pub fn arena(world: &World) -> Arena {
        world.tuning.arena
    }

    /// Captures the player for HUD rendering, if a session was ever started.
    #[must_use]
    pub fn player(world: &World) -> Option<PlayerSnapshot> {
        world.player.as_ref().map(|player| PlayerSnapshot {
            character: player.character(),
            position: player.position(),
            hp: player.hp(),
            max_hp: player.max_hp(),
            speed: player.speed(),
            score: player.score(),
            gold: player.gold(),
            level: player.level(),
            equipped: player.equipped().map(|weapon| weapon.kind()),
        })
    }

    /// Player level, or 1 before the first session.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.player.as_ref().map_or(1, |player| player.level())
    }

    /// Number of zombies currently in the arena.
    #[must_use]
    pub fn live_zombie_count(world: &World) -> usize {
        world.zombies.len()
    }

    /// Captures a read-only view of the zombies in the arena.
    #[must_use]
    pub fn zombie_view(world: &World) -> ZombieView {
        let focus = world
            .player
            .as_ref()
            .map_or_else(|| world.tuning.arena.center(), |player| player.position());
        let snapshots = world
            .zombies
            .iter()
            .map(|(&id, zombie)| ZombieSnapshot {
                id,
                kind: zombie.kind(),
                level: zombie.level(),
                position: zombie.position(),
                hp: zombie.hp(),
                max_hp: zombie.max_hp(),
                burning: zombie.is_burning(),
                angle_to_player: zombie.angle_to(focus),
            })
            .collect();
        ZombieView::from_snapshots(snapshots)
    }

    /// Captures the projectiles in flight in launch order.
    #[must_use]
    pub fn projectile_view(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| projectile.snapshot())
            .collect()
    }

    /// Captures the explosions still on screen.
    #[must_use]
    pub fn explosion_view(world: &World) -> Vec<ExplosionSnapshot> {
        world
            .explosions
            .iter()
            .map(|explosion| explosion.snapshot(world.clock))
            .collect()
    }

    /// Captures every owned weapon in shop order.
    #[must_use]
    pub fn weapon_view(world: &World) -> Vec<WeaponSnapshot> {
        let Some(player) = world.player.as_ref() else {
            return Vec::new();
        };
        let equipped = player.equipped().map(|weapon| weapon.kind());
        player
            .weapons()
            .map(|weapon| WeaponSnapshot {
                kind: weapon.kind(),
                damage: weapon.damage(),
                upgrade_level: weapon.upgrade_level(),
                upgrade_cost: weapon.upgrade_cost(),
                ready: weapon.can_fire(world.clock),
                equipped: equipped == Some(weapon.kind()),
            })
            .collect()
    }

    /// Reports whether the equipped weapon could fire right now.
    #[must_use]
    pub fn weapon_ready(world: &World) -> bool {
        world.state.is_playing()
            && world
                .player
                .as_ref()
                .and_then(|player| player.equipped())
                .is_some_and(|weapon| weapon.can_fire(world.clock))
    }
}
