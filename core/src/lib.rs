#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Zombie Arena engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query immutable snapshots, and
//! respond exclusively with new command batches.
//!
//! Every numeric knob of the simulation lives in [`tuning::Tuning`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod tuning;

pub use tuning::{Arena, Tuning, TuningError};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Zombie Arena.";

/// Screen-level state of a play session.
///
/// Only [`GameState::Playing`] advances the simulation; every other state
/// freezes the clock together with all cooldowns and status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// Title menu.
    Menu,
    /// Character picker.
    CharacterSelect,
    /// Starting weapon picker.
    WeaponSelect,
    /// Active simulation.
    Playing,
    /// Simulation suspended by the player.
    Paused,
    /// Between-round weapon shop.
    Shop,
    /// Player has died; the session is over.
    GameOver,
}

impl GameState {
    /// Reports whether the simulation advances in this state.
    #[must_use]
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Axis-aligned movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Movement toward decreasing `y`.
    Up,
    /// Movement toward increasing `y`.
    Down,
    /// Movement toward decreasing `x`.
    Left,
    /// Movement toward increasing `x`.
    Right,
}

/// Playable character archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterKind {
    /// Fast but fragile.
    Speed,
    /// Middle of the road.
    Balanced,
    /// Durable but slow.
    Tank,
}

impl CharacterKind {
    /// Every character in selection order.
    pub const ALL: [Self; 3] = [Self::Speed, Self::Balanced, Self::Tank];
}

/// Weapon variants available in the shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    /// Starter automatic rifle.
    Ak47,
    /// Carbine with slightly higher damage.
    M4,
    /// Heavy rifle.
    A16,
    /// Rocket launcher whose impacts explode.
    Bazooka,
    /// Short-range weapon whose hits set zombies on fire.
    Flamethrower,
}

impl WeaponKind {
    /// Every weapon in shop order.
    pub const ALL: [Self; 5] = [
        Self::Ak47,
        Self::M4,
        Self::A16,
        Self::Bazooka,
        Self::Flamethrower,
    ];

    /// Weapon handed to every new player for free.
    pub const STARTER: Self = Self::Ak47;
}

/// Zombie variants that share a single behavioral contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZombieKind {
    /// Baseline shambler.
    Normal,
    /// Quick but fragile.
    Fast,
    /// Sturdier and slower.
    Strong,
    /// Very durable and very slow.
    Tank,
    /// Rare high-value threat.
    Boss,
}

impl ZombieKind {
    /// Every zombie variant ordered by difficulty.
    pub const ALL: [Self; 5] = [Self::Normal, Self::Fast, Self::Strong, Self::Tank, Self::Boss];
}

/// Unique identifier assigned to a zombie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZombieId(u32);

impl ZombieId {
    /// Creates a new zombie identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an explosion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExplosionId(u32);

impl ExplosionId {
    /// Creates a new explosion identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Continuous location inside the arena, measured in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a position from raw coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance between two positions.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Heading from `self` toward `other` in radians, as returned by `atan2`.
    #[must_use]
    pub fn angle_to(self, other: Position) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Unit vector pointing from `self` toward `other`.
    ///
    /// Returns `None` when both positions coincide, since no direction exists.
    #[must_use]
    pub fn direction_to(self, other: Position) -> Option<(f32, f32)> {
        let distance = self.distance_to(other);
        if distance > 0.0 && distance.is_finite() {
            Some(((other.x - self.x) / distance, (other.y - self.y) / distance))
        } else {
            None
        }
    }

    /// Returns the position displaced by the provided offsets.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Score and gold granted when a zombie dies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reward {
    /// Points added to the player's score.
    pub score: u32,
    /// Gold added to the player's wallet.
    pub gold: u32,
}

/// Fully specified request to place a zombie into the arena.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZombieSpawn {
    /// Variant of the zombie.
    pub kind: ZombieKind,
    /// Progression level the zombie scales its health with.
    pub level: u32,
    /// Arena location the zombie appears at.
    pub position: Position,
}

/// Outcome of a score increase that crossed a level threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LevelUp {
    /// Level reached after the score increase.
    pub level: u32,
    /// Health restored by the level-up bonus.
    pub healed: u32,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts a fresh session with the chosen character.
    ///
    /// Gold and purchased weapons carry over from previous sessions.
    StartSession {
        /// Character the player controls during the session.
        character: CharacterKind,
    },
    /// Requests a transition to the provided game state.
    SetGameState {
        /// State the world should enter.
        state: GameState,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Moves the player one step in the provided direction.
    MovePlayer {
        /// Axis and sign of the step.
        direction: Direction,
    },
    /// Fires the equipped weapon toward a target point.
    FireWeapon {
        /// Point the projectile travels toward.
        target: Position,
    },
    /// Purchases a weapon from the shop.
    BuyWeapon {
        /// Weapon to purchase.
        weapon: WeaponKind,
    },
    /// Pays for one upgrade level of an owned weapon.
    UpgradeWeapon {
        /// Weapon to upgrade.
        weapon: WeaponKind,
    },
    /// Switches the equipped weapon.
    EquipWeapon {
        /// Owned weapon to equip.
        weapon: WeaponKind,
    },
    /// Places a new zombie into the arena.
    SpawnZombie {
        /// Variant, level, and location of the new zombie.
        spawn: ZombieSpawn,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A new session began.
    SessionStarted {
        /// Character controlled during the session.
        character: CharacterKind,
    },
    /// The world entered a new game state.
    GameStateChanged {
        /// State that became active.
        state: GameState,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// The player changed position.
    PlayerMoved {
        /// Position after the move.
        position: Position,
    },
    /// The equipped weapon fired a projectile.
    WeaponFired {
        /// Weapon that fired.
        weapon: WeaponKind,
        /// Identifier of the emitted projectile.
        projectile: ProjectileId,
    },
    /// A fire request was refused.
    FireRejected {
        /// Reason the shot was refused.
        reason: FireError,
    },
    /// A weapon was purchased.
    WeaponPurchased {
        /// Weapon that was bought.
        weapon: WeaponKind,
        /// Gold paid.
        price: u32,
    },
    /// A purchase was refused.
    PurchaseRejected {
        /// Weapon that was requested.
        weapon: WeaponKind,
        /// Reason the purchase failed.
        reason: PurchaseError,
    },
    /// A weapon gained an upgrade level.
    WeaponUpgraded {
        /// Weapon that was upgraded.
        weapon: WeaponKind,
        /// Upgrade level after the purchase.
        level: u32,
        /// Gold paid.
        cost: u32,
    },
    /// An upgrade was refused.
    UpgradeRejected {
        /// Weapon that was requested.
        weapon: WeaponKind,
        /// Reason the upgrade failed.
        reason: UpgradeError,
    },
    /// The equipped weapon changed.
    WeaponEquipped {
        /// Weapon now equipped.
        weapon: WeaponKind,
    },
    /// An equip request was refused.
    EquipRejected {
        /// Weapon that was requested.
        weapon: WeaponKind,
        /// Reason the switch failed.
        reason: EquipError,
    },
    /// A zombie entered the arena.
    ZombieSpawned {
        /// Identifier allocated to the zombie.
        zombie: ZombieId,
        /// Variant of the zombie.
        kind: ZombieKind,
        /// Level the zombie was spawned at.
        level: u32,
        /// Spawn location.
        position: Position,
    },
    /// A zombie lost health.
    ZombieDamaged {
        /// Zombie that was hit.
        zombie: ZombieId,
        /// Health actually removed.
        amount: u32,
        /// What dealt the damage.
        source: DamageSource,
    },
    /// A bazooka round detonated.
    ExplosionTriggered {
        /// Identifier of the explosion.
        explosion: ExplosionId,
        /// Center of the blast.
        position: Position,
        /// Blast radius.
        radius: f32,
    },
    /// A zombie reached the player and dealt contact damage.
    PlayerDamaged {
        /// Zombie responsible for the hit.
        zombie: ZombieId,
        /// Health actually removed.
        amount: u32,
        /// Player health after the hit.
        remaining: u32,
    },
    /// A zombie died and its reward was credited.
    ZombieKilled {
        /// Identifier of the dead zombie.
        zombie: ZombieId,
        /// Variant of the dead zombie.
        kind: ZombieKind,
        /// Score and gold credited to the player.
        reward: Reward,
    },
    /// Dead zombies were pruned from the arena this tick.
    ZombiesRemoved {
        /// Number of zombies removed.
        count: u32,
    },
    /// The player's score crossed a level threshold.
    LevelUp {
        /// New player level.
        level: u32,
        /// Health restored by the level-up bonus.
        healed: u32,
    },
}

/// Source of damage applied to a zombie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageSource {
    /// Direct projectile impact from the provided weapon.
    Projectile(WeaponKind),
    /// Area damage from a bazooka explosion.
    Explosion,
    /// Damage-over-time from a burn effect.
    Burn,
}

/// Reasons a fire request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireError {
    /// The simulation is not running.
    InvalidState,
    /// No weapon is equipped.
    NoWeapon,
    /// The equipped weapon has not finished its cooldown.
    Cooldown,
    /// The target coincides with the player, so no direction exists.
    NoDirection,
}

/// Reasons a weapon purchase may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseError {
    /// No session has created a player yet.
    NoPlayer,
    /// The weapon is already in the owned set.
    AlreadyOwned,
    /// The player cannot afford the weapon.
    InsufficientGold,
}

/// Reasons a weapon upgrade may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeError {
    /// The weapon is not owned.
    NotOwned,
    /// The weapon already reached the maximum upgrade level.
    MaxLevel,
    /// The player cannot afford the upgrade.
    InsufficientGold,
}

/// Reasons an equip request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipError {
    /// The weapon is not owned.
    NotOwned,
}

/// Immutable representation of the player used for HUD rendering.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    /// Character the player controls.
    pub character: CharacterKind,
    /// Current location.
    pub position: Position,
    /// Current health.
    pub hp: u32,
    /// Maximum health.
    pub max_hp: u32,
    /// Units moved per step.
    pub speed: f32,
    /// Accumulated score for the session.
    pub score: u32,
    /// Wallet balance; persists across sessions.
    pub gold: u32,
    /// Level derived from score.
    pub level: u32,
    /// Weapon currently equipped, if any.
    pub equipped: Option<WeaponKind>,
}

impl PlayerSnapshot {
    /// Reports whether the player still has health left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Immutable representation of a single zombie used for rendering and targeting.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ZombieSnapshot {
    /// Identifier of the zombie.
    pub id: ZombieId,
    /// Variant of the zombie.
    pub kind: ZombieKind,
    /// Level the zombie was spawned at.
    pub level: u32,
    /// Current location.
    pub position: Position,
    /// Current health.
    pub hp: u32,
    /// Maximum health.
    pub max_hp: u32,
    /// Whether a burn effect is active.
    pub burning: bool,
    /// Heading toward the player in radians.
    pub angle_to_player: f32,
}

/// Read-only snapshot describing all zombies within the arena.
#[derive(Clone, Debug, Default)]
pub struct ZombieView {
    snapshots: Vec<ZombieSnapshot>,
}

impl ZombieView {
    /// Creates a new zombie view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ZombieSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ZombieSnapshot> {
        self.snapshots.iter()
    }

    /// Number of zombies captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no zombies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ZombieSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProjectileSnapshot {
    /// Identifier of the projectile.
    pub id: ProjectileId,
    /// Weapon that fired the projectile.
    pub weapon: WeaponKind,
    /// Current location.
    pub position: Position,
    /// Velocity in units per 60 Hz frame.
    pub velocity: (f32, f32),
}

/// Immutable representation of an explosion still on screen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExplosionSnapshot {
    /// Identifier of the explosion.
    pub id: ExplosionId,
    /// Center of the blast.
    pub position: Position,
    /// Blast radius.
    pub radius: f32,
    /// Fraction of the explosion lifetime already elapsed, in `[0, 1]`.
    pub progress: f32,
}

/// Immutable representation of an owned weapon used by the shop screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WeaponSnapshot {
    /// Weapon variant.
    pub kind: WeaponKind,
    /// Damage per hit including upgrades.
    pub damage: u32,
    /// Current upgrade level.
    pub upgrade_level: u32,
    /// Gold required for the next upgrade.
    pub upgrade_cost: u32,
    /// Whether the weapon is off cooldown.
    pub ready: bool,
    /// Whether the weapon is currently equipped.
    pub equipped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_matches_pythagoras() {
        let origin = Position::new(0.0, 0.0);
        let destination = Position::new(3.0, 4.0);
        assert!((origin.distance_to(destination) - 5.0).abs() < f32::EPSILON);
        assert!((destination.distance_to(origin) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn direction_is_absent_for_coincident_points() {
        let point = Position::new(12.0, 7.5);
        assert_eq!(point.direction_to(point), None);
    }

    #[test]
    fn direction_is_unit_length() {
        let (dx, dy) = Position::new(1.0, 1.0)
            .direction_to(Position::new(4.0, 5.0))
            .expect("direction");
        assert!((dx - 0.6).abs() < 1e-6);
        assert!((dy - 0.8).abs() < 1e-6);
    }

    #[test]
    fn angle_points_down_the_positive_y_axis() {
        let angle = Position::new(0.0, 0.0).angle_to(Position::new(0.0, 10.0));
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn zombie_view_iterates_in_identifier_order() {
        let view = ZombieView::from_snapshots(vec![
            snapshot(4, Position::new(10.0, 0.0)),
            snapshot(2, Position::new(-10.0, 0.0)),
            snapshot(9, Position::new(50.0, 0.0)),
        ]);

        let ids: Vec<u32> = view.iter().map(|zombie| zombie.id.get()).collect();
        assert_eq!(ids, vec![2, 4, 9]);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn zombie_kind_round_trips_through_bincode() {
        let bytes = bincode::serialize(&ZombieKind::Boss).expect("serialize");
        let restored: ZombieKind = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, ZombieKind::Boss);
    }

    #[test]
    fn only_playing_advances_the_simulation() {
        assert!(GameState::Playing.is_playing());
        assert!(!GameState::Paused.is_playing());
        assert!(!GameState::Shop.is_playing());
    }

    fn snapshot(id: u32, position: Position) -> ZombieSnapshot {
        ZombieSnapshot {
            id: ZombieId::new(id),
            kind: ZombieKind::Normal,
            level: 1,
            position,
            hp: 10,
            max_hp: 10,
            burning: false,
            angle_to_player: 0.0,
        }
    }
}
