//! Numeric stat tables and tuning knobs for every part of the simulation.
//!
//! [`Tuning::default`] reproduces the shipped balance. Hosts may override any
//! subset of values from a TOML document; fields that are left out fall back
//! to their defaults. Every table entry (a single weapon, zombie, or
//! character) must be given in full when overridden.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CharacterKind, Position, WeaponKind, ZombieKind};

/// Upper bound (exclusive) of the spawn roll.
pub const SPAWN_ROLL_RANGE: u32 = 100;

/// Errors raised while loading or validating a [`Tuning`] document.
#[derive(Debug, Error)]
pub enum TuningError {
    /// The tuning file could not be read.
    #[error("failed to read tuning file {path}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The tuning document is not valid TOML for the expected schema.
    #[error("failed to parse tuning document")]
    Parse(#[from] toml::de::Error),
    /// Arena dimensions must be strictly positive and finite.
    #[error("arena dimensions must be positive, got {width}x{height}")]
    InvalidArena {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// The level-up threshold would divide by zero.
    #[error("level-up score threshold must be greater than zero")]
    ZeroLevelThreshold,
    /// No spawn bands were configured.
    #[error("at least one spawn band is required")]
    EmptySpawnBands,
    /// Band level bounds must strictly increase.
    #[error("spawn bands must be ordered by strictly increasing max_level")]
    UnorderedSpawnBands,
    /// The final band must cover every remaining level.
    #[error("the last spawn band must omit max_level to cover all higher levels")]
    MissingCatchAllBand,
    /// A band's cumulative cutpoints are malformed.
    #[error("spawn band {band} must list strictly increasing cutpoints ending at 100")]
    InvalidSpawnTable {
        /// Zero-based index of the offending band.
        band: usize,
    },
}

/// Aggregated tuning knobs controlling every adjustable aspect of the simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield bounds.
    pub arena: Arena,
    /// Per-character health and speed.
    pub characters: CharacterTable,
    /// Per-weapon stats and the shared upgrade curve.
    pub weapons: WeaponTable,
    /// Per-zombie stats and level scaling.
    pub zombies: ZombieTable,
    /// Spawn cadence, population cap, and variant probabilities.
    pub spawn: SpawnTuning,
    /// Collision distances, level thresholds, and effect durations.
    pub gameplay: GameplayTuning,
}

impl Tuning {
    /// Parses and validates a TOML tuning document.
    pub fn from_toml_str(contents: &str) -> Result<Self, TuningError> {
        let tuning: Self = toml::from_str(contents)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reads, parses, and validates a TOML tuning file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Checks the structural constraints the simulation relies on.
    pub fn validate(&self) -> Result<(), TuningError> {
        let Arena { width, height } = self.arena;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(TuningError::InvalidArena { width, height });
        }

        if self.gameplay.level_up_score == 0 {
            return Err(TuningError::ZeroLevelThreshold);
        }

        self.spawn.validate_bands()
    }
}

/// Rectangular playfield; every entity position is clamped to it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    /// Horizontal extent in world units.
    pub width: f32,
    /// Vertical extent in world units.
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl Arena {
    /// Creates an arena with explicit dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Midpoint of the arena, where players start.
    #[must_use]
    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamps a position into `[0, width] x [0, height]`.
    #[must_use]
    pub fn clamp(&self, position: Position) -> Position {
        Position::new(
            position.x().clamp(0.0, self.width),
            position.y().clamp(0.0, self.height),
        )
    }

    /// Reports whether a position lies further than `margin` outside the arena.
    #[must_use]
    pub fn is_beyond(&self, position: Position, margin: f32) -> bool {
        position.x() < -margin
            || position.x() > self.width + margin
            || position.y() < -margin
            || position.y() > self.height + margin
    }

    /// Reports whether a position lies exactly on one of the four edges.
    #[must_use]
    pub fn is_on_edge(&self, position: Position) -> bool {
        let on_vertical = position.x() == 0.0 || position.x() == self.width;
        let on_horizontal = position.y() == 0.0 || position.y() == self.height;
        let inside = (0.0..=self.width).contains(&position.x())
            && (0.0..=self.height).contains(&position.y());
        inside && (on_vertical || on_horizontal)
    }
}

/// Health and speed of a playable character.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterStats {
    /// Maximum health.
    pub max_hp: u32,
    /// Units moved per step.
    pub speed: f32,
}

/// Stats for every [`CharacterKind`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTable {
    /// Fast, fragile archetype.
    pub speed: CharacterStats,
    /// All-round archetype.
    pub balanced: CharacterStats,
    /// Durable, slow archetype.
    pub tank: CharacterStats,
}

impl Default for CharacterTable {
    fn default() -> Self {
        Self {
            speed: CharacterStats {
                max_hp: 70,
                speed: 6.0,
            },
            balanced: CharacterStats {
                max_hp: 100,
                speed: 4.0,
            },
            tank: CharacterStats {
                max_hp: 150,
                speed: 2.8,
            },
        }
    }
}

impl CharacterTable {
    /// Looks up the stats of a character.
    #[must_use]
    pub const fn stats(&self, kind: CharacterKind) -> CharacterStats {
        match kind {
            CharacterKind::Speed => self.speed,
            CharacterKind::Balanced => self.balanced,
            CharacterKind::Tank => self.tank,
        }
    }
}

/// Base stats of a weapon variant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Damage per hit before upgrades.
    pub damage: u32,
    /// Seconds between shots.
    pub fire_rate: f32,
    /// Maximum distance a projectile travels.
    pub range: f32,
    /// Shop price in gold.
    pub price: u32,
    /// Projectile speed in units per 60 Hz frame.
    #[serde(default = "default_projectile_speed")]
    pub projectile_speed: f32,
    /// Blast radius of impacts; only bazooka rounds explode.
    #[serde(default)]
    pub explosion_radius: f32,
    /// Seconds a hit keeps the target burning; only flamethrower hits ignite.
    #[serde(default)]
    pub burn_duration: f32,
}

impl WeaponStats {
    const fn basic(damage: u32, fire_rate: f32, range: f32, price: u32) -> Self {
        Self {
            damage,
            fire_rate,
            range,
            price,
            projectile_speed: DEFAULT_PROJECTILE_SPEED,
            explosion_radius: 0.0,
            burn_duration: 0.0,
        }
    }

    /// Minimum simulated time between two shots.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        seconds(self.fire_rate)
    }

    /// Duration of the burn applied by a hit.
    #[must_use]
    pub fn burn(&self) -> Duration {
        seconds(self.burn_duration)
    }
}

const DEFAULT_PROJECTILE_SPEED: f32 = 15.0;

fn default_projectile_speed() -> f32 {
    DEFAULT_PROJECTILE_SPEED
}

/// Shared upgrade progression applied to every weapon.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeTuning {
    /// Damage added per upgrade level.
    pub damage_increase: u32,
    /// Fraction of the weapon price charged for the first upgrade.
    pub cost_fraction: f32,
    /// Factor the upgrade cost grows by per level.
    pub cost_multiplier: f32,
    /// Highest reachable upgrade level.
    pub max_level: u32,
}

impl Default for UpgradeTuning {
    fn default() -> Self {
        Self {
            damage_increase: 5,
            cost_fraction: 0.3,
            cost_multiplier: 1.5,
            max_level: 10,
        }
    }
}

/// Stats for every [`WeaponKind`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTable {
    /// Starter rifle.
    pub ak47: WeaponStats,
    /// Carbine.
    pub m4: WeaponStats,
    /// Heavy rifle.
    pub a16: WeaponStats,
    /// Rocket launcher.
    pub bazooka: WeaponStats,
    /// Flamethrower.
    pub flamethrower: WeaponStats,
    /// Upgrade curve shared by all weapons.
    pub upgrade: UpgradeTuning,
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            ak47: WeaponStats::basic(10, 0.1, 500.0, 0),
            m4: WeaponStats::basic(12, 0.15, 550.0, 500),
            a16: WeaponStats::basic(18, 0.25, 600.0, 1_000),
            bazooka: WeaponStats {
                explosion_radius: 150.0,
                ..WeaponStats::basic(50, 2.0, 800.0, 2_000)
            },
            flamethrower: WeaponStats {
                burn_duration: 3.0,
                ..WeaponStats::basic(5, 0.05, 250.0, 1_500)
            },
            upgrade: UpgradeTuning::default(),
        }
    }
}

impl WeaponTable {
    /// Looks up the base stats of a weapon.
    #[must_use]
    pub const fn stats(&self, kind: WeaponKind) -> WeaponStats {
        match kind {
            WeaponKind::Ak47 => self.ak47,
            WeaponKind::M4 => self.m4,
            WeaponKind::A16 => self.a16,
            WeaponKind::Bazooka => self.bazooka,
            WeaponKind::Flamethrower => self.flamethrower,
        }
    }
}

/// Base stats of a zombie variant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZombieStats {
    /// Health at level zero.
    pub base_hp: u32,
    /// Units moved per 60 Hz frame.
    pub speed: f32,
    /// Score granted on death.
    pub score: u32,
    /// Gold granted on death.
    pub gold: u32,
    /// Damage dealt to the player on contact.
    pub contact_damage: u32,
}

/// Stats for every [`ZombieKind`] plus level scaling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZombieTable {
    /// Baseline shambler.
    pub normal: ZombieStats,
    /// Quick variant.
    pub fast: ZombieStats,
    /// Sturdy variant.
    pub strong: ZombieStats,
    /// Very durable variant.
    pub tank: ZombieStats,
    /// Boss variant.
    pub boss: ZombieStats,
    /// Extra maximum health per spawn level.
    pub hp_per_level: u32,
}

impl Default for ZombieTable {
    fn default() -> Self {
        Self {
            normal: ZombieStats {
                base_hp: 20,
                speed: 1.5,
                score: 10,
                gold: 5,
                contact_damage: 5,
            },
            fast: ZombieStats {
                base_hp: 15,
                speed: 3.0,
                score: 15,
                gold: 8,
                contact_damage: 4,
            },
            strong: ZombieStats {
                base_hp: 40,
                speed: 1.0,
                score: 25,
                gold: 15,
                contact_damage: 10,
            },
            tank: ZombieStats {
                base_hp: 80,
                speed: 0.5,
                score: 50,
                gold: 30,
                contact_damage: 15,
            },
            boss: ZombieStats {
                base_hp: 200,
                speed: 0.8,
                score: 100,
                gold: 50,
                contact_damage: 25,
            },
            hp_per_level: 10,
        }
    }
}

impl ZombieTable {
    /// Looks up the base stats of a zombie variant.
    #[must_use]
    pub const fn stats(&self, kind: ZombieKind) -> ZombieStats {
        match kind {
            ZombieKind::Normal => self.normal,
            ZombieKind::Fast => self.fast,
            ZombieKind::Strong => self.strong,
            ZombieKind::Tank => self.tank,
            ZombieKind::Boss => self.boss,
        }
    }

    /// Maximum health of a zombie spawned at `level`.
    #[must_use]
    pub fn max_hp(&self, kind: ZombieKind, level: u32) -> u32 {
        self.stats(kind)
            .base_hp
            .saturating_add(level.saturating_mul(self.hp_per_level))
    }
}

/// One cumulative cutpoint of a spawn band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnWeight {
    /// Variant selected when the roll falls below `below`.
    pub kind: ZombieKind,
    /// Exclusive cumulative upper bound of the roll in `[0, 100)`.
    pub below: u32,
}

/// Cumulative probability table used for a range of levels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnBand {
    /// Highest level covered by the band; `None` covers every higher level.
    pub max_level: Option<u32>,
    /// Cutpoints ordered by increasing `below`.
    pub table: Vec<SpawnWeight>,
}

impl SpawnBand {
    fn new(max_level: Option<u32>, table: &[(ZombieKind, u32)]) -> Self {
        Self {
            max_level,
            table: table
                .iter()
                .map(|&(kind, below)| SpawnWeight { kind, below })
                .collect(),
        }
    }

    /// Reports whether the band applies to `level`.
    #[must_use]
    pub fn covers(&self, level: u32) -> bool {
        self.max_level.map_or(true, |max| level <= max)
    }

    /// Maps a roll in `[0, 100)` to a zombie variant.
    ///
    /// Rolls beyond the final cutpoint select the final variant.
    #[must_use]
    pub fn pick(&self, roll: u32) -> ZombieKind {
        self.table
            .iter()
            .find(|weight| roll < weight.below)
            .or_else(|| self.table.last())
            .map_or(ZombieKind::Normal, |weight| weight.kind)
    }

    fn is_well_formed(&self) -> bool {
        let increasing = self
            .table
            .windows(2)
            .all(|pair| pair[0].below < pair[1].below);
        let ends_at_range = self
            .table
            .last()
            .is_some_and(|weight| weight.below == SPAWN_ROLL_RANGE);
        let starts_positive = self.table.first().is_some_and(|weight| weight.below > 0);
        increasing && ends_at_range && starts_positive
    }
}

/// Spawn cadence, population cap, and the level-banded variant table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Zombies spawned per second at level 1.
    pub initial_rate: f32,
    /// Additional zombies per second for each level above 1.
    pub rate_per_level: f32,
    /// Live zombie cap at level 1.
    pub max_zombies: u32,
    /// Additional cap for each level above 1.
    pub max_zombies_per_level: u32,
    /// Level bands ordered by increasing `max_level`, catch-all last.
    pub bands: Vec<SpawnBand>,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        use ZombieKind::{Boss, Fast, Normal, Strong, Tank};

        Self {
            initial_rate: 2.0,
            rate_per_level: 0.2,
            max_zombies: 50,
            max_zombies_per_level: 5,
            bands: vec![
                SpawnBand::new(Some(2), &[(Normal, 80), (Fast, 100)]),
                SpawnBand::new(Some(5), &[(Normal, 50), (Fast, 75), (Strong, 100)]),
                SpawnBand::new(
                    Some(9),
                    &[(Normal, 30), (Fast, 50), (Strong, 80), (Tank, 100)],
                ),
                SpawnBand::new(
                    None,
                    &[
                        (Normal, 20),
                        (Fast, 35),
                        (Strong, 60),
                        (Tank, 85),
                        (Boss, 100),
                    ],
                ),
            ],
        }
    }
}

impl SpawnTuning {
    /// First band covering `level`.
    #[must_use]
    pub fn band_for(&self, level: u32) -> Option<&SpawnBand> {
        self.bands.iter().find(|band| band.covers(level))
    }

    /// Zombies spawned per second at `level`; never decreases as level rises.
    #[must_use]
    pub fn spawn_rate(&self, level: u32) -> f32 {
        let extra_levels = level.saturating_sub(1) as f32;
        self.initial_rate + extra_levels * self.rate_per_level.max(0.0)
    }

    /// Time between two spawns at `level`; `None` when spawning is disabled.
    #[must_use]
    pub fn spawn_interval(&self, level: u32) -> Option<Duration> {
        let rate = self.spawn_rate(level);
        if rate > 0.0 && rate.is_finite() {
            Duration::try_from_secs_f32(rate.recip()).ok()
        } else {
            None
        }
    }

    /// Live zombie cap at `level`; never decreases as level rises.
    #[must_use]
    pub fn zombie_cap(&self, level: u32) -> u32 {
        self.max_zombies.saturating_add(
            level
                .saturating_sub(1)
                .saturating_mul(self.max_zombies_per_level),
        )
    }

    fn validate_bands(&self) -> Result<(), TuningError> {
        let Some((last, bounded)) = self.bands.split_last() else {
            return Err(TuningError::EmptySpawnBands);
        };

        if last.max_level.is_some() {
            return Err(TuningError::MissingCatchAllBand);
        }

        let mut previous: Option<u32> = None;
        for band in bounded {
            let Some(max_level) = band.max_level else {
                return Err(TuningError::UnorderedSpawnBands);
            };
            if previous.is_some_and(|bound| max_level <= bound) {
                return Err(TuningError::UnorderedSpawnBands);
            }
            previous = Some(max_level);
        }

        match self.bands.iter().position(|band| !band.is_well_formed()) {
            Some(band) => Err(TuningError::InvalidSpawnTable { band }),
            None => Ok(()),
        }
    }
}

/// Distances, thresholds, and durations shared by the whole simulation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayTuning {
    /// Score required per player level.
    pub level_up_score: u32,
    /// Distance below which a zombie touches the player.
    pub collision_distance: f32,
    /// Distance below which a projectile hits a zombie.
    pub bullet_collision_distance: f32,
    /// Distance outside the arena after which projectiles are discarded.
    pub offscreen_margin: f32,
    /// Seconds an explosion stays visible.
    pub explosion_duration: f32,
    /// Seconds a zombie waits between two contact hits on the player.
    pub contact_interval: f32,
    /// Frames per second that per-frame speeds are expressed against.
    pub frame_scale: f32,
}

impl Default for GameplayTuning {
    fn default() -> Self {
        Self {
            level_up_score: 500,
            collision_distance: 50.0,
            bullet_collision_distance: 20.0,
            offscreen_margin: 100.0,
            explosion_duration: 0.5,
            contact_interval: 1.0,
            frame_scale: 60.0,
        }
    }
}

impl GameplayTuning {
    /// Lifetime of an explosion.
    #[must_use]
    pub fn explosion_lifetime(&self) -> Duration {
        seconds(self.explosion_duration)
    }

    /// Delay between two contact hits from the same zombie.
    #[must_use]
    pub fn contact_cooldown(&self) -> Duration {
        seconds(self.contact_interval)
    }
}

/// Converts a configured number of seconds into whole milliseconds, treating
/// negative and non-finite values as zero.
fn seconds(value: f32) -> Duration {
    if !value.is_finite() || value <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_millis((f64::from(value) * 1_000.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_durations_are_whole_milliseconds() {
        let weapons = WeaponTable::default();
        assert_eq!(weapons.ak47.cooldown(), Duration::from_millis(100));
        assert_eq!(weapons.m4.cooldown(), Duration::from_millis(150));
        assert_eq!(weapons.flamethrower.cooldown(), Duration::from_millis(50));
        assert_eq!(weapons.flamethrower.burn(), Duration::from_secs(3));

        let gameplay = GameplayTuning::default();
        assert_eq!(gameplay.explosion_lifetime(), Duration::from_millis(500));
        assert_eq!(gameplay.contact_cooldown(), Duration::from_secs(1));
    }

    #[test]
    fn negative_and_nan_durations_collapse_to_zero() {
        assert_eq!(seconds(-1.0), Duration::ZERO);
        assert_eq!(seconds(f32::NAN), Duration::ZERO);
    }

    #[test]
    fn defaults_are_valid() {
        Tuning::default().validate().expect("default tuning is valid");
    }

    #[test]
    fn default_bands_reproduce_cutpoints() {
        let spawn = SpawnTuning::default();
        let band = spawn.band_for(1).expect("band");
        assert_eq!(band.pick(79), ZombieKind::Normal);
        assert_eq!(band.pick(80), ZombieKind::Fast);

        let band = spawn.band_for(5).expect("band");
        assert_eq!(band.pick(49), ZombieKind::Normal);
        assert_eq!(band.pick(74), ZombieKind::Fast);
        assert_eq!(band.pick(75), ZombieKind::Strong);

        let band = spawn.band_for(9).expect("band");
        assert_eq!(band.pick(29), ZombieKind::Normal);
        assert_eq!(band.pick(49), ZombieKind::Fast);
        assert_eq!(band.pick(79), ZombieKind::Strong);
        assert_eq!(band.pick(80), ZombieKind::Tank);

        let band = spawn.band_for(10).expect("band");
        assert_eq!(band.pick(19), ZombieKind::Normal);
        assert_eq!(band.pick(34), ZombieKind::Fast);
        assert_eq!(band.pick(59), ZombieKind::Strong);
        assert_eq!(band.pick(84), ZombieKind::Tank);
        assert_eq!(band.pick(85), ZombieKind::Boss);
        assert_eq!(band.pick(99), ZombieKind::Boss);
    }

    #[test]
    fn spawn_rate_and_cap_grow_with_level() {
        let spawn = SpawnTuning::default();
        assert!((spawn.spawn_rate(1) - 2.0).abs() < f32::EPSILON);
        assert!((spawn.spawn_rate(6) - 3.0).abs() < 1e-5);
        assert_eq!(spawn.zombie_cap(1), 50);
        assert_eq!(spawn.zombie_cap(3), 60);
        for level in 1..30 {
            assert!(spawn.spawn_rate(level + 1) >= spawn.spawn_rate(level));
            assert!(spawn.zombie_cap(level + 1) >= spawn.zombie_cap(level));
        }
        assert_eq!(spawn.spawn_interval(1), Some(Duration::from_millis(500)));
    }

    #[test]
    fn zero_rate_disables_spawning() {
        let spawn = SpawnTuning {
            initial_rate: 0.0,
            rate_per_level: 0.0,
            ..SpawnTuning::default()
        };
        assert_eq!(spawn.spawn_interval(4), None);
    }

    #[test]
    fn zombie_health_scales_with_level() {
        let zombies = ZombieTable::default();
        assert_eq!(zombies.max_hp(ZombieKind::Normal, 5), 70);
        assert_eq!(zombies.max_hp(ZombieKind::Boss, 0), 200);
    }

    #[test]
    fn partial_toml_overrides_keep_defaults() {
        let tuning = Tuning::from_toml_str(
            r#"
            [arena]
            width = 800.0

            [gameplay]
            level_up_score = 250

            [weapons.m4]
            damage = 20
            fire_rate = 0.2
            range = 400.0
            price = 100
            "#,
        )
        .expect("valid document");

        assert!((tuning.arena.width - 800.0).abs() < f32::EPSILON);
        assert!((tuning.arena.height - 1080.0).abs() < f32::EPSILON);
        assert_eq!(tuning.gameplay.level_up_score, 250);
        assert_eq!(tuning.weapons.m4.damage, 20);
        assert!((tuning.weapons.m4.projectile_speed - 15.0).abs() < f32::EPSILON);
        assert_eq!(tuning.weapons.bazooka, WeaponTable::default().bazooka);
    }

    #[test]
    fn custom_bands_parse_from_toml() {
        let tuning = Tuning::from_toml_str(
            r#"
            [[spawn.bands]]
            max_level = 3
            table = [{ kind = "fast", below = 100 }]

            [[spawn.bands]]
            table = [{ kind = "boss", below = 100 }]
            "#,
        )
        .expect("valid document");

        assert_eq!(tuning.spawn.bands.len(), 2);
        assert_eq!(tuning.spawn.band_for(3).map(|b| b.pick(0)), Some(ZombieKind::Fast));
        assert_eq!(tuning.spawn.band_for(4).map(|b| b.pick(0)), Some(ZombieKind::Boss));
    }

    #[test]
    fn rejects_table_that_does_not_reach_one_hundred() {
        let error = Tuning::from_toml_str(
            r#"
            [[spawn.bands]]
            table = [{ kind = "normal", below = 60 }, { kind = "fast", below = 90 }]
            "#,
        )
        .expect_err("incomplete table");
        assert!(matches!(error, TuningError::InvalidSpawnTable { band: 0 }));
    }

    #[test]
    fn rejects_missing_catch_all_band() {
        let error = Tuning::from_toml_str(
            r#"
            [[spawn.bands]]
            max_level = 4
            table = [{ kind = "normal", below = 100 }]
            "#,
        )
        .expect_err("no catch-all");
        assert!(matches!(error, TuningError::MissingCatchAllBand));
    }

    #[test]
    fn rejects_unordered_bands() {
        let mut tuning = Tuning::default();
        tuning.spawn.bands.swap(0, 1);
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::UnorderedSpawnBands)
        ));
    }

    #[test]
    fn rejects_degenerate_arena() {
        let mut tuning = Tuning::default();
        tuning.arena.height = 0.0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvalidArena { .. })
        ));
    }

    #[test]
    fn rejects_zero_level_threshold() {
        let mut tuning = Tuning::default();
        tuning.gameplay.level_up_score = 0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::ZeroLevelThreshold)
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let error = Tuning::load("/definitely/not/here.toml").expect_err("missing");
        match error {
            TuningError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.toml"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn edge_detection_requires_boundary_coordinate() {
        let arena = Arena::new(100.0, 50.0);
        assert!(arena.is_on_edge(Position::new(0.0, 20.0)));
        assert!(arena.is_on_edge(Position::new(37.5, 50.0)));
        assert!(!arena.is_on_edge(Position::new(10.0, 10.0)));
        assert!(!arena.is_on_edge(Position::new(120.0, 0.0)));
    }
}
