//! Stateless spawn decisions: which variant appears and where.
//!
//! Every function takes its randomness from the caller so decisions can be
//! replayed with a seeded generator.

use rand::Rng;
use zombie_arena_core::{
    tuning::{SpawnTuning, SPAWN_ROLL_RANGE},
    Arena, Position, Tuning, ZombieKind, ZombieSpawn,
};

/// Draws a zombie variant from the probability band covering `level`.
///
/// A single integer roll in `[0, 100)` is mapped through the band's
/// cumulative cutpoints.
pub fn determine_zombie_kind<R: Rng + ?Sized>(
    level: u32,
    spawn: &SpawnTuning,
    rng: &mut R,
) -> ZombieKind {
    let roll = rng.gen_range(0..SPAWN_ROLL_RANGE);
    spawn
        .band_for(level)
        .map_or(ZombieKind::Normal, |band| band.pick(roll))
}

/// Picks a uniformly random point on one of the four arena edges.
pub fn random_spawn_position<R: Rng + ?Sized>(arena: &Arena, rng: &mut R) -> Position {
    match rng.gen_range(0..4u8) {
        0 => Position::new(rng.gen_range(0.0..=arena.width), 0.0),
        1 => Position::new(rng.gen_range(0.0..=arena.width), arena.height),
        2 => Position::new(0.0, rng.gen_range(0.0..=arena.height)),
        _ => Position::new(arena.width, rng.gen_range(0.0..=arena.height)),
    }
}

/// Composes a variant draw and an edge position into a spawn request.
pub fn spawn_order<R: Rng + ?Sized>(level: u32, tuning: &Tuning, rng: &mut R) -> ZombieSpawn {
    let kind = determine_zombie_kind(level, &tuning.spawn, rng);
    let position = random_spawn_position(&tuning.arena, rng);
    ZombieSpawn {
        kind,
        level,
        position,
    }
}
