#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system responsible for emitting zombie spawn commands.
//!
//! The system turns elapsed simulation time into [`Command::SpawnZombie`]
//! requests, paced by the level-dependent spawn rate and bounded by the
//! live-zombie cap. Variant and position draws live in [`director`].

pub mod director;

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;
use zombie_arena_core::{Command, Event, GameState, Tuning};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration seeding the spawn generator with `rng_seed`.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that emits spawn commands while a session is playing.
#[derive(Debug)]
pub struct Spawning {
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            accumulator: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and world facts to emit spawn commands.
    ///
    /// At most one zombie is requested per call: once the timer reaches the
    /// spawn interval for `level` it restarts from zero, and the spawn is
    /// skipped when `live_zombies` already meets the cap.
    pub fn handle(
        &mut self,
        events: &[Event],
        game_state: GameState,
        level: u32,
        live_zombies: usize,
        tuning: &Tuning,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::SessionStarted { .. } => self.accumulator = Duration::ZERO,
                Event::TimeAdvanced { dt } => {
                    self.accumulator = self.accumulator.saturating_add(*dt);
                }
                _ => {}
            }
        }

        if !game_state.is_playing() {
            return;
        }

        let Some(interval) = tuning.spawn.spawn_interval(level) else {
            return;
        };
        if self.accumulator < interval {
            return;
        }
        self.accumulator = Duration::ZERO;

        let cap = tuning.spawn.zombie_cap(level);
        if u32::try_from(live_zombies).map_or(true, |live| live >= cap) {
            trace!(live_zombies, cap, "spawn skipped at population cap");
            return;
        }

        let spawn = director::spawn_order(level, tuning, &mut self.rng);
        trace!(kind = ?spawn.kind, level, "spawn requested");
        out.push(Command::SpawnZombie { spawn });
    }

    /// Simulated time accumulated toward the next spawn.
    #[must_use]
    pub fn pending(&self) -> Duration {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advanced(millis: u64) -> Event {
        Event::TimeAdvanced {
            dt: Duration::from_millis(millis),
        }
    }

    #[test]
    fn paused_sessions_keep_the_timer() {
        let tuning = Tuning::default();
        let mut spawning = Spawning::new(Config::new(3));
        let mut commands = Vec::new();

        spawning.handle(
            &[advanced(300)],
            GameState::Playing,
            1,
            0,
            &tuning,
            &mut commands,
        );
        spawning.handle(&[], GameState::Paused, 1, 0, &tuning, &mut commands);

        assert!(commands.is_empty());
        assert_eq!(spawning.pending(), Duration::from_millis(300));
    }

    #[test]
    fn disabled_spawn_rate_never_spawns() {
        let mut tuning = Tuning::default();
        tuning.spawn.initial_rate = 0.0;
        tuning.spawn.rate_per_level = 0.0;
        let mut spawning = Spawning::new(Config::new(3));
        let mut commands = Vec::new();

        spawning.handle(
            &[advanced(60_000)],
            GameState::Playing,
            1,
            0,
            &tuning,
            &mut commands,
        );

        assert!(commands.is_empty());
    }
}
