use std::{collections::BTreeMap, time::Duration};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use zombie_arena_core::{
    tuning::SpawnTuning, Arena, CharacterKind, Command, Event, GameState, Tuning, ZombieKind,
};
use zombie_arena_system_spawning::{director, Config, Spawning};
use zombie_arena_world::{self as world, query, World, Zombie};

const DRAWS: u32 = 100_000;

fn distribution(level: u32, seed: u64) -> BTreeMap<ZombieKind, f64> {
    let spawn = SpawnTuning::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut counts: BTreeMap<ZombieKind, u32> = BTreeMap::new();
    for _ in 0..DRAWS {
        *counts
            .entry(director::determine_zombie_kind(level, &spawn, &mut rng))
            .or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(kind, count)| (kind, f64::from(count) / f64::from(DRAWS)))
        .collect()
}

fn assert_share(shares: &BTreeMap<ZombieKind, f64>, kind: ZombieKind, expected: f64) {
    let actual = shares.get(&kind).copied().unwrap_or_default();
    assert!(
        (actual - expected).abs() <= 0.03,
        "{kind:?} share {actual:.3} strays from {expected:.2}"
    );
}

#[test]
fn first_level_spawns_mostly_normal_zombies() {
    let shares = distribution(1, 0x5eed_0001);

    assert_share(&shares, ZombieKind::Normal, 0.80);
    assert_share(&shares, ZombieKind::Fast, 0.20);
    assert_eq!(shares.len(), 2);
}

#[test]
fn late_levels_spawn_every_variant() {
    let shares = distribution(15, 0x5eed_0015);

    assert_share(&shares, ZombieKind::Normal, 0.20);
    assert_share(&shares, ZombieKind::Fast, 0.15);
    assert_share(&shares, ZombieKind::Strong, 0.25);
    assert_share(&shares, ZombieKind::Tank, 0.25);
    assert_share(&shares, ZombieKind::Boss, 0.15);
}

#[test]
fn spawn_positions_always_lie_on_an_edge() {
    let arena = Arena::new(800.0, 600.0);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..10_000 {
        let position = director::random_spawn_position(&arena, &mut rng);
        assert!(arena.is_on_edge(position), "{position:?} is not on an edge");
    }
}

#[test]
fn spawn_orders_build_zombies_on_the_arena_edge() {
    let tuning = Tuning::default();
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for level in 1..20 {
        let zombie = Zombie::new(
            director::spawn_order(level, &tuning, &mut rng),
            &tuning.zombies,
        );
        assert!(tuning.arena.is_on_edge(zombie.position()));
        assert_eq!(zombie.level(), level);
        assert_eq!(zombie.hp(), zombie.max_hp());
    }
}

#[test]
fn spawns_once_the_interval_elapses() {
    let tuning = Tuning::default();
    let mut spawning = Spawning::new(Config::new(0x1234_5678));
    let mut commands = Vec::new();

    spawning.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_millis(400),
        }],
        GameState::Playing,
        1,
        0,
        &tuning,
        &mut commands,
    );
    assert!(commands.is_empty(), "no spawn before a full interval");

    spawning.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_millis(100),
        }],
        GameState::Playing,
        1,
        0,
        &tuning,
        &mut commands,
    );
    assert_eq!(commands.len(), 1);
    assert_eq!(spawning.pending(), Duration::ZERO);
}

#[test]
fn large_steps_still_spawn_a_single_zombie() {
    let tuning = Tuning::default();
    let mut spawning = Spawning::new(Config::new(9));
    let mut commands = Vec::new();

    spawning.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_secs(5),
        }],
        GameState::Playing,
        1,
        0,
        &tuning,
        &mut commands,
    );

    assert_eq!(commands.len(), 1);
}

#[test]
fn population_cap_skips_the_spawn_and_restarts_the_timer() {
    let tuning = Tuning::default();
    let mut spawning = Spawning::new(Config::new(11));
    let mut commands = Vec::new();

    spawning.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_secs(1),
        }],
        GameState::Playing,
        3,
        60,
        &tuning,
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(spawning.pending(), Duration::ZERO);
}

#[test]
fn new_session_restarts_the_timer() {
    let tuning = Tuning::default();
    let mut spawning = Spawning::new(Config::new(5));
    let mut commands = Vec::new();

    spawning.handle(
        &[
            Event::TimeAdvanced {
                dt: Duration::from_millis(450),
            },
            Event::SessionStarted {
                character: CharacterKind::Speed,
            },
        ],
        GameState::Playing,
        1,
        0,
        &tuning,
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(spawning.pending(), Duration::ZERO);
}

#[test]
fn spawn_commands_populate_the_world() {
    let mut world = World::new();
    let mut spawning = Spawning::new(Config::new(0xfeed));
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::StartSession {
            character: CharacterKind::Balanced,
        },
        &mut events,
    );

    for _ in 0..120 {
        let mut commands = Vec::new();
        spawning.handle(
            &events,
            query::game_state(&world),
            query::level(&world),
            query::live_zombie_count(&world),
            query::tuning(&world),
            &mut commands,
        );
        events.clear();

        world::apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(50),
            },
            &mut events,
        );
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
    }

    let zombies = query::zombie_view(&world);
    assert!(zombies.len() >= 10, "only {} zombies spawned", zombies.len());
    assert!(zombies.iter().all(|zombie| zombie.level == 1));
}

#[test]
fn seeded_directors_replay_identically() {
    let tuning = Tuning::default();
    let mut first = ChaCha8Rng::seed_from_u64(77);
    let mut second = ChaCha8Rng::seed_from_u64(77);

    for level in 1..40 {
        assert_eq!(
            director::spawn_order(level, &tuning, &mut first),
            director::spawn_order(level, &tuning, &mut second)
        );
    }
}
