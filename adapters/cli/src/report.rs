//! Per-session summaries printed once the run completes.

use std::{collections::BTreeMap, fmt};

use serde::Serialize;
use zombie_arena_core::{CharacterKind, Event, WeaponKind, ZombieKind};
use zombie_arena_world::{query, World};

/// Purchase made in the shop before a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub(crate) enum ShopAction {
    /// A new weapon was bought and equipped.
    Bought { weapon: WeaponKind, price: u32 },
    /// The equipped weapon gained an upgrade level.
    Upgraded {
        weapon: WeaponKind,
        level: u32,
        cost: u32,
    },
}

impl ShopAction {
    /// Interprets the events produced by a single shop command.
    pub(crate) fn from_events(events: &[Event]) -> Option<Self> {
        events.iter().find_map(|event| match *event {
            Event::WeaponPurchased { weapon, price } => Some(Self::Bought { weapon, price }),
            Event::WeaponUpgraded {
                weapon,
                level,
                cost,
            } => Some(Self::Upgraded {
                weapon,
                level,
                cost,
            }),
            _ => None,
        })
    }
}

impl fmt::Display for ShopAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bought { weapon, price } => write!(f, "bought {weapon:?} for {price} gold"),
            Self::Upgraded {
                weapon,
                level,
                cost,
            } => write!(f, "upgraded {weapon:?} to level {level} for {cost} gold"),
        }
    }
}

/// Outcome of one played session.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct SessionReport {
    pub(crate) session: u32,
    pub(crate) character: CharacterKind,
    pub(crate) survived: bool,
    pub(crate) elapsed_seconds: f32,
    pub(crate) score: u32,
    pub(crate) level: u32,
    pub(crate) gold: u32,
    pub(crate) shots_fired: u32,
    pub(crate) damage_taken: u32,
    pub(crate) kills: BTreeMap<ZombieKind, u32>,
    pub(crate) purchases: Vec<ShopAction>,
}

impl SessionReport {
    pub(crate) fn new(session: u32, character: CharacterKind) -> Self {
        Self {
            session,
            character,
            survived: true,
            elapsed_seconds: 0.0,
            score: 0,
            level: 1,
            gold: 0,
            shots_fired: 0,
            damage_taken: 0,
            kills: BTreeMap::new(),
            purchases: Vec::new(),
        }
    }

    /// Folds the events of one frame into the running totals.
    pub(crate) fn observe(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::WeaponFired { .. } => self.shots_fired += 1,
                Event::PlayerDamaged { amount, .. } => self.damage_taken += amount,
                Event::ZombieKilled { kind, .. } => *self.kills.entry(*kind).or_default() += 1,
                _ => {}
            }
        }
    }

    /// Copies the final player state out of the world.
    pub(crate) fn finish(&mut self, world: &World) {
        self.elapsed_seconds = query::elapsed(world).as_secs_f32();
        if let Some(player) = query::player(world) {
            self.survived = player.is_alive();
            self.score = player.score;
            self.level = player.level;
            self.gold = player.gold;
        }
    }

    pub(crate) fn total_kills(&self) -> u32 {
        self.kills.values().sum()
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in &self.purchases {
            writeln!(f, "  shop: {action}")?;
        }
        let outcome = if self.survived { "survived" } else { "died after" };
        write!(
            f,
            "session {} ({:?}): {outcome} {:.1}s, score {}, level {}, gold {}, kills {}, shots {}, damage taken {}",
            self.session,
            self.character,
            self.elapsed_seconds,
            self.score,
            self.level,
            self.gold,
            self.total_kills(),
            self.shots_fired,
            self.damage_taken,
        )
    }
}
