//! Headless driver that wires the world to the spawning and targeting systems.

use std::time::Duration;

use tracing::{debug, info};
use zombie_arena_core::{CharacterKind, Command, GameState, Tuning, WeaponKind};
use zombie_arena_system_spawning::{Config, Spawning};
use zombie_arena_system_targeting::Targeting;
use zombie_arena_world::{self as world, query, World};

use crate::report::{SessionReport, ShopAction};

/// Owns the world and the systems that feed it commands.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    spawning: Spawning,
    targeting: Targeting,
    frame: Duration,
    sessions_played: u32,
}

impl Simulation {
    pub(crate) fn new(tuning: Tuning, seed: u64, fps: u32) -> Self {
        Self {
            world: World::with_tuning(tuning),
            spawning: Spawning::new(Config::new(seed)),
            targeting: Targeting::new(),
            frame: Duration::from_secs(1) / fps.max(1),
            sessions_played: 0,
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Plays one session until the player dies or `length` of simulated time passes.
    pub(crate) fn play_session(
        &mut self,
        character: CharacterKind,
        length: Duration,
    ) -> SessionReport {
        self.sessions_played += 1;
        let mut report = SessionReport::new(self.sessions_played, character);

        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::StartSession { character },
            &mut events,
        );

        while query::game_state(&self.world).is_playing()
            && query::elapsed(&self.world) < length
        {
            let mut commands = Vec::new();
            self.spawning.handle(
                &events,
                query::game_state(&self.world),
                query::level(&self.world),
                query::live_zombie_count(&self.world),
                query::tuning(&self.world),
                &mut commands,
            );
            self.targeting.handle(
                query::game_state(&self.world),
                query::player(&self.world).as_ref(),
                query::weapon_ready(&self.world),
                &query::zombie_view(&self.world),
                query::tuning(&self.world),
                &mut commands,
            );
            commands.push(Command::Tick { dt: self.frame });

            events.clear();
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
            report.observe(&events);
        }

        report.finish(&self.world);
        info!(
            session = report.session,
            survived = report.survived,
            score = report.score,
            kills = report.total_kills(),
            "session finished"
        );
        report
    }

    /// Spends gold between sessions and returns what was bought.
    ///
    /// New weapons are preferred over upgrades, cheapest first; every new
    /// weapon is equipped immediately and further gold goes into upgrades
    /// of the equipped weapon.
    pub(crate) fn visit_shop(&mut self) -> Vec<ShopAction> {
        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::SetGameState {
                state: GameState::Shop,
            },
            &mut events,
        );

        let mut purchases = Vec::new();
        while let Some(command) = self.next_purchase() {
            events.clear();
            world::apply(&mut self.world, command, &mut events);
            let Some(action) = ShopAction::from_events(&events) else {
                debug!(?events, "shop command rejected");
                break;
            };
            if let ShopAction::Bought { weapon, .. } = action {
                world::apply(
                    &mut self.world,
                    Command::EquipWeapon { weapon },
                    &mut events,
                );
            }
            purchases.push(action);
        }
        purchases
    }

    fn next_purchase(&self) -> Option<Command> {
        let player = query::player(&self.world)?;
        let owned = query::weapon_view(&self.world);
        let tuning = query::tuning(&self.world);

        let cheapest_new = WeaponKind::ALL
            .into_iter()
            .filter(|kind| owned.iter().all(|weapon| weapon.kind != *kind))
            .map(|kind| (tuning.weapons.stats(kind).price, kind))
            .filter(|(price, _)| *price <= player.gold)
            .min();
        if let Some((_, weapon)) = cheapest_new {
            return Some(Command::BuyWeapon { weapon });
        }

        owned
            .iter()
            .find(|weapon| weapon.equipped)
            .filter(|weapon| {
                weapon.upgrade_level < tuning.weapons.upgrade.max_level
                    && weapon.upgrade_cost <= player.gold
            })
            .map(|weapon| Command::UpgradeWeapon {
                weapon: weapon.kind,
            })
    }
}
