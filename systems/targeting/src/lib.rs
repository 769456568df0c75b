#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure auto-aim system that turns world snapshots into fire commands.
//!
//! Headless hosts rely on it to play sessions without input: whenever the
//! equipped weapon is ready it aims at the nearest zombie the weapon can
//! reach.

use zombie_arena_core::{Command, GameState, PlayerSnapshot, Position, Tuning, ZombieId, ZombieView};

/// Targeting system that reuses a scratch buffer to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct Targeting {
    candidates: Vec<Candidate>,
}

impl Targeting {
    /// Creates a new targeting system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits at most one [`Command::FireWeapon`] aimed at the closest zombie
    /// within range of the equipped weapon.
    ///
    /// Ties are broken by the lower zombie identifier. Nothing is emitted
    /// outside [`GameState::Playing`], while the weapon is cooling down, or
    /// when no zombie is reachable.
    pub fn handle(
        &mut self,
        game_state: GameState,
        player: Option<&PlayerSnapshot>,
        weapon_ready: bool,
        zombies: &ZombieView,
        tuning: &Tuning,
        out: &mut Vec<Command>,
    ) {
        if !game_state.is_playing() || !weapon_ready {
            return;
        }

        let Some(player) = player.filter(|player| player.is_alive()) else {
            return;
        };
        let Some(weapon) = player.equipped else {
            return;
        };
        let range = tuning.weapons.stats(weapon).range;

        self.prepare_candidates(player.position, zombies);

        let mut best: Option<Candidate> = None;
        for candidate in &self.candidates {
            if candidate.distance > range {
                continue;
            }
            match &mut best {
                Some(existing) => {
                    if candidate.precedes(existing) {
                        *existing = *candidate;
                    }
                }
                None => best = Some(*candidate),
            }
        }

        if let Some(target) = best {
            out.push(Command::FireWeapon {
                target: target.position,
            });
        }
    }

    fn prepare_candidates(&mut self, origin: Position, zombies: &ZombieView) {
        self.candidates.clear();
        self.candidates.reserve(zombies.len());

        for snapshot in zombies.iter() {
            if snapshot.hp == 0 {
                continue;
            }
            let distance = origin.distance_to(snapshot.position);
            if distance <= 0.0 {
                continue;
            }
            self.candidates.push(Candidate {
                id: snapshot.id,
                position: snapshot.position,
                distance,
            });
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    id: ZombieId,
    position: Position,
    distance: f32,
}

impl Candidate {
    fn precedes(&self, other: &Self) -> bool {
        match self.distance.total_cmp(&other.distance) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => self.id < other.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zombie_arena_core::{CharacterKind, WeaponKind, ZombieKind, ZombieSnapshot};

    fn player(equipped: Option<WeaponKind>) -> PlayerSnapshot {
        PlayerSnapshot {
            character: CharacterKind::Balanced,
            position: Position::new(100.0, 100.0),
            hp: 100,
            max_hp: 100,
            speed: 4.0,
            score: 0,
            gold: 0,
            level: 1,
            equipped,
        }
    }

    fn zombie(id: u32, x: f32, y: f32) -> ZombieSnapshot {
        ZombieSnapshot {
            id: ZombieId::new(id),
            kind: ZombieKind::Normal,
            level: 1,
            position: Position::new(x, y),
            hp: 30,
            max_hp: 30,
            burning: false,
            angle_to_player: 0.0,
        }
    }

    fn aim(player: &PlayerSnapshot, ready: bool, zombies: Vec<ZombieSnapshot>) -> Vec<Command> {
        let mut system = Targeting::new();
        let mut out = Vec::new();
        system.handle(
            GameState::Playing,
            Some(player),
            ready,
            &ZombieView::from_snapshots(zombies),
            &Tuning::default(),
            &mut out,
        );
        out
    }

    #[test]
    fn aims_at_the_nearest_zombie() {
        let out = aim(
            &player(Some(WeaponKind::Ak47)),
            true,
            vec![zombie(1, 400.0, 100.0), zombie(2, 100.0, 250.0)],
        );

        assert_eq!(
            out,
            vec![Command::FireWeapon {
                target: Position::new(100.0, 250.0)
            }]
        );
    }

    #[test]
    fn equal_distances_prefer_lower_identifier() {
        let out = aim(
            &player(Some(WeaponKind::Ak47)),
            true,
            vec![zombie(7, 200.0, 100.0), zombie(3, 0.0, 100.0)],
        );

        assert_eq!(
            out,
            vec![Command::FireWeapon {
                target: Position::new(0.0, 100.0)
            }]
        );
    }

    #[test]
    fn ignores_zombies_beyond_weapon_range() {
        let out = aim(
            &player(Some(WeaponKind::Flamethrower)),
            true,
            vec![zombie(1, 400.0, 100.0)],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn holds_fire_while_cooling_down_or_unarmed() {
        let zombies = vec![zombie(1, 150.0, 100.0)];
        assert!(aim(&player(Some(WeaponKind::Ak47)), false, zombies.clone()).is_empty());
        assert!(aim(&player(None), true, zombies).is_empty());
    }
}
