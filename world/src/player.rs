//! Player state: health, wallet, progression, and the owned weapon set.

use std::collections::BTreeMap;

use zombie_arena_core::{
    tuning::{CharacterStats, Tuning},
    Arena, CharacterKind, Direction, LevelUp, Position, UpgradeError, WeaponKind,
};

use crate::Weapon;

/// The player-controlled survivor.
///
/// Health always stays within `0..=max_hp`. Gold and owned weapons outlive
/// [`Player::reset`], everything else is scoped to a single session.
#[derive(Clone, Debug)]
pub struct Player {
    character: CharacterKind,
    position: Position,
    max_hp: u32,
    hp: u32,
    speed: f32,
    score: u32,
    gold: u32,
    level: u32,
    level_up_score: u32,
    arena: Arena,
    weapons: BTreeMap<WeaponKind, Weapon>,
    equipped: Option<WeaponKind>,
}

impl Player {
    /// Creates a player at the center of the arena with full health.
    #[must_use]
    pub fn new(
        character: CharacterKind,
        stats: CharacterStats,
        arena: Arena,
        level_up_score: u32,
    ) -> Self {
        Self {
            character,
            position: arena.center(),
            max_hp: stats.max_hp,
            hp: stats.max_hp,
            speed: stats.speed,
            score: 0,
            gold: 0,
            level: 1,
            level_up_score,
            arena,
            weapons: BTreeMap::new(),
            equipped: None,
        }
    }

    /// Creates a player using the character stats and arena of `tuning`.
    #[must_use]
    pub fn from_tuning(character: CharacterKind, tuning: &Tuning) -> Self {
        Self::new(
            character,
            tuning.characters.stats(character),
            tuning.arena,
            tuning.gameplay.level_up_score,
        )
    }

    /// Character archetype.
    #[must_use]
    pub const fn character(&self) -> CharacterKind {
        self.character
    }

    /// Current location.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Current health.
    #[must_use]
    pub const fn hp(&self) -> u32 {
        self.hp
    }

    /// Maximum health.
    #[must_use]
    pub const fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Units moved per step.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Session score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Wallet balance.
    #[must_use]
    pub const fn gold(&self) -> u32 {
        self.gold
    }

    /// Level derived from score.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Reports whether any health remains.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Steps `speed` units along one axis, clamped to the arena.
    ///
    /// Returns whether the position changed.
    pub fn move_in(&mut self, direction: Direction) -> bool {
        let (dx, dy) = match direction {
            Direction::Up => (0.0, -self.speed),
            Direction::Down => (0.0, self.speed),
            Direction::Left => (-self.speed, 0.0),
            Direction::Right => (self.speed, 0.0),
        };
        let before = self.position;
        self.position = self.arena.clamp(before.offset(dx, dy));
        self.position != before
    }

    /// Teleports the player, clamping to the arena.
    pub fn set_position(&mut self, position: Position) {
        self.position = self.arena.clamp(position);
    }

    /// Removes up to `amount` health and returns the amount actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.hp);
        self.hp -= applied;
        applied
    }

    /// Restores up to `amount` health and returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Adds points and recomputes the level.
    ///
    /// Crossing into a higher level heals a tenth of maximum health, unless
    /// the player is already dead.
    pub fn add_score(&mut self, points: u32) -> Option<LevelUp> {
        self.score = self.score.saturating_add(points);
        let level = 1 + self.score / self.level_up_score.max(1);
        if level <= self.level {
            return None;
        }

        self.level = level;
        let healed = if self.is_alive() {
            self.heal(self.max_hp / 10)
        } else {
            0
        };
        Some(LevelUp { level, healed })
    }

    /// Adds gold to the wallet.
    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Removes gold from the wallet if the balance covers `amount`.
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        match self.gold.checked_sub(amount) {
            Some(remaining) => {
                self.gold = remaining;
                true
            }
            None => false,
        }
    }

    /// Reports whether the weapon is in the owned set.
    #[must_use]
    pub fn owns(&self, kind: WeaponKind) -> bool {
        self.weapons.contains_key(&kind)
    }

    /// Owned weapon of the provided kind.
    #[must_use]
    pub fn weapon(&self, kind: WeaponKind) -> Option<&Weapon> {
        self.weapons.get(&kind)
    }

    /// Owned weapons in shop order.
    pub fn weapons(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.values()
    }

    /// Currently equipped weapon.
    #[must_use]
    pub fn equipped(&self) -> Option<&Weapon> {
        self.equipped.and_then(|kind| self.weapons.get(&kind))
    }

    /// Mutable access to the currently equipped weapon.
    pub fn equipped_mut(&mut self) -> Option<&mut Weapon> {
        let kind = self.equipped?;
        self.weapons.get_mut(&kind)
    }

    /// Buys `weapon` at its listed price.
    ///
    /// Fails without side effects when the kind is already owned or the
    /// wallet cannot cover the price.
    pub fn buy_weapon(&mut self, weapon: Weapon) -> bool {
        if self.owns(weapon.kind()) || self.gold < weapon.price() {
            return false;
        }
        self.gold -= weapon.price();
        self.weapons.insert(weapon.kind(), weapon).is_none()
    }

    /// Adds `weapon` to the owned set for free unless already owned.
    pub fn grant_weapon(&mut self, weapon: Weapon) -> bool {
        if self.owns(weapon.kind()) {
            return false;
        }
        self.weapons.insert(weapon.kind(), weapon).is_none()
    }

    /// Switches the equipped weapon to an owned one.
    pub fn equip_weapon(&mut self, kind: WeaponKind) -> bool {
        if !self.owns(kind) {
            return false;
        }
        self.equipped = Some(kind);
        true
    }

    /// Pays for one upgrade level of an owned weapon, returning the gold spent.
    pub fn upgrade_weapon(&mut self, kind: WeaponKind) -> Result<u32, UpgradeError> {
        let weapon = self.weapons.get(&kind).ok_or(UpgradeError::NotOwned)?;
        if weapon.is_max_level() {
            return Err(UpgradeError::MaxLevel);
        }

        let cost = weapon.upgrade_cost();
        if !self.spend_gold(cost) {
            return Err(UpgradeError::InsufficientGold);
        }

        let upgraded = self.weapons.get_mut(&kind).is_some_and(Weapon::upgrade);
        debug_assert!(upgraded, "max level checked before charging");
        Ok(cost)
    }

    /// Restores the session-scoped state: full health, zero score, level 1,
    /// the arena center, and weapons ready to fire.
    pub fn reset(&mut self) {
        self.hp = self.max_hp;
        self.score = 0;
        self.level = 1;
        self.position = self.arena.center();
        for weapon in self.weapons.values_mut() {
            weapon.reset_cooldown();
        }
    }

    /// Swaps the character archetype and starts over with its stats.
    pub fn change_character(&mut self, character: CharacterKind, stats: CharacterStats) {
        self.character = character;
        self.max_hp = stats.max_hp;
        self.speed = stats.speed;
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zombie_arena_core::tuning::WeaponTable;

    fn player(character: CharacterKind) -> Player {
        Player::from_tuning(character, &Tuning::default())
    }

    fn weapon(kind: WeaponKind) -> Weapon {
        Weapon::from_table(kind, &WeaponTable::default())
    }

    #[test]
    fn overkill_damage_empties_health() {
        let mut survivor = player(CharacterKind::Balanced);
        assert_eq!(survivor.take_damage(150), 100);
        assert_eq!(survivor.hp(), 0);
        assert!(!survivor.is_alive());
        assert_eq!(survivor.take_damage(10), 0);
    }

    #[test]
    fn heal_is_capped_at_max_hp() {
        let mut survivor = player(CharacterKind::Speed);
        let _ = survivor.take_damage(20);
        assert_eq!(survivor.heal(50), 20);
        assert_eq!(survivor.hp(), 70);
    }

    #[test]
    fn movement_clamps_to_arena() {
        let mut survivor = player(CharacterKind::Speed);
        survivor.set_position(Position::new(2.0, 0.0));

        assert!(survivor.move_in(Direction::Left));
        assert_eq!(survivor.position(), Position::new(0.0, 0.0));
        assert!(!survivor.move_in(Direction::Left));
        assert!(!survivor.move_in(Direction::Up));
        assert!(survivor.move_in(Direction::Down));
        assert_eq!(survivor.position(), Position::new(0.0, 6.0));
    }

    #[test]
    fn purchase_requires_enough_gold_and_new_weapon() {
        let mut survivor = player(CharacterKind::Balanced);
        survivor.add_gold(300);

        assert!(!survivor.buy_weapon(weapon(WeaponKind::M4)));
        assert_eq!(survivor.gold(), 300);
        assert!(!survivor.owns(WeaponKind::M4));

        survivor.add_gold(300);
        assert!(survivor.buy_weapon(weapon(WeaponKind::M4)));
        assert_eq!(survivor.gold(), 100);
        assert!(survivor.owns(WeaponKind::M4));

        survivor.add_gold(1_000);
        assert!(!survivor.buy_weapon(weapon(WeaponKind::M4)));
        assert_eq!(survivor.gold(), 1_100);
    }

    #[test]
    fn reaching_threshold_levels_up_and_heals() {
        let mut survivor = player(CharacterKind::Balanced);
        let _ = survivor.take_damage(30);

        assert_eq!(survivor.add_score(499), None);
        assert_eq!(survivor.level(), 1);

        let level_up = survivor.add_score(1).expect("level up");
        assert_eq!(level_up, LevelUp { level: 2, healed: 10 });
        assert_eq!(survivor.hp(), 80);
    }

    #[test]
    fn level_up_heal_is_capped() {
        let mut survivor = player(CharacterKind::Tank);
        let _ = survivor.take_damage(5);
        let level_up = survivor.add_score(1_000).expect("level up");
        assert_eq!(level_up, LevelUp { level: 3, healed: 5 });
        assert_eq!(survivor.hp(), survivor.max_hp());
    }

    #[test]
    fn dead_players_are_not_revived_by_level_ups() {
        let mut survivor = player(CharacterKind::Balanced);
        let _ = survivor.take_damage(100);
        let level_up = survivor.add_score(500).expect("level up");
        assert_eq!(level_up.healed, 0);
        assert!(!survivor.is_alive());
    }

    #[test]
    fn reset_keeps_gold_and_weapons() {
        let mut survivor = player(CharacterKind::Balanced);
        survivor.add_gold(600);
        assert!(survivor.buy_weapon(weapon(WeaponKind::M4)));
        let _ = survivor.add_score(1_200);
        let _ = survivor.take_damage(40);

        survivor.reset();
        let once = (survivor.hp(), survivor.score(), survivor.level(), survivor.gold());
        survivor.reset();
        let twice = (survivor.hp(), survivor.score(), survivor.level(), survivor.gold());

        assert_eq!(once, (100, 0, 1, 100));
        assert_eq!(once, twice);
        assert!(survivor.owns(WeaponKind::M4));
    }

    #[test]
    fn equip_requires_ownership() {
        let mut survivor = player(CharacterKind::Balanced);
        assert!(!survivor.equip_weapon(WeaponKind::Bazooka));
        assert!(survivor.equipped().is_none());

        assert!(survivor.grant_weapon(weapon(WeaponKind::Bazooka)));
        assert!(survivor.equip_weapon(WeaponKind::Bazooka));
        assert_eq!(
            survivor.equipped().map(Weapon::kind),
            Some(WeaponKind::Bazooka)
        );
    }

    #[test]
    fn upgrade_charges_cost_and_reports_failures() {
        let mut survivor = player(CharacterKind::Balanced);
        assert_eq!(
            survivor.upgrade_weapon(WeaponKind::M4),
            Err(UpgradeError::NotOwned)
        );

        assert!(survivor.grant_weapon(weapon(WeaponKind::M4)));
        assert_eq!(
            survivor.upgrade_weapon(WeaponKind::M4),
            Err(UpgradeError::InsufficientGold)
        );

        survivor.add_gold(200);
        assert_eq!(survivor.upgrade_weapon(WeaponKind::M4), Ok(150));
        assert_eq!(survivor.gold(), 50);
        assert_eq!(
            survivor.weapon(WeaponKind::M4).map(Weapon::upgrade_level),
            Some(1)
        );
    }

    #[test]
    fn changing_character_adopts_new_stats() {
        let tuning = Tuning::default();
        let mut survivor = player(CharacterKind::Speed);
        survivor.add_gold(42);
        survivor.change_character(
            CharacterKind::Tank,
            tuning.characters.stats(CharacterKind::Tank),
        );
        assert_eq!(survivor.character(), CharacterKind::Tank);
        assert_eq!(survivor.hp(), 150);
        assert_eq!(survivor.gold(), 42);
    }
}
