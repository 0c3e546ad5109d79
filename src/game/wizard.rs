use std::collections::BTreeSet;

use crate::config::{
    BASE_WAND_DAMAGE, CASTING_POSE_FRAMES, GRAVITY, GROUND_Y, JUMP_STRENGTH, MAX_STAT_LEVEL,
    MIN_CAST_COOLDOWN, PLAYER_MAX_HEALTH, PLAYER_SIZE, PLAYER_SPEED, PLAYER_START_X,
    SCREEN_WIDTH, WAND_COLORS,
};
use crate::ecs::weapon_stats::weapon_stats;
use crate::game::collision::Rect;
use crate::protocol::{AbilityKind, FrameInput, UpgradeKind, Vec2, WeaponKind};

// ── Upgrade ladder ──────────────────────────────────────────────────

/// Card-draft levels for the capped stats. Health is tracked but uncapped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeLevels {
    pub speed: u32,
    pub damage: u32,
    pub multishot: u32,
    pub piercing: u32,
    pub health: u32,
}

impl UpgradeLevels {
    /// Current level for a leveled stat; `None` for coin cards.
    pub fn get(&self, kind: UpgradeKind) -> Option<u32> {
        match kind {
            UpgradeKind::Speed => Some(self.speed),
            UpgradeKind::Damage => Some(self.damage),
            UpgradeKind::Multishot => Some(self.multishot),
            UpgradeKind::Piercing => Some(self.piercing),
            UpgradeKind::Health => Some(self.health),
            UpgradeKind::Coins | UpgradeKind::BonusCoins => None,
        }
    }

    fn slot_mut(&mut self, kind: UpgradeKind) -> Option<&mut u32> {
        match kind {
            UpgradeKind::Speed => Some(&mut self.speed),
            UpgradeKind::Damage => Some(&mut self.damage),
            UpgradeKind::Multishot => Some(&mut self.multishot),
            UpgradeKind::Piercing => Some(&mut self.piercing),
            UpgradeKind::Health => Some(&mut self.health),
            UpgradeKind::Coins | UpgradeKind::BonusCoins => None,
        }
    }

    pub fn is_capped(kind: UpgradeKind) -> bool {
        matches!(
            kind,
            UpgradeKind::Speed | UpgradeKind::Damage | UpgradeKind::Multishot | UpgradeKind::Piercing
        )
    }

    pub fn is_maxed(&self, kind: UpgradeKind) -> bool {
        Self::is_capped(kind) && self.get(kind).unwrap_or(0) >= MAX_STAT_LEVEL
    }

    /// Bumps the level by one. Capped stats stop at the max; returns `false`
    /// when nothing changed.
    pub fn bump(&mut self, kind: UpgradeKind) -> bool {
        let capped = Self::is_capped(kind);
        match self.slot_mut(kind) {
            Some(level) if !capped || *level < MAX_STAT_LEVEL => {
                *level += 1;
                true
            }
            _ => false,
        }
    }
}

// ── Wizard stat block ───────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Wizard {
    /// Hitbox centre.
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing_right: bool,
    pub jumping: bool,
    pub is_casting: bool,
    pub cast_cooldown: u32,
    pub health: f32,
    pub max_health: f32,
    pub damage_multiplier: f32,
    pub attack_speed_boost: u32,
    pub multishot: u32,
    pub piercing: u32,
    pub upgrade_levels: UpgradeLevels,
    pub unlocked_weapons: BTreeSet<WeaponKind>,
    pub current_weapon: WeaponKind,
    pub abilities: BTreeSet<AbilityKind>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// A fresh level-one wizard standing at the spawn point.
    pub fn new() -> Self {
        let mut unlocked_weapons = BTreeSet::new();
        unlocked_weapons.insert(WeaponKind::Default);
        Self {
            position: Vec2::new(PLAYER_START_X, GROUND_Y - PLAYER_SIZE / 2.0),
            velocity: Vec2::default(),
            facing_right: true,
            jumping: false,
            is_casting: false,
            cast_cooldown: 0,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            damage_multiplier: 1.0,
            attack_speed_boost: 0,
            multishot: 1,
            piercing: 0,
            upgrade_levels: UpgradeLevels::default(),
            unlocked_weapons,
            current_weapon: WeaponKind::Default,
            abilities: BTreeSet::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.position, PLAYER_SIZE, PLAYER_SIZE)
    }

    pub fn facing_sign(&self) -> f32 {
        if self.facing_right {
            1.0
        } else {
            -1.0
        }
    }

    /// Where projectiles leave the staff.
    pub fn staff_tip(&self) -> Vec2 {
        Vec2::new(
            self.position.x + 30.0 * self.facing_sign(),
            self.position.y + PLAYER_SIZE / 2.0 - 40.0,
        )
    }

    /// Damage of one default wand bolt before weapon and multishot factors.
    pub fn player_damage(&self) -> f32 {
        BASE_WAND_DAMAGE * self.damage_multiplier
    }

    pub fn wand_color(&self) -> [u8; 3] {
        let tier = (self.upgrade_levels.multishot as usize).min(WAND_COLORS.len() - 1);
        WAND_COLORS[tier]
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, self.max_health);
    }

    pub fn has_ability(&self, ability: AbilityKind) -> bool {
        self.abilities.contains(&ability)
    }

    /// Grants an ability; weapon unlocks also join the weapon rotation.
    pub fn grant_ability(&mut self, ability: AbilityKind) {
        self.abilities.insert(ability);
        let weapon = match ability {
            AbilityKind::ArcaneVolley => Some(WeaponKind::ArcaneVolley),
            AbilityKind::VoidLance => Some(WeaponKind::VoidLance),
            AbilityKind::FireRing => Some(WeaponKind::FireRing),
            AbilityKind::Lightning | AbilityKind::Tornado | AbilityKind::Dragon => None,
        };
        if let Some(weapon) = weapon {
            self.unlocked_weapons.insert(weapon);
        }
    }

    /// Switches to the weapon in `slot` (1–4). Locked or unknown slots leave
    /// the current weapon untouched.
    pub fn select_weapon(&mut self, slot: u8) -> bool {
        match WeaponKind::from_slot(slot) {
            Some(weapon) if self.unlocked_weapons.contains(&weapon) => {
                self.current_weapon = weapon;
                true
            }
            _ => false,
        }
    }

    /// Horizontal walk, jump and gravity for one frame, clamped to the
    /// screen and the ground line.
    pub fn update_movement(&mut self, input: &FrameInput) {
        self.velocity.x = 0.0;
        if input.move_left {
            self.velocity.x = -PLAYER_SPEED;
            self.facing_right = false;
        }
        if input.move_right {
            self.velocity.x = PLAYER_SPEED;
            self.facing_right = true;
        }

        if input.jump && !self.jumping {
            self.velocity.y = JUMP_STRENGTH;
            self.jumping = true;
        }

        self.velocity.y += GRAVITY;
        self.position.y += self.velocity.y;
        self.position.x += self.velocity.x;

        let half = PLAYER_SIZE / 2.0;
        self.position.x = self.position.x.clamp(half, SCREEN_WIDTH - half);
        if self.position.y + half > GROUND_Y {
            self.position.y = GROUND_Y - half;
            self.velocity.y = 0.0;
            self.jumping = false;
        }
    }

    pub fn tick_cast_cooldown(&mut self) {
        if self.cast_cooldown > 0 {
            self.cast_cooldown -= 1;
            if self.cast_cooldown < CASTING_POSE_FRAMES {
                self.is_casting = false;
            }
        }
    }

    /// Starts a cast of the current weapon if the staff is ready.
    pub fn try_begin_cast(&mut self) -> bool {
        if self.cast_cooldown > 0 {
            return false;
        }
        let base = weapon_stats(self.current_weapon).base_cooldown;
        self.is_casting = true;
        self.cast_cooldown = base.saturating_sub(self.attack_speed_boost).max(MIN_CAST_COOLDOWN);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_wizard_has_base_stats() {
        let w = Wizard::new();
        assert_eq!(w.health, PLAYER_MAX_HEALTH);
        assert_eq!(w.damage_multiplier, 1.0);
        assert_eq!(w.multishot, 1);
        assert_eq!(w.piercing, 0);
        assert_eq!(w.current_weapon, WeaponKind::Default);
        assert!(w.abilities.is_empty());
        assert_eq!(w.rect().bottom(), GROUND_Y);
    }

    #[test]
    fn selecting_locked_weapon_is_ignored() {
        let mut w = Wizard::new();
        assert!(!w.select_weapon(3));
        assert_eq!(w.current_weapon, WeaponKind::Default);
        assert!(!w.select_weapon(9));
        assert_eq!(w.current_weapon, WeaponKind::Default);
    }

    #[test]
    fn granting_weapon_ability_unlocks_slot() {
        let mut w = Wizard::new();
        w.grant_ability(AbilityKind::VoidLance);
        assert!(w.select_weapon(3));
        assert_eq!(w.current_weapon, WeaponKind::VoidLance);
        assert!(w.select_weapon(1));
        assert_eq!(w.current_weapon, WeaponKind::Default);
    }

    #[test]
    fn health_is_clamped() {
        let mut w = Wizard::new();
        w.take_damage(250.0);
        assert_eq!(w.health, 0.0);
        assert!(!w.is_alive());
        w.take_damage(-500.0);
        assert_eq!(w.health, w.max_health);
    }

    #[test]
    fn cast_cooldown_respects_floor() {
        let mut w = Wizard::new();
        assert!(w.try_begin_cast());
        assert_eq!(w.cast_cooldown, 20);
        assert!(!w.try_begin_cast());

        let mut fast = Wizard::new();
        fast.attack_speed_boost = 40;
        assert!(fast.try_begin_cast());
        assert_eq!(fast.cast_cooldown, MIN_CAST_COOLDOWN);
    }

    #[test]
    fn casting_pose_drops_near_end_of_cooldown() {
        let mut w = Wizard::new();
        w.try_begin_cast();
        for _ in 0..10 {
            w.tick_cast_cooldown();
        }
        assert!(w.is_casting);
        w.tick_cast_cooldown();
        assert!(!w.is_casting);
    }

    #[test]
    fn jump_returns_to_ground() {
        let mut w = Wizard::new();
        let ground_y = w.position.y;
        let jump = FrameInput {
            jump: true,
            ..Default::default()
        };
        w.update_movement(&jump);
        assert!(w.position.y < ground_y);
        assert!(w.jumping);
        for _ in 0..120 {
            w.update_movement(&FrameInput::default());
        }
        assert_eq!(w.position.y, ground_y);
        assert!(!w.jumping);
    }

    #[test]
    fn walking_is_clamped_to_screen() {
        let mut w = Wizard::new();
        let left = FrameInput {
            move_left: true,
            ..Default::default()
        };
        for _ in 0..100 {
            w.update_movement(&left);
        }
        assert_eq!(w.position.x, PLAYER_SIZE / 2.0);
        assert!(!w.facing_right);
    }

    #[test]
    fn capped_levels_stop_at_three() {
        let mut levels = UpgradeLevels::default();
        for _ in 0..3 {
            assert!(levels.bump(UpgradeKind::Speed));
        }
        assert!(!levels.bump(UpgradeKind::Speed));
        assert_eq!(levels.speed, 3);
        assert!(levels.is_maxed(UpgradeKind::Speed));

        for _ in 0..5 {
            assert!(levels.bump(UpgradeKind::Health));
        }
        assert_eq!(levels.health, 5);
        assert!(!levels.is_maxed(UpgradeKind::Health));
        assert!(!levels.bump(UpgradeKind::Coins));
    }
}
