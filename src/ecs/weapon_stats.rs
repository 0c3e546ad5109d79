use crate::protocol::WeaponKind;

/// How a weapon's projectiles move after they leave the staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Straight,
    /// Steers toward the nearest living enemy every tick.
    Seeking,
}

/// How many enemies a weapon's projectiles may pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PierceRule {
    /// Uses the wizard's piercing stat.
    FromStats,
    Unlimited,
}

/// Spawn and motion rules for one weapon.
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    pub weapon: WeaponKind,
    pub projectiles_per_cast: u32,
    /// Max random deviation from the facing direction, in radians.
    pub spread: f32,
    pub damage_factor: f32,
    pub speed_factor: f32,
    pub scale: f32,
    pub life: u32,
    pub pierce: PierceRule,
    pub motion: Motion,
    pub base_cooldown: u32,
}

/// Returns the full spec for a given weapon.
pub fn weapon_stats(weapon: WeaponKind) -> WeaponSpec {
    match weapon {
        WeaponKind::Default => WeaponSpec {
            weapon: WeaponKind::Default,
            projectiles_per_cast: 1,
            spread: 0.0,
            damage_factor: 1.0,
            speed_factor: 1.0,
            scale: 1.0,
            life: 100,
            pierce: PierceRule::FromStats,
            motion: Motion::Straight,
            base_cooldown: 20,
        },
        WeaponKind::ArcaneVolley => WeaponSpec {
            weapon: WeaponKind::ArcaneVolley,
            projectiles_per_cast: 5,
            spread: 0.4,
            damage_factor: 0.5,
            speed_factor: 1.0,
            scale: 0.7,
            life: 50,
            pierce: PierceRule::FromStats,
            motion: Motion::Seeking,
            base_cooldown: 30,
        },
        WeaponKind::VoidLance => WeaponSpec {
            weapon: WeaponKind::VoidLance,
            projectiles_per_cast: 1,
            spread: 0.0,
            damage_factor: 2.5,
            speed_factor: 2.5,
            scale: 1.5,
            life: 80,
            pierce: PierceRule::Unlimited,
            motion: Motion::Straight,
            base_cooldown: 40,
        },
        WeaponKind::FireRing => WeaponSpec {
            weapon: WeaponKind::FireRing,
            projectiles_per_cast: 1,
            spread: 0.0,
            damage_factor: 3.0,
            speed_factor: 0.6,
            scale: 3.0,
            life: 180,
            pierce: PierceRule::Unlimited,
            motion: Motion::Straight,
            base_cooldown: 60,
        },
    }
}

/// Visual scale multiplier from the multishot upgrade level (starts at 1).
pub fn multishot_scale(level: u32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * 0.3
}

/// Damage multiplier from the multishot upgrade level (starts at 1).
pub fn multishot_damage(level: u32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * 0.4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multishot_level_one_is_neutral() {
        assert_eq!(multishot_scale(1), 1.0);
        assert_eq!(multishot_damage(1), 1.0);
    }

    #[test]
    fn multishot_scales_linearly() {
        assert!((multishot_scale(3) - 1.6).abs() < 1e-6);
        assert!((multishot_damage(4) - 2.2).abs() < 1e-6);
    }

    #[test]
    fn lance_and_ring_pierce_everything() {
        assert_eq!(weapon_stats(WeaponKind::VoidLance).pierce, PierceRule::Unlimited);
        assert_eq!(weapon_stats(WeaponKind::FireRing).pierce, PierceRule::Unlimited);
        assert_eq!(weapon_stats(WeaponKind::Default).pierce, PierceRule::FromStats);
    }

    #[test]
    fn volley_fires_five_short_lived_seekers() {
        let spec = weapon_stats(WeaponKind::ArcaneVolley);
        assert_eq!(spec.projectiles_per_cast, 5);
        assert_eq!(spec.life, 50);
        assert_eq!(spec.motion, Motion::Seeking);
        assert_eq!(spec.damage_factor, 0.5);
    }
}
