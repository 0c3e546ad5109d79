use crate::config::{BOSS_SIZE, OGRE_SPEED};
use crate::protocol::EnemyKind;

use super::components::{EnemyStats, Hitbox};

/// Returns the fixed attack tuning and base movement speed for an enemy type.
pub fn enemy_stats(kind: EnemyKind) -> EnemyStats {
    match kind {
        EnemyKind::Ogre => EnemyStats {
            speed: OGRE_SPEED,
            stop_range: 100.0,
            damage: 30.0,
            attack_cooldown_max: 180,
        },
        EnemyKind::Goblin => EnemyStats {
            speed: OGRE_SPEED * 1.5,
            stop_range: 80.0,
            damage: 20.0,
            attack_cooldown_max: 120,
        },
        EnemyKind::Troll => EnemyStats {
            speed: OGRE_SPEED * 0.7,
            stop_range: 120.0,
            damage: 45.0,
            attack_cooldown_max: 240,
        },
        EnemyKind::SkeletonArcher => EnemyStats {
            speed: OGRE_SPEED * 0.8,
            stop_range: 500.0,
            damage: 0.0,
            attack_cooldown_max: 100,
        },
        EnemyKind::OgreKing => EnemyStats {
            speed: OGRE_SPEED * 0.6,
            stop_range: 100.0,
            damage: 50.0,
            attack_cooldown_max: 200,
        },
    }
}

pub fn enemy_hitbox(kind: EnemyKind) -> Hitbox {
    match kind {
        EnemyKind::Ogre => Hitbox::square(70.0),
        EnemyKind::Goblin => Hitbox::square(50.0),
        EnemyKind::Troll => Hitbox::square(90.0),
        EnemyKind::SkeletonArcher => Hitbox::square(60.0),
        EnemyKind::OgreKing => Hitbox::square(BOSS_SIZE),
    }
}

/// Multiplier over the wave's base health used by the boss-wave spawner.
pub fn health_factor(kind: EnemyKind) -> f32 {
    match kind {
        EnemyKind::Ogre => 1.0,
        EnemyKind::Goblin => 0.5,
        EnemyKind::Troll => 2.5,
        EnemyKind::SkeletonArcher => 0.75,
        EnemyKind::OgreKing => crate::config::BOSS_HEALTH_FACTOR,
    }
}

pub fn is_ranged(kind: EnemyKind) -> bool {
    matches!(kind, EnemyKind::SkeletonArcher | EnemyKind::OgreKing)
}

pub fn is_melee(kind: EnemyKind) -> bool {
    !matches!(kind, EnemyKind::SkeletonArcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuning_table_matches_design() {
        let expect = [
            (EnemyKind::Ogre, 100.0, 30.0, 180),
            (EnemyKind::Goblin, 80.0, 20.0, 120),
            (EnemyKind::Troll, 120.0, 45.0, 240),
            (EnemyKind::SkeletonArcher, 500.0, 0.0, 100),
            (EnemyKind::OgreKing, 100.0, 50.0, 200),
        ];
        for (kind, stop, dmg, cd) in expect {
            let s = enemy_stats(kind);
            assert_eq!(s.stop_range, stop, "{:?}", kind);
            assert_eq!(s.damage, dmg, "{:?}", kind);
            assert_eq!(s.attack_cooldown_max, cd, "{:?}", kind);
        }
    }

    #[test]
    fn only_the_king_is_boss_sized() {
        for kind in [
            EnemyKind::Ogre,
            EnemyKind::Goblin,
            EnemyKind::Troll,
            EnemyKind::SkeletonArcher,
        ] {
            assert!(enemy_hitbox(kind).width <= crate::config::BOSS_WIDTH_THRESHOLD);
        }
        assert!(enemy_hitbox(EnemyKind::OgreKing).width > crate::config::BOSS_WIDTH_THRESHOLD);
    }

    #[test]
    fn king_is_both_ranged_and_melee() {
        assert!(is_ranged(EnemyKind::OgreKing) && is_melee(EnemyKind::OgreKing));
        assert!(is_ranged(EnemyKind::SkeletonArcher) && !is_melee(EnemyKind::SkeletonArcher));
        assert!(!is_ranged(EnemyKind::Troll) && is_melee(EnemyKind::Troll));
    }
}
