use hecs::World;

use crate::config::{CONTACT_DAMAGE, CONTACT_PUSH, MELEE_RANGE, PLAYER_SIZE, SCREEN_WIDTH};
use crate::ecs::components::{Enemy, EnemyAI, EnemyStats, Hitbox, Owner, Position, Projectile};
use crate::ecs::enemy_stats::is_melee;
use crate::game::wizard::Wizard;

/// The result of running the combat system for one tick.
#[derive(Debug, Default)]
pub struct CombatResult {
    pub damage_taken: f32,
    pub melee_hits: u32,
    pub projectile_hits: u32,
    pub contacts: u32,
}

/// Resolves everything the horde does to the wizard this frame: melee
/// swings that landed their wind-up, body contact, and enemy projectiles.
pub fn combat_system(world: &mut World, wizard: &mut Wizard) -> CombatResult {
    let mut result = CombatResult::default();
    let health_before = wizard.health;

    // ── Melee swings ─────────────────────────────────────────────────
    for (_entity, (enemy, pos, stats, ai)) in world
        .query::<(&Enemy, &Position, &EnemyStats, &EnemyAI)>()
        .iter()
    {
        if !ai.did_attack || !is_melee(enemy.kind) {
            continue;
        }
        if pos.vec().distance(wizard.position) < MELEE_RANGE {
            wizard.take_damage(stats.damage);
            result.melee_hits += 1;
        }
    }

    // ── Body contact ─────────────────────────────────────────────────
    let touching: Vec<f32> = world
        .query::<(&Enemy, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (_, pos, hitbox))| hitbox.rect_at(pos).overlaps(&wizard.rect()))
        .map(|(_, (_, pos, _))| pos.x)
        .collect();

    for enemy_x in touching {
        wizard.take_damage(CONTACT_DAMAGE);
        let away = if wizard.position.x < enemy_x { -1.0 } else { 1.0 };
        wizard.position.x += CONTACT_PUSH * away;
        result.contacts += 1;
    }
    let half = PLAYER_SIZE / 2.0;
    wizard.position.x = wizard.position.x.clamp(half, SCREEN_WIDTH - half);

    // ── Enemy projectiles ────────────────────────────────────────────
    let wizard_rect = wizard.rect();
    let hits: Vec<(hecs::Entity, f32)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (proj, pos))| proj.owner == Owner::Enemy && proj.rect_at(pos).overlaps(&wizard_rect))
        .map(|(e, (proj, _))| (e, proj.damage))
        .collect();

    for (entity, damage) in hits {
        if world.despawn(entity).is_ok() {
            wizard.take_damage(damage);
            result.projectile_hits += 1;
        }
    }

    result.damage_taken = health_before - wizard.health;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ARROW_DAMAGE, PLAYER_MAX_HEALTH};
    use crate::ecs::components::Piercing;
    use crate::ecs::world::{spawn_enemy, spawn_projectile, ProjectileSpawn};
    use crate::protocol::{EnemyKind, ProjectileKind, Vec2};

    fn arm(world: &mut World, e: hecs::Entity) {
        world.get::<&mut EnemyAI>(e).unwrap().did_attack = true;
    }

    #[test]
    fn melee_swing_hits_inside_range() {
        let mut world = World::new();
        let mut wizard = Wizard::new();
        let troll = spawn_enemy(&mut world, EnemyKind::Troll, wizard.position.x + 130.0, 40.0, 2.1);
        arm(&mut world, troll);

        let result = combat_system(&mut world, &mut wizard);
        assert_eq!(result.melee_hits, 1);
        assert_eq!(wizard.health, PLAYER_MAX_HEALTH - 45.0);
    }

    #[test]
    fn melee_swing_misses_outside_range() {
        let mut world = World::new();
        let mut wizard = Wizard::new();
        let ogre = spawn_enemy(&mut world, EnemyKind::Ogre, wizard.position.x + 160.0, 40.0, 3.0);
        arm(&mut world, ogre);

        let result = combat_system(&mut world, &mut wizard);
        assert_eq!(result.melee_hits, 0);
        assert_eq!(wizard.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn archer_flag_never_counts_as_melee() {
        let mut world = World::new();
        let mut wizard = Wizard::new();
        let archer = spawn_enemy(&mut world, EnemyKind::SkeletonArcher, wizard.position.x + 100.0, 15.0, 2.4);
        arm(&mut world, archer);
        assert_eq!(combat_system(&mut world, &mut wizard).melee_hits, 0);
    }

    #[test]
    fn contact_chips_and_pushes_wizard_away() {
        let mut world = World::new();
        let mut wizard = Wizard::new();
        wizard.position.x = 400.0;
        spawn_enemy(&mut world, EnemyKind::Ogre, 430.0, 40.0, 3.0);

        let result = combat_system(&mut world, &mut wizard);
        assert_eq!(result.contacts, 1);
        assert_eq!(wizard.health, PLAYER_MAX_HEALTH - CONTACT_DAMAGE);
        assert_eq!(wizard.position.x, 400.0 - CONTACT_PUSH);
    }

    #[test]
    fn enemy_projectile_hits_and_is_destroyed() {
        let mut world = World::new();
        let mut wizard = Wizard::new();
        let arrow = spawn_projectile(
            &mut world,
            ProjectileSpawn {
                owner: Owner::Enemy,
                kind: ProjectileKind::EnemyArrow,
                position: wizard.position,
                velocity: Vec2::new(-9.0, 0.0),
                damage: ARROW_DAMAGE,
                piercing: Piercing::Limited(0),
                life: 180,
                scale: 0.6,
                seeking: false,
                color: [210, 210, 210],
            },
        );

        let result = combat_system(&mut world, &mut wizard);
        assert_eq!(result.projectile_hits, 1);
        assert_eq!(result.damage_taken, ARROW_DAMAGE);
        assert!(!world.contains(arrow));
    }

    #[test]
    fn player_projectiles_do_not_hurt_wizard() {
        let mut world = World::new();
        let mut wizard = Wizard::new();
        spawn_projectile(
            &mut world,
            ProjectileSpawn {
                owner: Owner::Player,
                kind: ProjectileKind::FireRing,
                position: wizard.position,
                velocity: Vec2::new(7.0, 0.0),
                damage: 60.0,
                piercing: Piercing::Unlimited,
                life: 180,
                scale: 3.0,
                seeking: false,
                color: [255, 140, 0],
            },
        );
        assert_eq!(combat_system(&mut world, &mut wizard).damage_taken, 0.0);
    }

    #[test]
    fn health_never_goes_negative() {
        let mut world = World::new();
        let mut wizard = Wizard::new();
        wizard.health = 20.0;
        let king = spawn_enemy(&mut world, EnemyKind::OgreKing, wizard.position.x + 50.0, 900.0, 1.8);
        arm(&mut world, king);
        combat_system(&mut world, &mut wizard);
        assert_eq!(wizard.health, 0.0);
        assert!(!wizard.is_alive());
    }
}
