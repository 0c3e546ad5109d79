use hecs::World;

use crate::config::{
    ARROW_DAMAGE, ARROW_SPEED, ATTACK_HYSTERESIS, BOULDER_DAMAGE, BOULDER_SPEED,
    ENEMY_PROJECTILE_LIFE,
};
use crate::ecs::components::{
    Enemy, EnemyAI, EnemyStats, Facing, Hitbox, Owner, Piercing, Position,
};
use crate::ecs::enemy_stats::{is_melee, is_ranged};
use crate::ecs::world::{spawn_projectile, ProjectileSpawn};
use crate::protocol::{EnemyBehaviorState, EnemyKind, ProjectileKind, Vec2};

/// Summary of one AI tick.
#[derive(Debug, Default)]
pub struct EnemyAiResult {
    pub shots_fired: u32,
    pub melee_swings: u32,
}

fn enemy_shot(kind: EnemyKind, from: Vec2, target: Vec2) -> ProjectileSpawn {
    let (projectile, speed, damage, scale, color) = match kind {
        EnemyKind::OgreKing => (ProjectileKind::EnemyBoulder, BOULDER_SPEED, BOULDER_DAMAGE, 1.5, [120, 100, 80]),
        _ => (ProjectileKind::EnemyArrow, ARROW_SPEED, ARROW_DAMAGE, 0.6, [210, 210, 210]),
    };
    ProjectileSpawn {
        owner: Owner::Enemy,
        kind: projectile,
        position: from,
        velocity: (target - from).normalized() * speed,
        damage,
        piercing: Piercing::Limited(0),
        life: ENEMY_PROJECTILE_LIFE,
        scale,
        seeking: false,
        color,
    }
}

/// Runs the enemy behaviour state machine for a single tick.
///
/// Enemies walk toward the wizard until inside their stop range, then stand
/// and cycle their attack timer. Halfway through the cycle ranged enemies
/// loose a projectile at the wizard and melee enemies raise `did_attack`
/// for one frame; the Ogre King does both. Walking back out of range (with
/// hysteresis) resets the cycle.
pub fn enemy_ai_system(world: &mut World, wizard_pos: Vec2) -> EnemyAiResult {
    let mut result = EnemyAiResult::default();
    let mut shots: Vec<ProjectileSpawn> = Vec::new();

    for (_entity, (enemy, pos, hitbox, facing, stats, ai)) in world.query_mut::<(
        &Enemy,
        &mut Position,
        &Hitbox,
        &mut Facing,
        &EnemyStats,
        &mut EnemyAI,
    )>() {
        ai.did_attack = false;

        let dx = wizard_pos.x - pos.x;
        let dist = dx.abs();
        facing.right = dx >= 0.0;

        let reach = match ai.state {
            EnemyBehaviorState::Attacking => stats.stop_range + ATTACK_HYSTERESIS,
            EnemyBehaviorState::Approaching => stats.stop_range,
        };

        if dist <= reach {
            ai.state = EnemyBehaviorState::Attacking;
            ai.attack_timer += 1;

            if ai.attack_timer == stats.attack_cooldown_max / 2 {
                if is_ranged(enemy.kind) {
                    let muzzle = Vec2::new(pos.x, pos.y - hitbox.height / 4.0);
                    shots.push(enemy_shot(enemy.kind, muzzle, wizard_pos));
                    result.shots_fired += 1;
                }
                if is_melee(enemy.kind) {
                    ai.did_attack = true;
                    result.melee_swings += 1;
                }
            }
            if ai.attack_timer >= stats.attack_cooldown_max {
                ai.attack_timer = 0;
            }
        } else {
            ai.state = EnemyBehaviorState::Approaching;
            ai.attack_timer = 0;
            pos.x += stats.speed * facing.sign();
        }
    }

    for shot in shots {
        spawn_projectile(world, shot);
    }

    result
}
