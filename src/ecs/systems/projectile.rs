use std::collections::HashMap;

use hecs::World;
use rand::Rng;

use crate::config::{
    PROJECTILE_OFFSCREEN_MARGIN, PROJECTILE_SPEED, SCREEN_HEIGHT, SCREEN_WIDTH, SEEK_TURN_RATE,
    TRAIL_LENGTH,
};
use crate::ecs::components::{
    Enemy, Health, Hitbox, Owner, Piercing, Position, Projectile, Trail, Velocity,
};
use crate::ecs::systems::economy::{credit_kill, KillReward};
use crate::ecs::weapon_stats::{multishot_damage, multishot_scale, weapon_stats, Motion, PierceRule};
use crate::ecs::world::{hit_burst, spawn_particles, spawn_projectile, ProjectileSpawn};
use crate::game::profile::Profile;
use crate::game::run::RunState;
use crate::game::wizard::Wizard;
use crate::protocol::{ProjectileKind, Vec2, WeaponKind};

pub struct ProjectileResult {
    pub hits: u32,
    pub despawned: Vec<hecs::Entity>,
    pub kills: Vec<KillReward>,
}

fn projectile_color(weapon: WeaponKind, wizard: &Wizard) -> [u8; 3] {
    match weapon {
        WeaponKind::Default => wizard.wand_color(),
        WeaponKind::ArcaneVolley => [186, 85, 211],
        WeaponKind::VoidLance => [75, 0, 130],
        WeaponKind::FireRing => [255, 140, 0],
    }
}

// ── Firing ───────────────────────────────────────────────────────────

/// Casts the current weapon if the staff is ready. Returns how many
/// projectiles left the staff.
pub fn fire_system<R: Rng + ?Sized>(world: &mut World, wizard: &mut Wizard, rng: &mut R) -> usize {
    if !wizard.try_begin_cast() {
        return 0;
    }

    let spec = weapon_stats(wizard.current_weapon);
    let damage =
        wizard.player_damage() * spec.damage_factor * multishot_damage(wizard.multishot);
    let scale = spec.scale * multishot_scale(wizard.multishot);
    let speed = PROJECTILE_SPEED * spec.speed_factor;
    let piercing = match spec.pierce {
        PierceRule::FromStats => Piercing::Limited(wizard.piercing),
        PierceRule::Unlimited => Piercing::Unlimited,
    };
    let origin = wizard.staff_tip();
    let facing = wizard.facing_sign();
    let color = projectile_color(spec.weapon, wizard);

    for _ in 0..spec.projectiles_per_cast {
        let angle = if spec.spread > 0.0 {
            rng.gen_range(-spec.spread..=spec.spread)
        } else {
            0.0
        };
        let velocity = Vec2::new(angle.cos() * facing, angle.sin()) * speed;
        spawn_projectile(
            world,
            ProjectileSpawn {
                owner: Owner::Player,
                kind: ProjectileKind::from(spec.weapon),
                position: origin,
                velocity,
                damage,
                piercing,
                life: spec.life,
                scale,
                seeking: spec.motion == Motion::Seeking,
                color,
            },
        );
    }
    spec.projectiles_per_cast as usize
}

// ── Motion ───────────────────────────────────────────────────────────

fn nearest(from: Vec2, enemies: &HashMap<hecs::Entity, Vec2>) -> Option<hecs::Entity> {
    enemies
        .iter()
        .min_by(|a, b| {
            from.distance(*a.1)
                .partial_cmp(&from.distance(*b.1))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(e, _)| *e)
}

/// Moves every projectile one frame: seekers steer toward their target,
/// trails record the previous position, and expired or off-screen
/// projectiles are removed.
pub fn projectile_movement_system(world: &mut World) -> Vec<hecs::Entity> {
    let enemies: HashMap<hecs::Entity, Vec2> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(e, (_, pos))| (e, pos.vec()))
        .collect();

    let mut to_despawn = Vec::new();

    for (entity, (pos, vel, proj, trail)) in
        world.query_mut::<(&mut Position, &mut Velocity, &mut Projectile, &mut Trail)>()
    {
        if proj.seeking {
            let target = match proj.seek_target {
                Some(t) if enemies.contains_key(&t) => Some(t),
                _ => nearest(pos.vec(), &enemies),
            };
            proj.seek_target = target;
            if let Some(target_pos) = target.and_then(|t| enemies.get(&t)) {
                let desired = (*target_pos - pos.vec()).normalized() * proj.speed;
                let current = vel.vec();
                let steered = (current + (desired - current) * SEEK_TURN_RATE).normalized() * proj.speed;
                vel.x = steered.x;
                vel.y = steered.y;
            }
        }

        trail.points.push_front(pos.vec());
        trail.points.truncate(TRAIL_LENGTH);

        pos.x += vel.x;
        pos.y += vel.y;
        proj.life = proj.life.saturating_sub(1);

        let gone = proj
            .rect_at(pos)
            .is_offscreen(SCREEN_WIDTH, SCREEN_HEIGHT, PROJECTILE_OFFSCREEN_MARGIN);
        if proj.life == 0 || gone {
            to_despawn.push(entity);
        }
    }

    for &entity in &to_despawn {
        let _ = world.despawn(entity);
    }
    to_despawn
}

// ── Collision ────────────────────────────────────────────────────────

/// Resolves player projectiles against enemies. Each projectile damages a
/// given enemy at most once; piercing decides how many enemies it passes
/// through before it is spent. Dead enemies are credited afterwards.
pub fn projectile_collision_system<R: Rng + ?Sized>(
    world: &mut World,
    run: &mut RunState,
    profile: &mut Profile,
    rng: &mut R,
) -> ProjectileResult {
    let mut result = ProjectileResult {
        hits: 0,
        despawned: Vec::new(),
        kills: Vec::new(),
    };

    let enemies: Vec<(hecs::Entity, crate::game::collision::Rect)> = world
        .query::<(&Enemy, &Position, &Hitbox)>()
        .iter()
        .map(|(e, (_, pos, hitbox))| (e, hitbox.rect_at(pos)))
        .collect();

    let projectiles: Vec<hecs::Entity> = world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| p.owner == Owner::Player)
        .map(|(e, _)| e)
        .collect();

    let mut sparks: Vec<(Vec2, [u8; 3])> = Vec::new();
    let mut dead: Vec<hecs::Entity> = Vec::new();

    for proj_entity in projectiles {
        let Ok(pos) = world.get::<&Position>(proj_entity).map(|p| *p) else {
            continue;
        };
        let Ok(mut proj) = world.get::<&mut Projectile>(proj_entity) else {
            continue;
        };
        let rect = proj.rect_at(&pos);
        let mut spent = false;

        for &(enemy, enemy_rect) in &enemies {
            if !rect.overlaps(&enemy_rect) || proj.hit_list.contains(&enemy) {
                continue;
            }
            let Ok(mut health) = world.get::<&mut Health>(enemy) else {
                continue;
            };
            if health.is_dead() {
                continue;
            }

            if health.apply_damage(proj.damage) {
                dead.push(enemy);
            }
            proj.hit_list.insert(enemy);
            result.hits += 1;
            sparks.push((enemy_rect.center(), proj.color));

            match proj.piercing {
                Piercing::Unlimited => {}
                Piercing::Limited(0) => {
                    spent = true;
                    break;
                }
                Piercing::Limited(n) => proj.piercing = Piercing::Limited(n - 1),
            }
        }

        drop(proj);
        if spent && world.despawn(proj_entity).is_ok() {
            result.despawned.push(proj_entity);
        }
    }

    for (center, color) in sparks {
        spawn_particles(world, rng, center, hit_burst(color));
    }
    for enemy in dead {
        if let Some(reward) = credit_kill(world, run, profile, rng, enemy) {
            result.kills.push(reward);
        }
    }

    result
}
