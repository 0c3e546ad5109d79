use hecs::World;
use rand::Rng;

use crate::config::{GROUND_Y, TRAIL_LENGTH};
use crate::protocol::{EnemyKind, ProjectileKind, Vec2};

use super::components::{
    ActiveEffect, EffectKind, Enemy, EnemyAI, Facing, Health, Hitbox, Owner, Particle, Piercing,
    Position, Projectile, Trail, Velocity,
};
use super::enemy_stats::{enemy_hitbox, enemy_stats};

/// Creates an empty arena. The wizard lives on the run state; the world
/// only holds enemies, projectiles, effects and particles.
pub fn create_world() -> World {
    World::new()
}

// ── Enemies ──────────────────────────────────────────────────────────

/// Spawns an enemy standing on the ground with its centre at `x`.
pub fn spawn_enemy(world: &mut World, kind: EnemyKind, x: f32, health: f32, speed: f32) -> hecs::Entity {
    let hitbox = enemy_hitbox(kind);
    let mut stats = enemy_stats(kind);
    stats.speed = speed;
    world.spawn((
        Enemy { kind },
        Position {
            x,
            y: GROUND_Y - hitbox.height / 2.0,
        },
        hitbox,
        Facing { right: x < 0.0 },
        Health::full(health),
        stats,
        EnemyAI::default(),
    ))
}

pub fn enemy_count(world: &World) -> usize {
    world.query::<&Enemy>().iter().count()
}

pub fn boss_alive(world: &World) -> bool {
    world
        .query::<&Enemy>()
        .iter()
        .any(|(_, enemy)| enemy.kind == EnemyKind::OgreKing)
}

// ── Projectiles ──────────────────────────────────────────────────────

/// Everything needed to put a projectile into the world.
#[derive(Debug, Clone)]
pub struct ProjectileSpawn {
    pub owner: Owner,
    pub kind: ProjectileKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub damage: f32,
    pub piercing: Piercing,
    pub life: u32,
    pub scale: f32,
    pub seeking: bool,
    pub color: [u8; 3],
}

pub fn spawn_projectile(world: &mut World, spawn: ProjectileSpawn) -> hecs::Entity {
    world.spawn((
        Position::from(spawn.position),
        Velocity {
            x: spawn.velocity.x,
            y: spawn.velocity.y,
        },
        Projectile {
            owner: spawn.owner,
            kind: spawn.kind,
            damage: spawn.damage,
            piercing: spawn.piercing,
            hit_list: Default::default(),
            life: spawn.life,
            scale: spawn.scale,
            speed: spawn.velocity.length(),
            seeking: spawn.seeking,
            seek_target: None,
            color: spawn.color,
        },
        Trail {
            points: std::collections::VecDeque::with_capacity(TRAIL_LENGTH),
        },
    ))
}

// ── Effects & particles ──────────────────────────────────────────────

pub fn spawn_effect(world: &mut World, kind: EffectKind, life: u32) -> hecs::Entity {
    world.spawn((ActiveEffect { kind, life },))
}

/// Shape of a burst of cosmetic particles.
#[derive(Debug, Clone, Copy)]
pub struct ParticleBurst {
    pub count: usize,
    /// Max offset from the centre on each axis.
    pub spread: f32,
    pub life: u32,
    pub min_size: f32,
    pub max_size: f32,
    /// Max initial speed on each axis.
    pub drift: f32,
    pub color: [u8; 3],
}

/// Green gibs left behind by a kill.
pub const KILL_BURST: ParticleBurst = ParticleBurst {
    count: 15,
    spread: 15.0,
    life: 30,
    min_size: 3.0,
    max_size: 8.0,
    drift: 2.0,
    color: [0, 255, 0],
};

/// Single spark in the projectile's color at the point of a hit.
pub fn hit_burst(color: [u8; 3]) -> ParticleBurst {
    ParticleBurst {
        count: 1,
        spread: 0.0,
        life: 8,
        min_size: 3.0,
        max_size: 3.0,
        drift: 0.0,
        color,
    }
}

pub fn spawn_particles<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    center: Vec2,
    burst: ParticleBurst,
) {
    for _ in 0..burst.count {
        let offset = scatter(rng, burst.spread);
        let velocity = scatter(rng, burst.drift);
        let size = if burst.max_size > burst.min_size {
            rng.gen_range(burst.min_size..=burst.max_size)
        } else {
            burst.min_size
        };
        world.spawn((
            Position::from(center + offset),
            Particle {
                velocity,
                life: burst.life,
                max_life: burst.life,
                size,
                color: burst.color,
            },
        ));
    }
}

fn scatter<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> Vec2 {
    if extent > 0.0 {
        Vec2::new(rng.gen_range(-extent..=extent), rng.gen_range(-extent..=extent))
    } else {
        Vec2::default()
    }
}

// ── Cleanup ──────────────────────────────────────────────────────────

/// Removes every projectile and active effect, leaving enemies and
/// particles alone. Used between waves.
pub fn clear_projectiles_and_effects(world: &mut World) {
    let doomed: Vec<hecs::Entity> = world
        .query::<()>()
        .with::<&Projectile>()
        .iter()
        .map(|(e, _)| e)
        .chain(world.query::<()>().with::<&ActiveEffect>().iter().map(|(e, _)| e))
        .collect();
    for entity in doomed {
        let _ = world.despawn(entity);
    }
}
