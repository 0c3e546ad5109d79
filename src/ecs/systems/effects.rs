use hecs::World;
use rand::Rng;

use crate::config::{
    TORNADO_DAMAGE, TORNADO_DAMAGE_EVERY, TORNADO_HEIGHT, TORNADO_PUSH, TORNADO_SPEED,
    TORNADO_WIDTH,
};
use crate::ecs::components::{ActiveEffect, EffectKind, Enemy, Health, Hitbox, Particle, Position};
use crate::ecs::systems::economy::{credit_kill, KillReward};
use crate::game::collision::Rect;
use crate::game::profile::Profile;
use crate::game::run::RunState;
use crate::protocol::Vec2;

/// The funnel's hit volume: standing on its bottom-centre point.
pub fn tornado_zone(position: Vec2) -> Rect {
    Rect::standing(position, TORNADO_WIDTH, TORNADO_HEIGHT)
}

/// Ages every active effect by one frame. Tornadoes drift outward, shove
/// any enemy they overlap and chip it every fifth frame of their life.
pub fn effects_system<R: Rng + ?Sized>(
    world: &mut World,
    run: &mut RunState,
    profile: &mut Profile,
    rng: &mut R,
) -> Vec<KillReward> {
    let mut expired = Vec::new();
    let mut zones: Vec<(Rect, f32, bool)> = Vec::new();

    for (entity, effect) in world.query_mut::<&mut ActiveEffect>() {
        effect.life = effect.life.saturating_sub(1);
        if effect.life == 0 {
            expired.push(entity);
            continue;
        }
        if let EffectKind::Tornado {
            ref mut position,
            direction,
        } = effect.kind
        {
            position.x += TORNADO_SPEED * direction;
            let chip = effect.life % TORNADO_DAMAGE_EVERY == 0;
            zones.push((tornado_zone(*position), direction, chip));
        }
    }
    for entity in expired {
        let _ = world.despawn(entity);
    }

    let mut dead = Vec::new();
    for (zone, direction, chip) in zones {
        for (entity, (_, pos, hitbox, health)) in
            world.query_mut::<(&Enemy, &mut Position, &Hitbox, &mut Health)>()
        {
            if !zone.overlaps(&hitbox.rect_at(pos)) {
                continue;
            }
            pos.x += TORNADO_PUSH * direction;
            if chip && !health.is_dead() && health.apply_damage(TORNADO_DAMAGE) {
                dead.push(entity);
            }
        }
    }

    let mut kills = Vec::new();
    for enemy in dead {
        if let Some(reward) = credit_kill(world, run, profile, rng, enemy) {
            kills.push(reward);
        }
    }
    kills
}

/// Moves and fades particles, removing the ones that burned out.
pub fn particle_system(world: &mut World) {
    let mut faded = Vec::new();
    for (entity, (pos, particle)) in world.query_mut::<(&mut Position, &mut Particle)>() {
        particle.life = particle.life.saturating_sub(1);
        if particle.life == 0 {
            faded.push(entity);
            continue;
        }
        pos.x += particle.velocity.x;
        pos.y += particle.velocity.y;
    }
    for entity in faded {
        let _ = world.despawn(entity);
    }
}
