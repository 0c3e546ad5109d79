use hecs::World;
use rand::Rng;

use crate::config::{BOSS_COIN_VALUE, BOSS_WIDTH_THRESHOLD, COIN_VALUE, SCORE_PER_KILL_PER_WAVE};
use crate::ecs::components::{Enemy, Hitbox, Position};
use crate::ecs::world::{spawn_particles, KILL_BURST};
use crate::game::profile::Profile;
use crate::game::run::RunState;
use crate::protocol::EnemyKind;

/// What one kill paid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KillReward {
    pub kind: EnemyKind,
    pub score: u64,
    pub coins: u64,
}

/// Coins for killing an enemy of the given hitbox width.
pub fn coin_value(width: f32) -> u64 {
    if width > BOSS_WIDTH_THRESHOLD {
        BOSS_COIN_VALUE
    } else {
        COIN_VALUE
    }
}

/// Removes a dead enemy and pays for it: score, coins, the wave's kill
/// counter and a burst of particles.
///
/// Crediting is tied to the despawn succeeding, so an enemy reached by two
/// damage sources in the same frame is paid out once.
pub fn credit_kill<R: Rng + ?Sized>(
    world: &mut World,
    run: &mut RunState,
    profile: &mut Profile,
    rng: &mut R,
    enemy: hecs::Entity,
) -> Option<KillReward> {
    let (kind, center, width) = {
        let mut query = world.query_one::<(&Enemy, &Position, &Hitbox)>(enemy).ok()?;
        let (e, pos, hitbox) = query.get()?;
        (e.kind, pos.vec(), hitbox.width)
    };

    world.despawn(enemy).ok()?;

    let reward = KillReward {
        kind,
        score: SCORE_PER_KILL_PER_WAVE * run.wave as u64,
        coins: coin_value(width),
    };
    run.kills_in_wave += 1;
    run.score += reward.score;
    profile.add_coins(reward.coins);

    spawn_particles(world, rng, center, KILL_BURST);

    Some(reward)
}
