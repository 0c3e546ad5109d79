use hecs::World;
use rand::Rng;
use tracing::debug;

use crate::config::{
    DRAGON_COOLDOWN, DRAGON_LIFE, GROUND_Y, LIGHTNING_BOLT_LIFE, LIGHTNING_CHAIN_LENGTH,
    LIGHTNING_CHAIN_RANGE, LIGHTNING_DAMAGE, LIGHTNING_FIRST_RANGE, LIGHTNING_INTERVAL,
    SCREEN_HEIGHT, SCREEN_WIDTH, TORNADO_COOLDOWN, TORNADO_LIFE, TORNADO_OFFSET,
};
use crate::ecs::components::{EffectKind, Enemy, Health, Position};
use crate::ecs::systems::economy::{credit_kill, KillReward};
use crate::ecs::world::spawn_effect;
use crate::game::profile::Profile;
use crate::game::run::RunState;
use crate::protocol::{AbilityKind, FrameInput, Vec2};

#[derive(Debug, Default)]
pub struct AbilityResult {
    pub lightning_targets: usize,
    pub tornado_cast: bool,
    pub dragon_cast: bool,
    pub kills: Vec<KillReward>,
}

// ── Lightning ────────────────────────────────────────────────────────

/// Picks up to three chain targets: the enemy nearest the wizard within
/// the first-hop range, then repeatedly the enemy nearest the previous
/// target within the chain range. Targets are never repeated.
pub fn lightning_chain(from: Vec2, enemies: &[(hecs::Entity, Vec2)]) -> Vec<(hecs::Entity, Vec2)> {
    let mut chain: Vec<(hecs::Entity, Vec2)> = Vec::with_capacity(LIGHTNING_CHAIN_LENGTH);
    let mut origin = from;
    let mut range = LIGHTNING_FIRST_RANGE;

    while chain.len() < LIGHTNING_CHAIN_LENGTH {
        let next = enemies
            .iter()
            .filter(|(e, _)| !chain.iter().any(|(c, _)| c == e))
            .min_by(|a, b| {
                origin
                    .distance(a.1)
                    .partial_cmp(&origin.distance(b.1))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .copied();
        match next {
            Some((e, pos)) if origin.distance(pos) < range => {
                chain.push((e, pos));
                origin = pos;
                range = LIGHTNING_CHAIN_RANGE;
            }
            _ => break,
        }
    }
    chain
}

/// Zaps along the chain, leaving one bolt visual per link. Returns the
/// enemies the strike killed.
pub fn cast_lightning(world: &mut World, from: Vec2) -> (usize, Vec<hecs::Entity>) {
    let enemies: Vec<(hecs::Entity, Vec2)> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(e, (_, pos))| (e, pos.vec()))
        .collect();

    let chain = lightning_chain(from, &enemies);
    let mut killed = Vec::new();
    let mut start = from;
    for &(enemy, end) in &chain {
        if let Ok(mut health) = world.get::<&mut Health>(enemy) {
            if health.apply_damage(LIGHTNING_DAMAGE) {
                killed.push(enemy);
            }
        }
        spawn_effect(world, EffectKind::LightningBolt { start, end }, LIGHTNING_BOLT_LIFE);
        start = end;
    }
    (chain.len(), killed)
}

// ── Tornado & dragon ─────────────────────────────────────────────────

/// Twin funnels standing on the ground either side of the wizard, drifting
/// outward.
pub fn cast_tornado(world: &mut World, wizard_x: f32) {
    for direction in [-1.0, 1.0] {
        spawn_effect(
            world,
            EffectKind::Tornado {
                position: Vec2::new(wizard_x + TORNADO_OFFSET * direction, GROUND_Y),
                direction,
            },
            TORNADO_LIFE,
        );
    }
}

/// Every enemy on the field dies. Returns them for crediting.
pub fn cast_dragon(world: &mut World) -> Vec<hecs::Entity> {
    let victims: Vec<hecs::Entity> = world.query::<&Enemy>().iter().map(|(e, _)| e).collect();
    for &enemy in &victims {
        if let Ok(mut health) = world.get::<&mut Health>(enemy) {
            health.current = 0.0;
        }
    }
    spawn_effect(
        world,
        EffectKind::Dragon {
            position: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
        },
        DRAGON_LIFE,
    );
    victims
}

// ── System ───────────────────────────────────────────────────────────

/// Handles ability intents, cooldown countdown and the auto-lightning
/// timer for one frame. Abilities fire only when unlocked and off
/// cooldown.
pub fn abilities_system<R: Rng + ?Sized>(
    world: &mut World,
    run: &mut RunState,
    profile: &mut Profile,
    input: &FrameInput,
    rng: &mut R,
) -> AbilityResult {
    let mut result = AbilityResult::default();
    let mut dead: Vec<hecs::Entity> = Vec::new();
    let wizard_pos = run.wizard.position;

    if input.tornado && run.wizard.has_ability(AbilityKind::Tornado) && run.tornado_cooldown == 0 {
        cast_tornado(world, wizard_pos.x);
        run.tornado_cooldown = TORNADO_COOLDOWN;
        result.tornado_cast = true;
        debug!("Tornado cast");
    }

    if input.dragon && run.wizard.has_ability(AbilityKind::Dragon) && run.dragon_cooldown == 0 {
        dead.extend(cast_dragon(world));
        run.dragon_cooldown = DRAGON_COOLDOWN;
        result.dragon_cast = true;
        debug!("Dragon summoned");
    }

    run.tornado_cooldown = run.tornado_cooldown.saturating_sub(1);
    run.dragon_cooldown = run.dragon_cooldown.saturating_sub(1);

    if run.wizard.has_ability(AbilityKind::Lightning) {
        if run.lightning_timer <= 0 {
            let (targets, killed) = cast_lightning(world, wizard_pos);
            result.lightning_targets = targets;
            dead.extend(killed);
            run.lightning_timer = LIGHTNING_INTERVAL;
        }
        run.lightning_timer -= 1;
    }

    for enemy in dead {
        if let Some(reward) = credit_kill(world, run, profile, rng, enemy) {
            result.kills.push(reward);
        }
    }
    result
}
