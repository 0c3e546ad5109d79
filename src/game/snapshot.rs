use hecs::World;

use crate::config::{DRAGON_COOLDOWN, LIGHTNING_INTERVAL, TORNADO_COOLDOWN};
use crate::ecs::components::{
    ActiveEffect, EffectKind, Enemy, EnemyAI, EnemyStats, Facing, Health, Hitbox, Particle,
    Position, Projectile, Trail,
};
use crate::game::cards::CardOffer;
use crate::game::profile::Profile;
use crate::game::run::RunState;
use crate::game::state::ShopView;
use crate::game::upgrades::{all_abilities, all_perma_upgrades, can_purchase, price};
use crate::protocol::{
    AbilityKind, EffectSnapshot, EnemyBehaviorState, EnemySnapshot, HudSnapshot,
    ParticleSnapshot, ProjectileSnapshot, Screen, ShopEntrySnapshot, ShopItem, ShopSnapshot,
    Snapshot, Tick, Vec2, WizardSnapshot,
};

/// Builds the read-only view a renderer draws from. Nothing here mutates the
/// simulation.
pub fn build_snapshot(
    tick: Tick,
    screen: Screen,
    world: &World,
    run: &RunState,
    profile: &Profile,
    cards: &[CardOffer],
    shop: Option<&ShopView>,
) -> Snapshot {
    Snapshot {
        tick,
        screen,
        wizard: wizard_snapshot(run),
        enemies: enemy_snapshots(world),
        projectiles: projectile_snapshots(world),
        effects: effect_snapshots(world),
        particles: particle_snapshots(world),
        hud: hud_snapshot(run, profile),
        cards: cards.iter().map(CardOffer::snapshot).collect(),
        shop: shop.map(|view| shop_snapshot(profile, view)),
    }
}

fn wizard_snapshot(run: &RunState) -> WizardSnapshot {
    let wizard = &run.wizard;
    WizardSnapshot {
        position: wizard.position,
        facing_right: wizard.facing_right,
        health: wizard.health,
        max_health: wizard.max_health,
        is_casting: wizard.is_casting,
        wand_color: wizard.wand_color(),
        current_weapon: wizard.current_weapon,
    }
}

fn enemy_snapshots(world: &World) -> Vec<EnemySnapshot> {
    let mut enemies: Vec<EnemySnapshot> = world
        .query::<(&Enemy, &Position, &Hitbox, &Facing, &Health, &EnemyStats, &EnemyAI)>()
        .iter()
        .map(|(entity, (enemy, pos, hitbox, facing, health, stats, ai))| {
            let attacking = ai.state == EnemyBehaviorState::Attacking;
            let attack_phase = if attacking && stats.attack_cooldown_max > 0 {
                ai.attack_timer as f32 / stats.attack_cooldown_max as f32
            } else {
                0.0
            };
            EnemySnapshot {
                id: entity.to_bits().get(),
                kind: enemy.kind,
                position: pos.vec(),
                size: Vec2::new(hitbox.width, hitbox.height),
                facing_right: facing.right,
                health: health.current.max(0.0),
                max_health: health.max,
                attacking,
                attack_phase,
            }
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn projectile_snapshots(world: &World) -> Vec<ProjectileSnapshot> {
    world
        .query::<(&Projectile, &Position, Option<&Trail>)>()
        .iter()
        .map(|(_, (proj, pos, trail))| ProjectileSnapshot {
            kind: proj.kind,
            position: pos.vec(),
            scale: proj.scale,
            trail: trail
                .map(|t| t.points.iter().copied().collect())
                .unwrap_or_default(),
        })
        .collect()
}

fn effect_snapshots(world: &World) -> Vec<EffectSnapshot> {
    world
        .query::<&ActiveEffect>()
        .iter()
        .map(|(_, effect)| {
            let life = effect.life;
            match effect.kind {
                EffectKind::LightningBolt { start, end } => {
                    EffectSnapshot::LightningBolt { start, end, life }
                }
                EffectKind::Tornado {
                    position,
                    direction,
                } => EffectSnapshot::Tornado {
                    position,
                    direction,
                    life,
                },
                EffectKind::Dragon { position } => EffectSnapshot::Dragon { position, life },
            }
        })
        .collect()
}

fn particle_snapshots(world: &World) -> Vec<ParticleSnapshot> {
    world
        .query::<(&Particle, &Position)>()
        .iter()
        .map(|(_, (particle, pos))| ParticleSnapshot {
            position: pos.vec(),
            size: particle.size,
            color: particle.color,
            alpha: if particle.max_life == 0 {
                0.0
            } else {
                particle.life as f32 / particle.max_life as f32
            },
        })
        .collect()
}

fn hud_snapshot(run: &RunState, profile: &Profile) -> HudSnapshot {
    let wizard = &run.wizard;
    let lightning_charge =
        (1.0 - run.lightning_timer as f32 / LIGHTNING_INTERVAL as f32).clamp(0.0, 1.0);
    HudSnapshot {
        wave: run.wave,
        biome: run.biome,
        coins: profile.coins,
        score: run.score,
        kills: run.kills_in_wave,
        kill_quota: run.kill_quota(),
        lightning_unlocked: wizard.has_ability(AbilityKind::Lightning),
        lightning_charge,
        tornado_unlocked: wizard.has_ability(AbilityKind::Tornado),
        tornado_cooldown: run.tornado_cooldown as f32 / TORNADO_COOLDOWN as f32,
        dragon_unlocked: wizard.has_ability(AbilityKind::Dragon),
        dragon_cooldown: run.dragon_cooldown as f32 / DRAGON_COOLDOWN as f32,
    }
}

/// Catalogue rows in display order: abilities first, then permanent
/// upgrades with their next-level price.
pub fn shop_entries(profile: &Profile) -> Vec<ShopEntrySnapshot> {
    let abilities = all_abilities().iter().map(|def| {
        let item = ShopItem::Ability(def.id);
        ShopEntrySnapshot {
            item,
            name: def.name.to_string(),
            description: def.description.to_string(),
            price: def.cost,
            level: None,
            owned: profile.is_unlocked(def.id),
            affordable: can_purchase(profile, item),
        }
    });
    let perma = all_perma_upgrades().iter().map(|def| {
        let item = ShopItem::Permanent(def.id);
        ShopEntrySnapshot {
            item,
            name: def.name.to_string(),
            description: def.description.to_string(),
            price: price(profile, item),
            level: Some(profile.perma_level(def.id)),
            owned: false,
            affordable: can_purchase(profile, item),
        }
    });
    abilities.chain(perma).collect()
}

fn shop_snapshot(profile: &Profile, view: &ShopView) -> ShopSnapshot {
    ShopSnapshot {
        entries: shop_entries(profile),
        scroll: view.scroll,
        returns_to: view.returns_to,
    }
}
