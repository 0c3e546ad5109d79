use hecs::World;
use rand::Rng;
use tracing::{debug, info};

use crate::config::{
    BOSS_ALIVE_SPAWN_INTERVAL, ENEMIES_PER_WAVE_BASE, ENEMY_OFFSCREEN_MARGIN, SCREEN_HEIGHT,
    SCREEN_WIDTH, SPAWN_INTERVAL_BASE, SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_PER_WAVE, SPAWN_MARGIN,
    SpawnPolicy,
};
use crate::ecs::components::{Enemy, Hitbox, Position};
use crate::ecs::enemy_stats::{enemy_stats, health_factor};
use crate::ecs::world::{boss_alive, enemy_count, spawn_enemy};
use crate::game::run::RunState;
use crate::protocol::EnemyKind;

/// An enemy put into the world by the spawner this tick.
#[derive(Debug, Clone, Copy)]
pub struct Spawned {
    pub entity: hecs::Entity,
    pub kind: EnemyKind,
    pub health: f32,
}

// ── Difficulty curve ─────────────────────────────────────────────────

/// Health multiplier for a wave: steps at waves 10 and 20 plus a linear
/// ramp of 5% per wave.
pub fn diff_mult(wave: u32) -> f32 {
    let mut mult = 1.0;
    if wave >= 10 {
        mult *= 1.2;
    }
    if wave >= 20 {
        mult *= 1.3;
    }
    mult + wave as f32 * 0.05
}

/// Frames between spawn attempts with no boss on the field.
pub fn spawn_interval(wave: u32) -> i32 {
    (SPAWN_INTERVAL_BASE - wave as i32 * SPAWN_INTERVAL_PER_WAVE).max(SPAWN_INTERVAL_MIN)
}

/// Health of a regular (weak) enemy for the wave.
pub fn base_health(player_damage: f32, wave: u32) -> f32 {
    player_damage * 2.0 * diff_mult(wave)
}

pub fn enemy_speed(kind: EnemyKind, wave: u32) -> f32 {
    let mut speed = enemy_stats(kind).speed + wave as f32 * 0.05;
    if wave > 20 {
        speed *= 1.2;
    }
    speed
}

/// Most enemies allowed on screen at once under the boss-wave policy.
pub fn max_on_screen(wave: u32) -> usize {
    (ENEMIES_PER_WAVE_BASE + wave) as usize
}

fn spawn_x<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.gen_bool(0.5) {
        -SPAWN_MARGIN
    } else {
        SCREEN_WIDTH + SPAWN_MARGIN
    }
}

// ── Spawn system ─────────────────────────────────────────────────────

/// Counts the spawn timer down and, when it runs out, makes one spawn
/// attempt under the active policy before re-arming it.
pub fn spawn_system<R: Rng + ?Sized>(
    world: &mut World,
    run: &mut RunState,
    policy: SpawnPolicy,
    rng: &mut R,
) -> Option<Spawned> {
    let mut spawned = None;
    if run.spawn_timer <= 0 {
        spawned = match policy {
            SpawnPolicy::Linear => spawn_linear(world, run, rng),
            SpawnPolicy::BossWave => spawn_boss_wave(world, run, rng),
        };
        run.spawn_timer = if policy == SpawnPolicy::BossWave && boss_alive(world) {
            BOSS_ALIVE_SPAWN_INTERVAL
        } else {
            spawn_interval(run.wave)
        };
    }
    run.spawn_timer -= 1;
    spawned
}

/// Fixed budget per wave; a share of the spawns are strong enemies with
/// double health.
fn spawn_linear<R: Rng + ?Sized>(world: &mut World, run: &mut RunState, rng: &mut R) -> Option<Spawned> {
    let quota = run.kill_quota();
    if run.spawned_in_wave >= quota {
        return None;
    }

    let x = spawn_x(rng);
    let strong_count = (run.wave - 1) / 2;
    let prob_strong = strong_count as f64 / quota as f64;
    let is_strong = rng.gen_bool(prob_strong.min(1.0));

    let player_damage = run.wizard.player_damage();
    let (kind, health) = if is_strong {
        let mut kind = if run.wave % 3 == 0 {
            EnemyKind::Goblin
        } else {
            EnemyKind::Ogre
        };
        if run.wave > 5 && rng.gen_bool(0.4) {
            kind = EnemyKind::Troll;
        }
        (kind, player_damage * 4.0 * diff_mult(run.wave))
    } else {
        let kind = if rng.gen_bool(0.5) {
            EnemyKind::Goblin
        } else {
            EnemyKind::Ogre
        };
        (kind, base_health(player_damage, run.wave))
    };

    let entity = spawn_enemy(world, kind, x, health, enemy_speed(kind, run.wave));
    run.spawned_in_wave += 1;
    Some(Spawned { entity, kind, health })
}

/// Rungs of the boss-wave type ladder: (unlocked after wave, share, kind).
const LADDER: [(u32, f32, EnemyKind); 3] = [
    (5, 0.15, EnemyKind::Troll),
    (2, 0.30, EnemyKind::SkeletonArcher),
    (1, 0.30, EnemyKind::Goblin),
];

/// Picks a regular enemy type from a uniform `roll` in `[0, 1)`. Every
/// unlocked rung owns its own band of the roll; the rest is Ogre.
pub fn ladder_kind(wave: u32, roll: f32) -> EnemyKind {
    let mut band = 0.0;
    for (after, share, kind) in LADDER {
        if wave > after {
            band += share;
            if roll < band {
                return kind;
            }
        }
    }
    EnemyKind::Ogre
}

/// Type ladder with an Ogre King opening every tenth wave.
fn spawn_boss_wave<R: Rng + ?Sized>(world: &mut World, run: &mut RunState, rng: &mut R) -> Option<Spawned> {
    let quota = run.kill_quota() as usize;
    let alive = enemy_count(world);
    if alive >= max_on_screen(run.wave) || run.kills_in_wave as usize + alive >= quota {
        return None;
    }

    let base = base_health(run.wizard.player_damage(), run.wave);
    let x = spawn_x(rng);

    let kind = if run.is_boss_wave() && run.kills_in_wave == 0 && !boss_alive(world) {
        EnemyKind::OgreKing
    } else {
        ladder_kind(run.wave, rng.gen())
    };

    let health = base * health_factor(kind);
    let entity = spawn_enemy(world, kind, x, health, enemy_speed(kind, run.wave));
    run.spawned_in_wave += 1;
    if kind == EnemyKind::OgreKing {
        info!("Wave {}: Ogre King spawned with {:.0} HP", run.wave, health);
    }
    Some(Spawned { entity, kind, health })
}

// ── Off-screen cleanup ───────────────────────────────────────────────

/// Removes enemies pushed far past the screen edge, without credit. Under
/// the linear policy the spawn budget is refunded so they come back.
pub fn cull_offscreen_enemies(world: &mut World, run: &mut RunState, policy: SpawnPolicy) -> usize {
    let lost: Vec<hecs::Entity> = world
        .query::<(&Enemy, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (_, pos, hitbox))| {
            hitbox
                .rect_at(pos)
                .is_offscreen(SCREEN_WIDTH, SCREEN_HEIGHT, ENEMY_OFFSCREEN_MARGIN)
        })
        .map(|(e, _)| e)
        .collect();

    for &entity in &lost {
        if world.despawn(entity).is_ok() && policy == SpawnPolicy::Linear {
            run.spawned_in_wave = run.spawned_in_wave.saturating_sub(1);
        }
    }
    if !lost.is_empty() {
        debug!("Culled {} enemies pushed off screen", lost.len());
    }
    lost.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Health;
    use crate::game::profile::Profile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_run(wave: u32) -> RunState {
        let mut run = RunState::new(&Profile::new());
        run.wave = wave;
        run
    }

    fn kinds(world: &World) -> Vec<EnemyKind> {
        world.query::<&Enemy>().iter().map(|(_, e)| e.kind).collect()
    }

    #[test]
    fn wave_one_weak_health_is_forty_two() {
        assert!((base_health(20.0, 1) - 42.0).abs() < 1e-4);

        let mut world = World::new();
        let mut run = make_run(1);
        let mut rng = StdRng::seed_from_u64(5);
        // Wave one has no strong spawns, so every linear spawn is weak.
        for _ in 0..5 {
            run.spawn_timer = 0;
            let s = spawn_system(&mut world, &mut run, SpawnPolicy::Linear, &mut rng).unwrap();
            assert!((s.health - 42.0).abs() < 1e-4);
            assert!(matches!(s.kind, EnemyKind::Ogre | EnemyKind::Goblin));
        }
    }

    #[test]
    fn ladder_bands_follow_wave_gates() {
        assert_eq!(ladder_kind(1, 0.0), EnemyKind::Ogre);
        assert_eq!(ladder_kind(2, 0.29), EnemyKind::Goblin);
        assert_eq!(ladder_kind(2, 0.31), EnemyKind::Ogre);
        assert_eq!(ladder_kind(4, 0.29), EnemyKind::SkeletonArcher);
        assert_eq!(ladder_kind(4, 0.59), EnemyKind::Goblin);
        assert_eq!(ladder_kind(4, 0.61), EnemyKind::Ogre);
        assert_eq!(ladder_kind(7, 0.14), EnemyKind::Troll);
        assert_eq!(ladder_kind(7, 0.44), EnemyKind::SkeletonArcher);
        assert_eq!(ladder_kind(7, 0.74), EnemyKind::Goblin);
        assert_eq!(ladder_kind(7, 0.76), EnemyKind::Ogre);
    }

    /// Spawns one regular enemy at a time into an empty arena and tallies
    /// the kinds as [ogre, goblin, troll, archer].
    fn boss_wave_mix(wave: u32, draws: usize) -> [usize; 4] {
        let mut rng = StdRng::seed_from_u64(wave as u64 * 31 + 7);
        let mut counts = [0; 4];
        for _ in 0..draws {
            let mut world = World::new();
            let mut run = make_run(wave);
            let s = spawn_system(&mut world, &mut run, SpawnPolicy::BossWave, &mut rng).unwrap();
            let slot = match s.kind {
                EnemyKind::Ogre => 0,
                EnemyKind::Goblin => 1,
                EnemyKind::Troll => 2,
                EnemyKind::SkeletonArcher => 3,
                EnemyKind::OgreKing => panic!("king outside a boss wave"),
            };
            counts[slot] += 1;
        }
        counts
    }

    fn near(count: usize, draws: usize, share: f32) -> bool {
        let got = count as f32 / draws as f32;
        (got - share).abs() < 0.04
    }

    #[test]
    fn boss_wave_mix_matches_ladder_shares() {
        let draws = 4000;

        let [ogre, goblin, troll, archer] = boss_wave_mix(1, draws);
        assert_eq!((ogre, goblin, troll, archer), (draws, 0, 0, 0));

        let [ogre, goblin, troll, archer] = boss_wave_mix(2, draws);
        assert!(near(goblin, draws, 0.30) && near(ogre, draws, 0.70));
        assert_eq!(troll + archer, 0);

        let [ogre, goblin, troll, archer] = boss_wave_mix(4, draws);
        assert!(near(archer, draws, 0.30));
        assert!(near(goblin, draws, 0.30));
        assert!(near(ogre, draws, 0.40));
        assert_eq!(troll, 0);

        let [ogre, goblin, troll, archer] = boss_wave_mix(7, draws);
        assert!(near(troll, draws, 0.15));
        assert!(near(archer, draws, 0.30));
        assert!(near(goblin, draws, 0.30));
        assert!(near(ogre, draws, 0.25));
    }

    #[test]
    fn difficulty_steps() {
        assert!((diff_mult(9) - 1.45).abs() < 1e-5);
        assert!((diff_mult(10) - 1.7).abs() < 1e-5);
        assert!((diff_mult(20) - (1.56 + 1.0)).abs() < 1e-5);
    }

    #[test]
    fn interval_has_a_floor() {
        assert_eq!(spawn_interval(1), 110);
        assert_eq!(spawn_interval(8), 40);
        assert_eq!(spawn_interval(30), 40);
    }

    #[test]
    fn speed_scales_with_wave() {
        assert!((enemy_speed(EnemyKind::Ogre, 2) - 3.1).abs() < 1e-5);
        assert!((enemy_speed(EnemyKind::Ogre, 21) - (3.0 + 1.05) * 1.2).abs() < 1e-4);
    }

    #[test]
    fn timer_rearms_after_attempt() {
        let mut world = World::new();
        let mut run = make_run(1);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(spawn_system(&mut world, &mut run, SpawnPolicy::BossWave, &mut rng).is_some());
        assert_eq!(run.spawn_timer, spawn_interval(1) - 1);
        assert!(spawn_system(&mut world, &mut run, SpawnPolicy::BossWave, &mut rng).is_none());
        assert_eq!(run.spawn_timer, spawn_interval(1) - 2);
    }

    #[test]
    fn linear_never_exceeds_wave_budget() {
        let mut world = World::new();
        let mut run = make_run(4);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            run.spawn_timer = 0;
            spawn_system(&mut world, &mut run, SpawnPolicy::Linear, &mut rng);
        }
        assert_eq!(run.spawned_in_wave, run.kill_quota());
        assert_eq!(enemy_count(&world), run.kill_quota() as usize);
    }

    #[test]
    fn boss_wave_caps_enemies_on_screen() {
        let mut world = World::new();
        let mut run = make_run(3);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            run.spawn_timer = 0;
            spawn_system(&mut world, &mut run, SpawnPolicy::BossWave, &mut rng);
        }
        assert_eq!(enemy_count(&world), max_on_screen(3));
    }

    #[test]
    fn boss_wave_respects_remaining_quota() {
        let mut world = World::new();
        let mut run = make_run(3);
        run.kills_in_wave = run.kill_quota() - 2;
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..20 {
            run.spawn_timer = 0;
            spawn_system(&mut world, &mut run, SpawnPolicy::BossWave, &mut rng);
        }
        assert_eq!(enemy_count(&world), 2);
    }

    #[test]
    fn tenth_wave_opens_with_one_king() {
        let mut world = World::new();
        let mut run = make_run(9);
        run.advance_wave();
        assert!(run.is_boss_wave());
        let mut rng = StdRng::seed_from_u64(10);

        let first = spawn_system(&mut world, &mut run, SpawnPolicy::BossWave, &mut rng).unwrap();
        assert_eq!(first.kind, EnemyKind::OgreKing);
        let expected = base_health(20.0, 10) * 15.0;
        assert!((first.health - expected).abs() < 1e-3);
        assert_eq!(run.spawn_timer, BOSS_ALIVE_SPAWN_INTERVAL - 1);

        // While the king lives only regulars join, at the slow interval.
        for _ in 0..(BOSS_ALIVE_SPAWN_INTERVAL * 3) {
            spawn_system(&mut world, &mut run, SpawnPolicy::BossWave, &mut rng);
        }
        let on_field = kinds(&world);
        assert_eq!(on_field.iter().filter(|k| **k == EnemyKind::OgreKing).count(), 1);
        assert_eq!(on_field.len(), 4);

        // Kill the king; regular pacing resumes and no second king appears.
        let king = world
            .query::<&Enemy>()
            .iter()
            .find(|(_, e)| e.kind == EnemyKind::OgreKing)
            .map(|(e, _)| e)
            .unwrap();
        world.despawn(king).unwrap();
        run.kills_in_wave += 1;
        run.spawn_timer = 0;
        spawn_system(&mut world, &mut run, SpawnPolicy::BossWave, &mut rng);
        assert_eq!(run.spawn_timer, spawn_interval(10) - 1);
        for _ in 0..200 {
            spawn_system(&mut world, &mut run, SpawnPolicy::BossWave, &mut rng);
        }
        assert!(!boss_alive(&world));
    }

    #[test]
    fn culling_refunds_linear_budget() {
        let mut world = World::new();
        let mut run = make_run(2);
        let far = spawn_enemy(&mut world, EnemyKind::Ogre, -600.0, 40.0, 3.0);
        spawn_enemy(&mut world, EnemyKind::Ogre, -SPAWN_MARGIN, 40.0, 3.0);
        run.spawned_in_wave = 2;

        assert_eq!(cull_offscreen_enemies(&mut world, &mut run, SpawnPolicy::Linear), 1);
        assert!(!world.contains(far));
        assert_eq!(run.spawned_in_wave, 1);
        assert_eq!(run.kills_in_wave, 0);
        assert_eq!(world.query::<&Health>().iter().count(), 1);
    }
}
