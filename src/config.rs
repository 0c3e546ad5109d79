use std::path::PathBuf;

use thiserror::Error;

// ── Screen ───────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;
pub const FPS: u32 = 60;

/// Top of the ground strip; everything stands on this line.
pub const GROUND_Y: f32 = SCREEN_HEIGHT - 50.0;

// ── Physics ──────────────────────────────────────────────────────────

pub const GRAVITY: f32 = 0.5;
pub const JUMP_STRENGTH: f32 = -14.0;
pub const PLAYER_SPEED: f32 = 6.0;
pub const PROJECTILE_SPEED: f32 = 12.0;
pub const OGRE_SPEED: f32 = 3.0;

// ── Wizard ───────────────────────────────────────────────────────────

pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_SIZE: f32 = 60.0;
pub const PLAYER_START_X: f32 = 100.0;
pub const BASE_WAND_DAMAGE: f32 = 20.0;
pub const MIN_CAST_COOLDOWN: u32 = 5;
/// The casting pose is dropped once the cooldown falls below this.
pub const CASTING_POSE_FRAMES: u32 = 10;
pub const MAX_STAT_LEVEL: u32 = 3;

/// Staff crystal colors by wand tier (multishot upgrade level).
pub const WAND_COLORS: [[u8; 3]; 4] = [
    [255, 69, 0],
    [0, 191, 255],
    [50, 205, 50],
    [255, 0, 0],
];

// ── Enemies ──────────────────────────────────────────────────────────

pub const BOSS_SIZE: f32 = 150.0;
/// Enemies wider than this count as boss-sized for coin payouts.
pub const BOSS_WIDTH_THRESHOLD: f32 = 100.0;
pub const BOSS_HEALTH_FACTOR: f32 = 15.0;
pub const BOSS_WAVE_INTERVAL: u32 = 10;
pub const MELEE_RANGE: f32 = 150.0;
pub const ATTACK_HYSTERESIS: f32 = 100.0;
pub const CONTACT_DAMAGE: f32 = 1.0;
pub const CONTACT_PUSH: f32 = 8.0;
pub const ARROW_SPEED: f32 = 9.0;
pub const ARROW_DAMAGE: f32 = 10.0;
pub const BOULDER_SPEED: f32 = 7.0;
pub const BOULDER_DAMAGE: f32 = 25.0;
pub const ENEMY_PROJECTILE_LIFE: u32 = 180;

// ── Spawning ─────────────────────────────────────────────────────────

pub const ENEMIES_PER_WAVE_BASE: u32 = 5;
pub const SPAWN_MARGIN: f32 = 100.0;
pub const SPAWN_INTERVAL_BASE: i32 = 120;
pub const SPAWN_INTERVAL_PER_WAVE: i32 = 10;
pub const SPAWN_INTERVAL_MIN: i32 = 40;
pub const BOSS_ALIVE_SPAWN_INTERVAL: i32 = 300;
/// Enemies pushed further than this past an edge are removed and respawned.
pub const ENEMY_OFFSCREEN_MARGIN: f32 = 400.0;

// ── Projectiles ──────────────────────────────────────────────────────

pub const PROJECTILE_RADIUS: f32 = 12.0;
pub const PROJECTILE_OFFSCREEN_MARGIN: f32 = 50.0;
pub const TRAIL_LENGTH: usize = 8;
pub const SEEK_TURN_RATE: f32 = 0.15;

// ── Abilities ────────────────────────────────────────────────────────

pub const LIGHTNING_INTERVAL: i32 = 120;
pub const LIGHTNING_FIRST_RANGE: f32 = 700.0;
pub const LIGHTNING_CHAIN_RANGE: f32 = 400.0;
pub const LIGHTNING_CHAIN_LENGTH: usize = 3;
pub const LIGHTNING_DAMAGE: f32 = 5.0;
pub const LIGHTNING_BOLT_LIFE: u32 = 15;

pub const TORNADO_COOLDOWN: u32 = 300;
pub const TORNADO_LIFE: u32 = 100;
pub const TORNADO_OFFSET: f32 = 50.0;
pub const TORNADO_SPEED: f32 = 5.0;
pub const TORNADO_PUSH: f32 = 10.0;
pub const TORNADO_WIDTH: f32 = 80.0;
pub const TORNADO_HEIGHT: f32 = 150.0;
pub const TORNADO_DAMAGE: f32 = 1.0;
pub const TORNADO_DAMAGE_EVERY: u32 = 5;

pub const DRAGON_COOLDOWN: u32 = 1800;
pub const DRAGON_LIFE: u32 = 120;

// ── Economy ──────────────────────────────────────────────────────────

pub const COIN_VALUE: u64 = 10;
pub const BOSS_COIN_VALUE: u64 = 200;
pub const SCORE_PER_KILL_PER_WAVE: u64 = 10;
pub const CARD_COINS: u64 = 500;
pub const CARD_BONUS_COINS: u64 = 200;

pub const COST_LIGHTNING: u64 = 100;
pub const COST_TORNADO: u64 = 300;
pub const COST_DRAGON: u64 = 1000;
pub const COST_ARCANE_VOLLEY: u64 = 600;
pub const COST_VOID_LANCE: u64 = 800;
pub const COST_FIRE_RING: u64 = 1200;

// ── Shop layout ──────────────────────────────────────────────────────

pub const SHOP_WHEEL_STEP: f32 = 30.0;
pub const SHOP_LIST_TOP: f32 = 200.0;
pub const SHOP_ROW_HEIGHT: f32 = 120.0;
pub const SHOP_SECTION_GAP: f32 = 70.0;
pub const SHOP_HEADER_HEIGHT: f32 = 130.0;
pub const SHOP_FOOTER_HEIGHT: f32 = 60.0;

// ── Runtime configuration ────────────────────────────────────────────

/// Which of the two wave-spawning designs drives the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPolicy {
    /// Fixed per-wave spawn budget with a weak/strong health split.
    Linear,
    /// Probability ladder with an Ogre King every tenth wave.
    BossWave,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Settings read from the environment (and an optional `.env` file).
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub spawn_policy: SpawnPolicy,
    /// Route CARD_SELECT through the shop before the next wave starts.
    pub shop_between_waves: bool,
    pub final_wave: u32,
    pub seed: Option<u64>,
    pub profile_path: PathBuf,
    pub headless_frames: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            spawn_policy: SpawnPolicy::BossWave,
            shop_between_waves: true,
            final_wave: 9999,
            seed: None,
            profile_path: default_profile_path(),
            headless_frames: 3600,
        }
    }
}

impl SimConfig {
    /// Loads `.env` if present and reads `WVO_*` variables on top of the
    /// defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("WVO_SPAWN_POLICY") {
            config.spawn_policy = match value.trim().to_ascii_lowercase().as_str() {
                "linear" => SpawnPolicy::Linear,
                "boss_wave" | "boss" => SpawnPolicy::BossWave,
                _ => return Err(invalid("WVO_SPAWN_POLICY", value)),
            };
        }
        if let Some(value) = lookup("WVO_SHOP_BETWEEN_WAVES") {
            config.shop_between_waves = parse_bool(&value)
                .ok_or_else(|| invalid("WVO_SHOP_BETWEEN_WAVES", value.clone()))?;
        }
        if let Some(value) = lookup("WVO_FINAL_WAVE") {
            config.final_wave = value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|w| *w >= 1)
                .ok_or_else(|| invalid("WVO_FINAL_WAVE", value.clone()))?;
        }
        if let Some(value) = lookup("WVO_SEED") {
            let seed = value
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid("WVO_SEED", value.clone()))?;
            config.seed = Some(seed);
        }
        if let Some(value) = lookup("WVO_PROFILE_PATH") {
            config.profile_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("WVO_HEADLESS_FRAMES") {
            config.headless_frames = value
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid("WVO_HEADLESS_FRAMES", value.clone()))?;
        }

        Ok(config)
    }
}

fn invalid(key: &'static str, value: String) -> ConfigError {
    ConfigError::InvalidValue { key, value }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `<data_dir>/wizard-vs-ogres/profile.json`, or a relative path when the
/// platform has no data directory.
pub fn default_profile_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("wizard-vs-ogres"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("profile.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = SimConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.spawn_policy, SpawnPolicy::BossWave);
        assert!(config.shop_between_waves);
        assert_eq!(config.final_wave, 9999);
        assert!(config.seed.is_none());
        assert!(config.profile_path.ends_with("profile.json"));
    }

    #[test]
    fn reads_every_variable() {
        let config = SimConfig::from_lookup(lookup_from(&[
            ("WVO_SPAWN_POLICY", "Linear"),
            ("WVO_SHOP_BETWEEN_WAVES", "off"),
            ("WVO_FINAL_WAVE", "12"),
            ("WVO_SEED", "42"),
            ("WVO_PROFILE_PATH", "/tmp/p.json"),
            ("WVO_HEADLESS_FRAMES", "600"),
        ]))
        .unwrap();
        assert_eq!(config.spawn_policy, SpawnPolicy::Linear);
        assert!(!config.shop_between_waves);
        assert_eq!(config.final_wave, 12);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.profile_path, PathBuf::from("/tmp/p.json"));
        assert_eq!(config.headless_frames, 600);
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = SimConfig::from_lookup(lookup_from(&[("WVO_SPAWN_POLICY", "chaos")]))
            .unwrap_err();
        assert!(err.to_string().contains("WVO_SPAWN_POLICY"));
    }

    #[test]
    fn rejects_zero_final_wave() {
        assert!(SimConfig::from_lookup(lookup_from(&[("WVO_FINAL_WAVE", "0")])).is_err());
    }
}
