use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

// ── Core type aliases ──────────────────────────────────────────────

pub type EntityId = u64;
pub type Tick = u64;

// ── Geometry ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or zero for a zero-length vector.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len < 0.0001 {
            Vec2::default()
        } else {
            Vec2::new(self.x / len, self.y / len)
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

// ── Screens ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Menu,
    Shop,
    Playing,
    CardSelect,
    GameOver,
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Biome {
    Forest,
    Ice,
    Volcano,
}

impl Biome {
    pub fn for_wave(wave: u32) -> Biome {
        if wave > 4 {
            Biome::Volcano
        } else if wave > 2 {
            Biome::Ice
        } else {
            Biome::Forest
        }
    }
}

// ── Enemy types ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Ogre,
    Goblin,
    Troll,
    SkeletonArcher,
    OgreKing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyBehaviorState {
    Approaching,
    Attacking,
}

// ── Weapons & projectiles ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponKind {
    Default,
    ArcaneVolley,
    VoidLance,
    FireRing,
}

impl WeaponKind {
    /// Maps a number-key slot (1–4) to a weapon.
    pub fn from_slot(slot: u8) -> Option<WeaponKind> {
        match slot {
            1 => Some(WeaponKind::Default),
            2 => Some(WeaponKind::ArcaneVolley),
            3 => Some(WeaponKind::VoidLance),
            4 => Some(WeaponKind::FireRing),
            _ => None,
        }
    }

    /// The shop unlock backing this weapon. The default wand is always owned.
    pub fn unlock(self) -> Option<AbilityKind> {
        match self {
            WeaponKind::Default => None,
            WeaponKind::ArcaneVolley => Some(AbilityKind::ArcaneVolley),
            WeaponKind::VoidLance => Some(AbilityKind::VoidLance),
            WeaponKind::FireRing => Some(AbilityKind::FireRing),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Default,
    ArcaneVolley,
    VoidLance,
    FireRing,
    EnemyArrow,
    EnemyBoulder,
}

impl From<WeaponKind> for ProjectileKind {
    fn from(weapon: WeaponKind) -> Self {
        match weapon {
            WeaponKind::Default => ProjectileKind::Default,
            WeaponKind::ArcaneVolley => ProjectileKind::ArcaneVolley,
            WeaponKind::VoidLance => ProjectileKind::VoidLance,
            WeaponKind::FireRing => ProjectileKind::FireRing,
        }
    }
}

// ── Abilities & upgrades ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AbilityKind {
    Lightning,
    Tornado,
    Dragon,
    ArcaneVolley,
    VoidLance,
    FireRing,
}

/// Card-draft upgrade types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Health,
    Speed,
    Damage,
    Multishot,
    Piercing,
    Coins,
    /// Padding offer used when too few real upgrades remain.
    BonusCoins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PermaUpgradeId {
    #[serde(rename = "PERMA_DMG")]
    RunicPower,
    #[serde(rename = "PERMA_HP")]
    TitanHeart,
    #[serde(rename = "PERMA_SPEED")]
    WindSoul,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopItem {
    Ability(AbilityKind),
    Permanent(PermaUpgradeId),
}

// ── Input (renderer/input layer → core) ────────────────────────────

/// Pre-decoded intents for one frame. Physical key bindings live in the
/// launcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub fire: bool,
    pub select_weapon: Option<u8>,
    pub tornado: bool,
    pub dragon: bool,
    /// ENTER-equivalent.
    pub confirm: bool,
    /// ESC-equivalent.
    pub back: bool,
    pub open_shop: bool,
    pub pick_card: Option<usize>,
    pub buy: Option<ShopItem>,
    /// Mouse wheel notches; positive scrolls the shop list up.
    pub scroll: f32,
}

// ── Snapshot (core → renderer) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub position: Vec2,
    pub facing_right: bool,
    pub health: f32,
    pub max_health: f32,
    pub is_casting: bool,
    pub wand_color: [u8; 3],
    pub current_weapon: WeaponKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySnapshot {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub size: Vec2,
    pub facing_right: bool,
    pub health: f32,
    pub max_health: f32,
    pub attacking: bool,
    /// Progress through the current attack cycle, 0.0–1.0.
    pub attack_phase: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub kind: ProjectileKind,
    pub position: Vec2,
    pub scale: f32,
    pub trail: Vec<Vec2>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EffectSnapshot {
    LightningBolt { start: Vec2, end: Vec2, life: u32 },
    Tornado { position: Vec2, direction: f32, life: u32 },
    Dragon { position: Vec2, life: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub position: Vec2,
    pub size: f32,
    pub color: [u8; 3],
    /// Remaining life as a fraction, used for alpha.
    pub alpha: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub wave: u32,
    pub biome: Biome,
    pub coins: u64,
    pub score: u64,
    pub kills: u32,
    pub kill_quota: u32,
    pub lightning_unlocked: bool,
    pub lightning_charge: f32,
    pub tornado_unlocked: bool,
    pub tornado_cooldown: f32,
    pub dragon_unlocked: bool,
    pub dragon_cooldown: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub kind: UpgradeKind,
    pub name: String,
    pub description: String,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopEntrySnapshot {
    pub item: ShopItem,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub level: Option<u32>,
    pub owned: bool,
    pub affordable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSnapshot {
    pub entries: Vec<ShopEntrySnapshot>,
    pub scroll: f32,
    pub returns_to: Screen,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: Tick,
    pub screen: Screen,
    pub wizard: WizardSnapshot,
    pub enemies: Vec<EnemySnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub effects: Vec<EffectSnapshot>,
    pub particles: Vec<ParticleSnapshot>,
    pub hud: HudSnapshot,
    pub cards: Vec<CardSnapshot>,
    pub shop: Option<ShopSnapshot>,
}

/// Encodes a snapshot as named-field MessagePack for an out-of-process
/// renderer.
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<Vec<u8>, rmp_serde::encode::Error> {
    rmp_serde::to_vec_named(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn biome_thresholds() {
        assert_eq!(Biome::for_wave(1), Biome::Forest);
        assert_eq!(Biome::for_wave(2), Biome::Forest);
        assert_eq!(Biome::for_wave(3), Biome::Ice);
        assert_eq!(Biome::for_wave(4), Biome::Ice);
        assert_eq!(Biome::for_wave(5), Biome::Volcano);
        assert_eq!(Biome::for_wave(40), Biome::Volcano);
    }

    #[test]
    fn weapon_slots() {
        assert_eq!(WeaponKind::from_slot(1), Some(WeaponKind::Default));
        assert_eq!(WeaponKind::from_slot(4), Some(WeaponKind::FireRing));
        assert_eq!(WeaponKind::from_slot(0), None);
        assert_eq!(WeaponKind::from_slot(5), None);
        assert_eq!(WeaponKind::Default.unlock(), None);
        assert_eq!(WeaponKind::VoidLance.unlock(), Some(AbilityKind::VoidLance));
    }

    #[test]
    fn normalized_zero_vector_stays_zero() {
        assert_eq!(Vec2::default().normalized(), Vec2::default());
        let n = Vec2::new(3.0, 4.0).normalized();
        assert!((n.length() - 1.0).abs() < 1e-5);
    }
}
