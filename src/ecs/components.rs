use std::collections::{HashSet, VecDeque};

use crate::game::collision::Rect;
use crate::protocol::{EnemyBehaviorState, EnemyKind, ProjectileKind, Vec2};

// ── Spatial ──────────────────────────────────────────────────────────

/// Centre of the entity's hitbox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn vec(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub fn vec(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Hitbox {
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    pub fn square(size: f32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    pub fn rect_at(&self, pos: &Position) -> Rect {
        Rect::centered(pos.vec(), self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Facing {
    pub right: bool,
}

impl Facing {
    pub fn sign(&self) -> f32 {
        if self.right {
            1.0
        } else {
            -1.0
        }
    }
}

// ── Combat ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Subtracts `amount`, flooring at zero. Returns `true` when this hit
    /// left the entity dead.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        self.current = (self.current - amount).max(0.0);
        self.current <= 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

// ── Enemy Components ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub kind: EnemyKind,
}

/// Per-type tuning resolved at spawn time.
#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub speed: f32,
    pub stop_range: f32,
    pub damage: f32,
    pub attack_cooldown_max: u32,
}

#[derive(Debug, Clone)]
pub struct EnemyAI {
    pub state: EnemyBehaviorState,
    pub attack_timer: u32,
    /// Set for exactly one frame when a melee swing lands its wind-up.
    pub did_attack: bool,
}

impl Default for EnemyAI {
    fn default() -> Self {
        Self {
            state: EnemyBehaviorState::Approaching,
            attack_timer: 0,
            did_attack: false,
        }
    }
}

// ── Projectile Components ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piercing {
    Limited(u32),
    Unlimited,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub owner: Owner,
    pub kind: ProjectileKind,
    pub damage: f32,
    pub piercing: Piercing,
    /// Enemies this projectile has already damaged. Only ever grows.
    pub hit_list: HashSet<hecs::Entity>,
    pub life: u32,
    pub scale: f32,
    pub speed: f32,
    pub seeking: bool,
    /// Weak reference; re-acquired when the tracked enemy is gone.
    pub seek_target: Option<hecs::Entity>,
    pub color: [u8; 3],
}

impl Projectile {
    pub fn radius(&self) -> f32 {
        crate::config::PROJECTILE_RADIUS * self.scale
    }

    pub fn rect_at(&self, pos: &Position) -> Rect {
        let r = self.radius();
        Rect::centered(pos.vec(), r * 2.0, r * 2.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Trail {
    pub points: VecDeque<Vec2>,
}

// ── Effects ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectKind {
    LightningBolt { start: Vec2, end: Vec2 },
    /// `position` is the bottom centre of the funnel.
    Tornado { position: Vec2, direction: f32 },
    Dragon { position: Vec2 },
}

#[derive(Debug, Clone)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub life: u32,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub velocity: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    pub color: [u8; 3],
}
