use crate::config::{PLAYER_SIZE, SCREEN_WIDTH};
use crate::protocol::{
    AbilityKind, EnemySnapshot, FrameInput, Screen, ShopItem, Snapshot, WeaponKind,
};

/// Enemies closer than this make the autopilot back off instead of firing.
const KITE_DISTANCE: f32 = 140.0;
/// Tornadoes are only worth casting when something is this close.
const TORNADO_TRIGGER: f32 = 300.0;
/// Dragon fires when the horde is at least this large or health is low.
const DRAGON_CROWD: usize = 6;
const DRAGON_HEALTH_FRACTION: f32 = 0.3;

/// A scripted player that drives the headless runner. It only sees the
/// same snapshot a renderer would and answers with a [`FrameInput`].
#[derive(Debug, Default)]
pub struct Autopilot {
    /// Set once the menu's shop visit for the coming run is done.
    menu_shop_done: bool,
    /// Best weapon the profile owns, learned from shop listings.
    preferred_weapon: Option<WeaponKind>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decide(&mut self, snap: &Snapshot) -> FrameInput {
        match snap.screen {
            Screen::Menu => {
                if self.menu_shop_done {
                    self.menu_shop_done = false;
                    FrameInput {
                        confirm: true,
                        ..Default::default()
                    }
                } else {
                    self.menu_shop_done = true;
                    FrameInput {
                        open_shop: true,
                        ..Default::default()
                    }
                }
            }
            Screen::Shop => self.shop(snap),
            Screen::Playing => self.play(snap),
            Screen::CardSelect => FrameInput {
                pick_card: (!snap.cards.is_empty()).then_some(0),
                ..Default::default()
            },
            Screen::GameOver | Screen::Victory => FrameInput {
                back: true,
                ..Default::default()
            },
        }
    }

    /// Buys the cheapest affordable item each frame; leaves once nothing
    /// else fits the budget.
    fn shop(&mut self, snap: &Snapshot) -> FrameInput {
        let Some(shop) = &snap.shop else {
            return FrameInput {
                back: true,
                ..Default::default()
            };
        };

        let owned = |ability: AbilityKind| {
            shop.entries
                .iter()
                .any(|e| e.owned && e.item == ShopItem::Ability(ability))
        };
        self.preferred_weapon = [
            WeaponKind::FireRing,
            WeaponKind::VoidLance,
            WeaponKind::ArcaneVolley,
        ]
        .into_iter()
        .find(|w| w.unlock().is_some_and(|a| owned(a)));

        let cheapest = shop
            .entries
            .iter()
            .filter(|e| e.affordable)
            .min_by_key(|e| e.price);

        match cheapest {
            Some(entry) => FrameInput {
                buy: Some(entry.item),
                ..Default::default()
            },
            None => FrameInput {
                back: true,
                ..Default::default()
            },
        }
    }

    fn play(&self, snap: &Snapshot) -> FrameInput {
        let wizard = &snap.wizard;
        let mut input = FrameInput::default();

        if let Some(weapon) = self.preferred_weapon {
            if wizard.current_weapon != weapon {
                input.select_weapon = weapon_slot(weapon);
            }
        }

        let Some(target) = nearest_enemy(wizard.position.x, &snap.enemies) else {
            return input;
        };
        let dx = target.position.x - wizard.position.x;
        let dist = dx.abs();
        let enemy_right = dx >= 0.0;

        let half = PLAYER_SIZE / 2.0;
        let room_behind = if enemy_right {
            wizard.position.x - half > PLAYER_SIZE
        } else {
            wizard.position.x + half < SCREEN_WIDTH - PLAYER_SIZE
        };

        if dist < KITE_DISTANCE && room_behind {
            input.move_left = enemy_right;
            input.move_right = !enemy_right;
            input.jump = true;
        } else if wizard.facing_right != enemy_right {
            input.move_left = !enemy_right;
            input.move_right = enemy_right;
        }
        input.fire = true;

        let hud = &snap.hud;
        input.tornado = hud.tornado_unlocked && hud.tornado_cooldown <= 0.0 && dist < TORNADO_TRIGGER;
        let health_fraction = if wizard.max_health > 0.0 {
            wizard.health / wizard.max_health
        } else {
            0.0
        };
        input.dragon = hud.dragon_unlocked
            && hud.dragon_cooldown <= 0.0
            && (snap.enemies.len() >= DRAGON_CROWD || health_fraction < DRAGON_HEALTH_FRACTION);

        input
    }
}

fn weapon_slot(weapon: WeaponKind) -> Option<u8> {
    (1..=4).find(|slot| WeaponKind::from_slot(*slot) == Some(weapon))
}

fn nearest_enemy(x: f32, enemies: &[EnemySnapshot]) -> Option<&EnemySnapshot> {
    enemies.iter().min_by(|a, b| {
        (a.position.x - x)
            .abs()
            .total_cmp(&(b.position.x - x).abs())
    })
}
