use hecs::World;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::ai::enemy_ai::enemy_ai_system;
use crate::config::{
    SimConfig, SCREEN_HEIGHT, SHOP_FOOTER_HEIGHT, SHOP_HEADER_HEIGHT, SHOP_LIST_TOP,
    SHOP_ROW_HEIGHT, SHOP_SECTION_GAP, SHOP_WHEEL_STEP,
};
use crate::ecs::systems::abilities::abilities_system;
use crate::ecs::systems::combat::combat_system;
use crate::ecs::systems::effects::{effects_system, particle_system};
use crate::ecs::systems::projectile::{
    fire_system, projectile_collision_system, projectile_movement_system,
};
use crate::ecs::systems::spawn::{cull_offscreen_enemies, spawn_system};
use crate::ecs::world::{clear_projectiles_and_effects, create_world};
use crate::game::cards::{apply_card, generate_offers, CardOffer};
use crate::game::profile::Profile;
use crate::game::run::RunState;
use crate::game::snapshot::build_snapshot;
use crate::game::upgrades::{all_abilities, all_perma_upgrades, purchase};
use crate::protocol::{FrameInput, Screen, ShopItem, Snapshot};

// ── Shop view ────────────────────────────────────────────────────────

/// Scroll position of the shop list and where closing the shop leads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShopView {
    /// Zero at the top, negative when scrolled down.
    pub scroll: f32,
    pub returns_to: Screen,
}

impl ShopView {
    pub fn new(returns_to: Screen) -> Self {
        Self {
            scroll: 0.0,
            returns_to,
        }
    }

    /// Lowest scroll offset that still keeps the last row above the footer.
    pub fn max_scroll_down() -> f32 {
        let content = SHOP_LIST_TOP
            + all_abilities().len() as f32 * SHOP_ROW_HEIGHT
            + SHOP_SECTION_GAP
            + all_perma_upgrades().len() as f32 * SHOP_ROW_HEIGHT;
        (-(content - SCREEN_HEIGHT + SHOP_HEADER_HEIGHT + SHOP_FOOTER_HEIGHT)).min(0.0)
    }

    /// Scrolls by mouse-wheel notches; positive moves the list back up.
    pub fn scroll_by(&mut self, notches: f32) {
        self.scroll = (self.scroll + notches * SHOP_WHEEL_STEP).clamp(Self::max_scroll_down(), 0.0);
    }
}

// ── Game ─────────────────────────────────────────────────────────────

/// The whole simulation: screen state machine, per-run state, persistent
/// profile and the entity world.
pub struct Game {
    world: World,
    run: RunState,
    profile: Profile,
    screen: Screen,
    cards: Vec<CardOffer>,
    shop: ShopView,
    config: SimConfig,
    rng: StdRng,
    tick: u64,
}

impl Game {
    pub fn new(config: SimConfig, profile: Profile) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            world: create_world(),
            run: RunState::new(&profile),
            profile,
            screen: Screen::Menu,
            cards: Vec::new(),
            shop: ShopView::new(Screen::Menu),
            config,
            rng,
            tick: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn run_mut(&mut self) -> &mut RunState {
        &mut self.run
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn cards(&self) -> &[CardOffer] {
        &self.cards
    }

    pub fn shop(&self) -> &ShopView {
        &self.shop
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn snapshot(&self) -> Snapshot {
        let shop = (self.screen == Screen::Shop).then_some(&self.shop);
        build_snapshot(
            self.tick,
            self.screen,
            &self.world,
            &self.run,
            &self.profile,
            &self.cards,
            shop,
        )
    }

    /// Advances the simulation by one frame and returns the screen it ends
    /// on.
    pub fn tick(&mut self, input: &FrameInput) -> Screen {
        match self.screen {
            Screen::Menu => {
                if input.confirm {
                    self.reset_run();
                } else if input.open_shop {
                    self.open_shop(Screen::Menu);
                }
            }
            Screen::Shop => self.shop_tick(input),
            Screen::Playing => self.play_tick(input),
            Screen::CardSelect => {
                if let Some(offer) = input.pick_card.and_then(|i| self.cards.get(i)).cloned() {
                    self.pick_card(offer);
                }
            }
            Screen::GameOver | Screen::Victory => {
                if input.back {
                    self.set_screen(Screen::Menu);
                }
            }
        }
        self.tick += 1;
        self.screen
    }

    /// Starts a new run: wave one, a fresh wizard with the profile's bonuses
    /// and an empty arena.
    pub fn reset_run(&mut self) {
        self.world.clear();
        self.run = RunState::new(&self.profile);
        self.cards.clear();
        info!(
            "New run: {} HP, x{:.2} damage, {} abilities",
            self.run.wizard.max_health,
            self.run.wizard.damage_multiplier,
            self.run.wizard.abilities.len()
        );
        self.set_screen(Screen::Playing);
    }

    fn set_screen(&mut self, next: Screen) {
        if self.screen != next {
            debug!("Screen {:?} -> {:?}", self.screen, next);
            self.screen = next;
        }
    }

    fn open_shop(&mut self, returns_to: Screen) {
        self.shop = ShopView::new(returns_to);
        self.set_screen(Screen::Shop);
    }

    // ── Shop ─────────────────────────────────────────────────────────

    fn shop_tick(&mut self, input: &FrameInput) {
        if input.scroll != 0.0 {
            self.shop.scroll_by(input.scroll);
        }
        if let Some(item) = input.buy {
            self.buy(item);
        }

        let leave = input.back || (input.confirm && self.shop.returns_to == Screen::Playing);
        if leave {
            self.shop.scroll = 0.0;
            self.set_screen(self.shop.returns_to);
        }
    }

    fn buy(&mut self, item: ShopItem) {
        match purchase(&mut self.profile, item) {
            Ok(cost) => {
                info!("Bought {:?} for {} coins ({} left)", item, cost, self.profile.coins);
                // Unlocks bought between waves take effect in the current run.
                if let (ShopItem::Ability(ability), Screen::Playing) = (item, self.shop.returns_to) {
                    self.run.wizard.grant_ability(ability);
                }
            }
            Err(e) => debug!("Purchase of {:?} rejected: {}", item, e),
        }
    }

    // ── Card select ──────────────────────────────────────────────────

    fn pick_card(&mut self, offer: CardOffer) {
        apply_card(&mut self.run.wizard, &mut self.profile, offer.kind);
        info!("Wave {}: picked {}", self.run.wave, offer.name);
        self.cards.clear();

        self.run.advance_wave();
        clear_projectiles_and_effects(&mut self.world);

        if self.run.wave > self.config.final_wave {
            info!("Victory after wave {} with score {}", self.config.final_wave, self.run.score);
            self.set_screen(Screen::Victory);
        } else if self.config.shop_between_waves {
            self.open_shop(Screen::Playing);
        } else {
            self.set_screen(Screen::Playing);
        }
    }

    // ── Playing ──────────────────────────────────────────────────────

    fn play_tick(&mut self, input: &FrameInput) {
        let run = &mut self.run;
        let world = &mut self.world;
        let rng = &mut self.rng;

        if let Some(slot) = input.select_weapon {
            if !run.wizard.select_weapon(slot) {
                debug!("Weapon slot {} is locked", slot);
            }
        }
        run.wizard.update_movement(input);
        run.wizard.tick_cast_cooldown();
        if input.fire {
            fire_system(world, &mut run.wizard, rng);
        }

        abilities_system(world, run, &mut self.profile, input, rng);
        projectile_movement_system(world);
        spawn_system(world, run, self.config.spawn_policy, rng);
        projectile_collision_system(world, run, &mut self.profile, rng);

        enemy_ai_system(world, run.wizard.position);
        let combat = combat_system(world, &mut run.wizard);
        if combat.damage_taken > 0.0 {
            debug!("Wizard took {:.0} damage ({:.0} left)", combat.damage_taken, run.wizard.health);
        }

        effects_system(world, run, &mut self.profile, rng);
        particle_system(world);
        cull_offscreen_enemies(world, run, self.config.spawn_policy);

        if !self.run.wizard.is_alive() {
            info!(
                "Game over on wave {} with score {} ({} coins banked)",
                self.run.wave, self.run.score, self.profile.coins
            );
            self.set_screen(Screen::GameOver);
        } else if self.run.wave_cleared() {
            info!("Wave {} cleared", self.run.wave);
            self.cards = generate_offers(&self.run.wizard, &mut self.rng);
            self.set_screen(Screen::CardSelect);
        }
    }
}
