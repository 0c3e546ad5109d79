use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::config::{CARD_BONUS_COINS, CARD_COINS, MAX_STAT_LEVEL};
use crate::game::profile::Profile;
use crate::game::wizard::{UpgradeLevels, Wizard};
use crate::protocol::{CardSnapshot, UpgradeKind};

pub const OFFERS_PER_DRAFT: usize = 3;

/// One card shown on the wave-cleared screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CardOffer {
    pub kind: UpgradeKind,
    pub name: String,
    pub description: &'static str,
    pub color: [u8; 3],
}

impl CardOffer {
    pub fn snapshot(&self) -> CardSnapshot {
        CardSnapshot {
            kind: self.kind,
            name: self.name.clone(),
            description: self.description.to_string(),
            color: self.color,
        }
    }
}

struct CardTemplate {
    kind: UpgradeKind,
    name: &'static str,
    description: &'static str,
    color: [u8; 3],
}

const DECK: [CardTemplate; 6] = [
    CardTemplate {
        kind: UpgradeKind::Health,
        name: "Vitality Boost",
        description: "+50 HP (Max & Heal)",
        color: [0, 255, 0],
    },
    CardTemplate {
        kind: UpgradeKind::Speed,
        name: "Swift Caster",
        description: "+Attack Speed",
        color: [255, 255, 0],
    },
    CardTemplate {
        kind: UpgradeKind::Damage,
        name: "Arcane Power",
        description: "+15% Damage",
        color: [255, 0, 255],
    },
    CardTemplate {
        kind: UpgradeKind::Multishot,
        name: "Fire Mastery",
        description: "Power Up! +Size +Damage",
        color: [0, 255, 255],
    },
    CardTemplate {
        kind: UpgradeKind::Piercing,
        name: "Spectral Bolt",
        description: "Pierce +1 Enemy",
        color: [255, 255, 255],
    },
    CardTemplate {
        kind: UpgradeKind::Coins,
        name: "Treasure Hunter",
        description: "+500 Instant Coins",
        color: [255, 215, 0],
    },
];

fn bonus_coins_offer() -> CardOffer {
    CardOffer {
        kind: UpgradeKind::BonusCoins,
        name: "Bonus Coins".to_string(),
        description: "+200 Coins",
        color: [255, 215, 0],
    }
}

/// "(n/3)" for the level this card would reach, or "(MAX)" when it reaches
/// the cap.
fn level_tag(next_level: u32) -> String {
    if next_level < MAX_STAT_LEVEL {
        format!("({}/{})", next_level, MAX_STAT_LEVEL)
    } else {
        "(MAX)".to_string()
    }
}

/// Every card the wizard may currently be offered. Maxed stats are left out.
pub fn eligible_offers(wizard: &Wizard) -> Vec<CardOffer> {
    let levels = &wizard.upgrade_levels;
    DECK.iter()
        .filter(|t| !levels.is_maxed(t.kind))
        .map(|t| {
            let name = if UpgradeLevels::is_capped(t.kind) {
                let next = levels.get(t.kind).unwrap_or(0) + 1;
                format!("{} {}", t.name, level_tag(next))
            } else {
                t.name.to_string()
            };
            CardOffer {
                kind: t.kind,
                name,
                description: t.description,
                color: t.color,
            }
        })
        .collect()
}

/// Draws three distinct offers uniformly without replacement, padding with
/// bonus-coin cards when fewer than three remain eligible.
pub fn generate_offers<R: Rng + ?Sized>(wizard: &Wizard, rng: &mut R) -> Vec<CardOffer> {
    let mut pool = eligible_offers(wizard);
    while pool.len() < OFFERS_PER_DRAFT {
        pool.push(bonus_coins_offer());
    }
    pool.shuffle(rng);
    pool.truncate(OFFERS_PER_DRAFT);
    pool
}

/// Applies a drafted card. Coin cards credit the profile; a card for a
/// maxed stat does nothing.
pub fn apply_card(wizard: &mut Wizard, profile: &mut Profile, kind: UpgradeKind) {
    match kind {
        UpgradeKind::Coins => {
            profile.add_coins(CARD_COINS);
            return;
        }
        UpgradeKind::BonusCoins => {
            profile.add_coins(CARD_BONUS_COINS);
            return;
        }
        _ => {}
    }

    if !wizard.upgrade_levels.bump(kind) {
        debug!("Card {:?} ignored: stat already maxed", kind);
        return;
    }

    match kind {
        UpgradeKind::Health => {
            wizard.max_health += 50.0;
            wizard.health = wizard.max_health;
        }
        UpgradeKind::Speed => wizard.attack_speed_boost += 3,
        UpgradeKind::Damage => wizard.damage_multiplier += 0.15,
        UpgradeKind::Multishot => wizard.multishot += 1,
        UpgradeKind::Piercing => wizard.piercing += 1,
        UpgradeKind::Coins | UpgradeKind::BonusCoins => {}
    }
}
