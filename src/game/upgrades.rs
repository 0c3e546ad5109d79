use thiserror::Error;

use crate::config::{
    COST_ARCANE_VOLLEY, COST_DRAGON, COST_FIRE_RING, COST_LIGHTNING, COST_TORNADO,
    COST_VOID_LANCE,
};
use crate::game::profile::Profile;
use crate::game::wizard::Wizard;
use crate::protocol::{AbilityKind, PermaUpgradeId, ShopItem};

// ── Catalogue ───────────────────────────────────────────────────────

/// One-time unlock sold in the shop.
pub struct AbilityDef {
    pub id: AbilityKind,
    pub name: &'static str,
    pub cost: u64,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermaStat {
    DamageMultiplier,
    MaxHealth,
    AttackSpeedBoost,
}

/// Levelled permanent upgrade; the price climbs with each level bought.
pub struct PermaUpgradeDef {
    pub id: PermaUpgradeId,
    pub name: &'static str,
    pub base_cost: u64,
    pub description: &'static str,
    pub stat: PermaStat,
    pub value_per_level: f32,
}

static ABILITIES: [AbilityDef; 6] = [
    AbilityDef {
        id: AbilityKind::Lightning,
        name: "Lightning Strike (Auto)",
        cost: COST_LIGHTNING,
        description: "Zaps closest enemy periodically.",
    },
    AbilityDef {
        id: AbilityKind::Tornado,
        name: "Wind Blast",
        cost: COST_TORNADO,
        description: "Push enemies back with twin tornadoes.",
    },
    AbilityDef {
        id: AbilityKind::Dragon,
        name: "Dragon Summon",
        cost: COST_DRAGON,
        description: "Summon Dragon to clear screen.",
    },
    AbilityDef {
        id: AbilityKind::ArcaneVolley,
        name: "Arcane Volley (Slot 2)",
        cost: COST_ARCANE_VOLLEY,
        description: "Five homing bolts per cast.",
    },
    AbilityDef {
        id: AbilityKind::VoidLance,
        name: "Void Lance (Slot 3)",
        cost: COST_VOID_LANCE,
        description: "Fast lance that pierces every enemy.",
    },
    AbilityDef {
        id: AbilityKind::FireRing,
        name: "Fire Ring (Slot 4)",
        cost: COST_FIRE_RING,
        description: "Slow wall of fire that burns through the horde.",
    },
];

static PERMA_UPGRADES: [PermaUpgradeDef; 3] = [
    PermaUpgradeDef {
        id: PermaUpgradeId::RunicPower,
        name: "Runic Power",
        base_cost: 500,
        description: "+10% Base Damage (Permanent)",
        stat: PermaStat::DamageMultiplier,
        value_per_level: 0.1,
    },
    PermaUpgradeDef {
        id: PermaUpgradeId::TitanHeart,
        name: "Titan Heart",
        base_cost: 400,
        description: "+50 Max HP (Permanent)",
        stat: PermaStat::MaxHealth,
        value_per_level: 50.0,
    },
    PermaUpgradeDef {
        id: PermaUpgradeId::WindSoul,
        name: "Wind Soul",
        base_cost: 400,
        description: "+Attack Speed (Permanent)",
        stat: PermaStat::AttackSpeedBoost,
        value_per_level: 5.0,
    },
];

/// Returns the full catalogue of ability unlocks, in shop order.
pub fn all_abilities() -> &'static [AbilityDef] {
    &ABILITIES
}

/// Returns the full catalogue of permanent upgrades, in shop order.
pub fn all_perma_upgrades() -> &'static [PermaUpgradeDef] {
    &PERMA_UPGRADES
}

pub fn get_ability(id: AbilityKind) -> &'static AbilityDef {
    match id {
        AbilityKind::Lightning => &ABILITIES[0],
        AbilityKind::Tornado => &ABILITIES[1],
        AbilityKind::Dragon => &ABILITIES[2],
        AbilityKind::ArcaneVolley => &ABILITIES[3],
        AbilityKind::VoidLance => &ABILITIES[4],
        AbilityKind::FireRing => &ABILITIES[5],
    }
}

pub fn get_perma_upgrade(id: PermaUpgradeId) -> &'static PermaUpgradeDef {
    match id {
        PermaUpgradeId::RunicPower => &PERMA_UPGRADES[0],
        PermaUpgradeId::TitanHeart => &PERMA_UPGRADES[1],
        PermaUpgradeId::WindSoul => &PERMA_UPGRADES[2],
    }
}

/// Price of the next level of a permanent upgrade.
pub fn perma_cost(id: PermaUpgradeId, current_level: u32) -> u64 {
    get_perma_upgrade(id).base_cost * (current_level as u64 + 1)
}

// ── Purchasing ──────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShopError {
    #[error("{0:?} is already owned")]
    AlreadyOwned(AbilityKind),

    #[error("not enough coins (need {need}, have {have})")]
    InsufficientCoins { need: u64, have: u64 },
}

/// Current price of a shop item for this profile.
pub fn price(profile: &Profile, item: ShopItem) -> u64 {
    match item {
        ShopItem::Ability(id) => get_ability(id).cost,
        ShopItem::Permanent(id) => perma_cost(id, profile.perma_level(id)),
    }
}

pub fn can_purchase(profile: &Profile, item: ShopItem) -> bool {
    if let ShopItem::Ability(id) = item {
        if profile.is_unlocked(id) {
            return false;
        }
    }
    profile.coins >= price(profile, item)
}

/// Attempts to buy `item`, deducting its price from the profile's coins.
/// Returns the amount spent.
pub fn purchase(profile: &mut Profile, item: ShopItem) -> Result<u64, ShopError> {
    if let ShopItem::Ability(id) = item {
        if profile.is_unlocked(id) {
            return Err(ShopError::AlreadyOwned(id));
        }
    }
    let cost = price(profile, item);
    if profile.coins < cost {
        return Err(ShopError::InsufficientCoins {
            need: cost,
            have: profile.coins,
        });
    }

    profile.coins -= cost;
    match item {
        ShopItem::Ability(id) => {
            profile.unlocked_abilities.insert(id);
        }
        ShopItem::Permanent(id) => {
            *profile.perma_levels.entry(id).or_insert(0) += 1;
        }
    }
    Ok(cost)
}

// ── Run start ───────────────────────────────────────────────────────

/// Copies the profile's unlocks and permanent bonuses onto a fresh wizard.
pub fn apply_profile(wizard: &mut Wizard, profile: &Profile) {
    for ability in &profile.unlocked_abilities {
        wizard.grant_ability(*ability);
    }

    for def in all_perma_upgrades() {
        let level = profile.perma_level(def.id);
        if level == 0 {
            continue;
        }
        let bonus = def.value_per_level * level as f32;
        match def.stat {
            PermaStat::DamageMultiplier => wizard.damage_multiplier += bonus,
            PermaStat::MaxHealth => {
                wizard.max_health += bonus;
                wizard.health = wizard.max_health;
            }
            PermaStat::AttackSpeedBoost => wizard.attack_speed_boost += bonus as u32,
        }
    }
}
