use crate::config::ENEMIES_PER_WAVE_BASE;
use crate::game::profile::Profile;
use crate::game::upgrades::apply_profile;
use crate::game::wizard::Wizard;
use crate::protocol::Biome;

/// Everything that belongs to a single run and is thrown away by
/// `reset_run`.
#[derive(Debug, Clone)]
pub struct RunState {
    pub wizard: Wizard,
    pub wave: u32,
    pub biome: Biome,
    pub kills_in_wave: u32,
    pub spawned_in_wave: u32,
    pub score: u64,
    pub spawn_timer: i32,
    pub lightning_timer: i32,
    pub tornado_cooldown: u32,
    pub dragon_cooldown: u32,
}

impl RunState {
    /// Wave one with a fresh wizard carrying the profile's unlocks and
    /// permanent bonuses.
    pub fn new(profile: &Profile) -> Self {
        let mut wizard = Wizard::new();
        apply_profile(&mut wizard, profile);
        Self {
            wizard,
            wave: 1,
            biome: Biome::Forest,
            kills_in_wave: 0,
            spawned_in_wave: 0,
            score: 0,
            spawn_timer: 0,
            lightning_timer: 0,
            tornado_cooldown: 0,
            dragon_cooldown: 0,
        }
    }

    /// Kills needed to clear the current wave.
    pub fn kill_quota(&self) -> u32 {
        kill_quota(self.wave)
    }

    pub fn wave_cleared(&self) -> bool {
        self.kills_in_wave >= self.kill_quota()
    }

    pub fn is_boss_wave(&self) -> bool {
        self.wave % crate::config::BOSS_WAVE_INTERVAL == 0
    }

    /// Moves to the next wave and resets the per-wave counters.
    pub fn advance_wave(&mut self) {
        self.wave += 1;
        self.kills_in_wave = 0;
        self.spawned_in_wave = 0;
        self.spawn_timer = 0;
        self.biome = Biome::for_wave(self.wave);
    }
}

pub fn kill_quota(wave: u32) -> u32 {
    ENEMIES_PER_WAVE_BASE + wave * 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{AbilityKind, PermaUpgradeId};

    #[test]
    fn quota_grows_two_per_wave() {
        assert_eq!(kill_quota(1), 7);
        assert_eq!(kill_quota(10), 25);
    }

    #[test]
    fn advancing_resets_counters_and_biome() {
        let mut run = RunState::new(&Profile::new());
        run.kills_in_wave = 7;
        run.spawned_in_wave = 7;
        run.spawn_timer = 55;
        run.score = 70;

        run.advance_wave();
        assert_eq!(run.wave, 2);
        assert_eq!(run.kills_in_wave, 0);
        assert_eq!(run.spawned_in_wave, 0);
        assert_eq!(run.spawn_timer, 0);
        assert_eq!(run.score, 70);
        assert_eq!(run.biome, Biome::Forest);

        run.advance_wave();
        assert_eq!(run.biome, Biome::Ice);
        run.advance_wave();
        run.advance_wave();
        assert_eq!(run.wave, 5);
        assert_eq!(run.biome, Biome::Volcano);
    }

    #[test]
    fn new_run_applies_profile() {
        let mut profile = Profile::new();
        profile.unlocked_abilities.insert(AbilityKind::Dragon);
        profile.perma_levels.insert(PermaUpgradeId::TitanHeart, 2);

        let run = RunState::new(&profile);
        assert!(run.wizard.has_ability(AbilityKind::Dragon));
        assert_eq!(run.wizard.max_health, 200.0);
        assert_eq!(run.wave, 1);
        assert!(!run.is_boss_wave());
    }
}
