use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::protocol::{AbilityKind, PermaUpgradeId};

/// State that outlives a run: coins, shop unlocks and permanent upgrade
/// levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub coins: u64,
    pub unlocked_abilities: BTreeSet<AbilityKind>,
    pub perma_levels: BTreeMap<PermaUpgradeId, u32>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, ability: AbilityKind) -> bool {
        self.unlocked_abilities.contains(&ability)
    }

    pub fn perma_level(&self, id: PermaUpgradeId) -> u32 {
        self.perma_levels.get(&id).copied().unwrap_or(0)
    }

    pub fn add_coins(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads a profile from disk.
pub fn read(path: &Path) -> Result<Profile, ProfileError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Loads the saved profile, falling back to a fresh one if the file is
/// missing or malformed.
pub fn load(path: &Path) -> Profile {
    match read(path) {
        Ok(profile) => {
            info!(
                "Loaded profile from {}: {} coins, {} unlocks",
                path.display(),
                profile.coins,
                profile.unlocked_abilities.len()
            );
            profile
        }
        Err(ProfileError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No profile at {}, starting fresh", path.display());
            Profile::new()
        }
        Err(e) => {
            warn!(
                "Failed to load profile at {}: {}. Starting fresh.",
                path.display(),
                e
            );
            Profile::new()
        }
    }
}

/// Writes the profile as pretty JSON, creating parent directories.
pub fn save(path: &Path, profile: &Profile) -> Result<(), ProfileError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(profile)?;
    std::fs::write(path, json)?;
    info!("Saved profile to {}", path.display());
    Ok(())
}
