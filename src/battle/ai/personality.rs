//! Opponent difficulty profiles loaded from TOML
//!
//! A profile fixes the opponent's base action weights, its health pool and
//! the strength of its signature moves.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{ArenaError, Result};
use crate::core::types::{Action, Difficulty};

/// Base weight per action before any shaping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseWeights {
    pub attack: f64,
    pub defend: f64,
    pub rest: f64,
    pub special: f64,
}

impl BaseWeights {
    pub fn get(&self, action: Action) -> f64 {
        match action {
            Action::Attack => self.attack,
            Action::Defend => self.defend,
            Action::Rest => self.rest,
            Action::Special => self.special,
        }
    }
}

/// Complete difficulty profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub difficulty: Difficulty,
    /// Opponent max health
    pub max_health: u32,
    /// Opponent starting stamina
    #[serde(default = "default_stamina")]
    pub stamina: u32,
    pub weights: BaseWeights,
    /// Chance that a landed attack is narrated as a poster dunk
    pub posterize_chance: f64,
    /// Flat multiplier on special attack damage
    pub special_multiplier: f64,
}

fn default_stamina() -> u32 {
    100
}

impl DifficultyProfile {
    /// The canonical profile for each difficulty
    pub fn builtin(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                difficulty,
                max_health: 100,
                stamina: 100,
                weights: BaseWeights {
                    attack: 0.4,
                    defend: 0.3,
                    rest: 0.25,
                    special: 0.05,
                },
                posterize_chance: 0.2,
                special_multiplier: 1.0,
            },
            Difficulty::Medium => Self {
                difficulty,
                max_health: 160,
                stamina: 100,
                weights: BaseWeights {
                    attack: 0.45,
                    defend: 0.25,
                    rest: 0.2,
                    special: 0.1,
                },
                posterize_chance: 0.35,
                special_multiplier: 1.1,
            },
            Difficulty::Hard => Self {
                difficulty,
                max_health: 180,
                stamina: 100,
                weights: BaseWeights {
                    attack: 0.5,
                    defend: 0.2,
                    rest: 0.15,
                    special: 0.15,
                },
                posterize_chance: 0.5,
                special_multiplier: 1.2,
            },
        }
    }

    /// Validate profile for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_health == 0 {
            return Err(ArenaError::InvalidConfig("max_health must be positive".into()));
        }

        let weights = Action::ALL.map(|action| self.weights.get(action));
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ArenaError::InvalidConfig(
                "base weights must be finite and non-negative".into(),
            ));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(ArenaError::InvalidConfig("base weights are all zero".into()));
        }

        if !(0.0..=1.0).contains(&self.posterize_chance) {
            return Err(ArenaError::InvalidConfig(format!(
                "posterize_chance ({}) must be within [0, 1]",
                self.posterize_chance
            )));
        }

        if self.special_multiplier <= 0.0 {
            return Err(ArenaError::InvalidConfig(
                "special_multiplier must be positive".into(),
            ));
        }

        Ok(())
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::builtin(Difficulty::default())
    }
}

/// Load a profile from a TOML file
pub fn load_profile(path: impl AsRef<Path>) -> Result<DifficultyProfile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let profile: DifficultyProfile = toml::from_str(&contents)?;
    profile.validate()?;
    Ok(profile)
}

/// Load a profile by name from `data/difficulty/{name}.toml`
pub fn load_named_profile(name: &str) -> Result<DifficultyProfile> {
    load_profile(profile_path(name))
}

fn profile_path(name: &str) -> PathBuf {
    PathBuf::from("data/difficulty").join(format!("{}.toml", name))
}
