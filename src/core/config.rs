//! Battle configuration with documented defaults
//!
//! Fighter names and the human side's starting resources. The opponent's
//! resources come from its `DifficultyProfile`.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{MAX_STAMINA, STARTING_HUMAN_HEALTH, STARTING_HUMAN_STAMINA};
use crate::core::error::{ArenaError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Name used in the human fighter's narrative lines
    pub human_name: String,

    /// Name used in the opponent's narrative lines
    pub opponent_name: String,

    /// Name of the opponent's signature special attack
    pub special_move_name: String,

    /// Human health at battle start (also its max health)
    ///
    /// The opponent's pattern tracker assumes this as the human's
    /// last observed health before the first decision.
    pub human_health: u32,

    /// Human stamina at battle start
    pub human_stamina: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            human_name: "You".to_string(),
            opponent_name: "LeBron James".to_string(),
            special_move_name: "Signature Slam Dunk".to_string(),
            human_health: STARTING_HUMAN_HEALTH,
            human_stamina: STARTING_HUMAN_STAMINA,
        }
    }
}

impl ArenaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.human_health == 0 {
            return Err(ArenaError::InvalidConfig(
                "human_health must be positive".into(),
            ));
        }

        if self.human_stamina > MAX_STAMINA {
            return Err(ArenaError::InvalidConfig(format!(
                "human_stamina ({}) exceeds max stamina ({})",
                self.human_stamina, MAX_STAMINA
            )));
        }

        if self.human_name.trim().is_empty() || self.opponent_name.trim().is_empty() {
            return Err(ArenaError::InvalidConfig("fighter names must not be empty".into()));
        }

        Ok(())
    }
}
