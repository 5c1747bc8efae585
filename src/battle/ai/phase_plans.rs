//! Battle phase derivation
//!
//! The opponent re-weights its choices by coarse battle stage:
//! - Early: full health, first few turns
//! - Mid: still healthy or still early in the fight
//! - Late: worn down after many turns

use serde::{Deserialize, Serialize};

use crate::combat::CombatantState;

const EARLY_HEALTH_FRACTION: f64 = 0.7;
const EARLY_TURN_LIMIT: u32 = 5;
const MID_HEALTH_FRACTION: f64 = 0.3;
const MID_TURN_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattlePhase {
    #[default]
    Early,
    Mid,
    Late,
}

impl BattlePhase {
    /// Derive the phase from own health and the decision count
    pub fn derive(own: &CombatantState, turn_count: u32) -> Self {
        let health = own.health as f64;
        let max = own.max_health as f64;

        if health > max * EARLY_HEALTH_FRACTION && turn_count < EARLY_TURN_LIMIT {
            BattlePhase::Early
        } else if health > max * MID_HEALTH_FRACTION || turn_count < MID_TURN_LIMIT {
            BattlePhase::Mid
        } else {
            BattlePhase::Late
        }
    }
}
