//! Simple resource-aware autopilot
//!
//! Plays the human side in headless runs: fires the special when ready,
//! rests when too tired to swing, otherwise mostly attacks.

use rand::Rng;

use crate::battle::ai::{CombatAI, DecisionContext};
use crate::combat::constants::ATTACK_STAMINA_COST;
use crate::core::types::Action;

#[derive(Debug, Clone, PartialEq)]
pub struct GreedyPolicy {
    /// Chance to defend instead of attacking when both are possible
    pub defend_chance: f64,
    /// Rest below this stamina even if an attack is affordable
    pub rest_below: u32,
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self {
            defend_chance: 0.2,
            rest_below: 30,
        }
    }
}

impl CombatAI for GreedyPolicy {
    fn choose_action<R: Rng + ?Sized>(&mut self, context: &DecisionContext, rng: &mut R) -> Action {
        let own = context.own;

        if own.special_ready() {
            return Action::Special;
        }
        if own.stamina < ATTACK_STAMINA_COST || own.stamina < self.rest_below {
            return Action::Rest;
        }
        if rng.gen::<f64>() < self.defend_chance {
            Action::Defend
        } else {
            Action::Attack
        }
    }

    fn label(&self) -> &str {
        "greedy"
    }
}
