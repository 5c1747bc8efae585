//! Opponent AI for the duel
//!
//! Architecture: Trait + Data hybrid
//! - CombatAI trait defines the interface for swappable decision strategies
//! - DifficultyProfile holds TOML-loadable base weights and move strength
//! - DecisionContext gives a strategy a read-only view of both fighters

pub mod commander;
pub mod greedy;
pub mod pattern;
pub mod personality;
pub mod phase_plans;
pub mod prediction;
pub mod weights;

pub use commander::AdaptiveCommander;
pub use greedy::GreedyPolicy;
pub use pattern::{AdaptiveScores, PatternTracker, PlayStyle, MOVE_HISTORY_LEN};
pub use personality::{load_named_profile, load_profile, BaseWeights, DifficultyProfile};
pub use phase_plans::BattlePhase;
pub use prediction::{Outcome, PredictionEngine, PredictionRule, SuffixPattern};
pub use weights::{ActionWeights, ForcedReason, WeightShaping};

use rand::Rng;

use crate::combat::CombatantState;
use crate::core::types::Action;

/// What a strategy sees when deciding: itself and the fighter across from it
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub own: &'a CombatantState,
    pub opponent: &'a CombatantState,
}

impl<'a> DecisionContext<'a> {
    pub fn new(own: &'a CombatantState, opponent: &'a CombatantState) -> Self {
        Self { own, opponent }
    }
}

/// Trait for action-choosing strategies
pub trait CombatAI {
    /// Choose this round's action
    fn choose_action<R: Rng + ?Sized>(&mut self, context: &DecisionContext, rng: &mut R) -> Action;

    /// Short label for logs and reports
    fn label(&self) -> &str;
}
