//! Battle system - a two-fighter duel against an adaptive opponent
//!
//! The human side submits one action per round. The opponent watches how the
//! human's resources move, guesses what it did, predicts what comes next and
//! shapes its own action weights in response.

pub mod ai;
pub mod execution;
pub mod opponent;

// Re-exports for convenient access
pub use ai::{AdaptiveCommander, BattlePhase, CombatAI, DecisionContext, DifficultyProfile};
pub use execution::{
    create_battle, create_battle_with, submit_round, BattleContext, BattleReport, BattleStatus,
    NarrativeLine, RoundResult,
};
pub use opponent::Opponent;
