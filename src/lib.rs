//! LeBron Arena - turn-based duel against an adaptive opponent
//!
//! The library is the combat and decision core. Rendering, accounts and
//! reward curves live with the caller, which supplies a difficulty and one
//! action per round and receives a `BattleReport` when the battle ends.

pub mod battle;
pub mod combat;
pub mod core;
