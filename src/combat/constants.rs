//! Combat rule constants - all tunable values in one place
//!
//! Resources are integers. Multipliers apply to integer values and the
//! result is truncated toward zero.

// Resource caps
pub const MAX_STAMINA: u32 = 100;
pub const MAX_SPECIAL: u32 = 100;

// Human starting resources
pub const STARTING_HUMAN_HEALTH: u32 = 140;
pub const STARTING_HUMAN_STAMINA: u32 = 100;

// Attack
pub const ATTACK_STAMINA_COST: u32 = 15;
pub const ATTACK_SPECIAL_GAIN: u32 = 10;
pub const ATTACK_DAMAGE_MIN: u32 = 15;
pub const ATTACK_DAMAGE_MAX: u32 = 30;
pub const CRITICAL_CHANCE: f64 = 0.2;
pub const CRITICAL_MULTIPLIER: f64 = 1.5;

// Special attack
pub const SPECIAL_STAMINA_COST: u32 = 25;
pub const SPECIAL_DAMAGE_MIN: u32 = 40;
pub const SPECIAL_DAMAGE_MAX: u32 = 60;

// Defend
pub const DEFEND_STAMINA_COST: u32 = 10;
pub const DEFEND_SPECIAL_GAIN: u32 = 15;
pub const BLOCK_DAMAGE_FACTOR: f64 = 0.5;
/// Share of the blocked-through damage the opponent heals back
pub const OPPONENT_BLOCK_HEAL_FACTOR: f64 = 0.5;

// Rest
pub const REST_STAMINA_MIN: u32 = 25;
pub const REST_STAMINA_MAX: u32 = 40;
pub const REST_SPECIAL_GAIN: u32 = 5;

/// Multiply an integer by a factor, truncating toward zero
pub fn scale(value: u32, factor: f64) -> u32 {
    (value as f64 * factor) as u32
}
