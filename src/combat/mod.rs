pub mod constants;
pub mod resolution;
pub mod state;

pub use resolution::{
    apply_damage, apply_damage_with_block_heal, available_actions, resolve_attack,
    resolve_defend, resolve_rest, resolve_special_attack, unavailable_message, validate_action,
    Challenger, Fighter, Strike,
};
pub use state::CombatantState;
