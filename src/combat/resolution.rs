//! Action resolution
//!
//! One function per action, each applied to a single `CombatantState`.
//! Damage produced by an attack is never applied by the attacker: the
//! round engine hands it to the target's `take_damage`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::constants::*;
use crate::combat::state::CombatantState;
use crate::core::error::{ArenaError, Result};
use crate::core::types::Action;

/// Outgoing damage from an attack plus its narrative line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strike {
    pub damage: u32,
    pub message: String,
}

impl Strike {
    fn miss(message: String) -> Self {
        Self { damage: 0, message }
    }
}

/// Check an action's resource precondition without mutating anything
pub fn validate_action(state: &CombatantState, action: Action) -> Result<()> {
    let reason = match action {
        Action::Attack if state.stamina < ATTACK_STAMINA_COST => format!(
            "needs {} stamina, has {}",
            ATTACK_STAMINA_COST, state.stamina
        ),
        Action::Special if !state.special_ready() => format!(
            "special meter at {}/{}",
            state.special, MAX_SPECIAL
        ),
        _ => return Ok(()),
    };

    Err(ArenaError::InsufficientResource {
        fighter: state.name.clone(),
        action,
        reason,
    })
}

/// Actions whose preconditions currently hold, in canonical order
pub fn available_actions(state: &CombatantState) -> Vec<Action> {
    Action::ALL
        .into_iter()
        .filter(|action| validate_action(state, *action).is_ok())
        .collect()
}

/// Narrative line for an action whose precondition failed
pub fn unavailable_message(state: &CombatantState, action: Action) -> String {
    match action {
        Action::Attack => format!("{} is too tired to attack!", state.name),
        Action::Special => format!(
            "{} doesn't have enough energy for a special attack!",
            state.name
        ),
        Action::Defend | Action::Rest => format!("{} hesitates.", state.name),
    }
}

pub fn resolve_attack<R: Rng + ?Sized>(state: &mut CombatantState, rng: &mut R) -> Strike {
    if state.stamina < ATTACK_STAMINA_COST {
        return Strike::miss(unavailable_message(state, Action::Attack));
    }

    state.spend_stamina(ATTACK_STAMINA_COST);
    state.charge_special(ATTACK_SPECIAL_GAIN);

    let base = rng.gen_range(ATTACK_DAMAGE_MIN..=ATTACK_DAMAGE_MAX);
    if rng.gen::<f64>() < CRITICAL_CHANCE {
        let damage = scale(base, CRITICAL_MULTIPLIER);
        return Strike {
            damage,
            message: format!("{} lands a CRITICAL hit for {} damage!", state.name, damage),
        };
    }

    Strike {
        damage: base,
        message: format!("{} attacks for {} damage!", state.name, base),
    }
}

pub fn resolve_special_attack<R: Rng + ?Sized>(
    state: &mut CombatantState,
    rng: &mut R,
) -> Strike {
    if !state.special_ready() {
        return Strike::miss(unavailable_message(state, Action::Special));
    }

    state.special = 0;
    state.spend_stamina(SPECIAL_STAMINA_COST);

    let damage = rng.gen_range(SPECIAL_DAMAGE_MIN..=SPECIAL_DAMAGE_MAX);
    Strike {
        damage,
        message: format!(
            "{} unleashes a SPECIAL ATTACK for {} massive damage!",
            state.name, damage
        ),
    }
}

pub fn resolve_defend(state: &mut CombatantState) -> String {
    state.spend_stamina(DEFEND_STAMINA_COST);
    state.defending = true;
    state.charge_special(DEFEND_SPECIAL_GAIN);
    format!(
        "{} takes a defensive stance, ready to reduce incoming damage!",
        state.name
    )
}

pub fn resolve_rest<R: Rng + ?Sized>(state: &mut CombatantState, rng: &mut R) -> String {
    let gained = rng.gen_range(REST_STAMINA_MIN..=REST_STAMINA_MAX);
    state.recover_stamina(gained);
    state.charge_special(REST_SPECIAL_GAIN);
    format!("{} rests and recovers {} stamina.", state.name, gained)
}

/// Apply incoming damage, halved while defending. Clears `defending`.
pub fn apply_damage(state: &mut CombatantState, amount: u32) -> String {
    if state.defending {
        let reduced = scale(amount, BLOCK_DAMAGE_FACTOR);
        state.defending = false;
        state.lose_health(reduced);
        return format!("{} blocks and reduces damage to {}!", state.name, reduced);
    }

    state.lose_health(amount);
    format!("{} takes {} damage!", state.name, amount)
}

/// Opponent variant of `apply_damage`: a block also heals back half of the
/// damage that got through. Healing lands before the reduced damage.
pub fn apply_damage_with_block_heal(state: &mut CombatantState, amount: u32) -> String {
    if !state.defending {
        return apply_damage(state, amount);
    }

    let reduced = scale(amount, BLOCK_DAMAGE_FACTOR);
    let healed = scale(reduced, OPPONENT_BLOCK_HEAL_FACTOR);
    state.heal(healed);
    state.lose_health(reduced);
    state.defending = false;
    format!(
        "{} blocks and reduces damage to {}, then heals {} health!",
        state.name, reduced, healed
    )
}

pub fn reset_turn(state: &mut CombatantState) {
    state.defending = false;
}

/// Shared fighter interface. The defaults are the plain rules; the opponent
/// overrides attack, special attack and damage intake.
pub trait Fighter {
    fn state(&self) -> &CombatantState;

    fn state_mut(&mut self) -> &mut CombatantState;

    fn attack<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Strike {
        resolve_attack(self.state_mut(), rng)
    }

    fn special_attack<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Strike {
        resolve_special_attack(self.state_mut(), rng)
    }

    fn defend(&mut self) -> String {
        resolve_defend(self.state_mut())
    }

    fn rest<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        resolve_rest(self.state_mut(), rng)
    }

    fn take_damage(&mut self, amount: u32) -> String {
        apply_damage(self.state_mut(), amount)
    }

    fn reset_turn(&mut self) {
        reset_turn(self.state_mut());
    }
}

/// The human-controlled fighter: plain rules, no decision state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenger {
    pub state: CombatantState,
}

impl Challenger {
    pub fn new(state: CombatantState) -> Self {
        Self { state }
    }
}

impl Fighter for Challenger {
    fn state(&self) -> &CombatantState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CombatantState {
        &mut self.state
    }
}
