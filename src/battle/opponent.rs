//! The computer-controlled fighter
//!
//! Composes the plain fighter rules with a difficulty profile and an
//! adaptive decision engine. Overrides the attack narrative, special
//! damage and damage intake; everything else uses the shared defaults.

use rand::Rng;

use crate::battle::ai::{AdaptiveCommander, CombatAI, DecisionContext, DifficultyProfile};
use crate::combat::constants::scale;
use crate::combat::{
    apply_damage_with_block_heal, resolve_attack, resolve_special_attack, CombatantState,
    Fighter, Strike,
};
use crate::core::types::{Action, Difficulty};

#[derive(Debug, Clone)]
pub struct Opponent {
    pub state: CombatantState,
    pub profile: DifficultyProfile,
    pub special_move_name: String,
    pub commander: AdaptiveCommander,
}

impl Opponent {
    pub fn new(
        name: impl Into<String>,
        special_move_name: impl Into<String>,
        profile: DifficultyProfile,
        human: &CombatantState,
    ) -> Self {
        let state = CombatantState::new(name, profile.max_health, profile.stamina);
        let commander = AdaptiveCommander::new(&profile, human.health, human.stamina);
        Self {
            state,
            profile,
            special_move_name: special_move_name.into(),
            commander,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.profile.difficulty
    }

    /// Pick this round's action after observing the human
    pub fn decide<R: Rng + ?Sized>(&mut self, human: &CombatantState, rng: &mut R) -> Action {
        let context = DecisionContext::new(&self.state, human);
        self.commander.choose_action(&context, rng)
    }
}

impl Fighter for Opponent {
    fn state(&self) -> &CombatantState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CombatantState {
        &mut self.state
    }

    fn attack<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Strike {
        let strike = resolve_attack(&mut self.state, rng);
        if strike.damage > 0 && rng.gen::<f64>() < self.profile.posterize_chance {
            return Strike {
                damage: strike.damage,
                message: format!("{} POSTERS YOU for {} damage!", self.state.name, strike.damage),
            };
        }
        strike
    }

    fn special_attack<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Strike {
        let strike = resolve_special_attack(&mut self.state, rng);
        if strike.damage == 0 {
            return strike;
        }

        let damage = scale(strike.damage, self.profile.special_multiplier);
        Strike {
            damage,
            message: format!(
                "{} unleashes his {} for {} MASSIVE damage!",
                self.state.name, self.special_move_name, damage
            ),
        }
    }

    fn take_damage(&mut self, amount: u32) -> String {
        apply_damage_with_block_heal(&mut self.state, amount)
    }
}
