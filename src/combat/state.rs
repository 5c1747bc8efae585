//! Combatant resource record
//!
//! Both fighters carry the same state. Every mutation clamps into range.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{MAX_SPECIAL, MAX_STAMINA};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantState {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub stamina: u32,
    pub max_stamina: u32,
    /// Special meter (0 to 100), a special attack needs it full
    pub special: u32,
    /// Set for the round in which the fighter defended
    pub defending: bool,
}

impl CombatantState {
    pub fn new(name: impl Into<String>, health: u32, stamina: u32) -> Self {
        Self {
            name: name.into(),
            health,
            max_health: health,
            stamina: stamina.min(MAX_STAMINA),
            max_stamina: MAX_STAMINA,
            special: 0,
            defending: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn special_ready(&self) -> bool {
        self.special >= MAX_SPECIAL
    }

    /// Current health as a fraction of max health
    pub fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f64 / self.max_health as f64
    }

    /// True when health is strictly below `fraction` of max health
    pub fn health_below(&self, fraction: f64) -> bool {
        (self.health as f64) < self.max_health as f64 * fraction
    }

    pub fn spend_stamina(&mut self, amount: u32) {
        self.stamina = self.stamina.saturating_sub(amount);
    }

    pub fn recover_stamina(&mut self, amount: u32) {
        self.stamina = (self.stamina + amount).min(self.max_stamina);
    }

    pub fn charge_special(&mut self, amount: u32) {
        self.special = (self.special + amount).min(MAX_SPECIAL);
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn lose_health(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }
}
