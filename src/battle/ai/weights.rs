//! Action weight table and weighted sampling

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::battle::ai::personality::BaseWeights;
use crate::core::types::Action;

/// Relative weight per action; need not sum to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionWeights {
    values: [f64; 4],
}

fn slot(action: Action) -> usize {
    match action {
        Action::Attack => 0,
        Action::Defend => 1,
        Action::Rest => 2,
        Action::Special => 3,
    }
}

impl ActionWeights {
    pub fn new(attack: f64, defend: f64, rest: f64, special: f64) -> Self {
        Self {
            values: [attack, defend, rest, special],
        }
    }

    /// Start from a base profile; special is zeroed until the meter is full
    pub fn from_base(base: &BaseWeights, special_ready: bool) -> Self {
        let special = if special_ready { base.special } else { 0.0 };
        Self::new(base.attack, base.defend, base.rest, special)
    }

    pub fn get(&self, action: Action) -> f64 {
        self.values[slot(action)]
    }

    pub fn set(&mut self, action: Action, weight: f64) {
        self.values[slot(action)] = weight;
    }

    pub fn scale(&mut self, action: Action, factor: f64) {
        self.values[slot(action)] *= factor;
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// One uniform draw scaled by the total, then a scan of the cumulative table
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Action> {
        let total = self.total();
        if total.is_nan() || total <= 0.0 {
            return None;
        }

        let draw = rng.gen::<f64>() * total;
        let mut cumulative = 0.0;
        for action in Action::ALL {
            let weight = self.get(action);
            if weight <= 0.0 {
                continue;
            }
            cumulative += weight;
            if draw < cumulative {
                return Some(action);
            }
        }

        // Rounding can leave the draw just past the last bucket
        Action::ALL.into_iter().rev().find(|a| self.get(*a) > 0.0)
    }
}

impl fmt::Display for ActionWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attack={:.3} defend={:.3} rest={:.3} special={:.3}",
            self.values[0], self.values[1], self.values[2], self.values[3]
        )
    }
}

/// Why the weighting was bypassed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForcedReason {
    /// Too little stamina to do anything but rest
    Exhausted,
    /// Late phase, special ready, human low
    KillPriority,
    /// Several landed hits, human worn down, special ready
    Combo,
}

/// Result of weight shaping: either a short-circuit or weights to sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightShaping {
    Forced { action: Action, reason: ForcedReason },
    Weighted(ActionWeights),
}
