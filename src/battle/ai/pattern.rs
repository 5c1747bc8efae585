//! Human behavior tracking
//!
//! The opponent never sees the human's chosen action. It infers one from
//! how the human's resources moved since the previous decision and keeps a
//! short move history plus a running score per play style.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::combat::CombatantState;
use crate::core::types::{Action, Difficulty};

pub const MOVE_HISTORY_LEN: usize = 5;

/// A health drop above this reads as a special attack
const SPECIAL_DAMAGE_THRESHOLD: u32 = 35;

/// Behavioral styles the opponent scores the human on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayStyle {
    Aggressive,
    Defensive,
    Resourceful,
    PatternBased,
    SpecialFocused,
}

impl PlayStyle {
    /// Tie-break order for the dominant style
    pub const ALL: [PlayStyle; 5] = [
        PlayStyle::Aggressive,
        PlayStyle::Defensive,
        PlayStyle::Resourceful,
        PlayStyle::PatternBased,
        PlayStyle::SpecialFocused,
    ];
}

/// Per-style accumulators. Only ever increase within a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdaptiveScores {
    pub aggressive: u32,
    pub defensive: u32,
    pub resourceful: u32,
    pub pattern_based: u32,
    pub special_focused: u32,
}

impl AdaptiveScores {
    pub fn get(&self, style: PlayStyle) -> u32 {
        match style {
            PlayStyle::Aggressive => self.aggressive,
            PlayStyle::Defensive => self.defensive,
            PlayStyle::Resourceful => self.resourceful,
            PlayStyle::PatternBased => self.pattern_based,
            PlayStyle::SpecialFocused => self.special_focused,
        }
    }

    pub fn add(&mut self, style: PlayStyle, amount: u32) {
        let slot = match style {
            PlayStyle::Aggressive => &mut self.aggressive,
            PlayStyle::Defensive => &mut self.defensive,
            PlayStyle::Resourceful => &mut self.resourceful,
            PlayStyle::PatternBased => &mut self.pattern_based,
            PlayStyle::SpecialFocused => &mut self.special_focused,
        };
        *slot += amount;
    }

    /// Style with the highest score; ties go to the earlier style
    pub fn dominant(&self) -> (PlayStyle, u32) {
        let mut best = (PlayStyle::Aggressive, self.aggressive);
        for style in PlayStyle::ALL {
            let score = self.get(style);
            if score > best.1 {
                best = (style, score);
            }
        }
        best
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternTracker {
    enabled: bool,
    pub move_history: VecDeque<Action>,
    pub scores: AdaptiveScores,
    pub last_observed_health: u32,
    pub last_observed_stamina: u32,
    /// Every positive health drop observed on the human
    pub damage_history: Vec<u32>,
    pub successful_attacks: u32,
    pub human_defend_count: u32,
}

impl PatternTracker {
    /// Start tracking from the human's opening health and stamina
    pub fn new(difficulty: Difficulty, human_health: u32, human_stamina: u32) -> Self {
        Self {
            enabled: difficulty.is_adaptive(),
            move_history: VecDeque::with_capacity(MOVE_HISTORY_LEN),
            scores: AdaptiveScores::default(),
            last_observed_health: human_health,
            last_observed_stamina: human_stamina,
            damage_history: Vec::new(),
            successful_attacks: 0,
            human_defend_count: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Recorded moves, oldest first
    pub fn moves(&self) -> Vec<Action> {
        self.move_history.iter().copied().collect()
    }

    /// Observe the human once per opponent decision and return the inferred move
    pub fn observe(&mut self, human: &CombatantState) -> Option<Action> {
        if !self.enabled {
            return None;
        }

        let damage_taken = self.last_observed_health.saturating_sub(human.health);
        if damage_taken > 0 {
            self.damage_history.push(damage_taken);
            self.successful_attacks += 1;
        }

        let inferred = if damage_taken > SPECIAL_DAMAGE_THRESHOLD {
            self.scores.add(PlayStyle::SpecialFocused, 2);
            Some(Action::Special)
        } else if damage_taken > 0 {
            self.scores.add(PlayStyle::Aggressive, 1);
            Some(Action::Attack)
        } else if human.stamina > self.last_observed_stamina {
            self.scores.add(PlayStyle::Resourceful, 1);
            Some(Action::Rest)
        } else if human.defending {
            self.human_defend_count += 1;
            self.scores.add(PlayStyle::Defensive, 1);
            Some(Action::Defend)
        } else {
            None
        };

        self.last_observed_health = human.health;
        self.last_observed_stamina = human.stamina;

        if let Some(action) = inferred {
            self.record(action);
        }

        inferred
    }

    fn record(&mut self, action: Action) {
        if self.move_history.len() == MOVE_HISTORY_LEN {
            self.move_history.pop_front();
        }
        self.move_history.push_back(action);

        if self.move_history.len() >= MOVE_HISTORY_LEN && self.has_repeating_pattern() {
            tracing::trace!(history = ?self.move_history, "repeating pattern detected");
            self.scores.add(PlayStyle::PatternBased, 2);
        }
    }

    /// ABAB alternation or one move three times among the last four
    pub fn has_repeating_pattern(&self) -> bool {
        let len = self.move_history.len();
        if len < 4 {
            return false;
        }

        let recent: Vec<Action> = self.move_history.iter().skip(len - 4).copied().collect();
        if recent[0] == recent[2] && recent[1] == recent[3] {
            return true;
        }

        recent
            .iter()
            .any(|action| recent.iter().filter(|other| *other == action).count() >= 3)
    }

    /// Mean of the last `n` damage samples, if at least `n` exist
    pub fn recent_damage_mean(&self, n: usize) -> Option<f64> {
        if n == 0 || self.damage_history.len() < n {
            return None;
        }
        let tail = &self.damage_history[self.damage_history.len() - n..];
        Some(tail.iter().sum::<u32>() as f64 / n as f64)
    }
}
