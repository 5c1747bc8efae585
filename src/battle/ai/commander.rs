//! Adaptive Commander - the opponent's decision engine
//!
//! Each decision starts from the difficulty's base weights and runs them
//! through a fixed sequence of multipliers before one weighted draw:
//! emergency stamina, battle phase, adaptive scores, prediction counters,
//! Hard-only refinements, anti-repetition, then a reaction to a defending
//! human. Three short-circuits (exhaustion, kill priority, combo) skip the
//! draw entirely. After the draw, an unneeded rest is re-rolled and a
//! nearly beaten opponent may switch to its special.

use rand::Rng;

use crate::battle::ai::pattern::PatternTracker;
use crate::battle::ai::personality::{BaseWeights, DifficultyProfile};
use crate::battle::ai::phase_plans::BattlePhase;
use crate::battle::ai::prediction::PredictionEngine;
use crate::battle::ai::weights::{ActionWeights, ForcedReason, WeightShaping};
use crate::battle::ai::{CombatAI, DecisionContext};
use crate::combat::constants::ATTACK_STAMINA_COST;
use crate::combat::CombatantState;
use crate::core::types::{Action, Difficulty};

/// At or below this stamina, resting gets more attractive
const LOW_STAMINA: u32 = 30;
/// Above the low-stamina line, rest keeps this share of its weight
const HIGH_STAMINA_REST_FACTOR: f64 = 0.2;
/// Adaptive score needed before a style changes the weights
const STYLE_THRESHOLD: u32 = 5;
/// Weight rest is pinned to when an unneeded rest is re-rolled
const REROLL_REST_WEIGHT: f64 = 0.1;
const DESPERATION_HEALTH: f64 = 0.2;
const DESPERATION_CHANCE: f64 = 0.7;

/// Opponent decision engine implementing `CombatAI`
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveCommander {
    difficulty: Difficulty,
    base: BaseWeights,
    predictor: PredictionEngine,
    pub tracker: PatternTracker,
    pub phase: BattlePhase,
    /// Decisions made so far
    pub turn_count: u32,
    pub consecutive_attacks: u32,
    pub consecutive_defends: u32,
}

impl AdaptiveCommander {
    /// Create a commander; the tracker starts from the human's opening values
    pub fn new(profile: &DifficultyProfile, human_health: u32, human_stamina: u32) -> Self {
        Self {
            difficulty: profile.difficulty,
            base: profile.weights,
            predictor: PredictionEngine::new(profile.difficulty),
            tracker: PatternTracker::new(profile.difficulty, human_health, human_stamina),
            phase: BattlePhase::Early,
            turn_count: 0,
            consecutive_attacks: 0,
            consecutive_defends: 0,
        }
    }

    /// Decide the opponent's action for this round
    pub fn decide<R: Rng + ?Sized>(
        &mut self,
        own: &CombatantState,
        human: &CombatantState,
        rng: &mut R,
    ) -> Action {
        self.turn_count += 1;
        self.phase = BattlePhase::derive(own, self.turn_count);
        if let Some(inferred) = self.tracker.observe(human) {
            tracing::trace!(turn = self.turn_count, %inferred, "inferred human move");
        }

        let action = match self.shape_weights(own, human, rng) {
            WeightShaping::Forced { action, reason } => {
                tracing::debug!(turn = self.turn_count, phase = ?self.phase, ?reason, %action, "forced action");
                action
            }
            WeightShaping::Weighted(weights) => {
                let action = self.sample_with_corrections(weights, own, human, rng);
                tracing::debug!(turn = self.turn_count, phase = ?self.phase, %weights, %action, "weighted action");
                action
            }
        };

        self.record_choice(action);
        action
    }

    /// Shape the weights for the current state, or short-circuit
    pub fn shape_weights<R: Rng + ?Sized>(
        &self,
        own: &CombatantState,
        human: &CombatantState,
        rng: &mut R,
    ) -> WeightShaping {
        let mut weights = ActionWeights::from_base(&self.base, own.special_ready());

        // Emergency stamina
        if own.stamina <= LOW_STAMINA {
            if own.stamina < ATTACK_STAMINA_COST {
                return WeightShaping::Forced {
                    action: Action::Rest,
                    reason: ForcedReason::Exhausted,
                };
            }
            let urgency = (LOW_STAMINA - own.stamina) as f64 / LOW_STAMINA as f64;
            weights.scale(Action::Rest, 1.0 + 2.0 * urgency);
        } else {
            weights.scale(Action::Rest, HIGH_STAMINA_REST_FACTOR);
        }

        // Battle phase
        match self.phase {
            BattlePhase::Early => {
                weights.scale(Action::Defend, 1.3);
                if self.turn_count < 3 {
                    weights.scale(Action::Attack, 0.9);
                }
            }
            BattlePhase::Mid => {
                weights.scale(Action::Attack, 1.1);
                if own.special >= 90 {
                    weights.scale(Action::Special, 1.5);
                }
            }
            BattlePhase::Late => {
                weights.scale(Action::Attack, 1.3);
                weights.scale(Action::Defend, 0.8);
                if own.special_ready() && human.health_below(0.4) {
                    return WeightShaping::Forced {
                        action: Action::Special,
                        reason: ForcedReason::KillPriority,
                    };
                }
            }
        }

        if self.difficulty.is_adaptive() {
            self.apply_adaptive_scores(&mut weights, rng);
        }

        if let Some(predicted) = self.predictor.predict(&self.tracker, rng) {
            tracing::trace!(turn = self.turn_count, %predicted, "predicted human move");
            apply_prediction_counter(&mut weights, predicted);
        }

        if self.difficulty == Difficulty::Hard {
            if let Some(forced) = self.apply_hard_refinements(&mut weights, own, human) {
                return forced;
            }
        }

        // Anti-repetition
        if self.consecutive_attacks >= 2 {
            weights.scale(Action::Attack, 0.5);
        }
        if self.consecutive_defends >= 2 {
            weights.scale(Action::Defend, 0.3);
        }

        if human.defending {
            weights.scale(Action::Attack, 0.4);
            weights.scale(Action::Rest, 1.5);
        }

        WeightShaping::Weighted(weights)
    }

    fn apply_adaptive_scores<R: Rng + ?Sized>(&self, weights: &mut ActionWeights, rng: &mut R) {
        let scores = &self.tracker.scores;

        if scores.aggressive > STYLE_THRESHOLD {
            weights.scale(Action::Defend, 1.4);
        }
        if scores.defensive > STYLE_THRESHOLD {
            weights.scale(Action::Attack, 1.3);
        }
        if scores.resourceful > STYLE_THRESHOLD {
            weights.scale(Action::Attack, 1.2);
            weights.scale(Action::Rest, 0.8);
        }
        if scores.pattern_based > STYLE_THRESHOLD {
            // Jitter every weight so a predictable human can't farm a response
            let magnitude = 0.3 + rng.gen::<f64>() * 0.4;
            for action in Action::ALL {
                let jitter = 1.0 + (rng.gen::<f64>() - 0.5) * magnitude;
                weights.scale(action, jitter);
            }
        }
    }

    fn apply_hard_refinements(
        &self,
        weights: &mut ActionWeights,
        own: &CombatantState,
        human: &CombatantState,
    ) -> Option<WeightShaping> {
        if human.special >= 90 {
            weights.scale(Action::Defend, 2.0);
        }

        if let Some(mean) = self.tracker.recent_damage_mean(3) {
            if mean > 25.0 {
                weights.scale(Action::Defend, 1.7);
            }
        }

        if human.health_below(0.25) {
            weights.scale(Action::Attack, 2.0);
            if own.special_ready() {
                weights.scale(Action::Special, 3.0);
            }
        }

        if human.stamina < 30 {
            weights.scale(Action::Attack, 1.8);
        }

        // Human turtles in more than 40% of turns: wait it out
        if self.tracker.human_defend_count as f64 > self.turn_count as f64 * 0.4 {
            weights.scale(Action::Rest, 1.5);
            weights.scale(Action::Attack, 0.6);
        }

        if (80..100).contains(&own.special) {
            weights.scale(Action::Defend, 1.4);
        }

        if self.tracker.successful_attacks >= 3 && human.health_below(0.6) && own.special_ready() {
            return Some(WeightShaping::Forced {
                action: Action::Special,
                reason: ForcedReason::Combo,
            });
        }

        None
    }

    fn sample_with_corrections<R: Rng + ?Sized>(
        &self,
        mut weights: ActionWeights,
        own: &CombatantState,
        human: &CombatantState,
        rng: &mut R,
    ) -> Action {
        let mut action = weights.sample(rng).unwrap_or(Action::Rest);

        // Resting is only worth it when tired, unless waiting out a blocker
        let waiting_out_block = human.defending && self.consecutive_attacks >= 2;
        if action == Action::Rest && own.stamina > LOW_STAMINA && !waiting_out_block {
            weights.set(Action::Rest, REROLL_REST_WEIGHT);
            action = weights.sample(rng).unwrap_or(Action::Rest);
        }

        if own.special_ready()
            && own.health_below(DESPERATION_HEALTH)
            && action != Action::Special
            && rng.gen::<f64>() < DESPERATION_CHANCE
        {
            action = Action::Special;
        }

        action
    }

    fn record_choice(&mut self, action: Action) {
        match action {
            Action::Attack => {
                self.consecutive_attacks += 1;
                self.consecutive_defends = 0;
            }
            Action::Defend => {
                self.consecutive_defends += 1;
                self.consecutive_attacks = 0;
            }
            Action::Rest | Action::Special => {
                self.consecutive_attacks = 0;
                self.consecutive_defends = 0;
            }
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn base_weights(&self) -> &BaseWeights {
        &self.base
    }
}

/// Counter the predicted human move
fn apply_prediction_counter(weights: &mut ActionWeights, predicted: Action) {
    match predicted {
        Action::Attack => weights.scale(Action::Defend, 2.0),
        Action::Defend => {
            weights.scale(Action::Rest, 1.5);
            weights.scale(Action::Attack, 0.7);
        }
        Action::Special => weights.scale(Action::Defend, 3.0),
        Action::Rest => weights.scale(Action::Attack, 1.8),
    }
}

impl CombatAI for AdaptiveCommander {
    fn choose_action<R: Rng + ?Sized>(&mut self, context: &DecisionContext, rng: &mut R) -> Action {
        self.decide(context.own, context.opponent, rng)
    }

    fn label(&self) -> &str {
        self.difficulty.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    fn commander(difficulty: Difficulty) -> AdaptiveCommander {
        AdaptiveCommander::new(&DifficultyProfile::builtin(difficulty), 140, 100)
    }

    fn opponent(difficulty: Difficulty) -> CombatantState {
        let profile = DifficultyProfile::builtin(difficulty);
        CombatantState::new("LeBron James", profile.max_health, 100)
    }

    fn human() -> CombatantState {
        CombatantState::new("You", 140, 100)
    }

    fn weights_of(shaping: WeightShaping) -> ActionWeights {
        match shaping {
            WeightShaping::Weighted(weights) => weights,
            other => panic!("Expected weights, got {:?}", other),
        }
    }

    #[test]
    fn test_exhausted_opponent_always_rests() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            for seed in 0..25 {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut ai = commander(difficulty);
                ai.tracker.scores.aggressive = 50;
                ai.tracker.scores.pattern_based = 50;
                let mut own = opponent(difficulty);
                own.stamina = 14;
                own.special = 100;
                own.health = 1;

                assert_eq!(ai.decide(&own, &human(), &mut rng), Action::Rest);
            }
        }
    }

    #[test]
    fn test_high_stamina_cuts_rest() {
        let ai = commander(Difficulty::Easy);
        let mut rng = StdRng::seed_from_u64(1);
        let weights = weights_of(ai.shape_weights(&opponent(Difficulty::Easy), &human(), &mut rng));
        assert!((weights.get(Action::Rest) - 0.25 * 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_low_stamina_boosts_rest() {
        let ai = commander(Difficulty::Easy);
        let mut own = opponent(Difficulty::Easy);
        own.stamina = 15;
        let mut rng = StdRng::seed_from_u64(1);
        let weights = weights_of(ai.shape_weights(&own, &human(), &mut rng));
        // urgency 0.5 => x2
        assert!((weights.get(Action::Rest) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_early_phase_weights() {
        let mut ai = commander(Difficulty::Easy);
        ai.turn_count = 1;
        let mut rng = StdRng::seed_from_u64(1);
        let weights = weights_of(ai.shape_weights(&opponent(Difficulty::Easy), &human(), &mut rng));
        assert!((weights.get(Action::Defend) - 0.3 * 1.3).abs() < 1e-9);
        assert!((weights.get(Action::Attack) - 0.4 * 0.9).abs() < 1e-9);
        assert_eq!(weights.get(Action::Special), 0.0);
    }

    #[test]
    fn test_kill_priority_in_late_phase() {
        let mut ai = commander(Difficulty::Easy);
        ai.phase = BattlePhase::Late;
        let mut own = opponent(Difficulty::Easy);
        own.special = 100;
        let mut target = human();
        target.health = 50;
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            ai.shape_weights(&own, &target, &mut rng),
            WeightShaping::Forced {
                action: Action::Special,
                reason: ForcedReason::KillPriority
            }
        );
    }

    #[test]
    fn test_hard_aggressive_human_raises_defend() {
        let mut ai = commander(Difficulty::Hard);
        ai.tracker.scores.aggressive = 6;
        ai.turn_count = 6;
        ai.phase = BattlePhase::Mid;
        let mut own = opponent(Difficulty::Hard);
        own.stamina = 60;
        let mut rng = StdRng::seed_from_u64(9);

        let weights = weights_of(ai.shape_weights(&own, &human(), &mut rng));
        assert!(weights.get(Action::Defend) > ai.base_weights().defend);
    }

    #[test]
    fn test_combo_short_circuit() {
        let mut ai = commander(Difficulty::Hard);
        ai.phase = BattlePhase::Mid;
        ai.turn_count = 6;
        ai.tracker.successful_attacks = 3;
        let mut own = opponent(Difficulty::Hard);
        own.special = 100;
        let mut target = human();
        target.health = 80;
        let mut rng = StdRng::seed_from_u64(2);

        assert_eq!(
            ai.shape_weights(&own, &target, &mut rng),
            WeightShaping::Forced {
                action: Action::Special,
                reason: ForcedReason::Combo
            }
        );
    }

    #[test]
    fn test_anti_repetition_and_defending_human() {
        let mut ai = commander(Difficulty::Easy);
        ai.phase = BattlePhase::Mid;
        ai.turn_count = 6;
        ai.consecutive_attacks = 2;
        let mut target = human();
        target.defending = true;
        let mut rng = StdRng::seed_from_u64(4);

        let weights = weights_of(ai.shape_weights(&opponent(Difficulty::Easy), &target, &mut rng));
        assert!((weights.get(Action::Attack) - 0.4 * 1.1 * 0.5 * 0.4).abs() < 1e-9);
        assert!((weights.get(Action::Rest) - 0.25 * 0.2 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_counters_track_choices() {
        let mut ai = commander(Difficulty::Medium);
        ai.record_choice(Action::Attack);
        ai.record_choice(Action::Attack);
        assert_eq!(ai.consecutive_attacks, 2);
        ai.record_choice(Action::Defend);
        assert_eq!(ai.consecutive_attacks, 0);
        assert_eq!(ai.consecutive_defends, 1);
        ai.record_choice(Action::Rest);
        assert_eq!(ai.consecutive_defends, 0);
    }

    #[test]
    fn test_decide_advances_turn_and_phase() {
        let mut ai = commander(Difficulty::Medium);
        let mut rng = StdRng::seed_from_u64(5);
        let own = opponent(Difficulty::Medium);
        for _ in 0..5 {
            ai.decide(&own, &human(), &mut rng);
        }
        assert_eq!(ai.turn_count, 5);
        assert_eq!(ai.phase, BattlePhase::Mid);
    }

    #[test]
    fn test_desperate_opponent_prefers_special() {
        let mut specials = 0;
        for seed in 0..200 {
            let mut ai = commander(Difficulty::Easy);
            let mut own = opponent(Difficulty::Easy);
            own.health = 10;
            own.special = 100;
            let mut rng = StdRng::seed_from_u64(seed);
            if ai.decide(&own, &human(), &mut rng) == Action::Special {
                specials += 1;
            }
        }
        // At least the 70% desperation share, plus whatever the draw picks
        assert!(specials > 120, "got {}", specials);
    }

    fn shaped(ai: &AdaptiveCommander, own: &CombatantState, human: &CombatantState) -> ActionWeights {
        weights_of(ai.shape_weights(own, human, &mut StdRng::seed_from_u64(0)))
    }

    fn assert_ratio(base: &ActionWeights, shaped: &ActionWeights, action: Action, expected: f64) {
        let ratio = shaped.get(action) / base.get(action);
        assert!(
            (ratio - expected).abs() < 1e-9,
            "{} scaled by {}, expected {}",
            action,
            ratio,
            expected
        );
    }

    #[test]
    fn test_hard_braces_for_human_special() {
        let ai = commander(Difficulty::Hard);
        let own = opponent(Difficulty::Hard);
        let base = shaped(&ai, &own, &human());

        let mut target = human();
        target.special = 90;
        let read = shaped(&ai, &own, &target);

        assert_ratio(&base, &read, Action::Defend, 2.0);
        assert_ratio(&base, &read, Action::Attack, 1.0);
    }

    #[test]
    fn test_hard_defends_after_heavy_hits() {
        let ai = commander(Difficulty::Hard);
        let own = opponent(Difficulty::Hard);
        let base = shaped(&ai, &own, &human());

        let mut hurt = commander(Difficulty::Hard);
        hurt.tracker.damage_history = vec![30, 30, 30];
        assert_ratio(&base, &shaped(&hurt, &own, &human()), Action::Defend, 1.7);

        // Mean of the last three is 25, not above it
        hurt.tracker.damage_history = vec![90, 20, 25, 30];
        assert_ratio(&base, &shaped(&hurt, &own, &human()), Action::Defend, 1.0);
    }

    #[test]
    fn test_hard_presses_a_beaten_human() {
        let ai = commander(Difficulty::Hard);
        let mut own = opponent(Difficulty::Hard);
        own.special = 100;
        let base = shaped(&ai, &own, &human());

        let mut target = human();
        target.health = 34;
        let read = shaped(&ai, &own, &target);

        assert_ratio(&base, &read, Action::Attack, 2.0);
        assert_ratio(&base, &read, Action::Special, 3.0);
        assert_ratio(&base, &read, Action::Defend, 1.0);
    }

    #[test]
    fn test_hard_punishes_tired_human() {
        let ai = commander(Difficulty::Hard);
        let own = opponent(Difficulty::Hard);
        let base = shaped(&ai, &own, &human());

        let mut target = human();
        target.stamina = 29;
        assert_ratio(&base, &shaped(&ai, &own, &target), Action::Attack, 1.8);

        target.stamina = 30;
        assert_ratio(&base, &shaped(&ai, &own, &target), Action::Attack, 1.0);
    }

    #[test]
    fn test_hard_waits_out_a_turtle() {
        let mut ai = commander(Difficulty::Hard);
        ai.turn_count = 6;
        let own = opponent(Difficulty::Hard);
        let base = shaped(&ai, &own, &human());

        ai.tracker.human_defend_count = 3;
        let read = shaped(&ai, &own, &human());
        assert_ratio(&base, &read, Action::Rest, 1.5);
        assert_ratio(&base, &read, Action::Attack, 0.6);

        // 2 of 6 turns is under 40%
        ai.tracker.human_defend_count = 2;
        assert_ratio(&base, &shaped(&ai, &own, &human()), Action::Attack, 1.0);
    }

    #[test]
    fn test_hard_guards_a_charging_meter() {
        let ai = commander(Difficulty::Hard);
        let own = opponent(Difficulty::Hard);
        let base = shaped(&ai, &own, &human());

        let mut charging = opponent(Difficulty::Hard);
        charging.special = 85;
        assert_ratio(&base, &shaped(&ai, &charging, &human()), Action::Defend, 1.4);
    }

    #[test]
    fn test_refinements_are_hard_only() {
        let ai = commander(Difficulty::Medium);
        let own = opponent(Difficulty::Medium);
        let base = shaped(&ai, &own, &human());

        let mut target = human();
        target.special = 95;
        target.stamina = 10;
        let read = shaped(&ai, &own, &target);

        assert_ratio(&base, &read, Action::Defend, 1.0);
        assert_ratio(&base, &read, Action::Attack, 1.0);
    }

    #[test]
    fn test_adaptive_style_multipliers() {
        let own = opponent(Difficulty::Medium);
        let base = shaped(&commander(Difficulty::Medium), &own, &human());

        let mut ai = commander(Difficulty::Medium);
        ai.tracker.scores.defensive = 6;
        let read = shaped(&ai, &own, &human());
        assert_ratio(&base, &read, Action::Attack, 1.3);
        assert_ratio(&base, &read, Action::Rest, 1.0);

        let mut ai = commander(Difficulty::Medium);
        ai.tracker.scores.resourceful = 6;
        let read = shaped(&ai, &own, &human());
        assert_ratio(&base, &read, Action::Attack, 1.2);
        assert_ratio(&base, &read, Action::Rest, 0.8);

        // Threshold is strictly above 5
        let mut ai = commander(Difficulty::Medium);
        ai.tracker.scores.defensive = 5;
        assert_ratio(&base, &shaped(&ai, &own, &human()), Action::Attack, 1.0);
    }

    #[test]
    fn test_pattern_based_jitter_stays_bounded() {
        let own = opponent(Difficulty::Medium);
        let base = shaped(&commander(Difficulty::Medium), &own, &human());

        let mut ai = commander(Difficulty::Medium);
        ai.tracker.scores.pattern_based = 6;

        let mut changed = false;
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let read = weights_of(ai.shape_weights(&own, &human(), &mut rng));
            for action in [Action::Attack, Action::Defend, Action::Rest] {
                let ratio = read.get(action) / base.get(action);
                assert!((0.65..=1.35).contains(&ratio), "{} jittered by {}", action, ratio);
                changed |= (ratio - 1.0).abs() > 1e-9;
            }
        }
        assert!(changed);
    }

    #[test]
    fn test_prediction_counters() {
        let flat = ActionWeights::new(1.0, 1.0, 1.0, 1.0);

        let mut weights = flat;
        apply_prediction_counter(&mut weights, Action::Attack);
        assert_eq!(weights, ActionWeights::new(1.0, 2.0, 1.0, 1.0));

        let mut weights = flat;
        apply_prediction_counter(&mut weights, Action::Defend);
        assert_eq!(weights, ActionWeights::new(0.7, 1.0, 1.5, 1.0));

        let mut weights = flat;
        apply_prediction_counter(&mut weights, Action::Special);
        assert_eq!(weights, ActionWeights::new(1.0, 3.0, 1.0, 1.0));

        let mut weights = flat;
        apply_prediction_counter(&mut weights, Action::Rest);
        assert_eq!(weights, ActionWeights::new(1.8, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_predicted_attack_raises_defend() {
        let own = opponent(Difficulty::Medium);
        let base = shaped(&commander(Difficulty::Medium), &own, &human());

        let mut ai = commander(Difficulty::Medium);
        ai.tracker.move_history = VecDeque::from(vec![Action::Defend, Action::Defend, Action::Rest]);
        let read = shaped(&ai, &own, &human());

        assert_ratio(&base, &read, Action::Defend, 2.0);
        assert_ratio(&base, &read, Action::Attack, 1.0);
    }

    #[test]
    fn test_mid_phase_weights() {
        let mut ai = commander(Difficulty::Easy);
        ai.phase = BattlePhase::Mid;
        ai.turn_count = 6;
        let mut own = opponent(Difficulty::Easy);
        own.special = 100;

        let weights = shaped(&ai, &own, &human());
        assert!((weights.get(Action::Attack) - 0.4 * 1.1).abs() < 1e-9);
        assert!((weights.get(Action::Defend) - 0.3).abs() < 1e-9);
        assert!((weights.get(Action::Special) - 0.05 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_late_phase_weights() {
        let mut ai = commander(Difficulty::Easy);
        ai.phase = BattlePhase::Late;
        ai.turn_count = 12;

        let weights = shaped(&ai, &opponent(Difficulty::Easy), &human());
        assert!((weights.get(Action::Attack) - 0.4 * 1.3).abs() < 1e-9);
        assert!((weights.get(Action::Defend) - 0.3 * 0.8).abs() < 1e-9);
        assert_eq!(weights.get(Action::Special), 0.0);
    }

    fn count_rests(ai: &AdaptiveCommander, own: &CombatantState, target: &CombatantState) -> usize {
        let weights = ActionWeights::new(1.0, 0.0, 9.0, 0.0);
        let mut rng = StdRng::seed_from_u64(17);
        (0..2000)
            .filter(|_| ai.sample_with_corrections(weights, own, target, &mut rng) == Action::Rest)
            .count()
    }

    #[test]
    fn test_unneeded_rest_is_rerolled() {
        let ai = commander(Difficulty::Easy);
        let own = opponent(Difficulty::Easy);

        // 0.9 first draw, then 0.1 / 1.1 on the re-roll: about 8%
        let rests = count_rests(&ai, &own, &human());
        assert!(rests > 80 && rests < 300, "got {}", rests);
    }

    #[test]
    fn test_tired_rest_is_kept() {
        let ai = commander(Difficulty::Easy);
        let mut own = opponent(Difficulty::Easy);
        own.stamina = 30;

        let rests = count_rests(&ai, &own, &human());
        assert!(rests > 1650, "got {}", rests);
    }

    #[test]
    fn test_rest_kept_while_waiting_out_a_block() {
        let mut ai = commander(Difficulty::Easy);
        ai.consecutive_attacks = 2;
        let own = opponent(Difficulty::Easy);
        let mut target = human();
        target.defending = true;

        let rests = count_rests(&ai, &own, &target);
        assert!(rests > 1650, "got {}", rests);

        // Blocking alone is not enough
        ai.consecutive_attacks = 1;
        let rests = count_rests(&ai, &own, &target);
        assert!(rests < 300, "got {}", rests);
    }

    #[test]
    fn test_label_names_difficulty() {
        assert_eq!(commander(Difficulty::Medium).label(), "medium");
    }
}
