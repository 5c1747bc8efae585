//! Round execution
//!
//! One round is one simultaneous pair of actions. Order within a round:
//! 1. Opponent decides (observing the human as the last round left it)
//! 2. Defends resolve for both sides
//! 3. Attacks, specials and rests resolve, producing outgoing damage
//! 4. Damage lands: human's on the opponent, then the opponent's on the human
//! 5. Defending flags clear and the battle status is re-evaluated

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::battle::ai::{CombatAI, DifficultyProfile};
use crate::battle::opponent::Opponent;
use crate::combat::{unavailable_message, validate_action, Challenger, CombatantState, Fighter};
use crate::core::config::ArenaConfig;
use crate::core::error::Result;
use crate::core::types::{Action, Difficulty, Round, Speaker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BattleStatus {
    #[default]
    InProgress,
    Won,
    Lost,
    Tied,
}

impl BattleStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, BattleStatus::InProgress)
    }

    /// Status from the human's point of view after damage has landed
    pub fn evaluate(human: &CombatantState, opponent: &CombatantState) -> Self {
        match (human.is_alive(), opponent.is_alive()) {
            (false, false) => BattleStatus::Tied,
            (true, false) => BattleStatus::Won,
            (false, true) => BattleStatus::Lost,
            (true, true) => BattleStatus::InProgress,
        }
    }
}

/// One line of battle narrative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeLine {
    pub round: Round,
    pub speaker: Speaker,
    pub text: String,
}

/// Final numbers handed to whatever computes rewards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub difficulty: Difficulty,
    pub rounds: Round,
    pub final_human_health: u32,
    pub final_opponent_health: u32,
    pub won: bool,
    pub status: BattleStatus,
}

/// Everything a battle carries between rounds
#[derive(Debug, Clone)]
pub struct BattleContext {
    pub human: Challenger,
    pub opponent: Opponent,
    pub rounds_played: Round,
    pub status: BattleStatus,
    pub battle_log: Vec<NarrativeLine>,
    pub seed: u64,
    rng: StdRng,
}

impl BattleContext {
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// The final report, once the battle has ended
    pub fn report(&self) -> Option<BattleReport> {
        if !self.is_finished() {
            return None;
        }

        Some(BattleReport {
            difficulty: self.opponent.difficulty(),
            rounds: self.rounds_played,
            final_human_health: self.human.state.health,
            final_opponent_health: self.opponent.state.health,
            won: self.status == BattleStatus::Won,
            status: self.status,
        })
    }

    /// Borrow the battle's random source, e.g. to drive an autopilot
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// Outcome of one `submit_round` call
#[derive(Debug, Clone)]
pub struct RoundResult {
    pub context: BattleContext,
    pub lines: Vec<NarrativeLine>,
    pub human_action: Action,
    /// None when the round was rejected before the opponent acted
    pub opponent_action: Option<Action>,
    /// Outgoing damage from the human before blocking
    pub damage_dealt: u32,
    /// Outgoing damage from the opponent before blocking
    pub damage_received: u32,
    /// True when nothing changed: precondition unmet or battle over
    pub rejected: bool,
    pub report: Option<BattleReport>,
}

impl RoundResult {
    pub fn status(&self) -> BattleStatus {
        self.context.status
    }

    fn rejected(context: BattleContext, human_action: Action, text: String) -> Self {
        let line = NarrativeLine {
            round: context.rounds_played + 1,
            speaker: Speaker::Human,
            text,
        };
        Self {
            context,
            lines: vec![line],
            human_action,
            opponent_action: None,
            damage_dealt: 0,
            damage_received: 0,
            rejected: true,
            report: None,
        }
    }
}

/// Start a battle against a built-in difficulty profile
pub fn create_battle(difficulty: Difficulty, seed: u64) -> BattleContext {
    let config = ArenaConfig::default();
    let profile = DifficultyProfile::builtin(difficulty);
    new_context(&config, profile, seed)
}

/// Start a battle from a custom config and profile
pub fn create_battle_with(
    config: &ArenaConfig,
    profile: DifficultyProfile,
    seed: u64,
) -> Result<BattleContext> {
    config.validate()?;
    profile.validate()?;
    Ok(new_context(config, profile, seed))
}

fn new_context(config: &ArenaConfig, profile: DifficultyProfile, seed: u64) -> BattleContext {
    let human = Challenger::new(CombatantState::new(
        config.human_name.clone(),
        config.human_health,
        config.human_stamina,
    ));
    let opponent = Opponent::new(
        config.opponent_name.clone(),
        config.special_move_name.clone(),
        profile,
        &human.state,
    );

    tracing::debug!(
        difficulty = %opponent.difficulty(),
        ai = opponent.commander.label(),
        seed,
        "battle created"
    );

    BattleContext {
        human,
        opponent,
        rounds_played: 0,
        status: BattleStatus::InProgress,
        battle_log: Vec::new(),
        seed,
        rng: StdRng::seed_from_u64(seed),
    }
}

/// Resolve a non-defend action; defends were resolved earlier in the round
fn resolve_offense<F: Fighter, R: Rng + ?Sized>(
    fighter: &mut F,
    action: Action,
    rng: &mut R,
) -> (u32, Option<String>) {
    match action {
        Action::Attack => {
            let strike = fighter.attack(rng);
            (strike.damage, Some(strike.message))
        }
        Action::Special => {
            let strike = fighter.special_attack(rng);
            (strike.damage, Some(strike.message))
        }
        Action::Rest => (0, Some(fighter.rest(rng))),
        Action::Defend => (0, None),
    }
}

fn end_of_battle_text(status: BattleStatus, human: &str, opponent: &str) -> String {
    match status {
        BattleStatus::Won => format!("{} is down! {} wins the battle!", opponent, human),
        BattleStatus::Lost => format!("{} is down! {} wins the battle!", human, opponent),
        BattleStatus::Tied => "Both fighters go down together. It's a tie!".to_string(),
        BattleStatus::InProgress => String::new(),
    }
}

/// Play one round with the human's chosen action
pub fn submit_round(mut context: BattleContext, human_action: Action) -> RoundResult {
    if context.is_finished() {
        return RoundResult::rejected(context, human_action, "The battle is already over.".into());
    }

    if let Err(err) = validate_action(&context.human.state, human_action) {
        tracing::warn!(%err, "human action rejected");
        let text = unavailable_message(&context.human.state, human_action);
        return RoundResult::rejected(context, human_action, text);
    }

    let round = context.rounds_played + 1;
    let mut lines = Vec::new();
    let mut say = |speaker: Speaker, text: String| {
        lines.push(NarrativeLine {
            round,
            speaker,
            text,
        })
    };

    say(
        Speaker::System,
        format!("Round {} begins - both fighters prepare their moves!", round),
    );

    let BattleContext {
        human,
        opponent,
        rng,
        ..
    } = &mut context;

    let opponent_action = opponent.decide(&human.state, rng);

    if human_action == Action::Defend {
        say(Speaker::Human, human.defend());
    }
    if opponent_action == Action::Defend {
        say(Speaker::Opponent, opponent.defend());
    }

    let (damage_dealt, text) = resolve_offense(human, human_action, rng);
    if let Some(text) = text {
        say(Speaker::Human, text);
    }
    let (damage_received, text) = resolve_offense(opponent, opponent_action, rng);
    if let Some(text) = text {
        say(Speaker::Opponent, text);
    }

    if damage_dealt > 0 {
        say(Speaker::Opponent, opponent.take_damage(damage_dealt));
    }
    if damage_received > 0 {
        say(Speaker::Human, human.take_damage(damage_received));
    }

    human.reset_turn();
    opponent.reset_turn();

    let status = BattleStatus::evaluate(&human.state, &opponent.state);
    if status.is_finished() {
        say(
            Speaker::System,
            end_of_battle_text(status, &human.state.name, &opponent.state.name),
        );
    }

    context.rounds_played = round;
    context.status = status;
    context.battle_log.extend(lines.iter().cloned());

    let report = context.report();
    if let Some(report) = &report {
        tracing::info!(
            status = ?report.status,
            rounds = report.rounds,
            human_health = report.final_human_health,
            opponent_health = report.final_opponent_health,
            "battle finished"
        );
    }

    RoundResult {
        context,
        lines,
        human_action,
        opponent_action: Some(opponent_action),
        damage_dealt,
        damage_received,
        rejected: false,
        report,
    }
}
