//! Next-move prediction from the tracked move history
//!
//! Rules are literal ordered tables evaluated top-down; the first match wins.

use rand::Rng;

use crate::battle::ai::pattern::{PatternTracker, PlayStyle};
use crate::core::types::{Action, Difficulty};

use Action::{Attack as A, Defend as D, Rest as R, Special as S};

/// Moves needed before any prediction is attempted
const MIN_HISTORY: usize = 3;
/// Hard-only rules need a full history
const HARD_MIN_HISTORY: usize = 5;
/// Window the short rules look at
const SHORT_WINDOW: usize = 3;
/// Dominant-style rule needs the leading score above this
const DOMINANT_STYLE_THRESHOLD: u32 = 5;

/// What a rule matches against the tail of the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixPattern {
    /// History ends with exactly these moves
    EndsWith(&'static [Action]),
    /// Move appears in the last three but is not the last one
    RecentNotLast(Action),
    /// Move appears at least n times in the last three
    RecentCount(Action, usize),
}

impl SuffixPattern {
    pub fn matches(&self, history: &[Action]) -> bool {
        let window = &history[history.len().saturating_sub(SHORT_WINDOW)..];
        match self {
            SuffixPattern::EndsWith(suffix) => history.ends_with(suffix),
            SuffixPattern::RecentNotLast(action) => {
                window.contains(action) && window.last() != Some(action)
            }
            SuffixPattern::RecentCount(action, n) => {
                window.iter().filter(|m| *m == action).count() >= *n
            }
        }
    }
}

/// Predicted move: certain, or `likely` with probability, else `otherwise`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Certain(Action),
    Likely {
        likely: Action,
        probability: f64,
        otherwise: Action,
    },
}

impl Outcome {
    fn resolve<G: Rng + ?Sized>(&self, rng: &mut G) -> Action {
        match *self {
            Outcome::Certain(action) => action,
            Outcome::Likely {
                likely,
                probability,
                otherwise,
            } => {
                if rng.gen::<f64>() < probability {
                    likely
                } else {
                    otherwise
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionRule {
    pub pattern: SuffixPattern,
    pub outcome: Outcome,
}

const fn likely(likely: Action, probability: f64, otherwise: Action) -> Outcome {
    Outcome::Likely {
        likely,
        probability,
        otherwise,
    }
}

/// Medium and Hard, three or more recorded moves
pub const SHORT_RULES: &[PredictionRule] = &[
    PredictionRule {
        pattern: SuffixPattern::EndsWith(&[A, A, A]),
        outcome: likely(S, 0.7, R),
    },
    PredictionRule {
        pattern: SuffixPattern::EndsWith(&[R, A, A]),
        outcome: likely(S, 0.6, A),
    },
    PredictionRule {
        pattern: SuffixPattern::EndsWith(&[D, D, R]),
        outcome: Outcome::Certain(A),
    },
    PredictionRule {
        pattern: SuffixPattern::EndsWith(&[S, R, R]),
        outcome: Outcome::Certain(A),
    },
    // Rested recently, so has stamina to swing
    PredictionRule {
        pattern: SuffixPattern::RecentNotLast(R),
        outcome: likely(A, 0.7, S),
    },
    // Turtling, possibly saving up a special
    PredictionRule {
        pattern: SuffixPattern::RecentCount(D, 2),
        outcome: likely(D, 0.6, R),
    },
    PredictionRule {
        pattern: SuffixPattern::EndsWith(&[S]),
        outcome: likely(R, 0.8, D),
    },
    PredictionRule {
        pattern: SuffixPattern::EndsWith(&[A, A]),
        outcome: likely(A, 0.4, S),
    },
];

/// Hard only, full history, checked after the short rules
pub const LONG_RULES: &[PredictionRule] = &[
    PredictionRule {
        pattern: SuffixPattern::EndsWith(&[R, R]),
        outcome: Outcome::Certain(A),
    },
    PredictionRule {
        pattern: SuffixPattern::EndsWith(&[D, A, A]),
        outcome: Outcome::Certain(S),
    },
];

fn first_match(rules: &[PredictionRule], history: &[Action]) -> Option<Outcome> {
    rules
        .iter()
        .find(|rule| rule.pattern.matches(history))
        .map(|rule| rule.outcome)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionEngine {
    difficulty: Difficulty,
}

impl PredictionEngine {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    /// Predict the human's next move, or `None`
    pub fn predict<G: Rng + ?Sized>(
        &self,
        tracker: &PatternTracker,
        rng: &mut G,
    ) -> Option<Action> {
        let history = tracker.moves();
        if history.len() < MIN_HISTORY || !self.difficulty.is_adaptive() {
            return None;
        }

        if let Some(outcome) = first_match(SHORT_RULES, &history) {
            return Some(outcome.resolve(rng));
        }

        if self.difficulty != Difficulty::Hard || history.len() < HARD_MIN_HISTORY {
            return None;
        }

        if let Some(outcome) = first_match(LONG_RULES, &history) {
            return Some(outcome.resolve(rng));
        }

        let (style, score) = tracker.scores.dominant();
        if score <= DOMINANT_STYLE_THRESHOLD {
            return None;
        }

        match style {
            PlayStyle::Aggressive => Some(D),
            PlayStyle::Defensive => Some(R),
            PlayStyle::SpecialFocused => Some(D),
            PlayStyle::PatternBased => {
                const BREAKERS: [Action; 3] = [A, D, R];
                Some(BREAKERS[rng.gen_range(0..BREAKERS.len())])
            }
            PlayStyle::Resourceful => None,
        }
    }
}
