//! Credit-chance evaluator: turns a financial profile and a purchase price
//! into a bounded probability score with a transparent factor trail.

mod rules;

use serde::Serialize;

use super::domain::FinancialProfile;
use super::reference::ScoreBand;

/// Every evaluation starts from this score before the rules apply their
/// adjustments.
pub const BASE_SCORE: i16 = 50;

/// Whether a factor helped, hurt, or merely flagged something.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorPolarity {
    Positive,
    Neutral,
    Negative,
}

/// Discrete contribution to the score, kept in rule order so the trail reads
/// the way the evaluation ran. Never re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreFactor {
    pub description: String,
    /// Signed percentage-point effect on the score.
    pub effect: i16,
    pub polarity: FactorPolarity,
}

/// Short actionable advice attached by a rule that found a weakness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreHint {
    pub icon: &'static str,
    pub title: &'static str,
    pub advice: String,
}

/// Result of a credit-chance evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditEvaluation {
    /// Financing probability estimate, clamped to 0-100.
    pub score: u8,
    pub factors: Vec<ScoreFactor>,
    pub hints: Vec<ScoreHint>,
    /// Pledgeable non-cash assets, reported separately; not part of the score.
    pub substitute_equity: f64,
}

impl CreditEvaluation {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score)
    }

    const fn empty() -> Self {
        CreditEvaluation {
            score: 0,
            factors: Vec::new(),
            hints: Vec::new(),
            substitute_equity: 0.0,
        }
    }
}

/// Scores the profile against the purchase price.
///
/// Fails closed: an absent profile or a non-positive price yields the empty
/// zero result instead of an error, since both are ordinary mid-edit states
/// of the intake form. Identical inputs always produce identical output.
pub fn evaluate(profile: Option<&FinancialProfile>, purchase_price: f64) -> CreditEvaluation {
    let Some(profile) = profile else {
        return CreditEvaluation::empty();
    };
    if !(purchase_price > 0.0) {
        return CreditEvaluation::empty();
    }

    let mut total = BASE_SCORE;
    let mut factors = Vec::new();
    let mut hints = Vec::new();
    let mut substitute_equity = 0.0;

    for rule in rules::SCORE_RULES {
        let outcome = rule(profile, purchase_price);
        total += outcome.delta;
        factors.extend(outcome.factors);
        hints.extend(outcome.hints);
        substitute_equity += outcome.substitute_equity;
    }

    let score = total.clamp(0, 100) as u8;

    // Weak overall picture: always point at the broker channel, whatever the
    // individual factors were.
    if score < 50 {
        hints.push(rules::broker_referral_hint());
    }

    CreditEvaluation {
        score,
        factors,
        hints,
        substitute_equity,
    }
}
