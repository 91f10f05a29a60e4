//! The advisory engine: credit-chance scoring, savings tips, and profile
//! weight adjustment. Everything in here is pure and stateless; callers may
//! invoke it concurrently and memoize results keyed by their inputs.

pub mod credit;
pub mod domain;
pub mod money;
pub mod reference;
pub mod subsidy;
pub mod tips;
pub mod weights;

use serde::Serialize;

pub use credit::{CreditEvaluation, FactorPolarity, ScoreFactor, ScoreHint};
pub use domain::{
    CreditBand, EmploymentType, EnergyClass, FinancialProfile, PropertyTarget, Region,
    UsagePurpose,
};
pub use reference::ScoreBand;
pub use tips::{Tip, TipCategory, TipPriority};
pub use weights::{InvestmentGoal, Recommendation, RiskProfile, ScoringCategory, WeightMap};

/// Everything the advisory surfaces render for one profile/property pair.
#[derive(Debug, Clone, Serialize)]
pub struct AdvisorReport {
    pub evaluation: CreditEvaluation,
    pub band: ScoreBand,
    /// Gauge color for the band, consumed by the presentation layer.
    pub band_color: &'static str,
    pub tips: Vec<Tip>,
    pub total_projected_savings: f64,
    pub weights: WeightMap,
}

/// Runs the full advisory pipeline in one call. Each sub-result is exactly
/// what the standalone entry points produce for the same inputs.
pub fn advise(
    profile: Option<&FinancialProfile>,
    property: Option<&PropertyTarget>,
    goal: InvestmentGoal,
    risk: RiskProfile,
) -> AdvisorReport {
    let purchase_price = property.map(|p| p.purchase_price).unwrap_or(0.0);
    let evaluation = credit::evaluate(profile, purchase_price);
    let band = evaluation.band();
    let tips = tips::generate_tips(profile, property);
    let total_projected_savings = tips::total_projected_savings(&tips);
    let weights = weights::adjusted_weights_for(goal, risk);

    AdvisorReport {
        evaluation,
        band,
        band_color: band.color(),
        tips,
        total_projected_savings,
        weights,
    }
}
