//! Profile weight adjuster: turns a stated investment goal (and optionally a
//! risk appetite) into the category weighting consumed by the property
//! scoring subsystem.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The nine criteria the property scorer weighs against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringCategory {
    CashflowYield,
    Location,
    PricePerSqm,
    FuturePotential,
    ConditionAndYear,
    EnergyEfficiency,
    AncillaryCosts,
    Layout,
    SellerType,
}

impl ScoringCategory {
    pub const ALL: [ScoringCategory; 9] = [
        ScoringCategory::CashflowYield,
        ScoringCategory::Location,
        ScoringCategory::PricePerSqm,
        ScoringCategory::FuturePotential,
        ScoringCategory::ConditionAndYear,
        ScoringCategory::EnergyEfficiency,
        ScoringCategory::AncillaryCosts,
        ScoringCategory::Layout,
        ScoringCategory::SellerType,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ScoringCategory::CashflowYield => "cashflow yield",
            ScoringCategory::Location => "location",
            ScoringCategory::PricePerSqm => "price per sqm",
            ScoringCategory::FuturePotential => "future potential",
            ScoringCategory::ConditionAndYear => "condition and construction year",
            ScoringCategory::EnergyEfficiency => "energy efficiency",
            ScoringCategory::AncillaryCosts => "ancillary costs",
            ScoringCategory::Layout => "layout",
            ScoringCategory::SellerType => "seller type",
        }
    }
}

/// Category weights in percent, keyed in a fixed iteration order.
pub type WeightMap = BTreeMap<ScoringCategory, u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentGoal {
    Cashflow,
    WealthBuilding,
    FixAndFlip,
    RetirementProvision,
    TaxOptimization,
}

impl InvestmentGoal {
    pub const fn label(self) -> &'static str {
        match self {
            InvestmentGoal::Cashflow => "cashflow focus",
            InvestmentGoal::WealthBuilding => "wealth building",
            InvestmentGoal::FixAndFlip => "fix & flip",
            InvestmentGoal::RetirementProvision => "retirement provision",
            InvestmentGoal::TaxOptimization => "tax optimization",
        }
    }

    /// Sparse signed deltas applied on top of the base weights.
    const fn deltas(self) -> &'static [(ScoringCategory, i32)] {
        match self {
            InvestmentGoal::Cashflow => &[
                (ScoringCategory::CashflowYield, 15),
                (ScoringCategory::Location, -5),
                (ScoringCategory::PricePerSqm, 5),
                (ScoringCategory::FuturePotential, -10),
                (ScoringCategory::AncillaryCosts, 5),
            ],
            InvestmentGoal::WealthBuilding => &[
                (ScoringCategory::CashflowYield, -10),
                (ScoringCategory::Location, 10),
                (ScoringCategory::FuturePotential, 15),
                (ScoringCategory::PricePerSqm, -5),
            ],
            InvestmentGoal::FixAndFlip => &[
                (ScoringCategory::CashflowYield, -20),
                (ScoringCategory::PricePerSqm, 20),
                (ScoringCategory::ConditionAndYear, 15),
                (ScoringCategory::FuturePotential, -5),
                (ScoringCategory::Location, -5),
            ],
            InvestmentGoal::RetirementProvision => &[
                (ScoringCategory::CashflowYield, 5),
                (ScoringCategory::Location, 5),
                (ScoringCategory::ConditionAndYear, 5),
                (ScoringCategory::FuturePotential, 5),
                (ScoringCategory::EnergyEfficiency, 5),
                (ScoringCategory::PricePerSqm, -10),
            ],
            InvestmentGoal::TaxOptimization => &[
                (ScoringCategory::CashflowYield, -5),
                (ScoringCategory::ConditionAndYear, 10),
                (ScoringCategory::EnergyEfficiency, 10),
                (ScoringCategory::FuturePotential, -5),
            ],
        }
    }
}

/// Buyer risk appetite; layers a second sparse delta map over the goal's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

impl RiskProfile {
    pub const fn label(self) -> &'static str {
        match self {
            RiskProfile::Conservative => "conservative",
            RiskProfile::Balanced => "balanced",
            RiskProfile::Aggressive => "aggressive",
        }
    }

    /// Minimum property score this profile should be recommended.
    pub const fn score_threshold(self) -> u8 {
        match self {
            RiskProfile::Conservative => 65,
            RiskProfile::Balanced => 50,
            RiskProfile::Aggressive => 35,
        }
    }

    const fn deltas(self) -> &'static [(ScoringCategory, i32)] {
        match self {
            RiskProfile::Conservative => &[
                (ScoringCategory::Location, 5),
                (ScoringCategory::ConditionAndYear, 5),
                (ScoringCategory::EnergyEfficiency, 3),
                (ScoringCategory::CashflowYield, -5),
            ],
            RiskProfile::Balanced => &[],
            RiskProfile::Aggressive => &[
                (ScoringCategory::FuturePotential, 5),
                (ScoringCategory::PricePerSqm, 5),
                (ScoringCategory::ConditionAndYear, -5),
                (ScoringCategory::Location, -5),
            ],
        }
    }
}

/// Hand-tuned base weighting for investment-driven property scoring; sums
/// to 100.
const BASE_WEIGHTS: [(ScoringCategory, i32); 9] = [
    (ScoringCategory::CashflowYield, 30),
    (ScoringCategory::Location, 20),
    (ScoringCategory::PricePerSqm, 15),
    (ScoringCategory::FuturePotential, 10),
    (ScoringCategory::ConditionAndYear, 10),
    (ScoringCategory::EnergyEfficiency, 5),
    (ScoringCategory::AncillaryCosts, 5),
    (ScoringCategory::Layout, 3),
    (ScoringCategory::SellerType, 2),
];

/// No single criterion may dominate the weighting.
const MAX_CATEGORY_WEIGHT: i32 = 50;

/// Goal-only adjustment; equivalent to a balanced risk appetite.
pub fn adjusted_weights(goal: InvestmentGoal) -> WeightMap {
    adjusted_weights_for(goal, RiskProfile::Balanced)
}

/// Applies the goal and risk delta maps to the base weights, clamps each
/// weight to [0, 50], and rescales to a total of 100.
///
/// The rescale rounds each weight to the nearest integer, so the final sum
/// may land on 99 or 101. That tolerance is deliberate and documented; the
/// consuming scorer normalizes by the actual total, so it is not corrected
/// here.
pub fn adjusted_weights_for(goal: InvestmentGoal, risk: RiskProfile) -> WeightMap {
    let mut weights: BTreeMap<ScoringCategory, i32> = BASE_WEIGHTS.into_iter().collect();

    for &(category, delta) in goal.deltas().iter().chain(risk.deltas()) {
        if let Some(weight) = weights.get_mut(&category) {
            *weight = (*weight + delta).clamp(0, MAX_CATEGORY_WEIGHT);
        }
    }

    let total: i32 = weights.values().sum();
    if total != 100 && total > 0 {
        let factor = 100.0 / f64::from(total);
        for weight in weights.values_mut() {
            *weight = (f64::from(*weight) * factor).round() as i32;
        }
    }

    weights
        .into_iter()
        .map(|(category, weight)| (category, weight.max(0) as u32))
        .collect()
}

/// Four-level verdict mapping a property score to this buyer's thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Invest,
    Consider,
    Caution,
    Avoid,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::Invest => "Strongly recommended for your profile",
            Recommendation::Consider => "Worth a close look, fits your profile",
            Recommendation::Caution => "Treat with caution",
            Recommendation::Avoid => "Does not fit your profile",
        }
    }
}

/// Maps a property score onto the risk profile's acceptance thresholds.
pub fn recommendation(score: u8, risk: RiskProfile) -> Recommendation {
    let score = i16::from(score);
    let threshold = i16::from(risk.score_threshold());

    if score >= threshold + 20 {
        Recommendation::Invest
    } else if score >= threshold {
        Recommendation::Consider
    } else if score >= threshold - 15 {
        Recommendation::Caution
    } else {
        Recommendation::Avoid
    }
}
