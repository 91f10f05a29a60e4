//! Savings-tip generator: independently evaluated advice rules, prioritized
//! and sorted for display.

mod rules;

use serde::Serialize;

use super::domain::{FinancialProfile, PropertyTarget};

/// Ordering key for advisory tips; high sorts before medium, info last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TipPriority {
    High,
    Medium,
    Info,
}

impl TipPriority {
    pub const fn rank(self) -> u8 {
        match self {
            TipPriority::High => 0,
            TipPriority::Medium => 1,
            TipPriority::Info => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TipPriority::High => "high",
            TipPriority::Medium => "medium",
            TipPriority::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TipCategory {
    FederalSubsidy,
    RegionalSubsidy,
    EquitySubstitute,
    TaxOptimization,
    Financing,
    CreditRating,
    Info,
}

impl TipCategory {
    pub const fn label(self) -> &'static str {
        match self {
            TipCategory::FederalSubsidy => "Federal subsidy",
            TipCategory::RegionalSubsidy => "Regional subsidy",
            TipCategory::EquitySubstitute => "Equity substitute",
            TipCategory::TaxOptimization => "Tax optimization",
            TipCategory::Financing => "Financing",
            TipCategory::CreditRating => "Credit rating",
            TipCategory::Info => "Info",
        }
    }
}

/// A single money-saving recommendation. Only `category`, `priority`, and
/// `estimated_savings` are contractually stable for sorting and filtering;
/// icons, links, and wording may change between versions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tip {
    pub category: TipCategory,
    pub icon: &'static str,
    pub title: String,
    pub priority: TipPriority,
    pub estimated_savings: f64,
    pub savings_note: String,
    pub summary: String,
    pub details: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_link: Option<&'static str>,
}

/// Evaluates every tip rule against the profile and property, then sorts by
/// priority rank ascending and estimated savings descending. The sort is
/// stable, so ties keep their generation order. Each rule fires at most once
/// per call, which is what keeps the list free of duplicates.
pub fn generate_tips(
    profile: Option<&FinancialProfile>,
    property: Option<&PropertyTarget>,
) -> Vec<Tip> {
    let Some(profile) = profile else {
        return Vec::new();
    };

    let mut tips = Vec::new();
    for rule in rules::TIP_RULES {
        tips.extend(rule(profile, property));
    }

    tips.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| b.estimated_savings.total_cmp(&a.estimated_savings))
    });
    tips
}

/// Sum of the estimated savings across actionable tips; informational entries
/// are excluded from the headline number.
pub fn total_projected_savings(tips: &[Tip]) -> f64 {
    tips.iter()
        .filter(|tip| tip.priority != TipPriority::Info)
        .map(|tip| tip.estimated_savings)
        .sum()
}
