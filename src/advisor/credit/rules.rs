use super::super::domain::{CreditBand, EmploymentType, FinancialProfile};
use super::super::money::format_eur;
use super::super::subsidy;
use super::{FactorPolarity, ScoreFactor, ScoreHint};

/// What a single rule contributed to the evaluation.
#[derive(Default)]
pub(super) struct RuleOutcome {
    pub delta: i16,
    pub factors: Vec<ScoreFactor>,
    pub hints: Vec<ScoreHint>,
    pub substitute_equity: f64,
}

pub(super) type ScoreRule = fn(&FinancialProfile, f64) -> RuleOutcome;

/// The additive point model, in the order the factor trail is displayed.
/// All deltas are commutative sums, so the order only affects presentation.
pub(super) const SCORE_RULES: &[ScoreRule] = &[
    equity_ratio,
    employment,
    probation_period,
    credit_band,
    debt_load,
    collateral_substitutes,
    family_subsidy,
    marital_status,
];

fn factor(description: impl Into<String>, effect: i16, polarity: FactorPolarity) -> ScoreFactor {
    ScoreFactor {
        description: description.into(),
        effect,
        polarity,
    }
}

fn hint(icon: &'static str, title: &'static str, advice: impl Into<String>) -> ScoreHint {
    ScoreHint {
        icon,
        title,
        advice: advice.into(),
    }
}

fn equity_ratio(profile: &FinancialProfile, purchase_price: f64) -> RuleOutcome {
    let ratio = profile.equity_ratio(purchase_price);

    let mut outcome = RuleOutcome::default();
    if ratio >= 30.0 {
        outcome.delta = 20;
        outcome
            .factors
            .push(factor("Very good equity ratio (30%+)", 20, FactorPolarity::Positive));
    } else if ratio >= 20.0 {
        outcome.delta = 15;
        outcome
            .factors
            .push(factor("Good equity ratio (20%+)", 15, FactorPolarity::Positive));
    } else if ratio >= 10.0 {
        outcome.delta = 5;
        outcome
            .factors
            .push(factor("Equity ratio 10-20%", 5, FactorPolarity::Neutral));
    } else if ratio > 0.0 {
        outcome.delta = -5;
        outcome
            .factors
            .push(factor("Low equity ratio (<10%)", -5, FactorPolarity::Negative));
        outcome.hints.push(hint(
            "💡",
            "Raise your equity",
            "Existing assets (securities, life insurance, Riester) can top up your equity",
        ));
    } else {
        outcome.delta = -15;
        outcome
            .factors
            .push(factor("No equity capital", -15, FactorPolarity::Negative));
        outcome.hints.push(hint(
            "🏦",
            "100% financing possible",
            "Some banks finance the full price given a strong credit profile. Check a KfW loan as an equity substitute!",
        ));
    }
    outcome
}

fn employment(profile: &FinancialProfile, _purchase_price: f64) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    match profile.employment {
        Some(EmploymentType::CivilServant) => {
            outcome.delta = 15;
            outcome.factors.push(factor(
                "Civil servant status (best creditworthiness)",
                15,
                FactorPolarity::Positive,
            ));
        }
        Some(EmploymentType::Employee) => {
            outcome.delta = 10;
            outcome
                .factors
                .push(factor("Permanent employment", 10, FactorPolarity::Positive));
        }
        Some(EmploymentType::SelfEmployed) => {
            outcome.delta = -5;
            outcome.factors.push(factor(
                "Self-employed (three years of tax returns required)",
                -5,
                FactorPolarity::Neutral,
            ));
            outcome.hints.push(hint(
                "📊",
                "Banks that welcome the self-employed",
                "ING, Sparda banks and KfW add no surcharges for self-employed borrowers!",
            ));
        }
        Some(EmploymentType::FixedTerm) => {
            outcome.delta = -10;
            outcome
                .factors
                .push(factor("Fixed-term employment", -10, FactorPolarity::Negative));
            outcome.hints.push(hint(
                "⏳",
                "Aim for a permanent contract",
                "Chances rise considerably once the contract is permanent. Alternative: bring in a second borrower.",
            ));
        }
        Some(EmploymentType::Retired) | None => {}
    }
    outcome
}

fn probation_period(profile: &FinancialProfile, _purchase_price: f64) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    if profile.probation_period {
        outcome.delta = -20;
        outcome
            .factors
            .push(factor("Still in probation period", -20, FactorPolarity::Negative));
        outcome.hints.push(hint(
            "⚠️",
            "Wait out the probation period",
            "Most banks decline while the borrower is on probation. Wait if you can.",
        ));
    }
    outcome
}

fn credit_band(profile: &FinancialProfile, _purchase_price: f64) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    match profile.credit_band {
        Some(CreditBand::Excellent) => {
            outcome.delta = 10;
            outcome
                .factors
                .push(factor("Excellent credit score", 10, FactorPolarity::Positive));
        }
        Some(CreditBand::Good) => {
            outcome.delta = 5;
            outcome
                .factors
                .push(factor("Good credit score", 5, FactorPolarity::Positive));
        }
        Some(CreditBand::Medium) => {
            outcome.delta = -10;
            outcome
                .factors
                .push(factor("Average credit score", -10, FactorPolarity::Negative));
            outcome.hints.push(hint(
                "📋",
                "Clean up your credit file",
                "Close unused accounts, cut surplus credit cards, and check your self-disclosure report",
            ));
        }
        Some(CreditBand::Poor) => {
            outcome.delta = -25;
            outcome
                .factors
                .push(factor("Problematic credit score", -25, FactorPolarity::Negative));
            outcome.hints.push(hint(
                "🔧",
                "Repair your credit score",
                "Have stale entries deleted first (automatic after three years). Von Essen Bank also accepts weak scores.",
            ));
        }
        None => {}
    }
    outcome
}

fn debt_load(profile: &FinancialProfile, _purchase_price: f64) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    let payments = profile.existing_monthly_loan_payments;
    let monthly_net = profile.estimated_monthly_net();

    if payments > 0.0 && monthly_net > 0.0 {
        let burden = (payments / monthly_net) * 100.0;
        if burden > 20.0 {
            outcome.delta = -15;
            outcome
                .factors
                .push(factor("High existing loan burden", -15, FactorPolarity::Negative));
            outcome.hints.push(hint(
                "💳",
                "Pay off existing loans",
                "Settle or refinance existing loans before the purchase. Improves creditworthiness considerably!",
            ));
        } else if burden > 10.0 {
            outcome.delta = -5;
            outcome
                .factors
                .push(factor("Moderate existing loans", -5, FactorPolarity::Neutral));
        }
    }
    outcome
}

fn collateral_substitutes(profile: &FinancialProfile, _purchase_price: f64) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    if let Some(pledgeable) = profile.pledgeable_securities() {
        outcome.delta += 5;
        outcome
            .factors
            .push(factor("Securities account as collateral", 5, FactorPolarity::Positive));
        outcome.substitute_equity += pledgeable;
    }
    if let Some(surrender) = profile.life_insurance_surrender() {
        outcome.delta += 5;
        outcome
            .factors
            .push(factor("Life insurance as collateral", 5, FactorPolarity::Positive));
        outcome.substitute_equity += surrender;
    }
    if let Some(balance) = profile.riester_funds() {
        outcome.delta += 3;
        outcome
            .factors
            .push(factor("Riester balance available", 3, FactorPolarity::Positive));
        outcome.substitute_equity += balance;
    }
    if let Some(balance) = profile.building_savings() {
        outcome.delta += 5;
        outcome.factors.push(factor(
            "Building-savings contract in place",
            5,
            FactorPolarity::Positive,
        ));
        outcome.substitute_equity += balance;
    }
    outcome
}

fn family_subsidy(profile: &FinancialProfile, _purchase_price: f64) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    let children = profile.children;
    let income = profile.annual_gross_income;

    if children >= 1 && income > 0.0 && income <= subsidy::income_ceiling(children) {
        let max_loan = subsidy::max_family_loan(children);
        outcome.delta = 10;
        outcome.factors.push(factor(
            format!(
                "Family subsidy loan available ({children} {})",
                if children == 1 { "child" } else { "children" }
            ),
            10,
            FactorPolarity::Positive,
        ));
        outcome.hints.push(hint(
            "🎉",
            "KfW 300 home ownership for families",
            format!(
                "You meet the requirements! Loan up to {} at only {}% interest!",
                format_eur(max_loan),
                subsidy::PROMO_INTEREST_RATE
            ),
        ));
    }
    outcome
}

fn marital_status(profile: &FinancialProfile, _purchase_price: f64) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    if profile.married {
        outcome.delta = 5;
        outcome
            .factors
            .push(factor("Two borrowers possible", 5, FactorPolarity::Positive));
    }
    outcome
}

/// Appended after clamping whenever the final score lands below 50.
pub(super) fn broker_referral_hint() -> ScoreHint {
    hint(
        "🏦",
        "Bring in a mortgage broker",
        "Interhyp, Dr. Klein or Baufi24 work with 500+ bank partners and find solutions even for difficult cases",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> FinancialProfile {
        FinancialProfile::default()
    }

    #[test]
    fn equity_tiers_are_monotonic() {
        let price = 300_000.0;
        let mut last_delta = i16::MIN;
        for equity in [0.0, 15_000.0, 45_000.0, 75_000.0, 120_000.0] {
            let p = FinancialProfile {
                equity_capital: equity,
                ..profile()
            };
            let delta = equity_ratio(&p, price).delta;
            assert!(delta >= last_delta, "equity {equity} regressed the factor");
            last_delta = delta;
        }
    }

    #[test]
    fn zero_equity_scores_worse_than_some_equity() {
        let none = equity_ratio(&profile(), 300_000.0);
        assert_eq!(none.delta, -15);
        assert_eq!(none.hints[0].title, "100% financing possible");

        let little = FinancialProfile {
            equity_capital: 1_000.0,
            ..profile()
        };
        let outcome = equity_ratio(&little, 300_000.0);
        assert_eq!(outcome.delta, -5);
        assert_eq!(outcome.hints[0].title, "Raise your equity");
    }

    #[test]
    fn debt_burden_thresholds() {
        // 60,000 gross -> 3,000 estimated net per month.
        let base = FinancialProfile {
            annual_gross_income: 60_000.0,
            ..profile()
        };

        let heavy = FinancialProfile {
            existing_monthly_loan_payments: 700.0,
            ..base.clone()
        };
        assert_eq!(debt_load(&heavy, 300_000.0).delta, -15);

        let moderate = FinancialProfile {
            existing_monthly_loan_payments: 400.0,
            ..base.clone()
        };
        assert_eq!(debt_load(&moderate, 300_000.0).delta, -5);

        let light = FinancialProfile {
            existing_monthly_loan_payments: 200.0,
            ..base
        };
        assert_eq!(debt_load(&light, 300_000.0).delta, 0);
    }

    #[test]
    fn debt_rule_needs_both_income_and_payments() {
        let no_income = FinancialProfile {
            existing_monthly_loan_payments: 900.0,
            ..profile()
        };
        assert_eq!(debt_load(&no_income, 300_000.0).delta, 0);
    }

    #[test]
    fn collateral_sums_substitute_equity_at_pledge_ratios() {
        let p = FinancialProfile {
            has_securities: true,
            securities_value: 100_000.0,
            has_life_insurance: true,
            surrender_value: 20_000.0,
            has_riester_pension: true,
            riester_balance: 15_000.0,
            has_building_savings: true,
            building_savings_balance: 30_000.0,
            ..profile()
        };
        let outcome = collateral_substitutes(&p, 300_000.0);
        assert_eq!(outcome.delta, 5 + 5 + 3 + 5);
        assert_eq!(outcome.factors.len(), 4);
        // 70% of the securities, everything else at face value.
        assert!((outcome.substitute_equity - 135_000.0).abs() < 1e-6);
    }

    #[test]
    fn family_subsidy_requires_children_and_income() {
        let childless = FinancialProfile {
            annual_gross_income: 50_000.0,
            ..profile()
        };
        assert_eq!(family_subsidy(&childless, 300_000.0).delta, 0);

        let qualifying = FinancialProfile {
            children: 2,
            annual_gross_income: 109_999.0,
            ..profile()
        };
        let outcome = family_subsidy(&qualifying, 300_000.0);
        assert_eq!(outcome.delta, 10);
        assert!(outcome.hints[0].advice.contains("210.000 €"));

        let over_ceiling = FinancialProfile {
            children: 2,
            annual_gross_income: 110_001.0,
            ..profile()
        };
        assert_eq!(family_subsidy(&over_ceiling, 300_000.0).delta, 0);
    }
}
