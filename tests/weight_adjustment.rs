use immo_advisor::advisor::weights::{
    self, InvestmentGoal, Recommendation, RiskProfile, ScoringCategory,
};

const GOALS: [InvestmentGoal; 5] = [
    InvestmentGoal::Cashflow,
    InvestmentGoal::WealthBuilding,
    InvestmentGoal::FixAndFlip,
    InvestmentGoal::RetirementProvision,
    InvestmentGoal::TaxOptimization,
];

const RISKS: [RiskProfile; 3] = [
    RiskProfile::Conservative,
    RiskProfile::Balanced,
    RiskProfile::Aggressive,
];

#[test]
fn every_combination_stays_within_the_rounding_tolerance() {
    for goal in GOALS {
        for risk in RISKS {
            let weights = weights::adjusted_weights_for(goal, risk);
            assert_eq!(
                weights.len(),
                9,
                "{goal:?}/{risk:?} must weight every category"
            );

            let total: u32 = weights.values().sum();
            assert!(
                (99..=101).contains(&total),
                "{goal:?}/{risk:?} normalized to {total}"
            );
            assert!(
                weights.values().all(|&weight| weight <= 50),
                "{goal:?}/{risk:?} lets one category dominate"
            );
        }
    }
}

#[test]
fn goal_only_entry_point_matches_balanced_risk() {
    for goal in GOALS {
        assert_eq!(
            weights::adjusted_weights(goal),
            weights::adjusted_weights_for(goal, RiskProfile::Balanced)
        );
    }
}

#[test]
fn goals_reshape_the_weighting_in_their_own_direction() {
    let cashflow = weights::adjusted_weights(InvestmentGoal::Cashflow);
    assert!(cashflow[&ScoringCategory::CashflowYield] > 40);
    assert_eq!(cashflow[&ScoringCategory::FuturePotential], 0);

    let flip = weights::adjusted_weights(InvestmentGoal::FixAndFlip);
    assert!(flip[&ScoringCategory::PricePerSqm] > flip[&ScoringCategory::CashflowYield]);

    let retirement = weights::adjusted_weights(InvestmentGoal::RetirementProvision);
    assert!(
        retirement[&ScoringCategory::EnergyEfficiency]
            > weights::adjusted_weights(InvestmentGoal::Cashflow)
                [&ScoringCategory::EnergyEfficiency]
    );
}

#[test]
fn risk_appetite_tilts_weights_without_breaking_the_total() {
    let conservative =
        weights::adjusted_weights_for(InvestmentGoal::WealthBuilding, RiskProfile::Conservative);
    let aggressive =
        weights::adjusted_weights_for(InvestmentGoal::WealthBuilding, RiskProfile::Aggressive);

    assert!(conservative[&ScoringCategory::Location] > aggressive[&ScoringCategory::Location]);
    assert!(
        aggressive[&ScoringCategory::FuturePotential]
            > conservative[&ScoringCategory::FuturePotential]
    );
}

#[test]
fn recommendations_follow_the_risk_thresholds() {
    for risk in RISKS {
        let threshold = risk.score_threshold();
        assert_eq!(
            weights::recommendation(threshold + 20, risk),
            Recommendation::Invest
        );
        assert_eq!(
            weights::recommendation(threshold, risk),
            Recommendation::Consider
        );
        assert_eq!(
            weights::recommendation(threshold - 1, risk),
            Recommendation::Caution
        );
        assert_eq!(
            weights::recommendation(threshold - 15, risk),
            Recommendation::Caution
        );
        assert_eq!(
            weights::recommendation(threshold.saturating_sub(16), risk),
            Recommendation::Avoid
        );
    }

    assert_eq!(
        Recommendation::Invest.label(),
        "Strongly recommended for your profile"
    );
    assert_eq!(
        Recommendation::Avoid.label(),
        "Does not fit your profile"
    );
}
