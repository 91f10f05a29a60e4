use super::super::domain::{CreditBand, EmploymentType, FinancialProfile, PropertyTarget, UsagePurpose};
use super::super::money::format_eur;
use super::super::reference::{regional_program, transfer_tax_rate, MINIMUM_TRANSFER_TAX_RATE};
use super::super::subsidy;
use super::{Tip, TipCategory, TipPriority};

pub(super) type TipRule = fn(&FinancialProfile, Option<&PropertyTarget>) -> Vec<Tip>;

/// Every rule is evaluated independently; several may fire on one profile.
pub(super) const TIP_RULES: &[TipRule] = &[
    family_subsidy_programs,
    baseline_subsidy_program,
    equity_substitutes,
    tax_optimizations,
    regional_subsidy,
    self_employment,
    credit_remediation,
    transfer_tax_comparison,
];

fn purchase_price(property: Option<&PropertyTarget>) -> f64 {
    property.map(|p| p.purchase_price).unwrap_or(0.0)
}

/// Family home-ownership loan plus, for poor energy classes, the renovation
/// program. Both need at least one child and a declared income; only the
/// first is capped by the income ceiling (with a married bonus on top).
fn family_subsidy_programs(
    profile: &FinancialProfile,
    property: Option<&PropertyTarget>,
) -> Vec<Tip> {
    let children = profile.children;
    let income = profile.annual_gross_income;
    if children == 0 || income <= 0.0 {
        return Vec::new();
    }

    let mut tips = Vec::new();

    let married_bonus = if profile.married {
        subsidy::MARRIED_CEILING_BONUS
    } else {
        0.0
    };
    let ceiling = subsidy::income_ceiling(children) + married_bonus;

    if income <= ceiling {
        let max_loan = subsidy::max_family_loan(children);
        // A decade of a 2.5-point rate differential on the full loan.
        let savings = max_loan * 0.025 * 10.0;
        tips.push(Tip {
            category: TipCategory::FederalSubsidy,
            icon: "🏠",
            title: "KfW 300: home ownership for families".to_string(),
            priority: TipPriority::High,
            estimated_savings: savings,
            savings_note: format!("{} interest saved", format_eur(savings)),
            summary: format!(
                "Loan up to {} at only {}% interest",
                format_eur(max_loan),
                subsidy::PROMO_INTEREST_RATE
            ),
            details: vec![
                format!(
                    "Your household income ({}) is below the ceiling of {}",
                    format_eur(income),
                    format_eur(ceiling)
                ),
                format!(
                    "With {children} {}: maximum loan {}",
                    if children == 1 { "child" } else { "children" },
                    format_eur(max_loan)
                ),
                format!(
                    "Interest rate of only {}% (2025 conditions), well below market level!",
                    subsidy::PROMO_INTEREST_RATE
                ),
                "Important: apply BEFORE signing the purchase contract!".to_string(),
                "Available through any bank".to_string(),
            ],
            action_label: Some("Check KfW eligibility"),
            action_link: Some("https://www.kfw.de/300"),
        });
    }

    let renovation_class = property
        .and_then(|p| p.energy_class)
        .filter(|class| class.qualifies_for_renovation_subsidy());
    if let Some(class) = renovation_class {
        let max_loan = 100_000.0 + if children >= 3 { 50_000.0 } else { 0.0 };
        let savings = max_loan * 0.02 * 10.0;
        tips.push(Tip {
            category: TipCategory::FederalSubsidy,
            icon: "🏚️",
            title: "KfW 308: young buys old".to_string(),
            priority: TipPriority::High,
            estimated_savings: savings,
            savings_note: format!("{} potential saving", format_eur(savings)),
            summary: format!(
                "Renovation loan up to {} at promotional conditions",
                format_eur(max_loan)
            ),
            details: vec![
                format!("Energy class {} qualifies for this program!", class.label()),
                format!(
                    "Loan up to {} at {}% interest",
                    format_eur(max_loan),
                    subsidy::PROMO_INTEREST_RATE
                ),
                "Renovation to efficiency standard 85 EE required within 54 months".to_string(),
                "Can be combined with the heating subsidy (BEG EM)".to_string(),
                "Can be applied for on top of KfW 300".to_string(),
            ],
            action_label: Some("Check the program"),
            action_link: Some("https://www.kfw.de/308"),
        });
    }

    tips
}

/// The one program with no income ceiling; always worth mentioning once.
fn baseline_subsidy_program(
    _profile: &FinancialProfile,
    _property: Option<&PropertyTarget>,
) -> Vec<Tip> {
    vec![Tip {
        category: TipCategory::FederalSubsidy,
        icon: "🏦",
        title: "KfW 124: home-ownership program".to_string(),
        priority: TipPriority::Medium,
        estimated_savings: 8_000.0,
        savings_note: "around 5,000-15,000 € over the term".to_string(),
        summary: "Up to 100,000 € at roughly 3.4-3.9% interest, open to every buyer".to_string(),
        details: vec![
            "Loan up to 100,000 € at roughly 3.4-3.9% interest".to_string(),
            "NO income ceiling, available to every buyer!".to_string(),
            "No equity requirement".to_string(),
            "Applied for through any house bank".to_string(),
            "Repayment-free start years possible".to_string(),
        ],
        action_label: Some("Ask your house bank"),
        action_link: None,
    }]
}

/// Ways to mobilize non-cash assets when cash equity is thin (< 20% of the
/// price). Each declared asset gets its own tip.
fn equity_substitutes(profile: &FinancialProfile, property: Option<&PropertyTarget>) -> Vec<Tip> {
    let price = purchase_price(property);
    if price <= 0.0 || profile.equity_capital >= price * 0.2 {
        return Vec::new();
    }

    let mut tips = Vec::new();

    if let Some(pledgeable) = profile.pledgeable_securities() {
        tips.push(Tip {
            category: TipCategory::EquitySubstitute,
            icon: "📈",
            title: "Pledge your securities (Lombard loan)".to_string(),
            priority: TipPriority::High,
            // Roughly 1.5% better loan conditions from the extra equity.
            estimated_savings: pledgeable * 0.015,
            savings_note: format!("Up to {} usable as equity", format_eur(pledgeable)),
            summary: "Use securities as collateral without selling them".to_string(),
            details: vec![
                format!(
                    "Your securities account ({}) can be pledged up to 70%",
                    format_eur(profile.securities_value)
                ),
                format!("That equals {} of additional equity", format_eur(pledgeable)),
                "Top providers: Scalable PRIME+ (3.24%), DEGIRO (4.75%)".to_string(),
                "Upside: the account stays yours and keeps earning".to_string(),
                "Careful: falling prices can trigger a margin call".to_string(),
            ],
            action_label: Some("Compare brokers"),
            action_link: None,
        });
    }

    if let Some(surrender) = profile.life_insurance_surrender() {
        tips.push(Tip {
            category: TipCategory::EquitySubstitute,
            icon: "💼",
            title: "Borrow against your life insurance".to_string(),
            priority: TipPriority::High,
            estimated_savings: surrender * 0.015,
            savings_note: format!("Up to {} as equity", format_eur(surrender)),
            summary: "Policy loan without cancelling the insurance".to_string(),
            details: vec![
                "Up to 100% of the surrender value can be borrowed".to_string(),
                "Insurance cover stays fully intact!".to_string(),
                "No credit-bureau entry with most providers".to_string(),
                "Providers: Lifefinance (4.59%), SWK Bank (5.99%)".to_string(),
                "Considerably cheaper than consumer loans".to_string(),
            ],
            action_label: Some("Request an offer"),
            action_link: None,
        });
    }

    if let Some(balance) = profile.riester_funds() {
        tips.push(Tip {
            category: TipCategory::EquitySubstitute,
            icon: "🏠",
            title: "Use your Riester savings".to_string(),
            priority: TipPriority::Medium,
            estimated_savings: balance,
            savings_note: format!("{} directly withdrawable", format_eur(balance)),
            summary: "Put the Riester balance toward the purchase".to_string(),
            details: vec![
                "100% of the balance can be withdrawn for a home purchase".to_string(),
                "All subsidies received so far are kept".to_string(),
                "Careful: deferred taxation in retirement (subsidy ledger account)".to_string(),
                "Option: lump-sum settlement at retirement with a 30% discount".to_string(),
                "Owner-occupied properties only".to_string(),
            ],
            action_label: Some("Contact your Riester provider"),
            action_link: None,
        });
    }

    tips
}

/// Depreciation and transfer-tax levers, only relevant to buy-to-let buyers.
fn tax_optimizations(profile: &FinancialProfile, property: Option<&PropertyTarget>) -> Vec<Tip> {
    let Some(property) = property else {
        return Vec::new();
    };
    if property.usage != UsagePurpose::Investment {
        return Vec::new();
    }
    let price = property.purchase_price;

    let rate = transfer_tax_rate(profile.region);
    let fixtures_savings = (price * 0.15).min(50_000.0) * rate / 100.0;

    vec![
        Tip {
            category: TipCategory::TaxOptimization,
            icon: "📊",
            title: "Optimize the purchase-price allocation".to_string(),
            priority: TipPriority::Medium,
            estimated_savings: price * 0.015,
            savings_note: format!("{} possible over 50 years", format_eur(price * 0.015)),
            summary: "Maximize the building share for higher depreciation".to_string(),
            details: vec![
                "Only the building share can be depreciated (2% p.a., 3% for new builds)"
                    .to_string(),
                "The standard official split is often unfavorable; a dedicated appraisal pays off!"
                    .to_string(),
                "Agree on the split in the purchase contract (involve the seller)".to_string(),
                "Appraisal costs 1,500-3,000 €, savings often 30,000+ €".to_string(),
                "The tax office must accept a plausible appraisal".to_string(),
            ],
            action_label: Some("Find an appraiser"),
            action_link: None,
        },
        Tip {
            category: TipCategory::TaxOptimization,
            icon: "💶",
            title: "List fixtures separately".to_string(),
            priority: TipPriority::Medium,
            estimated_savings: fixtures_savings,
            savings_note: format!("Up to {} transfer tax saved", format_eur(fixtures_savings)),
            summary: "Fitted kitchens and movables carry no transfer tax".to_string(),
            details: vec![
                "Fitted kitchen, awnings, sauna etc. are NOT subject to transfer tax".to_string(),
                "Tax offices accept up to 15% of the price without receipts".to_string(),
                "List the items with values separately in the purchase contract".to_string(),
                format!(
                    "At {rate}% transfer tax in {}: {} saving possible",
                    profile.region.label(),
                    format_eur(fixtures_savings)
                ),
                "Include furniture, garden equipment, built-in wardrobes".to_string(),
            ],
            action_label: Some("Put it in the purchase contract"),
            action_link: None,
        },
    ]
}

/// State-level program, if the region has one on file.
fn regional_subsidy(profile: &FinancialProfile, _property: Option<&PropertyTarget>) -> Vec<Tip> {
    let Some(program) = regional_program(profile.region) else {
        return Vec::new();
    };

    vec![Tip {
        category: TipCategory::RegionalSubsidy,
        icon: "🏛️",
        title: program.title.to_string(),
        priority: program.priority,
        estimated_savings: program.estimated_savings,
        savings_note: program.savings_note.to_string(),
        summary: program.summary.to_string(),
        details: program.details.iter().map(|line| line.to_string()).collect(),
        action_label: Some(program.action_label),
        action_link: None,
    }]
}

fn self_employment(profile: &FinancialProfile, property: Option<&PropertyTarget>) -> Vec<Tip> {
    if profile.employment != Some(EmploymentType::SelfEmployed) {
        return Vec::new();
    }

    vec![Tip {
        category: TipCategory::Financing,
        icon: "📋",
        title: "Banks that welcome the self-employed".to_string(),
        priority: TipPriority::High,
        estimated_savings: purchase_price(property) * 0.005,
        savings_note: "Avoids a 0.3-0.5% interest surcharge".to_string(),
        summary: "These banks add no surcharge for self-employed borrowers".to_string(),
        details: vec![
            "ING: no surcharges for the self-employed, a popular first stop".to_string(),
            "Sparda banks: approved lists for professionals such as doctors and lawyers"
                .to_string(),
            "KfW: treats the self-employed like employees (via the house bank)".to_string(),
            "Savings and cooperative banks decide case by case; a relationship helps".to_string(),
            "Tip: prepare three years of tax returns plus current financials".to_string(),
        ],
        action_label: Some("Compare banks"),
        action_link: None,
    }]
}

fn credit_remediation(profile: &FinancialProfile, property: Option<&PropertyTarget>) -> Vec<Tip> {
    let priority = match profile.credit_band {
        Some(CreditBand::Poor) => TipPriority::High,
        Some(CreditBand::Medium) => TipPriority::Medium,
        _ => return Vec::new(),
    };

    vec![Tip {
        category: TipCategory::CreditRating,
        icon: "📋",
        title: "Improve your credit score".to_string(),
        priority,
        estimated_savings: purchase_price(property) * 0.008,
        savings_note: "Up to 0.5% better interest possible".to_string(),
        summary: "Quick measures to lift the score".to_string(),
        details: vec![
            "Close unused accounts and credit cards".to_string(),
            "Request the free self-disclosure report and dispute errors".to_string(),
            "Have old negative entries deleted (automatic after three years)".to_string(),
            "Von Essen Bank: accepts weaker scores as well".to_string(),
            "Applying with a co-borrower improves the odds considerably".to_string(),
        ],
        action_label: Some("Request your credit report"),
        action_link: None,
    }]
}

/// Informational only: how much the regional rate costs versus the national
/// minimum of 3.5%.
fn transfer_tax_comparison(
    profile: &FinancialProfile,
    property: Option<&PropertyTarget>,
) -> Vec<Tip> {
    let rate = transfer_tax_rate(profile.region);
    let price = purchase_price(property);
    if rate < 6.0 || price <= 0.0 {
        return Vec::new();
    }

    let difference = (rate - MINIMUM_TRANSFER_TAX_RATE) / 100.0 * price;
    vec![Tip {
        category: TipCategory::Info,
        icon: "🗺️",
        title: "Transfer-tax comparison".to_string(),
        priority: TipPriority::Info,
        estimated_savings: difference,
        savings_note: format!("{} vs. Bayern/Sachsen", format_eur(difference)),
        summary: format!(
            "{} levies {rate}%, Bayern/Sachsen only {MINIMUM_TRANSFER_TAX_RATE}%",
            profile.region.label()
        ),
        details: vec![
            format!("{}: {rate}% transfer tax", profile.region.label()),
            "Bayern & Sachsen: only 3.5% (lowest rate)".to_string(),
            "Close to a state border: factor the rate into the location choice".to_string(),
            format!(
                "Difference at {}: {}",
                format_eur(price),
                format_eur(difference)
            ),
            "Note: moving just for the tax saving rarely pays off".to_string(),
        ],
        action_label: None,
        action_link: None,
    }]
}

#[cfg(test)]
mod tests {
    use super::super::super::domain::{EnergyClass, Region};
    use super::*;

    fn investment_property(price: f64) -> PropertyTarget {
        PropertyTarget {
            purchase_price: price,
            energy_class: Some(EnergyClass::C),
            usage: UsagePurpose::Investment,
        }
    }

    #[test]
    fn married_bonus_widens_the_income_ceiling() {
        let single = FinancialProfile {
            children: 2,
            annual_gross_income: 115_000.0,
            ..FinancialProfile::default()
        };
        assert!(family_subsidy_programs(&single, None).is_empty());

        let married = FinancialProfile {
            married: true,
            ..single
        };
        let tips = family_subsidy_programs(&married, None);
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].priority, TipPriority::High);
        // 210,000 loan, 2.5 points over ten years.
        assert!((tips[0].estimated_savings - 52_500.0).abs() < 1e-6);
    }

    #[test]
    fn renovation_program_fires_without_the_income_ceiling() {
        let profile = FinancialProfile {
            children: 3,
            annual_gross_income: 500_000.0,
            ..FinancialProfile::default()
        };
        let property = PropertyTarget {
            purchase_price: 400_000.0,
            energy_class: Some(EnergyClass::G),
            usage: UsagePurpose::OwnUse,
        };
        let tips = family_subsidy_programs(&profile, Some(&property));
        assert_eq!(tips.len(), 1, "only the renovation tip should fire");
        assert!(tips[0].title.contains("308"));
        // 150,000 loan for three children, 2 points over ten years.
        assert!((tips[0].estimated_savings - 30_000.0).abs() < 1e-6);
    }

    #[test]
    fn equity_substitutes_need_thin_equity_and_a_price() {
        let profile = FinancialProfile {
            equity_capital: 10_000.0,
            has_securities: true,
            securities_value: 100_000.0,
            ..FinancialProfile::default()
        };

        assert!(equity_substitutes(&profile, None).is_empty());

        let tips = equity_substitutes(&profile, Some(&investment_property(300_000.0)));
        assert_eq!(tips.len(), 1);
        assert!((tips[0].estimated_savings - 1_050.0).abs() < 1e-6);

        let comfortable = FinancialProfile {
            equity_capital: 80_000.0,
            ..profile
        };
        assert!(equity_substitutes(&comfortable, Some(&investment_property(300_000.0))).is_empty());
    }

    #[test]
    fn tax_tips_only_for_investment_usage() {
        let profile = FinancialProfile {
            region: Region::Berlin,
            ..FinancialProfile::default()
        };

        let own_use = PropertyTarget {
            usage: UsagePurpose::OwnUse,
            ..investment_property(300_000.0)
        };
        assert!(tax_optimizations(&profile, Some(&own_use)).is_empty());

        let tips = tax_optimizations(&profile, Some(&investment_property(300_000.0)));
        assert_eq!(tips.len(), 2);
        // Fixtures: min(45,000, 50,000) at Berlin's 6%.
        assert!((tips[1].estimated_savings - 2_700.0).abs() < 1e-6);
    }

    #[test]
    fn credit_remediation_priority_tracks_the_band() {
        let poor = FinancialProfile {
            credit_band: Some(CreditBand::Poor),
            ..FinancialProfile::default()
        };
        assert_eq!(
            credit_remediation(&poor, None)[0].priority,
            TipPriority::High
        );

        let medium = FinancialProfile {
            credit_band: Some(CreditBand::Medium),
            ..FinancialProfile::default()
        };
        assert_eq!(
            credit_remediation(&medium, None)[0].priority,
            TipPriority::Medium
        );

        let good = FinancialProfile {
            credit_band: Some(CreditBand::Good),
            ..FinancialProfile::default()
        };
        assert!(credit_remediation(&good, None).is_empty());
    }

    #[test]
    fn transfer_tax_comparison_requires_a_high_rate() {
        let cheap_state = FinancialProfile {
            region: Region::Bayern,
            ..FinancialProfile::default()
        };
        assert!(transfer_tax_comparison(&cheap_state, Some(&investment_property(300_000.0)))
            .is_empty());

        let expensive_state = FinancialProfile {
            region: Region::NordrheinWestfalen,
            ..FinancialProfile::default()
        };
        let tips = transfer_tax_comparison(&expensive_state, Some(&investment_property(300_000.0)));
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].priority, TipPriority::Info);
        // 6.5% vs 3.5% on 300,000.
        assert!((tips[0].estimated_savings - 9_000.0).abs() < 1e-9);
    }
}
