//! Static reference data the engine depends on but does not own: regional
//! transfer-tax rates, regional subsidy programs, and score display bands.
//! Versioned business data; swapping it out must not touch any rule logic.

use serde::Serialize;

use super::domain::Region;
use super::tips::TipPriority;

/// Applied whenever the region is unrecognized.
pub const FALLBACK_TRANSFER_TAX_RATE: f64 = 6.0;

/// Lowest rate levied anywhere in the country, used as the comparison
/// baseline by the transfer-tax tip.
pub const MINIMUM_TRANSFER_TAX_RATE: f64 = 3.5;

/// One-time real-estate transfer tax in percent of the purchase price,
/// per federal state (2025 rates).
pub const fn transfer_tax_rate(region: Region) -> f64 {
    match region {
        Region::BadenWuerttemberg => 5.0,
        Region::Bayern => 3.5,
        Region::Berlin => 6.0,
        Region::Brandenburg => 6.5,
        Region::Bremen => 5.0,
        Region::Hamburg => 5.5,
        Region::Hessen => 6.0,
        Region::MecklenburgVorpommern => 6.0,
        Region::Niedersachsen => 5.0,
        Region::NordrheinWestfalen => 6.5,
        Region::RheinlandPfalz => 5.0,
        Region::Saarland => 6.5,
        Region::Sachsen => 5.5,
        Region::SachsenAnhalt => 5.0,
        Region::SchleswigHolstein => 6.5,
        Region::Thueringen => 5.0,
        Region::Other => FALLBACK_TRANSFER_TAX_RATE,
    }
}

/// A state-level home-ownership subsidy program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionalProgram {
    pub title: &'static str,
    pub priority: TipPriority,
    pub estimated_savings: f64,
    pub savings_note: &'static str,
    pub summary: &'static str,
    pub details: [&'static str; 5],
    pub action_label: &'static str,
}

/// State subsidy program for the given region, if one is on file. Regions
/// without a listed program (and unknown regions) yield no tip.
pub const fn regional_program(region: Region) -> Option<&'static RegionalProgram> {
    match region {
        Region::NordrheinWestfalen => Some(&RegionalProgram {
            title: "NRW.BANK home-ownership loan",
            priority: TipPriority::High,
            estimated_savings: 40_000.0,
            savings_note: "Interest rate of only 0.5%!",
            summary: "Extremely cheap subsidized loan for NRW residents",
            details: [
                "Subsidized loan of 100,000-184,000 € possible",
                "Extremely low 0.5% interest, close to a gift",
                "Income ceiling around 62,000 € for a family with two children",
                "Applied for through your house bank",
                "Can be combined with federal KfW programs",
            ],
            action_label: "Use the NRW.BANK calculator",
        }),
        Region::Brandenburg => Some(&RegionalProgram {
            title: "ILB home-ownership subsidy",
            priority: TipPriority::High,
            estimated_savings: 80_000.0,
            savings_note: "Up to 230,000 € INTEREST-FREE!",
            summary: "The most generous state subsidy in the country",
            details: [
                "Loan of up to 230,000 € completely interest-free",
                "Available to families with children",
                "Best state-level property subsidy nationwide",
                "Income ceilings apply",
                "Applied for directly at the ILB",
            ],
            action_label: "Contact the ILB",
        }),
        Region::Berlin => Some(&RegionalProgram {
            title: "IBB Berlin FED loan",
            priority: TipPriority::High,
            estimated_savings: 30_000.0,
            savings_note: "Works as genuine substitute equity",
            summary: "Subordinated loan that does not claim first rank in the land register",
            details: [
                "Loan of up to 230,000 €",
                "Does NOT require first rank in the land register",
                "Works as a genuine equity substitute",
                "Ideal for buyers with little cash equity",
                "Owner-occupied properties only",
            ],
            action_label: "Contact the IBB",
        }),
        Region::Bayern => Some(&RegionalProgram {
            title: "BayernLabo owner-occupier subsidy",
            priority: TipPriority::Medium,
            estimated_savings: 25_000.0,
            savings_note: "Up to 3 points below market interest",
            summary: "Cheap conditions on top of the lowest transfer tax",
            details: [
                "Interest subsidy of up to 3 percentage points",
                "Available to families with children",
                "Income ceilings vary with household size",
                "Plus: only 3.5% transfer tax in Bavaria",
                "Applied for through the district office",
            ],
            action_label: "Use the BayernLabo calculator",
        }),
        Region::BadenWuerttemberg => Some(&RegionalProgram {
            title: "L-Bank Z15 loan",
            priority: TipPriority::Medium,
            estimated_savings: 15_000.0,
            savings_note: "Favorable conditions",
            summary: "Subsidized loan for owner-occupiers in Baden-Württemberg",
            details: [
                "Loan of up to 100,000 € at favorable interest",
                "Owner-occupied homes only",
                "Income ceilings apply",
                "Can be combined with federal KfW programs",
                "Applied for at the L-Bank",
            ],
            action_label: "Contact the L-Bank",
        }),
        _ => None,
    }
}

/// Display band for a credit-chance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    VeryGood,
    Good,
    Difficult,
    Critical,
}

impl ScoreBand {
    pub const fn for_score(score: u8) -> ScoreBand {
        if score >= 70 {
            ScoreBand::VeryGood
        } else if score >= 50 {
            ScoreBand::Good
        } else if score >= 30 {
            ScoreBand::Difficult
        } else {
            ScoreBand::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreBand::VeryGood => "Very good",
            ScoreBand::Good => "Good",
            ScoreBand::Difficult => "Difficult",
            ScoreBand::Critical => "Critical",
        }
    }

    /// Gauge color used by the presentation layer; not contractually stable.
    pub const fn color(self) -> &'static str {
        match self {
            ScoreBand::VeryGood => "#22c55e",
            ScoreBand::Good => "#fbbf24",
            ScoreBand::Difficult => "#f97316",
            ScoreBand::Critical => "#ef4444",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_region_has_a_rate_above_the_national_minimum() {
        for region in Region::ALL {
            let rate = transfer_tax_rate(region);
            assert!(
                (MINIMUM_TRANSFER_TAX_RATE..=6.5).contains(&rate),
                "{} has implausible rate {rate}",
                region.label()
            );
        }
    }

    #[test]
    fn unknown_region_takes_the_fallback_rate() {
        assert_eq!(transfer_tax_rate(Region::Other), FALLBACK_TRANSFER_TAX_RATE);
    }

    #[test]
    fn unknown_region_has_no_program() {
        assert!(regional_program(Region::Other).is_none());
        assert!(regional_program(Region::Hamburg).is_none());
        assert!(regional_program(Region::Brandenburg).is_some());
    }

    #[test]
    fn score_bands_cut_at_70_50_30() {
        assert_eq!(ScoreBand::for_score(70), ScoreBand::VeryGood);
        assert_eq!(ScoreBand::for_score(69), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(50), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(49), ScoreBand::Difficult);
        assert_eq!(ScoreBand::for_score(30), ScoreBand::Difficult);
        assert_eq!(ScoreBand::for_score(29), ScoreBand::Critical);
        assert_eq!(ScoreBand::for_score(0), ScoreBand::Critical);
    }
}
