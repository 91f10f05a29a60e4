use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Borrower snapshot supplied by the caller per evaluation. The engine never
/// mutates it and holds no state between calls.
///
/// All numeric fields default to zero and all flags to false so a partially
/// filled form still evaluates (the advisory surface must stay renderable
/// while the user is mid-edit). Intake forms submit numbers as strings, so
/// every numeric field also accepts the string form; anything unparseable
/// counts as zero instead of failing the request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialProfile {
    /// Liquid capital available for the purchase, in euros.
    #[serde(deserialize_with = "lenient_f64")]
    pub equity_capital: f64,
    pub employment: Option<EmploymentType>,
    pub probation_period: bool,
    pub credit_band: Option<CreditBand>,
    /// Monthly installments on loans that predate the purchase, in euros.
    #[serde(deserialize_with = "lenient_f64")]
    pub existing_monthly_loan_payments: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub annual_gross_income: f64,
    #[serde(deserialize_with = "lenient_u8")]
    pub children: u8,
    pub married: bool,
    pub region: Region,
    pub has_securities: bool,
    #[serde(deserialize_with = "lenient_f64")]
    pub securities_value: f64,
    pub has_life_insurance: bool,
    #[serde(deserialize_with = "lenient_f64")]
    pub surrender_value: f64,
    pub has_riester_pension: bool,
    #[serde(deserialize_with = "lenient_f64")]
    pub riester_balance: f64,
    pub has_building_savings: bool,
    #[serde(deserialize_with = "lenient_f64")]
    pub building_savings_balance: f64,
}

/// Loan-to-value applied when a securities account is pledged as collateral.
pub const SECURITIES_PLEDGE_LTV: f64 = 0.7;

impl FinancialProfile {
    /// Equity as a percentage of the purchase price. Callers must guard
    /// against a non-positive price.
    pub fn equity_ratio(&self, purchase_price: f64) -> f64 {
        (self.equity_capital / purchase_price) * 100.0
    }

    /// Pledgeable portion of the securities account, if declared.
    pub fn pledgeable_securities(&self) -> Option<f64> {
        (self.has_securities && self.securities_value > 0.0)
            .then(|| self.securities_value * SECURITIES_PLEDGE_LTV)
    }

    /// Surrender value of a life insurance policy, if declared.
    pub fn life_insurance_surrender(&self) -> Option<f64> {
        (self.has_life_insurance && self.surrender_value > 0.0).then_some(self.surrender_value)
    }

    /// Riester pension balance withdrawable for an owner-occupied purchase.
    pub fn riester_funds(&self) -> Option<f64> {
        (self.has_riester_pension && self.riester_balance > 0.0).then_some(self.riester_balance)
    }

    /// Balance of a building-savings contract, if declared.
    pub fn building_savings(&self) -> Option<f64> {
        (self.has_building_savings && self.building_savings_balance > 0.0)
            .then_some(self.building_savings_balance)
    }

    /// Rough monthly net income estimate used for the debt-load check.
    pub fn estimated_monthly_net(&self) -> f64 {
        self.annual_gross_income * 0.6 / 12.0
    }
}

/// Description of the property the buyer is pursuing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyTarget {
    #[serde(deserialize_with = "lenient_f64")]
    pub purchase_price: f64,
    pub energy_class: Option<EnergyClass>,
    pub usage: UsagePurpose,
}

/// Number-or-string deserializer for euro amounts. Unparseable strings and
/// nulls collapse to zero; a form mid-edit must never fail the request.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    struct LenientF64;

    impl Visitor<'_> for LenientF64 {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
            Ok(value as f64)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
            Ok(value as f64)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
            Ok(value.trim().parse().unwrap_or(0.0))
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(LenientF64)
}

/// Same leniency for the child count, clamped to the u8 range.
fn lenient_u8<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    struct LenientU8;

    impl Visitor<'_> for LenientU8 {
        type Value = u8;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a small count or a numeric string")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u8, E> {
            Ok(value.min(u64::from(u8::MAX)) as u8)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u8, E> {
            Ok(value.clamp(0, i64::from(u8::MAX)) as u8)
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<u8, E> {
            Ok(value.clamp(0.0, 255.0) as u8)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<u8, E> {
            let parsed = value.trim().parse::<f64>().unwrap_or(0.0);
            Ok(parsed.clamp(0.0, 255.0) as u8)
        }

        fn visit_unit<E: de::Error>(self) -> Result<u8, E> {
            Ok(0)
        }
    }

    deserializer.deserialize_any(LenientU8)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    Employee,
    CivilServant,
    SelfEmployed,
    FixedTerm,
    Retired,
}

/// Coarse credit-bureau score band as self-reported by the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditBand {
    Excellent,
    Good,
    Medium,
    Poor,
}

/// Energy performance certificate class of the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyClass {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl EnergyClass {
    /// Classes that qualify for the renovation subsidy program.
    pub const fn qualifies_for_renovation_subsidy(self) -> bool {
        matches!(self, EnergyClass::F | EnergyClass::G | EnergyClass::H)
    }

    pub const fn label(self) -> &'static str {
        match self {
            EnergyClass::APlus => "A+",
            EnergyClass::A => "A",
            EnergyClass::B => "B",
            EnergyClass::C => "C",
            EnergyClass::D => "D",
            EnergyClass::E => "E",
            EnergyClass::F => "F",
            EnergyClass::G => "G",
            EnergyClass::H => "H",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsagePurpose {
    Investment,
    #[default]
    OwnUse,
}

/// German federal state of the property. Drives the transfer-tax rate and the
/// regional subsidy lookup; anything unrecognized collapses to [`Region::Other`]
/// which takes the documented fallback path (6.0% tax, no regional program).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    BadenWuerttemberg,
    Bayern,
    Berlin,
    Brandenburg,
    Bremen,
    Hamburg,
    Hessen,
    MecklenburgVorpommern,
    Niedersachsen,
    NordrheinWestfalen,
    RheinlandPfalz,
    Saarland,
    Sachsen,
    SachsenAnhalt,
    SchleswigHolstein,
    Thueringen,
    #[default]
    Other,
}

impl Region {
    pub const ALL: [Region; 16] = [
        Region::BadenWuerttemberg,
        Region::Bayern,
        Region::Berlin,
        Region::Brandenburg,
        Region::Bremen,
        Region::Hamburg,
        Region::Hessen,
        Region::MecklenburgVorpommern,
        Region::Niedersachsen,
        Region::NordrheinWestfalen,
        Region::RheinlandPfalz,
        Region::Saarland,
        Region::Sachsen,
        Region::SachsenAnhalt,
        Region::SchleswigHolstein,
        Region::Thueringen,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Region::BadenWuerttemberg => "Baden-Württemberg",
            Region::Bayern => "Bayern",
            Region::Berlin => "Berlin",
            Region::Brandenburg => "Brandenburg",
            Region::Bremen => "Bremen",
            Region::Hamburg => "Hamburg",
            Region::Hessen => "Hessen",
            Region::MecklenburgVorpommern => "Mecklenburg-Vorpommern",
            Region::Niedersachsen => "Niedersachsen",
            Region::NordrheinWestfalen => "NRW",
            Region::RheinlandPfalz => "Rheinland-Pfalz",
            Region::Saarland => "Saarland",
            Region::Sachsen => "Sachsen",
            Region::SachsenAnhalt => "Sachsen-Anhalt",
            Region::SchleswigHolstein => "Schleswig-Holstein",
            Region::Thueringen => "Thüringen",
            Region::Other => "Unknown",
        }
    }

    /// Matches the wire names used by the intake forms; unknown values fall
    /// back to [`Region::Other`] instead of failing deserialization.
    pub fn parse(value: &str) -> Region {
        match value.trim() {
            "Baden-Württemberg" => Region::BadenWuerttemberg,
            "Bayern" => Region::Bayern,
            "Berlin" => Region::Berlin,
            "Brandenburg" => Region::Brandenburg,
            "Bremen" => Region::Bremen,
            "Hamburg" => Region::Hamburg,
            "Hessen" => Region::Hessen,
            "Mecklenburg-Vorpommern" => Region::MecklenburgVorpommern,
            "Niedersachsen" => Region::Niedersachsen,
            "NRW" => Region::NordrheinWestfalen,
            "Rheinland-Pfalz" => Region::RheinlandPfalz,
            "Saarland" => Region::Saarland,
            "Sachsen" => Region::Sachsen,
            "Sachsen-Anhalt" => Region::SachsenAnhalt,
            "Schleswig-Holstein" => Region::SchleswigHolstein,
            "Thüringen" => Region::Thueringen,
            _ => Region::Other,
        }
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RegionVisitor;

        impl Visitor<'_> for RegionVisitor {
            type Value = Region;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a German federal state name")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Region, E> {
                Ok(Region::parse(value))
            }
        }

        deserializer.deserialize_str(RegionVisitor)
    }
}
