//! Shared math for the federal family home-ownership subsidy program, used by
//! both the credit evaluator and the savings-tip generator.

/// Household income ceiling without children considered.
pub const BASE_INCOME_CEILING: f64 = 90_000.0;

/// Ceiling increase per child in the household.
pub const CEILING_PER_CHILD: f64 = 10_000.0;

/// Additional ceiling headroom for married applicants (tip generator only).
pub const MARRIED_CEILING_BONUS: f64 = 10_000.0;

/// Promotional interest rate of the program, in percent (2025 conditions).
pub const PROMO_INTEREST_RATE: f64 = 1.12;

const BASE_LOAN: f64 = 170_000.0;
const LOAN_PER_CHILD: f64 = 20_000.0;
const LOAN_CHILD_CAP: u8 = 5;

/// Maximum qualifying household income for the given number of children.
pub fn income_ceiling(children: u8) -> f64 {
    BASE_INCOME_CEILING + CEILING_PER_CHILD * f64::from(children)
}

/// Maximum subsidized loan amount; the per-child uplift caps at five children.
pub fn max_family_loan(children: u8) -> f64 {
    BASE_LOAN + LOAN_PER_CHILD * f64::from(children.min(LOAN_CHILD_CAP))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_scales_with_children() {
        assert_eq!(income_ceiling(0), 90_000.0);
        assert_eq!(income_ceiling(2), 110_000.0);
    }

    #[test]
    fn loan_uplift_caps_at_five_children() {
        assert_eq!(max_family_loan(1), 190_000.0);
        assert_eq!(max_family_loan(5), 270_000.0);
        assert_eq!(max_family_loan(9), 270_000.0);
    }
}
