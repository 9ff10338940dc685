use crate::constants::{AMOUNT_SCALE, SETTLE_EPSILON};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, halves away from zero.
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Truncates toward zero at cent precision.
pub fn floor_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::ToZero)
}

/// True when the amount is too small to keep as a debt.
pub fn is_negligible(amount: Decimal) -> bool {
    amount.abs() <= SETTLE_EPSILON
}

pub fn approx_eq(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= SETTLE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_amount(dec!(1.005)), dec!(1.01));
        assert_eq!(round_amount(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_amount(dec!(33.333333)), dec!(33.33));
    }

    #[test]
    fn epsilon_boundary_is_inclusive() {
        assert!(is_negligible(dec!(0.01)));
        assert!(is_negligible(dec!(-0.01)));
        assert!(!is_negligible(dec!(0.011)));
        assert!(approx_eq(dec!(10.00), dec!(10.01)));
        assert!(!approx_eq(dec!(10.00), dec!(10.02)));
    }
}
