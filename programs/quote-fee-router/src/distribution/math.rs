use anchor_lang::prelude::*;
use crate::constants::BPS_DENOMINATOR;
use crate::errors::ErrorCode;

/// floor(value * numerator / denominator), widened to u128 and narrowed back
pub fn mul_div_floor(value: u64, numerator: u64, denominator: u64) -> Result<u64> {
    require!(denominator != 0, ErrorCode::ArithmeticOverflow);
    let product = (value as u128)
        .checked_mul(numerator as u128)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    let quotient = product
        .checked_div(denominator as u128)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    u64::try_from(quotient).map_err(|_| error!(ErrorCode::ArithmeticOverflow))
}

/// floor(amount * bps / 10000)
pub fn apply_bps(amount: u64, bps: u16) -> Result<u64> {
    mul_div_floor(amount, bps as u64, BPS_DENOMINATOR)
}

/// Clamps `amount` to a daily cap; a cap of 0 means uncapped
pub fn capped(amount: u64, daily_cap: u64) -> u64 {
    if daily_cap == 0 {
        amount
    } else {
        amount.min(daily_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_floors() {
        assert_eq!(mul_div_floor(100, 50, 10).unwrap(), 500);
        assert_eq!(mul_div_floor(100, 33, 100).unwrap(), 33);
        assert_eq!(mul_div_floor(7, 1, 2).unwrap(), 3);
        assert_eq!(mul_div_floor(0, 100, 10).unwrap(), 0);
    }

    #[test]
    fn mul_div_widens_before_dividing() {
        assert_eq!(mul_div_floor(u64::MAX, u64::MAX, u64::MAX).unwrap(), u64::MAX);
        assert_eq!(mul_div_floor(u64::MAX, 3, 4).unwrap(), u64::MAX / 4 * 3 + 2);
    }

    #[test]
    fn mul_div_rejects_zero_denominator_and_narrowing_overflow() {
        assert_eq!(
            mul_div_floor(1, 1, 0).unwrap_err(),
            ErrorCode::ArithmeticOverflow.into()
        );
        assert_eq!(
            mul_div_floor(u64::MAX, 2, 1).unwrap_err(),
            ErrorCode::ArithmeticOverflow.into()
        );
    }

    #[test]
    fn bps_share() {
        assert_eq!(apply_bps(500_000, 2_000).unwrap(), 100_000);
        assert_eq!(apply_bps(9_999, 1).unwrap(), 0);
        assert_eq!(apply_bps(12_345, 10_000).unwrap(), 12_345);
    }

    #[test]
    fn cap_clamp() {
        assert_eq!(capped(1_000, 0), 1_000);
        assert_eq!(capped(400, 1_000), 400);
        assert_eq!(capped(1_500, 1_000), 1_000);
    }
}
