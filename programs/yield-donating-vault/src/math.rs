use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// Direction of integer rounding for share/asset conversions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

/// Compute `value * numerator / denominator` with a u128 intermediate.
///
/// Errors with `DivisionByZero` on a zero denominator and `MathOverflow`
/// when the result does not fit back into u64.
pub fn mul_div(value: u64, numerator: u64, denominator: u64, rounding: Rounding) -> Result<u64> {
    require!(denominator > 0, VaultError::DivisionByZero);

    let product = (value as u128)
        .checked_mul(numerator as u128)
        .ok_or(VaultError::MathOverflow)?;
    let denominator = denominator as u128;

    let mut quotient = product / denominator;
    if rounding == Rounding::Up && product % denominator != 0 {
        quotient = quotient.checked_add(1).ok_or(VaultError::MathOverflow)?;
    }

    u64::try_from(quotient).map_err(|_| error!(VaultError::MathOverflow))
}

/// `10^decimals` as u64, the amount of base units in one whole token
pub fn one_unit(decimals: u8) -> Result<u64> {
    10u64
        .checked_pow(decimals as u32)
        .ok_or(error!(VaultError::MathOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_rounds_down() {
        assert_eq!(mul_div(100, 333, 1000, Rounding::Down).unwrap(), 33);
    }

    #[test]
    fn test_mul_div_rounds_up() {
        assert_eq!(mul_div(100, 333, 1000, Rounding::Up).unwrap(), 34);
        // Exact results are not bumped
        assert_eq!(mul_div(100, 500, 1000, Rounding::Up).unwrap(), 50);
    }

    #[test]
    fn test_mul_div_large_intermediate() {
        // u64::MAX * u64::MAX fits in u128, quotient fits back
        assert_eq!(
            mul_div(u64::MAX, u64::MAX, u64::MAX, Rounding::Down).unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn test_mul_div_overflowing_result() {
        assert!(mul_div(u64::MAX, 2, 1, Rounding::Down).is_err());
    }

    #[test]
    fn test_mul_div_zero_denominator() {
        assert!(mul_div(1, 1, 0, Rounding::Down).is_err());
    }

    #[test]
    fn test_one_unit() {
        assert_eq!(one_unit(0).unwrap(), 1);
        assert_eq!(one_unit(6).unwrap(), 1_000_000);
        assert!(one_unit(20).is_err());
    }
}
