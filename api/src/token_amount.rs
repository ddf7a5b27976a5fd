//! Raw on-chain token quantities and their human-readable scaling.

use std::fmt;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Largest scale a `Decimal` can represent.
const MAX_SCALE: u32 = 28;

/// An error that can occur when moving between raw and scaled token amounts.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenAmountError {
    /// The raw integer does not fit a decimal at the token's precision.
    #[error("token amount {raw} is out of range for {decimals} decimals")]
    OutOfRange { raw: u128, decimals: u8 },
    /// The decimal amount is too large to scale to the token's precision.
    #[error("amount {value} overflows when scaled to {decimals} decimals")]
    Overflow { value: Decimal, decimals: u8 },
    /// The token declares more decimal places than a `Decimal` can hold.
    #[error("{0} decimal places exceeds the supported maximum")]
    TooManyDecimals(u8),
    /// Token balances are never negative.
    #[error("token amounts cannot be negative")]
    Negative,
}

/// A token quantity exactly as the chain reports it.
///
/// `raw` is the integer balance in the token's smallest unit; `decimals` is the
/// token's fixed precision. A raw balance of `9_000_000_000` with 9 decimals is
/// 9 whole tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenAmount {
    raw: u128,
    decimals: u8,
}

impl TokenAmount {
    pub const fn from_raw(raw: u128, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    pub const fn zero(decimals: u8) -> Self {
        Self { raw: 0, decimals }
    }

    /// Converts a human-readable amount into raw units, truncating anything
    /// finer than the token's precision.
    ///
    /// # Examples
    /// ```ignore
    /// let amount = TokenAmount::from_decimal(Decimal::new(15, 1), 9)?;
    /// assert_eq!(amount.raw(), 1_500_000_000);
    /// ```
    pub fn from_decimal(value: Decimal, decimals: u8) -> Result<Self, TokenAmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(TokenAmountError::Negative);
        }
        if u32::from(decimals) > MAX_SCALE {
            return Err(TokenAmountError::TooManyDecimals(decimals));
        }
        let factor = Decimal::from_i128_with_scale(10_i128.pow(u32::from(decimals)), 0);
        let raw = value
            .checked_mul(factor)
            .and_then(|scaled| scaled.trunc().to_u128())
            .ok_or(TokenAmountError::Overflow { value, decimals })?;

        Ok(Self { raw, decimals })
    }

    pub fn raw(&self) -> u128 {
        self.raw
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Scales the raw amount by the token's precision.
    pub fn to_decimal(&self) -> Result<Decimal, TokenAmountError> {
        if u32::from(self.decimals) > MAX_SCALE {
            return Err(TokenAmountError::TooManyDecimals(self.decimals));
        }
        let out_of_range = TokenAmountError::OutOfRange {
            raw: self.raw,
            decimals: self.decimals,
        };
        let raw = i128::try_from(self.raw).map_err(|_| out_of_range)?;

        Decimal::try_from_i128_with_scale(raw, u32::from(self.decimals))
            .map(|d| d.normalize())
            .map_err(|_| TokenAmountError::OutOfRange {
                raw: self.raw,
                decimals: self.decimals,
            })
    }

    /// Adds two amounts of the same token. `None` on overflow or if the
    /// precisions differ.
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        if self.decimals != other.decimals {
            return None;
        }
        self.raw.checked_add(other.raw).map(|raw| Self {
            raw,
            decimals: self.decimals,
        })
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_decimal() {
            Ok(d) => write!(f, "{}", d),
            Err(_) => write!(f, "{}e-{}", self.raw, self.decimals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_by_token_precision() {
        let amount = TokenAmount::from_raw(9_000_000_000, 9);
        assert_eq!(amount.to_decimal().unwrap(), Decimal::new(9, 0));
        assert_eq!(amount.to_string(), "9");
    }

    #[test]
    fn keeps_fractional_units() {
        let amount = TokenAmount::from_raw(1_234_567_891, 9);
        assert_eq!(amount.to_decimal().unwrap(), Decimal::new(1_234_567_891, 9));
    }

    #[test]
    fn from_decimal_truncates_below_precision() {
        let amount = TokenAmount::from_decimal(Decimal::new(12_345, 4), 2).unwrap();
        assert_eq!(amount.raw(), 123);
    }

    #[test]
    fn from_decimal_rejects_negative_values() {
        let err = TokenAmount::from_decimal(Decimal::new(-1, 0), 9).unwrap_err();
        assert_eq!(err, TokenAmountError::Negative);
    }

    #[test]
    fn huge_raw_amount_is_out_of_range() {
        let amount = TokenAmount::from_raw(u128::MAX, 18);
        assert!(matches!(
            amount.to_decimal(),
            Err(TokenAmountError::OutOfRange { .. })
        ));
    }

    #[test]
    fn from_decimal_reports_the_overflowing_value() {
        let err = TokenAmount::from_decimal(Decimal::MAX, 18).unwrap_err();
        assert_eq!(
            err,
            TokenAmountError::Overflow {
                value: Decimal::MAX,
                decimals: 18
            }
        );
        assert!(err.to_string().contains(&Decimal::MAX.to_string()));
    }

    #[test]
    fn checked_add_requires_matching_precision() {
        let a = TokenAmount::from_raw(1, 9);
        assert_eq!(a.checked_add(&TokenAmount::from_raw(2, 9)), Some(TokenAmount::from_raw(3, 9)));
        assert_eq!(a.checked_add(&TokenAmount::from_raw(2, 18)), None);
    }
}
