//! Provides a safe, self-contained type for representing fiat currency amounts.

use std::fmt;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crate::fiat_currency::FiatCurrency;

/// Represents a monetary value in a specific fiat currency.
///
/// Internally, the amount is stored as a signed 64-bit integer in the currency's
/// smallest unit (e.g., cents for USD) to prevent floating-point inaccuracies.
/// The default `Display` implementation formats this as a plain numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiatAmount {
    amount: i64,
    currency: FiatCurrency,
}

impl FiatAmount {
    pub fn currency(&self) -> FiatCurrency {
        self.currency
    }

    /// Returns the raw amount in the currency's smallest unit (e.g., cents).
    pub fn as_minor_units(&self) -> i64 {
        self.amount
    }

    /// Creates a new `FiatAmount` directly from its smallest unit.
    ///
    /// # Example
    /// ```ignore
    /// // 12345 cents represents $123.45
    /// let amount = FiatAmount::new_from_minor(12345, FiatCurrency::USD);
    /// assert_eq!(amount.to_string(), "123.45");
    /// ```
    pub fn new_from_minor(amount: i64, currency: FiatCurrency) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: FiatCurrency) -> Self {
        Self::new_from_minor(0, currency)
    }

    /// Creates a `FiatAmount` from an exact decimal value, rounding half away
    /// from zero to the currency's minor unit.
    ///
    /// Returns `None` if the value does not fit in `i64` minor units.
    pub fn new_from_decimal(value: Decimal, currency: FiatCurrency) -> Option<Self> {
        let decimals = u32::from(currency.decimals());
        let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
        let multiplier = Decimal::from(10_i64.pow(decimals));
        let amount = rounded.checked_mul(multiplier)?.to_i64()?;

        Some(Self { amount, currency })
    }

    /// Formats the amount with its currency symbol (e.g., "$25.34").
    pub fn to_string_with_symbol(&self) -> String {
        if self.amount < 0 {
            return format!("-{}{}", self.currency.symbol(), self.abs_string());
        }
        format!("{}{}", self.currency.symbol(), self)
    }

    /// Formats the amount with its currency code (e.g., "25.34 USD").
    pub fn to_string_with_code(&self) -> String {
        format!("{} {}", self, self.currency.code())
    }

    fn abs_string(&self) -> String {
        Self::new_from_minor(self.amount.saturating_abs(), self.currency).to_string()
    }
}

/// Formats the amount as a numeric string (e.g., "25.34").
impl fmt::Display for FiatAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimals = self.currency.decimals() as usize;

        if decimals == 0 {
            return write!(f, "{}", self.amount);
        }

        let divisor = 10_i64.pow(decimals as u32);
        let major_units = self.amount / divisor;
        let minor_units = self.amount.abs() % divisor;
        let sign = if self.amount < 0 && major_units == 0 { "-" } else { "" };

        write!(
            f,
            "{}{}.{:0width$}",
            sign,
            major_units,
            minor_units,
            width = decimals
        )
    }
}
