//! Provides a specialized map for storing token prices against various fiat currencies.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use crate::fiat_amount::FiatAmount;
use crate::fiat_currency::FiatCurrency;

/// The price of one whole token in a single fiat currency.
///
/// Token prices routinely go below one cent, so unlike [`FiatAmount`] the
/// price keeps its full decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPrice {
    value: Decimal,
    currency: FiatCurrency,
}

impl TokenPrice {
    pub fn new(value: Decimal, currency: FiatCurrency) -> Self {
        Self { value, currency }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn currency(&self) -> FiatCurrency {
        self.currency
    }

    /// Fiat value of `amount` whole tokens, rounded to the currency's minor unit.
    pub fn estimate(&self, amount: Decimal) -> Option<FiatAmount> {
        let value = amount.checked_mul(self.value)?;
        FiatAmount::new_from_decimal(value, self.currency)
    }
}

/// A map holding the price of one token in various fiat currencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceMap(HashMap<FiatCurrency, Decimal>);

impl PriceMap {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Inserts or updates the price for its currency, returning the old price.
    pub fn insert(&mut self, price: TokenPrice) -> Option<TokenPrice> {
        let currency = price.currency();
        self.0
            .insert(currency, price.value())
            .map(|old| TokenPrice::new(old, currency))
    }

    /// The price in `currency`, if the provider quoted it.
    pub fn get(&self, currency: FiatCurrency) -> Option<TokenPrice> {
        self.0
            .get(&currency)
            .map(|&value| TokenPrice::new(value, currency))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
