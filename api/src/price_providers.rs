//! Defines traits and implementations for external price data providers.

use std::collections::HashMap;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::fiat_currency::FiatCurrency;
use crate::price_map::PriceMap;
use crate::price_map::TokenPrice;
use crate::ApiError;

/// Which price provider the oracle should query.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum PriceProviderKind {
    #[default]
    CoinGecko,
    CoinPaprika,
    Fixed,
}

/// A trait for any service that can provide fiat prices for a token.
#[allow(async_fn_in_trait)]
pub trait PriceProvider {
    /// Fetches the latest price map for `coin_id`.
    async fn get_prices(&self, coin_id: &str) -> Result<PriceMap, ApiError>;
}

fn insert_price(price_map: &mut PriceMap, price: f64, currency: FiatCurrency) {
    match Decimal::from_f64(price) {
        Some(value) => {
            price_map.insert(TokenPrice::new(value, currency));
        }
        None => dioxus_logger::tracing::warn!("ignoring unrepresentable {} price {}", currency.code(), price),
    }
}

/// Provides price data from the public CoinGecko API.
pub mod coin_gecko {
    use super::*;

    /// `{ "<coin id>": { "usd": 1.23, "eur": 1.1 } }`
    type CoinGeckoResponse = HashMap<String, HashMap<String, f64>>;

    pub struct CoinGecko;

    impl PriceProvider for CoinGecko {
        async fn get_prices(&self, coin_id: &str) -> Result<PriceMap, ApiError> {
            let vs_currencies = FiatCurrency::iter()
                .map(|c| c.api_code())
                .collect::<Vec<_>>()
                .join(",");
            let url = format!(
                "https://api.coingecko.com/api/v3/simple/price?ids={}&vs_currencies={}",
                coin_id, vs_currencies
            );

            let resp = reqwest::Client::new()
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .json::<CoinGeckoResponse>()
                .await?;

            let quotes = resp
                .get(coin_id)
                .ok_or_else(|| anyhow::anyhow!("CoinGecko has no quotes for {}", coin_id))?;

            let mut price_map = PriceMap::new();
            for currency in FiatCurrency::iter() {
                if let Some(price) = quotes.get(&currency.api_code()) {
                    insert_price(&mut price_map, *price, currency);
                }
            }
            Ok(price_map)
        }
    }
}

/// Provides price data from the CoinPaprika API.
pub mod coin_paprika {
    use super::*;
    use serde_json::Value;

    pub struct CoinPaprika;

    /// Extracts `resp["quotes"][code]["price"]`.
    pub(crate) fn quoted_price(resp: &Value, code: &str) -> Option<f64> {
        resp.get("quotes")?.get(code)?.get("price")?.as_f64()
    }

    impl PriceProvider for CoinPaprika {
        async fn get_prices(&self, coin_id: &str) -> Result<PriceMap, ApiError> {
            let quotes = FiatCurrency::iter()
                .map(|c| c.code())
                .collect::<Vec<_>>()
                .join(",");
            let url = format!(
                "https://api.coinpaprika.com/v1/tickers/{}?quotes={}",
                coin_id, quotes
            );

            let resp: Value = reqwest::Client::new()
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .json::<Value>()
                .await?;

            let mut price_map = PriceMap::new();
            for currency in FiatCurrency::iter() {
                if let Some(price) = quoted_price(&resp, currency.code()) {
                    insert_price(&mut price_map, price, currency);
                }
            }
            Ok(price_map)
        }
    }
}

/// A provider that always quotes the same price. Used when the reward token has
/// no public listing, and in tests.
pub mod fixed {
    use super::*;

    pub struct FixedPrice(pub PriceMap);

    impl FixedPrice {
        pub fn single(value: Decimal, currency: FiatCurrency) -> Self {
            let mut map = PriceMap::new();
            map.insert(TokenPrice::new(value, currency));
            Self(map)
        }
    }

    impl PriceProvider for FixedPrice {
        async fn get_prices(&self, _coin_id: &str) -> Result<PriceMap, ApiError> {
            Ok(self.0.clone())
        }
    }
}
