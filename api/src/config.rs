//! Dashboard configuration, read from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use crate::fiat_currency::FiatCurrency;
use crate::price_providers::PriceProviderKind;
use crate::transactions::ContractHandle;
use crate::wallet::AssetStandard;
use crate::wallet::WatchAsset;

/// The token farms pay out in.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RewardToken {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    pub icon_url: String,
}

impl RewardToken {
    /// The asset the "add to wallet" control registers.
    pub fn watch_asset(&self) -> WatchAsset {
        WatchAsset {
            standard: AssetStandard::Erc20,
            address: self.address.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
            icon_url: self.icon_url.clone(),
        }
    }
}

/// Everything the dashboard needs to know about its deployment.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub title: String,
    pub reward_token: RewardToken,
    pub masterchef: ContractHandle,
    /// Where "Buy <token>" links to.
    pub buy_url: String,
    /// Currency fiat estimates are shown in.
    pub fiat: FiatCurrency,
    pub price_provider: PriceProviderKind,
    /// The reward token's id at the price provider.
    pub price_coin_id: String,
    /// Price used by [`PriceProviderKind::Fixed`].
    pub fixed_price: Option<Decimal>,
    /// How often account, balances and farms are re-read.
    pub fast_refresh: Duration,
    /// How long a price quote is reused.
    pub price_cache: Duration,
}

impl DashboardConfig {
    const DEFAULT_TITLE: &'static str = "HitroSwap";
    const DEFAULT_TOKEN_ADDRESS: &'static str = "0xE73200C08559662DAfCA79af982C24b97BcD68D9";
    const DEFAULT_TOKEN_SYMBOL: &'static str = "HTO";
    const DEFAULT_TOKEN_DECIMALS: u8 = 9;
    const DEFAULT_TOKEN_ICON: &'static str = "https://hitroswap.finance/images/token.png";
    const DEFAULT_MASTERCHEF: &'static str = "0x73feaa1eE314F8c655E354234017bE2193C9E24E";
    const DEFAULT_BUY_URL: &'static str = "/swap";
    const DEFAULT_COIN_ID: &'static str = "hitroswap";
    const DEFAULT_FAST_REFRESH_SECS: u64 = 10;
    const DEFAULT_PRICE_CACHE_SECS: u64 = 60;

    /// Creates a config from environment variables, falling back to in-code
    /// defaults for anything unset or unparsable.
    ///
    /// # Environment Variables
    /// - `DASHBOARD_TITLE`
    /// - `REWARD_TOKEN_ADDRESS`, `REWARD_TOKEN_SYMBOL`, `REWARD_TOKEN_DECIMALS`,
    ///   `REWARD_TOKEN_ICON_URL`
    /// - `MASTERCHEF_ADDRESS`
    /// - `BUY_TOKEN_URL`
    /// - `FIAT_CURRENCY`: "USD", "EUR", ...
    /// - `PRICE_PROVIDER`: "coingecko", "coinpaprika" or "fixed".
    /// - `PRICE_COIN_ID`: the token's id at the provider.
    /// - `REWARD_TOKEN_PRICE`: if set, forces the fixed provider at this price.
    /// - `FAST_REFRESH_SECS`, `PRICE_CACHE_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let string_or = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        let decimals = lookup("REWARD_TOKEN_DECIMALS")
            .and_then(|v| v.trim().parse::<u8>().ok())
            .filter(|d| *d <= 28)
            .unwrap_or(Self::DEFAULT_TOKEN_DECIMALS);

        let fiat = lookup("FIAT_CURRENCY")
            .and_then(|s| FiatCurrency::from_str(s.trim()).ok())
            .unwrap_or_default();

        let fixed_price = lookup("REWARD_TOKEN_PRICE")
            .and_then(|s| Decimal::from_str(s.trim()).ok())
            .filter(|p| !p.is_sign_negative());

        let price_provider = if fixed_price.is_some() {
            PriceProviderKind::Fixed
        } else {
            lookup("PRICE_PROVIDER")
                .and_then(|s| PriceProviderKind::from_str(s.trim()).ok())
                .unwrap_or_default()
        };

        Self {
            title: string_or("DASHBOARD_TITLE", Self::DEFAULT_TITLE),
            reward_token: RewardToken {
                address: string_or("REWARD_TOKEN_ADDRESS", Self::DEFAULT_TOKEN_ADDRESS),
                symbol: string_or("REWARD_TOKEN_SYMBOL", Self::DEFAULT_TOKEN_SYMBOL),
                decimals,
                icon_url: string_or("REWARD_TOKEN_ICON_URL", Self::DEFAULT_TOKEN_ICON),
            },
            masterchef: ContractHandle::new(string_or("MASTERCHEF_ADDRESS", Self::DEFAULT_MASTERCHEF)),
            buy_url: string_or("BUY_TOKEN_URL", Self::DEFAULT_BUY_URL),
            fiat,
            price_provider,
            price_coin_id: string_or("PRICE_COIN_ID", Self::DEFAULT_COIN_ID),
            fixed_price,
            fast_refresh: Duration::from_secs(
                parsed("FAST_REFRESH_SECS")
                    .filter(|s| *s > 0)
                    .unwrap_or(Self::DEFAULT_FAST_REFRESH_SECS),
            ),
            price_cache: Duration::from_secs(
                parsed("PRICE_CACHE_SECS").unwrap_or(Self::DEFAULT_PRICE_CACHE_SECS),
            ),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> DashboardConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_describe_the_reward_token() {
        let config = DashboardConfig::default();
        assert_eq!(config.reward_token.symbol, "HTO");
        assert_eq!(config.reward_token.decimals, 9);
        assert_eq!(config.reward_token.address, "0xE73200C08559662DAfCA79af982C24b97BcD68D9");
        assert_eq!(config.fiat, FiatCurrency::USD);
        assert_eq!(config.price_provider, PriceProviderKind::CoinGecko);
        assert_eq!(config.fast_refresh, Duration::from_secs(10));
        assert_eq!(config.price_cache, Duration::from_secs(60));
        assert_eq!(config.buy_url, "/swap");
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_with(&[
            ("REWARD_TOKEN_SYMBOL", "CAKE"),
            ("REWARD_TOKEN_DECIMALS", "18"),
            ("FIAT_CURRENCY", "eur"),
            ("PRICE_PROVIDER", "coinpaprika"),
            ("FAST_REFRESH_SECS", "3"),
        ]);
        assert_eq!(config.reward_token.symbol, "CAKE");
        assert_eq!(config.reward_token.decimals, 18);
        assert_eq!(config.fiat, FiatCurrency::EUR);
        assert_eq!(config.price_provider, PriceProviderKind::CoinPaprika);
        assert_eq!(config.fast_refresh, Duration::from_secs(3));
    }

    #[test]
    fn fixed_price_forces_fixed_provider() {
        let config = config_with(&[("REWARD_TOKEN_PRICE", "1.5"), ("PRICE_PROVIDER", "coingecko")]);
        assert_eq!(config.price_provider, PriceProviderKind::Fixed);
        assert_eq!(config.fixed_price, Some(Decimal::new(15, 1)));
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = config_with(&[
            ("REWARD_TOKEN_DECIMALS", "99"),
            ("FIAT_CURRENCY", "zzz"),
            ("FAST_REFRESH_SECS", "0"),
            ("REWARD_TOKEN_PRICE", "-2"),
            ("DASHBOARD_TITLE", "   "),
        ]);
        assert_eq!(config.reward_token.decimals, 9);
        assert_eq!(config.fiat, FiatCurrency::USD);
        assert_eq!(config.fast_refresh, Duration::from_secs(10));
        assert_eq!(config.fixed_price, None);
        assert_eq!(config.title, "HitroSwap");
    }

    #[test]
    fn watch_asset_carries_the_token_triple() {
        let asset = DashboardConfig::default().reward_token.watch_asset();
        assert_eq!(asset.standard, AssetStandard::Erc20);
        assert_eq!(asset.symbol, "HTO");
        assert_eq!(asset.decimals, 9);
    }
}
