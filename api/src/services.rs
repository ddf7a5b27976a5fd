//! The set of collaborators the dashboard is wired to.

use std::rc::Rc;

use crate::config::DashboardConfig;
use crate::price_caching::CachedPriceOracle;
use crate::price_providers::coin_gecko::CoinGecko;
use crate::price_providers::coin_paprika::CoinPaprika;
use crate::price_providers::fixed::FixedPrice;
use crate::price_providers::PriceProviderKind;
use crate::readers::AccountContext;
use crate::readers::BalanceReader;
use crate::readers::FarmPositionsReader;
use crate::readers::PriceOracle;
use crate::simulated::SimulatedChain;
use crate::transactions::TransactionExecutor;
use crate::wallet::WalletProvider;

/// Shared handles to every external collaborator. Cheap to clone.
#[derive(Clone)]
pub struct Services {
    pub account: Rc<dyn AccountContext>,
    pub balances: Rc<dyn BalanceReader>,
    pub farms: Rc<dyn FarmPositionsReader>,
    pub prices: Rc<dyn PriceOracle>,
    pub executor: Rc<dyn TransactionExecutor>,
    pub wallet: Rc<dyn WalletProvider>,
}

impl Services {
    /// Everything backed by one [`SimulatedChain`].
    pub fn simulated(config: &DashboardConfig) -> Self {
        Self::with_chain(Rc::new(SimulatedChain::demo(config.reward_token.clone())), config)
    }

    pub fn with_chain(chain: Rc<SimulatedChain>, config: &DashboardConfig) -> Self {
        Self {
            account: chain.clone(),
            balances: chain.clone(),
            farms: chain.clone(),
            prices: price_oracle(config),
            executor: chain.clone(),
            wallet: chain,
        }
    }

    /// An injected wallet provides the account and asset registration. Chain
    /// reads and harvests stay simulated but follow the wallet's account.
    pub fn with_injected_wallet<W>(wallet: Rc<W>, config: &DashboardConfig) -> Self
    where
        W: AccountContext + WalletProvider + 'static,
    {
        let chain = SimulatedChain::demo(config.reward_token.clone()).following(wallet.clone());
        Self {
            account: wallet.clone(),
            wallet,
            ..Self::with_chain(Rc::new(chain), config)
        }
    }

    #[cfg(feature = "web")]
    pub fn browser(config: &DashboardConfig) -> Self {
        Self::with_injected_wallet(Rc::new(crate::browser_wallet::BrowserWallet::new()), config)
    }
}

/// Builds the price oracle selected by `config`.
pub fn price_oracle(config: &DashboardConfig) -> Rc<dyn PriceOracle> {
    let symbol = config.reward_token.symbol.clone();
    let coin_id = config.price_coin_id.clone();
    let ttl = config.price_cache;

    match config.price_provider {
        PriceProviderKind::CoinGecko => {
            Rc::new(CachedPriceOracle::new(CoinGecko, ttl).with_coin(symbol, coin_id))
        }
        PriceProviderKind::CoinPaprika => {
            Rc::new(CachedPriceOracle::new(CoinPaprika, ttl).with_coin(symbol, coin_id))
        }
        PriceProviderKind::Fixed => {
            let price = config.fixed_price.unwrap_or_default();
            Rc::new(
                CachedPriceOracle::new(FixedPrice::single(price, config.fiat), ttl)
                    .with_coin(symbol, coin_id),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use futures::future::LocalBoxFuture;
    use rust_decimal::Decimal;

    use crate::farms::FarmId;
    use crate::fiat_currency::FiatCurrency;
    use crate::readers::Account;
    use crate::wallet::WalletError;
    use crate::wallet::WatchAsset;

    /// Stands in for an injected browser wallet with its own address.
    #[derive(Default)]
    struct InjectedWallet {
        account: RefCell<Option<Account>>,
    }

    impl AccountContext for InjectedWallet {
        fn account(&self) -> Option<Account> {
            self.account.borrow().clone()
        }
    }

    impl WalletProvider for InjectedWallet {
        fn connect(&self) -> LocalBoxFuture<'_, Result<Account, WalletError>> {
            Box::pin(async move {
                let account = Account::new("0x1111111111111111111111111111111111111111");
                *self.account.borrow_mut() = Some(account.clone());
                Ok(account)
            })
        }

        fn register_asset<'a>(
            &'a self,
            _asset: &'a WatchAsset,
        ) -> LocalBoxFuture<'a, Result<bool, WalletError>> {
            Box::pin(async { Ok(true) })
        }
    }

    #[tokio::test]
    async fn fixed_oracle_quotes_configured_price() {
        let mut config = DashboardConfig::default();
        config.price_provider = PriceProviderKind::Fixed;
        config.fixed_price = Some(Decimal::new(2, 0));
        config.fiat = FiatCurrency::EUR;

        let oracle = price_oracle(&config);
        let prices = oracle.price("HTO").await.unwrap();
        assert_eq!(prices.get(FiatCurrency::EUR).unwrap().value(), Decimal::new(2, 0));
    }

    #[tokio::test]
    async fn simulated_services_share_one_chain() {
        let config = DashboardConfig::default();
        let services = Services::simulated(&config);
        assert!(services.account.account().is_none());
        let account = services.wallet.connect().await.unwrap();
        assert_eq!(services.account.account(), Some(account));
    }

    #[tokio::test]
    async fn injected_wallet_account_sees_farms_and_harvests() {
        let config = DashboardConfig::default();
        let services = Services::with_injected_wallet(Rc::new(InjectedWallet::default()), &config);
        assert!(services.account.account().is_none());

        let account = services.wallet.connect().await.unwrap();
        assert_eq!(services.account.account(), Some(account.clone()));

        let summary = services.farms.positions_with_balance(&account).await.unwrap();
        assert!(!summary.is_empty());
        assert!(summary.collectible_count() > 0);

        services
            .executor
            .harvest(&config.masterchef, FarmId(1))
            .await
            .unwrap();
        let balance = services
            .balances
            .balance(&account, &config.reward_token.address)
            .await
            .unwrap();
        assert_eq!(balance.to_decimal().unwrap(), Decimal::from(14));
    }
}
