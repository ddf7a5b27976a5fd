//! An in-memory chain that stands in for the wallet, the token and MasterChef
//! contracts, and the multicall readers.
//!
//! Harvesting moves a farm's pending rewards into the wallet balance, so the
//! dashboard behaves like the real thing without a node.

use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::HashSet;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use rust_decimal::Decimal;

use crate::config::RewardToken;
use crate::farms::FarmId;
use crate::farms::FarmPosition;
use crate::readers::Account;
use crate::readers::AccountContext;
use crate::readers::BalanceReader;
use crate::readers::FarmPositionsReader;
use crate::token_amount::TokenAmount;
use crate::transactions::ContractHandle;
use crate::transactions::HarvestCall;
use crate::transactions::TransactionExecutor;
use crate::transactions::TxError;
use crate::transactions::TxHash;
use crate::wallet::WalletProvider;
use crate::wallet::WalletError;
use crate::wallet::WatchAsset;
use crate::ApiError;

/// Staked LP tokens use the usual 18 decimals.
const LP_DECIMALS: u8 = 18;

#[derive(Debug, Clone)]
struct SimFarm {
    farm_id: FarmId,
    staked: TokenAmount,
    pending: TokenAmount,
}

#[derive(Debug, Default)]
struct ChainState {
    connected: Option<Account>,
    balances: HashMap<String, TokenAmount>,
    farms: Vec<SimFarm>,
    failing: HashSet<FarmId>,
    harvests: Vec<(String, HarvestCall)>,
    watched: Vec<WatchAsset>,
    nonce: u64,
}

pub struct SimulatedChain {
    reward_token: RewardToken,
    wallet_account: Account,
    /// When set, the chain serves whichever account this reports instead of
    /// its own wallet.
    account_source: Option<Rc<dyn AccountContext>>,
    state: RefCell<ChainState>,
}

impl SimulatedChain {
    pub fn new(reward_token: RewardToken, wallet_account: Account) -> Self {
        Self {
            reward_token,
            wallet_account,
            account_source: None,
            state: RefCell::new(ChainState::default()),
        }
    }

    /// A chain with a staking-pool position and two farms, the wallet not yet
    /// connected.
    pub fn demo(reward_token: RewardToken) -> Self {
        let decimals = reward_token.decimals;
        let whole = |n: i64| TokenAmount::from_decimal(Decimal::from(n), decimals).unwrap_or_default();
        let lp = |n: i64| TokenAmount::from_decimal(Decimal::from(n), LP_DECIMALS).unwrap_or_default();

        let token_address = reward_token.address.clone();
        Self::new(
            reward_token,
            Account::new("0x5B38Da6a701c568545dCfcB03FcB875f56beddC4"),
        )
        .with_balance(&token_address, whole(9))
        .with_farm(FarmId::STAKING_POOL, whole(250), TokenAmount::from_raw(1_250_000_000, decimals))
        .with_farm(FarmId(1), lp(40), whole(5))
        .with_farm(FarmId(2), lp(12), whole(3))
        .with_farm(FarmId(3), lp(0), whole(0))
    }

    pub fn with_balance(self, token_address: &str, amount: TokenAmount) -> Self {
        self.state
            .borrow_mut()
            .balances
            .insert(token_address.to_ascii_lowercase(), amount);
        self
    }

    pub fn with_farm(self, farm_id: FarmId, staked: TokenAmount, pending: TokenAmount) -> Self {
        self.state.borrow_mut().farms.push(SimFarm {
            farm_id,
            staked,
            pending,
        });
        self
    }

    /// Makes every harvest of `farm_id` revert.
    pub fn with_failing_harvest(self, farm_id: FarmId) -> Self {
        self.state.borrow_mut().failing.insert(farm_id);
        self
    }

    /// Serves the account reported by `source`, e.g. an injected browser wallet.
    pub fn following(mut self, source: Rc<dyn AccountContext>) -> Self {
        self.account_source = Some(source);
        self
    }

    pub fn connected(self) -> Self {
        self.state.borrow_mut().connected = Some(self.wallet_account.clone());
        self
    }

    /// Contract address and call of every successful harvest, in order.
    pub fn harvests(&self) -> Vec<(String, HarvestCall)> {
        self.state.borrow().harvests.clone()
    }

    pub fn watched_assets(&self) -> Vec<WatchAsset> {
        self.state.borrow().watched.clone()
    }

    fn current_account(&self) -> Option<Account> {
        match &self.account_source {
            Some(source) => source.account(),
            None => self.state.borrow().connected.clone(),
        }
    }

    /// Whether `account` owns the simulated balances and farms.
    fn is_holder(&self, account: &Account) -> bool {
        match &self.account_source {
            Some(source) => source
                .account()
                .is_some_and(|current| current.as_str().eq_ignore_ascii_case(account.as_str())),
            None => *account == self.wallet_account,
        }
    }

    fn reward_balance_key(&self) -> String {
        self.reward_token.address.to_ascii_lowercase()
    }

    fn submit_harvest(&self, contract: &ContractHandle, farm_id: FarmId) -> Result<TxHash, TxError> {
        if self.current_account().is_none() {
            return Err(TxError::Submission("no account connected".to_string()));
        }
        let mut state = self.state.borrow_mut();
        if state.failing.contains(&farm_id) {
            return Err(TxError::Reverted("execution reverted".to_string()));
        }

        let farm = state
            .farms
            .iter_mut()
            .find(|f| f.farm_id == farm_id)
            .ok_or_else(|| TxError::Reverted(format!("unknown pool {}", farm_id)))?;
        let pending = std::mem::replace(&mut farm.pending, TokenAmount::zero(self.reward_token.decimals));

        let key = self.reward_balance_key();
        let balance = state
            .balances
            .get(&key)
            .copied()
            .unwrap_or(TokenAmount::zero(self.reward_token.decimals));
        let credited = balance
            .checked_add(&pending)
            .ok_or_else(|| TxError::Reverted("balance overflow".to_string()))?;
        state.balances.insert(key, credited);

        let call = HarvestCall::for_farm(farm_id);
        state.harvests.push((contract.address().to_string(), call));
        state.nonce += 1;
        Ok(TxHash::new(format!("0x{:064x}", state.nonce)))
    }
}

impl AccountContext for SimulatedChain {
    fn account(&self) -> Option<Account> {
        self.current_account()
    }
}

impl BalanceReader for SimulatedChain {
    fn balance<'a>(
        &'a self,
        account: &'a Account,
        token_address: &'a str,
    ) -> LocalBoxFuture<'a, Result<TokenAmount, ApiError>> {
        Box::pin(async move {
            if !self.is_holder(account) {
                return Ok(TokenAmount::zero(self.reward_token.decimals));
            }
            let state = self.state.borrow();
            state
                .balances
                .get(&token_address.to_ascii_lowercase())
                .copied()
                .ok_or_else(|| anyhow::anyhow!("unknown token {}", token_address))
        })
    }
}

impl FarmPositionsReader for SimulatedChain {
    fn staked_positions<'a>(
        &'a self,
        account: &'a Account,
    ) -> LocalBoxFuture<'a, Result<Vec<FarmPosition>, ApiError>> {
        Box::pin(async move {
            if !self.is_holder(account) {
                return Ok(Vec::new());
            }
            let state = self.state.borrow();
            state
                .farms
                .iter()
                .map(|f| -> Result<FarmPosition, ApiError> {
                    Ok(FarmPosition::new(
                        f.farm_id,
                        f.staked.to_decimal()?,
                        f.pending.to_decimal()?,
                    ))
                })
                .collect()
        })
    }
}

impl TransactionExecutor for SimulatedChain {
    fn harvest<'a>(
        &'a self,
        contract: &'a ContractHandle,
        farm_id: FarmId,
    ) -> LocalBoxFuture<'a, Result<TxHash, TxError>> {
        Box::pin(async move { self.submit_harvest(contract, farm_id) })
    }
}

impl WalletProvider for SimulatedChain {
    fn connect(&self) -> LocalBoxFuture<'_, Result<Account, WalletError>> {
        Box::pin(async move {
            let account = self.wallet_account.clone();
            self.state.borrow_mut().connected = Some(account.clone());
            Ok(account)
        })
    }

    fn register_asset<'a>(
        &'a self,
        asset: &'a WatchAsset,
    ) -> LocalBoxFuture<'a, Result<bool, WalletError>> {
        Box::pin(async move {
            self.state.borrow_mut().watched.push(asset.clone());
            Ok(true)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    fn chain() -> SimulatedChain {
        SimulatedChain::demo(DashboardConfig::default().reward_token)
    }

    #[tokio::test]
    async fn starts_disconnected_until_connect() {
        let chain = chain();
        assert_eq!(chain.account(), None);
        let account = chain.connect().await.unwrap();
        assert_eq!(chain.account(), Some(account));
    }

    #[tokio::test]
    async fn demo_positions_skip_empty_farms() {
        let chain = chain().connected();
        let account = chain.account().unwrap();
        let summary = chain.positions_with_balance(&account).await.unwrap();
        let ids: Vec<FarmId> = summary.positions().iter().map(|p| p.farm_id).collect();
        assert_eq!(ids, vec![FarmId(0), FarmId(1), FarmId(2)]);
        assert_eq!(summary.earnings_sum(), Decimal::new(925, 2));
        assert_eq!(summary.collectible_count(), 2);
    }

    #[tokio::test]
    async fn harvest_credits_wallet_and_clears_pending() {
        let chain = chain().connected();
        let account = chain.account().unwrap();
        let token = DashboardConfig::default().reward_token.address;
        let masterchef = ContractHandle::new("0xchef");

        chain.harvest(&masterchef, FarmId(1)).await.unwrap();

        let balance = chain.balance(&account, &token).await.unwrap();
        assert_eq!(balance.to_decimal().unwrap(), Decimal::from(14));
        let summary = chain.positions_with_balance(&account).await.unwrap();
        assert_eq!(summary.earnings_sum(), Decimal::new(425, 2));
        assert_eq!(
            chain.harvests(),
            vec![("0xchef".to_string(), HarvestCall::Deposit { farm_id: FarmId(1), amount: 0 })]
        );
    }

    #[tokio::test]
    async fn scripted_failures_revert() {
        let chain = chain().connected().with_failing_harvest(FarmId(2));
        let err = chain
            .harvest(&ContractHandle::new("0xchef"), FarmId(2))
            .await
            .unwrap_err();
        assert!(matches!(err, TxError::Reverted(_)));
        assert!(chain.harvests().is_empty());
    }

    #[tokio::test]
    async fn harvest_requires_a_connected_wallet() {
        let chain = chain();
        let err = chain
            .harvest(&ContractHandle::new("0xchef"), FarmId(1))
            .await
            .unwrap_err();
        assert!(matches!(err, TxError::Submission(_)));
    }

    struct InjectedAccount(RefCell<Option<Account>>);

    impl AccountContext for InjectedAccount {
        fn account(&self) -> Option<Account> {
            self.0.borrow().clone()
        }
    }

    #[tokio::test]
    async fn following_chain_serves_the_injected_account() {
        let injected = Rc::new(InjectedAccount(RefCell::new(None)));
        let chain = chain().following(injected.clone());
        let masterchef = ContractHandle::new("0xchef");

        assert_eq!(chain.account(), None);
        assert!(matches!(
            chain.harvest(&masterchef, FarmId(1)).await,
            Err(TxError::Submission(_))
        ));

        let account = Account::new("0xAbCdEf0000000000000000000000000000001111");
        *injected.0.borrow_mut() = Some(account.clone());
        assert_eq!(chain.account(), Some(account.clone()));

        let summary = chain.positions_with_balance(&account).await.unwrap();
        assert_eq!(summary.positions().len(), 3);
        chain.harvest(&masterchef, FarmId(1)).await.unwrap();

        let token = DashboardConfig::default().reward_token.address;
        let balance = chain.balance(&account, &token).await.unwrap();
        assert_eq!(balance.to_decimal().unwrap(), Decimal::from(14));

        let lowercase = Account::new(account.as_str().to_ascii_lowercase());
        assert_eq!(
            chain.positions_with_balance(&lowercase).await.unwrap(),
            chain.positions_with_balance(&account).await.unwrap()
        );

        let stranger = Account::new("0x2222222222222222222222222222222222222222");
        assert!(chain.positions_with_balance(&stranger).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn registers_watched_assets() {
        let chain = chain();
        let asset = DashboardConfig::default().reward_token.watch_asset();
        assert!(chain.register_asset(&asset).await.unwrap());
        assert_eq!(chain.watched_assets(), vec![asset]);
    }
}
