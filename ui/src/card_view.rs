//! What the staking summary card shows, computed from one read of every
//! collaborator.

use api::config::DashboardConfig;
use api::farms::FarmsWithBalanceSummary;
use api::price_map::PriceMap;
use api::readers::Account;
use api::services::Services;
use api::token_amount::TokenAmount;
use rust_decimal::Decimal;

use crate::currency::fiat_estimate;
use crate::currency::format_estimate;
use crate::currency::format_token;

/// One consistent read of account, wallet balance, farms and price.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSnapshot {
    pub account: Option<Account>,
    pub wallet_balance: TokenAmount,
    pub summary: FarmsWithBalanceSummary,
    pub prices: Option<PriceMap>,
}

impl CardSnapshot {
    pub fn disconnected(decimals: u8) -> Self {
        Self {
            account: None,
            wallet_balance: TokenAmount::zero(decimals),
            summary: FarmsWithBalanceSummary::default(),
            prices: None,
        }
    }

    /// Reads everything the card needs. Reader failures are logged and fall
    /// back to empty values so the card still renders.
    pub async fn load(services: &Services, config: &DashboardConfig) -> Self {
        let token = &config.reward_token;
        let Some(account) = services.account.account() else {
            return Self::disconnected(token.decimals);
        };

        let (balance, summary, prices) = futures::join!(
            services.balances.balance(&account, &token.address),
            services.farms.positions_with_balance(&account),
            services.prices.price(&token.symbol),
        );

        let wallet_balance = balance.unwrap_or_else(|e| {
            dioxus_logger::tracing::warn!("could not read {} balance: {}", token.symbol, e);
            TokenAmount::zero(token.decimals)
        });
        let summary = summary.unwrap_or_else(|e| {
            dioxus_logger::tracing::warn!("could not read farm positions: {}", e);
            FarmsWithBalanceSummary::default()
        });
        let prices = prices
            .map_err(|e| dioxus_logger::tracing::warn!("could not quote {}: {}", token.symbol, e))
            .ok();

        Self {
            account: Some(account),
            wallet_balance,
            summary,
            prices,
        }
    }
}

/// The connected-state figures, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedCard {
    pub earnings: String,
    pub earnings_fiat: String,
    pub wallet: String,
    pub wallet_fiat: String,
    pub collectible_farms: usize,
    pub harvest_label: String,
    pub harvest_disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardView {
    /// Only the connect affordance is shown.
    Disconnected,
    Connected(ConnectedCard),
}

impl CardView {
    pub fn build(snapshot: &CardSnapshot, config: &DashboardConfig, pending_tx: bool) -> Self {
        if snapshot.account.is_none() {
            return Self::Disconnected;
        }

        let prices = snapshot.prices.as_ref();
        let earnings = snapshot.summary.earnings_sum();
        let wallet = snapshot.wallet_balance.to_decimal().unwrap_or_else(|e| {
            dioxus_logger::tracing::warn!("wallet balance not displayable: {}", e);
            Decimal::ZERO
        });
        let collectible_farms = snapshot.summary.collectible_count();

        let harvest_label = if pending_tx {
            format!("Collecting {}", config.reward_token.symbol)
        } else {
            format!("Harvest all ({})", collectible_farms)
        };

        Self::Connected(ConnectedCard {
            earnings: format_token(earnings),
            earnings_fiat: format_estimate(fiat_estimate(prices, earnings, config.fiat)),
            wallet: format_token(wallet),
            wallet_fiat: format_estimate(fiat_estimate(prices, wallet, config.fiat)),
            collectible_farms,
            harvest_label,
            harvest_disabled: collectible_farms == 0 || pending_tx,
        })
    }
}
