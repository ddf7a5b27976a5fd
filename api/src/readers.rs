//! Read-side collaborators: who is connected, what they hold, what it is worth.
//!
//! All async methods return boxed local futures so the UI can hold each
//! collaborator as an `Rc<dyn Trait>`. Nothing here needs to be `Send`; the
//! dashboard runs on a single-threaded event loop.

use std::fmt;

use futures::future::LocalBoxFuture;
use serde::Deserialize;
use serde::Serialize;

use crate::farms::FarmPosition;
use crate::farms::FarmsWithBalanceSummary;
use crate::price_map::PriceMap;
use crate::token_amount::TokenAmount;
use crate::ApiError;

/// Identifier of a connected wallet account (an EVM address string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account(String);

impl Account {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x1234…abcd` form for headers and logs.
    pub fn abbreviated(&self) -> String {
        let s = self.0.as_str();
        if s.len() <= 12 || !s.is_ascii() {
            return s.to_string();
        }
        format!("{}…{}", &s[..6], &s[s.len() - 4..])
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exposes the currently connected account, if any.
pub trait AccountContext {
    fn account(&self) -> Option<Account>;
}

/// Reads token balances for an account.
pub trait BalanceReader {
    fn balance<'a>(
        &'a self,
        account: &'a Account,
        token_address: &'a str,
    ) -> LocalBoxFuture<'a, Result<TokenAmount, ApiError>>;
}

/// Reads the farms an account has staked in.
pub trait FarmPositionsReader {
    /// Every farm position the backend knows of for `account`.
    fn staked_positions<'a>(
        &'a self,
        account: &'a Account,
    ) -> LocalBoxFuture<'a, Result<Vec<FarmPosition>, ApiError>>;

    /// Positions with a nonzero stake plus their summed pending earnings.
    fn positions_with_balance<'a>(
        &'a self,
        account: &'a Account,
    ) -> LocalBoxFuture<'a, Result<FarmsWithBalanceSummary, ApiError>> {
        Box::pin(async move {
            let positions = self.staked_positions(account).await?;
            Ok(FarmsWithBalanceSummary::new(positions))
        })
    }
}

/// Quotes the fiat price of a token.
pub trait PriceOracle {
    fn price<'a>(&'a self, symbol: &'a str) -> LocalBoxFuture<'a, Result<PriceMap, ApiError>>;
}
