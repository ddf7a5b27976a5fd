//! The user's wallet: connecting, and registering the reward token as an asset.

use futures::future::LocalBoxFuture;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::readers::Account;

/// Errors reported by the wallet provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// No injected wallet was found.
    #[error("no wallet provider available")]
    NoProvider,

    /// The user dismissed the wallet prompt.
    #[error("request rejected by the user: {0}")]
    Rejected(String),

    /// Any other provider failure.
    #[error("wallet provider error: {0}")]
    Provider(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AssetStandard {
    #[default]
    #[serde(rename = "ERC20")]
    Erc20,
}

impl AssetStandard {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Erc20 => "ERC20",
        }
    }
}

/// A token the wallet should show in its asset list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchAsset {
    pub standard: AssetStandard,
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    pub icon_url: String,
}

/// The wallet the user connects with.
pub trait WalletProvider {
    /// Asks the wallet for an account, prompting the user if needed.
    fn connect(&self) -> LocalBoxFuture<'_, Result<Account, WalletError>>;

    /// Asks the wallet to track `asset`. `Ok(false)` means the user declined.
    fn register_asset<'a>(
        &'a self,
        asset: &'a WatchAsset,
    ) -> LocalBoxFuture<'a, Result<bool, WalletError>>;
}

/// Registers `asset` without letting the outcome reach the UI.
///
/// Asset registration is best-effort: the result never changes what the
/// dashboard shows, and a failure is only logged.
pub async fn register_asset_best_effort(wallet: &dyn WalletProvider, asset: &WatchAsset) {
    match wallet.register_asset(asset).await {
        Ok(true) => {
            dioxus_logger::tracing::info!("wallet is now tracking {} ({})", asset.symbol, asset.address)
        }
        Ok(false) => dioxus_logger::tracing::info!("user declined to track {}", asset.symbol),
        Err(e) => dioxus_logger::tracing::warn!("could not register {} with wallet: {}", asset.symbol, e),
    }
}
