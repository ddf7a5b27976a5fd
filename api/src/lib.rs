//! This crate contains the dashboard's domain types and the external
//! collaborators (wallet, chain readers, price feeds) the UI talks to.

#[cfg(feature = "web")]
pub mod browser_wallet;
pub mod config;
pub mod farms;
pub mod fiat_amount;
pub mod fiat_currency;
pub mod notifications;
pub mod price_caching;
pub mod price_map;
pub mod price_providers;
pub mod readers;
pub mod services;
pub mod simulated;
pub mod token_amount;
pub mod transactions;
pub mod wallet;

pub type ApiError = anyhow::Error;
