//! Shared building blocks for the dashboard's screens.
pub mod amount;
pub mod connect_wallet_button;
pub mod pico;
pub mod staking_summary_card;
pub mod toast;
