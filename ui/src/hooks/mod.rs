pub mod use_refresh_ticker;
