// ui/src/currency.rs
use api::fiat_amount::FiatAmount;
use api::fiat_currency::FiatCurrency;
use api::price_map::PriceMap;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Token amounts on the card are shown with this many decimal places.
const TOKEN_DISPLAY_DECIMALS: u32 = 3;

/// Formats a whole-token amount for display, e.g. `8.000`.
pub fn format_token(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(
        TOKEN_DISPLAY_DECIMALS,
        RoundingStrategy::MidpointAwayFromZero,
    );
    format!("{:.*}", TOKEN_DISPLAY_DECIMALS as usize, rounded)
}

/// Fiat value of `amount` tokens at the quoted price in `currency`.
///
/// A missing quote, or one that overflows, is valued at zero.
pub fn fiat_estimate(prices: Option<&PriceMap>, amount: Decimal, currency: FiatCurrency) -> FiatAmount {
    prices
        .and_then(|p| p.get(currency))
        .and_then(|price| price.estimate(amount))
        .unwrap_or_else(|| FiatAmount::zero(currency))
}

/// The approximate form shown under each amount, e.g. `~$16.00`.
pub fn format_estimate(fiat: FiatAmount) -> String {
    format!("~{}", fiat.to_string_with_symbol())
}
