//! Defines the fiat currencies the dashboard can estimate values in.

use serde::Deserialize;
use serde::Serialize;

/// A fiat currency, with its code, symbol, and formatting rules.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Default,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum FiatCurrency {
    AUD,
    BRL,
    CAD,
    CHF,
    CNY,
    EUR,
    GBP,
    INR,
    JPY,
    KRW,
    KWD,
    #[default]
    USD,
    VND,
}

impl FiatCurrency {
    /// Number of decimal digits used by the currency's minor unit.
    ///
    /// USD uses 2 (cents), JPY uses 0, KWD uses 3.
    pub fn decimals(&self) -> u8 {
        match self {
            Self::JPY | Self::KRW | Self::VND => 0,
            Self::KWD => 3,
            _ => 2,
        }
    }

    /// The graphical symbol for the currency (e.g., '$').
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::AUD => "A$",
            Self::BRL => "R$",
            Self::CAD => "C$",
            Self::CHF => "CHF",
            Self::CNY => "¥",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::INR => "₹",
            Self::JPY => "¥",
            Self::KRW => "₩",
            Self::KWD => "د.ك",
            Self::USD => "$",
            Self::VND => "₫",
        }
    }

    /// ISO 4217 code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        self.into()
    }

    /// Lower-case code, as price APIs expect in query strings.
    pub fn api_code(&self) -> String {
        self.code().to_ascii_lowercase()
    }
}
