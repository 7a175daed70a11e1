use serde::{Deserialize, Serialize};

/// Asset class of a tradable instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetClass {
    Equity,
    Future,
    Forex,
    Crypto,
}

/// Instrument metadata passed to cost computations.
///
/// The cost subsystem treats instruments as opaque except for the fields
/// a fee schedule can key on (asset class, currency).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub currency: String,
    pub asset_class: AssetClass,
}

impl Instrument {
    pub fn new(
        symbol: impl Into<String>,
        currency: impl Into<String>,
        asset_class: AssetClass,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            currency: currency.into(),
            asset_class,
        }
    }

    /// USD-denominated equity, the common case in tests and demos.
    pub fn equity(symbol: impl Into<String>) -> Self {
        Self::new(symbol, "USD", AssetClass::Equity)
    }
}
