use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::asset::AssetType;

/// Per-type report of the portfolio, one row per holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breakdown {
    /// When the prices in this report were fetched
    pub generated_at: DateTime<Utc>,

    /// Stock rows, in portfolio order
    pub stocks: Vec<BreakdownRow>,

    /// Crypto rows, in portfolio order
    pub cryptos: Vec<BreakdownRow>,
}

impl Breakdown {
    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty() && self.cryptos.is_empty()
    }

    /// Number of rows whose price could not be fetched.
    pub fn unavailable_count(&self) -> usize {
        self.rows().filter(|r| !r.is_available()).count()
    }

    /// Stocks first, then cryptos.
    pub fn rows(&self) -> impl Iterator<Item = &BreakdownRow> {
        self.stocks.iter().chain(self.cryptos.iter())
    }
}

/// A single holding's line in the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub symbol: String,

    pub asset_type: AssetType,

    pub quantity: f64,

    pub buy_price: f64,

    /// Latest close, or `None` when the provider had nothing for this symbol
    pub current_price: Option<f64>,

    /// Gain/loss at `current_price`; `None` whenever the price is
    pub profit_loss: Option<f64>,
}

impl BreakdownRow {
    pub fn is_available(&self) -> bool {
        self.current_price.is_some() && self.profit_loss.is_some()
    }
}
