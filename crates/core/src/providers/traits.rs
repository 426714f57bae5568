use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::asset::Asset;

/// Trait abstraction for market data sources.
///
/// Holdings never talk to the network directly; every valuation takes a
/// `&dyn PriceProvider`, so tests and offline mode plug in their own
/// source instead of Yahoo Finance.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Most recent daily closing price for `symbol`.
    ///
    /// Fails with `CoreError::PriceUnavailable` when the source has no
    /// recent session for the symbol (unknown, delisted, malformed).
    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError>;

    /// Price used to value one specific holding.
    ///
    /// Market sources price by symbol, so every lot of a symbol gets the
    /// same answer. Sources that price per lot override this.
    async fn get_price_for(&self, asset: &Asset) -> Result<f64, CoreError> {
        self.get_current_price(asset.symbol()).await
    }
}
