use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::asset::Asset;
use super::traits::PriceProvider;

/// Values every holding at its own buy price.
///
/// Backs the CLI's offline mode: each lot is priced independently, so
/// two lots of the same symbol bought at different prices both show a
/// zero gain. Bare symbol lookups have nothing to go on and are
/// `PriceUnavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookValueProvider;

impl BookValueProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PriceProvider for BookValueProvider {
    fn name(&self) -> &str {
        "Book value"
    }

    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        Err(CoreError::PriceUnavailable {
            symbol: symbol.to_string(),
            reason: "no market data in offline mode".into(),
        })
    }

    async fn get_price_for(&self, asset: &Asset) -> Result<f64, CoreError> {
        Ok(asset.buy_price())
    }
}
