use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::CoreError;
use super::traits::PriceProvider;

/// Fixed symbol → price table.
///
/// Stands in for the network in tests and scripted sessions.
/// Lookups are case-insensitive; unknown symbols are `PriceUnavailable`.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceProvider {
    prices: HashMap<String, f64>,
}

impl StaticPriceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.set_price(symbol, price);
        self
    }

    pub fn set_price(&mut self, symbol: &str, price: f64) {
        self.prices.insert(symbol.trim().to_uppercase(), price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[async_trait]
impl PriceProvider for StaticPriceProvider {
    fn name(&self) -> &str {
        "Static"
    }

    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        self.prices
            .get(&symbol.trim().to_uppercase())
            .copied()
            .ok_or_else(|| CoreError::PriceUnavailable {
                symbol: symbol.to_string(),
                reason: "no price recorded".into(),
            })
    }
}
