use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::settings::DEFAULT_REQUEST_TIMEOUT;
use super::traits::PriceProvider;

const PROVIDER_NAME: &str = "Yahoo Finance";

/// Yahoo Finance provider for stock and crypto prices.
///
/// - **Free**: No API key required.
/// - **Coverage**: Global equities, ETFs, indices and `XXX-USD` crypto pairs.
/// - **Data**: Daily bars; the last bar's close is the current price.
///
/// Uses the `yahoo_finance_api` crate which wraps Yahoo Finance's public
/// endpoints. Every request is bounded by `timeout`, since the upstream
/// client can otherwise wait indefinitely.
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
    timeout: Duration,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new()
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to create connector: {e}"),
            })?;
        Ok(Self { connector, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl PriceProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        let request = self.connector.get_latest_quotes(symbol, "1d");
        let resp = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| {
                warn!(symbol, timeout = ?self.timeout, "price request timed out");
                CoreError::PriceUnavailable {
                    symbol: symbol.to_string(),
                    reason: format!("request timed out after {}s", self.timeout.as_secs()),
                }
            })?
            .map_err(|e| CoreError::PriceUnavailable {
                symbol: symbol.to_string(),
                reason: format!("failed to fetch latest quote: {e}"),
            })?;

        let quote = resp.last_quote().map_err(|e| CoreError::PriceUnavailable {
            symbol: symbol.to_string(),
            reason: format!("no quote data: {e}"),
        })?;

        if !quote.close.is_finite() {
            return Err(CoreError::PriceUnavailable {
                symbol: symbol.to_string(),
                reason: "provider returned a non-numeric close".into(),
            });
        }

        debug!(symbol, close = quote.close, "received latest close");
        Ok(quote.close)
    }
}
