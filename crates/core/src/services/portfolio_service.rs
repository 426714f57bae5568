use chrono::Utc;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::asset::{round_cents, Asset, AssetType};
use crate::models::breakdown::{Breakdown, BreakdownRow};
use crate::models::portfolio::Portfolio;
use crate::providers::traits::PriceProvider;

/// Values a portfolio against live prices.
///
/// Nothing is cached: every call goes back to the provider, once per
/// holding per figure requested.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Sum of every holding's current value.
    ///
    /// All-or-nothing: the first holding whose price can't be fetched
    /// aborts the whole total, and the error names that symbol.
    pub async fn total_value(
        &self,
        portfolio: &Portfolio,
        provider: &dyn PriceProvider,
    ) -> Result<f64, CoreError> {
        let mut total = 0.0;
        for asset in portfolio.holdings() {
            total += asset.current_value(provider).await?;
        }
        debug!(holdings = portfolio.len(), total, "computed total value");
        Ok(round_cents(total))
    }

    /// Sum of every holding's profit/loss. Same failure policy as
    /// [`total_value`](Self::total_value).
    pub async fn total_profit_loss(
        &self,
        portfolio: &Portfolio,
        provider: &dyn PriceProvider,
    ) -> Result<f64, CoreError> {
        let mut total = 0.0;
        for asset in portfolio.holdings() {
            total += asset.profit_loss(provider).await?;
        }
        debug!(holdings = portfolio.len(), total, "computed total profit/loss");
        Ok(round_cents(total))
    }

    /// Per-type report. A holding whose price lookup fails still gets a
    /// row, with price and profit/loss left empty; other rows are unaffected.
    pub async fn breakdown(
        &self,
        portfolio: &Portfolio,
        provider: &dyn PriceProvider,
    ) -> Breakdown {
        let generated_at = Utc::now();
        let mut stocks = Vec::new();
        for asset in portfolio.by_type(AssetType::Stock) {
            stocks.push(Self::breakdown_row(asset, provider).await);
        }
        let mut cryptos = Vec::new();
        for asset in portfolio.by_type(AssetType::Crypto) {
            cryptos.push(Self::breakdown_row(asset, provider).await);
        }

        Breakdown {
            generated_at,
            stocks,
            cryptos,
        }
    }

    /// Current price of any symbol, held or not.
    pub async fn quote(
        &self,
        symbol: &str,
        provider: &dyn PriceProvider,
    ) -> Result<f64, CoreError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(CoreError::ValidationError("symbol must not be empty".into()));
        }
        let price = provider.get_current_price(&symbol).await?;
        Ok(round_cents(price))
    }

    async fn breakdown_row(asset: &Asset, provider: &dyn PriceProvider) -> BreakdownRow {
        // Price and profit/loss are fetched separately, so a row can only be
        // complete if both lookups succeed.
        let priced = async {
            let price = asset.current_price(provider).await?;
            let profit_loss = asset.profit_loss(provider).await?;
            Ok::<_, CoreError>((price, profit_loss))
        }
        .await;

        let (current_price, profit_loss) = match priced {
            Ok((price, pl)) => (Some(price), Some(pl)),
            Err(e) => {
                warn!(symbol = asset.symbol(), error = %e, "price unavailable for breakdown row");
                (None, None)
            }
        };

        BreakdownRow {
            symbol: asset.symbol().to_string(),
            asset_type: asset.asset_type(),
            quantity: asset.quantity(),
            buy_price: asset.buy_price(),
            current_price,
            profit_loss,
        }
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
