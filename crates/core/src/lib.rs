pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::path::Path;
use tracing::info;

use errors::CoreError;
use models::{
    asset::Asset, breakdown::Breakdown, portfolio::Portfolio, settings::TrackerConfig,
};
use providers::traits::PriceProvider;
use services::portfolio_service::PortfolioService;
use storage::manager::StorageManager;

/// Main entry point for the Portfolio Tracker core library.
/// Holds the portfolio, where it lives on disk, and the price source used
/// to value it.
///
/// Every successful mutation is written to disk before returning, so the
/// in-memory holdings and the data file never disagree after a call.
#[must_use]
pub struct PortfolioTracker {
    portfolio: Portfolio,
    config: TrackerConfig,
    provider: Box<dyn PriceProvider>,
    portfolio_service: PortfolioService,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("holdings", &self.portfolio.len())
            .field("data_file", &self.config.data_file)
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl PortfolioTracker {
    /// Open the portfolio stored at `config.data_file`.
    /// Starts empty when the file doesn't exist yet.
    pub fn open(
        config: TrackerConfig,
        provider: Box<dyn PriceProvider>,
    ) -> Result<Self, CoreError> {
        let portfolio = StorageManager::load_from_file(&config.data_file)?.unwrap_or_default();
        Ok(Self::with_portfolio(config, portfolio, provider))
    }

    /// Build a tracker around an existing portfolio without touching disk.
    pub fn with_portfolio(
        config: TrackerConfig,
        portfolio: Portfolio,
        provider: Box<dyn PriceProvider>,
    ) -> Self {
        Self {
            portfolio,
            config,
            provider,
            portfolio_service: PortfolioService::new(),
        }
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Append a holding and persist the full list.
    /// If the save fails the holding is taken back out.
    pub fn add_asset(&mut self, asset: Asset) -> Result<(), CoreError> {
        asset.validate()?;
        let symbol = asset.symbol().to_string();
        self.portfolio.push(asset);
        if let Err(e) = self.save() {
            self.portfolio.pop();
            return Err(e);
        }
        info!(symbol = %symbol, holdings = self.portfolio.len(), "added asset");
        Ok(())
    }

    /// Remove the first holding matching `symbol` (case-insensitive) and
    /// persist. Returns `AssetNotFound` and leaves everything untouched when
    /// nothing matches.
    pub fn remove_asset(&mut self, symbol: &str) -> Result<Asset, CoreError> {
        let (idx, removed) = self
            .portfolio
            .remove_first(symbol)
            .ok_or_else(|| CoreError::AssetNotFound(symbol.trim().to_uppercase()))?;
        if let Err(e) = self.save() {
            self.portfolio.insert(idx, removed);
            return Err(e);
        }
        info!(symbol = removed.symbol(), holdings = self.portfolio.len(), "removed asset");
        Ok(removed)
    }

    /// All holdings in insertion order.
    #[must_use]
    pub fn holdings(&self) -> &[Asset] {
        self.portfolio.holdings()
    }

    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Total current value. Fails as a whole if any price is unavailable.
    pub async fn total_value(&self) -> Result<f64, CoreError> {
        self.portfolio_service
            .total_value(&self.portfolio, self.provider.as_ref())
            .await
    }

    /// Total profit/loss. Fails as a whole if any price is unavailable.
    pub async fn total_profit_loss(&self) -> Result<f64, CoreError> {
        self.portfolio_service
            .total_profit_loss(&self.portfolio, self.provider.as_ref())
            .await
    }

    /// Per-type report; unavailable prices are marked per row.
    pub async fn breakdown(&self) -> Breakdown {
        self.portfolio_service
            .breakdown(&self.portfolio, self.provider.as_ref())
            .await
    }

    /// Current price of any symbol, whether held or not.
    pub async fn current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        self.portfolio_service
            .quote(symbol, self.provider.as_ref())
            .await
    }

    /// Swap the price source, e.g. to go offline.
    pub fn set_provider(&mut self, provider: Box<dyn PriceProvider>) {
        self.provider = provider;
    }

    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Write the full holdings list to the data file.
    pub fn save(&self) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.portfolio, &self.config.data_file)
    }

    /// Replace the in-memory holdings with what's on disk.
    /// A missing file leaves the current holdings as they are.
    pub fn reload(&mut self) -> Result<(), CoreError> {
        if let Some(portfolio) = StorageManager::load_from_file(&self.config.data_file)? {
            self.portfolio = portfolio;
        }
        Ok(())
    }

    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.config.data_file
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}
