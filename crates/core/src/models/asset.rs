use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CoreError;
use crate::providers::traits::PriceProvider;

/// Marker that identifies a crypto pair on Yahoo Finance (e.g. "BTC-USD").
pub const CRYPTO_SUFFIX: &str = "-USD";

/// Round a money amount to whole cents (half away from zero).
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The category of a holding, derived from its ticker symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    /// Equities, ETFs and anything else that isn't a `-USD` pair
    Stock,
    /// Crypto pairs quoted against the dollar (BTC-USD, ETH-USD, ...)
    Crypto,
}

impl AssetType {
    /// Classify a symbol. Case-insensitive, never fails.
    #[must_use]
    pub fn classify(symbol: &str) -> Self {
        if symbol.to_uppercase().contains(CRYPTO_SUFFIX) {
            AssetType::Crypto
        } else {
            AssetType::Stock
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::Stock => write!(f, "Stock"),
            AssetType::Crypto => write!(f, "Crypto"),
        }
    }
}

/// On-disk shape of a single holding.
///
/// Field order here is the order written to `portfolio.json`.
/// `asset_type` is not stored; it is re-derived on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub symbol: String,
    pub quantity: f64,
    pub buy_price: f64,
}

/// One holding in the portfolio.
///
/// Fields are private so `asset_type` can only ever come from `symbol`.
/// Serializes through [`AssetRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AssetRecord", into = "AssetRecord")]
pub struct Asset {
    symbol: String,
    quantity: f64,
    buy_price: f64,
    asset_type: AssetType,
}

impl Asset {
    /// Create a holding. The symbol is trimmed and uppercased.
    pub fn new(symbol: impl Into<String>, quantity: f64, buy_price: f64) -> Self {
        let symbol = symbol.into().trim().to_uppercase();
        let asset_type = AssetType::classify(&symbol);
        Self {
            symbol,
            quantity,
            buy_price,
            asset_type,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn buy_price(&self) -> f64 {
        self.buy_price
    }

    pub fn asset_type(&self) -> AssetType {
        self.asset_type
    }

    /// Re-run the classification rule against the stored symbol.
    #[must_use]
    pub fn classify(&self) -> AssetType {
        AssetType::classify(&self.symbol)
    }

    /// Check the value invariants: non-empty symbol, finite and
    /// non-negative quantity and buy price.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.symbol.is_empty() {
            return Err(CoreError::ValidationError("symbol must not be empty".into()));
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "quantity for {} must be a non-negative number, got {}",
                self.symbol, self.quantity
            )));
        }
        if !self.buy_price.is_finite() || self.buy_price < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "buy price for {} must be a non-negative number, got {}",
                self.symbol, self.buy_price
            )));
        }
        Ok(())
    }

    /// Latest closing price, rounded to cents. One provider query per call.
    pub async fn current_price(&self, provider: &dyn PriceProvider) -> Result<f64, CoreError> {
        debug!(symbol = %self.symbol, provider = provider.name(), "fetching current price");
        let price = provider.get_price_for(self).await?;
        Ok(round_cents(price))
    }

    /// `quantity × current_price`, rounded to cents.
    pub async fn current_value(&self, provider: &dyn PriceProvider) -> Result<f64, CoreError> {
        let price = self.current_price(provider).await?;
        Ok(round_cents(self.quantity * price))
    }

    /// `(current_price − buy_price) × quantity`, rounded to cents.
    /// Positive is a gain, negative a loss.
    pub async fn profit_loss(&self, provider: &dyn PriceProvider) -> Result<f64, CoreError> {
        let price = self.current_price(provider).await?;
        Ok(round_cents((price - self.buy_price) * self.quantity))
    }

    pub fn to_record(&self) -> AssetRecord {
        AssetRecord {
            symbol: self.symbol.clone(),
            quantity: self.quantity,
            buy_price: self.buy_price,
        }
    }

    /// Rebuild a holding from its stored record, rejecting values that
    /// could never have been written by a valid portfolio.
    pub fn from_record(record: AssetRecord) -> Result<Self, CoreError> {
        let asset = Self::new(record.symbol, record.quantity, record.buy_price);
        asset
            .validate()
            .map_err(|e| CoreError::CorruptState(e.to_string()))?;
        Ok(asset)
    }
}

impl From<Asset> for AssetRecord {
    fn from(asset: Asset) -> Self {
        AssetRecord {
            symbol: asset.symbol,
            quantity: asset.quantity,
            buy_price: asset.buy_price,
        }
    }
}

impl TryFrom<AssetRecord> for Asset {
    type Error = CoreError;

    fn try_from(record: AssetRecord) -> Result<Self, Self::Error> {
        Asset::from_record(record)
    }
}
