use serde::{Deserialize, Serialize};

use super::asset::{Asset, AssetType};

/// The main data container: an ordered list of holdings.
///
/// Serializes as a bare JSON array of asset records, which is exactly what
/// ends up in `portfolio.json`. Duplicate symbols are allowed and never
/// merged; each entry behaves like a separate lot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio {
    holdings: Vec<Asset>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_holdings(holdings: Vec<Asset>) -> Self {
        Self { holdings }
    }

    /// All holdings in insertion order.
    pub fn holdings(&self) -> &[Asset] {
        &self.holdings
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Append a holding at the end.
    pub fn push(&mut self, asset: Asset) {
        self.holdings.push(asset);
    }

    /// Drop the last holding. Used to undo a `push` whose save failed.
    pub(crate) fn pop(&mut self) -> Option<Asset> {
        self.holdings.pop()
    }

    /// Put a holding back at `index`. Used to undo a `remove_first`.
    pub(crate) fn insert(&mut self, index: usize, asset: Asset) {
        let index = index.min(self.holdings.len());
        self.holdings.insert(index, asset);
    }

    /// Position of the first holding whose symbol matches (case-insensitive).
    pub fn position(&self, symbol: &str) -> Option<usize> {
        let wanted = symbol.trim().to_uppercase();
        self.holdings.iter().position(|a| a.symbol() == wanted)
    }

    /// Remove the first holding matching `symbol`, returning it with its
    /// former index. Later duplicates are left alone.
    pub fn remove_first(&mut self, symbol: &str) -> Option<(usize, Asset)> {
        let idx = self.position(symbol)?;
        Some((idx, self.holdings.remove(idx)))
    }

    /// Holdings of one type, in their original relative order.
    pub fn by_type(&self, asset_type: AssetType) -> Vec<&Asset> {
        self.holdings
            .iter()
            .filter(|a| a.asset_type() == asset_type)
            .collect()
    }

    /// Symbols in insertion order, duplicates included.
    pub fn symbols(&self) -> Vec<&str> {
        self.holdings.iter().map(|a| a.symbol()).collect()
    }
}
