// ═══════════════════════════════════════════════════════════════════
// Service Tests — totals, failure policy, breakdown, quotes
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use portfolio_tracker_core::errors::CoreError;
use portfolio_tracker_core::models::asset::{Asset, AssetType};
use portfolio_tracker_core::models::portfolio::Portfolio;
use portfolio_tracker_core::providers::traits::PriceProvider;
use portfolio_tracker_core::services::portfolio_service::PortfolioService;

// ═══════════════════════════════════════════════════════════════════
// Mock Price Provider (records every symbol it is asked about)
// ═══════════════════════════════════════════════════════════════════

struct MockPriceProvider {
    prices: HashMap<String, f64>,
    requests: Mutex<Vec<String>>,
}

impl MockPriceProvider {
    fn new(prices: &[(&str, f64)]) -> Self {
        Self {
            prices: prices.iter().map(|(s, p)| (s.to_string(), *p)).collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceProvider for MockPriceProvider {
    fn name(&self) -> &str {
        "MockProvider"
    }

    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        self.requests.lock().unwrap().push(symbol.to_string());
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| CoreError::PriceUnavailable {
                symbol: symbol.into(),
                reason: "no data".into(),
            })
    }
}

fn btc_and_apple() -> Portfolio {
    Portfolio::from_holdings(vec![
        Asset::new("BTC-USD", 1.0, 120_000.0),
        Asset::new("AAPL", 2.0, 200.0),
    ])
}

// ═══════════════════════════════════════════════════════════════════
// Totals
// ═══════════════════════════════════════════════════════════════════

mod totals {
    use super::*;

    #[tokio::test]
    async fn total_value_sums_holdings() {
        let provider = MockPriceProvider::new(&[("BTC-USD", 125_000.0), ("AAPL", 220.0)]);
        let total = PortfolioService::new()
            .total_value(&btc_and_apple(), &provider)
            .await
            .unwrap();
        assert_eq!(total, 125_440.0);
    }

    #[tokio::test]
    async fn total_profit_loss_sums_holdings() {
        let provider = MockPriceProvider::new(&[("BTC-USD", 125_000.0), ("AAPL", 220.0)]);
        let total = PortfolioService::new()
            .total_profit_loss(&btc_and_apple(), &provider)
            .await
            .unwrap();
        assert_eq!(total, 5_040.0);
    }

    #[tokio::test]
    async fn mixed_gain_and_loss() {
        let portfolio = Portfolio::from_holdings(vec![
            Asset::new("AAPL", 10.0, 150.0),
            Asset::new("ETH-USD", 2.0, 3_000.0),
        ]);
        let provider = MockPriceProvider::new(&[("AAPL", 160.0), ("ETH-USD", 2_500.0)]);
        let total = PortfolioService::new()
            .total_profit_loss(&portfolio, &provider)
            .await
            .unwrap();
        assert_eq!(total, -900.0);
    }

    #[tokio::test]
    async fn empty_portfolio_totals_zero() {
        let provider = MockPriceProvider::new(&[]);
        let svc = PortfolioService::new();
        let portfolio = Portfolio::new();
        assert_eq!(svc.total_value(&portfolio, &provider).await.unwrap(), 0.0);
        assert_eq!(svc.total_profit_loss(&portfolio, &provider).await.unwrap(), 0.0);
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn duplicate_lots_are_each_counted() {
        let portfolio = Portfolio::from_holdings(vec![
            Asset::new("AAPL", 1.0, 100.0),
            Asset::new("AAPL", 1.0, 200.0),
        ]);
        let provider = MockPriceProvider::new(&[("AAPL", 150.0)]);
        let svc = PortfolioService::new();
        assert_eq!(svc.total_value(&portfolio, &provider).await.unwrap(), 300.0);
        assert_eq!(svc.total_profit_loss(&portfolio, &provider).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn one_missing_price_fails_the_whole_total() {
        let portfolio = Portfolio::from_holdings(vec![
            Asset::new("AAPL", 1.0, 100.0),
            Asset::new("DELISTED", 5.0, 3.0),
            Asset::new("MSFT", 1.0, 300.0),
        ]);
        let provider = MockPriceProvider::new(&[("AAPL", 150.0), ("MSFT", 400.0)]);

        let err = PortfolioService::new()
            .total_value(&portfolio, &provider)
            .await
            .unwrap_err();
        assert_eq!(err.symbol(), Some("DELISTED"));
        // Aborts at the first failure; later holdings are never queried.
        assert_eq!(provider.requests(), vec!["AAPL", "DELISTED"]);
    }

    #[tokio::test]
    async fn profit_loss_failure_names_symbol() {
        let portfolio = Portfolio::from_holdings(vec![Asset::new("gone-usd", 1.0, 1.0)]);
        let provider = MockPriceProvider::new(&[]);
        match PortfolioService::new()
            .total_profit_loss(&portfolio, &provider)
            .await
        {
            Err(CoreError::PriceUnavailable { symbol, .. }) => assert_eq!(symbol, "GONE-USD"),
            other => panic!("expected PriceUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn totals_are_rounded_to_cents() {
        let portfolio = Portfolio::from_holdings(vec![
            Asset::new("A", 3.0, 0.0),
            Asset::new("B", 3.0, 0.0),
        ]);
        let provider = MockPriceProvider::new(&[("A", 0.1), ("B", 0.2)]);
        let total = PortfolioService::new()
            .total_value(&portfolio, &provider)
            .await
            .unwrap();
        assert_eq!(total, 0.9);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Breakdown
// ═══════════════════════════════════════════════════════════════════

mod breakdown {
    use super::*;

    fn mixed() -> Portfolio {
        Portfolio::from_holdings(vec![
            Asset::new("MSFT", 1.0, 300.0),
            Asset::new("BTC-USD", 0.5, 60_000.0),
            Asset::new("DELISTED", 10.0, 5.0),
            Asset::new("ETH-USD", 2.0, 2_000.0),
            Asset::new("AAPL", 3.0, 150.0),
        ])
    }

    fn prices() -> MockPriceProvider {
        MockPriceProvider::new(&[
            ("MSFT", 410.0),
            ("BTC-USD", 64_000.0),
            ("ETH-USD", 1_800.0),
            ("AAPL", 180.0),
        ])
    }

    #[tokio::test]
    async fn groups_by_type_in_portfolio_order() {
        let report = PortfolioService::new().breakdown(&mixed(), &prices()).await;
        let stocks: Vec<_> = report.stocks.iter().map(|r| r.symbol.as_str()).collect();
        let cryptos: Vec<_> = report.cryptos.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(stocks, vec!["MSFT", "DELISTED", "AAPL"]);
        assert_eq!(cryptos, vec!["BTC-USD", "ETH-USD"]);
        assert!(report.stocks.iter().all(|r| r.asset_type == AssetType::Stock));
        assert!(report.cryptos.iter().all(|r| r.asset_type == AssetType::Crypto));
    }

    #[tokio::test]
    async fn failing_row_is_marked_and_others_render() {
        let report = PortfolioService::new().breakdown(&mixed(), &prices()).await;

        let delisted = &report.stocks[1];
        assert_eq!(delisted.symbol, "DELISTED");
        assert_eq!(delisted.current_price, None);
        assert_eq!(delisted.profit_loss, None);
        assert_eq!(delisted.quantity, 10.0);
        assert_eq!(delisted.buy_price, 5.0);
        assert!(!delisted.is_available());

        let msft = &report.stocks[0];
        assert_eq!(msft.current_price, Some(410.0));
        assert_eq!(msft.profit_loss, Some(110.0));

        let aapl = &report.stocks[2];
        assert_eq!(aapl.profit_loss, Some(90.0));

        let btc = &report.cryptos[0];
        assert_eq!(btc.current_price, Some(64_000.0));
        assert_eq!(btc.profit_loss, Some(2_000.0));

        let eth = &report.cryptos[1];
        assert_eq!(eth.profit_loss, Some(-400.0));

        assert_eq!(report.unavailable_count(), 1);
    }

    #[tokio::test]
    async fn every_row_can_be_unavailable() {
        let provider = MockPriceProvider::new(&[]);
        let report = PortfolioService::new().breakdown(&mixed(), &provider).await;
        assert_eq!(report.rows().count(), 5);
        assert_eq!(report.unavailable_count(), 5);
    }

    #[tokio::test]
    async fn empty_portfolio_empty_report() {
        let provider = MockPriceProvider::new(&[]);
        let report = PortfolioService::new().breakdown(&Portfolio::new(), &provider).await;
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn each_available_row_costs_two_queries() {
        let portfolio = Portfolio::from_holdings(vec![Asset::new("AAPL", 1.0, 1.0)]);
        let provider = MockPriceProvider::new(&[("AAPL", 2.0)]);
        PortfolioService::new().breakdown(&portfolio, &provider).await;
        assert_eq!(provider.requests(), vec!["AAPL", "AAPL"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Quote
// ═══════════════════════════════════════════════════════════════════

mod quote {
    use super::*;

    #[tokio::test]
    async fn uppercases_and_rounds() {
        let provider = MockPriceProvider::new(&[("TSLA", 251.337)]);
        let price = PortfolioService::new().quote(" tsla ", &provider).await.unwrap();
        assert_eq!(price, 251.34);
        assert_eq!(provider.requests(), vec!["TSLA"]);
    }

    #[tokio::test]
    async fn unknown_symbol_is_unavailable() {
        let provider = MockPriceProvider::new(&[]);
        let err = PortfolioService::new().quote("ZZZZ", &provider).await.unwrap_err();
        assert!(matches!(err, CoreError::PriceUnavailable { .. }));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn blank_symbol_is_rejected_without_a_query() {
        let provider = MockPriceProvider::new(&[]);
        let err = PortfolioService::new().quote("   ", &provider).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!(provider.requests().is_empty());
    }
}
