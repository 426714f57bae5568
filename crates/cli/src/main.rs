mod menu;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portfolio_tracker_core::models::settings::{TrackerConfig, DEFAULT_DATA_FILE};
use portfolio_tracker_core::providers::book_value::BookValueProvider;
use portfolio_tracker_core::providers::traits::PriceProvider;
use portfolio_tracker_core::providers::yahoo_finance::YahooFinanceProvider;
use portfolio_tracker_core::PortfolioTracker;

use menu::Menu;

/// Track a stock and crypto portfolio against live Yahoo Finance prices.
#[derive(Parser, Debug)]
#[command(name = "portfolio-tracker", version, about)]
struct Args {
    /// Where holdings are stored
    #[arg(long, env = "PORTFOLIO_FILE", default_value = DEFAULT_DATA_FILE)]
    file: PathBuf,

    /// Seconds to wait for a single price request
    #[arg(long, env = "PORTFOLIO_TIMEOUT", default_value_t = 10)]
    timeout: u64,

    /// Value holdings at their buy prices instead of querying Yahoo Finance
    #[arg(long)]
    offline: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    debug!(?args, "starting");

    let config = TrackerConfig {
        data_file: args.file,
        request_timeout: Duration::from_secs(args.timeout),
    };

    let provider: Box<dyn PriceProvider> = if args.offline {
        Box::new(BookValueProvider::new())
    } else {
        Box::new(YahooFinanceProvider::with_timeout(config.request_timeout)?)
    };

    let data_file = config.data_file.clone();
    let mut tracker = PortfolioTracker::open(config, provider)
        .with_context(|| format!("could not open portfolio at {}", data_file.display()))?;

    println!("{}", "Welcome to Portfolio Tracker".bold());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(stdin.lock(), BufWriter::new(stdout.lock()));
    menu.run(&mut tracker).await?;

    Ok(())
}
