use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};
use tracing::{debug, error};

use portfolio_tracker_core::errors::CoreError;
use portfolio_tracker_core::models::asset::Asset;
use portfolio_tracker_core::PortfolioTracker;

use crate::render;

/// One entry of the numbered main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    AddAsset,
    TotalValue,
    ProfitLoss,
    Breakdown,
    CurrentPrice,
    RemoveAsset,
    Exit,
}

impl Choice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Choice::AddAsset),
            "2" => Some(Choice::TotalValue),
            "3" => Some(Choice::ProfitLoss),
            "4" => Some(Choice::Breakdown),
            "5" => Some(Choice::CurrentPrice),
            "6" => Some(Choice::RemoveAsset),
            "7" => Some(Choice::Exit),
            _ => None,
        }
    }
}

const OPTIONS: &str = "\nOptions
1. Add Asset (Stock/Crypto)
2. Estimate Portfolio Value
3. Track Profit/Loss
4. Show Portfolio Breakdown
5. Get Current Price
6. Remove Asset
7. Exit
";

/// The interactive loop, over any line source and sink so it can be driven
/// from a test as easily as from a terminal.
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until the user picks Exit or input runs out.
    pub async fn run(&mut self, tracker: &mut PortfolioTracker) -> Result<()> {
        loop {
            write!(self.output, "{OPTIONS}")?;
            let Some(line) = self.prompt("\nEnter your choice [1-7]: ")? else {
                break;
            };

            let Some(choice) = Choice::parse(&line) else {
                writeln!(self.output, "{}", "Invalid choice. Try again!".yellow())?;
                continue;
            };
            debug!(?choice, "menu selection");

            let keep_going = self.dispatch(choice, tracker).await?;
            self.output.flush()?;
            if !keep_going {
                break;
            }
        }

        self.output.flush()?;
        Ok(())
    }

    /// Handle one selection. Returns `false` once the loop should stop.
    async fn dispatch(&mut self, choice: Choice, tracker: &mut PortfolioTracker) -> Result<bool> {
        match choice {
            Choice::AddAsset => return self.add_asset(tracker),
            Choice::TotalValue => match tracker.total_value().await {
                Ok(total) => writeln!(
                    self.output,
                    "Your Portfolio Value: {}",
                    render::money(total).bold()
                )?,
                Err(e) => self.report(&e)?,
            },
            Choice::ProfitLoss => match tracker.total_profit_loss().await {
                Ok(total) => writeln!(
                    self.output,
                    "Total Profit/Loss: {}",
                    render::signed_money(total)
                )?,
                Err(e) => self.report(&e)?,
            },
            Choice::Breakdown => {
                let breakdown = tracker.breakdown().await;
                write!(self.output, "{}", render::breakdown(&breakdown)?)?;
            }
            Choice::CurrentPrice => {
                let Some(symbol) = self.prompt("Enter symbol of your asset: ")? else {
                    return Ok(false);
                };
                match tracker.current_price(&symbol).await {
                    Ok(price) => writeln!(
                        self.output,
                        "Current Price of {}: {}",
                        symbol.trim().to_uppercase(),
                        render::money(price)
                    )?,
                    Err(e) => self.report(&e)?,
                }
            }
            Choice::RemoveAsset => {
                let Some(symbol) = self.prompt("Enter the symbol to remove: ")? else {
                    return Ok(false);
                };
                match tracker.remove_asset(&symbol) {
                    Ok(removed) => writeln!(
                        self.output,
                        "{} removed successfully!",
                        removed.symbol().green()
                    )?,
                    Err(CoreError::AssetNotFound(_)) => writeln!(
                        self.output,
                        "{}",
                        "Asset not found in your portfolio".yellow()
                    )?,
                    Err(e) => self.report(&e)?,
                }
            }
            Choice::Exit => {
                writeln!(self.output, "Exiting... Goodbye!")?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn add_asset(&mut self, tracker: &mut PortfolioTracker) -> Result<bool> {
        let Some(symbol) = self.prompt("Enter symbol of asset: ")? else {
            return Ok(false);
        };
        let Some(quantity) = self.prompt_number("Enter quantity of asset: ")? else {
            return Ok(false);
        };
        let Some(buy_price) = self.prompt_number("Enter buy price: ")? else {
            return Ok(false);
        };

        let asset = Asset::new(symbol, quantity, buy_price);
        let label = format!("{} ({})", asset.symbol(), asset.asset_type());
        match tracker.add_asset(asset) {
            Ok(()) => writeln!(self.output, "{} added successfully!", label.green())?,
            Err(e) => self.report(&e)?,
        }
        Ok(true)
    }

    fn report(&mut self, e: &CoreError) -> Result<()> {
        if !e.is_recoverable() {
            error!(error = %e, "operation failed");
        }
        writeln!(self.output, "{} {e}", "Error:".red())?;
        Ok(())
    }

    /// Print `message` and read one line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Keep asking until the answer parses as a number.
    fn prompt_number(&mut self, message: &str) -> Result<Option<f64>> {
        loop {
            let Some(line) = self.prompt(message)? else {
                return Ok(None);
            };
            match line.parse::<f64>() {
                Ok(value) if value.is_finite() => return Ok(Some(value)),
                _ => writeln!(self.output, "{}", "Please enter a number.".yellow())?,
            }
        }
    }
}
