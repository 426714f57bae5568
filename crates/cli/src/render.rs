use colored::{ColoredString, Colorize};
use std::fmt::{self, Write};

use portfolio_tracker_core::models::breakdown::{Breakdown, BreakdownRow};

const UNAVAILABLE: &str = "N/A";
const HEADERS: [&str; 5] = ["Symbol", "Quantity", "Buy Price", "Current Price", "Profit/Loss"];
const WIDTHS: [usize; 5] = [10, 12, 14, 15, 14];
const RULE_WIDTH: usize = 72;

/// `$1234.50`, `-$12.00`.
pub fn money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${value:.2}")
    }
}

/// Money colored by sign: green for gains, red for losses.
pub fn signed_money(value: f64) -> ColoredString {
    let text = money(value);
    if value > 0.0 {
        text.green()
    } else if value < 0.0 {
        text.red()
    } else {
        text.normal()
    }
}

/// Both tables (stocks, then cryptos) framed by a heading and rules.
pub fn breakdown(report: &Breakdown) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let rule = "━".repeat(RULE_WIDTH);

    writeln!(out, "\n {}", "Your Portfolio Breakdown".bold())?;
    writeln!(out, "{rule}")?;

    if report.is_empty() {
        writeln!(out, "No holdings yet")?;
    } else {
        table(&mut out, "STOCKS", &report.stocks)?;
        table(&mut out, "CRYPTOS", &report.cryptos)?;
        let missing = report.unavailable_count();
        if missing > 0 {
            writeln!(out, "\n{missing} price(s) unavailable")?;
        }
    }

    writeln!(
        out,
        "\nPrices as of {}",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    )?;
    writeln!(out, "{rule}")?;
    Ok(out)
}

fn table(out: &mut String, title: &str, rows: &[BreakdownRow]) -> fmt::Result {
    if rows.is_empty() {
        return Ok(());
    }

    let separator: String = WIDTHS
        .iter()
        .map(|w| "─".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("┼");

    writeln!(out, "\n{}", title.bold())?;
    writeln!(out, "{}", line(&HEADERS.map(String::from)))?;
    writeln!(out, "{separator}")?;

    for row in rows {
        writeln!(out, "{}", row_line(row))?;
    }
    Ok(())
}

fn cell(index: usize, text: &str) -> String {
    let width = WIDTHS[index];
    if index == 0 {
        format!(" {text:<width$} ")
    } else {
        format!(" {text:>width$} ")
    }
}

fn line(cells: &[String; 5]) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(i, text)| cell(i, text))
        .collect::<Vec<_>>()
        .join("│")
}

fn row_line(row: &BreakdownRow) -> String {
    let or_unavailable = |v: Option<f64>| v.map(money).unwrap_or_else(|| UNAVAILABLE.to_string());
    let leading = [
        row.symbol.clone(),
        row.quantity.to_string(),
        money(row.buy_price),
        or_unavailable(row.current_price),
    ];

    // Pad first, color after, so escape codes don't skew the columns.
    let padded = cell(4, &or_unavailable(row.profit_loss));
    let profit_loss = match row.profit_loss {
        Some(v) if v > 0.0 => padded.green().to_string(),
        Some(v) if v < 0.0 => padded.red().to_string(),
        _ => padded,
    };

    let mut parts: Vec<String> = leading.iter().enumerate().map(|(i, t)| cell(i, t)).collect();
    parts.push(profit_loss);
    parts.join("│")
}
