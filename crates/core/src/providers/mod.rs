pub mod traits;

// Price sources
pub mod book_value;
pub mod static_prices;
pub mod yahoo_finance;
