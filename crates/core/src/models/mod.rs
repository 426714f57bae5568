pub mod asset;
pub mod breakdown;
pub mod portfolio;
pub mod settings;
