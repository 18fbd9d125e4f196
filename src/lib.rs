pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::InMemoryStore;
pub use config::toml_config::SalonConfig;
pub use core::{ordering::OrderCalculator, roster::StylistRoster};
pub use utils::error::{Result, SalonError};
