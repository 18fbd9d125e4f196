#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "salon-stylists")]
#[command(about = "Stylist records and calendar ordering for a salon")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "salon.toml")]
    pub config: String,

    /// Overrides `store.data_file` from the configuration
    #[arg(long)]
    pub data_file: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: cli::Command,
}
