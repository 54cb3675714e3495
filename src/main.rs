//! Kopilka main entry point

use anyhow::Context;
use clap::Parser;
use kopilka_api::start_server;
use kopilka_config::Config;
use kopilka_core::Finance;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "kopilka")]
#[command(author = "Kopilka Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight personal-finance tracker web interface", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = Config::load_or_default(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if args.config.exists() {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!("Config file not found: {}, using defaults", args.config.display());
    }

    let finance = if config.data.seed_demo_data {
        let finance = Finance::with_demo_data().context("Failed to seed demo data")?;
        log::info!(
            "Seeded {} categories and {} transactions",
            finance.categories().len(),
            finance.transactions().len()
        );
        finance
    } else {
        Finance::new()
    };

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, finance))
}
