//! txweb main entry point

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use txweb_api::start_server;
use txweb_client::HttpTransactionSource;
use txweb_config::{Config, ConfigError};

#[derive(Parser, Debug)]
#[command(name = "txweb")]
#[command(author = "txweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web dashboard for customer purchase transactions", long_about = None)]
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

    let config_found = args.config.exists();
    let config = match Config::load_or_default(args.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            // The logger is configured from this file, so report on stderr
            eprintln!("{}", e.to_details());
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to load configuration from {}", args.config.display())));
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if !config_found {
        let missing = ConfigError::FileNotFound { path: args.config.display().to_string() };
        log::warn!("Using default configuration: {}", missing.to_details());
    }
    log::info!(
        "Config loaded: upstream={}, page_size={}",
        config.api.base_url,
        config.pagination.page_size
    );
    if config.api.token.is_none() {
        log::warn!("No api.token configured; upstream requests are sent without authorization");
    }

    let source = HttpTransactionSource::new(&config.api).context("Failed to create API client")?;

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, Arc::new(source)))?;

    Ok(())
}
