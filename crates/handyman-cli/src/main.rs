mod cli;
mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info};

use handyman_client::{ApiClient, ClientConfig, ReqwestTransport};
use handyman_store::SqliteStorage;

use crate::cli::Cli;

/// Events from this binary use the `handyman` target.
const DEFAULT_LOG_FILTER: &str = "handyman=info,handyman_client=info,handyman_store=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    // Config
    let store_path =
        std::env::var("HANDYMAN_STORE_PATH").unwrap_or_else(|_| "handyman.db".into());
    let config = ClientConfig::from_env().with_mocks(args.mock);
    if config.use_mocks {
        info!(seed = config.mock_seed, "Mock mode enabled");
    }
    debug!(base_url = %config.base_url, store = %store_path, "Client configured");

    // Session store
    let storage = Arc::new(SqliteStorage::open(&PathBuf::from(&store_path))?);

    let client = ApiClient::new(config, storage, Arc::new(ReqwestTransport::new()));
    let output = commands::run(&client, args.command).await?;
    println!("{}", output);

    Ok(())
}
