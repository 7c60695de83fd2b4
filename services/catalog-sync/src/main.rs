//! Product catalog sync job.
//!
//! Rebuilds the cached product table from the remote STAC catalog, either
//! once or on an interval.

mod config;
mod sync;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::SyncConfig;
use sync::SyncPipeline;

#[derive(Parser, Debug)]
#[command(name = "catalog-sync")]
#[command(about = "Product catalog sync job")]
struct Args {
    /// Platform mapping YAML file (built-in defaults when omitted)
    #[arg(short, long)]
    mapping: Option<String>,

    /// Database connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Remote catalog base URL
    #[arg(long, env = "STAC_BASE_URL")]
    catalog_url: Option<String>,

    /// Seconds between sync cycles in continuous mode
    #[arg(long, env = "SYNC_INTERVAL_SECS")]
    interval_secs: Option<u64>,

    /// Run once and exit (vs continuous interval loop)
    #[arg(long)]
    once: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting catalog sync");

    let mut config = SyncConfig::from_env(args.mapping.as_deref())?;
    if let Some(url) = args.database_url {
        config.database_url = url;
    }
    if let Some(url) = args.catalog_url {
        config.catalog_url = url;
    }
    if let Some(secs) = args.interval_secs {
        config.poll_interval_secs = secs;
    }
    info!(
        catalog = %config.catalog_url,
        rules = config.platform_mapping.len(),
        "Loaded configuration"
    );

    let pipeline = SyncPipeline::new(config).await?;

    if args.once {
        info!("Running single sync cycle");
        let count = pipeline.run_once().await?;
        info!(count, "Done");
    } else {
        info!("Starting interval loop");
        pipeline.run_forever().await?;
    }

    Ok(())
}
