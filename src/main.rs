use std::path::Path;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use travel_health_advisor::config::load_env_file;
use travel_health_advisor::{AdvisorConfig, web};

fn init_tracing(config: &AdvisorConfig) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "compact" {
        builder.compact().init();
    } else {
        builder.pretty().init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_file = Path::new(".env");
    if env_file.exists() {
        load_env_file(env_file)?;
    }

    let config_path = std::env::args().nth(1).map(Into::into);
    let config = AdvisorConfig::load_from_path(config_path)?;
    init_tracing(&config);

    tracing::info!(
        "Starting travel health advisor v{}",
        travel_health_advisor::VERSION
    );
    web::run(&config).await
}
