//! Tekrar service
//!
//! Reads configuration from `$TEKRAR_CONFIG` or
//! `~/.config/tekrar-service/config.toml` and serves the REST API until
//! SIGINT / SIGTERM.

use tracing::{error, info};

use tekrar::{default_config_path, init_tracing, AppConfig, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), tekrar::server::BoxError> {
    let config_path = default_config_path();
    let (config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: true,
    })
    .await?;
    handle.install_signal_handler();

    info!("Press Ctrl+C to shut down gracefully.");
    handle.wait().await;
    Ok(())
}
