//! Tekrar service CLI
//!
//! ```sh
//! # default config (~/.config/tekrar-service/config.toml)
//! tekrar-cli
//!
//! # custom config and port
//! tekrar-cli --config /etc/tekrar/config.toml --port 9090
//!
//! # validate config without starting
//! tekrar-cli --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use tekrar::config::AppConfig;
use tekrar::server::{init_tracing, ServerHandle, ServerOptions};

/// User / role / site record service.
#[derive(Parser, Debug)]
#[command(
    name = "tekrar-cli",
    version,
    about = "REST service for users, their roles and their sites",
    long_about = "Tekrar service: REST API over users, roles and sites.\n\n\
                  Default config: ~/.config/tekrar-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "TEKRAR_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,

    /// Do not create the schema on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), tekrar::server::BoxError> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(tekrar::default_config_path);
    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    if let Some(e) = load_error {
        error!("Failed to load config: {}", e);
        if cli.check {
            return Err(e.into());
        }
        error!("Using default configuration.");
    } else {
        info!("Configuration loaded from {}", config_path.display());
    }

    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Actor id    : {}", config.audit.default_actor_id);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;
    handle.install_signal_handler();

    info!("Press Ctrl+C to shut down gracefully.");
    handle.wait().await;
    Ok(())
}
