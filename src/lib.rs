pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub use cli::{Cli, Commands};
pub use config::Config;
use db::Store;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    init_tracing(&config);

    match cli.command() {
        Commands::Serve => {
            config.validate()?;
            serve(config).await
        }
        Commands::Provision => {
            config.validate()?;
            provision(&config).await
        }
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(())
        }
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn provision(config: &Config) -> anyhow::Result<()> {
    let store = Store::from_config(&config.database).await?;

    store
        .provision_users_table()
        .await
        .context("Failed to create users table")?;

    println!("✓ users table is ready");
    store.close().await
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!(
        "userdir v{} starting on {}",
        env!("CARGO_PKG_VERSION"),
        config.bind_address()
    );

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    let addr = config.bind_address();
    let state = api::create_app_state_from_config(config, prometheus_handle).await?;
    let store = state.store().clone();

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server is running at http://{}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Err(e) = &served {
        error!("Web server error: {}", e);
    }

    store.close().await?;
    info!("Server stopped");

    served.map_err(Into::into)
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
