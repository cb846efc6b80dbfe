//! # smarthomed: smart-home fabric daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Start the device emulators and the telemetry logger on the configured bus
//! - Build the axum router, injecting the query service and command initiators
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;
mod fabric;

use smarthome_adapter_http_axum::router;
use smarthome_adapter_http_axum::state::AppState;
use smarthome_adapter_mqtt::OneShotPublisher;
use smarthome_adapter_storage_sqlite_sqlx::{Config as StorageConfig, SqliteTelemetryStore};
use smarthome_app::bus::InProcessBus;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, Transport};

/// Capacity of the in-process bus.
const BUS_CAPACITY: usize = 256;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = StorageConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let store = SqliteTelemetryStore::new(db.pool().clone());
    tracing::info!(url = config.database_url(), "telemetry store ready");

    // Devices
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (app, tasks) = match config.devices.transport {
        Transport::Mqtt => {
            let tasks =
                fabric::spawn_mqtt(&config.mqtt, &config.devices, store.clone(), &shutdown_rx);
            let publisher = OneShotPublisher::new(config.mqtt.clone());
            (router::build(AppState::new(store, publisher)), tasks)
        }
        Transport::InProcess => {
            let bus = InProcessBus::new(BUS_CAPACITY);
            let tasks =
                fabric::spawn_in_process(&bus, &config.devices, store.clone(), &shutdown_rx);
            (router::build(AppState::new(store, bus)), tasks)
        }
    };

    // HTTP
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, transport = ?config.devices.transport, "smarthomed listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await?;

    for task in tasks {
        if let Err(err) = task.await {
            tracing::warn!(error = %err, "device task ended abnormally");
        }
    }
    tracing::info!("smarthomed stopped");

    Ok(())
}

/// Resolve on Ctrl-C, after telling every device loop to stop.
async fn shutdown_signal(shutdown: watch::Sender<bool>) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for Ctrl-C");
    }
    tracing::info!("shutdown requested");
    let _ = shutdown.send(true);
}
