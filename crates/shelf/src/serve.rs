// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shelf serve` implementation.
//!
//! Opens the file store at the configured path and serves the REST API until
//! SIGINT or SIGTERM.

use std::sync::Arc;

use shelf_config::ShelfConfig;
use shelf_core::ShelfError;
use shelf_gateway::{GatewayState, ServerConfig, start_server};
use shelf_storage::FileStore;
use tracing::info;

use crate::shutdown;

/// Run the server with the given configuration.
pub async fn run_serve(config: ShelfConfig) -> Result<(), ShelfError> {
    init_tracing(&config.app.log_level);

    info!(
        app = %config.app.name,
        database_file = %config.storage.database_file.display(),
        "starting shelf"
    );

    let store = FileStore::open(&config.storage.database_file).await?;
    let state = GatewayState::new(Arc::new(store), config.app.name.as_str());

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        api_prefix: config.server.api_prefix.clone(),
    };

    let cancel = shutdown::install_signal_handler();
    start_server(&server_config, state, cancel).await?;

    info!("shelf stopped");
    Ok(())
}

/// Filter directives used when `RUST_LOG` is not set.
fn default_directives(log_level: &str) -> String {
    format!("shelf={log_level},warn")
}

/// Initialize the tracing subscriber with the configured log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
