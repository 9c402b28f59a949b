//! Server mode
//!
//! Builds the in-memory registry, the services around it and the HTTP
//! server that exposes them.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::{self, AppState, types::ApiSettings};
use crate::config::StaticConfig;
use crate::services::{ShortenSettings, sink_from_config};
use crate::storage::shared_registry;

/// Assemble application state from configuration.
pub fn build_state(config: &StaticConfig) -> AppState {
    let sink = sink_from_config(&config.log_sink);
    AppState::new(
        shared_registry(),
        ShortenSettings::from(&config.shortener),
        ApiSettings::from_config(config),
        sink,
    )
}

/// Run the HTTP server until it stops (Ctrl-C / SIGTERM).
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: Arc<StaticConfig>) -> Result<()> {
    let state = build_state(&config);

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);
    info!(
        "Short links will be published under {}",
        config.shortener.base_url
    );

    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .configure(move |cfg| api::configure(cfg, &state))
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .client_disconnect_timeout(Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server terminated with an error")?;

    warn!("Server stopped, in-memory links discarded");
    Ok(())
}
