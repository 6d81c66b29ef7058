// SPDX-FileCopyrightText: 2026 UPM Exporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exporter startup and run loop.
//!
//! Wires the recorder, client, collector, and HTTP front end together and
//! serves until a termination signal arrives.

use std::sync::Arc;

use tracing::info;

use upm_client::UpmClient;
use upm_collector::{PrometheusRecorder, UpmCollector};
use upm_core::{ExporterConfig, ExporterError};
use upm_gateway::server::{GatewayState, ServerConfig};

use crate::shutdown;

/// Runs the exporter with the given configuration until shutdown.
pub async fn run(config: ExporterConfig) -> Result<(), ExporterError> {
    init_tracing(config.debug);
    config.validate()?;

    info!(
        fqdn = %config.fqdn,
        url = %config.base_url(),
        "starting upm-exporter"
    );

    let recorder = PrometheusRecorder::new()?;
    let client = UpmClient::new(&config)?;

    let server_config = ServerConfig {
        host: config.listen_address.clone(),
        port: config.listen_port,
    };
    let collector = Arc::new(UpmCollector::new(client, config));

    let handle = recorder.handle().clone();
    let state = GatewayState {
        collector,
        render: Arc::new(move || handle.render()),
    };

    let cancel = shutdown::install_signal_handler();

    info!(
        host = %server_config.host,
        port = server_config.port,
        "exporter ready to take requests"
    );
    upm_gateway::start_server(&server_config, state, cancel).await?;

    info!("upm-exporter was gracefully shut down");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the exporter crates log at info
/// (debug with `--debug`) and everything else at warn.
fn init_tracing(debug: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "upm_core={level},upm_client={level},upm_collector={level},upm_gateway={level},upm_exporter={level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
