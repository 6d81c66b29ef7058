// SPDX-FileCopyrightText: 2026 UPM Exporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prometheus metrics for the UPM exporter.
//!
//! Uses the metrics-rs facade with the Prometheus exporter. Metrics are
//! rendered as Prometheus text format via the `render()` method, which the
//! gateway exposes through its /metrics endpoint after driving one
//! collection cycle.

pub mod collect;

use std::time::Duration;

use metrics::describe_gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use metrics_util::MetricKindMask;

use upm_core::ExporterError;

pub use collect::{CycleOutcome, UpmCollector};

pub const METRIC_COLLECT_DURATION: &str = "atlassian_upm_collect_duration_seconds";
pub const METRIC_REST_URL_UP: &str = "atlassian_upm_rest_url_up";
pub const METRIC_PLUGIN: &str = "atlassian_upm_plugin";
pub const METRIC_PLUGIN_VERSION_AVAILABLE: &str = "atlassian_upm_plugin_version_available";

/// How long a gauge series may go unobserved before the recorder drops it.
/// Plugins that disappear between scrapes age out instead of lingering
/// forever in the exposition output.
const GAUGE_IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Prometheus recorder for the exporter.
///
/// Installs the Prometheus recorder and exposes a handle for rendering
/// metrics in Prometheus text format.
pub struct PrometheusRecorder {
    handle: PrometheusHandle,
}

impl PrometheusRecorder {
    /// Creates a new PrometheusRecorder.
    ///
    /// Installs the Prometheus recorder globally. Only one recorder can be
    /// installed per process. Returns an error if a recorder is already
    /// installed.
    pub fn new() -> Result<Self, ExporterError> {
        let handle = PrometheusBuilder::new()
            .idle_timeout(MetricKindMask::GAUGE, Some(GAUGE_IDLE_TIMEOUT))
            .install_recorder()
            .map_err(|e| {
                ExporterError::Metrics(format!("failed to install Prometheus recorder: {e}"))
            })?;

        register_metrics();

        tracing::info!("prometheus metrics recorder installed");

        Ok(Self { handle })
    }

    /// Get a reference to the Prometheus handle for rendering.
    pub fn handle(&self) -> &PrometheusHandle {
        &self.handle
    }

    /// Render all collected metrics in Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Register all exporter metric descriptions.
///
/// Called once after the recorder is installed.
pub fn register_metrics() {
    describe_gauge!(
        METRIC_COLLECT_DURATION,
        "Wall time the last UPM collection cycle took, in seconds"
    );
    describe_gauge!(
        METRIC_REST_URL_UP,
        "Whether the UPM rest endpoint (https://<app.fqdn>/rest/plugins/latest/) is reachable, 1 if up"
    );
    describe_gauge!(
        METRIC_PLUGIN,
        "One row per installed plugin surviving the configured filters, value is always 0"
    );
    describe_gauge!(
        METRIC_PLUGIN_VERSION_AVAILABLE,
        "Upgrade availability per plugin, 1 if the available version differs from the installed one"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_share_the_namespace_prefix() {
        for name in [
            METRIC_COLLECT_DURATION,
            METRIC_REST_URL_UP,
            METRIC_PLUGIN,
            METRIC_PLUGIN_VERSION_AVAILABLE,
        ] {
            assert!(name.starts_with("atlassian_upm_"), "bad prefix: {name}");
        }
    }
}
