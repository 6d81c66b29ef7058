// SPDX-FileCopyrightText: 2026 UPM Exporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scrape-driven collection cycle.
//!
//! One cycle runs per /metrics request: fetch the plugin list, apply the
//! configured filters, optionally enrich with availability info, then
//! publish the outcome as gauges. The collector holds no state between
//! cycles; every observation is recomputed from the live responses.

use std::time::{Duration, Instant};

use metrics::gauge;
use tracing::debug;

use upm_client::UpmClient;
use upm_core::ExporterConfig;
use upm_core::filter;
use upm_core::types::{EndpointStatus, Plugin, PluginAvailability};

use crate::{
    METRIC_COLLECT_DURATION, METRIC_PLUGIN, METRIC_PLUGIN_VERSION_AVAILABLE, METRIC_REST_URL_UP,
};

/// Everything observed during one collection cycle.
#[derive(Debug)]
pub struct CycleOutcome {
    /// Reachability of the primary endpoint.
    pub status: EndpointStatus,
    /// Plugins surviving the configured filters.
    pub plugins: Vec<Plugin>,
    /// Availability records, empty unless check-updates is on.
    pub availability: Vec<PluginAvailability>,
    /// Wall time of the cycle.
    pub duration: Duration,
}

/// Orchestrates one collection per scrape and publishes the result.
///
/// Owns the outbound client and the immutable configuration; safe to call
/// concurrently since nothing here is mutable.
pub struct UpmCollector {
    client: UpmClient,
    config: ExporterConfig,
}

impl UpmCollector {
    pub fn new(client: UpmClient, config: ExporterConfig) -> Self {
        Self { client, config }
    }

    /// Runs one collection cycle without touching the metrics recorder.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let start = Instant::now();
        debug!("collect start");

        let fetch = self.client.fetch_plugins().await;
        let status = fetch.status;

        let plugins = match status {
            EndpointStatus::Up => filter::apply_filters(fetch.plugins, &self.config),
            EndpointStatus::Down => Vec::new(),
        };

        let availability = if self.config.check_updates
            && status == EndpointStatus::Up
            && !plugins.is_empty()
        {
            self.client.enrich(&plugins).await
        } else {
            Vec::new()
        };

        let outcome = CycleOutcome {
            status,
            plugins,
            availability,
            duration: start.elapsed(),
        };
        debug!(
            plugins = outcome.plugins.len(),
            availability = outcome.availability.len(),
            "collect finished"
        );
        outcome
    }

    /// Publishes a cycle outcome as gauge observations.
    pub fn record(&self, outcome: &CycleOutcome) {
        let url = &self.config.fqdn;

        gauge!(METRIC_REST_URL_UP, "url" => url.clone()).set(outcome.status.as_gauge());

        for plugin in &outcome.plugins {
            gauge!(
                METRIC_PLUGIN,
                "enabled" => plugin.enabled.to_string(),
                "name" => plugin.name.clone(),
                "key" => plugin.key.clone(),
                "installedVersion" => plugin.version.clone(),
                "userInstalled" => plugin.user_installed.to_string(),
                "url" => url.clone(),
            )
            .set(0.0);
        }

        for info in &outcome.availability {
            let update_available = info.update_available();
            if update_available {
                debug!(
                    plugin = %info.name,
                    installed = %info.installed_version,
                    available = %info.version,
                    "update available"
                );
            }
            gauge!(
                METRIC_PLUGIN_VERSION_AVAILABLE,
                "name" => info.name.clone(),
                "key" => info.key.clone(),
                "availableVersion" => info.version.clone(),
                "installedVersion" => info.installed_version.clone(),
                "enabled" => info.enabled.to_string(),
                "userInstalled" => info.user_installed.to_string(),
                "url" => url.clone(),
            )
            .set(if update_available { 1.0 } else { 0.0 });
        }

        gauge!(METRIC_COLLECT_DURATION, "url" => url.clone())
            .set(outcome.duration.as_secs_f64());
    }

    /// One full scrape-driven collection: run the cycle, then publish it.
    pub async fn collect(&self) {
        let outcome = self.run_cycle().await;
        self.record(&outcome);
    }
}
