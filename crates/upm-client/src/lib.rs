// SPDX-FileCopyrightText: 2026 UPM Exporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound HTTP client for the UPM REST API.
//!
//! [`UpmClient`] issues the primary plugin-list fetch and the per-plugin
//! availability fetches. Failures on these paths never escape as errors:
//! a transport failure on the primary fetch becomes a `Down` status, and
//! every per-plugin availability failure is an isolated skip. Only client
//! construction is fallible.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, error, warn};

use upm_core::types::{EndpointStatus, Plugin, PluginAvailability, PluginFetch, PluginList};
use upm_core::{ExporterConfig, ExporterError};

/// Maximum availability fetches in flight at once. Per-plugin results stay
/// independent; this only bounds cycle latency.
const AVAILABILITY_CONCURRENCY: usize = 4;

/// HTTP client for the UPM REST API of one monitored application.
///
/// Owns its `reqwest::Client` with the `Authorization` and content-type
/// headers preset and an explicit request timeout.
#[derive(Debug, Clone)]
pub struct UpmClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpmClient {
    /// Builds a client for the application described by `config`.
    pub fn new(config: &ExporterConfig) -> Result<Self, ExporterError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&config.authorization()).map_err(|e| {
                ExporterError::Config(format!("access token is not a valid header value: {e}"))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ExporterError::Client {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url(),
        })
    }

    /// Base URL of the plugin-list endpoint.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the installed-plugin list.
    ///
    /// Transport failure → `Down` with an empty list. Any response at all →
    /// `Up`; the list stays empty unless the status was 200 and the body
    /// decoded. Undecodable bodies are logged verbatim for diagnosis.
    pub async fn fetch_plugins(&self) -> PluginFetch {
        debug!(url = %self.base_url, "fetching plugin list");

        let response = match self.http.get(&self.base_url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %self.base_url, error = %e, "plugin list request failed");
                return PluginFetch::empty(EndpointStatus::Down);
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                warn!(
                    url = %self.base_url,
                    status = %status,
                    "plugin list request was rejected; check the access token"
                );
            } else {
                debug!(url = %self.base_url, status = %status, "plugin list request returned non-200");
            }
            return PluginFetch::empty(EndpointStatus::Up);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %self.base_url, error = %e, "failed to read plugin list body");
                return PluginFetch::empty(EndpointStatus::Up);
            }
        };

        match serde_json::from_str::<PluginList>(&body) {
            Ok(list) => {
                debug!(count = list.plugins.len(), "decoded plugin list");
                PluginFetch {
                    status: EndpointStatus::Up,
                    plugins: list.plugins,
                }
            }
            Err(e) => {
                error!(error = %e, body = %body, "failed to decode plugin list");
                PluginFetch::empty(EndpointStatus::Up)
            }
        }
    }

    /// Fetches availability info for one plugin.
    ///
    /// Returns `None` on any failure and on an empty body; an empty body
    /// is the endpoint's way of saying the plugin publishes no availability
    /// metadata. On success, `enabled` and `user_installed` are copied from
    /// the source plugin since the availability JSON carries neither.
    pub async fn fetch_available(&self, plugin: &Plugin) -> Option<PluginAvailability> {
        let url = format!("{}available/{}-key", self.base_url, plugin.key);
        debug!(plugin = %plugin.key, url = %url, "fetching availability info");

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(plugin = %plugin.key, error = %e, "availability request failed, skipping plugin");
                return None;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            debug!(plugin = %plugin.key, status = %status, "availability request returned non-200, skipping plugin");
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(plugin = %plugin.key, error = %e, "failed to read availability body, skipping plugin");
                return None;
            }
        };

        if body.is_empty() {
            debug!(plugin = %plugin.key, "no availability metadata published, skipping plugin");
            return None;
        }

        match serde_json::from_str::<PluginAvailability>(&body) {
            Ok(mut info) => {
                info.enabled = plugin.enabled;
                info.user_installed = plugin.user_installed;
                Some(info)
            }
            Err(e) => {
                error!(plugin = %plugin.key, error = %e, body = %body, "failed to decode availability info");
                None
            }
        }
    }

    /// Fetches availability info for every plugin in the list.
    ///
    /// Bounded fan-out: at most [`AVAILABILITY_CONCURRENCY`] requests in
    /// flight. A failed fetch yields no record and never aborts the batch;
    /// record order follows completion order.
    pub async fn enrich(&self, plugins: &[Plugin]) -> Vec<PluginAvailability> {
        let fetches = plugins
            .iter()
            .cloned()
            .map(|plugin| async move { self.fetch_available(&plugin).await });
        let records: Vec<PluginAvailability> = stream::iter(fetches)
            .buffer_unordered(AVAILABILITY_CONCURRENCY)
            .filter_map(|record| async move { record })
            .collect()
            .await;

        debug!(
            plugins = plugins.len(),
            records = records.len(),
            "availability enrichment finished"
        );
        records
    }
}
