// SPDX-FileCopyrightText: 2026 UPM Exporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types decoded from the UPM REST endpoints.
//!
//! Both entity lists are rebuilt from live HTTP responses on every
//! collection cycle; nothing is cached or shared across cycles.

use serde::{Deserialize, Serialize};

/// One installed plugin as reported by the plugin-list endpoint.
///
/// The endpoint returns far more per plugin (links, vendor, licensing
/// flags); only the fields the exporter reports on are decoded and the
/// rest are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    /// Stable unique identifier within one collection cycle.
    pub key: String,
    /// Display label only, never used for identity.
    pub name: String,
    /// Installed version, treated as opaque text.
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub user_installed: bool,
    /// Present only on certain vendor-bundled plugins (value
    /// `"jira-software"`). An absent key is distinct from an empty one.
    #[serde(default)]
    pub application_key: Option<String>,
}

/// The plugin-list response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginList {
    #[serde(default)]
    pub plugins: Vec<Plugin>,
}

/// Upgrade-candidate info for one plugin, from the `available/<key>-key`
/// endpoint.
///
/// `enabled` and `user_installed` are not part of the availability JSON;
/// the client copies them from the originating [`Plugin`] after decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginAvailability {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    /// The available (upgrade candidate) version.
    #[serde(default)]
    pub version: String,
    /// The installed version as reported by the availability endpoint.
    #[serde(default)]
    pub installed_version: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub user_installed: bool,
}

impl PluginAvailability {
    /// True when the available version differs from the installed one.
    pub fn update_available(&self) -> bool {
        self.version != self.installed_version
    }
}

/// Reachability of the primary plugin-list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointStatus {
    /// The endpoint answered, regardless of HTTP status.
    Up,
    /// The request failed at the transport level.
    Down,
}

impl EndpointStatus {
    /// Gauge value for the `rest_url_up` metric.
    pub fn as_gauge(&self) -> f64 {
        match self {
            EndpointStatus::Up => 1.0,
            EndpointStatus::Down => 0.0,
        }
    }
}

/// Result of one primary fetch: reachability plus the decoded list.
///
/// A non-200 response or an undecodable body yields `Up` with an empty
/// list: the endpoint was reachable but produced no usable data.
#[derive(Debug, Clone)]
pub struct PluginFetch {
    pub status: EndpointStatus,
    pub plugins: Vec<Plugin>,
}

impl PluginFetch {
    /// An `Up` fetch carrying no plugins.
    pub fn empty(status: EndpointStatus) -> Self {
        Self {
            status,
            plugins: Vec::new(),
        }
    }
}
