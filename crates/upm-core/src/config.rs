// SPDX-FileCopyrightText: 2026 UPM Exporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exporter configuration.
//!
//! One immutable [`ExporterConfig`] value is built from the parsed CLI
//! flags at startup and passed by reference into the client, collector,
//! and server constructors. Nothing reads flags or globals after startup.

use crate::error::ExporterError;

pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_LISTEN_PORT: u16 = 9996;
pub const DEFAULT_PROTOCOL: &str = "https";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Immutable exporter configuration, complete after CLI parsing.
#[derive(Clone)]
pub struct ExporterConfig {
    /// Address the HTTP front end binds.
    pub listen_address: String,
    /// Port the HTTP front end binds.
    pub listen_port: u16,
    /// FQDN of the monitored application; also the `url` label on every
    /// emitted metric.
    pub fqdn: String,
    /// Static access token sent on every outbound request.
    pub token: String,
    /// Scheme used to build the target base URL.
    pub protocol: String,
    /// Keep user-installed plugins only (plus the self-management
    /// exemptions).
    pub user_installed_only: bool,
    /// Drop plugins that are installed but disabled.
    pub drop_disabled: bool,
    /// Drop plugins vendor-bundled for Jira Software.
    pub drop_vendor_bundled: bool,
    /// Fetch per-plugin availability info (one extra request per plugin).
    pub check_updates: bool,
    /// Raise log verbosity to debug.
    pub debug: bool,
    /// Timeout applied to every outbound request.
    pub request_timeout_secs: u64,
}

impl ExporterConfig {
    /// A configuration for the given application with all defaults and
    /// every filter off.
    pub fn new(fqdn: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            listen_port: DEFAULT_LISTEN_PORT,
            fqdn: fqdn.into(),
            token: token.into(),
            protocol: DEFAULT_PROTOCOL.to_string(),
            user_installed_only: false,
            drop_disabled: false,
            drop_vendor_bundled: false,
            check_updates: false,
            debug: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Base URL of the plugin-list endpoint. The trailing slash matters:
    /// availability URLs are built by appending to it.
    pub fn base_url(&self) -> String {
        format!("{}://{}/rest/plugins/latest/", self.protocol, self.fqdn)
    }

    /// Value of the `Authorization` header sent on every outbound request.
    pub fn authorization(&self) -> String {
        format!("Basic {}", self.token)
    }

    /// Address the HTTP front end binds, as `host:port`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_address, self.listen_port)
    }

    /// Validate semantic constraints the CLI layer cannot express.
    ///
    /// The CLI already refuses to start without `--app.fqdn` and
    /// `--app.token`; this backstops programmatic construction.
    pub fn validate(&self) -> Result<(), ExporterError> {
        if self.fqdn.trim().is_empty() {
            return Err(ExporterError::Config(
                "app.fqdn must not be empty".to_string(),
            ));
        }
        if self.token.trim().is_empty() {
            return Err(ExporterError::Config(
                "app.token must not be empty".to_string(),
            ));
        }
        if self.protocol.trim().is_empty() {
            return Err(ExporterError::Config(
                "app.protocol must not be empty".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ExporterError::Config(
                "request-timeout-secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ExporterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExporterConfig")
            .field("listen_address", &self.listen_address)
            .field("listen_port", &self.listen_port)
            .field("fqdn", &self.fqdn)
            .field("token", &"[redacted]")
            .field("protocol", &self.protocol)
            .field("user_installed_only", &self.user_installed_only)
            .field("drop_disabled", &self.drop_disabled)
            .field("drop_vendor_bundled", &self.drop_vendor_bundled)
            .field("check_updates", &self.check_updates)
            .field("debug", &self.debug)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_uses_protocol_and_fqdn() {
        let config = ExporterConfig::new("bitbucket.example.com", "t0k3n");
        assert_eq!(
            config.base_url(),
            "https://bitbucket.example.com/rest/plugins/latest/"
        );

        let mut http = ExporterConfig::new("jira.example.com", "t0k3n");
        http.protocol = "http".to_string();
        assert_eq!(
            http.base_url(),
            "http://jira.example.com/rest/plugins/latest/"
        );
    }

    #[test]
    fn authorization_is_scheme_prefixed() {
        let config = ExporterConfig::new("jira.example.com", "c2VjcmV0");
        assert_eq!(config.authorization(), "Basic c2VjcmV0");
    }

    #[test]
    fn validate_rejects_missing_required_values() {
        assert!(ExporterConfig::new("", "token").validate().is_err());
        assert!(ExporterConfig::new("jira.example.com", "").validate().is_err());
        assert!(
            ExporterConfig::new("jira.example.com", "token")
                .validate()
                .is_ok()
        );

        let mut zero_timeout = ExporterConfig::new("jira.example.com", "token");
        zero_timeout.request_timeout_secs = 0;
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = ExporterConfig::new("jira.example.com", "hunter2");
        let debug = format!("{config:?}");
        assert!(debug.contains("[redacted]"));
        assert!(!debug.contains("hunter2"));
    }
}
