// SPDX-FileCopyrightText: 2026 UPM Exporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Atlassian UPM exporter binary entry point.
//!
//! Bitbucket, Confluence, and Jira manage their plugins through the
//! Universal Plugin Manager; this exporter polls one such application and
//! republishes its installed-plugin list as Prometheus gauges. Run one
//! exporter per monitored application. The account behind the access
//! token must be an administrator of that application.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::Parser;

use upm_core::ExporterConfig;
use upm_core::config::{
    DEFAULT_LISTEN_ADDRESS, DEFAULT_LISTEN_PORT, DEFAULT_PROTOCOL, DEFAULT_REQUEST_TIMEOUT_SECS,
};

mod serve;
mod shutdown;

/// Prometheus exporter for the plugins installed on an Atlassian
/// application (Bitbucket, Confluence, Jira).
#[derive(Parser, Debug)]
#[command(name = "upm-exporter", version, about, long_about = None)]
struct Cli {
    /// IP address for the service to listen on.
    #[arg(long = "svc.ip-address", default_value = DEFAULT_LISTEN_ADDRESS)]
    listen_address: String,

    /// Port for the service to listen on.
    #[arg(long = "svc.port", default_value_t = DEFAULT_LISTEN_PORT)]
    listen_port: u16,

    /// FQDN of the application to monitor (e.g. bitbucket.example.com).
    #[arg(long = "app.fqdn")]
    fqdn: String,

    /// Access token used to reach the monitored application.
    #[arg(long = "app.token", env = "UPM_EXPORTER_TOKEN", hide_env_values = true)]
    token: String,

    /// Protocol used to interact with the application.
    #[arg(long = "app.protocol", default_value = DEFAULT_PROTOCOL)]
    protocol: String,

    /// Report user-installed plugins only.
    #[arg(long = "user-installed")]
    user_installed: bool,

    /// Drop plugins that are installed but disabled.
    #[arg(long = "drop-disabled")]
    drop_disabled: bool,

    /// Drop plugins vendored by Atlassian when monitoring Jira.
    #[arg(long = "drop-jira-software-plugins")]
    drop_jira_software_plugins: bool,

    /// Check for updates available for each plugin (one extra request per
    /// plugin).
    #[arg(long = "check-updates")]
    check_updates: bool,

    /// Enable debug output.
    #[arg(long)]
    debug: bool,

    /// Timeout in seconds applied to every request against the
    /// application.
    #[arg(long = "request-timeout-secs", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,
}

impl Cli {
    fn into_config(self) -> ExporterConfig {
        ExporterConfig {
            listen_address: self.listen_address,
            listen_port: self.listen_port,
            fqdn: self.fqdn,
            token: self.token,
            protocol: self.protocol,
            user_installed_only: self.user_installed,
            drop_disabled: self.drop_disabled,
            drop_vendor_bundled: self.drop_jira_software_plugins,
            check_updates: self.check_updates,
            debug: self.debug,
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = serve::run(cli.into_config()).await {
        eprintln!("upm-exporter: {e}");
        std::process::exit(1);
    }
}
