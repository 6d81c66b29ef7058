// SPDX-FileCopyrightText: 2026 UPM Exporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the UPM exporter.

use thiserror::Error;

/// The primary error type used across the exporter workspace.
///
/// Network and decode failures inside a collection cycle are deliberately
/// NOT represented here: the cycle folds them into its result (up/down
/// status, skipped plugins) so a scrape never fails outright. This type
/// covers the failures that should stop the process: bad configuration,
/// client or server construction, and serve/shutdown errors.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Configuration errors (missing or malformed values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Outbound HTTP client construction or plumbing failures.
    #[error("client error: {message}")]
    Client {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// HTTP front end bind, serve, or shutdown failures.
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Metrics recorder installation failures.
    #[error("metrics error: {0}")]
    Metrics(String),
}
