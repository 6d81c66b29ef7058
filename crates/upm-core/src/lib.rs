// SPDX-FileCopyrightText: 2026 UPM Exporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Atlassian UPM exporter.
//!
//! This crate provides the domain types decoded from the Universal Plugin
//! Manager REST API, the exporter-wide error type, the immutable startup
//! configuration, and the pure plugin-list filters. Everything that talks
//! to the network or the metrics recorder lives in the sibling crates.

pub mod config;
pub mod error;
pub mod filter;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use config::ExporterConfig;
pub use error::ExporterError;
pub use types::{EndpointStatus, Plugin, PluginAvailability, PluginFetch, PluginList};
