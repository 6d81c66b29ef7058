// SPDX-FileCopyrightText: 2026 UPM Exporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP front end for the UPM exporter.
//!
//! Serves the pull-model scrape endpoint plus a liveness endpoint. Each
//! /metrics request drives one collection cycle against the monitored
//! application before rendering the exposition text; there is no
//! background polling loop.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, ServerConfig, start_server};
