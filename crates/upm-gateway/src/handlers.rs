// SPDX-FileCopyrightText: 2026 UPM Exporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the exporter front end.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use crate::server::GatewayState;

/// Human-readable service name, returned by the liveness endpoint.
pub const EXPORTER_NAME: &str = "Atlassian UPM Exporter";

/// Content type of the Prometheus text exposition format.
const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// GET /
///
/// Plain-text liveness confirmation.
pub async fn get_root() -> String {
    format!("{EXPORTER_NAME} is running")
}

/// GET /favicon.ico
///
/// Empty 200 so browsers requesting a favicon do not pollute the logs
/// with not-found errors.
pub async fn get_favicon() -> StatusCode {
    StatusCode::OK
}

/// GET /metrics
///
/// Drives one collection cycle against the monitored application, then
/// renders the recorder's contents in the Prometheus text format.
pub async fn get_metrics(State(state): State<GatewayState>) -> impl IntoResponse {
    state.collector.collect().await;
    let body = (state.render)();
    ([(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn root_names_the_exporter() {
        let body = get_root().await;
        assert_eq!(body, "Atlassian UPM Exporter is running");
    }

    #[tokio::test]
    async fn favicon_is_an_empty_ok() {
        assert_eq!(get_favicon().await, StatusCode::OK);
    }
}
