//! Stream proxy for `atc://` sources.
//!
//! The playback element never fetches from the CDN directly; it requests
//! `/atc/{station_prefix}/{file_name}` here and the proxy re-issues the fetch
//! against the configured origin, passing status and body through. Each
//! request is independent and carries no shared mutable state, so concurrent
//! segment loads need no coordination.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::AppState;

/// Fetch one audio segment from the CDN on behalf of the playback element
pub async fn stream_segment(
    State(state): State<AppState>,
    Path((station_prefix, file_name)): Path<(String, String)>,
) -> Response {
    let Some(origin) = state.config.cdn_origin.as_deref() else {
        tracing::error!("CDN origin is not configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error: CDN origin not configured",
        )
            .into_response();
    };

    let upstream_url = join_origin(origin, &station_prefix, &file_name);
    tracing::debug!("Proxying segment request to {}", upstream_url);

    match state.http.get(&upstream_url).send().await {
        Ok(upstream) => {
            let status = StatusCode::from_u16(upstream.status().as_u16())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            if !status.is_success() {
                tracing::warn!("Failed to fetch {}: {}", upstream_url, status);
                return (
                    status,
                    [(header::CONTENT_TYPE, "text/plain")],
                    format!("Failed to fetch resource: {status}"),
                )
                    .into_response();
            }

            let headers = passthrough_headers(upstream.headers());
            (status, headers, Body::from_stream(upstream.bytes_stream())).into_response()
        }
        Err(error) => {
            tracing::error!("Error fetching {}: {}", upstream_url, error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal Server Error: {error}"),
            )
                .into_response()
        }
    }
}

fn join_origin(origin: &str, station_prefix: &str, file_name: &str) -> String {
    format!(
        "{}/{}/{}",
        origin.trim_end_matches('/'),
        station_prefix,
        file_name
    )
}

fn passthrough_headers(upstream: &reqwest::header::HeaderMap) -> HeaderMap {
    const COPIED: [HeaderName; 5] = [
        header::CONTENT_TYPE,
        header::CONTENT_LENGTH,
        header::ACCEPT_RANGES,
        header::CACHE_CONTROL,
        header::ETAG,
    ];

    let mut headers = HeaderMap::new();
    for name in COPIED {
        if let Some(value) = upstream.get(name.as_str()) {
            if let Ok(value) = HeaderValue::from_bytes(value.as_bytes()) {
                headers.insert(name, value);
            }
        }
    }
    headers
}
