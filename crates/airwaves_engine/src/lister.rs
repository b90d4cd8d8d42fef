//! Listing of segment files actually present in the storage bucket.

use async_trait::async_trait;

use airwaves_core::SEGMENT_EXTENSION;

/// Source of object names under a station prefix, newest first.
///
/// Failures are never surfaced: a lister that cannot reach its backend
/// returns an empty listing and the resolver falls back to generated names.
/// Callers must treat empty as "try the fallback", not as a fatal condition.
#[async_trait]
pub trait SegmentLister: Send + Sync {
    async fn list_segments(&self, station_prefix: &str, max_count: usize) -> Vec<String>;
}

/// Lister backed by a REST listing endpoint in front of the storage bucket.
///
/// The endpoint returns the object names under a prefix as JSON, either as a
/// bare array or wrapped in `{"keys": [...]}`. The endpoint guarantees no
/// ordering; names are re-sorted here.
pub struct HttpBucketLister {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl HttpBucketLister {
    pub fn new(client: reqwest::Client, endpoint: Option<String>) -> Self {
        HttpBucketLister { client, endpoint }
    }

    async fn fetch_names(
        &self,
        endpoint: &str,
        station_prefix: &str,
        max_count: usize,
    ) -> Result<Vec<String>, reqwest::Error> {
        let max_keys = max_count.to_string();
        let response = self
            .client
            .get(endpoint)
            .query(&[("prefix", station_prefix), ("max-keys", max_keys.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        Ok(parse_listing(&body))
    }
}

#[async_trait]
impl SegmentLister for HttpBucketLister {
    async fn list_segments(&self, station_prefix: &str, max_count: usize) -> Vec<String> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            tracing::warn!(
                "Segment listing endpoint is not configured, treating {} as empty",
                station_prefix
            );
            return Vec::new();
        };

        match self.fetch_names(endpoint, station_prefix, max_count).await {
            Ok(names) => select_segments(names, max_count),
            Err(error) => {
                tracing::warn!("Listing request for {} failed: {}", station_prefix, error);
                Vec::new()
            }
        }
    }
}

/// Extract object names from a listing response body. Malformed responses
/// degrade to an empty listing.
pub(crate) fn parse_listing(body: &str) -> Vec<String> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!("Malformed listing response: {}", error);
            return Vec::new();
        }
    };

    let items = match &value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(map) => match map.get("keys").and_then(|keys| keys.as_array()) {
            Some(items) => items,
            None => {
                tracing::warn!("Listing response carries no keys");
                return Vec::new();
            }
        },
        _ => {
            tracing::warn!("Listing response is neither an array nor an object");
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// Keep recognized audio files, newest first, capped at `max_count`.
///
/// Lexicographic order on the fixed-width timestamp names is chronological,
/// so sort + reverse yields newest first.
pub(crate) fn select_segments(mut names: Vec<String>, max_count: usize) -> Vec<String> {
    let suffix = format!(".{SEGMENT_EXTENSION}");
    names.retain(|name| name.ends_with(&suffix));
    names.sort();
    names.reverse();
    names.truncate(max_count);
    names
}
