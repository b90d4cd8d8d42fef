//! Playlist resolution for an airport.
//!
//! Live listings are authoritative when reachable. When the lister comes back
//! empty, the resolver predicts the names of the most recent windows instead,
//! trading accuracy for availability: a predicted segment may not exist, and
//! the continuity controller skips past it on the resulting load error.

use chrono::{DateTime, Utc};

use airwaves_core::{Airport, AtcError, SourceUri, most_recent_timeframe, segment_file_name};

use crate::lister::SegmentLister;

/// Resolve the playlist for `airport` against the current wall clock.
pub async fn resolve_playlist(
    lister: &dyn SegmentLister,
    airport: &Airport,
    max_count: usize,
) -> Result<Vec<SourceUri>, AtcError> {
    resolve_playlist_at(lister, airport, max_count, Utc::now()).await
}

/// Resolve the playlist for `airport` with an explicit `now`, so the
/// generated fallback is reproducible.
pub async fn resolve_playlist_at(
    lister: &dyn SegmentLister,
    airport: &Airport,
    max_count: usize,
    now: DateTime<Utc>,
) -> Result<Vec<SourceUri>, AtcError> {
    let station = airport
        .primary_station()
        .ok_or_else(|| AtcError::MissingStation {
            icao: airport.icao.clone(),
        })?;
    let prefix = airport.storage_prefix(station);

    let listed = lister.list_segments(&prefix, max_count).await;
    if !listed.is_empty() {
        tracing::info!("Resolved {} listed segments for {}", listed.len(), prefix);
        return Ok(listed
            .iter()
            .map(|name| SourceUri::for_segment(&prefix, name))
            .collect());
    }

    tracing::info!(
        "No listed segments for {}, generating {} fallback names",
        prefix,
        max_count
    );
    let mut tracks = Vec::with_capacity(max_count);
    for offset in 1..=max_count {
        let timeframe = most_recent_timeframe(now, offset as u32)?;
        tracks.push(SourceUri::for_segment(
            &prefix,
            &segment_file_name(timeframe),
        ));
    }
    Ok(tracks)
}
