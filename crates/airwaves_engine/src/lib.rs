mod lister;
mod resolver;

pub use crate::lister::{HttpBucketLister, SegmentLister};
pub use crate::resolver::{resolve_playlist, resolve_playlist_at};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use airwaves_core::{Airport, AtcError, AtcPlaylist, EngineState, SourceUri, Volume};

/// Snapshot of the player handed to API consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub current_track: Option<SourceUri>,
    pub current_index: usize,
    pub track_count: usize,
    pub volume: u8,
    pub music_state: EngineState,
}

/// Result of applying one playlist resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOutcome {
    pub applied: bool,
    pub track_count: usize,
}

struct PlayerState {
    playlist: AtcPlaylist,
    volume: Volume,
    music_state: EngineState,
    applied_seq: u64,
}

/// Owns the playlist state and the guard against superseded resolutions.
///
/// Every resolution takes a token up front; a result is only installed when
/// no newer resolution has been issued since, so switching airports while a
/// resolution is in flight always leaves the latest selection in place.
pub struct Player {
    lister: Arc<dyn SegmentLister>,
    max_segments: usize,
    resolve_seq: AtomicU64,
    state: Mutex<PlayerState>,
}

impl Player {
    pub fn new(lister: Arc<dyn SegmentLister>, max_segments: usize) -> Self {
        Player {
            lister,
            max_segments,
            resolve_seq: AtomicU64::new(0),
            state: Mutex::new(PlayerState {
                playlist: AtcPlaylist::new(),
                volume: Volume::default(),
                music_state: EngineState::Unstarted,
                applied_seq: 0,
            }),
        }
    }

    /// Resolve a playlist for `airport` and install it, unless a newer
    /// selection was issued while the resolution was in flight.
    pub async fn select_airport(&self, airport: &Airport) -> Result<SelectOutcome, AtcError> {
        let token = self.begin_resolution();
        let tracks = resolver::resolve_playlist(self.lister.as_ref(), airport, self.max_segments)
            .await?;
        Ok(self.apply_resolution(token, tracks))
    }

    /// Take a token for a resolution that is about to start.
    pub fn begin_resolution(&self) -> u64 {
        self.resolve_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Install a resolved playlist unless a newer token has been issued or
    /// applied in the meantime. A stale result is discarded and reported with
    /// `applied = false`.
    pub fn apply_resolution(&self, token: u64, tracks: Vec<SourceUri>) -> SelectOutcome {
        let latest = self.resolve_seq.load(Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        if token < latest || token <= state.applied_seq {
            tracing::debug!(
                "Discarding stale playlist resolution (token {}, latest {})",
                token,
                latest
            );
            return SelectOutcome {
                applied: false,
                track_count: state.playlist.len(),
            };
        }

        let track_count = tracks.len();
        state.playlist.replace(tracks);
        state.applied_seq = token;
        SelectOutcome {
            applied: true,
            track_count,
        }
    }

    /// The single continuity transition: advance past the current track,
    /// whether it ended naturally or failed to play.
    pub fn advance(&self) -> PlayerSnapshot {
        let mut state = self.state.lock().unwrap();
        state.playlist.advance_next();
        snapshot_of(&state)
    }

    pub fn set_volume(&self, percent: i64) -> u8 {
        let mut state = self.state.lock().unwrap();
        state.volume = Volume::from_percent(percent);
        state.volume.as_percent()
    }

    pub fn set_music_state(&self, music_state: EngineState) {
        let mut state = self.state.lock().unwrap();
        state.music_state = music_state;
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        snapshot_of(&self.state.lock().unwrap())
    }
}

fn snapshot_of(state: &PlayerState) -> PlayerSnapshot {
    PlayerSnapshot {
        current_track: state.playlist.current().cloned(),
        current_index: state.playlist.current_index(),
        track_count: state.playlist.len(),
        volume: state.volume.as_percent(),
        music_state: state.music_state,
    }
}
