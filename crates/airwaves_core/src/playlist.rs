//! Playback continuity over a resolved playlist.

use serde::{Deserialize, Serialize};

use crate::models::SourceUri;

/// Ordered playlist of playable sources with the currently playing index.
///
/// Only two mutations exist: replacing the whole list and advancing by one.
/// Advancing wraps to the start, and is used for the natural end of a track
/// and for a playback error alike, so a run of broken segments is skipped one
/// at a time without special-casing.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtcPlaylist {
    tracks: Vec<SourceUri>,
    current_index: usize,
}

impl AtcPlaylist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the playlist and reset the position to the first track.
    pub fn replace(&mut self, tracks: Vec<SourceUri>) {
        tracing::debug!("Replacing playlist with {} tracks", tracks.len());
        self.tracks = tracks;
        self.current_index = 0;
    }

    /// Advance to the next track, wrapping to the start at the end of the
    /// list. Returns the new index, or `None` when the playlist is empty.
    pub fn advance_next(&mut self) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current_index = (self.current_index + 1) % self.tracks.len();
        Some(self.current_index)
    }

    /// The currently selected source, derived from the index rather than
    /// stored separately.
    pub fn current(&self) -> Option<&SourceUri> {
        self.tracks.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn tracks(&self) -> &[SourceUri] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Playback volume as a clamped 0-100 percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Volume(u8);

impl Volume {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 100;

    pub fn from_percent(value: i64) -> Self {
        Volume(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    pub fn as_percent(&self) -> u8 {
        self.0
    }

    /// The 0.0-1.0 scalar a playback element expects.
    pub fn as_scalar(&self) -> f32 {
        f32::from(self.0) / 100.0
    }
}

impl Default for Volume {
    /// Default level for the ATC feed, quieter than the music bed.
    fn default() -> Self {
        Volume(25)
    }
}

/// State vocabulary of the embedded background-music engine.
///
/// The engine reports raw numeric codes; they are translated here, once, so
/// nothing else in the application handles the engine's own vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl EngineState {
    pub fn from_raw(code: i32) -> Option<Self> {
        let state = match code {
            -1 => EngineState::Unstarted,
            0 => EngineState::Ended,
            1 => EngineState::Playing,
            2 => EngineState::Paused,
            3 => EngineState::Buffering,
            5 => EngineState::Cued,
            _ => return None,
        };
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(names: &[&str]) -> Vec<SourceUri> {
        names
            .iter()
            .map(|name| SourceUri::for_segment("KSFO_Gnd2", name))
            .collect()
    }

    #[test]
    fn test_advance_wraps_around() {
        let mut playlist = AtcPlaylist::new();
        playlist.replace(tracks(&["a.mp3", "b.mp3", "c.mp3"]));

        assert_eq!(playlist.advance_next(), Some(1));
        assert_eq!(playlist.advance_next(), Some(2));
        assert_eq!(playlist.advance_next(), Some(0));
        assert_eq!(
            playlist.current().unwrap().as_str(),
            "atc://KSFO_Gnd2/a.mp3"
        );
    }

    #[test]
    fn test_replace_resets_position() {
        let mut playlist = AtcPlaylist::new();
        playlist.replace(tracks(&["a.mp3", "b.mp3", "c.mp3"]));
        playlist.advance_next();
        playlist.advance_next();
        assert_eq!(playlist.current_index(), 2);

        playlist.replace(tracks(&["d.mp3", "e.mp3"]));
        assert_eq!(playlist.current_index(), 0);
        assert_eq!(
            playlist.current().unwrap().as_str(),
            "atc://KSFO_Gnd2/d.mp3"
        );
    }

    #[test]
    fn test_empty_playlist_has_no_current_track() {
        let mut playlist = AtcPlaylist::new();
        assert!(playlist.is_empty());
        assert_eq!(playlist.current(), None);
        assert_eq!(playlist.advance_next(), None);

        // Replacing with an empty list goes back to the empty state.
        playlist.replace(tracks(&["a.mp3"]));
        playlist.replace(Vec::new());
        assert_eq!(playlist.current(), None);
        assert_eq!(playlist.advance_next(), None);
    }

    #[test]
    fn test_single_track_loops_on_itself() {
        let mut playlist = AtcPlaylist::new();
        playlist.replace(tracks(&["a.mp3"]));
        assert_eq!(playlist.advance_next(), Some(0));
        assert_eq!(playlist.advance_next(), Some(0));
    }

    #[test]
    fn test_volume_is_clamped() {
        assert_eq!(Volume::from_percent(-20).as_percent(), 0);
        assert_eq!(Volume::from_percent(0).as_percent(), 0);
        assert_eq!(Volume::from_percent(50).as_percent(), 50);
        assert_eq!(Volume::from_percent(100).as_percent(), 100);
        assert_eq!(Volume::from_percent(250).as_percent(), 100);
    }

    #[test]
    fn test_volume_scalar_conversion() {
        assert_eq!(Volume::from_percent(50).as_scalar(), 0.5);
        assert_eq!(Volume::from_percent(100).as_scalar(), 1.0);
        assert_eq!(Volume::default().as_percent(), 25);
    }

    #[test]
    fn test_engine_state_translation_table() {
        assert_eq!(EngineState::from_raw(-1), Some(EngineState::Unstarted));
        assert_eq!(EngineState::from_raw(0), Some(EngineState::Ended));
        assert_eq!(EngineState::from_raw(1), Some(EngineState::Playing));
        assert_eq!(EngineState::from_raw(2), Some(EngineState::Paused));
        assert_eq!(EngineState::from_raw(3), Some(EngineState::Buffering));
        assert_eq!(EngineState::from_raw(5), Some(EngineState::Cued));
    }

    #[test]
    fn test_engine_state_rejects_unknown_codes() {
        assert_eq!(EngineState::from_raw(4), None);
        assert_eq!(EngineState::from_raw(42), None);
    }
}
