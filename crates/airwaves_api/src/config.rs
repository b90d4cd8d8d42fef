use airwaves_core::Airport;
use serde::{Deserialize, Serialize};

/// Runtime configuration, loaded once at startup and shared by reference.
///
/// Both remote endpoints are optional so the player still runs without them:
/// without a CDN origin the stream proxy rejects requests, and without a
/// listing endpoint the resolver always falls back to generated playlists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub cdn_origin: Option<String>,
    #[serde(default)]
    pub listing_endpoint: Option<String>,
    /// Segments per playlist, both as the listing cap and the fallback count.
    #[serde(default = "default_max_segment_count")]
    pub max_segment_count: usize,
    pub airports: Vec<Airport>,
}

fn default_max_segment_count() -> usize {
    48
}

impl AppConfig {
    pub fn find_airport(&self, iata: &str) -> Option<&Airport> {
        self.airports
            .iter()
            .find(|airport| airport.iata.eq_ignore_ascii_case(iata))
    }
}
