use std::fmt;

use serde::{Deserialize, Serialize};

/// A single audio feed at an airport, named after the path segment it uses in
/// the storage bucket (e.g. `Gnd2`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub utc_offset_hours: i8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    pub name: String,
    pub iata: String,
    pub icao: String,
    pub restricted: bool,
    pub location: Location,
    pub stations: Vec<Station>,
}

impl Airport {
    /// The station currently used for audio. The configuration allows several
    /// stations per airport; playback always follows the first one.
    pub fn primary_station(&self) -> Option<&Station> {
        self.stations.first()
    }

    /// Storage prefix for one of this airport's stations, e.g. `KSFO_Gnd2`.
    pub fn storage_prefix(&self, station: &Station) -> String {
        format!("{}_{}", self.icao, station.path)
    }
}

/// URI scheme understood by the stream proxy.
pub const SOURCE_SCHEME: &str = "atc";

/// Opaque playable source identifier, e.g.
/// `atc://KSFO_Gnd2/2024-03-15_1200.mp3`. Resolved into a real CDN URL only
/// by the stream proxy, so the playback side never talks to remote origins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceUri(String);

impl SourceUri {
    pub fn for_segment(station_prefix: &str, file_name: &str) -> Self {
        SourceUri(format!("{SOURCE_SCHEME}://{station_prefix}/{file_name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path portion after the scheme, which the proxy joins to the CDN
    /// origin. `None` when the URI does not carry the expected scheme.
    pub fn relative_path(&self) -> Option<&str> {
        self.0
            .strip_prefix(SOURCE_SCHEME)
            .and_then(|rest| rest.strip_prefix("://"))
    }
}

impl fmt::Display for SourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
