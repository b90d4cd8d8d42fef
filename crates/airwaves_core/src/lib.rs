mod models;
mod playlist;
mod timeframe;

pub use crate::models::*;
pub use crate::playlist::{AtcPlaylist, EngineState, Volume};
pub use crate::timeframe::{
    SEGMENT_EXTENSION, SEGMENT_WINDOW_MINUTES, build_segment_path, format_timeframe_name,
    most_recent_timeframe, parse_timeframe_name, segment_file_name,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtcError {
    #[error("Timeframe offset must be at least 1, got {offset}")]
    InvalidOffset { offset: u32 },
    #[error("Airport {icao} has no stations configured")]
    MissingStation { icao: String },
    #[error("Segment name {name:?} does not match the YYYY-MM-DD_HHMM layout")]
    InvalidSegmentName { name: String },
    #[error("Timestamp out of range for timeframe arithmetic")]
    TimeArithmetic(#[from] chrono::RoundingError),
}
