//! Timestamp bucketing for segment names.
//!
//! Segments cover 30 minute windows and are named after the UTC boundary of
//! their window, `YYYY-MM-DD_HHMM`. The fields are fixed width and
//! zero padded, so lexicographic order on the names is chronological; the
//! lister relies on that to sort listings without parsing them.

use chrono::{DateTime, DurationRound, NaiveDateTime, TimeDelta, Timelike, Utc};

use crate::AtcError;

/// Length of one segment window in minutes.
pub const SEGMENT_WINDOW_MINUTES: i64 = 30;

/// Audio extension recognized for segments.
pub const SEGMENT_EXTENSION: &str = "mp3";

const NAME_LAYOUT: &str = "%Y-%m-%d_%H%M";

/// Return the 30-minute-aligned UTC boundary `offset` windows before `now`.
///
/// Starting from `now`, the sub-minute components are dropped, `offset * 30`
/// minutes are subtracted, and the minute value is floored to `0` or `30`.
/// Pure and deterministic: the same inputs always produce the same boundary,
/// which keeps generated fallback playlists reproducible.
pub fn most_recent_timeframe(now: DateTime<Utc>, offset: u32) -> Result<DateTime<Utc>, AtcError> {
    if offset == 0 {
        return Err(AtcError::InvalidOffset { offset });
    }
    let shifted = now - TimeDelta::minutes(SEGMENT_WINDOW_MINUTES * i64::from(offset));
    Ok(shifted.duration_trunc(TimeDelta::minutes(SEGMENT_WINDOW_MINUTES))?)
}

/// Format an aligned timeframe as `YYYY-MM-DD_HHMM` (UTC fields only, never
/// local time, so names compare the same on every machine).
pub fn format_timeframe_name(timeframe: DateTime<Utc>) -> String {
    timeframe.format(NAME_LAYOUT).to_string()
}

/// Parse a segment name back into its timeframe. Rejects names whose minute
/// component is not on the 30 minute grid.
pub fn parse_timeframe_name(name: &str) -> Result<DateTime<Utc>, AtcError> {
    let parsed = NaiveDateTime::parse_from_str(name, NAME_LAYOUT).map_err(|_| {
        AtcError::InvalidSegmentName {
            name: name.to_string(),
        }
    })?;
    if i64::from(parsed.minute()) % SEGMENT_WINDOW_MINUTES != 0 {
        return Err(AtcError::InvalidSegmentName {
            name: name.to_string(),
        });
    }
    Ok(parsed.and_utc())
}

/// File name for a timeframe, e.g. `2024-03-15_1200.mp3`.
pub fn segment_file_name(timeframe: DateTime<Utc>) -> String {
    format!("{}.{SEGMENT_EXTENSION}", format_timeframe_name(timeframe))
}

/// Relative storage path for the segment `offset` windows before `now` under
/// a station prefix, e.g. `KSFO_Gnd2/2024-03-15_1200.mp3`.
pub fn build_segment_path(
    station_prefix: &str,
    now: DateTime<Utc>,
    offset: u32,
) -> Result<String, AtcError> {
    let timeframe = most_recent_timeframe(now, offset)?;
    Ok(format!("{station_prefix}/{}", segment_file_name(timeframe)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_timeframes_are_aligned() {
        let samples = [
            utc(2024, 3, 15, 12, 47, 23),
            utc(2024, 3, 15, 12, 30, 0),
            utc(2024, 3, 15, 12, 0, 1),
            utc(2024, 12, 31, 23, 59, 59),
            utc(2024, 1, 1, 0, 0, 0),
        ];

        for now in samples {
            for offset in 1..=8 {
                let timeframe = most_recent_timeframe(now, offset).unwrap();
                assert!(
                    timeframe.minute() == 0 || timeframe.minute() == 30,
                    "minute {} not aligned for now={now} offset={offset}",
                    timeframe.minute()
                );
                assert_eq!(timeframe.second(), 0);
                assert_eq!(timeframe.nanosecond(), 0);
            }
        }
    }

    #[test]
    fn test_consecutive_offsets_step_back_thirty_minutes() {
        let now = utc(2024, 3, 15, 12, 47, 23);
        for offset in 2..=48 {
            let newer = most_recent_timeframe(now, offset - 1).unwrap();
            let older = most_recent_timeframe(now, offset).unwrap();
            assert!(older < newer);
            assert_eq!(newer - older, TimeDelta::minutes(30));
        }
    }

    #[test]
    fn test_offset_one_from_boundary() {
        // Exactly on a boundary: one offset is the previous full window.
        let timeframe = most_recent_timeframe(utc(2024, 3, 15, 12, 30, 0), 1).unwrap();
        assert_eq!(timeframe, utc(2024, 3, 15, 12, 0, 0));
    }

    #[test]
    fn test_offset_one_mid_window() {
        let timeframe = most_recent_timeframe(utc(2024, 3, 15, 12, 47, 23), 1).unwrap();
        assert_eq!(timeframe, utc(2024, 3, 15, 12, 0, 0));

        let timeframe = most_recent_timeframe(utc(2024, 3, 15, 12, 59, 59), 1).unwrap();
        assert_eq!(timeframe, utc(2024, 3, 15, 12, 0, 0));
    }

    #[test]
    fn test_zero_offset_is_rejected() {
        let result = most_recent_timeframe(Utc::now(), 0);
        assert!(matches!(result, Err(AtcError::InvalidOffset { offset: 0 })));
    }

    #[test]
    fn test_name_round_trip() {
        let aligned = [
            utc(2024, 3, 15, 12, 0, 0),
            utc(2024, 3, 15, 12, 30, 0),
            utc(2023, 1, 9, 0, 0, 0),
            utc(2025, 11, 30, 23, 30, 0),
        ];

        for timeframe in aligned {
            let name = format_timeframe_name(timeframe);
            assert_eq!(parse_timeframe_name(&name).unwrap(), timeframe);
        }
    }

    #[test]
    fn test_name_formatting_is_zero_padded() {
        let name = format_timeframe_name(utc(2024, 1, 2, 3, 0, 0));
        assert_eq!(name, "2024-01-02_0300");
    }

    #[test]
    fn test_parse_rejects_unaligned_minutes() {
        assert!(matches!(
            parse_timeframe_name("2024-01-01_0015"),
            Err(AtcError::InvalidSegmentName { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for name in ["", "not-a-name", "2024-13-01_0000", "2024-01-01T0000"] {
            assert!(
                parse_timeframe_name(name).is_err(),
                "expected {name:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_build_segment_path() {
        let now = utc(2024, 3, 15, 12, 47, 23);
        let path = build_segment_path("KSFO_Gnd2", now, 1).unwrap();
        assert_eq!(path, "KSFO_Gnd2/2024-03-15_1200.mp3");

        let path = build_segment_path("KSFO_Gnd2", now, 4).unwrap();
        assert_eq!(path, "KSFO_Gnd2/2024-03-15_1030.mp3");
    }
}
