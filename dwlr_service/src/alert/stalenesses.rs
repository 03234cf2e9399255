/// Station freshness detection.
///
/// Each station carries the instant of its last recorder upload. A station
/// that has not reported for a while keeps showing its old level, which is
/// easy to miss on an overview. This module flags those stations.
///
/// # Clock injection
/// All functions accept a `now: DateTime<Utc>` parameter rather than calling
/// `Utc::now()` internally. This keeps staleness deterministic in tests.

use chrono::{DateTime, Utc};

use crate::model::Station;

/// Default freshness window: one day of missed daily uploads.
pub const DEFAULT_STALE_AFTER_MINUTES: u64 = 24 * 60;

/// Returns `true` if the station's last update is older than
/// `max_age_minutes` relative to `now`.
///
/// Staleness is strictly greater than the threshold:
///   age > max_age_minutes  →  stale
///   age == max_age_minutes →  not stale
///
/// A `last_updated` in the future counts as fresh.
pub fn is_stale_at(station: &Station, max_age_minutes: u64, now: DateTime<Utc>) -> bool {
    let age_minutes = (now - station.last_updated).num_minutes();
    age_minutes > 0 && age_minutes as u64 > max_age_minutes
}

/// Convenience wrapper that uses the real current time.
/// Use `is_stale_at` in tests to keep them deterministic.
pub fn is_stale(station: &Station, max_age_minutes: u64) -> bool {
    is_stale_at(station, max_age_minutes, Utc::now())
}

/// Ids of the stations that are stale at `now`, in registry order.
pub fn stale_station_ids<'a>(
    stations: &'a [Station],
    max_age_minutes: u64,
    now: DateTime<Utc>,
) -> Vec<&'a str> {
    stations
        .iter()
        .filter(|s| is_stale_at(s, max_age_minutes, now))
        .map(|s| s.id.as_str())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
