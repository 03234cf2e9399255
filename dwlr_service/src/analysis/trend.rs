//! Two-week trend detection.
//!
//! Compares the mean level of the last week of readings against the week
//! before it.

use crate::model::{Reading, Trend};

/// Readings per comparison window.
pub const TREND_WINDOW: usize = 7;

/// Absolute difference of window means, in meters, below which the series
/// counts as stable.
pub const STABLE_BAND_M: f64 = 0.5;

fn mean_level(readings: &[Reading]) -> Option<f64> {
    if readings.is_empty() {
        return None;
    }
    let sum: f64 = readings.iter().map(|r| r.level_m).sum();
    Some(sum / readings.len() as f64)
}

/// Labels the direction of a reading series (oldest first).
///
/// The recent window is the trailing `TREND_WINDOW` readings (or all of them
/// if fewer). The early window is the up-to-`TREND_WINDOW` readings right
/// before it. Short series:
///   - fewer than 2 readings           →  Stable
///   - early window empty (len <= 7)   →  Stable
///   - early window partial (len 8-13) →  mean of what is there
pub fn classify_trend(readings: &[Reading]) -> Trend {
    if readings.len() < 2 {
        return Trend::Stable;
    }

    let recent_start = readings.len().saturating_sub(TREND_WINDOW);
    let early_start = recent_start.saturating_sub(TREND_WINDOW);

    let recent = &readings[recent_start..];
    let early = &readings[early_start..recent_start];

    let (Some(recent_avg), Some(early_avg)) = (mean_level(recent), mean_level(early)) else {
        return Trend::Stable;
    };

    let diff = recent_avg - early_avg;
    if diff.abs() < STABLE_BAND_M {
        Trend::Stable
    } else if diff > 0.0 {
        Trend::Rising
    } else {
        Trend::Falling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn series(levels: impl IntoIterator<Item = f64>) -> Vec<Reading> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        levels
            .into_iter()
            .enumerate()
            .map(|(i, level_m)| Reading {
                timestamp: start + Duration::days(i as i64),
                level_m,
                temperature_c: 25.0,
            })
            .collect()
    }

    #[test]
    fn test_empty_and_single_reading_are_stable() {
        assert_eq!(classify_trend(&[]), Trend::Stable);
        assert_eq!(classify_trend(&series([30.0])), Trend::Stable);
    }

    #[test]
    fn test_identical_levels_are_stable() {
        assert_eq!(classify_trend(&series([18.2; 14])), Trend::Stable);
    }

    #[test]
    fn test_strictly_increasing_series_is_rising() {
        // 0.1 m/day: window means differ by 0.7
        let levels = (0..14).map(|i| 20.0 + 0.1 * i as f64);
        assert_eq!(classify_trend(&series(levels)), Trend::Rising);
    }

    #[test]
    fn test_strictly_decreasing_series_is_falling() {
        let levels = (0..31).map(|i| 25.0 - 0.2 * i as f64);
        assert_eq!(classify_trend(&series(levels)), Trend::Falling);
    }

    #[test]
    fn test_small_rise_within_band_is_stable() {
        // 0.05 m/day: window means differ by 0.35
        let levels = (0..14).map(|i| 20.0 + 0.05 * i as f64);
        assert_eq!(classify_trend(&series(levels)), Trend::Stable);
    }

    #[test]
    fn test_only_last_fourteen_readings_matter() {
        // A big early drop followed by two flat weeks.
        let levels = [5.0; 10].into_iter().chain([20.0; 14]);
        assert_eq!(classify_trend(&series(levels)), Trend::Stable);
    }

    #[test]
    fn test_series_without_early_window_is_stable() {
        let levels = (0..7).map(|i| 10.0 + 2.0 * i as f64);
        assert_eq!(classify_trend(&series(levels)), Trend::Stable);
    }

    #[test]
    fn test_partial_early_window_uses_available_readings() {
        // 9 readings: early = [10, 10], recent = seven readings at 12
        let levels = [10.0, 10.0].into_iter().chain([12.0; 7]);
        assert_eq!(classify_trend(&series(levels)), Trend::Rising);
    }
}
