/// Synthetic daily reading series for a station.
///
/// There is no recorder feed behind this service, so the details view is
/// fed a generated series: the station's current level plus a yearly
/// sinusoid and uniform noise, one reading per day ending at `now`.
///
/// # Clock and randomness injection
/// `generate_readings_at` takes both `now` and the random source as
/// arguments. Tests pass a fixed instant and a seeded `ChaCha8Rng` to get an
/// exact, replayable series; `generate_readings` is the wall-clock wrapper.

use std::f64::consts::PI;

use chrono::{DateTime, Datelike, Duration, Utc};
use rand::Rng;
use serde::Deserialize;

use crate::logging::{self, Component};
use crate::model::{ConfigError, Reading};
use crate::stations::StationRegistry;

/// Window length used when the caller does not ask for one.
pub const DEFAULT_DAYS: u32 = 30;

/// Longest window the generator will produce: ten years of daily readings.
pub const MAX_DAYS: u32 = 3660;

/// Tunables for the synthetic series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Base level used when the station id is not in the registry.
    pub fallback_base_level_m: f64,
    /// Amplitude of the yearly sinusoid.
    pub seasonal_amplitude_m: f64,
    /// Half-width of the uniform daily noise.
    pub noise_amplitude_m: f64,
    pub temperature_min_c: f64,
    pub temperature_max_c: f64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            fallback_base_level_m: 20.0,
            seasonal_amplitude_m: 3.0,
            noise_amplitude_m: 1.0,
            temperature_min_c: 20.0,
            temperature_max_c: 35.0,
        }
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::InvalidSetting(msg.to_string()));

        let all_finite = [
            self.fallback_base_level_m,
            self.seasonal_amplitude_m,
            self.noise_amplitude_m,
            self.temperature_min_c,
            self.temperature_max_c,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return invalid("generator settings must be finite numbers");
        }
        if self.fallback_base_level_m < 0.0 {
            return invalid("fallback_base_level_m must be non-negative");
        }
        if self.seasonal_amplitude_m < 0.0 || self.noise_amplitude_m < 0.0 {
            return invalid("amplitudes must be non-negative");
        }
        // gen_range panics on an empty range or one whose width overflows
        if self.temperature_min_c >= self.temperature_max_c {
            return invalid("temperature_min_c must be below temperature_max_c");
        }
        if !(self.temperature_max_c - self.temperature_min_c).is_finite()
            || !(2.0 * self.noise_amplitude_m).is_finite()
        {
            return invalid("generator ranges are too wide");
        }
        Ok(())
    }
}

/// Rounds half-up at `1 / scale` (e.g. `scale = 10.0` rounds to 0.1).
pub(crate) fn round_half_up(value: f64, scale: f64) -> f64 {
    (value * scale + 0.5).floor() / scale
}

/// Seasonal offset for the calendar month of `date`.
fn seasonal_variation(date: DateTime<Utc>, amplitude: f64) -> f64 {
    (date.month0() as f64 / 12.0 * 2.0 * PI).sin() * amplitude
}

/// Generates `days + 1` daily readings for `station_id`, oldest first, the
/// last one stamped exactly `now`.
///
/// An unknown station id falls back to `settings.fallback_base_level_m`
/// rather than failing. `days` is capped at `MAX_DAYS`, and settings that
/// fail `validate` are replaced by the defaults. Each reading draws the level noise first and the
/// temperature second from `rng`.
pub fn generate_readings_at(
    registry: &StationRegistry,
    station_id: &str,
    days: u32,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
    settings: &GeneratorSettings,
) -> Vec<Reading> {
    let defaults = GeneratorSettings::default();
    let settings = match settings.validate() {
        Ok(()) => settings,
        Err(e) => {
            logging::warn(
                Component::Generator,
                Some(station_id),
                &format!("{}; using default generator settings", e),
            );
            &defaults
        }
    };
    let days = if days > MAX_DAYS {
        logging::warn(
            Component::Generator,
            Some(station_id),
            &format!("Requested {} days, capping at {}", days, MAX_DAYS),
        );
        MAX_DAYS
    } else {
        days
    };

    let base_level = match registry.find_station(station_id) {
        Some(station) => station.current_level_m,
        None => {
            logging::debug(
                Component::Generator,
                Some(station_id),
                &format!(
                    "Unknown station, using fallback base level {} m",
                    settings.fallback_base_level_m
                ),
            );
            settings.fallback_base_level_m
        }
    };

    let mut readings = Vec::with_capacity(days as usize + 1);
    for offset in (0..=days).rev() {
        let date = now - Duration::days(i64::from(offset));

        let seasonal = seasonal_variation(date, settings.seasonal_amplitude_m);
        let noise = if settings.noise_amplitude_m > 0.0 {
            rng.gen_range(-settings.noise_amplitude_m..settings.noise_amplitude_m)
        } else {
            0.0
        };
        let level = (base_level + seasonal + noise).max(0.0);
        let temperature = rng.gen_range(settings.temperature_min_c..settings.temperature_max_c);

        readings.push(Reading {
            timestamp: date,
            level_m: round_half_up(level, 10.0),
            temperature_c: temperature,
        });
    }

    logging::debug(
        Component::Generator,
        Some(station_id),
        &format!("Generated {} readings", readings.len()),
    );
    readings
}

/// Convenience wrapper using the wall clock, a thread-local RNG and default
/// settings. Use `generate_readings_at` in tests.
pub fn generate_readings(registry: &StationRegistry, station_id: &str, days: u32) -> Vec<Reading> {
    generate_readings_at(
        registry,
        station_id,
        days,
        Utc::now(),
        &mut rand::thread_rng(),
        &GeneratorSettings::default(),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
