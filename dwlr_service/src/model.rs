/// Station, Reading, status/trend/recharge categories, ConfigError
/// core data structures and error handling
///
/// Core data types for the DWLR groundwater monitoring service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic beyond trivial accessors and no I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::thresholds::classify_status;

// ---------------------------------------------------------------------------
// Station types
// ---------------------------------------------------------------------------

/// Geographic and administrative position of a monitoring well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    pub district: String,
    /// State or region the district belongs to.
    pub region: String,
}

/// A Digital Water Level Recorder (DWLR) monitoring station.
///
/// There is deliberately no stored status: `status()` is computed from
/// `current_level_m` on every call so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Stable registry key, e.g. "DWLR001".
    pub id: String,
    pub name: String,
    pub location: Location,
    /// Current groundwater level in meters.
    pub current_level_m: f64,
    /// Dimensionless aquifer property in (0, 1).
    pub specific_yield: f64,
    pub last_updated: DateTime<Utc>,
}

impl Station {
    /// Status category for the station's current level.
    pub fn status(&self) -> WaterStatus {
        classify_status(self.current_level_m)
    }
}

// ---------------------------------------------------------------------------
// Reading types
// ---------------------------------------------------------------------------

/// One daily observation at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Serialized as RFC 3339, e.g. "2024-01-15T10:30:00Z".
    pub timestamp: DateTime<Utc>,
    /// Groundwater level in meters, never negative.
    pub level_m: f64,
    /// Water temperature in degrees Celsius.
    pub temperature_c: f64,
}

// ---------------------------------------------------------------------------
// Classification types
// ---------------------------------------------------------------------------

/// Groundwater status categories, in descending order of available water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterStatus {
    Safe,
    Warning,
    Critical,
}

impl std::fmt::Display for WaterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaterStatus::Safe => write!(f, "SAFE"),
            WaterStatus::Warning => write!(f, "WARNING"),
            WaterStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Direction of the water level over the last two weeks of readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Rising => write!(f, "rising"),
            Trend::Falling => write!(f, "falling"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

/// Qualitative band for a recharge estimate in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RechargeStatus {
    Positive,
    SlightPositive,
    SlightNegative,
    Negative,
}

impl std::fmt::Display for RechargeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RechargeStatus::Positive => write!(f, "Positive"),
            RechargeStatus::SlightPositive => write!(f, "Slight Positive"),
            RechargeStatus::SlightNegative => write!(f, "Slight Negative"),
            RechargeStatus::Negative => write!(f, "Negative"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when loading station fixtures or service settings.
///
/// Domain operations (classification, generation, estimation) never fail;
/// only construction of the registry and configuration can.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The file could not be read.
    Io { path: String, message: String },
    /// The TOML could not be deserialized.
    Parse(String),
    /// Two stations share the same id.
    DuplicateStation(String),
    /// A station has an out-of-range attribute.
    InvalidStation { id: String, reason: String },
    /// A service setting is out of range.
    InvalidSetting(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, message } => write!(f, "Cannot read {}: {}", path, message),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::DuplicateStation(id) => write!(f, "Duplicate station id: {}", id),
            ConfigError::InvalidStation { id, reason } => {
                write!(f, "Invalid station {}: {}", id, reason)
            }
            ConfigError::InvalidSetting(msg) => write!(f, "Invalid setting: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn station_with_level(level: f64) -> Station {
        Station {
            id: "TEST001".to_string(),
            name: "Test Well".to_string(),
            location: Location {
                latitude: 17.0,
                longitude: 78.0,
                district: "Test".to_string(),
                region: "Test".to_string(),
            },
            current_level_m: level,
            specific_yield: 0.1,
            last_updated: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_status_follows_current_level() {
        let mut station = station_with_level(25.0);
        assert_eq!(station.status(), WaterStatus::Safe);

        // Changing the level must change the status; nothing is cached.
        station.current_level_m = 10.0;
        assert_eq!(station.status(), WaterStatus::Critical);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&WaterStatus::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        let json = serde_json::to_string(&RechargeStatus::SlightNegative).unwrap();
        assert_eq!(json, "\"slight_negative\"");
    }

    #[test]
    fn test_reading_timestamp_serializes_as_rfc3339() {
        let reading = Reading {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            level_m: 25.4,
            temperature_c: 27.5,
        };
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["timestamp"], "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidStation {
            id: "DWLR009".to_string(),
            reason: "specific yield must be in (0, 1)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid station DWLR009: specific yield must be in (0, 1)"
        );
    }
}
