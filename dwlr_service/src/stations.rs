/// Station registry for the DWLR groundwater monitoring service.
///
/// Holds the canonical list of monitoring wells with their static metadata.
/// The registry is built once at startup (from the embedded `stations.toml`
/// or a file named in the service config) and handed out by reference; it
/// has no mutation operations.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::logging::{self, Component};
use crate::model::{ConfigError, Station};

/// Station fixtures compiled into the binary.
pub const BUILTIN_STATIONS_TOML: &str = include_str!("../stations.toml");

/// On-disk layout of a stations file: a list of `[[stations]]` tables.
#[derive(Debug, Deserialize)]
struct StationsFile {
    stations: Vec<Station>,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Immutable, validated collection of monitoring stations.
///
/// Insertion order is preserved and ids are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRegistry {
    stations: Vec<Station>,
}

impl StationRegistry {
    /// Validates `stations` and wraps them in a registry.
    pub fn new(stations: Vec<Station>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for station in &stations {
            validate_station(station)?;
            if !seen.insert(station.id.as_str()) {
                return Err(ConfigError::DuplicateStation(station.id.clone()));
            }
        }
        Ok(Self { stations })
    }

    /// Parses a registry from the contents of a stations TOML file.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: StationsFile = toml::from_str(contents)?;
        Self::new(file.stations)
    }

    /// Reads and parses a stations TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let registry = Self::from_toml_str(&contents)?;
        logging::info(
            Component::Registry,
            None,
            &format!("Loaded {} stations from {}", registry.len(), path.display()),
        );
        Ok(registry)
    }

    /// The six reference stations shipped with the service.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_STATIONS_TOML)
    }

    /// All stations, in insertion order.
    pub fn list_stations(&self) -> &[Station] {
        &self.stations
    }

    /// Looks up a station by id. Returns `None` if not found.
    pub fn find_station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn station_ids(&self) -> Vec<&str> {
        self.stations.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

fn validate_station(station: &Station) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidStation {
        id: station.id.clone(),
        reason: reason.to_string(),
    };

    if station.id.trim().is_empty() {
        return Err(invalid("id must not be empty"));
    }
    if !station.current_level_m.is_finite() || station.current_level_m < 0.0 {
        return Err(invalid("current level must be a non-negative number"));
    }
    // Specific yield is a fraction of aquifer volume; 0 and 1 are not physical.
    if !(station.specific_yield > 0.0 && station.specific_yield < 1.0) {
        return Err(invalid("specific yield must be in (0, 1)"));
    }
    if !(-90.0..=90.0).contains(&station.location.latitude) {
        return Err(invalid("latitude must be in [-90, 90]"));
    }
    if !(-180.0..=180.0).contains(&station.location.longitude) {
        return Err(invalid("longitude must be in [-180, 180]"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WaterStatus;

    fn builtin() -> StationRegistry {
        StationRegistry::builtin().expect("embedded stations.toml should parse")
    }

    const ONE_STATION: &str = r#"
        [[stations]]
        id = "DWLR100"
        name = "Test Well"
        current_level_m = 17.5
        specific_yield = 0.1
        last_updated = "2024-03-01T08:00:00Z"
        location = { latitude = 10.0, longitude = 76.0, district = "Kochi", region = "Kerala" }
    "#;

    #[test]
    fn test_builtin_registry_has_six_stations_in_order() {
        let registry = builtin();
        assert_eq!(
            registry.station_ids(),
            vec!["DWLR001", "DWLR002", "DWLR003", "DWLR004", "DWLR005", "DWLR006"]
        );
    }

    #[test]
    fn test_no_duplicate_station_ids() {
        let mut seen = HashSet::new();
        for station in builtin().list_stations() {
            assert!(
                seen.insert(station.id.clone()),
                "duplicate station id '{}' in builtin registry",
                station.id
            );
        }
    }

    #[test]
    fn test_find_station_returns_correct_entry() {
        let registry = builtin();
        let station = registry.find_station("DWLR003").expect("Chennai East should be in registry");
        assert_eq!(station.name, "Chennai East");
        assert_eq!(station.current_level_m, 12.8);
        assert_eq!(station.location.region, "Tamil Nadu");
    }

    #[test]
    fn test_find_station_returns_none_for_unknown_id() {
        assert!(builtin().find_station("DWLR999").is_none());
        assert!(builtin().find_station("").is_none());
    }

    #[test]
    fn test_fixture_statuses_are_derived_from_levels() {
        let registry = builtin();
        let status = |id: &str| registry.find_station(id).map(Station::status);
        assert_eq!(status("DWLR001"), Some(WaterStatus::Safe));
        assert_eq!(status("DWLR002"), Some(WaterStatus::Warning));
        assert_eq!(status("DWLR003"), Some(WaterStatus::Critical));
        assert_eq!(status("DWLR004"), Some(WaterStatus::Safe));
        assert_eq!(status("DWLR005"), Some(WaterStatus::Critical));
        assert_eq!(status("DWLR006"), Some(WaterStatus::Safe));
    }

    #[test]
    fn test_builtin_specific_yields_are_physical() {
        for station in builtin().list_stations() {
            assert!(
                station.specific_yield > 0.0 && station.specific_yield < 1.0,
                "specific yield for '{}' out of range: {}",
                station.id,
                station.specific_yield
            );
        }
    }

    #[test]
    fn test_from_toml_str_parses_single_station() {
        let registry = StationRegistry::from_toml_str(ONE_STATION).expect("valid toml");
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
        assert_eq!(registry.list_stations()[0].location.district, "Kochi");
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let doubled = format!("{}\n{}", ONE_STATION, ONE_STATION);
        assert_eq!(
            StationRegistry::from_toml_str(&doubled),
            Err(ConfigError::DuplicateStation("DWLR100".to_string()))
        );
    }

    #[test]
    fn test_out_of_range_specific_yield_is_rejected() {
        let bad = ONE_STATION.replace("specific_yield = 0.1", "specific_yield = 1.0");
        let result = StationRegistry::from_toml_str(&bad);
        assert!(
            matches!(result, Err(ConfigError::InvalidStation { ref id, .. }) if id == "DWLR100"),
            "expected InvalidStation, got {:?}",
            result
        );
    }

    #[test]
    fn test_negative_level_is_rejected() {
        let bad = ONE_STATION.replace("current_level_m = 17.5", "current_level_m = -1.0");
        assert!(matches!(
            StationRegistry::from_toml_str(&bad),
            Err(ConfigError::InvalidStation { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let result = StationRegistry::from_toml_str("[[stations]]\nid = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let result = StationRegistry::load("/nonexistent/stations.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_empty_registry_is_allowed() {
        let registry = StationRegistry::new(Vec::new()).expect("empty list is valid");
        assert!(registry.is_empty());
        assert!(registry.find_station("DWLR001").is_none());
    }
}
