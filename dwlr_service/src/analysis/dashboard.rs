//! Overview and per-station report assembly.
//!
//! Everything here is derived from the registry and a reading series on
//! demand; nothing is cached between calls.

use serde::Serialize;

use crate::alert::thresholds::{ExtractionAdvice, extraction_advice};
use crate::analysis::recharge::{recharge_status, weekly_recharge};
use crate::analysis::trend::classify_trend;
use crate::model::{Reading, RechargeStatus, Station, Trend, WaterStatus};
use crate::stations::StationRegistry;

/// How many critical stations the overview lists.
pub const TOP_DEPLETED_LIMIT: usize = 3;

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

/// Station counts per status plus the most depleted critical wells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub safe: usize,
    pub warning: usize,
    pub critical: usize,
    /// Ids of critical stations, lowest level first.
    pub top_depleted: Vec<String>,
}

impl DashboardSummary {
    pub fn from_registry(registry: &StationRegistry) -> Self {
        let stations = registry.list_stations();
        let count = |status: WaterStatus| stations.iter().filter(|s| s.status() == status).count();

        let mut critical: Vec<&Station> = stations
            .iter()
            .filter(|s| s.status() == WaterStatus::Critical)
            .collect();
        critical.sort_by(|a, b| a.current_level_m.total_cmp(&b.current_level_m));

        Self {
            total: stations.len(),
            safe: count(WaterStatus::Safe),
            warning: count(WaterStatus::Warning),
            critical: count(WaterStatus::Critical),
            top_depleted: critical
                .into_iter()
                .take(TOP_DEPLETED_LIMIT)
                .map(|s| s.id.clone())
                .collect(),
        }
    }

    /// Alert text shown when any station is critical.
    pub fn critical_alert(&self) -> Option<String> {
        if self.critical == 0 {
            return None;
        }
        Some(format!(
            "{} station(s) have critical water levels",
            self.critical
        ))
    }
}

// ---------------------------------------------------------------------------
// Station report
// ---------------------------------------------------------------------------

/// Min / max / mean level of a reading series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelStats {
    pub min_m: f64,
    pub max_m: f64,
    pub mean_m: f64,
}

impl LevelStats {
    /// Returns `None` for an empty series.
    pub fn from_readings(readings: &[Reading]) -> Option<Self> {
        if readings.is_empty() {
            return None;
        }
        let (min_m, max_m, sum) = readings.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, sum), r| (lo.min(r.level_m), hi.max(r.level_m), sum + r.level_m),
        );
        Some(Self {
            min_m,
            max_m,
            mean_m: sum / readings.len() as f64,
        })
    }
}

/// Everything the details view shows for one station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReport {
    pub station: Station,
    pub status: WaterStatus,
    pub advice: ExtractionAdvice,
    pub trend: Trend,
    /// Weekly recharge estimate in millimeters.
    pub recharge_mm: f64,
    pub recharge_status: RechargeStatus,
    pub level_stats: Option<LevelStats>,
    pub latest: Option<Reading>,
    pub readings: Vec<Reading>,
}

impl StationReport {
    /// Assembles the report; takes ownership of the series since it belongs
    /// to this view only.
    pub fn build(station: &Station, readings: Vec<Reading>) -> Self {
        let status = station.status();
        let recharge_mm = weekly_recharge(&readings, station.specific_yield);
        Self {
            station: station.clone(),
            status,
            advice: extraction_advice(status),
            trend: classify_trend(&readings),
            recharge_mm,
            recharge_status: recharge_status(recharge_mm),
            level_stats: LevelStats::from_readings(&readings),
            latest: readings.last().cloned(),
            readings,
        }
    }
}
