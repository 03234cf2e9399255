//! Groundwater recharge estimation by the water-table-rise method.
//!
//! A rise in water level over an interval, multiplied by the aquifer's
//! specific yield, approximates the depth of water added to storage.

use crate::generate::round_half_up;
use crate::model::{Reading, RechargeStatus};

/// Readings between the baseline and the latest reading for the weekly
/// estimate: the baseline sits at index `len - WEEKLY_BASELINE_OFFSET`.
pub const WEEKLY_BASELINE_OFFSET: usize = 7;

/// Recharge in millimeters for a level change from `previous` to `current`
/// (both meters), rounded half-up to 0.01 mm.
///
/// Positive means the water table rose, negative means depletion.
pub fn estimate_recharge(current: f64, previous: f64, specific_yield: f64) -> f64 {
    let delta_m = current - previous;
    round_half_up(delta_m * specific_yield * 1000.0, 100.0)
}

/// Recharge between the latest reading and the weekly baseline.
///
/// Returns `0.0` when the series is too short to have a baseline; no
/// recharge is claimed without a week of data.
pub fn weekly_recharge(readings: &[Reading], specific_yield: f64) -> f64 {
    if readings.len() < WEEKLY_BASELINE_OFFSET {
        return 0.0;
    }
    let baseline = &readings[readings.len() - WEEKLY_BASELINE_OFFSET];
    match readings.last() {
        Some(latest) => estimate_recharge(latest.level_m, baseline.level_m, specific_yield),
        None => 0.0,
    }
}

/// Buckets a recharge estimate (mm) into a qualitative band.
///
///   recharge >  5         →  Positive
///   0 < recharge <= 5     →  SlightPositive
///   -5 < recharge <= 0    →  SlightNegative
///   recharge <= -5        →  Negative
pub fn recharge_status(recharge_mm: f64) -> RechargeStatus {
    if recharge_mm > 5.0 {
        RechargeStatus::Positive
    } else if recharge_mm > 0.0 {
        RechargeStatus::SlightPositive
    } else if recharge_mm > -5.0 {
        RechargeStatus::SlightNegative
    } else {
        RechargeStatus::Negative
    }
}
