//! Groundwater status threshold checking.
//!
//! Station status is never stored; everything that needs a status asks
//! `classify_status` with the current level. Extraction advice shown next to
//! a station is keyed on the same category so the two always agree.

use serde::Serialize;

use crate::model::WaterStatus;

/// Levels strictly above this are `Safe`, in meters.
pub const SAFE_ABOVE_M: f64 = 20.0;

/// Levels strictly above this (and at most `SAFE_ABOVE_M`) are `Warning`.
pub const WARNING_ABOVE_M: f64 = 15.0;

/// Maps a groundwater level to its status category.
///
/// Both boundaries are exclusive from below:
///   level >  20.0         →  Safe
///   15.0 < level <= 20.0  →  Warning
///   level <= 15.0         →  Critical
///
/// Total over every `f64`. NaN fails both comparisons and lands in
/// `Critical`.
pub fn classify_status(level: f64) -> WaterStatus {
    if level > SAFE_ABOVE_M {
        WaterStatus::Safe
    } else if level > WARNING_ABOVE_M {
        WaterStatus::Warning
    } else {
        WaterStatus::Critical
    }
}

/// Extraction guidance attached to a status category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionAdvice {
    pub headline: &'static str,
    pub guidance: &'static str,
    pub actions: [&'static str; 3],
}

/// Returns the extraction guidance for a status category.
pub fn extraction_advice(status: WaterStatus) -> ExtractionAdvice {
    match status {
        WaterStatus::Safe => ExtractionAdvice {
            headline: "Safe for Extraction",
            guidance: "Water levels are sustainable for current usage.",
            actions: [
                "Continue regular monitoring",
                "Maintain current extraction rates",
                "Plan for seasonal variations",
            ],
        },
        WaterStatus::Warning => ExtractionAdvice {
            headline: "Monitor Closely",
            guidance: "Implement conservation measures and monitor daily.",
            actions: [
                "Monitor weekly",
                "Promote water conservation",
                "Review extraction permits",
            ],
        },
        WaterStatus::Critical => ExtractionAdvice {
            headline: "Restrict Extraction",
            guidance: "Immediate action required. Consider alternative water sources.",
            actions: [
                "Ban new bore wells within 2km radius",
                "Implement rainwater harvesting",
                "Monitor daily",
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_exclusive_from_below() {
        assert_eq!(classify_status(20.0), WaterStatus::Warning);
        assert_eq!(classify_status(20.01), WaterStatus::Safe);
        assert_eq!(classify_status(15.0), WaterStatus::Critical);
        assert_eq!(classify_status(15.01), WaterStatus::Warning);
    }

    #[test]
    fn test_negative_and_zero_levels_are_critical() {
        assert_eq!(classify_status(0.0), WaterStatus::Critical);
        assert_eq!(classify_status(-3.5), WaterStatus::Critical);
    }

    #[test]
    fn test_non_finite_levels_are_classified() {
        assert_eq!(classify_status(f64::INFINITY), WaterStatus::Safe);
        assert_eq!(classify_status(f64::NEG_INFINITY), WaterStatus::Critical);
        assert_eq!(classify_status(f64::NAN), WaterStatus::Critical);
    }

    #[test]
    fn test_thresholds_are_ordered() {
        assert!(WARNING_ABOVE_M < SAFE_ABOVE_M);
    }

    #[test]
    fn test_advice_matches_status() {
        assert_eq!(extraction_advice(WaterStatus::Safe).headline, "Safe for Extraction");
        assert_eq!(extraction_advice(WaterStatus::Warning).headline, "Monitor Closely");
        let critical = extraction_advice(WaterStatus::Critical);
        assert_eq!(critical.headline, "Restrict Extraction");
        assert!(critical.actions.contains(&"Monitor daily"));
    }
}
