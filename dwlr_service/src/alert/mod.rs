/// Status thresholds and station freshness checks.
///
/// Submodules:
/// - `thresholds` — level → status category, extraction advice.
/// - `stalenesses` — flags stations whose last upload is too old.

pub mod stalenesses;
pub mod thresholds;
