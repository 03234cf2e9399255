/// Derived views over stations and reading series.
///
/// Every function here is pure: inputs in, values out, no shared state.
///
/// Submodules:
/// - `recharge` — water-table-rise recharge estimate and its bands.
/// - `trend` — rising / falling / stable over the last two weeks.
/// - `dashboard` — overview counts and the per-station report.

pub mod dashboard;
pub mod recharge;
pub mod trend;
