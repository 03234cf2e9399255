/// Command-line front end for the DWLR monitoring service.
///
/// Usage:
///   dwlr_service [--json] [--seed N] [summary]
///   dwlr_service [--json] [--seed N] station <ID> [DAYS]
///
/// Configuration comes from the file named by `DWLR_CONFIG` (a `.env` file
/// in the working directory is honored).

use std::error::Error;

use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dwlr_service::alert::stalenesses::stale_station_ids;
use dwlr_service::analysis::dashboard::{DashboardSummary, StationReport};
use dwlr_service::config::AppConfig;
use dwlr_service::generate::{MAX_DAYS, generate_readings_at};
use dwlr_service::logging::{self, Component};
use dwlr_service::stations::StationRegistry;

enum Command {
    Summary,
    Station { id: String, days: Option<u32> },
}

struct Args {
    json: bool,
    seed: Option<u64>,
    command: Command,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut json = false;
    let mut seed = None;
    let mut positional = Vec::new();

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--seed" => {
                let value = raw.next().ok_or("--seed needs a value")?;
                seed = Some(value.parse::<u64>().map_err(|_| format!("invalid seed '{}'", value))?);
            }
            _ => positional.push(arg),
        }
    }

    let command = match positional.first().map(String::as_str) {
        None | Some("summary") => Command::Summary,
        Some("station") => {
            let id = positional.get(1).ok_or("station needs an id")?.clone();
            let days = match positional.get(2) {
                Some(d) => match d.parse::<u32>() {
                    Ok(n) if n <= MAX_DAYS => Some(n),
                    _ => return Err(format!("day count must be 0..={}, got '{}'", MAX_DAYS, d)),
                },
                None => None,
            };
            Command::Station { id, days }
        }
        Some(other) => return Err(format!("unknown command '{}'", other)),
    };

    Ok(Args { json, seed, command })
}

fn print_summary(registry: &StationRegistry, config: &AppConfig, json: bool) -> Result<(), Box<dyn Error>> {
    let summary = DashboardSummary::from_registry(registry);
    logging::log_dashboard_summary(&summary);

    if let Some(alert) = summary.critical_alert() {
        logging::warn(Component::Analysis, None, &alert);
    }

    let stale = stale_station_ids(registry.list_stations(), config.stale_after_minutes, Utc::now());
    for id in stale {
        logging::warn(Component::Registry, Some(id), "No upload within the freshness window");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Stations: {}", summary.total);
    println!("  safe:     {}", summary.safe);
    println!("  warning:  {}", summary.warning);
    println!("  critical: {}", summary.critical);
    for station in registry.list_stations() {
        println!(
            "  {:<8} {:<20} {:>6.1} m  {}",
            station.id,
            station.name,
            station.current_level_m,
            station.status()
        );
    }
    if !summary.top_depleted.is_empty() {
        println!("Most depleted: {}", summary.top_depleted.join(", "));
    }
    Ok(())
}

fn print_station(
    registry: &StationRegistry,
    config: &AppConfig,
    id: &str,
    days: Option<u32>,
    seed: Option<u64>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let station = registry
        .find_station(id)
        .ok_or_else(|| format!("unknown station '{}'", id))?;

    let days = days.unwrap_or(config.generator.default_days);
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let readings = generate_readings_at(registry, id, days, Utc::now(), &mut rng, &config.generator.settings);
    let report = StationReport::build(station, readings);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} ({})", station.name, station.id);
    println!(
        "  {}, {}  ({:.4}, {:.4})",
        station.location.district, station.location.region, station.location.latitude, station.location.longitude
    );
    println!("  Level:    {:.1} m  [{}]", station.current_level_m, report.status);
    println!("  Trend:    {}", report.trend);
    println!("  Recharge: {:.2} mm/week ({})", report.recharge_mm, report.recharge_status);
    if let Some(stats) = report.level_stats {
        println!(
            "  Range:    {:.1} – {:.1} m, mean {:.2} m over {} readings",
            stats.min_m,
            stats.max_m,
            stats.mean_m,
            report.readings.len()
        );
    }
    println!("  {}: {}", report.advice.headline, report.advice.guidance);
    for action in report.advice.actions {
        println!("    - {}", action);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let args = parse_args(std::env::args().skip(1))?;
    let config = AppConfig::from_env()?;
    config.init_logging()?;

    let registry = match config.station_registry() {
        Ok(registry) => registry,
        Err(e) => {
            logging::log_config_failure("station registry", &e);
            return Err(e.into());
        }
    };
    logging::debug(
        Component::Registry,
        None,
        &format!("{} stations registered", registry.len()),
    );

    match args.command {
        Command::Summary => print_summary(&registry, &config, args.json),
        Command::Station { id, days } => print_station(&registry, &config, &id, days, args.seed, args.json),
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_arguments_is_summary() {
        let parsed = args(&[]).expect("empty args");
        assert!(matches!(parsed.command, Command::Summary));
        assert!(!parsed.json);
    }

    #[test]
    fn test_station_command_with_days_and_flags() {
        let parsed = args(&["--json", "station", "DWLR003", "14", "--seed", "7"]).expect("valid args");
        assert!(parsed.json);
        assert_eq!(parsed.seed, Some(7));
        match parsed.command {
            Command::Station { id, days } => {
                assert_eq!(id, "DWLR003");
                assert_eq!(days, Some(14));
            }
            Command::Summary => panic!("expected station command"),
        }
    }

    #[test]
    fn test_bad_arguments_are_rejected() {
        assert!(args(&["station"]).is_err());
        assert!(args(&["station", "DWLR001", "many"]).is_err());
        assert!(args(&["--seed"]).is_err());
        assert!(args(&["export"]).is_err());
    }

    #[test]
    fn test_day_count_is_bounded() {
        assert!(args(&["station", "DWLR001", "200000000"]).is_err());
        let limit = MAX_DAYS.to_string();
        let parsed = args(&["station", "DWLR001", &limit]).expect("cap itself is allowed");
        match parsed.command {
            Command::Station { days, .. } => assert_eq!(days, Some(MAX_DAYS)),
            Command::Summary => panic!("expected station command"),
        }
    }
}
