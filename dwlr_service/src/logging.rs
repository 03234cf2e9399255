/// Structured logging for the groundwater monitoring service
///
/// Provides context-rich logging with component and station identifiers,
/// timestamps, and severity levels. Supports console output and an
/// optional append-only log file.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;

use crate::analysis::dashboard::DashboardSummary;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Registry,
    Generator,
    Analysis,
    Config,
    System,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Registry => write!(f, "REG"),
            Component::Generator => write!(f, "GEN"),
            Component::Analysis => write!(f, "ANA"),
            Component::Config => write!(f, "CFG"),
            Component::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        // A poisoned lock only means another thread panicked mid-log.
        let mut guard = LOGGER.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(logger);
    }

    fn format_entry(level: LogLevel, component: Component, station_id: Option<&str>, message: &str) -> String {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let station_part = station_id.map(|s| format!(" [{}]", s)).unwrap_or_default();
        format!("{} {} {}{}: {}", timestamp, level, component, station_part, message)
    }

    fn log(&self, level: LogLevel, component: Component, station_id: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let log_entry = Self::format_entry(level, component, station_id, message);
        let station_part = station_id.map(|s| format!(" [{}]", s)).unwrap_or_default();

        // Console output: diagnostics go to stderr so stdout stays clean for
        // report output.
        if self.console_timestamps {
            eprintln!("{}", log_entry);
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", component, station_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", component, station_part, message),
                LogLevel::Info => eprintln!("   {}", message),
                LogLevel::Debug => eprintln!("   [DEBUG] {}{}: {}", component, station_part, message),
            }
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

fn dispatch(level: LogLevel, component: Component, station_id: Option<&str>, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, component, station_id, message);
        }
    }
}

/// Log a general informational message
pub fn info(component: Component, station_id: Option<&str>, message: &str) {
    dispatch(LogLevel::Info, component, station_id, message);
}

/// Log a warning message
pub fn warn(component: Component, station_id: Option<&str>, message: &str) {
    dispatch(LogLevel::Warning, component, station_id, message);
}

/// Log an error message
pub fn error(component: Component, station_id: Option<&str>, message: &str) {
    dispatch(LogLevel::Error, component, station_id, message);
}

/// Log a debug message
pub fn debug(component: Component, station_id: Option<&str>, message: &str) {
    dispatch(LogLevel::Debug, component, station_id, message);
}

// ---------------------------------------------------------------------------
// Structured Logging Helpers
// ---------------------------------------------------------------------------

fn config_failure_message(source: &str, err: &dyn std::error::Error) -> String {
    format!("Loading {} failed: {}", source, err)
}

/// Log a configuration or fixture load failure.
pub fn log_config_failure(source: &str, err: &dyn std::error::Error) {
    error(Component::Config, None, &config_failure_message(source, err));
}

/// Log the overview counts, escalating with the number of critical wells.
pub fn log_dashboard_summary(summary: &DashboardSummary) {
    let message = format!(
        "{} stations: {} safe, {} warning, {} critical",
        summary.total, summary.safe, summary.warning, summary.critical
    );

    if summary.critical == 0 {
        info(Component::Analysis, None, &message);
    } else {
        warn(Component::Analysis, None, &message);
    }
}
