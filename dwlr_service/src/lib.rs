//! DWLR groundwater monitoring service.
//!
//! Station registry, synthetic daily readings, and the derived views shown
//! on the monitoring dashboard: status, trend, and recharge estimates.

pub mod alert;
pub mod analysis;
pub mod config;
pub mod generate;
pub mod logging;
pub mod model;
pub mod stations;
