//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (record and config loading, JSON output)
//! - `config` - Effective configuration display
//! - `forecast` - Forecast and recommendation commands
//! - `reports` - Summary, trend, decomposition and anomaly commands, plus the full report

pub mod config;
pub mod core;
pub mod forecast;
pub mod reports;

// Re-export command functions for main.rs
pub use config::*;
pub use core::*;
pub use forecast::*;
pub use reports::*;

/// Format a signed amount with two decimals and a leading `$`
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}
