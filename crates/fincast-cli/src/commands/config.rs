//! Configuration command

use std::path::Path;

use anyhow::Result;
use fincast_core::config::default_config_path;
use fincast_core::AnalyticsConfig;
use serde::Serialize;

use super::{load_config, print_json};

#[derive(Serialize)]
struct ConfigOutput<'a> {
    source: String,
    override_path: Option<String>,
    config: &'a AnalyticsConfig,
}

pub fn cmd_config(path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(path)?;
    let override_path = default_config_path();

    let source = match (path, &override_path) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(default)) if default.exists() => default.display().to_string(),
        _ => "built-in defaults".to_string(),
    };

    if json {
        return print_json(&ConfigOutput {
            source,
            override_path: override_path.map(|p| p.display().to_string()),
            config: &config,
        });
    }

    println!();
    println!("⚙️  Analytics Configuration");
    println!("   Source: {}", source);
    if let Some(path) = &override_path {
        println!("   Override path: {}", path.display());
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   [decomposition]");
    println!("     period              {}", config.decomposition.period);
    println!("   [anomaly]");
    println!("     threshold           {}", config.anomaly.threshold);
    println!("   [forecast]");
    println!("     periods_ahead       {}", config.forecast.periods_ahead);
    println!("     variance_ratio      {}", config.forecast.variance_ratio);
    println!("     base_confidence     {}", config.forecast.base_confidence);
    println!("   [recommendations]");
    println!(
        "     low_savings_rate    {}",
        config.recommendations.low_savings_rate
    );
    println!(
        "     excellent_savings   {}",
        config.recommendations.excellent_savings_rate
    );
    println!("     spike_ratio         {}", config.recommendations.spike_ratio);
    println!("     spike_window        {}", config.recommendations.spike_window);

    Ok(())
}
