use anyhow::Result;
use area_price_predictor::config::Config;
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration (file + environment + defaults)
pub fn show(cfg: &Config) -> Result<()> {
    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(cfg)?;
    println!("{}", toml_string);

    info!("Configuration displayed successfully");
    Ok(())
}

/// Execute the config validate command
///
/// Loading already validated the configuration; this prints a summary
pub fn validate(cfg: &Config, path: &Path) {
    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!(
        "  Source: {}",
        if path.exists() {
            path.display().to_string()
        } else {
            format!("{} (not found, using defaults)", path.display())
        }
    );
    println!("  Listen: {}:{}", cfg.server.host, cfg.server.port);
    println!("  Model: {}", cfg.model.path.display());
    println!("  Banner: {}", if cfg.banner.enabled { "enabled" } else { "disabled" });

    info!("Configuration validation successful");
}
