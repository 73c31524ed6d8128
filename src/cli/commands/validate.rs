//! Validate configuration command.

use anyhow::Result;
use arena_config::load_config;
use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {:?}", path),
        None => println!("Validating defaults and environment overrides"),
    }

    let config = load_config(config_path)?;
    config.validate()?;

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Feed endpoint: {}", config.feed.base_url);
    println!("Feed interval: {}s", config.feed.interval_secs);
    println!("Tick interval: {}ms", config.engine.tick_interval_ms);
    println!("Initial capital: ${}", config.engine.initial_capital);
    println!("Models:");
    for model in &config.models {
        println!("  {} ({})", model.name, model.strategy);
    }

    Ok(())
}
