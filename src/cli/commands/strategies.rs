//! List strategies command.

use anyhow::Result;
use arena_strategies::StrategyRegistry;

pub async fn run() -> Result<()> {
    let registry = StrategyRegistry::new();

    println!("Available Strategies");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for info in registry.list() {
        println!("  {} ({})", info.name, info.kind);
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", info.description);
        println!(
            "  defaults: {}",
            serde_json::to_string(&info.default_params)?
        );
        println!();
    }

    println!("Assign strategies to models in the [models] configuration section.");

    Ok(())
}
