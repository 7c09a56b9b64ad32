//! List strategies command.

use anyhow::Result;
use folio_strategies::StrategyRegistry;

use crate::cli::StrategiesArgs;

pub fn run(args: StrategiesArgs) -> Result<()> {
    let registry = StrategyRegistry::new();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&registry.list())?);
        return Ok(());
    }

    println!("Available Strategies");
    println!("{}", "=".repeat(59));
    println!();

    for info in registry.list() {
        println!("  {} ({})", info.name, info.key);
        println!("  {}", "-".repeat(55));
        println!("  {}", info.description);
        println!("  defaults: {}", info.default_config);
        println!();
    }

    println!("Use --strategy <key> to select a strategy.");

    Ok(())
}
