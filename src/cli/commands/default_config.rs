//! Default configuration command.

use anyhow::{Context, Result};
use folio_config::AppConfig;

use crate::cli::DefaultConfigArgs;

pub fn run(args: DefaultConfigArgs) -> Result<()> {
    let rendered = AppConfig::default().to_toml()?;

    match &args.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", rendered),
    }

    Ok(())
}
