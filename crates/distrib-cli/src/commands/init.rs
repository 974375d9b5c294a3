use std::path::Path;

use anyhow::{Context, bail};
use distrib_core::DistribConfig;
use distrib_core::config::CONFIG_FILE_NAME;

pub fn init(path: &Path) -> anyhow::Result<()> {
    let output = path.join(CONFIG_FILE_NAME);
    if output.exists() {
        bail!("{} already exists", output.display());
    }

    let config = DistribConfig::scaffold();
    std::fs::write(&output, config.to_toml_string()?)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("✓ Generated {}", output.display());
    Ok(())
}
