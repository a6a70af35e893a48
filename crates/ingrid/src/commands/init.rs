use std::path::Path;

use anyhow::{bail, Result};

use crate::config::Config;

const CONFIG_FILE: &str = "ingrid.json";

/// Write a default config file to the current directory
pub fn handle(force: bool) -> Result<()> {
  write_default(Path::new(CONFIG_FILE), force)
}

pub fn write_default(path: &Path, force: bool) -> Result<()> {
  if path.exists() && !force {
    bail!("{} already exists (use --force to overwrite)", path.display());
  }

  Config::default().save_to_file(path)?;
  bentley::success(&format!("Wrote {}", path.display()));
  Ok(())
}
