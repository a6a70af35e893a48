use anyhow::Result;

use crate::config::Config;
use crate::display;

pub fn handle(config: &Config) -> Result<()> {
  display::display_codebook(config.codebook.as_deref());
  Ok(())
}
