use anyhow::Result;

use crate::commands::load_session;
use crate::config::Config;
use crate::display;

pub fn handle(config: &Config, flagged_only: bool) -> Result<()> {
  let (_, session) = load_session(config)?;

  display::display_accuracy(&session.compute_accuracy());
  display::display_grid(&session, config.columns.preview.as_deref(), flagged_only);

  Ok(())
}
