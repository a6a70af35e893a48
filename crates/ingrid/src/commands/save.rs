use anyhow::Result;

use crate::commands::{load_session, warn_if_overwriting};
use crate::config::Config;

pub fn handle(config: &Config) -> Result<()> {
  let (store, session) = load_session(config)?;
  warn_if_overwriting(&store);
  store.persist(&session)?;

  bentley::success(&format!("Saved {} rows to {}", session.len(), store.output().display()));
  Ok(())
}
