use anyhow::Result;

use crate::commands::{load_session, row_index, warn_if_overwriting};
use crate::config::Config;
use crate::display;

/// Grid edit: change one label and save straight away
pub fn handle(config: &Config, number: usize, label: String) -> Result<()> {
  let (store, mut session) = load_session(config)?;
  let index = row_index(number, &session)?;

  session.set_human_label(index, label)?;
  warn_if_overwriting(&store);
  store.persist(&session)?;

  if let Some(row) = session.row(index) {
    if row.is_reviewed() {
      display::display_verdict(row);
    } else {
      bentley::info(&format!("Cleared label on post {number}"));
    }
  }
  bentley::success(&format!("Saved labelled rows to {}", store.output().display()));
  display::display_accuracy(&session.compute_accuracy());

  Ok(())
}
