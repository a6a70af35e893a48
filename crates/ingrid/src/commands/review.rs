use std::io;

use anyhow::Result;

use crate::commands::{load_session, row_index, warn_if_overwriting};
use crate::config::Config;
use crate::stepper::Stepper;

pub fn handle(config: &Config, start: Option<usize>) -> Result<()> {
  let (store, mut session) = load_session(config)?;

  if session.is_empty() {
    bentley::info("No rows to review.");
    return Ok(());
  }

  let start = match start {
    Some(number) => row_index(number, &session)?,
    None if store.source() == store.output() => session.first_unreviewed().unwrap_or(0),
    None => 0,
  };
  session.jump_to(start)?;
  warn_if_overwriting(&store);

  bentley::info("Type a label and press enter. :h for help.");
  let mut stepper = Stepper::new(&mut session, &store)
    .with_preview(config.columns.preview.as_deref())
    .with_codebook(config.codebook.as_deref());
  stepper.run(io::stdin().lock())?;

  Ok(())
}
