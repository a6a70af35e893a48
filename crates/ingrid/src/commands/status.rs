use anyhow::Result;

use crate::commands::load_session;
use crate::config::Config;
use crate::display;

pub fn handle(config: &Config) -> Result<()> {
  let (store, session) = load_session(config)?;
  let accuracy = session.compute_accuracy();

  bentley::announce("Review Status");
  println!("Input: {}", store.input().display());
  if store.source() != store.input() {
    println!("Resumed from: {}", store.source().display());
  }
  println!("Output: {}", store.output().display());
  println!("Posts: {}", session.len());
  println!("Reviewed: {}", accuracy.reviewed());
  println!("Flagged: {}", session.flagged_count());

  display::display_accuracy(&accuracy);
  Ok(())
}
