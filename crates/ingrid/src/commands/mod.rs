pub mod codebook;
pub mod edit;
pub mod grid;
pub mod init;
pub mod review;
pub mod save;
pub mod status;

use std::path::PathBuf;

use anyhow::Result;

use crate::config::Config;
use crate::session::ReviewSession;
use crate::store::CsvStore;

/// Command-line settings that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub config: Option<PathBuf>,
  pub input: Option<PathBuf>,
  pub output: Option<PathBuf>,
  pub no_resume: bool,
}

impl Overrides {
  /// Read the config file (explicit path, else the usual search paths) and layer overrides on it
  pub fn resolve(&self) -> Result<Config> {
    let mut config = match &self.config {
      Some(path) => Config::load_from_file(path)?,
      None => Config::load()?,
    };

    if let Some(input) = &self.input {
      config.input = input.clone();
    }
    if let Some(output) = &self.output {
      config.output = Some(output.clone());
    }
    if self.no_resume {
      config.resume = false;
    }

    Ok(config)
  }
}

pub fn open_store(config: &Config) -> Result<CsvStore> {
  let store = CsvStore::new(&config.input, config.output_path(), config.columns.names())?;
  Ok(store.with_resume(config.resume))
}

/// Open the store and load the session, telling the operator where it came from
pub fn load_session(config: &Config) -> Result<(CsvStore, ReviewSession)> {
  let store = open_store(config)?;
  let session = store.load()?;

  if store.source() == store.output() {
    bentley::info(&format!("Resuming from {}", store.output().display()));
  }
  bentley::verbose(&format!("Loaded {} rows from {}", session.len(), store.source().display()));

  Ok((store, session))
}

/// Saving a session started from the input replaces whatever the last save held
pub fn warn_if_overwriting(store: &CsvStore) {
  if store.overwrites_previous_save() {
    bentley::warn(&format!(
      "{} already holds saved labels; saving this session replaces them with labels from {}",
      store.output().display(),
      store.input().display()
    ));
  }
}

/// Convert a 1-based post number to a row index
pub fn row_index(number: usize, session: &ReviewSession) -> Result<usize> {
  if number == 0 || number > session.len() {
    anyhow::bail!("There is no post {number}; the table has {} posts", session.len());
  }
  Ok(number - 1)
}
