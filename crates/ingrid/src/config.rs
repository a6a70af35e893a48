//! Configuration management for Ingrid
//!
//! A JSON file names the table to review, where labelled results go, and which columns hold the
//! content and labels. Every field has a default, so a missing file is not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ReviewError};
use crate::store::ColumnNames;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
  /// Table of posts to review
  #[serde(default = "default_input")]
  pub input: PathBuf,
  /// Where labelled rows are saved; derived from `input` when absent
  #[serde(default)]
  pub output: Option<PathBuf>,
  /// Pick up from the last save instead of the pristine input
  #[serde(default = "default_resume")]
  pub resume: bool,
  #[serde(default)]
  pub columns: ColumnConfig,
  /// Plain-text topic codebook shown to the reviewer
  #[serde(default)]
  pub codebook: Option<PathBuf>,
}

/// Column names in the input table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
  #[serde(default = "default_content_column")]
  pub content: String,
  #[serde(default = "default_machine_label_column")]
  pub machine_label: String,
  #[serde(default = "default_human_label_column")]
  pub human_label: String,
  /// Passenger column shown in the grid instead of the content, e.g. a plain-text variant
  #[serde(default)]
  pub preview: Option<String>,
}

fn default_input() -> PathBuf {
  PathBuf::from("posts.csv")
}
fn default_resume() -> bool {
  true
}
fn default_content_column() -> String {
  "content".to_string()
}
fn default_machine_label_column() -> String {
  "machine_label".to_string()
}
fn default_human_label_column() -> String {
  "human_label".to_string()
}

impl Default for ColumnConfig {
  fn default() -> Self {
    Self {
      content: default_content_column(),
      machine_label: default_machine_label_column(),
      human_label: default_human_label_column(),
      preview: None,
    }
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      input: default_input(),
      output: None,
      resume: default_resume(),
      columns: ColumnConfig::default(),
      codebook: None,
    }
  }
}

impl ColumnConfig {
  pub fn names(&self) -> ColumnNames {
    ColumnNames {
      content: self.content.clone(),
      machine_label: self.machine_label.clone(),
      human_label: self.human_label.clone(),
    }
  }
}

impl Config {
  pub const SEARCH_PATHS: [&'static str; 3] = [".ingrid.json", "ingrid.json", ".ingrid/config.json"];

  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ReviewError::config(path, e))?;
    serde_json::from_str(&content).map_err(|e| ReviewError::config(path, e))
  }

  /// Load the first config file found under `dir`, or defaults
  pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
    for path in Self::SEARCH_PATHS {
      let candidate = dir.as_ref().join(path);
      if candidate.exists() {
        tracing::debug!(path = %candidate.display(), "using config file");
        return Self::load_from_file(candidate);
      }
    }

    Ok(Config::default())
  }

  /// Load configuration from the current directory or defaults
  pub fn load() -> Result<Self> {
    Self::load_from_dir(".")
  }

  /// Save configuration to a file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(self).map_err(|e| ReviewError::config(path, e))?;
    std::fs::write(path, content).map_err(|e| ReviewError::config(path, e))
  }

  /// Configured output path, or `<input stem>_labeled.csv` beside the input
  pub fn output_path(&self) -> PathBuf {
    match &self.output {
      Some(output) => output.clone(),
      None => {
        let stem = self.input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        self.input.with_file_name(format!("{stem}_labeled.csv"))
      }
    }
  }
}
