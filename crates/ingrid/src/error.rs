use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
  #[error("Failed to load {}: {message}", .path.display())]
  Load { path: PathBuf, message: String },

  #[error("Column '{column}' not found in {}", .path.display())]
  MissingColumn { column: String, path: PathBuf },

  #[error("Output path {} is the input file; refusing to overwrite the source", .path.display())]
  OutputIsInput { path: PathBuf },

  #[error("Row {index} is out of range (session has {len} rows)")]
  RowOutOfRange { index: usize, len: usize },

  #[error("Failed to save {}: {message}", .path.display())]
  Persist { path: PathBuf, message: String },

  #[error("Invalid config {}: {message}", .path.display())]
  Config { path: PathBuf, message: String },
}

impl ReviewError {
  pub fn load(path: &Path, message: impl ToString) -> Self {
    Self::Load { path: path.to_path_buf(), message: message.to_string() }
  }

  pub fn missing_column(column: impl Into<String>, path: &Path) -> Self {
    Self::MissingColumn { column: column.into(), path: path.to_path_buf() }
  }

  pub fn output_is_input(path: &Path) -> Self {
    Self::OutputIsInput { path: path.to_path_buf() }
  }

  pub fn row_out_of_range(index: usize, len: usize) -> Self {
    Self::RowOutOfRange { index, len }
  }

  pub fn persist(path: &Path, message: impl ToString) -> Self {
    Self::Persist { path: path.to_path_buf(), message: message.to_string() }
  }

  pub fn config(path: &Path, message: impl ToString) -> Self {
    Self::Config { path: path.to_path_buf(), message: message.to_string() }
  }
}

pub type Result<T> = std::result::Result<T, ReviewError>;
