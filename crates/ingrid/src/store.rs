//! CSV storage for review sessions.
//!
//! Sessions are read from the input file (or a previous save, when resuming) and written to a
//! separate output file. The input file is never written.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, ReviewError};
use crate::row::Row;
use crate::session::{Columns, ReviewSession};

/// Header names of the three columns the reviewer works with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
  pub content: String,
  pub machine_label: String,
  pub human_label: String,
}

impl Default for ColumnNames {
  fn default() -> Self {
    Self {
      content: "content".to_string(),
      machine_label: "machine_label".to_string(),
      human_label: "human_label".to_string(),
    }
  }
}

#[derive(Debug, Clone)]
pub struct CsvStore {
  input: PathBuf,
  output: PathBuf,
  names: ColumnNames,
  resume: bool,
}

impl CsvStore {
  pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, names: ColumnNames) -> Result<Self> {
    let input = input.into();
    let output = output.into();

    if same_file(&input, &output) {
      return Err(ReviewError::output_is_input(&output));
    }

    Ok(Self { input, output, names, resume: false })
  }

  /// Continue from the last save instead of the pristine input, when one exists
  pub fn with_resume(mut self, resume: bool) -> Self {
    self.resume = resume;
    self
  }

  pub fn input(&self) -> &Path {
    &self.input
  }

  pub fn output(&self) -> &Path {
    &self.output
  }

  /// File `load` will read
  pub fn source(&self) -> &Path {
    if self.resume && self.output.exists() {
      &self.output
    } else {
      &self.input
    }
  }

  /// Saving would replace an earlier save with rows read from the input
  pub fn overwrites_previous_save(&self) -> bool {
    self.source() != self.output() && self.output().exists()
  }

  pub fn load(&self) -> Result<ReviewSession> {
    load_session(self.source(), &self.names)
  }

  /// Write every row and column to the output file, replacing any previous save.
  ///
  /// Rows are written to a temporary file next to the output and renamed into place, so a
  /// failure leaves the previous save intact.
  pub fn persist(&self, session: &ReviewSession) -> Result<()> {
    let fail = |error: &dyn std::fmt::Display| ReviewError::persist(&self.output, error);

    let dir = match self.output.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };
    let mut file = scratch_file(dir).map_err(|e| fail(&e))?;

    {
      let mut writer = csv::Writer::from_writer(file.as_file_mut());
      writer.write_record(session.columns().names()).map_err(|e| fail(&e))?;
      for row in session.rows() {
        writer.write_record(record_for(row, session.columns())).map_err(|e| fail(&e))?;
      }
      writer.flush().map_err(|e| fail(&e))?;
    }

    // A save replaces the contents, not the access rights of an earlier save
    if let Ok(previous) = fs::metadata(&self.output) {
      file.as_file().set_permissions(previous.permissions()).map_err(|e| fail(&e))?;
    }

    file.persist(&self.output).map_err(|e| fail(&e))?;
    tracing::debug!(path = %self.output.display(), rows = session.len(), "session persisted");
    Ok(())
  }
}

/// Read a session from `path`, creating empty label columns the file lacks.
pub fn load_session(path: &Path, names: &ColumnNames) -> Result<ReviewSession> {
  if names.content == names.machine_label
    || names.content == names.human_label
    || names.machine_label == names.human_label
  {
    return Err(ReviewError::load(path, "content, machine label and human label columns must differ"));
  }

  let mut reader = csv::Reader::from_path(path).map_err(|e| ReviewError::load(path, e))?;
  let mut headers: Vec<String> =
    reader.headers().map_err(|e| ReviewError::load(path, e))?.iter().map(str::to_string).collect();

  let content = headers
    .iter()
    .position(|name| *name == names.content)
    .ok_or_else(|| ReviewError::missing_column(&names.content, path))?;
  let machine_label = ensure_column(&mut headers, &names.machine_label);
  let human_label = ensure_column(&mut headers, &names.human_label);
  let columns = Columns::new(headers, content, machine_label, human_label);

  let mut rows = Vec::new();
  for record in reader.records() {
    let record = record.map_err(|e| ReviewError::load(path, e))?;
    let field = |position: usize| record.get(position).unwrap_or_default().to_string();

    let row = Row::new(field(content), field(machine_label))
      .with_human_label(field(human_label))
      .with_passengers(columns.passenger_positions().map(field).collect());
    rows.push(row);
  }

  tracing::debug!(path = %path.display(), rows = rows.len(), "session loaded");
  Ok(ReviewSession::new(columns, rows))
}

/// Temporary file for a save, created with the same mode a plain create would give it
fn scratch_file(dir: &Path) -> std::io::Result<NamedTempFile> {
  let mut builder = tempfile::Builder::new();
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    // open(2) masks this with the umask
    builder.permissions(fs::Permissions::from_mode(0o666));
  }
  builder.tempfile_in(dir)
}

fn ensure_column(headers: &mut Vec<String>, name: &str) -> usize {
  match headers.iter().position(|header| header == name) {
    Some(position) => position,
    None => {
      headers.push(name.to_string());
      headers.len() - 1
    }
  }
}

fn record_for<'a>(row: &'a Row, columns: &Columns) -> Vec<&'a str> {
  let mut passengers = row.passengers().iter();

  (0..columns.names().len())
    .map(|position| {
      if position == columns.content() {
        row.content()
      } else if position == columns.machine_label() {
        row.machine_label()
      } else if position == columns.human_label() {
        row.human_label()
      } else {
        passengers.next().map(String::as_str).unwrap_or_default()
      }
    })
    .collect()
}

fn same_file(a: &Path, b: &Path) -> bool {
  if a == b {
    return true;
  }
  match (fs::canonicalize(a), fs::canonicalize(b)) {
    (Ok(a), Ok(b)) => a == b,
    _ => false,
  }
}
