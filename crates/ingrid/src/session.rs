//! The review session store: an ordered table of rows and a cursor.
//!
//! The session is created once from storage and owned by the caller for its whole lifetime.
//! Rows are never added or removed; the only mutation is a reviewer's human label.

use crate::accuracy::Accuracy;
use crate::error::{Result, ReviewError};
use crate::row::{row_style, Row, RowStyle};

/// Header of the table and where the three reviewed columns sit in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
  names: Vec<String>,
  content: usize,
  machine_label: usize,
  human_label: usize,
}

impl Columns {
  /// Positions must be distinct and inside `names`
  pub fn new(names: Vec<String>, content: usize, machine_label: usize, human_label: usize) -> Self {
    debug_assert!(content < names.len() && machine_label < names.len() && human_label < names.len());
    debug_assert!(content != machine_label && content != human_label && machine_label != human_label);
    Self { names, content, machine_label, human_label }
  }

  /// A bare three-column layout: content, machine label, human label
  pub fn standard(content: &str, machine_label: &str, human_label: &str) -> Self {
    Self::new(vec![content.to_string(), machine_label.to_string(), human_label.to_string()], 0, 1, 2)
  }

  pub fn names(&self) -> &[String] {
    &self.names
  }

  pub fn content(&self) -> usize {
    self.content
  }

  pub fn machine_label(&self) -> usize {
    self.machine_label
  }

  pub fn human_label(&self) -> usize {
    self.human_label
  }

  fn is_core(&self, position: usize) -> bool {
    position == self.content || position == self.machine_label || position == self.human_label
  }

  /// Column positions carried as passengers, in file order
  pub fn passenger_positions(&self) -> impl Iterator<Item = usize> + '_ {
    (0..self.names.len()).filter(move |position| !self.is_core(*position))
  }

  /// Index into `Row::passengers` for the named column, if it is a passenger
  pub fn passenger_index(&self, name: &str) -> Option<usize> {
    self.passenger_positions().position(|position| self.names[position] == name)
  }
}

/// Navigation step for the single-row view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Previous,
  Next,
}

#[derive(Debug, Clone)]
pub struct ReviewSession {
  columns: Columns,
  rows: Vec<Row>,
  cursor: usize,
}

impl ReviewSession {
  pub fn new(columns: Columns, rows: Vec<Row>) -> Self {
    Self { columns, rows, cursor: 0 }
  }

  pub fn columns(&self) -> &Columns {
    &self.columns
  }

  pub fn rows(&self) -> &[Row] {
    &self.rows
  }

  pub fn row(&self, index: usize) -> Option<&Row> {
    self.rows.get(index)
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  pub fn cursor(&self) -> usize {
    self.cursor
  }

  /// Row under the cursor, `None` for an empty session
  pub fn current(&self) -> Option<&Row> {
    self.rows.get(self.cursor)
  }

  /// Share of reviewed rows whose human label matches the machine label
  pub fn compute_accuracy(&self) -> Accuracy {
    let (correct, reviewed) = self
      .rows
      .iter()
      .filter(|row| row.is_reviewed())
      .fold((0, 0), |(correct, reviewed), row| {
        (correct + usize::from(row.labels_agree()), reviewed + 1)
      });

    Accuracy::from_counts(correct, reviewed)
  }

  /// Record a reviewer's label. Any string is accepted; the codebook is advisory.
  pub fn set_human_label(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
    let len = self.rows.len();
    let row = self.rows.get_mut(index).ok_or_else(|| ReviewError::row_out_of_range(index, len))?;

    let value = value.into();
    tracing::debug!(index, label = %value, "human label set");
    row.set_human_label(value);
    Ok(())
  }

  /// Move the cursor. `Previous` stops at the first row, `Next` wraps after the last.
  pub fn advance(&mut self, direction: Direction) {
    if self.rows.is_empty() {
      return;
    }

    self.cursor = match direction {
      Direction::Previous => self.cursor.saturating_sub(1),
      Direction::Next => (self.cursor + 1) % self.rows.len(),
    };
  }

  pub fn jump_to(&mut self, index: usize) -> Result<()> {
    if index >= self.rows.len() {
      return Err(ReviewError::row_out_of_range(index, self.rows.len()));
    }
    self.cursor = index;
    Ok(())
  }

  pub fn row_style(&self, index: usize) -> Option<RowStyle> {
    self.rows.get(index).map(row_style)
  }

  pub fn flagged_count(&self) -> usize {
    self.rows.iter().filter(|row| row_style(row) == RowStyle::Flagged).count()
  }

  /// First row without a human label, where a resumed session picks up
  pub fn first_unreviewed(&self) -> Option<usize> {
    self.rows.iter().position(|row| !row.is_reviewed())
  }
}
