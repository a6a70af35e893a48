/// One post under review.
///
/// `content` and `machine_label` are fixed at load time; `human_label` is the only field a
/// reviewer can change. Every other column from the source file travels along in `passengers`,
/// in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
  content: String,
  machine_label: String,
  human_label: String,
  passengers: Vec<String>,
}

/// Presentation hint for the grid view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
  Flagged,
  Normal,
}

impl Row {
  pub fn new(content: impl Into<String>, machine_label: impl Into<String>) -> Self {
    Self {
      content: content.into(),
      machine_label: machine_label.into(),
      human_label: String::new(),
      passengers: Vec::new(),
    }
  }

  pub fn with_human_label(mut self, label: impl Into<String>) -> Self {
    self.human_label = label.into();
    self
  }

  pub fn with_passengers(mut self, passengers: Vec<String>) -> Self {
    self.passengers = passengers;
    self
  }

  pub fn content(&self) -> &str {
    &self.content
  }

  pub fn machine_label(&self) -> &str {
    &self.machine_label
  }

  pub fn human_label(&self) -> &str {
    &self.human_label
  }

  pub(crate) fn set_human_label(&mut self, label: String) {
    self.human_label = label;
  }

  pub fn passengers(&self) -> &[String] {
    &self.passengers
  }

  /// A row counts as reviewed once its human label has non-whitespace text
  pub fn is_reviewed(&self) -> bool {
    !self.human_label.trim().is_empty()
  }

  /// Exact comparison after trimming; case and inner whitespace are significant
  pub fn labels_agree(&self) -> bool {
    self.human_label.trim() == self.machine_label.trim()
  }
}

/// `Flagged` when a reviewer entered a label that disagrees with the machine label.
pub fn row_style(row: &Row) -> RowStyle {
  if row.is_reviewed() && !row.labels_agree() {
    RowStyle::Flagged
  } else {
    RowStyle::Normal
  }
}
