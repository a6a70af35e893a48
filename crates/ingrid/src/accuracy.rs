use std::fmt;

/// Agreement between machine and human labels over the reviewed rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
  /// No row has a human label yet
  Undefined,
  Measured { correct: usize, reviewed: usize },
}

impl Accuracy {
  pub fn from_counts(correct: usize, reviewed: usize) -> Self {
    if reviewed == 0 {
      Accuracy::Undefined
    } else {
      Accuracy::Measured { correct, reviewed }
    }
  }

  /// Percentage of reviewed rows where the labels agree, `None` when nothing is reviewed
  pub fn percent(&self) -> Option<f64> {
    match *self {
      Accuracy::Undefined => None,
      Accuracy::Measured { correct, reviewed } => Some(correct as f64 / reviewed as f64 * 100.0),
    }
  }

  pub fn reviewed(&self) -> usize {
    match *self {
      Accuracy::Undefined => 0,
      Accuracy::Measured { reviewed, .. } => reviewed,
    }
  }
}

impl fmt::Display for Accuracy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (*self, self.percent()) {
      (Accuracy::Measured { correct, reviewed }, Some(percent)) => {
        write!(f, "Accuracy: {percent:.1}% ({correct}/{reviewed})")
      }
      _ => write!(f, "No human labels entered yet."),
    }
  }
}
