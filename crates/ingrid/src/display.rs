use colored::Colorize;
use console::{pad_str, truncate_str, Alignment, Term};

use crate::accuracy::Accuracy;
use crate::row::{row_style, Row, RowStyle};
use crate::session::ReviewSession;

const LABEL_WIDTH: usize = 10;
const MIN_PREVIEW_WIDTH: usize = 20;

/// Width of the terminal on stdout, with a sane fallback when piped
pub fn terminal_width() -> usize {
  let (_, cols) = Term::stdout().size();
  usize::from(cols).max(MIN_PREVIEW_WIDTH + 2 * LABEL_WIDTH + 12)
}

/// The accuracy/progress bar shown above every view
pub fn display_accuracy(accuracy: &Accuracy) {
  match accuracy {
    Accuracy::Undefined => bentley::warn(&accuracy.to_string()),
    Accuracy::Measured { .. } => bentley::success(&accuracy.to_string()),
  }
}

/// Show one row in the stepper.
///
/// The machine label is held back until the reviewer has entered a label of their own.
pub fn display_row(session: &ReviewSession) {
  let Some(row) = session.current() else {
    bentley::info("No rows to review.");
    return;
  };

  bentley::announce(&format!("Showing {} of {}", session.cursor() + 1, session.len()));
  for line in row.content().lines() {
    println!("{line}");
  }
  println!("{}", bentley::banner_line(50, '-'));

  if row.is_reviewed() {
    println!("Your label: {}", row.human_label().cyan());
    display_verdict(row);
  } else {
    println!("Your label: {}", "(none)".dimmed());
  }
}

/// Reveal the machine label next to the reviewer's
pub fn display_verdict(row: &Row) {
  let machine = row.machine_label().trim();
  let machine = if machine.is_empty() { "(none)" } else { machine };

  match row_style(row) {
    RowStyle::Normal => bentley::success(&format!("Machine label: {machine} (agrees)")),
    RowStyle::Flagged => bentley::warn(&format!("Machine label: {machine} (differs)")),
  }
}

/// Text shown for a row in the grid: the preview passenger column when configured, else content
pub fn preview_text<'a>(session: &'a ReviewSession, row: &'a Row, preview: Option<&str>) -> &'a str {
  preview
    .and_then(|name| session.columns().passenger_index(name))
    .and_then(|index| row.passengers().get(index))
    .map(String::as_str)
    .unwrap_or_else(|| row.content())
}

/// One grid line without colour: marker, 1-based index, preview, machine label, human label
pub fn format_grid_line(index: usize, preview: &str, row: &Row, width: usize) -> String {
  let marker = match row_style(row) {
    RowStyle::Flagged => '!',
    RowStyle::Normal => ' ',
  };
  let preview_width = width.saturating_sub(2 * LABEL_WIDTH + 12).max(MIN_PREVIEW_WIDTH);
  let flat = preview.split_whitespace().collect::<Vec<_>>().join(" ");

  format!(
    "{marker} {:>5}  {}  {}  {}",
    index + 1,
    pad_str(&truncate_str(&flat, preview_width, "…"), preview_width, Alignment::Left, None),
    pad_str(row.machine_label().trim(), LABEL_WIDTH, Alignment::Left, Some("…")),
    pad_str(row.human_label().trim(), LABEL_WIDTH, Alignment::Left, Some("…")),
  )
}

/// Print the whole table, flagged rows highlighted
pub fn display_grid(session: &ReviewSession, preview: Option<&str>, flagged_only: bool) {
  let width = terminal_width();
  let header = format_grid_header(width);
  println!("{}", header.bold());

  let mut shown = 0;
  for (index, row) in session.rows().iter().enumerate() {
    let style = row_style(row);
    if flagged_only && style != RowStyle::Flagged {
      continue;
    }

    let line = format_grid_line(index, preview_text(session, row, preview), row, width);
    match style {
      RowStyle::Flagged => println!("{}", line.yellow().bold()),
      RowStyle::Normal => println!("{line}"),
    }
    shown += 1;
  }

  if shown == 0 {
    bentley::info(if flagged_only { "No flagged rows." } else { "No rows." });
  }
}

fn format_grid_header(width: usize) -> String {
  let preview_width = width.saturating_sub(2 * LABEL_WIDTH + 12).max(MIN_PREVIEW_WIDTH);
  format!(
    "  {:>5}  {}  {}  {}",
    "#",
    pad_str("Post", preview_width, Alignment::Left, None),
    pad_str("Machine", LABEL_WIDTH, Alignment::Left, None),
    pad_str("Human", LABEL_WIDTH, Alignment::Left, None),
  )
}

/// Print the codebook file verbatim. It is reference material only; labels are never checked
/// against it.
pub fn display_codebook(path: Option<&std::path::Path>) {
  let Some(path) = path else {
    bentley::info("No codebook configured. Set \"codebook\" in ingrid.json.");
    return;
  };

  match std::fs::read_to_string(path) {
    Ok(text) => {
      bentley::announce("Codebook");
      for line in text.lines() {
        println!("{line}");
      }
    }
    Err(e) => bentley::error(&format!("Could not read codebook {}: {e}", path.display())),
  }
}
