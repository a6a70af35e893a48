//! ## Features
//!
//! - Levelled status lines (info, warn, error, success, verbose)
//! - Multi-line message support with consistent prefixes
//! - Banner displays for headings and important messages
//! - All output to stderr, so stdout stays free for data
//!
//! ## Usage
//!
//! Levelled functions: `info()`, `warn()`, `error()`, `success()`, `verbose()`
//!
//! Banners: `announce()`, `spotlight()`, `as_banner()`

use colored::{Color, Colorize};

/// Severity of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  Verbose,
  Info,
  Warn,
  Error,
  Success,
}

impl Level {
  /// Short tag shown inside the brackets
  pub fn tag(self) -> &'static str {
    match self {
      Level::Verbose => "verb",
      Level::Info => "info",
      Level::Warn => "warn",
      Level::Error => "error",
      Level::Success => "sccs",
    }
  }

  fn color(self) -> Color {
    match self {
      Level::Verbose => Color::Cyan,
      Level::Info => Color::Blue,
      Level::Warn => Color::Yellow,
      Level::Error => Color::Red,
      Level::Success => Color::Green,
    }
  }
}

/// Write raw lines to stderr
pub fn log(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

/// Build the `[tag]` prefix, padded so message text lines up across levels
pub fn format_prefix(level: Level) -> String {
  let tag = level.tag();
  let pad = 7usize.saturating_sub(tag.len() + 2);
  format!("[{}]{:<pad$}", tag.color(level.color()).bold(), "")
}

/// Prefix every line of `message` and return the formatted lines
pub fn format_lines(level: Level, message: &str) -> Vec<String> {
  let prefix = format_prefix(level);
  message.lines().map(|line| format!("{prefix} {line}")).collect()
}

/// Emit a message at the given level
pub fn emit(level: Level, message: &str) {
  for line in format_lines(level, message) {
    log(&line);
  }
}

pub fn verbose(message: &str) {
  emit(Level::Verbose, message);
}

/// General information
pub fn info(message: &str) {
  emit(Level::Info, message);
}

/// Something needs attention
pub fn warn(message: &str) {
  emit(Level::Warn, message);
}

/// Something went wrong
pub fn error(message: &str) {
  emit(Level::Error, message);
}

/// Something completed successfully
pub fn success(message: &str) {
  emit(Level::Success, message);
}

/// Create a banner line of the specified length and character
pub fn banner_line(length: usize, ch: char) -> String {
  ch.to_string().repeat(length)
}

/// Display a message between two banner lines
pub fn as_banner<F>(log_fn: F, message: &str, width: Option<usize>, border_char: Option<char>)
where
  F: Fn(&str),
{
  let banner = banner_line(width.unwrap_or(50), border_char.unwrap_or('='));

  log_fn(&banner);
  log_fn(message);
  log_fn(&banner);
}

/// Section heading
pub fn announce(message: &str) {
  as_banner(|msg| log(&msg.blue().bold().to_string()), message, Some(50), Some('-'));
}

/// Highlight something the operator should not miss
pub fn spotlight(message: &str) {
  as_banner(|msg| log(&msg.yellow().bold().to_string()), message, Some(40), Some('*'));
}
