//! Single-row review: one post at a time, one input line per action.
//!
//! Plain text is the reviewer's label for the current post. It is committed to the session as
//! soon as the line is read, then the machine label is revealed and the cursor moves on. Lines
//! starting with `:` are commands.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::display;
use crate::session::{Direction, ReviewSession};
use crate::store::CsvStore;

pub const HELP: &str = "\
<text>        set your label for this post and move to the next one
<enter>       next post, label unchanged
:n :next      next post (wraps to the first)
:p :prev      previous post (stops at the first)
:clear        remove your label from this post
:s :save      save labelled rows
:a :accuracy  show accuracy so far
:g :goto N    jump to post N
:all          show all posts
:c :codebook  show the codebook
:h :help      show this help
:q :quit      quit (:q! discards unsaved labels)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepCommand {
  Label(String),
  Clear,
  Next,
  Previous,
  Save,
  Accuracy,
  Goto(usize),
  All,
  Codebook,
  Help,
  Quit { force: bool },
  Unknown(String),
}

/// Interpret one input line. Line endings are stripped; everything else of a label is kept.
pub fn parse(line: &str) -> StepCommand {
  let line = line.trim_end_matches(['\r', '\n']);
  let trimmed = line.trim();

  if trimmed.is_empty() {
    return StepCommand::Next;
  }
  let Some(command) = trimmed.strip_prefix(':') else {
    return StepCommand::Label(line.to_string());
  };

  let mut parts = command.split_whitespace();
  let (name, argument) = (parts.next().unwrap_or_default(), parts.next());
  if parts.next().is_some() {
    return StepCommand::Unknown(trimmed.to_string());
  }

  match (name, argument) {
    ("n" | "next", None) => StepCommand::Next,
    ("p" | "prev", None) => StepCommand::Previous,
    ("clear", None) => StepCommand::Clear,
    ("s" | "save", None) => StepCommand::Save,
    ("a" | "accuracy", None) => StepCommand::Accuracy,
    ("all", None) => StepCommand::All,
    ("c" | "codebook", None) => StepCommand::Codebook,
    ("h" | "help", None) => StepCommand::Help,
    ("q" | "quit", None) => StepCommand::Quit { force: false },
    ("q!" | "quit!", None) => StepCommand::Quit { force: true },
    ("g" | "goto", Some(n)) => match n.parse::<usize>() {
      Ok(n) if n > 0 => StepCommand::Goto(n - 1),
      _ => StepCommand::Unknown(trimmed.to_string()),
    },
    _ => StepCommand::Unknown(trimmed.to_string()),
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  Continue,
  Quit,
}

pub struct Stepper<'a> {
  session: &'a mut ReviewSession,
  store: &'a CsvStore,
  preview: Option<&'a str>,
  codebook: Option<&'a Path>,
  dirty: bool,
}

impl<'a> Stepper<'a> {
  pub fn new(session: &'a mut ReviewSession, store: &'a CsvStore) -> Self {
    Self { session, store, preview: None, codebook: None, dirty: false }
  }

  pub fn with_preview(mut self, preview: Option<&'a str>) -> Self {
    self.preview = preview;
    self
  }

  pub fn with_codebook(mut self, codebook: Option<&'a Path>) -> Self {
    self.codebook = codebook;
    self
  }

  pub fn session(&self) -> &ReviewSession {
    &*self.session
  }

  /// Labels changed since the last successful save
  pub fn is_dirty(&self) -> bool {
    self.dirty
  }

  pub fn apply(&mut self, command: StepCommand) -> Outcome {
    let cursor = self.session.cursor();

    match command {
      StepCommand::Label(label) => {
        if self.set_label(cursor, label) {
          if let Some(row) = self.session.current() {
            display::display_verdict(row);
          }
          self.next();
        }
      }
      StepCommand::Clear => {
        if self.set_label(cursor, String::new()) {
          display::display_row(self.session);
        }
      }
      StepCommand::Next => self.next(),
      StepCommand::Previous => {
        self.session.advance(Direction::Previous);
        display::display_row(self.session);
      }
      StepCommand::Goto(index) => match self.session.jump_to(index) {
        Ok(()) => display::display_row(self.session),
        Err(_) => bentley::error(&format!(
          "There is no post {}; the table has {} posts",
          index + 1,
          self.session.len()
        )),
      },
      StepCommand::Save => self.save(),
      StepCommand::Accuracy => display::display_accuracy(&self.session.compute_accuracy()),
      StepCommand::All => display::display_grid(self.session, self.preview, false),
      StepCommand::Codebook => display::display_codebook(self.codebook),
      StepCommand::Help => println!("{HELP}"),
      StepCommand::Quit { force } => {
        if self.dirty && !force {
          bentley::warn("You have unsaved labels. Use :s to save or :q! to quit without saving.");
          return Outcome::Continue;
        }
        return Outcome::Quit;
      }
      StepCommand::Unknown(input) => {
        bentley::warn(&format!("Unknown command '{input}'. Type :h for help."));
      }
    }

    Outcome::Continue
  }

  /// Read commands from `input` until quit or end of input.
  ///
  /// A line that is not valid UTF-8 is reported and skipped. An I/O failure ends the loop the
  /// same way end of input does, after warning about unsaved labels.
  pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
    display::display_accuracy(&self.session.compute_accuracy());
    display::display_row(self.session);

    let mut buf = Vec::new();
    loop {
      buf.clear();
      let read = prompt().and_then(|()| input.read_until(b'\n', &mut buf));
      let read = match read {
        Ok(read) => read,
        Err(e) => {
          self.warn_unsaved("Input failed");
          return Err(e);
        }
      };
      if read == 0 {
        self.warn_unsaved("Input closed");
        return Ok(());
      }

      let Ok(line) = std::str::from_utf8(&buf) else {
        bentley::error("That line is not valid UTF-8 and was ignored.");
        continue;
      };
      if self.apply(parse(line)) == Outcome::Quit {
        return Ok(());
      }
    }
  }

  fn warn_unsaved(&self, reason: &str) {
    if self.dirty {
      bentley::warn(&format!("{reason} with unsaved labels; they were not saved."));
    }
  }

  fn next(&mut self) {
    let before = self.session.cursor();
    self.session.advance(Direction::Next);
    if self.session.cursor() < before {
      bentley::spotlight("End of the table, back to the first post");
    }
    display::display_row(self.session);
  }

  fn set_label(&mut self, index: usize, label: String) -> bool {
    match self.session.set_human_label(index, label) {
      Ok(()) => {
        self.dirty = true;
        true
      }
      Err(e) => {
        bentley::error(&e.to_string());
        false
      }
    }
  }

  fn save(&mut self) {
    match self.store.persist(self.session) {
      Ok(()) => {
        self.dirty = false;
        bentley::success(&format!("Saved labelled rows to {}", self.store.output().display()));
        display::display_accuracy(&self.session.compute_accuracy());
      }
      Err(e) => bentley::error(&format!("{e}. Your labels are still in this session; try :s again.")),
    }
  }
}

fn prompt() -> io::Result<()> {
  let mut stdout = io::stdout().lock();
  write!(stdout, "label> ")?;
  stdout.flush()
}
