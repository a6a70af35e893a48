use std::fs;
use std::path::Path;

use ingrid::store::load_session;
use ingrid::{Accuracy, ColumnNames, CsvStore, ReviewError};
use tempfile::TempDir;

fn original_names() -> ColumnNames {
  ColumnNames {
    content: "html".to_string(),
    machine_label: "gpt_subtopic".to_string(),
    human_label: "user_subtopic".to_string(),
  }
}

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
  let path = dir.path().join(name);
  fs::write(&path, contents).unwrap();
  path
}

const POSTS: &str = "\
html,full_text,gpt_subtopic
\"<p>Rates, again</p>\",\"Rates, again\",6.1
\"<p>Say \"\"hi\"\"</p>\",\"line one
line two\",10.10
<p>Ukraine</p>,Ukraine,9.2
";

#[test]
fn test_load_creates_missing_human_label_column() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", POSTS);

  let session = load_session(&input, &original_names()).unwrap();

  assert_eq!(session.len(), 3);
  assert_eq!(session.columns().names(), ["html", "full_text", "gpt_subtopic", "user_subtopic"]);
  assert!(session.rows().iter().all(|row| row.human_label().is_empty()));
  assert_eq!(session.compute_accuracy(), Accuracy::Undefined);
}

#[test]
fn test_load_keeps_labels_as_text() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", POSTS);

  let session = load_session(&input, &original_names()).unwrap();

  assert_eq!(session.row(1).unwrap().machine_label(), "10.10");
  assert_eq!(session.row(1).unwrap().content(), "<p>Say \"hi\"</p>");
  assert_eq!(session.row(1).unwrap().passengers(), ["line one\nline two"]);
}

#[test]
fn test_load_creates_missing_machine_label_column() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", "content\nfirst\nsecond\n");

  let session = load_session(&input, &ColumnNames::default()).unwrap();

  assert_eq!(session.columns().names(), ["content", "machine_label", "human_label"]);
  assert_eq!(session.row(0).unwrap().machine_label(), "");
  assert_eq!(session.row(1).unwrap().content(), "second");
}

#[test]
fn test_load_missing_content_column_fails() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", "text,machine_label\nhello,1.1\n");

  let err = load_session(&input, &ColumnNames::default()).unwrap_err();
  assert!(matches!(err, ReviewError::MissingColumn { ref column, .. } if column == "content"));
}

#[test]
fn test_load_missing_file_fails() {
  let dir = TempDir::new().unwrap();

  let err = load_session(&dir.path().join("nope.csv"), &ColumnNames::default()).unwrap_err();
  assert!(matches!(err, ReviewError::Load { .. }));
}

#[test]
fn test_load_ragged_rows_fail() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", "content,machine_label\na,1.1\nb,2.1,extra\n");

  let err = load_session(&input, &ColumnNames::default()).unwrap_err();
  assert!(matches!(err, ReviewError::Load { .. }));
}

#[test]
fn test_load_rejects_colliding_column_names() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", "content\na\n");
  let names = ColumnNames {
    content: "content".to_string(),
    machine_label: "label".to_string(),
    human_label: "label".to_string(),
  };

  assert!(matches!(load_session(&input, &names), Err(ReviewError::Load { .. })));
}

#[test]
fn test_persist_round_trip() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", POSTS);
  let output = dir.path().join("posts_labeled.csv");
  let store = CsvStore::new(&input, &output, original_names()).unwrap();

  let mut session = store.load().unwrap();
  session.set_human_label(0, "6.1").unwrap();
  session.set_human_label(1, " 10.1 ").unwrap();
  store.persist(&session).unwrap();

  let reloaded = load_session(&output, &original_names()).unwrap();
  assert_eq!(reloaded.columns(), session.columns());
  assert_eq!(reloaded.rows(), session.rows());
  assert_eq!(reloaded.compute_accuracy(), Accuracy::Measured { correct: 1, reviewed: 2 });
}

#[test]
fn test_persist_keeps_column_order_and_passengers() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "in.csv", "id,machine_label,content,human_label,source\n7,1.1,hello,,feed\n");
  let output = dir.path().join("out.csv");
  let store = CsvStore::new(&input, &output, ColumnNames::default()).unwrap();

  let mut session = store.load().unwrap();
  session.set_human_label(0, "1.2").unwrap();
  store.persist(&session).unwrap();

  let written = fs::read_to_string(&output).unwrap();
  assert_eq!(written, "id,machine_label,content,human_label,source\n7,1.1,hello,1.2,feed\n");
}

#[test]
fn test_persist_is_idempotent() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", POSTS);
  let output = dir.path().join("labeled.csv");
  let store = CsvStore::new(&input, &output, original_names()).unwrap();
  let session = store.load().unwrap();

  store.persist(&session).unwrap();
  let first = fs::read(&output).unwrap();
  store.persist(&session).unwrap();
  let second = fs::read(&output).unwrap();

  assert_eq!(first, second);
}

#[test]
fn test_persist_never_touches_input() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", POSTS);
  let store = CsvStore::new(&input, dir.path().join("labeled.csv"), original_names()).unwrap();

  let mut session = store.load().unwrap();
  session.set_human_label(2, "9.2").unwrap();
  store.persist(&session).unwrap();

  assert_eq!(fs::read_to_string(&input).unwrap(), POSTS);
}

#[test]
fn test_output_same_as_input_is_rejected() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", POSTS);

  let err = CsvStore::new(&input, &input, original_names()).unwrap_err();
  assert!(matches!(err, ReviewError::OutputIsInput { .. }));

  // Different spelling, same file
  let dotted = dir.path().join(".").join("posts.csv");
  let err = CsvStore::new(&input, dotted, original_names()).unwrap_err();
  assert!(matches!(err, ReviewError::OutputIsInput { .. }));
}

#[test]
fn test_persist_failure_leaves_session_intact() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", POSTS);
  let output = dir.path().join("missing_dir").join("labeled.csv");
  let store = CsvStore::new(&input, &output, original_names()).unwrap();

  let mut session = store.load().unwrap();
  session.set_human_label(0, "6.1").unwrap();

  let err = store.persist(&session).unwrap_err();
  assert!(matches!(err, ReviewError::Persist { .. }));
  assert!(!output.exists());
  assert_eq!(session.row(0).unwrap().human_label(), "6.1");
  assert_eq!(session.compute_accuracy(), Accuracy::Measured { correct: 1, reviewed: 1 });
}

#[test]
fn test_resume_reads_previous_save() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", POSTS);
  let output = dir.path().join("labeled.csv");

  let fresh = CsvStore::new(&input, &output, original_names()).unwrap().with_resume(true);
  assert_eq!(fresh.source(), input.as_path());
  assert!(!fresh.overwrites_previous_save());

  let mut session = fresh.load().unwrap();
  session.set_human_label(0, "6.1").unwrap();
  fresh.persist(&session).unwrap();
  assert_eq!(fresh.source(), output.as_path());
  assert!(!fresh.overwrites_previous_save());
  assert_eq!(fresh.load().unwrap().row(0).unwrap().human_label(), "6.1");

  let restart = CsvStore::new(&input, &output, original_names()).unwrap();
  assert_eq!(restart.source(), input.as_path());
  assert!(restart.overwrites_previous_save());
  assert_eq!(restart.load().unwrap().row(0).unwrap().human_label(), "");
}

#[test]
fn test_persist_to_relative_path_without_parent() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", POSTS);
  let store = CsvStore::new(&input, Path::new("ingrid_store_test_output.csv"), original_names()).unwrap();
  let session = store.load().unwrap();

  store.persist(&session).unwrap();
  assert!(Path::new("ingrid_store_test_output.csv").exists());
  fs::remove_file("ingrid_store_test_output.csv").unwrap();
}

#[cfg(unix)]
fn mode_of(path: &Path) -> u32 {
  use std::os::unix::fs::PermissionsExt;
  fs::metadata(path).unwrap().permissions().mode() & 0o777
}

#[cfg(unix)]
#[test]
fn test_persist_keeps_permissions_of_previous_save() {
  use std::os::unix::fs::PermissionsExt;

  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", POSTS);
  let output = write(&dir, "labeled.csv", "stale\n");
  let store = CsvStore::new(&input, &output, original_names()).unwrap();
  let session = store.load().unwrap();

  for mode in [0o644, 0o640] {
    fs::set_permissions(&output, fs::Permissions::from_mode(mode)).unwrap();
    store.persist(&session).unwrap();
    assert_eq!(mode_of(&output), mode);
  }
}

#[cfg(unix)]
#[test]
fn test_first_save_gets_the_default_file_mode() {
  let dir = TempDir::new().unwrap();
  let input = write(&dir, "posts.csv", POSTS);
  let reference = write(&dir, "reference.txt", "");
  let output = dir.path().join("labeled.csv");
  let store = CsvStore::new(&input, &output, original_names()).unwrap();

  store.persist(&store.load().unwrap()).unwrap();
  assert_eq!(mode_of(&output), mode_of(&reference));
}
