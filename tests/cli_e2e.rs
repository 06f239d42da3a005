use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn wordtally(home: &Path, day: &str) -> Command {
    let mut cmd = Command::cargo_bin("wordtally").unwrap();
    cmd.env("WORDTALLY_HOME", home)
        .env("WORDTALLY_TODAY", day)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn stored(home: &Path, file: &str) -> serde_json::Value {
    let raw = fs::read_to_string(home.join(file)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn observe_accumulates_across_invocations() {
    let home = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();
    let notes = docs.path().join("notes.md");
    fs::write(&notes, "hello world").unwrap();

    wordtally(home.path(), "2024-03-01")
        .current_dir(docs.path())
        .args(["observe", "notes.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("today: 0"));

    fs::write(&notes, "hello world, hello again").unwrap();
    wordtally(home.path(), "2024-03-01")
        .current_dir(docs.path())
        .args(["observe", "notes.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.md: 2 -> 4 (+2)"))
        .stdout(predicate::str::contains("today: 2"));

    let state = stored(home.path(), "daily-stats.json");
    assert_eq!(state["2024-03-01"]["notes.md"]["pre"], 2);
    assert_eq!(state["2024-03-01"]["notes.md"]["cur"], 4);
}

#[test]
fn new_day_starts_from_zero_and_keeps_history() {
    let home = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();
    let draft = docs.path().join("draft.txt");

    fs::write(&draft, "one two").unwrap();
    wordtally(home.path(), "2024-03-01")
        .current_dir(docs.path())
        .args(["observe", "draft.txt"])
        .assert()
        .success();
    fs::write(&draft, "one two three four five").unwrap();
    wordtally(home.path(), "2024-03-01")
        .current_dir(docs.path())
        .args(["observe", "draft.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("today: 3"));

    fs::write(&draft, "one two three four five six").unwrap();
    wordtally(home.path(), "2024-03-02")
        .current_dir(docs.path())
        .args(["observe", "draft.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("today: 0"));

    wordtally(home.path(), "2024-03-02")
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-01"))
        .stdout(predicate::str::contains("2024-03-02"));

    let state = stored(home.path(), "daily-stats.json");
    assert_eq!(state["2024-03-01"]["draft.txt"]["cur"], 5);
    assert_eq!(state["2024-03-02"]["draft.txt"]["pre"], 6);
}

#[test]
fn flush_prints_history_json() {
    let home = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();
    fs::write(docs.path().join("a.md"), "alpha beta").unwrap();

    wordtally(home.path(), "2024-03-01")
        .current_dir(docs.path())
        .args(["observe", "a.md"])
        .assert()
        .success();

    wordtally(home.path(), "2024-03-01")
        .arg("flush")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"2024-03-01\""))
        .stdout(predicate::str::contains("\"a.md\""))
        .stdout(predicate::str::contains("Flushed 1 day(s)"));
}

#[test]
fn first_run_creates_empty_state() {
    let home = TempDir::new().unwrap();

    wordtally(home.path(), "2024-03-01")
        .assert()
        .success()
        .stdout(predicate::str::contains("today: 0"));

    let raw = fs::read_to_string(home.path().join("daily-stats.json")).unwrap();
    assert_eq!(raw, "{}");
}

#[test]
fn corrupt_state_is_preserved_and_replaced() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("daily-stats.json"), "{ not json").unwrap();

    wordtally(home.path(), "2024-03-01")
        .arg("today")
        .assert()
        .success()
        .stderr(predicate::str::contains("unreadable"));

    let backups: Vec<_> = fs::read_dir(home.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("daily-stats.json.corrupt-")
        })
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(backups[0].path()).unwrap(), "{ not json");
}

#[test]
fn non_utf8_state_is_preserved_and_replaced() {
    let home = TempDir::new().unwrap();
    let bytes = [0xff, 0xfe, b'{', b'}'];
    fs::write(home.path().join("daily-stats.json"), bytes).unwrap();

    wordtally(home.path(), "2024-03-01")
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("today: 0"));

    let backup = fs::read_dir(home.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .find(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("daily-stats.json.corrupt-")
        })
        .unwrap();
    assert_eq!(fs::read(backup.path()).unwrap(), bytes);
    assert_eq!(stored(home.path(), "daily-stats.json"), serde_json::json!({}));
}

#[test]
fn show_rejects_malformed_day() {
    let home = TempDir::new().unwrap();

    wordtally(home.path(), "2024-03-01")
        .args(["show", "March 1st"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid day"));
}

#[test]
fn settings_backend_keeps_other_keys() {
    let home = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();
    fs::write(docs.path().join("a.md"), "one two three").unwrap();
    fs::write(home.path().join("data.json"), r#"{"theme":"dark"}"#).unwrap();

    wordtally(home.path(), "2024-03-01")
        .args(["config", "backend", "settings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backend set to settings"));

    wordtally(home.path(), "2024-03-01")
        .current_dir(docs.path())
        .args(["observe", "a.md"])
        .assert()
        .success();

    let settings = stored(home.path(), "data.json");
    assert_eq!(settings["theme"], "dark");
    assert_eq!(settings["counts"]["2024-03-01"]["a.md"]["cur"], 3);
    assert_eq!(
        stored(home.path(), "daily-stats.json"),
        serde_json::json!({})
    );
}

#[test]
fn missing_file_is_a_warning_not_a_failure() {
    let home = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();

    wordtally(home.path(), "2024-03-01")
        .current_dir(docs.path())
        .args(["observe", "nope.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not read"));
}

#[test]
fn paths_lists_state_location() {
    let home = TempDir::new().unwrap();

    wordtally(home.path(), "2024-03-01")
        .arg("paths")
        .assert()
        .success()
        .stdout(predicate::str::contains("daily-stats.json"));
}
