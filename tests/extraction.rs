use std::fs;
use std::path::Path;

use datecut::{DatecutError, ExtractConfig, ExtractOutcome, Extractor, TargetDate};
use tempfile::TempDir;

fn write_log(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("test_logs.log");
    fs::write(&path, contents).expect("write log");
    path
}

fn run(dir: &TempDir, contents: &str, date: &str) -> ExtractOutcome {
    let input = write_log(dir.path(), contents);
    let config = ExtractConfig::default()
        .with_input(input)
        .with_output_dir(dir.path().join("output"));
    Extractor::new(config)
        .expect("valid config")
        .run(&TargetDate::parse(date).expect("valid date"))
        .expect("extraction succeeds")
}

const THREE_DAYS: &str = "2024-01-01 08:00:00 INFO boot\n\
                          2024-01-01 09:00:00 INFO ready\n\
                          2024-01-02 10:00:00 WARN disk 80%\n\
                          2024-01-02 11:00:00 INFO rotate\n\
                          2024-01-02 23:59:59 INFO midnight\n\
                          2024-01-03 00:00:01 INFO new day\n";

#[test]
fn extracts_exactly_the_target_day() {
    let dir = TempDir::new().unwrap();
    let outcome = run(&dir, THREE_DAYS, "2024-01-02");

    assert_eq!(outcome.lines(), 3);
    assert_eq!(
        fs::read_to_string(outcome.output_path()).unwrap(),
        "2024-01-02 10:00:00 WARN disk 80%\n\
         2024-01-02 11:00:00 INFO rotate\n\
         2024-01-02 23:59:59 INFO midnight\n"
    );
    assert_eq!(
        outcome.output_path(),
        dir.path().join("output").join("output_2024-01-02.txt")
    );
}

#[test]
fn empty_log_reports_not_found_and_creates_empty_output() {
    let dir = TempDir::new().unwrap();
    let outcome = run(&dir, "", "2024-01-01");

    assert!(matches!(outcome, ExtractOutcome::NotFound { .. }));
    assert_eq!(fs::read(outcome.output_path()).unwrap(), b"");
}

#[test]
fn missing_day_between_neighbours_is_not_found() {
    let dir = TempDir::new().unwrap();
    let outcome = run(
        &dir,
        "2024-01-01 a\n2024-01-01 b\n2024-01-03 c\n2024-01-03 d\n",
        "2024-01-02",
    );

    assert!(matches!(outcome, ExtractOutcome::NotFound { .. }));
    assert_eq!(fs::read(outcome.output_path()).unwrap(), b"");
}

#[test]
fn single_day_log_is_copied_whole() {
    let dir = TempDir::new().unwrap();
    let contents: String = (0..1000)
        .map(|i| format!("2024-05-05 event {i}\n"))
        .collect();
    let outcome = run(&dir, &contents, "2024-05-05");

    assert_eq!(outcome.lines(), 1000);
    assert_eq!(fs::read_to_string(outcome.output_path()).unwrap(), contents);
}

#[test]
fn last_line_without_newline_is_collected() {
    let dir = TempDir::new().unwrap();
    let outcome = run(&dir, "2024-01-01 a\n2024-01-02 b\n2024-01-02 c", "2024-01-02");

    assert_eq!(
        fs::read_to_string(outcome.output_path()).unwrap(),
        "2024-01-02 b\n2024-01-02 c\n"
    );
}

#[test]
fn repeated_runs_produce_identical_output() {
    let dir = TempDir::new().unwrap();
    let first = run(&dir, THREE_DAYS, "2024-01-01");
    let first_bytes = fs::read(first.output_path()).unwrap();

    let second = run(&dir, THREE_DAYS, "2024-01-01");
    let second_bytes = fs::read(second.output_path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn malformed_dates_never_reach_the_extractor() {
    for input in ["2024-1-02", "2024-01-02T00", "yesterday", ""] {
        assert!(matches!(
            TargetDate::parse(input),
            Err(DatecutError::InvalidDate { .. })
        ));
    }
}

#[test]
fn directory_as_input_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = ExtractConfig::default()
        .with_input(dir.path())
        .with_output_dir(dir.path().join("output"));

    let result = Extractor::new(config)
        .unwrap()
        .run(&TargetDate::parse("2024-01-01").unwrap());
    assert!(matches!(result, Err(DatecutError::NotAFile { .. })));
}
