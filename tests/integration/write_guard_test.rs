//! Integration tests for the overwrite guard

use rustworkouts::workouts::{
    read_fit, write_fit, write_text, ConvertError, FitOptions, Sport, Workout,
};
use tempfile::tempdir;

#[test]
fn test_existing_fit_file_is_kept() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("existing.fit");
    std::fs::write(&path, b"keep me").unwrap();

    let file = Workout::new("new", Some(Sport::Rowing), Vec::new()).to_fit(&FitOptions::default());
    let err = write_fit(&path, &file, false).unwrap_err();
    assert!(matches!(err, ConvertError::FileExists(_)));
    assert!(err.to_string().contains("existing.fit"));
    assert_eq!(std::fs::read(&path).unwrap(), b"keep me");

    write_fit(&path, &file, true).unwrap();
    assert_eq!(read_fit(&path).unwrap().sport, Some(Sport::Rowing));
}

#[test]
fn test_text_exports_share_the_guard() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.json");

    write_text(&path, "{}", false).unwrap();
    assert!(matches!(
        write_text(&path, "[]", false),
        Err(ConvertError::FileExists(_))
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
}

#[test]
fn test_missing_directory_is_an_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.fit");
    let file = Workout::new("w", None, Vec::new()).to_fit(&FitOptions::default());
    assert!(matches!(
        write_fit(&path, &file, false),
        Err(ConvertError::Io(_))
    ));
}
