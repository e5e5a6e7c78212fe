use std::fs;

use image_sort::config::validate_and_normalize;
use image_sort::{ArgumentError, Config, DirectoryError};
use tempfile::tempdir;

#[test]
fn creates_missing_destinations_and_canonicalizes() {
    let td = tempdir().unwrap();
    let base = dunce::canonicalize(td.path()).unwrap();
    let src = base.join("src");
    fs::create_dir(&src).unwrap();

    let mut cfg = Config::new(&src, base.join("keep"), base.join("drop/"));
    let targets = validate_and_normalize(&mut cfg).expect("validate");

    assert!(base.join("keep").is_dir());
    assert!(base.join("drop").is_dir());
    assert_eq!(targets.left, base.join("keep"));
    assert_eq!(targets.right, base.join("drop"));
    assert_eq!(cfg.source_dir, src);
}

#[test]
fn only_one_level_is_created() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    fs::create_dir(&src).unwrap();

    let mut cfg = Config::new(&src, td.path().join("a/b/c"), td.path().join("r"));
    let err = validate_and_normalize(&mut cfg).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DirectoryError>(),
        Some(DirectoryError::Create { .. })
    ));
    assert!(!td.path().join("a").exists());
}

#[test]
fn missing_source_is_reported() {
    let td = tempdir().unwrap();
    let mut cfg = Config::new(td.path().join("nope"), td.path().join("l"), td.path().join("r"));
    let err = validate_and_normalize(&mut cfg).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DirectoryError>(),
        Some(DirectoryError::NotFound { .. })
    ));
}

#[test]
fn file_as_destination_is_rejected() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    fs::create_dir(&src).unwrap();
    let file = td.path().join("left.png");
    fs::write(&file, b"x").unwrap();

    let mut cfg = Config::new(&src, &file, td.path().join("r"));
    let err = validate_and_normalize(&mut cfg).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DirectoryError>(),
        Some(DirectoryError::NotADirectory { name: "left directory", .. })
    ));
}

#[test]
fn same_directory_twice_is_rejected() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    fs::create_dir(&src).unwrap();
    let both = td.path().join("both");

    let mut cfg = Config::new(&src, &both, td.path().join(".").join("both"));
    let err = validate_and_normalize(&mut cfg).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ArgumentError>(),
        Some(ArgumentError::SameDirectory { .. })
    ));

    let mut cfg = Config::new(&src, &src, td.path().join("r"));
    let err = validate_and_normalize(&mut cfg).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ArgumentError>(),
        Some(ArgumentError::SameDirectory { first: "source directory", .. })
    ));
}

#[test]
fn missing_right_dir_and_zero_history_are_argument_errors() {
    let td = tempdir().unwrap();
    let mut cfg = Config::new(td.path(), td.path().join("l"), td.path().join("r"));
    cfg.right_dir = None;
    let err = validate_and_normalize(&mut cfg).unwrap_err();
    assert!(err.to_string().contains("--right-dir"), "err: {err}");

    let mut cfg = Config::new(td.path(), td.path().join("l"), td.path().join("r"));
    cfg.history_capacity = 0;
    let err = validate_and_normalize(&mut cfg).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ArgumentError>(),
        Some(ArgumentError::ZeroHistory)
    ));
}
