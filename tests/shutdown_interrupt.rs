//! Lives in its own test binary: it flips the process-wide shutdown flag.

use std::io::Cursor;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use serial_test::serial;

use image_sort::output::Painter;
use image_sort::session::run_session;
use image_sort::{FileMover, MoveError, RenameMover, Targets, TriageEngine, shutdown};

#[test]
#[serial]
fn requested_shutdown_refuses_new_moves() {
    let td = TempDir::new().unwrap();
    td.child("left").create_dir_all().unwrap();
    let img = td.child("a.png");
    img.write_str("x").unwrap();

    shutdown::request();
    let err = RenameMover
        .move_to(img.path(), td.child("left").path())
        .unwrap_err();
    shutdown::reset();

    assert!(matches!(err, MoveError::Interrupted(_)));
    img.assert(predicates::path::exists());
}

#[test]
#[serial]
fn requested_shutdown_stops_the_session() {
    let td = TempDir::new().unwrap();
    td.child("src").create_dir_all().unwrap();
    td.child("src").child("a.png").touch().unwrap();
    td.child("left").create_dir_all().unwrap();
    td.child("right").create_dir_all().unwrap();
    let images = vec![td.child("src").child("a.png").path().to_path_buf()];
    let targets = Targets::new(td.child("left").path(), td.child("right").path());
    let mut engine = TriageEngine::new(images, targets, 5, RenameMover);

    shutdown::request();
    let mut out = Vec::new();
    let summary = run_session(&mut engine, Cursor::new("l\n"), &mut out, Painter::plain()).unwrap();
    shutdown::reset();

    assert!(summary.stopped_early);
    assert_eq!(summary.left, 0);
    assert!(String::from_utf8(out).unwrap().contains("interrupted"));
    td.child("src").child("a.png").assert(predicates::path::exists());
}

#[test]
#[serial]
fn busy_guard_clears_on_drop() {
    assert!(!shutdown::is_busy());
    {
        let _g = shutdown::busy();
        assert!(shutdown::is_busy());
    }
    assert!(!shutdown::is_busy());
}
