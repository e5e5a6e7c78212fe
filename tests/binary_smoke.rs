use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Command with an isolated, empty config file so the host's config never leaks in.
fn image_sort(td: &TempDir) -> Command {
    let cfg = td.child("config.xml");
    if !cfg.path().exists() {
        cfg.write_str("<config></config>").unwrap();
    }
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("image_sort"));
    cmd.env("IMAGE_SORT_CONFIG", cfg.path());
    cmd
}

#[test]
fn print_config_succeeds() {
    let td = TempDir::new().unwrap();
    image_sort(&td)
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.xml"));
}

#[test]
fn help_exits_zero() {
    let td = TempDir::new().unwrap();
    image_sort(&td)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--left-dir"));
}

#[test]
fn missing_source_argument_exits_one() {
    let td = TempDir::new().unwrap();
    image_sort(&td).assert().code(1);
}

#[test]
fn missing_left_dir_exits_one() {
    let td = TempDir::new().unwrap();
    td.child("src").create_dir_all().unwrap();
    image_sort(&td)
        .arg(td.child("src").path())
        .arg("--right-dir")
        .arg(td.child("right").path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--left-dir is required"));
}

#[test]
fn missing_source_directory_exits_one() {
    let td = TempDir::new().unwrap();
    image_sort(&td)
        .arg(td.child("nope").path())
        .arg("--left-dir")
        .arg(td.child("l").path())
        .arg("--right-dir")
        .arg(td.child("r").path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn empty_source_exits_zero_without_prompting() {
    let td = TempDir::new().unwrap();
    td.child("src").create_dir_all().unwrap();
    td.child("src").child("notes.txt").touch().unwrap();
    image_sort(&td)
        .arg(td.child("src").path())
        .arg("--left-dir")
        .arg(td.child("l").path())
        .arg("--right-dir")
        .arg(td.child("r").path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No images found"));
    td.child("l").assert(predicate::path::is_dir());
    td.child("r").assert(predicate::path::is_dir());
}

#[test]
fn directories_from_config_file_are_used() {
    let td = TempDir::new().unwrap();
    td.child("src").create_dir_all().unwrap();
    td.child("src").child("a.png").write_str("img").unwrap();
    td.child("config.xml")
        .write_str(&format!(
            "<config><left_dir>{}</left_dir><right_dir>{}</right_dir></config>",
            td.child("keep").path().display(),
            td.child("drop").path().display()
        ))
        .unwrap();

    image_sort(&td)
        .arg(td.child("src").path())
        .write_stdin("r\n")
        .assert()
        .success();
    td.child("drop").child("a.png").assert("img");
}

#[test]
fn scripted_session_moves_and_undoes() {
    let td = TempDir::new().unwrap();
    td.child("src").create_dir_all().unwrap();
    for name in ["a.png", "b.txt", "c.JPG"] {
        td.child("src").child(name).write_str(name).unwrap();
    }

    image_sort(&td)
        .arg(td.child("src").path())
        .arg("--left-dir")
        .arg(td.child("l").path())
        .arg("--right-dir")
        .arg(td.child("r").path())
        .write_stdin("l\nr\nu\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 images"))
        .stdout(predicate::str::contains("1 moved left, 0 moved right, 0 skipped, 1 undone"));

    td.child("l").child("a.png").assert(predicate::path::exists());
    td.child("src").child("c.JPG").assert(predicate::path::exists());
    td.child("src").child("b.txt").assert(predicate::path::exists());
    td.child("r").child("c.JPG").assert(predicate::path::missing());
}

#[test]
fn dry_run_moves_nothing() {
    let td = TempDir::new().unwrap();
    td.child("src").create_dir_all().unwrap();
    td.child("src").child("a.png").touch().unwrap();

    image_sort(&td)
        .arg(td.child("src").path())
        .arg("--left-dir")
        .arg(td.child("l").path())
        .arg("--right-dir")
        .arg(td.child("r").path())
        .arg("--dry-run")
        .write_stdin("l\n")
        .assert()
        .success();

    td.child("src").child("a.png").assert(predicate::path::exists());
    td.child("l").child("a.png").assert(predicate::path::missing());
}
