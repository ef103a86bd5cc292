use assert_cmd::Command;
use predicates::prelude::predicate;

mod common;

use common::command::{read_head, run_kit_command};

#[test]
fn new_repository_initiated_with_kit_directory() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    let dir_absolute_path = dir.path().canonicalize()?.display().to_string();
    let mut sut = Command::cargo_bin("kit")?;

    sut.arg("init").arg(dir.path());

    sut.assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty Kit repository in .+$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    let kit_path = dir.path().join(".kit");
    assert!(kit_path.join("objects").is_dir());
    assert!(kit_path.join("refs").join("heads").is_dir());
    assert!(kit_path.join("index").is_file());
    assert_eq!(read_head(dir.path()), "ref: refs/heads/main");

    // the default branch is unborn until the first commit
    assert!(!kit_path.join("refs").join("heads").join("main").exists());

    Ok(())
}

#[test]
fn reinit_preserves_existing_head() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;

    run_kit_command(dir.path(), &["init"]).assert().success();

    std::fs::write(dir.path().join(".kit").join("HEAD"), "ref: refs/heads/dev")?;

    run_kit_command(dir.path(), &["init"]).assert().success();

    assert_eq!(read_head(dir.path()), "ref: refs/heads/dev");

    Ok(())
}

#[test]
fn commands_outside_a_repository_fail() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;

    run_kit_command(dir.path(), &["add", "anything.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a kit repository"));

    Ok(())
}
