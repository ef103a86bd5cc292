use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{
    init_repository_dir, read_branch_sha, repository_dir, repository_with_two_commits,
    run_kit_command,
};

#[rstest]
fn branch_pins_the_current_head_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let main_sha = read_branch_sha(dir.path(), "main");

    run_kit_command(dir.path(), &["branch", "topic"])
        .assert()
        .success();

    assert_eq!(read_branch_sha(dir.path(), "topic"), main_sha);

    Ok(())
}

#[rstest]
fn branch_refuses_duplicate_names(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_kit_command(dir.path(), &["branch", "topic"])
        .assert()
        .success();

    run_kit_command(dir.path(), &["branch", "topic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch topic already exists"));

    Ok(())
}

#[rstest]
fn branch_fails_before_the_first_commit(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_kit_command(dir.path(), &["init"]).assert().success();

    run_kit_command(dir.path(), &["branch", "topic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no commits yet on branch 'main'"));

    Ok(())
}

#[rstest]
fn branch_rejects_invalid_names(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_kit_command(dir.path(), &["branch", "bad..name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid branch name"));

    run_kit_command(dir.path(), &["branch", "ends.lock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid branch name"));

    Ok(())
}

#[rstest]
fn branch_listing_marks_the_current_branch(
    repository_with_two_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_two_commits;

    run_kit_command(dir.path(), &["branch"])
        .assert()
        .success()
        .stdout(predicate::eq("  first-commit\n* main\n  second-commit\n"));

    Ok(())
}

#[rstest]
fn branch_listing_has_no_marker_when_detached(
    repository_with_two_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_two_commits;
    let first_sha = read_branch_sha(dir.path(), "first-commit");

    run_kit_command(dir.path(), &["checkout", &first_sha])
        .assert()
        .success();

    run_kit_command(dir.path(), &["branch"])
        .assert()
        .success()
        .stdout(predicate::eq("  first-commit\n  main\n  second-commit\n"));

    Ok(())
}
