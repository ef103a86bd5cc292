use assert_fs::fixture::{FileWriteStr, PathChild};
use fake::Fake;
use fake::faker::lorem::en::{Word, Words};
use predicates::prelude::predicate;

mod common;

use common::command::run_kit_command;

#[test]
fn hash_object_prints_digest_without_storing() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    run_kit_command(dir.path(), &["init"]).assert().success();

    let file_name = format!("{}.txt", Word().fake::<String>());
    let file_path = dir.child(file_name.clone());
    let file_content = Words(5..10).fake::<Vec<String>>().join(" ");
    file_path.write_str(&file_content)?;

    let output = run_kit_command(dir.path(), &["hash-object", &file_name])
        .output()?
        .stdout;
    let digest = String::from_utf8(output)?;

    assert_eq!(digest.len(), 40);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));

    // without -w nothing lands in the object database
    let object_path = dir
        .path()
        .join(".kit")
        .join("objects")
        .join(&digest[0..2])
        .join(&digest[2..]);
    assert!(!object_path.exists());

    Ok(())
}

#[test]
fn read_blob_object_successfully() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    run_kit_command(dir.path(), &["init"]).assert().success();

    let file_name = format!("{}.txt", Word().fake::<String>());
    let file_path = dir.child(file_name.clone());
    let file_content = Words(5..10).fake::<Vec<String>>().join(" ");
    file_path.write_str(&file_content)?;

    let output = run_kit_command(dir.path(), &["hash-object", "-w", &file_name])
        .output()?
        .stdout;
    let digest = String::from_utf8(output)?;

    let object_path = dir
        .path()
        .join(".kit")
        .join("objects")
        .join(&digest[0..2])
        .join(&digest[2..]);
    assert!(object_path.exists());

    run_kit_command(dir.path(), &["cat-file", "-p", &digest])
        .assert()
        .success()
        .stdout(predicate::eq(file_content));

    Ok(())
}

#[test]
fn read_blob_object_by_digest_prefix() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    run_kit_command(dir.path(), &["init"]).assert().success();

    let file_name = format!("{}.txt", Word().fake::<String>());
    let file_path = dir.child(file_name.clone());
    let file_content = Words(5..10).fake::<Vec<String>>().join(" ");
    file_path.write_str(&file_content)?;

    let output = run_kit_command(dir.path(), &["hash-object", "-w", &file_name])
        .output()?
        .stdout;
    let digest = String::from_utf8(output)?;

    run_kit_command(dir.path(), &["cat-file", "-p", &digest[0..7]])
        .assert()
        .success()
        .stdout(predicate::eq(file_content));

    Ok(())
}

#[test]
fn read_blob_object_with_too_short_prefix_fails() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    run_kit_command(dir.path(), &["init"]).assert().success();

    run_kit_command(dir.path(), &["cat-file", "-p", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid object id"));

    Ok(())
}

#[test]
fn read_missing_blob_object_fails() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    run_kit_command(dir.path(), &["init"]).assert().success();

    let absent_digest = "a".repeat(40);
    run_kit_command(dir.path(), &["cat-file", "-p", &absent_digest])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    run_kit_command(dir.path(), &["cat-file", "-p", "abcd123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown revision"));

    Ok(())
}
