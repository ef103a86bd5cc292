use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::collections::BTreeMap;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    );
    write_file(file3);

    run_kit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    kit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

/// Two commits with a branch pinned on each, HEAD left on `main` at the
/// second commit.
#[fixture]
pub fn repository_with_two_commits(repository_dir: TempDir) -> TempDir {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    // First commit
    let file1 = FileSpec::new(
        repository_dir.path().join("file1.txt"),
        "initial content".to_string(),
    );
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("file2.txt"),
        "another initial content".to_string(),
    );
    write_file(file2);

    let nested = FileSpec::new(
        repository_dir.path().join("mydir").join("nested.txt"),
        "nested content".to_string(),
    );
    write_file(nested);

    run_kit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    kit_commit(repository_dir.path(), "First commit")
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["branch", "first-commit"])
        .assert()
        .success();

    // Second commit - modify file1, add file3
    let file1_modified = FileSpec::new(
        repository_dir.path().join("file1.txt"),
        "modified content from second commit".to_string(),
    );
    write_file(file1_modified);

    let file3 = FileSpec::new(
        repository_dir.path().join("file3.txt"),
        "new file in second commit".to_string(),
    );
    write_file(file3);

    run_kit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    kit_commit(repository_dir.path(), "Second commit")
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["branch", "second-commit"])
        .assert()
        .success();

    repository_dir
}

pub fn run_kit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("kit").expect("Failed to find kit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn kit_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_kit_command(dir, &["commit", "-m", message]);
    // %Y-%m-%d %H:%M:%S %z
    cmd.env("KIT_COMMIT_DATE", "2023-01-01 12:00:00 +0000");
    cmd
}

/// Get the current HEAD commit SHA, following the symref when attached
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_path = dir.join(".kit").join("HEAD");
    let head_content = std::fs::read_to_string(head_path)?;

    // HEAD file contains either a commit SHA or a ref like "ref: refs/heads/main"
    if let Some(ref_path) = head_content.strip_prefix("ref: ") {
        let ref_file = dir.join(".kit").join(ref_path.trim());
        let commit_sha = std::fs::read_to_string(ref_file)?;
        Ok(commit_sha.trim().to_string())
    } else {
        Ok(head_content.trim().to_string())
    }
}

pub fn read_head(dir: &Path) -> String {
    let head_path = dir.join(".kit").join("HEAD");
    std::fs::read_to_string(head_path)
        .expect("Failed to read HEAD")
        .trim()
        .to_string()
}

pub fn read_branch_sha(dir: &Path, branch: &str) -> String {
    let branch_path = dir.join(".kit").join("refs").join("heads").join(branch);
    std::fs::read_to_string(branch_path)
        .expect("Failed to read branch ref")
        .trim()
        .to_string()
}

/// Parse the staged path to digest entries out of the index file.
pub fn read_index_entries(dir: &Path) -> BTreeMap<String, String> {
    let index_path = dir.join(".kit").join("index");

    if !index_path.exists() {
        return BTreeMap::new();
    }

    let content = std::fs::read_to_string(index_path).expect("Failed to read index file");
    if content.trim().is_empty() {
        return BTreeMap::new();
    }

    serde_json::from_str(&content).expect("Failed to parse index file")
}

/// Get the parent commit ID of a given commit by using kit cat-file
pub fn get_parent_commit_id(
    dir: &Path,
    commit_id: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = run_kit_command(dir, &["cat-file", "-p", commit_id]).output()?;

    let stdout = String::from_utf8(output.stdout)?;

    // Find the parent line
    for line in stdout.lines() {
        if let Some(oid) = line.strip_prefix("parent ") {
            return Ok(oid.to_string());
        }
    }

    Err("No parent found".into())
}
