//! References (branches and HEAD)
//!
//! This module manages references which are human-readable names pointing to
//! commits. References can be:
//! - Direct: Containing a commit SHA-1
//! - Symbolic: Pointing to another reference (HEAD -> refs/heads/main)
//!
//! ## Reference Types
//!
//! - HEAD: Special reference pointing to the current branch or commit
//! - Branches: refs/heads/* pointing to branch tip commits
//!
//! ## File Format
//!
//! References are stored as text files containing either:
//! - A 40-character SHA-1 hash (direct reference)
//! - `ref: refs/heads/<name>` (HEAD attached to a branch)
//!
//! Branch files only ever hold direct references. An attached HEAD whose
//! branch file does not exist yet denotes an unborn branch.
//!
//! All ref updates go through a temp file in the same directory followed by
//! a rename, so a crash never leaves a half-written ref behind.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::KitError;
use anyhow::Context;
use derive_new::new;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Prefix of branch ref targets inside the repository metadata directory
pub const HEADS_PREFIX: &str = "refs/heads/";

/// The two shapes HEAD can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// HEAD follows a branch; commits advance the branch ref.
    Attached(BranchName),
    /// HEAD names a commit directly; commits advance HEAD itself.
    Detached(ObjectId),
}

/// Reference manager
///
/// Handles reading and writing references (branches and HEAD) under the
/// repository metadata directory.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository metadata directory (typically `.kit`)
    path: Box<Path>,
}

impl Refs {
    /// Read HEAD and classify it as attached or detached.
    pub fn read_head(&self) -> anyhow::Result<Head> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        Self::parse_head_content(content.trim())
    }

    fn parse_head_content(content: &str) -> anyhow::Result<Head> {
        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);

        if let Some(symref_match) = symref_match {
            let target = &symref_match[1];
            let branch_name = target
                .strip_prefix(HEADS_PREFIX)
                .with_context(|| format!("unsupported symbolic ref target: {target}"))?;

            Ok(Head::Attached(BranchName::try_parse(
                branch_name.to_string(),
            )?))
        } else {
            Ok(Head::Detached(ObjectId::try_parse(content.to_string())?))
        }
    }

    /// Resolve HEAD to a commit ID.
    ///
    /// Returns None when HEAD is attached to an unborn branch.
    pub fn resolve_head(&self) -> anyhow::Result<Option<ObjectId>> {
        match self.read_head()? {
            Head::Attached(branch_name) => self.read_branch(&branch_name),
            Head::Detached(oid) => Ok(Some(oid)),
        }
    }

    /// Resolve HEAD to a commit ID, failing on an unborn branch.
    pub fn require_head(&self) -> anyhow::Result<ObjectId> {
        match self.read_head()? {
            Head::Attached(branch_name) => self
                .read_branch(&branch_name)?
                .ok_or_else(|| KitError::NoCommitsYet(branch_name.to_string()).into()),
            Head::Detached(oid) => Ok(oid),
        }
    }

    /// Read the commit ID a branch points to.
    ///
    /// Returns None when the branch ref file does not exist (unborn branch
    /// or unknown branch).
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);

        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;
        let oid = ObjectId::try_parse(content.trim().to_string())?;

        Ok(Some(oid))
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).exists()
    }

    /// Point HEAD at the given target, attached or detached.
    pub fn move_head(&self, head: &Head) -> anyhow::Result<()> {
        match head {
            Head::Attached(branch_name) => self.write_ref_file(
                &self.head_path(),
                &format!("ref: {}{}", HEADS_PREFIX, branch_name),
            ),
            Head::Detached(oid) => self.write_ref_file(&self.head_path(), oid.as_ref()),
        }
    }

    /// Move the current HEAD target to a new commit.
    ///
    /// When HEAD is attached the branch ref is written (creating it for an
    /// unborn branch); when detached the digest in HEAD itself is replaced.
    pub fn advance_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        match self.read_head()? {
            Head::Attached(branch_name) => {
                self.write_ref_file(&self.branch_path(&branch_name), oid.as_ref())
            }
            Head::Detached(_) => self.write_ref_file(&self.head_path(), oid.as_ref()),
        }
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name) {
            return Err(KitError::BranchAlreadyExists(name.to_string()).into());
        }

        self.write_ref_file(&self.branch_path(name), source_oid.as_ref())
    }

    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        if !heads_path.exists() {
            return Ok(Vec::new());
        }

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(heads_path.as_path()).ok()?;
                // dotted temp names fail branch validation and are skipped
                BranchName::try_parse(relative_path.to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn write_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        let ref_dir = path
            .parent()
            .with_context(|| format!("invalid ref path {:?}", path))?;
        std::fs::create_dir_all(ref_dir)
            .with_context(|| format!("failed to create ref directory {:?}", ref_dir))?;

        let temp_ref_path = ref_dir.join(Self::generate_temp_name());
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_ref_path)
            .with_context(|| format!("failed to open temp ref file {:?}", temp_ref_path))?;
        file.write_all(raw_ref.as_bytes())
            .with_context(|| format!("failed to write temp ref file {:?}", temp_ref_path))?;

        std::fs::rename(&temp_ref_path, path)
            .with_context(|| format!("failed to replace ref file at {:?}", path))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!(".tmp-ref-{}", rand::random::<u32>())
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    pub fn branch_path(&self, name: &BranchName) -> PathBuf {
        self.heads_path().join(name.as_ref())
    }
}
