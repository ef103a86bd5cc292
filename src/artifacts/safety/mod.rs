//! Path safety and ignore handling
//!
//! Everything that decides whether a path may be touched at all:
//!
//! - `repo_path`: lexical validation that a user-supplied path stays inside
//!   the repository root
//! - `ignore_rules`: `.kitignore` pattern matching for working-tree scans

pub mod ignore_rules;
pub mod repo_path;
