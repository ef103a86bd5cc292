//! Commit object
//!
//! Commits are immutable snapshots of the repository with history metadata:
//! - A tree object ID (the snapshot)
//! - Parent commit ID(s) (zero for the root commit)
//! - A timestamp with timezone
//! - The commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! timestamp <unix-seconds> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::KitError;
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, Write};

/// Environment override for the commit timestamp, `%Y-%m-%d %H:%M:%S %z`.
/// Used by tests that need deterministic digests.
pub const COMMIT_DATE_ENV: &str = "KIT_COMMIT_DATE";

/// Commit object tying a tree snapshot into the history graph.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs (empty for the root commit)
    parents: Vec<ObjectId>,
    /// Tree object ID representing the snapshot
    tree_oid: ObjectId,
    /// When the commit was recorded
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    /// Commit message
    message: String,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        tree_oid: ObjectId,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
        message: String,
    ) -> Self {
        Commit {
            parents,
            tree_oid,
            timestamp,
            message,
        }
    }

    /// The commit timestamp to record: `KIT_COMMIT_DATE` when set and
    /// parseable, the current local time otherwise.
    pub fn timestamp_now() -> chrono::DateTime<chrono::FixedOffset> {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date_str| {
                chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z").ok()
            })
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    /// First line of the commit message, for short-form display.
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    fn body(&self) -> String {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree_oid.as_ref()));
        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();
        content_bytes.write_all(self.body().as_bytes())?;

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)
            .map_err(|_| KitError::CorruptObject("non-utf8 commit body".to_string()))?;
        let mut lines = content.lines();

        let tree_line = lines
            .next()
            .context("invalid commit object: missing tree line")?;
        let tree_oid = tree_line
            .strip_prefix("tree ")
            .context("invalid commit object: invalid tree line")?
            .to_string();
        let tree_oid = ObjectId::try_parse(tree_oid)?;

        // zero or more parent lines, then the timestamp line
        let mut parents = Vec::new();
        let mut next_line = lines
            .next()
            .context("invalid commit object: missing timestamp line")?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);

            next_line = lines
                .next()
                .context("invalid commit object: missing timestamp line")?;
        }

        let timestamp_line = next_line
            .strip_prefix("timestamp ")
            .context("invalid commit object: invalid timestamp line")?;
        let timestamp = parse_timestamp(timestamp_line)?;

        // skip the empty line
        lines.next();

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(parents, tree_oid, timestamp, message))
    }
}

fn parse_timestamp(value: &str) -> anyhow::Result<chrono::DateTime<chrono::FixedOffset>> {
    // "<unix-seconds> <timezone>"
    let (seconds, timezone) = value
        .split_once(' ')
        .context("invalid commit object: malformed timestamp")?;
    let seconds: i64 = seconds
        .parse()
        .context("invalid commit object: non-numeric timestamp")?;

    let utc = chrono::DateTime::from_timestamp(seconds, 0)
        .context("invalid commit object: timestamp out of range")?;
    let datetime = chrono::DateTime::parse_from_str(
        &format!("{} {}", utc.format("%Y-%m-%d %H:%M:%S"), timezone),
        "%Y-%m-%d %H:%M:%S %z",
    )
    .context("invalid commit object: malformed timezone")?;

    Ok(datetime)
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.body()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_timestamp() -> chrono::DateTime<chrono::FixedOffset> {
        chrono::DateTime::parse_from_str("2024-03-01 10:30:00 +0200", "%Y-%m-%d %H:%M:%S %z")
            .unwrap()
    }

    fn oid(fill: char) -> ObjectId {
        ObjectId::try_parse(fill.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn root_commit_round_trips() {
        let commit = Commit::new(
            vec![],
            oid('a'),
            sample_timestamp(),
            "initial snapshot".to_string(),
        );

        let serialized = commit.serialize().unwrap();
        let mut reader = Cursor::new(serialized);
        ObjectType::read_from_header(&mut reader).unwrap();
        let parsed = Commit::deserialize(reader).unwrap();

        assert_eq!(commit, parsed);
        assert!(parsed.parent().is_none());
    }

    #[test]
    fn parent_lines_round_trip() {
        let commit = Commit::new(
            vec![oid('1'), oid('2')],
            oid('a'),
            sample_timestamp(),
            "merge two lines of work".to_string(),
        );

        let serialized = commit.serialize().unwrap();
        let mut reader = Cursor::new(serialized);
        ObjectType::read_from_header(&mut reader).unwrap();
        let parsed = Commit::deserialize(reader).unwrap();

        assert_eq!(parsed.parents().len(), 2);
        assert_eq!(parsed.parent(), Some(&oid('1')));
    }

    #[test]
    fn multiline_message_keeps_first_line_short() {
        let commit = Commit::new(
            vec![],
            oid('a'),
            sample_timestamp(),
            "subject line\n\nlonger body text".to_string(),
        );

        assert_eq!(commit.short_message(), "subject line");
    }

    #[test]
    fn rejects_missing_tree_line() {
        let payload = b"commit 9\0timestamp";
        let mut reader = Cursor::new(payload.as_slice());
        ObjectType::read_from_header(&mut reader).unwrap();

        assert!(Commit::deserialize(reader).is_err());
    }
}
