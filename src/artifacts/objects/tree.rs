//! Tree object
//!
//! A tree is a full snapshot of tracked paths at one point in time: a flat,
//! sorted mapping of repository-relative path to blob digest. It is
//! structurally identical to the index, so snapshotting the index and
//! materializing a tree back into it are both plain map copies.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<json object>`, where the payload is the path to
//! digest mapping rendered as a JSON object. Sorted keys keep the
//! serialization canonical, so identical snapshots always hash identically.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::KitError;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Snapshot of tracked paths as a sorted path to digest mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, ObjectId>,
}

impl Tree {
    pub fn new(entries: BTreeMap<String, ObjectId>) -> Self {
        Tree { entries }
    }

    pub fn get(&self, path: &str) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &ObjectId)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> BTreeMap<String, ObjectId> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content_bytes = serde_json::to_vec(&self.entries)?;

        let mut tree_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        tree_bytes.write_all(header.as_bytes())?;
        tree_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(tree_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let entries: BTreeMap<String, ObjectId> = serde_json::from_slice(&content)
            .map_err(|err| KitError::CorruptObject(format!("invalid tree payload: {err}")))?;

        Ok(Self::new(entries))
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(path, oid)| format!("{}\t{}", oid, path))
            .collect::<Vec<String>>()
            .join("\n")
    }
}
