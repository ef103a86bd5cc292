//! Object identifier (SHA-1 digest)
//!
//! Digests are 40-character lowercase hexadecimal strings computed over an
//! object's serialized form. They uniquely identify every object in the
//! store (blobs, trees, commits).
//!
//! ## Format
//!
//! - Full: 40 hex characters
//! - Short: first 7 characters, for display
//!
//! ## Storage
//!
//! Objects live at `.kit/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::KitError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Validated 40-character hexadecimal object digest.
///
/// Serializes as its plain hex string, so index files and tree payloads
/// round-trip through JSON without a wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate a digest from a string.
    ///
    /// Rejects anything that is not exactly 40 hex characters.
    pub fn try_parse(id: String) -> Result<Self, KitError> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(KitError::InvalidObjectId(id));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(KitError::InvalidObjectId(id));
        }
        Ok(Self(id.to_lowercase()))
    }

    /// Convert to the fan-out path used by the object store.
    ///
    /// Splits the digest as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// Abbreviated form for display (first 7 characters).
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl TryFrom<String> for ObjectId {
    type Error = KitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_parse(value)
    }
}

impl From<ObjectId> for String {
    fn from(value: ObjectId) -> Self {
        value.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
